pub const CLASS_EXT: &str = ".class";

// Module descriptors keep their name, the module system resolves them by it
pub const MODULE_INFO: &str = "module-info";

/// `com.foo.Bar` -> `com/foo/Bar`
pub fn dotted_to_binary(name: &str) -> String {
    name.replace('.', "/")
}

/// `com/foo/Bar` -> `com.foo.Bar`
pub fn binary_to_dotted(name: &str) -> String {
    name.replace('/', ".")
}

/// Binary class name of a class entry, `None` for anything else.
///
/// Entries that look like directories (trailing `/`) never carry a class.
pub fn class_name_of_entry(entry_name: &str) -> Option<&str> {
    if entry_name.ends_with('/') {
        return None;
    }
    entry_name
        .strip_suffix(CLASS_EXT)
        .filter(|name| !name.is_empty())
}

/// Whether the class entry is a module descriptor (`module-info.class`,
/// possibly under a multi-release prefix).
pub fn is_module_info(class_name: &str) -> bool {
    class_name
        .rsplit('/')
        .next()
        .is_some_and(|simple| simple == MODULE_INFO)
}
