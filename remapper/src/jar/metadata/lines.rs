use crate::jar::types::MappingTable;

/// Line prefixes (after trimming, any case) carrying a class reference in
/// Bukkit/Bungee style descriptors
pub const YAML_CLASS_KEYS: [&str; 2] = ["main:", "injector:"];

/// Manifest attributes naming a class
pub const MANIFEST_CLASS_ATTRIBUTES: [&str; 4] = [
    "Main-Class",
    "Premain-Class",
    "Agent-Class",
    "Launcher-Agent-Class",
];

// Bytes per manifest line, line break excluded
const MANIFEST_LINE_LIMIT: usize = 72;

/// Rewrites `main:` and `injector:` lines, every other line is kept as is.
/// Each line, the last one included, ends with `\n` in the output.
pub fn remap_plugin_yaml(text: &str, table: &MappingTable) -> String {
    let mut lines = text.split('\n').collect::<Vec<_>>();
    if text.ends_with('\n') {
        lines.pop();
    }

    let mut updated = String::with_capacity(text.len() + 64);
    for line in lines {
        match remap_yaml_line(line, table) {
            Some(rewritten) => updated.push_str(&rewritten),
            None => updated.push_str(line),
        }
        updated.push('\n');
    }
    updated
}

fn remap_yaml_line(line: &str, table: &MappingTable) -> Option<String> {
    let folded = line.trim().to_lowercase();
    if !YAML_CLASS_KEYS.iter().any(|key| folded.starts_with(key)) {
        return None;
    }

    let (body, cr) = match line.strip_suffix('\r') {
        Some(body) => (body, "\r"),
        None => (line, ""),
    };
    let (key, value) = body.split_once(':')?;
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    let remapped = match unquote(value) {
        Some((quote, reference)) => format!("{quote}{}{quote}", table.resolve_dotted(reference)),
        None => table.resolve_dotted(value),
    };
    Some(format!("{}: {}{}", key, remapped, cr))
}

fn unquote(value: &str) -> Option<(char, &str)> {
    ['"', '\''].into_iter().find_map(|quote| {
        value
            .strip_prefix(quote)?
            .strip_suffix(quote)
            .map(|inner| (quote, inner))
    })
}

/// Rewrites class-naming attributes of a JAR manifest. `None` when no
/// attribute changed.
pub fn remap_manifest(text: &str, table: &MappingTable) -> Option<String> {
    let lines = text.split_inclusive('\n').collect::<Vec<_>>();
    let mut updated = String::with_capacity(text.len() + 64);
    let mut changed = false;

    for (idx, line) in lines.iter().enumerate() {
        // Values spread over continuation lines are left alone
        let continued = lines.get(idx + 1).is_some_and(|next| next.starts_with(' '));
        let rewritten = if continued {
            None
        } else {
            remap_manifest_line(line, table)
        };

        match rewritten {
            Some(rewritten) => {
                updated.push_str(&rewritten);
                changed = true;
            }
            None => updated.push_str(line),
        }
    }

    changed.then_some(updated)
}

fn remap_manifest_line(line: &str, table: &MappingTable) -> Option<String> {
    let content = line.trim_end_matches(|c: char| c == '\r' || c == '\n');
    let eol = &line[content.len()..];
    if content.starts_with(' ') {
        return None;
    }

    let (name, value) = content.split_once(':')?;
    if !MANIFEST_CLASS_ATTRIBUTES
        .iter()
        .any(|attribute| attribute.eq_ignore_ascii_case(name.trim()))
    {
        return None;
    }

    let value = value.trim();
    let remapped = table.resolve_dotted(value);
    if remapped == value {
        return None;
    }
    Some(wrap_manifest_line(&format!("{}: {}", name, remapped), eol))
}

/// Splits an over-long manifest line into continuation lines, never inside
/// a character.
fn wrap_manifest_line(line: &str, eol: &str) -> String {
    let separator = if eol.is_empty() { "\r\n" } else { eol };
    let mut out = String::with_capacity(line.len() + 8);
    let mut rest = line;
    let mut limit = MANIFEST_LINE_LIMIT;

    while rest.len() > limit {
        let mut cut = limit;
        while !rest.is_char_boundary(cut) {
            cut -= 1;
        }
        out.push_str(&rest[..cut]);
        out.push_str(separator);
        out.push(' ');
        rest = &rest[cut..];
        limit = MANIFEST_LINE_LIMIT - 1;
    }

    out.push_str(rest);
    out.push_str(eol);
    out
}
