use serde_json::{Map, Value};

use crate::jar::types::MappingTable;

use super::MetadataError;

/// Class lists of a mixin config
pub const MIXIN_SECTIONS: [&str; 4] = ["mixins", "client", "server", "main"];

/// Parses `text` as a JSON object, lets `rule` edit it, and pretty-prints
/// the result when the rule reports a change.
pub fn remap_document(
    text: &str,
    rule: impl FnOnce(&mut Map<String, Value>) -> Result<bool, MetadataError>,
) -> Result<Option<String>, MetadataError> {
    let mut document: Value = serde_json::from_str(text)?;
    let Value::Object(object) = &mut document else {
        return Err(MetadataError::NotAnObject);
    };

    if !rule(object)? {
        return Ok(None);
    }
    Ok(Some(serde_json::to_string_pretty(&document)?))
}

/// `main` of a velocity plugin descriptor.
pub fn remap_velocity_plugin(
    document: &mut Map<String, Value>,
    table: &MappingTable,
) -> Result<(), MetadataError> {
    if let Some(main) = document.get_mut("main") {
        let Value::String(reference) = main else {
            return Err(MetadataError::unexpected("main", "a string"));
        };
        *reference = table.resolve_dotted(reference);
    }
    Ok(())
}

/// Mixin class lists. Entries are relative to `package`; after remapping
/// they are fully qualified and `package` is emptied, since renamed classes
/// no longer share it.
pub fn remap_mixin_config(
    document: &mut Map<String, Value>,
    table: &MappingTable,
) -> Result<(), MetadataError> {
    let package = match document.get("package") {
        None => String::new(),
        Some(Value::String(package)) => package.clone(),
        Some(_) => return Err(MetadataError::unexpected("package", "a string")),
    };

    for section in MIXIN_SECTIONS {
        let Some(Value::Array(mixins)) = document.get_mut(section) else {
            continue;
        };
        for mixin in mixins.iter_mut() {
            let Value::String(name) = mixin else {
                return Err(MetadataError::unexpected(section, "an array of strings"));
            };
            let qualified = if package.is_empty() {
                name.clone()
            } else {
                format!("{}.{}", package, name)
            };
            *name = table.resolve_dotted(&qualified);
        }
    }

    if let Some(package) = document.get_mut("package") {
        *package = Value::String(String::new());
    }
    Ok(())
}

/// `entrypoints` of a fabric mod descriptor. Entries are either a class
/// reference or an object with the reference in `value`.
pub fn remap_fabric_mod(
    document: &mut Map<String, Value>,
    table: &MappingTable,
) -> Result<(), MetadataError> {
    let Some(entrypoints) = document.get_mut("entrypoints") else {
        return Ok(());
    };
    let Value::Object(categories) = entrypoints else {
        return Err(MetadataError::unexpected("entrypoints", "an object"));
    };

    for (category, entries) in categories.iter_mut() {
        let Value::Array(entries) = entries else {
            return Err(MetadataError::unexpected(
                format!("entrypoints.{}", category),
                "an array",
            ));
        };
        for entry in entries.iter_mut() {
            match entry {
                Value::String(reference) => *reference = table.resolve_dotted(reference),
                Value::Object(adapter) => {
                    let Some(value) = adapter.get_mut("value") else {
                        continue;
                    };
                    let Value::String(reference) = value else {
                        return Err(MetadataError::unexpected(
                            format!("entrypoints.{}[].value", category),
                            "a string",
                        ));
                    };
                    *reference = table.resolve_dotted(reference);
                }
                _ => {}
            }
        }
    }
    Ok(())
}

/// Keys of `mappings` and of every object under `data`, which are binary
/// class names. A `mappings` object nested in a `data` entry is remapped as
/// well. Returns whether the document had anything to remap.
pub fn remap_mapping_file(
    document: &mut Map<String, Value>,
    table: &MappingTable,
) -> Result<bool, MetadataError> {
    let mut recognized = false;

    if let Some(mappings) = document.get_mut("mappings") {
        let Value::Object(mappings) = mappings else {
            return Err(MetadataError::unexpected("mappings", "an object"));
        };
        remap_keys(mappings, table);
        recognized = true;
    }

    if let Some(data) = document.get_mut("data") {
        let Value::Object(data) = data else {
            return Err(MetadataError::unexpected("data", "an object"));
        };
        for (key, entry) in data.iter_mut() {
            let Value::Object(mappings) = entry else {
                return Err(MetadataError::unexpected(format!("data.{}", key), "an object"));
            };
            remap_keys(mappings, table);
            if let Some(Value::Object(nested)) = mappings.get_mut("mappings") {
                remap_keys(nested, table);
            }
        }
        recognized = true;
    }

    Ok(recognized)
}

fn remap_keys(mappings: &mut Map<String, Value>, table: &MappingTable) {
    *mappings = std::mem::take(mappings)
        .into_iter()
        .map(|(class, value)| (table.resolve(&class).to_owned(), value))
        .collect();
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::jar::metadata::DescriptorKind;

    fn table() -> MappingTable {
        MappingTable::from_assigned(HashMap::from([
            ("com/a/B".to_string(), "αβγ".to_string()),
            ("com/a/C".to_string(), "δεζ".to_string()),
        ]))
    }

    fn remap(kind: DescriptorKind, document: Value) -> Option<Value> {
        let text = serde_json::to_string(&document).unwrap();
        kind.remap(&text, &table())
            .unwrap()
            .map(|out| serde_json::from_str(&out).unwrap())
    }

    #[test]
    fn velocity_main() {
        let out = remap(
            DescriptorKind::VelocityPlugin,
            json!({"id": "test", "main": "com.a.B", "version": "1.0"}),
        );
        assert_eq!(
            out,
            Some(json!({"id": "test", "main": "αβγ", "version": "1.0"}))
        );
    }

    #[test]
    fn velocity_external_main_is_kept() {
        let out = remap(DescriptorKind::VelocityPlugin, json!({"main": "org.lib.Main"}));
        assert_eq!(out, Some(json!({"main": "org.lib.Main"})));
    }

    #[test]
    fn mixins_are_qualified_and_package_cleared() {
        let out = remap(
            DescriptorKind::MixinConfig,
            json!({
                "required": true,
                "package": "com.a",
                "mixins": ["B"],
                "client": ["C", "Missing"],
                "server": [],
                "injectors": {"defaultRequire": 1}
            }),
        );
        assert_eq!(
            out,
            Some(json!({
                "required": true,
                "package": "",
                "mixins": ["αβγ"],
                "client": ["δεζ", "com.a.Missing"],
                "server": [],
                "injectors": {"defaultRequire": 1}
            }))
        );
    }

    #[test]
    fn mixins_without_package_are_already_qualified() {
        let out = remap(DescriptorKind::MixinConfig, json!({"mixins": ["com.a.B"]}));
        assert_eq!(out, Some(json!({"mixins": ["αβγ"]})));
    }

    #[test]
    fn fabric_entrypoints() {
        let out = remap(
            DescriptorKind::FabricMod,
            json!({
                "schemaVersion": 1,
                "entrypoints": {
                    "main": ["com.a.B"],
                    "client": [{"adapter": "kotlin", "value": "com.a.C"}, {"adapter": "x"}],
                    "server": ["org.lib.Entry", 3]
                }
            }),
        );
        assert_eq!(
            out,
            Some(json!({
                "schemaVersion": 1,
                "entrypoints": {
                    "main": ["αβγ"],
                    "client": [{"adapter": "kotlin", "value": "δεζ"}, {"adapter": "x"}],
                    "server": ["org.lib.Entry", 3]
                }
            }))
        );
    }

    #[test]
    fn fabric_without_entrypoints_is_reserialized() {
        let out = remap(DescriptorKind::FabricMod, json!({"id": "mod"}));
        assert_eq!(out, Some(json!({"id": "mod"})));
    }

    #[test]
    fn mapping_keys_keep_values() {
        let out = remap(
            DescriptorKind::MappingFile,
            json!({"mappings": {"com/a/B": "someValue", "org/lib/X": {"k": 1}}}),
        );
        assert_eq!(
            out,
            Some(json!({"mappings": {"αβγ": "someValue", "org/lib/X": {"k": 1}}}))
        );
    }

    #[test]
    fn mapping_data_sections() {
        let out = remap(
            DescriptorKind::MappingFile,
            json!({
                "data": {
                    "first": {"com/a/C": 1, "org/lib/X": 2},
                    "second": {}
                }
            }),
        );
        assert_eq!(
            out,
            Some(json!({
                "data": {
                    "first": {"δεζ": 1, "org/lib/X": 2},
                    "second": {}
                }
            }))
        );
    }

    #[test]
    fn mapping_data_sections_with_nested_mappings() {
        let out = remap(
            DescriptorKind::MappingFile,
            json!({
                "mappings": {"com/a/B": "x"},
                "data": {"first": {"com/a/B": true, "mappings": {"com/a/C": 1}}}
            }),
        );
        assert_eq!(
            out,
            Some(json!({
                "mappings": {"αβγ": "x"},
                "data": {"first": {"αβγ": true, "mappings": {"δεζ": 1}}}
            }))
        );
    }

    #[test]
    fn mapping_data_entries_must_be_objects() {
        let text = r#"{"data": {"first": [1, 2]}}"#;
        assert!(DescriptorKind::MappingFile.remap(text, &table()).is_err());
    }

    #[test]
    fn unrelated_json_is_left_alone() {
        let out = remap(DescriptorKind::MappingFile, json!({"item.name": "Sword"}));
        assert_eq!(out, None);
    }

    #[test]
    fn output_is_pretty_and_ordered() {
        let text = r#"{"z": 1, "main": "com.a.B", "a": 2}"#;
        let out = DescriptorKind::VelocityPlugin
            .remap(text, &table())
            .unwrap()
            .unwrap();
        assert_eq!(out, "{\n  \"z\": 1,\n  \"main\": \"αβγ\",\n  \"a\": 2\n}");
    }
}
