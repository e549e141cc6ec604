//! Rewriting of textual descriptors that name classes
//!
//! Plugin, mod and mixin descriptors reference classes by dotted name. After
//! the classes were renamed these references must follow, otherwise the
//! host platform cannot load the archive. Each supported format is a
//! [`DescriptorKind`]; the entry name decides which one applies, first match
//! wins:
//!
//! 1. `*velocity-plugin.json`: the `main` field
//! 2. `*.mixins.json` (any case): mixin class lists, `package` is cleared
//! 3. `*fabric.mod.json`: every `entrypoints` reference
//! 4. any other `*.json`: keys of `mappings` and of every `data.*` object
//! 5. `*plugin.yml`, `*bungee.yml`: `main:` and `injector:` lines
//! 6. `META-INF/MANIFEST.MF`: agent and main class attributes
//!
//! Remapping never fails past [`remap_metadata`]: a document that cannot be
//! handled is logged and returned as it was.

use std::borrow::Cow;

use strum_macros::{EnumIter, IntoStaticStr};
use thiserror::Error;
use tracing::{debug, warn};

use crate::jar::types::MappingTable;

pub mod json;
pub mod lines;

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("Not UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Top-level JSON value is not an object")]
    NotAnObject,
    #[error("Field `{field}` is not {expected}")]
    UnexpectedType {
        field: String,
        expected: &'static str,
    },
}

impl MetadataError {
    pub(crate) fn unexpected(field: impl Into<String>, expected: &'static str) -> Self {
        MetadataError::UnexpectedType {
            field: field.into(),
            expected,
        }
    }
}

/// Descriptor formats, in matching precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum DescriptorKind {
    VelocityPlugin,
    MixinConfig,
    FabricMod,
    MappingFile,
    PluginYaml,
    Manifest,
}

impl DescriptorKind {
    pub fn detect(entry_name: &str) -> Option<Self> {
        let lower = entry_name.to_ascii_lowercase();

        if entry_name.ends_with("velocity-plugin.json") {
            Some(DescriptorKind::VelocityPlugin)
        } else if lower.ends_with(".mixins.json") {
            Some(DescriptorKind::MixinConfig)
        } else if entry_name.ends_with("fabric.mod.json") {
            Some(DescriptorKind::FabricMod)
        } else if entry_name.ends_with(".json") {
            Some(DescriptorKind::MappingFile)
        } else if entry_name.ends_with("plugin.yml") || entry_name.ends_with("bungee.yml") {
            Some(DescriptorKind::PluginYaml)
        } else if lower == "meta-inf/manifest.mf" {
            Some(DescriptorKind::Manifest)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }

    /// New document text, or `None` when the document is to be kept as is.
    pub fn remap(self, text: &str, table: &MappingTable) -> Result<Option<String>, MetadataError> {
        match self {
            DescriptorKind::VelocityPlugin => {
                json::remap_document(text, |doc| json::remap_velocity_plugin(doc, table).map(|()| true))
            }
            DescriptorKind::MixinConfig => {
                json::remap_document(text, |doc| json::remap_mixin_config(doc, table).map(|()| true))
            }
            DescriptorKind::FabricMod => {
                json::remap_document(text, |doc| json::remap_fabric_mod(doc, table).map(|()| true))
            }
            DescriptorKind::MappingFile => {
                json::remap_document(text, |doc| json::remap_mapping_file(doc, table))
            }
            DescriptorKind::PluginYaml => Ok(Some(lines::remap_plugin_yaml(text, table))),
            DescriptorKind::Manifest => Ok(lines::remap_manifest(text, table)),
        }
    }
}

/// Entry content with class references remapped. Entries that are not a
/// known descriptor, or that fail to remap, come back untouched.
pub fn remap_metadata<'a>(name: &str, content: &'a [u8], table: &MappingTable) -> Cow<'a, [u8]> {
    let Some(kind) = DescriptorKind::detect(name) else {
        return Cow::Borrowed(content);
    };

    let remapped = std::str::from_utf8(content)
        .map_err(MetadataError::from)
        .and_then(|text| kind.remap(text, table));

    match remapped {
        Ok(Some(text)) => {
            debug!("Remapped {} as {}", name, kind.as_str());
            Cow::Owned(text.into_bytes())
        }
        Ok(None) => Cow::Borrowed(content),
        Err(err) => {
            warn!("Failed to remap metadata {}: {}", name, err);
            Cow::Borrowed(content)
        }
    }
}
