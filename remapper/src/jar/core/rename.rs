use std::collections::HashMap;

use krakatau2::lib::{
    classfile::{
        self,
        cpool::{BStr, Const, ConstPool},
        parse::Class,
    },
    ParserOptions,
};
use thiserror::Error;
use tracing::debug;

use crate::jar::types::MappingTable;

use super::{
    assembly::{reasm, ReasmError},
    signature::remap_descriptor,
};

const PARSER_OPTIONS: ParserOptions = ParserOptions {
    no_short_code_attr: true,
};

#[derive(Debug, Error)]
pub enum RenameError {
    #[error("Parse: {0}")]
    Parse(String),
    #[error("Constant pool overflow after renaming")]
    PoolOverflow,
    #[error(transparent)]
    Reasm(#[from] ReasmError),
}

/// Boundary to the bytecode library: parse a class, and rewrite it with
/// every reference to a mapped class substituted.
pub trait ClassRewriter {
    /// Checks that the bytes are a class this rewriter can handle.
    fn inspect(&self, class_bytes: &[u8]) -> Result<(), RenameError>;

    /// Class bytes with all mapped class references renamed. References to
    /// classes missing from `table` stay as they are.
    fn rewrite(&self, class_bytes: &[u8], table: &MappingTable) -> Result<Vec<u8>, RenameError>;
}

/// [`ClassRewriter`] on top of the krakatau2 parser and assembler.
///
/// Works on the constant pool only: every class name, descriptor and
/// signature of a class file lives in `CONSTANT_Utf8` entries, so renaming
/// those (and retargeting a few references) renames the whole class.
#[derive(Debug, Default, Clone, Copy)]
pub struct KrakatauRewriter;

impl ClassRewriter for KrakatauRewriter {
    fn inspect(&self, class_bytes: &[u8]) -> Result<(), RenameError> {
        parse(class_bytes).map(|_| ())
    }

    fn rewrite(&self, class_bytes: &[u8], table: &MappingTable) -> Result<Vec<u8>, RenameError> {
        let plan = {
            let class = parse(class_bytes)?;
            RenamePlan::for_pool(&class.cp, table)
        };
        if plan.is_empty() {
            return Ok(class_bytes.to_vec());
        }

        let mut class = parse(class_bytes)?;
        plan.apply(&mut class.cp)?;
        Ok(reasm(&class)?)
    }
}

fn parse(data: &[u8]) -> Result<Class<'_>, RenameError> {
    classfile::parse(data, PARSER_OPTIONS).map_err(|err| RenameError::Parse(format!("{:?}", err)))
}

#[derive(Debug)]
struct Utf8Rewrite {
    index: usize,
    text: String,
    // Default-package names may be shared with member names or primitive
    // descriptors, those get a fresh entry instead
    in_place: bool,
    class_refs: Vec<usize>,
    string_refs: Vec<usize>,
}

/// Changes to apply to one constant pool, computed up front so the new
/// strings outlive the class that borrows them.
#[derive(Debug, Default)]
pub struct RenamePlan {
    rewrites: Vec<Utf8Rewrite>,
}

impl RenamePlan {
    pub fn for_pool(cp: &ConstPool<'_>, table: &MappingTable) -> Self {
        let mut class_refs: HashMap<usize, Vec<usize>> = HashMap::new();
        let mut string_refs: HashMap<usize, Vec<usize>> = HashMap::new();
        for (index, entry) in cp.0.iter().enumerate() {
            match entry {
                Const::Class(utf) => class_refs.entry(*utf as usize).or_default().push(index),
                Const::Str(utf) => string_refs.entry(*utf as usize).or_default().push(index),
                _ => {}
            }
        }

        let mut rewrites = Vec::new();
        for (index, entry) in cp.0.iter().enumerate() {
            let Const::Utf8(BStr(raw)) = entry else {
                continue;
            };
            // Modified UTF-8 with embedded nulls or surrogates never names a mapped class
            let Ok(text) = std::str::from_utf8(raw) else {
                continue;
            };

            let classes = class_refs.remove(&index).unwrap_or_default();
            let renamed = if classes.is_empty() {
                remap_descriptor(text, table)
            } else {
                remap_class_ref(text, table)
            };
            let Some(renamed) = renamed else {
                continue;
            };

            debug!("cp[{}]: {} -> {}", index, text, renamed);
            let in_place = classes.is_empty() || text.contains('/') || text.starts_with('[');
            rewrites.push(Utf8Rewrite {
                index,
                text: renamed,
                in_place,
                class_refs: classes,
                string_refs: string_refs.remove(&index).unwrap_or_default(),
            });
        }

        Self { rewrites }
    }

    pub fn is_empty(&self) -> bool {
        self.rewrites.is_empty()
    }

    pub fn apply<'a>(&'a self, cp: &mut ConstPool<'a>) -> Result<(), RenameError> {
        for rewrite in &self.rewrites {
            let Const::Utf8(BStr(original)) = cp.0[rewrite.index] else {
                continue;
            };
            let renamed = Const::Utf8(BStr(rewrite.text.as_bytes()));

            if rewrite.in_place {
                // String literals keep their text
                if !rewrite.string_refs.is_empty() {
                    let preserved = push_const(cp, Const::Utf8(BStr(original)))?;
                    for &string in &rewrite.string_refs {
                        cp.0[string] = Const::Str(preserved);
                    }
                }
                cp.0[rewrite.index] = renamed;
            } else {
                let appended = push_const(cp, renamed)?;
                for &class in &rewrite.class_refs {
                    cp.0[class] = Const::Class(appended);
                }
            }
        }
        Ok(())
    }
}

fn push_const<'a>(cp: &mut ConstPool<'a>, entry: Const<'a>) -> Result<u16, RenameError> {
    // constant_pool_count is a u16 and counts the unused slot 0
    if cp.0.len() >= u16::MAX as usize {
        return Err(RenameError::PoolOverflow);
    }
    let index = cp.0.len() as u16;
    cp.0.push(entry);
    Ok(index)
}

/// Renames the target of a `CONSTANT_Class`: an internal name, or an array
/// descriptor for array classes.
pub fn remap_class_ref(name: &str, table: &MappingTable) -> Option<String> {
    if name.starts_with('[') {
        remap_descriptor(name, table)
    } else {
        table.get(name).map(str::to_owned)
    }
}
