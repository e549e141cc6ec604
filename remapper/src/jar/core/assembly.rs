use krakatau2::lib::{
    assemble, classfile::parse::Class, disassemble::disassemble, AssemblerOptions,
    DisassemblerOptions,
};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ReasmError {
    #[error("Assemble error: {0:?}")]
    Assemble(krakatau2::lib::AssembleError),
    #[error("Disassemble error: {0}")]
    Disassemble(std::io::Error),
    #[error("Source parse error: {0}")]
    SourceParse(#[from] std::str::Utf8Error),
    #[error("Assembler produced no class")]
    Empty,
}

/// Reassemble a class by disassembling to source and then assembling back to bytecode
pub fn reasm(class: &Class<'_>) -> Result<Vec<u8>, ReasmError> {
    let mut out = Vec::new();

    disassemble(&mut out, class, DisassemblerOptions { roundtrip: true })
        .map_err(ReasmError::Disassemble)?;

    let source = std::str::from_utf8(&out)?;
    let mut assembled = assemble(source, AssemblerOptions {}).map_err(ReasmError::Assemble)?;
    let (name, data) = assembled.pop().ok_or(ReasmError::Empty)?;
    debug!("Reassembled {:?} ({} bytes)", name, data.len());

    Ok(data)
}
