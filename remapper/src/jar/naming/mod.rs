//! Obfuscated name generation

pub mod generator;

pub use generator::{NameGenerator, GREEK_ALPHABET};
