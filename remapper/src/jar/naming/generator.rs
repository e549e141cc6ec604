use std::collections::HashSet;

use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::debug;
use uuid::Builder;

/// Symbols of generated class names. Valid in binary names, never seen in
/// ordinary source identifiers.
pub const GREEK_ALPHABET: [char; 24] = [
    'α', 'β', 'γ', 'δ', 'ε', 'ζ', 'η', 'θ', 'ι', 'κ', 'λ', 'μ', 'ν', 'ξ', 'ο', 'π', 'ρ', 'σ', 'τ',
    'υ', 'φ', 'χ', 'ψ', 'ω',
];

pub const MIN_NAME_LEN: usize = 20;
pub const MAX_NAME_LEN: usize = 29;

const TOKEN_PREFIX: char = 'a';

/// Issues unique obfuscated identifiers for one run.
///
/// Every name handed out is remembered; a candidate that was already issued
/// is thrown away and a whole new one is drawn. Not meant to be shared
/// between threads, the run owns exactly one generator.
pub struct NameGenerator {
    rng: StdRng,
    issued: HashSet<String>,
}

impl NameGenerator {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Reproducible generator, same seed gives the same sequence of names.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng,
            issued: HashSet::new(),
        }
    }

    /// Fresh class name made of [`GREEK_ALPHABET`] symbols.
    pub fn next_name(&mut self) -> String {
        loop {
            let candidate = self.draw_name();
            if self.issued.insert(candidate.clone()) {
                return candidate;
            }
            debug!("Generated name collided, drawing again");
        }
    }

    /// Fresh ASCII token (`a` + 32 hex digits), for places that need a plain
    /// identifier outside the class-name alphabet.
    pub fn next_token(&mut self) -> String {
        loop {
            let uuid = Builder::from_random_bytes(self.rng.gen()).into_uuid();
            let candidate = format!("{}{}", TOKEN_PREFIX, uuid.simple());
            if self.issued.insert(candidate.clone()) {
                return candidate;
            }
        }
    }

    pub fn is_issued(&self, name: &str) -> bool {
        self.issued.contains(name)
    }

    pub fn issued_count(&self) -> usize {
        self.issued.len()
    }

    fn draw_name(&mut self) -> String {
        let len = self.rng.gen_range(MIN_NAME_LEN..=MAX_NAME_LEN);
        (0..len)
            .map(|_| GREEK_ALPHABET[self.rng.gen_range(0..GREEK_ALPHABET.len())])
            .collect()
    }
}

impl Default for NameGenerator {
    fn default() -> Self {
        Self::new()
    }
}
