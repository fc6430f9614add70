use anchor_lang::prelude::*;
use sha2::{Digest, Sha256};

/// Field tuple bound by a commitment and later revealed for verification.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct RevealedFields {
    pub category: u8,
    pub value: u64,
    pub location: String,
    pub age_range: u8,
}

impl RevealedFields {
    pub fn digest(&self) -> [u8; 32] {
        hash_submission(self.category, self.value, &self.location, self.age_range)
    }
}

/// SHA-256 over `word(category) || word(value) || utf8(location) || word(age_range)`,
/// where `word` is a 32-byte big-endian zero-padded integer.
pub fn hash_submission(category: u8, value: u64, location: &str, age_range: u8) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(word(category.into()));
    hasher.update(word(value));
    hasher.update(location.as_bytes());
    hasher.update(word(age_range.into()));
    hasher.finalize().into()
}

fn word(n: u64) -> [u8; 32] {
    let mut out = [0u8; 32];
    out[24..].copy_from_slice(&n.to_be_bytes());
    out
}
