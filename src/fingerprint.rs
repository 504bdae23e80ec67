//! Content fingerprints.
//!
//! Presentations are hashed with SHA-256 under a domain tag and with length
//! prefixes, so equal presentations fingerprint identically across runs and
//! builds. The completion cache is keyed by these fingerprints.

use crate::rewrite::{Generator, Presentation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Domain tag for presentation fingerprints.
const PRESENTATION_DOMAIN: &[u8] = b"PRESENTATION";

/// A 256-bit hash value.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HashValue(pub [u8; 32]);

impl HashValue {
    #[inline]
    pub fn zero() -> Self {
        Self([0u8; 32])
    }

    #[inline]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    #[inline]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// SHA-256 over `b"ORV:" || domain || b":v1" || len(data) as u64 LE || data`.
    pub fn hash_with_domain(domain: &[u8], data: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(b"ORV:");
        hasher.update(domain);
        hasher.update(b":v1");
        hasher.update((data.len() as u64).to_le_bytes());
        hasher.update(data);
        Self(hasher.finalize().into())
    }

    /// Full lowercase hex rendering.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl std::fmt::Display for HashValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // first 4 bytes
        write!(
            f,
            "HashValue({:02x}{:02x}{:02x}{:02x}…)",
            self.0[0], self.0[1], self.0[2], self.0[3]
        )
    }
}

fn push_word(out: &mut Vec<u8>, word: &[Generator]) {
    out.extend_from_slice(&(word.len() as u64).to_le_bytes());
    out.extend(word.iter().map(|g| g.index() as u8));
}

/// Canonical bytes of a presentation: symbols, inverse indices, then each
/// axiom's sides, all length-prefixed.
pub fn canonical_bytes(presentation: &Presentation) -> Vec<u8> {
    let alphabet = presentation.alphabet();
    let mut out = Vec::with_capacity(64);

    out.extend_from_slice(&(alphabet.len() as u64).to_le_bytes());
    for g in alphabet.generators() {
        let mut buf = [0u8; 4];
        let encoded = alphabet.symbol(g).encode_utf8(&mut buf);
        out.push(encoded.len() as u8);
        out.extend_from_slice(encoded.as_bytes());
        out.push(alphabet.inverse(g).index() as u8);
    }

    out.extend_from_slice(&(presentation.axioms().len() as u64).to_le_bytes());
    for axiom in presentation.axioms() {
        push_word(&mut out, &axiom.lhs);
        push_word(&mut out, &axiom.rhs);
    }
    out
}

/// Fingerprint of a presentation.
pub fn presentation(presentation: &Presentation) -> HashValue {
    HashValue::hash_with_domain(PRESENTATION_DOMAIN, &canonical_bytes(presentation))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_separation() {
        let a = HashValue::hash_with_domain(b"A", b"data");
        let b = HashValue::hash_with_domain(b"B", b"data");
        assert_ne!(a, b);
        assert_eq!(a, HashValue::hash_with_domain(b"A", b"data"));
        assert_ne!(a, HashValue::zero());
    }

    #[test]
    fn hex_and_display() {
        let h = HashValue::from_bytes([0xab; 32]);
        assert_eq!(h.to_hex().len(), 64);
        assert!(h.to_hex().starts_with("abab"));
        assert_eq!(h.to_string(), "HashValue(abababab…)");
    }

    #[test]
    fn presentation_bytes_distinguish_structure() {
        let p1 = Presentation::from_relators("ab", "ab", &["aa", "bb", "ababab"]).unwrap();
        let p2 = Presentation::from_relators("ba", "ba", &["aa", "bb", "ababab"]).unwrap();
        let p3 = Presentation::from_relators("ab", "ab", &["aa", "bb", "abab", "ab"]).unwrap();
        let p4 = Presentation::from_relators("ab", "ab", &["aa", "bb", "ababab"]).unwrap();
        assert_ne!(presentation(&p1), presentation(&p2));
        assert_ne!(presentation(&p1), presentation(&p3));
        assert_eq!(presentation(&p1), presentation(&p4));
        assert_ne!(canonical_bytes(&p1), canonical_bytes(&p2));
    }
}
