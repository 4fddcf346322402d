#![deny(unsafe_code)]

use std::fmt;

use sha2::Digest;
use slate_model::ColumnDescriptor;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FingerprintError {
    #[error("fingerprint must be 64 hex characters, got {0} characters")]
    InvalidLength(usize),
    #[error("fingerprint is not valid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

/// Deterministic identity of a table schema.
///
/// A SHA-256 digest of the canonical column signature, rendered as 64
/// lowercase hex characters on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    /// Parse a caller-supplied 64-character hex string.
    pub fn parse(s: &str) -> Result<Self, FingerprintError> {
        if s.len() != 64 {
            return Err(FingerprintError::InvalidLength(s.len()));
        }
        let bytes = hex::decode(s)?;
        let mut out = [0u8; 32];
        out.copy_from_slice(&bytes);
        Ok(Self(out))
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl serde::Serialize for Fingerprint {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> serde::Deserialize<'de> for Fingerprint {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Canonical string form of a column set.
///
/// Sorted `normalized_name:type` pairs joined with `|`, terminated with the
/// column count. Sorting makes the signature order-independent; the count
/// guarantees different-arity schemas never collide structurally.
pub fn canonical_signature(columns: &[ColumnDescriptor]) -> String {
    let mut parts: Vec<String> = columns
        .iter()
        .map(|c| format!("{}:{}", c.normalized_name, c.inferred_type))
        .collect();
    parts.sort();
    format!("{}#{}", parts.join("|"), columns.len())
}

/// Fingerprint a table's column set. Pure; no side effects.
pub fn fingerprint_columns(columns: &[ColumnDescriptor]) -> Fingerprint {
    let digest = sha2::Sha256::digest(canonical_signature(columns).as_bytes());
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    Fingerprint(out)
}

#[cfg(test)]
mod tests {
    use slate_model::ColumnType;

    use super::*;

    fn column(raw: &str, normalized: &str, t: ColumnType) -> ColumnDescriptor {
        ColumnDescriptor {
            raw_name: raw.to_string(),
            normalized_name: normalized.to_string(),
            inferred_type: t,
        }
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert!(matches!(
            Fingerprint::parse("abc"),
            Err(FingerprintError::InvalidLength(3))
        ));
        assert!(matches!(
            Fingerprint::parse(&"g".repeat(64)),
            Err(FingerprintError::InvalidHex(_))
        ));
        let valid = "0".repeat(64);
        assert_eq!(Fingerprint::parse(&valid).unwrap().to_hex(), valid);
    }

    #[test]
    fn signature_is_sorted_and_counted() {
        let cols = vec![
            column("B", "b", ColumnType::Text),
            column("A", "a", ColumnType::Number),
        ];
        assert_eq!(canonical_signature(&cols), "a:number|b:text#2");
    }

    #[test]
    fn type_changes_the_fingerprint() {
        let as_number = vec![column("Amount", "amount", ColumnType::Number)];
        let as_text = vec![column("Amount", "amount", ColumnType::Text)];
        assert_ne!(
            fingerprint_columns(&as_number),
            fingerprint_columns(&as_text)
        );
    }
}
