use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Fixed-size 32 byte handle (asset ids, contract ids, addresses, tx ids)
///
/// Displayed and parsed as `0x`-prefixed lowercase hex. The prefix is
/// optional when parsing.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Bits256(pub [u8; 32]);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseBitsError {
    #[error("Expected 64 hex characters, got {0}")]
    InvalidLength(usize),

    #[error("Invalid hex character: {0:?}")]
    InvalidCharacter(char),
}

impl Bits256 {
    pub const ZERO: Bits256 = Bits256([0u8; 32]);

    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Parse from a hex string, with or without `0x`
    pub fn from_hex_str(s: &str) -> Result<Self, ParseBitsError> {
        let hex = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        if hex.len() != 64 {
            return Err(ParseBitsError::InvalidLength(hex.len()));
        }

        if let Some(c) = hex.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(ParseBitsError::InvalidCharacter(c));
        }

        let mut bytes = [0u8; 32];
        for (i, pair) in hex.as_bytes().chunks(2).enumerate() {
            bytes[i] = (nibble(pair[0]) << 4) | nibble(pair[1]);
        }
        Ok(Self(bytes))
    }
}

// Input already checked to be ASCII hex
fn nibble(b: u8) -> u8 {
    match b {
        b'0'..=b'9' => b - b'0',
        b'a'..=b'f' => b - b'a' + 10,
        _ => b - b'A' + 10,
    }
}

impl From<[u8; 32]> for Bits256 {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl FromStr for Bits256 {
    type Err = ParseBitsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex_str(s)
    }
}

impl fmt::Display for Bits256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Bits256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bits256({})", self)
    }
}

impl Serialize for Bits256 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Bits256 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Bits256::from_hex_str(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const USDC: &str = "0x336b7c06352a4b736ff6f688ba6885788b3df16e136e95310ade51aa32dc6f05";

    #[test]
    fn test_hex_display_matches_input() {
        let id: Bits256 = USDC.parse().unwrap();
        assert_eq!(id.to_string(), USDC);
        assert_eq!(id.0[0], 0x33);
        assert_eq!(id.0[31], 0x05);
    }

    #[test]
    fn test_prefix_optional() {
        let with: Bits256 = USDC.parse().unwrap();
        let without: Bits256 = USDC[2..].parse().unwrap();
        assert_eq!(with, without);
    }

    #[test]
    fn test_uppercase_accepted() {
        let upper = USDC.to_uppercase().replacen("0X", "0x", 1);
        let id: Bits256 = upper.parse().unwrap();
        assert_eq!(id.to_string(), USDC);
    }

    #[test]
    fn test_invalid_inputs() {
        assert_eq!(
            "0x1234".parse::<Bits256>(),
            Err(ParseBitsError::InvalidLength(4))
        );
        let bad = format!("0x{}", "zz".repeat(32));
        assert_eq!(
            bad.parse::<Bits256>(),
            Err(ParseBitsError::InvalidCharacter('z'))
        );
    }

    #[test]
    fn test_zero() {
        assert!(Bits256::ZERO.is_zero());
        assert_eq!(Bits256::ZERO.to_string(), format!("0x{}", "0".repeat(64)));
    }

    #[test]
    fn test_serde_as_string() {
        let id: Bits256 = USDC.parse().unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", USDC));
        let back: Bits256 = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
