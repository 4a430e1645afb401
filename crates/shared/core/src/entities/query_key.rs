use serde::{Deserialize, Serialize};
use std::fmt;

use crate::values::Bits256;

/// One positional component of a cache or mutation key
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyPart {
    Name(String),
    Id(Bits256),
    /// A component whose value was not available when the key was built
    Absent,
}

impl From<&str> for KeyPart {
    fn from(name: &str) -> Self {
        KeyPart::Name(name.to_string())
    }
}

impl From<Bits256> for KeyPart {
    fn from(id: Bits256) -> Self {
        KeyPart::Id(id)
    }
}

impl From<Option<Bits256>> for KeyPart {
    fn from(id: Option<Bits256>) -> Self {
        id.map_or(KeyPart::Absent, KeyPart::Id)
    }
}

impl fmt::Display for KeyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyPart::Name(name) => write!(f, "{:?}", name),
            KeyPart::Id(id) => write!(f, "{}", id),
            KeyPart::Absent => write!(f, "null"),
        }
    }
}

/// Positional key identifying a cached query or an in-flight mutation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct QueryKey(Vec<KeyPart>);

/// How an invalidation key selects cached entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyMatch {
    /// Every entry whose key starts with the given parts
    Prefix,
    /// Only the entry with exactly this key
    Exact,
}

impl QueryKey {
    pub fn new(name: &str) -> Self {
        Self(vec![KeyPart::from(name)])
    }

    pub fn push(mut self, part: impl Into<KeyPart>) -> Self {
        self.0.push(part.into());
        self
    }

    pub fn parts(&self) -> &[KeyPart] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.starts_with(&prefix.0)
    }

    /// Does `self`, used as a filter, select `candidate`?
    pub fn selects(&self, candidate: &QueryKey, mode: KeyMatch) -> bool {
        match mode {
            KeyMatch::Prefix => candidate.starts_with(self),
            KeyMatch::Exact => candidate == self,
        }
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, part) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", part)?;
        }
        write!(f, "]")
    }
}
