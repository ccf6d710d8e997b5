//! Roster data models.
//!
//! The remote store owns every record. The types here are transient copies kept
//! for display; nothing in this crate enforces uniqueness or registration
//! validity, the store does.
//!
//! - [`Identity`] is the wallet address that signs mutations.
//! - [`Record`] is one student slot as the store returns it, deleted or not.
//! - [`Roster`] is the display view: registered records only, in store order.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Placeholder shown when no identity is connected.
pub const NOT_CONNECTED: &str = "Not Connected";

/// A wallet address, as issued by the wallet provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Identity(String);

impl Identity {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Abbreviated form for display: first six and last four characters.
    pub fn short(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        if chars.len() <= 10 {
            return self.0.clone();
        }
        let head: String = chars[..6].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    }

    /// Canonical comparison key.
    ///
    /// Hex addresses (`0x...`) lowercase. Base58 addresses are decoded and
    /// rendered as lowercase hex, so two spellings of the same key bytes match.
    /// Anything else falls back to ASCII lowercase.
    pub fn canonical(&self) -> String {
        let s = self.0.trim();
        if let Some(digits) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            return format!("0x{}", digits.to_ascii_lowercase());
        }
        match bs58::decode(s).into_vec() {
            Ok(bytes) if !bytes.is_empty() => hex::encode(bytes),
            _ => s.to_ascii_lowercase(),
        }
    }

    /// The one identity comparison used anywhere in the client.
    pub fn same_as(&self, other: &Identity) -> bool {
        self.canonical() == other.canonical()
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Identity {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// One student slot as stored remotely.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Record {
    pub id: u64,
    pub name: String,
    pub registered: bool,
}

impl Record {
    pub fn new(id: u64, name: impl Into<String>, registered: bool) -> Self {
        Self { id, name: name.into(), registered }
    }
}

/// A registered student, as displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RosterEntry {
    pub id: u64,
    pub name: String,
}

/// Registered records in store index order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Roster(Vec<RosterEntry>);

impl Roster {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Keep only registered records, preserving order.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = Record>,
    {
        Self(
            records
                .into_iter()
                .filter(|r| r.registered)
                .map(|r| RosterEntry { id: r.id, name: r.name })
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn entries(&self) -> &[RosterEntry] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &RosterEntry> {
        self.0.iter()
    }

    pub fn contains_id(&self, id: u64) -> bool {
        self.0.iter().any(|e| e.id == id)
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a RosterEntry;
    type IntoIter = std::slice::Iter<'a, RosterEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
