//! PESEL validation
//!
//! A PESEL is 11 decimal digits. The last digit is a check digit computed
//! from the first ten with weights `1,3,7,9,1,3,7,9,1,3`.
//!
//! The scheme accepts some degenerate inputs (`00000000000` passes); those
//! are accepted here as well.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

pub const PESEL_LEN: usize = 11;

const WEIGHTS: [u32; PESEL_LEN - 1] = [1, 3, 7, 9, 1, 3, 7, 9, 1, 3];

/// Check digit for the first ten digits of a PESEL.
///
/// Returns `None` unless `prefix` is exactly ten ASCII digits.
pub fn check_digit(prefix: &str) -> Option<u32> {
    let bytes = prefix.as_bytes();
    if bytes.len() != PESEL_LEN - 1 || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }

    let sum: u32 = bytes
        .iter()
        .zip(WEIGHTS.iter())
        .map(|(b, w)| u32::from(b - b'0') * w)
        .sum();

    Some((10 - sum % 10) % 10)
}

/// Structural and checksum validation. Pure and total; does not trim.
pub fn validate(s: &str) -> bool {
    let bytes = s.as_bytes();
    if bytes.len() != PESEL_LEN || !bytes.iter().all(u8::is_ascii_digit) {
        return false;
    }

    let (prefix, last) = s.split_at(PESEL_LEN - 1);
    check_digit(prefix) == Some(u32::from(last.as_bytes()[0] - b'0'))
}

/// A validated PESEL
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Pesel(String);

impl Pesel {
    pub fn parse(s: &str) -> Option<Self> {
        validate(s).then(|| Pesel(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Pesel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Pesel {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Pesel {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if validate(&value) {
            Ok(Pesel(value))
        } else {
            Err(format!("invalid PESEL: {}", value))
        }
    }
}

impl From<Pesel> for String {
    fn from(value: Pesel) -> Self {
        value.0
    }
}

/// Identifier input split into valid and rejected entries.
///
/// Input order is kept in both lists. Repeated valid identifiers are kept
/// once, at their first position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentifierBatch {
    pub valid: Vec<Pesel>,
    pub invalid: Vec<String>,
}

impl IdentifierBatch {
    /// Split newline-separated text. Lines are trimmed; blank lines dropped.
    pub fn parse(raw: &str) -> Self {
        Self::from_lines(raw.lines())
    }

    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut batch = Self::default();
        let mut seen = HashSet::new();

        for line in lines {
            let line = line.as_ref().trim();
            if line.is_empty() {
                continue;
            }
            match Pesel::parse(line) {
                Some(pesel) => {
                    if seen.insert(pesel.clone()) {
                        batch.valid.push(pesel);
                    }
                }
                None => batch.invalid.push(line.to_string()),
            }
        }

        batch
    }

    pub fn has_valid(&self) -> bool {
        !self.valid.is_empty()
    }

    pub fn valid_set(&self) -> HashSet<String> {
        self.valid.iter().map(|p| p.as_str().to_string()).collect()
    }
}

/// `Nieprawidłowe PESEL: a, b`, or `None` when nothing was rejected
pub fn invalid_warning(invalid: &[String]) -> Option<String> {
    if invalid.is_empty() {
        None
    } else {
        Some(format!("Nieprawidłowe PESEL: {}", invalid.join(", ")))
    }
}
