//! # Data Tag
//!
//! Player tags are short strings over a fixed 14-character alphabet.
//! A tag is always kept in canonical form: without the leading `#`
//! and upper-cased. Canonicalization never rejects input; validation is
//! a separate policy check that reports every offending character.

use core::{fmt::Display, str::FromStr};
use serde::{Deserialize, Serialize};

use data_error::{CrError, Result};

/// Characters a player tag may consist of.
pub const TAG_CHARACTERS: [char; 14] = [
    '0', '2', '8', '9', 'P', 'Y', 'L', 'Q', 'G', 'R', 'J', 'C', 'U', 'V',
];

/// Canonical player tag.
///
/// Deserialization goes through [`FromStr`], so a tag read from disk or
/// from the network is canonical and valid.
#[derive(
    Debug, Clone, PartialEq, Eq, Ord, PartialOrd, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct PlayerTag(String);

/// Outcome of checking a tag against [`TAG_CHARACTERS`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub valid: bool,
    /// Offending characters in their original order, duplicates kept.
    pub invalid_chars: Vec<char>,
}

impl PlayerTag {
    /// Strip a single leading `#` and upper-case the remainder.
    pub fn canonicalize(raw: &str) -> Self {
        let stripped = raw.strip_prefix('#').unwrap_or(raw);
        PlayerTag(stripped.to_uppercase())
    }

    /// Scan every character against the alphabet, collecting all offenders.
    pub fn validate(&self) -> ValidationResult {
        let invalid_chars: Vec<char> = self
            .0
            .chars()
            .filter(|c| !TAG_CHARACTERS.contains(c))
            .collect();

        if !invalid_chars.is_empty() {
            log::debug!(
                "tag {} has {} invalid characters",
                self.0,
                invalid_chars.len()
            );
        }

        ValidationResult {
            valid: invalid_chars.is_empty(),
            invalid_chars,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValidationResult {
    /// Message shown to users when a tag is rejected.
    pub fn error_message(&self) -> String {
        let list = |chars: &[char]| {
            chars
                .iter()
                .map(char::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        };
        format!(
            "The tag you have entered is not valid. \n\
             List of invalid characters in your tag: {}\n\
             List of valid characters for tags: {}",
            list(&self.invalid_chars),
            list(&TAG_CHARACTERS)
        )
    }
}

impl FromStr for PlayerTag {
    type Err = CrError;

    fn from_str(s: &str) -> Result<Self> {
        let tag = PlayerTag::canonicalize(s);
        let result = tag.validate();
        if result.valid {
            Ok(tag)
        } else {
            Err(CrError::InvalidTag(result.invalid_chars))
        }
    }
}

impl TryFrom<String> for PlayerTag {
    type Error = CrError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<PlayerTag> for String {
    fn from(tag: PlayerTag) -> Self {
        tag.0
    }
}

impl Display for PlayerTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for PlayerTag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
