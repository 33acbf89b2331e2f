use super::error::VhdlError;
use serde_derive::Serialize;
use std::fmt::Display;
use std::hash::Hash;
use std::hash::Hasher;
use std::str::FromStr;

pub mod char_set {
    pub const UNDERLINE: char = '_';

    /// Checks if `c` is a decimal digit.
    pub fn is_digit(c: &char) -> bool {
        match c {
            '0'..='9' => true,
            _ => false,
        }
    }

    /// Checks if `c` is a basic latin letter.
    pub fn is_letter(c: &char) -> bool {
        match c {
            'a'..='z' | 'A'..='Z' => true,
            _ => false,
        }
    }

    /// Checks if `c` is allowed past the first character of a basic identifier.
    /// - rule ::= letter | digit | underline
    pub fn is_extended_digit(c: &char) -> bool {
        is_letter(&c) || is_digit(&c) || c == &UNDERLINE
    }
}

/// A VHDL basic identifier: a letter followed by letters, digits, or
/// underscores. Comparisons are case-insensitive.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    // Returns the reference to the inner `String` struct.
    pub fn as_str(&self) -> &str {
        self.0.as_ref()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl FromStr for Identifier {
    type Err = VhdlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        // identifiers must begin with a letter
        match chars.next() {
            Some(c) => {
                if char_set::is_letter(&c) == false {
                    return Err(VhdlError::InvalidIdentifier(s.to_string()));
                }
            }
            None => return Err(VhdlError::EmptyIdentifier),
        }
        match chars.all(|c| char_set::is_extended_digit(&c)) {
            true => Ok(Self(s.to_string())),
            false => Err(VhdlError::InvalidIdentifier(s.to_string())),
        }
    }
}

impl std::cmp::PartialEq for Identifier {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl std::cmp::Eq for Identifier {}

impl Hash for Identifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_ascii_lowercase().hash(state)
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
