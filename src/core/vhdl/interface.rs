use super::error::VhdlError;
use super::identifier::{char_set, Identifier};
use serde_derive::Serialize;
use std::fmt::Display;
use std::str::FromStr;

/// The mode of an interface signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    In,
    Out,
    Inout,
    Buffer,
}

impl FromStr for Direction {
    type Err = VhdlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_ref() {
            "in" => Ok(Self::In),
            "out" => Ok(Self::Out),
            "inout" => Ok(Self::Inout),
            "buffer" => Ok(Self::Buffer),
            _ => Err(VhdlError::InvalidDirection(s.to_string())),
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::In => "in",
                Self::Out => "out",
                Self::Inout => "inout",
                Self::Buffer => "buffer",
            }
        )
    }
}

/// A compile-time parameter of an entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Generic {
    name: Identifier,
    datatype: String,
    default: Option<String>,
}

impl Generic {
    pub fn get_name(&self) -> &Identifier {
        &self.name
    }

    pub fn get_type(&self) -> &str {
        &self.datatype
    }

    /// Accesses the default value, if one was declared with `:=`.
    pub fn get_default(&self) -> Option<&str> {
        self.default.as_deref()
    }
}

/// A signal interface point of an entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Port {
    name: Identifier,
    mode: Direction,
    datatype: String,
}

impl Port {
    pub fn get_name(&self) -> &Identifier {
        &self.name
    }

    pub fn get_mode(&self) -> &Direction {
        &self.mode
    }

    pub fn get_type(&self) -> &str {
        &self.datatype
    }
}

#[derive(Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Generics(Vec<Generic>);

impl Generics {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Decomposes the interior of a `generic( ... );` clause into records.
    ///
    /// Groups that fail to parse completely are dropped whole so that no
    /// partially populated record is ever emitted.
    pub(super) fn from_clause(inner: &str) -> Self {
        let mut result = Vec::new();
        for group in split_top_level(inner) {
            if let Some(mut records) = parse_generic_group(group) {
                result.append(&mut records);
            }
        }
        Self(result)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<&Generic> {
        self.0.get(i)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Generic> {
        self.0.iter()
    }

    /// Determines the length of the longest identifier.
    pub fn longest_identifier(&self) -> usize {
        self.0.iter().map(|g| g.name.len()).max().unwrap_or(0)
    }
}

#[derive(Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Ports(Vec<Port>);

impl Ports {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Decomposes the interior of a `port( ... );` clause into records.
    pub(super) fn from_clause(inner: &str) -> Self {
        let mut result = Vec::new();
        for group in split_top_level(inner) {
            if let Some(mut records) = parse_port_group(group) {
                result.append(&mut records);
            }
        }
        Self(result)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<&Port> {
        self.0.get(i)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Port> {
        self.0.iter()
    }

    /// Determines the length of the longest identifier.
    pub fn longest_identifier(&self) -> usize {
        self.0.iter().map(|p| p.name.len()).max().unwrap_or(0)
    }
}

/// Locates the interior of a `<keyword> ( ... ) ;` clause inside `text`.
///
/// The keyword match is case-insensitive and must sit on a token boundary.
/// The closing parenthesis is the outermost balanced pair, so nested
/// parentheses inside type expressions do not terminate the clause early.
/// The clause must be followed by a `;` terminator.
pub(super) fn find_clause<'a>(text: &'a str, keyword: &str) -> Option<&'a str> {
    let lower = text.to_ascii_lowercase();
    let mut from = 0;
    while let Some(rel) = lower[from..].find(keyword) {
        let start = from + rel;
        from = start + keyword.len();
        // enforce a boundary on the left side of the keyword
        if start > 0 {
            let before = lower.as_bytes()[start - 1] as char;
            if char_set::is_extended_digit(&before) == true {
                continue;
            }
        }
        // advance over spaces to the opening parenthesis
        let mut open = from;
        let bytes = lower.as_bytes();
        while bytes.get(open) == Some(&b' ') {
            open += 1;
        }
        if bytes.get(open) != Some(&b'(') {
            continue;
        }
        // walk to the matching closing parenthesis
        let mut depth: i32 = 0;
        for (i, c) in text[open..].char_indices() {
            match c {
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        let close = open + i;
                        return match has_terminator(&lower[close + 1..]) {
                            true => Some(&text[open + 1..close]),
                            false => None,
                        };
                    }
                }
                _ => (),
            }
        }
        // ran out of characters with the clause still open
        return None;
    }
    None
}

/// Checks that the next non-space character is the `;` closing the clause.
fn has_terminator(rest: &str) -> bool {
    rest.chars().find(|c| c != &' ') == Some(';')
}

/// Splits `text` on semicolons that sit outside of any parentheses, skipping
/// a trailing empty field.
pub(super) fn split_top_level(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth: i32 = 0;
    let mut last = 0;
    for (i, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            ';' => {
                if depth == 0 {
                    parts.push(&text[last..i]);
                    last = i + 1;
                }
            }
            _ => (),
        }
    }
    if text[last..].trim().is_empty() == false {
        parts.push(&text[last..]);
    }
    parts
}

/// Finds the first `:` that is not part of a `:=` assignment delimiter and
/// splits around it.
pub(super) fn split_at_colon(group: &str) -> Option<(&str, &str)> {
    let bytes = group.as_bytes();
    let mut from = 0;
    while let Some(rel) = group[from..].find(':') {
        let at = from + rel;
        if bytes.get(at + 1) != Some(&b'=') {
            return Some((&group[..at], &group[at + 1..]));
        }
        from = at + 2;
    }
    None
}

/// Parses a comma-joined identifier list.
///
/// Every name must be a valid identifier; one bad name rejects the list.
pub(super) fn parse_name_list(text: &str) -> Option<Vec<Identifier>> {
    let mut names = Vec::new();
    for raw in text.split(',') {
        match Identifier::from_str(raw.trim()) {
            Ok(id) => names.push(id),
            Err(_) => return None,
        }
    }
    Some(names)
}

/// Decomposes one `name {, name} : type [:= default]` declaration group,
/// broadcasting the shared type and default across every declared name.
fn parse_generic_group(group: &str) -> Option<Vec<Generic>> {
    let (names, rest) = split_at_colon(group)?;
    let names = parse_name_list(names)?;
    let (datatype, default) = match rest.split_once(":=") {
        Some((t, d)) => (t.trim(), Some(d.trim())),
        None => (rest.trim(), None),
    };
    if datatype.is_empty() == true {
        return None;
    }
    if default == Some("") {
        return None;
    }
    Some(
        names
            .into_iter()
            .map(|name| Generic {
                name: name,
                datatype: datatype.to_string(),
                default: default.map(|d| d.to_string()),
            })
            .collect(),
    )
}

/// Decomposes one `name {, name} : mode type` declaration group, broadcasting
/// the shared mode and type across every declared name.
fn parse_port_group(group: &str) -> Option<Vec<Port>> {
    let (names, rest) = split_at_colon(group)?;
    let names = parse_name_list(names)?;
    // the mode is the first token after the colon
    let (mode, datatype) = rest.trim().split_once(' ')?;
    let mode = Direction::from_str(mode).ok()?;
    let datatype = datatype.trim();
    if datatype.is_empty() == true {
        return None;
    }
    Some(
        names
            .into_iter()
            .map(|name| Port {
                name: name,
                mode: mode,
                datatype: datatype.to_string(),
            })
            .collect(),
    )
}
