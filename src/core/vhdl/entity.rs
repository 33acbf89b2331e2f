use super::identifier::Identifier;
use super::interface::{self, Generics, Ports};
use super::normalize::NormalizedText;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_derive::Serialize;
use std::str::FromStr;

/// Matches the shortest span from an `entity` keyword, through `is`, to the
/// nearest `end <identifier>;` closer. The keyword must sit at a
/// whitespace-or-start boundary so mid-token occurrences are rejected.
static ENTITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:^|\s)(entity\s+([a-z][a-z_0-9]*)\s+is\s.*?\bend\s+[a-z][a-z_0-9]*\s*;)")
        .unwrap()
});

/// A named interface declaration: the raw matched span plus its identifier.
/// The generic and port lists are derived on demand.
#[derive(Debug, PartialEq, Serialize)]
pub struct Entity {
    #[serde(rename = "identifier")]
    name: Identifier,
    #[serde(skip_serializing)]
    text: String,
}

impl Entity {
    /// Finds the first entity declaration inside `text`.
    ///
    /// Returns `None` when no well-formed span exists, including on empty
    /// input; malformed text never panics.
    pub fn locate(text: &NormalizedText) -> Option<Self> {
        let caps = ENTITY.captures(text.as_str())?;
        let name = Identifier::from_str(caps.get(2)?.as_str()).ok()?;
        Some(Self {
            name: name,
            text: caps.get(1)?.as_str().to_string(),
        })
    }

    /// Accesses the entity's identifier.
    pub fn get_name(&self) -> &Identifier {
        &self.name
    }

    /// References the raw matched declaration span.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Decomposes the `generic( ... );` clause into parameter records.
    ///
    /// An entity with no generic clause is valid and yields an empty list.
    pub fn get_generics(&self) -> Generics {
        match interface::find_clause(&self.text, "generic") {
            Some(inner) => Generics::from_clause(inner),
            None => Generics::new(),
        }
    }

    /// Decomposes the `port( ... );` clause into port records.
    ///
    /// A port clause is mandatory for an entity; a missing clause surfaces as
    /// `None`, distinct from the empty-list case for generics.
    pub fn get_ports(&self) -> Option<Ports> {
        let inner = interface::find_clause(&self.text, "port")?;
        Some(Ports::from_clause(inner))
    }

    /// Generates VHDL instantiation code from the entity data.
    ///
    /// Generic values and port signals are paired with the records in order;
    /// names left without a pairing are mapped to `open`. The generic map is
    /// omitted entirely when the entity has no generics.
    pub fn into_instance(
        &self,
        generics: &Generics,
        ports: &Ports,
        generic_values: &[&str],
        port_signals: &[&str],
    ) -> String {
        let mut result = format!("{0}_inst : entity work.{0}\n", self.name);
        if generics.is_empty() == false {
            result.push_str("\tgeneric map(\n");
            result.push_str(&map_body(
                generics.iter().map(|g| g.get_name()),
                generic_values,
                generics.longest_identifier() + 1,
            ));
            result.push_str("\n\t)\n");
        }
        if ports.is_empty() == false {
            result.push_str("\tport map(\n");
            result.push_str(&map_body(
                ports.iter().map(|p| p.get_name()),
                port_signals,
                ports.longest_identifier() + 1,
            ));
            result.push_str("\n\t);");
        }
        result
    }
}

/// Renders the association lines of a map aspect, one per name, with the
/// names column-aligned to the longest identifier.
fn map_body<'a, I>(names: I, values: &[&str], offset: usize) -> String
where
    I: Iterator<Item = &'a Identifier>,
{
    let lines: Vec<String> = names
        .enumerate()
        .map(|(i, name)| {
            let value = values.get(i).copied().unwrap_or("open");
            format!(
                "\t\t{:<width$} {:<3} {}",
                name.as_str(),
                "=>",
                value,
                width = offset
            )
        })
        .collect();
    lines.join(",\n")
}
