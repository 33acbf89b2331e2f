use super::identifier::Identifier;
use super::normalize::NormalizedText;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_derive::Serialize;
use std::str::FromStr;

/// Matches the shortest span anchored on `architecture <name> of <entity> is`
/// through the nearest `end <identifier>;` closer, with the same boundary
/// discipline as the entity locator.
static ARCHITECTURE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?:^|\s)(architecture\s+([a-z][a-z_0-9]*)\s+of\s+([a-z][a-z_0-9]*)\s+is\s.*?\bend\s+[a-z][a-z_0-9]*\s*;)",
    )
    .unwrap()
});

/// The implementation body associated with an entity. The span is kept opaque;
/// only the two anchor names are decomposed, for containment checks.
#[derive(Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Architecture {
    name: Identifier,
    #[serde(skip_serializing)]
    owner: Identifier,
    #[serde(skip_serializing)]
    text: String,
}

impl Architecture {
    /// Finds the first architecture declaration inside `text`.
    ///
    /// Returns `None` when no well-formed span exists; malformed input never
    /// panics.
    pub fn locate(text: &NormalizedText) -> Option<Self> {
        let caps = ARCHITECTURE.captures(text.as_str())?;
        let name = Identifier::from_str(caps.get(2)?.as_str()).ok()?;
        let owner = Identifier::from_str(caps.get(3)?.as_str()).ok()?;
        Some(Self {
            name: name,
            owner: owner,
            text: caps.get(1)?.as_str().to_string(),
        })
    }

    pub fn get_name(&self) -> &Identifier {
        &self.name
    }

    /// Accesses the identifier of the entity this architecture implements.
    pub fn get_owner(&self) -> &Identifier {
        &self.owner
    }

    pub fn entity(&self) -> &Identifier {
        &self.owner
    }

    /// References the raw matched declaration span.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Checks if this architecture implements the entity `name`.
    pub fn is_for(&self, name: &Identifier) -> bool {
        &self.owner == name
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn locate_architecture() {
        let contents = "\
entity nor_gate is
    port(a, b : in std_logic; q : out std_logic);
end nor_gate;

architecture rtl of nor_gate is
    signal s : std_logic;
begin
    q <= s;
end rtl;
";
        let text = NormalizedText::new(&contents);
        let arch = Architecture::locate(&text).unwrap();
        assert_eq!(arch.get_name().as_str(), "rtl");
        assert_eq!(arch.get_owner().as_str(), "nor_gate");
        assert_eq!(
            arch.as_str(),
            "architecture rtl of nor_gate is signal s : std_logic; begin q <= s; end rtl;"
        );
    }

    #[test]
    fn locate_absent() {
        assert_eq!(Architecture::locate(&NormalizedText::new("")), None);
        let text = NormalizedText::new("entity e is port(a : in bit); end e;");
        assert_eq!(Architecture::locate(&text), None);
    }

    #[test]
    fn containment_check() {
        let text = NormalizedText::new("architecture rtl of fir_filter is begin end rtl;");
        let arch = Architecture::locate(&text).unwrap();
        assert_eq!(arch.is_for(&Identifier::from_str("fir_filter").unwrap()), true);
        // entity names compare case-insensitively
        assert_eq!(arch.is_for(&Identifier::from_str("FIR_FILTER").unwrap()), true);
        assert_eq!(arch.is_for(&Identifier::from_str("iir_filter").unwrap()), false);
    }

    #[test]
    fn rejects_mid_token_keyword() {
        let text = NormalizedText::new("subarchitecture rtl of e is begin end rtl;");
        assert_eq!(Architecture::locate(&text), None);
    }
}
