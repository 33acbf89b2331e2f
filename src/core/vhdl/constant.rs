use super::identifier::Identifier;
use super::interface::{parse_name_list, split_at_colon};
use super::normalize::NormalizedText;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_derive::Serialize;

/// Anchors each `constant` declaration and captures its body up to the `;`
/// terminator. Decomposition of the body is staged separately.
static CONSTANT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:^|\s)constant\s+([^;]+);").unwrap());

/// A named, typed, always-initialized value declared at package scope.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Constant {
    name: Identifier,
    datatype: String,
    value: String,
}

impl Constant {
    pub fn get_name(&self) -> &Identifier {
        &self.name
    }

    pub fn get_type(&self) -> &str {
        &self.datatype
    }

    pub fn get_value(&self) -> &str {
        &self.value
    }
}

#[derive(Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Constants(Vec<Constant>);

impl Constants {
    /// Scans an entire normalized buffer for constant declarations, in source
    /// order.
    ///
    /// Returns `None` when the buffer declares no constants at all, so callers
    /// can tell "no constants" apart from an empty extraction. Declarations
    /// that fail to parse completely are dropped whole.
    pub fn scan(text: &NormalizedText) -> Option<Self> {
        let mut result = Vec::new();
        for caps in CONSTANT.captures_iter(text.as_str()) {
            let body = match caps.get(1) {
                Some(m) => m.as_str(),
                None => continue,
            };
            if let Some(mut records) = Self::parse_declaration(body) {
                result.append(&mut records);
            }
        }
        match result.is_empty() {
            true => None,
            false => Some(Self(result)),
        }
    }

    /// Decomposes one `name {, name} : type := value` body, broadcasting the
    /// shared type and value across every declared name. Constants require
    /// initialization, so a missing `:=` rejects the declaration.
    fn parse_declaration(body: &str) -> Option<Vec<Constant>> {
        let (names, rest) = split_at_colon(body)?;
        let names = parse_name_list(names)?;
        let (datatype, value) = rest.split_once(":=")?;
        let datatype = datatype.trim();
        let value = value.trim();
        if datatype.is_empty() == true || value.is_empty() == true {
            return None;
        }
        Some(
            names
                .into_iter()
                .map(|name| Constant {
                    name: name,
                    datatype: datatype.to_string(),
                    value: value.to_string(),
                })
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<&Constant> {
        self.0.get(i)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Constant> {
        self.0.iter()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn scan_package() {
        let contents = "\
package def_pkg is
    -- cell resolution
    constant c_cell_size : integer range 0 to 2000 := 1000;
    constant c_win_len   : integer := 16; -- window length
end def_pkg;
";
        let text = NormalizedText::new(&contents);
        let constants = Constants::scan(&text).unwrap();
        assert_eq!(constants.len(), 2);

        let c = constants.get(0).unwrap();
        assert_eq!(c.get_name().as_str(), "c_cell_size");
        assert_eq!(c.get_type(), "integer range 0 to 2000");
        assert_eq!(c.get_value(), "1000");

        let c = constants.get(1).unwrap();
        assert_eq!(c.get_name().as_str(), "c_win_len");
        assert_eq!(c.get_type(), "integer");
        assert_eq!(c.get_value(), "16");
    }

    #[test]
    fn scan_multi_name_declaration() {
        let text = NormalizedText::new("constant A,B: integer range 0 to 2000 := 1000;");
        let constants = Constants::scan(&text).unwrap();
        assert_eq!(constants.len(), 2);

        let c = constants.get(0).unwrap();
        assert_eq!(c.get_name().as_str(), "A");
        assert_eq!(c.get_type(), "integer range 0 to 2000");
        assert_eq!(c.get_value(), "1000");

        let c = constants.get(1).unwrap();
        assert_eq!(c.get_name().as_str(), "B");
        assert_eq!(c.get_type(), "integer range 0 to 2000");
        assert_eq!(c.get_value(), "1000");
    }

    #[test]
    fn scan_none_declared() {
        assert_eq!(Constants::scan(&NormalizedText::new("")), None);
        let text = NormalizedText::new("entity e is port(a : in bit); end e;");
        assert_eq!(Constants::scan(&text), None);
        // a commented-out declaration does not count
        let text = NormalizedText::new("-- constant c : integer := 1;\n");
        assert_eq!(Constants::scan(&text), None);
    }

    #[test]
    fn scan_skips_uninitialized() {
        // constants require a value in this grammar
        let text =
            NormalizedText::new("constant c_bad : integer; constant c_ok : integer := 2;");
        let constants = Constants::scan(&text).unwrap();
        assert_eq!(constants.len(), 1);
        assert_eq!(constants.get(0).unwrap().get_name().as_str(), "c_ok");
    }

    #[test]
    fn scan_rejects_mid_token_keyword() {
        let text = NormalizedText::new("signal my_constant : integer := 4;");
        assert_eq!(Constants::scan(&text), None);
    }
}
