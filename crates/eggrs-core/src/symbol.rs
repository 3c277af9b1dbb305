// Eggrs Symbols
// Normalized key identifiers and the maps that produce them from raw codes

use std::collections::HashMap;
use std::fmt;

use crate::key::{key_from_name, key_name};
use crate::sequence::SequenceError;
use crate::KeyCode;

/// A normalized key identifier that target sequences are written in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<char> for Symbol {
    fn from(value: char) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Translates raw key codes into symbols.
///
/// A code that resolves to `None` is never equal to any target symbol, so it
/// always counts as a mismatch.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SymbolMap {
    /// Every named key maps to its canonical lowercase name
    #[default]
    Standard,
    /// No remapping: every code maps to its decimal value
    Raw,
    /// Explicit table; anything not listed is unmapped
    Custom(HashMap<KeyCode, Symbol>),
}

impl SymbolMap {
    /// Build a custom map from `(code, symbol)` pairs
    pub fn custom<S: Into<Symbol>>(pairs: impl IntoIterator<Item = (u16, S)>) -> Self {
        SymbolMap::Custom(
            pairs
                .into_iter()
                .map(|(code, symbol)| (KeyCode::from(code), symbol.into()))
                .collect(),
        )
    }

    /// Resolve a raw key code to its symbol, if the map knows it
    pub fn resolve(&self, code: KeyCode) -> Option<Symbol> {
        match self {
            SymbolMap::Standard => match key_name(code.code()) {
                "unknown" => None,
                name => Some(Symbol::from(name)),
            },
            SymbolMap::Raw => Some(Symbol::new(code.code().to_string())),
            SymbolMap::Custom(table) => table.get(&code).cloned(),
        }
    }

    /// Every raw code this map resolves to `symbol`, in ascending order
    pub fn codes_for(&self, symbol: &Symbol) -> Vec<KeyCode> {
        let mut codes: Vec<KeyCode> = match self {
            SymbolMap::Standard => key_from_name(symbol.as_str()).into_iter().collect(),
            SymbolMap::Raw => symbol
                .as_str()
                .parse::<u16>()
                .map(KeyCode::from)
                .into_iter()
                .collect(),
            SymbolMap::Custom(table) => table
                .iter()
                .filter(|(_, s)| *s == symbol)
                .map(|(code, _)| *code)
                .collect(),
        };
        // Aliases and spellings like "074" parse but never resolve back
        codes.retain(|code| self.resolve(*code).as_ref() == Some(symbol));
        codes.sort();
        codes
    }

    /// Turn one token of a written pattern into the symbol this map produces for it.
    ///
    /// Standard and raw maps accept key names, aliases and decimal codes. A custom
    /// map accepts the symbols it can produce; a token it can never produce is
    /// rejected since the pattern could not match.
    pub fn symbol_for_token(&self, token: &str) -> Result<Symbol, SequenceError> {
        match self {
            SymbolMap::Standard => {
                let code = key_from_name(token)
                    .ok_or_else(|| SequenceError::UnknownKey(token.to_string()))?;
                self.resolve(code)
                    .ok_or_else(|| SequenceError::UnknownKey(token.to_string()))
            }
            SymbolMap::Raw => {
                let code = key_from_name(token)
                    .ok_or_else(|| SequenceError::UnknownKey(token.to_string()))?;
                Ok(Symbol::new(code.code().to_string()))
            }
            SymbolMap::Custom(table) => table
                .values()
                .find(|symbol| symbol.as_str() == token)
                .cloned()
                .ok_or_else(|| SequenceError::UnmappedSymbol(token.to_string())),
        }
    }

    /// Short name used in logs and configuration
    pub fn kind(&self) -> &'static str {
        match self {
            SymbolMap::Standard => "standard",
            SymbolMap::Raw => "raw",
            SymbolMap::Custom(_) => "custom",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jasmine_map() -> SymbolMap {
        SymbolMap::custom([
            (74, 'j'),
            (65, 'a'),
            (83, 's'),
            (77, 'm'),
            (73, 'i'),
            (78, 'n'),
            (69, 'e'),
        ])
    }

    #[test]
    fn test_standard_resolve() {
        let map = SymbolMap::Standard;
        assert_eq!(map.resolve(KeyCode::from(38)), Some(Symbol::from("up")));
        assert_eq!(map.resolve(KeyCode::from(66)), Some(Symbol::from("b")));
        assert_eq!(map.resolve(KeyCode::from(255)), None);
    }

    #[test]
    fn test_raw_resolve() {
        let map = SymbolMap::Raw;
        assert_eq!(map.resolve(KeyCode::from(74)), Some(Symbol::from("74")));
        assert_eq!(map.resolve(KeyCode::from(999)), Some(Symbol::from("999")));
    }

    #[test]
    fn test_custom_resolve_unmapped() {
        let map = jasmine_map();
        assert_eq!(map.resolve(KeyCode::from(74)), Some(Symbol::from('j')));
        assert_eq!(map.resolve(KeyCode::from(66)), None);
    }

    #[test]
    fn test_codes_for_symbol() {
        assert_eq!(
            SymbolMap::Standard.codes_for(&Symbol::from("up")),
            vec![KeyCode::from(38)]
        );
        assert!(SymbolMap::Standard.codes_for(&Symbol::from("arrowup")).is_empty());
        assert_eq!(SymbolMap::Raw.codes_for(&Symbol::from("74")), vec![KeyCode::from(74)]);
        assert!(SymbolMap::Raw.codes_for(&Symbol::from("074")).is_empty());

        let shared = SymbolMap::custom([(39, "go"), (68, "go"), (37, "back")]);
        assert_eq!(
            shared.codes_for(&Symbol::from("go")),
            vec![KeyCode::from(39), KeyCode::from(68)]
        );
        assert!(jasmine_map().codes_for(&Symbol::from("x")).is_empty());
    }

    #[test]
    fn test_symbol_for_token() {
        assert_eq!(
            SymbolMap::Standard.symbol_for_token("ArrowUp"),
            Ok(Symbol::from("up"))
        );
        assert_eq!(SymbolMap::Raw.symbol_for_token("j"), Ok(Symbol::from("74")));
        assert_eq!(SymbolMap::Raw.symbol_for_token("74"), Ok(Symbol::from("74")));
        assert_eq!(jasmine_map().symbol_for_token("m"), Ok(Symbol::from('m')));
        assert_eq!(
            jasmine_map().symbol_for_token("x"),
            Err(SequenceError::UnmappedSymbol("x".to_string()))
        );
        assert_eq!(
            SymbolMap::Standard.symbol_for_token("hyper"),
            Err(SequenceError::UnknownKey("hyper".to_string()))
        );
    }
}
