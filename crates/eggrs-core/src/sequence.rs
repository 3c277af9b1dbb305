// Eggrs Target Sequence
// The ordered list of symbols a pattern waits for, and its text parser

use std::fmt;

use crate::symbol::{Symbol, SymbolMap};

/// Errors that can occur while building a target sequence
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SequenceError {
    #[error("target sequence cannot be empty")]
    Empty,

    #[error("empty key name at position {position}")]
    EmptyToken { position: usize },

    #[error("unknown key name: '{0}'")]
    UnknownKey(String),

    #[error("symbol '{0}' is never produced by the symbol map")]
    UnmappedSymbol(String),
}

/// An ordered, non-empty, immutable list of symbols.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TargetSequence {
    symbols: Vec<Symbol>,
}

impl TargetSequence {
    /// Create a sequence from symbols, rejecting an empty list
    pub fn new(symbols: impl IntoIterator<Item = Symbol>) -> Result<Self, SequenceError> {
        let symbols: Vec<Symbol> = symbols.into_iter().collect();
        if symbols.is_empty() {
            return Err(SequenceError::Empty);
        }
        Ok(Self { symbols })
    }

    /// Parse a comma-separated pattern such as `"up,up,down,down,left,right,b,a"`.
    ///
    /// Each token is translated through `map`, so the resulting symbols are the
    /// ones the map will produce for live input.
    ///
    /// # Examples
    /// ```
    /// use eggrs_core::{SymbolMap, TargetSequence};
    /// let seq = TargetSequence::parse("j, a, s", &SymbolMap::Raw).unwrap();
    /// assert_eq!(seq.canonical(), "74,65,83");
    /// ```
    pub fn parse(text: &str, map: &SymbolMap) -> Result<Self, SequenceError> {
        if text.trim().is_empty() {
            return Err(SequenceError::Empty);
        }

        let symbols = text
            .split(',')
            .enumerate()
            .map(|(position, token)| {
                let token = token.trim();
                if token.is_empty() {
                    return Err(SequenceError::EmptyToken { position });
                }
                map.symbol_for_token(token)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(symbols)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always false; kept for API symmetry with collections
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn get(&self, index: usize) -> Option<&Symbol> {
        self.symbols.get(index)
    }

    /// Comma-joined form used for equality checks, logs and duplicate detection
    pub fn canonical(&self) -> String {
        self.symbols
            .iter()
            .map(Symbol::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for TargetSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.canonical())
    }
}
