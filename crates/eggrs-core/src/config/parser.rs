// Eggrs Config Parser - TOML with Serde
// Parses pattern configuration from TOML files

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::key::{key_from_name, KeyCode};
use crate::matcher::{MatchPolicy, PolicyKind, SequenceMatcher, WindowMode, DEFAULT_THRESHOLD};
use crate::registry::{Reaction, Registry, RegistryError};
use crate::sequence::{SequenceError, TargetSequence};
use crate::symbol::{Symbol, SymbolMap};

/// Config used when no file is found
pub const BUILTIN_CONFIG: &str = include_str!("../../config/default.toml");

/// String metadata attached to configured patterns
pub type Metadata = IndexMap<String, String>;

/// Configuration parser errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("Invalid keys in pattern '{pattern}': {source}")]
    Sequence {
        pattern: String,
        #[source]
        source: SequenceError,
    },

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("Invalid policy '{value}' in pattern '{pattern}' (expected cursor or window)")]
    InvalidPolicy { pattern: String, value: String },

    #[error("Invalid symbols '{value}' in pattern '{pattern}' (expected standard, raw or custom)")]
    InvalidSymbols { pattern: String, value: String },

    #[error("Invalid window mode '{value}' in pattern '{pattern}' (expected tail or burst)")]
    InvalidWindowMode { pattern: String, value: String },

    #[error("Gap threshold must be greater than zero in {0}")]
    InvalidThreshold(String),

    #[error("Invalid key code '{value}' in symbol map of pattern '{pattern}'")]
    InvalidSymbolCode { pattern: String, value: String },

    #[error("Pattern '{pattern}' maps key code {code} twice ('{first}', '{second}')")]
    DuplicateSymbolCode {
        pattern: String,
        code: u16,
        first: String,
        second: String,
    },

    #[error("Pattern '{0}' uses custom symbols but has no symbol_map")]
    MissingSymbolMap(String),

    #[error("Configuration defines no patterns")]
    NoPatterns,
}

/// Main configuration structure (root TOML table)
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigToml {
    /// General settings
    #[serde(default)]
    pub general: Option<GeneralConfig>,

    /// Pattern definitions
    #[serde(default)]
    pub pattern: Vec<PatternTomlEntry>,
}

/// General settings
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneralConfig {
    /// Default gap threshold for window patterns (milliseconds)
    pub gap_ms: Option<u64>,
}

/// One `[[pattern]]` table
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PatternTomlEntry {
    pub name: String,

    /// Comma-separated key names or codes
    pub keys: String,

    /// "cursor" (default) or "window"
    pub policy: Option<String>,

    /// "standard", "raw" or "custom"
    pub symbols: Option<String>,

    /// "tail" (default) or "burst"; window patterns only
    pub window_mode: Option<String>,

    /// Gap threshold override (milliseconds); window patterns only
    pub gap_ms: Option<u64>,

    /// Raw code (or key name) to symbol, for custom symbols
    #[serde(default)]
    pub symbol_map: IndexMap<String, String>,

    #[serde(default)]
    pub metadata: Metadata,

    #[serde(default)]
    pub reaction: ReactionConfig,
}

/// Host side effects for a pattern. The core only carries these.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReactionConfig {
    /// Banner text to show
    pub message: Option<String>,
    /// Ring the terminal bell
    #[serde(default)]
    pub bell: bool,
    /// Background image to apply
    pub background: Option<String>,
    /// Hide the banner after this many milliseconds
    pub hide_after_ms: Option<u64>,
}

/// A fully validated pattern
#[derive(Debug, Clone)]
pub struct PatternEntry {
    pub name: String,
    pub target: TargetSequence,
    pub symbols: SymbolMap,
    pub policy: MatchPolicy,
    pub metadata: Metadata,
    pub reaction: ReactionConfig,
}

impl PatternEntry {
    /// Fresh matcher for this pattern, with no progress
    pub fn matcher(&self) -> SequenceMatcher {
        SequenceMatcher::new(self.target.clone(), self.symbols.clone(), self.policy)
    }
}

/// Main configuration structure
#[derive(Debug, Clone)]
pub struct Config {
    pub patterns: Vec<PatternEntry>,
    /// Gap threshold used by window patterns without their own
    pub default_gap: Duration,
    /// File the config was read from, if any
    pub source_path: Option<PathBuf>,
}

impl Config {
    /// Parse a TOML configuration file
    pub fn from_toml_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(&path)?;
        let mut config = Self::from_toml(&content)?;
        config.source_path = Some(path.as_ref().to_path_buf());
        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let toml_config: ConfigToml =
            toml::from_str(content).map_err(|e| ConfigError::TomlParse(e.to_string()))?;

        toml_config.to_config()
    }

    /// The configuration compiled into the crate
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_toml(BUILTIN_CONFIG)
    }

    /// Get the default config path (~/.config/eggrs/eggs.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("eggrs").join("eggs.toml"))
    }

    /// Load from the default location, falling back to the built-in config
    pub fn load_default() -> Result<Self, ConfigError> {
        if let Some(path) = Self::default_path() {
            if path.exists() {
                return Self::from_toml_path(path);
            }
        }
        log::debug!("No config at default path, using built-in patterns");
        Self::builtin()
    }

    pub fn pattern(&self, name: &str) -> Option<&PatternEntry> {
        self.patterns.iter().find(|p| p.name == name)
    }

    /// Register every pattern, asking `reaction_for` for each pattern's callback
    pub fn build_registry<F>(&self, mut reaction_for: F) -> Result<Registry<Metadata>, ConfigError>
    where
        F: FnMut(&PatternEntry) -> Reaction<Metadata>,
    {
        let mut registry = Registry::new();
        for entry in &self.patterns {
            registry.add_pattern(
                entry.name.clone(),
                entry.matcher(),
                entry.metadata.clone(),
                reaction_for(entry),
            )?;
        }
        Ok(registry)
    }
}

impl ConfigToml {
    /// Convert parsed TOML to internal Config structure
    fn to_config(&self) -> Result<Config, ConfigError> {
        let default_gap = match self.general.as_ref().and_then(|g| g.gap_ms) {
            Some(0) => return Err(ConfigError::InvalidThreshold("[general]".to_string())),
            Some(ms) => Duration::from_millis(ms),
            None => DEFAULT_THRESHOLD,
        };

        if self.pattern.is_empty() {
            return Err(ConfigError::NoPatterns);
        }

        let patterns = self
            .pattern
            .iter()
            .map(|entry| entry.to_pattern(default_gap))
            .collect::<Result<Vec<_>, _>>()?;

        log::debug!("Loaded {} pattern(s)", patterns.len());

        Ok(Config {
            patterns,
            default_gap,
            source_path: None,
        })
    }
}

impl PatternTomlEntry {
    fn to_pattern(&self, default_gap: Duration) -> Result<PatternEntry, ConfigError> {
        let name = self.name.clone();

        let kind = match &self.policy {
            Some(value) => PolicyKind::from_str(value).map_err(|_| ConfigError::InvalidPolicy {
                pattern: name.clone(),
                value: value.clone(),
            })?,
            None => PolicyKind::Cursor,
        };

        let policy = match kind {
            PolicyKind::Cursor => {
                if self.window_mode.is_some() || self.gap_ms.is_some() {
                    log::warn!(
                        "Pattern '{}' uses the cursor policy; window_mode and gap_ms are ignored",
                        name
                    );
                }
                MatchPolicy::Cursor
            }
            PolicyKind::Window => {
                let mode = match &self.window_mode {
                    Some(value) => {
                        WindowMode::from_str(value).map_err(|_| ConfigError::InvalidWindowMode {
                            pattern: name.clone(),
                            value: value.clone(),
                        })?
                    }
                    None => WindowMode::default(),
                };
                let threshold = match self.gap_ms {
                    Some(0) => {
                        return Err(ConfigError::InvalidThreshold(format!("pattern '{}'", name)))
                    }
                    Some(ms) => Duration::from_millis(ms),
                    None => default_gap,
                };
                MatchPolicy::Window { threshold, mode }
            }
        };

        let symbols = self.symbol_map(kind)?;
        let target = TargetSequence::parse(&self.keys, &symbols).map_err(|source| {
            ConfigError::Sequence {
                pattern: name.clone(),
                source,
            }
        })?;

        log::trace!("Pattern '{}' parsed as {} ({})", name, target, policy);

        Ok(PatternEntry {
            name,
            target,
            symbols,
            policy,
            metadata: self.metadata.clone(),
            reaction: self.reaction.clone(),
        })
    }

    /// Resolve the `symbols` setting; a bare `symbol_map` implies custom
    fn symbol_map(&self, kind: PolicyKind) -> Result<SymbolMap, ConfigError> {
        let requested = match self.symbols.as_deref() {
            Some(value) => value.to_string(),
            None if !self.symbol_map.is_empty() => "custom".to_string(),
            // Window patterns are usually written as raw codes
            None if kind == PolicyKind::Window => "raw".to_string(),
            None => "standard".to_string(),
        };

        match requested.as_str() {
            "standard" | "raw" => {
                if !self.symbol_map.is_empty() {
                    log::warn!(
                        "Pattern '{}' uses {} symbols; symbol_map is ignored",
                        self.name,
                        requested
                    );
                }
                Ok(if requested == "raw" {
                    SymbolMap::Raw
                } else {
                    SymbolMap::Standard
                })
            }
            "custom" => {
                if self.symbol_map.is_empty() {
                    return Err(ConfigError::MissingSymbolMap(self.name.clone()));
                }
                let mut table: HashMap<KeyCode, (&str, Symbol)> =
                    HashMap::with_capacity(self.symbol_map.len());
                for (code_str, symbol) in &self.symbol_map {
                    let code = key_from_name(code_str).ok_or_else(|| {
                        ConfigError::InvalidSymbolCode {
                            pattern: self.name.clone(),
                            value: code_str.clone(),
                        }
                    })?;
                    // "37" and "left" name the same key
                    if let Some((first, _)) = table.get(&code) {
                        return Err(ConfigError::DuplicateSymbolCode {
                            pattern: self.name.clone(),
                            code: code.code(),
                            first: first.to_string(),
                            second: code_str.clone(),
                        });
                    }
                    table.insert(code, (code_str.as_str(), Symbol::new(symbol.clone())));
                }
                Ok(SymbolMap::Custom(
                    table
                        .into_iter()
                        .map(|(code, (_, symbol))| (code, symbol))
                        .collect(),
                ))
            }
            other => Err(ConfigError::InvalidSymbols {
                pattern: self.name.clone(),
                value: other.to_string(),
            }),
        }
    }
}
