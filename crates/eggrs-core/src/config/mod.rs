// Eggrs Config API
// TOML pattern configuration

pub mod parser;

pub use parser::{
    Config, ConfigError, Metadata, PatternEntry, ReactionConfig, BUILTIN_CONFIG,
};
