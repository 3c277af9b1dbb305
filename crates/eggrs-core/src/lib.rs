// Eggrs Core Library
// Key sequence recognition for easter-egg style triggers

pub mod config;
pub mod key;
pub mod matcher;
pub mod registry;
pub mod sequence;
pub mod symbol;

pub use config::{Config, ConfigError, Metadata, PatternEntry, ReactionConfig};
pub use key::{all_named_keys, key_from_name, key_name, KeyCode};
pub use matcher::{
    CursorMatcher, KeyInput, MatchPolicy, PolicyKind, SequenceMatcher, WindowMatcher, WindowMode,
    DEFAULT_THRESHOLD,
};
pub use registry::{MatchEvent, Reaction, Registry, RegistryError};
pub use sequence::{SequenceError, TargetSequence};
pub use symbol::{Symbol, SymbolMap};
