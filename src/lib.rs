// Eggrs
// Terminal host for the key sequence matchers in eggrs-core

#[cfg(feature = "cli")]
pub mod terminal;
