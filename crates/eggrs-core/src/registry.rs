// Eggrs Pattern Registry
// Several named patterns fed by one key stream, with reactions and hooks

use std::time::Duration;

use indexmap::IndexMap;

use crate::matcher::{KeyInput, PolicyKind, SequenceMatcher};
use crate::TargetSequence;

/// Errors raised while registering patterns
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("pattern name cannot be empty")]
    EmptyName,

    #[error("pattern '{0}' is already registered")]
    DuplicateName(String),

    #[error("pattern '{name}' repeats the {policy} sequence {sequence} of '{existing}'")]
    DuplicateSequence {
        name: String,
        existing: String,
        policy: PolicyKind,
        sequence: String,
    },
}

/// Everything a reaction or hook learns about a completed pattern
#[derive(Debug)]
pub struct MatchEvent<'a, M> {
    /// Name the pattern was registered under
    pub name: &'a str,
    /// The sequence that was typed
    pub sequence: &'a TargetSequence,
    /// Data attached at registration
    pub metadata: &'a M,
    /// Timestamp of the key press that completed the sequence
    pub timestamp: Duration,
}

/// Callback invoked synchronously when a pattern completes
pub type Reaction<M> = Box<dyn FnMut(&MatchEvent<'_, M>)>;

struct Pattern<M> {
    matcher: SequenceMatcher,
    metadata: M,
    reaction: Reaction<M>,
}

/// A set of named patterns sharing one input stream.
///
/// Every pattern keeps its own progress. On each key press the patterns are
/// fed in registration order; each completion runs the pattern's own reaction
/// and then every hook.
pub struct Registry<M = ()> {
    patterns: IndexMap<String, Pattern<M>>,
    hooks: Vec<Reaction<M>>,
}

impl<M> Default for Registry<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> Registry<M> {
    pub fn new() -> Self {
        Self {
            patterns: IndexMap::new(),
            hooks: Vec::new(),
        }
    }

    /// Register a pattern.
    ///
    /// Fails on an empty or repeated name, and on a pattern whose keys are already
    /// registered under the same kind of policy, even when written through another
    /// symbol map.
    pub fn add_pattern(
        &mut self,
        name: impl Into<String>,
        matcher: SequenceMatcher,
        metadata: M,
        reaction: impl FnMut(&MatchEvent<'_, M>) + 'static,
    ) -> Result<&mut Self, RegistryError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if self.patterns.contains_key(&name) {
            return Err(RegistryError::DuplicateName(name));
        }

        if let Some((existing, _)) = self
            .patterns
            .iter()
            .find(|(_, p)| p.matcher.shares_trigger(&matcher))
        {
            return Err(RegistryError::DuplicateSequence {
                name,
                existing: existing.clone(),
                policy: matcher.policy().kind(),
                sequence: matcher.target().canonical(),
            });
        }

        log::debug!(
            "Registered pattern '{}' {} ({}, {} symbols)",
            name,
            matcher.target(),
            matcher.policy(),
            matcher.symbols().kind()
        );

        self.patterns.insert(
            name,
            Pattern {
                matcher,
                metadata,
                reaction: Box::new(reaction),
            },
        );
        Ok(self)
    }

    /// Add a hook observing every completion across all patterns
    pub fn add_hook(&mut self, hook: impl FnMut(&MatchEvent<'_, M>) + 'static) -> &mut Self {
        self.hooks.push(Box::new(hook));
        self
    }

    /// Unregister a pattern; returns false if it was not registered
    pub fn remove(&mut self, name: &str) -> bool {
        let removed = self.patterns.shift_remove(name).is_some();
        if removed {
            log::debug!("Removed pattern '{}'", name);
        }
        removed
    }

    pub fn contains(&self, name: &str) -> bool {
        self.patterns.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Pattern names in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.patterns.keys().map(String::as_str)
    }

    pub fn matcher(&self, name: &str) -> Option<&SequenceMatcher> {
        self.patterns.get(name).map(|p| &p.matcher)
    }

    pub fn metadata(&self, name: &str) -> Option<&M> {
        self.patterns.get(name).map(|p| &p.metadata)
    }

    pub fn progress(&self, name: &str) -> Option<usize> {
        self.patterns.get(name).map(|p| p.matcher.progress())
    }

    /// Drop all progress of every pattern
    pub fn reset(&mut self) {
        for pattern in self.patterns.values_mut() {
            pattern.matcher.reset();
        }
    }

    /// Feed one key press to every pattern; returns how many completed
    pub fn on_input(&mut self, input: &KeyInput) -> usize {
        let mut fired = 0;

        for (name, pattern) in self.patterns.iter_mut() {
            if !pattern.matcher.on_input(input) {
                continue;
            }
            fired += 1;

            log::debug!(
                "Pattern '{}' matched {} at {:?}",
                name,
                pattern.matcher.target(),
                input.timestamp
            );

            let event = MatchEvent {
                name,
                sequence: pattern.matcher.target(),
                metadata: &pattern.metadata,
                timestamp: input.timestamp,
            };
            (pattern.reaction)(&event);
            for hook in self.hooks.iter_mut() {
                hook(&event);
            }
        }

        fired
    }
}
