// Eggrs Matcher Module
// One configurable sequence matcher with two matching strategies

pub mod cursor;
pub mod window;

use std::fmt;
use std::time::Duration;

use strum_macros::{AsRefStr, Display, EnumString};

use crate::symbol::SymbolMap;
use crate::{KeyCode, TargetSequence};

pub use cursor::CursorMatcher;
pub use window::{WindowMatcher, DEFAULT_THRESHOLD};

/// A single key press fed to the matchers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput {
    pub code: KeyCode,
    /// Monotonic offset from an arbitrary origin chosen by the host
    pub timestamp: Duration,
}

impl KeyInput {
    pub fn new(code: KeyCode, timestamp: Duration) -> Self {
        Self { code, timestamp }
    }

    /// Convenience constructor from a raw code and a timestamp in milliseconds
    pub fn at_millis(code: u16, millis: u64) -> Self {
        Self::new(KeyCode::from(code), Duration::from_millis(millis))
    }
}

/// Which matching strategy a pattern uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum PolicyKind {
    Cursor,
    Window,
}

/// How the timing-window strategy compares its buffer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, EnumString, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum WindowMode {
    /// The last N symbols of the burst must equal the target; cleared after a match
    #[default]
    Tail,
    /// Everything typed since the last gap must equal the target; kept after a match
    Burst,
}

/// Matching policy chosen when a pattern is configured
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPolicy {
    Cursor,
    Window { threshold: Duration, mode: WindowMode },
}

impl MatchPolicy {
    /// Timing window with the default 1000 ms threshold
    pub fn window(mode: WindowMode) -> Self {
        MatchPolicy::Window {
            threshold: DEFAULT_THRESHOLD,
            mode,
        }
    }

    pub fn kind(&self) -> PolicyKind {
        match self {
            MatchPolicy::Cursor => PolicyKind::Cursor,
            MatchPolicy::Window { .. } => PolicyKind::Window,
        }
    }
}

impl fmt::Display for MatchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchPolicy::Cursor => write!(f, "cursor"),
            MatchPolicy::Window { threshold, mode } => {
                write!(f, "window({}, {}ms)", mode, threshold.as_millis())
            }
        }
    }
}

/// Per-matcher progress, owned by the matcher and touched only by `on_input`
#[derive(Debug, Clone)]
enum MatcherState {
    Cursor(CursorMatcher),
    Window(WindowMatcher),
}

/// Recognizes one target sequence in a stream of key presses.
#[derive(Debug, Clone)]
pub struct SequenceMatcher {
    target: TargetSequence,
    symbols: SymbolMap,
    policy: MatchPolicy,
    state: MatcherState,
}

impl SequenceMatcher {
    pub fn new(target: TargetSequence, symbols: SymbolMap, policy: MatchPolicy) -> Self {
        let state = match policy {
            MatchPolicy::Cursor => MatcherState::Cursor(CursorMatcher::new()),
            MatchPolicy::Window { threshold, mode } => {
                MatcherState::Window(WindowMatcher::new(threshold, mode))
            }
        };
        Self {
            target,
            symbols,
            policy,
            state,
        }
    }

    /// Position-cursor matcher over `symbols`
    pub fn cursor(target: TargetSequence, symbols: SymbolMap) -> Self {
        Self::new(target, symbols, MatchPolicy::Cursor)
    }

    /// Timing-window matcher comparing raw decimal codes
    pub fn window(target: TargetSequence, threshold: Duration, mode: WindowMode) -> Self {
        Self::new(target, SymbolMap::Raw, MatchPolicy::Window { threshold, mode })
    }

    pub fn target(&self) -> &TargetSequence {
        &self.target
    }

    pub fn symbols(&self) -> &SymbolMap {
        &self.symbols
    }

    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    /// Raw codes accepted at each position of the target
    pub fn key_codes(&self) -> Vec<Vec<KeyCode>> {
        self.target
            .symbols()
            .iter()
            .map(|symbol| self.symbols.codes_for(symbol))
            .collect()
    }

    /// Whether `other` would fire on the same key presses under the same kind of policy.
    ///
    /// Targets are compared by the raw codes they accept, so `"65,66"` (raw) and
    /// `"a,b"` (standard) collide. A target with a symbol no code produces falls back
    /// to comparing symbols.
    pub fn shares_trigger(&self, other: &SequenceMatcher) -> bool {
        if self.policy.kind() != other.policy.kind() {
            return false;
        }
        let (mine, theirs) = (self.key_codes(), other.key_codes());
        let resolvable = |codes: &[Vec<KeyCode>]| !codes.iter().any(Vec::is_empty);
        if resolvable(&mine[..]) && resolvable(&theirs[..]) {
            mine == theirs
        } else {
            self.target == other.target
        }
    }

    /// Cursor position, or the number of buffered symbols for the window policy
    pub fn progress(&self) -> usize {
        match &self.state {
            MatcherState::Cursor(cursor) => cursor.progress(),
            MatcherState::Window(window) => window.buffered(),
        }
    }

    pub fn reset(&mut self) {
        match &mut self.state {
            MatcherState::Cursor(cursor) => cursor.reset(),
            MatcherState::Window(window) => window.reset(),
        }
    }

    /// Feed one key press; returns true when the target sequence completes
    pub fn on_input(&mut self, input: &KeyInput) -> bool {
        let symbol = self.symbols.resolve(input.code);
        match &mut self.state {
            MatcherState::Cursor(cursor) => cursor.advance(&self.target, symbol.as_ref()),
            MatcherState::Window(window) => window.push(&self.target, symbol, input.timestamp),
        }
    }
}
