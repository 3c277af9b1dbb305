// Eggrs Timing-Window Matcher
// Buffers the current burst of keys and compares it against the target

use std::time::Duration;

use smallvec::SmallVec;

use crate::matcher::WindowMode;
use crate::symbol::Symbol;
use crate::TargetSequence;

/// Default gap after which the buffered burst is discarded
pub const DEFAULT_THRESHOLD: Duration = Duration::from_millis(1000);

/// Buffer state for the timing-window policy.
///
/// The buffer never holds more than `N` symbols. In [`WindowMode::Burst`] a
/// burst longer than the target is flagged as overflowed instead of growing,
/// which can never compare equal again until the next gap.
#[derive(Debug, Clone)]
pub struct WindowMatcher {
    threshold: Duration,
    mode: WindowMode,
    buffer: SmallVec<[Option<Symbol>; 16]>,
    overflowed: bool,
    last: Option<Duration>,
}

impl WindowMatcher {
    pub fn new(threshold: Duration, mode: WindowMode) -> Self {
        Self {
            threshold,
            mode,
            buffer: SmallVec::new(),
            overflowed: false,
            last: None,
        }
    }

    pub fn threshold(&self) -> Duration {
        self.threshold
    }

    pub fn mode(&self) -> WindowMode {
        self.mode
    }

    /// Number of symbols currently held for comparison
    pub fn buffered(&self) -> usize {
        if self.overflowed {
            0
        } else {
            self.buffer.len()
        }
    }

    /// Timestamp of the last accepted symbol
    pub fn last_timestamp(&self) -> Option<Duration> {
        self.last
    }

    /// Drop buffered symbols; the last timestamp is kept
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.overflowed = false;
    }

    /// Forget everything, including the last timestamp
    pub fn reset(&mut self) {
        self.clear();
        self.last = None;
    }

    /// Feed one symbol pressed at `timestamp`, returning true on a match.
    pub fn push(
        &mut self,
        target: &TargetSequence,
        symbol: Option<Symbol>,
        timestamp: Duration,
    ) -> bool {
        // The first key has no predecessor, so it never clears
        let gap = self
            .last
            .map(|last| timestamp.saturating_sub(last))
            .unwrap_or_default();
        if gap > self.threshold {
            log::trace!("gap of {:?} exceeds {:?}, clearing buffer", gap, self.threshold);
            self.clear();
        }
        self.last = Some(timestamp);

        match self.mode {
            WindowMode::Tail => {
                if self.buffer.len() == target.len() {
                    self.buffer.remove(0);
                }
                self.buffer.push(symbol);
            }
            WindowMode::Burst => {
                if self.overflowed {
                    // stays unequal until the next gap
                } else if self.buffer.len() == target.len() {
                    self.overflowed = true;
                } else {
                    self.buffer.push(symbol);
                }
            }
        }

        let matched = !self.overflowed
            && self.buffer.len() == target.len()
            && self
                .buffer
                .iter()
                .zip(target.symbols())
                .all(|(got, want)| got.as_ref() == Some(want));

        if matched && self.mode == WindowMode::Tail {
            self.clear();
        }

        matched
    }
}
