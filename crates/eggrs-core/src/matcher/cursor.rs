// Eggrs Position-Cursor Matcher
// Tracks how far into the target the input has progressed

use crate::symbol::Symbol;
use crate::TargetSequence;

/// Progress state for the position-cursor policy.
///
/// States are `0..N`; a correct next symbol advances by one, anything else
/// returns to 0. Reaching `N` reports a match and resets in the same step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CursorMatcher {
    cursor: usize,
}

impl CursorMatcher {
    pub fn new() -> Self {
        Self { cursor: 0 }
    }

    /// Current position within the target
    pub fn progress(&self) -> usize {
        self.cursor
    }

    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Feed one resolved symbol, returning true when the target completes.
    ///
    /// `None` is an unmapped code and never equals the expected symbol.
    pub fn advance(&mut self, target: &TargetSequence, symbol: Option<&Symbol>) -> bool {
        let expected = target.get(self.cursor);

        match symbol {
            Some(got) if Some(got) == expected => {
                self.cursor += 1;
                if self.cursor == target.len() {
                    log::trace!("cursor reached {} for {}", self.cursor, target);
                    self.cursor = 0;
                    return true;
                }
                log::trace!("cursor advanced to {}", self.cursor);
            }
            _ => {
                if self.cursor != 0 {
                    log::trace!("cursor reset from {} on {:?}", self.cursor, symbol);
                }
                self.cursor = 0;
            }
        }

        false
    }
}
