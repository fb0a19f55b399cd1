//=========================================================================
// Lock Counter
//=========================================================================
//
// Reentrant stage-wide input lock.
//
// Every transition holds one lock while it runs; unrelated long
// operations may hold their own. The indicator is visible while any
// holder remains.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::warn;

//=== LockCounter =========================================================

/// Counts outstanding lock holders.
///
/// `lock` and `unlock` report whether the indicator visibility flipped, so
/// the owner only touches the surface on real changes.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LockCounter {
    count: usize,
}

impl LockCounter {
    /// Creates an unlocked counter.
    pub fn new() -> Self {
        Self { count: 0 }
    }

    /// Adds a holder. Returns `true` if the indicator just became visible.
    pub fn lock(&mut self) -> bool {
        self.count += 1;
        self.count == 1
    }

    /// Releases a holder, clamped at zero. Returns `true` if the indicator
    /// just became hidden.
    pub fn unlock(&mut self) -> bool {
        if self.count == 0 {
            warn!("Unlock requested with no outstanding lock holders");
            return false;
        }
        self.count -= 1;
        self.count == 0
    }

    /// Whether the indicator should be visible.
    pub fn is_locked(&self) -> bool {
        self.count > 0
    }

    /// Number of outstanding holders.
    pub fn holders(&self) -> usize {
        self.count
    }
}

//=== Tests ===============================================================
