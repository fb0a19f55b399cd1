//=========================================================================
// History Stack
//=========================================================================
//
// Ordered navigation history of content handles.
//
// Architecture:
//   HistoryStack
//     └─ entries: Vec<ContentHandle<V>>   (bottom → top)
//
// Prune policy:
//   unto = None        → the top entry
//   unto = Some(name)  → every entry above the topmost one named `name`
//
// Pruning is split into `prune_depth` (validate, no mutation) and
// `prune` (dispose), so callers can check a prune before committing.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use super::{ContentHandle, Visual};
use crate::core::error::StageError;

//=== HistoryStack ========================================================

/// Navigation history. Never empty; the top entry is the displayed one.
pub struct HistoryStack<V: Visual> {
    entries: Vec<ContentHandle<V>>,
}

impl<V: Visual> HistoryStack<V> {
    //--- Construction -----------------------------------------------------

    /// Creates a history seeded with the initially displayed content.
    pub fn new(initial: ContentHandle<V>) -> Self {
        Self {
            entries: vec![initial],
        }
    }

    //--- Queries ----------------------------------------------------------

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false` for a stack built through [`HistoryStack::new`]; only
    /// a panic between prune and push can leave it empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The currently displayed entry.
    pub fn top(&self) -> Option<&ContentHandle<V>> {
        self.entries.last()
    }

    /// Entries from bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = &ContentHandle<V>> {
        self.entries.iter()
    }

    /// Entry names from bottom to top.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(ContentHandle::name).collect()
    }

    /// Number of entries that a prune would destroy, without touching the
    /// stack.
    ///
    /// Fails with [`StageError::StackUnderflow`] if `unto` names no entry.
    pub fn prune_depth(&self, unto: Option<&str>) -> Result<usize, StageError> {
        match unto {
            None if self.entries.is_empty() => Err(StageError::StackUnderflow { unto: None }),
            None => Ok(1),
            Some(name) => self
                .entries
                .iter()
                .rev()
                .position(|entry| entry.name() == name)
                .ok_or_else(|| StageError::StackUnderflow {
                    unto: Some(name.to_string()),
                }),
        }
    }

    //--- Mutation ---------------------------------------------------------

    /// Pushes a new top entry.
    pub fn push(&mut self, handle: ContentHandle<V>) {
        debug!("Pushing '{}' onto history (depth {})", handle.name(), self.entries.len() + 1);
        self.entries.push(handle);
    }

    /// Disposes the top `depth` entries. Returns how many were destroyed.
    pub fn prune(&mut self, depth: usize) -> usize {
        let keep = self.entries.len().saturating_sub(depth);
        let pruned = self.entries.len() - keep;

        // Top first, so entries are destroyed in reverse navigation order.
        while self.entries.len() > keep {
            if let Some(handle) = self.entries.pop() {
                handle.dispose();
            }
        }

        debug!("Pruned {} history entries, {} remain", pruned, self.entries.len());
        pruned
    }

    /// Validates and applies the prune policy in one step.
    pub fn prune_unto(&mut self, unto: Option<&str>) -> Result<usize, StageError> {
        let depth = self.prune_depth(unto)?;
        Ok(self.prune(depth))
    }
}

impl<V: Visual + std::fmt::Debug> std::fmt::Debug for HistoryStack<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryStack").field("entries", &self.entries).finish()
    }
}

//=== Tests ===============================================================
