//=========================================================================
// Content Handle
//=========================================================================
//
// Owned wrapper around one displayed content visual.
//
// Handles live in the HistoryStack. Ownership moves only when a handle
// is pushed or pruned; pruning ends in an explicit `dispose`.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Visual Trait ========================================================

/// A displayable content object owned by the stage.
///
/// Rendering is the surface's business; the stage only needs to tell a
/// visual when it is destroyed for good.
///
/// ```rust
/// use aetheric_stage::prelude::*;
///
/// struct Panel;
///
/// impl Visual for Panel {}
/// ```
pub trait Visual: 'static {
    /// Called once when the owning handle is pruned from history.
    ///
    /// Default implementation does nothing.
    fn dispose(&mut self) {}
}

//=== ContentHandle =======================================================

/// One entry of the navigation history: a name plus the owned visual.
///
/// Names are navigation keys for prune-unto and need not be unique.
#[derive(Debug)]
pub struct ContentHandle<V: Visual> {
    name: String,
    visual: V,
}

impl<V: Visual> ContentHandle<V> {
    /// Wraps `visual` under `name`.
    pub fn new(name: impl Into<String>, visual: V) -> Self {
        Self {
            name: name.into(),
            visual,
        }
    }

    /// Navigation key of this entry.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The owned visual.
    pub fn visual(&self) -> &V {
        &self.visual
    }

    /// Mutable access to the owned visual, e.g. from an init hook.
    pub fn visual_mut(&mut self) -> &mut V {
        &mut self.visual
    }

    /// Destroys the handle, giving the visual its dispose callback.
    pub fn dispose(mut self) {
        debug!("Disposing content '{}'", self.name);
        self.visual.dispose();
    }
}

//=== ContentSource =======================================================

/// Where an Add/Replace operation gets its visual from.
pub enum ContentSource<V> {
    /// Asset identifier resolved through the stage's content resolver.
    Asset(String),

    /// A visual the caller already built.
    Instance(V),
}

impl<V> ContentSource<V> {
    /// Wraps a ready-made visual.
    pub fn instance(visual: V) -> Self {
        Self::Instance(visual)
    }
}

impl<V> From<&str> for ContentSource<V> {
    fn from(id: &str) -> Self {
        Self::Asset(id.to_string())
    }
}

impl<V> From<String> for ContentSource<V> {
    fn from(id: String) -> Self {
        Self::Asset(id)
    }
}

impl<V> std::fmt::Debug for ContentSource<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Asset(id) => f.debug_tuple("Asset").field(id).finish(),
            Self::Instance(_) => f.write_str("Instance(..)"),
        }
    }
}

//=== Tests ===============================================================
