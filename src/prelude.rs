//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use aetheric_stage::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Stage facade
pub use crate::stage::{Stage, StageBuilder, StageStatus};

// Content and operations
pub use crate::core::content::{
    AddContent, ContentHandle, ContentSource, HistoryStack, ReplaceContent, RevertContent, Visual,
};

// Curtains
pub use crate::core::curtain::{
    CloseSignal, Curtain, CurtainPhase, CurtainSignals, CutCurtain, OpenSignal,
};

// Asset lookup
pub use crate::core::assets::{AssetRegistry, AssetResolver};

// Host integration and errors
pub use crate::core::{ErrorNotice, ErrorSink, ResolveError, StageError, StageSurface};
