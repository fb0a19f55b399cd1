//=========================================================================
// Content System
//=========================================================================
//
// Displayed content, its navigation history, and the operations that
// rewrite both while the curtain covers the screen.
//
// Architecture:
//   HistoryStack
//     └─ entries: Vec<ContentHandle<V>>   (top = displayed)
//
//   Operation::{Add, Replace, Revert} ──apply()──> HistoryStack + surface
//
//=========================================================================

//=== Module Declarations =================================================

mod handle;
mod history;
mod operation;

//=== Public API ==========================================================

pub use handle::{ContentHandle, ContentSource, Visual};
pub use history::HistoryStack;
pub use operation::{AddContent, InitHook, Operation, ReplaceContent, RevertContent, RevertHook};

pub(crate) use operation::SwapScope;
