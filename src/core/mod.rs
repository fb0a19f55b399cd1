//=========================================================================
// Core Systems
//=========================================================================
//
// Building blocks of the stage.
//
// Architecture:
//   TransitionQueue ──> CurtainController ──> Operation::apply()
//         │                    │                     │
//         └──────────── StageContext ────────────────┘
//                 (history, lock, surface, resolvers)
//
// Everything here runs on the owner's thread. The only cross-thread
// path is the curtain signal channel.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod assets;
pub mod content;
pub mod curtain;

mod context;
mod error;
mod lock;
mod surface;
mod transition_queue;

#[cfg(test)]
pub(crate) mod test_support;

//=== Public API ==========================================================

pub use error::{ResolveError, StageError};
pub use lock::LockCounter;
pub use surface::{ErrorNotice, ErrorSink, LogErrorSink, StageSurface};

pub(crate) use context::StageContext;
pub(crate) use transition_queue::TransitionQueue;
