//=========================================================================
// Stage Surface
//=========================================================================
//
// Presentation-side contracts consumed by the stage.
//
// The stage never renders anything itself. It flips visibility flags,
// clears and fills the content container, and reports errors; the
// surface and the error sink decide what that looks like.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::error;

//=== Internal Dependencies ===============================================

use crate::core::content::{ContentHandle, Visual};
use crate::core::error::StageError;

//=== StageSurface ========================================================

/// Visual layers driven by the stage.
pub trait StageSurface<V: Visual> {
    /// Shows or hides the input-lock indicator.
    fn set_lock_visible(&mut self, visible: bool);

    /// Activates or deactivates the overlay layer curtains play on.
    fn set_curtain_layer_active(&mut self, active: bool);

    /// Detaches every visual from the content container.
    fn clear_content(&mut self);

    /// Attaches `handle`'s visual to the content container.
    fn attach_content(&mut self, handle: &ContentHandle<V>);

    /// Shows the fatal error screen, hiding the regular layers.
    ///
    /// Default implementation does nothing.
    fn show_error(&mut self, _notice: &ErrorNotice) {}
}

//=== ErrorNotice =========================================================

/// Contents of the error screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorNotice {
    pub header: String,
    pub message: String,
}

impl ErrorNotice {
    /// Header used for errors caught by the stage.
    pub const UNCAUGHT: &'static str = "Uncaught error";

    pub fn new(header: impl Into<String>, message: Option<&str>) -> Self {
        Self {
            header: header.into(),
            message: message.unwrap_or_default().to_string(),
        }
    }
}

//=== ErrorSink ===========================================================

/// Receives every error the stage catches.
pub trait ErrorSink {
    fn report(&mut self, error: &StageError);
}

/// Error sink that writes to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogErrorSink;

impl ErrorSink for LogErrorSink {
    fn report(&mut self, err: &StageError) {
        error!("Stage error: {}", err);
    }
}

impl<F> ErrorSink for F
where
    F: FnMut(&StageError),
{
    fn report(&mut self, error: &StageError) {
        self(error)
    }
}

//=== Tests ===============================================================
