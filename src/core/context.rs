//=========================================================================
// Stage Context
//=========================================================================
//
// Shared data container for the transition machinery.
//
// Contains everything a transition reads or writes:
// - history: navigation stack of content handles
// - lock: reentrant input lock
// - surface / errors: injected presentation collaborators
// - content / curtains: identifier resolvers
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use crate::core::assets::AssetResolver;
use crate::core::content::{HistoryStack, SwapScope, Visual};
use crate::core::curtain::{Curtain, CurtainLibrary};
use crate::core::error::StageError;
use crate::core::lock::LockCounter;
use crate::core::surface::{ErrorNotice, ErrorSink, StageSurface};

//=== StageContext ========================================================

/// State owned by the stage and passed to the queue and controller.
pub(crate) struct StageContext<V: Visual> {
    pub history: HistoryStack<V>,
    pub lock: LockCounter,
    pub surface: Box<dyn StageSurface<V>>,
    pub content: Box<dyn AssetResolver<V>>,
    pub curtains: CurtainLibrary,
    pub errors: Box<dyn ErrorSink>,
    pub error_notice: Option<ErrorNotice>,
    pub error_screen: bool,
}

impl<V: Visual> StageContext<V> {
    //--- Lock -------------------------------------------------------------

    pub fn lock(&mut self) {
        if self.lock.lock() {
            self.surface.set_lock_visible(true);
        }
    }

    pub fn unlock(&mut self) {
        if self.lock.unlock() {
            self.surface.set_lock_visible(false);
        }
    }

    //--- Errors -----------------------------------------------------------

    /// Forwards `err` to the sink and, if enabled, the error screen.
    pub fn report(&mut self, err: StageError) {
        self.errors.report(&err);
        if self.error_screen {
            self.show_error(ErrorNotice::UNCAUGHT, Some(&err.to_string()));
        }
    }

    /// Shows the error screen unless one is already showing.
    ///
    /// Returns `true` if this call put the notice up.
    pub fn show_error(&mut self, header: &str, message: Option<&str>) -> bool {
        if self.error_notice.is_some() {
            debug!("Error screen already showing, ignoring '{}'", header);
            return false;
        }

        let notice = ErrorNotice::new(header, message);
        self.surface.show_error(&notice);
        self.error_notice = Some(notice);
        true
    }

    //--- Transitions ------------------------------------------------------

    /// Curtain `id`, or the default one. An unresolvable id is reported and
    /// replaced by the default so the transition still runs.
    pub fn curtain_for(&mut self, id: Option<&str>) -> Box<dyn Curtain> {
        let Some(id) = id else {
            return self.curtains.default_curtain();
        };

        match self.curtains.resolve(id) {
            Ok(curtain) => curtain,
            Err(err) => {
                warn!("Curtain '{}' unavailable, using default: {}", id, err);
                self.report(err.into());
                self.curtains.default_curtain()
            }
        }
    }

    pub fn swap_scope(&mut self) -> SwapScope<'_, V> {
        SwapScope {
            history: &mut self.history,
            surface: self.surface.as_mut(),
            resolver: self.content.as_ref(),
        }
    }

    /// Re-attaches the current top after a failed swap cleared the
    /// container.
    pub fn restore_top(&mut self) {
        if let Some(top) = self.history.top() {
            self.surface.attach_content(top);
        }
    }
}
