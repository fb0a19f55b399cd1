//=========================================================================
// Test Support
//=========================================================================
//
// Recording doubles for unit tests: a visual that reports its disposal
// and a surface that logs every container change, both into one journal
// so tests can check their relative order.
//
//=========================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::core::content::{ContentHandle, Visual};
use crate::core::surface::{ErrorNotice, StageSurface};

//--- Events --------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SurfaceEvent {
    Lock(bool),
    CurtainLayer(bool),
    Cleared,
    Attached(String),
    Disposed(String),
    Error(String),
}

/// Shared journal read by the test after the stage has written to it.
#[derive(Clone, Default)]
pub(crate) struct SurfaceLog(Rc<RefCell<Vec<SurfaceEvent>>>);

impl SurfaceLog {
    pub(crate) fn panel(&self, label: &str) -> Panel {
        Panel {
            label: label.to_string(),
            log: self.clone(),
        }
    }

    pub(crate) fn surface(&self) -> RecordingSurface {
        RecordingSurface {
            log: self.clone(),
            fail_on: None,
        }
    }

    /// Surface that panics when asked to attach `name`.
    pub(crate) fn failing_surface(&self, name: &str) -> RecordingSurface {
        RecordingSurface {
            log: self.clone(),
            fail_on: Some(name.to_string()),
        }
    }

    pub(crate) fn events(&self) -> Vec<SurfaceEvent> {
        self.0.borrow().clone()
    }

    pub(crate) fn disposed(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                SurfaceEvent::Disposed(label) => Some(label),
                _ => None,
            })
            .collect()
    }

    fn record(&self, event: SurfaceEvent) {
        self.0.borrow_mut().push(event);
    }
}

//--- Panel ---------------------------------------------------------------

pub(crate) struct Panel {
    pub label: String,
    log: SurfaceLog,
}

impl Visual for Panel {
    fn dispose(&mut self) {
        self.log.record(SurfaceEvent::Disposed(self.label.clone()));
    }
}

//--- RecordingSurface ----------------------------------------------------

pub(crate) struct RecordingSurface {
    log: SurfaceLog,
    fail_on: Option<String>,
}

impl StageSurface<Panel> for RecordingSurface {
    fn set_lock_visible(&mut self, visible: bool) {
        self.log.record(SurfaceEvent::Lock(visible));
    }

    fn set_curtain_layer_active(&mut self, active: bool) {
        self.log.record(SurfaceEvent::CurtainLayer(active));
    }

    fn clear_content(&mut self) {
        self.log.record(SurfaceEvent::Cleared);
    }

    fn attach_content(&mut self, handle: &ContentHandle<Panel>) {
        if self.fail_on.as_deref() == Some(handle.name()) {
            panic!("surface refused '{}'", handle.name());
        }
        self.log.record(SurfaceEvent::Attached(handle.name().to_string()));
    }

    fn show_error(&mut self, notice: &ErrorNotice) {
        self.log.record(SurfaceEvent::Error(notice.message.clone()));
    }
}
