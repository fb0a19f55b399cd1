//=========================================================================
// Integration Test Helpers
//=========================================================================
//
// A headless host for the stage: screens that record their disposal, a
// surface that journals every call, and a curtain whose signals the test
// fires by hand.
//
//=========================================================================

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use aetheric_stage::prelude::*;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

//=== Host ================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Lock(bool),
    Overlay(bool),
    Clear,
    Attach(String),
    Dispose(String),
    Error { header: String, message: String },
}

#[derive(Default)]
struct Journal {
    calls: Vec<Call>,
    visible: Option<String>,
}

/// Shared record of everything the stage did to the host.
#[derive(Clone, Default)]
pub struct Host(Rc<RefCell<Journal>>);

impl Host {
    pub fn screen(&self, title: &str) -> Screen {
        Screen {
            title: title.to_string(),
            host: self.clone(),
        }
    }

    pub fn surface(&self) -> HostSurface {
        HostSurface(self.clone())
    }

    /// Resolver producing a fresh screen for any of `names`.
    pub fn screens(&self, names: &[&'static str]) -> AssetRegistry<Screen> {
        let mut registry = AssetRegistry::new();
        for &name in names {
            let host = self.clone();
            registry
                .register(name, move || host.screen(name))
                .expect("valid screen id");
        }
        registry
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.borrow().calls.clone()
    }

    pub fn disposed(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Dispose(name) => Some(name),
                _ => None,
            })
            .collect()
    }

    /// Position of `call` in the journal.
    pub fn position(&self, call: &Call) -> Option<usize> {
        self.0.borrow().calls.iter().position(|c| c == call)
    }

    /// Name of the handle attached last, cleared by `clear_content`.
    pub fn visible(&self) -> Option<String> {
        self.0.borrow().visible.clone()
    }

    pub fn count(&self, call: &Call) -> usize {
        self.0.borrow().calls.iter().filter(|c| *c == call).count()
    }

    fn record(&self, call: Call) {
        self.0.borrow_mut().calls.push(call);
    }
}

pub struct Screen {
    pub title: String,
    host: Host,
}

impl Visual for Screen {
    fn dispose(&mut self) {
        self.host.record(Call::Dispose(self.title.clone()));
    }
}

pub struct HostSurface(Host);

impl StageSurface<Screen> for HostSurface {
    fn set_lock_visible(&mut self, visible: bool) {
        self.0.record(Call::Lock(visible));
    }

    fn set_curtain_layer_active(&mut self, active: bool) {
        self.0.record(Call::Overlay(active));
    }

    fn clear_content(&mut self) {
        self.0.record(Call::Clear);
        self.0 .0.borrow_mut().visible = None;
    }

    fn attach_content(&mut self, handle: &ContentHandle<Screen>) {
        self.0.record(Call::Attach(handle.name().to_string()));
        self.0 .0.borrow_mut().visible = Some(handle.name().to_string());
    }

    fn show_error(&mut self, notice: &ErrorNotice) {
        self.0.record(Call::Error {
            header: notice.header.clone(),
            message: notice.message.clone(),
        });
    }
}

//=== Manual Curtain ======================================================

/// Signals handed out by [`ManualCurtain`], oldest first.
#[derive(Clone, Default)]
pub struct Stagehand {
    held: Rc<RefCell<VecDeque<CurtainSignals>>>,
    runs: Rc<RefCell<usize>>,
}

impl Stagehand {
    pub fn curtain(&self) -> Box<dyn Curtain> {
        Box::new(ManualCurtain {
            stagehand: self.clone(),
        })
    }

    /// Number of curtains started so far.
    pub fn runs(&self) -> usize {
        *self.runs.borrow()
    }

    /// Takes the signals of the oldest running curtain.
    pub fn take(&self) -> CurtainSignals {
        self.held
            .borrow_mut()
            .pop_front()
            .expect("a curtain is running")
    }

    pub fn waiting(&self) -> usize {
        self.held.borrow().len()
    }
}

pub struct ManualCurtain {
    stagehand: Stagehand,
}

impl Curtain for ManualCurtain {
    fn run(&mut self, signals: CurtainSignals) {
        *self.stagehand.runs.borrow_mut() += 1;
        self.stagehand.held.borrow_mut().push_back(signals);
    }
}

//=== Fixtures ============================================================

/// Stage showing `A` with screens `B`, `C` and `D` resolvable and a manual
/// default curtain.
pub fn manual_stage(host: &Host, stagehand: &Stagehand) -> Stage<Screen> {
    init_logging();
    let stagehand = stagehand.clone();
    StageBuilder::new("A", host.screen("A"))
        .with_content_resolver(host.screens(&["B", "C", "D"]))
        .with_default_curtain(move || stagehand.curtain())
        .build(host.surface())
}

/// Same as [`manual_stage`] but with instant curtains.
pub fn instant_stage(host: &Host) -> Stage<Screen> {
    init_logging();
    StageBuilder::new("A", host.screen("A"))
        .with_content_resolver(host.screens(&["B", "C", "D"]))
        .build(host.surface())
}
