//=========================================================================
// Curtain System
//=========================================================================
//
// Full-screen cover/reveal animations that bridge content swaps.
//
// Architecture:
//   CurtainLibrary
//     ├─ registry: AssetRegistry<Box<dyn Curtain>>
//     └─ default: CurtainFactory                 (CutCurtain if unset)
//
//   CurtainController::begin() → Curtain::run(CurtainSignals)
//   Stage::pump() → Curtain::update()  (once per pump while in flight)
//     → close fired → swap → open fired → settle
//
//=========================================================================

//=== Module Declarations =================================================

mod controller;
mod signal;

//=== Public API ==========================================================

pub use controller::CurtainPhase;
pub use signal::{CloseSignal, CurtainCue, CurtainSignal, CurtainSignals, OpenSignal, TransitionId};

pub(crate) use controller::{CurtainController, Transition};
pub(crate) use signal::SignalCollector;

//=== Internal Dependencies ===============================================

use crate::core::assets::{AssetRegistry, AssetResolver};
use crate::core::error::ResolveError;

//=== Curtain Trait =======================================================

/// A transient full-screen cover animation.
///
/// One instance is created per transition and dropped when the transition
/// settles. The stage owns it for the whole transition and advances it
/// with [`Curtain::update`] on every [`Stage::pump`](crate::Stage::pump).
/// Between `run` and the updates it must eventually fire `signals.close`
/// and later `signals.open`; there is no timeout.
///
/// ```rust
/// use aetheric_stage::prelude::*;
///
/// /// Covers over `frames` pumps, then reveals over as many again.
/// struct Fade {
///     frames: u32,
///     elapsed: u32,
///     close: Option<CloseSignal>,
///     open: Option<OpenSignal>,
/// }
///
/// impl Curtain for Fade {
///     fn run(&mut self, signals: CurtainSignals) {
///         self.close = Some(signals.close);
///         self.open = Some(signals.open);
///     }
///
///     fn update(&mut self) {
///         self.elapsed += 1;
///         if self.elapsed >= self.frames {
///             if let Some(close) = self.close.take() {
///                 close.fire();
///             }
///         }
///         if self.elapsed >= self.frames * 2 {
///             if let Some(open) = self.open.take() {
///                 open.fire();
///             }
///         }
///     }
/// }
///
/// struct Screen;
/// impl Visual for Screen {}
///
/// struct Headless;
/// impl StageSurface<Screen> for Headless {
///     fn set_lock_visible(&mut self, _visible: bool) {}
///     fn set_curtain_layer_active(&mut self, _active: bool) {}
///     fn clear_content(&mut self) {}
///     fn attach_content(&mut self, _handle: &ContentHandle<Screen>) {}
/// }
///
/// let mut stage = StageBuilder::new("title", Screen)
///     .with_default_curtain(|| {
///         Box::new(Fade { frames: 3, elapsed: 0, close: None, open: None })
///     })
///     .build(Headless);
///
/// stage.add(AddContent::new("options", ContentSource::instance(Screen)));
/// let mut pumps = 1;
/// while stage.pump() == StageStatus::Busy {
///     pumps += 1;
/// }
/// assert_eq!(pumps, 6);
/// assert_eq!(stage.history().names(), vec!["title", "options"]);
/// ```
pub trait Curtain {
    /// Starts the animation with its two completion signals.
    fn run(&mut self, signals: CurtainSignals);

    /// Advances the animation by one stage pump.
    ///
    /// Default implementation does nothing.
    fn update(&mut self) {}

    /// Called once when the transition settles, before the curtain is
    /// dropped.
    ///
    /// Default implementation does nothing.
    fn dispose(&mut self) {}
}

/// Factory producing a fresh curtain for each transition.
pub type CurtainFactory = Box<dyn Fn() -> Box<dyn Curtain>>;

//=== CutCurtain ==========================================================

/// Instant curtain: covers and reveals immediately.
///
/// Used as the default when no default curtain is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct CutCurtain;

impl Curtain for CutCurtain {
    fn run(&mut self, signals: CurtainSignals) {
        signals.close.fire();
        signals.open.fire();
    }
}

//=== CurtainLibrary ======================================================

/// Named curtains plus the default used when a transition names none.
pub(crate) struct CurtainLibrary {
    registry: AssetRegistry<Box<dyn Curtain>>,
    default: CurtainFactory,
}

impl CurtainLibrary {
    pub(crate) fn new(registry: AssetRegistry<Box<dyn Curtain>>, default: Option<CurtainFactory>) -> Self {
        let default = default.unwrap_or_else(|| -> CurtainFactory {
            Box::new(|| Box::new(CutCurtain) as Box<dyn Curtain>)
        });
        Self { registry, default }
    }

    /// Resolves curtain `id` from the registry.
    pub(crate) fn resolve(&self, id: &str) -> Result<Box<dyn Curtain>, ResolveError> {
        self.registry.resolve(id)
    }

    /// A fresh default curtain.
    pub(crate) fn default_curtain(&self) -> Box<dyn Curtain> {
        (self.default)()
    }
}

//=== Tests ===============================================================
