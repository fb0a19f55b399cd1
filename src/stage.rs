//=========================================================================
// Aetheric Stage
//
// Main entry point and coordinator for content transitions.
//
// Architecture:
// ```text
//     StageBuilder  ──build(surface)──>  Stage  ──pump()──>  [signals applied]
//         │                                │
//         ├─ with_content_resolver()       ├─ add() / replace() / revert()
//         ├─ with_curtain()                ├─ lock() / unlock()
//         ├─ with_default_curtain()        └─ show_error() / catch_error()
//         ├─ with_error_sink()
//         └─ with_error_screen()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use log::info;

//=== Internal Dependencies ===============================================

use crate::core::assets::{AssetRegistry, AssetResolver};
use crate::core::content::{
    AddContent, ContentHandle, HistoryStack, Operation, ReplaceContent, RevertContent, Visual,
};
use crate::core::curtain::{
    Curtain, CurtainController, CurtainFactory, CurtainLibrary, CurtainPhase, SignalCollector,
};
use crate::core::{
    ErrorNotice, ErrorSink, LockCounter, LogErrorSink, StageContext, StageError, StageSurface,
    TransitionQueue,
};

//=== StageBuilder ========================================================

/// Builder for configuring and constructing a [`Stage`].
///
/// # Default Values
///
/// - **Content resolver**: empty [`AssetRegistry`] (only instance sources work)
/// - **Default curtain**: [`CutCurtain`](crate::core::curtain::CutCurtain)
/// - **Error sink**: [`LogErrorSink`]
/// - **Error screen**: enabled
/// - **Signals per pump**: 64
///
/// # Examples
///
/// ```rust
/// use aetheric_stage::prelude::*;
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
/// let mut content = AssetRegistry::new();
/// content.register("lobby", || Screen).unwrap();
///
/// let mut stage = StageBuilder::new("boot", Screen)
///     .with_content_resolver(content)
///     .build(Headless);
///
/// stage.replace(ReplaceContent::new("lobby", "lobby"));
/// assert_eq!(stage.pump(), StageStatus::Idle);
/// assert_eq!(stage.history().names(), vec!["lobby"]);
/// ```
pub struct StageBuilder<V: Visual> {
    initial: ContentHandle<V>,
    content: Box<dyn AssetResolver<V>>,
    curtains: AssetRegistry<Box<dyn Curtain>>,
    default_curtain: Option<CurtainFactory>,
    errors: Box<dyn ErrorSink>,
    error_screen: bool,
    max_signals_per_pump: usize,
}

impl<V: Visual> StageBuilder<V> {
    /// Creates a builder whose history is seeded with the content already
    /// on screen.
    pub fn new(name: impl Into<String>, visual: V) -> Self {
        Self {
            initial: ContentHandle::new(name, visual),
            content: Box::new(AssetRegistry::<V>::new()),
            curtains: AssetRegistry::new(),
            default_curtain: None,
            errors: Box::new(LogErrorSink),
            error_screen: true,
            max_signals_per_pump: 64,
        }
    }

    /// Sets the resolver used for [`ContentSource::Asset`](crate::core::content::ContentSource::Asset) sources.
    pub fn with_content_resolver<R>(mut self, resolver: R) -> Self
    where
        R: AssetResolver<V> + 'static,
    {
        self.content = Box::new(resolver);
        self
    }

    /// Replaces the whole curtain registry.
    pub fn with_curtains(mut self, curtains: AssetRegistry<Box<dyn Curtain>>) -> Self {
        self.curtains = curtains;
        self
    }

    /// Registers curtain `id` (`name` or `bundle:name`).
    ///
    /// # Panics
    ///
    /// Panics if `id` is empty.
    pub fn with_curtain<F>(mut self, id: &str, factory: F) -> Self
    where
        F: Fn() -> Box<dyn Curtain> + 'static,
    {
        let registered = self.curtains.register(id, factory);
        assert!(registered.is_ok(), "Curtain id must not be empty, got {:?}", id);
        self
    }

    /// Sets the curtain used when a transition names none.
    pub fn with_default_curtain<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> Box<dyn Curtain> + 'static,
    {
        self.default_curtain = Some(Box::new(factory));
        self
    }

    /// Sets the sink receiving every caught error.
    pub fn with_error_sink<S>(mut self, sink: S) -> Self
    where
        S: ErrorSink + 'static,
    {
        self.errors = Box::new(sink);
        self
    }

    /// Whether caught errors also raise the error screen.
    ///
    /// Default: true
    pub fn with_error_screen(mut self, enabled: bool) -> Self {
        self.error_screen = enabled;
        self
    }

    /// Caps how many curtain signals one [`Stage::pump`] applies.
    ///
    /// Default: 64
    ///
    /// # Panics
    ///
    /// Panics if `max == 0`.
    pub fn with_max_signals_per_pump(mut self, max: usize) -> Self {
        assert!(max > 0, "Signals per pump must be positive");
        self.max_signals_per_pump = max;
        self
    }

    /// Builds the stage and attaches the initial content to `surface`.
    pub fn build<S>(self, surface: S) -> Stage<V>
    where
        S: StageSurface<V> + 'static,
    {
        info!(
            "Building stage (initial: '{}', error screen: {}, signals/pump: {})",
            self.initial.name(),
            self.error_screen,
            self.max_signals_per_pump
        );

        let mut surface: Box<dyn StageSurface<V>> = Box::new(surface);
        surface.attach_content(&self.initial);

        let signals = SignalCollector::new();
        let controller = CurtainController::new(signals.sender());

        Stage {
            context: StageContext {
                history: HistoryStack::new(self.initial),
                lock: LockCounter::new(),
                surface,
                content: self.content,
                curtains: CurtainLibrary::new(self.curtains, self.default_curtain),
                errors: self.errors,
                error_notice: None,
                error_screen: self.error_screen,
            },
            queue: TransitionQueue::new(controller),
            signals,
            max_signals_per_pump: self.max_signals_per_pump,
        }
    }
}

//=== StageStatus =========================================================

/// Result of a [`Stage::pump`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageStatus {
    /// No transition in flight.
    Idle,

    /// A transition is waiting for its curtain.
    Busy,
}

//=== Stage ===============================================================

/// Owner of the content area, its history, and the transition machine.
///
/// Navigation calls only enqueue; transitions advance when the curtain
/// fires its signals and the owner calls [`Stage::pump`] (typically once
/// per frame).
pub struct Stage<V: Visual> {
    context: StageContext<V>,
    queue: TransitionQueue<V>,
    signals: SignalCollector,
    max_signals_per_pump: usize,
}

impl<V: Visual> Stage<V> {
    //--- Navigation -------------------------------------------------------

    /// Pushes new content on top of the history.
    pub fn add(&mut self, request: AddContent<V>) {
        self.enqueue(request);
    }

    /// Prunes one entry (or back to a named one), then pushes new content.
    pub fn replace(&mut self, request: ReplaceContent<V>) {
        self.enqueue(request);
    }

    /// Prunes one entry (or back to a named one) and re-displays the
    /// exposed entry.
    pub fn revert(&mut self, request: RevertContent<V>) {
        self.enqueue(request);
    }

    /// Queues any operation. Starts it immediately if the stage is idle.
    pub fn enqueue(&mut self, operation: impl Into<Operation<V>>) {
        self.queue.enqueue(operation.into(), &mut self.context);
    }

    //--- Update Loop ------------------------------------------------------

    /// Advances the running curtain once, then applies pending curtain
    /// signals in arrival order.
    ///
    /// Signals fired while pumping (for example by a curtain started for
    /// the next queued transition) are applied in the same call, up to the
    /// configured per-pump limit.
    pub fn pump(&mut self) -> StageStatus {
        self.queue.update(&mut self.context);

        let mut budget = self.max_signals_per_pump;

        while budget > 0 {
            let batch = self.signals.collect(budget);
            if batch.is_empty() {
                break;
            }
            budget -= batch.len();

            for signal in batch {
                self.queue.handle_signal(signal, &mut self.context);
            }
        }

        self.status()
    }

    //--- Lock -------------------------------------------------------------

    /// Adds an input-lock holder.
    pub fn lock(&mut self) {
        self.context.lock();
    }

    /// Releases an input-lock holder.
    pub fn unlock(&mut self) {
        self.context.unlock();
    }

    /// Whether the lock indicator is visible.
    pub fn is_locked(&self) -> bool {
        self.context.lock.is_locked()
    }

    /// Number of outstanding lock holders, transitions included.
    pub fn lock_holders(&self) -> usize {
        self.context.lock.holders()
    }

    //--- Errors -----------------------------------------------------------

    /// Shows the error screen unless one is already up.
    ///
    /// Returns `true` if this call raised it.
    pub fn show_error(&mut self, header: &str, message: Option<&str>) -> bool {
        self.context.show_error(header, message)
    }

    /// Routes an error to the sink and, if enabled, the error screen.
    pub fn catch_error(&mut self, error: StageError) {
        self.context.report(error);
    }

    /// The error screen currently showing, if any.
    pub fn error_notice(&self) -> Option<&ErrorNotice> {
        self.context.error_notice.as_ref()
    }

    //--- Queries ----------------------------------------------------------

    pub fn history(&self) -> &HistoryStack<V> {
        &self.context.history
    }

    /// The displayed entry.
    pub fn current(&self) -> Option<&ContentHandle<V>> {
        self.context.history.top()
    }

    pub fn phase(&self) -> CurtainPhase {
        self.queue.phase()
    }

    pub fn is_busy(&self) -> bool {
        self.queue.is_busy()
    }

    /// Transitions waiting behind the one in flight.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn status(&self) -> StageStatus {
        if self.queue.is_busy() {
            StageStatus::Busy
        } else {
            StageStatus::Idle
        }
    }
}

//=== Tests ===============================================================
