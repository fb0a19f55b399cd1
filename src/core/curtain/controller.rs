//=========================================================================
// Curtain Controller
//=========================================================================
//
// Drives one transition through its close → swap → open lifecycle.
//
// States:
//   Idle ──begin()──> Closing ──close()──> Swapping ──> Opening ──open()──> settled
//
// The swap runs only while the curtain fully covers the screen. Any
// failure inside it is reported and swallowed: the curtain always gets
// to open, and the lock is always released.
//
// A curtain that panics is dropped and the controller fires its
// remaining signals itself, so the transition still settles.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::panic::{self, AssertUnwindSafe};

use crossbeam_channel::Sender;
use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::{Curtain, CurtainCue, CurtainSignal, CurtainSignals, TransitionId};
use crate::core::content::{Operation, Visual};
use crate::core::context::StageContext;
use crate::core::error::StageError;

//=== CurtainPhase ========================================================

/// Where the transition machine currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CurtainPhase {
    /// No transition in flight.
    #[default]
    Idle,

    /// Curtain is covering the screen.
    Closing,

    /// Screen is covered and the operation is being applied.
    Swapping,

    /// Swap done, curtain is revealing the screen.
    Opening,
}

//=== Transition ==========================================================

/// The in-flight transition: its operation (until applied) and curtain.
pub(crate) struct Transition<V: Visual> {
    id: TransitionId,
    phase: CurtainPhase,
    operation: Option<Operation<V>>,
    curtain: Option<Box<dyn Curtain>>,
}

impl<V: Visual> Transition<V> {
    pub(crate) fn id(&self) -> TransitionId {
        self.id
    }

    pub(crate) fn phase(&self) -> CurtainPhase {
        self.phase
    }
}

//=== CurtainController ===================================================

/// Starts transitions and reacts to their curtain signals.
pub(crate) struct CurtainController {
    signals: Sender<CurtainSignal>,
    next_id: u64,
}

impl CurtainController {
    pub(crate) fn new(signals: Sender<CurtainSignal>) -> Self {
        Self { signals, next_id: 0 }
    }

    //--- begin() ----------------------------------------------------------
    //
    // Locks input, raises the overlay and starts the curtain. The curtain
    // may fire its signals right away; they are queued until the next pump.
    //
    pub(crate) fn begin<V: Visual>(
        &mut self,
        operation: Operation<V>,
        context: &mut StageContext<V>,
    ) -> Transition<V> {
        let id = TransitionId(self.next_id);
        self.next_id += 1;
        debug!("Transition {} begins: {}", id, operation.label());

        context.lock();
        let curtain = context.curtain_for(operation.curtain());
        context.surface.set_curtain_layer_active(true);

        let mut transition = Transition {
            id,
            phase: CurtainPhase::Closing,
            operation: Some(operation),
            curtain: Some(curtain),
        };

        let signals = CurtainSignals::new(&self.signals, id);
        if let Some(curtain) = transition.curtain.as_mut() {
            if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| curtain.run(signals))) {
                self.abandon_curtain(&mut transition, context, payload);
            }
        }
        transition
    }

    //--- update() ---------------------------------------------------------
    //
    // Advances the curtain by one pump.
    //
    pub(crate) fn update<V: Visual>(&self, transition: &mut Transition<V>, context: &mut StageContext<V>) {
        if let Some(curtain) = transition.curtain.as_mut() {
            if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| curtain.update())) {
                self.abandon_curtain(transition, context, payload);
            }
        }
    }

    //--- close() ----------------------------------------------------------
    //
    // Screen covered: clear the container and apply the operation.
    //
    pub(crate) fn close<V: Visual>(&self, transition: &mut Transition<V>, context: &mut StageContext<V>) {
        if transition.phase != CurtainPhase::Closing {
            warn!("Transition {} received a close signal while {:?}", transition.id, transition.phase);
            return;
        }

        transition.phase = CurtainPhase::Swapping;
        debug!("Transition {} covered, swapping content", transition.id);

        if let Some(operation) = transition.operation.take() {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                context.surface.clear_content();
                operation.apply(context.swap_scope())
            }))
            .unwrap_or_else(|payload| Err(StageError::from_panic(payload)));

            if let Err(err) = outcome {
                warn!("Transition {} abandoned its operation: {}", transition.id, err);
                context.report(err);
                if panic::catch_unwind(AssertUnwindSafe(|| context.restore_top())).is_err() {
                    warn!("Transition {} could not re-attach the current content", transition.id);
                }
            }
        }

        transition.phase = CurtainPhase::Opening;
    }

    //--- open() -----------------------------------------------------------
    //
    // Screen revealed: destroy the curtain. The caller releases the lock
    // once it knows whether another transition follows.
    //
    pub(crate) fn open<V: Visual>(&self, mut transition: Transition<V>, context: &mut StageContext<V>) {
        if transition.phase == CurtainPhase::Closing {
            warn!("Transition {} opened before it closed, swapping first", transition.id);
            self.close(&mut transition, context);
        }

        if let Some(mut curtain) = transition.curtain.take() {
            if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| curtain.dispose())) {
                context.report(StageError::curtain_panic(payload));
            }
        }
        debug!("Transition {} revealed", transition.id);
    }

    /// Releases the lock taken by [`CurtainController::begin`].
    pub(crate) fn release<V: Visual>(&self, context: &mut StageContext<V>) {
        context.unlock();
    }

    //--- Internal Helpers -------------------------------------------------

    // Dropping the curtain fires whatever tokens it still owned. The
    // controller then fires both cues itself in case the curtain moved
    // its tokens elsewhere; duplicates arrive stale and are ignored.
    fn abandon_curtain<V: Visual>(
        &self,
        transition: &mut Transition<V>,
        context: &mut StageContext<V>,
        payload: Box<dyn std::any::Any + Send>,
    ) {
        let err = StageError::curtain_panic(payload);
        warn!("Transition {} lost its curtain: {}", transition.id, err);
        context.report(err);

        transition.curtain = None;
        for cue in [CurtainCue::Closed, CurtainCue::Opened] {
            let signal = CurtainSignal {
                transition: transition.id,
                cue,
            };
            if self.signals.send(signal).is_err() {
                warn!("Stage dropped before transition {} could settle", transition.id);
            }
        }
    }
}
