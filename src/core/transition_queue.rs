//=========================================================================
// Transition Queue
//=========================================================================
//
// Strict FIFO serialization of content transitions.
//
// At most one transition is in flight. Requests issued meanwhile wait in
// `pending` and start, in order, as each predecessor settles.
//
// Flow:
//   enqueue() ──idle──> CurtainController::begin()
//             ──busy──> pending.push_back()
//
//   update()              → CurtainController::update()
//   handle_signal(Closed) → CurtainController::close()
//   handle_signal(Opened) → CurtainController::open() → settle()
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::VecDeque;

use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use crate::core::content::{Operation, Visual};
use crate::core::context::StageContext;
use crate::core::curtain::{CurtainController, CurtainCue, CurtainPhase, CurtainSignal, Transition};

//=== Transition Queue ====================================================

/// In-flight slot plus the FIFO of requests waiting behind it.
pub(crate) struct TransitionQueue<V: Visual> {
    current: Option<Transition<V>>,
    pending: VecDeque<Operation<V>>,
    controller: CurtainController,
}

impl<V: Visual> TransitionQueue<V> {
    /// Creates an idle queue.
    pub(crate) fn new(controller: CurtainController) -> Self {
        Self {
            current: None,
            pending: VecDeque::new(),
            controller,
        }
    }

    //--- Queries ----------------------------------------------------------

    /// Returns true while a transition is in flight.
    pub(crate) fn is_busy(&self) -> bool {
        self.current.is_some()
    }

    /// Returns the number of transitions waiting behind the current one.
    pub(crate) fn len(&self) -> usize {
        self.pending.len()
    }

    /// Phase of the in-flight transition, or `Idle`.
    pub(crate) fn phase(&self) -> CurtainPhase {
        self.current
            .as_ref()
            .map_or(CurtainPhase::Idle, Transition::phase)
    }

    //--- Operations -------------------------------------------------------

    /// Starts `operation` right away if idle, otherwise queues it.
    pub(crate) fn enqueue(&mut self, operation: Operation<V>, context: &mut StageContext<V>) {
        if self.current.is_some() {
            debug!("Queueing {} behind {} pending", operation.label(), self.pending.len());
            self.pending.push_back(operation);
        } else {
            self.current = Some(self.controller.begin(operation, context));
        }
    }

    /// Advances the in-flight transition's curtain.
    pub(crate) fn update(&mut self, context: &mut StageContext<V>) {
        if let Some(current) = self.current.as_mut() {
            self.controller.update(current, context);
        }
    }

    /// Routes a curtain signal to the in-flight transition.
    pub(crate) fn handle_signal(&mut self, signal: CurtainSignal, context: &mut StageContext<V>) {
        let Some(current) = self.current.as_mut() else {
            warn!("Ignoring {:?} for transition {}: stage is idle", signal.cue, signal.transition);
            return;
        };

        if current.id() != signal.transition {
            warn!(
                "Ignoring stale {:?} for transition {} (current is {})",
                signal.cue,
                signal.transition,
                current.id()
            );
            return;
        }

        match signal.cue {
            CurtainCue::Closed => self.controller.close(current, context),
            CurtainCue::Opened => {
                if let Some(finished) = self.current.take() {
                    self.controller.open(finished, context);
                    self.settle(context);
                }
            }
        }
    }

    //--- Internal Helpers -------------------------------------------------

    // The next transition takes its lock before the finished one releases
    // its own, so the indicator stays up across a queued batch.
    fn settle(&mut self, context: &mut StageContext<V>) {
        if let Some(next) = self.pending.pop_front() {
            self.current = Some(self.controller.begin(next, context));
            self.controller.release(context);
        } else {
            self.controller.release(context);
            context.surface.set_curtain_layer_active(false);
            info!("Stage idle with {} history entries", context.history.len());
        }
    }
}
