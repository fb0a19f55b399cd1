//=========================================================================
// Curtain Signals
//=========================================================================
//
// Single-fire completion signals handed to a running curtain, and the
// collector that drains them at the stage's tick boundary.
//
// Architecture:
//   Curtain ── CloseSignal::fire() ─┐
//           ── OpenSignal::fire() ──┴─> Sender<CurtainSignal>
//                                              ↓
//   Stage::pump() ←── SignalCollector::collect() ←── Receiver
//
// Signals may be fired from any thread; they are applied only when the
// owner drains them.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};
use log::warn;

//=== TransitionId ========================================================

/// Identifies one transition; stale signals are recognized by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransitionId(pub(crate) u64);

impl std::fmt::Display for TransitionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

//=== CurtainSignal =======================================================

/// Which half of the curtain animation finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurtainCue {
    /// The screen is fully covered.
    Closed,

    /// The screen is fully revealed again.
    Opened,
}

/// A cue tagged with the transition it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurtainSignal {
    pub transition: TransitionId,
    pub cue: CurtainCue,
}

//=== Signal Tokens =======================================================

/// Shared body of the two single-fire tokens.
///
/// A token dropped unfired fires on drop, so a curtain that loses its
/// tokens cannot wedge the queue.
#[derive(Debug)]
struct SignalLine {
    sender: Sender<CurtainSignal>,
    signal: CurtainSignal,
    fired: bool,
}

impl SignalLine {
    fn send(&mut self) {
        self.fired = true;
        if self.sender.send(self.signal).is_err() {
            warn!("Curtain signal {:?} sent after its stage was dropped", self.signal);
        }
    }
}

impl Drop for SignalLine {
    fn drop(&mut self) {
        if !self.fired {
            warn!(
                "Curtain dropped its {:?} signal for transition {} unfired; firing it now",
                self.signal.cue, self.signal.transition
            );
            self.send();
        }
    }
}

/// Fired once the curtain fully covers the screen.
#[derive(Debug)]
pub struct CloseSignal(SignalLine);

impl CloseSignal {
    pub fn fire(mut self) {
        self.0.send();
    }

    pub fn transition(&self) -> TransitionId {
        self.0.signal.transition
    }
}

/// Fired once the curtain has fully revealed the screen.
#[derive(Debug)]
pub struct OpenSignal(SignalLine);

impl OpenSignal {
    pub fn fire(mut self) {
        self.0.send();
    }

    pub fn transition(&self) -> TransitionId {
        self.0.signal.transition
    }
}

/// The pair of signals a curtain receives in [`Curtain::run`](super::Curtain::run).
///
/// Fire `close` first, then `open`, each exactly once.
#[derive(Debug)]
pub struct CurtainSignals {
    pub close: CloseSignal,
    pub open: OpenSignal,
}

impl CurtainSignals {
    pub(crate) fn new(sender: &Sender<CurtainSignal>, transition: TransitionId) -> Self {
        let line = |cue| SignalLine {
            sender: sender.clone(),
            signal: CurtainSignal { transition, cue },
            fired: false,
        };

        Self {
            close: CloseSignal(line(CurtainCue::Closed)),
            open: OpenSignal(line(CurtainCue::Opened)),
        }
    }
}

//=== SignalCollector =====================================================

/// Receiving end of the curtain signal channel.
pub(crate) struct SignalCollector {
    sender: Sender<CurtainSignal>,
    receiver: Receiver<CurtainSignal>,
}

impl SignalCollector {
    pub(crate) fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self { sender, receiver }
    }

    /// Sender handed to the curtain controller.
    pub(crate) fn sender(&self) -> Sender<CurtainSignal> {
        self.sender.clone()
    }

    /// Next pending signal, oldest first.
    pub(crate) fn try_next(&self) -> Option<CurtainSignal> {
        match self.receiver.try_recv() {
            Ok(signal) => Some(signal),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Number of signals waiting to be drained.
    pub(crate) fn backlog(&self) -> usize {
        self.receiver.len()
    }

    /// Drains up to `limit` pending signals.
    pub(crate) fn collect(&self, limit: usize) -> Vec<CurtainSignal> {
        let mut signals = Vec::new();
        while signals.len() < limit {
            match self.try_next() {
                Some(signal) => signals.push(signal),
                None => break,
            }
        }

        if signals.len() >= limit && self.backlog() > 0 {
            warn!("Curtain signal backlog: {} signals left for next pump", self.backlog());
        }
        signals
    }
}

//=== Tests ===============================================================
