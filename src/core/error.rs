//=========================================================================
// Stage Errors
//=========================================================================
//
// Error taxonomy for content transitions.
//
// None of these ever escape a transition: they are caught at the swap
// boundary and forwarded to the error sink, after which the curtain
// opens and the queue advances.
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== ResolveError ========================================================

/// Failure to turn an asset identifier into an instance.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The identifier was empty (or only a bundle prefix).
    #[error("empty asset identifier")]
    EmptyIdentifier,

    /// The bundle part of the identifier names no registered bundle.
    #[error("bundle '{0}' does not exist")]
    UnknownBundle(String),

    /// The bundle exists but holds no asset under that name.
    #[error("asset '{bundle}:{name}' does not exist")]
    UnknownAsset { bundle: String, name: String },
}

//=== StageError ==========================================================

/// Errors reported by the stage to its [`ErrorSink`](crate::core::ErrorSink).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StageError {
    /// A content or curtain identifier could not be resolved.
    #[error("resolution failed: {0}")]
    Resolution(#[from] ResolveError),

    /// The swap panicked while mutating the container or history,
    /// or inside a caller hook.
    #[error("content swap failed: {0}")]
    Apply(String),

    /// A curtain panicked while running or updating. The transition
    /// completes without it.
    #[error("curtain failed: {0}")]
    Curtain(String),

    /// A prune could not find its target, or would empty the history.
    #[error("history underflow: no entry to prune back to ({})", .unto.as_deref().unwrap_or("<top>"))]
    StackUnderflow { unto: Option<String> },
}

impl StageError {
    /// Builds an [`StageError::Apply`] from a caught panic payload.
    pub(crate) fn from_panic(payload: Box<dyn std::any::Any + Send>) -> Self {
        Self::Apply(panic_message(payload))
    }

    /// Builds a [`StageError::Curtain`] from a caught panic payload.
    pub(crate) fn curtain_panic(payload: Box<dyn std::any::Any + Send>) -> Self {
        Self::Curtain(panic_message(payload))
    }
}

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        (*text).to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "unknown panic".to_string()
    }
}

//=== Tests ===============================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_error_converts_into_stage_error() {
        let err: StageError = ResolveError::UnknownBundle("shop".into()).into();
        assert_eq!(err.to_string(), "resolution failed: bundle 'shop' does not exist");
    }

    #[test]
    fn underflow_message_names_target() {
        let named = StageError::StackUnderflow { unto: Some("menu".into()) };
        assert!(named.to_string().contains("menu"));

        let single = StageError::StackUnderflow { unto: None };
        assert!(single.to_string().contains("<top>"));
    }

    #[test]
    fn panic_payloads_become_apply_errors() {
        let from_str = StageError::from_panic(Box::new("boom"));
        assert_eq!(from_str, StageError::Apply("boom".into()));

        let from_string = StageError::from_panic(Box::new(String::from("bang")));
        assert_eq!(from_string, StageError::Apply("bang".into()));

        let opaque = StageError::from_panic(Box::new(42_u32));
        assert_eq!(opaque, StageError::Apply("unknown panic".into()));
    }
}
