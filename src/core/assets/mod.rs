//=========================================================================
// Assets
//=========================================================================
//
// Identifier-based instantiation of content visuals and curtains.
//
// Architecture:
//   "bundle:name" ──AssetId::parse()──> AssetId
//                                          ↓
//   AssetResolver<T>::resolve() ──> AssetRegistry<T> factory ──> T
//
// Identifiers without a bundle prefix belong to the registry's default
// bundle ("core" unless configured otherwise).
//
//=========================================================================

//=== Module Declarations =================================================

mod registry;

//=== Public API ==========================================================

pub use registry::{AssetFactory, AssetRegistry};

//=== Internal Dependencies ===============================================

use crate::core::error::ResolveError;

/// Bundle used when an identifier carries no `bundle:` prefix.
pub const DEFAULT_BUNDLE: &str = "core";

//=== AssetResolver =======================================================

/// Turns a symbolic identifier into a fresh instance.
///
/// Implemented by [`AssetRegistry`] and by any
/// `Fn(&str) -> Result<T, ResolveError>` closure.
pub trait AssetResolver<T> {
    /// Instantiates the asset named by `id`.
    fn resolve(&self, id: &str) -> Result<T, ResolveError>;
}

impl<T, F> AssetResolver<T> for F
where
    F: Fn(&str) -> Result<T, ResolveError>,
{
    fn resolve(&self, id: &str) -> Result<T, ResolveError> {
        self(id)
    }
}

//=== AssetId =============================================================

/// A parsed `bundle:name` identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetId {
    pub bundle: String,
    pub name: String,
}

impl AssetId {
    /// Parses `id`, falling back to `default_bundle` when no prefix is given.
    ///
    /// Only the first `:` separates the bundle; the rest belongs to the name.
    pub fn parse(id: &str, default_bundle: &str) -> Result<Self, ResolveError> {
        let (bundle, name) = match id.split_once(':') {
            Some((bundle, name)) => (bundle, name),
            None => (default_bundle, id),
        };

        if name.is_empty() || bundle.is_empty() {
            return Err(ResolveError::EmptyIdentifier);
        }

        Ok(Self {
            bundle: bundle.to_string(),
            name: name.to_string(),
        })
    }
}

impl std::fmt::Display for AssetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.bundle, self.name)
    }
}

//=== Tests ===============================================================
