//=========================================================================
// Asset Registry
//=========================================================================
//
// Bundle-scoped factory table.
//
// Bundles are stored in a HashMap by name, each holding its own map of
// asset factories. Registration creates bundles on demand.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::{AssetId, AssetResolver, DEFAULT_BUNDLE};
use crate::core::error::ResolveError;

//=== AssetRegistry =======================================================

/// Factory producing a fresh asset instance on every call.
pub type AssetFactory<T> = Box<dyn Fn() -> T>;

/// Registry of asset factories grouped by bundle.
///
/// # Example
///
/// ```rust
/// use aetheric_stage::core::assets::{AssetRegistry, AssetResolver};
///
/// let mut registry = AssetRegistry::new();
/// registry.register("lobby", || String::from("lobby screen")).unwrap();
/// registry.register("shop:offer", || String::from("offer screen")).unwrap();
///
/// assert_eq!(registry.resolve("core:lobby").unwrap(), "lobby screen");
/// assert_eq!(registry.resolve("shop:offer").unwrap(), "offer screen");
/// assert!(registry.resolve("shop:missing").is_err());
/// ```
pub struct AssetRegistry<T> {
    bundles: HashMap<String, HashMap<String, AssetFactory<T>>>,
    default_bundle: String,
}

impl<T> AssetRegistry<T> {
    //--- Construction -----------------------------------------------------

    /// Creates an empty registry whose default bundle is `core`.
    pub fn new() -> Self {
        Self {
            bundles: HashMap::new(),
            default_bundle: DEFAULT_BUNDLE.to_string(),
        }
    }

    /// Changes the bundle used for identifiers without a prefix.
    pub fn with_default_bundle(mut self, bundle: impl Into<String>) -> Self {
        self.default_bundle = bundle.into();
        self
    }

    //--- Registration -----------------------------------------------------

    /// Declares a bundle, even if it holds no assets yet.
    pub fn add_bundle(&mut self, bundle: impl Into<String>) {
        self.bundles.entry(bundle.into()).or_default();
    }

    /// Registers a factory under `id` (`name` or `bundle:name`).
    ///
    /// Re-registering an identifier replaces the previous factory.
    pub fn register<F>(&mut self, id: &str, factory: F) -> Result<(), ResolveError>
    where
        F: Fn() -> T + 'static,
    {
        let id = AssetId::parse(id, &self.default_bundle)?;
        let bundle = self.bundles.entry(id.bundle.clone()).or_default();

        if bundle.insert(id.name.clone(), Box::new(factory)).is_some() {
            warn!("Asset {} was already registered and has been replaced", id);
        } else {
            debug!("Registered asset {}", id);
        }
        Ok(())
    }

    //--- Queries ----------------------------------------------------------

    /// Whether `id` names a registered asset.
    pub fn contains(&self, id: &str) -> bool {
        AssetId::parse(id, &self.default_bundle)
            .ok()
            .and_then(|id| self.bundles.get(&id.bundle).map(|b| b.contains_key(&id.name)))
            .unwrap_or(false)
    }

    /// The bundle used for identifiers without a prefix.
    pub fn default_bundle(&self) -> &str {
        &self.default_bundle
    }
}

impl<T> AssetResolver<T> for AssetRegistry<T> {
    fn resolve(&self, id: &str) -> Result<T, ResolveError> {
        let id = AssetId::parse(id, &self.default_bundle)?;

        let bundle = self
            .bundles
            .get(&id.bundle)
            .ok_or_else(|| ResolveError::UnknownBundle(id.bundle.clone()))?;

        let factory = bundle.get(&id.name).ok_or_else(|| ResolveError::UnknownAsset {
            bundle: id.bundle.clone(),
            name: id.name.clone(),
        })?;

        Ok(factory())
    }
}

impl<T> Default for AssetRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

//=== Tests ===============================================================
