//=========================================================================
// Content Operations
//=========================================================================
//
// Immutable transition requests and their swap semantics.
//
// Flow (inside the curtain's covered phase):
//   Operation::apply(SwapScope)
//     ├─ Add      → instantiate → push → attach top
//     ├─ Replace  → validate prune → instantiate → prune → push → attach top
//     └─ Revert   → validate prune → prune → attach top → hook
//
// Every variant validates and instantiates before it mutates, so a
// rejected operation leaves the history as it found it. The history
// owns the new handle before the surface sees it, so a surface that
// fails while attaching still leaves a non-empty history behind.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::panic::{self, AssertUnwindSafe};

use log::debug;

//=== Internal Dependencies ===============================================

use super::{ContentHandle, ContentSource, HistoryStack, Visual};
use crate::core::assets::AssetResolver;
use crate::core::error::StageError;
use crate::core::surface::StageSurface;

//=== Hooks ===============================================================

/// Caller wiring hook run on a freshly instantiated handle before it is
/// attached.
pub type InitHook<V> = Box<dyn FnOnce(&mut ContentHandle<V>)>;

/// Caller hook run on the handle a revert exposed, after it is attached.
pub type RevertHook<V> = Box<dyn FnOnce(&ContentHandle<V>)>;

//=== SwapScope ===========================================================

/// Everything an operation may touch while the screen is covered.
pub(crate) struct SwapScope<'a, V: Visual> {
    pub history: &'a mut HistoryStack<V>,
    pub surface: &'a mut dyn StageSurface<V>,
    pub resolver: &'a dyn AssetResolver<V>,
}

impl<V: Visual> SwapScope<'_, V> {
    /// Attaches the history's top entry to the cleared container.
    fn attach_top(&mut self) -> Result<&ContentHandle<V>, StageError> {
        let top = self
            .history
            .top()
            .ok_or(StageError::StackUnderflow { unto: None })?;
        self.surface.attach_content(top);
        Ok(top)
    }
}

//=== AddContent ==========================================================

/// Push new content on top of the history.
pub struct AddContent<V: Visual> {
    name: String,
    source: ContentSource<V>,
    on_init: Option<InitHook<V>>,
    curtain: Option<String>,
}

impl<V: Visual> AddContent<V> {
    /// Requests content `name` built from `source`.
    pub fn new(name: impl Into<String>, source: impl Into<ContentSource<V>>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            on_init: None,
            curtain: None,
        }
    }

    /// Runs `hook` on the new handle before it is attached.
    pub fn with_init<F>(mut self, hook: F) -> Self
    where
        F: FnOnce(&mut ContentHandle<V>) + 'static,
    {
        self.on_init = Some(Box::new(hook));
        self
    }

    /// Bridges this transition with curtain `id` instead of the default.
    pub fn with_curtain(mut self, id: impl Into<String>) -> Self {
        self.curtain = Some(id.into());
        self
    }

    /// Name the new history entry will carry.
    pub fn name(&self) -> &str {
        &self.name
    }

    fn instantiate(self, resolver: &dyn AssetResolver<V>) -> Result<ContentHandle<V>, StageError> {
        let visual = match self.source {
            ContentSource::Asset(id) => resolver.resolve(&id)?,
            ContentSource::Instance(visual) => visual,
        };

        let mut handle = ContentHandle::new(self.name, visual);
        if let Some(hook) = self.on_init {
            // The handle never reaches the history, so dispose it here.
            if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| hook(&mut handle))) {
                handle.dispose();
                return Err(StageError::from_panic(payload));
            }
        }
        Ok(handle)
    }

    fn apply(self, mut scope: SwapScope<'_, V>) -> Result<(), StageError> {
        let handle = self.instantiate(scope.resolver)?;
        scope.history.push(handle);
        scope.attach_top()?;
        Ok(())
    }
}

//=== ReplaceContent ======================================================

/// Prune the history, then push new content.
pub struct ReplaceContent<V: Visual> {
    add: AddContent<V>,
    unto: Option<String>,
}

impl<V: Visual> ReplaceContent<V> {
    /// Replaces the current top with content `name` built from `source`.
    pub fn new(name: impl Into<String>, source: impl Into<ContentSource<V>>) -> Self {
        Self {
            add: AddContent::new(name, source),
            unto: None,
        }
    }

    /// Prunes back to the topmost entry named `name` instead of a single
    /// step. That entry survives and ends up under the new content.
    pub fn unto(mut self, name: impl Into<String>) -> Self {
        self.unto = Some(name.into());
        self
    }

    /// Runs `hook` on the new handle before it is attached.
    pub fn with_init<F>(mut self, hook: F) -> Self
    where
        F: FnOnce(&mut ContentHandle<V>) + 'static,
    {
        self.add = self.add.with_init(hook);
        self
    }

    /// Bridges this transition with curtain `id` instead of the default.
    pub fn with_curtain(mut self, id: impl Into<String>) -> Self {
        self.add = self.add.with_curtain(id);
        self
    }

    fn apply(self, mut scope: SwapScope<'_, V>) -> Result<(), StageError> {
        let depth = scope.history.prune_depth(self.unto.as_deref())?;
        let handle = self.add.instantiate(scope.resolver)?;

        scope.history.prune(depth);
        scope.history.push(handle);
        scope.attach_top()?;
        Ok(())
    }
}

//=== RevertContent =======================================================

/// Prune the history and re-display whatever entry is exposed.
pub struct RevertContent<V: Visual> {
    unto: Option<String>,
    on_complete: Option<RevertHook<V>>,
    curtain: Option<String>,
}

impl<V: Visual> RevertContent<V> {
    /// Steps back one entry.
    pub fn new() -> Self {
        Self {
            unto: None,
            on_complete: None,
            curtain: None,
        }
    }

    /// Steps back to the topmost entry named `name`.
    pub fn unto(mut self, name: impl Into<String>) -> Self {
        self.unto = Some(name.into());
        self
    }

    /// Runs `hook` on the exposed entry once it is attached again.
    pub fn on_complete<F>(mut self, hook: F) -> Self
    where
        F: FnOnce(&ContentHandle<V>) + 'static,
    {
        self.on_complete = Some(Box::new(hook));
        self
    }

    /// Bridges this transition with curtain `id` instead of the default.
    pub fn with_curtain(mut self, id: impl Into<String>) -> Self {
        self.curtain = Some(id.into());
        self
    }

    fn apply(self, mut scope: SwapScope<'_, V>) -> Result<(), StageError> {
        let depth = scope.history.prune_depth(self.unto.as_deref())?;
        if depth >= scope.history.len() {
            return Err(StageError::StackUnderflow { unto: self.unto });
        }

        scope.history.prune(depth);
        let top = scope.attach_top()?;

        if let Some(hook) = self.on_complete {
            hook(top);
        }
        Ok(())
    }
}

impl<V: Visual> Default for RevertContent<V> {
    fn default() -> Self {
        Self::new()
    }
}

//=== Operation ===========================================================

/// A queued content transition.
pub enum Operation<V: Visual> {
    Add(AddContent<V>),
    Replace(ReplaceContent<V>),
    Revert(RevertContent<V>),
}

impl<V: Visual> Operation<V> {
    /// Curtain requested for this transition, if any.
    pub fn curtain(&self) -> Option<&str> {
        match self {
            Self::Add(op) => op.curtain.as_deref(),
            Self::Replace(op) => op.add.curtain.as_deref(),
            Self::Revert(op) => op.curtain.as_deref(),
        }
    }

    /// Short label used in logs.
    pub fn label(&self) -> String {
        match self {
            Self::Add(op) => format!("add '{}'", op.name),
            Self::Replace(op) => match &op.unto {
                Some(unto) => format!("replace with '{}' unto '{}'", op.add.name, unto),
                None => format!("replace with '{}'", op.add.name),
            },
            Self::Revert(op) => match &op.unto {
                Some(unto) => format!("revert unto '{}'", unto),
                None => "revert".to_string(),
            },
        }
    }

    /// Applies the operation to the covered stage.
    pub(crate) fn apply(self, scope: SwapScope<'_, V>) -> Result<(), StageError> {
        debug!("Applying {}", self.label());
        match self {
            Self::Add(op) => op.apply(scope),
            Self::Replace(op) => op.apply(scope),
            Self::Revert(op) => op.apply(scope),
        }
    }
}

impl<V: Visual> From<AddContent<V>> for Operation<V> {
    fn from(op: AddContent<V>) -> Self {
        Self::Add(op)
    }
}

impl<V: Visual> From<ReplaceContent<V>> for Operation<V> {
    fn from(op: ReplaceContent<V>) -> Self {
        Self::Replace(op)
    }
}

impl<V: Visual> From<RevertContent<V>> for Operation<V> {
    fn from(op: RevertContent<V>) -> Self {
        Self::Revert(op)
    }
}

impl<V: Visual> std::fmt::Debug for Operation<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}

//=== Tests ===============================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::assets::AssetRegistry;
    use crate::core::error::ResolveError;
    use crate::core::test_support::{Panel, RecordingSurface, SurfaceEvent, SurfaceLog};

    fn history(names: &[&str], log: &SurfaceLog) -> HistoryStack<Panel> {
        let mut stack = HistoryStack::new(ContentHandle::new(names[0], log.panel(names[0])));
        for &name in &names[1..] {
            stack.push(ContentHandle::new(name, log.panel(name)));
        }
        stack
    }

    fn registry(log: &SurfaceLog) -> AssetRegistry<Panel> {
        let mut registry = AssetRegistry::new();
        for name in ["B", "C"] {
            let log = log.clone();
            registry.register(name, move || log.panel(name)).unwrap();
        }
        registry
    }

    fn apply(op: impl Into<Operation<Panel>>, stack: &mut HistoryStack<Panel>, log: &SurfaceLog) -> Result<(), StageError> {
        apply_on(op, stack, log, log.surface())
    }

    fn apply_on(
        op: impl Into<Operation<Panel>>,
        stack: &mut HistoryStack<Panel>,
        log: &SurfaceLog,
        mut surface: RecordingSurface,
    ) -> Result<(), StageError> {
        let registry = registry(log);
        op.into().apply(SwapScope {
            history: stack,
            surface: &mut surface,
            resolver: &registry,
        })
    }

    #[test]
    fn add_pushes_and_attaches_without_pruning() {
        let log = SurfaceLog::default();
        let mut stack = history(&["A"], &log);

        apply(AddContent::new("B", "B"), &mut stack, &log).unwrap();

        assert_eq!(stack.names(), vec!["A", "B"]);
        assert_eq!(log.events(), vec![SurfaceEvent::Attached("B".into())]);
        assert!(log.disposed().is_empty());
    }

    #[test]
    fn add_runs_init_hook_before_attach() {
        let log = SurfaceLog::default();
        let mut stack = history(&["A"], &log);

        let op = AddContent::new("B", ContentSource::instance(log.panel("B")))
            .with_init(|handle| handle.visual_mut().label = "B (wired)".into());
        apply(op, &mut stack, &log).unwrap();

        assert_eq!(stack.top().unwrap().visual().label, "B (wired)");
        assert_eq!(log.events(), vec![SurfaceEvent::Attached("B".into())]);
    }

    #[test]
    fn replace_without_unto_keeps_length() {
        let log = SurfaceLog::default();
        let mut stack = history(&["A", "B"], &log);

        apply(ReplaceContent::new("C", "C"), &mut stack, &log).unwrap();

        assert_eq!(stack.names(), vec!["A", "C"]);
        assert_eq!(log.disposed(), vec!["B"]);
    }

    #[test]
    fn replace_unto_prunes_down_to_named_entry() {
        let log = SurfaceLog::default();
        let mut stack = history(&["A", "B"], &log);

        apply(ReplaceContent::new("C", "C").unto("A"), &mut stack, &log).unwrap();

        assert_eq!(stack.names(), vec!["A", "C"]);
        assert_eq!(
            log.events(),
            vec![SurfaceEvent::Disposed("B".into()), SurfaceEvent::Attached("C".into())]
        );
    }

    #[test]
    fn failed_resolution_mutates_nothing() {
        let log = SurfaceLog::default();
        let mut stack = history(&["A", "B"], &log);

        let err = apply(ReplaceContent::new("X", "missing"), &mut stack, &log).unwrap_err();

        assert_eq!(
            err,
            StageError::Resolution(ResolveError::UnknownAsset {
                bundle: "core".into(),
                name: "missing".into()
            })
        );
        assert_eq!(stack.names(), vec!["A", "B"]);
        assert!(log.disposed().is_empty());
        assert!(log.events().is_empty());
    }

    #[test]
    fn replace_with_unknown_unto_is_underflow() {
        let log = SurfaceLog::default();
        let mut stack = history(&["A", "B"], &log);

        let err = apply(ReplaceContent::new("C", "C").unto("Z"), &mut stack, &log).unwrap_err();

        assert_eq!(err, StageError::StackUnderflow { unto: Some("Z".into()) });
        assert_eq!(stack.names(), vec!["A", "B"]);
    }

    #[test]
    fn revert_exposes_previous_entry_and_runs_hook() {
        let log = SurfaceLog::default();
        let mut stack = history(&["A", "B", "C"], &log);

        let seen = std::rc::Rc::new(std::cell::RefCell::new(String::new()));
        let seen_in_hook = seen.clone();
        let op = RevertContent::new()
            .on_complete(move |handle: &ContentHandle<Panel>| *seen_in_hook.borrow_mut() = handle.name().to_string());
        apply(op, &mut stack, &log).unwrap();

        assert_eq!(stack.names(), vec!["A", "B"]);
        assert_eq!(
            log.events(),
            vec![SurfaceEvent::Disposed("C".into()), SurfaceEvent::Attached("B".into())]
        );
        assert_eq!(*seen.borrow(), "B");
    }

    #[test]
    fn revert_unto_destroys_everything_above() {
        let log = SurfaceLog::default();
        let mut stack = history(&["A", "B", "C", "D"], &log);

        apply(RevertContent::new().unto("B"), &mut stack, &log).unwrap();

        assert_eq!(stack.names(), vec!["A", "B"]);
        assert_eq!(log.disposed(), vec!["D", "C"]);
    }

    #[test]
    fn revert_at_root_is_underflow() {
        let log = SurfaceLog::default();
        let mut stack = history(&["A"], &log);

        let err = apply(RevertContent::new(), &mut stack, &log).unwrap_err();

        assert_eq!(err, StageError::StackUnderflow { unto: None });
        assert_eq!(stack.names(), vec!["A"]);
        assert!(log.events().is_empty());
    }

    #[test]
    fn surface_failure_on_replace_keeps_new_top() {
        let log = SurfaceLog::default();
        let mut stack = history(&["A"], &log);

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            apply_on(ReplaceContent::new("C", "C"), &mut stack, &log, log.failing_surface("C"))
        }));

        assert!(outcome.is_err());
        assert_eq!(stack.names(), vec!["C"]);
        assert_eq!(log.disposed(), vec!["A"]);
    }

    #[test]
    fn surface_failure_on_add_leaves_handle_owned_by_history() {
        let log = SurfaceLog::default();
        let mut stack = history(&["A"], &log);

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            apply_on(AddContent::new("B", "B"), &mut stack, &log, log.failing_surface("B"))
        }));

        assert!(outcome.is_err());
        assert_eq!(stack.names(), vec!["A", "B"]);
        stack.prune(1);
        assert_eq!(log.disposed(), vec!["B"]);
    }

    #[test]
    fn panicking_init_hook_disposes_new_handle() {
        let log = SurfaceLog::default();
        let mut stack = history(&["A"], &log);

        let op = AddContent::new("B", "B").with_init(|_| panic!("wiring failed"));
        let err = apply(op, &mut stack, &log).unwrap_err();

        assert_eq!(err, StageError::Apply("wiring failed".into()));
        assert_eq!(stack.names(), vec!["A"]);
        assert_eq!(log.events(), vec![SurfaceEvent::Disposed("B".into())]);
    }

    #[test]
    fn curtain_and_label_reflect_request() {
        let op: Operation<Panel> = ReplaceContent::new("C", "C").unto("A").with_curtain("fade").into();
        assert_eq!(op.curtain(), Some("fade"));
        assert_eq!(op.label(), "replace with 'C' unto 'A'");

        let op: Operation<Panel> = RevertContent::new().into();
        assert_eq!(op.curtain(), None);
        assert_eq!(format!("{:?}", op), "revert");
    }
}
