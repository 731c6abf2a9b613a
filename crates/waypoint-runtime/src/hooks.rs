#![forbid(unsafe_code)]

//! Lifecycle callbacks.
//!
//! Every hook is optional. Hooks run synchronously on the host thread from
//! inside controller calls, so they cannot call back into the tour. A hook
//! that needs to steer navigation returns [`Gate::Hold`] from
//! `on_before_step` and lets the host call `Tour::release` (or navigate
//! elsewhere) later.
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use waypoint_runtime::hooks::{Gate, TourHooks};
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let log = Rc::clone(&seen);
//! let hooks = TourHooks::new().on_before_step(move |index, _step| {
//!     log.borrow_mut().push(index);
//!     Gate::Proceed
//! });
//! assert!(hooks.has_before_step());
//! ```

use std::fmt;

use waypoint_backend::Target;

use crate::step::Step;

/// Decision returned by `on_before_step`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Gate {
    /// Continue with the transition now.
    #[default]
    Proceed,
    /// Suspend until the host calls `Tour::release`.
    Hold,
}

type Callback = Box<dyn FnMut()>;
/// Receives the index current when the tour ended, if any.
type EndCallback = Box<dyn FnMut(Option<usize>)>;
type BeforeStep = Box<dyn FnMut(usize, &Step) -> Gate>;
type AfterStep = Box<dyn FnMut(usize, &Step, Option<&Target>)>;

/// Optional lifecycle callbacks.
#[derive(Default)]
pub struct TourHooks {
    on_start: Option<Callback>,
    on_finish: Option<EndCallback>,
    on_exit: Option<EndCallback>,
    on_before_step: Option<BeforeStep>,
    on_after_step: Option<AfterStep>,
}

impl TourHooks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Called once the surface is built, before the first step.
    #[must_use]
    pub fn on_start(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_start = Some(Box::new(f));
        self
    }

    /// Called when navigation runs past either end, before `on_exit`, with
    /// the index that was current when the tour finished.
    #[must_use]
    pub fn on_finish(mut self, f: impl FnMut(Option<usize>) + 'static) -> Self {
        self.on_finish = Some(Box::new(f));
        self
    }

    /// Called whenever the tour becomes inactive, with the index that was
    /// current at that moment (`None` if no step had been reached).
    #[must_use]
    pub fn on_exit(mut self, f: impl FnMut(Option<usize>) + 'static) -> Self {
        self.on_exit = Some(Box::new(f));
        self
    }

    /// Called with the requested index and step before the current step
    /// is hidden.
    #[must_use]
    pub fn on_before_step(mut self, f: impl FnMut(usize, &Step) -> Gate + 'static) -> Self {
        self.on_before_step = Some(Box::new(f));
        self
    }

    /// Called after a step is revealed. Welcome steps pass `None`.
    #[must_use]
    pub fn on_after_step(
        mut self,
        f: impl FnMut(usize, &Step, Option<&Target>) + 'static,
    ) -> Self {
        self.on_after_step = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn has_before_step(&self) -> bool {
        self.on_before_step.is_some()
    }

    pub(crate) fn start(&mut self) {
        if let Some(f) = self.on_start.as_mut() {
            f();
        }
    }

    pub(crate) fn finish(&mut self, index: Option<usize>) {
        if let Some(f) = self.on_finish.as_mut() {
            f(index);
        }
    }

    pub(crate) fn exit(&mut self, index: Option<usize>) {
        if let Some(f) = self.on_exit.as_mut() {
            f(index);
        }
    }

    pub(crate) fn before_step(&mut self, index: usize, step: &Step) -> Gate {
        self.on_before_step
            .as_mut()
            .map_or(Gate::Proceed, |f| f(index, step))
    }

    pub(crate) fn after_step(&mut self, index: usize, step: &Step, target: Option<&Target>) {
        if let Some(f) = self.on_after_step.as_mut() {
            f(index, step, target);
        }
    }
}

impl fmt::Debug for TourHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TourHooks")
            .field("on_start", &self.on_start.is_some())
            .field("on_finish", &self.on_finish.is_some())
            .field("on_exit", &self.on_exit.is_some())
            .field("on_before_step", &self.on_before_step.is_some())
            .field("on_after_step", &self.on_after_step.is_some())
            .finish()
    }
}
