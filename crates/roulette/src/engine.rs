use crate::sys::animator::Animator;
use spindle::{Item, Pointer, TurnBounds, TurnSource, WedgeRange, partition, planner, resolve};
use std::time::Duration;

/// Settings that shape a single spin. Reloadable between spins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinSettings {
    pub duration: Duration,
    pub bounds: TurnBounds,
    pub pointer: Pointer,
}

impl Default for SpinSettings {
    fn default() -> Self {
        Self {
            duration: Duration::from_secs(10),
            bounds: TurnBounds::default(),
            pointer: Pointer::Top,
        }
    }
}

type EndCallback = Box<dyn FnOnce(Item)>;

/// Drives the wheel through its spin lifecycle.
///
/// The engine owns the only mutable spin state: the cumulative rotation and
/// the idle/spinning flag. A spin is a guarded transition plus exactly one
/// deferred completion scheduled on the animator; for each accepted spin the
/// start callback fires synchronously inside [`request_spin`] and the end
/// callback fires once when the animator reports completion, never reordered.
///
/// [`request_spin`]: SpinEngine::request_spin
pub struct SpinEngine {
    items: Vec<Item>,
    wedges: Vec<WedgeRange>,
    cumulative_angle: f64,
    spinning: bool,
    settings: SpinSettings,
    turns: Box<dyn TurnSource>,
    animator: Box<dyn Animator>,
    pending_end: Option<EndCallback>,
}

impl SpinEngine {
    pub fn new(
        settings: SpinSettings,
        turns: Box<dyn TurnSource>,
        animator: Box<dyn Animator>,
    ) -> Self {
        Self {
            items: Vec::new(),
            wedges: Vec::new(),
            cumulative_angle: 0.0,
            spinning: false,
            settings,
            turns,
            animator,
            pending_end: None,
        }
    }

    /// Replaces the whole item list and repartitions the wheel. There is no
    /// incremental patching; the previous wedge set is discarded.
    ///
    /// Ignored while a spin is in flight: the winner must come from the
    /// wedges the spin was planned against.
    pub fn set_items(&mut self, items: Vec<Item>) {
        if self.spinning {
            log::warn!("item list changed while spinning; keeping the current wheel");
            return;
        }
        self.wedges = partition(items.len()).unwrap_or_default();
        self.items = items;
    }

    /// Applies new spin settings. Takes effect from the next spin.
    pub fn apply_settings(&mut self, settings: SpinSettings) {
        self.settings = settings;
    }

    pub fn is_spinning(&self) -> bool {
        self.spinning
    }

    pub fn current_wedges(&self) -> &[WedgeRange] {
        &self.wedges
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Live rotation for presentation: unbounded and never folded, so the
    /// wheel appears to rotate continuously across spins.
    pub fn cumulative_angle(&self) -> f64 {
        self.cumulative_angle
    }

    /// Starts a spin if the wheel has wedges and is idle; otherwise a silent
    /// no-op (no state change, no callbacks). Returns whether the spin was
    /// accepted.
    ///
    /// On accept the turn delta is committed, `on_start` fires before this
    /// returns, and one completion is scheduled after the configured
    /// duration. An accepted spin always runs to completion; there is no
    /// cancellation path.
    pub fn request_spin(
        &mut self,
        on_start: impl FnOnce(),
        on_end: impl FnOnce(Item) + 'static,
    ) -> bool {
        if self.spinning {
            log::debug!("spin requested while already spinning; ignored");
            return false;
        }
        if self.wedges.is_empty() {
            log::debug!("spin requested with no items; ignored");
            return false;
        }

        let delta = planner::plan(self.turns.as_mut(), self.settings.bounds);
        self.cumulative_angle += delta;
        self.spinning = true;
        self.pending_end = Some(Box::new(on_end));
        on_start();
        self.animator.schedule(self.settings.duration);
        true
    }

    /// Completes the in-flight spin: resolves the wedge under the pointer
    /// and delivers the winner through the stored end callback. Driven by
    /// the animator's single completion signal; a stray call while idle is
    /// ignored.
    pub fn finish_spin(&mut self) {
        if !self.spinning {
            log::warn!("spin completion with no spin in flight; ignored");
            return;
        }
        self.spinning = false;
        let winner = resolve(self.cumulative_angle, &self.wedges, self.settings.pointer)
            .map(|index| self.items[index].clone());
        if let (Some(on_end), Some(item)) = (self.pending_end.take(), winner) {
            on_end(item);
        }
    }
}
