//! Focus arbitration across named UI regions.
//!
//! The arbiter tracks a per-region focused flag and derives a single
//! aggregate signal: "does any tracked region hold input focus". Consumers
//! read the aggregate either by draining an edge with
//! [`FocusArbiter::take_focus_change`] or by registering an observer that
//! fires on value changes only.

use std::fmt;

/// Handle to a region registered with a [`FocusArbiter`].
///
/// Handles are only meaningful for the arbiter that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegionHandle(usize);

struct Region {
    name: String,
    focused: bool,
}

type FocusObserver = Box<dyn FnMut(bool)>;

/// Tracks which registered regions hold logical focus and exposes the
/// aggregate OR of their flags.
///
/// Single-threaded by design: all mutations arrive from the UI dispatch
/// turn that observed the focus/blur event. The arbiter is passed
/// explicitly to whatever needs it; there is no global instance.
#[derive(Default)]
pub struct FocusArbiter {
    regions: Vec<Region>,
    aggregate: bool,
    // Aggregate value last drained via `take_focus_change`. An edge is
    // pending only while `aggregate != observed`, so a focus move between
    // two tracked regions within one turn never surfaces a false edge.
    observed: bool,
    observers: Vec<FocusObserver>,
}

impl fmt::Debug for FocusArbiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FocusArbiter")
            .field("regions", &self.regions.len())
            .field("aggregate", &self.aggregate)
            .finish()
    }
}

impl FocusArbiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a focusable region. The region starts unfocused.
    pub fn register_region(&mut self, name: impl Into<String>) -> RegionHandle {
        let handle = RegionHandle(self.regions.len());
        self.regions.push(Region {
            name: name.into(),
            focused: false,
        });
        handle
    }

    /// Update a region's focused flag and recompute the aggregate.
    ///
    /// Setting a flag to the value it already holds is a no-op. No
    /// notification fires here: notification is deferred to
    /// [`take_focus_change`](Self::take_focus_change) so a focus move
    /// between two tracked regions within one dispatch turn never surfaces
    /// a transient "unfocused" value. An unknown handle is a programming
    /// error and panics.
    pub fn set_focused(&mut self, handle: RegionHandle, focused: bool) {
        let region = self
            .regions
            .get_mut(handle.0)
            .unwrap_or_else(|| panic!("unregistered region handle {:?}", handle));
        if region.focused == focused {
            return;
        }
        tracing::trace!(region = %region.name, focused, "region focus flag");
        region.focused = focused;
        self.aggregate = self.regions.iter().any(|r| r.focused);
    }

    /// Current aggregate: true while any tracked region is focused.
    pub fn is_focused(&self) -> bool {
        self.aggregate
    }

    pub fn region_is_focused(&self, handle: RegionHandle) -> bool {
        self.regions
            .get(handle.0)
            .unwrap_or_else(|| panic!("unregistered region handle {:?}", handle))
            .focused
    }

    pub fn region_name(&self, handle: RegionHandle) -> &str {
        self.regions
            .get(handle.0)
            .unwrap_or_else(|| panic!("unregistered region handle {:?}", handle))
            .name
            .as_str()
    }

    /// Consume the pending aggregate edge, if any, notifying observers.
    ///
    /// Returns `Some(new_value)` when the aggregate differs from the value
    /// returned by the previous call (or from the initial `false`). Two
    /// flag changes that cancel out within one turn report nothing and
    /// notify nobody. Call this once the turn's focus mutations are
    /// applied.
    pub fn take_focus_change(&mut self) -> Option<bool> {
        if self.aggregate != self.observed {
            self.observed = self.aggregate;
            for observer in &mut self.observers {
                observer(self.aggregate);
            }
            Some(self.aggregate)
        } else {
            None
        }
    }

    /// Register an observer invoked with the new aggregate value whenever
    /// a net aggregate change is consumed. Used to bind view flags to the
    /// arbiter.
    pub fn observe(&mut self, observer: impl FnMut(bool) + 'static) {
        self.observers.push(Box::new(observer));
    }
}
