//! Viewport-intersection bookkeeping shared by the navbar highlighter and
//! the reveal animator.
//!
//! The browser reports intersection changes in batches. [`VisibilityTracker`]
//! turns a batch into the events each consumer should act on and tells the
//! caller which targets to stop observing, so the same logic runs natively in
//! tests and behind an `IntersectionObserver` in the page.

/// Margins added to the root (viewport) box, in pixels. Negative values
/// shrink the effective viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RootMargin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl RootMargin {
    pub const fn vertical(top: f64, bottom: f64) -> Self {
        Self {
            top,
            right: 0.0,
            bottom,
            left: 0.0,
        }
    }

    pub fn to_css(self) -> String {
        format!(
            "{}px {}px {}px {}px",
            self.top, self.right, self.bottom, self.left
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObserverOptions {
    pub threshold: f64,
    pub root_margin: RootMargin,
}

impl ObserverOptions {
    /// A section only counts as current when well inside the viewport.
    pub const NAVBAR: Self = Self {
        threshold: 0.3,
        root_margin: RootMargin::vertical(-100.0, -100.0),
    };

    /// Reveal slightly before the element fully enters.
    pub const REVEAL: Self = Self {
        threshold: 0.15,
        root_margin: RootMargin::vertical(0.0, -50.0),
    };
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Subscription {
    Repeating,
    OneShot,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisibilityEntry {
    pub index: usize,
    pub is_intersecting: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisibilityEvent {
    pub index: usize,
    pub visible: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    pub events: Vec<VisibilityEvent>,
    pub unobserve: Vec<usize>,
}

impl BatchOutcome {
    pub fn visible(&self) -> impl Iterator<Item = usize> + '_ {
        self.events
            .iter()
            .filter(|event| event.visible)
            .map(|event| event.index)
    }
}

#[derive(Clone, Debug)]
pub struct VisibilityTracker {
    subscriptions: Vec<Option<Subscription>>,
}

impl VisibilityTracker {
    pub fn new(targets: usize, mode: Subscription) -> Self {
        Self {
            subscriptions: vec![Some(mode); targets],
        }
    }

    pub fn is_observing(&self, index: usize) -> bool {
        matches!(self.subscriptions.get(index), Some(Some(_)))
    }

    pub fn observed_count(&self) -> usize {
        self.subscriptions.iter().flatten().count()
    }

    /// Consumes one platform batch in delivery order. Entries for unknown or
    /// already-fired one-shot targets are dropped.
    pub fn process(&mut self, batch: impl IntoIterator<Item = VisibilityEntry>) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();

        for entry in batch {
            let Some(slot) = self.subscriptions.get_mut(entry.index) else {
                continue;
            };
            let Some(mode) = *slot else {
                continue;
            };

            outcome.events.push(VisibilityEvent {
                index: entry.index,
                visible: entry.is_intersecting,
            });

            if entry.is_intersecting && mode == Subscription::OneShot {
                *slot = None;
                outcome.unobserve.push(entry.index);
            }
        }

        outcome
    }
}
