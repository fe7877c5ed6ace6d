use crate::visibility::{BatchOutcome, Subscription, VisibilityEntry, VisibilityTracker};

pub const REVEAL_SELECTOR: &str = ".slide-in-left, .slide-in-right, .slide-in-up";
pub const REVEAL_TRANSITION: &str = "all 1s cubic-bezier(0.19, 1, 0.22, 1)";

pub type StyleDecl = (&'static str, &'static str);

pub const HIDDEN_STYLE: &[StyleDecl] = &[
    ("opacity", "0"),
    ("transform", "translateY(40px) scale(0.98)"),
    ("filter", "blur(5px)"),
];

pub const REVEALED_STYLE: &[StyleDecl] = &[
    ("transition", REVEAL_TRANSITION),
    ("opacity", "1"),
    ("transform", "translateY(0) scale(1)"),
    ("filter", "blur(0px)"),
];

/// One-shot entrance transitions for elements scrolled into view.
#[derive(Clone, Debug)]
pub struct RevealAnimator {
    tracker: VisibilityTracker,
    reduced_motion: bool,
}

impl RevealAnimator {
    pub fn new(targets: usize, reduced_motion: bool) -> Self {
        let targets = if reduced_motion { 0 } else { targets };

        Self {
            tracker: VisibilityTracker::new(targets, Subscription::OneShot),
            reduced_motion,
        }
    }

    /// Style applied before observation starts. Reduced motion leaves
    /// elements in their natural, visible state.
    pub fn initial_style(&self) -> &'static [StyleDecl] {
        if self.reduced_motion {
            &[]
        } else {
            HIDDEN_STYLE
        }
    }

    pub fn needs_observer(&self) -> bool {
        self.tracker.observed_count() > 0
    }

    pub fn is_pending(&self, index: usize) -> bool {
        self.tracker.is_observing(index)
    }

    /// Returns the elements to reveal now; each is also listed in
    /// `unobserve` and never reported again.
    pub fn on_batch(&mut self, batch: impl IntoIterator<Item = VisibilityEntry>) -> BatchOutcome {
        let mut outcome = self.tracker.process(batch);
        outcome.events.retain(|event| event.visible);
        outcome
    }
}
