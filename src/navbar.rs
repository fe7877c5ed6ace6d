pub const ACTIVE_CLASS: &str = "active";
pub const SCROLL_LOCK_CLASS: &str = "no-scroll";

/// Open/closed state of the mobile menu.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MenuState {
    open: bool,
}

impl MenuState {
    pub fn is_open(self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    /// Link clicks always close the menu, whatever the prior state.
    pub fn close(&mut self) {
        self.open = false;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkHighlight {
    Unchanged,
    Cleared,
    Active(usize),
}

/// Maps observed sections to the nav link that points at them.
#[derive(Clone, Debug)]
pub struct NavHighlighter {
    link_targets: Vec<Option<String>>,
    section_ids: Vec<String>,
    active: Option<usize>,
}

impl NavHighlighter {
    pub fn new(link_hrefs: Vec<Option<String>>, section_ids: Vec<String>) -> Self {
        let link_targets = link_hrefs
            .into_iter()
            .map(|href| href.and_then(|href| href.strip_prefix('#').map(ToString::to_string)))
            .collect();

        Self {
            link_targets,
            section_ids,
            active: None,
        }
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn link_for_section(&self, section_id: &str) -> Option<usize> {
        self.link_targets
            .iter()
            .position(|target| target.as_deref() == Some(section_id))
    }

    /// Applies the visible sections of one batch in order. Every visible
    /// section clears all links before marking its own, so the last one wins.
    pub fn apply(&mut self, visible_sections: impl IntoIterator<Item = usize>) -> LinkHighlight {
        let mut highlight = LinkHighlight::Unchanged;

        for section in visible_sections {
            let Some(section_id) = self.section_ids.get(section) else {
                continue;
            };

            self.active = self.link_for_section(section_id);
            highlight = match self.active {
                Some(link) => LinkHighlight::Active(link),
                None => LinkHighlight::Cleared,
            };
        }

        highlight
    }
}
