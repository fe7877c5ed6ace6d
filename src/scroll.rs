pub const ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollMotion {
    Smooth,
    Instant,
}

impl ScrollMotion {
    pub fn for_reduced_motion(reduced_motion: bool) -> Self {
        if reduced_motion {
            Self::Instant
        } else {
            Self::Smooth
        }
    }
}

/// Id referenced by a same-page anchor, if any.
pub fn anchor_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Document offset to scroll to so the target clears the fixed header.
pub fn scroll_destination(target_top_in_viewport: f64, scroll_y: f64, header_offset: f64) -> f64 {
    target_top_in_viewport + scroll_y - header_offset
}

/// Resolves a click on `href`. `locate` returns the target's current
/// viewport top when the element exists. `None` means the browser keeps
/// its default navigation.
pub fn plan_scroll(
    href: &str,
    scroll_y: f64,
    header_offset: f64,
    locate: impl FnOnce(&str) -> Option<f64>,
) -> Option<f64> {
    let id = anchor_target(href)?;
    let top = locate(id)?;
    Some(scroll_destination(top, scroll_y, header_offset))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchor_target_strips_the_hash() {
        assert_eq!(anchor_target("#about"), Some("about"));
        assert_eq!(anchor_target("#"), None);
        assert_eq!(anchor_target("/page#about"), None);
    }

    #[test]
    fn destination_subtracts_header_offset() {
        assert_eq!(scroll_destination(300.0, 1_200.0, 80.0), 1_420.0);
        assert_eq!(scroll_destination(-50.0, 100.0, 80.0), -30.0);
    }

    #[test]
    fn existing_target_is_scrolled_to() {
        let planned = plan_scroll("#skills", 500.0, 80.0, |id| (id == "skills").then_some(240.0));
        assert_eq!(planned, Some(660.0));
    }

    #[test]
    fn missing_target_keeps_default_navigation() {
        let mut looked_up = None;
        let planned = plan_scroll("#missing-id", 0.0, 80.0, |id| {
            looked_up = Some(id.to_string());
            None
        });

        assert_eq!(planned, None);
        assert_eq!(looked_up.as_deref(), Some("missing-id"));
    }

    #[test]
    fn bare_hash_never_looks_anything_up() {
        let planned = plan_scroll("#", 0.0, 80.0, |_| panic!("no lookup for an empty id"));
        assert_eq!(planned, None);
    }

    #[test]
    fn reduced_motion_jumps_instantly() {
        assert_eq!(ScrollMotion::for_reduced_motion(true), ScrollMotion::Instant);
        assert_eq!(ScrollMotion::for_reduced_motion(false), ScrollMotion::Smooth);
    }
}
