use crate::config::PHOTO_ID_PLACEHOLDER;
use crate::orbit::RandomSource;

pub const MAX_PHOTO_ID: u32 = 1_000;
pub const MODAL_TRANSITION: &str = "opacity 0.4s ease";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModalEvent {
    TriggerClick,
    CloseClick,
    /// A window click; `on_overlay` is true when the overlay itself was the
    /// target rather than its content.
    WindowClick { on_overlay: bool },
    KeyDown(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModalStyle {
    pub display: &'static str,
    pub opacity: &'static str,
    pub transition: &'static str,
}

impl ModalStyle {
    fn for_open(open: bool) -> Self {
        Self {
            display: if open { "flex" } else { "none" },
            opacity: if open { "1" } else { "0" },
            transition: MODAL_TRANSITION,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModalUpdate {
    pub style: ModalStyle,
    pub photo_url: Option<String>,
}

/// Overlay showing a random remote photo.
#[derive(Clone, Debug)]
pub struct PhotoModal<R> {
    rng: R,
    url_template: String,
    open: bool,
    style: Option<ModalStyle>,
    photo_url: Option<String>,
}

impl<R: RandomSource> PhotoModal<R> {
    pub fn new(url_template: impl Into<String>, rng: R) -> Self {
        Self {
            rng,
            url_template: url_template.into(),
            open: false,
            style: None,
            photo_url: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Last applied style; `None` until the modal is first touched.
    pub fn style(&self) -> Option<ModalStyle> {
        self.style
    }

    pub fn photo_url(&self) -> Option<&str> {
        self.photo_url.as_deref()
    }

    /// Returns what the page must apply, or `None` when nothing changes.
    pub fn handle(&mut self, event: ModalEvent) -> Option<ModalUpdate> {
        match event {
            ModalEvent::TriggerClick => {
                let url = photo_url(&self.url_template, random_photo_id(&mut self.rng));
                self.photo_url = Some(url.clone());
                Some(self.set_open(true, Some(url)))
            }
            ModalEvent::CloseClick => Some(self.set_open(false, None)),
            ModalEvent::WindowClick { on_overlay: true } => Some(self.set_open(false, None)),
            ModalEvent::WindowClick { on_overlay: false } => None,
            ModalEvent::KeyDown(key) if key == "Escape" && self.open => {
                Some(self.set_open(false, None))
            }
            ModalEvent::KeyDown(_) => None,
        }
    }

    fn set_open(&mut self, open: bool, photo_url: Option<String>) -> ModalUpdate {
        let style = ModalStyle::for_open(open);
        self.open = open;
        self.style = Some(style);
        ModalUpdate { style, photo_url }
    }
}

/// Picks an id in `1..=MAX_PHOTO_ID`.
pub fn random_photo_id(rng: &mut impl RandomSource) -> u32 {
    let sample = (rng.next_f64() * f64::from(MAX_PHOTO_ID)).floor() as u32;
    sample.min(MAX_PHOTO_ID - 1) + 1
}

pub fn photo_url(template: &str, id: u32) -> String {
    template.replace(PHOTO_ID_PLACEHOLDER, &id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_PHOTO_URL_TEMPLATE;

    struct Fixed(f64);

    impl RandomSource for Fixed {
        fn next_f64(&mut self) -> f64 {
            self.0
        }
    }

    fn modal(sample: f64) -> PhotoModal<Fixed> {
        PhotoModal::new(DEFAULT_PHOTO_URL_TEMPLATE, Fixed(sample))
    }

    #[test]
    fn photo_ids_cover_one_to_a_thousand() {
        assert_eq!(random_photo_id(&mut Fixed(0.0)), 1);
        assert_eq!(random_photo_id(&mut Fixed(0.4567)), 457);
        assert_eq!(random_photo_id(&mut Fixed(0.999_999)), 1_000);

        let mut rng = fastrand::Rng::with_seed(3);
        for _ in 0..1_000 {
            assert!((1..=MAX_PHOTO_ID).contains(&random_photo_id(&mut rng)));
        }
    }

    #[test]
    fn trigger_opens_with_templated_url() {
        let mut modal = modal(0.0419);
        let update = modal.handle(ModalEvent::TriggerClick).expect("opening applies styles");

        assert_eq!(
            update.photo_url.as_deref(),
            Some("https://picsum.photos/600/400?random=42")
        );
        assert_eq!(update.style.display, "flex");
        assert_eq!(update.style.opacity, "1");
        assert_eq!(update.style.transition, MODAL_TRANSITION);
        assert!(modal.is_open());
    }

    #[test]
    fn escape_while_closed_changes_nothing() {
        let mut modal = modal(0.5);

        assert_eq!(modal.handle(ModalEvent::KeyDown("Escape".to_string())), None);
        assert_eq!(modal.style(), None);
        assert!(!modal.is_open());
    }

    #[test]
    fn escape_while_open_hides_the_overlay() {
        let mut modal = modal(0.5);
        modal.handle(ModalEvent::TriggerClick);

        let update = modal
            .handle(ModalEvent::KeyDown("Escape".to_string()))
            .expect("escape closes an open modal");
        assert_eq!(update.style.display, "none");
        assert_eq!(update.style.opacity, "0");
        assert!(!modal.is_open());

        assert_eq!(modal.handle(ModalEvent::KeyDown("Escape".to_string())), None);
    }

    #[test]
    fn other_keys_are_ignored() {
        let mut modal = modal(0.5);
        modal.handle(ModalEvent::TriggerClick);

        assert_eq!(modal.handle(ModalEvent::KeyDown("Enter".to_string())), None);
        assert!(modal.is_open());
    }

    #[test]
    fn only_overlay_clicks_close() {
        let mut modal = modal(0.5);
        modal.handle(ModalEvent::TriggerClick);

        assert_eq!(modal.handle(ModalEvent::WindowClick { on_overlay: false }), None);
        assert!(modal.is_open());

        let update = modal
            .handle(ModalEvent::WindowClick { on_overlay: true })
            .expect("backdrop click closes");
        assert_eq!(update.style.display, "none");
    }

    #[test]
    fn close_button_keeps_last_photo() {
        let mut modal = modal(0.0);
        modal.handle(ModalEvent::TriggerClick);

        let update = modal.handle(ModalEvent::CloseClick).expect("close applies styles");
        assert_eq!(update.photo_url, None);
        assert_eq!(modal.photo_url(), Some("https://picsum.photos/600/400?random=1"));
    }
}
