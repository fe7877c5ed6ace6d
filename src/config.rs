use crate::telemetry::LogLevel;

pub const DEFAULT_TYPING_PHRASES: &[&str] = &["Web Developer"];
pub const DEFAULT_TYPING_SPEED_MS: u32 = 100;
pub const DEFAULT_TYPING_DELETE_MS: u32 = 70;
pub const DEFAULT_TYPING_PAUSE_MS: u32 = 1_200;
pub const DEFAULT_SCROLL_OFFSET_PX: f64 = 80.0;
pub const DEFAULT_ORBIT_BASE_RADIUS_PX: f64 = 100.0;
pub const DEFAULT_ORBIT_RADIUS_STEP_PX: f64 = 45.0;
pub const DEFAULT_PHOTO_URL_TEMPLATE: &str = "https://picsum.photos/600/400?random={id}";
pub const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

pub const PHOTO_ID_PLACEHOLDER: &str = "{id}";
const PHRASE_SEPARATOR: char = '|';

const TYPING_SPEED_MS_BOUNDS: (u32, u32) = (10, 2_000);
const TYPING_DELETE_MS_BOUNDS: (u32, u32) = (10, 2_000);
const TYPING_PAUSE_MS_BOUNDS: (u32, u32) = (0, 10_000);
const SCROLL_OFFSET_PX_BOUNDS: (f64, f64) = (0.0, 400.0);
const ORBIT_BASE_RADIUS_PX_BOUNDS: (f64, f64) = (0.0, 2_000.0);
const ORBIT_RADIUS_STEP_PX_BOUNDS: (f64, f64) = (0.0, 500.0);

/// Tunables for every interactive behavior on the page.
///
/// Values come from `data-*` attributes on the document element in the
/// browser. Anything absent, unparsable or out of bounds keeps its default.
#[derive(Clone, Debug, PartialEq)]
pub struct InteractionConfig {
    pub typing_phrases: Vec<String>,
    pub typing_speed_ms: u32,
    pub typing_delete_ms: u32,
    pub typing_pause_ms: u32,
    pub scroll_offset_px: f64,
    pub orbit_base_radius_px: f64,
    pub orbit_radius_step_px: f64,
    pub photo_url_template: String,
    pub log_level: LogLevel,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            typing_phrases: DEFAULT_TYPING_PHRASES
                .iter()
                .map(|phrase| phrase.to_string())
                .collect(),
            typing_speed_ms: DEFAULT_TYPING_SPEED_MS,
            typing_delete_ms: DEFAULT_TYPING_DELETE_MS,
            typing_pause_ms: DEFAULT_TYPING_PAUSE_MS,
            scroll_offset_px: DEFAULT_SCROLL_OFFSET_PX,
            orbit_base_radius_px: DEFAULT_ORBIT_BASE_RADIUS_PX,
            orbit_radius_step_px: DEFAULT_ORBIT_RADIUS_STEP_PX,
            photo_url_template: DEFAULT_PHOTO_URL_TEMPLATE.to_string(),
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

impl InteractionConfig {
    /// Builds a config from a key lookup, e.g. `typing-speed-ms` for
    /// `data-typing-speed-ms`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let typing_phrases = parse_phrases(lookup("typing-phrases"))
            .unwrap_or_else(|| Self::default().typing_phrases);
        let typing_speed_ms = parse_u32_with_bounds(
            lookup("typing-speed-ms"),
            DEFAULT_TYPING_SPEED_MS,
            TYPING_SPEED_MS_BOUNDS,
        );
        let typing_delete_ms = parse_u32_with_bounds(
            lookup("typing-delete-ms"),
            DEFAULT_TYPING_DELETE_MS,
            TYPING_DELETE_MS_BOUNDS,
        );
        let typing_pause_ms = parse_u32_with_bounds(
            lookup("typing-pause-ms"),
            DEFAULT_TYPING_PAUSE_MS,
            TYPING_PAUSE_MS_BOUNDS,
        );
        let scroll_offset_px = parse_f64_with_bounds(
            lookup("scroll-offset"),
            DEFAULT_SCROLL_OFFSET_PX,
            SCROLL_OFFSET_PX_BOUNDS,
        );
        let orbit_base_radius_px = parse_f64_with_bounds(
            lookup("orbit-base-radius"),
            DEFAULT_ORBIT_BASE_RADIUS_PX,
            ORBIT_BASE_RADIUS_PX_BOUNDS,
        );
        let orbit_radius_step_px = parse_f64_with_bounds(
            lookup("orbit-radius-step"),
            DEFAULT_ORBIT_RADIUS_STEP_PX,
            ORBIT_RADIUS_STEP_PX_BOUNDS,
        );
        let photo_url_template = parse_non_empty_string(lookup("photo-url"))
            .filter(|template| template.contains(PHOTO_ID_PLACEHOLDER))
            .unwrap_or_else(|| DEFAULT_PHOTO_URL_TEMPLATE.to_string());
        let log_level = parse_log_level(lookup("log-level"), DEFAULT_LOG_LEVEL);

        Self {
            typing_phrases,
            typing_speed_ms,
            typing_delete_ms,
            typing_pause_ms,
            scroll_offset_px,
            orbit_base_radius_px,
            orbit_radius_step_px,
            photo_url_template,
            log_level,
        }
    }
}

fn parse_non_empty_string(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_u32_with_bounds(value: Option<String>, default: u32, bounds: (u32, u32)) -> u32 {
    value
        .and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_f64_with_bounds(value: Option<String>, default: f64, bounds: (f64, f64)) -> f64 {
    value
        .and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite() && (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_phrases(value: Option<String>) -> Option<Vec<String>> {
    let phrases: Vec<String> = parse_non_empty_string(value)?
        .split(PHRASE_SEPARATOR)
        .map(str::trim)
        .filter(|phrase| !phrase.is_empty())
        .map(ToString::to_string)
        .collect();

    (!phrases.is_empty()).then_some(phrases)
}

fn parse_log_level(value: Option<String>, default: LogLevel) -> LogLevel {
    match parse_non_empty_string(value)
        .unwrap_or_else(|| default.as_str().to_string())
        .to_ascii_lowercase()
        .as_str()
    {
        "debug" => LogLevel::Debug,
        "info" => LogLevel::Info,
        _ => default,
    }
}
