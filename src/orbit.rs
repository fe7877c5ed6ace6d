use crate::config::InteractionConfig;

pub const ORBIT_SELECTOR: &str = ".random-orbit";
const KEYFRAME_PREFIX: &str = "orbit";
const MIN_DURATION_SECS: f64 = 10.0;
const DURATION_SPREAD_SECS: f64 = 10.0;
const PULSE_SCALE: f64 = 1.3;
const PULSE_BRIGHTNESS: f64 = 1.4;

/// Uniform samples in `[0, 1)`.
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;
}

impl RandomSource for fastrand::Rng {
    fn next_f64(&mut self) -> f64 {
        self.f64()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Normal,
    Reverse,
}

impl Direction {
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Reverse => "reverse",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayState {
    Running,
    Paused,
}

impl PlayState {
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Paused => "paused",
        }
    }

    pub fn on_hover(entered: bool) -> Self {
        if entered {
            Self::Paused
        } else {
            Self::Running
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct OrbitSpec {
    pub name: String,
    pub radius: f64,
    pub start_angle: f64,
    pub duration_secs: f64,
    pub direction: Direction,
}

impl OrbitSpec {
    pub fn generate(
        index: usize,
        base_radius: f64,
        radius_step: f64,
        rng: &mut impl RandomSource,
    ) -> Self {
        let start_angle = rng.next_f64() * 360.0;
        let duration_secs = MIN_DURATION_SECS + rng.next_f64() * DURATION_SPREAD_SECS;
        let direction = if rng.next_f64() > 0.5 {
            Direction::Normal
        } else {
            Direction::Reverse
        };

        Self {
            name: format!("{KEYFRAME_PREFIX}{index}"),
            radius: base_radius + radius_step * index as f64,
            start_angle,
            duration_secs,
            direction,
        }
    }

    /// Transform at `sweep` degrees past the start angle.
    pub fn frame_transform(&self, sweep: f64, scale: f64) -> String {
        let angle = self.start_angle + sweep;
        format!(
            "rotate({angle:.2}deg) translateX({radius}px) rotate(-{angle:.2}deg) scale({scale})",
            radius = self.radius
        )
    }

    /// Matches the 0% keyframe so nothing jumps when the animation starts.
    pub fn initial_transform(&self) -> String {
        self.frame_transform(0.0, 1.0)
    }

    pub fn animation(&self) -> String {
        format!(
            "{} {:.2}s ease-in-out infinite {}",
            self.name,
            self.duration_secs,
            self.direction.as_css()
        )
    }

    pub fn keyframes_css(&self) -> String {
        format!(
            "@keyframes {name} {{\n\
             \x20 0% {{ transform: {start}; filter: brightness(1); }}\n\
             \x20 50% {{ transform: {pulse}; filter: brightness({PULSE_BRIGHTNESS}); }}\n\
             \x20 100% {{ transform: {end}; filter: brightness(1); }}\n\
             }}\n",
            name = self.name,
            start = self.frame_transform(0.0, 1.0),
            pulse = self.frame_transform(180.0, PULSE_SCALE),
            end = self.frame_transform(360.0, 1.0),
        )
    }
}

/// Generates one orbit per decorated element and the stylesheet that
/// animates them.
pub struct OrbitDecorator<R> {
    rng: R,
    base_radius: f64,
    radius_step: f64,
}

impl<R: RandomSource> OrbitDecorator<R> {
    pub fn new(config: &InteractionConfig, rng: R) -> Self {
        Self {
            rng,
            base_radius: config.orbit_base_radius_px,
            radius_step: config.orbit_radius_step_px,
        }
    }

    pub fn decorate(&mut self, count: usize) -> Vec<OrbitSpec> {
        (0..count)
            .map(|index| {
                OrbitSpec::generate(index, self.base_radius, self.radius_step, &mut self.rng)
            })
            .collect()
    }
}

pub fn stylesheet(orbits: &[OrbitSpec]) -> String {
    orbits.iter().map(OrbitSpec::keyframes_css).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Sequence(Vec<f64>, usize);

    impl RandomSource for Sequence {
        fn next_f64(&mut self) -> f64 {
            let value = self.0[self.1 % self.0.len()];
            self.1 += 1;
            value
        }
    }

    fn decorator(values: &[f64]) -> OrbitDecorator<Sequence> {
        OrbitDecorator::new(&InteractionConfig::default(), Sequence(values.to_vec(), 0))
    }

    #[test]
    fn radius_grows_by_fixed_step() {
        let orbits = OrbitDecorator::new(
            &InteractionConfig::default(),
            fastrand::Rng::with_seed(7),
        )
        .decorate(6);

        for (index, orbit) in orbits.iter().enumerate() {
            assert_eq!(orbit.radius, 100.0 + 45.0 * index as f64);
            assert_eq!(orbit.name, format!("orbit{index}"));
        }
    }

    #[test]
    fn random_parameters_stay_in_range() {
        let orbits = OrbitDecorator::new(
            &InteractionConfig::default(),
            fastrand::Rng::with_seed(42),
        )
        .decorate(50);

        for orbit in orbits {
            assert!((0.0..360.0).contains(&orbit.start_angle));
            assert!((10.0..20.0).contains(&orbit.duration_secs));
        }
    }

    #[test]
    fn fixed_seed_is_deterministic() {
        let config = InteractionConfig::default();
        let first = OrbitDecorator::new(&config, fastrand::Rng::with_seed(9)).decorate(4);
        let second = OrbitDecorator::new(&config, fastrand::Rng::with_seed(9)).decorate(4);
        assert_eq!(first, second);
    }

    #[test]
    fn samples_map_to_angle_duration_and_direction() {
        let orbits = decorator(&[0.25, 0.5, 0.75, 0.0, 0.0, 0.5]).decorate(2);

        assert_eq!(orbits[0].start_angle, 90.0);
        assert_eq!(orbits[0].duration_secs, 15.0);
        assert_eq!(orbits[0].direction, Direction::Normal);
        assert_eq!(orbits[1].start_angle, 0.0);
        assert_eq!(orbits[1].direction, Direction::Reverse);
        assert_eq!(orbits[1].animation(), "orbit1 10.00s ease-in-out infinite reverse");
    }

    #[test]
    fn initial_transform_matches_first_frame() {
        let orbit = &decorator(&[0.1, 0.2, 0.9]).decorate(3)[2];
        let css = orbit.keyframes_css();
        let expected = format!("0% {{ transform: {};", orbit.initial_transform());

        assert!(css.contains(&expected), "{css}");
        assert_eq!(
            orbit.initial_transform(),
            "rotate(36.00deg) translateX(190px) rotate(-36.00deg) scale(1)"
        );
    }

    #[test]
    fn midpoint_pulses_and_end_returns_to_baseline() {
        let orbit = &decorator(&[0.0, 0.0, 0.0]).decorate(1)[0];
        let css = orbit.keyframes_css();

        assert!(css.starts_with("@keyframes orbit0 {"));
        assert!(css.contains(
            "50% { transform: rotate(180.00deg) translateX(100px) rotate(-180.00deg) scale(1.3); filter: brightness(1.4); }"
        ));
        assert!(css.contains(
            "100% { transform: rotate(360.00deg) translateX(100px) rotate(-360.00deg) scale(1); filter: brightness(1); }"
        ));
    }

    #[test]
    fn stylesheet_contains_every_orbit() {
        let orbits = decorator(&[0.3]).decorate(3);
        let sheet = stylesheet(&orbits);

        for orbit in &orbits {
            assert!(sheet.contains(&format!("@keyframes {} {{", orbit.name)));
        }
    }

    #[test]
    fn hover_pauses_and_leave_resumes() {
        assert_eq!(PlayState::on_hover(true).as_css(), "paused");
        assert_eq!(PlayState::on_hover(false).as_css(), "running");
    }
}
