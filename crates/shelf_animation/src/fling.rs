//! Spline-based fling deceleration
//!
//! A released drag keeps moving along a friction curve: the initial velocity
//! determines how far and how long the fling travels, and the position over
//! time follows a precomputed spline so motion starts fast and settles
//! smoothly. Hard bounds shorten the fling instead of letting it overshoot.

use std::sync::OnceLock;

const INFLEXION: f64 = 0.35;
const START_TENSION: f64 = 0.5;
const END_TENSION: f64 = 1.0;
const P1: f64 = START_TENSION * INFLEXION;
const P2: f64 = 1.0 - END_TENSION * (1.0 - INFLEXION);
const NB_SAMPLES: usize = 100;

const GRAVITY_EARTH: f64 = 9.80665;
const INCHES_PER_METER: f64 = 39.37;
const BASELINE_PPI: f64 = 160.0;
const FRICTION_TUNING: f64 = 0.84;

/// ln(0.78) / ln(0.9)
fn deceleration_rate() -> f64 {
    0.78_f64.ln() / 0.9_f64.ln()
}

/// Normalized position/time samples of the deceleration spline
struct SplineTables {
    position: [f64; NB_SAMPLES + 1],
    time: [f64; NB_SAMPLES + 1],
}

impl SplineTables {
    fn compute() -> Self {
        let mut position = [0.0; NB_SAMPLES + 1];
        let mut time = [0.0; NB_SAMPLES + 1];

        let mut x_min = 0.0_f64;
        let mut y_min = 0.0_f64;
        for i in 0..NB_SAMPLES {
            let alpha = i as f64 / NB_SAMPLES as f64;

            let mut x_max = 1.0_f64;
            let (x, coef) = loop {
                let x = x_min + (x_max - x_min) / 2.0;
                let coef = 3.0 * x * (1.0 - x);
                let tx = coef * ((1.0 - x) * P1 + x * P2) + x * x * x;
                if (tx - alpha).abs() < 1e-5 {
                    break (x, coef);
                }
                if tx > alpha {
                    x_max = x;
                } else {
                    x_min = x;
                }
            };
            position[i] = coef * ((1.0 - x) * START_TENSION + x) + x * x * x;

            let mut y_max = 1.0_f64;
            let (y, coef_y) = loop {
                let y = y_min + (y_max - y_min) / 2.0;
                let coef_y = 3.0 * y * (1.0 - y);
                let dy = coef_y * ((1.0 - y) * START_TENSION + y) + y * y * y;
                if (dy - alpha).abs() < 1e-5 {
                    break (y, coef_y);
                }
                if dy > alpha {
                    y_max = y;
                } else {
                    y_min = y;
                }
            };
            time[i] = coef_y * ((1.0 - y) * P1 + y * P2) + y * y * y;
        }
        position[NB_SAMPLES] = 1.0;
        time[NB_SAMPLES] = 1.0;

        Self { position, time }
    }

    /// Linear interpolation into one of the tables
    fn sample(table: &[f64; NB_SAMPLES + 1], fraction: f64) -> f64 {
        let index = (NB_SAMPLES as f64 * fraction) as usize;
        if index >= NB_SAMPLES {
            return 1.0;
        }
        let lo = index as f64 / NB_SAMPLES as f64;
        let hi = (index + 1) as f64 / NB_SAMPLES as f64;
        table[index] + (fraction - lo) / (hi - lo) * (table[index + 1] - table[index])
    }
}

fn spline_tables() -> &'static SplineTables {
    static TABLES: OnceLock<SplineTables> = OnceLock::new();
    TABLES.get_or_init(SplineTables::compute)
}

/// Physical parameters of the fling model
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlingConfig {
    /// Friction coefficient (platform default 0.015)
    pub friction: f32,
    /// Display density; scales the physical deceleration
    pub density: f32,
}

impl Default for FlingConfig {
    fn default() -> Self {
        Self {
            friction: 0.015,
            density: 1.0,
        }
    }
}

impl FlingConfig {
    pub fn new(friction: f32, density: f32) -> Self {
        Self { friction, density }
    }

    fn physical_coeff(&self) -> f64 {
        GRAVITY_EARTH * INCHES_PER_METER * BASELINE_PPI * self.density as f64 * FRICTION_TUNING
    }

    fn spline_deceleration(&self, velocity: f32) -> f64 {
        (INFLEXION * velocity.abs() as f64 / (self.friction as f64 * self.physical_coeff())).ln()
    }

    /// Natural duration of a fling started at `velocity` px/s
    pub fn fling_duration_ms(&self, velocity: f32) -> f64 {
        let l = self.spline_deceleration(velocity);
        1000.0 * (l / (deceleration_rate() - 1.0)).exp()
    }

    /// Natural (unsigned) travel distance of a fling started at `velocity` px/s
    pub fn fling_distance(&self, velocity: f32) -> f64 {
        let rate = deceleration_rate();
        let l = self.spline_deceleration(velocity);
        self.friction as f64 * self.physical_coeff() * (rate / (rate - 1.0) * l).exp()
    }
}

/// A single-axis fling in progress
#[derive(Clone, Debug)]
pub struct Fling {
    start: i32,
    min: i32,
    max: i32,
    final_position: i32,
    /// Signed travel of the unconstrained spline
    spline_distance: f64,
    spline_duration_ms: f64,
    /// Spline duration, shortened when a bound cuts the fling off
    duration_ms: f64,
    start_time_ms: Option<f64>,
    current: i32,
    finished: bool,
}

impl Fling {
    /// Start a fling from `start` with `velocity` px/s, confined to `[min, max]`
    pub fn new(config: &FlingConfig, start: i32, velocity: f32, min: i32, max: i32) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        let start = start.clamp(min, max);

        let mut fling = Self {
            start,
            min,
            max,
            final_position: start,
            spline_distance: 0.0,
            spline_duration_ms: 0.0,
            duration_ms: 0.0,
            start_time_ms: None,
            current: start,
            finished: true,
        };

        if velocity == 0.0 || !velocity.is_finite() {
            return fling;
        }

        fling.spline_duration_ms = config.fling_duration_ms(velocity);
        fling.duration_ms = fling.spline_duration_ms;
        fling.spline_distance = config.fling_distance(velocity) * velocity.signum() as f64;

        let natural_final = start + fling.spline_distance.round() as i32;
        fling.final_position = natural_final;
        if natural_final < min {
            fling.adjust_duration(natural_final, min);
            fling.final_position = min;
        } else if natural_final > max {
            fling.adjust_duration(natural_final, max);
            fling.final_position = max;
        }

        fling.finished = fling.final_position == start;
        tracing::trace!(
            "fling start={} velocity={:.1} final={} duration={:.0}ms bounds=({}, {})",
            start,
            velocity,
            fling.final_position,
            fling.duration_ms,
            min,
            max
        );
        fling
    }

    /// Shorten the fling so it ends when the spline reaches `new_final`
    fn adjust_duration(&mut self, old_final: i32, new_final: i32) {
        let old_distance = (old_final - self.start) as f64;
        if old_distance == 0.0 {
            return;
        }
        let fraction = ((new_final - self.start) as f64 / old_distance).abs();
        self.duration_ms *= SplineTables::sample(&spline_tables().time, fraction);
    }

    /// Advance to the given frame time. Returns true if the position was
    /// updated, false once the fling had already finished.
    pub fn advance(&mut self, frame_time_ms: f64) -> bool {
        if self.finished {
            return false;
        }

        let start_time = *self.start_time_ms.get_or_insert(frame_time_ms);
        let elapsed = (frame_time_ms - start_time).max(0.0);

        if elapsed >= self.duration_ms {
            self.current = self.final_position;
            self.finished = true;
            return true;
        }

        let t = if self.spline_duration_ms > 0.0 {
            elapsed / self.spline_duration_ms
        } else {
            1.0
        };
        let coef = SplineTables::sample(&spline_tables().position, t);
        let position = self.start + (coef * self.spline_distance).round() as i32;
        self.current = position.clamp(self.min, self.max);
        true
    }

    /// Stop where we are
    pub fn abort(&mut self) {
        self.finished = true;
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn start(&self) -> i32 {
        self.start
    }

    pub fn final_position(&self) -> i32 {
        self.final_position
    }

    pub fn bounds(&self) -> (i32, i32) {
        (self.min, self.max)
    }

    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(fling: &mut Fling) -> Vec<i32> {
        let mut positions = Vec::new();
        let mut t = 0.0;
        while fling.advance(t) {
            positions.push(fling.current());
            t += 16.0;
            assert!(positions.len() < 10_000, "fling never finished");
        }
        positions
    }

    #[test]
    fn test_spline_tables_are_monotonic() {
        let tables = spline_tables();
        for i in 0..NB_SAMPLES {
            assert!(tables.position[i] <= tables.position[i + 1]);
            assert!(tables.time[i] <= tables.time[i + 1]);
        }
        assert_eq!(tables.position[NB_SAMPLES], 1.0);
    }

    #[test]
    fn test_zero_velocity_finishes_immediately() {
        let mut fling = Fling::new(&FlingConfig::default(), -20, 0.0, -500, 0);
        assert!(fling.is_finished());
        assert!(!fling.advance(0.0));
        assert_eq!(fling.current(), -20);
    }

    #[test]
    fn test_unbounded_fling_reaches_natural_distance() {
        let config = FlingConfig::default();
        let mut fling = Fling::new(&config, 0, 1_000.0, -100_000, 100_000);
        let expected = config.fling_distance(1_000.0).round() as i32;

        let positions = run(&mut fling);
        assert_eq!(*positions.last().unwrap(), expected);

        // Motion never reverses
        for pair in positions.windows(2) {
            assert!(pair[1] >= pair[0]);
        }
    }

    #[test]
    fn test_fling_is_cut_short_at_bound() {
        let config = FlingConfig::default();
        let mut free = Fling::new(&config, -400, 6_000.0, -500, 100_000);
        let mut bounded = Fling::new(&config, -400, 6_000.0, -500, 0);

        assert_eq!(bounded.final_position(), 0);
        assert!(bounded.duration_ms() < free.duration_ms());

        let positions = run(&mut bounded);
        assert_eq!(*positions.last().unwrap(), 0);
        run(&mut free);
    }

    #[test]
    fn test_positions_stay_within_bounds() {
        let config = FlingConfig::default();
        for velocity in [-8_000.0, -2_500.0, -300.0, 120.0, 3_000.0, 8_000.0] {
            let mut fling = Fling::new(&config, -250, velocity, -500, 0);
            for position in run(&mut fling) {
                assert!((-500..=0).contains(&position), "{} out of bounds", position);
            }
        }
    }

    #[test]
    fn test_abort_keeps_current_position() {
        let mut fling = Fling::new(&FlingConfig::default(), 0, -3_000.0, -10_000, 0);
        fling.advance(0.0);
        fling.advance(48.0);
        let at_abort = fling.current();
        fling.abort();
        assert!(!fling.advance(64.0));
        assert_eq!(fling.current(), at_abort);
    }
}
