use crate::geometry::{Point, TrackBounds};
use crate::math::{clamp, round_hundredths, wrap};

/// Scales the remaining distance into the shader's shear/RGB-shift input.
pub const VELOCITY_GAIN: f64 = 0.0005;

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        anchor: Point,
    },
}

/// Scalar scroll state, integrated once per frame.
#[derive(Clone, Debug, PartialEq)]
pub struct MotionState {
    target: f64,
    current: f64,
    current_rounded: f64,
    velocity: f64,
    progress: f64,
    drag: DragState,
    drag_offset: f64,
    resizing: bool,
    bounds: TrackBounds,
}

impl MotionState {
    pub fn new(bounds: TrackBounds) -> Self {
        Self {
            target: 0.0,
            current: 0.0,
            current_rounded: 0.0,
            velocity: 0.0,
            progress: 0.0,
            drag: DragState::Idle,
            drag_offset: 0.0,
            resizing: false,
            bounds,
        }
    }

    /// Stores `raw` clamped into the track bounds. NaN leaves the target alone.
    pub fn set_target(&mut self, raw: f64) {
        if raw.is_nan() {
            tracing::debug!("ignoring NaN scroll target");
            return;
        }
        self.target = clamp(self.bounds.max, self.bounds.min, raw);
    }

    pub fn nudge_target(&mut self, delta: f64) {
        self.set_target(self.target + delta);
    }

    /// Replaces the bounds and re-clamps the target into them.
    pub fn set_bounds(&mut self, bounds: TrackBounds) {
        self.bounds = bounds;
        self.set_target(self.target);
    }

    /// Advances `current` toward `target` by `ease` of the remaining distance.
    pub fn integrate(&mut self, ease: f64) {
        let ease = ease.clamp(0.0, 1.0);
        self.current += (self.target - self.current) * ease;
        self.current_rounded = round_hundredths(self.current);
        self.velocity = (self.target - self.current) * VELOCITY_GAIN;
        self.progress = if self.bounds.is_degenerate() {
            0.0
        } else {
            wrap(0.0, 1.0, self.current_rounded / self.bounds.max)
        };
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn current_rounded(&self) -> f64 {
        self.current_rounded
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn bounds(&self) -> TrackBounds {
        self.bounds
    }

    pub fn drag(&self) -> DragState {
        self.drag
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    pub fn drag_offset(&self) -> f64 {
        self.drag_offset
    }

    pub fn is_resizing(&self) -> bool {
        self.resizing
    }

    pub(crate) fn begin_drag(&mut self, anchor: Point) {
        self.drag = DragState::Dragging { anchor };
        self.drag_offset = self.target;
    }

    pub(crate) fn end_drag(&mut self) {
        self.drag = DragState::Idle;
        self.drag_offset = self.target;
    }

    pub(crate) fn set_resizing(&mut self, resizing: bool) {
        self.resizing = resizing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn motion() -> MotionState {
        MotionState::new(TrackBounds {
            min: 0.0,
            max: -2700.0,
        })
    }

    #[test]
    fn target_is_always_clamped() {
        let mut motion = motion();
        for raw in [-1e12, -2700.5, -2700.0, -40.0, 0.0, 0.1, 5e9, f64::INFINITY, f64::NEG_INFINITY] {
            motion.set_target(raw);
            let target = motion.target();
            assert!((-2700.0..=0.0).contains(&target), "{raw} -> {target}");
        }
    }

    #[test]
    fn nan_target_is_ignored() {
        let mut motion = motion();
        motion.set_target(-300.0);
        motion.set_target(f64::NAN);
        assert_eq!(motion.target(), -300.0);
    }

    #[test]
    fn integrate_is_idempotent_at_equilibrium() {
        let mut motion = motion();
        motion.set_target(-500.0);
        motion.integrate(1.0);
        assert_eq!(motion.current(), -500.0);
        for _ in 0..10 {
            motion.integrate(0.075);
            assert_eq!(motion.current(), -500.0);
            assert_eq!(motion.velocity(), 0.0);
        }
    }

    #[test]
    fn integrate_converges_monotonically() {
        let mut motion = motion();
        motion.set_target(-1000.0);
        let mut last_gap = f64::INFINITY;
        for _ in 0..400 {
            motion.integrate(0.075);
            let gap = (motion.target() - motion.current()).abs();
            assert!(gap <= last_gap);
            last_gap = gap;
        }
        assert!(last_gap < 1e-9);
    }

    #[test]
    fn integrate_quantizes_and_derives_velocity() {
        let mut motion = motion();
        motion.set_target(-100.0);
        motion.integrate(0.075);
        assert!((motion.current() + 7.5).abs() < 1e-12);
        assert_eq!(motion.current_rounded(), -7.5);
        assert!((motion.velocity() + 92.5 * VELOCITY_GAIN).abs() < 1e-12);
    }

    #[test]
    fn progress_is_fraction_of_track() {
        let mut motion = motion();
        motion.set_target(-1350.0);
        motion.integrate(1.0);
        assert!((motion.progress() - 0.5).abs() < 1e-12);

        motion.set_target(-2700.0);
        motion.integrate(1.0);
        assert_eq!(motion.progress(), 0.0);
    }

    #[test]
    fn degenerate_track_reports_zero_progress() {
        let mut motion = MotionState::new(TrackBounds { min: 0.0, max: 0.0 });
        motion.set_target(-50.0);
        motion.integrate(0.5);
        assert_eq!(motion.target(), 0.0);
        assert_eq!(motion.progress(), 0.0);
        assert!(!motion.progress().is_nan());
    }

    #[test]
    fn shrinking_bounds_reclamp_target() {
        let mut motion = motion();
        motion.set_target(-2000.0);
        motion.set_bounds(TrackBounds {
            min: 0.0,
            max: -900.0,
        });
        assert_eq!(motion.target(), -900.0);
    }

    #[test]
    fn drag_lifecycle_tracks_offset() {
        let mut motion = motion();
        motion.set_target(-200.0);
        motion.begin_drag(Point::new(10.0, 20.0));
        assert!(motion.is_dragging());
        assert_eq!(motion.drag_offset(), -200.0);
        motion.set_target(-260.0);
        motion.end_drag();
        assert!(!motion.is_dragging());
        assert_eq!(motion.drag_offset(), -260.0);
    }
}
