//! Paused keyframe timelines scrubbed by a progress value.
//!
//! Nothing here reads a clock: the slider owns time and hands each timeline a
//! progress in `[0, 1]`, which is mapped onto the timeline's own duration and
//! sampled per tween.

/// Easing shapes used by the slider tweens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Easing {
    #[default]
    Linear,
    /// Cubic ease-out: fast start, slow settle.
    Power3Out,
}

impl Easing {
    pub fn sample(self, t: f64) -> f64 {
        let clamped = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => clamped,
            Easing::Power3Out => {
                let inverse = 1.0 - clamped;
                1.0 - inverse * inverse * inverse
            }
        }
    }
}

/// Anything that can be scrubbed to a normalized position.
pub trait Timeline {
    fn set_progress(&mut self, progress: f64);
    fn progress(&self) -> f64;
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Tween {
    from: f64,
    to: f64,
    start: f64,
    duration: f64,
    easing: Easing,
}

impl Tween {
    fn value_at(&self, time: f64) -> f64 {
        let local = (time - self.start) / self.duration.max(f64::EPSILON);
        let mix = self.easing.sample(local);
        self.from + (self.to - self.from) * mix
    }

    fn end(&self) -> f64 {
        self.start + self.duration
    }
}

fn sanitize(progress: f64) -> f64 {
    if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    }
}

/// Per-slide entrance timeline: linear `scale_min -> scale_max`.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleTimeline {
    tween: Tween,
    progress: f64,
}

impl ScaleTimeline {
    pub fn new(from: f64, to: f64) -> Self {
        Self {
            tween: Tween {
                from,
                to,
                start: 0.0,
                duration: 1.0,
                easing: Easing::Linear,
            },
            progress: 0.0,
        }
    }

    /// Swaps the tween endpoints without moving the playhead.
    pub fn retarget(&mut self, from: f64, to: f64) {
        self.tween.from = from;
        self.tween.to = to;
    }

    pub fn value(&self) -> f64 {
        self.tween.value_at(self.progress * self.tween.end())
    }
}

impl Timeline for ScaleTimeline {
    fn set_progress(&mut self, progress: f64) {
        self.progress = sanitize(progress);
    }

    fn progress(&self) -> f64 {
        self.progress
    }
}

/// Values the global timeline drives on the page chrome.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackIndicators {
    /// Horizontal scale of the main progress line.
    pub line_scale: f64,
    /// Horizontal scale of the secondary progress line.
    pub secondary_line_scale: f64,
    /// Vertical offset of the titles strip, in percent of its height.
    pub titles_y_percent: f64,
}

/// Global timeline for the progress bars and the titles strip.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackTimeline {
    line: Tween,
    secondary_line: Tween,
    titles: Tween,
    progress: f64,
}

impl TrackTimeline {
    pub fn new(title_count: usize) -> Self {
        let count = title_count.max(1) as f64;
        Self {
            line: Tween {
                from: 0.0,
                to: 1.0,
                start: 0.0,
                duration: 1.0,
                easing: Easing::Linear,
            },
            secondary_line: Tween {
                from: 1.0,
                to: 0.0,
                start: 0.0,
                duration: 0.5,
                easing: Easing::Power3Out,
            },
            titles: Tween {
                from: 0.0,
                to: -(100.0 - 100.0 / count),
                start: 0.0,
                duration: 1.0,
                easing: Easing::Linear,
            },
            progress: 0.0,
        }
    }

    fn duration(&self) -> f64 {
        self.line
            .end()
            .max(self.secondary_line.end())
            .max(self.titles.end())
    }

    pub fn indicators(&self) -> TrackIndicators {
        let time = self.progress * self.duration();
        TrackIndicators {
            line_scale: self.line.value_at(time),
            secondary_line_scale: self.secondary_line.value_at(time),
            titles_y_percent: self.titles.value_at(time),
        }
    }
}

impl Timeline for TrackTimeline {
    fn set_progress(&mut self, progress: f64) {
        self.progress = sanitize(progress);
    }

    fn progress(&self) -> f64 {
        self.progress
    }
}
