use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use renderer::{Positionable, Scene};
use serde::Serialize;
use slider::Slider;

/// JSON-lines record of one rendered frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameSnapshot {
    pub frame: u64,
    pub target: f64,
    pub current: f64,
    pub velocity: f64,
    pub progress: f64,
    pub dragging: bool,
    pub indicators: IndicatorSnapshot,
    pub items: Vec<ItemSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorSnapshot {
    pub line_scale: f64,
    pub secondary_line_scale: f64,
    pub titles_y_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemSnapshot {
    pub title: String,
    pub x: f64,
    pub y: f64,
    pub translate: f64,
    pub visible: bool,
    pub out: bool,
    pub progress: f64,
    pub scale: f32,
    pub placeholder: bool,
}

impl FrameSnapshot {
    pub fn capture(frame: u64, slider: &Slider, scene: &Scene) -> Self {
        let motion = slider.motion();
        let indicators = slider.indicators();
        let items = slider
            .items()
            .iter()
            .filter_map(|item| {
                let plane = scene.plane(item.plane())?;
                let (x, y) = plane.position();
                let evaluation = item.evaluation();
                Some(ItemSnapshot {
                    title: item.title().to_string(),
                    x,
                    y,
                    translate: evaluation.translate,
                    visible: evaluation.visible,
                    out: item.is_out(),
                    progress: evaluation.progress,
                    scale: plane.uniforms().u_scale,
                    placeholder: plane.texture().is_placeholder(),
                })
            })
            .collect();

        Self {
            frame,
            target: motion.target(),
            current: motion.current(),
            velocity: motion.velocity(),
            progress: motion.progress(),
            dragging: motion.is_dragging(),
            indicators: IndicatorSnapshot {
                line_scale: indicators.line_scale,
                secondary_line_scale: indicators.secondary_line_scale,
                titles_y_percent: indicators.titles_y_percent,
            },
            items,
        }
    }
}

pub struct SnapshotWriter {
    out: Box<dyn Write>,
}

impl SnapshotWriter {
    /// `-` writes to stdout; anything else creates (or truncates) a file.
    pub fn open(path: &Path) -> Result<Self> {
        let out: Box<dyn Write> = if path == Path::new("-") {
            Box::new(io::stdout().lock())
        } else {
            let file = File::create(path)
                .with_context(|| format!("failed to create snapshot file {}", path.display()))?;
            Box::new(BufWriter::new(file))
        };
        Ok(Self { out })
    }

    pub fn write(&mut self, snapshot: &FrameSnapshot) -> Result<()> {
        serde_json::to_writer(&mut self.out, snapshot).context("failed to encode snapshot")?;
        self.out
            .write_all(b"\n")
            .context("failed to write snapshot")?;
        Ok(())
    }

    pub fn finish(mut self) -> Result<()> {
        self.out.flush().context("failed to flush snapshots")
    }
}
