use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;

use anyhow::{anyhow, Context, Result};
use crossbeam_channel::{Receiver, Sender};
use image::RgbaImage;

use crate::scene::PlaneHandle;

/// Dimensions of the stand-in texture bound while a slide image loads.
pub const PLACEHOLDER_SIZE: (u32, u32) = (800, 600);
/// Fill colour of the stand-in texture (`#555555`).
pub const PLACEHOLDER_COLOR: [u8; 4] = [0x55, 0x55, 0x55, 0xff];

/// Texture bound to a plane's `uTexture` sampler.
#[derive(Clone, Debug)]
pub enum Texture {
    /// Solid colour; backends materialise it on upload.
    Placeholder {
        width: u32,
        height: u32,
        color: [u8; 4],
    },
    Image(Arc<RgbaImage>),
}

impl Texture {
    pub fn placeholder() -> Self {
        Texture::Placeholder {
            width: PLACEHOLDER_SIZE.0,
            height: PLACEHOLDER_SIZE.1,
            color: PLACEHOLDER_COLOR,
        }
    }

    pub fn width(&self) -> u32 {
        match self {
            Texture::Placeholder { width, .. } => *width,
            Texture::Image(image) => image.width(),
        }
    }

    pub fn height(&self) -> u32 {
        match self {
            Texture::Placeholder { height, .. } => *height,
            Texture::Image(image) => image.height(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Texture::Placeholder { .. })
    }
}

/// Outcome of an asynchronous texture decode.
#[derive(Clone, Debug)]
pub enum TextureLoad {
    Loaded(Texture),
    Failed(String),
}

/// Completion message delivered by [`TextureLoader::poll`], one per plane.
#[derive(Clone, Debug)]
pub struct TextureEvent {
    pub plane: PlaneHandle,
    pub source: PathBuf,
    pub result: TextureLoad,
}

struct Decoded {
    source: PathBuf,
    result: TextureLoad,
}

/// Decodes slide images on a single background worker and hands the results
/// back to the frame loop without blocking it. Planes that share a source
/// path while it is in flight share one decode.
pub struct TextureLoader {
    requests: Option<Sender<PathBuf>>,
    completed_tx: Sender<Decoded>,
    completed: Receiver<Decoded>,
    waiting: HashMap<PathBuf, Vec<PlaneHandle>>,
}

impl TextureLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&mut self, plane: PlaneHandle, source: impl Into<PathBuf>) {
        let source = source.into();
        if let Some(planes) = self.waiting.get_mut(&source) {
            planes.push(plane);
            return;
        }
        self.waiting.insert(source.clone(), vec![plane]);

        if let Err(err) = self.dispatch(source.clone()) {
            tracing::warn!(error = %err, path = %source.display(), "texture worker unavailable");
            let _ = self.completed_tx.send(Decoded {
                source,
                result: TextureLoad::Failed(format!("{err:#}")),
            });
        }
    }

    /// Drains every completed decode without waiting, fanned out to the
    /// planes that asked for it.
    pub fn poll(&mut self) -> Vec<TextureEvent> {
        let decoded: Vec<_> = self.completed.try_iter().collect();
        let mut events = Vec::new();
        for done in decoded {
            self.fan_out(done, &mut events);
        }
        events
    }

    /// Planes still waiting on a decode.
    pub fn pending(&self) -> usize {
        self.waiting.values().map(Vec::len).sum()
    }

    fn dispatch(&mut self, source: PathBuf) -> Result<()> {
        if self.requests.is_none() {
            self.requests = Some(spawn_worker(self.completed_tx.clone())?);
        }
        if let Some(requests) = &self.requests {
            if requests.send(source).is_err() {
                self.requests = None;
                return Err(anyhow!("texture worker exited"));
            }
        }
        Ok(())
    }

    fn fan_out(&mut self, done: Decoded, events: &mut Vec<TextureEvent>) {
        let planes = self.waiting.remove(&done.source).unwrap_or_default();
        events.extend(planes.into_iter().map(|plane| TextureEvent {
            plane,
            source: done.source.clone(),
            result: done.result.clone(),
        }));
    }
}

impl Default for TextureLoader {
    fn default() -> Self {
        let (completed_tx, completed) = crossbeam_channel::unbounded();
        Self {
            requests: None,
            completed_tx,
            completed,
            waiting: HashMap::new(),
        }
    }
}

/// Starts the decode worker. It exits once the loader drops its request
/// sender.
fn spawn_worker(completed: Sender<Decoded>) -> Result<Sender<PathBuf>> {
    let (sender, receiver) = crossbeam_channel::unbounded::<PathBuf>();
    thread::Builder::new()
        .name("texture-decode".into())
        .spawn(move || {
            for source in receiver {
                let result = match decode(&source) {
                    Ok(texture) => TextureLoad::Loaded(texture),
                    Err(err) => TextureLoad::Failed(format!("{err:#}")),
                };
                if completed.send(Decoded { source, result }).is_err() {
                    break;
                }
            }
        })
        .map_err(|err| anyhow!("failed to spawn texture worker: {err}"))?;
    Ok(sender)
}

fn decode(path: &Path) -> Result<Texture> {
    let image = image::open(path)
        .with_context(|| format!("failed to decode texture {}", path.display()))?;
    Ok(Texture::Image(Arc::new(image.to_rgba8())))
}
