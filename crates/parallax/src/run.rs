use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Instant;

use anyhow::{Context, Result};
use renderer::{NullRenderer, Renderer, Scene, TraceRenderer};
use slider::{InputModality, Slider, SliderContext, Viewport};
use sliderconfig::DeckConfig;
use tracing_subscriber::EnvFilter;

use crate::cli::RunArgs;
use crate::layout::{drag_area, layout_slides};
use crate::paths::AppPaths;
use crate::report::{FrameSnapshot, SnapshotWriter};
use crate::script::{value_text, Script, ScriptAction};

pub fn initialise_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads the deck from `explicit`, else the discovered `slider.toml`, else
/// the built-in defaults. Relative image paths resolve against the file.
pub fn load_deck(explicit: Option<&Path>, paths: &AppPaths) -> Result<(DeckConfig, Option<PathBuf>)> {
    let candidate = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let discovered = paths.config_file();
            discovered.is_file().then_some(discovered)
        }
    };
    let Some(path) = candidate else {
        tracing::debug!(
            config_dir = %paths.config_dir().display(),
            "no slider config found; using built-in deck"
        );
        return Ok((DeckConfig::default(), None));
    };

    let raw = fs::read_to_string(&path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let mut deck = DeckConfig::from_toml_str(&raw)
        .with_context(|| format!("invalid config {}", path.display()))?;
    if let Some(base) = path.parent() {
        for slide in &mut deck.slides {
            if let Some(image) = slide.image.as_mut() {
                if image.is_relative() {
                    *image = base.join(&*image);
                }
            }
        }
    }
    Ok((deck, Some(path)))
}

pub fn resolve_modality(args: &RunArgs) -> InputModality {
    if args.touch {
        return InputModality::Touch;
    }
    args.user_agent
        .as_deref()
        .map(InputModality::from_user_agent)
        .unwrap_or_default()
}

pub fn run(args: RunArgs) -> Result<()> {
    let paths = AppPaths::discover()?;
    let (mut deck, source) = load_deck(args.config.as_deref(), &paths)?;
    let applied = deck.slider.apply_overrides(&args.overrides);
    tracing::debug!(
        source = ?source,
        overrides = applied,
        config = ?deck.slider,
        "resolved slider configuration"
    );

    let (width, height) = args.viewport;
    let viewport = Viewport::new(width as f64, height as f64, resolve_modality(&args));
    let slides = deck.expanded_slides();
    let layout = layout_slides(&viewport, &deck.layout, slides.len());

    let mut scene = Scene::new();
    let mut renderer: Box<dyn Renderer> = if tracing::enabled!(tracing::Level::TRACE) {
        Box::new(TraceRenderer::new(viewport.width, viewport.height))
    } else {
        Box::new(NullRenderer)
    };
    let context = SliderContext {
        viewport,
        config: deck.slider,
    };
    let mut slider =
        Slider::new(context, &layout, &slides, &mut scene).context("failed to set up slider")?;
    slider.set_drag_area(Some(drag_area(&viewport, &layout)));

    let mut script = match args.script.as_deref() {
        Some(path) => Script::load(path)?,
        None => Script::demo(&viewport),
    };
    let mut writer = args
        .snapshot
        .as_deref()
        .map(SnapshotWriter::open)
        .transpose()?;

    tracing::info!(
        slides = slides.len(),
        width,
        height,
        touch = viewport.is_touch_device(),
        frames = args.frames,
        events = script.len(),
        "starting parallax slider"
    );

    let frame_interval = deck.runtime.frame_interval;
    for frame in 0..args.frames {
        let started = Instant::now();
        for action in script.due(frame) {
            apply_action(action, &mut slider, &deck, &mut scene, renderer.as_mut())?;
        }

        slider.render(&mut scene);
        if let Err(err) = renderer.render_frame(&scene) {
            tracing::warn!(frame, error = %err, "render failed; continuing");
        }

        if let Some(writer) = writer.as_mut() {
            if frame % args.every == 0 || frame + 1 == args.frames {
                writer.write(&FrameSnapshot::capture(frame, &slider, &scene))?;
            }
        }

        if args.realtime {
            if let Some(remaining) = frame_interval.checked_sub(started.elapsed()) {
                thread::sleep(remaining);
            }
        }
    }

    if let Some(writer) = writer {
        writer.finish()?;
    }

    let motion = slider.motion();
    tracing::info!(
        scroll_target = motion.target(),
        current = motion.current(),
        progress = motion.progress(),
        "run finished"
    );
    slider.destroy(&mut scene);
    Ok(())
}

fn apply_action(
    action: ScriptAction,
    slider: &mut Slider,
    deck: &DeckConfig,
    scene: &mut Scene,
    renderer: &mut dyn Renderer,
) -> Result<()> {
    if let Some(event) = action.input_event() {
        let disposition = slider.handle_input(&event);
        tracing::trace!(?event, ?disposition, "input dispatched");
        return Ok(());
    }

    match action {
        ScriptAction::Resize { width, height } => {
            let viewport = Viewport::new(width as f64, height as f64, slider.viewport().modality);
            let layout = layout_slides(&viewport, &deck.layout, slider.items().len());
            slider
                .resize(viewport, &layout, scene)
                .context("failed to resize slider")?;
            slider.set_drag_area(Some(drag_area(&viewport, &layout)));
            renderer.resize(viewport.width, viewport.height);
        }
        ScriptAction::Set { key, value } => {
            let mut config = *slider.config();
            let text = value_text(&value);
            match config.set(&key, &text) {
                Ok(()) => {
                    slider.set_config(config)?;
                    tracing::debug!(key = %key, value = %text, "slider config updated");
                }
                Err(err) => tracing::warn!(error = %err, "ignoring scripted config change"),
            }
        }
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    use crate::cli::Cli;

    fn args(extra: &[&str]) -> RunArgs {
        let mut argv = vec!["parallax"];
        argv.extend_from_slice(extra);
        Cli::try_parse_from(argv).unwrap().run
    }

    #[test]
    fn modality_prefers_touch_flag_then_user_agent() {
        assert_eq!(resolve_modality(&args(&["--touch"])), InputModality::Touch);
        assert_eq!(
            resolve_modality(&args(&["--user-agent", "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0)"])),
            InputModality::Touch
        );
        assert_eq!(
            resolve_modality(&args(&["--user-agent", "Mozilla/5.0 (X11; Linux x86_64)"])),
            InputModality::Pointer
        );
        assert_eq!(resolve_modality(&args(&[])), InputModality::Pointer);
    }

    #[test]
    fn load_deck_resolves_images_next_to_config() {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("deck.toml");
        fs::write(
            &config,
            r#"
version = 1

[[slides]]
title = "Coast"
image = "images/coast.jpg"

[[slides]]
title = "Peak"
image = "/srv/peak.png"
"#,
        )
        .unwrap();
        let paths = AppPaths::from_dir(dir.path().join("config"));
        let (deck, source) = load_deck(Some(&config), &paths).unwrap();
        assert_eq!(source.as_deref(), Some(config.as_path()));
        assert_eq!(
            deck.slides[0].image.as_deref(),
            Some(dir.path().join("images/coast.jpg").as_path())
        );
        assert_eq!(
            deck.slides[1].image.as_deref(),
            Some(Path::new("/srv/peak.png"))
        );
    }

    #[test]
    fn scripted_set_and_resize_reach_the_slider() {
        let deck = DeckConfig::default();
        let viewport = Viewport::new(1000.0, 800.0, InputModality::Pointer);
        let slides = deck.expanded_slides();
        let layout = layout_slides(&viewport, &deck.layout, slides.len());
        let mut scene = Scene::new();
        let context = SliderContext {
            viewport,
            config: deck.slider,
        };
        let mut slider = Slider::new(context, &layout, &slides, &mut scene).unwrap();
        slider.set_drag_area(Some(drag_area(&viewport, &layout)));
        let mut renderer = NullRenderer;

        let set = ScriptAction::Set {
            key: "rgb-shift".into(),
            value: serde_json::json!(0.4),
        };
        apply_action(set, &mut slider, &deck, &mut scene, &mut renderer).unwrap();
        assert_eq!(slider.config().rgb_shift, 0.4);

        let bad = ScriptAction::Set {
            key: "ease".into(),
            value: serde_json::json!(7),
        };
        apply_action(bad, &mut slider, &deck, &mut scene, &mut renderer).unwrap();
        assert_eq!(slider.config().ease, 0.075);

        let resize = ScriptAction::Resize {
            width: 500,
            height: 400,
        };
        apply_action(resize, &mut slider, &deck, &mut scene, &mut renderer).unwrap();
        assert_eq!(slider.viewport().width, 500.0);
        assert_eq!(slider.motion().bounds().max, -2550.0);
        let resized = slider.drag_area().unwrap();
        assert_eq!((resized.left, resized.width), (0.0, 500.0));
        assert!((resized.top - 80.0).abs() < 1e-9);
    }
}
