use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use slider::{InputEvent, PointerSample, Viewport};

/// One scripted host event, fired just before frame `frame` renders.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ScriptEvent {
    pub frame: u64,
    #[serde(flatten)]
    pub action: ScriptAction,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptAction {
    Down {
        x: f64,
        y: f64,
        #[serde(default)]
        touch: bool,
    },
    Move {
        x: f64,
        y: f64,
        #[serde(default)]
        touch: bool,
        #[serde(default = "default_cancelable")]
        cancelable: bool,
    },
    Up {
        x: f64,
        y: f64,
        #[serde(default)]
        touch: bool,
    },
    Wheel {
        delta_y: f64,
    },
    Resize {
        width: u32,
        height: u32,
    },
    Set {
        key: String,
        value: serde_json::Value,
    },
}

fn default_cancelable() -> bool {
    true
}

fn sample(x: f64, y: f64, touch: bool) -> PointerSample {
    if touch {
        PointerSample::touch(x, y)
    } else {
        PointerSample::mouse(x, y)
    }
}

impl ScriptAction {
    /// The slider input this action stands for, if it is one.
    pub fn input_event(&self) -> Option<InputEvent> {
        match *self {
            ScriptAction::Down { x, y, touch } => Some(InputEvent::Down(sample(x, y, touch))),
            ScriptAction::Move {
                x,
                y,
                touch,
                cancelable,
            } => Some(InputEvent::Move {
                sample: sample(x, y, touch),
                cancelable,
            }),
            ScriptAction::Up { x, y, touch } => Some(InputEvent::Up(sample(x, y, touch))),
            ScriptAction::Wheel { delta_y } => Some(InputEvent::Wheel { delta_y }),
            ScriptAction::Resize { .. } | ScriptAction::Set { .. } => None,
        }
    }
}

/// Events ordered by frame, replayed through [`Script::due`].
#[derive(Debug, Clone, Default)]
pub struct Script {
    events: Vec<ScriptEvent>,
    cursor: usize,
}

impl Script {
    pub fn new(mut events: Vec<ScriptEvent>) -> Self {
        events.sort_by_key(|event| event.frame);
        Self { events, cursor: 0 }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read script {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("invalid script {}", path.display()))
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let events: Vec<ScriptEvent> =
            serde_json::from_str(raw).context("expected a JSON array of events")?;
        for event in &events {
            if let ScriptAction::Resize { width, height } = event.action {
                if width == 0 || height == 0 {
                    bail!(
                        "resize at frame {} must be non-zero, got {width}x{height}",
                        event.frame
                    );
                }
            }
        }
        Ok(Self::new(events))
    }

    /// A drag across 40% of the viewport, a wheel flick forward, then one
    /// back toward the start.
    pub fn demo(viewport: &Viewport) -> Self {
        let touch = viewport.is_touch_device();
        let y = viewport.height / 2.0;
        let start_x = viewport.width * 0.7;
        let travel = viewport.width * 0.4;
        let steps = 30u64;

        let mut events = vec![ScriptEvent {
            frame: 10,
            action: ScriptAction::Down {
                x: start_x,
                y,
                touch,
            },
        }];
        for step in 1..=steps {
            events.push(ScriptEvent {
                frame: 10 + step,
                action: ScriptAction::Move {
                    x: start_x - travel * step as f64 / steps as f64,
                    y,
                    touch,
                    cancelable: true,
                },
            });
        }
        events.push(ScriptEvent {
            frame: 11 + steps,
            action: ScriptAction::Up {
                x: start_x - travel,
                y,
                touch,
            },
        });
        events.push(ScriptEvent {
            frame: 200,
            action: ScriptAction::Wheel { delta_y: 600.0 },
        });
        events.push(ScriptEvent {
            frame: 320,
            action: ScriptAction::Wheel { delta_y: -900.0 },
        });
        Self::new(events)
    }

    /// Actions scheduled at or before `frame` that have not fired yet.
    pub fn due(&mut self, frame: u64) -> Vec<ScriptAction> {
        let start = self.cursor;
        while self
            .events
            .get(self.cursor)
            .is_some_and(|event| event.frame <= frame)
        {
            self.cursor += 1;
        }
        self.events[start..self.cursor]
            .iter()
            .map(|event| event.action.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

/// Renders a `set` value the way `--set key=value` would spell it.
pub fn value_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slider::InputModality;

    #[test]
    fn parses_tagged_events_and_sorts_by_frame() {
        let raw = r#"[
            {"frame": 5, "type": "wheel", "delta_y": -120},
            {"frame": 1, "type": "down", "x": 10, "y": 20},
            {"frame": 2, "type": "move", "x": 5, "y": 20, "touch": true, "cancelable": false},
            {"frame": 3, "type": "up", "x": 5, "y": 20},
            {"frame": 4, "type": "resize", "width": 800, "height": 600},
            {"frame": 6, "type": "set", "key": "ease", "value": 0.2}
        ]"#;
        let mut script = Script::from_json(raw).unwrap();
        assert_eq!(script.len(), 6);

        assert_eq!(
            script.due(1),
            vec![ScriptAction::Down {
                x: 10.0,
                y: 20.0,
                touch: false
            }]
        );
        let moves = script.due(2);
        assert_eq!(
            moves[0],
            ScriptAction::Move {
                x: 5.0,
                y: 20.0,
                touch: true,
                cancelable: false
            }
        );
        let rest = script.due(100);
        assert_eq!(rest.len(), 4);
        assert_eq!(
            rest[1],
            ScriptAction::Resize {
                width: 800,
                height: 600
            }
        );
        assert!(script.due(200).is_empty());
    }

    #[test]
    fn move_defaults_to_cancelable() {
        let script = Script::from_json(r#"[{"frame": 0, "type": "move", "x": 1, "y": 2}]"#)
            .unwrap();
        assert!(matches!(
            script.events[0].action,
            ScriptAction::Move {
                cancelable: true,
                touch: false,
                ..
            }
        ));
    }

    #[test]
    fn rejects_unknown_event_types() {
        assert!(Script::from_json(r#"[{"frame": 0, "type": "pinch"}]"#).is_err());
        assert!(Script::from_json(r#"{"frame": 0}"#).is_err());
    }

    #[test]
    fn rejects_zero_sized_resize() {
        let err = Script::from_json(r#"[{"frame": 3, "type": "resize", "width": 0, "height": 400}]"#)
            .unwrap_err();
        assert!(err.to_string().contains("frame 3"), "{err}");
        assert!(
            Script::from_json(r#"[{"frame": 0, "type": "resize", "width": 640, "height": 0}]"#)
                .is_err()
        );
    }

    #[test]
    fn input_events_follow_device_flag() {
        let touch = ScriptAction::Down {
            x: 3.0,
            y: 4.0,
            touch: true,
        };
        assert_eq!(
            touch.input_event(),
            Some(InputEvent::Down(PointerSample::touch(3.0, 4.0)))
        );
        assert_eq!(
            ScriptAction::Wheel { delta_y: 9.0 }.input_event(),
            Some(InputEvent::Wheel { delta_y: 9.0 })
        );
        assert!(ScriptAction::Resize {
            width: 1,
            height: 1
        }
        .input_event()
        .is_none());
    }

    #[test]
    fn demo_gesture_is_a_complete_drag() {
        let viewport = Viewport::new(1000.0, 800.0, InputModality::Touch);
        let mut script = Script::demo(&viewport);
        let drag = script.due(41);
        assert!(matches!(drag.first(), Some(ScriptAction::Down { touch: true, .. })));
        assert!(matches!(drag.last(), Some(ScriptAction::Up { x, .. }) if *x == 300.0));
        assert_eq!(drag.len(), 32);
    }

    #[test]
    fn set_values_render_as_override_text() {
        assert_eq!(value_text(&serde_json::json!(0.2)), "0.2");
        assert_eq!(value_text(&serde_json::json!("3")), "3");
    }
}
