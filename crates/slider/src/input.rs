use crate::geometry::{Point, Rect};
use crate::motion::{DragState, MotionState};
use crate::viewport::InputModality;

/// Wheel delta to scroll distance.
pub const WHEEL_FACTOR: f64 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerDevice {
    Mouse,
    Touch,
}

/// Position payload of a pointer or touch event.
#[derive(Clone, Debug, PartialEq)]
pub struct PointerSample {
    pub device: PointerDevice,
    pub client: Point,
    /// Touches that changed in this event; the first one wins over `client`.
    pub changed_touches: Vec<Point>,
}

impl PointerSample {
    pub fn mouse(x: f64, y: f64) -> Self {
        Self {
            device: PointerDevice::Mouse,
            client: Point::new(x, y),
            changed_touches: Vec::new(),
        }
    }

    pub fn touch(x: f64, y: f64) -> Self {
        Self {
            device: PointerDevice::Touch,
            client: Point::default(),
            changed_touches: vec![Point::new(x, y)],
        }
    }

    pub fn position(&self) -> Point {
        self.changed_touches.first().copied().unwrap_or(self.client)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    Down(PointerSample),
    Move {
        sample: PointerSample,
        cancelable: bool,
    },
    Up(PointerSample),
    Wheel {
        delta_y: f64,
    },
}

/// What the host should do with the native event after dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Disposition {
    /// Not for the slider.
    Ignored,
    /// Consumed; default browser handling may still run.
    Handled,
    /// Horizontal drag claimed; the host must stop default handling and
    /// propagation so the page does not scroll.
    Claimed,
}

/// Turns pointer, touch, and wheel events into scroll target updates.
#[derive(Clone, Debug, PartialEq)]
pub struct InputAdapter {
    modality: InputModality,
    drag_area: Option<Rect>,
}

impl InputAdapter {
    pub fn new(modality: InputModality) -> Self {
        Self {
            modality,
            drag_area: None,
        }
    }

    /// Restricts drag starts to `area`; `None` accepts the whole viewport.
    pub fn set_drag_area(&mut self, area: Option<Rect>) {
        self.drag_area = area;
    }

    pub fn drag_area(&self) -> Option<Rect> {
        self.drag_area
    }

    pub fn set_modality(&mut self, modality: InputModality) {
        self.modality = modality;
    }

    pub fn modality(&self) -> InputModality {
        self.modality
    }

    fn listens_to(&self, device: PointerDevice) -> bool {
        matches!(
            (self.modality, device),
            (InputModality::Pointer, PointerDevice::Mouse)
                | (InputModality::Touch, PointerDevice::Touch)
        )
    }

    pub fn handle(&self, event: &InputEvent, motion: &mut MotionState, speed: f64) -> Disposition {
        match event {
            InputEvent::Down(sample) => self.on_down(sample, motion),
            InputEvent::Move { sample, cancelable } => {
                self.on_move(sample, *cancelable, motion, speed)
            }
            InputEvent::Up(sample) => self.on_up(sample, motion),
            InputEvent::Wheel { delta_y } => {
                motion.nudge_target(delta_y * WHEEL_FACTOR);
                Disposition::Handled
            }
        }
    }

    fn on_down(&self, sample: &PointerSample, motion: &mut MotionState) -> Disposition {
        if !self.listens_to(sample.device) {
            return Disposition::Ignored;
        }
        let position = sample.position();
        if let Some(area) = self.drag_area {
            if !area.contains(position) {
                return Disposition::Ignored;
            }
        }
        motion.begin_drag(position);
        Disposition::Handled
    }

    fn on_move(
        &self,
        sample: &PointerSample,
        cancelable: bool,
        motion: &mut MotionState,
        speed: f64,
    ) -> Disposition {
        if !self.listens_to(sample.device) {
            return Disposition::Ignored;
        }
        let DragState::Dragging { anchor } = motion.drag() else {
            return Disposition::Ignored;
        };

        let position = sample.position();
        let move_x = position.x - anchor.x;
        let move_y = position.y - anchor.y;
        if move_x.abs() <= move_y.abs() {
            return Disposition::Ignored;
        }

        motion.set_target(motion.drag_offset() + move_x * speed);
        if cancelable {
            Disposition::Claimed
        } else {
            Disposition::Handled
        }
    }

    fn on_up(&self, sample: &PointerSample, motion: &mut MotionState) -> Disposition {
        if !self.listens_to(sample.device) {
            return Disposition::Ignored;
        }
        let was_dragging = motion.is_dragging();
        motion.end_drag();
        if was_dragging {
            Disposition::Handled
        } else {
            Disposition::Ignored
        }
    }
}
