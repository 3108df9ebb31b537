/// Which family of input events the slider listens to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum InputModality {
    /// Mouse down/move/up.
    #[default]
    Pointer,
    /// Touch start/move/end.
    Touch,
}

const TOUCH_AGENTS: [&str; 7] = [
    "android",
    "webos",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "windows phone",
];

impl InputModality {
    /// Classifies a user-agent string; handheld platforms get touch input.
    pub fn from_user_agent(user_agent: &str) -> Self {
        let lowered = user_agent.to_ascii_lowercase();
        if TOUCH_AGENTS.iter().any(|agent| lowered.contains(agent)) {
            InputModality::Touch
        } else {
            InputModality::Pointer
        }
    }
}

/// Viewport dimensions plus input modality. Written only on resize.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub modality: InputModality,
}

impl Viewport {
    pub fn new(width: f64, height: f64, modality: InputModality) -> Self {
        Self {
            width,
            height,
            modality,
        }
    }

    pub fn is_touch_device(&self) -> bool {
        self.modality == InputModality::Touch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_handheld_agents() {
        let iphone = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)";
        let desktop = "Mozilla/5.0 (X11; Linux x86_64) Gecko/20100101 Firefox/128.0";
        assert_eq!(InputModality::from_user_agent(iphone), InputModality::Touch);
        assert_eq!(
            InputModality::from_user_agent("Opera/9.80 (Windows Phone; Opera Mobi)"),
            InputModality::Touch
        );
        assert_eq!(InputModality::from_user_agent(desktop), InputModality::Pointer);
    }

    #[test]
    fn touch_flag_follows_modality() {
        assert!(Viewport::new(390.0, 844.0, InputModality::Touch).is_touch_device());
        assert!(!Viewport::new(1440.0, 900.0, InputModality::Pointer).is_touch_device());
    }
}
