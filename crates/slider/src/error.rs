use sliderconfig::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum SliderError {
    #[error("track layout contains no slides")]
    EmptyLayout,
    #[error("layout has {found} slides but the slider was built for {expected}")]
    LayoutMismatch { expected: usize, found: usize },
    #[error(transparent)]
    Config(#[from] ConfigError),
}
