// Failure taxonomy for controller initialization.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EffectError {
    /// WebGPU is not exposed by the host; the plain image stays on the page.
    #[error("GPU rendering is not available")]
    GpuUnavailable,

    #[error("element is not an <img>")]
    NotAnImage,

    #[error("no window/document in this context")]
    NoWindow,

    #[error("image has no `{selector}` ancestor")]
    MissingContainer { selector: &'static str },

    #[error("image has a zero-sized box ({width}x{height})")]
    ZeroSize { width: f64, height: f64 },

    #[error("image failed to load: {0}")]
    ImageLoad(String),

    #[error("texture failed to load: {0}")]
    TextureLoad(String),

    #[error("DOM operation failed: {0}")]
    Dom(String),

    #[error("renderer error: {0:#}")]
    Renderer(#[from] anyhow::Error),

    /// Teardown ran while an asynchronous step was pending.
    #[error("effect was destroyed during initialization")]
    Cancelled,
}

/// How a failure is reported and whether teardown is required.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureClass {
    CapabilityMissing,
    Precondition,
    ResourceLoad,
    Internal,
    Cancelled,
}

impl EffectError {
    pub fn class(&self) -> FailureClass {
        match self {
            EffectError::GpuUnavailable => FailureClass::CapabilityMissing,
            EffectError::NotAnImage
            | EffectError::MissingContainer { .. }
            | EffectError::ZeroSize { .. } => FailureClass::Precondition,
            EffectError::ImageLoad(_) | EffectError::TextureLoad(_) => FailureClass::ResourceLoad,
            EffectError::NoWindow | EffectError::Dom(_) | EffectError::Renderer(_) => {
                FailureClass::Internal
            }
            EffectError::Cancelled => FailureClass::Cancelled,
        }
    }

    /// Whether the partially built instance must be torn down.
    ///
    /// Capability misses happen before anything is touched and cancellation
    /// means teardown already ran.
    pub fn needs_teardown(&self) -> bool {
        !matches!(
            self.class(),
            FailureClass::CapabilityMissing | FailureClass::Cancelled
        )
    }
}

/// Stringify a JS exception value for one of the message-carrying variants.
pub fn describe_js(value: &impl std::fmt::Debug) -> String {
    format!("{value:?}")
}
