use scenegen_render::RenderError;

/// Startup failures. All of them are fatal; there is no partial mode.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("renderer binding failed: {0}")]
    Renderer(#[from] RenderError),
    #[error("invalid camera parameters: {0}")]
    InvalidCamera(String),
    #[error("invalid placeholder mesh: {0}")]
    InvalidPlaceholder(String),
}
