/// Failures creating or drawing to a drawing surface.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to create drawing surface: {0}")]
    CreateSurface(String),
    #[error("no compatible graphics adapter found")]
    NoAdapter,
    #[error("failed to create graphics device: {0}")]
    RequestDevice(String),
    #[error("surface reports no supported texture formats")]
    NoSurfaceFormat,
    #[error("failed to acquire frame: {0}")]
    AcquireFrame(String),
    #[error("graphics device is out of memory")]
    OutOfMemory,
}
