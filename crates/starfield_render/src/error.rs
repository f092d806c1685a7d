//! Render error types

use starfield_core::AssetError;

/// Errors raised while creating or driving the GPU renderer
#[derive(Debug)]
pub enum RenderError {
    /// No adapter compatible with the window surface
    AdapterUnavailable,
    /// The adapter refused to create a device
    DeviceRequest(wgpu::RequestDeviceError),
    /// The window surface could not be created
    Surface(wgpu::CreateSurfaceError),
    /// A mesh failed to load
    Asset(AssetError),
    /// Surface was lost (window resized, minimized, etc.)
    SurfaceLost,
    /// GPU out of memory
    OutOfMemory,
    /// Other surface error
    Other(String),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::AdapterUnavailable => write!(f, "No suitable GPU adapter"),
            RenderError::DeviceRequest(e) => write!(f, "Device request failed: {}", e),
            RenderError::Surface(e) => write!(f, "Surface creation failed: {}", e),
            RenderError::Asset(e) => write!(f, "{}", e),
            RenderError::SurfaceLost => write!(f, "Surface lost"),
            RenderError::OutOfMemory => write!(f, "Out of memory"),
            RenderError::Other(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::DeviceRequest(e) => Some(e),
            RenderError::Surface(e) => Some(e),
            RenderError::Asset(e) => Some(e),
            _ => None,
        }
    }
}

impl From<AssetError> for RenderError {
    fn from(e: AssetError) -> Self {
        RenderError::Asset(e)
    }
}

impl From<wgpu::RequestDeviceError> for RenderError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        RenderError::DeviceRequest(e)
    }
}

impl From<wgpu::CreateSurfaceError> for RenderError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        RenderError::Surface(e)
    }
}

impl From<wgpu::SurfaceError> for RenderError {
    fn from(e: wgpu::SurfaceError) -> Self {
        match e {
            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => RenderError::SurfaceLost,
            wgpu::SurfaceError::OutOfMemory => RenderError::OutOfMemory,
            other => RenderError::Other(format!("{:?}", other)),
        }
    }
}
