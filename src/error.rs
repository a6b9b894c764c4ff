//! Error types for the galaxy viewer.
//!
//! Out-of-range parameters are not errors: they are clamped where they are
//! written. Everything that can actually fail is listed here.

use std::fmt;

/// The generator could not produce a point buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// Not enough memory to hold `count` points.
    Allocation { count: usize },
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationError::Allocation { count } => {
                write!(f, "Failed to allocate point buffer for {} points", count)
            }
        }
    }
}

impl std::error::Error for GenerationError {}

/// A point cloud could not be turned into GPU-resident state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceError {
    /// The vertex data exceeds the device's buffer size limit.
    TooLarge { bytes: u64, limit: u64 },
    /// The device reported an error while creating buffers.
    Device(String),
    /// The material needs blend or depth state the point pipeline lacks.
    IncompatibleMaterial,
}

impl fmt::Display for ResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceError::TooLarge { bytes, limit } => write!(
                f,
                "Point buffer of {} bytes exceeds the device limit of {} bytes",
                bytes, limit
            ),
            ResourceError::Device(msg) => {
                write!(f, "Failed to create point cloud buffers: {}", msg)
            }
            ResourceError::IncompatibleMaterial => {
                write!(f, "Point material does not match the point pipeline")
            }
        }
    }
}

impl std::error::Error for ResourceError {}

/// A regeneration was aborted. The previously attached point cloud is
/// still live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegenerationError {
    Generation(GenerationError),
    ResourceBuild(ResourceError),
}

impl fmt::Display for RegenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegenerationError::Generation(e) => write!(f, "Generation failed: {}", e),
            RegenerationError::ResourceBuild(e) => write!(f, "Resource build failed: {}", e),
        }
    }
}

impl std::error::Error for RegenerationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RegenerationError::Generation(e) => Some(e),
            RegenerationError::ResourceBuild(e) => Some(e),
        }
    }
}

impl From<GenerationError> for RegenerationError {
    fn from(e: GenerationError) -> Self {
        RegenerationError::Generation(e)
    }
}

impl From<ResourceError> for RegenerationError {
    fn from(e: ResourceError) -> Self {
        RegenerationError::ResourceBuild(e)
    }
}

/// Errors that can occur during GPU initialization.
#[derive(Debug)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    NoAdapter,
    /// The surface reports no usable texture format.
    NoSurfaceFormat,
    /// Failed to create GPU device.
    DeviceCreation(wgpu::RequestDeviceError),
}

impl fmt::Display for GpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpuError::SurfaceCreation(e) => write!(f, "Failed to create GPU surface: {}", e),
            GpuError::NoAdapter => write!(
                f,
                "No compatible GPU adapter found. Ensure your system has a GPU with WebGPU/Vulkan/Metal/DX12 support."
            ),
            GpuError::NoSurfaceFormat => {
                write!(f, "The window surface supports no texture formats")
            }
            GpuError::DeviceCreation(e) => write!(f, "Failed to create GPU device: {}", e),
        }
    }
}

impl std::error::Error for GpuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GpuError::SurfaceCreation(e) => Some(e),
            GpuError::DeviceCreation(e) => Some(e),
            _ => None,
        }
    }
}

impl From<wgpu::CreateSurfaceError> for GpuError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        GpuError::SurfaceCreation(e)
    }
}

impl From<wgpu::RequestDeviceError> for GpuError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        GpuError::DeviceCreation(e)
    }
}

/// Why a single frame was not presented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    /// The surface timed out or is outdated; try again next frame.
    Skipped,
    /// The surface was lost and has been reconfigured.
    SurfaceLost,
    /// Rendering cannot continue.
    Fatal(String),
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::Skipped => write!(f, "Frame skipped"),
            FrameError::SurfaceLost => write!(f, "Surface lost, reconfigured"),
            FrameError::Fatal(msg) => write!(f, "Fatal render error: {}", msg),
        }
    }
}

impl std::error::Error for FrameError {}

/// Errors that can occur when running the viewer.
#[derive(Debug)]
pub enum ViewerError {
    /// Failed to create event loop.
    EventLoop(winit::error::EventLoopError),
    /// Failed to create window.
    Window(winit::error::OsError),
    /// GPU initialization failed.
    Gpu(GpuError),
    /// The first galaxy could not be built.
    Regeneration(RegenerationError),
}

impl fmt::Display for ViewerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewerError::EventLoop(e) => write!(f, "Failed to create event loop: {}", e),
            ViewerError::Window(e) => write!(f, "Failed to create window: {}", e),
            ViewerError::Gpu(e) => write!(f, "GPU error: {}", e),
            ViewerError::Regeneration(e) => write!(f, "Initial galaxy failed: {}", e),
        }
    }
}

impl std::error::Error for ViewerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ViewerError::EventLoop(e) => Some(e),
            ViewerError::Window(e) => Some(e),
            ViewerError::Gpu(e) => Some(e),
            ViewerError::Regeneration(e) => Some(e),
        }
    }
}

impl From<winit::error::EventLoopError> for ViewerError {
    fn from(e: winit::error::EventLoopError) -> Self {
        ViewerError::EventLoop(e)
    }
}

impl From<winit::error::OsError> for ViewerError {
    fn from(e: winit::error::OsError) -> Self {
        ViewerError::Window(e)
    }
}

impl From<GpuError> for ViewerError {
    fn from(e: GpuError) -> Self {
        ViewerError::Gpu(e)
    }
}

impl From<RegenerationError> for ViewerError {
    fn from(e: RegenerationError) -> Self {
        ViewerError::Regeneration(e)
    }
}
