use std::panic::Location;

/// Fatal failures while bringing up the window and GPU context.
///
/// Every variant records where it was raised; `Display` prefixes the message
/// with `file:line:column`.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("{location}: could not create the event loop")]
    EventLoop {
        #[source]
        source: winit::error::EventLoopError,
        location: &'static Location<'static>,
    },
    #[error("{location}: could not create the window")]
    Window {
        #[source]
        source: winit::error::OsError,
        location: &'static Location<'static>,
    },
    #[error("{location}: could not create a surface for the window")]
    Surface {
        #[source]
        source: wgpu::CreateSurfaceError,
        location: &'static Location<'static>,
    },
    #[error("{location}: no GPU adapter can present to this window")]
    NoAdapter { location: &'static Location<'static> },
    #[error("{location}: could not open the GPU device")]
    Device {
        #[source]
        source: wgpu::RequestDeviceError,
        location: &'static Location<'static>,
    },
    #[error("{location}: surface reports no supported formats")]
    NoSurfaceFormat { location: &'static Location<'static> },
}

impl InitError {
    #[track_caller]
    pub fn event_loop(source: winit::error::EventLoopError) -> Self {
        Self::EventLoop {
            source,
            location: Location::caller(),
        }
    }

    #[track_caller]
    pub fn window(source: winit::error::OsError) -> Self {
        Self::Window {
            source,
            location: Location::caller(),
        }
    }

    #[track_caller]
    pub fn surface(source: wgpu::CreateSurfaceError) -> Self {
        Self::Surface {
            source,
            location: Location::caller(),
        }
    }

    #[track_caller]
    pub fn no_adapter() -> Self {
        Self::NoAdapter {
            location: Location::caller(),
        }
    }

    #[track_caller]
    pub fn device(source: wgpu::RequestDeviceError) -> Self {
        Self::Device {
            source,
            location: Location::caller(),
        }
    }

    #[track_caller]
    pub fn no_surface_format() -> Self {
        Self::NoSurfaceFormat {
            location: Location::caller(),
        }
    }
}

/// Which step of building the shader program failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    /// WGSL parsing and validation of the vertex/fragment module.
    Compile,
    /// Matching the module against the vertex layout and bind groups.
    Link,
}

#[derive(Debug, thiserror::Error)]
pub enum ShaderError {
    #[error("could not compile the shader: {0}")]
    Compile(String),
    #[error("could not link the program: {0}")]
    Link(String),
}

impl ShaderError {
    pub fn new(stage: ShaderStage, message: impl ToString) -> Self {
        match stage {
            ShaderStage::Compile => Self::Compile(message.to_string()),
            ShaderStage::Link => Self::Link(message.to_string()),
        }
    }

    pub fn stage(&self) -> ShaderStage {
        match self {
            Self::Compile(_) => ShaderStage::Compile,
            Self::Link(_) => ShaderStage::Link,
        }
    }
}
