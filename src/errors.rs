//! Error Types
//!
//! This module defines the error types used throughout the crate.
//!
//! # Overview
//!
//! The main error type [`Error`] covers every failure mode the mascot can hit:
//! - Window and event loop failures
//! - GPU initialization failures
//! - Model loading and decoding errors
//!
//! Animation itself never fails: a missing node is skipped, an unknown key is
//! ignored. Only the outer layers (platform, GPU, assets) return errors.
//!
//! # Usage
//!
//! All fallible public APIs return [`Result<T>`], an alias for
//! `std::result::Result<T, Error>`.
//!
//! ```rust,ignore
//! use mascot::errors::Result;
//!
//! fn load_model() -> Result<()> {
//!     // Operations that may fail return Result
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Top-level error for the mascot crate.
#[derive(Error, Debug)]
pub enum Error {
    /// Window system or event loop error.
    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),

    /// GPU adapter, device or surface error.
    #[error("GPU error: {0}")]
    Gpu(#[from] GpuError),

    /// Asset loading error.
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),
}

/// Errors raised while talking to the windowing system.
#[derive(Error, Debug)]
pub enum PlatformError {
    /// Event loop creation or execution failed.
    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    /// The OS refused to create a window.
    #[error("Window creation failed: {0}")]
    WindowCreation(#[from] winit::error::OsError),
}

/// Errors raised while bringing up the GPU.
#[derive(Error, Debug)]
pub enum GpuError {
    /// Failed to create a presentable surface for the window.
    #[error("Failed to create surface: {0}")]
    SurfaceCreation(#[from] wgpu::CreateSurfaceError),

    /// No compatible adapter was found.
    #[error("Failed to request adapter: {0}")]
    AdapterRequest(#[from] wgpu::RequestAdapterError),

    /// Failed to create the logical device.
    #[error("Failed to create device: {0}")]
    DeviceRequest(#[from] wgpu::RequestDeviceError),

    /// The surface cannot be presented with the selected adapter.
    #[error("Surface is not supported by the selected adapter")]
    SurfaceUnsupported,
}

/// Errors raised while reading or decoding model files.
#[derive(Error, Debug)]
pub enum AssetError {
    /// File I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// glTF parsing or buffer resolution error.
    #[error("glTF error: {0}")]
    Gltf(#[from] gltf::Error),

    /// The file parsed but does not contain what we need.
    #[error("Invalid model data: {0}")]
    InvalidData(String),

    /// The background loader went away before delivering a result.
    #[error("Loader disconnected: {0}")]
    Disconnected(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Asset(AssetError::Io(err))
    }
}

impl From<gltf::Error> for Error {
    fn from(err: gltf::Error) -> Self {
        Error::Asset(AssetError::Gltf(err))
    }
}

impl From<winit::error::EventLoopError> for Error {
    fn from(err: winit::error::EventLoopError) -> Self {
        Error::Platform(PlatformError::EventLoop(err))
    }
}

impl From<winit::error::OsError> for Error {
    fn from(err: winit::error::OsError) -> Self {
        Error::Platform(PlatformError::WindowCreation(err))
    }
}

impl From<wgpu::CreateSurfaceError> for Error {
    fn from(err: wgpu::CreateSurfaceError) -> Self {
        Error::Gpu(GpuError::SurfaceCreation(err))
    }
}

impl From<wgpu::RequestAdapterError> for Error {
    fn from(err: wgpu::RequestAdapterError) -> Self {
        Error::Gpu(GpuError::AdapterRequest(err))
    }
}

impl From<wgpu::RequestDeviceError> for Error {
    fn from(err: wgpu::RequestDeviceError) -> Self {
        Error::Gpu(GpuError::DeviceRequest(err))
    }
}

/// Alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
