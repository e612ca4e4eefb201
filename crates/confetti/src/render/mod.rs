//! Rendering subsystem: wgpu setup shared by the 2D draw path.

pub mod gpu;

pub use gpu::GpuContext;
