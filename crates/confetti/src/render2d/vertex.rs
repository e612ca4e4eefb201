//! # Vertex Layout
//!
//! Every filled rectangle becomes four [`QuadVertex`] corners and six
//! indices. Positions are window pixels; the shader maps them to clip space
//! through the [`CameraUniform`] orthographic matrix.
//!
//! ```text
//! QuadVertex (24 bytes)
//! ┌────────────────┬────────────────────────┐
//! │ position       │ color                  │
//! │ [f32; 2]       │ [f32; 4]               │
//! │ offset 0       │ offset 8               │
//! │ location(0)    │ location(1)            │
//! └────────────────┴────────────────────────┘
//! ```

use bytemuck::{Pod, Zeroable};

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub(crate) struct QuadVertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl QuadVertex {
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<QuadVertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x2,
            },
            wgpu::VertexAttribute {
                offset: 8,
                shader_location: 1,
                format: wgpu::VertexFormat::Float32x4,
            },
        ],
    };
}

/// Pixel-to-clip-space matrix, uploaded once per frame.
#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
pub(crate) struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    /// Top-left origin, y growing downward, `width x height` pixels visible.
    pub fn screen(width: f32, height: f32) -> Self {
        let proj = glam::Mat4::orthographic_rh(0.0, width, height, 0.0, -1.0, 1.0);
        Self {
            view_proj: proj.to_cols_array_2d(),
        }
    }
}

/// Append the corners and indices of an axis-aligned rectangle.
pub(crate) fn push_quad(
    vertices: &mut Vec<QuadVertex>,
    indices: &mut Vec<u32>,
    min: [f32; 2],
    max: [f32; 2],
    color: [f32; 4],
) {
    let base = vertices.len() as u32;
    vertices.extend_from_slice(&[
        QuadVertex { position: [min[0], min[1]], color },
        QuadVertex { position: [max[0], min[1]], color },
        QuadVertex { position: [max[0], max[1]], color },
        QuadVertex { position: [min[0], max[1]], color },
    ]);
    indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
}
