//! [`DrawSurface`] on top of wgpu.
//!
//! `clear` and `fill_rect` only touch CPU-side state. `present` acquires
//! the swapchain texture, uploads the batched quads, and records a single
//! render pass that clears to the remembered clear color and draws them.

use wgpu::util::DeviceExt;

use super::pipeline::QuadRenderer;
use super::vertex::{CameraUniform, QuadVertex, push_quad};
use super::{DrawSurface, INITIAL_DRAW_COLOR, Rect};
use crate::components::Color;
use crate::render::GpuContext;

pub struct GpuSurface {
    gpu: GpuContext,
    renderer: QuadRenderer,
    /// Coordinate space of `fill_rect`, independent of the physical
    /// surface size (HiDPI, resized windows).
    logical_size: (u32, u32),
    draw_color: Color,
    clear_color: Color,
    vertices: Vec<QuadVertex>,
    indices: Vec<u32>,
}

impl GpuSurface {
    pub fn new(gpu: GpuContext, logical_width: u32, logical_height: u32) -> Self {
        let renderer = QuadRenderer::new(&gpu);
        Self {
            gpu,
            renderer,
            logical_size: (logical_width, logical_height),
            draw_color: INITIAL_DRAW_COLOR,
            clear_color: INITIAL_DRAW_COLOR,
            vertices: Vec::new(),
            indices: Vec::new(),
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.gpu.resize(width, height);
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let gpu = &self.gpu;
        let output = gpu.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let (w, h) = self.logical_size;
        gpu.queue.write_buffer(
            &self.renderer.camera_buffer,
            0,
            bytemuck::cast_slice(&[CameraUniform::screen(w as f32, h as f32)]),
        );

        let buffers = (!self.indices.is_empty()).then(|| {
            let vb = gpu.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("quad vertex buffer"),
                contents: bytemuck::cast_slice(&self.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
            let ib = gpu.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("quad index buffer"),
                contents: bytemuck::cast_slice(&self.indices),
                usage: wgpu::BufferUsages::INDEX,
            });
            (vb, ib)
        });

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("confetti frame encoder"),
            });

        let [r, g, b, a] = self.clear_color.to_array();
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("quad render pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: a as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if let Some((vb, ib)) = &buffers {
                pass.set_pipeline(&self.renderer.pipeline);
                pass.set_bind_group(0, &self.renderer.camera_bind_group, &[]);
                pass.set_vertex_buffer(0, vb.slice(..));
                pass.set_index_buffer(ib.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..self.indices.len() as u32, 0, 0..1);
            }
        }

        gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

impl DrawSurface for GpuSurface {
    fn clear(&mut self) {
        self.clear_color = self.draw_color;
        self.vertices.clear();
        self.indices.clear();
    }

    fn set_draw_color(&mut self, color: Color) {
        self.draw_color = color;
    }

    fn fill_rect(&mut self, rect: Rect) {
        let (min, max) = rect.corners();
        push_quad(
            &mut self.vertices,
            &mut self.indices,
            min,
            max,
            self.draw_color.to_array(),
        );
    }

    fn present(&mut self) {
        match self.render() {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let (w, h) = self.gpu.surface_size();
                self.gpu.resize(w, h);
            }
            Err(e) => log::warn!("frame dropped: {e}"),
        }
        self.vertices.clear();
        self.indices.clear();
    }
}
