//! GPU engine: pipelines, scene buffers and the fixed viewport.

mod command;
mod input;
mod scene_sync;

pub use command::ViewCommand;

use wgpu::util::DeviceExt;

use crate::camera::controller::CameraController;
use crate::error::ViewerError;
use crate::gpu::dynamic_buffer::TypedBuffer;
use crate::gpu::pipeline_helpers::{create_scene_pipeline, uniform_buffer};
use crate::gpu::render_context::{RenderContext, RenderContextError};
use crate::gpu::shader_composer::{ShaderComposer, LINE_SHADER, MESH_SHADER};
use crate::gpu::texture::DepthTexture;
use crate::input::InputProcessor;
use crate::options::Options;
use crate::render::mesh::{LineVertex, MeshVertex};

/// Pixel rectangle the scene is drawn into, in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportRect {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Width.
    pub width: u32,
    /// Height.
    pub height: u32,
}

impl ViewportRect {
    /// The configured logical viewport at the top-left of the surface,
    /// scaled to physical pixels and clamped to the surface.
    #[must_use]
    pub fn fixed(
        logical: (u32, u32),
        scale_factor: f64,
        surface: (u32, u32),
    ) -> Self {
        let scale = |v: u32| (f64::from(v) * scale_factor).round() as u32;
        Self {
            x: 0,
            y: 0,
            width: scale(logical.0).clamp(1, surface.0.max(1)),
            height: scale(logical.1).clamp(1, surface.1.max(1)),
        }
    }

    /// Width over height.
    #[must_use]
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    /// Whether a physical-pixel point lies inside the rectangle.
    #[must_use]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x as f32
            && y >= self.y as f32
            && x < (self.x + self.width) as f32
            && y < (self.y + self.height) as f32
    }
}

/// GPU buffers for the current scene.
struct SceneBuffers {
    mesh_vertices: TypedBuffer<MeshVertex>,
    mesh_indices: TypedBuffer<u32>,
    line_vertices: TypedBuffer<LineVertex>,
}

/// The GPU renderer for one window.
///
/// # Frame loop
///
/// Each frame, call [`render_frame`](Self::render_frame) to draw and
/// present. Call [`resize`](Self::resize) when the window size changes.
/// Input is forwarded via [`handle_input`](Self::handle_input) and
/// [`handle_key`](Self::handle_key).
///
/// # Scenes
///
/// The engine implements [`Renderer`](crate::render::Renderer): every call
/// replaces the scene with freshly built geometry for the requested style
/// and frames the camera on it. A failed call leaves the current scene on
/// screen.
pub struct ViewerEngine {
    /// Core wgpu device, queue, and surface.
    pub context: RenderContext,
    /// Orbital camera controller.
    pub camera_controller: CameraController,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    mesh_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    buffers: SceneBuffers,
    depth: DepthTexture,
    /// Raw input state and gesture mapping.
    pub input: InputProcessor,
    options: Options,
    scale_factor: f64,
    viewport: ViewportRect,
}

impl ViewerEngine {
    /// Initialize the GPU, pipelines and an empty scene.
    ///
    /// `size` is the surface size in physical pixels.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Gpu`] if GPU initialization or shader
    /// composition fails.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
        scale_factor: f64,
        options: Options,
    ) -> Result<Self, ViewerError> {
        let context = RenderContext::new(window, size).await?;
        Self::new_from_context(context, scale_factor, options)
    }

    /// Build the engine on an existing render context.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Gpu`] if shader composition fails.
    pub fn new_from_context(
        context: RenderContext,
        scale_factor: f64,
        options: Options,
    ) -> Result<Self, ViewerError> {
        let device = &context.device;
        let viewport = ViewportRect::fixed(
            (options.viewport.width, options.viewport.height),
            scale_factor,
            context.size(),
        );

        let camera_controller =
            CameraController::new(&options.camera, viewport.aspect());
        let camera_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Camera Buffer"),
                contents: bytemuck::cast_slice(&[camera_controller.uniform]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });
        let camera_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
                entries: &[uniform_buffer(0)],
            });
        let camera_bind_group =
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Camera Bind Group"),
                layout: &camera_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: camera_buffer.as_entire_binding(),
                }],
            });

        let shader_error =
            |e: Box<naga_oil::compose::ComposerError>| {
                RenderContextError::Shader(e.to_string())
            };
        let mut composer = ShaderComposer::new().map_err(shader_error)?;
        let mesh_shader = composer
            .compose(device, "Mesh Shader", MESH_SHADER, "mesh.wgsl")
            .map_err(shader_error)?;
        let line_shader = composer
            .compose(device, "Line Shader", LINE_SHADER, "line.wgsl")
            .map_err(shader_error)?;

        let format = context.format();
        let mesh_pipeline = create_scene_pipeline(
            device,
            "Mesh",
            &mesh_shader,
            format,
            MeshVertex::layout(),
            wgpu::PrimitiveTopology::TriangleList,
            &[&camera_layout],
        );
        let line_pipeline = create_scene_pipeline(
            device,
            "Line",
            &line_shader,
            format,
            LineVertex::layout(),
            wgpu::PrimitiveTopology::LineList,
            &[&camera_layout],
        );

        let usage_vertex = wgpu::BufferUsages::VERTEX;
        let buffers = SceneBuffers {
            mesh_vertices: TypedBuffer::with_capacity(
                device,
                "Mesh Vertices",
                4096,
                usage_vertex,
            ),
            mesh_indices: TypedBuffer::with_capacity(
                device,
                "Mesh Indices",
                8192,
                wgpu::BufferUsages::INDEX,
            ),
            line_vertices: TypedBuffer::with_capacity(
                device,
                "Line Vertices",
                4096,
                usage_vertex,
            ),
        };

        let (width, height) = context.size();
        let depth = DepthTexture::new(device, width, height);
        let input = InputProcessor::new()
            .with_drag_zoom_factor(options.camera.drag_zoom_factor);

        Ok(Self {
            context,
            camera_controller,
            camera_buffer,
            camera_bind_group,
            mesh_pipeline,
            line_pipeline,
            buffers,
            depth,
            input,
            options,
            scale_factor,
            viewport,
        })
    }

    /// Current runtime options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Where the scene is drawn on the surface.
    #[must_use]
    pub fn viewport(&self) -> ViewportRect {
        self.viewport
    }

    /// Whether a scene has been uploaded.
    #[must_use]
    pub fn has_scene(&self) -> bool {
        !self.buffers.mesh_indices.is_empty()
            || !self.buffers.line_vertices.is_empty()
    }

    fn clear_color(&self) -> wgpu::Color {
        let [r, g, b] = self.options.viewport.background.to_linear();
        wgpu::Color {
            r: f64::from(r),
            g: f64::from(g),
            b: f64::from(b),
            a: 1.0,
        }
    }

    fn encode_scene_pass(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
    ) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Scene Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                depth_slice: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.clear_color()),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(
                wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                },
            ),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        let vp = self.viewport;
        pass.set_viewport(
            vp.x as f32,
            vp.y as f32,
            vp.width as f32,
            vp.height as f32,
            0.0,
            1.0,
        );
        pass.set_scissor_rect(vp.x, vp.y, vp.width, vp.height);
        pass.set_bind_group(0, &self.camera_bind_group, &[]);

        let b = &self.buffers;
        if !b.mesh_indices.is_empty() {
            pass.set_pipeline(&self.mesh_pipeline);
            pass.set_vertex_buffer(0, b.mesh_vertices.buffer().slice(..));
            pass.set_index_buffer(
                b.mesh_indices.buffer().slice(..),
                wgpu::IndexFormat::Uint32,
            );
            pass.draw_indexed(0..b.mesh_indices.count() as u32, 0, 0..1);
        }
        if !b.line_vertices.is_empty() {
            pass.set_pipeline(&self.line_pipeline);
            pass.set_vertex_buffer(0, b.line_vertices.buffer().slice(..));
            pass.draw(0..b.line_vertices.count() as u32, 0..1);
        }
    }

    /// Draw one frame and present it.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if the swapchain frame cannot be
    /// acquired.
    pub fn render_frame(&mut self) -> Result<(), wgpu::SurfaceError> {
        self.context.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[self.camera_controller.uniform]),
        );

        let frame = self.context.get_next_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self.context.create_encoder();
        self.encode_scene_pass(&mut encoder, &view);
        self.context.submit(encoder);
        frame.present();
        Ok(())
    }

    /// Resize the surface; the viewport keeps its configured size unless the
    /// surface becomes smaller.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.context.resize(width, height);
        self.depth = DepthTexture::new(&self.context.device, width, height);
        self.update_viewport();
    }

    /// Apply a new DPI scale factor.
    pub fn set_scale_factor(&mut self, scale_factor: f64) {
        self.scale_factor = scale_factor;
        self.update_viewport();
    }

    fn update_viewport(&mut self) {
        self.viewport = ViewportRect::fixed(
            (self.options.viewport.width, self.options.viewport.height),
            self.scale_factor,
            self.context.size(),
        );
        self.camera_controller.resize(self.viewport.aspect());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_viewport_scales_and_clamps() {
        let vp = ViewportRect::fixed((800, 600), 2.0, (2000, 1400));
        assert_eq!((vp.width, vp.height), (1600, 1200));
        assert!((vp.aspect() - 800.0 / 600.0).abs() < 1e-6);

        let vp = ViewportRect::fixed((800, 600), 1.0, (500, 300));
        assert_eq!((vp.width, vp.height), (500, 300));
    }

    #[test]
    fn viewport_contains_points_inside_only() {
        let vp = ViewportRect::fixed((800, 600), 1.0, (1200, 600));
        assert!(vp.contains(0.0, 0.0));
        assert!(vp.contains(799.0, 599.0));
        assert!(!vp.contains(800.0, 10.0));
        assert!(!vp.contains(10.0, -1.0));
    }
}
