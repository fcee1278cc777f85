//! Uploading built scenes to the GPU.

use super::ViewerEngine;
use crate::render::scene::SceneGeometry;
use crate::render::{RenderError, Renderer};
use crate::source::StructureText;
use crate::style::StyleConfig;

impl ViewerEngine {
    /// Replace the GPU buffers with `scene` and frame the camera on it.
    ///
    /// Every buffer of `scene` must fit the device's `max_buffer_size`.
    pub fn upload_scene(&mut self, scene: &SceneGeometry) {
        let device = &self.context.device;
        let queue = &self.context.queue;
        let b = &mut self.buffers;
        let grown = [
            b.mesh_vertices.write(device, queue, &scene.mesh_vertices),
            b.mesh_indices.write(device, queue, &scene.mesh_indices),
            b.line_vertices.write(device, queue, &scene.line_vertices),
        ];
        if grown.contains(&true) {
            log::debug!(
                "Scene buffers reallocated (mesh vertices, indices, lines): \
                 {grown:?}"
            );
        }

        self.camera_controller.fit(scene.bounds);
    }
}

impl Renderer for ViewerEngine {
    fn render(
        &mut self,
        structure: &StructureText,
        config: &StyleConfig,
    ) -> Result<(), RenderError> {
        let scene = SceneGeometry::from_text_within(
            structure,
            config,
            &self.options.display.geometry,
            self.context.device.limits().max_buffer_size,
        )?;
        self.upload_scene(&scene);
        log::info!(
            "Rendered {} bytes of structure text as {} ({:?})",
            structure.len(),
            config.style,
            config.color_mode()
        );
        Ok(())
    }
}
