//! Viewer::on_frame_tick: one frame from the session's frame plan.

use viewer_core::plan_frame;
use wgpu::SurfaceError;

use super::{FrameOutcome, Viewer};
use crate::gfx::types::Uniforms;

impl Viewer {
    /// Render one frame. Without a mesh or bound pipeline the target is only cleared;
    /// with a zero-area viewport nothing is acquired at all.
    pub fn on_frame_tick(&mut self) -> Result<FrameOutcome, SurfaceError> {
        if self.session.camera.aspect().is_none() {
            return Ok(FrameOutcome::Skipped);
        }
        let plan = plan_frame(&self.session, self.pipelines.active_variant());
        let draw = plan.and_then(|plan| {
            Some((
                plan,
                self.pipelines.active()?,
                self.session.mesh()?,
                self.matcaps.bind_group(plan.matcap)?,
            ))
        });

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        if let Some((plan, ..)) = &draw {
            // Uniforms for this frame; the write lands before the submit below.
            self.queue
                .write_buffer(&self.uniform_buf, 0, bytemuck::bytes_of(&Uniforms::from_plan(plan)));
        }

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some("frame-encoder") });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("matcap-pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.attachments.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            if let Some((plan, pipeline, mesh, matcap_bg)) = &draw {
                pass.set_pipeline(pipeline);
                pass.set_bind_group(0, &self.uniform_bg, &[]);
                pass.set_bind_group(1, *matcap_bg, &[]);
                pass.set_vertex_buffer(0, mesh.handle.positions.slice(..));
                pass.set_vertex_buffer(1, mesh.handle.normals.slice(..));
                pass.set_index_buffer(mesh.handle.indices.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..plan.index_count, 0, 0..1);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        self.window.pre_present_notify();
        frame.present();
        Ok(if draw.is_some() {
            FrameOutcome::Drawn
        } else {
            FrameOutcome::Skipped
        })
    }
}
