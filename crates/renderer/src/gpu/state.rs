use std::sync::Arc;

use anyhow::Result;
use bytemuck::bytes_of;
use glam::Mat4;
use transition::EvaluationParams;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use super::context::GpuContext;
use super::pipeline::GraphPipelines;
use super::uniforms::{CameraUniforms, GridUniforms};

const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.012,
    g: 0.014,
    b: 0.022,
    a: 1.0,
};

/// Owns the GPU context, the graph pipelines, and the depth attachment.
pub(crate) struct GpuState {
    context: GpuContext,
    pipelines: GraphPipelines,
    depth_view: wgpu::TextureView,
}

impl GpuState {
    pub(crate) fn new(window: Arc<Window>, size: PhysicalSize<u32>) -> Result<Self> {
        let context = GpuContext::new(window, size)?;
        let pipelines = GraphPipelines::new(&context.device, context.surface_format)?;
        let depth_view = context.create_depth_texture();
        Ok(Self {
            context,
            pipelines,
            depth_view,
        })
    }

    pub(crate) fn size(&self) -> PhysicalSize<u32> {
        self.context.size
    }

    pub(crate) fn aspect(&self) -> f32 {
        self.context.size.width.max(1) as f32 / self.context.size.height.max(1) as f32
    }

    pub(crate) fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.context.resize(new_size);
        self.depth_view = self.context.create_depth_texture();
    }

    /// Evaluates the grid for this frame's parameters and draws it: one
    /// compute dispatch covering `resolution^2` points, then one instanced
    /// draw of a cube per point.
    pub(crate) fn render(
        &mut self,
        params: &EvaluationParams,
        view_proj: Mat4,
    ) -> Result<(), wgpu::SurfaceError> {
        let queue = &self.context.queue;
        queue.write_buffer(
            &self.pipelines.grid_buffer,
            0,
            bytes_of(&GridUniforms::from_params(params)),
        );
        queue.write_buffer(
            &self.pipelines.camera_buffer,
            0,
            bytes_of(&CameraUniforms::new(view_proj)),
        );

        let frame = self.context.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder =
            self.context
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("graph frame"),
                });

        {
            let mut pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some("grid eval pass"),
                timestamp_writes: None,
            });
            pass.set_pipeline(&self.pipelines.eval_pipeline);
            pass.set_bind_group(0, &self.pipelines.eval_bind_group, &[]);
            let groups = params.resolution.div_ceil(8);
            pass.dispatch_workgroups(groups, groups, 1);
        }

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("point draw pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            pass.set_pipeline(&self.pipelines.draw_pipeline);
            pass.set_bind_group(0, &self.pipelines.draw_bind_group, &[]);
            pass.draw(0..36, 0..params.resolution * params.resolution);
        }

        queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }
}
