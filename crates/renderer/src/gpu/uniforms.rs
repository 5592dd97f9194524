use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use transition::EvaluationParams;

/// Uniform block consumed by both the grid compute pass and the instanced
/// draw. Layout mirrors `GridParams` in the WGSL sources.
#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
pub(crate) struct GridUniforms {
    pub resolution: u32,
    pub kernel_index: u32,
    pub step: f32,
    pub time: f32,
    pub progress: f32,
    _padding: [f32; 3],
}

impl GridUniforms {
    pub fn from_params(params: &EvaluationParams) -> Self {
        Self {
            resolution: params.resolution,
            kernel_index: params.kernel_index,
            step: params.step,
            time: params.time,
            // Steady frames encode a degenerate (f, f) pair, so the blend
            // factor is irrelevant; 1.0 keeps the shader on the target leg.
            progress: params.transition_progress.unwrap_or(1.0),
            _padding: [0.0; 3],
        }
    }
}

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
pub(crate) struct CameraUniforms {
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniforms {
    pub fn new(view_proj: Mat4) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_uniforms_mirror_evaluation_params() {
        let params = EvaluationParams {
            resolution: 100,
            step: 0.02,
            time: 3.5,
            transition_progress: Some(0.25),
            kernel_index: 17,
        };
        let uniforms = GridUniforms::from_params(&params);
        assert_eq!(uniforms.resolution, 100);
        assert_eq!(uniforms.kernel_index, 17);
        assert_eq!(uniforms.progress, 0.25);
    }

    #[test]
    fn steady_frames_default_the_blend_to_the_target() {
        let params = EvaluationParams {
            resolution: 100,
            step: 0.02,
            time: 0.0,
            transition_progress: None,
            kernel_index: 0,
        };
        assert_eq!(GridUniforms::from_params(&params).progress, 1.0);
    }

    #[test]
    fn uniform_blocks_are_tightly_sized() {
        // WGSL rounds the uniform struct to 32 bytes; the host block must match.
        assert_eq!(std::mem::size_of::<GridUniforms>(), 32);
        assert_eq!(std::mem::size_of::<CameraUniforms>(), 64);
    }
}
