//! Buffer/vertex types shared across pipelines.
//!
//! All types here are `#[repr(C)]` and `bytemuck`-safe so they can be uploaded to GPU buffers
//! without extra copies.

use bytemuck::{Pod, Zeroable};
use viewer_core::FramePlan;

#[rustfmt::skip]
const MAT4_IDENTITY: [[f32; 4]; 4] = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// Per-frame uniform block, visible to both shader stages.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Uniforms {
    pub model_view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
}

impl Uniforms {
    pub const IDENTITY: Uniforms = Uniforms {
        model_view: MAT4_IDENTITY,
        projection: MAT4_IDENTITY,
    };

    pub fn from_plan(plan: &FramePlan) -> Self {
        Self {
            model_view: plan.model_view.to_cols_array_2d(),
            projection: plan.projection.to_cols_array_2d(),
        }
    }
}

/// Positions live in slot 0, normals in slot 1; both tightly packed `vec3<f32>`.
pub const POSITION_LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
    array_stride: std::mem::size_of::<[f32; 3]>() as u64,
    step_mode: wgpu::VertexStepMode::Vertex,
    attributes: &wgpu::vertex_attr_array![0 => Float32x3],
};

pub const NORMAL_LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
    array_stride: std::mem::size_of::<[f32; 3]>() as u64,
    step_mode: wgpu::VertexStepMode::Vertex,
    attributes: &wgpu::vertex_attr_array![1 => Float32x3],
};
