//! GPU copy of a validated mesh: separate position, normal and index buffers.

use viewer_core::{MeshData, ResourceAllocationError};
use wgpu::util::DeviceExt;

#[derive(Debug)]
pub struct GpuMesh {
    pub positions: wgpu::Buffer,
    pub normals: wgpu::Buffer,
    pub indices: wgpu::Buffer,
    pub index_count: u32,
}

impl GpuMesh {
    /// Upload all three buffers or none. Oversized buffers are rejected up front;
    /// anything the driver refuses is caught by an out-of-memory error scope.
    pub fn upload(device: &wgpu::Device, mesh: &MeshData) -> Result<Self, ResourceAllocationError> {
        let max = device.limits().max_buffer_size;
        let pos_bytes: &[u8] = bytemuck::cast_slice(mesh.positions());
        let nrm_bytes: &[u8] = bytemuck::cast_slice(mesh.normals());
        let idx_bytes: &[u8] = bytemuck::cast_slice(mesh.indices());
        for (what, len) in [
            ("position buffer", pos_bytes.len()),
            ("normal buffer", nrm_bytes.len()),
            ("index buffer", idx_bytes.len()),
        ] {
            check_buffer_size(what, len as u64, max)?;
        }

        device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);
        let positions = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh-positions"),
            contents: pos_bytes,
            usage: wgpu::BufferUsages::VERTEX,
        });
        let normals = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh-normals"),
            contents: nrm_bytes,
            usage: wgpu::BufferUsages::VERTEX,
        });
        let indices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh-indices"),
            contents: idx_bytes,
            usage: wgpu::BufferUsages::INDEX,
        });
        if let Some(e) = pollster::block_on(device.pop_error_scope()) {
            return Err(ResourceAllocationError {
                what: "mesh buffers".into(),
                reason: e.to_string(),
            });
        }
        log::debug!(
            "uploaded mesh: {} KiB",
            (pos_bytes.len() + nrm_bytes.len() + idx_bytes.len()) / 1024
        );
        Ok(Self {
            positions,
            normals,
            indices,
            index_count: mesh.index_count(),
        })
    }
}

pub(crate) fn check_buffer_size(what: &str, len: u64, max: u64) -> Result<(), ResourceAllocationError> {
    if len > max {
        return Err(ResourceAllocationError {
            what: what.to_string(),
            reason: format!("{len} bytes exceeds device limit of {max}"),
        });
    }
    Ok(())
}
