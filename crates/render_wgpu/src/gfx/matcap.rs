//! Matcap textures: one texture and bind group per image, one shared sampler.

use viewer_core::ResourceAllocationError;
use viewer_core::matcap::MatcapImage;

pub fn create_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("matcap-bgl"),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
    })
}

pub struct GpuMatcaps {
    names: Vec<String>,
    bind_groups: Vec<wgpu::BindGroup>,
    _textures: Vec<wgpu::Texture>,
    _sampler: wgpu::Sampler,
}

impl GpuMatcaps {
    pub fn upload(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        images: &[MatcapImage],
    ) -> Result<Self, ResourceAllocationError> {
        let max_dim = device.limits().max_texture_dimension_2d;
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("matcap-sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });
        let mut names = Vec::with_capacity(images.len());
        let mut textures = Vec::with_capacity(images.len());
        let mut bind_groups = Vec::with_capacity(images.len());

        for img in images {
            validate_image(img, max_dim)?;
        }

        device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);
        for img in images {
            let size = wgpu::Extent3d {
                width: img.width,
                height: img.height,
                depth_or_array_layers: 1,
            };
            let tex = device.create_texture(&wgpu::TextureDescriptor {
                label: Some("matcap"),
                size,
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8UnormSrgb,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            });
            queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: &tex,
                    mip_level: 0,
                    origin: wgpu::Origin3d::ZERO,
                    aspect: wgpu::TextureAspect::All,
                },
                &img.rgba,
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(4 * img.width),
                    rows_per_image: Some(img.height),
                },
                size,
            );
            let view = tex.create_view(&wgpu::TextureViewDescriptor::default());
            let bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("matcap-bg"),
                layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(&view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(&sampler),
                    },
                ],
            });
            names.push(img.name.clone());
            textures.push(tex);
            bind_groups.push(bg);
        }
        if let Some(e) = pollster::block_on(device.pop_error_scope()) {
            return Err(ResourceAllocationError {
                what: "matcap textures".into(),
                reason: e.to_string(),
            });
        }
        log::info!("matcaps: {}", names.join(", "));
        Ok(Self {
            names,
            bind_groups,
            _textures: textures,
            _sampler: sampler,
        })
    }

    pub fn len(&self) -> usize {
        self.bind_groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bind_groups.is_empty()
    }

    pub fn bind_group(&self, index: usize) -> Option<&wgpu::BindGroup> {
        self.bind_groups.get(index)
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }
}

fn validate_image(img: &MatcapImage, max_dim: u32) -> Result<(), ResourceAllocationError> {
    let fail = |reason: String| ResourceAllocationError {
        what: format!("matcap `{}`", img.name),
        reason,
    };
    if img.width == 0 || img.height == 0 {
        return Err(fail("empty image".into()));
    }
    if img.width > max_dim || img.height > max_dim {
        return Err(fail(format!(
            "{}x{} exceeds max texture dimension {max_dim}",
            img.width, img.height
        )));
    }
    let expected = img.width as usize * img.height as usize * 4;
    if img.rgba.len() != expected {
        return Err(fail(format!("{} bytes, expected {expected}", img.rgba.len())));
    }
    Ok(())
}
