//! Viewer initialization (`new`).

use std::sync::Arc;

use anyhow::Context;
use viewer_core::matcap::{builtin_matcaps, load_matcaps};
use viewer_core::{FileImporter, PipelineCache, PipelineVariant, Session, ViewerConfig};
use wgpu::util::DeviceExt;
use winit::window::Window;

use super::Viewer;
use super::attachments::Attachments;
use crate::gfx::matcap::{self, GpuMatcaps};
use crate::gfx::observer::ViewerObserver;
use crate::gfx::pipeline::{self, ShaderLibrary, WgpuPipelineFactory};
use crate::gfx::types::Uniforms;
use crate::gfx::util;

impl Viewer {
    /// Create a viewer bound to a window surface. No mesh is loaded yet.
    pub async fn new(
        window: Arc<Window>,
        cfg: &ViewerConfig,
        observer: Box<dyn ViewerObserver>,
    ) -> anyhow::Result<Self> {
        // Create a surface per candidate instance and try to get an adapter
        let candidates = util::backend_candidates(cfg.backend.as_deref());
        let mut picked: Option<(wgpu::Instance, wgpu::Surface<'static>, wgpu::Adapter)> = None;
        for &bmask in &candidates {
            let inst = wgpu::Instance::new(&wgpu::InstanceDescriptor {
                backends: bmask,
                flags: wgpu::InstanceFlags::empty(),
                ..Default::default()
            });
            let surf = inst
                .create_surface(window.clone())
                .context("create wgpu surface")?;
            match inst
                .request_adapter(&wgpu::RequestAdapterOptions {
                    compatible_surface: Some(&surf),
                    power_preference: wgpu::PowerPreference::HighPerformance,
                    force_fallback_adapter: false,
                })
                .await
            {
                Ok(a) => {
                    picked = Some((inst, surf, a));
                    break;
                }
                Err(e) => log::debug!("no adapter on {bmask:?}: {e}"),
            }
        }
        let (_instance, surface, adapter) = picked
            .ok_or_else(|| anyhow::anyhow!("no suitable GPU adapter across backends {candidates:?}"))?;

        let mut req_features = wgpu::Features::empty();
        if adapter.features().contains(wgpu::Features::POLYGON_MODE_LINE) {
            req_features |= wgpu::Features::POLYGON_MODE_LINE;
        }
        let info = adapter.get_info();
        log::info!("Adapter: {:?} ({:?})", info.name, info.backend);
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("viewer-device"),
                required_features: req_features,
                required_limits: wgpu::Limits::downlevel_defaults(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::default(),
            })
            .await
            .context("request device")?;

        // Log validation instead of panicking
        device.on_uncaptured_error(Box::new(|e| {
            log::error!("wgpu uncaptured error: {e:?}");
        }));

        // Surface configuration
        let size = window.inner_size();
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .context("surface reports no formats")?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let max_dim = device.limits().max_texture_dimension_2d.max(1);
        let (w, h) = util::scale_to_max((size.width, size.height), max_dim);
        if (w, h) != (size.width.max(1), size.height.max(1)) {
            log::warn!(
                "Clamping surface from {}x{} to {}x{} (max_dim={})",
                size.width,
                size.height,
                w,
                h,
                max_dim
            );
        }
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: w,
            height: h,
            present_mode: util::pick_present_mode(&caps.present_modes, cfg.vsync),
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        let attachments = Attachments::create(&device, config.width, config.height);

        // Uniforms
        let uniform_bgl = pipeline::create_uniform_bgl(&device);
        let uniform_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("uniforms"),
            contents: bytemuck::bytes_of(&Uniforms::IDENTITY),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let uniform_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("uniforms-bg"),
            layout: &uniform_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buf.as_entire_binding(),
            }],
        });

        // Matcaps: configured directory first, builtins if it yields nothing
        let mut images = cfg.matcap_dir.as_deref().map(load_matcaps).unwrap_or_default();
        if images.is_empty() {
            if let Some(dir) = &cfg.matcap_dir {
                log::warn!("no usable matcaps in {}, using builtins", dir.display());
            }
            images = builtin_matcaps(cfg.builtin_matcap_size);
        }
        let matcap_bgl = matcap::create_bind_group_layout(&device);
        let matcaps =
            GpuMatcaps::upload(&device, &queue, &matcap_bgl, &images).context("upload matcaps")?;

        // Pipelines
        let shaders = match &cfg.shader_path {
            Some(p) => ShaderLibrary::from_path(p),
            None => ShaderLibrary::embedded(),
        };
        let factory = WgpuPipelineFactory::new(&device, shaders, &uniform_bgl, &matcap_bgl, format);
        let mut pipelines = PipelineCache::new(factory);
        if cfg.precompile_pipelines {
            let n = pipelines.precompile_all();
            log::info!("precompiled {n}/{} pipelines", PipelineVariant::ALL.len());
        }

        let mut session = Session::new(cfg.camera, matcaps.len());
        session.set_up_axis(cfg.up_axis);
        session.set_modes(cfg.start_wireframe, cfg.start_flat);
        session.camera.set_viewport(config.width, config.height);

        let requested = session.requested_variant();
        let bound = pipelines
            .activate_first(&requested.fallbacks())
            .with_context(|| format!("no usable pipeline starting from {}", requested.label()))?;
        if bound != requested {
            log::warn!("starting with {} instead of {}", bound.label(), requested.label());
            session.revert_modes(bound);
        }

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            max_dim,
            attachments,
            clear_color: util::clear_color(cfg.clear_color),
            uniform_buf,
            uniform_bg,
            pipelines,
            matcaps,
            session,
            importer: Box::new(FileImporter),
            observer,
        })
    }
}
