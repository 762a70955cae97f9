//! Shader library and the wgpu pipeline factory.
//!
//! WGSL source lives in `shader.wgsl` next to this file and is embedded at compile time.
//! A file path can be configured instead; it is re-read on every build so toggling a
//! draw mode picks up edits.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use viewer_core::pipeline::PipelineFactory;
use viewer_core::{PipelineBuildError, PipelineVariant};
use wgpu::{ColorTargetState, FragmentState, PolygonMode, VertexState};

use crate::gfx::types::{NORMAL_LAYOUT, POSITION_LAYOUT};
use crate::gfx::util::DEPTH_FORMAT;

pub const EMBEDDED_SHADER: &str = include_str!("shader.wgsl");

#[derive(Debug, Clone)]
pub struct ShaderLibrary {
    path: Option<PathBuf>,
    source: String,
}

impl ShaderLibrary {
    pub fn embedded() -> Self {
        Self {
            path: None,
            source: EMBEDDED_SHADER.to_string(),
        }
    }

    /// Backed by a WGSL file; nothing is read until the first `reload`.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            source: String::new(),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_file_backed(&self) -> bool {
        self.path.is_some()
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Re-read the backing file. A read failure keeps the last good source, or fails
    /// if there never was one.
    pub fn reload(&mut self) -> Result<(), PipelineBuildError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        match std::fs::read_to_string(path) {
            Ok(src) => {
                self.source = src;
                Ok(())
            }
            Err(e) if !self.source.is_empty() => {
                log::warn!("shader {} unreadable ({e}), keeping previous source", path.display());
                Ok(())
            }
            Err(e) => Err(PipelineBuildError::MissingProgram(format!("{}: {e}", path.display()))),
        }
    }

    /// Fail with `MissingProgram` unless the current source defines `entry`.
    pub fn lookup(&self, entry: &str) -> Result<(), PipelineBuildError> {
        if defines_fn(&self.source, entry) {
            Ok(())
        } else {
            Err(PipelineBuildError::MissingProgram(entry.to_string()))
        }
    }
}

/// True if `src` contains `fn <name>(` outside a line comment.
pub fn defines_fn(src: &str, name: &str) -> bool {
    let ident = |c: char| c.is_ascii_alphanumeric() || c == '_';
    src.lines().any(|line| {
        let code = line.split("//").next().unwrap_or_default();
        let mut rest = code;
        while let Some(at) = rest.find("fn") {
            let before_ok = rest[..at].chars().next_back().is_none_or(|c| !ident(c));
            let after = &rest[at + 2..];
            if before_ok && after.starts_with(char::is_whitespace) {
                let after = after.trim_start();
                if let Some(tail) = after.strip_prefix(name)
                    && tail.trim_start().starts_with('(')
                {
                    return true;
                }
            }
            rest = after;
        }
        false
    })
}

pub fn create_uniform_bgl(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("uniforms-bgl"),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    })
}

/// Compiles viewer pipelines against one device and surface format.
pub struct WgpuPipelineFactory {
    device: wgpu::Device,
    shaders: ShaderLibrary,
    layout: wgpu::PipelineLayout,
    color_format: wgpu::TextureFormat,
    line_mode: bool,
}

impl WgpuPipelineFactory {
    pub fn new(
        device: &wgpu::Device,
        shaders: ShaderLibrary,
        uniform_bgl: &wgpu::BindGroupLayout,
        matcap_bgl: &wgpu::BindGroupLayout,
        color_format: wgpu::TextureFormat,
    ) -> Self {
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("viewer-pipeline-layout"),
            bind_group_layouts: &[uniform_bgl, matcap_bgl],
            push_constant_ranges: &[],
        });
        let line_mode = device.features().contains(wgpu::Features::POLYGON_MODE_LINE);
        if !line_mode {
            log::warn!("POLYGON_MODE_LINE unavailable; wireframe variants will be rejected");
        }
        Self {
            device: device.clone(),
            shaders,
            layout,
            color_format,
            line_mode,
        }
    }

    pub fn shaders(&self) -> &ShaderLibrary {
        &self.shaders
    }

    pub fn supports_wireframe(&self) -> bool {
        self.line_mode
    }
}

impl PipelineFactory for WgpuPipelineFactory {
    type Pipeline = wgpu::RenderPipeline;

    fn build(&mut self, variant: PipelineVariant) -> Result<wgpu::RenderPipeline, PipelineBuildError> {
        if variant.wireframe() && !self.line_mode {
            return Err(PipelineBuildError::Unsupported {
                variant,
                feature: "POLYGON_MODE_LINE",
            });
        }
        self.shaders.reload()?;
        let program = variant.program();
        self.shaders.lookup(program.vertex)?;
        self.shaders.lookup(program.fragment)?;

        // Capture WGSL and pipeline validation errors instead of hitting the uncaptured handler
        self.device.push_error_scope(wgpu::ErrorFilter::Validation);
        let module = self.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("viewer-shader"),
            source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(self.shaders.source())),
        });
        let pipeline = self.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(variant.label()),
            layout: Some(&self.layout),
            vertex: VertexState {
                module: &module,
                entry_point: Some(program.vertex),
                buffers: &[POSITION_LAYOUT, NORMAL_LAYOUT],
                compilation_options: Default::default(),
            },
            fragment: Some(FragmentState {
                module: &module,
                entry_point: Some(program.fragment),
                targets: &[Some(ColorTargetState {
                    format: self.color_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                polygon_mode: if variant.wireframe() {
                    PolygonMode::Line
                } else {
                    PolygonMode::Fill
                },
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });
        if let Some(e) = pollster::block_on(self.device.pop_error_scope()) {
            return Err(PipelineBuildError::Invalid {
                variant,
                reason: e.to_string(),
            });
        }
        log::info!("built pipeline {}", variant.label());
        Ok(pipeline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn embedded_shader_exports_every_program() {
        let lib = ShaderLibrary::embedded();
        for v in PipelineVariant::ALL {
            let p = v.program();
            lib.lookup(p.vertex).expect(p.vertex);
            lib.lookup(p.fragment).expect(p.fragment);
        }
    }

    #[test]
    fn fn_detection_needs_a_real_definition() {
        let src = "// fn fs_gone(x)\nfn helper_fs_main() {}\n@fragment fn  fs_main (in: V) {}\n";
        assert!(defines_fn(src, "fs_main"));
        assert!(!defines_fn(src, "fs_gone"));
        assert!(!defines_fn(src, "fs"));
        assert!(!defines_fn("let xfn fs_main(", "fs_main"));
    }

    #[test]
    fn missing_entry_is_reported_by_name() {
        let err = ShaderLibrary::embedded().lookup("fs_toon").unwrap_err();
        assert_eq!(err, PipelineBuildError::MissingProgram("fs_toon".into()));
    }

    #[test]
    fn file_backed_library_rereads_and_keeps_last_good() {
        let mut file = tempfile::NamedTempFile::new().expect("tmp");
        write!(file, "@vertex fn vs_smooth() {{}}").expect("write");
        let mut lib = ShaderLibrary::from_path(file.path());
        assert!(lib.lookup("vs_smooth").is_err());
        lib.reload().expect("first read");
        lib.lookup("vs_smooth").expect("defined");

        std::fs::write(file.path(), "@vertex fn vs_flat() {}").expect("rewrite");
        lib.reload().expect("reread");
        assert!(lib.lookup("vs_smooth").is_err());
        lib.lookup("vs_flat").expect("new source");

        let path = file.path().to_path_buf();
        drop(file);
        assert!(!path.exists());
        lib.reload().expect("keeps previous source");
        lib.lookup("vs_flat").expect("still there");
    }

    #[test]
    fn unreadable_file_without_history_fails() {
        let mut lib = ShaderLibrary::from_path("/no/such/shader.wgsl");
        assert!(matches!(lib.reload(), Err(PipelineBuildError::MissingProgram(_))));
    }
}
