//! Draw-mode pipeline variants and a memoizing cache over a backend factory.
//!
//! The cache knows nothing about wgpu; the renderer plugs in a factory that
//! compiles real pipelines, tests plug in a counting fake.

use crate::error::PipelineBuildError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Shading {
    #[default]
    Smooth,
    Flat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Fill {
    #[default]
    Solid,
    Wire,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PipelineVariant {
    pub shading: Shading,
    pub fill: Fill,
}

/// Vertex/fragment entry point pair for one variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShaderProgram {
    pub vertex: &'static str,
    pub fragment: &'static str,
}

/// Indexed by `PipelineVariant::index`.
#[rustfmt::skip]
pub const PROGRAM_TABLE: [ShaderProgram; 4] = [
    ShaderProgram { vertex: "vs_smooth", fragment: "fs_smooth" },
    ShaderProgram { vertex: "vs_smooth", fragment: "fs_wire" },
    ShaderProgram { vertex: "vs_flat", fragment: "fs_flat" },
    ShaderProgram { vertex: "vs_flat", fragment: "fs_flat_wire" },
];

impl PipelineVariant {
    pub const ALL: [PipelineVariant; 4] = [
        PipelineVariant::new(Shading::Smooth, Fill::Solid),
        PipelineVariant::new(Shading::Smooth, Fill::Wire),
        PipelineVariant::new(Shading::Flat, Fill::Solid),
        PipelineVariant::new(Shading::Flat, Fill::Wire),
    ];

    pub const fn new(shading: Shading, fill: Fill) -> Self {
        Self { shading, fill }
    }

    pub fn from_flags(wireframe: bool, flat: bool) -> Self {
        Self {
            shading: if flat { Shading::Flat } else { Shading::Smooth },
            fill: if wireframe { Fill::Wire } else { Fill::Solid },
        }
    }

    /// Startup order when `self` cannot be built: drop wireframe first so the
    /// shading choice survives, then the default. No duplicates.
    pub fn fallbacks(self) -> Vec<PipelineVariant> {
        let mut out = vec![self];
        for v in [Self::new(self.shading, Fill::Solid), Self::default()] {
            if !out.contains(&v) {
                out.push(v);
            }
        }
        out
    }

    pub fn wireframe(self) -> bool {
        self.fill == Fill::Wire
    }

    pub fn flat(self) -> bool {
        self.shading == Shading::Flat
    }

    pub const fn index(self) -> usize {
        let s = match self.shading {
            Shading::Smooth => 0,
            Shading::Flat => 2,
        };
        let f = match self.fill {
            Fill::Solid => 0,
            Fill::Wire => 1,
        };
        s + f
    }

    pub fn program(self) -> ShaderProgram {
        PROGRAM_TABLE[self.index()]
    }

    pub fn label(self) -> &'static str {
        match (self.shading, self.fill) {
            (Shading::Smooth, Fill::Solid) => "smooth",
            (Shading::Smooth, Fill::Wire) => "smooth-wire",
            (Shading::Flat, Fill::Solid) => "flat",
            (Shading::Flat, Fill::Wire) => "flat-wire",
        }
    }
}

/// Compiles one pipeline variant for a backend.
pub trait PipelineFactory {
    type Pipeline;

    fn build(&mut self, variant: PipelineVariant) -> Result<Self::Pipeline, PipelineBuildError>;
}

/// Memoized pipelines keyed by variant, plus the variant currently bound for drawing.
pub struct PipelineCache<F: PipelineFactory> {
    factory: F,
    slots: [Option<F::Pipeline>; 4],
    active: Option<PipelineVariant>,
    builds: usize,
}

impl<F: PipelineFactory> PipelineCache<F> {
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            slots: [None, None, None, None],
            active: None,
            builds: 0,
        }
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    pub fn factory_mut(&mut self) -> &mut F {
        &mut self.factory
    }

    /// Total successful compilations so far.
    pub fn build_count(&self) -> usize {
        self.builds
    }

    pub fn is_built(&self, variant: PipelineVariant) -> bool {
        self.slots[variant.index()].is_some()
    }

    /// Return the cached pipeline for `variant`, compiling it on first use.
    pub fn get_or_build(&mut self, variant: PipelineVariant) -> Result<&F::Pipeline, PipelineBuildError> {
        let slot = variant.index();
        let p = match self.slots[slot].take() {
            Some(p) => p,
            None => {
                let p = self.factory.build(variant)?;
                self.builds += 1;
                p
            }
        };
        Ok(&*self.slots[slot].insert(p))
    }

    /// Force a fresh compile of `variant`. The old entry is replaced only when the
    /// new build succeeds.
    pub fn invalidate_and_rebuild(
        &mut self,
        variant: PipelineVariant,
    ) -> Result<&F::Pipeline, PipelineBuildError> {
        let p = self.factory.build(variant)?;
        self.builds += 1;
        Ok(&*self.slots[variant.index()].insert(p))
    }

    /// Bind `variant` for drawing, building it if needed. With `rebuild` the variant
    /// is recompiled even when cached. On failure the previous binding is kept.
    pub fn activate(&mut self, variant: PipelineVariant, rebuild: bool) -> Result<(), PipelineBuildError> {
        let res = if rebuild {
            self.invalidate_and_rebuild(variant).map(|_| ())
        } else {
            self.get_or_build(variant).map(|_| ())
        };
        match res {
            Ok(()) => {
                self.active = Some(variant);
                Ok(())
            }
            Err(e) => {
                log::error!(
                    "pipeline {} failed to build, keeping {}: {e}",
                    variant.label(),
                    self.active.map_or("none", |v| v.label())
                );
                Err(e)
            }
        }
    }

    /// Activate the first variant of `candidates` that builds. Returns it, or the
    /// last error if none did.
    pub fn activate_first(
        &mut self,
        candidates: &[PipelineVariant],
    ) -> Result<PipelineVariant, PipelineBuildError> {
        let mut last = PipelineBuildError::MissingProgram("no pipeline candidates".into());
        for &v in candidates {
            match self.activate(v, false) {
                Ok(()) => return Ok(v),
                Err(e) => last = e,
            }
        }
        Err(last)
    }

    pub fn active_variant(&self) -> Option<PipelineVariant> {
        self.active
    }

    pub fn active(&self) -> Option<&F::Pipeline> {
        self.active.and_then(|v| self.slots[v.index()].as_ref())
    }

    /// Compile every variant up front; failures are logged and left for lazy retry.
    pub fn precompile_all(&mut self) -> usize {
        let mut ok = 0;
        for v in PipelineVariant::ALL {
            match self.get_or_build(v) {
                Ok(_) => ok += 1,
                Err(e) => log::warn!("precompile {} skipped: {e}", v.label()),
            }
        }
        ok
    }
}
