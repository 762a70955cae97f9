//! Error taxonomy shared by the core and the renderer.
//!
//! Expected per-frame conditions (no mesh, zero-area viewport, matcap index out
//! of range) are not errors and never show up here.

use std::path::PathBuf;

use thiserror::Error;

use crate::pipeline::PipelineVariant;

/// Failure to turn a file into a usable triangle mesh.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("cannot read {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unsupported mesh format: {0}")]
    UnsupportedFormat(PathBuf),
    #[error("failed to parse {path}: {reason}")]
    Parse { path: PathBuf, reason: String },
    #[error("mesh contains no triangles")]
    NoTriangles,
    #[error("index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },
    #[error("malformed mesh: {0}")]
    Malformed(String),
}

/// Failure to compile one pipeline variant. The previously bound variant keeps rendering.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PipelineBuildError {
    #[error("shader program `{0}` not found")]
    MissingProgram(String),
    #[error("pipeline {variant:?} is invalid: {reason}")]
    Invalid {
        variant: PipelineVariant,
        reason: String,
    },
    #[error("pipeline {variant:?} needs unsupported device feature {feature}")]
    Unsupported {
        variant: PipelineVariant,
        feature: &'static str,
    },
}

/// GPU buffer/texture allocation failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("failed to allocate {what}: {reason}")]
pub struct ResourceAllocationError {
    pub what: String,
    pub reason: String,
}

/// Umbrella error surfaced by viewer operations that can fail.
#[derive(Debug, Error)]
pub enum ViewerError {
    #[error(transparent)]
    Import(#[from] ImportError),
    #[error(transparent)]
    Pipeline(#[from] PipelineBuildError),
    #[error(transparent)]
    Allocation(#[from] ResourceAllocationError),
}
