//! Trackball camera.
//!
//! State is a handful of accumulated scalars (angles, distance, pan). View and
//! projection matrices are derived from them on demand, so there is no matrix
//! drift from frame to frame and the same inputs always give the same view.

use std::str::FromStr;

use glam::{Mat4, Vec2, Vec3};
use serde::Deserialize;

use crate::mesh::Aabb;

/// Tunables shared by input handling and projection.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view, used by both the projection and the pan scale.
    pub fov_y_deg: f32,
    /// Radians of azimuth per unit of horizontal drag.
    pub rotate_scale_x: f32,
    /// Radians of zenith per unit of vertical drag.
    pub rotate_scale_y: f32,
    /// Proximity multiplier per scroll unit; must be in (0, 1).
    pub zoom_base: f32,
    pub screen_scale: f32,
    pub near_factor: f32,
    pub far_factor: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y_deg: 65.0,
            rotate_scale_x: std::f32::consts::PI / 100.0,
            rotate_scale_y: std::f32::consts::PI / 200.0,
            zoom_base: 0.99,
            screen_scale: 2.5,
            near_factor: 0.1,
            far_factor: 10.0,
        }
    }
}

impl CameraConfig {
    pub fn fov_y(&self) -> f32 {
        self.fov_y_deg.to_radians()
    }
}

/// World axis treated as "up".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpAxis {
    X,
    #[default]
    Y,
    Z,
}

impl UpAxis {
    /// Rotation that brings this axis onto +Y in view space.
    pub fn correction(self) -> Mat4 {
        match self {
            UpAxis::X => Mat4::from_axis_angle(Vec3::Z, std::f32::consts::FRAC_PI_2),
            UpAxis::Y => Mat4::IDENTITY,
            UpAxis::Z => Mat4::from_axis_angle(Vec3::X, -std::f32::consts::FRAC_PI_2),
        }
    }
}

impl FromStr for UpAxis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x" => Ok(UpAxis::X),
            "y" => Ok(UpAxis::Y),
            "z" => Ok(UpAxis::Z),
            other => Err(format!("unknown up axis `{other}` (expected x, y or z)")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub cfg: CameraConfig,
    azimuth: f32,
    zenith: f32,
    proximity: f32,
    pan_offset: Vec2,
    up_axis: UpAxis,
    viewport: (u32, u32),
}

impl Camera {
    pub fn new(cfg: CameraConfig) -> Self {
        Self {
            cfg,
            azimuth: 0.0,
            zenith: 0.0,
            proximity: 1.0,
            pan_offset: Vec2::ZERO,
            up_axis: UpAxis::Y,
            viewport: (0, 0),
        }
    }

    pub fn azimuth(&self) -> f32 {
        self.azimuth
    }

    pub fn zenith(&self) -> f32 {
        self.zenith
    }

    pub fn proximity(&self) -> f32 {
        self.proximity
    }

    pub fn pan_offset(&self) -> Vec2 {
        self.pan_offset
    }

    pub fn up_axis(&self) -> UpAxis {
        self.up_axis
    }

    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
    }

    /// Width / height, or `None` while the viewport has zero area.
    pub fn aspect(&self) -> Option<f32> {
        let (w, h) = self.viewport;
        (w > 0 && h > 0).then(|| w as f32 / h as f32)
    }

    /// Accumulate drag deltas; zenith is deliberately unclamped.
    pub fn rotate(&mut self, delta_x: f32, delta_y: f32) {
        self.azimuth += self.cfg.rotate_scale_x * delta_x;
        self.zenith += self.cfg.rotate_scale_y * delta_y;
    }

    /// Translate the view so a drag moves the model at the same on-screen speed
    /// regardless of resolution and zoom.
    pub fn pan(&mut self, delta_x: f32, delta_y: f32) {
        let (w, h) = self.viewport;
        if w == 0 || h == 0 {
            return;
        }
        let tan_half = (0.5 * self.cfg.fov_y()).tan();
        let k = self.cfg.screen_scale * self.proximity * tan_half;
        let tsx = k / (0.5 * w as f32);
        let tsy = k / (0.5 * h as f32);
        self.pan_offset += Vec2::new(tsx * delta_x, -tsy * delta_y);
    }

    /// Exponential zoom; proximity stays positive for every finite delta.
    pub fn zoom(&mut self, delta: f32) {
        if !delta.is_finite() {
            return;
        }
        let next = self.proximity * self.cfg.zoom_base.powf(delta);
        // Guard against underflow/overflow to 0 or inf on absurd deltas.
        if next.is_normal() {
            self.proximity = next;
        }
    }

    /// Zero the angles and pan; distance becomes the bbox diagonal.
    pub fn reset(&mut self, bounds: Option<Aabb>) {
        self.azimuth = 0.0;
        self.zenith = 0.0;
        self.pan_offset = Vec2::ZERO;
        if let Some(b) = bounds {
            self.reset_proximity(b);
        }
    }

    /// Fit the distance to a newly loaded mesh without touching orientation.
    pub fn reset_proximity(&mut self, bounds: Aabb) {
        let d = bounds.diagonal();
        // A single-point mesh has zero diagonal; keep a usable distance.
        self.proximity = if d.is_normal() { d } else { 1.0 };
    }

    pub fn set_up_axis(&mut self, axis: UpAxis) {
        self.up_axis = axis;
    }

    /// Model-view matrix: center the mesh, apply up-axis correction, azimuth about Y,
    /// zenith about X, then push back by `proximity` and offset by the pan.
    pub fn derive_view_matrix(&self, bounds: Aabb) -> Mat4 {
        let center = Mat4::from_translation(-bounds.center());
        let azimuth = Mat4::from_axis_angle(Vec3::Y, self.azimuth);
        let zenith = Mat4::from_axis_angle(Vec3::X, self.zenith);
        let model = zenith * azimuth * self.up_axis.correction() * center;
        let view = Mat4::from_translation(Vec3::new(
            self.pan_offset.x,
            self.pan_offset.y,
            -self.proximity,
        ));
        view * model
    }

    /// Right-handed perspective with [0, 1] depth; clip planes scale with proximity.
    pub fn derive_projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(
            self.cfg.fov_y(),
            aspect,
            self.cfg.near_factor * self.proximity,
            self.cfg.far_factor * self.proximity,
        )
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(CameraConfig::default())
    }
}
