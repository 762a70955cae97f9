//! Matcap images and selection.
//!
//! Images are decoded on the CPU with `image`; the renderer uploads them as
//! textures. Without a configured directory three procedural matcaps are used.

use std::path::Path;

use glam::Vec3;

#[derive(Debug, Clone, PartialEq)]
pub struct MatcapImage {
    pub name: String,
    pub width: u32,
    pub height: u32,
    /// Tightly packed RGBA8, sRGB.
    pub rgba: Vec<u8>,
}

/// Decode every png/jpeg in `dir`, ordered by file name. Bad files are skipped.
pub fn load_matcaps(dir: &Path) -> Vec<MatcapImage> {
    let entries = match std::fs::read_dir(dir) {
        Ok(rd) => rd,
        Err(e) => {
            log::warn!("matcap dir {} unreadable: {e}", dir.display());
            return Vec::new();
        }
    };
    let mut paths: Vec<_> = entries
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| matches!(e.to_ascii_lowercase().as_str(), "png" | "jpg" | "jpeg"))
        })
        .collect();
    paths.sort();
    paths
        .into_iter()
        .filter_map(|p| match image::open(&p) {
            Ok(img) => {
                let rgba = img.to_rgba8();
                let name = p
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default();
                log::debug!("matcap {name}: {}x{}", rgba.width(), rgba.height());
                Some(MatcapImage {
                    name,
                    width: rgba.width(),
                    height: rgba.height(),
                    rgba: rgba.into_raw(),
                })
            }
            Err(e) => {
                log::warn!("skipping matcap {}: {e}", p.display());
                None
            }
        })
        .collect()
}

/// Three sphere-lit matcaps: warm clay, cool plaster, glossy red.
pub fn builtin_matcaps(size: u32) -> Vec<MatcapImage> {
    vec![
        procedural("clay", size, Vec3::new(0.80, 0.62, 0.48), 0.15, 8.0),
        procedural("plaster", size, Vec3::new(0.72, 0.76, 0.82), 0.10, 4.0),
        procedural("gloss", size, Vec3::new(0.70, 0.10, 0.08), 0.65, 48.0),
    ]
}

fn procedural(name: &str, size: u32, albedo: Vec3, specular: f32, shininess: f32) -> MatcapImage {
    let size = size.max(2);
    let light = Vec3::new(-0.4, 0.6, 0.7).normalize();
    let half = (light + Vec3::Z).normalize();
    let mut rgba = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            // Texel → view-space normal on the unit hemisphere facing the viewer.
            let u = (x as f32 + 0.5) / size as f32 * 2.0 - 1.0;
            let v = 1.0 - (y as f32 + 0.5) / size as f32 * 2.0;
            let r2 = u * u + v * v;
            let n = if r2 <= 1.0 {
                Vec3::new(u, v, (1.0 - r2).sqrt())
            } else {
                Vec3::new(u, v, 0.0).normalize()
            };
            let diffuse = n.dot(light).max(0.0);
            let rim = (1.0 - n.z).powi(3) * 0.25;
            let highlight = specular * n.dot(half).max(0.0).powf(shininess);
            let c = albedo * (0.18 + 0.82 * diffuse) + Vec3::splat(highlight + rim);
            let c = c.clamp(Vec3::ZERO, Vec3::ONE);
            rgba.extend_from_slice(&[to_srgb8(c.x), to_srgb8(c.y), to_srgb8(c.z), 255]);
        }
    }
    MatcapImage {
        name: name.to_string(),
        width: size,
        height: size,
        rgba,
    }
}

fn to_srgb8(linear: f32) -> u8 {
    let s = if linear <= 0.003_130_8 {
        linear * 12.92
    } else {
        1.055 * linear.powf(1.0 / 2.4) - 0.055
    };
    (s * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Index into a fixed list of loaded matcaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatcapSelection {
    count: usize,
    current: usize,
}

impl MatcapSelection {
    pub fn new(count: usize) -> Self {
        Self { count, current: 0 }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// Switch to `index` if it exists; otherwise nothing changes.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.count {
            self.current = index;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_have_expected_shape() {
        let caps = builtin_matcaps(32);
        assert_eq!(caps.len(), 3);
        for c in &caps {
            assert_eq!(c.rgba.len(), 32 * 32 * 4);
            assert!(c.rgba.chunks_exact(4).all(|px| px[3] == 255));
        }
    }

    #[test]
    fn builtin_is_brighter_toward_light() {
        let cap = &builtin_matcaps(64)[0];
        let px = |x: u32, y: u32| {
            let i = ((y * cap.width + x) * 4) as usize;
            cap.rgba[i] as u32 + cap.rgba[i + 1] as u32 + cap.rgba[i + 2] as u32
        };
        // Light comes from the upper left.
        assert!(px(20, 20) > px(44, 44));
    }

    #[test]
    fn srgb_endpoints() {
        assert_eq!(to_srgb8(0.0), 0);
        assert_eq!(to_srgb8(1.0), 255);
    }

    #[test]
    fn missing_dir_yields_nothing() {
        assert!(load_matcaps(Path::new("/definitely/not/here")).is_empty());
    }
}
