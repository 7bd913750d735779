//! Material system for the rendering engine
//!
//! Materials are small immutable values copied into each renderable. Two
//! parameterizations exist and a scene uses one or the other:
//!
//! - **PBR**: albedo, metallic, roughness, ambient occlusion, alpha
//! - **Phong**: ambient, diffuse, specular colors plus shininess, alpha
//!
//! # Transparency
//! Alpha decides the draw pass: anything below [`TRANSPARENCY_THRESHOLD`] is
//! drawn in the blended pass after all opaque geometry.

pub mod catalog;

pub use catalog::{phong, pbr, PBR_PRESETS, PHONG_PRESETS};

use crate::foundation::math::{Rgb, Vec3};
use crate::render::uniforms::{UniformSet, UniformValue};

/// Materials with alpha strictly below this value are drawn in the transparent pass
pub const TRANSPARENCY_THRESHOLD: f32 = 0.99;

/// Metallic-roughness material parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PbrMaterial {
    /// Base color (albedo) - RGB values
    pub albedo: Rgb,
    /// Metallic factor (0.0 = dielectric, 1.0 = metallic)
    pub metallic: f32,
    /// Roughness factor (0.0 = mirror, 1.0 = completely rough)
    pub roughness: f32,
    /// Ambient occlusion factor
    pub ao: f32,
    /// Alpha transparency value (0.0 = invisible, 1.0 = opaque)
    pub alpha: f32,
}

impl PbrMaterial {
    /// Opaque material with full ambient occlusion
    pub const fn new(albedo: Rgb, metallic: f32, roughness: f32) -> Self {
        Self {
            albedo,
            metallic,
            roughness,
            ao: 1.0,
            alpha: 1.0,
        }
    }

    /// Copy with a different alpha
    pub const fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }
}

impl Default for PbrMaterial {
    fn default() -> Self {
        pbr::SILVER
    }
}

/// Classic Phong material parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhongMaterial {
    /// Ambient reflectance
    pub ambient: Rgb,
    /// Diffuse reflectance
    pub diffuse: Rgb,
    /// Specular reflectance
    pub specular: Rgb,
    /// Specular exponent
    pub shininess: f32,
    /// Alpha transparency value
    pub alpha: f32,
}

impl PhongMaterial {
    /// Opaque material
    pub const fn new(ambient: Rgb, diffuse: Rgb, specular: Rgb, shininess: f32) -> Self {
        Self {
            ambient,
            diffuse,
            specular,
            shininess,
            alpha: 1.0,
        }
    }

    /// Copy with a different alpha
    pub const fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }
}

/// Which parameterization a material uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialModel {
    /// Metallic-roughness
    Pbr,
    /// Ambient/diffuse/specular
    Phong,
}

/// A material of either parameterization
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    /// Metallic-roughness material
    Pbr(PbrMaterial),
    /// Ambient/diffuse/specular material
    Phong(PhongMaterial),
}

impl Material {
    /// Alpha value
    pub const fn alpha(&self) -> f32 {
        match self {
            Material::Pbr(m) => m.alpha,
            Material::Phong(m) => m.alpha,
        }
    }

    /// True when drawn in the blended pass (`alpha < 0.99`)
    pub fn is_transparent(&self) -> bool {
        self.alpha() < TRANSPARENCY_THRESHOLD
    }

    /// Parameterization of this material
    pub const fn model(&self) -> MaterialModel {
        match self {
            Material::Pbr(_) => MaterialModel::Pbr,
            Material::Phong(_) => MaterialModel::Phong,
        }
    }

    /// Flatten into `material.*` uniforms
    pub fn uniforms(&self) -> UniformSet {
        let mut set = UniformSet::new();
        match self {
            Material::Pbr(m) => {
                set.push("material.albedo", UniformValue::Vec3(Vec3::from(m.albedo)))
                    .push("material.metallic", UniformValue::Float(m.metallic))
                    .push("material.roughness", UniformValue::Float(m.roughness))
                    .push("material.ao", UniformValue::Float(m.ao))
                    .push("material.alpha", UniformValue::Float(m.alpha));
            }
            Material::Phong(m) => {
                set.push("material.ambient", UniformValue::Vec3(Vec3::from(m.ambient)))
                    .push("material.diffuse", UniformValue::Vec3(Vec3::from(m.diffuse)))
                    .push("material.specular", UniformValue::Vec3(Vec3::from(m.specular)))
                    .push("material.shininess", UniformValue::Float(m.shininess))
                    .push("material.alpha", UniformValue::Float(m.alpha));
            }
        }
        set
    }
}

impl Default for Material {
    fn default() -> Self {
        Material::Pbr(PbrMaterial::default())
    }
}

impl From<PbrMaterial> for Material {
    fn from(m: PbrMaterial) -> Self {
        Material::Pbr(m)
    }
}

impl From<PhongMaterial> for Material {
    fn from(m: PhongMaterial) -> Self {
        Material::Phong(m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transparency_boundary() {
        let opaque = Material::from(pbr::GOLD.with_alpha(1.0));
        let just_below = Material::from(pbr::GOLD.with_alpha(0.98));
        let at_threshold = Material::from(pbr::GOLD.with_alpha(0.99));

        assert!(!opaque.is_transparent());
        assert!(just_below.is_transparent());
        assert!(!at_threshold.is_transparent());
    }

    #[test]
    fn test_pbr_uniform_names() {
        let set = Material::from(pbr::COPPER).uniforms();
        let names: Vec<&str> = set.iter().map(|(n, _)| n).collect();
        assert_eq!(
            names,
            vec![
                "material.albedo",
                "material.metallic",
                "material.roughness",
                "material.ao",
                "material.alpha"
            ]
        );
    }

    #[test]
    fn test_phong_uniform_names() {
        let set = Material::from(phong::RUBY).uniforms();
        assert_eq!(set.get("material.shininess").and_then(UniformValue::as_float), Some(76.8));
        assert_eq!(set.get("material.alpha").and_then(UniformValue::as_float), Some(1.0));
        assert!(set.get("material.albedo").is_none());
    }

    #[test]
    fn test_default_is_opaque_silver() {
        let m = Material::default();
        assert_eq!(m, Material::Pbr(pbr::SILVER));
        assert_eq!(m.model(), MaterialModel::Pbr);
        assert!(!m.is_transparent());
    }
}
