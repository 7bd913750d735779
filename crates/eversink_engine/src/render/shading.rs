//! Host-side reference of the lit fragment shaders
//!
//! Evaluates the same per-light accumulation as `multi_light.fs` so lighting
//! behavior can be checked without a GPU. For each enabled light:
//!
//! ```text
//! ambient  = light.ambient  · surface.ambient  · base
//! diffuse  = light.diffuse  · max(n·l, 0) · surface.diffuse · base
//! specular = light.specular · max(v·r, 0)^shininess · surface.specular
//! ```
//!
//! Point and spot contributions are multiplied by distance attenuation, and
//! spot diffuse/specular additionally by the cone factor. Contributions sum.

use crate::foundation::math::Vec3;
use crate::render::lighting::{Light, LightKind, LightingEnvironment};
use crate::render::material::Material;

/// Material reduced to Phong terms
///
/// PBR materials map as: ambient = albedo·ao, diffuse = albedo·(1 − metallic),
/// specular = mix(0.04, albedo, metallic), shininess = 2 + 254·(1 − roughness)².
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceTerms {
    /// Ambient reflectance
    pub ambient: Vec3,
    /// Diffuse reflectance
    pub diffuse: Vec3,
    /// Specular reflectance
    pub specular: Vec3,
    /// Specular exponent
    pub shininess: f32,
}

impl From<&Material> for SurfaceTerms {
    fn from(material: &Material) -> Self {
        match material {
            Material::Pbr(m) => {
                let albedo = Vec3::from(m.albedo);
                let f0 = Vec3::repeat(0.04).lerp(&albedo, m.metallic);
                let smooth = 1.0 - m.roughness.clamp(0.0, 1.0);
                Self {
                    ambient: albedo * m.ao,
                    diffuse: albedo * (1.0 - m.metallic),
                    specular: f0,
                    shininess: 2.0 + 254.0 * smooth * smooth,
                }
            }
            Material::Phong(m) => Self {
                ambient: Vec3::from(m.ambient),
                diffuse: Vec3::from(m.diffuse),
                specular: Vec3::from(m.specular),
                shininess: m.shininess.max(1.0),
            },
        }
    }
}

/// Surface point being shaded
#[derive(Debug, Clone, Copy)]
pub struct Fragment {
    /// World-space position
    pub position: Vec3,
    /// World-space normal (need not be normalized)
    pub normal: Vec3,
    /// Camera position
    pub view_pos: Vec3,
    /// Vertex or texture color multiplying ambient and diffuse
    pub base_color: Vec3,
}

/// Contribution of a single light
pub fn shade_light(light: &Light, surface: &SurfaceTerms, fragment: &Fragment) -> Vec3 {
    if !light.enabled {
        return Vec3::zeros();
    }

    let normal = fragment.normal.try_normalize(f32::EPSILON).unwrap_or_else(Vec3::y);
    let view_dir = (fragment.view_pos - fragment.position)
        .try_normalize(f32::EPSILON)
        .unwrap_or(normal);

    let (to_light, distance) = match light.kind {
        LightKind::Directional => (-light.direction, 0.0),
        LightKind::Point | LightKind::Spot => {
            let offset = light.position - fragment.position;
            let distance = offset.norm();
            (offset.try_normalize(f32::EPSILON).unwrap_or(normal), distance)
        }
    };

    let n_dot_l = normal.dot(&to_light).max(0.0);
    let reflected = reflect(&-to_light, &normal);
    let spec = view_dir.dot(&reflected).max(0.0).powf(surface.shininess);

    let base = fragment.base_color;
    let ambient = light.colors.ambient.component_mul(&surface.ambient).component_mul(&base);
    let diffuse = (light.colors.diffuse * n_dot_l)
        .component_mul(&surface.diffuse)
        .component_mul(&base);
    let specular = (light.colors.specular * spec).component_mul(&surface.specular);

    let attenuation = light.attenuation(distance);
    let cone = light.spot_intensity(-to_light);

    (ambient + (diffuse + specular) * cone) * attenuation
}

/// Sum of every light's contribution
pub fn shade(lights: &LightingEnvironment, material: &Material, fragment: &Fragment) -> Vec3 {
    let surface = SurfaceTerms::from(material);
    lights
        .iter()
        .map(|light| shade_light(light, &surface, fragment))
        .fold(Vec3::zeros(), |acc, c| acc + c)
}

// GLSL `reflect(i, n)`
fn reflect(incident: &Vec3, normal: &Vec3) -> Vec3 {
    incident - normal * (2.0 * normal.dot(incident))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::lighting::{Attenuation, LightColors};
    use crate::render::material::{pbr, phong};
    use approx::assert_relative_eq;

    fn frag_at_origin_facing_up() -> Fragment {
        Fragment {
            position: Vec3::zeros(),
            normal: Vec3::y(),
            view_pos: Vec3::new(0.0, 5.0, 0.0),
            base_color: Vec3::repeat(1.0),
        }
    }

    fn white_surface() -> SurfaceTerms {
        SurfaceTerms {
            ambient: Vec3::repeat(1.0),
            diffuse: Vec3::repeat(1.0),
            specular: Vec3::zeros(),
            shininess: 32.0,
        }
    }

    #[test]
    fn test_overhead_directional_light() {
        let light = Light::directional(-Vec3::y(), LightColors::gray(0.1, 0.5, 0.0));
        let color = shade_light(&light, &white_surface(), &frag_at_origin_facing_up());
        assert_relative_eq!(color, Vec3::repeat(0.6), epsilon = 1e-6);
    }

    #[test]
    fn test_light_below_surface_gives_ambient_only() {
        let light = Light::directional(Vec3::y(), LightColors::gray(0.1, 0.5, 1.0));
        let color = shade_light(&light, &white_surface(), &frag_at_origin_facing_up());
        assert_relative_eq!(color, Vec3::repeat(0.1), epsilon = 1e-6);
    }

    #[test]
    fn test_point_light_attenuates_everything() {
        let light = Light::point(
            Vec3::new(0.0, 10.0, 0.0),
            LightColors::gray(0.1, 0.5, 0.0),
            Attenuation::DEFAULT,
        );
        let color = shade_light(&light, &white_surface(), &frag_at_origin_facing_up());
        assert_relative_eq!(color, Vec3::repeat(0.6 / 5.1), epsilon = 1e-5);
    }

    #[test]
    fn test_spot_outside_cone_keeps_attenuated_ambient() {
        let light = Light::spot(
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::x(),
            LightColors::gray(0.1, 1.0, 1.0),
            Attenuation::NONE,
            crate::render::lighting::SpotCone::from_degrees(12.5, 17.5),
        );
        let color = shade_light(&light, &white_surface(), &frag_at_origin_facing_up());
        assert_relative_eq!(color, Vec3::repeat(0.1), epsilon = 1e-6);
    }

    #[test]
    fn test_disabled_light_contributes_nothing() {
        let mut light = Light::default_directional();
        light.enabled = false;
        let color = shade_light(&light, &white_surface(), &frag_at_origin_facing_up());
        assert_eq!(color, Vec3::zeros());
    }

    #[test]
    fn test_environment_sums_lights() {
        let sun = Light::directional(-Vec3::y(), LightColors::gray(0.1, 0.2, 0.0));
        let env = LightingEnvironment::new().with_light(sun.clone()).with_light(sun);
        let material = Material::Phong(phong::WHITE_RUBBER);
        let frag = frag_at_origin_facing_up();

        let single = shade_light(env.get(0).unwrap(), &SurfaceTerms::from(&material), &frag);
        assert_relative_eq!(shade(&env, &material, &frag), single * 2.0, epsilon = 1e-6);
    }

    #[test]
    fn test_pbr_metal_has_no_diffuse() {
        let terms = SurfaceTerms::from(&Material::Pbr(pbr::GOLD));
        assert_eq!(terms.diffuse, Vec3::zeros());
        assert_relative_eq!(terms.specular, Vec3::from(pbr::GOLD.albedo), epsilon = 1e-6);
        assert!(terms.shininess > 100.0);
    }
}
