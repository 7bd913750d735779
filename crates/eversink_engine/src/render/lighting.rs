//! Lighting system
//!
//! A [`Light`] is one of three kinds sharing a single flat record, so every
//! light uploads the same set of uniform fields. Fields a kind does not use
//! hold neutral values: attenuation `(1, 0, 0)` and both cone cosines `1.0`.
//!
//! # Falloff
//! Point and spot lights attenuate with distance `d` as
//! `1 / (constant + linear·d + quadratic·d²)`. Spot lights additionally fade
//! between an inner and outer cone, compared as cosines:
//!
//! ```text
//! intensity = clamp((θ − outer_cos) / (inner_cos − outer_cos), 0, 1)
//! ```
//!
//! where `θ` is the cosine between the spot direction and the ray from the
//! light to the fragment.
//!
//! # Upload layout
//! [`LightingEnvironment::uniforms`] always writes `numLights` plus
//! `lights[i].*`. With exactly one light it also writes the plain `light.*`
//! struct, so both single- and multi-light shaders see it.

use crate::foundation::math::{utils, Vec3};
use crate::render::primitives::Camera;
use crate::render::uniforms::{UniformSet, UniformValue};

/// Maximum number of lights the fragment shaders accept
pub const MAX_LIGHTS: usize = 8;

/// Light types, numbered as the shader's `type` field expects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum LightKind {
    /// Directional light (like sunlight)
    Directional = 0,
    /// Point light (like a lightbulb)
    Point = 1,
    /// Spot light (like a flashlight)
    Spot = 2,
}

/// Phong color terms, linear RGB and unbounded above 1.0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightColors {
    /// Ambient contribution
    pub ambient: Vec3,
    /// Diffuse contribution
    pub diffuse: Vec3,
    /// Specular contribution
    pub specular: Vec3,
}

impl LightColors {
    /// Gray terms `(ambient, diffuse, specular)`
    pub fn gray(ambient: f32, diffuse: f32, specular: f32) -> Self {
        Self {
            ambient: Vec3::repeat(ambient),
            diffuse: Vec3::repeat(diffuse),
            specular: Vec3::repeat(specular),
        }
    }
}

/// Distance falloff coefficients
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attenuation {
    /// Constant term
    pub constant: f32,
    /// Linear term
    pub linear: f32,
    /// Quadratic term
    pub quadratic: f32,
}

impl Attenuation {
    /// No falloff
    pub const NONE: Self = Self {
        constant: 1.0,
        linear: 0.0,
        quadratic: 0.0,
    };

    /// Roughly 50 units of useful range
    pub const DEFAULT: Self = Self {
        constant: 1.0,
        linear: 0.09,
        quadratic: 0.032,
    };

    /// Build from coefficients; negative values are clamped to zero
    pub fn new(constant: f32, linear: f32, quadratic: f32) -> Self {
        Self {
            constant: constant.max(0.0),
            linear: linear.max(0.0),
            quadratic: quadratic.max(0.0),
        }
    }

    /// `1 / (c + l·d + q·d²)`
    pub fn factor(&self, distance: f32) -> f32 {
        let denom = self.constant + self.linear * distance + self.quadratic * distance * distance;
        if denom <= f32::EPSILON {
            1.0
        } else {
            1.0 / denom
        }
    }
}

/// Spot cone stored as cosines of the half-angles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotCone {
    /// Cosine of the inner (full intensity) half-angle
    pub inner_cos: f32,
    /// Cosine of the outer (zero intensity) half-angle
    pub outer_cos: f32,
}

impl SpotCone {
    /// Degenerate cone used by non-spot lights
    pub const NONE: Self = Self {
        inner_cos: 1.0,
        outer_cos: 1.0,
    };

    /// Widest half-angle a cone may have, in degrees
    pub const MAX_HALF_ANGLE: f32 = 89.9;

    /// Smallest cosine gap kept between two distinct half-angles
    const MIN_COS_GAP: f32 = 1e-4;

    /// Convert half-angles in degrees to cosines.
    ///
    /// If `outer` is smaller than `inner` the two are swapped. Both angles are
    /// then clamped to `[0, MAX_HALF_ANGLE]`. Distinct angles always give
    /// `outer_cos < inner_cos`; equal angles give a hard-edged cone.
    pub fn from_degrees(inner: f32, outer: f32) -> Self {
        let (inner, outer) = if outer < inner {
            log::warn!("Spot cone outer angle {outer}° < inner {inner}°; swapping");
            (outer, inner)
        } else {
            (inner, outer)
        };

        let clamp = |angle: f32| {
            let clamped = angle.clamp(0.0, Self::MAX_HALF_ANGLE);
            if clamped != angle {
                log::warn!("Spot cone half-angle {angle}° clamped to {clamped}°");
            }
            clamped
        };
        let inner_cos = utils::deg_to_rad(clamp(inner)).cos();
        let mut outer_cos = utils::deg_to_rad(clamp(outer)).cos();
        if outer > inner && outer_cos > inner_cos - Self::MIN_COS_GAP {
            outer_cos = inner_cos - Self::MIN_COS_GAP;
        }

        Self { inner_cos, outer_cos }
    }

    /// Soft-edge factor for a ray whose angle to the spot axis has cosine `theta`
    pub fn intensity(&self, theta: f32) -> f32 {
        let epsilon = self.inner_cos - self.outer_cos;
        if epsilon <= f32::EPSILON {
            return if theta >= self.inner_cos { 1.0 } else { 0.0 };
        }
        ((theta - self.outer_cos) / epsilon).clamp(0.0, 1.0)
    }
}

/// Light source
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    /// Light kind
    pub kind: LightKind,
    /// Position (point/spot lights)
    pub position: Vec3,
    /// Unit direction (directional/spot lights)
    pub direction: Vec3,
    /// Color terms
    pub colors: LightColors,
    /// Distance falloff (point/spot lights)
    pub attenuation: Attenuation,
    /// Cone (spot lights)
    pub cone: SpotCone,
    /// Disabled lights contribute nothing
    pub enabled: bool,
}

impl Light {
    /// Sun-like light shining along `direction`
    pub fn directional(direction: Vec3, colors: LightColors) -> Self {
        Self {
            kind: LightKind::Directional,
            position: Vec3::zeros(),
            direction: normalize_or(direction, Vec3::new(0.0, -1.0, 0.0)),
            colors,
            attenuation: Attenuation::NONE,
            cone: SpotCone::NONE,
            enabled: true,
        }
    }

    /// Omnidirectional light at `position`
    pub fn point(position: Vec3, colors: LightColors, attenuation: Attenuation) -> Self {
        Self {
            kind: LightKind::Point,
            position,
            direction: Vec3::zeros(),
            colors,
            attenuation,
            cone: SpotCone::NONE,
            enabled: true,
        }
    }

    /// Cone light at `position` aimed along `direction`
    pub fn spot(
        position: Vec3,
        direction: Vec3,
        colors: LightColors,
        attenuation: Attenuation,
        cone: SpotCone,
    ) -> Self {
        Self {
            kind: LightKind::Spot,
            position,
            direction: normalize_or(direction, Vec3::new(0.0, 0.0, -1.0)),
            colors,
            attenuation,
            cone,
            enabled: true,
        }
    }

    /// Directional light with the stock sun settings
    pub fn default_directional() -> Self {
        Self::directional(Vec3::new(-0.2, -1.0, -0.3), LightColors::gray(0.2, 0.8, 1.0))
    }

    /// Point light at `position` with the stock bulb settings
    pub fn default_point(position: Vec3) -> Self {
        Self::point(position, LightColors::gray(0.2, 0.8, 1.0), Attenuation::DEFAULT)
    }

    /// Spot light with the stock flashlight settings (12.5°/17.5° cone)
    pub fn default_spot(position: Vec3, direction: Vec3) -> Self {
        Self::spot(
            position,
            direction,
            LightColors::gray(0.1, 1.0, 1.0),
            Attenuation::DEFAULT,
            SpotCone::from_degrees(12.5, 17.5),
        )
    }

    /// Distance attenuation factor; always 1 for directional lights
    pub fn attenuation(&self, distance: f32) -> f32 {
        match self.kind {
            LightKind::Directional => 1.0,
            LightKind::Point | LightKind::Spot => self.attenuation.factor(distance),
        }
    }

    /// Cone factor for a ray from the light towards a fragment; always 1 for
    /// non-spot lights
    pub fn spot_intensity(&self, light_to_fragment: Vec3) -> f32 {
        match self.kind {
            LightKind::Spot => {
                let theta = normalize_or(light_to_fragment, self.direction).dot(&self.direction);
                self.cone.intensity(theta)
            }
            LightKind::Directional | LightKind::Point => 1.0,
        }
    }

    /// Flatten into uniform fields under `prefix` (e.g. `light` or `lights[2]`)
    pub fn uniforms(&self, prefix: &str) -> UniformSet {
        let mut set = UniformSet::new();
        set.push_field(prefix, "type", UniformValue::Int(self.kind as i32))
            .push_field(prefix, "position", UniformValue::Vec3(self.position))
            .push_field(prefix, "direction", UniformValue::Vec3(self.direction))
            .push_field(prefix, "ambient", UniformValue::Vec3(self.colors.ambient))
            .push_field(prefix, "diffuse", UniformValue::Vec3(self.colors.diffuse))
            .push_field(prefix, "specular", UniformValue::Vec3(self.colors.specular))
            .push_field(prefix, "constant", UniformValue::Float(self.attenuation.constant))
            .push_field(prefix, "linear", UniformValue::Float(self.attenuation.linear))
            .push_field(prefix, "quadratic", UniformValue::Float(self.attenuation.quadratic))
            .push_field(prefix, "cutOff", UniformValue::Float(self.cone.inner_cos))
            .push_field(prefix, "outerCutOff", UniformValue::Float(self.cone.outer_cos))
            .push_field(prefix, "enabled", UniformValue::Bool(self.enabled));
        set
    }
}

fn normalize_or(v: Vec3, fallback: Vec3) -> Vec3 {
    v.try_normalize(f32::EPSILON).unwrap_or(fallback)
}

#[derive(Debug, Clone)]
struct LightSlot {
    light: Light,
    follows_camera: bool,
}

/// Lighting environment containing multiple lights
#[derive(Debug, Clone, Default)]
pub struct LightingEnvironment {
    slots: Vec<LightSlot>,
}

impl LightingEnvironment {
    /// Create a new empty lighting environment
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a light, returning its index, or `None` once [`MAX_LIGHTS`] is reached
    pub fn add_light(&mut self, light: Light) -> Option<usize> {
        if self.slots.len() >= MAX_LIGHTS {
            log::warn!("Lighting environment full ({} lights); {:?} light dropped", MAX_LIGHTS, light.kind);
            return None;
        }
        self.slots.push(LightSlot {
            light,
            follows_camera: false,
        });
        Some(self.slots.len() - 1)
    }

    /// Builder form of [`add_light`](Self::add_light)
    pub fn with_light(mut self, light: Light) -> Self {
        self.add_light(light);
        self
    }

    /// Make light `index` track the camera's position and view direction.
    /// Returns false for an out-of-range index.
    pub fn bind_to_camera(&mut self, index: usize) -> bool {
        match self.slots.get_mut(index) {
            Some(slot) => {
                slot.follows_camera = true;
                true
            }
            None => false,
        }
    }

    /// Move every camera-bound light to the camera
    pub fn follow_camera(&mut self, camera: &Camera) {
        for slot in self.slots.iter_mut().filter(|s| s.follows_camera) {
            slot.light.position = camera.position;
            slot.light.direction = camera.front();
        }
    }

    /// Flip light `index` on or off, returning the new state
    pub fn toggle(&mut self, index: usize) -> Option<bool> {
        let slot = self.slots.get_mut(index)?;
        slot.light.enabled = !slot.light.enabled;
        log::info!("Light {} {}", index, if slot.light.enabled { "on" } else { "off" });
        Some(slot.light.enabled)
    }

    /// Light at `index`
    pub fn get(&self, index: usize) -> Option<&Light> {
        self.slots.get(index).map(|s| &s.light)
    }

    /// Mutable light at `index`
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Light> {
        self.slots.get_mut(index).map(|s| &mut s.light)
    }

    /// Lights in upload order
    pub fn iter(&self) -> impl Iterator<Item = &Light> {
        self.slots.iter().map(|s| &s.light)
    }

    /// Number of lights
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True when the environment has no lights
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Flatten every light for upload
    pub fn uniforms(&self) -> UniformSet {
        let mut set = UniformSet::new();
        set.push("numLights", UniformValue::Int(self.slots.len() as i32));
        for (i, slot) in self.slots.iter().enumerate() {
            set.extend(slot.light.uniforms(&format!("lights[{i}]")));
        }
        if let [only] = self.slots.as_slice() {
            set.extend(only.light.uniforms("light"));
        }
        set
    }
}
