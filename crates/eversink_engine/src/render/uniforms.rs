//! Flattened uniform sets
//!
//! Lights, materials and the per-draw transforms all reduce to an ordered list
//! of `name = value` pairs. The list is what gets uploaded and what tests
//! inspect, so the GPU path and the host-side checks see identical data.

use crate::foundation::math::{Mat4, Vec3};

/// A single uniform value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    /// `bool` uniform (uploaded as an int)
    Bool(bool),
    /// `int` / `sampler2D` uniform
    Int(i32),
    /// `float` uniform
    Float(f32),
    /// `vec3` uniform
    Vec3(Vec3),
    /// `mat4` uniform
    Mat4(Mat4),
}

impl UniformValue {
    /// Float payload, if this is a float
    pub const fn as_float(&self) -> Option<f32> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Int payload, accepting bools as 0/1
    pub const fn as_int(&self) -> Option<i32> {
        match self {
            Self::Int(v) => Some(*v),
            Self::Bool(b) => Some(*b as i32),
            _ => None,
        }
    }

    /// Vector payload, if this is a vec3
    pub const fn as_vec3(&self) -> Option<Vec3> {
        match self {
            Self::Vec3(v) => Some(*v),
            _ => None,
        }
    }
}

/// Ordered `name = value` pairs for one upload
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UniformSet {
    entries: Vec<(String, UniformValue)>,
}

impl UniformSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value
    pub fn push(&mut self, name: impl Into<String>, value: UniformValue) -> &mut Self {
        self.entries.push((name.into(), value));
        self
    }

    /// Append `prefix.field` (or just `field` when the prefix is empty)
    pub fn push_field(&mut self, prefix: &str, field: &str, value: UniformValue) -> &mut Self {
        let name = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };
        self.push(name, value)
    }

    /// Append every entry of another set
    pub fn extend(&mut self, other: Self) -> &mut Self {
        self.entries.extend(other.entries);
        self
    }

    /// Last value written under `name`
    pub fn get(&self, name: &str) -> Option<&UniformValue> {
        self.entries
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Iterate in upload order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &UniformValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been pushed
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_field_prefixes() {
        let mut set = UniformSet::new();
        set.push_field("light", "constant", UniformValue::Float(1.0))
            .push_field("", "numLights", UniformValue::Int(1));

        assert_eq!(set.get("light.constant").and_then(UniformValue::as_float), Some(1.0));
        assert_eq!(set.get("numLights").and_then(UniformValue::as_int), Some(1));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_get_returns_latest_write() {
        let mut set = UniformSet::new();
        set.push("useTextures", UniformValue::Bool(true));
        set.push("useTextures", UniformValue::Bool(false));
        assert_eq!(set.get("useTextures"), Some(&UniformValue::Bool(false)));
    }
}
