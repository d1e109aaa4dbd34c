//! Uniform reflection and typed uniform application.
//!
//! A linked program's active uniforms are enumerated once, immediately after
//! linking, into an immutable name → [`UniformDescriptor`] table. Each
//! descriptor records the uniform's kind (a closed enum over the supported GL
//! types), its declared array size, its location and, for samplers, a fixed
//! texture unit. Setting a value by name is then a single lookup plus a match
//! on (kind, value) with no per-frame type dispatch.
//!
//! Soft conditions never panic: unknown names, unsupported types and value
//! shape mismatches are logged with `log::warn!` and ignored, since passes
//! with different uniform surfaces intentionally share a uniform-setting
//! code path.

use std::collections::HashMap;

use glow::HasContext;

/// The closed set of uniform types the pipeline knows how to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniformKind {
    /// `float` or `float[N]`.
    Float,
    /// `vec2` or `vec2[N]`.
    Vec2,
    /// `vec3` or `vec3[N]`.
    Vec3,
    /// `vec4` or `vec4[N]`.
    Vec4,
    /// `int` or `int[N]`.
    Int,
    /// `ivec2` or `ivec2[N]`.
    IVec2,
    /// `ivec3` or `ivec3[N]`.
    IVec3,
    /// `ivec4` or `ivec4[N]`.
    IVec4,
    /// `mat4`.
    Mat4,
    /// `bool`, coerced to a 0/1 integer upload.
    Bool,
    /// `sampler2D`, driven through a fixed texture unit.
    Sampler2D,
    /// Any other GL type; carries the raw type enum. Values applied to an
    /// unsupported uniform are dropped.
    Unsupported(u32),
}

impl UniformKind {
    /// Map a GL type enum to a kind.
    pub fn classify(gl_type: u32) -> Self {
        match gl_type {
            glow::FLOAT => Self::Float,
            glow::FLOAT_VEC2 => Self::Vec2,
            glow::FLOAT_VEC3 => Self::Vec3,
            glow::FLOAT_VEC4 => Self::Vec4,
            glow::INT => Self::Int,
            glow::INT_VEC2 => Self::IVec2,
            glow::INT_VEC3 => Self::IVec3,
            glow::INT_VEC4 => Self::IVec4,
            glow::FLOAT_MAT4 => Self::Mat4,
            glow::BOOL => Self::Bool,
            glow::SAMPLER_2D => Self::Sampler2D,
            other => Self::Unsupported(other),
        }
    }

    /// Scalar components per array element.
    pub fn components(self) -> usize {
        match self {
            Self::Float | Self::Int | Self::Bool | Self::Sampler2D => 1,
            Self::Vec2 | Self::IVec2 => 2,
            Self::Vec3 | Self::IVec3 => 3,
            Self::Vec4 | Self::IVec4 => 4,
            Self::Mat4 => 16,
            Self::Unsupported(_) => 0,
        }
    }

    pub fn is_sampler(self) -> bool {
        matches!(self, Self::Sampler2D)
    }
}

/// A value that can be applied to a reflected uniform.
///
/// Slice variants cover array uniforms: a `float[N]` takes `Floats` of
/// length N, a `vec2[N]` takes `Floats` of length 2·N, and so on for the
/// integer kinds.
#[derive(Debug, Clone, Copy)]
pub enum UniformValue<'a> {
    Float(f32),
    Vec2([f32; 2]),
    Vec3([f32; 3]),
    Vec4([f32; 4]),
    Floats(&'a [f32]),
    Int(i32),
    IVec2([i32; 2]),
    IVec3([i32; 3]),
    IVec4([i32; 4]),
    Ints(&'a [i32]),
    Mat4(&'a [f32; 16]),
    Bool(bool),
    Texture(glow::Texture),
}

/// One active uniform discovered at reflection time.
///
/// Immutable once built; the table below owns one descriptor per uniform
/// name for the lifetime of the program.
#[derive(Debug)]
pub struct UniformDescriptor {
    name: String,
    kind: UniformKind,
    size: i32,
    location: glow::UniformLocation,
    texture_unit: Option<u32>,
}

impl UniformDescriptor {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> UniformKind {
        self.kind
    }

    /// Declared array size; 1 for non-array uniforms.
    pub fn size(&self) -> i32 {
        self.size
    }

    /// The texture unit assigned at reflection time, for samplers only.
    pub fn texture_unit(&self) -> Option<u32> {
        self.texture_unit
    }

    /// Whether a value has the shape this uniform accepts.
    pub fn accepts(&self, value: &UniformValue<'_>) -> bool {
        shape_matches(self.kind, self.size, value)
    }

    /// Upload a value. Shape mismatches are logged and dropped.
    ///
    /// The owning program must be current; callers go through
    /// [`PostPass::set_uniform`](crate::post::PostPass::set_uniform), which
    /// activates it first.
    fn apply(&self, gl: &glow::Context, value: UniformValue<'_>) {
        if let UniformKind::Unsupported(_) = self.kind {
            // Already warned once at reflection time.
            return;
        }
        if !self.accepts(&value) {
            log::warn!(
                "uniform {} ({:?}, size {}) rejects value {:?}",
                self.name,
                self.kind,
                self.size,
                value
            );
            return;
        }

        let location = Some(&self.location);
        unsafe {
            match (self.kind, value) {
                (UniformKind::Float, UniformValue::Float(v)) => gl.uniform_1_f32(location, v),
                (UniformKind::Float, UniformValue::Floats(v)) => {
                    gl.uniform_1_f32_slice(location, v)
                }
                (UniformKind::Vec2, UniformValue::Vec2([x, y])) => {
                    gl.uniform_2_f32(location, x, y)
                }
                (UniformKind::Vec2, UniformValue::Floats(v)) => gl.uniform_2_f32_slice(location, v),
                (UniformKind::Vec3, UniformValue::Vec3([x, y, z])) => {
                    gl.uniform_3_f32(location, x, y, z)
                }
                (UniformKind::Vec3, UniformValue::Floats(v)) => gl.uniform_3_f32_slice(location, v),
                (UniformKind::Vec4, UniformValue::Vec4([x, y, z, w])) => {
                    gl.uniform_4_f32(location, x, y, z, w)
                }
                (UniformKind::Vec4, UniformValue::Floats(v)) => gl.uniform_4_f32_slice(location, v),
                (UniformKind::Int, UniformValue::Int(v)) => gl.uniform_1_i32(location, v),
                (UniformKind::Int, UniformValue::Ints(v)) => gl.uniform_1_i32_slice(location, v),
                (UniformKind::IVec2, UniformValue::IVec2([x, y])) => {
                    gl.uniform_2_i32(location, x, y)
                }
                (UniformKind::IVec2, UniformValue::Ints(v)) => gl.uniform_2_i32_slice(location, v),
                (UniformKind::IVec3, UniformValue::IVec3([x, y, z])) => {
                    gl.uniform_3_i32(location, x, y, z)
                }
                (UniformKind::IVec3, UniformValue::Ints(v)) => gl.uniform_3_i32_slice(location, v),
                (UniformKind::IVec4, UniformValue::IVec4([x, y, z, w])) => {
                    gl.uniform_4_i32(location, x, y, z, w)
                }
                (UniformKind::IVec4, UniformValue::Ints(v)) => gl.uniform_4_i32_slice(location, v),
                (UniformKind::Mat4, UniformValue::Mat4(v)) => {
                    gl.uniform_matrix_4_f32_slice(location, false, &v[..])
                }
                (UniformKind::Bool, UniformValue::Bool(v)) => {
                    gl.uniform_1_i32(location, i32::from(v))
                }
                (UniformKind::Sampler2D, UniformValue::Texture(texture)) => {
                    let unit = self.texture_unit.unwrap_or(0);
                    gl.active_texture(glow::TEXTURE0 + unit);
                    gl.bind_texture(glow::TEXTURE_2D, Some(texture));
                    gl.uniform_1_i32(location, unit as i32);
                }
                // Excluded by the accepts() check above.
                _ => {}
            }
        }
    }
}

/// Name → descriptor table for one linked program.
#[derive(Debug, Default)]
pub struct UniformTable {
    uniforms: HashMap<String, UniformDescriptor>,
}

impl UniformTable {
    /// Enumerate a linked program's active uniforms into a table.
    ///
    /// Array uniform names lose their trailing `[0]` so `u_points[0]` is
    /// addressable as `u_points`. Sampler uniforms are handed strictly
    /// increasing texture units in enumeration order; the units stay fixed
    /// for the lifetime of the program.
    pub fn reflect(gl: &glow::Context, program: glow::Program) -> Self {
        let mut uniforms = HashMap::new();
        let mut next_unit = 0u32;

        let count = unsafe { gl.get_active_uniforms(program) };
        for index in 0..count {
            let Some(info) = (unsafe { gl.get_active_uniform(program, index) }) else {
                continue;
            };

            let name = strip_array_suffix(&info.name).to_string();
            let Some(location) = (unsafe { gl.get_uniform_location(program, &name) }) else {
                continue;
            };

            let (kind, texture_unit) = classify_entry(info.utype, &mut next_unit);

            if let UniformKind::Unsupported(raw) = kind {
                log::warn!(
                    "uniform {name} has unsupported GL type {raw:#06x}; values set on it are ignored"
                );
            }

            uniforms.insert(
                name.clone(),
                UniformDescriptor {
                    name,
                    kind,
                    size: info.size,
                    location,
                    texture_unit,
                },
            );
        }

        Self { uniforms }
    }

    /// Whether `name` (after `[0]` stripping) was among the program's active
    /// uniforms at reflection time.
    pub fn contains(&self, name: &str) -> bool {
        self.uniforms.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&UniformDescriptor> {
        self.uniforms.get(name)
    }

    pub fn len(&self) -> usize {
        self.uniforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.uniforms.is_empty()
    }

    /// Apply a value to a uniform by name; unknown names are logged and
    /// ignored. The owning program must be current.
    pub fn set(&self, gl: &glow::Context, name: &str, value: UniformValue<'_>) {
        match self.uniforms.get(name) {
            Some(descriptor) => descriptor.apply(gl, value),
            None => log::warn!("uniform {name} not found in shader program"),
        }
    }
}

/// Classify an active uniform's type and, for samplers, take the next
/// texture unit from the per-program counter.
fn classify_entry(gl_type: u32, next_unit: &mut u32) -> (UniformKind, Option<u32>) {
    let kind = UniformKind::classify(gl_type);
    let texture_unit = if kind.is_sampler() {
        let unit = *next_unit;
        *next_unit += 1;
        Some(unit)
    } else {
        None
    };
    (kind, texture_unit)
}

/// Strip one trailing `[0]` index from an array uniform's reported name.
fn strip_array_suffix(name: &str) -> &str {
    name.strip_suffix("[0]").unwrap_or(name)
}

/// Whether a value has the shape a uniform of the given kind and declared
/// array size accepts.
fn shape_matches(kind: UniformKind, size: i32, value: &UniformValue<'_>) -> bool {
    let elements = size.max(1) as usize;
    match (kind, value) {
        (UniformKind::Float, UniformValue::Float(_)) => size == 1,
        (UniformKind::Float, UniformValue::Floats(v)) => v.len() == elements,
        (UniformKind::Vec2, UniformValue::Vec2(_)) => size == 1,
        (UniformKind::Vec2, UniformValue::Floats(v)) => v.len() == 2 * elements,
        (UniformKind::Vec3, UniformValue::Vec3(_)) => size == 1,
        (UniformKind::Vec3, UniformValue::Floats(v)) => v.len() == 3 * elements,
        (UniformKind::Vec4, UniformValue::Vec4(_)) => size == 1,
        (UniformKind::Vec4, UniformValue::Floats(v)) => v.len() == 4 * elements,
        (UniformKind::Int, UniformValue::Int(_)) => size == 1,
        (UniformKind::Int, UniformValue::Ints(v)) => v.len() == elements,
        (UniformKind::IVec2, UniformValue::IVec2(_)) => size == 1,
        (UniformKind::IVec2, UniformValue::Ints(v)) => v.len() == 2 * elements,
        (UniformKind::IVec3, UniformValue::IVec3(_)) => size == 1,
        (UniformKind::IVec3, UniformValue::Ints(v)) => v.len() == 3 * elements,
        (UniformKind::IVec4, UniformValue::IVec4(_)) => size == 1,
        (UniformKind::IVec4, UniformValue::Ints(v)) => v.len() == 4 * elements,
        (UniformKind::Mat4, UniformValue::Mat4(_)) => size == 1,
        (UniformKind::Bool, UniformValue::Bool(_)) => true,
        (UniformKind::Sampler2D, UniformValue::Texture(_)) => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_supported_types() {
        assert_eq!(UniformKind::classify(glow::FLOAT), UniformKind::Float);
        assert_eq!(UniformKind::classify(glow::FLOAT_VEC2), UniformKind::Vec2);
        assert_eq!(UniformKind::classify(glow::FLOAT_VEC3), UniformKind::Vec3);
        assert_eq!(UniformKind::classify(glow::FLOAT_VEC4), UniformKind::Vec4);
        assert_eq!(UniformKind::classify(glow::INT), UniformKind::Int);
        assert_eq!(UniformKind::classify(glow::INT_VEC2), UniformKind::IVec2);
        assert_eq!(UniformKind::classify(glow::INT_VEC3), UniformKind::IVec3);
        assert_eq!(UniformKind::classify(glow::INT_VEC4), UniformKind::IVec4);
        assert_eq!(UniformKind::classify(glow::FLOAT_MAT4), UniformKind::Mat4);
        assert_eq!(UniformKind::classify(glow::BOOL), UniformKind::Bool);
        assert_eq!(
            UniformKind::classify(glow::SAMPLER_2D),
            UniformKind::Sampler2D
        );
    }

    #[test]
    fn test_classify_unknown_type() {
        assert_eq!(
            UniformKind::classify(glow::FLOAT_MAT3),
            UniformKind::Unsupported(glow::FLOAT_MAT3)
        );
        assert_eq!(UniformKind::Unsupported(glow::FLOAT_MAT3).components(), 0);
    }

    #[test]
    fn test_components() {
        assert_eq!(UniformKind::Float.components(), 1);
        assert_eq!(UniformKind::Vec2.components(), 2);
        assert_eq!(UniformKind::IVec3.components(), 3);
        assert_eq!(UniformKind::Vec4.components(), 4);
        assert_eq!(UniformKind::Mat4.components(), 16);
    }

    #[test]
    fn test_strip_array_suffix() {
        assert_eq!(strip_array_suffix("u_points[0]"), "u_points");
        assert_eq!(strip_array_suffix("u_time"), "u_time");
        // Only one trailing index is reported by GL; inner brackets stay.
        assert_eq!(strip_array_suffix("u_nested[0][0]"), "u_nested[0]");
        assert_eq!(strip_array_suffix("u_points[1]"), "u_points[1]");
    }

    #[test]
    fn test_sampler_units_increase_per_sampler_only() {
        let mut next_unit = 0;

        let (kind, unit) = classify_entry(glow::SAMPLER_2D, &mut next_unit);
        assert_eq!(kind, UniformKind::Sampler2D);
        assert_eq!(unit, Some(0));

        let (_, unit) = classify_entry(glow::FLOAT, &mut next_unit);
        assert_eq!(unit, None);

        let (_, unit) = classify_entry(glow::SAMPLER_2D, &mut next_unit);
        assert_eq!(unit, Some(1));

        let (_, unit) = classify_entry(glow::SAMPLER_2D, &mut next_unit);
        assert_eq!(unit, Some(2));
    }

    #[test]
    fn test_scalar_shapes() {
        assert!(shape_matches(
            UniformKind::Float,
            1,
            &UniformValue::Float(1.0)
        ));
        assert!(!shape_matches(
            UniformKind::Float,
            1,
            &UniformValue::Int(1)
        ));
        assert!(shape_matches(
            UniformKind::Vec2,
            1,
            &UniformValue::Vec2([0.0, 1.0])
        ));
        // A single vec2 is also accepted as a flat 2-element slice.
        assert!(shape_matches(
            UniformKind::Vec2,
            1,
            &UniformValue::Floats(&[0.0, 1.0])
        ));
        assert!(shape_matches(UniformKind::Bool, 1, &UniformValue::Bool(true)));
    }

    #[test]
    fn test_array_shapes_require_exact_lengths() {
        let five = [0.0f32; 5];
        let ten = [0.0f32; 10];

        // float[5] takes exactly 5 floats.
        assert!(shape_matches(
            UniformKind::Float,
            5,
            &UniformValue::Floats(&five)
        ));
        assert!(!shape_matches(
            UniformKind::Float,
            5,
            &UniformValue::Floats(&ten)
        ));
        assert!(!shape_matches(
            UniformKind::Float,
            5,
            &UniformValue::Float(1.0)
        ));

        // vec2[5] takes exactly 10 floats.
        assert!(shape_matches(
            UniformKind::Vec2,
            5,
            &UniformValue::Floats(&ten)
        ));
        assert!(!shape_matches(
            UniformKind::Vec2,
            5,
            &UniformValue::Floats(&five)
        ));

        let ints = [0i32; 6];
        assert!(shape_matches(
            UniformKind::IVec3,
            2,
            &UniformValue::Ints(&ints)
        ));
        assert!(!shape_matches(
            UniformKind::IVec2,
            2,
            &UniformValue::Ints(&ints)
        ));
    }

    #[test]
    fn test_unsupported_accepts_nothing() {
        let kind = UniformKind::Unsupported(glow::FLOAT_MAT2);
        assert!(!shape_matches(kind, 1, &UniformValue::Float(0.0)));
        assert!(!shape_matches(kind, 1, &UniformValue::Bool(false)));
    }
}
