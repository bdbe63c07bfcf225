//! Built-in type names.
//!
//! Field types are resolved by name: either one of these built-ins or a
//! registered custom type. The names are part of the project file format and
//! must not change.

/// Plain text.
pub const STRING: &str = "String";
/// Whole number.
pub const INTEGER: &str = "Integer";
/// Floating-point number.
pub const REAL: &str = "Real";
/// True/false.
pub const BOOLEAN: &str = "Boolean";
/// Color in hex notation.
pub const COLOR: &str = "Color";
/// Path to an external file.
pub const FILE: &str = "File";
/// Id of another record. Rename and delete propagation rewrites these.
pub const REFERENCE: &str = "Reference";
/// Two-component integer vector.
pub const VECTOR_2I: &str = "Vector2I";
/// Two-component real vector.
pub const VECTOR_2R: &str = "Vector2R";
/// Three-component integer vector.
pub const VECTOR_3I: &str = "Vector3I";
/// Three-component real vector.
pub const VECTOR_3R: &str = "Vector3R";

/// Vector component keys, in component order.
pub const VECTOR_COMPONENTS: [&str; 3] = ["X", "Y", "Z"];

const ALL: [&str; 11] = [
    STRING, INTEGER, REAL, BOOLEAN, COLOR, FILE, REFERENCE, VECTOR_2I, VECTOR_2R, VECTOR_3I,
    VECTOR_3R,
];

/// Whether the given name is a built-in type.
pub fn is_builtin(name: &str) -> bool {
    ALL.contains(&name)
}

/// Whether the given name is one of the 2D/3D vector types.
pub fn is_vector(name: &str) -> bool {
    matches!(name, VECTOR_2I | VECTOR_2R | VECTOR_3I | VECTOR_3R)
}

/// Whether the given vector type carries a Z component.
pub fn is_three_component(name: &str) -> bool {
    matches!(name, VECTOR_3I | VECTOR_3R)
}
