//! TypeSystem — registry of custom types.

use tracing::debug;

use crate::builtin;
use crate::custom::CustomType;
use crate::error::{Result, TypesError};

/// Resolves type names to custom types and answers classification queries.
///
/// Built-in types are not stored here; they exist by name alone (see
/// [`crate::builtin`]). Custom types are kept in registration order.
#[derive(Debug, Default)]
pub struct TypeSystem {
    types: Vec<CustomType>,
}

impl TypeSystem {
    pub fn new() -> Self {
        Self { types: Vec::new() }
    }

    /// Register a custom type. Names must be unique.
    pub fn add_custom_type(&mut self, custom_type: CustomType) -> Result<()> {
        if self.is_custom_type(&custom_type.name) {
            return Err(TypesError::DuplicateType {
                name: custom_type.name,
            });
        }
        debug!(name = %custom_type.name, "registered custom type");
        self.types.push(custom_type);
        Ok(())
    }

    /// Unregister a custom type and return it.
    pub fn remove_custom_type(&mut self, name: &str) -> Result<CustomType> {
        let index = self
            .types
            .iter()
            .position(|t| t.name == name)
            .ok_or_else(|| TypesError::TypeNotFound { name: name.into() })?;
        debug!(name, "removed custom type");
        Ok(self.types.remove(index))
    }

    /// Rename a custom type. Referencing field definitions are the caller's
    /// concern.
    pub fn rename_custom_type(&mut self, old_name: &str, new_name: &str) -> Result<()> {
        let custom_type = self
            .types
            .iter_mut()
            .find(|t| t.name == old_name)
            .ok_or_else(|| TypesError::TypeNotFound {
                name: old_name.into(),
            })?;
        custom_type.name = new_name.to_string();
        Ok(())
    }

    /// Whether a custom type is registered under this name.
    pub fn is_custom_type(&self, name: &str) -> bool {
        self.types.iter().any(|t| t.name == name)
    }

    /// Look up a custom type by name.
    pub fn get_custom_type(&self, name: &str) -> Result<&CustomType> {
        self.types
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| TypesError::TypeNotFound { name: name.into() })
    }

    /// All registered custom types, in registration order.
    pub fn custom_types(&self) -> &[CustomType] {
        &self.types
    }

    /// Whether `name` is `base` itself or reaches `base` through a chain of
    /// derived types. Unknown names and non-derived kinds end the walk.
    pub fn is_type_or_derived_from(&self, name: &str, base: &str) -> bool {
        let mut current = name;
        let mut visited: Vec<&str> = Vec::new();
        loop {
            if current == base {
                return true;
            }
            if visited.contains(&current) {
                // Derived-type cycle; treat as unrelated.
                return false;
            }
            visited.push(current);
            match self.get_custom_type(current).ok().and_then(|t| t.base_type()) {
                Some(base_type) => current = base_type,
                None => return false,
            }
        }
    }
}
