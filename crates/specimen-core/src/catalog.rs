//! Type catalog for the specimen randomization engine.
//!
//! The catalog is the set of named type definitions the engine can populate:
//! classes with fields, abstract types and interfaces with concrete subtypes,
//! and enums with constants. It is usually loaded from a YAML file:
//!
//! ```yaml
//! version: 1
//! types:
//!   - name: Person
//!     extends: Named
//!     fields:
//!       - name: age
//!         type: i32
//!       - name: friends
//!         type:
//!           type: sequence
//!           element: Person
//!   - name: Named
//!     kind: abstract
//!     fields:
//!       - name: name
//!         type: string
//! ```

use crate::types::TypeRef;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

// ============================================================================
// Error Types
// ============================================================================

/// Error type for catalog operations.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Error reading catalog file
    #[error("Failed to read catalog file: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Two definitions share a name
    #[error("Duplicate type definition: {0}")]
    DuplicateType(String),

    /// A definition declares the same field twice
    #[error("Duplicate field '{field}' in type '{type_name}'")]
    DuplicateField { type_name: String, field: String },

    /// A definition references a type that is not in the catalog
    #[error("Type '{referenced}' referenced by '{by}' is not defined")]
    UnknownType { by: String, referenced: String },

    /// The `extends` chain loops back on itself
    #[error("Inheritance cycle through type '{0}'")]
    InheritanceCycle(String),

    /// An enum declares fields
    #[error("Enum '{0}' cannot declare fields")]
    EnumWithFields(String),

    /// A definition extends a type that cannot be a superclass
    #[error("Type '{type_name}' cannot extend '{parent}'")]
    InvalidSupertype { type_name: String, parent: String },
}

// ============================================================================
// Definitions
// ============================================================================

/// Kind of a catalog type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    /// Concrete type with fields
    #[default]
    Class,
    /// Abstract type; instances come from concrete subtypes
    Abstract,
    /// Interface; instances come from concrete implementations
    Interface,
    /// Enumeration of named constants
    Enum,
}

/// Field visibility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
}

/// Field of a catalog type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Field name
    pub name: String,

    /// Declared type
    #[serde(rename = "type")]
    pub field_type: TypeRef,

    /// Static fields belong to the type, never to an instance
    #[serde(default, rename = "static")]
    pub is_static: bool,

    /// Field visibility
    #[serde(default)]
    pub visibility: Visibility,

    /// Value assigned at construction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_yaml::Value>,
}

impl FieldDefinition {
    /// Create a new public, non-static field.
    pub fn new(name: impl Into<String>, field_type: TypeRef) -> Self {
        Self {
            name: name.into(),
            field_type,
            is_static: false,
            visibility: Visibility::Public,
            default: None,
        }
    }

    /// Mark this field as static.
    pub fn static_field(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Set the field visibility.
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Set the value assigned at construction.
    pub fn with_default(mut self, default: serde_yaml::Value) -> Self {
        self.default = Some(default);
        self
    }
}

/// Named type definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeDefinition {
    /// Type name
    pub name: String,

    /// Type kind
    #[serde(default)]
    pub kind: TypeKind,

    /// Generic type variables
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_params: Vec<String>,

    /// Superclass
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<TypeRef>,

    /// Implemented interfaces
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub implements: Vec<TypeRef>,

    /// Declared fields (excluding inherited ones)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldDefinition>,

    /// Enum constants
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constants: Vec<String>,
}

impl TypeDefinition {
    fn with_kind(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            type_params: Vec::new(),
            extends: None,
            implements: Vec::new(),
            fields: Vec::new(),
            constants: Vec::new(),
        }
    }

    /// Create a concrete class definition.
    pub fn class(name: impl Into<String>) -> Self {
        Self::with_kind(name, TypeKind::Class)
    }

    /// Create an abstract type definition.
    pub fn abstract_type(name: impl Into<String>) -> Self {
        Self::with_kind(name, TypeKind::Abstract)
    }

    /// Create an interface definition.
    pub fn interface(name: impl Into<String>) -> Self {
        Self::with_kind(name, TypeKind::Interface)
    }

    /// Create an enum definition with the given constants.
    pub fn enumeration(name: impl Into<String>, constants: Vec<String>) -> Self {
        let mut def = Self::with_kind(name, TypeKind::Enum);
        def.constants = constants;
        def
    }

    /// Add a field.
    pub fn with_field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }

    /// Set the superclass.
    pub fn extending(mut self, parent: TypeRef) -> Self {
        self.extends = Some(parent);
        self
    }

    /// Add an implemented interface.
    pub fn implementing(mut self, interface: TypeRef) -> Self {
        self.implements.push(interface);
        self
    }

    /// Declare generic type variables.
    pub fn with_type_params(mut self, params: Vec<String>) -> Self {
        self.type_params = params;
        self
    }

    /// Check if instances must come from a concrete subtype.
    pub fn is_abstract(&self) -> bool {
        matches!(self.kind, TypeKind::Abstract | TypeKind::Interface)
    }

    /// Check if this is an enum.
    pub fn is_enum(&self) -> bool {
        self.kind == TypeKind::Enum
    }

    fn normalize_params(&mut self) {
        if self.type_params.is_empty() {
            return;
        }
        let params = self.type_params.clone();
        if let Some(extends) = self.extends.as_mut() {
            extends.normalize_params(&params);
        }
        for interface in &mut self.implements {
            interface.normalize_params(&params);
        }
        for field in &mut self.fields {
            field.field_type.normalize_params(&params);
        }
    }
}

fn default_version() -> u32 {
    1
}

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default = "default_version")]
    version: u32,
    #[serde(default)]
    types: Vec<TypeDefinition>,
}

/// Validated collection of type definitions.
#[derive(Debug, Clone, Serialize)]
pub struct TypeCatalog {
    /// Catalog version
    pub version: u32,

    /// Type definitions, in declaration order
    types: Vec<TypeDefinition>,

    /// Cached type lookup (not serialized)
    #[serde(skip)]
    type_map: HashMap<String, usize>,
}

impl TypeCatalog {
    /// Build a catalog from a list of definitions, validating references.
    pub fn new(types: Vec<TypeDefinition>) -> Result<Self, CatalogError> {
        Self::with_version(default_version(), types)
    }

    fn with_version(version: u32, mut types: Vec<TypeDefinition>) -> Result<Self, CatalogError> {
        types.iter_mut().for_each(TypeDefinition::normalize_params);

        let mut type_map = HashMap::with_capacity(types.len());
        for (idx, def) in types.iter().enumerate() {
            if type_map.insert(def.name.clone(), idx).is_some() {
                return Err(CatalogError::DuplicateType(def.name.clone()));
            }
        }

        let catalog = Self {
            version,
            types,
            type_map,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load a catalog from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse a catalog from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_yaml::from_str(yaml)?;
        Self::with_version(file.version, file.types)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        for def in &self.types {
            if def.is_enum() && !def.fields.is_empty() {
                return Err(CatalogError::EnumWithFields(def.name.clone()));
            }

            let mut seen = HashSet::new();
            for field in &def.fields {
                if !seen.insert(field.name.as_str()) {
                    return Err(CatalogError::DuplicateField {
                        type_name: def.name.clone(),
                        field: field.name.clone(),
                    });
                }
            }

            let mut missing = None;
            let mut check = |name: &str| {
                if missing.is_none() && !self.type_map.contains_key(name) {
                    missing = Some(name.to_string());
                }
            };
            def.extends.iter().for_each(|t| t.for_each_named(&mut check));
            def.implements.iter().for_each(|t| t.for_each_named(&mut check));
            def.fields
                .iter()
                .for_each(|f| f.field_type.for_each_named(&mut check));
            if let Some(referenced) = missing {
                return Err(CatalogError::UnknownType {
                    by: def.name.clone(),
                    referenced,
                });
            }

            if let Some(parent) = def.extends.as_ref().and_then(TypeRef::name) {
                if self.get(parent).is_some_and(TypeDefinition::is_enum) {
                    return Err(CatalogError::InvalidSupertype {
                        type_name: def.name.clone(),
                        parent: parent.to_string(),
                    });
                }
            }

            self.check_inheritance_chain(def)?;
        }
        Ok(())
    }

    fn check_inheritance_chain(&self, def: &TypeDefinition) -> Result<(), CatalogError> {
        let mut visited = HashSet::from([def.name.as_str()]);
        let mut current = def;
        while let Some(parent) = current.extends.as_ref().and_then(TypeRef::name) {
            if !visited.insert(parent) {
                return Err(CatalogError::InheritanceCycle(def.name.clone()));
            }
            match self.get(parent) {
                Some(next) => current = next,
                None => break,
            }
        }
        Ok(())
    }

    /// Get a type definition by name.
    pub fn get(&self, name: &str) -> Option<&TypeDefinition> {
        self.type_map.get(name).and_then(|&idx| self.types.get(idx))
    }

    /// All definitions, in declaration order.
    pub fn definitions(&self) -> &[TypeDefinition] {
        &self.types
    }

    /// Number of definitions.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Check if the catalog has no definitions.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PrimitiveKind;

    fn test_catalog_yaml() -> &'static str {
        r#"
version: 1
types:
  - name: Named
    kind: abstract
    fields:
      - name: name
        type: string
  - name: Person
    extends: Named
    fields:
      - name: age
        type: i32
      - name: friends
        type:
          type: sequence
          element: Person
      - name: POPULATION
        type: i64
        static: true
  - name: Color
    kind: enum
    constants: [RED, GREEN, BLUE]
  - name: Box
    type_params: [T]
    fields:
      - name: content
        type: T
"#
    }

    #[test]
    fn test_load_catalog() {
        let catalog = TypeCatalog::from_yaml(test_catalog_yaml()).unwrap();

        assert_eq!(catalog.version, 1);
        assert_eq!(catalog.len(), 4);
        let names: Vec<&str> = catalog
            .definitions()
            .iter()
            .map(|t| t.name.as_str())
            .collect();
        assert_eq!(names, vec!["Named", "Person", "Color", "Box"]);

        let person = catalog.get("Person").unwrap();
        assert_eq!(person.kind, TypeKind::Class);
        assert_eq!(person.extends, Some(TypeRef::named("Named")));
        assert!(person
            .fields
            .iter()
            .any(|f| f.name == "POPULATION" && f.is_static));

        let color = catalog.get("Color").unwrap();
        assert!(color.is_enum());
        assert_eq!(color.constants.len(), 3);

        assert!(catalog.get("Named").unwrap().is_abstract());
    }

    #[test]
    fn test_type_params_are_normalized() {
        let catalog = TypeCatalog::from_yaml(test_catalog_yaml()).unwrap();
        let content = &catalog.get("Box").unwrap().fields[0];
        assert_eq!(content.name, "content");
        assert_eq!(content.field_type, TypeRef::param("T"));
    }

    #[test]
    fn test_unknown_type_reference() {
        let result = TypeCatalog::new(vec![TypeDefinition::class("Person")
            .with_field(FieldDefinition::new("address", TypeRef::named("Address")))]);

        assert!(matches!(
            result,
            Err(CatalogError::UnknownType { ref referenced, .. }) if referenced == "Address"
        ));
    }

    #[test]
    fn test_duplicate_type() {
        let result = TypeCatalog::new(vec![
            TypeDefinition::class("Person"),
            TypeDefinition::class("Person"),
        ]);
        assert!(matches!(result, Err(CatalogError::DuplicateType(_))));
    }

    #[test]
    fn test_duplicate_field() {
        let result = TypeCatalog::new(vec![TypeDefinition::class("Person")
            .with_field(FieldDefinition::new("age", PrimitiveKind::Int32.into()))
            .with_field(FieldDefinition::new("age", PrimitiveKind::Int64.into()))]);
        assert!(matches!(result, Err(CatalogError::DuplicateField { .. })));
    }

    #[test]
    fn test_inheritance_cycle() {
        let result = TypeCatalog::new(vec![
            TypeDefinition::class("A").extending(TypeRef::named("B")),
            TypeDefinition::class("B").extending(TypeRef::named("A")),
        ]);
        assert!(matches!(result, Err(CatalogError::InheritanceCycle(_))));
    }

    #[test]
    fn test_enum_rules() {
        let result = TypeCatalog::new(vec![TypeDefinition::enumeration("Color", vec![])
            .with_field(FieldDefinition::new("rgb", PrimitiveKind::Int32.into()))]);
        assert!(matches!(result, Err(CatalogError::EnumWithFields(_))));

        let result = TypeCatalog::new(vec![
            TypeDefinition::enumeration("Color", vec!["RED".to_string()]),
            TypeDefinition::class("Shade").extending(TypeRef::named("Color")),
        ]);
        assert!(matches!(result, Err(CatalogError::InvalidSupertype { .. })));
    }

    #[test]
    fn test_invalid_yaml() {
        let result = TypeCatalog::from_yaml("types: [{ name: 1, fields: nope }]");
        assert!(matches!(result, Err(CatalogError::YamlError(_))));
    }
}
