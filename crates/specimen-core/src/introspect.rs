//! Type introspection over the catalog.
//!
//! The engine never matches on `TypeRef` directly; it asks the catalog for the
//! [`TypeShape`] of a type and dispatches on that, and enumerates fields through
//! [`FieldDescriptor`]s with generic arguments already substituted.

use crate::catalog::{TypeCatalog, TypeDefinition, Visibility};
use crate::types::{CollectionKind, MapKind, PrimitiveKind, TypeRef};
use crate::values::Value;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

/// Closed set of strategies the engine can apply to a type.
#[derive(Debug, Clone, Copy)]
pub enum TypeShape<'a> {
    /// Leaf type
    Primitive(PrimitiveKind),
    /// Fixed-size array
    Array { element: &'a TypeRef },
    /// Collection
    Collection {
        kind: CollectionKind,
        element: Option<&'a TypeRef>,
    },
    /// Key/value map
    Map {
        kind: MapKind,
        key: Option<&'a TypeRef>,
        value: Option<&'a TypeRef>,
    },
    /// Enumeration
    Enum(&'a TypeDefinition),
    /// Abstract type or interface
    Abstract(&'a TypeDefinition),
    /// Concrete type with fields
    Composite(&'a TypeDefinition),
    /// Wildcard or unbound type variable
    Unresolved,
    /// Named type missing from the catalog
    Unknown(&'a str),
}

/// Identity of a field: the declaring type plus the field name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldKey {
    /// Name of the type that declares the field
    pub declaring_type: String,
    /// Field name
    pub field_name: String,
}

impl FieldKey {
    /// Create a new field key.
    pub fn new(declaring_type: impl Into<String>, field_name: impl Into<String>) -> Self {
        Self {
            declaring_type: declaring_type.into(),
            field_name: field_name.into(),
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.declaring_type, self.field_name)
    }
}

impl FromStr for FieldKey {
    type Err = String;

    /// Parse `Type.field`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('.') {
            Some((declaring_type, field_name))
                if !declaring_type.is_empty() && !field_name.is_empty() =>
            {
                Ok(Self::new(declaring_type, field_name))
            }
            _ => Err(format!("expected Type.field, got '{s}'")),
        }
    }
}

/// A field as seen while populating one instance.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    /// Field name
    pub name: String,
    /// Declared type, with generic arguments of the instance substituted
    pub field_type: TypeRef,
    /// Name of the type that declares the field
    pub declaring_type: String,
    /// Whether the field is public
    pub accessible: bool,
    /// Static fields are never populated
    pub is_static: bool,
    /// Value assigned at construction
    pub default: Option<serde_yaml::Value>,
}

impl FieldDescriptor {
    /// Key identifying this field for cycle tracking and overrides.
    pub fn key(&self) -> FieldKey {
        FieldKey::new(&self.declaring_type, &self.name)
    }

    /// Check if the field receives a value at construction.
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }
}

impl TypeCatalog {
    /// Classify a type.
    pub fn shape_of<'a>(&'a self, ty: &'a TypeRef) -> TypeShape<'a> {
        match ty {
            TypeRef::Primitive(kind) => TypeShape::Primitive(*kind),
            TypeRef::Array { element } => TypeShape::Array { element },
            TypeRef::Collection { kind, element } => TypeShape::Collection {
                kind: *kind,
                element: element.as_deref(),
            },
            TypeRef::Map { kind, key, value } => TypeShape::Map {
                kind: *kind,
                key: key.as_deref(),
                value: value.as_deref(),
            },
            TypeRef::Named { name, .. } => match self.get(name) {
                Some(def) if def.is_enum() => TypeShape::Enum(def),
                Some(def) if def.is_abstract() => TypeShape::Abstract(def),
                Some(def) => TypeShape::Composite(def),
                None => TypeShape::Unknown(name),
            },
            TypeRef::Param(_) | TypeRef::Wildcard => TypeShape::Unresolved,
        }
    }

    /// Check if a container element type can be populated.
    ///
    /// Wildcards, unbound type variables and nested collections are not.
    pub fn is_populatable(&self, ty: &TypeRef) -> bool {
        !matches!(
            ty,
            TypeRef::Wildcard | TypeRef::Param(_) | TypeRef::Collection { .. }
        )
    }

    /// Value a field holds right after construction: its converted default,
    /// or null.
    pub fn initial_value(&self, field: &FieldDescriptor) -> Value {
        let Some(default) = &field.default else {
            return Value::Null;
        };
        match (self.shape_of(&field.field_type), default.as_str()) {
            (TypeShape::Enum(def), Some(constant))
                if def.constants.iter().any(|c| c == constant) =>
            {
                Value::Enum {
                    type_name: def.name.clone(),
                    constant: constant.to_string(),
                }
            }
            _ => Value::from_yaml_typed(default, &field.field_type),
        }
    }

    /// Bindings of a named type's variables to its arguments.
    fn bindings_for(def: &TypeDefinition, args: &[TypeRef]) -> HashMap<String, TypeRef> {
        def.type_params
            .iter()
            .cloned()
            .zip(args.iter().cloned())
            .collect()
    }

    /// Declared and inherited fields of a named type.
    ///
    /// Declared fields come first, then each superclass in turn. A field
    /// shadows an inherited field of the same name. Static fields are
    /// included and flagged.
    pub fn fields_of(&self, ty: &TypeRef) -> Vec<FieldDescriptor> {
        let mut fields = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut current = ty.clone();

        while let TypeRef::Named { name, args } = &current {
            let Some(def) = self.get(name) else {
                break;
            };
            let bindings = Self::bindings_for(def, args);

            for field in &def.fields {
                if !seen.insert(field.name.clone()) {
                    continue;
                }
                fields.push(FieldDescriptor {
                    name: field.name.clone(),
                    field_type: field.field_type.substitute(&bindings),
                    declaring_type: def.name.clone(),
                    accessible: field.visibility == Visibility::Public,
                    is_static: field.is_static,
                    default: field.default.clone(),
                });
            }

            match &def.extends {
                Some(parent) => current = parent.substitute(&bindings),
                None => break,
            }
        }

        fields
    }

    /// All supertypes of a named type, transitively, with generic arguments
    /// substituted along the way.
    pub fn supertypes_of(&self, ty: &TypeRef) -> Vec<TypeRef> {
        let mut result = Vec::new();
        let mut visited = HashSet::new();
        self.collect_supertypes(ty, &mut result, &mut visited);
        result
    }

    fn collect_supertypes(
        &self,
        ty: &TypeRef,
        result: &mut Vec<TypeRef>,
        visited: &mut HashSet<TypeRef>,
    ) {
        let TypeRef::Named { name, args } = ty else {
            return;
        };
        let Some(def) = self.get(name) else {
            return;
        };
        let bindings = Self::bindings_for(def, args);

        for parent in def.extends.iter().chain(def.implements.iter()) {
            let parent = parent.substitute(&bindings);
            if visited.insert(parent.clone()) {
                result.push(parent.clone());
                self.collect_supertypes(&parent, result, visited);
            }
        }
    }
}
