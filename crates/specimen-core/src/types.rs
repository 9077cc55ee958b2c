//! Type descriptors for the specimen randomization engine.
//!
//! This module defines `TypeRef`, the handle the engine uses to describe the
//! shape of a value it must generate: primitives, arrays, collections, maps and
//! named catalog types (with optional generic arguments).

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// Leaf value kinds with a built-in default randomizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    /// Boolean value
    Bool,
    /// 8-bit signed integer
    Int8,
    /// 16-bit signed integer
    Int16,
    /// 32-bit signed integer
    Int32,
    /// 64-bit signed integer
    Int64,
    /// 32-bit IEEE 754 floating point
    Float32,
    /// 64-bit IEEE 754 floating point
    Float64,
    /// Single character
    Char,
    /// Character string
    String,
    /// UUID (128-bit)
    Uuid,
    /// Date only (YYYY-MM-DD)
    Date,
    /// Time only (HH:MM:SS)
    Time,
    /// Date and time without timezone
    DateTime,
    /// Date and time in UTC
    Timestamp,
}

impl PrimitiveKind {
    /// All primitive kinds, in declaration order.
    pub const ALL: [PrimitiveKind; 14] = [
        PrimitiveKind::Bool,
        PrimitiveKind::Int8,
        PrimitiveKind::Int16,
        PrimitiveKind::Int32,
        PrimitiveKind::Int64,
        PrimitiveKind::Float32,
        PrimitiveKind::Float64,
        PrimitiveKind::Char,
        PrimitiveKind::String,
        PrimitiveKind::Uuid,
        PrimitiveKind::Date,
        PrimitiveKind::Time,
        PrimitiveKind::DateTime,
        PrimitiveKind::Timestamp,
    ];

    /// Canonical keyword used in catalog files.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int8 => "i8",
            Self::Int16 => "i16",
            Self::Int32 => "i32",
            Self::Int64 => "i64",
            Self::Float32 => "f32",
            Self::Float64 => "f64",
            Self::Char => "char",
            Self::String => "string",
            Self::Uuid => "uuid",
            Self::Date => "date",
            Self::Time => "time",
            Self::DateTime => "date_time",
            Self::Timestamp => "timestamp",
        }
    }

    /// Parse a keyword (or one of its aliases).
    pub fn from_keyword(value: &str) -> Option<Self> {
        let kind = match value {
            "bool" | "boolean" => Self::Bool,
            "i8" | "byte" | "tiny_int" => Self::Int8,
            "i16" | "short" | "small_int" => Self::Int16,
            "i32" | "int" => Self::Int32,
            "i64" | "long" | "big_int" => Self::Int64,
            "f32" | "float" => Self::Float32,
            "f64" | "double" => Self::Float64,
            "char" => Self::Char,
            "string" | "text" => Self::String,
            "uuid" => Self::Uuid,
            "date" => Self::Date,
            "time" => Self::Time,
            "date_time" | "datetime" => Self::DateTime,
            "timestamp" | "timestamp_tz" => Self::Timestamp,
            _ => return None,
        };
        Some(kind)
    }

    /// Check if this kind is a numeric kind.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::Int8 | Self::Int16 | Self::Int32 | Self::Int64 | Self::Float32 | Self::Float64
        )
    }

    /// Check if this kind is a temporal kind.
    pub fn is_temporal(&self) -> bool {
        matches!(
            self,
            Self::Date | Self::Time | Self::DateTime | Self::Timestamp
        )
    }
}

/// Collection flavours, split into abstract kinds (interfaces) and the
/// concrete implementations they resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    /// Any collection
    Collection,
    /// Ordered sequence
    Sequence,
    /// Unordered unique elements
    Set,
    /// Ordered unique elements
    SortedSet,
    /// FIFO queue
    Queue,
    /// Growable array
    Vec,
    /// Double-ended queue
    VecDeque,
    /// Doubly-linked list
    LinkedList,
    /// Hash set
    HashSet,
    /// B-tree set
    BTreeSet,
}

impl CollectionKind {
    /// Canonical keyword used in catalog files.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Collection => "collection",
            Self::Sequence => "sequence",
            Self::Set => "set",
            Self::SortedSet => "sorted_set",
            Self::Queue => "queue",
            Self::Vec => "vec",
            Self::VecDeque => "vec_deque",
            Self::LinkedList => "linked_list",
            Self::HashSet => "hash_set",
            Self::BTreeSet => "btree_set",
        }
    }

    /// Parse a keyword (or one of its aliases).
    pub fn from_keyword(value: &str) -> Option<Self> {
        let kind = match value {
            "collection" => Self::Collection,
            "sequence" | "list" => Self::Sequence,
            "set" => Self::Set,
            "sorted_set" => Self::SortedSet,
            "queue" => Self::Queue,
            "vec" => Self::Vec,
            "vec_deque" | "deque" => Self::VecDeque,
            "linked_list" => Self::LinkedList,
            "hash_set" => Self::HashSet,
            "btree_set" => Self::BTreeSet,
            _ => return None,
        };
        Some(kind)
    }

    /// Check if this kind is an interface that needs a concrete implementation.
    pub fn is_abstract(&self) -> bool {
        matches!(
            self,
            Self::Collection | Self::Sequence | Self::Set | Self::SortedSet | Self::Queue
        )
    }

    /// Resolve to the concrete implementation used when populating.
    pub fn concrete(&self) -> Self {
        match self {
            Self::Collection | Self::Sequence => Self::Vec,
            Self::Queue => Self::VecDeque,
            Self::Set => Self::HashSet,
            Self::SortedSet => Self::BTreeSet,
            other => *other,
        }
    }

    /// Check if elements of this kind are unique.
    pub fn is_set(&self) -> bool {
        matches!(
            self,
            Self::Set | Self::SortedSet | Self::HashSet | Self::BTreeSet
        )
    }

    /// Check if elements of this kind are kept in sorted order.
    pub fn is_sorted(&self) -> bool {
        matches!(self, Self::SortedSet | Self::BTreeSet)
    }
}

/// Map flavours, split into abstract kinds and concrete implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapKind {
    /// Any map
    Map,
    /// Map ordered by key
    SortedMap,
    /// Hash map
    HashMap,
    /// B-tree map
    BTreeMap,
}

impl MapKind {
    /// Canonical keyword used in catalog files.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Map => "map",
            Self::SortedMap => "sorted_map",
            Self::HashMap => "hash_map",
            Self::BTreeMap => "btree_map",
        }
    }

    /// Parse a keyword.
    pub fn from_keyword(value: &str) -> Option<Self> {
        let kind = match value {
            "map" => Self::Map,
            "sorted_map" => Self::SortedMap,
            "hash_map" => Self::HashMap,
            "btree_map" => Self::BTreeMap,
            _ => return None,
        };
        Some(kind)
    }

    /// Check if this kind is an interface that needs a concrete implementation.
    pub fn is_abstract(&self) -> bool {
        matches!(self, Self::Map | Self::SortedMap)
    }

    /// Resolve to the concrete implementation used when populating.
    pub fn concrete(&self) -> Self {
        match self {
            Self::Map => Self::HashMap,
            Self::SortedMap => Self::BTreeMap,
            other => *other,
        }
    }

    /// Check if entries of this kind are kept in key order.
    pub fn is_sorted(&self) -> bool {
        matches!(self, Self::SortedMap | Self::BTreeMap)
    }
}

/// Handle to the shape of a type.
///
/// `TypeRef` is immutable and hashable, so it doubles as the key for
/// randomizer registrations and the per-type object pool.
///
/// # YAML Format
///
/// Primitives, wildcards and non-generic named types are plain strings:
/// ```yaml
/// type: i32
/// type: string
/// type: Person
/// type: "?"
/// ```
///
/// Containers and generic types use the object format:
/// ```yaml
/// type:
///   type: sequence
///   element: Person
/// type:
///   type: map
///   key: string
///   value: i64
/// type:
///   type: Repository
///   args: [Person]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// Leaf type with a default randomizer
    Primitive(PrimitiveKind),

    /// Fixed-size array
    Array {
        /// Component type
        element: Box<TypeRef>,
    },

    /// Collection; `element` is `None` for a raw collection
    Collection {
        /// Requested collection flavour
        kind: CollectionKind,
        /// Element type
        element: Option<Box<TypeRef>>,
    },

    /// Key/value map; missing key or value types make the map raw
    Map {
        /// Requested map flavour
        kind: MapKind,
        /// Key type
        key: Option<Box<TypeRef>>,
        /// Value type
        value: Option<Box<TypeRef>>,
    },

    /// Type defined in the catalog
    Named {
        /// Type name
        name: String,
        /// Generic arguments
        args: Vec<TypeRef>,
    },

    /// Generic type variable of the enclosing definition
    Param(String),

    /// Unknown type argument
    Wildcard,
}

impl TypeRef {
    /// Create a primitive type.
    pub fn primitive(kind: PrimitiveKind) -> Self {
        Self::Primitive(kind)
    }

    /// Create a non-generic named type.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Create a named type with generic arguments.
    pub fn generic(name: impl Into<String>, args: Vec<TypeRef>) -> Self {
        Self::Named {
            name: name.into(),
            args,
        }
    }

    /// Create an array type.
    pub fn array(element: TypeRef) -> Self {
        Self::Array {
            element: Box::new(element),
        }
    }

    /// Create a collection type with the given element type.
    pub fn collection(kind: CollectionKind, element: TypeRef) -> Self {
        Self::Collection {
            kind,
            element: Some(Box::new(element)),
        }
    }

    /// Create a collection type without element information.
    pub fn raw_collection(kind: CollectionKind) -> Self {
        Self::Collection {
            kind,
            element: None,
        }
    }

    /// Create a map type with the given key and value types.
    pub fn map(kind: MapKind, key: TypeRef, value: TypeRef) -> Self {
        Self::Map {
            kind,
            key: Some(Box::new(key)),
            value: Some(Box::new(value)),
        }
    }

    /// Create a generic type variable.
    pub fn param(name: impl Into<String>) -> Self {
        Self::Param(name.into())
    }

    /// Name of the catalog type, if this is a named type.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Named { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Generic arguments of a named type (empty for everything else).
    pub fn args(&self) -> &[TypeRef] {
        match self {
            Self::Named { args, .. } => args,
            _ => &[],
        }
    }

    /// Check if this type is a collection type.
    pub fn is_collection(&self) -> bool {
        matches!(self, Self::Collection { .. })
    }

    /// Check if this type is a map type.
    pub fn is_map(&self) -> bool {
        matches!(self, Self::Map { .. })
    }

    /// Check if this type is an array type.
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array { .. })
    }

    /// Check if this is the character primitive.
    pub fn is_char(&self) -> bool {
        matches!(self, Self::Primitive(PrimitiveKind::Char))
    }

    /// Replace generic type variables with their bindings.
    ///
    /// Variables without a binding are left untouched.
    pub fn substitute(&self, bindings: &HashMap<String, TypeRef>) -> TypeRef {
        if bindings.is_empty() {
            return self.clone();
        }
        match self {
            Self::Param(name) => bindings
                .get(name)
                .cloned()
                .unwrap_or_else(|| self.clone()),
            Self::Array { element } => Self::array(element.substitute(bindings)),
            Self::Collection { kind, element } => Self::Collection {
                kind: *kind,
                element: element
                    .as_ref()
                    .map(|e| Box::new(e.substitute(bindings))),
            },
            Self::Map { kind, key, value } => Self::Map {
                kind: *kind,
                key: key.as_ref().map(|k| Box::new(k.substitute(bindings))),
                value: value.as_ref().map(|v| Box::new(v.substitute(bindings))),
            },
            Self::Named { name, args } => Self::Named {
                name: name.clone(),
                args: args.iter().map(|a| a.substitute(bindings)).collect(),
            },
            Self::Primitive(_) | Self::Wildcard => self.clone(),
        }
    }

    /// Turn bare names that match one of `params` into type variables.
    pub(crate) fn normalize_params(&mut self, params: &[String]) {
        match self {
            Self::Named { name, args } => {
                if args.is_empty() && params.iter().any(|p| p == name) {
                    *self = Self::Param(std::mem::take(name));
                } else {
                    args.iter_mut().for_each(|a| a.normalize_params(params));
                }
            }
            Self::Array { element } => element.normalize_params(params),
            Self::Collection { element, .. } => {
                if let Some(element) = element {
                    element.normalize_params(params);
                }
            }
            Self::Map { key, value, .. } => {
                if let Some(key) = key {
                    key.normalize_params(params);
                }
                if let Some(value) = value {
                    value.normalize_params(params);
                }
            }
            Self::Primitive(_) | Self::Param(_) | Self::Wildcard => {}
        }
    }

    /// Visit every named type referenced by this type (including nested ones).
    pub(crate) fn for_each_named<'a>(&'a self, f: &mut impl FnMut(&'a str)) {
        match self {
            Self::Named { name, args } => {
                f(name);
                args.iter().for_each(|a| a.for_each_named(f));
            }
            Self::Array { element } => element.for_each_named(f),
            Self::Collection { element, .. } => {
                if let Some(element) = element {
                    element.for_each_named(f);
                }
            }
            Self::Map { key, value, .. } => {
                if let Some(key) = key {
                    key.for_each_named(f);
                }
                if let Some(value) = value {
                    value.for_each_named(f);
                }
            }
            Self::Primitive(_) | Self::Param(_) | Self::Wildcard => {}
        }
    }
}

impl From<PrimitiveKind> for TypeRef {
    fn from(kind: PrimitiveKind) -> Self {
        Self::Primitive(kind)
    }
}

fn fmt_optional(f: &mut fmt::Formatter<'_>, ty: &Option<Box<TypeRef>>) -> fmt::Result {
    match ty {
        Some(ty) => write!(f, "{ty}"),
        None => f.write_str("?"),
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(kind) => f.write_str(kind.keyword()),
            Self::Array { element } => write!(f, "[{element}]"),
            Self::Collection { kind, element } => {
                write!(f, "{}<", kind.keyword())?;
                fmt_optional(f, element)?;
                f.write_str(">")
            }
            Self::Map { kind, key, value } => {
                write!(f, "{}<", kind.keyword())?;
                fmt_optional(f, key)?;
                f.write_str(", ")?;
                fmt_optional(f, value)?;
                f.write_str(">")
            }
            Self::Named { name, args } => {
                f.write_str(name)?;
                if !args.is_empty() {
                    f.write_str("<")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{arg}")?;
                    }
                    f.write_str(">")?;
                }
                Ok(())
            }
            Self::Param(name) => f.write_str(name),
            Self::Wildcard => f.write_str("?"),
        }
    }
}

// Custom serialization/deserialization for TypeRef
// Supports both simple string format ("i32", "Person") and object format ({"type": "sequence", "element": "Person"})

impl Serialize for TypeRef {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeMap;

        match self {
            Self::Primitive(kind) => serializer.serialize_str(kind.keyword()),
            Self::Wildcard => serializer.serialize_str("?"),
            Self::Named { name, args } if args.is_empty() => serializer.serialize_str(name),
            Self::Named { name, args } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", name)?;
                map.serialize_entry("args", args)?;
                map.end()
            }
            Self::Param(name) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "param")?;
                map.serialize_entry("name", name)?;
                map.end()
            }
            Self::Array { element } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "array")?;
                map.serialize_entry("element", element)?;
                map.end()
            }
            Self::Collection { kind, element } => {
                let mut map = serializer.serialize_map(None)?;
                map.serialize_entry("type", kind.keyword())?;
                if let Some(element) = element {
                    map.serialize_entry("element", element)?;
                }
                map.end()
            }
            Self::Map { kind, key, value } => {
                let mut map = serializer.serialize_map(None)?;
                map.serialize_entry("type", kind.keyword())?;
                if let Some(key) = key {
                    map.serialize_entry("key", key)?;
                }
                if let Some(value) = value {
                    map.serialize_entry("value", value)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for TypeRef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{Error, MapAccess, Visitor};

        struct TypeRefVisitor;

        impl<'de> Visitor<'de> for TypeRefVisitor {
            type Value = TypeRef;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string or map representing a TypeRef")
            }

            // Handle string format: "i32", "Person", "?"
            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: Error,
            {
                if value.is_empty() {
                    return Err(E::custom("type name must not be empty"));
                }
                if value == "?" {
                    return Ok(TypeRef::Wildcard);
                }
                if value == "array" {
                    return Err(E::custom("array type requires an element type"));
                }
                if let Some(kind) = PrimitiveKind::from_keyword(value) {
                    return Ok(TypeRef::Primitive(kind));
                }
                if let Some(kind) = CollectionKind::from_keyword(value) {
                    return Ok(TypeRef::raw_collection(kind));
                }
                if let Some(kind) = MapKind::from_keyword(value) {
                    return Ok(TypeRef::Map {
                        kind,
                        key: None,
                        value: None,
                    });
                }
                Ok(TypeRef::named(value))
            }

            // Handle map format: {"type": "sequence", "element": "Person"}
            fn visit_map<M>(self, mut map: M) -> Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut type_name: Option<String> = None;
                let mut fields: HashMap<String, serde_yaml::Value> = HashMap::new();

                while let Some(key) = map.next_key::<String>()? {
                    if key == "type" {
                        type_name = Some(map.next_value()?);
                    } else {
                        fields.insert(key, map.next_value()?);
                    }
                }

                let type_name = type_name.ok_or_else(|| M::Error::missing_field("type"))?;

                match type_name.as_str() {
                    "array" => {
                        let element: TypeRef = get_field_required(&fields, "element")?;
                        Ok(TypeRef::array(element))
                    }
                    "param" => {
                        let name: String = get_field_required(&fields, "name")?;
                        Ok(TypeRef::Param(name))
                    }
                    "?" | "wildcard" => Ok(TypeRef::Wildcard),
                    other => {
                        if let Some(kind) = PrimitiveKind::from_keyword(other) {
                            return Ok(TypeRef::Primitive(kind));
                        }
                        if let Some(kind) = CollectionKind::from_keyword(other) {
                            let element: Option<TypeRef> = get_field_optional(&fields, "element")?;
                            return Ok(TypeRef::Collection {
                                kind,
                                element: element.map(Box::new),
                            });
                        }
                        if let Some(kind) = MapKind::from_keyword(other) {
                            let key: Option<TypeRef> = get_field_optional(&fields, "key")?;
                            let value: Option<TypeRef> = get_field_optional(&fields, "value")?;
                            return Ok(TypeRef::Map {
                                kind,
                                key: key.map(Box::new),
                                value: value.map(Box::new),
                            });
                        }
                        if other.is_empty() {
                            return Err(M::Error::custom("type name must not be empty"));
                        }
                        let args: Option<Vec<TypeRef>> = get_field_optional(&fields, "args")?;
                        Ok(TypeRef::generic(other, args.unwrap_or_default()))
                    }
                }
            }
        }

        deserializer.deserialize_any(TypeRefVisitor)
    }
}

// Helper functions for deserialization
fn get_field_optional<T: for<'de> Deserialize<'de>, E: serde::de::Error>(
    fields: &HashMap<String, serde_yaml::Value>,
    key: &'static str,
) -> Result<Option<T>, E> {
    match fields.get(key) {
        None | Some(serde_yaml::Value::Null) => Ok(None),
        Some(value) => serde_yaml::from_value(value.clone())
            .map(Some)
            .map_err(|e| E::custom(format!("invalid field '{key}': {e}"))),
    }
}

fn get_field_required<T: for<'de> Deserialize<'de>, E: serde::de::Error>(
    fields: &HashMap<String, serde_yaml::Value>,
    key: &'static str,
) -> Result<T, E> {
    get_field_optional(fields, key)?.ok_or_else(|| E::missing_field(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_simple_string() {
        let parsed: TypeRef = serde_yaml::from_str("i32").unwrap();
        assert_eq!(parsed, TypeRef::Primitive(PrimitiveKind::Int32));

        let parsed: TypeRef = serde_yaml::from_str("int").unwrap();
        assert_eq!(parsed, TypeRef::Primitive(PrimitiveKind::Int32));

        let parsed: TypeRef = serde_yaml::from_str("Person").unwrap();
        assert_eq!(parsed, TypeRef::named("Person"));

        let parsed: TypeRef = serde_yaml::from_str("'?'").unwrap();
        assert_eq!(parsed, TypeRef::Wildcard);

        let parsed: TypeRef = serde_yaml::from_str("sequence").unwrap();
        assert_eq!(parsed, TypeRef::raw_collection(CollectionKind::Sequence));
    }

    #[test]
    fn test_deserialize_complex_types() {
        let yaml = r#"
type: sequence
element: Person
"#;
        let parsed: TypeRef = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            parsed,
            TypeRef::collection(CollectionKind::Sequence, TypeRef::named("Person"))
        );

        let yaml = r#"
type: map
key: string
value:
  type: array
  element: i64
"#;
        let parsed: TypeRef = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            parsed,
            TypeRef::map(
                MapKind::Map,
                PrimitiveKind::String.into(),
                TypeRef::array(PrimitiveKind::Int64.into())
            )
        );

        let yaml = r#"
type: Repository
args: [Person, uuid]
"#;
        let parsed: TypeRef = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            parsed,
            TypeRef::generic(
                "Repository",
                vec![TypeRef::named("Person"), PrimitiveKind::Uuid.into()]
            )
        );
    }

    #[test]
    fn test_array_requires_element() {
        assert!(serde_yaml::from_str::<TypeRef>("array").is_err());
        assert!(serde_yaml::from_str::<TypeRef>("type: array").is_err());
    }

    #[test]
    fn test_serialize_deserialize_roundtrip() {
        let types = vec![
            TypeRef::Primitive(PrimitiveKind::Bool),
            TypeRef::named("Person"),
            TypeRef::array(PrimitiveKind::Char.into()),
            TypeRef::raw_collection(CollectionKind::Set),
            TypeRef::map(
                MapKind::SortedMap,
                PrimitiveKind::String.into(),
                TypeRef::named("Address"),
            ),
            TypeRef::generic("Box", vec![TypeRef::param("T")]),
            TypeRef::Wildcard,
        ];

        for ty in types {
            let yaml = serde_yaml::to_string(&ty).unwrap();
            let parsed: TypeRef = serde_yaml::from_str(&yaml).unwrap();
            assert_eq!(ty, parsed);
        }
    }

    #[test]
    fn test_display() {
        let ty = TypeRef::map(
            MapKind::Map,
            PrimitiveKind::String.into(),
            TypeRef::collection(CollectionKind::Sequence, TypeRef::named("Person")),
        );
        assert_eq!(ty.to_string(), "map<string, sequence<Person>>");
        assert_eq!(TypeRef::array(PrimitiveKind::Int32.into()).to_string(), "[i32]");
        assert_eq!(
            TypeRef::generic("Pair", vec![PrimitiveKind::Int8.into(), TypeRef::Wildcard]).to_string(),
            "Pair<i8, ?>"
        );
    }

    #[test]
    fn test_substitute_and_normalize() {
        let mut ty = TypeRef::collection(CollectionKind::Sequence, TypeRef::named("T"));
        ty.normalize_params(&["T".to_string()]);
        assert_eq!(
            ty,
            TypeRef::collection(CollectionKind::Sequence, TypeRef::param("T"))
        );

        let bindings = HashMap::from([("T".to_string(), TypeRef::named("Person"))]);
        assert_eq!(
            ty.substitute(&bindings),
            TypeRef::collection(CollectionKind::Sequence, TypeRef::named("Person"))
        );
    }

    #[test]
    fn test_kind_resolution() {
        assert_eq!(CollectionKind::Sequence.concrete(), CollectionKind::Vec);
        assert_eq!(CollectionKind::SortedSet.concrete(), CollectionKind::BTreeSet);
        assert_eq!(CollectionKind::LinkedList.concrete(), CollectionKind::LinkedList);
        assert!(CollectionKind::Set.is_abstract());
        assert!(!CollectionKind::HashSet.is_abstract());
        assert_eq!(MapKind::SortedMap.concrete(), MapKind::BTreeMap);
        assert!(MapKind::Map.is_abstract());
    }
}
