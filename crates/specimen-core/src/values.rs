//! Value representations for the specimen randomization engine.
//!
//! `Value` is the dynamic instance tree the engine produces: leaves for
//! primitives, containers for arrays, collections and maps, and
//! [`ObjectValue`] for composite types.

use crate::types::{CollectionKind, MapKind, PrimitiveKind, TypeRef};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde_json::json;
use serde_yaml::Value as YamlValue;
use std::cmp::Ordering;
use std::sync::Arc;
use uuid::Uuid;

/// Generated value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Null value
    Null,

    /// Boolean value
    Bool(bool),

    /// 8-bit signed integer
    Int8(i8),

    /// 16-bit signed integer
    Int16(i16),

    /// 32-bit signed integer
    Int32(i32),

    /// 64-bit signed integer
    Int64(i64),

    /// 32-bit floating point
    Float32(f32),

    /// 64-bit floating point
    Float64(f64),

    /// Single character
    Char(char),

    /// String value
    String(String),

    /// UUID value
    Uuid(Uuid),

    /// Date only
    Date(NaiveDate),

    /// Time only
    Time(NaiveTime),

    /// Date and time without timezone
    DateTime(NaiveDateTime),

    /// Date and time in UTC
    Timestamp(DateTime<Utc>),

    /// Array of values
    Array(Vec<Value>),

    /// Collection of values, in iteration order of its concrete kind
    Collection {
        /// Concrete collection kind
        kind: CollectionKind,
        /// Elements
        items: Vec<Value>,
    },

    /// Map entries, in iteration order of its concrete kind
    Map {
        /// Concrete map kind
        kind: MapKind,
        /// Key/value pairs; keys are unique
        entries: Vec<(Value, Value)>,
    },

    /// Enum constant
    Enum {
        /// Enum type name
        type_name: String,
        /// Constant name
        constant: String,
    },

    /// Composite instance; clones share the same instance
    Object(Arc<ObjectValue>),
}

impl From<ObjectValue> for Value {
    fn from(obj: ObjectValue) -> Self {
        Self::Object(Arc::new(obj))
    }
}

/// Error returned when assigning a field the instance does not have.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("type '{type_name}' has no field '{field}'")]
pub struct FieldAccessError {
    /// Instance type
    pub type_name: String,
    /// Requested field
    pub field: String,
}

/// Instance of a composite type.
///
/// Fields are kept in declaration order: declared fields first, then
/// inherited ones.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectValue {
    type_name: String,
    fields: Vec<(String, Value)>,
}

impl ObjectValue {
    /// Create an instance with no fields.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: Vec::new(),
        }
    }

    /// Create an instance from its field values.
    pub fn with_fields(type_name: impl Into<String>, fields: Vec<(String, Value)>) -> Self {
        Self {
            type_name: type_name.into(),
            fields,
        }
    }

    /// Name of the instance type.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Add a field slot at construction time.
    pub fn declare_field(&mut self, name: impl Into<String>, value: Value) {
        self.fields.push((name.into(), value));
    }

    /// Get a field value by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    /// Assign a field value.
    pub fn set_field(&mut self, name: &str, value: Value) -> Result<(), FieldAccessError> {
        match self.fields.iter_mut().find(|(field, _)| field == name) {
            Some((_, slot)) => {
                *slot = value;
                Ok(())
            }
            None => Err(FieldAccessError {
                type_name: self.type_name.clone(),
                field: name.to_string(),
            }),
        }
    }

    /// Iterate over fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Get the number of fields.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}

impl Value {
    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Try to get this value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get this value as an i32.
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Self::Int8(i) => Some(i32::from(*i)),
            Self::Int16(i) => Some(i32::from(*i)),
            Self::Int32(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get this value as an i64.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int64(i) => Some(*i),
            other => other.as_i32().map(i64::from),
        }
    }

    /// Try to get this value as an f64.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float32(f) => Some(f64::from(*f)),
            Self::Float64(f) => Some(*f),
            _ => None,
        }
    }

    /// Try to get this value as a char.
    pub fn as_char(&self) -> Option<char> {
        match self {
            Self::Char(c) => Some(*c),
            _ => None,
        }
    }

    /// Try to get this value as a string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get the elements of an array or collection.
    pub fn as_items(&self) -> Option<&[Value]> {
        match self {
            Self::Array(items) | Self::Collection { items, .. } => Some(items),
            _ => None,
        }
    }

    /// Try to get the entries of a map.
    pub fn as_entries(&self) -> Option<&[(Value, Value)]> {
        match self {
            Self::Map { entries, .. } => Some(entries),
            _ => None,
        }
    }

    /// Try to get this value as an object.
    pub fn as_object(&self) -> Option<&ObjectValue> {
        match self {
            Self::Object(obj) => Some(obj.as_ref()),
            _ => None,
        }
    }

    /// Name of the enum constant, if this is an enum value.
    pub fn as_enum_constant(&self) -> Option<&str> {
        match self {
            Self::Enum { constant, .. } => Some(constant),
            _ => None,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Bool(_) => 1,
            Self::Int8(_) | Self::Int16(_) | Self::Int32(_) | Self::Int64(_) => 2,
            Self::Float32(_) | Self::Float64(_) => 3,
            Self::Char(_) => 4,
            Self::String(_) => 5,
            Self::Uuid(_) => 6,
            Self::Date(_) => 7,
            Self::Time(_) => 8,
            Self::DateTime(_) => 9,
            Self::Timestamp(_) => 10,
            Self::Enum { .. } => 11,
            Self::Array(_) => 12,
            Self::Collection { .. } => 13,
            Self::Map { .. } => 14,
            Self::Object(_) => 15,
        }
    }

    /// Total order over values, used for sorted sets and sorted maps.
    ///
    /// Values of different variants order by variant; integers compare
    /// across widths and floats use IEEE total ordering.
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Char(a), Self::Char(b)) => a.cmp(b),
            (Self::String(a), Self::String(b)) => a.cmp(b),
            (Self::Uuid(a), Self::Uuid(b)) => a.cmp(b),
            (Self::Date(a), Self::Date(b)) => a.cmp(b),
            (Self::Time(a), Self::Time(b)) => a.cmp(b),
            (Self::DateTime(a), Self::DateTime(b)) => a.cmp(b),
            (Self::Timestamp(a), Self::Timestamp(b)) => a.cmp(b),
            (
                Self::Enum {
                    type_name: ta,
                    constant: ca,
                },
                Self::Enum {
                    type_name: tb,
                    constant: cb,
                },
            ) => ta.cmp(tb).then_with(|| ca.cmp(cb)),
            (Self::Array(a), Self::Array(b)) => cmp_slices(a, b),
            (Self::Collection { items: a, .. }, Self::Collection { items: b, .. }) => {
                cmp_slices(a, b)
            }
            (Self::Map { entries: a, .. }, Self::Map { entries: b, .. }) => {
                for ((ka, va), (kb, vb)) in a.iter().zip(b.iter()) {
                    let ord = ka.total_cmp(kb).then_with(|| va.total_cmp(vb));
                    if ord != Ordering::Equal {
                        return ord;
                    }
                }
                a.len().cmp(&b.len())
            }
            (Self::Object(a), Self::Object(b)) => {
                a.type_name.cmp(&b.type_name).then_with(|| {
                    for ((na, va), (nb, vb)) in a.fields.iter().zip(b.fields.iter()) {
                        let ord = na.cmp(nb).then_with(|| va.total_cmp(vb));
                        if ord != Ordering::Equal {
                            return ord;
                        }
                    }
                    a.fields.len().cmp(&b.fields.len())
                })
            }
            (a, b) if a.rank() == 2 && b.rank() == 2 => a.as_i64().cmp(&b.as_i64()),
            (a, b) if a.rank() == 3 && b.rank() == 3 => match (a.as_f64(), b.as_f64()) {
                (Some(x), Some(y)) => x.total_cmp(&y),
                _ => Ordering::Equal,
            },
            (a, b) => a.rank().cmp(&b.rank()),
        }
    }

    /// Convert a YAML value to a Value without type information.
    pub fn from_yaml(yaml: &YamlValue) -> Value {
        match yaml {
            YamlValue::Null => Value::Null,
            YamlValue::Bool(b) => Value::Bool(*b),
            YamlValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int64(i)
                } else if let Some(f) = n.as_f64() {
                    Value::Float64(f)
                } else {
                    Value::String(n.to_string())
                }
            }
            YamlValue::String(s) => Value::String(s.clone()),
            YamlValue::Sequence(arr) => Value::Array(arr.iter().map(Value::from_yaml).collect()),
            YamlValue::Mapping(map) => Value::Map {
                kind: MapKind::HashMap,
                entries: map
                    .iter()
                    .map(|(k, v)| (Value::from_yaml(k), Value::from_yaml(v)))
                    .collect(),
            },
            YamlValue::Tagged(tagged) => Value::from_yaml(&tagged.value),
        }
    }

    /// Convert a YAML value to a Value of the given type.
    ///
    /// Scalars that do not fit the target type fall back to the untyped
    /// conversion of [`Value::from_yaml`].
    pub fn from_yaml_typed(yaml: &YamlValue, target_type: &TypeRef) -> Value {
        if let YamlValue::Tagged(tagged) = yaml {
            return Value::from_yaml_typed(&tagged.value, target_type);
        }
        if yaml.is_null() {
            return Value::Null;
        }
        let typed = match (target_type, yaml) {
            (TypeRef::Primitive(kind), _) => primitive_from_yaml(*kind, yaml),
            (TypeRef::Array { element }, YamlValue::Sequence(items)) => Some(Value::Array(
                items
                    .iter()
                    .map(|item| Value::from_yaml_typed(item, element))
                    .collect(),
            )),
            (TypeRef::Collection { kind, element }, YamlValue::Sequence(items)) => {
                Some(Value::Collection {
                    kind: kind.concrete(),
                    items: items
                        .iter()
                        .map(|item| match element {
                            Some(element) => Value::from_yaml_typed(item, element),
                            None => Value::from_yaml(item),
                        })
                        .collect(),
                })
            }
            (TypeRef::Map { kind, key, value }, YamlValue::Mapping(map)) => Some(Value::Map {
                kind: kind.concrete(),
                entries: map
                    .iter()
                    .map(|(k, v)| {
                        let k = match key {
                            Some(key) => Value::from_yaml_typed(k, key),
                            None => Value::from_yaml(k),
                        };
                        let v = match value {
                            Some(value) => Value::from_yaml_typed(v, value),
                            None => Value::from_yaml(v),
                        };
                        (k, v)
                    })
                    .collect(),
            }),
            _ => None,
        };
        typed.unwrap_or_else(|| Value::from_yaml(yaml))
    }

    /// Convert to a JSON value for output.
    ///
    /// Maps whose keys are all strings, chars or enum constants become JSON
    /// objects; other maps become arrays of `[key, value]` pairs.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Null => serde_json::Value::Null,
            Self::Bool(b) => json!(*b),
            Self::Int8(i) => json!(*i),
            Self::Int16(i) => json!(*i),
            Self::Int32(i) => json!(*i),
            Self::Int64(i) => json!(*i),
            Self::Float32(f) => json!(*f),
            Self::Float64(f) => json!(*f),
            Self::Char(c) => json!(c.to_string()),
            Self::String(s) => json!(s),
            Self::Uuid(u) => json!(u.to_string()),
            Self::Date(d) => json!(d.format("%Y-%m-%d").to_string()),
            Self::Time(t) => json!(t.format("%H:%M:%S%.f").to_string()),
            Self::DateTime(dt) => json!(dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string()),
            Self::Timestamp(ts) => json!(ts.to_rfc3339()),
            Self::Enum { constant, .. } => json!(constant),
            Self::Array(items) | Self::Collection { items, .. } => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Self::Map { entries, .. } => {
                let keys: Option<Vec<String>> = entries
                    .iter()
                    .map(|(k, _)| match k {
                        Self::String(s) => Some(s.clone()),
                        Self::Char(c) => Some(c.to_string()),
                        Self::Enum { constant, .. } => Some(constant.clone()),
                        _ => None,
                    })
                    .collect();
                match keys {
                    Some(keys) => serde_json::Value::Object(
                        keys.into_iter()
                            .zip(entries.iter().map(|(_, v)| v.to_json()))
                            .collect(),
                    ),
                    None => serde_json::Value::Array(
                        entries
                            .iter()
                            .map(|(k, v)| json!([k.to_json(), v.to_json()]))
                            .collect(),
                    ),
                }
            }
            Self::Object(obj) => serde_json::Value::Object(
                obj.fields
                    .iter()
                    .map(|(name, value)| (name.clone(), value.to_json()))
                    .collect(),
            ),
        }
    }
}

fn cmp_slices(a: &[Value], b: &[Value]) -> Ordering {
    for (x, y) in a.iter().zip(b.iter()) {
        let ord = x.total_cmp(y);
        if ord != Ordering::Equal {
            return ord;
        }
    }
    a.len().cmp(&b.len())
}

fn primitive_from_yaml(kind: PrimitiveKind, yaml: &YamlValue) -> Option<Value> {
    match kind {
        PrimitiveKind::Bool => match yaml {
            YamlValue::Bool(b) => Some(Value::Bool(*b)),
            YamlValue::String(s) => match s.to_lowercase().as_str() {
                "true" | "1" | "yes" => Some(Value::Bool(true)),
                "false" | "0" | "no" => Some(Value::Bool(false)),
                _ => None,
            },
            _ => None,
        },
        PrimitiveKind::Int8 => yaml
            .as_i64()
            .and_then(|i| i8::try_from(i).ok())
            .map(Value::Int8),
        PrimitiveKind::Int16 => yaml
            .as_i64()
            .and_then(|i| i16::try_from(i).ok())
            .map(Value::Int16),
        PrimitiveKind::Int32 => yaml
            .as_i64()
            .and_then(|i| i32::try_from(i).ok())
            .map(Value::Int32),
        PrimitiveKind::Int64 => yaml.as_i64().map(Value::Int64),
        PrimitiveKind::Float32 => yaml.as_f64().map(|f| Value::Float32(f as f32)),
        PrimitiveKind::Float64 => yaml.as_f64().map(Value::Float64),
        PrimitiveKind::Char => {
            let s = yaml.as_str()?;
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(Value::Char(c)),
                _ => None,
            }
        }
        PrimitiveKind::String => match yaml {
            YamlValue::String(s) => Some(Value::String(s.clone())),
            YamlValue::Number(n) => Some(Value::String(n.to_string())),
            YamlValue::Bool(b) => Some(Value::String(b.to_string())),
            _ => None,
        },
        PrimitiveKind::Uuid => yaml
            .as_str()
            .and_then(|s| Uuid::parse_str(s).ok())
            .map(Value::Uuid),
        PrimitiveKind::Date => yaml
            .as_str()
            .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
            .map(Value::Date),
        PrimitiveKind::Time => yaml
            .as_str()
            .and_then(|s| NaiveTime::parse_from_str(s, "%H:%M:%S").ok())
            .map(Value::Time),
        PrimitiveKind::DateTime => yaml
            .as_str()
            .and_then(|s| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").ok())
            .map(Value::DateTime),
        PrimitiveKind::Timestamp => yaml
            .as_str()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| Value::Timestamp(dt.with_timezone(&Utc))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_accessors() {
        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert_eq!(Value::Int32(42).as_i32(), Some(42));
        assert_eq!(Value::Int64(100).as_i64(), Some(100));
        assert_eq!(Value::Float64(3.15).as_f64(), Some(3.15));
        assert_eq!(Value::String("test".to_string()).as_str(), Some("test"));
        assert_eq!(Value::Char('R').as_char(), Some('R'));

        // Cross-width conversions
        assert_eq!(Value::Int8(7).as_i64(), Some(7));
        assert_eq!(Value::Bool(true).as_i32(), None);
    }

    #[test]
    fn test_object_set_field() {
        let mut obj = ObjectValue::new("Person");
        obj.declare_field("name", Value::Null);

        obj.set_field("name", Value::String("Alice".to_string()))
            .unwrap();
        assert_eq!(obj.get("name"), Some(&Value::String("Alice".to_string())));

        let err = obj.set_field("age", Value::Int32(3)).unwrap_err();
        assert_eq!(err.type_name, "Person");
        assert_eq!(err.field, "age");
        assert_eq!(obj.field_count(), 1);
    }

    #[test]
    fn test_total_cmp() {
        assert_eq!(Value::Int8(3).total_cmp(&Value::Int64(2)), Ordering::Greater);
        assert_eq!(
            Value::Float64(f64::NAN).total_cmp(&Value::Float64(f64::NAN)),
            Ordering::Equal
        );
        assert_eq!(
            Value::String("a".into()).total_cmp(&Value::String("b".into())),
            Ordering::Less
        );
        assert_eq!(Value::Null.total_cmp(&Value::Bool(false)), Ordering::Less);
    }

    #[test]
    fn test_from_yaml_typed() {
        let yaml: YamlValue = serde_yaml::from_str("42").unwrap();
        assert_eq!(
            Value::from_yaml_typed(&yaml, &PrimitiveKind::Int16.into()),
            Value::Int16(42)
        );

        let yaml: YamlValue = serde_yaml::from_str("2024-02-29").unwrap();
        assert_eq!(
            Value::from_yaml_typed(&yaml, &PrimitiveKind::Date.into()),
            Value::Date(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap())
        );

        let yaml: YamlValue = serde_yaml::from_str("[a, b]").unwrap();
        let ty = TypeRef::collection(CollectionKind::Sequence, PrimitiveKind::Char.into());
        assert_eq!(
            Value::from_yaml_typed(&yaml, &ty),
            Value::Collection {
                kind: CollectionKind::Vec,
                items: vec![Value::Char('a'), Value::Char('b')],
            }
        );

        // Out of range for i8: keep the untyped value
        let yaml: YamlValue = serde_yaml::from_str("1000").unwrap();
        assert_eq!(
            Value::from_yaml_typed(&yaml, &PrimitiveKind::Int8.into()),
            Value::Int64(1000)
        );
    }

    #[test]
    fn test_to_json() {
        let obj = ObjectValue::with_fields(
            "Person",
            vec![
                ("name".to_string(), Value::String("Alice".to_string())),
                ("initial".to_string(), Value::Char('A')),
                (
                    "scores".to_string(),
                    Value::Map {
                        kind: MapKind::HashMap,
                        entries: vec![(Value::String("math".to_string()), Value::Int32(90))],
                    },
                ),
                (
                    "pairs".to_string(),
                    Value::Map {
                        kind: MapKind::BTreeMap,
                        entries: vec![(Value::Int32(1), Value::Bool(true))],
                    },
                ),
            ],
        );

        let json = Value::from(obj).to_json();
        assert_eq!(json["name"], "Alice");
        assert_eq!(json["initial"], "A");
        assert_eq!(json["scores"]["math"], 90);
        assert_eq!(json["pairs"], serde_json::json!([[1, true]]));

        // Declaration order, not alphabetical
        let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["name", "initial", "scores", "pairs"]);
    }

    #[test]
    fn test_object_clone_shares_instance() {
        let value = Value::from(ObjectValue::with_fields(
            "Node",
            vec![("value".to_string(), Value::Int32(1))],
        ));
        let copy = value.clone();

        assert_eq!(copy, value);
        assert!(std::ptr::eq(
            copy.as_object().unwrap(),
            value.as_object().unwrap()
        ));
    }
}
