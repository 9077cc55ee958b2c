//! Core types for the specimen randomization engine.
//!
//! This crate describes the types the engine populates and the values it
//! produces:
//!
//! - [`TypeRef`] - Type descriptor (primitives, arrays, collections, maps, named types)
//! - [`TypeCatalog`] - Named type definitions loaded from YAML
//! - [`TypeShape`] / [`FieldDescriptor`] - Introspection used by the engine
//! - [`Value`] - Generated instance tree
//! - [`RandomizationParameters`] - Tunables, loadable from TOML
//!
//! # Architecture
//!
//! ```text
//! specimen-core (this crate)
//!    │
//!    └─── specimen-generator  (randomizers, registry, engine)
//!            │
//!            └─── specimen    (CLI)
//! ```
//!
//! # Example
//!
//! ```rust
//! use specimen_core::{TypeCatalog, TypeRef, TypeShape};
//!
//! let catalog = TypeCatalog::from_yaml(r#"
//! version: 1
//! types:
//!   - name: Person
//!     fields:
//!       - name: name
//!         type: string
//!       - name: friends
//!         type:
//!           type: sequence
//!           element: Person
//! "#).unwrap();
//!
//! let person = TypeRef::named("Person");
//! assert!(matches!(catalog.shape_of(&person), TypeShape::Composite(_)));
//! assert_eq!(catalog.fields_of(&person).len(), 2);
//! ```

pub mod catalog;
pub mod introspect;
pub mod parameters;
pub mod types;
pub mod values;

// Re-exports for convenience
pub use catalog::{
    CatalogError, FieldDefinition, TypeCatalog, TypeDefinition, TypeKind, Visibility,
};
pub use introspect::{FieldDescriptor, FieldKey, TypeShape};
pub use parameters::{Charset, ParametersError, RandomizationParameters, Range};
pub use types::{CollectionKind, MapKind, PrimitiveKind, TypeRef};
pub use values::{FieldAccessError, ObjectValue, Value};
