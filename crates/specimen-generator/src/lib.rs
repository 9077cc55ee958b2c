//! Randomization engine for the specimen framework.
//!
//! This crate provides the [`RandomizationEngine`], which populates any type
//! described by a [`TypeCatalog`](specimen_core::TypeCatalog) with random
//! values. Every populate call runs on its own seeded context, so engines
//! built with the same seed reproduce the same values.
//!
//! # Architecture
//!
//! ```text
//!         TypeRef
//!            │
//!            ▼
//! ┌──────────────────────┐      ┌────────────────────┐
//! │  RandomizationEngine │─────▶│ RandomizerRegistry │  field → type → default
//! │                      │      └────────────────────┘
//! │  - catalog           │      ┌────────────────────┐
//! │  - parameters        │─────▶│ Array/Collection/  │  recurse per element
//! │  - seed              │      │ Map populators     │
//! └──────────┬───────────┘      └────────────────────┘
//!            │                  ┌────────────────────┐
//!            │─────────────────▶│ SubtypeScanner     │  abstract → concrete
//!            ▼                  └────────────────────┘
//!   RandomizationContext { rng, path, pool }
//! ```
//!
//! # Example
//!
//! ```rust
//! use specimen_core::{FieldKey, TypeCatalog, Value};
//! use specimen_generator::{ConstantRandomizer, RandomizationEngine};
//!
//! let catalog = TypeCatalog::from_yaml(r#"
//! types:
//!   - name: Person
//!     fields:
//!       - name: name
//!         type: string
//!       - name: nicknames
//!         type:
//!           type: set
//!           element: string
//! "#).unwrap();
//!
//! let engine = RandomizationEngine::builder(catalog)
//!     .seed(42)
//!     .collection_size(1, 3)
//!     .randomize_field(
//!         FieldKey::new("Person", "name"),
//!         ConstantRandomizer::new(Value::String("Alice".to_string())),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let person = engine.populate_named("Person").unwrap();
//! assert_eq!(person.to_json()["name"], "Alice");
//! ```

pub mod context;
pub mod engine;
pub mod error;
pub mod populators;
pub mod randomizers;
pub mod registry;
pub mod scanner;

// Re-exports for convenience
pub use context::RandomizationContext;
pub use engine::{EngineBuilder, RandomizationEngine};
pub use error::{GenerationCause, PopulateError, RandomizerError};
pub use randomizers::{ConstantRandomizer, DefaultRandomizers, Randomizer, SharedRandomizer};
pub use registry::RandomizerRegistry;
pub use scanner::SubtypeScanner;
