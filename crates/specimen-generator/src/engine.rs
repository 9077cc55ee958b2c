//! Randomization engine.
//!
//! The engine populates a value of any catalog type. For each type it applies
//! the first matching strategy:
//!
//! 1. a randomizer registered for the field or type (or a primitive default)
//! 2. array, collection and map populators
//! 3. a uniformly chosen enum constant
//! 4. a concrete subtype of an abstract type, when scanning is enabled
//! 5. field-by-field population of a composite type
//!
//! Composite population stops at the maximum depth and on cycles; the branch
//! then gets a pooled instance of the type, or an instance with every field
//! at its construction value. Pooled instances are shared, never copied.

use crate::context::RandomizationContext;
use crate::error::{GenerationCause, PopulateError};
use crate::populators::{ArrayPopulator, CollectionPopulator, MapPopulator, ValueSource};
use crate::randomizers::{Randomizer, SharedRandomizer};
use crate::registry::RandomizerRegistry;
use crate::scanner::SubtypeScanner;
use chrono::{NaiveDate, NaiveTime};
use rand::seq::SliceRandom;
use specimen_core::{
    Charset, FieldDescriptor, FieldKey, ObjectValue, ParametersError, RandomizationParameters,
    Range, TypeCatalog, TypeDefinition, TypeRef, TypeShape, Value,
};
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, trace};

/// Golden-ratio increment used to derive per-call seeds.
const SEED_MIX: u64 = 0x9E3779B97F4A7C15;

/// Engine that populates catalog types with random values.
///
/// The engine is read-only after [`EngineBuilder::build`] and may be shared
/// across threads; each populate call uses its own context.
#[derive(Debug)]
pub struct RandomizationEngine {
    catalog: Arc<TypeCatalog>,
    parameters: RandomizationParameters,
    registry: RandomizerRegistry,
    excluded: HashSet<FieldKey>,
    scanner: SubtypeScanner,
    arrays: ArrayPopulator,
    collections: CollectionPopulator,
    maps: MapPopulator,
    seed: u64,
    calls: AtomicU64,
}

impl RandomizationEngine {
    /// Start building an engine over a catalog.
    pub fn builder(catalog: TypeCatalog) -> EngineBuilder {
        EngineBuilder::new(catalog)
    }

    /// Get the type catalog.
    pub fn catalog(&self) -> &TypeCatalog {
        &self.catalog
    }

    /// Get the parameters the engine was built with.
    pub fn parameters(&self) -> &RandomizationParameters {
        &self.parameters
    }

    /// Get the base seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Create a fresh context for one populate call.
    ///
    /// Each context gets its own seed derived from the base seed and the
    /// number of contexts created so far, so two engines built with the same
    /// seed produce the same sequence of values.
    pub fn new_context(&self) -> RandomizationContext {
        let index = self.calls.fetch_add(1, Ordering::Relaxed);
        RandomizationContext::new(self.seed.wrapping_add(index.wrapping_mul(SEED_MIX)))
    }

    /// Populate a value of the given type.
    pub fn populate(&self, ty: &TypeRef) -> Result<Value, PopulateError> {
        let mut ctx = self.new_context();
        self.populate_with_context(ty, &mut ctx)
    }

    /// Populate a value of a catalog type by name.
    pub fn populate_named(&self, name: &str) -> Result<Value, PopulateError> {
        self.populate(&TypeRef::named(name))
    }

    /// Populate several independent values of the given type.
    pub fn populate_many(&self, ty: &TypeRef, count: usize) -> Result<Vec<Value>, PopulateError> {
        (0..count).map(|_| self.populate(ty)).collect()
    }

    /// Populate a value using a caller-provided context.
    pub fn populate_with_context(
        &self,
        ty: &TypeRef,
        ctx: &mut RandomizationContext,
    ) -> Result<Value, PopulateError> {
        debug!("Populating {}", ty);
        self.populate_type(ty, None, ctx)
    }

    fn populate_type(
        &self,
        ty: &TypeRef,
        origin: Option<&FieldDescriptor>,
        ctx: &mut RandomizationContext,
    ) -> Result<Value, PopulateError> {
        let randomizer = match origin {
            Some(field) => self.registry.randomizer_for_field_or_type(&field.key(), ty),
            None => self.registry.randomizer_for_type(ty),
        };
        if let Some(randomizer) = randomizer {
            return self.invoke(randomizer, ty, origin, ctx);
        }

        match self.catalog.shape_of(ty) {
            TypeShape::Array { element } => self.arrays.populate(self, element, ctx),
            TypeShape::Collection { kind, element } => {
                self.collections.populate(self, kind, element, ctx)
            }
            TypeShape::Map { kind, key, value } => self.maps.populate(self, kind, key, value, ctx),
            TypeShape::Enum(def) => match def.constants.choose(ctx.rng()) {
                Some(constant) => Ok(Value::Enum {
                    type_name: def.name.clone(),
                    constant: constant.clone(),
                }),
                None => Err(PopulateError::EmptyEnum(def.name.clone())),
            },
            TypeShape::Abstract(def) => self.populate_abstract(ty, def, ctx),
            TypeShape::Composite(def) => self.populate_composite(ty, def, ctx),
            TypeShape::Unknown(name) => Err(PopulateError::generation(
                name,
                origin.map(|f| f.name.as_str()),
                GenerationCause::UnknownType,
            )),
            // Primitives always have a default randomizer
            TypeShape::Primitive(_) | TypeShape::Unresolved => Ok(Value::Null),
        }
    }

    fn invoke(
        &self,
        randomizer: &dyn Randomizer,
        ty: &TypeRef,
        origin: Option<&FieldDescriptor>,
        ctx: &mut RandomizationContext,
    ) -> Result<Value, PopulateError> {
        randomizer
            .random_value(ctx.rng())
            .map_err(|e| match origin {
                Some(field) => PopulateError::generation(
                    field.declaring_type.as_str(),
                    Some(&field.name),
                    e,
                ),
                None => PopulateError::generation(ty.to_string(), None, e),
            })
    }

    fn populate_abstract(
        &self,
        ty: &TypeRef,
        def: &TypeDefinition,
        ctx: &mut RandomizationContext,
    ) -> Result<Value, PopulateError> {
        if !self.parameters.scan_classpath_for_concrete_types {
            return Err(PopulateError::NoConcreteSubtype(ty.to_string()));
        }

        let candidates = self.scanner.concrete_subtypes(ty);
        let Some(concrete) = candidates.choose(ctx.rng()) else {
            return Err(PopulateError::NoConcreteSubtype(ty.to_string()));
        };
        trace!("Resolved {} to {}", def.name, concrete);

        match self.catalog.shape_of(concrete) {
            TypeShape::Composite(concrete_def) => {
                self.populate_composite(concrete, concrete_def, ctx)
            }
            _ => Err(PopulateError::NoConcreteSubtype(ty.to_string())),
        }
    }

    /// Instance with every non-static field at its construction value.
    fn instantiate(&self, ty: &TypeRef, fields: &[FieldDescriptor]) -> ObjectValue {
        let mut instance = ObjectValue::new(ty.to_string());
        for field in fields.iter().filter(|f| !f.is_static) {
            instance.declare_field(&field.name, self.catalog.initial_value(field));
        }
        instance
    }

    fn should_populate(&self, field: &FieldDescriptor) -> bool {
        if field.is_static || self.excluded.contains(&field.key()) {
            return false;
        }
        !field.has_default() || self.parameters.override_default_initialization
    }

    fn populate_composite(
        &self,
        ty: &TypeRef,
        def: &TypeDefinition,
        ctx: &mut RandomizationContext,
    ) -> Result<Value, PopulateError> {
        let max_pool_size = self.parameters.max_object_pool_size;
        if max_pool_size > 0 && ctx.pooled_count(ty) >= max_pool_size {
            if let Some(pooled) = ctx.random_pooled(ty) {
                trace!("Reusing pooled instance of {}", ty);
                return Ok(pooled);
            }
        }

        let fields = self.catalog.fields_of(ty);

        if ctx.depth() >= self.parameters.max_randomization_depth || ctx.is_cyclic() {
            debug!(
                "Stopping at {} (depth {}, path {:?})",
                def.name,
                ctx.depth(),
                ctx.path().last()
            );
            return Ok(match ctx.random_pooled(ty) {
                Some(pooled) => pooled,
                None => Value::from(self.instantiate(ty, &fields)),
            });
        }

        let substitutions = ctx.substitutions();
        let mut instance = self.instantiate(ty, &fields);
        for field in fields.iter().filter(|f| self.should_populate(f)) {
            ctx.push_field(field.key());
            let result = self.populate_type(&field.field_type, Some(field), ctx);
            ctx.pop_field();

            instance
                .set_field(&field.name, result?)
                .map_err(|e| PopulateError::generation(ty.to_string(), Some(&field.name), e))?;
        }

        let value = Value::from(instance);
        // Instances holding pooled substitutes stay out of the pool
        if ctx.substitutions() == substitutions {
            ctx.offer_to_pool(ty, value.clone(), max_pool_size);
        }
        Ok(value)
    }
}

impl ValueSource for RandomizationEngine {
    fn populate_value(
        &self,
        ty: &TypeRef,
        ctx: &mut RandomizationContext,
    ) -> Result<Value, PopulateError> {
        self.populate_type(ty, None, ctx)
    }

    fn is_populatable(&self, ty: &TypeRef) -> bool {
        self.catalog.is_populatable(ty)
    }
}

/// Builder for [`RandomizationEngine`].
pub struct EngineBuilder {
    catalog: TypeCatalog,
    parameters: RandomizationParameters,
    type_randomizers: Vec<(TypeRef, SharedRandomizer)>,
    field_randomizers: Vec<(FieldKey, SharedRandomizer)>,
    excluded: HashSet<FieldKey>,
}

impl EngineBuilder {
    /// Create a builder with default parameters.
    pub fn new(catalog: TypeCatalog) -> Self {
        Self {
            catalog,
            parameters: RandomizationParameters::default(),
            type_randomizers: Vec::new(),
            field_randomizers: Vec::new(),
            excluded: HashSet::new(),
        }
    }

    /// Replace all parameters.
    pub fn parameters(mut self, parameters: RandomizationParameters) -> Self {
        self.parameters = parameters;
        self
    }

    /// Set the seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.parameters.seed = Some(seed);
        self
    }

    /// Set the collection size range.
    pub fn collection_size(mut self, min: usize, max: usize) -> Self {
        self.parameters.collection_size = Range::new(min, max);
        self
    }

    /// Set the string length range.
    pub fn string_length(mut self, min: usize, max: usize) -> Self {
        self.parameters.string_length = Range::new(min, max);
        self
    }

    /// Set the number of pooled instances per type.
    pub fn max_object_pool_size(mut self, size: usize) -> Self {
        self.parameters.max_object_pool_size = size;
        self
    }

    /// Set the maximum randomization depth.
    pub fn max_randomization_depth(mut self, depth: usize) -> Self {
        self.parameters.max_randomization_depth = depth;
        self
    }

    /// Set the charset.
    pub fn charset(mut self, charset: Charset) -> Self {
        self.parameters.charset = charset;
        self
    }

    /// Enable or disable resolving abstract types to concrete subtypes.
    pub fn scan_classpath_for_concrete_types(mut self, scan: bool) -> Self {
        self.parameters.scan_classpath_for_concrete_types = scan;
        self
    }

    /// Populate fields even when they have a default value.
    pub fn override_default_initialization(mut self, enabled: bool) -> Self {
        self.parameters.override_default_initialization = enabled;
        self
    }

    /// Set the date range.
    pub fn date_range(mut self, min: NaiveDate, max: NaiveDate) -> Self {
        self.parameters.date_range = Range::new(min, max);
        self
    }

    /// Set the time range.
    pub fn time_range(mut self, min: NaiveTime, max: NaiveTime) -> Self {
        self.parameters.time_range = Range::new(min, max);
        self
    }

    /// Use a randomizer for every value of the given type.
    pub fn randomize_type(mut self, ty: TypeRef, randomizer: impl Randomizer + 'static) -> Self {
        self.type_randomizers.push((ty, Arc::new(randomizer)));
        self
    }

    /// Use a randomizer for one field.
    pub fn randomize_field(mut self, key: FieldKey, randomizer: impl Randomizer + 'static) -> Self {
        self.field_randomizers.push((key, Arc::new(randomizer)));
        self
    }

    /// Leave a field at its construction value.
    pub fn exclude_field(mut self, key: FieldKey) -> Self {
        self.excluded.insert(key);
        self
    }

    /// Validate the parameters and build the engine.
    pub fn build(self) -> Result<RandomizationEngine, ParametersError> {
        self.parameters.validate()?;

        let seed = self.parameters.seed.unwrap_or_else(rand::random);
        let mut registry = RandomizerRegistry::new(&self.parameters);
        for (ty, randomizer) in self.type_randomizers {
            registry.register_type_shared(ty, randomizer);
        }
        for (key, randomizer) in self.field_randomizers {
            registry.register_field_shared(key, randomizer);
        }

        debug!(
            "Built engine over {} types with seed {} and {} custom randomizers",
            self.catalog.len(),
            seed,
            registry.len()
        );

        let size = self.parameters.collection_size;
        let catalog = Arc::new(self.catalog);
        Ok(RandomizationEngine {
            scanner: SubtypeScanner::new(Arc::clone(&catalog)),
            catalog,
            parameters: self.parameters,
            registry,
            excluded: self.excluded,
            arrays: ArrayPopulator::new(size),
            collections: CollectionPopulator::new(size),
            maps: MapPopulator::new(size),
            seed,
            calls: AtomicU64::new(0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RandomizerError;
    use crate::randomizers::ConstantRandomizer;
    use rand::RngCore;
    use specimen_core::{FieldDefinition, PrimitiveKind};

    fn catalog() -> TypeCatalog {
        TypeCatalog::new(vec![
            TypeDefinition::class("Person")
                .with_field(FieldDefinition::new("name", PrimitiveKind::String.into()))
                .with_field(FieldDefinition::new("age", PrimitiveKind::Int32.into()))
                .with_field(
                    FieldDefinition::new("COUNT", PrimitiveKind::Int32.into()).static_field(),
                ),
            TypeDefinition::class("Node")
                .with_field(FieldDefinition::new("value", PrimitiveKind::Int32.into()))
                .with_field(FieldDefinition::new("next", TypeRef::named("Node"))),
        ])
        .unwrap()
    }

    #[test]
    fn test_populate_composite() {
        let engine = RandomizationEngine::builder(catalog())
            .seed(42)
            .build()
            .unwrap();

        let value = engine.populate_named("Person").unwrap();
        let person = value.as_object().unwrap();
        assert_eq!(person.type_name(), "Person");
        assert!(person.get("name").unwrap().as_str().is_some());
        assert!(person.get("age").unwrap().as_i32().is_some());
        // Static fields are not part of the instance
        assert!(person.get("COUNT").is_none());
    }

    #[test]
    fn test_field_randomizer_takes_precedence() {
        let engine = RandomizationEngine::builder(catalog())
            .seed(42)
            .randomize_type(
                PrimitiveKind::String.into(),
                ConstantRandomizer::new(Value::String("type".to_string())),
            )
            .randomize_field(
                FieldKey::new("Person", "name"),
                ConstantRandomizer::new(Value::String("field".to_string())),
            )
            .build()
            .unwrap();

        let value = engine.populate_named("Person").unwrap();
        assert_eq!(
            value.as_object().unwrap().get("name"),
            Some(&Value::String("field".to_string()))
        );
        assert_eq!(
            engine.populate(&PrimitiveKind::String.into()).unwrap(),
            Value::String("type".to_string())
        );
    }

    #[test]
    fn test_randomizer_failure_carries_field() {
        let engine = RandomizationEngine::builder(catalog())
            .seed(42)
            .randomize_field(
                FieldKey::new("Person", "age"),
                |_: &mut dyn RngCore| -> Result<Value, RandomizerError> {
                    Err(RandomizerError::failed("boom"))
                },
            )
            .build()
            .unwrap();

        let err = engine.populate_named("Person").unwrap_err();
        match err {
            PopulateError::ObjectGeneration {
                type_name,
                field,
                source: GenerationCause::Randomizer(_),
            } => {
                assert_eq!(type_name, "Person");
                assert_eq!(field.as_deref(), Some("age"));
            }
            other => panic!("Expected ObjectGeneration, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_type() {
        let engine = RandomizationEngine::builder(catalog())
            .seed(42)
            .build()
            .unwrap();

        let err = engine.populate_named("Missing").unwrap_err();
        assert!(matches!(
            err,
            PopulateError::ObjectGeneration {
                source: GenerationCause::UnknownType,
                ..
            }
        ));
    }

    #[test]
    fn test_unresolved_types_are_null() {
        let engine = RandomizationEngine::builder(catalog())
            .seed(42)
            .build()
            .unwrap();

        assert_eq!(engine.populate(&TypeRef::Wildcard).unwrap(), Value::Null);
        assert_eq!(engine.populate(&TypeRef::param("T")).unwrap(), Value::Null);
    }

    #[test]
    fn test_depth_zero_gives_empty_instance() {
        let engine = RandomizationEngine::builder(catalog())
            .seed(42)
            .max_randomization_depth(0)
            .build()
            .unwrap();

        let value = engine.populate_named("Person").unwrap();
        let person = value.as_object().unwrap();
        assert_eq!(person.get("name"), Some(&Value::Null));
        assert_eq!(person.get("age"), Some(&Value::Null));
    }

    #[test]
    fn test_contexts_get_distinct_seeds() {
        let engine = RandomizationEngine::builder(catalog())
            .seed(42)
            .build()
            .unwrap();

        let a = engine.populate(&PrimitiveKind::Int64.into()).unwrap();
        let b = engine.populate(&PrimitiveKind::Int64.into()).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        let result = RandomizationEngine::builder(catalog())
            .string_length(10, 2)
            .build();
        assert!(matches!(
            result,
            Err(ParametersError::InvalidRange {
                name: "string length",
                ..
            })
        ));
    }
}
