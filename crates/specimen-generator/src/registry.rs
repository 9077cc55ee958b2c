//! Randomizer registry.
//!
//! Lookup order for a field is: randomizer registered for the field, then
//! randomizer registered for the field's exact type, then the default
//! randomizer for a primitive kind. `None` tells the engine to treat the
//! type structurally.

use crate::randomizers::{DefaultRandomizers, Randomizer, SharedRandomizer};
use specimen_core::{FieldKey, RandomizationParameters, TypeRef};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Registry of randomizers keyed by type and by field.
#[derive(Clone)]
pub struct RandomizerRegistry {
    by_type: HashMap<TypeRef, SharedRandomizer>,
    by_field: HashMap<FieldKey, SharedRandomizer>,
    defaults: DefaultRandomizers,
}

impl RandomizerRegistry {
    /// Create a registry holding only the default randomizers.
    pub fn new(params: &RandomizationParameters) -> Self {
        Self {
            by_type: HashMap::new(),
            by_field: HashMap::new(),
            defaults: DefaultRandomizers::new(params),
        }
    }

    /// Register a randomizer for a type. A later registration replaces an
    /// earlier one.
    pub fn register_type(&mut self, ty: TypeRef, randomizer: impl Randomizer + 'static) {
        self.register_type_shared(ty, Arc::new(randomizer));
    }

    /// Register an already shared randomizer for a type.
    pub fn register_type_shared(&mut self, ty: TypeRef, randomizer: SharedRandomizer) {
        self.by_type.insert(ty, randomizer);
    }

    /// Register a randomizer for one field. A later registration replaces an
    /// earlier one.
    pub fn register_field(&mut self, key: FieldKey, randomizer: impl Randomizer + 'static) {
        self.register_field_shared(key, Arc::new(randomizer));
    }

    /// Register an already shared randomizer for one field.
    pub fn register_field_shared(&mut self, key: FieldKey, randomizer: SharedRandomizer) {
        self.by_field.insert(key, randomizer);
    }

    /// Randomizer for a type: registered first, then the primitive default.
    pub fn randomizer_for_type(&self, ty: &TypeRef) -> Option<&dyn Randomizer> {
        if let Some(randomizer) = self.by_type.get(ty) {
            return Some(randomizer.as_ref());
        }
        match ty {
            TypeRef::Primitive(kind) => self.defaults.get(*kind),
            _ => None,
        }
    }

    /// Randomizer registered for a specific field.
    pub fn randomizer_for_field(&self, key: &FieldKey) -> Option<&dyn Randomizer> {
        self.by_field.get(key).map(|r| r.as_ref())
    }

    /// Randomizer for a field: the field's own, else its type's.
    pub fn randomizer_for_field_or_type(
        &self,
        key: &FieldKey,
        ty: &TypeRef,
    ) -> Option<&dyn Randomizer> {
        self.randomizer_for_field(key).or_else(|| self.randomizer_for_type(ty))
    }

    /// Get the number of user registrations.
    pub fn len(&self) -> usize {
        self.by_type.len() + self.by_field.len()
    }

    /// Check if no user randomizers are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for RandomizerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RandomizerRegistry")
            .field("types", &self.by_type.keys().collect::<Vec<_>>())
            .field("fields", &self.by_field.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::randomizers::ConstantRandomizer;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use specimen_core::{PrimitiveKind, Value};

    fn registry() -> RandomizerRegistry {
        RandomizerRegistry::new(&RandomizationParameters::default())
    }

    fn sample(randomizer: Option<&dyn Randomizer>) -> Value {
        let mut rng = StdRng::seed_from_u64(42);
        randomizer.unwrap().random_value(&mut rng).unwrap()
    }

    #[test]
    fn test_default_lookup() {
        let registry = registry();
        assert!(registry.is_empty());
        assert!(registry
            .randomizer_for_type(&PrimitiveKind::Int32.into())
            .is_some());
        assert!(registry.randomizer_for_type(&TypeRef::named("Person")).is_none());
        assert!(registry
            .randomizer_for_type(&TypeRef::array(PrimitiveKind::Int32.into()))
            .is_none());
    }

    #[test]
    fn test_registered_type_wins_over_default() {
        let mut registry = registry();
        registry.register_type(
            PrimitiveKind::Int32.into(),
            ConstantRandomizer::new(Value::Int32(10)),
        );
        assert_eq!(
            sample(registry.randomizer_for_type(&PrimitiveKind::Int32.into())),
            Value::Int32(10)
        );
    }

    #[test]
    fn test_last_registration_wins() {
        let mut registry = registry();
        let ty = TypeRef::named("Person");
        registry.register_type(ty.clone(), ConstantRandomizer::new(Value::Int32(1)));
        registry.register_type(ty.clone(), ConstantRandomizer::new(Value::Int32(2)));
        assert_eq!(registry.len(), 1);
        assert_eq!(sample(registry.randomizer_for_type(&ty)), Value::Int32(2));
    }

    #[test]
    fn test_field_lookup_precedence() {
        let mut registry = registry();
        let key = FieldKey::new("Person", "name");
        let string = TypeRef::from(PrimitiveKind::String);
        registry.register_type(
            string.clone(),
            ConstantRandomizer::new(Value::String("type".to_string())),
        );
        registry.register_field(
            key.clone(),
            ConstantRandomizer::new(Value::String("field".to_string())),
        );

        assert_eq!(
            sample(registry.randomizer_for_field_or_type(&key, &string)),
            Value::String("field".to_string())
        );
        let other = FieldKey::new("Person", "other");
        assert_eq!(
            sample(registry.randomizer_for_field_or_type(&other, &string)),
            Value::String("type".to_string())
        );
        assert!(registry.randomizer_for_field(&other).is_none());
    }
}
