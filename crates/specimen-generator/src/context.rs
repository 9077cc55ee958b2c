//! Per-call randomization context.
//!
//! A context is created for each top-level populate call and never shared.
//! It owns the seeded RNG, the path of fields currently being populated and
//! the object pool.
//!
//! Pooled instances are shared, not copied. Only instances built without any
//! pooled substitute are admitted to the pool, so a substitute never nests
//! another substitute and the size of a generated value stays polynomial in
//! the collection size.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use specimen_core::{FieldKey, TypeRef, Value};
use std::collections::HashMap;

/// Mutable state for one populate call.
#[derive(Debug)]
pub struct RandomizationContext {
    rng: StdRng,
    path: Vec<FieldKey>,
    pool: HashMap<TypeRef, Vec<Value>>,
    substitutions: usize,
}

impl RandomizationContext {
    /// Create a context seeded with the given value.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            path: Vec::new(),
            pool: HashMap::new(),
            substitutions: 0,
        }
    }

    /// Get the random number generator.
    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Number of fields currently being populated.
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    /// Fields currently being populated, outermost first.
    pub fn path(&self) -> &[FieldKey] {
        &self.path
    }

    /// Enter a field.
    pub fn push_field(&mut self, key: FieldKey) {
        self.path.push(key);
    }

    /// Leave the innermost field.
    pub fn pop_field(&mut self) -> Option<FieldKey> {
        self.path.pop()
    }

    /// Check if the innermost field is already on the path further out.
    pub fn is_cyclic(&self) -> bool {
        match self.path.split_last() {
            Some((current, outer)) => outer.contains(current),
            None => false,
        }
    }

    /// Number of pooled instances of a type.
    pub fn pooled_count(&self, ty: &TypeRef) -> usize {
        self.pool.get(ty).map_or(0, Vec::len)
    }

    /// Pick a pooled instance of a type at random.
    pub fn random_pooled(&mut self, ty: &TypeRef) -> Option<Value> {
        let pooled = self.pool.get(ty)?.choose(&mut self.rng).cloned()?;
        self.substitutions += 1;
        Some(pooled)
    }

    /// Number of pooled instances handed out so far.
    pub fn substitutions(&self) -> usize {
        self.substitutions
    }

    /// Offer an instance to the pool. Returns false when the pool for the
    /// type is already full.
    pub fn offer_to_pool(&mut self, ty: &TypeRef, value: Value, max_pool_size: usize) -> bool {
        let entries = self.pool.entry(ty.clone()).or_default();
        if entries.len() >= max_pool_size {
            return false;
        }
        entries.push(value);
        true
    }
}
