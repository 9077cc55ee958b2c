//! Randomizers: leaf value producers.
//!
//! A [`Randomizer`] produces one random value of an associated type. The
//! engine consults the registry before any structural strategy, so a
//! randomizer registered for a type or field always wins.
//!
//! [`DefaultRandomizers`] holds the built-in randomizer for every
//! [`PrimitiveKind`], configured from the randomization parameters.

pub mod numeric;
pub mod temporal;
pub mod text;
pub mod uuid;

use crate::error::RandomizerError;
use rand::RngCore;
use specimen_core::{PrimitiveKind, RandomizationParameters, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Trait for producing random values.
pub trait Randomizer: Send + Sync {
    /// Produce one random value using the given RNG.
    fn random_value(&self, rng: &mut dyn RngCore) -> Result<Value, RandomizerError>;
}

impl<F> Randomizer for F
where
    F: Fn(&mut dyn RngCore) -> Result<Value, RandomizerError> + Send + Sync,
{
    fn random_value(&self, rng: &mut dyn RngCore) -> Result<Value, RandomizerError> {
        self(rng)
    }
}

/// Randomizer that always returns the same value.
#[derive(Debug, Clone)]
pub struct ConstantRandomizer {
    value: Value,
}

impl ConstantRandomizer {
    /// Create a randomizer returning `value`.
    pub fn new(value: Value) -> Self {
        Self { value }
    }
}

impl Randomizer for ConstantRandomizer {
    fn random_value(&self, _rng: &mut dyn RngCore) -> Result<Value, RandomizerError> {
        Ok(self.value.clone())
    }
}

/// Shared handle to a randomizer.
pub type SharedRandomizer = Arc<dyn Randomizer>;

/// Wrap a closure as a shared randomizer.
pub fn shared<F>(f: F) -> SharedRandomizer
where
    F: Fn(&mut dyn RngCore) -> Result<Value, RandomizerError> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Built-in randomizers, one per primitive kind.
#[derive(Clone)]
pub struct DefaultRandomizers {
    randomizers: HashMap<PrimitiveKind, SharedRandomizer>,
}

impl DefaultRandomizers {
    /// Build the default randomizers from the parameters.
    pub fn new(params: &RandomizationParameters) -> Self {
        let alphabet: Arc<[char]> = params.charset.alphabet().into();
        let string_length = params.string_length;
        let date_range = params.date_range;
        let time_range = params.time_range;

        let mut randomizers: HashMap<PrimitiveKind, SharedRandomizer> = HashMap::new();
        for kind in PrimitiveKind::ALL {
            let randomizer = match kind {
                PrimitiveKind::Bool => shared(|rng| Ok(numeric::random_bool(rng))),
                PrimitiveKind::Int8
                | PrimitiveKind::Int16
                | PrimitiveKind::Int32
                | PrimitiveKind::Int64 => shared(move |rng| Ok(numeric::random_integer(rng, kind))),
                PrimitiveKind::Float32 | PrimitiveKind::Float64 => {
                    shared(move |rng| Ok(numeric::random_float(rng, kind)))
                }
                PrimitiveKind::Char => {
                    let alphabet = Arc::clone(&alphabet);
                    shared(move |rng| text::random_char(rng, &alphabet))
                }
                PrimitiveKind::String => {
                    let alphabet = Arc::clone(&alphabet);
                    shared(move |rng| text::random_string(rng, &alphabet, &string_length))
                }
                PrimitiveKind::Uuid => shared(|rng| Ok(uuid::random_uuid_v4(rng))),
                PrimitiveKind::Date => shared(move |rng| Ok(temporal::random_date(rng, &date_range))),
                PrimitiveKind::Time => shared(move |rng| Ok(temporal::random_time(rng, &time_range))),
                PrimitiveKind::DateTime => shared(move |rng| {
                    Ok(temporal::random_date_time(rng, &date_range, &time_range))
                }),
                PrimitiveKind::Timestamp => shared(move |rng| {
                    Ok(temporal::random_timestamp(rng, &date_range, &time_range))
                }),
            };
            randomizers.insert(kind, randomizer);
        }

        Self { randomizers }
    }

    /// Get the default randomizer for a primitive kind.
    pub fn get(&self, kind: PrimitiveKind) -> Option<&dyn Randomizer> {
        self.randomizers.get(&kind).map(|r| r.as_ref())
    }
}

impl fmt::Debug for DefaultRandomizers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultRandomizers")
            .field("kinds", &self.randomizers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use specimen_core::Range;

    #[test]
    fn test_constant_randomizer() {
        let mut rng = StdRng::seed_from_u64(42);
        let randomizer = ConstantRandomizer::new(Value::Int32(10));
        assert_eq!(randomizer.random_value(&mut rng).unwrap(), Value::Int32(10));
        assert_eq!(randomizer.random_value(&mut rng).unwrap(), Value::Int32(10));
    }

    #[test]
    fn test_closure_randomizer() {
        let mut rng = StdRng::seed_from_u64(42);
        let randomizer = |_: &mut dyn RngCore| -> Result<Value, RandomizerError> {
            Ok(Value::String("FOO".to_string()))
        };
        assert_eq!(
            randomizer.random_value(&mut rng).unwrap(),
            Value::String("FOO".to_string())
        );
    }

    #[test]
    fn test_defaults_cover_every_kind() {
        let params = RandomizationParameters {
            string_length: Range::new(4, 4),
            ..Default::default()
        };
        let defaults = DefaultRandomizers::new(&params);
        let mut rng = StdRng::seed_from_u64(42);

        for kind in PrimitiveKind::ALL {
            let randomizer = defaults.get(kind).unwrap();
            let value = randomizer.random_value(&mut rng).unwrap();
            assert!(!value.is_null(), "{kind:?} produced null");
        }

        let value = defaults
            .get(PrimitiveKind::String)
            .unwrap()
            .random_value(&mut rng)
            .unwrap();
        assert_eq!(value.as_str().unwrap().chars().count(), 4);
    }
}
