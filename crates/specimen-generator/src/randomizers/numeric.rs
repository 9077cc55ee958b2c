//! Numeric and boolean randomizers.

use rand::Rng;
use specimen_core::{PrimitiveKind, Value};

/// Generate a random boolean.
pub fn random_bool<R: Rng + ?Sized>(rng: &mut R) -> Value {
    Value::Bool(rng.gen())
}

/// Generate a random integer over the full range of the given width.
pub fn random_integer<R: Rng + ?Sized>(rng: &mut R, kind: PrimitiveKind) -> Value {
    match kind {
        PrimitiveKind::Int8 => Value::Int8(rng.gen()),
        PrimitiveKind::Int16 => Value::Int16(rng.gen()),
        PrimitiveKind::Int32 => Value::Int32(rng.gen()),
        _ => Value::Int64(rng.gen()),
    }
}

/// Generate a random float in `[0, 1)`.
pub fn random_float<R: Rng + ?Sized>(rng: &mut R, kind: PrimitiveKind) -> Value {
    match kind {
        PrimitiveKind::Float32 => Value::Float32(rng.gen()),
        _ => Value::Float64(rng.gen()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_integer_widths() {
        let mut rng = StdRng::seed_from_u64(42);

        assert!(matches!(
            random_integer(&mut rng, PrimitiveKind::Int8),
            Value::Int8(_)
        ));
        assert!(matches!(
            random_integer(&mut rng, PrimitiveKind::Int16),
            Value::Int16(_)
        ));
        assert!(matches!(
            random_integer(&mut rng, PrimitiveKind::Int32),
            Value::Int32(_)
        ));
        assert!(matches!(
            random_integer(&mut rng, PrimitiveKind::Int64),
            Value::Int64(_)
        ));
    }

    #[test]
    fn test_random_float_range() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..100 {
            if let Value::Float64(v) = random_float(&mut rng, PrimitiveKind::Float64) {
                assert!((0.0..1.0).contains(&v));
            } else {
                panic!("Expected Float64 value");
            }
            if let Value::Float32(v) = random_float(&mut rng, PrimitiveKind::Float32) {
                assert!((0.0..1.0).contains(&v));
            } else {
                panic!("Expected Float32 value");
            }
        }
    }

    #[test]
    fn test_random_bool_deterministic() {
        let mut rng1 = StdRng::seed_from_u64(42);
        let mut rng2 = StdRng::seed_from_u64(42);

        for _ in 0..10 {
            assert_eq!(random_bool(&mut rng1), random_bool(&mut rng2));
        }
    }
}
