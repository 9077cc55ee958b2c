//! Array populator.

use super::{draw_size, ValueSource};
use crate::context::RandomizationContext;
use crate::error::PopulateError;
use specimen_core::{Range, TypeRef, Value};

/// Populates arrays slot by slot.
#[derive(Debug, Clone, Copy)]
pub struct ArrayPopulator {
    size: Range<usize>,
}

impl ArrayPopulator {
    /// Create a populator drawing sizes from the range.
    pub fn new(size: Range<usize>) -> Self {
        Self { size }
    }

    /// Populate an array of the element type. Every slot is populated
    /// independently.
    pub fn populate<S: ValueSource + ?Sized>(
        &self,
        source: &S,
        element: &TypeRef,
        ctx: &mut RandomizationContext,
    ) -> Result<Value, PopulateError> {
        let size = draw_size(&self.size, ctx);
        let items = (0..size)
            .map(|_| source.populate_value(element, ctx))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Value::Array(items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::populators::testing::CountingSource;
    use specimen_core::PrimitiveKind;

    #[test]
    fn test_size_within_bounds() {
        let populator = ArrayPopulator::new(Range::new(2, 5));
        let source = CountingSource::new();
        let mut ctx = RandomizationContext::new(42);

        for _ in 0..50 {
            let value = populator
                .populate(&source, &PrimitiveKind::Int32.into(), &mut ctx)
                .unwrap();
            let len = value.as_items().unwrap().len();
            assert!((2..=5).contains(&len));
        }
    }

    #[test]
    fn test_each_slot_populated_independently() {
        let populator = ArrayPopulator::new(Range::new(4, 4));
        let source = CountingSource::new();
        let mut ctx = RandomizationContext::new(42);

        let value = populator
            .populate(&source, &PrimitiveKind::Int32.into(), &mut ctx)
            .unwrap();
        assert_eq!(
            value,
            Value::Array(vec![
                Value::Int32(0),
                Value::Int32(1),
                Value::Int32(2),
                Value::Int32(3),
            ])
        );
    }
}
