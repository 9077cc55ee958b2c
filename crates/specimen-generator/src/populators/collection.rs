//! Collection populator.

use super::{draw_size, ValueSource};
use crate::context::RandomizationContext;
use crate::error::PopulateError;
use specimen_core::{CollectionKind, Range, TypeRef, Value};
use std::cmp::Ordering;

/// Populates sequences, sets and queues.
#[derive(Debug, Clone, Copy)]
pub struct CollectionPopulator {
    size: Range<usize>,
}

impl CollectionPopulator {
    /// Create a populator drawing sizes from the range.
    pub fn new(size: Range<usize>) -> Self {
        Self { size }
    }

    /// Populate a collection of the requested kind.
    ///
    /// Abstract kinds resolve to their concrete implementation. A raw or
    /// non-populatable element type gives an empty collection. Sets drop
    /// duplicate elements, so they may end up smaller than the drawn size.
    pub fn populate<S: ValueSource + ?Sized>(
        &self,
        source: &S,
        kind: CollectionKind,
        element: Option<&TypeRef>,
        ctx: &mut RandomizationContext,
    ) -> Result<Value, PopulateError> {
        let kind = kind.concrete();
        let mut items = Vec::new();

        let Some(element) = element.filter(|e| source.is_populatable(e)) else {
            return Ok(Value::Collection { kind, items });
        };

        let size = draw_size(&self.size, ctx);
        items.reserve(size);
        for _ in 0..size {
            let item = source.populate_value(element, ctx)?;
            if kind.is_set() && items.iter().any(|v: &Value| v.total_cmp(&item) == Ordering::Equal) {
                continue;
            }
            items.push(item);
        }

        if kind.is_sorted() {
            items.sort_by(Value::total_cmp);
        }

        Ok(Value::Collection { kind, items })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::populators::testing::CountingSource;
    use specimen_core::PrimitiveKind;

    fn int() -> TypeRef {
        PrimitiveKind::Int32.into()
    }

    #[test]
    fn test_sequence_keeps_generation_order() {
        let populator = CollectionPopulator::new(Range::new(3, 3));
        let source = CountingSource::new();
        let mut ctx = RandomizationContext::new(42);

        let value = populator
            .populate(&source, CollectionKind::Sequence, Some(&int()), &mut ctx)
            .unwrap();
        assert_eq!(
            value,
            Value::Collection {
                kind: CollectionKind::Vec,
                items: vec![Value::Int32(0), Value::Int32(1), Value::Int32(2)],
            }
        );
    }

    #[test]
    fn test_set_absorbs_duplicates() {
        let populator = CollectionPopulator::new(Range::new(6, 6));
        let source = CountingSource::modulo(2);
        let mut ctx = RandomizationContext::new(42);

        let value = populator
            .populate(&source, CollectionKind::Set, Some(&int()), &mut ctx)
            .unwrap();
        let Value::Collection { kind, items } = value else {
            panic!("Expected collection");
        };
        assert_eq!(kind, CollectionKind::HashSet);
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_sorted_set_is_ordered() {
        let populator = CollectionPopulator::new(Range::new(5, 5));
        let source = CountingSource::new();
        let mut ctx = RandomizationContext::new(42);

        let value = populator
            .populate(&source, CollectionKind::SortedSet, Some(&int()), &mut ctx)
            .unwrap();
        let items = value.as_items().unwrap();
        assert!(items
            .windows(2)
            .all(|w| w[0].total_cmp(&w[1]) == Ordering::Less));
    }

    #[test]
    fn test_unpopulatable_element_gives_empty_collection() {
        let populator = CollectionPopulator::new(Range::new(3, 3));
        let source = CountingSource::new();
        let mut ctx = RandomizationContext::new(42);

        let nested = TypeRef::collection(CollectionKind::Sequence, int());
        for element in [None, Some(&TypeRef::Wildcard), Some(&nested)] {
            let value = populator
                .populate(&source, CollectionKind::Queue, element, &mut ctx)
                .unwrap();
            assert_eq!(
                value,
                Value::Collection {
                    kind: CollectionKind::VecDeque,
                    items: vec![],
                }
            );
        }
    }
}
