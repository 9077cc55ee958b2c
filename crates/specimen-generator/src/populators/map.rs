//! Map populator.

use super::{draw_size, ValueSource};
use crate::context::RandomizationContext;
use crate::error::PopulateError;
use specimen_core::{MapKind, Range, TypeRef, Value};
use std::cmp::Ordering;

/// Populates maps.
#[derive(Debug, Clone, Copy)]
pub struct MapPopulator {
    size: Range<usize>,
}

impl MapPopulator {
    /// Create a populator drawing sizes from the range.
    pub fn new(size: Range<usize>) -> Self {
        Self { size }
    }

    /// Populate a map of the requested kind.
    ///
    /// The map is filled only when both key and value types are populatable.
    /// A generated key equal to an existing one replaces that entry's value,
    /// so the map may end up smaller than the drawn size.
    pub fn populate<S: ValueSource + ?Sized>(
        &self,
        source: &S,
        kind: MapKind,
        key: Option<&TypeRef>,
        value: Option<&TypeRef>,
        ctx: &mut RandomizationContext,
    ) -> Result<Value, PopulateError> {
        let kind = kind.concrete();
        let mut entries: Vec<(Value, Value)> = Vec::new();

        let (Some(key_type), Some(value_type)) = (
            key.filter(|k| source.is_populatable(k)),
            value.filter(|v| source.is_populatable(v)),
        ) else {
            return Ok(Value::Map { kind, entries });
        };

        let size = draw_size(&self.size, ctx);
        for _ in 0..size {
            let k = source.populate_value(key_type, ctx)?;
            let v = source.populate_value(value_type, ctx)?;
            match entries
                .iter_mut()
                .find(|(existing, _)| existing.total_cmp(&k) == Ordering::Equal)
            {
                Some((_, slot)) => *slot = v,
                None => entries.push((k, v)),
            }
        }

        if kind.is_sorted() {
            entries.sort_by(|(a, _), (b, _)| a.total_cmp(b));
        }

        Ok(Value::Map { kind, entries })
    }
}
