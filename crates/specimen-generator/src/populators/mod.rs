//! Container populators.
//!
//! Each populator draws its size once from the configured collection size
//! range and fills slots by recursing through a [`ValueSource`], normally
//! the engine.

pub mod array;
pub mod collection;
pub mod map;

pub use array::ArrayPopulator;
pub use collection::CollectionPopulator;
pub use map::MapPopulator;

use crate::context::RandomizationContext;
use crate::error::PopulateError;
use rand::Rng;
use specimen_core::{Range, TypeRef, Value};

/// Source of element values for the populators.
pub trait ValueSource {
    /// Populate one value of the given type.
    fn populate_value(
        &self,
        ty: &TypeRef,
        ctx: &mut RandomizationContext,
    ) -> Result<Value, PopulateError>;

    /// Check if elements of this type can be populated.
    fn is_populatable(&self, ty: &TypeRef) -> bool;
}

/// Draw a container size from the range.
pub(crate) fn draw_size(range: &Range<usize>, ctx: &mut RandomizationContext) -> usize {
    ctx.rng().gen_range(range.min..=range.max)
}
