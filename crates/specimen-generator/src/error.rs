//! Error types for the randomization engine.

use specimen_core::FieldAccessError;
use thiserror::Error;

/// Error raised by a randomizer.
#[derive(Debug, Error)]
pub enum RandomizerError {
    /// The randomizer could not produce a value
    #[error("{0}")]
    Failed(String),

    /// Failure from user code behind the randomizer
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl RandomizerError {
    /// Create a failure with a message.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

/// Underlying cause of an [`PopulateError::ObjectGeneration`].
#[derive(Debug, Error)]
pub enum GenerationCause {
    /// A randomizer failed
    #[error("randomizer failed: {0}")]
    Randomizer(#[from] RandomizerError),

    /// The type cannot be instantiated because the catalog does not define it
    #[error("type is not defined in the catalog")]
    UnknownType,

    /// A field could not be assigned
    #[error(transparent)]
    FieldAccess(#[from] FieldAccessError),
}

/// Error type for populate operations.
///
/// Any of these aborts the whole top-level populate call.
#[derive(Debug, Error)]
pub enum PopulateError {
    /// Instantiation, field assignment or a randomizer failed
    #[error("unable to generate {type_name}{}: {source}", field_suffix(.field))]
    ObjectGeneration {
        /// Type being generated
        type_name: String,
        /// Field being generated, if any
        field: Option<String>,
        /// Underlying cause
        #[source]
        source: GenerationCause,
    },

    /// An abstract type has no usable concrete subtype
    #[error("no concrete subtype found for {0}")]
    NoConcreteSubtype(String),

    /// An enum has no constants
    #[error("enum {0} has no constants")]
    EmptyEnum(String),
}

fn field_suffix(field: &Option<String>) -> String {
    match field {
        Some(field) => format!(" (field '{field}')"),
        None => String::new(),
    }
}

impl PopulateError {
    /// Create an object generation error.
    pub fn generation(
        type_name: impl Into<String>,
        field: Option<&str>,
        source: impl Into<GenerationCause>,
    ) -> Self {
        Self::ObjectGeneration {
            type_name: type_name.into(),
            field: field.map(str::to_string),
            source: source.into(),
        }
    }
}
