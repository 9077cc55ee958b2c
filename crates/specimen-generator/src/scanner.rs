//! Concrete subtype scanner.
//!
//! Resolves abstract types and interfaces to the concrete classes of the
//! catalog that extend or implement them. A scanner is bound to one catalog;
//! its subtype index is computed on first use and reused afterwards.

use specimen_core::{TypeCatalog, TypeKind, TypeRef};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};
use tracing::debug;

/// A concrete class together with the parameterized supertype it provides.
#[derive(Debug, Clone)]
struct Subtype {
    concrete: TypeRef,
    supertype: TypeRef,
}

/// Memoized index of the concrete subtypes of one catalog.
#[derive(Debug)]
pub struct SubtypeScanner {
    catalog: Arc<TypeCatalog>,
    index: OnceLock<HashMap<String, Vec<Subtype>>>,
}

impl SubtypeScanner {
    /// Create a scanner over a catalog.
    pub fn new(catalog: Arc<TypeCatalog>) -> Self {
        Self {
            catalog,
            index: OnceLock::new(),
        }
    }

    /// Get the scanned catalog.
    pub fn catalog(&self) -> &TypeCatalog {
        &self.catalog
    }

    fn index(&self) -> &HashMap<String, Vec<Subtype>> {
        self.index.get_or_init(|| {
            let catalog = &self.catalog;
            let mut index: HashMap<String, Vec<Subtype>> = HashMap::new();
            for def in catalog.definitions() {
                if def.kind != TypeKind::Class {
                    continue;
                }
                let concrete = TypeRef::named(&def.name);
                for supertype in catalog.supertypes_of(&concrete) {
                    if let Some(name) = supertype.name() {
                        index.entry(name.to_string()).or_default().push(Subtype {
                            concrete: concrete.clone(),
                            supertype: supertype.clone(),
                        });
                    }
                }
            }
            debug!("Indexed concrete subtypes of {} types", index.len());
            index
        })
    }

    /// Concrete subtypes of a type, in catalog order.
    ///
    /// A parameterized request only matches subtypes that provide the same
    /// parameterization; a raw request matches every subtype.
    pub fn concrete_subtypes(&self, ty: &TypeRef) -> Vec<TypeRef> {
        let Some(name) = ty.name() else {
            return Vec::new();
        };
        let Some(subtypes) = self.index().get(name) else {
            return Vec::new();
        };

        subtypes
            .iter()
            .filter(|s| ty.args().is_empty() || s.supertype == *ty)
            .map(|s| s.concrete.clone())
            .collect()
    }
}
