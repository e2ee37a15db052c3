//! Deduplicating store of generated struct types.
//!
//! Generated types are named `<base><index>`. Registering a definition under a
//! base name walks the indices from zero:
//!
//! - a free slot takes the new definition ([`Registration::Registered`]);
//! - a slot holding an identical member list is shared ([`Registration::Reused`]);
//! - a slot holding a different list is skipped.
//!
//! The walk is bounded. Once `max_duplicates` slots have been skipped the
//! registry gives up with [`Registration::CapacityExceeded`].
//!
//! Names of fixed types the generated ones will be merged with can be
//! reserved up front. A reserved name is only ever reused, never overwritten.

use eip712_schema::{Eip712Field, TypeTable};
use std::num::NonZeroUsize;

/// Default number of distinct definitions a single base name may carry.
pub const MAX_DUPL_TYPEDEFS: usize = 1000;

/// [`MAX_DUPL_TYPEDEFS`] as a ceiling accepted by [`TypeRegistry::with_max_duplicates`].
pub const DEFAULT_MAX_DUPLICATES: NonZeroUsize =
    NonZeroUsize::MIN.saturating_add(MAX_DUPL_TYPEDEFS - 1);

/// Outcome of [`TypeRegistry::register`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    /// The definition was stored under a new name.
    Registered(String),
    /// An identical definition already exists under this name.
    Reused(String),
    /// Every index below the ceiling holds a different definition.
    CapacityExceeded,
}

impl Registration {
    /// Name the definition is reachable under, unless capacity was exceeded.
    pub fn type_name(&self) -> Option<&str> {
        match self {
            Registration::Registered(name) | Registration::Reused(name) => Some(name),
            Registration::CapacityExceeded => None,
        }
    }
}

/// Generated struct types of a single schema generation.
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    types: TypeTable,
    reserved: TypeTable,
    max_duplicates: NonZeroUsize,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::with_max_duplicates(DEFAULT_MAX_DUPLICATES)
    }

    pub fn with_max_duplicates(max_duplicates: NonZeroUsize) -> Self {
        Self {
            types: TypeTable::new(),
            reserved: TypeTable::new(),
            max_duplicates,
        }
    }

    /// Reserves the names of `reserved`.
    ///
    /// A definition identical to a reserved one is reported as reused; a
    /// different one skips the reserved name like any taken index.
    pub fn with_reserved(mut self, reserved: TypeTable) -> Self {
        self.reserved = reserved;
        self
    }

    pub fn max_duplicates(&self) -> usize {
        self.max_duplicates.get()
    }

    /// Stores `fields` under the first free or identical `<base><index>` name.
    pub fn register(&mut self, base: &str, fields: Vec<Eip712Field>) -> Registration {
        for index in 0..self.max_duplicates.get() {
            let name = type_def_with_index(base, index);
            let existing = self.types.get(&name).or_else(|| self.reserved.get(&name));
            match existing {
                Some(existing) if *existing == fields => {
                    tracing::trace!(type_def = %name, "reusing identical type definition");
                    return Registration::Reused(name);
                }
                Some(_) => continue,
                None => {
                    tracing::debug!(type_def = %name, fields = fields.len(), "registering type definition");
                    self.types.insert(name.clone(), fields);
                    return Registration::Registered(name);
                }
            }
        }
        tracing::warn!(base, max = self.max_duplicates(), "type definition capacity exceeded");
        Registration::CapacityExceeded
    }

    pub fn types(&self) -> &TypeTable {
        &self.types
    }

    pub fn into_types(self) -> TypeTable {
        self.types
    }
}

fn type_def_with_index(base: &str, index: usize) -> String {
    format!("{base}{index}")
}
