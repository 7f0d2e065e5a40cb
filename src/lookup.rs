use std::collections::HashMap;

use crate::error::LookupError;
use crate::parser::Record;

/// Maps each distinct primary type to a zero-based id in first-seen order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeLookup {
    /// Type names indexed by id
    types: Vec<String>,
    ids: HashMap<String, u32>,
}

impl TypeLookup {
    /// Scan records in input order, assigning the next id to each new type
    pub fn build(records: &[Record]) -> Self {
        let mut lookup = Self::default();
        lookup.extend(records);
        lookup
    }

    /// Rebuild a lookup from stored `(id, type)` rows in id order.
    /// Ids must run contiguously from 0.
    pub fn from_persisted(
        rows: impl IntoIterator<Item = (u32, String)>,
    ) -> Result<Self, LookupError> {
        let mut lookup = Self::default();
        for (id, type_name) in rows {
            if lookup.insert(&type_name) != id {
                return Err(LookupError::OutOfOrder { id, type_name });
            }
        }
        Ok(lookup)
    }

    /// Assign ids to types in `records` not seen yet
    pub fn extend(&mut self, records: &[Record]) {
        for record in records {
            self.insert(&record.primary_type);
        }
    }

    /// Return the id for `type_name`, assigning a new one if unseen
    pub fn insert(&mut self, type_name: &str) -> u32 {
        if let Some(&id) = self.ids.get(type_name) {
            return id;
        }

        let id = self.types.len() as u32;
        self.types.push(type_name.to_string());
        self.ids.insert(type_name.to_string(), id);
        id
    }

    pub fn id_of(&self, type_name: &str) -> Option<u32> {
        self.ids.get(type_name).copied()
    }

    pub fn resolve(&self, type_name: &str) -> Result<u32, LookupError> {
        self.id_of(type_name)
            .ok_or_else(|| LookupError::UnknownType(type_name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Iterate `(id, type)` pairs in id order
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.types
            .iter()
            .enumerate()
            .map(|(id, name)| (id as u32, name.as_str()))
    }
}
