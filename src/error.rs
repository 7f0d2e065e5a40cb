//! Domain errors callers may want to match on.

/// Failure resolving a type string to its lookup id.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum LookupError {
    /// The type was never seen while building the lookup.
    #[error("Unknown type: {0}")]
    UnknownType(String),

    /// A stored type row does not fit the first-seen id sequence.
    #[error("Stored type '{type_name}' has id {id}, expected ids to run from 0")]
    OutOfOrder { id: u32, type_name: String },

    /// The id or the type is already stored with a different partner.
    #[error("Type '{type_name}' (id {id}) conflicts with an existing Types row")]
    Conflict { id: u32, type_name: String },
}
