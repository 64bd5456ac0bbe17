// Entity Models
// NearEarthObject and CloseApproach are built independently from raw records,
// then cross-linked by the database through arena indices (no shared ownership).

pub mod approach;
pub mod neo;

pub use approach::{
    ApproachCsv, ApproachJson, ApproachRecord, CloseApproach, LinkedApproach, NeoJson, CSV_FIELDS,
};
pub use neo::{NearEarthObject, NeoRecord};

/// Position of a NEO inside its database
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NeoId(pub(crate) usize);

/// Position of a close approach inside its database (load order)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ApproachId(pub(crate) usize);
