// NEO Explorer - Core Library
// Near-Earth objects, their close approaches, and the database that links them.
// Exposes all modules for use in the CLI and tests.

pub mod config;
pub mod database;
pub mod entities;
pub mod error;
pub mod extract;
pub mod filters;
pub mod temporal;
pub mod write;

// Re-export commonly used types
pub use config::DataPaths;
pub use database::NeoDatabase;
pub use entities::{
    ApproachCsv, ApproachId, ApproachJson, ApproachRecord, CloseApproach, LinkedApproach,
    NearEarthObject, NeoId, NeoJson, NeoRecord,
};
pub use error::{ModelError, ModelResult};
pub use extract::{load_approaches, load_database, load_neos, read_approaches, read_neos};
pub use filters::{create_filters, limit, Comparison, Criteria, Filter};
pub use temporal::{cd_to_datetime, datetime_to_str};
pub use write::{save, write_to_csv, write_to_json, OutputFormat};
