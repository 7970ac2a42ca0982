//! Campus Search - privacy-aware member search for a campus directory
//!
//! This library implements the search core behind the directory's member
//! search: raw criteria are normalized into a canonical predicate, and each
//! candidate's own visibility preference is evaluated against the requester
//! before a result is ever returned.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{normalize, SearchEngine, SearchOutcome, SearchPredicate};
pub use crate::models::{
    College, FieldOfStudy, Profile, Requester, SearchCriteria, SeekingCode, VisibilityPreference,
};
