//! OrgMap Core: domain models, error types, storage traits and
//! great-circle geometry shared by every other crate.

pub mod error;
pub mod geo;
pub mod models;
pub mod repository;
