//! Domain models for organizations, sites and the composite views
//! assembled from them.

pub mod hierarchy;
pub mod organization;
pub mod site;
