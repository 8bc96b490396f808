//! OrgMap Registry: the hierarchy store, site registry, proximity
//! search engine and subtree aggregator.
//!
//! Every component is generic over the repository traits in
//! `orgmap-core`, so this crate has no dependency on the database crate.

pub mod aggregator;
pub mod hierarchy;
pub mod proximity;
pub mod sites;
mod validate;

pub use aggregator::HierarchyAggregator;
pub use hierarchy::HierarchyStore;
pub use proximity::{ProximitySearch, rank_by_distance};
pub use sites::SiteRegistry;

use orgmap_core::repository::{OrganizationRepository, SiteRepository};

/// All four components wired over one pair of repositories.
pub struct Registry<O: OrganizationRepository, S: SiteRepository> {
    pub hierarchy: HierarchyStore<O, S>,
    pub sites: SiteRegistry<S, O>,
    pub proximity: ProximitySearch<S>,
    pub aggregator: HierarchyAggregator<O, S>,
}

impl<O, S> Registry<O, S>
where
    O: OrganizationRepository + Clone,
    S: SiteRepository + Clone,
{
    pub fn new(organizations: O, sites: S) -> Self {
        Self {
            hierarchy: HierarchyStore::new(organizations.clone(), sites.clone()),
            sites: SiteRegistry::new(sites.clone(), organizations.clone()),
            proximity: ProximitySearch::new(sites.clone()),
            aggregator: HierarchyAggregator::new(organizations, sites),
        }
    }
}
