//! Hierarchy aggregator: an organization, its full descendant subtree,
//! and every site owned anywhere in it.
//!
//! Traversal is breadth-first over the derived parent→children edges.
//! Each organization is expanded at most once: a child that was already
//! reached is skipped and logged, so a cycle written around the
//! invariant checks cannot make the walk loop or duplicate nodes.

use std::collections::{HashMap, HashSet, VecDeque};

use orgmap_core::error::OrgMapResult;
use orgmap_core::models::hierarchy::OrganizationTree;
use orgmap_core::models::organization::Organization;
use orgmap_core::models::site::Site;
use orgmap_core::repository::{OrganizationRepository, SiteRepository};
use tracing::{debug, warn};
use uuid::Uuid;

pub struct HierarchyAggregator<O: OrganizationRepository, S: SiteRepository> {
    organizations: O,
    sites: S,
}

/// Everything gathered during traversal, keyed by organization id.
#[derive(Default)]
struct Gathered {
    children: HashMap<Uuid, Vec<Organization>>,
    sites: HashMap<Uuid, Vec<Site>>,
}

impl<O: OrganizationRepository, S: SiteRepository> HierarchyAggregator<O, S> {
    pub fn new(organizations: O, sites: S) -> Self {
        Self {
            organizations,
            sites,
        }
    }

    /// Resolve `organization_id` into a tree of descendants and sites.
    pub async fn resolve_subtree(&self, organization_id: Uuid) -> OrgMapResult<OrganizationTree> {
        let root = self.organizations.get_by_id(organization_id).await?;

        let mut gathered = Gathered::default();
        let mut visited = HashSet::from([root.id]);
        let mut queue = VecDeque::from([root.id]);

        while let Some(current) = queue.pop_front() {
            let sites = self.sites.list_by_organization(current).await?;
            gathered.sites.insert(current, sites);

            for child in self.organizations.list_children(current).await? {
                if !visited.insert(child.id) {
                    warn!(
                        parent_id = %current,
                        organization_id = %child.id,
                        "organization reached twice; skipping cyclic edge"
                    );
                    continue;
                }
                queue.push_back(child.id);
                gathered.children.entry(current).or_default().push(child);
            }
        }

        debug!(
            organization_id = %organization_id,
            organizations = visited.len(),
            "subtree resolved"
        );
        Ok(assemble(root, &mut gathered))
    }
}

/// Build the nested result. Every id was expanded once, so each
/// organization appears in at most one `children` list and recursion
/// follows a tree.
fn assemble(organization: Organization, gathered: &mut Gathered) -> OrganizationTree {
    let mut sites = gathered.sites.remove(&organization.id).unwrap_or_default();
    sites.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));

    let mut children = gathered
        .children
        .remove(&organization.id)
        .unwrap_or_default();
    children.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));

    let children = children
        .into_iter()
        .map(|child| assemble(child, gathered))
        .collect();

    OrganizationTree {
        organization,
        sites,
        children,
    }
}
