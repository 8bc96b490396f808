//! Composite views over the organization forest.

use serde::{Deserialize, Serialize};

use super::organization::Organization;
use super::site::Site;

/// An organization with its full descendant subtree.
///
/// Every node carries the sites it owns directly; sites of descendants
/// live on the descendant's node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizationTree {
    pub organization: Organization,
    pub sites: Vec<Site>,
    pub children: Vec<OrganizationTree>,
}

impl OrganizationTree {
    /// Number of organizations in this subtree, the root included.
    pub fn organization_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(OrganizationTree::organization_count)
            .sum::<usize>()
    }

    /// All sites owned anywhere in this subtree, in depth-first order.
    pub fn all_sites(&self) -> Vec<&Site> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            out.extend(node.sites.iter());
            stack.extend(node.children.iter().rev());
        }
        out
    }

    /// All organizations in this subtree, in depth-first order.
    pub fn all_organizations(&self) -> Vec<&Organization> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            out.push(&node.organization);
            stack.extend(node.children.iter().rev());
        }
        out
    }
}

/// One level of relations around a single organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizationDetail {
    pub organization: Organization,
    pub sites: Vec<Site>,
    /// Direct children only, each with its own sites.
    pub children: Vec<OrganizationWithSites>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizationWithSites {
    pub organization: Organization,
    pub sites: Vec<Site>,
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;

    fn org(name: &str, parent_id: Option<Uuid>) -> Organization {
        Organization {
            id: Uuid::new_v4(),
            name: name.into(),
            parent_id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn site(organization_id: Uuid, name: &str) -> Site {
        Site {
            id: Uuid::new_v4(),
            organization_id,
            name: name.into(),
            latitude: 0.0,
            longitude: 0.0,
            address: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn counts_and_flattens_nested_tree() {
        let root = org("root", None);
        let child = org("child", Some(root.id));
        let grandchild = org("grandchild", Some(child.id));

        let tree = OrganizationTree {
            sites: vec![site(root.id, "hq")],
            children: vec![OrganizationTree {
                sites: vec![site(child.id, "depot")],
                children: vec![OrganizationTree {
                    sites: vec![site(grandchild.id, "kiosk")],
                    children: vec![],
                    organization: grandchild,
                }],
                organization: child,
            }],
            organization: root,
        };

        assert_eq!(tree.organization_count(), 3);
        let names: Vec<&str> = tree.all_sites().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["hq", "depot", "kiosk"]);
        let orgs: Vec<&str> = tree
            .all_organizations()
            .iter()
            .map(|o| o.name.as_str())
            .collect();
        assert_eq!(orgs, ["root", "child", "grandchild"]);
    }
}
