//! Integration tests for the hierarchy store.

use orgmap_core::error::OrgMapError;
use orgmap_core::models::organization::{CreateOrganization, UpdateOrganization};
use orgmap_core::models::site::CreateSite;
use orgmap_db::repository::{SurrealOrganizationRepository, SurrealSiteRepository};
use orgmap_registry::Registry;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};
use uuid::Uuid;

type TestRegistry = Registry<SurrealOrganizationRepository<Db>, SurrealSiteRepository<Db>>;

/// Helper: spin up in-memory DB, run migrations, wire the components.
async fn setup() -> TestRegistry {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    orgmap_db::run_migrations(&db).await.unwrap();

    Registry::new(
        SurrealOrganizationRepository::new(db.clone()),
        SurrealSiteRepository::new(db),
    )
}

async fn create_org(registry: &TestRegistry, name: &str, parent_id: Option<Uuid>) -> Uuid {
    registry
        .hierarchy
        .create(CreateOrganization {
            name: name.into(),
            parent_id,
        })
        .await
        .unwrap()
        .id
}

fn reparent(parent: Uuid) -> UpdateOrganization {
    UpdateOrganization {
        parent_id: Some(Some(parent)),
        ..Default::default()
    }
}

// -----------------------------------------------------------------------
// create / get / list
// -----------------------------------------------------------------------

#[tokio::test]
async fn create_root_and_child() {
    let registry = setup().await;

    let root = create_org(&registry, "Holding", None).await;
    let child = create_org(&registry, "Subsidiary", Some(root)).await;

    let fetched = registry.hierarchy.get(child).await.unwrap();
    assert_eq!(fetched.parent_id, Some(root));
    assert_eq!(registry.hierarchy.list().await.unwrap().len(), 2);
}

#[tokio::test]
async fn create_trims_name() {
    let registry = setup().await;
    let org = registry
        .hierarchy
        .create(CreateOrganization {
            name: "  Padded  ".into(),
            parent_id: None,
        })
        .await
        .unwrap();
    assert_eq!(org.name, "Padded");
}

#[tokio::test]
async fn create_with_blank_name_is_invalid() {
    let registry = setup().await;
    let err = registry
        .hierarchy
        .create(CreateOrganization {
            name: " ".into(),
            parent_id: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, OrgMapError::InvalidInput { .. }), "got: {err:?}");
}

#[tokio::test]
async fn create_with_duplicate_name_is_conflict() {
    let registry = setup().await;
    let parent = create_org(&registry, "Parent", None).await;
    create_org(&registry, "Shared", None).await;

    // Uniqueness is global, not per parent.
    let err = registry
        .hierarchy
        .create(CreateOrganization {
            name: "Shared".into(),
            parent_id: Some(parent),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, OrgMapError::Conflict { .. }), "got: {err:?}");
}

#[tokio::test]
async fn create_with_unknown_parent_is_not_found() {
    let registry = setup().await;
    let err = registry
        .hierarchy
        .create(CreateOrganization {
            name: "Orphan".into(),
            parent_id: Some(Uuid::new_v4()),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, OrgMapError::NotFound { .. }), "got: {err:?}");
    assert!(registry.hierarchy.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn get_unknown_is_not_found() {
    let registry = setup().await;
    let err = registry.hierarchy.get(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, OrgMapError::NotFound { .. }));
}

// -----------------------------------------------------------------------
// update / acyclicity
// -----------------------------------------------------------------------

#[tokio::test]
async fn update_renames_and_returns_count() {
    let registry = setup().await;
    let id = create_org(&registry, "Old", None).await;

    let affected = registry
        .hierarchy
        .update(
            id,
            UpdateOrganization {
                name: Some("New".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(affected, 1);
    assert_eq!(registry.hierarchy.get(id).await.unwrap().name, "New");
}

#[tokio::test]
async fn update_unknown_is_not_found() {
    let registry = setup().await;
    let err = registry
        .hierarchy
        .update(Uuid::new_v4(), UpdateOrganization::default())
        .await
        .unwrap_err();
    assert!(matches!(err, OrgMapError::NotFound { .. }));
}

#[tokio::test]
async fn rename_to_taken_name_is_conflict() {
    let registry = setup().await;
    create_org(&registry, "Taken", None).await;
    let id = create_org(&registry, "Mine", None).await;

    let err = registry
        .hierarchy
        .update(
            id,
            UpdateOrganization {
                name: Some("Taken".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, OrgMapError::Conflict { .. }), "got: {err:?}");
    assert_eq!(registry.hierarchy.get(id).await.unwrap().name, "Mine");
}

#[tokio::test]
async fn self_parent_is_conflict() {
    let registry = setup().await;
    let a = create_org(&registry, "A", None).await;

    let err = registry.hierarchy.update(a, reparent(a)).await.unwrap_err();
    assert!(matches!(err, OrgMapError::Conflict { .. }), "got: {err:?}");
}

#[tokio::test]
async fn direct_two_cycle_is_conflict() {
    let registry = setup().await;
    let a = create_org(&registry, "A", None).await;
    let b = create_org(&registry, "B", None).await;

    registry.hierarchy.update(a, reparent(b)).await.unwrap();
    let err = registry.hierarchy.update(b, reparent(a)).await.unwrap_err();

    assert!(matches!(err, OrgMapError::Conflict { .. }), "got: {err:?}");
    assert!(registry.hierarchy.get(b).await.unwrap().parent_id.is_none());
}

#[tokio::test]
async fn transitive_cycle_is_conflict() {
    let registry = setup().await;
    let a = create_org(&registry, "A", None).await;
    let b = create_org(&registry, "B", Some(a)).await;
    let c = create_org(&registry, "C", Some(b)).await;
    let d = create_org(&registry, "D", Some(c)).await;

    let err = registry.hierarchy.update(a, reparent(d)).await.unwrap_err();
    assert!(matches!(err, OrgMapError::Conflict { .. }), "got: {err:?}");
    assert!(registry.hierarchy.get(a).await.unwrap().parent_id.is_none());
}

#[tokio::test]
async fn reparent_to_unrelated_branch_succeeds() {
    let registry = setup().await;
    let root = create_org(&registry, "Root", None).await;
    let left = create_org(&registry, "Left", Some(root)).await;
    let right = create_org(&registry, "Right", Some(root)).await;
    let leaf = create_org(&registry, "Leaf", Some(left)).await;

    let affected = registry.hierarchy.update(leaf, reparent(right)).await.unwrap();
    assert_eq!(affected, 1);
    assert_eq!(
        registry.hierarchy.get(leaf).await.unwrap().parent_id,
        Some(right)
    );
}

#[tokio::test]
async fn reparent_to_unknown_is_not_found() {
    let registry = setup().await;
    let a = create_org(&registry, "A", None).await;

    let err = registry
        .hierarchy
        .update(a, reparent(Uuid::new_v4()))
        .await
        .unwrap_err();
    assert!(matches!(err, OrgMapError::NotFound { .. }), "got: {err:?}");
}

#[tokio::test]
async fn detach_to_root() {
    let registry = setup().await;
    let parent = create_org(&registry, "Parent", None).await;
    let child = create_org(&registry, "Child", Some(parent)).await;

    registry
        .hierarchy
        .update(
            child,
            UpdateOrganization {
                parent_id: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert!(registry.hierarchy.get(child).await.unwrap().parent_id.is_none());
}

// -----------------------------------------------------------------------
// delete policy: reject while dependents exist
// -----------------------------------------------------------------------

#[tokio::test]
async fn delete_leaf_organization() {
    let registry = setup().await;
    let id = create_org(&registry, "Leaf", None).await;

    assert_eq!(registry.hierarchy.delete(id).await.unwrap(), 1);
    assert!(registry.hierarchy.get(id).await.is_err());
}

#[tokio::test]
async fn delete_unknown_is_not_found() {
    let registry = setup().await;
    let err = registry.hierarchy.delete(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, OrgMapError::NotFound { .. }));
}

#[tokio::test]
async fn delete_with_children_is_conflict() {
    let registry = setup().await;
    let parent = create_org(&registry, "Parent", None).await;
    create_org(&registry, "Child", Some(parent)).await;

    let err = registry.hierarchy.delete(parent).await.unwrap_err();
    assert!(matches!(err, OrgMapError::Conflict { .. }), "got: {err:?}");
    assert!(registry.hierarchy.get(parent).await.is_ok());
}

#[tokio::test]
async fn delete_with_sites_is_conflict() {
    let registry = setup().await;
    let org = create_org(&registry, "Operator", None).await;
    registry
        .sites
        .create(CreateSite {
            organization_id: org,
            name: "Depot".into(),
            latitude: 10.0,
            longitude: 10.0,
            address: None,
        })
        .await
        .unwrap();

    let err = registry.hierarchy.delete(org).await.unwrap_err();
    assert!(matches!(err, OrgMapError::Conflict { .. }), "got: {err:?}");
    assert!(registry.hierarchy.get(org).await.is_ok());
}

// -----------------------------------------------------------------------
// detail view
// -----------------------------------------------------------------------

#[tokio::test]
async fn detail_includes_direct_children_with_their_sites() {
    let registry = setup().await;
    let root = create_org(&registry, "Root", None).await;
    let child = create_org(&registry, "Child", Some(root)).await;
    create_org(&registry, "Grandchild", Some(child)).await;

    for (org, name) in [(root, "Root Site"), (child, "Child Site")] {
        registry
            .sites
            .create(CreateSite {
                organization_id: org,
                name: name.into(),
                latitude: 1.0,
                longitude: 1.0,
                address: None,
            })
            .await
            .unwrap();
    }

    let detail = registry.hierarchy.get_detail(root).await.unwrap();
    assert_eq!(detail.organization.id, root);
    assert_eq!(detail.sites.len(), 1);
    assert_eq!(detail.children.len(), 1);
    assert_eq!(detail.children[0].organization.id, child);
    assert_eq!(detail.children[0].sites[0].name, "Child Site");
}
