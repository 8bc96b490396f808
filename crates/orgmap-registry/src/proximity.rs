//! Proximity search over all registered sites.
//!
//! A linear scan: every query computes the great-circle distance to every
//! site, O(N) per call. Nothing is indexed here; a spatial index belongs
//! in front of this engine, feeding its candidate set to
//! [`rank_by_distance`].
//!
//! The radius is exclusive. A site exactly `radius_km` away is not a hit,
//! and a radius of zero matches nothing, not even a coincident site.

use orgmap_core::error::OrgMapResult;
use orgmap_core::geo::{GeoPoint, great_circle_distance_km, validate_radius_km};
use orgmap_core::models::site::{NearbySite, Site};
use orgmap_core::repository::SiteRepository;
use tracing::debug;

pub struct ProximitySearch<S: SiteRepository> {
    sites: S,
}

impl<S: SiteRepository> ProximitySearch<S> {
    pub fn new(sites: S) -> Self {
        Self { sites }
    }

    /// Sites strictly closer than `radius_km` to (`latitude`, `longitude`),
    /// nearest first.
    pub async fn find_nearby(
        &self,
        latitude: f64,
        longitude: f64,
        radius_km: f64,
    ) -> OrgMapResult<Vec<NearbySite>> {
        let origin = GeoPoint::new(latitude, longitude)?;
        validate_radius_km(radius_km)?;

        let candidates = self.sites.list().await?;
        let scanned = candidates.len();
        let hits = rank_by_distance(origin, candidates, radius_km);

        debug!(
            latitude,
            longitude,
            radius_km,
            scanned,
            hits = hits.len(),
            "proximity search"
        );
        Ok(hits)
    }
}

/// Keep the sites with distance `< radius_km` from `origin` and order them
/// by distance, then by site id so equal distances come out the same way
/// regardless of input order.
pub fn rank_by_distance(
    origin: GeoPoint,
    sites: impl IntoIterator<Item = Site>,
    radius_km: f64,
) -> Vec<NearbySite> {
    let from = (origin.latitude(), origin.longitude());

    let mut hits: Vec<NearbySite> = sites
        .into_iter()
        .filter_map(|site| {
            let distance_km = great_circle_distance_km(from, (site.latitude, site.longitude));
            (distance_km < radius_km).then_some(NearbySite { site, distance_km })
        })
        .collect();

    hits.sort_by(|a, b| {
        a.distance_km
            .total_cmp(&b.distance_km)
            .then_with(|| a.site.id.cmp(&b.site.id))
    });
    hits
}
