use itertools::Itertools;
use model::{GeoLocated, WithDistance};
use utility::geo::Route;

use crate::{PlanError, PlanResult};

pub const DEFAULT_CORRIDOR_KM: f64 = 20.0;

/// Records within `corridor_km` of the route segment, closest first.
///
/// Distances are measured with [`utility::geo::distance_to_line`], so records
/// behind the start or past the end of the route are measured to that
/// endpoint. Records at equal distance keep their input order.
pub fn events_along_route<'a, T: GeoLocated>(
    events: &'a [T],
    route: &Route,
    corridor_km: f64,
) -> PlanResult<Vec<WithDistance<&'a T>>> {
    if !corridor_km.is_finite() || corridor_km < 0.0 {
        return Err(PlanError::InvalidCorridor(corridor_km));
    }

    let matches = events
        .iter()
        .map(|event| WithDistance::new(route.distance_to(&event.coordinates()), event))
        .filter(|event| event.distance_km <= corridor_km)
        .sorted_by(|a, b| a.distance_km.total_cmp(&b.distance_km))
        .collect::<Vec<_>>();

    log::trace!(
        "{} of {} events within {} km of the route",
        matches.len(),
        events.len(),
        corridor_km
    );
    Ok(matches)
}
