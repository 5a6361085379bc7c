use model::{city::city_coordinates, GeoLocated, WithDistance};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::geo::{GeoPoint, Route};

use crate::{
    cluster::{centroid, find_nearby_events_with_distance},
    corridor::{events_along_route, DEFAULT_CORRIDOR_KM},
    PlanError, PlanResult,
};

pub const DEFAULT_EVENT_COUNT: usize = 10;

/// A start or end of a trip, either a known city or a raw position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum Waypoint {
    City(String),
    Coordinates(GeoPoint),
}

impl Waypoint {
    pub fn resolve(&self) -> PlanResult<GeoPoint> {
        match self {
            Waypoint::City(name) => city_coordinates(name)
                .ok_or_else(|| PlanError::UnknownCity(name.clone())),
            Waypoint::Coordinates(point) => Ok(*point),
        }
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TripRequest {
    pub start: Option<Waypoint>,
    pub end: Option<Waypoint>,
    pub count: Option<usize>,
    pub corridor_km: Option<f64>,
}

impl TripRequest {
    pub fn nearby(count: usize) -> Self {
        Self {
            count: Some(count),
            ..Default::default()
        }
    }

    pub fn route(start: Waypoint, end: Waypoint) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            ..Default::default()
        }
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    pub fn with_corridor(mut self, corridor_km: f64) -> Self {
        self.corridor_km = Some(corridor_km);
        self
    }
}

/// How records without a complete position are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum MissingCoordinates {
    /// Missing values are taken as `0`, placing the record at `(0, 0)`.
    #[default]
    DefaultToOrigin,
    /// Records are left out before clustering or corridor filtering.
    Exclude,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum PlanMode {
    Cluster,
    Corridor,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripPlan<'a, T> {
    pub mode: PlanMode,
    pub route: Option<Route>,
    pub centroid: Option<GeoPoint>,
    /// Number of records considered after applying [`MissingCoordinates`].
    pub candidates: usize,
    pub events: Vec<WithDistance<&'a T>>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TripPlanner {
    default_count: usize,
    default_corridor_km: f64,
    missing_coordinates: MissingCoordinates,
}

impl Default for TripPlanner {
    fn default() -> Self {
        Self {
            default_count: DEFAULT_EVENT_COUNT,
            default_corridor_km: DEFAULT_CORRIDOR_KM,
            missing_coordinates: MissingCoordinates::default(),
        }
    }
}

impl TripPlanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_count(mut self, count: usize) -> Self {
        self.default_count = count;
        self
    }

    pub fn with_default_corridor(mut self, corridor_km: f64) -> Self {
        self.default_corridor_km = corridor_km;
        self
    }

    pub fn with_missing_coordinates(mut self, policy: MissingCoordinates) -> Self {
        self.missing_coordinates = policy;
        self
    }

    pub fn missing_coordinates(&self) -> MissingCoordinates {
        self.missing_coordinates
    }

    /// Picks events for a trip.
    ///
    /// Without a route the events closest to the centroid of all candidates
    /// are returned, otherwise the events within the corridor along the route,
    /// closest first. Both are limited to the requested count.
    pub fn plan<'a, T: GeoLocated>(
        &self,
        events: &'a [T],
        request: &TripRequest,
    ) -> PlanResult<TripPlan<'a, T>> {
        let count = request.count.unwrap_or(self.default_count);
        if count == 0 {
            return Err(PlanError::InvalidCount(count));
        }
        let route = match (&request.start, &request.end) {
            (Some(start), Some(end)) => Some(Route::new(start.resolve()?, end.resolve()?)),
            (None, None) => None,
            _ => return Err(PlanError::IncompleteRoute),
        };

        let candidates = self.candidates(events);

        let plan = match route {
            Some(route) => {
                let corridor_km = request.corridor_km.unwrap_or(self.default_corridor_km);
                let mut matches = events_along_route(&candidates, &route, corridor_km)?;
                matches.truncate(count);
                TripPlan {
                    mode: PlanMode::Corridor,
                    route: Some(route),
                    centroid: None,
                    candidates: candidates.len(),
                    events: matches.into_iter().map(|m| m.map(|event| *event)).collect(),
                }
            }
            None => TripPlan {
                mode: PlanMode::Cluster,
                route: None,
                centroid: centroid(&candidates),
                candidates: candidates.len(),
                events: find_nearby_events_with_distance(&candidates, count)
                    .into_iter()
                    .map(|m| m.map(|event| *event))
                    .collect(),
            },
        };

        log::debug!(
            "planned {:?} trip: {} of {} candidates selected",
            plan.mode,
            plan.events.len(),
            plan.candidates
        );
        Ok(plan)
    }

    fn candidates<'a, T: GeoLocated>(&self, events: &'a [T]) -> Vec<&'a T> {
        match self.missing_coordinates {
            MissingCoordinates::DefaultToOrigin => events.iter().collect(),
            MissingCoordinates::Exclude => events
                .iter()
                .filter(|event| {
                    let keep = event.has_coordinates();
                    if !keep {
                        log::trace!("skipping event without coordinates");
                    }
                    keep
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::ptr;

    use model::event::Event;

    use super::*;

    fn swiss_events() -> Vec<Event> {
        vec![
            Event::titled("Zürich Openair").at(47.3769, 8.5417),
            Event::titled("Gurtenfestival").at(46.9186, 7.4172),
            Event::titled("Montreux Jazz").at(46.4312, 6.9107),
            Event::titled("Fête de la Musique Lausanne").at(46.5197, 6.6323),
            Event::titled("OLMA").at(47.4298, 9.3803),
            Event::titled("Lugano Estival").at(46.0037, 8.9511),
        ]
    }

    fn titles(plan: &TripPlan<Event>) -> Vec<String> {
        plan.events
            .iter()
            .map(|event| event.content.title.clone())
            .collect()
    }

    #[test]
    fn no_route_clusters() {
        let events = swiss_events();
        let plan = TripPlanner::new()
            .plan(&events, &TripRequest::nearby(3))
            .unwrap();
        assert_eq!(plan.mode, PlanMode::Cluster);
        assert!(plan.route.is_none());
        assert_eq!(plan.events.len(), 3);
        assert_eq!(plan.candidates, events.len());
        assert!(plan.centroid.is_some());
    }

    #[test]
    fn small_inputs_keep_their_order() {
        let events = swiss_events();
        let plan = TripPlanner::new().plan(&events, &TripRequest::default()).unwrap();
        assert_eq!(plan.events.len(), events.len());
        for (picked, original) in plan.events.iter().zip(events.iter()) {
            assert!(ptr::eq(picked.content, original));
        }
    }

    #[test]
    fn city_route_filters_by_corridor() {
        let events = swiss_events();
        let request = TripRequest::route(
            Waypoint::City("Zürich".to_owned()),
            Waypoint::City("Genf".to_owned()),
        );
        let plan = TripPlanner::new().plan(&events, &request).unwrap();
        assert_eq!(plan.mode, PlanMode::Corridor);
        assert_eq!(
            titles(&plan),
            vec![
                "Zürich Openair",
                "Fête de la Musique Lausanne",
                "Gurtenfestival",
                "Montreux Jazz"
            ]
        );
        assert!(plan.events.iter().all(|event| event.distance_km <= DEFAULT_CORRIDOR_KM));
    }

    #[test]
    fn corridor_results_are_limited_to_count() {
        let events = swiss_events();
        let request = TripRequest::route(
            Waypoint::City("Zürich".to_owned()),
            Waypoint::Coordinates(GeoPoint::new(46.2044, 6.1432)),
        )
        .with_count(1)
        .with_corridor(500.0);
        let plan = TripPlanner::new().plan(&events, &request).unwrap();
        assert_eq!(titles(&plan), vec!["Zürich Openair"]);
    }

    #[test]
    fn unknown_city_is_an_error() {
        let request = TripRequest::route(
            Waypoint::City("Zürich".to_owned()),
            Waypoint::City("Atlantis".to_owned()),
        );
        let events = swiss_events();
        let error = TripPlanner::new().plan(&events, &request).unwrap_err();
        assert_eq!(error, PlanError::UnknownCity("Atlantis".to_owned()));
    }

    #[test]
    fn half_a_route_is_an_error() {
        let request = TripRequest {
            start: Some(Waypoint::City("Bern".to_owned())),
            ..Default::default()
        };
        let events = swiss_events();
        assert_eq!(
            TripPlanner::new().plan(&events, &request).unwrap_err(),
            PlanError::IncompleteRoute
        );
    }

    #[test]
    fn zero_count_is_an_error() {
        let events = swiss_events();
        assert_eq!(
            TripPlanner::new()
                .plan(&events, &TripRequest::nearby(0))
                .unwrap_err(),
            PlanError::InvalidCount(0)
        );
    }

    #[test]
    fn missing_coordinates_policy() {
        let mut events = swiss_events();
        events.push(Event::titled("Somewhere"));

        let default = TripPlanner::new().with_default_count(3);
        let plan = default.plan(&events, &TripRequest::default()).unwrap();
        assert_eq!(plan.candidates, 7);
        // the (0, 0) record drags the centroid far south
        assert!(plan.centroid.unwrap().latitude < 41.0);

        let strict = default.with_missing_coordinates(MissingCoordinates::Exclude);
        let plan = strict.plan(&events, &TripRequest::default()).unwrap();
        assert_eq!(plan.candidates, 6);
        assert!(plan.centroid.unwrap().latitude > 46.0);
        assert!(plan.events.iter().all(|event| event.content.has_coordinates()));
    }

    #[test]
    fn missing_coordinates_are_measured_from_the_origin_on_routes() {
        let mut events = swiss_events();
        events.insert(0, Event::titled("Somewhere"));
        let request = TripRequest::route(
            Waypoint::City("Zürich".to_owned()),
            Waypoint::City("Genf".to_owned()),
        );

        // (0, 0) projects beyond Genf, so it is measured to Genf and dropped
        let origin_km = Route::new(
            GeoPoint::new(47.3769, 8.5417),
            GeoPoint::new(46.2044, 6.1432),
        )
        .distance_to(&GeoPoint::default());
        let genf_km = GeoPoint::new(46.2044, 6.1432).distance_to(&GeoPoint::default());
        assert!((origin_km - genf_km).abs() < 1e-6);

        let plan = TripPlanner::new().plan(&events, &request).unwrap();
        assert_eq!(plan.candidates, 7);
        assert!(plan.events.iter().all(|event| event.content.has_coordinates()));
        assert_eq!(plan.events.len(), 4);

        // a corridor wide enough to reach the Gulf of Guinea keeps it
        let plan = TripPlanner::new()
            .plan(&events, &request.clone().with_corridor(genf_km + 1.0))
            .unwrap();
        let last = plan.events.last().unwrap();
        assert_eq!(last.content.title, "Somewhere");
        assert!((last.distance_km - genf_km).abs() < 1e-6);
    }

    #[test]
    fn waypoints_deserialize_from_names_or_points() {
        let request: TripRequest = serde_json::from_str(
            r#"{"start":"Bern","end":{"latitude":46.2,"longitude":6.1},"corridorKm":5}"#,
        )
        .unwrap();
        assert_eq!(request.start, Some(Waypoint::City("Bern".to_owned())));
        assert_eq!(
            request.end,
            Some(Waypoint::Coordinates(GeoPoint::new(46.2, 6.1)))
        );
        assert_eq!(request.corridor_km, Some(5.0));
    }
}
