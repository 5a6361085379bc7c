use axum::{
    extract::{OriginalUri, State},
    http::Method,
    routing::{get, on, post},
    Json, Router,
};
use model::{event::Event, WithDistance, WithId};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use trip_planner::{MissingCoordinates, PlanMode, TripPlan, TripRequest};
use utility::geo::{GeoPoint, Route};

use crate::{
    common::{
        route_not_found, schema_no_example, JsonResult, RouteErrorResponse,
        METHOD_FILTER_ALL,
    },
    WebState,
};

pub(crate) fn routes(state: WebState) -> Router {
    Router::new()
        .route("/", post(plan_trip))
        .route("/schema", get(schema_no_example::<TripPlanDto>))
        .route("/request/schema", get(schema_no_example::<PlanRequestDto>))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

#[derive(Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
struct PlanRequestDto {
    events: Vec<WithId<Event>>,
    #[serde(flatten)]
    request: TripRequest,
    /// Overrides the server default for records without coordinates.
    exclude_missing_coordinates: Option<bool>,
}

#[serde_with::skip_serializing_none]
#[derive(Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
struct TripPlanDto {
    mode: PlanMode,
    route: Option<Route>,
    centroid: Option<GeoPoint>,
    candidates: usize,
    events: Vec<WithDistance<WithId<Event>>>,
}

impl From<TripPlan<'_, WithId<Event>>> for TripPlanDto {
    fn from(plan: TripPlan<'_, WithId<Event>>) -> Self {
        Self {
            mode: plan.mode,
            route: plan.route,
            centroid: plan.centroid,
            candidates: plan.candidates,
            events: plan
                .events
                .into_iter()
                .map(|event| event.map(|event| event.clone()))
                .collect(),
        }
    }
}

async fn plan_trip(
    OriginalUri(original_uri): OriginalUri,
    State(WebState { planner }): State<WebState>,
    Json(body): Json<PlanRequestDto>,
) -> JsonResult<TripPlanDto> {
    let planner = match body.exclude_missing_coordinates {
        Some(true) => planner.with_missing_coordinates(MissingCoordinates::Exclude),
        Some(false) => {
            planner.with_missing_coordinates(MissingCoordinates::DefaultToOrigin)
        }
        None => planner,
    };
    planner
        .plan(&body.events, &body.request)
        .map(|plan| Json(TripPlanDto::from(plan)))
        .map_err(|why| {
            log::warn!("could not plan trip: {}", why);
            RouteErrorResponse::from(why)
                .with_method(&Method::POST)
                .with_uri(original_uri.path())
        })
}
