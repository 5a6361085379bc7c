use axum::{
    extract::Query,
    routing::{get, on},
    Json, Router,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use model::event::Event;
use utility::geo::{haversine_distance, GeoPoint, Route};

use crate::{
    common::{route_not_found, schema, schema_no_example, METHOD_FILTER_ALL},
    WebState,
};

mod cities;
mod planner;

pub(crate) fn routes(state: WebState) -> Router {
    Router::new()
        .route("/distance", get(distance))
        .route("/distance/schema", get(schema_no_example::<DistanceDto>))
        .route("/route-distance", get(route_distance))
        .route(
            "/route-distance/schema",
            get(schema_no_example::<RouteDistanceDto>),
        )
        .route("/events/schema", get(schema::<Event>))
        .nest_service("/cities", cities::routes(state.clone()))
        .nest_service("/trip-planner", planner::routes(state.clone()))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DistanceQuery {
    from_latitude: f64,
    from_longitude: f64,
    to_latitude: f64,
    to_longitude: f64,
}

#[derive(Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
struct DistanceDto {
    distance_km: f64,
}

async fn distance(Query(params): Query<DistanceQuery>) -> Json<DistanceDto> {
    Json(DistanceDto {
        distance_km: haversine_distance(
            params.from_latitude,
            params.from_longitude,
            params.to_latitude,
            params.to_longitude,
        ),
    })
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RouteDistanceQuery {
    latitude: f64,
    longitude: f64,
    start_latitude: f64,
    start_longitude: f64,
    end_latitude: f64,
    end_longitude: f64,
}

#[derive(Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
struct RouteDistanceDto {
    route: Route,
    route_length_km: f64,
    distance_km: f64,
}

async fn route_distance(
    Query(params): Query<RouteDistanceQuery>,
) -> Json<RouteDistanceDto> {
    let route = Route::new(
        GeoPoint::new(params.start_latitude, params.start_longitude),
        GeoPoint::new(params.end_latitude, params.end_longitude),
    );
    let point = GeoPoint::new(params.latitude, params.longitude);
    Json(RouteDistanceDto {
        route,
        route_length_km: route.length_km(),
        distance_km: route.distance_to(&point),
    })
}
