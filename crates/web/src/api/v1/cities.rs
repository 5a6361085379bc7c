use axum::{
    extract::{OriginalUri, Path},
    http::Method,
    routing::{get, on},
    Json, Router,
};
use model::city::{self, City};

use crate::{
    common::{
        route_not_found, schema, JsonResult, RouteErrorResponse, VecResponse,
        METHOD_FILTER_ALL,
    },
    WebState,
};

pub(crate) fn routes(state: WebState) -> Router {
    Router::new()
        .route("/schema", get(schema::<City>))
        .route("/:name", get(get_city))
        .route("/", get(get_cities))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

async fn get_cities() -> Json<VecResponse<City>> {
    VecResponse::new(city::cities()).json()
}

async fn get_city(
    OriginalUri(original_uri): OriginalUri,
    Path(name): Path<String>,
) -> JsonResult<City> {
    city::city(&name).map(Json).ok_or_else(|| {
        RouteErrorResponse::not_found(&Method::GET, original_uri.path())
            .with_message(format!("Unknown city: {}", name))
    })
}
