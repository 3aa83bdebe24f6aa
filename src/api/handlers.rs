use axum::{
    Json,
    extract::{RawQuery, State},
    http::StatusCode,
};
use std::sync::Arc;

use crate::data_models::{RefinementToggle, SearchState};
use crate::error::Error;
use crate::refinements::RefinementView;
use crate::search_params::{self, EncodeOptions};

use super::AppState;
use super::models::{
    EncodeRequest, EncodeResponse, RefinementsRequest, ToggleRequest, ToggleResponse,
};

fn bad_request(e: Error) -> (StatusCode, String) {
    (StatusCode::BAD_REQUEST, e.to_string())
}

pub async fn decode_handler(
    State(app): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> Json<SearchState> {
    let query = query.unwrap_or_default();
    Json(search_params::decode_onto(app.defaults.clone(), &query))
}

pub async fn encode_handler(
    Json(request): Json<EncodeRequest>,
) -> Result<Json<EncodeResponse>, (StatusCode, String)> {
    let path = request.path.unwrap_or_default();
    if request.include_path && path.is_empty() {
        return Err(bad_request(Error::invalid_request(
            "includePath requires a non-empty path",
        )));
    }
    if let Some(toggle) = &request.toggle_refinement {
        validate_attribute_id(&toggle.attribute_id).map_err(bad_request)?;
    }

    let options = EncodeOptions {
        include_path: request.include_path,
        toggle_refinement: request.toggle_refinement,
    };
    let url = search_params::encode(&request.state, &options, &path);
    Ok(Json(EncodeResponse { url }))
}

pub async fn toggle_handler(
    State(app): State<Arc<AppState>>,
    Json(request): Json<ToggleRequest>,
) -> Result<Json<ToggleResponse>, (StatusCode, String)> {
    validate_attribute_id(&request.attribute_id).map_err(bad_request)?;

    let toggle = RefinementToggle {
        attribute_id: request.attribute_id,
        value: request.value,
    };
    let state = search_params::decode_onto(app.defaults.clone(), &request.query)
        .with_toggled(&toggle);
    let options = EncodeOptions {
        include_path: !request.path.is_empty(),
        toggle_refinement: None,
    };
    let url = search_params::encode(&state, &options, &request.path);

    Ok(Json(ToggleResponse { state, url }))
}

pub async fn refinements_handler(
    State(app): State<Arc<AppState>>,
    Json(request): Json<RefinementsRequest>,
) -> Json<RefinementView> {
    let state = search_params::decode_onto(app.defaults.clone(), &request.query);
    Json(app.catalog.view(&state, &request.refinements, &request.path))
}

fn validate_attribute_id(attribute_id: &str) -> Result<(), Error> {
    if attribute_id.trim().is_empty() {
        return Err(Error::invalid_request("attributeId cannot be empty"));
    }
    Ok(())
}
