use serde::{Deserialize, Serialize};

use crate::data_models::{RefinementToggle, SearchState};
use crate::refinements::Refinement;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodeRequest {
    pub state: SearchState,
    #[serde(default)]
    pub include_path: bool,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub toggle_refinement: Option<RefinementToggle>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EncodeResponse {
    pub url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleRequest {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub path: String,
    pub attribute_id: String,
    #[serde(default)]
    pub value: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ToggleResponse {
    pub state: SearchState,
    pub url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefinementsRequest {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub refinements: Vec<Refinement>,
}
