// src/models/preferences.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;
use validator::Validate;

/// Keys the dashboard persists between visits.
pub const CURRENT_VIEW: &str = "current_view";
pub const CURRENT_TAB: &str = "current_tab";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UiPreferences {
    #[schema(example = "appointments")]
    pub current_view: Option<String>,
    #[schema(example = "today")]
    pub current_tab: Option<String>,
}

impl UiPreferences {
    pub fn from_entries(entries: &BTreeMap<String, String>) -> Self {
        Self {
            current_view: entries.get(CURRENT_VIEW).cloned(),
            current_tab: entries.get(CURRENT_TAB).cloned(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePreferencesPayload {
    #[validate(length(min = 1, max = 64, message = "invalid_view"))]
    pub current_view: Option<String>,
    #[validate(length(min = 1, max = 64, message = "invalid_tab"))]
    pub current_tab: Option<String>,
}
