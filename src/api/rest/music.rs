//! Release endpoints

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::{authorize, payload, run_blocking, ApiFailure};
use crate::api::state::AppState;
use crate::types::{Category, Direction, RecordRef, ReleaseCatalog, ReleaseDraft};

/// Body of `POST /api/music`
#[derive(Debug, Deserialize)]
pub struct MusicRequest {
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub release: Option<Value>,
    #[serde(default)]
    pub direction: Option<String>,
}

impl MusicRequest {
    fn category(&self) -> Result<Category, ApiFailure> {
        let name = self.category.as_deref().unwrap_or_default();
        name.parse()
            .map_err(|_| ApiFailure::InvalidCategory(name.to_string()))
    }

    fn direction(&self) -> Result<Direction, ApiFailure> {
        let name = self.direction.as_deref().unwrap_or_default();
        name.parse()
            .map_err(|_| ApiFailure::InvalidAction(format!("reorder direction '{}'", name)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MusicAction {
    Check,
    Add,
    Delete,
    Reorder,
}

impl FromStr for MusicAction {
    type Err = ApiFailure;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "check" => Ok(MusicAction::Check),
            "add" => Ok(MusicAction::Add),
            "delete" => Ok(MusicAction::Delete),
            "reorder" => Ok(MusicAction::Reorder),
            other => Err(ApiFailure::InvalidAction(other.to_string())),
        }
    }
}

/// GET /api/music - Both categories in rank order
pub async fn list_music(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ReleaseCatalog>, ApiFailure> {
    run_blocking(move || Ok(state.releases.list())).await
}

/// POST /api/music - Password-gated release mutation
pub async fn mutate_music(
    State(state): State<Arc<AppState>>,
    body: Result<Json<MusicRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiFailure> {
    let Json(request) = body?;
    run_blocking(move || apply(&state, request)).await
}

/// Execute one admin request against the release store
pub fn apply(state: &AppState, request: MusicRequest) -> Result<Value, ApiFailure> {
    authorize(state, request.password.as_deref())?;

    let action = request.action.parse::<MusicAction>()?;
    if action == MusicAction::Check {
        return Ok(json!({ "success": true }));
    }

    let category = request.category()?;
    match action {
        MusicAction::Add => {
            let draft: ReleaseDraft = payload(request.release, "release")?;
            let release = state.releases.add(category, draft)?;
            Ok(json!({ "success": true, "release": release }))
        }
        MusicAction::Delete => {
            let target: RecordRef = payload(request.release, "release")?;
            state.releases.delete(category, &target.id)?;
            Ok(json!({ "success": true }))
        }
        MusicAction::Reorder => {
            let direction = request.direction()?;
            let target: RecordRef = payload(request.release, "release")?;
            state.releases.reorder(category, &target.id, direction)?;
            Ok(json!({ "success": true }))
        }
        MusicAction::Check => Ok(json!({ "success": true })),
    }
}
