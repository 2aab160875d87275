//! Tour date endpoints

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
use crate::types::{Event, EventDraft, RecordRef};

/// Body of `POST /api/events`
#[derive(Debug, Deserialize)]
pub struct EventsRequest {
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub event: Option<Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EventAction {
    Check,
    Add,
    Update,
    Delete,
}

impl FromStr for EventAction {
    type Err = ApiFailure;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "check" => Ok(EventAction::Check),
            "add" => Ok(EventAction::Add),
            "update" => Ok(EventAction::Update),
            "delete" => Ok(EventAction::Delete),
            other => Err(ApiFailure::InvalidAction(other.to_string())),
        }
    }
}

/// GET /api/events - All tour dates, earliest first
pub async fn list_events(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Event>>, ApiFailure> {
    run_blocking(move || Ok(state.events.list())).await
}

/// POST /api/events - Password-gated event mutation
pub async fn mutate_events(
    State(state): State<Arc<AppState>>,
    body: Result<Json<EventsRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiFailure> {
    let Json(request) = body?;
    run_blocking(move || apply(&state, request)).await
}

/// Execute one admin request against the event store
pub fn apply(state: &AppState, request: EventsRequest) -> Result<Value, ApiFailure> {
    authorize(state, request.password.as_deref())?;

    match request.action.parse::<EventAction>()? {
        EventAction::Check => Ok(json!({ "success": true })),
        EventAction::Add => {
            let draft: EventDraft = payload(request.event, "event")?;
            let event = state.events.add(draft)?;
            Ok(json!({ "success": true, "event": event }))
        }
        EventAction::Update => {
            let event: Event = payload(request.event, "event")?;
            let event = state.events.update(event)?;
            Ok(json!({ "success": true, "event": event }))
        }
        EventAction::Delete => {
            let target: RecordRef = payload(request.event, "event")?;
            state.events.delete(&target.id)?;
            Ok(json!({ "success": true }))
        }
    }
}
