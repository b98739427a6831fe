use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use chrono::NaiveDateTime;
use slotwise_shared::models::{Property, RegisterPropertyRequest, Slot, SlotBookRequest};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    // The literal "slots" segment must be registered alongside the
    // parameterized route; axum prefers the static match.
    Router::new()
        .route(
            "/api/v1/properties",
            get(list_properties).post(register_property),
        )
        .route("/api/v1/properties/slots", get(find_all_available_slots))
        .route(
            "/api/v1/properties/{property_id}/slots",
            get(find_available_slots_for_property).post(book_slot),
        )
}

async fn list_properties(State(state): State<AppState>) -> Json<Vec<Property>> {
    Json(state.service.list_properties().await)
}

async fn register_property(
    State(state): State<AppState>,
    Json(req): Json<RegisterPropertyRequest>,
) -> Json<Property> {
    Json(state.service.register_property(req).await)
}

async fn book_slot(
    State(state): State<AppState>,
    Path(property_id): Path<Uuid>,
    Json(req): Json<SlotBookRequest>,
) -> Result<Json<Slot>, AppError> {
    let slot = state.service.book_slot(property_id, req).await?;
    Ok(Json(slot))
}

async fn find_available_slots_for_property(
    State(state): State<AppState>,
    Path(property_id): Path<Uuid>,
) -> Result<Json<Vec<Slot>>, AppError> {
    let slots = state
        .service
        .find_available_slots_for_property(property_id)
        .await?;
    Ok(Json(slots))
}

async fn find_all_available_slots(
    State(state): State<AppState>,
) -> Json<BTreeMap<NaiveDateTime, Vec<Slot>>> {
    Json(state.service.find_all_available_slots().await)
}
