//! HTTP API: health, supported locations, flight and hotel optimization,
//! and the transfer calculator.

use crate::application::optimizer::{FlightSearch, HotelSearch, Optimizer, TransferRequest};
use crate::domain::award::Location;
use crate::domain::transfer::{StatusTier, TRANSFER_PARTNERS, TransferPartner};
use crate::error::{PointPilotError, Result};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

pub const STATUS_ONLINE: &str = "PointPilot Engine Online";

pub type AppState = Arc<Optimizer>;

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub routes: usize,
}

#[derive(Debug, Serialize)]
struct StatusTierDto {
    id: StatusTier,
    label: &'static str,
    #[serde(with = "rust_decimal::serde::float")]
    bonus_multiplier: rust_decimal::Decimal,
}

#[derive(Debug, Serialize)]
struct TransferCatalog {
    partners: &'static [TransferPartner],
    status_tiers: Vec<StatusTierDto>,
}

impl IntoResponse for PointPilotError {
    fn into_response(self) -> Response {
        let status = match &self {
            PointPilotError::NoOptionsAvailable => StatusCode::UNPROCESSABLE_ENTITY,
            PointPilotError::UnknownPartner(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/locations", get(locations))
        .route("/optimize/flight", post(optimize_flight))
        .route("/optimize/hotel", post(optimize_hotel))
        .route("/transfer", post(transfer))
        .route("/transfer/partners", get(transfer_partners))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, state: AppState) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "PointPilot API listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn health(State(optimizer): State<AppState>) -> Json<Health> {
    Json(Health {
        status: STATUS_ONLINE,
        routes: optimizer.charts().route_count(),
    })
}

async fn locations(State(optimizer): State<AppState>) -> Json<&'static [Location]> {
    Json(optimizer.charts().locations())
}

async fn optimize_flight(
    State(optimizer): State<AppState>,
    Json(search): Json<FlightSearch>,
) -> Result<impl IntoResponse> {
    let report = optimizer.optimize_flight(&search).await?;
    Ok(Json(report))
}

async fn optimize_hotel(
    State(optimizer): State<AppState>,
    Json(search): Json<HotelSearch>,
) -> Result<impl IntoResponse> {
    let report = optimizer.optimize_hotel(&search).await?;
    Ok(Json(report))
}

async fn transfer(
    State(optimizer): State<AppState>,
    Json(request): Json<TransferRequest>,
) -> Result<impl IntoResponse> {
    Ok(Json(optimizer.quote_transfer(&request)?))
}

async fn transfer_partners() -> impl IntoResponse {
    let status_tiers = StatusTier::ALL
        .into_iter()
        .map(|tier| StatusTierDto {
            id: tier,
            label: tier.label(),
            bonus_multiplier: tier.bonus_multiplier(),
        })
        .collect();

    Json(TransferCatalog {
        partners: &TRANSFER_PARTNERS,
        status_tiers,
    })
}
