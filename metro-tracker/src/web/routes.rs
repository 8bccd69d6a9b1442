//! HTTP route handlers.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Utc;
use tracing::{error, info, warn};

use crate::motion::Estimator;
use crate::navigation::Navigator;
use crate::planner::PlanError;
use crate::tracker::{self, TrackerInputs, TrackerStopped, TrackerView};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/stations", get(list_stations))
        .route("/route", get(plan_route))
        .route("/trip", post(start_trip).delete(stop_trip))
        .route("/trip/fix", post(push_fix))
        .route("/trip/motion", post(push_motion))
        .route("/trip/status", get(trip_status))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Every station in the network.
async fn list_stations(State(state): State<AppState>) -> Json<StationsResponse> {
    let network = state.planner.network();
    let stations = network
        .graph()
        .station_ids()
        .map(|id| StationResult::from_station(network, id))
        .collect();

    Json(StationsResponse { stations })
}

/// Plan a route without tracking it.
async fn plan_route(
    State(state): State<AppState>,
    Query(req): Query<RouteRequest>,
) -> Result<Json<RouteResponse>, AppError> {
    let plan = state.planner.plan(&req.from, &req.to).await?;
    Ok(Json(RouteResponse::from_plan(state.planner.network(), &plan)))
}

/// Plan a trip and start tracking it.
async fn start_trip(
    State(state): State<AppState>,
    Json(req): Json<StartTripRequest>,
) -> Result<(StatusCode, Json<StartTripResponse>), AppError> {
    let mut trip = state.trip.lock().await;
    if trip.as_ref().is_some_and(|handle| !handle.is_finished()) {
        return Err(AppError::Conflict {
            message: "A trip is already being tracked".into(),
        });
    }

    let plan = state.planner.plan(&req.from, &req.to).await?;
    let network = Arc::clone(state.planner.network());
    let settings = &state.settings;

    let navigator = Navigator::new(
        Arc::clone(&network),
        &plan,
        settings.navigation.clone(),
        req.start(),
    );
    let estimator = Estimator::new(settings.estimator.clone());
    let handle = tracker::spawn(
        navigator,
        estimator,
        Arc::clone(&state.notifier),
        &settings.tracker,
    );
    let status = handle.view();

    info!(from = %req.from, to = %req.to, weight = plan.route.weight, "trip started");
    *trip = Some(handle);

    Ok((
        StatusCode::CREATED,
        Json(StartTripResponse {
            route: RouteResponse::from_plan(&network, &plan),
            status,
        }),
    ))
}

/// Senders into the active trip's tracker.
async fn active_inputs(state: &AppState) -> Result<TrackerInputs, AppError> {
    state
        .trip
        .lock()
        .await
        .as_ref()
        .map(|handle| handle.inputs())
        .ok_or_else(no_active_trip)
}

/// Feed a position fix to the active trip.
async fn push_fix(
    State(state): State<AppState>,
    Json(req): Json<FixRequest>,
) -> Result<StatusCode, AppError> {
    let inputs = active_inputs(&state).await?;
    inputs.push_fix(req.into_fix(Utc::now())).await?;
    Ok(StatusCode::ACCEPTED)
}

/// Feed a motion sample to the active trip.
async fn push_motion(
    State(state): State<AppState>,
    Json(req): Json<MotionRequest>,
) -> Result<StatusCode, AppError> {
    let inputs = active_inputs(&state).await?;
    inputs.push_sample(req.into_sample(Utc::now())).await?;
    Ok(StatusCode::ACCEPTED)
}

/// Latest view of the active trip.
async fn trip_status(State(state): State<AppState>) -> Result<Json<TrackerView>, AppError> {
    let trip = state.trip.lock().await;
    let handle = trip.as_ref().ok_or_else(no_active_trip)?;
    Ok(Json(handle.view()))
}

/// Stop tracking and return the final view.
async fn stop_trip(State(state): State<AppState>) -> Result<Json<TrackerView>, AppError> {
    let handle = state.trip.lock().await.take().ok_or_else(no_active_trip)?;
    let view = handle.view();
    handle.stop().await;
    info!("trip stopped");
    Ok(Json(view))
}

fn no_active_trip() -> AppError {
    AppError::NotFound {
        message: "No trip is being tracked".into(),
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Conflict { message: String },
    Internal { message: String },
}

impl From<PlanError> for AppError {
    fn from(e: PlanError) -> Self {
        match e {
            PlanError::StationNotFound(_) => AppError::NotFound {
                message: e.to_string(),
            },
            PlanError::NoPathFound { .. } => AppError::BadRequest {
                message: e.to_string(),
            },
            PlanError::SearchLimitExceeded { .. } => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl From<TrackerStopped> for AppError {
    fn from(e: TrackerStopped) -> Self {
        AppError::Conflict {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Conflict { message } => (StatusCode::CONFLICT, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(status = status.as_u16(), %message, "request failed");
        } else {
            warn!(status = status.as_u16(), %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
