//! HTTP route handlers for the widget API.

use axum::Router;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, Json};
use axum::routing::{get, post};
use serde::Deserialize;
use tidewatch::core::catalog::find_cleanup;
use tidewatch::core::types::{ApplicationState, Cleanup, JoinReceipt, Location};
use tidewatch::forecast::ForecastOutcome;
use tracing::warn;

use crate::state::AppState;

/// Build the API router.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/state", get(get_state))
        .route("/cleanups", get(list_cleanups))
        .route("/join", post(join))
        .route("/forecast", get(get_forecast))
        .route("/forecast/refresh", post(refresh_forecast))
}

async fn health() -> &'static str {
    "ok"
}

/// GET /api/state - snapshot of the application state.
async fn get_state(State(state): State<AppState>) -> Result<Json<ApplicationState>, StatusCode> {
    let store = state.lock_store().map_err(internal)?;
    Ok(Json(store.state().clone()))
}

/// GET /api/cleanups - the cleanup catalog.
async fn list_cleanups(State(state): State<AppState>) -> Json<Vec<Cleanup>> {
    Json(state.catalog.as_ref().clone())
}

#[derive(Debug, Deserialize)]
struct JoinRequest {
    cleanup: String,
}

/// POST /api/join - join a catalog cleanup by name.
async fn join(
    State(state): State<AppState>,
    Json(request): Json<JoinRequest>,
) -> Result<Json<JoinReceipt>, StatusCode> {
    let cleanup = find_cleanup(&state.catalog, &request.cleanup).ok_or(StatusCode::NOT_FOUND)?;
    let mut store = state.lock_store().map_err(internal)?;
    Ok(Json(store.join(&cleanup.name)))
}

/// GET /api/forecast - current markup of the forecast region.
async fn get_forecast(State(state): State<AppState>) -> Result<Html<String>, StatusCode> {
    state.forecast.snapshot().map(Html).map_err(internal)
}

#[derive(Debug, Default, Deserialize)]
struct RefreshParams {
    lat: Option<f64>,
    lng: Option<f64>,
}

/// POST /api/forecast/refresh?lat=&lng= - re-run the forecast pipeline.
///
/// Explicit coordinates are saved as the user's location first.
async fn refresh_forecast(
    State(state): State<AppState>,
    Query(params): Query<RefreshParams>,
) -> Result<Json<ForecastOutcome>, StatusCode> {
    let location = match (params.lat, params.lng) {
        (Some(lat), Some(lng)) => {
            if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
                return Err(StatusCode::BAD_REQUEST);
            }
            let location = Location { lat, lng };
            state.lock_store().map_err(internal)?.set_location(location);
            location
        }
        (None, None) => state.location().map_err(internal)?,
        _ => return Err(StatusCode::BAD_REQUEST),
    };
    let outcome = state.refresh_forecast(location).await.map_err(internal)?;
    Ok(Json(outcome))
}

fn internal(err: anyhow::Error) -> StatusCode {
    warn!(error = %format!("{err:#}"), "request failed");
    StatusCode::INTERNAL_SERVER_ERROR
}

#[cfg(test)]
mod tests {
    use super::*;
    use tidewatch::test_support::TestProject;

    fn app_state(project: &TestProject) -> AppState {
        AppState::open(project.path()).expect("open")
    }

    async fn unreachable_base() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("addr");
        drop(listener);
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn state_starts_at_defaults() {
        let project = TestProject::new().expect("project");
        let Json(snapshot) = get_state(State(app_state(&project))).await.expect("state");
        assert_eq!(snapshot, ApplicationState::default());
    }

    #[tokio::test]
    async fn join_updates_stats_and_persists() {
        let project = TestProject::new().expect("project");
        let state = app_state(&project);
        let Json(receipt) = join(
            State(state.clone()),
            Json(JoinRequest {
                cleanup: "Venice Beach".to_string(),
            }),
        )
        .await
        .expect("join");
        assert_eq!(receipt.stats.cleanups_joined, Some(1));
        assert_eq!(receipt.stats.points_earned, Some(10));
        assert!(receipt.crew_added);

        let reopened = app_state(&project);
        let Json(snapshot) = get_state(State(reopened)).await.expect("state");
        assert_eq!(snapshot.user_stats, receipt.stats);
        assert_eq!(snapshot.crew.len(), 1);
    }

    #[tokio::test]
    async fn join_unknown_cleanup_is_not_found() {
        let project = TestProject::new().expect("project");
        let result = join(
            State(app_state(&project)),
            Json(JoinRequest {
                cleanup: "Atlantis".to_string(),
            }),
        )
        .await;
        assert_eq!(result.unwrap_err(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn cleanups_lists_catalog() {
        let project = TestProject::new().expect("project");
        let Json(cleanups) = list_cleanups(State(app_state(&project))).await;
        assert!(cleanups.iter().any(|cleanup| cleanup.name == "Venice Beach"));
    }

    #[tokio::test]
    async fn refresh_against_unreachable_provider_shows_notice() {
        let project = TestProject::new().expect("project");
        project
            .use_weather_base(&unreachable_base().await)
            .expect("config");
        let state = app_state(&project);

        let Json(outcome) = refresh_forecast(
            State(state.clone()),
            Query(RefreshParams {
                lat: Some(34.0),
                lng: Some(-118.5),
            }),
        )
        .await
        .expect("refresh");
        assert_eq!(outcome, ForecastOutcome::Unavailable);

        let Html(markup) = get_forecast(State(state.clone())).await.expect("forecast");
        assert!(markup.contains("forecast-error"));
        assert_eq!(
            state.location().expect("location"),
            Location {
                lat: 34.0,
                lng: -118.5
            }
        );
    }

    #[tokio::test]
    async fn refresh_requires_both_coordinates() {
        let project = TestProject::new().expect("project");
        let result = refresh_forecast(
            State(app_state(&project)),
            Query(RefreshParams {
                lat: Some(34.0),
                lng: None,
            }),
        )
        .await;
        assert_eq!(result.unwrap_err(), StatusCode::BAD_REQUEST);
    }
}
