use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use sidopro_core::{
    models::{ProjectKey, Role},
    params::{ListReports, ListStages, DEFAULT_PER_PAGE},
    ui::SessionContext,
    views::{ProgressGrid, ProjectSnapshot, ReportTable, ReportTablePage, StageList},
    GeocodeResult, ProgressError,
};

use super::{error::ApiError, AppState};

/// Query string shared by the view routes.
#[derive(Debug, Default, Deserialize)]
pub struct ViewQuery {
    pub project: Option<String>,
    pub q: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl ViewQuery {
    fn project(&self) -> Result<ProjectKey, ProgressError> {
        self.project
            .as_deref()
            .map_or(Ok(ProjectKey::default()), str::parse)
    }
}

impl TryFrom<ViewQuery> for ListStages {
    type Error = ProgressError;

    fn try_from(query: ViewQuery) -> Result<Self, Self::Error> {
        Ok(ListStages {
            project: query.project()?,
            search: query.q,
        })
    }
}

impl TryFrom<ViewQuery> for ListReports {
    type Error = ProgressError;

    fn try_from(query: ViewQuery) -> Result<Self, Self::Error> {
        Ok(ListReports {
            project: query.project()?,
            search: query.q,
            page: query.page.unwrap_or(1),
            per_page: query.per_page.unwrap_or(DEFAULT_PER_PAGE),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct GeocodeQuery {
    pub lat: Option<String>,
    pub lon: Option<String>,
}

async fn grid(state: &AppState, query: ViewQuery) -> Result<Json<ProgressGrid>, ApiError> {
    let params = ListStages::try_from(query)?;
    let snapshot = ProjectSnapshot::load(&state.store, params.project).await;
    Ok(Json(
        ProgressGrid::from_snapshot(&snapshot).with_search(params.search.as_deref()),
    ))
}

/// Public progress overview.
pub async fn home(
    State(state): State<AppState>,
    Query(query): Query<ViewQuery>,
) -> Result<Json<ProgressGrid>, ApiError> {
    grid(&state, query).await
}

/// Field-officer dashboard.
pub async fn progress_grid(
    State(state): State<AppState>,
    Query(query): Query<ViewQuery>,
) -> Result<Json<ProgressGrid>, ApiError> {
    grid(&state, query).await
}

/// Admin login landing; carries no project data.
pub async fn admin_login(Extension(session): Extension<Arc<SessionContext>>) -> Json<Value> {
    let role = session.role();
    let message = if role == Role::Admin {
        "Signed in as admin."
    } else {
        "Sign in as admin to manage stages and reports."
    };

    Json(json!({
        "page": "admin-login",
        "role": role,
        "message": message,
    }))
}

pub async fn stage_list(
    State(state): State<AppState>,
    Query(query): Query<ViewQuery>,
) -> Result<Json<StageList>, ApiError> {
    let params = ListStages::try_from(query)?;
    let snapshot = ProjectSnapshot::load(&state.store, params.project).await;
    Ok(Json(
        StageList::from_snapshot(&snapshot).with_search(params.search.as_deref()),
    ))
}

pub async fn report_table(
    State(state): State<AppState>,
    Query(query): Query<ViewQuery>,
) -> Result<Json<ReportTablePage>, ApiError> {
    let params = ListReports::try_from(query)?;
    let snapshot = ProjectSnapshot::load(&state.store, params.project).await;
    Ok(Json(
        ReportTable::from_snapshot(&snapshot)
            .with_search(params.search.as_deref())
            .paginate(params.page, params.per_page),
    ))
}

/// Reverse-geocoding proxy.
pub async fn geocode(
    State(state): State<AppState>,
    query: Result<Query<GeocodeQuery>, QueryRejection>,
) -> Result<Json<GeocodeResult>, ApiError> {
    let Query(query) = query?;
    let result = state
        .geocoder
        .reverse(query.lat.as_deref(), query.lon.as_deref())
        .await?;
    Ok(Json(result))
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound
}
