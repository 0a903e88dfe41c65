use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::track::{parse_instant, TimeWindow, TrackPoint};
use crate::web::api::error::{ApiError, ApiResult};
use crate::web::server::AppState;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PointsQuery {
    /// Start of the closed interval (ISO-8601). Ignored unless `end_time` is also set.
    #[serde(default)]
    pub start_time: Option<String>,
    /// End of the closed interval (ISO-8601). Ignored unless `start_time` is also set.
    #[serde(default)]
    pub end_time: Option<String>,
}

impl PointsQuery {
    fn window(&self) -> ApiResult<TimeWindow> {
        Ok(TimeWindow::new(
            parse_param("start_time", self.start_time.as_deref())?,
            parse_param("end_time", self.end_time.as_deref())?,
        ))
    }
}

fn parse_param(param: &'static str, value: Option<&str>) -> ApiResult<Option<DateTime<Utc>>> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(|v| {
            parse_instant(v).map_err(|e| ApiError::InvalidTime {
                param,
                message: e.to_string(),
            })
        })
        .transpose()
}

#[utoipa::path(
    get,
    path = "/vesselList",
    tag = "vessels",
    responses(
        (status = 200, description = "Distinct vessel identifiers", body = Vec<String>)
    )
)]
pub async fn vessel_list(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.dataset.vessel_ids())
}

#[utoipa::path(
    get,
    path = "/vesselPoints/{vessel_id}",
    tag = "vessels",
    params(
        ("vessel_id" = String, Path, description = "Vessel MMSI"),
        PointsQuery
    ),
    responses(
        (status = 200, description = "Positions in ascending time order", body = Vec<TrackPoint>),
        (status = 400, description = "Unparsable time bound", body = crate::web::api::error::ErrorResponse)
    )
)]
pub async fn vessel_points(
    State(state): State<AppState>,
    Path(vessel_id): Path<String>,
    Query(query): Query<PointsQuery>,
) -> ApiResult<Json<Vec<TrackPoint>>> {
    let window = query.window()?;
    let points = state.dataset.points(&vessel_id, &window);
    log::debug!("vessel {} -> {} points", vessel_id, points.len());
    Ok(Json(points))
}
