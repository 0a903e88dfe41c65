use utoipa::OpenApi;

use super::api::error::ErrorResponse;
use crate::track::TrackPoint;

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::vessels::vessel_list,
        super::api::vessels::vessel_points,
    ),
    components(schemas(TrackPoint, ErrorResponse)),
    info(
        title = "Vessel Track API",
        description = "Recorded vessel positions by MMSI and time range",
        version = "0.1.0"
    ),
    tags(
        (name = "vessels", description = "Vessel identifiers and positions")
    )
)]
pub struct ApiDoc;
