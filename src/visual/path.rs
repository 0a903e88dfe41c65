use serde::Serialize;

use crate::geo::Cartographic;
use crate::track::Track;

use super::style::PolylineMaterial;

/// The whole track as one ground-draped polyline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StaticPath {
    pub name: String,
    pub positions: Vec<Cartographic>,
    pub clamp_to_ground: bool,
    pub width: f64,
    pub material: PolylineMaterial,
}

pub fn build_static_path(track: &Track) -> StaticPath {
    StaticPath {
        name: "polyline".to_string(),
        positions: track
            .points()
            .iter()
            .map(|p| Cartographic::from_degrees(p.longitude, p.latitude, 0.0))
            .collect(),
        clamp_to_ground: true,
        width: 15.0,
        material: PolylineMaterial::default(),
    }
}
