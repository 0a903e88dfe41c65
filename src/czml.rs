//! CZML export of a loaded track, so any CZML-capable globe can replay it.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{json, Value};
use thiserror::Error;

use crate::viewer::Clock;
use crate::visual::{seconds_between, Color, TrackVisualization};

#[derive(Debug, Error)]
pub enum CzmlError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn iso(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

fn interval(start: DateTime<Utc>, stop: DateTime<Utc>) -> String {
    format!("{}/{}", iso(start), iso(stop))
}

fn rgba(color: Color) -> Value {
    json!({ "rgba": color.rgba() })
}

fn document_packet(vis: &TrackVisualization, clock: &Clock) -> Value {
    json!({
        "id": "document",
        "name": format!("vessel {}", vis.vessel_id),
        "version": "1.0",
        "clock": {
            "interval": interval(clock.start, clock.stop),
            "currentTime": iso(clock.current),
            "multiplier": clock.multiplier,
            "range": clock.range.to_string(),
            "step": clock.step.to_string(),
        },
    })
}

fn marker_packets(vis: &TrackVisualization) -> impl Iterator<Item = Value> + '_ {
    vis.markers.iter().map(|marker| {
        json!({
            "id": format!("point-{}", marker.ordinal),
            "name": marker.name,
            "description": marker.description,
            "position": {
                "cartographicDegrees": [
                    marker.location.longitude_deg,
                    marker.location.latitude_deg,
                    marker.location.height_m,
                ],
            },
            "point": {
                "pixelSize": marker.style.pixel_size,
                "color": rgba(marker.style.color),
            },
        })
    })
}

fn polyline_packet(vis: &TrackVisualization) -> Value {
    let path = &vis.polyline;
    let degrees: Vec<f64> = path
        .positions
        .iter()
        .flat_map(|c| [c.longitude_deg, c.latitude_deg, c.height_m])
        .collect();
    let material = json!({
        "polylineGlow": {
            "glowPower": path.material.glow_power,
            "color": rgba(path.material.color),
        },
    });

    json!({
        "id": path.name,
        "name": path.name,
        "polyline": {
            "positions": { "cartographicDegrees": degrees },
            "clampToGround": path.clamp_to_ground,
            "width": path.width,
            "material": material,
        },
    })
}

fn path_packet(vis: &TrackVisualization) -> Value {
    let moving = &vis.path;
    let epoch = vis.extent.start;
    let degrees: Vec<f64> = moving
        .position
        .samples()
        .iter()
        .flat_map(|s| {
            let c = s.position.to_cartographic();
            [
                seconds_between(epoch, s.time),
                c.longitude_deg,
                c.latitude_deg,
                c.height_m,
            ]
        })
        .collect();
    let model = &moving.model;

    json!({
        "id": moving.name,
        "name": moving.name,
        "availability": interval(vis.extent.start, vis.extent.stop),
        "position": {
            "epoch": iso(epoch),
            "interpolationAlgorithm": "LINEAR",
            "cartographicDegrees": degrees,
        },
        "orientation": { "velocityReference": "#position" },
        "model": {
            "gltf": model.uri,
            "minimumPixelSize": model.minimum_pixel_size,
            "maximumScale": model.maximum_scale,
            "color": rgba(model.color),
            "colorBlendAmount": 1.0,
            "silhouetteColor": rgba(model.silhouette_color),
            "silhouetteSize": model.silhouette_size,
            "heightReference": "RELATIVE_TO_GROUND",
            "shadows": "DISABLED",
        },
        "path": { "show": true },
    })
}

/// The full CZML document: clock first, then markers, polyline and the
/// moving model.
pub fn document(vis: &TrackVisualization, clock: &Clock) -> Value {
    let mut packets = vec![document_packet(vis, clock)];
    packets.extend(marker_packets(vis));
    packets.push(polyline_packet(vis));
    packets.push(path_packet(vis));
    Value::Array(packets)
}

pub fn write_document(path: &Path, vis: &TrackVisualization, clock: &Clock) -> Result<(), CzmlError> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, &document(vis, clock))?;
    writer.flush()?;
    log::info!("wrote CZML for vessel {} to {}", vis.vessel_id, path.display());
    Ok(())
}
