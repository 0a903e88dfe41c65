use std::fmt::Write;

use chrono::SecondsFormat;
use serde::Serialize;

use crate::geo::{Cartesian3, Cartographic};
use crate::track::{Track, TrackPoint};

use super::style::PointStyle;

const INFOBOX_TABLE_OPEN: &str =
    r#"<table class="cesium-infoBox-defaultTable cesium-infoBox-defaultTable-lighter"><tbody>"#;

/// A ground-level marker for one recorded position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointMarker {
    pub name: String,
    pub ordinal: usize,
    pub location: Cartographic,
    pub position: Cartesian3,
    pub style: PointStyle,
    pub description: String,
}

/// One marker per point, in track order, labelled `point 1..=N`.
pub fn build_point_markers(track: &Track) -> Vec<PointMarker> {
    track
        .points()
        .iter()
        .enumerate()
        .map(|(i, point)| point_marker(i + 1, point))
        .collect()
}

fn point_marker(ordinal: usize, point: &TrackPoint) -> PointMarker {
    let location = Cartographic::from_degrees(point.longitude, point.latitude, 0.0);
    PointMarker {
        name: format!("point {}", ordinal),
        ordinal,
        location,
        position: location.to_cartesian(),
        style: PointStyle::default(),
        description: describe(point),
    }
}

fn describe(point: &TrackPoint) -> String {
    let rows = [
        (
            "Time",
            point.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
        ),
        ("Longitude", format!("{:.5}", point.longitude)),
        ("Latitude", format!("{:.5}", point.latitude)),
        ("Speed", format!("{:.2}", point.speed)),
        ("Course", format!("{:.2}", point.course)),
    ];

    let mut html = String::from(INFOBOX_TABLE_OPEN);
    for (label, value) in rows {
        let _ = write!(html, "<tr><th>{}</th><td>{}</td></tr>", label, value);
    }
    html.push_str("</tbody></table>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::fixtures::{point, two_point_track};

    #[test]
    fn one_marker_per_point_in_order() {
        let track = Track::new(
            "1",
            vec![
                point(10.0, 50.0, 0, 0),
                point(10.1, 50.1, 1, 0),
                point(10.2, 50.2, 2, 0),
            ],
        )
        .unwrap();

        let markers = build_point_markers(&track);
        assert_eq!(markers.len(), 3);
        for (i, marker) in markers.iter().enumerate() {
            assert_eq!(marker.ordinal, i + 1);
            assert_eq!(marker.name, format!("point {}", i + 1));
            assert_eq!(marker.location.longitude_deg, track.points()[i].longitude);
            assert_eq!(marker.location.height_m, 0.0);
        }
    }

    #[test]
    fn description_rounds_values() {
        let mut track_point = two_point_track().first().clone();
        track_point.longitude = 10.123456789;
        track_point.latitude = -50.5;
        track_point.speed = 12.3456;
        track_point.course = 359.999;

        let marker = point_marker(1, &track_point);
        assert!(marker.description.starts_with(
            r#"<table class="cesium-infoBox-defaultTable cesium-infoBox-defaultTable-lighter"><tbody>"#
        ));
        assert!(marker.description.ends_with("</tbody></table>"));
        assert!(marker.description.contains("<th>Time</th><td>2020-01-01T00:00:00Z</td>"));
        assert!(marker.description.contains("<td>10.12346</td>"));
        assert!(marker.description.contains("<td>-50.50000</td>"));
        assert!(marker.description.contains("<td>12.35</td>"));
        assert!(marker.description.contains("<td>360.00</td>"));
    }

    #[test]
    fn scenario_labels() {
        let markers = build_point_markers(&two_point_track());
        let names: Vec<_> = markers.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["point 1", "point 2"]);
    }
}
