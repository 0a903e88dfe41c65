use super::{Cartesian3, Cartographic};

/// Rotate an Earth-fixed offset into the east/north/up frame at the given
/// geodetic latitude and longitude.
pub fn ecef_to_enu(dr: Cartesian3, lat_rad: f64, lon_rad: f64) -> (f64, f64, f64) {
    let sin_lat = lat_rad.sin();
    let cos_lat = lat_rad.cos();
    let sin_lon = lon_rad.sin();
    let cos_lon = lon_rad.cos();

    let east = -sin_lon * dr.x + cos_lon * dr.y;
    let north = -sin_lat * cos_lon * dr.x - sin_lat * sin_lon * dr.y + cos_lat * dr.z;
    let up = cos_lat * cos_lon * dr.x + cos_lat * sin_lon * dr.y + sin_lat * dr.z;
    (east, north, up)
}

/// Heading (degrees clockwise from north, `[0, 360)`) and pitch (degrees
/// above the local horizon) of a direction of travel observed at `origin`.
///
/// Returns `None` when the direction has no length.
pub fn heading_pitch(origin: &Cartographic, direction: Cartesian3) -> Option<(f64, f64)> {
    let unit = direction.normalize()?;
    let (east, north, up) = ecef_to_enu(unit, origin.lat_rad(), origin.lon_rad());
    let heading = east.atan2(north).to_degrees().rem_euclid(360.0);
    let pitch = up.clamp(-1.0, 1.0).asin().to_degrees();
    Some((heading, pitch))
}
