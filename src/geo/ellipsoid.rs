use serde::Serialize;

// WGS-84 constants
pub const WGS84_A: f64 = 6_378_137.0;
pub const WGS84_E2: f64 = 0.006_694_379_990_14;

const MAX_ITERATIONS: usize = 16;
const LATITUDE_EPSILON: f64 = 1e-14;

/// Earth-fixed Cartesian position in metres.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Cartesian3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Cartesian3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn add(self, other: Cartesian3) -> Cartesian3 {
        Cartesian3::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }

    pub fn sub(self, other: Cartesian3) -> Cartesian3 {
        Cartesian3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    pub fn scale(self, factor: f64) -> Cartesian3 {
        Cartesian3::new(self.x * factor, self.y * factor, self.z * factor)
    }

    pub fn dot(self, other: Cartesian3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn magnitude(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Unit vector in the same direction, or `None` for a zero-length vector.
    pub fn normalize(self) -> Option<Cartesian3> {
        let len = self.magnitude();
        if len > 0.0 && len.is_finite() {
            Some(self.scale(1.0 / len))
        } else {
            None
        }
    }

    pub fn lerp(self, other: Cartesian3, t: f64) -> Cartesian3 {
        self.add(other.sub(self).scale(t))
    }

    /// Geodetic coordinates of this position.
    pub fn to_cartographic(self) -> Cartographic {
        let p = (self.x * self.x + self.y * self.y).sqrt();
        let longitude = self.y.atan2(self.x);

        let mut latitude = self.z.atan2(p * (1.0 - WGS84_E2));
        for _ in 0..MAX_ITERATIONS {
            let n = prime_vertical_radius(latitude);
            let next = (self.z + WGS84_E2 * n * latitude.sin()).atan2(p);
            let converged = (next - latitude).abs() < LATITUDE_EPSILON;
            latitude = next;
            if converged {
                break;
            }
        }

        let sin_lat = latitude.sin();
        let n = prime_vertical_radius(latitude);
        let height = p * latitude.cos() + (self.z + WGS84_E2 * n * sin_lat) * sin_lat - n;

        Cartographic {
            longitude_deg: longitude.to_degrees(),
            latitude_deg: latitude.to_degrees(),
            height_m: height,
        }
    }
}

/// Geodetic longitude/latitude in degrees and height above the ellipsoid in metres.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Cartographic {
    pub longitude_deg: f64,
    pub latitude_deg: f64,
    pub height_m: f64,
}

impl Cartographic {
    pub fn from_degrees(longitude_deg: f64, latitude_deg: f64, height_m: f64) -> Self {
        Self {
            longitude_deg,
            latitude_deg,
            height_m,
        }
    }

    pub fn lat_rad(&self) -> f64 {
        self.latitude_deg.to_radians()
    }

    pub fn lon_rad(&self) -> f64 {
        self.longitude_deg.to_radians()
    }

    pub fn to_cartesian(&self) -> Cartesian3 {
        let lat = self.lat_rad();
        let lon = self.lon_rad();
        let sin_lat = lat.sin();
        let cos_lat = lat.cos();
        let sin_lon = lon.sin();
        let cos_lon = lon.cos();
        let n = prime_vertical_radius(lat);
        let x = (n + self.height_m) * cos_lat * cos_lon;
        let y = (n + self.height_m) * cos_lat * sin_lon;
        let z = (n * (1.0 - WGS84_E2) + self.height_m) * sin_lat;
        Cartesian3 { x, y, z }
    }

    /// Outward ellipsoid normal at this coordinate.
    pub fn surface_normal(&self) -> Cartesian3 {
        let lat = self.lat_rad();
        let lon = self.lon_rad();
        Cartesian3::new(lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin())
    }
}

fn prime_vertical_radius(lat_rad: f64) -> f64 {
    let sin_lat = lat_rad.sin();
    WGS84_A / (1.0 - WGS84_E2 * sin_lat * sin_lat).sqrt()
}
