use serde::Serialize;

/// RGBA color, one byte per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const DARK_RED: Color = Color::rgb(139, 0, 0);

    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha: 255,
        }
    }

    pub fn with_alpha(self, alpha: f64) -> Self {
        Self {
            alpha: (alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
            ..self
        }
    }

    pub fn rgba(&self) -> [u8; 4] {
        [self.red, self.green, self.blue, self.alpha]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PointStyle {
    pub pixel_size: f64,
    pub color: Color,
}

impl Default for PointStyle {
    fn default() -> Self {
        Self {
            pixel_size: 6.0,
            color: Color::WHITE.with_alpha(0.6),
        }
    }
}

/// Glowing line material of the ground polyline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PolylineMaterial {
    pub glow_power: f64,
    pub color: Color,
}

impl Default for PolylineMaterial {
    fn default() -> Self {
        Self {
            glow_power: 0.1,
            color: Color::DARK_RED,
        }
    }
}

/// How the host draws the moving vessel model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelStyle {
    pub uri: String,
    pub minimum_pixel_size: f64,
    pub maximum_scale: f64,
    pub color: Color,
    pub silhouette_color: Color,
    pub silhouette_size: f64,
}

impl Default for ModelStyle {
    fn default() -> Self {
        Self {
            uri: "/ship.glb".to_string(),
            minimum_pixel_size: 128.0,
            maximum_scale: 10_000.0,
            color: Color::WHITE,
            silhouette_color: Color::WHITE,
            silhouette_size: 1.0,
        }
    }
}
