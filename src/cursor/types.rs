use serde::{Deserialize, Serialize};

use crate::render::UniformValue;

/// Cursor rectangle in render-target pixel coordinates (Y grows upward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl CursorRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Same size, new position
    pub fn moved_to(&self, x: f32, y: f32) -> Self {
        Self { x, y, ..*self }
    }

    /// Packed as `(x, y, width, height)` for a vec4 uniform
    pub fn to_uniform(&self) -> UniformValue {
        UniformValue::Vec4([self.x, self.y, self.width, self.height])
    }
}

impl Default for CursorRect {
    fn default() -> Self {
        Self::new(0.0, 1.0, 20.0, 40.0)
    }
}

/// Pixel extents of the render surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasSize {
    pub width: f32,
    pub height: f32,
}

impl CanvasSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Convert a device Y (origin at the top) into render-target Y (origin at the bottom)
    pub fn flip_y(&self, y: f32) -> f32 {
        self.height - y
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self::new(300.0, 300.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_packing_order() {
        let rect = CursorRect::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(rect.to_uniform().components(), &[1.0f32, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_moved_to_keeps_size() {
        let rect = CursorRect::default().moved_to(150.0, 75.0);
        assert_eq!(rect, CursorRect::new(150.0, 75.0, 20.0, 40.0));
    }

    #[test]
    fn test_flip_y() {
        let canvas = CanvasSize::new(300.0, 200.0);
        assert_eq!(canvas.flip_y(0.0), 200.0);
        assert_eq!(canvas.flip_y(50.0), 150.0);
        // Outside the surface is passed through unclamped
        assert_eq!(canvas.flip_y(250.0), -50.0);
    }

    #[test]
    fn test_rect_serializes_camel_case() {
        let json = serde_json::to_value(CursorRect::default()).unwrap();
        assert_eq!(json["width"], 20.0);
        assert_eq!(json["height"], 40.0);
    }
}
