//! Geometry types shared by the annotation surface and the UI.
//!
//! Pointer positions arrive in logical pixels local to the rendered image.
//! Boxes are stored in normalized coordinates so they survive re-layout.

use serde::{Deserialize, Serialize};

/// A position in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True when either side is not a positive finite number.
    pub fn is_degenerate(&self) -> bool {
        let finite = self.width.is_finite() && self.height.is_finite();
        !(finite && self.width > 0.0 && self.height > 0.0)
    }
}

/// An absolute rectangle in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl PixelRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, width, height }
    }
}

/// A point expressed as fractions of a reference rectangle, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NormPoint {
    pub x: f32,
    pub y: f32,
}

impl NormPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Normalize a pointer position against the rendered image size.
    ///
    /// Positions outside the image are clamped to the nearest edge. Returns
    /// `None` when the rendered size cannot be divided by.
    pub fn from_local(pointer: Point, rendered: Size) -> Option<Self> {
        if rendered.is_degenerate() || !pointer.x.is_finite() || !pointer.y.is_finite() {
            return None;
        }
        Some(Self {
            x: (pointer.x / rendered.width).clamp(0.0, 1.0),
            y: (pointer.y / rendered.height).clamp(0.0, 1.0),
        })
    }
}

/// A rectangle defined by two normalized corners in drag order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormBox {
    pub start: NormPoint,
    pub end: NormPoint,
}

impl NormBox {
    pub fn new(start: NormPoint, end: NormPoint) -> Self {
        Self { start, end }
    }

    pub fn min(&self) -> NormPoint {
        NormPoint::new(self.start.x.min(self.end.x), self.start.y.min(self.end.y))
    }

    pub fn max(&self) -> NormPoint {
        NormPoint::new(self.start.x.max(self.end.x), self.start.y.max(self.end.y))
    }

    /// True for a click without drag (or a drag along one axis).
    pub fn is_zero_area(&self) -> bool {
        self.start.x == self.end.x || self.start.y == self.end.y
    }

    /// Map the box into `rect`, the on-screen rectangle of the rendered image.
    pub fn to_pixels(&self, rect: PixelRect) -> PixelRect {
        let (lo, hi) = (self.min(), self.max());
        PixelRect {
            left: rect.left + lo.x * rect.width,
            top: rect.top + lo.y * rect.height,
            width: (hi.x - lo.x) * rect.width,
            height: (hi.y - lo.y) * rect.height,
        }
    }

    /// Express the box in intrinsic image pixels.
    pub fn to_image_region(&self, image_width: u32, image_height: u32) -> ImageRegion {
        let (lo, hi) = (self.min(), self.max());
        let x0 = (lo.x * image_width as f32).round() as u32;
        let y0 = (lo.y * image_height as f32).round() as u32;
        let x1 = (hi.x * image_width as f32).round() as u32;
        let y1 = (hi.y * image_height as f32).round() as u32;
        ImageRegion {
            x: x0,
            y: y0,
            width: x1.saturating_sub(x0),
            height: y1.saturating_sub(y0),
        }
    }
}

/// Integer rectangle in the image's own pixel grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Largest size with the image's aspect ratio that fits inside `container`.
pub fn fit_within(image: Size, container: Size) -> Size {
    if image.is_degenerate() || container.is_degenerate() {
        return Size::default();
    }
    let image_aspect = image.width / image.height;
    let container_aspect = container.width / container.height;
    if image_aspect > container_aspect {
        Size::new(container.width, container.width / image_aspect)
    } else {
        Size::new(container.height * image_aspect, container.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_and_clamps() {
        let rendered = Size::new(400.0, 200.0);
        assert_eq!(
            NormPoint::from_local(Point::new(100.0, 50.0), rendered),
            Some(NormPoint::new(0.25, 0.25))
        );
        assert_eq!(
            NormPoint::from_local(Point::new(-20.0, 900.0), rendered),
            Some(NormPoint::new(0.0, 1.0))
        );
        assert_eq!(NormPoint::from_local(Point::new(1.0, 1.0), Size::new(0.0, 200.0)), None);
    }

    #[test]
    fn to_pixels_orders_corners() {
        let b = NormBox::new(NormPoint::new(0.75, 0.75), NormPoint::new(0.25, 0.25));
        let r = b.to_pixels(PixelRect::new(10.0, 20.0, 400.0, 200.0));
        assert_eq!(r, PixelRect::new(110.0, 70.0, 200.0, 100.0));
    }

    #[test]
    fn image_region_uses_intrinsic_size() {
        let b = NormBox::new(NormPoint::new(0.5, 0.0), NormPoint::new(0.25, 0.5));
        assert_eq!(
            b.to_image_region(2000, 1000),
            ImageRegion { x: 500, y: 0, width: 500, height: 500 }
        );
    }

    #[test]
    fn fit_preserves_aspect() {
        let square = Size::new(800.0, 800.0);
        let wide = Size::new(800.0, 400.0);
        assert_eq!(fit_within(Size::new(1600.0, 900.0), square), Size::new(800.0, 450.0));
        assert_eq!(fit_within(Size::new(500.0, 1000.0), wide), Size::new(200.0, 400.0));
        assert_eq!(fit_within(Size::new(0.0, 10.0), Size::new(800.0, 400.0)), Size::default());
    }
}
