use std::str::FromStr;

use crate::foundation::error::{VitrineError, VitrineResult};

pub use kurbo::{Affine, Point, Rect, Vec2};

/// Size of the visible scroller area in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> VitrineResult<Self> {
        if !(width.is_finite() && width > 0.0) {
            return Err(VitrineError::validation("Viewport width must be > 0"));
        }
        if !(height.is_finite() && height > 0.0) {
            return Err(VitrineError::validation("Viewport height must be > 0"));
        }
        Ok(Self { width, height })
    }

    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// Strict overlap test against the viewport box; touching edges do not count.
    pub fn intersects(self, r: Rect) -> bool {
        r.y0 < self.height && r.y1 > 0.0 && r.x0 < self.width && r.x1 > 0.0
    }
}

/// Transform origin expressed as fractions of the node box (`0.5, 0.0` is `50% 0%`).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Origin {
    pub x: f64,
    pub y: f64,
}

impl Origin {
    pub const CENTER: Self = Self { x: 0.5, y: 0.5 };
    pub const TOP_LEFT: Self = Self { x: 0.0, y: 0.0 };
    pub const TOP_CENTER: Self = Self { x: 0.5, y: 0.0 };

    pub fn point_in(self, r: Rect) -> Point {
        Point::new(r.x0 + self.x * r.width(), r.y0 + self.y * r.height())
    }
}

impl Default for Origin {
    fn default() -> Self {
        Self::CENTER
    }
}

impl FromStr for Origin {
    type Err = VitrineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        fn component(tok: &str, horizontal: bool) -> Option<f64> {
            match tok {
                "left" if horizontal => Some(0.0),
                "right" if horizontal => Some(1.0),
                "top" if !horizontal => Some(0.0),
                "bottom" if !horizontal => Some(1.0),
                "center" => Some(0.5),
                _ => {
                    let pct = tok.strip_suffix('%')?;
                    pct.parse::<f64>().ok().map(|v| v / 100.0)
                }
            }
        }

        let mut parts = s.split_whitespace();
        let first = parts.next();
        let second = parts.next();
        if parts.next().is_some() {
            return Err(VitrineError::validation(format!(
                "transform origin '{s}' has too many components"
            )));
        }
        let x = first
            .and_then(|t| component(t, true))
            .ok_or_else(|| VitrineError::validation(format!("invalid transform origin '{s}'")))?;
        let y = match second {
            Some(t) => component(t, false)
                .ok_or_else(|| VitrineError::validation(format!("invalid transform origin '{s}'")))?,
            None => 0.5,
        };
        Ok(Self { x, y })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Transform2D {
    pub translate: Vec2,
    pub scale: Vec2, // default (1,1)
    pub origin: Origin,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self {
            translate: Vec2::ZERO,
            scale: Vec2::new(1.0, 1.0),
            origin: Origin::default(),
        }
    }
}

impl Transform2D {
    /// Affine in the coordinate space of `rect`, pivoting around the origin point.
    pub fn to_affine(self, rect: Rect) -> Affine {
        let pivot = self.origin.point_in(rect).to_vec2();
        let t_translate = Affine::translate(self.translate);
        let t_anchor = Affine::translate(pivot);
        let t_unanchor = Affine::translate(-pivot);
        let t_scale = Affine::scale_non_uniform(self.scale.x, self.scale.y);

        // Canonical order:
        // T(translate) * T(pivot) * S(scale) * T(-pivot)
        t_translate * t_anchor * t_scale * t_unanchor
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
