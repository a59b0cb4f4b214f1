use std::str::FromStr;

use crate::foundation::error::VitrineError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    Linear,
    InQuad,
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
    InQuart,
    OutQuart,
    InOutQuart,
    InQuint,
    OutQuint,
    InOutQuint,
    OutExpo,
}

impl Ease {
    /// `power4.inOut`, the house curve for reveals and transitions.
    pub const POWER4_IN_OUT: Self = Self::InOutQuint;

    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => in_out(t, 2),
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => in_out(t, 3),
            Self::InQuart => t.powi(4),
            Self::OutQuart => 1.0 - (1.0 - t).powi(4),
            Self::InOutQuart => in_out(t, 4),
            Self::InQuint => t.powi(5),
            Self::OutQuint => 1.0 - (1.0 - t).powi(5),
            Self::InOutQuint => in_out(t, 5),
            Self::OutExpo => (1.001 - 2f64.powf(-10.0 * t)).min(1.0),
        }
    }
}

fn in_out(t: f64, power: i32) -> f64 {
    if t < 0.5 {
        2f64.powi(power - 1) * t.powi(power)
    } else {
        1.0 - ((-2.0 * t + 2.0).powi(power) / 2.0)
    }
}

/// Parses GreenSock-style names (`none`, `power4.inOut`, `expo.out`).
impl FromStr for Ease {
    type Err = VitrineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (family, kind) = s.split_once('.').unwrap_or((s, "out"));
        let ease = match (family, kind) {
            ("none" | "linear", _) => Self::Linear,
            ("power0", _) => Self::Linear,
            ("power1" | "quad", "in") => Self::InQuad,
            ("power1" | "quad", "out") => Self::OutQuad,
            ("power1" | "quad", "inOut") => Self::InOutQuad,
            ("power2" | "cubic", "in") => Self::InCubic,
            ("power2" | "cubic", "out") => Self::OutCubic,
            ("power2" | "cubic", "inOut") => Self::InOutCubic,
            ("power3" | "quart", "in") => Self::InQuart,
            ("power3" | "quart", "out") => Self::OutQuart,
            ("power3" | "quart", "inOut") => Self::InOutQuart,
            ("power4" | "quint", "in") => Self::InQuint,
            ("power4" | "quint", "out") => Self::OutQuint,
            ("power4" | "quint", "inOut") => Self::InOutQuint,
            ("expo", "out") => Self::OutExpo,
            _ => return Err(VitrineError::animation(format!("unknown ease '{s}'"))),
        };
        Ok(ease)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
