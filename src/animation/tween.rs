use crate::animation::ease::Ease;
use crate::dom::document::Document;
use crate::dom::node::{NodeId, Style};
use crate::foundation::core::Origin;

pub trait Lerp: Sized {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

/// Tweenable style property.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Prop {
    X,
    Y,
    XPercent,
    YPercent,
    Opacity,
    /// Uniform scale; reads back the horizontal component.
    Scale,
    ScaleX,
    ScaleY,
}

impl Prop {
    pub fn read(self, s: &Style) -> f64 {
        match self {
            Self::X => s.x,
            Self::Y => s.y,
            Self::XPercent => s.x_percent,
            Self::YPercent => s.y_percent,
            Self::Opacity => s.opacity,
            Self::Scale | Self::ScaleX => s.scale_x,
            Self::ScaleY => s.scale_y,
        }
    }

    pub fn write(self, s: &mut Style, v: f64) {
        match self {
            Self::X => s.x = v,
            Self::Y => s.y = v,
            Self::XPercent => s.x_percent = v,
            Self::YPercent => s.y_percent = v,
            Self::Opacity => s.opacity = v,
            Self::Scale => {
                s.scale_x = v;
                s.scale_y = v;
            }
            Self::ScaleX => s.scale_x = v,
            Self::ScaleY => s.scale_y = v,
        }
    }
}

/// An ordered property map, built fluently: `Props::new().y_percent(0.0).opacity(1.0)`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Props {
    values: Vec<(Prop, f64)>,
    origin: Option<Origin>,
}

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, prop: Prop, value: f64) -> Self {
        match self.values.iter_mut().find(|(p, _)| *p == prop) {
            Some(slot) => slot.1 = value,
            None => self.values.push((prop, value)),
        }
        self
    }

    pub fn x(self, v: f64) -> Self {
        self.with(Prop::X, v)
    }

    pub fn y(self, v: f64) -> Self {
        self.with(Prop::Y, v)
    }

    pub fn y_percent(self, v: f64) -> Self {
        self.with(Prop::YPercent, v)
    }

    pub fn opacity(self, v: f64) -> Self {
        self.with(Prop::Opacity, v)
    }

    pub fn scale(self, v: f64) -> Self {
        self.with(Prop::Scale, v)
    }

    pub fn scale_x(self, v: f64) -> Self {
        self.with(Prop::ScaleX, v)
    }

    pub fn scale_y(self, v: f64) -> Self {
        self.with(Prop::ScaleY, v)
    }

    /// `transformOrigin`; applied instantly when the owning tween starts.
    pub fn origin(mut self, origin: Origin) -> Self {
        self.origin = Some(origin);
        self
    }

    pub fn values(&self) -> &[(Prop, f64)] {
        &self.values
    }

    pub fn get(&self, prop: Prop) -> Option<f64> {
        self.values.iter().find(|(p, _)| *p == prop).map(|(_, v)| *v)
    }

    pub fn apply(&self, style: &mut Style) {
        if let Some(origin) = self.origin {
            style.origin = origin;
        }
        for &(p, v) in &self.values {
            p.write(style, v);
        }
    }
}

/// Per-target start offsets. A negative amount staggers from the last target backwards.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Stagger(pub f64);

impl Stagger {
    pub fn delay_for(self, index: usize, count: usize) -> f64 {
        let each = self.0.abs();
        if self.0 < 0.0 {
            each * (count.saturating_sub(1) - index) as f64
        } else {
            each * index as f64
        }
    }

    pub fn total(self, count: usize) -> f64 {
        self.0.abs() * count.saturating_sub(1) as f64
    }
}

/// Duration/ease applied to child tweens that leave them unset.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TweenDefaults {
    pub duration: f64,
    pub ease: Ease,
}

impl Default for TweenDefaults {
    fn default() -> Self {
        Self {
            duration: 0.5,
            ease: Ease::OutQuad,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Tween {
    targets: Vec<NodeId>,
    from: Option<Props>,
    to: Props,
    duration: Option<f64>,
    ease: Option<Ease>,
    stagger: Stagger,
    absolute: bool,
    // Start values captured the first time each target's sub-tween renders.
    starts: Vec<Option<Vec<(Prop, f64)>>>,
}

impl Tween {
    /// Tween from whatever the targets hold when they start to `to`.
    pub fn to(targets: impl Into<Vec<NodeId>>, to: Props) -> Self {
        let targets = targets.into();
        let starts = vec![None; targets.len()];
        Self {
            targets,
            from: None,
            to,
            duration: None,
            ease: None,
            stagger: Stagger::default(),
            absolute: false,
            starts,
        }
    }

    pub fn from_to(targets: impl Into<Vec<NodeId>>, from: Props, to: Props) -> Self {
        Self {
            from: Some(from),
            ..Self::to(targets, to)
        }
    }

    pub fn duration(mut self, secs: f64) -> Self {
        self.duration = Some(secs.max(0.0));
        self
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = Some(ease);
        self
    }

    pub fn stagger(mut self, amount: f64) -> Self {
        self.stagger = Stagger(amount);
        self
    }

    /// Take targets out of flow for the lifetime of their sub-tween.
    pub fn absolute(mut self, absolute: bool) -> Self {
        self.absolute = absolute;
        self
    }

    pub fn targets(&self) -> &[NodeId] {
        &self.targets
    }

    pub fn span(&self, defaults: TweenDefaults) -> f64 {
        self.stagger.total(self.targets.len()) + self.duration.unwrap_or(defaults.duration)
    }

    pub fn kill_targets(&mut self, killed: &[NodeId]) {
        let mut i = 0;
        while i < self.targets.len() {
            if killed.contains(&self.targets[i]) {
                self.targets.remove(i);
                self.starts.remove(i);
            } else {
                i += 1;
            }
        }
    }

    /// Render at `local` seconds since the tween's start.
    pub fn render(&mut self, doc: &mut Document, local: f64, defaults: TweenDefaults) {
        let duration = self.duration.unwrap_or(defaults.duration);
        let ease = self.ease.unwrap_or(defaults.ease);
        let count = self.targets.len();

        for i in 0..count {
            let target = self.targets[i];
            if !doc.is_alive(target) {
                continue;
            }
            let sub_local = local - self.stagger.delay_for(i, count);
            if self.starts[i].is_none() {
                if sub_local < 0.0 {
                    continue;
                }
                let style = doc.style_mut(target);
                if let Some(origin) = self.to.origin {
                    style.origin = origin;
                }
                let start = match &self.from {
                    Some(from) => from.values.clone(),
                    None => self
                        .to
                        .values
                        .iter()
                        .map(|&(p, _)| (p, p.read(style)))
                        .collect(),
                };
                self.starts[i] = Some(start);
            }

            let t = if duration <= 0.0 {
                if sub_local >= 0.0 { 1.0 } else { 0.0 }
            } else {
                (sub_local / duration).clamp(0.0, 1.0)
            };
            let te = ease.apply(t);

            let Some(start) = &self.starts[i] else {
                continue;
            };
            let style = doc.style_mut(target);
            for &(p, end) in &self.to.values {
                let a = start
                    .iter()
                    .find(|(sp, _)| *sp == p)
                    .map_or(end, |(_, v)| *v);
                p.write(style, f64::lerp(&a, &end, te));
            }
            if self.absolute {
                style.absolute = t < 1.0;
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
