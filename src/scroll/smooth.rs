use crate::animation::ease::Ease;
use crate::animation::tween::Lerp;

/// Axis the wheel/touch input scrolls along.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SmoothScrollConfig {
    /// Per-frame interpolation factor at 60 fps; when `None` the `duration` curve is used.
    pub lerp: Option<f64>,
    /// Seconds for a duration-driven scroll.
    pub duration: f64,
    pub orientation: Orientation,
    pub smooth_touch: bool,
    pub touch_multiplier: f64,
    pub wheel_multiplier: f64,
    pub infinite: bool,
}

impl Default for SmoothScrollConfig {
    fn default() -> Self {
        Self {
            lerp: Some(0.1),
            duration: 1.2,
            orientation: Orientation::Vertical,
            smooth_touch: false,
            touch_multiplier: 2.0,
            wheel_multiplier: 1.0,
            infinite: false,
        }
    }
}

/// Payload of the `scroll` event emitted on every frame that moved.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ScrollEvent {
    pub scroll: f64,
    pub limit: f64,
    pub velocity: f64,
    /// `1` scrolling forward, `-1` backward, `0` at rest.
    pub direction: i8,
    pub progress: f64,
}

const SNAP_THRESHOLD: f64 = 0.5;

/// Damped scroll position chasing a target set by wheel/touch input.
#[derive(Clone, Debug)]
pub struct SmoothScroll {
    config: SmoothScrollConfig,
    limit: f64,
    animated: f64,
    target: f64,
    velocity: f64,
    direction: i8,
    stopped: bool,
    animating: bool,
    // Duration mode bookkeeping.
    from: f64,
    elapsed: f64,
    last_frame: Option<f64>,
}

impl SmoothScroll {
    pub fn new(config: SmoothScrollConfig, limit: f64) -> Self {
        Self {
            config,
            limit: limit.max(0.0),
            animated: 0.0,
            target: 0.0,
            velocity: 0.0,
            direction: 0,
            stopped: false,
            animating: false,
            from: 0.0,
            elapsed: 0.0,
            last_frame: None,
        }
    }

    pub fn config(&self) -> &SmoothScrollConfig {
        &self.config
    }

    pub fn scroll(&self) -> f64 {
        self.animated
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn limit(&self) -> f64 {
        self.limit
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn is_scrolling(&self) -> bool {
        self.animating
    }

    pub fn set_limit(&mut self, limit: f64) {
        self.limit = limit.max(0.0);
        if !self.config.infinite {
            self.target = self.target.clamp(0.0, self.limit);
            self.animated = self.animated.clamp(0.0, self.limit);
        }
    }

    fn reset(&mut self) {
        self.target = self.animated;
        self.velocity = 0.0;
        self.direction = 0;
        self.animating = false;
    }

    pub fn start(&mut self) {
        if !self.stopped {
            return;
        }
        self.stopped = false;
        self.reset();
        tracing::debug!(scroll = self.animated, "smooth scroll started");
    }

    pub fn stop(&mut self) {
        if self.stopped {
            return;
        }
        self.stopped = true;
        self.reset();
        tracing::debug!(scroll = self.animated, "smooth scroll stopped");
    }

    /// Wheel input in pixels; the component along the configured orientation is used.
    pub fn wheel(&mut self, delta_x: f64, delta_y: f64) {
        let delta = match self.config.orientation {
            Orientation::Vertical => delta_y,
            Orientation::Horizontal => delta_x,
        };
        let to = self.target + delta * self.config.wheel_multiplier;
        self.scroll_to(to, false);
    }

    /// Touch drag in pixels along the scroll axis.
    ///
    /// Without touch smoothing the jump is immediate and its event is returned here;
    /// `raf` has nothing left to report for it.
    pub fn touch(&mut self, delta: f64) -> Option<ScrollEvent> {
        let to = self.target + delta * self.config.touch_multiplier;
        self.scroll_to(to, !self.config.smooth_touch)
    }

    /// Returns the event when `immediate` moved the position synchronously.
    pub fn scroll_to(&mut self, to: f64, immediate: bool) -> Option<ScrollEvent> {
        if self.stopped {
            return None;
        }
        let to = if self.config.infinite {
            to
        } else {
            to.clamp(0.0, self.limit)
        };
        self.target = to;
        if immediate {
            self.animating = false;
            return self.commit(to);
        }
        self.from = self.animated;
        self.elapsed = 0.0;
        self.animating = (to - self.animated).abs() > f64::EPSILON;
        None
    }

    /// Frame hook; `now` is a monotonic timestamp in seconds.
    pub fn raf(&mut self, now: f64) -> Option<ScrollEvent> {
        let dt = self.last_frame.map_or(0.0, |last| (now - last).max(0.0));
        self.last_frame = Some(now);
        self.advance(dt)
    }

    pub fn advance(&mut self, dt: f64) -> Option<ScrollEvent> {
        if self.stopped || !self.animating {
            return None;
        }
        let next = match self.config.lerp {
            Some(lerp) => {
                let k = 1.0 - (-lerp * 60.0 * dt).exp();
                let v = f64::lerp(&self.animated, &self.target, k);
                if (self.target - v).abs() < SNAP_THRESHOLD {
                    self.animating = false;
                    self.target
                } else {
                    v
                }
            }
            None => {
                self.elapsed += dt;
                let t = if self.config.duration > 0.0 {
                    (self.elapsed / self.config.duration).min(1.0)
                } else {
                    1.0
                };
                if t >= 1.0 {
                    self.animating = false;
                    self.target
                } else {
                    f64::lerp(&self.from, &self.target, Ease::OutExpo.apply(t))
                }
            }
        };
        self.commit(next)
    }

    fn commit(&mut self, next: f64) -> Option<ScrollEvent> {
        self.velocity = next - self.animated;
        self.direction = if self.velocity > 0.0 {
            1
        } else if self.velocity < 0.0 {
            -1
        } else {
            0
        };
        self.animated = next;
        if self.velocity == 0.0 {
            return None;
        }
        Some(self.event())
    }

    pub fn event(&self) -> ScrollEvent {
        let progress = if self.limit > 0.0 {
            let p = self.animated / self.limit;
            if self.config.infinite { p.rem_euclid(1.0) } else { p }
        } else {
            1.0
        };
        ScrollEvent {
            scroll: self.animated,
            limit: self.limit,
            velocity: self.velocity,
            direction: self.direction,
            progress,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/smooth.rs"]
mod tests;
