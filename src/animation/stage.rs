use crate::animation::timeline::Timeline;
use crate::animation::tween::{Props, Tween, TweenDefaults};
use crate::dom::document::Document;
use crate::dom::node::NodeId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimelineId(pub u64);

/// Wall-clock player: owns every running timeline and advances them once per frame.
#[derive(Debug)]
pub struct Stage<C> {
    running: Vec<(TimelineId, Timeline<C>)>,
    next_id: u64,
}

impl<C> Default for Stage<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Stage<C> {
    pub fn new() -> Self {
        Self {
            running: Vec::new(),
            next_id: 0,
        }
    }

    pub fn play(&mut self, timeline: Timeline<C>) -> TimelineId {
        let id = TimelineId(self.next_id);
        self.next_id += 1;
        self.running.push((id, timeline));
        id
    }

    /// Play a standalone tween.
    pub fn tween(&mut self, tween: Tween, defaults: TweenDefaults) -> TimelineId {
        let mut tl = Timeline::new(defaults);
        tl.add(tween, 0.0);
        self.play(tl)
    }

    /// Apply `props` to `targets` immediately.
    pub fn set(&mut self, doc: &mut Document, targets: &[NodeId], props: &Props) {
        for &t in targets {
            if doc.is_alive(t) {
                props.apply(doc.style_mut(t));
            }
        }
    }

    /// Apply `props` once `delay` seconds of frames have elapsed.
    pub fn delayed_set(&mut self, delay: f64, targets: Vec<NodeId>, props: Props) -> TimelineId {
        let mut tl = Timeline::default();
        tl.set(targets, props, delay);
        self.play(tl)
    }

    /// Stop animating `targets` in every running timeline; their current values stay put.
    pub fn kill_tweens_of(&mut self, targets: &[NodeId]) {
        for (_, tl) in &mut self.running {
            tl.kill_targets(targets);
        }
    }

    pub fn is_running(&self, id: TimelineId) -> bool {
        self.running.iter().any(|(i, _)| *i == id)
    }

    pub fn running_count(&self) -> usize {
        self.running.len()
    }

    pub fn is_idle(&self) -> bool {
        self.running.is_empty()
    }
}

impl<C: Clone> Stage<C> {
    /// Advance every timeline by `dt` and drop finished ones.
    pub fn tick(&mut self, doc: &mut Document, dt: f64) -> Vec<C> {
        let mut cues = Vec::new();
        for (_, tl) in &mut self.running {
            cues.extend(tl.tick(doc, dt));
        }
        self.running.retain(|(_, tl)| !tl.is_complete());
        cues
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/stage.rs"]
mod tests;
