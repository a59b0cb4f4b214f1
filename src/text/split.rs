use crate::animation::ease::Ease;
use crate::animation::stage::Stage;
use crate::animation::tween::{Props, Tween, TweenDefaults};
use crate::dom::document::Document;
use crate::dom::node::{NodeId, NodeSpec, Style};
use crate::foundation::core::Rect;
use crate::text::wrap::{TextMetrics, break_lines};

pub const LINE_OUTER_CLASS: &str = "line";
pub const LINE_INNER_CLASS: &str = "line__inner";

const ENTER_FROM_Y_PERCENT: f64 = 105.0;
const LEAVE_TO_Y_PERCENT: f64 = -105.0;
const REVEAL_DURATION: f64 = 1.5;
const ENTER_STAGGER: f64 = 0.1;
const LEAVE_STAGGER: f64 = 0.02;

/// Splits a text node into overflow-hidden line boxes and reveals or hides them.
#[derive(Clone, Debug)]
pub struct LineSplitter {
    target: NodeId,
    metrics: TextMetrics,
    outers: Vec<NodeId>,
    inners: Vec<NodeId>,
    /// Detached `(outer, inner)` boxes left over from a split with more lines.
    spare: Vec<(NodeId, NodeId)>,
    visible: bool,
    split: bool,
}

impl LineSplitter {
    pub fn new(doc: &mut Document, target: NodeId, metrics: TextMetrics) -> Self {
        let mut splitter = Self {
            target,
            metrics,
            outers: Vec::new(),
            inners: Vec::new(),
            spare: Vec::new(),
            visible: true,
            split: false,
        };
        if doc.node(target).text.is_some() {
            splitter.split_lines(doc);
            splitter.split = true;
        }
        splitter
    }

    pub fn target(&self) -> NodeId {
        self.target
    }

    /// Line inner nodes, top to bottom.
    pub fn lines(&self) -> &[NodeId] {
        &self.inners
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Break the target's text into line boxes, reusing the boxes of earlier splits.
    fn split_lines(&mut self, doc: &mut Document) {
        let text = doc.node(self.target).text.clone().unwrap_or_default();
        let width = doc.node(self.target).frame.width();
        let lh = self.metrics.line_height;
        let lines = break_lines(&text, width, &self.metrics);
        let count = lines.len();
        while self.outers.len() > count {
            if let (Some(outer), Some(inner)) = (self.outers.pop(), self.inners.pop()) {
                doc.detach(outer);
                self.spare.push((outer, inner));
            }
        }
        for (i, line) in lines.into_iter().enumerate() {
            let top = i as f64 * lh;
            let outer_frame = Rect::new(0.0, top, width, top + lh);
            let inner_frame = Rect::new(0.0, 0.0, width, lh);
            if i < self.outers.len() {
                doc.node_mut(self.outers[i]).frame = outer_frame;
            } else if let Some((outer, inner)) = self.spare.pop() {
                doc.reparent(outer, self.target, outer_frame);
                *doc.style_mut(inner) = Style::default();
                self.outers.push(outer);
                self.inners.push(inner);
            } else {
                let outer = doc.append(self.target, NodeSpec::new(LINE_OUTER_CLASS, outer_frame));
                let inner = doc.append(outer, NodeSpec::new(LINE_INNER_CLASS, inner_frame));
                self.outers.push(outer);
                self.inners.push(inner);
            }
            let inner = doc.node_mut(self.inners[i]);
            inner.frame = inner_frame;
            inner.text = Some(line);
        }
    }

    /// Re-break after the target's box changed; hidden lines stay hidden.
    ///
    /// Line nodes are reused, so the arena only grows past the largest line count seen.
    pub fn resize(&mut self, doc: &mut Document) {
        if !self.split {
            return;
        }
        self.split_lines(doc);
        if !self.visible {
            for &inner in &self.inners {
                doc.style_mut(inner).y_percent = LEAVE_TO_Y_PERCENT;
            }
        }
        tracing::trace!(node = ?self.target, lines = self.inners.len(), "re-split lines");
    }

    fn reveal_defaults() -> TweenDefaults {
        TweenDefaults {
            duration: REVEAL_DURATION,
            ease: Ease::POWER4_IN_OUT,
        }
    }

    pub fn enter<C>(&mut self, doc: &mut Document, stage: &mut Stage<C>, animate: bool) {
        stage.kill_tweens_of(&self.inners);
        self.visible = true;
        if animate {
            let tween = Tween::from_to(
                self.inners.clone(),
                Props::new().y_percent(ENTER_FROM_Y_PERCENT),
                Props::new().y_percent(0.0),
            )
            .stagger(ENTER_STAGGER);
            stage.tween(tween, Self::reveal_defaults());
        } else {
            stage.set(doc, &self.inners, &Props::new().y_percent(0.0));
        }
    }

    pub fn leave<C>(&mut self, doc: &mut Document, stage: &mut Stage<C>, animate: bool) {
        stage.kill_tweens_of(&self.inners);
        self.visible = false;
        if animate {
            let tween = Tween::to(self.inners.clone(), Props::new().y_percent(LEAVE_TO_Y_PERCENT))
                .stagger(LEAVE_STAGGER);
            stage.tween(tween, Self::reveal_defaults());
        } else {
            stage.set(doc, &self.inners, &Props::new().y_percent(LEAVE_TO_Y_PERCENT));
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/split.rs"]
mod tests;
