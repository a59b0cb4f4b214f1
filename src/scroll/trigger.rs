use crate::animation::timeline::Timeline;
use crate::dom::document::Document;
use crate::dom::node::NodeId;

/// A timeline scrubbed by a trigger node's position in the scroller.
///
/// The active range runs from "top of trigger meets bottom of scroller" to
/// "bottom of trigger meets top of scroller". Positions are measured on the
/// untransformed layout box and cached until [`ScrollTrigger::refresh`].
#[derive(Debug)]
pub struct ScrollTrigger {
    trigger: NodeId,
    start: f64,
    end: f64,
    timeline: Timeline<()>,
    enabled: bool,
    progress: f64,
}

impl ScrollTrigger {
    pub fn new(doc: &Document, trigger: NodeId, timeline: Timeline<()>) -> Self {
        let mut st = Self {
            trigger,
            start: 0.0,
            end: 0.0,
            timeline,
            enabled: true,
            progress: 0.0,
        };
        st.refresh(doc);
        st
    }

    pub fn trigger(&self) -> NodeId {
        self.trigger
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn refresh(&mut self, doc: &Document) {
        let rect = doc.layout_rect(self.trigger);
        self.start = rect.y0 - doc.viewport().height;
        self.end = rect.y1;
    }

    pub fn progress_at(&self, scroll: f64) -> f64 {
        let span = self.end - self.start;
        if span <= 0.0 {
            return if scroll >= self.end { 1.0 } else { 0.0 };
        }
        ((scroll - self.start) / span).clamp(0.0, 1.0)
    }

    /// Scrub to the document's current scroll position; no-op while disabled.
    pub fn update(&mut self, doc: &mut Document) {
        if !self.enabled {
            return;
        }
        self.progress = self.progress_at(doc.scroll_y());
        self.timeline.seek_progress(doc, self.progress);
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }

    /// Re-enable and immediately render at the current scroll position.
    pub fn enable(&mut self, doc: &mut Document) {
        self.enabled = true;
        self.update(doc);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/trigger.rs"]
mod tests;
