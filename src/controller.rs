//! Expand/collapse state machine and its choreography.
//!
//! Input is only honored in the two resting states: a preview click from
//! [`TransitionState::Idle`] and a back click from [`TransitionState::Expanded`].
//! Everything arriving while a timeline is in flight is dropped, never queued.

use crate::animation::ease::Ease;
use crate::animation::flip::{self, FlipOpts};
use crate::animation::stage::Stage;
use crate::animation::timeline::Timeline;
use crate::animation::tween::{Props, Tween, TweenDefaults};
use crate::dom::document::Document;
use crate::dom::node::NodeId;
use crate::foundation::core::Origin;
use crate::item::Item;
use crate::parallax::ScrollLinked;
use crate::scroll::smooth::SmoothScroll;

pub const BODY_OPEN_CLASS: &str = "content-open";
pub const CONTENT_CURRENT_CLASS: &str = "content--current";

const TRANSITION: TweenDefaults = TweenDefaults {
    duration: 1.5,
    ease: Ease::POWER4_IN_OUT,
};
const SECOND_PHASE_OFFSET: f64 = 0.15;
const BODY_TEXT_REVEAL_DELAY: f64 = 0.01;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "state", content = "index", rename_all = "snake_case")]
pub enum TransitionState {
    #[default]
    Idle,
    Expanding(usize),
    Expanded(usize),
    Collapsing(usize),
}

impl TransitionState {
    pub fn busy(self) -> bool {
        matches!(self, Self::Expanding(_) | Self::Collapsing(_))
    }

    /// Index of the item that owns the content view, if any.
    pub fn current(self) -> Option<usize> {
        match self {
            Self::Idle => None,
            Self::Expanding(i) | Self::Expanded(i) | Self::Collapsing(i) => Some(i),
        }
    }
}

/// Timeline cues routed back into the controller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Cue {
    BodyReveal(usize),
    ExpandComplete(usize),
    CollapseComplete(usize),
}

/// Work that must wait for the frame after the one that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameTask {
    ResumeParallax(usize),
}

/// Mutable collaborators a transition touches.
pub struct Env<'a> {
    pub doc: &'a mut Document,
    pub stage: &'a mut Stage<Cue>,
    pub scroll: &'a mut SmoothScroll,
    pub parallax: &'a mut ScrollLinked,
}

/// What a click landed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    Preview(usize),
    Back,
}

#[derive(Debug)]
pub struct TransitionController {
    state: TransitionState,
    items: Vec<Item>,
    back: NodeId,
}

impl TransitionController {
    /// Take ownership of the bound items; content body lines start hidden.
    pub fn new(doc: &mut Document, stage: &mut Stage<Cue>, mut items: Vec<Item>, back: NodeId) -> Self {
        for item in &mut items {
            item.body_reveal.leave(doc, stage, false);
        }
        Self {
            state: TransitionState::Idle,
            items,
            back,
        }
    }

    pub fn state(&self) -> TransitionState {
        self.state
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn item(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    pub fn back(&self) -> NodeId {
        self.back
    }

    /// Map a clicked node to the control it belongs to.
    pub fn resolve_click(&self, doc: &Document, node: NodeId) -> Option<Target> {
        if doc.contains(self.back, node) {
            return Some(Target::Back);
        }
        self.items
            .iter()
            .find(|it| doc.contains(it.preview.image_wrap, node))
            .map(|it| Target::Preview(it.index))
    }

    pub fn resize(&mut self, doc: &mut Document) {
        for item in &mut self.items {
            item.body_reveal.resize(doc);
        }
    }

    /// Previews other than `index` that currently intersect the viewport.
    fn capture_adjacent(&self, doc: &Document, index: usize) -> Vec<usize> {
        let vp = doc.viewport();
        self.items
            .iter()
            .filter(|it| it.index != index && vp.intersects(doc.bounding_rect(it.preview.root)))
            .map(|it| it.index)
            .collect()
    }

    /// Start expanding item `index`. Returns `false` when the input was dropped.
    #[tracing::instrument(skip(self, env), fields(state = ?self.state))]
    pub fn expand(&mut self, index: usize, env: &mut Env<'_>) -> bool {
        if self.state != TransitionState::Idle || index >= self.items.len() {
            tracing::debug!("expand ignored");
            return false;
        }

        let adjacent = self.capture_adjacent(env.doc, index);
        let vh = env.doc.viewport().height;
        let body = env.doc.body();

        env.scroll.stop();
        env.parallax.pause(index);
        env.doc.add_class(body, BODY_OPEN_CLASS);

        let item = &mut self.items[index];
        env.doc.add_class(item.content.root, CONTENT_CURRENT_CLASS);

        let mut hidden_lines = item.content.title_lines.clone();
        hidden_lines.push(item.content.meta_line);
        env.stage
            .set(env.doc, &hidden_lines, &Props::new().y_percent(-101.0).opacity(0.0));
        env.stage.set(
            env.doc,
            &item.content.thumbs,
            &Props::new().origin(Origin::TOP_LEFT).scale(0.0).y_percent(150.0),
        );
        env.stage.set(
            env.doc,
            &[item.content.body_text, self.back],
            &Props::new().opacity(0.0),
        );

        let inner = item.preview.image_inner;
        let offset_h = env.doc.offset_height(inner);
        let cached = if offset_h > 0.0 {
            env.doc.bounding_rect(inner).height() / offset_h
        } else {
            1.0
        };
        item.cached_image_inner_scale_y = Some(cached);

        let mut tl = Timeline::new(TRANSITION);
        tl.add_label("start", 0.0)
            .add_label("content", SECOND_PHASE_OFFSET);

        for &k in &adjacent {
            let dy = if k < index { -vh } else { vh };
            tl.to(vec![self.items[k].preview.root], Props::new().y(dy), "start");
        }

        let item = &self.items[index];
        let state = flip::snapshot(env.doc, item.preview.image);
        let slot = item.content_image_frame(env.doc);
        env.doc.reparent(item.preview.image, item.content.root, slot);
        let replay = flip::from(
            env.doc,
            &state,
            FlipOpts {
                absolute: true,
                ..FlipOpts::default()
            },
        );

        tl.add(replay, "start")
            .add(
                Tween::to(
                    item.preview.title_lines.clone(),
                    Props::new().y_percent(101.0).opacity(0.0),
                )
                .stagger(-0.03),
                "start",
            )
            .to(
                vec![item.preview.description],
                Props::new().y_percent(101.0).opacity(0.0),
                "start",
            )
            .to(vec![inner], Props::new().scale_y(1.0), "start")
            .to(vec![self.back], Props::new().opacity(1.0), "content")
            .add(
                Tween::to(
                    item.content.title_lines.clone(),
                    Props::new().y_percent(0.0).opacity(1.0),
                )
                .stagger(-0.05),
                "content",
            )
            .to(
                vec![item.content.meta_line],
                Props::new().y_percent(0.0).opacity(1.0),
                "content",
            )
            .add(
                Tween::to(
                    item.content.thumbs.clone(),
                    Props::new().scale(1.0).y_percent(0.0),
                )
                .stagger(-0.05),
                "content",
            )
            .call(Cue::BodyReveal(index), "content")
            .on_complete(Cue::ExpandComplete(index));
        env.stage.play(tl);

        tracing::debug!(index, ?adjacent, cached_scale_y = cached, "expanding");
        self.items[index].adjacent = Some(adjacent);
        self.state = TransitionState::Expanding(index);
        true
    }

    /// Start collapsing the expanded item. Returns `false` when the input was dropped.
    #[tracing::instrument(skip(self, env), fields(state = ?self.state))]
    pub fn collapse(&mut self, env: &mut Env<'_>) -> bool {
        let TransitionState::Expanded(index) = self.state else {
            tracing::debug!("collapse ignored");
            return false;
        };

        let adjacent = self.items[index].adjacent.clone().unwrap_or_default();
        let restore_scale_y = self.items[index]
            .cached_image_inner_scale_y
            .take()
            .unwrap_or(1.0);

        let mut tl = Timeline::new(TRANSITION);
        tl.add_label("start", 0.0)
            .add_label("preview", SECOND_PHASE_OFFSET);

        let item = &self.items[index];
        tl.to(vec![self.back], Props::new().opacity(0.0), "start")
            .add(
                Tween::to(
                    item.content.title_lines.clone(),
                    Props::new().y_percent(-101.0).opacity(0.0),
                )
                .stagger(0.05),
                "start",
            )
            .to(
                vec![item.content.meta_line],
                Props::new().y_percent(-101.0).opacity(0.0),
                "start",
            )
            .add(
                Tween::to(
                    item.content.thumbs.clone(),
                    Props::new().scale(0.0).y_percent(150.0),
                )
                .stagger(-0.05),
                "start",
            );

        for &k in &adjacent {
            tl.to(vec![self.items[k].preview.root], Props::new().y(0.0), "preview");
        }

        let image = item.preview.image;
        let wrap = item.preview.image_wrap;
        let frame = item.image_frame;
        tl.defer("preview", TRANSITION.duration, move |doc: &mut Document| {
            let state = flip::snapshot(doc, image);
            doc.reparent(image, wrap, frame);
            flip::from(
                doc,
                &state,
                FlipOpts {
                    absolute: true,
                    ..FlipOpts::default()
                },
            )
        })
        .add(
            Tween::to(
                item.preview.title_lines.clone(),
                Props::new().y_percent(0.0).opacity(1.0),
            )
            .stagger(0.03),
            "preview",
        )
        .to(
            vec![item.preview.description],
            Props::new().y_percent(0.0).opacity(1.0),
            "preview",
        )
        .to(
            vec![item.preview.image_inner],
            Props::new().scale_y(restore_scale_y),
            "preview",
        )
        .on_complete(Cue::CollapseComplete(index));
        env.stage.play(tl);

        self.items[index]
            .body_reveal
            .leave(env.doc, env.stage, true);

        tracing::debug!(index, ?adjacent, restore_scale_y, "collapsing");
        self.state = TransitionState::Collapsing(index);
        true
    }

    /// Route a timeline cue. May hand back work for the next frame.
    pub fn on_cue(&mut self, cue: Cue, env: &mut Env<'_>) -> Option<FrameTask> {
        match cue {
            Cue::BodyReveal(index) => {
                let item = &mut self.items[index];
                item.body_reveal.enter(env.doc, env.stage, true);
                env.stage.delayed_set(
                    BODY_TEXT_REVEAL_DELAY,
                    vec![item.content.body_text],
                    Props::new().opacity(1.0),
                );
                None
            }
            Cue::ExpandComplete(index) => {
                if self.state == TransitionState::Expanding(index) {
                    self.state = TransitionState::Expanded(index);
                    tracing::debug!(index, "expanded");
                }
                None
            }
            Cue::CollapseComplete(index) => {
                if self.state != TransitionState::Collapsing(index) {
                    return None;
                }
                env.scroll.start();
                let body = env.doc.body();
                env.doc.remove_class(body, BODY_OPEN_CLASS);
                let item = &mut self.items[index];
                env.doc.remove_class(item.content.root, CONTENT_CURRENT_CLASS);
                item.adjacent = None;
                self.state = TransitionState::Idle;
                tracing::debug!(index, "collapsed");
                Some(FrameTask::ResumeParallax(index))
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/controller.rs"]
mod tests;
