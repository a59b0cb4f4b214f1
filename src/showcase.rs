//! Page runtime: bootstrap, input dispatch and the frame loop.
//!
//! A frame runs, in order: tasks deferred from the previous frame, the smooth-scroll
//! tick, scroll-linked scrubbing, then every running timeline. Cues emitted by the
//! timelines are routed to the transition controller before the frame ends.

use crate::animation::stage::Stage;
use crate::controller::{Cue, Env, FrameTask, Target, TransitionController, TransitionState};
use crate::dom::document::Document;
use crate::dom::node::NodeId;
use crate::foundation::core::Viewport;
use crate::foundation::error::{VitrineError, VitrineResult};
use crate::item::bind_items;
use crate::page::{ContentLayout, LOADING_CLASS, Page, relayout_content};
use crate::parallax::ScrollLinked;
use crate::preload::{Preloader, collect_sources};
use crate::scroll::smooth::{ScrollEvent, SmoothScroll, SmoothScrollConfig};
use crate::text::wrap::TextMetrics;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ShowcaseOptions {
    pub smooth: SmoothScrollConfig,
    /// Frames per second used by [`Showcase::run_for`].
    pub frame_rate: f64,
}

impl Default for ShowcaseOptions {
    fn default() -> Self {
        Self {
            smooth: SmoothScrollConfig::default(),
            frame_rate: 60.0,
        }
    }
}

impl ShowcaseOptions {
    pub fn validate(&self) -> VitrineResult<()> {
        if !(self.frame_rate.is_finite() && self.frame_rate > 0.0) {
            return Err(VitrineError::validation("frame_rate must be > 0"));
        }
        if let Some(lerp) = self.smooth.lerp
            && !(lerp > 0.0 && lerp <= 1.0)
        {
            return Err(VitrineError::validation("smooth.lerp must be within (0, 1]"));
        }
        Ok(())
    }
}

/// User input, as the host page would deliver it.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PageEvent {
    /// Click on the image wrapper of preview `index`.
    ClickPreview { index: usize },
    ClickBack,
    /// Click on an arbitrary node; resolved against the preview wrappers and the back control.
    Click { node: u32 },
    Wheel {
        #[serde(default)]
        dx: f64,
        dy: f64,
    },
    Touch { delta: f64 },
    Resize { width: f64, height: f64 },
}

/// A bootstrapped, interactive page.
pub struct Showcase {
    doc: Document,
    stage: Stage<Cue>,
    scroll: SmoothScroll,
    parallax: ScrollLinked,
    controller: TransitionController,
    layouts: Vec<ContentLayout>,
    metrics: TextMetrics,
    document_height: f64,
    frame_rate: f64,
    clock: f64,
    next_frame: Vec<FrameTask>,
    /// Event from a synchronous jump, surfaced by the next [`Showcase::tick`].
    pending_scroll: Option<ScrollEvent>,
}

impl std::fmt::Debug for Showcase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Showcase")
            .field("state", &self.controller.state())
            .field("items", &self.controller.items().len())
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

/// Outcome of [`bootstrap`].
#[derive(Debug)]
pub enum Bootstrap {
    Ready(Box<Showcase>),
    /// Preloading failed; the document keeps its loading state and nothing is interactive.
    Stalled { document: Document, reason: String },
}

impl Bootstrap {
    pub fn document(&self) -> &Document {
        match self {
            Self::Ready(s) => s.document(),
            Self::Stalled { document, .. } => document,
        }
    }

    pub fn into_ready(self) -> Option<Showcase> {
        match self {
            Self::Ready(s) => Some(*s),
            Self::Stalled { .. } => None,
        }
    }
}

/// Bind the page, wait for its images, then install scroll, parallax and transitions.
///
/// Structural problems are errors. A failed preload is not: the page is returned
/// [`Bootstrap::Stalled`] with the `loading` class still on the root.
#[tracing::instrument(skip_all, fields(items = page.layouts.len()))]
pub fn bootstrap(
    page: Page,
    options: &ShowcaseOptions,
    preloader: &dyn Preloader,
) -> VitrineResult<Bootstrap> {
    options.validate()?;
    let Page {
        document: mut doc,
        layouts,
        metrics,
        document_height,
        ..
    } = page;

    let items = bind_items(&mut doc, metrics)?;
    let backs = doc.query_all(doc.body(), ".action--back")?;
    let [back] = backs[..] else {
        return Err(VitrineError::structure(format!(
            "expected one '.action--back', found {}",
            backs.len()
        )));
    };

    let sources = collect_sources(&doc)?;
    if let Err(e) = preloader.preload(&sources) {
        tracing::warn!(error = %e, "preload failed; page stays in its loading state");
        return Ok(Bootstrap::Stalled {
            document: doc,
            reason: e.to_string(),
        });
    }
    let root = doc.root();
    doc.remove_class(root, LOADING_CLASS);

    let vh = doc.viewport().height;
    let scroll = SmoothScroll::new(options.smooth, document_height - vh);
    let parallax = ScrollLinked::install(&mut doc, &items);
    let mut stage = Stage::new();
    let controller = TransitionController::new(&mut doc, &mut stage, items, back);
    tracing::info!(images = sources.len(), "page ready");

    Ok(Bootstrap::Ready(Box::new(Showcase {
        doc,
        stage,
        scroll,
        parallax,
        controller,
        layouts,
        metrics,
        document_height,
        frame_rate: options.frame_rate,
        clock: 0.0,
        next_frame: Vec::new(),
        pending_scroll: None,
    })))
}

impl Showcase {
    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn controller(&self) -> &TransitionController {
        &self.controller
    }

    pub fn state(&self) -> TransitionState {
        self.controller.state()
    }

    pub fn scroll(&self) -> &SmoothScroll {
        &self.scroll
    }

    pub fn parallax(&self) -> &ScrollLinked {
        &self.parallax
    }

    /// Seconds of frames run so far.
    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn frame_rate(&self) -> f64 {
        self.frame_rate
    }

    /// Whether any timeline is still playing.
    pub fn is_animating(&self) -> bool {
        !self.stage.is_idle()
    }

    fn split(&mut self) -> (&mut TransitionController, Env<'_>) {
        (
            &mut self.controller,
            Env {
                doc: &mut self.doc,
                stage: &mut self.stage,
                scroll: &mut self.scroll,
                parallax: &mut self.parallax,
            },
        )
    }

    /// Deliver one input event. Returns whether it had any effect.
    pub fn dispatch(&mut self, event: &PageEvent) -> VitrineResult<bool> {
        tracing::trace!(?event, "dispatch");
        let accepted = match *event {
            PageEvent::ClickPreview { index } => self.activate(Target::Preview(index)),
            PageEvent::ClickBack => self.activate(Target::Back),
            PageEvent::Click { node } => {
                let node = NodeId(node);
                if !self.doc.is_alive(node) {
                    return Err(VitrineError::validation(format!("unknown node {}", node.0)));
                }
                match self.controller.resolve_click(&self.doc, node) {
                    Some(target) => self.activate(target),
                    None => false,
                }
            }
            PageEvent::Wheel { dx, dy } => {
                if self.scroll.is_stopped() {
                    false
                } else {
                    self.scroll.wheel(dx, dy);
                    true
                }
            }
            PageEvent::Touch { delta } => {
                if self.scroll.is_stopped() {
                    false
                } else {
                    if let Some(ev) = self.scroll.touch(delta) {
                        self.doc.set_scroll_y(ev.scroll);
                        self.pending_scroll = Some(ev);
                    }
                    true
                }
            }
            PageEvent::Resize { width, height } => {
                self.resize(Viewport::new(width, height)?);
                true
            }
        };
        Ok(accepted)
    }

    fn activate(&mut self, target: Target) -> bool {
        let (controller, mut env) = self.split();
        match target {
            Target::Preview(index) => controller.expand(index, &mut env),
            Target::Back => controller.collapse(&mut env),
        }
    }

    /// Advance one frame of `dt` seconds.
    pub fn tick(&mut self, dt: f64) -> Option<ScrollEvent> {
        self.clock += dt;

        let current = self.controller.state().current();
        for task in std::mem::take(&mut self.next_frame) {
            match task {
                // Stale once the same item started expanding again.
                FrameTask::ResumeParallax(index) if current == Some(index) => {
                    tracing::debug!(index, "dropped parallax resume for re-expanded item");
                }
                FrameTask::ResumeParallax(index) => self.parallax.resume(&mut self.doc, index),
            }
        }

        let scrolled = match self.scroll.raf(self.clock) {
            Some(ev) => {
                self.doc.set_scroll_y(ev.scroll);
                self.pending_scroll = None;
                Some(ev)
            }
            None => self.pending_scroll.take(),
        };
        self.parallax.update(&mut self.doc);

        let cues = self.stage.tick(&mut self.doc, dt);
        let mut deferred = Vec::new();
        {
            let (controller, mut env) = self.split();
            for cue in cues {
                deferred.extend(controller.on_cue(cue, &mut env));
            }
        }
        self.next_frame.extend(deferred);
        scrolled
    }

    /// Run whole frames at the configured frame rate until `secs` have elapsed.
    pub fn run_for(&mut self, secs: f64) {
        let dt = 1.0 / self.frame_rate;
        let frames = (secs * self.frame_rate).round().max(0.0) as u64;
        for _ in 0..frames {
            self.tick(dt);
        }
    }

    /// Re-apply viewport-relative layout, re-split body text and re-measure triggers.
    ///
    /// In-flight transitions keep running.
    #[tracing::instrument(skip(self))]
    pub fn resize(&mut self, viewport: Viewport) {
        self.doc.set_viewport(viewport);
        let current = self.controller.state().current();
        for (item, layout) in self.controller.items().iter().zip(&self.layouts) {
            relayout_content(&mut self.doc, &item.content, layout, viewport, &self.metrics);
            if current == Some(item.index)
                && self.doc.parent(item.preview.image) == Some(item.content.root)
            {
                self.doc.node_mut(item.preview.image).frame = layout.image_frame(viewport);
            }
        }
        self.controller.resize(&mut self.doc);
        self.parallax.refresh(&mut self.doc);
        self.scroll.set_limit(self.document_height - viewport.height);
        self.doc.set_scroll_y(self.scroll.scroll());
    }
}

#[cfg(test)]
#[path = "../tests/unit/showcase.rs"]
mod tests;
