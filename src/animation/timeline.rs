use crate::animation::tween::{Props, Tween, TweenDefaults};
use crate::dom::document::Document;
use crate::dom::node::NodeId;

/// Where a child is placed on a timeline.
#[derive(Clone, Debug, PartialEq)]
pub enum Position {
    At(f64),
    /// A label plus an offset in seconds. Unknown labels resolve to the current end.
    Label(String, f64),
}

impl From<f64> for Position {
    fn from(secs: f64) -> Self {
        Self::At(secs)
    }
}

impl From<&str> for Position {
    fn from(label: &str) -> Self {
        Self::Label(label.to_owned(), 0.0)
    }
}

impl From<(&str, f64)> for Position {
    fn from((label, offset): (&str, f64)) -> Self {
        Self::Label(label.to_owned(), offset)
    }
}

/// Builds a child tween from the document as it is when the playhead arrives.
pub type DeferredTween = Box<dyn FnOnce(&mut Document) -> Tween>;

enum Action<C> {
    Tween(Tween),
    Set { targets: Vec<NodeId>, props: Props },
    Call(C),
    Defer {
        build: Option<DeferredTween>,
        // Span assumed until the tween exists.
        span: f64,
    },
}

impl<C: std::fmt::Debug> std::fmt::Debug for Action<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tween(tw) => f.debug_tuple("Tween").field(tw).finish(),
            Self::Set { targets, props } => f
                .debug_struct("Set")
                .field("targets", targets)
                .field("props", props)
                .finish(),
            Self::Call(cue) => f.debug_tuple("Call").field(cue).finish(),
            Self::Defer { span, .. } => f.debug_struct("Defer").field("span", span).finish(),
        }
    }
}

#[derive(Debug)]
struct Entry<C> {
    at: f64,
    action: Action<C>,
    fired: bool,
}

/// Labelled sequence of tweens, instant sets and call cues.
///
/// `C` is the cue type surfaced by call actions and completion; the engine never
/// interprets it, callers route it.
#[derive(Debug)]
pub struct Timeline<C> {
    defaults: TweenDefaults,
    labels: Vec<(String, f64)>,
    entries: Vec<Entry<C>>,
    time: f64,
    on_complete: Option<C>,
    completed: bool,
}

impl<C> Default for Timeline<C> {
    fn default() -> Self {
        Self::new(TweenDefaults::default())
    }
}

impl<C> Timeline<C> {
    pub fn new(defaults: TweenDefaults) -> Self {
        Self {
            defaults,
            labels: Vec::new(),
            entries: Vec::new(),
            time: 0.0,
            on_complete: None,
            completed: false,
        }
    }

    pub fn add_label(&mut self, name: &str, at: f64) -> &mut Self {
        self.labels.retain(|(n, _)| n != name);
        self.labels.push((name.to_owned(), at));
        self
    }

    pub fn label(&self, name: &str) -> Option<f64> {
        self.labels.iter().find(|(n, _)| n == name).map(|(_, t)| *t)
    }

    fn resolve(&self, pos: Position) -> f64 {
        match pos {
            Position::At(t) => t.max(0.0),
            Position::Label(name, offset) => {
                let base = self.label(&name).unwrap_or_else(|| self.duration());
                (base + offset).max(0.0)
            }
        }
    }

    fn insert(&mut self, at: f64, action: Action<C>) {
        let idx = self.entries.partition_point(|e| e.at <= at);
        self.entries.insert(
            idx,
            Entry {
                at,
                action,
                fired: false,
            },
        );
    }

    pub fn add(&mut self, tween: Tween, pos: impl Into<Position>) -> &mut Self {
        let at = self.resolve(pos.into());
        self.insert(at, Action::Tween(tween));
        self
    }

    pub fn to(&mut self, targets: impl Into<Vec<NodeId>>, props: Props, pos: impl Into<Position>) -> &mut Self {
        self.add(Tween::to(targets, props), pos)
    }

    pub fn set(&mut self, targets: impl Into<Vec<NodeId>>, props: Props, pos: impl Into<Position>) -> &mut Self {
        let at = self.resolve(pos.into());
        self.insert(
            at,
            Action::Set {
                targets: targets.into(),
                props,
            },
        );
        self
    }

    pub fn call(&mut self, cue: C, pos: impl Into<Position>) -> &mut Self {
        let at = self.resolve(pos.into());
        self.insert(at, Action::Call(cue));
        self
    }

    /// Run `build` when the playhead reaches `pos` and play the tween it returns from there.
    ///
    /// Used for layout replays that must snapshot the document mid-timeline.
    pub fn defer(
        &mut self,
        pos: impl Into<Position>,
        span: f64,
        build: impl FnOnce(&mut Document) -> Tween + 'static,
    ) -> &mut Self {
        let at = self.resolve(pos.into());
        self.insert(
            at,
            Action::Defer {
                build: Some(Box::new(build)),
                span,
            },
        );
        self
    }

    pub fn on_complete(&mut self, cue: C) -> &mut Self {
        self.on_complete = Some(cue);
        self
    }

    pub fn duration(&self) -> f64 {
        self.entries
            .iter()
            .map(|e| match &e.action {
                Action::Tween(tw) => e.at + tw.span(self.defaults),
                Action::Defer { span, .. } => e.at + span,
                Action::Set { .. } | Action::Call(_) => e.at,
            })
            .fold(0.0, f64::max)
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn progress(&self) -> f64 {
        let d = self.duration();
        if d <= 0.0 { 1.0 } else { (self.time / d).clamp(0.0, 1.0) }
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    pub fn kill_targets(&mut self, killed: &[NodeId]) {
        for e in &mut self.entries {
            match &mut e.action {
                Action::Tween(tw) => tw.kill_targets(killed),
                Action::Set { targets, .. } => targets.retain(|t| !killed.contains(t)),
                Action::Call(_) | Action::Defer { .. } => {}
            }
        }
    }
}

impl<C: Clone> Timeline<C> {
    /// Move the playhead to `time`, rendering every child and collecting crossed cues.
    pub fn seek(&mut self, doc: &mut Document, time: f64) -> Vec<C> {
        let time = time.max(0.0);
        let defaults = self.defaults;
        let mut cues = Vec::new();
        for e in &mut self.entries {
            let local = time - e.at;
            if local >= 0.0 {
                if let Action::Defer { build, .. } = &mut e.action {
                    if let Some(build) = build.take() {
                        e.action = Action::Tween(build(doc));
                    }
                }
            }
            match &mut e.action {
                Action::Tween(tw) => tw.render(doc, local, defaults),
                Action::Set { targets, props } => {
                    if local >= 0.0 && !e.fired {
                        for &t in targets.iter() {
                            if doc.is_alive(t) {
                                props.apply(doc.style_mut(t));
                            }
                        }
                    }
                }
                Action::Call(cue) => {
                    if local >= 0.0 && !e.fired {
                        cues.push(cue.clone());
                    }
                }
                Action::Defer { .. } => {}
            }
            e.fired = local >= 0.0;
        }
        self.time = time;
        cues
    }

    /// Seek to a normalized position, as a scroll scrubber does.
    pub fn seek_progress(&mut self, doc: &mut Document, progress: f64) -> Vec<C> {
        let t = progress.clamp(0.0, 1.0) * self.duration();
        self.seek(doc, t)
    }

    /// Advance by wall-clock `dt`; the completion cue is appended once the end is reached.
    pub fn tick(&mut self, doc: &mut Document, dt: f64) -> Vec<C> {
        if self.completed {
            return Vec::new();
        }
        let next = self.time + dt.max(0.0);
        let mut cues = self.seek(doc, next);
        if next >= self.duration() {
            self.completed = true;
            cues.extend(self.on_complete.clone());
        }
        cues
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timeline.rs"]
mod tests;
