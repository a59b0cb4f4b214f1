use crate::foundation::core::{Origin, Rect, Transform2D, Vec2};

/// Stable handle into a [`crate::Document`] arena.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct NodeId(pub u32);

impl NodeId {
    pub(crate) fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Animatable presentation state of a node (the subset of CSS the engine tweens).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Style {
    pub x: f64,
    pub y: f64,
    pub x_percent: f64,
    pub y_percent: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    pub opacity: f64,
    pub origin: Origin,
    /// Taken out of flow while a layout replay runs.
    ///
    /// Layout never reads this: every frame is explicit, so siblings hold their boxes
    /// whether or not a node is in flow. It is exposed for hosts that mirror styles
    /// into a real layout engine.
    pub absolute: bool,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            x_percent: 0.0,
            y_percent: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            opacity: 1.0,
            origin: Origin::default(),
            absolute: false,
        }
    }
}

impl Style {
    /// Resolve percentage offsets against the node's own box.
    pub fn transform(&self, rect: Rect) -> Transform2D {
        Transform2D {
            translate: Vec2::new(
                self.x + self.x_percent * rect.width() / 100.0,
                self.y + self.y_percent * rect.height() / 100.0,
            ),
            scale: Vec2::new(self.scale_x, self.scale_y),
            origin: self.origin,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Node {
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub classes: Vec<String>,
    /// Box relative to the parent's box, or to the viewport when `fixed`.
    pub frame: Rect,
    pub fixed: bool,
    pub text: Option<String>,
    pub background_image: Option<String>,
    pub style: Style,
}

impl Node {
    pub(crate) fn new(classes: Vec<String>, frame: Rect) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            classes,
            frame,
            fixed: false,
            text: None,
            background_image: None,
            style: Style::default(),
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// Declarative description of a node to append.
#[derive(Clone, Debug, Default)]
pub struct NodeSpec {
    pub classes: Vec<String>,
    pub frame: Rect,
    pub fixed: bool,
    pub text: Option<String>,
    pub background_image: Option<String>,
}

impl NodeSpec {
    /// `classes` is a whitespace separated class list, as in a `class` attribute.
    pub fn new(classes: &str, frame: Rect) -> Self {
        Self {
            classes: classes.split_whitespace().map(str::to_owned).collect(),
            frame,
            ..Self::default()
        }
    }

    pub fn fixed(mut self) -> Self {
        self.fixed = true;
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn background_image(mut self, url: impl Into<String>) -> Self {
        self.background_image = Some(url.into());
        self
    }
}
