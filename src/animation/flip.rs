//! Shared-element transitions: record a node's on-screen box, move it in the tree,
//! then replay the difference as a transform tween (First, Last, Invert, Play).

use crate::animation::ease::Ease;
use crate::animation::tween::{Props, Tween};
use crate::dom::document::Document;
use crate::dom::node::NodeId;
use crate::foundation::core::{Origin, Rect};

/// On-screen box of a node captured before a DOM move.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlipState {
    pub node: NodeId,
    pub rect: Rect,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FlipOpts {
    pub duration: Option<f64>,
    pub ease: Option<Ease>,
    /// Mark the node out of flow while interpolating; see [`crate::dom::node::Style::absolute`].
    pub absolute: bool,
}

pub fn snapshot(doc: &Document, node: NodeId) -> FlipState {
    FlipState {
        node,
        rect: doc.bounding_rect(node),
    }
}

/// Build the replay tween for a node that moved since `state` was captured.
///
/// The inverted transform is written immediately, so the node keeps its old on-screen
/// box until the first frame plays.
pub fn from(doc: &mut Document, state: &FlipState, opts: FlipOpts) -> Tween {
    let node = state.node;
    {
        let style = doc.style_mut(node);
        style.x = 0.0;
        style.y = 0.0;
        style.scale_x = 1.0;
        style.scale_y = 1.0;
        style.origin = Origin::TOP_LEFT;
    }
    let last = doc.bounding_rect(node);
    let first = state.rect;

    let ratio = |a: f64, b: f64| if b.abs() > f64::EPSILON { a / b } else { 1.0 };
    let inverted = Props::new()
        .x(first.x0 - last.x0)
        .y(first.y0 - last.y0)
        .scale_x(ratio(first.width(), last.width()))
        .scale_y(ratio(first.height(), last.height()));
    let identity = Props::new().x(0.0).y(0.0).scale_x(1.0).scale_y(1.0);

    let style = doc.style_mut(node);
    inverted.apply(style);
    style.absolute = opts.absolute;

    let mut tween = Tween::from_to(vec![node], inverted, identity).absolute(opts.absolute);
    if let Some(d) = opts.duration {
        tween = tween.duration(d);
    }
    if let Some(e) = opts.ease {
        tween = tween.ease(e);
    }
    tween
}

#[cfg(test)]
#[path = "../../tests/unit/animation/flip.rs"]
mod tests;
