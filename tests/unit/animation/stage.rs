use super::*;
use crate::animation::ease::Ease;
use crate::dom::node::NodeSpec;
use crate::foundation::core::{Rect, Viewport};

fn setup() -> (Document, NodeId) {
    let mut doc = Document::new(Viewport::new(100.0, 100.0).unwrap());
    let body = doc.body();
    let a = doc.append(body, NodeSpec::new("a", Rect::new(0.0, 0.0, 10.0, 10.0)));
    (doc, a)
}

fn linear() -> TweenDefaults {
    TweenDefaults {
        duration: 1.0,
        ease: Ease::Linear,
    }
}

#[test]
fn finished_timelines_are_dropped() {
    let (mut doc, a) = setup();
    let mut stage: Stage<()> = Stage::new();
    let id = stage.tween(Tween::to(vec![a], Props::new().y(10.0)), linear());
    assert!(stage.is_running(id));
    stage.tick(&mut doc, 0.5);
    assert_eq!(doc.style(a).y, 5.0);
    stage.tick(&mut doc, 0.5);
    assert_eq!(doc.style(a).y, 10.0);
    assert!(!stage.is_running(id));
    assert!(stage.is_idle());
}

#[test]
fn kill_leaves_values_where_they_are() {
    let (mut doc, a) = setup();
    let mut stage: Stage<()> = Stage::new();
    stage.tween(Tween::to(vec![a], Props::new().y(10.0)), linear());
    stage.tick(&mut doc, 0.5);
    stage.kill_tweens_of(&[a]);
    stage.tick(&mut doc, 0.25);
    assert_eq!(doc.style(a).y, 5.0);
}

#[test]
fn delayed_set_waits_for_frames() {
    let (mut doc, a) = setup();
    let mut stage: Stage<()> = Stage::new();
    stage.set(&mut doc, &[a], &Props::new().opacity(0.0));
    stage.delayed_set(0.01, vec![a], Props::new().opacity(1.0));
    stage.tick(&mut doc, 0.005);
    assert_eq!(doc.style(a).opacity, 0.0);
    stage.tick(&mut doc, 0.016);
    assert_eq!(doc.style(a).opacity, 1.0);
    assert_eq!(stage.running_count(), 0);
}
