use super::*;
use crate::animation::ease::Ease;
use crate::animation::tween::{Props, Tween, TweenDefaults};
use crate::dom::node::NodeSpec;
use crate::foundation::core::{Rect, Viewport};

fn setup() -> (Document, NodeId, ScrollTrigger) {
    let mut doc = Document::new(Viewport::new(400.0, 500.0).unwrap());
    let body = doc.body();
    let card = doc.append(body, NodeSpec::new("preview", Rect::new(0.0, 1000.0, 400.0, 1500.0)));
    let mut tl = Timeline::new(TweenDefaults {
        duration: 1.0,
        ease: Ease::Linear,
    });
    tl.add(
        Tween::from_to(vec![card], Props::new().y_percent(0.0), Props::new().y_percent(-100.0)),
        0.0,
    );
    let st = ScrollTrigger::new(&doc, card, tl);
    (doc, card, st)
}

#[test]
fn range_spans_enter_bottom_to_leave_top() {
    let (_, _, st) = setup();
    assert_eq!(st.start(), 500.0);
    assert_eq!(st.end(), 1500.0);
    assert_eq!(st.progress_at(0.0), 0.0);
    assert_eq!(st.progress_at(1000.0), 0.5);
    assert_eq!(st.progress_at(9000.0), 1.0);
}

#[test]
fn disabled_trigger_holds_and_enable_catches_up() {
    let (mut doc, card, mut st) = setup();
    doc.set_scroll_y(750.0);
    st.update(&mut doc);
    assert_eq!(doc.style(card).y_percent, -25.0);

    st.disable();
    doc.set_scroll_y(1250.0);
    st.update(&mut doc);
    assert_eq!(doc.style(card).y_percent, -25.0);

    st.enable(&mut doc);
    assert_eq!(doc.style(card).y_percent, -75.0);
    assert_eq!(st.progress(), 0.75);
}
