use super::*;
use crate::foundation::core::Origin;

fn doc() -> Document {
    Document::new(Viewport::new(200.0, 100.0).unwrap())
}

#[test]
fn layout_rect_accumulates_parent_offsets() {
    let mut d = doc();
    let body = d.body();
    let card = d.append(body, NodeSpec::new("card", Rect::new(10.0, 300.0, 110.0, 400.0)));
    let img = d.append(card, NodeSpec::new("img", Rect::new(5.0, 5.0, 55.0, 45.0)));
    assert_eq!(d.layout_rect(img), Rect::new(15.0, 305.0, 65.0, 345.0));
    assert_eq!(d.offset_height(img), 40.0);
}

#[test]
fn bounding_rect_applies_scroll_and_ancestor_transforms() {
    let mut d = doc();
    let body = d.body();
    let card = d.append(body, NodeSpec::new("card", Rect::new(0.0, 300.0, 100.0, 400.0)));
    let img = d.append(card, NodeSpec::new("img", Rect::new(0.0, 0.0, 100.0, 50.0)));
    d.set_scroll_y(250.0);
    assert_eq!(d.bounding_rect(img), Rect::new(0.0, 50.0, 100.0, 100.0));

    d.style_mut(card).y = -100.0;
    assert_eq!(d.bounding_rect(img), Rect::new(0.0, -50.0, 100.0, 0.0));

    let s = d.style_mut(img);
    s.scale_y = 2.0;
    s.origin = Origin::TOP_CENTER;
    let r = d.bounding_rect(img);
    assert_eq!(r.height(), 100.0);
    assert_eq!(r.y0, -50.0);
}

#[test]
fn fixed_nodes_ignore_scroll() {
    let mut d = doc();
    let body = d.body();
    let overlay = d.append(body, NodeSpec::new("content", Rect::new(0.0, 0.0, 200.0, 100.0)).fixed());
    let slot = d.append(overlay, NodeSpec::new("slot", Rect::new(20.0, 10.0, 80.0, 60.0)));
    d.set_scroll_y(999.0);
    assert_eq!(d.bounding_rect(slot), Rect::new(20.0, 10.0, 80.0, 60.0));
    assert!(d.is_fixed(slot));
}

#[test]
fn reparent_moves_between_containers() {
    let mut d = doc();
    let body = d.body();
    let a = d.append(body, NodeSpec::new("a", Rect::ZERO));
    let b = d.append(body, NodeSpec::new("b", Rect::ZERO));
    let x = d.append(a, NodeSpec::new("x", Rect::ZERO));
    d.reparent(x, b, Rect::new(1.0, 1.0, 2.0, 2.0));
    assert_eq!(d.parent(x), Some(b));
    assert!(d.children(a).is_empty());
    assert_eq!(d.children(b), &[x]);
    assert!(d.contains(b, x));
    assert!(!d.contains(a, x));
}

#[test]
fn remove_drops_subtree_from_queries() {
    let mut d = doc();
    let body = d.body();
    let outer = d.append(body, NodeSpec::new("line", Rect::ZERO));
    let inner = d.append(outer, NodeSpec::new("line__inner", Rect::ZERO));
    assert_eq!(d.query_all(body, ".line__inner").unwrap(), vec![inner]);
    d.remove(outer);
    assert!(d.query_all(body, ".line__inner").unwrap().is_empty());
    assert!(!d.is_alive(inner));
}

#[test]
fn detached_subtree_stays_alive_until_reattached() {
    let mut d = doc();
    let body = d.body();
    let outer = d.append(body, NodeSpec::new("line", Rect::ZERO));
    let inner = d.append(outer, NodeSpec::new("line__inner", Rect::ZERO));
    let slots = d.node_count();

    d.detach(outer);
    assert!(d.query_all(body, ".line__inner").unwrap().is_empty());
    assert!(d.is_alive(inner));
    assert_eq!(d.parent(outer), None);

    d.reparent(outer, body, Rect::new(0.0, 20.0, 100.0, 40.0));
    assert_eq!(d.query_all(body, ".line__inner").unwrap(), vec![inner]);
    assert_eq!(d.node_count(), slots);
}

#[test]
fn query_returns_document_order() {
    let mut d = doc();
    let body = d.body();
    let a = d.append(body, NodeSpec::new("item", Rect::ZERO));
    let a1 = d.append(a, NodeSpec::new("item", Rect::ZERO));
    let b = d.append(body, NodeSpec::new("item", Rect::ZERO));
    assert_eq!(d.query_all(body, ".item").unwrap(), vec![a, a1, b]);
    assert_eq!(d.query(body, ".item").unwrap(), Some(a));
    assert_eq!(d.query(body, ".missing").unwrap(), None);
}

#[test]
fn classes_are_deduplicated() {
    let mut d = doc();
    let body = d.body();
    d.add_class(body, "content-open");
    d.add_class(body, "content-open");
    assert_eq!(d.node(body).classes, vec!["content-open".to_string()]);
    d.remove_class(body, "content-open");
    assert!(!d.has_class(body, "content-open"));
}
