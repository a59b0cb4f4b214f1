use super::*;

#[test]
fn viewport_rejects_degenerate_sizes() {
    assert!(Viewport::new(0.0, 10.0).is_err());
    assert!(Viewport::new(10.0, f64::NAN).is_err());
    assert!(Viewport::new(10.0, 10.0).is_ok());
}

#[test]
fn viewport_intersection_is_strict() {
    let vp = Viewport::new(100.0, 100.0).unwrap();
    assert!(vp.intersects(Rect::new(0.0, 50.0, 10.0, 150.0)));
    assert!(!vp.intersects(Rect::new(0.0, 100.0, 10.0, 200.0)));
    assert!(!vp.intersects(Rect::new(0.0, -50.0, 10.0, 0.0)));
}

#[test]
fn origin_parses_percentages_and_keywords() {
    assert_eq!("50% 0%".parse::<Origin>().unwrap(), Origin::TOP_CENTER);
    assert_eq!("0% 0%".parse::<Origin>().unwrap(), Origin::TOP_LEFT);
    assert_eq!("center".parse::<Origin>().unwrap(), Origin::CENTER);
    assert_eq!(
        "right bottom".parse::<Origin>().unwrap(),
        Origin { x: 1.0, y: 1.0 }
    );
    assert!("top left".parse::<Origin>().is_err());
    assert!("1 2 3".parse::<Origin>().is_err());
}

#[test]
fn transform_to_affine_identity_and_top_anchored_scale() {
    let rect = Rect::new(10.0, 20.0, 110.0, 70.0);
    assert_eq!(Transform2D::default().to_affine(rect), Affine::IDENTITY);

    let t = Transform2D {
        scale: Vec2::new(1.0, 2.0),
        origin: Origin::TOP_CENTER,
        ..Transform2D::default()
    };
    let out = t.to_affine(rect).transform_rect_bbox(rect);
    assert_eq!(out.y0, 20.0);
    assert_eq!(out.height(), 100.0);
}
