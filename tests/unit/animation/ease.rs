use super::*;

const ALL: [Ease; 14] = [
    Ease::Linear,
    Ease::InQuad,
    Ease::OutQuad,
    Ease::InOutQuad,
    Ease::InCubic,
    Ease::OutCubic,
    Ease::InOutCubic,
    Ease::InQuart,
    Ease::OutQuart,
    Ease::InOutQuart,
    Ease::InQuint,
    Ease::OutQuint,
    Ease::InOutQuint,
    Ease::OutExpo,
];

#[test]
fn endpoints_are_pinned() {
    for ease in ALL {
        assert!(ease.apply(0.0).abs() < 1e-2, "{ease:?} at 0");
        assert!((ease.apply(1.0) - 1.0).abs() < 1e-9, "{ease:?} at 1");
    }
}

#[test]
fn inputs_are_clamped() {
    assert_eq!(Ease::InOutQuint.apply(-3.0), 0.0);
    assert_eq!(Ease::InOutQuint.apply(7.0), 1.0);
}

#[test]
fn in_out_curves_are_symmetric_at_midpoint() {
    for ease in [Ease::InOutQuad, Ease::InOutCubic, Ease::InOutQuart, Ease::InOutQuint] {
        assert!((ease.apply(0.5) - 0.5).abs() < 1e-12);
        let a = ease.apply(0.2);
        let b = ease.apply(0.8);
        assert!((a + b - 1.0).abs() < 1e-12);
    }
}

#[test]
fn power4_in_out_is_slow_at_the_edges() {
    assert!(Ease::POWER4_IN_OUT.apply(0.1) < 0.001);
    assert!(Ease::POWER4_IN_OUT.apply(0.9) > 0.999);
}

#[test]
fn parses_greensock_names() {
    assert_eq!("power4.inOut".parse::<Ease>().unwrap(), Ease::InOutQuint);
    assert_eq!("none".parse::<Ease>().unwrap(), Ease::Linear);
    assert_eq!("power2".parse::<Ease>().unwrap(), Ease::OutCubic);
    assert_eq!("expo.out".parse::<Ease>().unwrap(), Ease::OutExpo);
    assert!("bounce.out".parse::<Ease>().is_err());
}
