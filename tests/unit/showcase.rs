use super::*;
use crate::preload::ImageInfo;
use crate::test_support::{VIEWPORT_H, VIEWPORT_W, stacked_page};

struct StubPreloader {
    fail: Option<&'static str>,
}

impl Preloader for StubPreloader {
    fn preload(&self, sources: &[String]) -> VitrineResult<Vec<ImageInfo>> {
        match self.fail {
            Some(msg) => Err(VitrineError::preload(msg)),
            None => Ok(vec![ImageInfo { width: 1, height: 1 }; sources.len()]),
        }
    }
}

const OK: StubPreloader = StubPreloader { fail: None };

fn ready(n: usize) -> Showcase {
    let page = Page::build(&stacked_page(n, 500.0)).unwrap();
    bootstrap(page, &ShowcaseOptions::default(), &OK)
        .unwrap()
        .into_ready()
        .unwrap()
}

#[test]
fn bootstrap_installs_everything() {
    let s = ready(3);
    let doc = s.document();
    assert!(!doc.has_class(doc.root(), LOADING_CLASS));
    assert_eq!(s.state(), TransitionState::Idle);
    assert_eq!(s.parallax().len(), 3);
    assert_eq!(s.controller().items().len(), 3);
    assert!(!s.scroll().is_stopped());
    assert_eq!(s.scroll().limit(), 1500.0 - VIEWPORT_H);
    assert!(!s.is_animating());
}

#[test]
fn failed_preload_stalls_in_loading_state() {
    let page = Page::build(&stacked_page(2, 500.0)).unwrap();
    let out = bootstrap(
        page,
        &ShowcaseOptions::default(),
        &StubPreloader {
            fail: Some("img/1.png unreadable"),
        },
    )
    .unwrap();
    let doc = out.document();
    assert!(doc.has_class(doc.root(), LOADING_CLASS));
    match out {
        Bootstrap::Stalled { reason, .. } => assert!(reason.contains("img/1.png")),
        Bootstrap::Ready(_) => panic!("expected a stalled bootstrap"),
    }
}

#[test]
fn missing_back_control_is_structural() {
    let mut page = Page::build(&stacked_page(2, 500.0)).unwrap();
    let body = page.document.body();
    let back = page.document.query(body, ".action--back").unwrap().unwrap();
    page.document.remove(back);
    let err = bootstrap(page, &ShowcaseOptions::default(), &OK).unwrap_err();
    assert!(matches!(err, VitrineError::Structure(_)));
}

#[test]
fn unpaired_content_is_structural() {
    let mut page = Page::build(&stacked_page(2, 500.0)).unwrap();
    let body = page.document.body();
    let content = page.document.query(body, ".content").unwrap().unwrap();
    page.document.remove(content);
    let err = bootstrap(page, &ShowcaseOptions::default(), &OK).unwrap_err();
    assert!(err.to_string().contains("2 previews but 1 content blocks"));
}

#[test]
fn invalid_frame_rate_is_rejected() {
    let page = Page::build(&stacked_page(1, 500.0)).unwrap();
    let opts = ShowcaseOptions {
        frame_rate: 0.0,
        ..ShowcaseOptions::default()
    };
    let err = bootstrap(page, &opts, &OK).unwrap_err();
    assert!(matches!(err, VitrineError::Validation(_)));
}

#[test]
fn wheel_moves_the_document_smoothly() {
    let mut s = ready(4);
    assert!(s.dispatch(&PageEvent::Wheel { dx: 0.0, dy: 300.0 }).unwrap());
    s.tick(1.0 / 60.0);
    s.tick(1.0 / 60.0);
    let mid = s.document().scroll_y();
    assert!(mid > 0.0 && mid < 300.0);
    s.run_for(3.0);
    assert_eq!(s.document().scroll_y(), 300.0);
}

#[test]
fn scrolling_is_frozen_while_expanded() {
    let mut s = ready(3);
    assert!(s.dispatch(&PageEvent::ClickPreview { index: 0 }).unwrap());
    assert!(!s.dispatch(&PageEvent::Wheel { dx: 0.0, dy: 200.0 }).unwrap());
    s.run_for(2.5);
    assert_eq!(s.state(), TransitionState::Expanded(0));
    assert!(!s.dispatch(&PageEvent::Touch { delta: 50.0 }).unwrap());
    assert_eq!(s.document().scroll_y(), 0.0);

    assert!(s.dispatch(&PageEvent::ClickBack).unwrap());
    s.run_for(2.5);
    assert_eq!(s.state(), TransitionState::Idle);
    assert!(s.dispatch(&PageEvent::Touch { delta: 50.0 }).unwrap());
    assert_eq!(s.document().scroll_y(), 100.0);
}

#[test]
fn raw_clicks_resolve_through_the_document() {
    let mut s = ready(3);
    let inner = s.controller().item(1).unwrap().preview.image_inner;
    let desc = s.controller().item(1).unwrap().preview.description;
    assert!(!s.dispatch(&PageEvent::Click { node: desc.0 }).unwrap());
    assert!(s.dispatch(&PageEvent::Click { node: inner.0 }).unwrap());
    assert_eq!(s.state(), TransitionState::Expanding(1));
    assert!(s.dispatch(&PageEvent::Click { node: 9999 }).is_err());
}

#[test]
fn resize_while_expanded_resplits_and_keeps_state() {
    let mut s = ready(2);
    s.dispatch(&PageEvent::ClickPreview { index: 0 }).unwrap();
    s.run_for(2.5);
    let lines_before = s.controller().item(0).unwrap().body_reveal.lines().len();

    s.dispatch(&PageEvent::Resize {
        width: VIEWPORT_W / 2.0,
        height: VIEWPORT_H,
    })
    .unwrap();
    assert_eq!(s.state(), TransitionState::Expanded(0));
    let item = s.controller().item(0).unwrap();
    assert!(item.body_reveal.lines().len() > lines_before);
    assert!(item.body_reveal.is_visible());
    let doc = s.document();
    assert_eq!(doc.node(item.content.root).frame.width(), VIEWPORT_W / 2.0);
    let image = doc.bounding_rect(item.preview.image);
    assert_eq!(image.x0, VIEWPORT_W / 4.0);
    assert_eq!(image.width(), VIEWPORT_W / 4.0);
}

#[test]
fn resize_moves_the_thumb_strip_with_the_viewport_bottom() {
    let mut s = ready(2);
    s.dispatch(&PageEvent::Resize {
        width: VIEWPORT_W,
        height: 600.0,
    })
    .unwrap();
    let doc = s.document();
    for item in s.controller().items() {
        let strip = doc.layout_rect(item.content.thumbs_strip);
        assert_eq!(strip.y1, 600.0 - 32.0);
        let meta = doc.node(item.content.meta_line).frame;
        assert_eq!(meta.width(), 0.4 * VIEWPORT_W);
    }
}

#[test]
fn parallax_is_paused_only_for_the_open_item() {
    let mut s = ready(3);
    s.dispatch(&PageEvent::ClickPreview { index: 1 }).unwrap();
    assert!(s.parallax().is_paused(1));
    assert!(!s.parallax().is_paused(0));
    s.run_for(2.5);
    s.dispatch(&PageEvent::ClickBack).unwrap();
    s.run_for(2.5);
    assert_eq!(s.state(), TransitionState::Idle);
    assert!(!s.parallax().is_paused(1));
}

#[test]
fn reexpanding_before_the_resume_frame_keeps_parallax_paused() {
    let mut s = ready(3);
    s.dispatch(&PageEvent::ClickPreview { index: 1 }).unwrap();
    s.run_for(2.5);
    s.dispatch(&PageEvent::ClickBack).unwrap();
    let mut frames = 0;
    while s.state() != TransitionState::Idle {
        s.tick(1.0 / 60.0);
        frames += 1;
        assert!(frames < 600, "collapse never completed");
    }
    // The resume is queued for the next frame.
    assert!(s.parallax().is_paused(1));

    assert!(s.dispatch(&PageEvent::ClickPreview { index: 1 }).unwrap());
    s.tick(1.0 / 60.0);
    assert_eq!(s.state(), TransitionState::Expanding(1));
    assert!(s.parallax().is_paused(1));

    s.run_for(2.5);
    assert_eq!(s.state(), TransitionState::Expanded(1));
    assert!(s.parallax().is_paused(1));
    let inner = s.controller().item(1).unwrap().preview.image_inner;
    assert!((s.document().style(inner).scale_y - 1.0).abs() < 1e-9);
}

#[test]
fn touch_scroll_is_reported_by_the_next_tick() {
    let mut s = ready(3);
    let limit = s.scroll().limit();
    assert!(s.dispatch(&PageEvent::Touch { delta: 100.0 }).unwrap());
    assert_eq!(s.document().scroll_y(), 200.0);

    let ev = s.tick(1.0 / 60.0).expect("touch jump emits a scroll event");
    assert_eq!(ev.scroll, 200.0);
    assert_eq!(ev.limit, limit);
    assert_eq!(ev.direction, 1);
    assert!((ev.progress - 200.0 / limit).abs() < 1e-12);
    assert!(s.tick(1.0 / 60.0).is_none());
}

#[test]
fn run_for_advances_the_clock_in_whole_frames() {
    let mut s = ready(1);
    s.run_for(0.5);
    assert!((s.clock() - 0.5).abs() < 1e-9);
    assert_eq!(s.frame_rate(), 60.0);
}

#[test]
fn events_read_from_tagged_json() {
    let ev: PageEvent = serde_json::from_str(r#"{"type":"click_preview","index":2}"#).unwrap();
    assert_eq!(ev, PageEvent::ClickPreview { index: 2 });
    let ev: PageEvent = serde_json::from_str(r#"{"type":"wheel","dy":120}"#).unwrap();
    assert_eq!(ev, PageEvent::Wheel { dx: 0.0, dy: 120.0 });
    let opts: ShowcaseOptions = serde_json::from_str(r#"{"frame_rate":30}"#).unwrap();
    assert_eq!(opts.frame_rate, 30.0);
    assert_eq!(opts.smooth, SmoothScrollConfig::default());
}
