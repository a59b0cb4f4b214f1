use super::*;
use crate::page::Page;
use crate::test_support::{stacked_page, temp_dir, write_assets, write_png};

#[test]
fn collects_preview_and_thumb_images_in_order() {
    let page = Page::build(&stacked_page(2, 500.0)).unwrap();
    let sources = collect_sources(&page.document).unwrap();
    assert_eq!(
        sources,
        vec![
            "img/0.png",
            "img/1.png",
            "img/0-a.png",
            "img/0-b.png",
            "img/1-a.png",
            "img/1-b.png",
        ]
    );
}

#[test]
fn duplicate_sources_are_probed_once() {
    let mut cfg = stacked_page(2, 500.0);
    cfg.items[1].preview.image = "img/0.png".to_string();
    let page = Page::build(&cfg).unwrap();
    let sources = collect_sources(&page.document).unwrap();
    assert_eq!(sources.iter().filter(|s| *s == "img/0.png").count(), 1);
}

#[test]
fn probes_every_image_dimension() {
    let mut cfg = stacked_page(2, 500.0);
    let root = write_assets(&mut cfg, "preload_probe");
    let page = Page::build(&cfg).unwrap();
    let sources = collect_sources(&page.document).unwrap();

    let infos = FsPreloader::new(&root)
        .with_threads(2)
        .preload(&sources)
        .unwrap();
    assert_eq!(infos.len(), sources.len());
    assert_eq!(infos[0], ImageInfo { width: 4, height: 3 });
    assert_eq!(infos[2], ImageInfo { width: 2, height: 2 });
}

#[test]
fn one_missing_image_fails_the_batch() {
    let root = temp_dir("preload_missing");
    write_png(&root.join("a.png"), 1, 1);
    let err = FsPreloader::new(&root)
        .preload(&["a.png".to_string(), "gone.png".to_string()])
        .unwrap_err();
    assert!(matches!(err, VitrineError::Preload(_)));
    assert!(err.to_string().contains("gone.png"));
}

#[test]
fn zero_threads_is_rejected() {
    let err = FsPreloader::new(".")
        .with_threads(0)
        .preload(&[])
        .unwrap_err();
    assert!(matches!(err, VitrineError::Validation(_)));
}
