//! Page fixtures shared by unit tests.

use std::path::PathBuf;

use crate::foundation::core::Viewport;
use crate::page::{ContentDef, ContentLayout, ItemDef, PageConfig, PreviewDef};
use crate::text::wrap::TextMetrics;

pub(crate) const VIEWPORT_W: f64 = 1000.0;
pub(crate) const VIEWPORT_H: f64 = 800.0;

/// `n` previews stacked vertically, each `height` tall, starting at `y = 0`.
pub(crate) fn stacked_page(n: usize, height: f64) -> PageConfig {
    let items = (0..n)
        .map(|i| ItemDef {
            preview: PreviewDef {
                rect: [100.0, i as f64 * height, 400.0, height],
                image: format!("img/{i}.png"),
                image_scale_y: 1.0,
                title: vec![format!("Item {i}"), "subtitle".to_string()],
                description: format!("Description {i}"),
            },
            content: ContentDef {
                title: vec![format!("Item {i}")],
                meta: "2024 / work".to_string(),
                thumbs: vec![format!("img/{i}-a.png"), format!("img/{i}-b.png")],
                text: "Lorem ipsum dolor sit amet consectetur adipiscing elit sed do \
                       eiusmod tempor incididunt ut labore et dolore magna aliqua"
                    .to_string(),
                layout: ContentLayout::default(),
            },
        })
        .collect();
    PageConfig {
        viewport: Viewport {
            width: VIEWPORT_W,
            height: VIEWPORT_H,
        },
        document_height: None,
        assets_root: PathBuf::from("."),
        text: TextMetrics {
            advance: 10.0,
            line_height: 20.0,
        },
        items,
    }
}

pub(crate) fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "vitrine_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

pub(crate) fn write_png(path: &std::path::Path, width: u32, height: u32) {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).unwrap();
    }
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([10, 20, 30, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    std::fs::write(path, &buf).unwrap();
}

/// Write every image `cfg` references under a fresh assets root.
pub(crate) fn write_assets(cfg: &mut PageConfig, name: &str) -> PathBuf {
    let root = temp_dir(name);
    for item in &cfg.items {
        write_png(&root.join(&item.preview.image), 4, 3);
        for thumb in &item.content.thumbs {
            write_png(&root.join(thumb), 2, 2);
        }
    }
    cfg.assets_root = root.clone();
    root
}
