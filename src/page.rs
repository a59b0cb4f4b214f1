//! Page description format and the document builder that realizes it.
//!
//! The builder emits exactly the class structure the runtime binds to, so a page
//! description is the only input a session needs besides the image files.

use std::path::{Path, PathBuf};

use crate::dom::document::Document;
use crate::dom::node::{NodeId, NodeSpec};
use crate::foundation::core::{Rect, Viewport};
use crate::foundation::error::{VitrineError, VitrineResult};
use crate::item::ContentHandles;
use crate::text::wrap::TextMetrics;

pub const LOADING_CLASS: &str = "loading";

/// Top-level page description, usually loaded from JSON.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct PageConfig {
    pub viewport: Viewport,
    /// Total scrollable height; defaults to the bottom of the lowest preview.
    #[serde(default)]
    pub document_height: Option<f64>,
    /// Directory image sources are resolved against.
    #[serde(default = "default_assets_root")]
    pub assets_root: PathBuf,
    #[serde(default)]
    pub text: TextMetrics,
    pub items: Vec<ItemDef>,
}

fn default_assets_root() -> PathBuf {
    PathBuf::from(".")
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ItemDef {
    pub preview: PreviewDef,
    pub content: ContentDef,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct PreviewDef {
    /// `[x, y, width, height]` in document pixels.
    pub rect: [f64; 4],
    pub image: String,
    /// CSS baseline vertical scale of the inner image.
    #[serde(default = "default_scale")]
    pub image_scale_y: f64,
    #[serde(default)]
    pub title: Vec<String>,
    #[serde(default)]
    pub description: String,
}

fn default_scale() -> f64 {
    1.0
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ContentDef {
    #[serde(default)]
    pub title: Vec<String>,
    #[serde(default)]
    pub meta: String,
    #[serde(default)]
    pub thumbs: Vec<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub layout: ContentLayout,
}

/// Viewport-relative placement of the content view's image and body text.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ContentLayout {
    /// `[x, y, width, height]` as fractions of the viewport.
    pub image_box: [f64; 4],
    /// Body text width as a fraction of the viewport width.
    pub text_width: f64,
}

impl Default for ContentLayout {
    fn default() -> Self {
        Self {
            image_box: [0.5, 0.0, 0.5, 1.0],
            text_width: 0.4,
        }
    }
}

impl ContentLayout {
    pub fn image_frame(&self, vp: Viewport) -> Rect {
        let [x, y, w, h] = self.image_box;
        Rect::from_origin_size(
            (x * vp.width, y * vp.height),
            (w * vp.width, h * vp.height),
        )
    }

    /// Width of the title, meta and body text column.
    pub fn column_width(&self, vp: Viewport) -> f64 {
        self.text_width * vp.width
    }

    /// Title block holding `lines` line boxes; an empty title still takes one line.
    pub fn title_frame(&self, vp: Viewport, metrics: &TextMetrics, lines: usize) -> Rect {
        let h = lines.max(1) as f64 * metrics.line_height;
        Rect::new(PADDING, PADDING, PADDING + self.column_width(vp), PADDING + h)
    }

    pub fn meta_frame(&self, vp: Viewport, metrics: &TextMetrics, title_lines: usize) -> Rect {
        let top = self.title_frame(vp, metrics, title_lines).y1;
        Rect::new(PADDING, top, PADDING + self.column_width(vp), top + metrics.line_height)
    }

    pub fn text_frame(&self, vp: Viewport, metrics: &TextMetrics) -> Rect {
        let top = PADDING + 3.0 * metrics.line_height;
        Rect::from_origin_size(
            (PADDING, top),
            (self.column_width(vp), (vp.height - top - PADDING).max(0.0)),
        )
    }

    /// Thumbnail strip, pinned to the bottom of the viewport.
    pub fn thumbs_frame(&self, vp: Viewport) -> Rect {
        let top = vp.height - PADDING - THUMB_SIZE;
        Rect::new(PADDING, top, PADDING + self.column_width(vp), top + THUMB_SIZE)
    }
}

const PADDING: f64 = 32.0;
const PREVIEW_IMAGE_SHARE: f64 = 0.75;
const THUMB_SIZE: f64 = 64.0;

impl PageConfig {
    pub fn from_json(json: &str) -> VitrineResult<Self> {
        let cfg: Self =
            serde_json::from_str(json).map_err(|e| VitrineError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> VitrineResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            VitrineError::Other(anyhow::Error::new(e).context(format!("read '{}'", path.display())))
        })?;
        let mut cfg = Self::from_json(&json)?;
        if cfg.assets_root.is_relative() {
            if let Some(dir) = path.parent() {
                cfg.assets_root = dir.join(&cfg.assets_root);
            }
        }
        Ok(cfg)
    }

    pub fn validate(&self) -> VitrineResult<()> {
        Viewport::new(self.viewport.width, self.viewport.height)?;
        if self.text.advance <= 0.0 || self.text.line_height <= 0.0 {
            return Err(VitrineError::validation("text metrics must be > 0"));
        }
        if let Some(h) = self.document_height {
            if !(h.is_finite() && h >= 0.0) {
                return Err(VitrineError::validation("document_height must be >= 0"));
            }
        }
        for (i, item) in self.items.iter().enumerate() {
            let [_, _, w, h] = item.preview.rect;
            if w <= 0.0 || h <= 0.0 {
                return Err(VitrineError::validation(format!(
                    "item {i}: preview rect must have a positive size"
                )));
            }
            let [_, _, bw, bh] = item.content.layout.image_box;
            if bw <= 0.0 || bh <= 0.0 {
                return Err(VitrineError::validation(format!(
                    "item {i}: content image box must have a positive size"
                )));
            }
            if !(0.0..=1.0).contains(&item.content.layout.text_width) {
                return Err(VitrineError::validation(format!(
                    "item {i}: content text width must be within [0, 1]"
                )));
            }
        }
        Ok(())
    }

    pub fn document_height(&self) -> f64 {
        self.document_height.unwrap_or_else(|| {
            self.items
                .iter()
                .map(|it| it.preview.rect[1] + it.preview.rect[3])
                .fold(self.viewport.height, f64::max)
        })
    }
}

/// A realized page: the document plus the layout inputs the runtime re-applies on resize.
#[derive(Clone, Debug)]
pub struct Page {
    pub document: Document,
    pub layouts: Vec<ContentLayout>,
    pub metrics: TextMetrics,
    pub document_height: f64,
    pub assets_root: PathBuf,
}

impl Page {
    #[tracing::instrument(skip(config), fields(items = config.items.len()))]
    pub fn build(config: &PageConfig) -> VitrineResult<Self> {
        config.validate()?;
        let vp = config.viewport;
        let metrics = config.text;
        let mut doc = Document::new(vp);
        let root = doc.root();
        doc.add_class(root, LOADING_CLASS);
        let body = doc.body();

        let grid = doc.append(body, NodeSpec::new("previews", Rect::ZERO));
        for item in &config.items {
            build_preview(&mut doc, grid, &item.preview, &metrics);
        }
        for item in &config.items {
            build_content(&mut doc, body, &item.content, vp, &metrics);
        }
        doc.append(
            body,
            NodeSpec::new("action action--back", Rect::new(PADDING, PADDING, PADDING + 48.0, PADDING + 48.0))
                .fixed(),
        );

        Ok(Self {
            document: doc,
            layouts: config.items.iter().map(|it| it.content.layout).collect(),
            metrics,
            document_height: config.document_height(),
            assets_root: config.assets_root.clone(),
        })
    }
}

fn line_frame(i: usize, width: f64, lh: f64) -> Rect {
    let top = i as f64 * lh;
    Rect::new(0.0, top, width, top + lh)
}

fn title_lines(doc: &mut Document, parent: NodeId, lines: &[String], width: f64, metrics: &TextMetrics) {
    let lh = metrics.line_height;
    for (i, line) in lines.iter().enumerate() {
        let oh = doc.append(parent, NodeSpec::new("oh", line_frame(i, width, lh)));
        doc.append(oh, NodeSpec::new("oh__inner", Rect::new(0.0, 0.0, width, lh)).text(line.as_str()));
    }
}

fn build_preview(doc: &mut Document, grid: NodeId, def: &PreviewDef, metrics: &TextMetrics) {
    let [x, y, w, h] = def.rect;
    let root = doc.append(grid, NodeSpec::new("preview", Rect::from_origin_size((x, y), (w, h))));

    let img_h = h * PREVIEW_IMAGE_SHARE;
    let img_box = Rect::new(0.0, 0.0, w, img_h);
    let wrap = doc.append(root, NodeSpec::new("preview__img-wrap", img_box));
    let img = doc.append(wrap, NodeSpec::new("preview__img", img_box));
    let inner = doc.append(
        img,
        NodeSpec::new("preview__img-inner", img_box).background_image(def.image.as_str()),
    );
    doc.style_mut(inner).scale_y = def.image_scale_y;

    let lh = metrics.line_height;
    let title_h = def.title.len() as f64 * lh;
    let title = doc.append(
        root,
        NodeSpec::new("preview__title", Rect::new(0.0, img_h, w, img_h + title_h)),
    );
    title_lines(doc, title, &def.title, w, metrics);
    doc.append(
        root,
        NodeSpec::new("preview__desc", Rect::new(0.0, img_h + title_h, w, h))
            .text(def.description.as_str()),
    );
}

fn build_content(doc: &mut Document, body: NodeId, def: &ContentDef, vp: Viewport, metrics: &TextMetrics) {
    let layout = &def.layout;
    let root = doc.append(body, NodeSpec::new("content", vp.rect()).fixed());
    let lh = metrics.line_height;
    let col = layout.column_width(vp);

    doc.append(root, NodeSpec::new("content__img-slot", layout.image_frame(vp)));

    let title_count = def.title.len();
    let title = doc.append(
        root,
        NodeSpec::new("content__title", layout.title_frame(vp, metrics, title_count)),
    );
    title_lines(doc, title, &def.title, col, metrics);

    let meta = doc.append(
        root,
        NodeSpec::new("content__meta oh", layout.meta_frame(vp, metrics, title_count)),
    );
    doc.append(meta, NodeSpec::new("oh__inner", Rect::new(0.0, 0.0, col, lh)).text(def.meta.as_str()));

    doc.append(
        root,
        NodeSpec::new("content__text", layout.text_frame(vp, metrics)).text(def.text.as_str()),
    );

    let thumbs = doc.append(root, NodeSpec::new("content__thumbs", layout.thumbs_frame(vp)));
    for (i, src) in def.thumbs.iter().enumerate() {
        let left = i as f64 * (THUMB_SIZE + 8.0);
        doc.append(
            thumbs,
            NodeSpec::new("content__thumbs-item", Rect::new(left, 0.0, left + THUMB_SIZE, THUMB_SIZE))
                .background_image(src.as_str()),
        );
    }
}

/// Re-derive every viewport-relative frame of a bound content view.
///
/// Body text lines are left alone; their splitter re-breaks them.
pub fn relayout_content(
    doc: &mut Document,
    content: &ContentHandles,
    layout: &ContentLayout,
    vp: Viewport,
    metrics: &TextMetrics,
) {
    let lh = metrics.line_height;
    let col = layout.column_width(vp);
    let title_count = content.title_lines.len();

    doc.node_mut(content.root).frame = vp.rect();
    doc.node_mut(content.image_slot).frame = layout.image_frame(vp);
    doc.node_mut(content.title).frame = layout.title_frame(vp, metrics, title_count);
    for (i, &inner) in content.title_lines.iter().enumerate() {
        if let Some(oh) = doc.parent(inner) {
            doc.node_mut(oh).frame = line_frame(i, col, lh);
        }
        doc.node_mut(inner).frame = Rect::new(0.0, 0.0, col, lh);
    }
    if let Some(meta) = doc.parent(content.meta_line) {
        doc.node_mut(meta).frame = layout.meta_frame(vp, metrics, title_count);
    }
    doc.node_mut(content.meta_line).frame = Rect::new(0.0, 0.0, col, lh);
    doc.node_mut(content.body_text).frame = layout.text_frame(vp, metrics);
    doc.node_mut(content.thumbs_strip).frame = layout.thumbs_frame(vp);
}

#[cfg(test)]
#[path = "../tests/unit/page.rs"]
mod tests;
