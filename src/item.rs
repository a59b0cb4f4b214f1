use crate::dom::document::Document;
use crate::dom::node::NodeId;
use crate::foundation::core::Rect;
use crate::foundation::error::{VitrineError, VitrineResult};
use crate::text::split::LineSplitter;
use crate::text::wrap::TextMetrics;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreviewHandles {
    pub root: NodeId,
    pub image_wrap: NodeId,
    pub image: NodeId,
    pub image_inner: NodeId,
    pub title: NodeId,
    pub title_lines: Vec<NodeId>,
    pub description: NodeId,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentHandles {
    pub root: NodeId,
    /// Placeholder whose frame is where the shared image lands.
    pub image_slot: NodeId,
    pub title: NodeId,
    pub title_lines: Vec<NodeId>,
    pub meta_line: NodeId,
    pub thumbs_strip: NodeId,
    pub thumbs: Vec<NodeId>,
    pub body_text: NodeId,
}

/// One preview/content pair and the state an expansion borrows from it.
#[derive(Clone, Debug)]
pub struct Item {
    pub index: usize,
    pub preview: PreviewHandles,
    pub content: ContentHandles,
    pub body_reveal: LineSplitter,
    /// Image frame inside the preview wrapper, restored on collapse.
    pub image_frame: Rect,
    /// Indices of previews dismissed by the current expansion.
    pub adjacent: Option<Vec<usize>>,
    pub cached_image_inner_scale_y: Option<f64>,
}

fn required(doc: &Document, scope: NodeId, selector: &str, index: usize) -> VitrineResult<NodeId> {
    doc.query(scope, selector)?.ok_or_else(|| {
        VitrineError::structure(format!("item {index}: missing '{selector}'"))
    })
}

impl Item {
    pub fn new(
        doc: &mut Document,
        index: usize,
        preview_root: NodeId,
        content_root: NodeId,
        metrics: TextMetrics,
    ) -> VitrineResult<Self> {
        let image_wrap = required(doc, preview_root, ".preview__img-wrap", index)?;
        let image = required(doc, image_wrap, ".preview__img", index)?;
        let preview = PreviewHandles {
            root: preview_root,
            image_wrap,
            image,
            image_inner: required(doc, image, ".preview__img-inner", index)?,
            title: required(doc, preview_root, ".preview__title", index)?,
            title_lines: doc.query_all(preview_root, ".preview__title .oh__inner")?,
            description: required(doc, preview_root, ".preview__desc", index)?,
        };

        let body_text = required(doc, content_root, ".content__text", index)?;
        let content = ContentHandles {
            root: content_root,
            image_slot: required(doc, content_root, ".content__img-slot", index)?,
            title: required(doc, content_root, ".content__title", index)?,
            title_lines: doc.query_all(content_root, ".content__title .oh__inner")?,
            meta_line: required(doc, content_root, ".content__meta > .oh__inner", index)?,
            thumbs_strip: required(doc, content_root, ".content__thumbs", index)?,
            thumbs: doc.query_all(content_root, ".content__thumbs-item")?,
            body_text,
        };

        let image_frame = doc.node(image).frame;
        let body_reveal = LineSplitter::new(doc, body_text, metrics);
        Ok(Self {
            index,
            preview,
            content,
            body_reveal,
            image_frame,
            adjacent: None,
            cached_image_inner_scale_y: None,
        })
    }

    /// Frame the shared image takes inside the content root.
    pub fn content_image_frame(&self, doc: &Document) -> Rect {
        doc.node(self.content.image_slot).frame
    }
}

/// Pair every `.preview` with the `.content` at the same position.
pub fn bind_items(doc: &mut Document, metrics: TextMetrics) -> VitrineResult<Vec<Item>> {
    let body = doc.body();
    let previews = doc.query_all(body, ".preview")?;
    let contents = doc.query_all(body, ".content")?;
    if previews.len() != contents.len() {
        return Err(VitrineError::structure(format!(
            "{} previews but {} content blocks",
            previews.len(),
            contents.len()
        )));
    }
    previews
        .into_iter()
        .zip(contents)
        .enumerate()
        .map(|(i, (p, c))| Item::new(doc, i, p, c, metrics))
        .collect()
}

#[cfg(test)]
#[path = "../tests/unit/item.rs"]
mod tests;
