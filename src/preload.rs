//! Image preloading ahead of bootstrap.

use std::path::{Path, PathBuf};

use anyhow::Context;
use rayon::prelude::*;

use crate::dom::document::Document;
use crate::foundation::error::{VitrineError, VitrineResult};

/// Nodes whose background images must be ready before the page is interactive.
pub const PRELOAD_SELECTOR: &str = ".preview__img-inner, .content__thumbs-item";

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
}

/// Resolves image sources into loaded images.
///
/// Implementations must fail as a whole when any single source fails.
pub trait Preloader: Send + Sync {
    fn preload(&self, sources: &[String]) -> VitrineResult<Vec<ImageInfo>>;
}

/// Probes images on disk, in parallel, by decoding their headers.
#[derive(Clone, Debug)]
pub struct FsPreloader {
    root: PathBuf,
    threads: Option<usize>,
}

impl FsPreloader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            threads: None,
        }
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn probe(&self, source: &str) -> VitrineResult<ImageInfo> {
        let path = self.root.join(source);
        let (width, height) = image::image_dimensions(&path)
            .with_context(|| format!("probe image '{}'", path.display()))
            .map_err(|e| VitrineError::preload(format!("{e:#}")))?;
        Ok(ImageInfo { width, height })
    }
}

impl Preloader for FsPreloader {
    #[tracing::instrument(skip_all, fields(root = %self.root.display(), sources = sources.len()))]
    fn preload(&self, sources: &[String]) -> VitrineResult<Vec<ImageInfo>> {
        let pool = build_thread_pool(self.threads)?;
        let probed = pool.install(|| {
            sources
                .par_iter()
                .map(|s| self.probe(s))
                .collect::<Vec<_>>()
        });
        let infos = probed.into_iter().collect::<VitrineResult<Vec<_>>>()?;
        tracing::debug!(loaded = infos.len(), "images ready");
        Ok(infos)
    }
}

fn build_thread_pool(threads: Option<usize>) -> VitrineResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(VitrineError::validation("preload threads must be >= 1 when set"));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| VitrineError::preload(format!("failed to build rayon thread pool: {e}")))
}

/// Background images of every node the page waits on, in document order, deduplicated.
pub fn collect_sources(doc: &Document) -> VitrineResult<Vec<String>> {
    let mut out: Vec<String> = Vec::new();
    for id in doc.query_all(doc.root(), PRELOAD_SELECTOR)? {
        if let Some(src) = doc.node(id).background_image.as_deref()
            && !src.is_empty()
            && !out.iter().any(|s| s == src)
        {
            out.push(src.to_string());
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../tests/unit/preload.rs"]
mod tests;
