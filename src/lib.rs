//! Vitrine is a headless engine for expand-preview portfolio pages.
//!
//! A page is a grid of previews, each paired with a fullscreen content view. Clicking a
//! preview moves its image into the content view with a shared-element transition while
//! neighbouring previews slide away and text reveals line by line; the back control plays
//! the reverse. Around that sit a damped smooth-scroll engine and scroll-linked parallax.
//!
//! The usual flow:
//!
//! - Load a [`PageConfig`] and build a [`Page`]
//! - [`bootstrap`] it with a [`Preloader`] to get a [`Showcase`]
//! - Feed it [`PageEvent`]s and advance it with [`Showcase::tick`]
#![forbid(unsafe_code)]

pub mod animation;
pub mod controller;
pub mod dom;
pub mod foundation;
pub mod item;
pub mod page;
pub mod parallax;
pub mod preload;
pub mod scroll;
pub mod showcase;
pub mod text;

pub use crate::animation::ease::Ease;
pub use crate::animation::flip::{FlipOpts, FlipState};
pub use crate::animation::stage::Stage;
pub use crate::animation::timeline::{Position, Timeline};
pub use crate::animation::tween::{Props, Stagger, Tween, TweenDefaults};
pub use crate::controller::{Cue, TransitionController, TransitionState};
pub use crate::dom::document::Document;
pub use crate::dom::node::{NodeId, NodeSpec, Style};
pub use crate::foundation::core::{Affine, Origin, Point, Rect, Vec2, Viewport};
pub use crate::foundation::error::{VitrineError, VitrineResult};
pub use crate::item::Item;
pub use crate::page::{Page, PageConfig};
pub use crate::preload::{FsPreloader, ImageInfo, Preloader};
pub use crate::scroll::smooth::{ScrollEvent, SmoothScroll, SmoothScrollConfig};
pub use crate::showcase::{Bootstrap, PageEvent, Showcase, ShowcaseOptions, bootstrap};
pub use crate::text::split::LineSplitter;
pub use crate::text::wrap::TextMetrics;

#[cfg(test)]
#[path = "../tests/unit/support.rs"]
pub(crate) mod test_support;
