use crate::animation::ease::Ease;
use crate::animation::timeline::Timeline;
use crate::animation::tween::{Props, Tween, TweenDefaults};
use crate::dom::document::Document;
use crate::foundation::core::Origin;
use crate::item::Item;
use crate::scroll::trigger::ScrollTrigger;

pub const TITLE_TRAVEL_Y_PERCENT: f64 = -100.0;
pub const IMAGE_INNER_MAX_SCALE_Y: f64 = 1.8;

/// Per-item scroll-scrubbed parallax: title drift and image stretch.
#[derive(Debug)]
pub struct ScrollLinked {
    triggers: Vec<ScrollTrigger>,
}

impl ScrollLinked {
    #[tracing::instrument(skip_all, fields(items = items.len()))]
    pub fn install(doc: &mut Document, items: &[Item]) -> Self {
        let triggers = items
            .iter()
            .map(|item| {
                let inner = item.preview.image_inner;
                doc.style_mut(inner).origin = Origin::TOP_CENTER;
                let base_scale_y = doc.style(inner).scale_y;

                let mut tl = Timeline::new(TweenDefaults {
                    duration: 1.0,
                    ease: Ease::Linear,
                });
                tl.add(
                    Tween::from_to(
                        vec![item.preview.title],
                        Props::new().y_percent(0.0),
                        Props::new().y_percent(TITLE_TRAVEL_Y_PERCENT),
                    ),
                    0.0,
                );
                tl.add(
                    Tween::from_to(
                        vec![inner],
                        Props::new().scale_y(base_scale_y),
                        Props::new().scale_y(IMAGE_INNER_MAX_SCALE_Y),
                    ),
                    0.0,
                );

                let mut st = ScrollTrigger::new(doc, item.preview.root, tl);
                st.update(doc);
                st
            })
            .collect();
        Self { triggers }
    }

    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }

    pub fn trigger(&self, index: usize) -> Option<&ScrollTrigger> {
        self.triggers.get(index)
    }

    /// Frame hook: scrub every enabled trigger to the current scroll position.
    pub fn update(&mut self, doc: &mut Document) {
        for st in &mut self.triggers {
            st.update(doc);
        }
    }

    /// Re-measure trigger ranges after layout changed.
    pub fn refresh(&mut self, doc: &mut Document) {
        for st in &mut self.triggers {
            st.refresh(doc);
            st.update(doc);
        }
    }

    pub fn pause(&mut self, index: usize) {
        if let Some(st) = self.triggers.get_mut(index) {
            st.disable();
        }
    }

    pub fn resume(&mut self, doc: &mut Document, index: usize) {
        if let Some(st) = self.triggers.get_mut(index) {
            st.enable(doc);
        }
    }

    pub fn is_paused(&self, index: usize) -> bool {
        self.triggers.get(index).is_some_and(|st| !st.is_enabled())
    }
}

#[cfg(test)]
#[path = "../tests/unit/parallax.rs"]
mod tests;
