//! Retained list of everything drawn in a frame.
//!
//! The scene is rebuilt into a [`DisplayList`] on every redraw. Items live in
//! numbered layers (lower layers are painted first) and may carry a tag so
//! pointer hit-tests can be resolved back to whatever produced the shape.

use std::collections::BTreeMap;

use glam::DVec2;

use crate::canvas::Canvas;
use crate::shape::Shape;

/// Paint order bucket; higher layers are drawn on top.
pub type Layer = u8;

#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem<T> {
    pub shape: Shape,
    pub opacity: f32,
    pub tag: Option<T>,
}

/// Result of a hit-test: the topmost tagged item under the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit<'a, T> {
    pub layer: Layer,
    pub shape: &'a Shape,
    pub tag: T,
}

#[derive(Debug, Clone)]
pub struct DisplayList<T> {
    layers: BTreeMap<Layer, Vec<DrawItem<T>>>,
}

impl<T> Default for DisplayList<T> {
    fn default() -> Self {
        Self {
            layers: BTreeMap::new(),
        }
    }
}

impl<T: Copy> DisplayList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.layers.clear();
    }

    /// Drop only one layer's contents (e.g. a static overlay being redrawn).
    pub fn clear_layer(&mut self, layer: Layer) {
        self.layers.remove(&layer);
    }

    /// Add a purely visual shape.
    pub fn push(&mut self, layer: Layer, shape: Shape, opacity: f32) {
        self.push_item(layer, shape, opacity, None);
    }

    /// Add a shape that takes part in hit-testing.
    pub fn push_tagged(&mut self, layer: Layer, shape: Shape, opacity: f32, tag: T) {
        self.push_item(layer, shape, opacity, Some(tag));
    }

    fn push_item(&mut self, layer: Layer, shape: Shape, opacity: f32, tag: Option<T>) {
        self.layers.entry(layer).or_default().push(DrawItem {
            shape,
            opacity: opacity.clamp(0.0, 1.0),
            tag,
        });
    }

    pub fn len(&self) -> usize {
        self.layers.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Items in paint order.
    pub fn iter(&self) -> impl Iterator<Item = (Layer, &DrawItem<T>)> {
        self.layers
            .iter()
            .flat_map(|(layer, items)| items.iter().map(move |item| (*layer, item)))
    }

    /// Tags in paint order.
    pub fn tags(&self) -> impl Iterator<Item = T> + '_ {
        self.iter().filter_map(|(_, item)| item.tag)
    }

    /// Topmost tagged, visible item touching `point` within `tolerance` px.
    pub fn hit_test(&self, point: DVec2, tolerance: f64) -> Option<Hit<'_, T>> {
        self.layers.iter().rev().find_map(|(layer, items)| {
            items.iter().rev().find_map(|item| {
                let tag = item.tag?;
                (item.opacity > 0.0 && item.shape.hit(point, tolerance)).then_some(Hit {
                    layer: *layer,
                    shape: &item.shape,
                    tag,
                })
            })
        })
    }

    /// Paint every item, bottom layer first, onto a backend.
    pub fn replay<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        canvas.begin_frame();
        for (_, item) in self.iter() {
            canvas.draw_shape(&item.shape, item.opacity);
        }
        canvas.end_frame();
    }
}
