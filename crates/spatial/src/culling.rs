//! Viewport culling: maps the host's element set plus a viewport to the
//! subset of elements worth handing to the renderer.
//!
//! The index is rebuilt wholesale whenever the element set changes. Single
//! element updates also rebuild, which is O(n) per call; that is an
//! accepted ceiling for low-thousands of elements, not a defect to paper
//! over with incremental deletion.

use std::collections::HashMap;

use board_core::{Bounds, Element, ElementId, Viewport};

use crate::quadtree::{QuadTree, QuadTreeConfig};

/// Diagnostic counters for an optional performance overlay.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PerformanceStats {
    /// Elements currently known to the culling layer
    pub total_elements: usize,
    /// Items currently indexed in the quadtree
    pub indexed_items: usize,
    /// Rough index memory footprint in bytes
    pub estimated_memory_bytes: usize,
}

/// Spatial culling façade over the quadtree.
pub struct ViewportCulling {
    tree: QuadTree<ElementId>,
    /// Side cache used for single-item operations and visibility checks
    elements: HashMap<ElementId, Element>,
}

impl ViewportCulling {
    pub fn new() -> Self {
        Self::with_config(QuadTreeConfig::default())
    }

    pub fn with_config(config: QuadTreeConfig) -> Self {
        Self {
            tree: QuadTree::with_config(Bounds::zero(), config),
            elements: HashMap::new(),
        }
    }

    /// Replaces the indexed element set and rebuilds the quadtree.
    pub fn update_elements(&mut self, elements: &[Element]) {
        self.elements = elements
            .iter()
            .map(|element| (element.id, element.clone()))
            .collect();
        self.rebuild();
        log::debug!("culling index rebuilt with {} elements", self.elements.len());
    }

    /// Updates or inserts a single element, then rebuilds from the cache.
    pub fn update_element(&mut self, element: Element) {
        self.elements.insert(element.id, element);
        self.rebuild();
    }

    /// Removes a single element, then rebuilds from the cache.
    pub fn remove_element(&mut self, id: ElementId) {
        if self.elements.remove(&id).is_some() {
            self.rebuild();
        }
    }

    /// The elements intersecting the margin-expanded, zoom-scaled viewport
    /// rectangle, in no particular order. Z-ordering is the renderer's job.
    pub fn visible_elements(&self, viewport: &Viewport) -> Vec<Element> {
        let query = viewport.query_bounds();
        self.tree
            .retrieve(&query)
            .into_iter()
            .filter_map(|id| self.elements.get(&id).cloned())
            .collect()
    }

    /// Whether an element intersects the un-expanded viewport rectangle.
    ///
    /// No margin is applied here; touching the boundary counts as visible.
    /// Unknown ids are reported as not visible.
    pub fn is_element_visible(&self, id: ElementId, viewport: &Viewport) -> bool {
        self.elements
            .get(&id)
            .map_or(false, |element| {
                element.bounds().intersects(&viewport.world_bounds())
            })
    }

    pub fn stats(&self) -> PerformanceStats {
        let per_element = std::mem::size_of::<Element>()
            + std::mem::size_of::<(ElementId, Bounds)>();
        PerformanceStats {
            total_elements: self.elements.len(),
            indexed_items: self.tree.total_item_count(),
            estimated_memory_bytes: self.elements.len() * per_element,
        }
    }

    fn rebuild(&mut self) {
        let items: Vec<(ElementId, Bounds)> = self
            .elements
            .values()
            .map(|element| (element.id, element.bounds()))
            .collect();
        self.tree.rebuild(&items);
    }
}

impl Default for ViewportCulling {
    fn default() -> Self {
        Self::new()
    }
}
