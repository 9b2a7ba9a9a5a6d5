//! A quadtree spatial index over axis-aligned rectangles.
//!
//! Items are stored at the deepest node whose bounds fully contain them.
//! An item straddling a quadrant boundary stays at the parent node; it is
//! never duplicated into multiple children, so membership stays exact at
//! the cost of some query locality. Removal and bulk update go through
//! `rebuild`, which sidesteps the bookkeeping of deleting a straddling
//! item from an interior node.

use board_core::Bounds;

/// Maximum number of items a node holds before subdividing
pub const DEFAULT_MAX_ITEMS: usize = 10;
/// Maximum depth of the quadtree
pub const DEFAULT_MAX_DEPTH: u32 = 5;

/// True when `inner` sits strictly inside `outer`, touching no edge.
fn strictly_contains(outer: &Bounds, inner: &Bounds) -> bool {
    inner.min.x > outer.min.x
        && inner.max.x < outer.max.x
        && inner.min.y > outer.min.y
        && inner.max.y < outer.max.y
}

/// Tuning knobs for the tree shape.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct QuadTreeConfig {
    pub max_items: usize,
    pub max_depth: u32,
}

impl Default for QuadTreeConfig {
    fn default() -> Self {
        Self {
            max_items: DEFAULT_MAX_ITEMS,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// A node in the quadtree.
#[derive(Clone)]
struct QuadTreeNode<K> {
    bounds: Bounds,
    /// Items stored at this level (straddlers, or leaves below the split
    /// threshold)
    items: Vec<(K, Bounds)>,
    /// Child nodes, created lazily on the first split
    children: Option<Box<[QuadTreeNode<K>; 4]>>,
    depth: u32,
}

impl<K: Copy> QuadTreeNode<K> {
    fn new(bounds: Bounds, depth: u32) -> Self {
        Self {
            bounds,
            items: Vec::new(),
            children: None,
            depth,
        }
    }

    fn insert(&mut self, key: K, bounds: Bounds, config: &QuadTreeConfig) {
        if let Some(children) = &mut self.children {
            if let Some(child) = children
                .iter_mut()
                .find(|child| child.bounds.contains_bounds(&bounds))
            {
                child.insert(key, bounds, config);
                return;
            }
        }

        self.items.push((key, bounds));

        if self.children.is_none()
            && self.items.len() > config.max_items
            && self.depth < config.max_depth
        {
            self.split();
        }
    }

    /// Subdivides into four equal quadrants and redistributes any item that
    /// fits entirely inside one of them. Straddlers stay here.
    fn split(&mut self) {
        let min = self.bounds.min;
        let max = self.bounds.max;
        let center = self.bounds.center();
        let depth = self.depth + 1;

        let mut children = Box::new([
            // Top left
            QuadTreeNode::new(Bounds::new(min, center), depth),
            // Top right
            QuadTreeNode::new(
                Bounds::new(glam::vec2(center.x, min.y), glam::vec2(max.x, center.y)),
                depth,
            ),
            // Bottom left
            QuadTreeNode::new(
                Bounds::new(glam::vec2(min.x, center.y), glam::vec2(center.x, max.y)),
                depth,
            ),
            // Bottom right
            QuadTreeNode::new(Bounds::new(center, max), depth),
        ]);

        let items = std::mem::take(&mut self.items);
        for (key, bounds) in items {
            match children
                .iter_mut()
                .find(|child| child.bounds.contains_bounds(&bounds))
            {
                Some(child) => child.items.push((key, bounds)),
                None => self.items.push((key, bounds)),
            }
        }

        self.children = Some(children);
    }

    fn retrieve(&self, query: &Bounds, out: &mut Vec<K>) {
        // Items held here may straddle children, so they are always tested.
        for (key, bounds) in &self.items {
            if bounds.intersects(query) {
                out.push(*key);
            }
        }

        if let Some(children) = &self.children {
            // A query strictly inside one quadrant only needs that subtree.
            // Strict containment matters: a query edge lying exactly on a
            // split seam can touch an item held in the sibling quadrant, so
            // seam-touching queries take the multi-child branch.
            if let Some(child) = children
                .iter()
                .find(|child| strictly_contains(&child.bounds, query))
            {
                child.retrieve(query, out);
            } else {
                for child in children.iter() {
                    if child.bounds.intersects(query) {
                        child.retrieve(query, out);
                    }
                }
            }
        }
    }

    fn item_count(&self) -> usize {
        let mut count = self.items.len();
        if let Some(children) = &self.children {
            for child in children.iter() {
                count += child.item_count();
            }
        }
        count
    }

    fn max_occupied_depth(&self) -> u32 {
        let mut deepest = if self.items.is_empty() { 0 } else { self.depth };
        if let Some(children) = &self.children {
            for child in children.iter() {
                deepest = deepest.max(child.max_occupied_depth());
            }
        }
        deepest
    }
}

/// A quadtree spatial index for efficient region queries.
#[derive(Clone)]
pub struct QuadTree<K> {
    root: QuadTreeNode<K>,
    config: QuadTreeConfig,
}

impl<K: Copy> QuadTree<K> {
    /// Creates an empty tree covering the given world region.
    pub fn new(bounds: Bounds) -> Self {
        Self::with_config(bounds, QuadTreeConfig::default())
    }

    pub fn with_config(bounds: Bounds, config: QuadTreeConfig) -> Self {
        Self {
            root: QuadTreeNode::new(bounds, 0),
            config,
        }
    }

    /// Inserts an item.
    ///
    /// An item outside the root bounds is kept at the root; that degrades
    /// query locality for this one item but never correctness.
    pub fn insert(&mut self, key: K, bounds: Bounds) {
        self.root.insert(key, bounds, &self.config);
    }

    /// Returns every key whose bounds intersect the query rectangle, in no
    /// particular order. Touching edges count as intersecting.
    pub fn retrieve(&self, query: &Bounds) -> Vec<K> {
        let mut out = Vec::new();
        self.root.retrieve(query, &mut out);
        out
    }

    /// Clears the tree and re-inserts every item, refitting the root to the
    /// union of the item bounds. This is the only removal/bulk-update path.
    pub fn rebuild(&mut self, items: &[(K, Bounds)]) {
        let root_bounds = items
            .iter()
            .map(|(_, bounds)| *bounds)
            .reduce(|a, b| a.union(&b))
            .unwrap_or(self.root.bounds);

        self.root = QuadTreeNode::new(root_bounds, 0);
        for (key, bounds) in items {
            self.insert(*key, *bounds);
        }
    }

    /// Removes all items, keeping the current root bounds.
    pub fn clear(&mut self) {
        self.root = QuadTreeNode::new(self.root.bounds, 0);
    }

    /// Total number of items across all nodes.
    pub fn total_item_count(&self) -> usize {
        self.root.item_count()
    }

    /// Deepest level that currently holds at least one item.
    pub fn max_occupied_depth(&self) -> u32 {
        self.root.max_occupied_depth()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec2;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Bounds {
        Bounds::from_origin_size(vec2(x, y), vec2(w, h))
    }

    #[test]
    fn test_retrieve_exact_membership() {
        let mut tree = QuadTree::new(rect(0.0, 0.0, 100.0, 100.0));
        tree.insert(1u32, rect(10.0, 10.0, 10.0, 10.0));
        tree.insert(2, rect(30.0, 30.0, 10.0, 10.0));
        tree.insert(3, rect(80.0, 80.0, 10.0, 10.0));

        // Overlapping the first two, disjoint from the third.
        let hits = tree.retrieve(&rect(0.0, 0.0, 45.0, 45.0));
        assert_eq!(hits.len(), 2);
        assert!(hits.contains(&1));
        assert!(hits.contains(&2));

        // Disjoint from everything.
        assert!(tree.retrieve(&rect(50.0, 0.0, 10.0, 10.0)).is_empty());
    }

    #[test]
    fn test_retrieve_boundary_touch_counts() {
        let mut tree = QuadTree::new(rect(0.0, 0.0, 100.0, 100.0));
        tree.insert(1u32, rect(10.0, 10.0, 10.0, 10.0));

        // Query whose left edge touches the item's right edge.
        let hits = tree.retrieve(&rect(20.0, 10.0, 10.0, 10.0));
        assert_eq!(hits, vec![1]);
    }

    #[test]
    fn test_split_keeps_straddlers_at_parent() {
        let mut tree = QuadTree::new(rect(0.0, 0.0, 100.0, 100.0));

        // One item straddling the center, plus enough quadrant-local items
        // to force a split.
        tree.insert(0u32, rect(45.0, 45.0, 10.0, 10.0));
        for i in 0..DEFAULT_MAX_ITEMS as u32 {
            tree.insert(1 + i, rect(1.0 + i as f32, 1.0, 2.0, 2.0));
        }

        // No duplication: counts stay exact after the split.
        assert_eq!(tree.total_item_count(), DEFAULT_MAX_ITEMS + 1);
        assert!(tree.max_occupied_depth() > 0);

        // The straddler is still retrievable from both sides of the seam.
        assert!(tree.retrieve(&rect(40.0, 40.0, 5.0, 5.0)).contains(&0));
        assert!(tree.retrieve(&rect(55.0, 55.0, 5.0, 5.0)).contains(&0));
    }

    #[test]
    fn test_retrieve_query_on_split_seam() {
        let mut tree = QuadTree::new(rect(0.0, 0.0, 100.0, 100.0));

        // One item just right of the vertical seam at x = 50, plus enough
        // top-left items to force a split.
        tree.insert(0u32, rect(50.0, 10.0, 10.0, 10.0));
        for i in 0..DEFAULT_MAX_ITEMS as u32 {
            tree.insert(1 + i, rect(1.0 + i as f32, 1.0, 2.0, 2.0));
        }
        assert!(tree.max_occupied_depth() > 0);

        // The query's right edge lies exactly on the seam, touching the
        // item across it; descending only into the top-left child would
        // miss it.
        let hits = tree.retrieve(&rect(40.0, 10.0, 10.0, 10.0));
        assert!(hits.contains(&0));
    }

    #[test]
    fn test_depth_limit_stops_subdivision() {
        let config = QuadTreeConfig {
            max_items: 1,
            max_depth: 2,
        };
        let mut tree = QuadTree::with_config(rect(0.0, 0.0, 128.0, 128.0), config);

        // Pile many tiny items into one corner; depth must cap at 2.
        for i in 0..50u32 {
            tree.insert(i, rect(1.0, 1.0, 0.5, 0.5));
        }
        assert_eq!(tree.total_item_count(), 50);
        assert!(tree.max_occupied_depth() <= 2);
        assert_eq!(tree.retrieve(&rect(0.0, 0.0, 4.0, 4.0)).len(), 50);
    }

    #[test]
    fn test_rebuild_count_matches_input() {
        let mut tree = QuadTree::new(rect(0.0, 0.0, 10.0, 10.0));
        let items: Vec<(u32, Bounds)> = (0..25)
            .map(|i| (i, rect(i as f32 * 20.0, 0.0, 10.0, 10.0)))
            .collect();

        tree.rebuild(&items);
        assert_eq!(tree.total_item_count(), items.len());

        // Rebuild refits the root, so far-flung items are still found.
        assert_eq!(tree.retrieve(&rect(480.0, 0.0, 10.0, 10.0)), vec![24]);

        tree.clear();
        assert_eq!(tree.total_item_count(), 0);
    }

    #[test]
    fn test_insert_outside_root_still_retrievable() {
        let mut tree = QuadTree::new(rect(0.0, 0.0, 100.0, 100.0));
        tree.insert(7u32, rect(500.0, 500.0, 10.0, 10.0));

        assert_eq!(tree.retrieve(&rect(495.0, 495.0, 20.0, 20.0)), vec![7]);
        assert_eq!(tree.total_item_count(), 1);
    }
}
