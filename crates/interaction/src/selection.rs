//! Selection state and aggregate bounds.

use std::collections::HashSet;

use board_core::{Bounds, Element, ElementId};

/// The minimal axis-aligned rectangle enclosing a set of elements.
///
/// Returns `None` for an empty selection. Always recomputed from live
/// element state; callers must not cache the result across a gesture.
pub fn aggregate_bounds<'a, I>(elements: I) -> Option<Bounds>
where
    I: IntoIterator<Item = &'a Element>,
{
    let mut iter = elements.into_iter();
    let first = iter.next()?;

    let mut min = first.position;
    let mut max = first.position + first.size;
    for element in iter {
        min = min.min(element.position);
        max = max.max(element.position + element.size);
    }

    Some(Bounds::new(min, max))
}

/// The set of currently selected element ids.
#[derive(Clone, Debug, Default)]
pub struct Selection {
    ids: HashSet<ElementId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_selected(&self, id: ElementId) -> bool {
        self.ids.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn ids(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.ids.iter().copied()
    }

    /// Applies click-to-select semantics.
    ///
    /// With the multi-select modifier the clicked element toggles in and
    /// out of the selection. Without it, clicking an unselected element
    /// replaces the whole selection; clicking an already-selected element
    /// preserves the multi-selection so a group drag can start from it.
    pub fn click(&mut self, id: ElementId, multi: bool) {
        if multi {
            if !self.ids.remove(&id) {
                self.ids.insert(id);
            }
        } else if !self.ids.contains(&id) {
            self.ids.clear();
            self.ids.insert(id);
        }
    }

    /// Replaces the selection wholesale (marquee commit).
    pub fn replace_with(&mut self, ids: impl IntoIterator<Item = ElementId>) {
        self.ids = ids.into_iter().collect();
    }

    pub fn remove(&mut self, id: ElementId) {
        self.ids.remove(&id);
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Filters an element list down to the selected members, preserving the
    /// list's order.
    pub fn members<'a>(&self, elements: &'a [Element]) -> Vec<&'a Element> {
        elements
            .iter()
            .filter(|element| self.ids.contains(&element.id))
            .collect()
    }
}
