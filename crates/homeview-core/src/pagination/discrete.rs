use super::PaginationIndicator;
use crate::surface::{scroll_to_item, DisplaySurface};

/// One marker per item, exactly one of them active
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscretePagination {
    markers: Vec<bool>,
}

impl DiscretePagination {
    pub fn new(count: usize) -> Self {
        let mut markers = vec![false; count];
        if let Some(first) = markers.first_mut() {
            *first = true;
        }
        Self { markers }
    }

    /// Mark `index` (clamped) active and clear every other marker
    pub fn set_active(&mut self, index: usize) {
        let Some(last) = self.markers.len().checked_sub(1) else {
            return;
        };
        let index = index.min(last);
        for (i, marker) in self.markers.iter_mut().enumerate() {
            *marker = i == index;
        }
    }

    pub fn active(&self) -> usize {
        self.markers.iter().position(|m| *m).unwrap_or(0)
    }

    pub fn markers(&self) -> &[bool] {
        &self.markers
    }
}

impl PaginationIndicator for DiscretePagination {
    fn marker_count(&self) -> usize {
        self.markers.len()
    }

    fn render(&mut self, position: f64) {
        let index = if position.is_finite() {
            position.round().max(0.0) as usize
        } else {
            0
        };
        self.set_active(index);
    }

    fn handle_click(&self, marker: usize, surface: &mut dyn DisplaySurface) {
        if marker < self.markers.len() {
            scroll_to_item(surface, marker);
        }
    }
}
