//! Geometry probe over the terminal layout
//!
//! Terminal cells are roughly twice as tall as they are wide. Layout space
//! therefore counts one unit per column and two units per row, so a
//! deflection radius covers the same visual distance in every direction.

use std::collections::HashMap;

use glidepath_core::{ElementId, GeometryProbe, Point, Rect};
use ratatui::layout::Rect as CellRect;

/// Layout units per terminal row
pub const ROW_UNITS: f64 = 2.0;

/// Center of a terminal cell in layout units
pub fn cell_center(column: u16, row: u16) -> Point {
    Point::new(column as f64 + 0.5, (row as f64 + 0.5) * ROW_UNITS)
}

/// Layout-space bounds of a cell rectangle
pub fn rect_from_cells(area: CellRect) -> Rect {
    Rect::new(
        area.x as f64,
        area.y as f64 * ROW_UNITS,
        area.width as f64,
        area.height as f64 * ROW_UNITS,
    )
}

/// Element bounds recorded while drawing the last frame
#[derive(Debug, Clone, Default)]
pub struct LayoutProbe {
    areas: HashMap<ElementId, CellRect>,
}

impl LayoutProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record where `element` was laid out
    pub fn place(&mut self, element: &str, area: CellRect) {
        match self.areas.get_mut(element) {
            Some(existing) => *existing = area,
            None => {
                self.areas.insert(element.to_string(), area);
            }
        }
    }

    /// Forget an element that is no longer drawn
    pub fn remove(&mut self, element: &str) {
        self.areas.remove(element);
    }

    pub fn area_of(&self, element: &str) -> Option<CellRect> {
        self.areas.get(element).copied()
    }
}

impl GeometryProbe for LayoutProbe {
    fn measure(&self, element: &str) -> Option<Rect> {
        self.areas.get(element).map(|area| rect_from_cells(*area))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_center_inside_cell_rect() {
        let point = cell_center(10, 4);
        assert_eq!(point, Point::new(10.5, 9.0));

        let rect = rect_from_cells(CellRect::new(10, 4, 1, 1));
        assert_eq!(rect.center(), point);
    }

    #[test]
    fn test_measure_scales_rows() {
        let mut probe = LayoutProbe::new();
        probe.place("eye", CellRect::new(4, 2, 10, 5));
        let rect = probe.measure("eye").unwrap();
        assert_eq!(rect, Rect::new(4.0, 4.0, 10.0, 10.0));
        assert_eq!(rect.center(), Point::new(9.0, 9.0));

        probe.place("eye", CellRect::new(0, 0, 2, 1));
        assert_eq!(probe.area_of("eye"), Some(CellRect::new(0, 0, 2, 1)));
        probe.remove("eye");
        assert!(probe.measure("eye").is_none());
    }
}
