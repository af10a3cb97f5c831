//! Waypoint storage module

use crate::data::grid::GridReference;
use geo::Point;

/// A named point entered as an MGRS grid reference
#[derive(Clone, Debug, PartialEq)]
pub struct Waypoint {
    name: String,
    /// WGS84 position, x = longitude, y = latitude
    position: Point<f64>,
    /// The grid reference exactly as it was accepted
    grid_reference: String,
}

impl Waypoint {
    /// Create a waypoint from an already converted grid reference
    pub fn new(name: impl Into<String>, grid: &GridReference, position: Point<f64>) -> Self {
        Self {
            name: name.into(),
            position,
            grid_reference: grid.as_str().to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn grid_reference(&self) -> &str {
        &self.grid_reference
    }

    pub fn position(&self) -> Point<f64> {
        self.position
    }

    pub fn latitude(&self) -> f64 {
        self.position.y()
    }

    pub fn longitude(&self) -> f64 {
        self.position.x()
    }

    /// Text shown for this waypoint in the list
    pub fn label(&self) -> String {
        format!("{}: {}", self.name, self.grid_reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_waypoint_keeps_grid_reference_verbatim() {
        let grid = GridReference::parse("33twn 00000 00000").unwrap();
        let waypoint = Waypoint::new("Base", &grid, Point::new(15.0, 46.95));

        assert_eq!(waypoint.name(), "Base");
        assert_eq!(waypoint.grid_reference(), "33TWN 00000 00000");
        assert_eq!(waypoint.latitude(), 46.95);
        assert_eq!(waypoint.longitude(), 15.0);
        assert_eq!(waypoint.label(), "Base: 33TWN 00000 00000");
    }
}
