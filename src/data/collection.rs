//! WaypointCollection - Ordered waypoint store and its derived list/map view

use crate::data::Waypoint;
use geo::{BoundingRect, MultiPoint, Point};

/// A map marker derived from a waypoint
#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    /// Text drawn next to the marker
    pub label: String,
    /// WGS84 position, x = longitude, y = latitude
    pub position: Point<f64>,
}

/// List rows and map markers, always rebuilt from the whole store
///
/// Row `i`, marker `i` and waypoint `i` of the collection describe the same point.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StoreView {
    pub rows: Vec<String>,
    pub markers: Vec<Marker>,
}

impl StoreView {
    fn from_waypoints(waypoints: &[Waypoint]) -> Self {
        profiling::scope!("StoreView::from_waypoints");

        Self {
            rows: waypoints.iter().map(Waypoint::label).collect(),
            markers: waypoints
                .iter()
                .map(|waypoint| Marker {
                    label: waypoint.name().to_string(),
                    position: waypoint.position(),
                })
                .collect(),
        }
    }
}

/// Ordered, in-memory list of waypoints
///
/// Insertion order is significant: list positions are used to target edits
/// and deletions. Nothing here is ever persisted.
#[derive(Debug, Default)]
pub struct WaypointCollection {
    waypoints: Vec<Waypoint>,
    view: StoreView,
}

impl WaypointCollection {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a waypoint, returning its position in the list
    pub fn push(&mut self, waypoint: Waypoint) -> usize {
        self.waypoints.push(waypoint);
        self.rebuild_view();
        self.waypoints.len() - 1
    }

    /// Remove the waypoint at `index`, shifting the following ones up
    pub fn remove(&mut self, index: usize) -> Option<Waypoint> {
        if index >= self.waypoints.len() {
            return None;
        }
        let removed = self.waypoints.remove(index);
        self.rebuild_view();
        Some(removed)
    }

    pub fn get(&self, index: usize) -> Option<&Waypoint> {
        self.waypoints.get(index)
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Derived list rows and markers
    pub fn view(&self) -> &StoreView {
        &self.view
    }

    /// Bounding box of all waypoints as (min_lat, min_lon, max_lat, max_lon)
    pub fn bounding_box_wgs84(&self) -> Option<(f64, f64, f64, f64)> {
        let points: MultiPoint<f64> = self.waypoints.iter().map(Waypoint::position).collect();
        let rect = points.bounding_rect()?;
        Some((rect.min().y, rect.min().x, rect.max().y, rect.max().x))
    }

    /// Drop the old rows and markers and derive new ones from the store
    fn rebuild_view(&mut self) {
        self.view = StoreView::from_waypoints(&self.waypoints);
        tracing::debug!("Rebuilt view with {} markers", self.view.markers.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::GridReference;

    fn create_test_waypoint(name: &str, lat: f64, lon: f64) -> Waypoint {
        let grid = GridReference::parse("33TWN0000000000").unwrap();
        Waypoint::new(name, &grid, Point::new(lon, lat))
    }

    fn create_test_collection(names: &[&str]) -> WaypointCollection {
        let mut collection = WaypointCollection::new();
        for (i, name) in names.iter().enumerate() {
            collection.push(create_test_waypoint(name, 40.0 + i as f64, 10.0 + i as f64));
        }
        collection
    }

    fn names(collection: &WaypointCollection) -> Vec<&str> {
        collection.waypoints().iter().map(Waypoint::name).collect()
    }

    #[test]
    fn test_collection_creation() {
        let collection = WaypointCollection::new();
        assert!(collection.is_empty());
        assert!(collection.view().rows.is_empty());
        assert!(collection.view().markers.is_empty());
        assert_eq!(collection.bounding_box_wgs84(), None);
    }

    #[test]
    fn test_push_keeps_view_in_lockstep() {
        let collection = create_test_collection(&["A", "B", "C"]);

        assert_eq!(collection.len(), 3);
        let view = collection.view();
        assert_eq!(view.rows.len(), 3);
        assert_eq!(view.markers.len(), 3);
        for (i, waypoint) in collection.waypoints().iter().enumerate() {
            assert_eq!(view.rows[i], waypoint.label());
            assert_eq!(view.markers[i].label, waypoint.name());
            assert_eq!(view.markers[i].position, waypoint.position());
        }
    }

    #[test]
    fn test_push_returns_index() {
        let mut collection = create_test_collection(&["A"]);
        let index = collection.push(create_test_waypoint("B", 0.0, 0.0));
        assert_eq!(index, 1);
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut collection = create_test_collection(&["A", "B", "C", "D"]);

        let removed = collection.remove(1).unwrap();
        assert_eq!(removed.name(), "B");
        assert_eq!(names(&collection), vec!["A", "C", "D"]);
        assert_eq!(collection.view().rows.len(), 3);
        assert_eq!(collection.view().markers[1].label, "C");
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut collection = create_test_collection(&["A"]);
        assert!(collection.remove(5).is_none());
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn test_bounding_box() {
        let collection = create_test_collection(&["A", "B", "C"]);
        let (min_lat, min_lon, max_lat, max_lon) = collection.bounding_box_wgs84().unwrap();
        assert_eq!((min_lat, min_lon, max_lat, max_lon), (40.0, 10.0, 42.0, 12.0));
    }

    #[test]
    fn test_duplicate_names_allowed() {
        let collection = create_test_collection(&["A", "A"]);
        assert_eq!(collection.len(), 2);
    }
}
