//! MGRS Waypoints
//!
//! Desktop tool to enter named waypoints as MGRS grid references, check them
//! on a map, edit or delete them and export the list as a KMZ overlay.
//!
//! The [`data`] module holds everything that does not need a window: grid
//! reference validation, MGRS conversion, the waypoint list and the exporters.

pub mod data;

mod app;
mod entrypoints;

pub use entrypoints::run::run_native;
