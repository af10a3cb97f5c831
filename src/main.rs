#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

// === Entry point for desktop ===
#[tokio::main(flavor = "multi_thread")]
async fn main() -> eframe::Result {
    mgrs_waypoints::run_native()
}
