// Library crate: exposes testable modules for integration tests and scripting.
// GUI-specific modules (app, ui, viewport painting) remain in the binary crate.

pub mod command;
pub mod draw;
pub mod extrude;
pub mod fixtures;
pub mod harness;
pub mod map;
pub mod state;
pub mod validation;

/// Camera projection and hit-testing shared by the map and the viewport.
/// Painting and input handling stay in the binary crate.
pub mod viewport {
    pub mod camera;
    pub mod picking;
}
