//! egui window, its controller and the UI state they share.
pub mod controller;
pub mod state;
pub mod ui;
