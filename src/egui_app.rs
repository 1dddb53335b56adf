//! egui front end for the prediction view.

pub mod controller;
pub mod state;
pub mod ui;
pub mod view_model;
