//! egui widgets for the chart viewer.

pub mod panels;
pub mod plot;
