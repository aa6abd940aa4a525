//! chartview: chart layout and interactive viewport engine.
//!
//! This crate provides the geometry and interaction core of a desktop
//! charting stack: a title/plot layout pass that records where every visible
//! element ended up, and a viewport controller that turns pointer and wheel
//! input into zoom/pan operations against that recorded geometry. Concrete
//! plot renderers and windowing backends plug in through the [`plot::Plot`]
//! and [`render::Renderer`] traits.

pub mod api;
pub mod chart;
pub mod core;
pub mod error;
pub mod interaction;
pub mod plot;
pub mod render;
pub mod telemetry;

pub use api::{ChartView, ChartViewConfig};
pub use error::{ChartError, ChartResult};
