//! chartflow: layout negotiation and animated transitions for 2-D charts.
//!
//! The crate maps numeric series onto a bounded surface, negotiates the
//! space axes and chart layers need, tracks scroll and zoom, and interpolates
//! per-entry geometry between two data snapshots. Rasterization and text
//! shaping stay with the host behind the `Renderer` and `TextMeasurer` seams.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartEngine, ChartEngineConfig};
pub use error::{ChartError, ChartResult};
