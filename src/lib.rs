//! tti: trading technical indicators over daily OHLCV series.
//!
//! The crate has two cores: an indicator framework with a catalog of
//! concrete indicators in [`indicators`], and an active trading simulator
//! in [`simulation`] that consumes per-day buy/hold/sell signals. Shared
//! numeric kernels live in [`kernels`]; [`registry`] builds any catalog
//! indicator by name from a typed parameter bag.

pub mod error;
pub mod frame;
pub mod preprocess;
pub mod kernels;
pub mod signal;
pub mod graph;
pub mod indicator;
pub mod simulation;
pub mod indicators;
pub mod registry;

pub use error::TtiError;
pub use frame::Frame;
pub use graph::GraphSpec;
pub use indicator::{Indicator, IndicatorProperties};
pub use signal::Signal;
pub use simulation::{
    SimulationLedger, SimulationOutcome, SimulationStatistics, TradingSimulator,
};
