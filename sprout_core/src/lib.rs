#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation
)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Sensor polling and trend estimation (hardware-agnostic).
//!
//! All hardware interactions go through the traits in `sprout_traits`.
//!
//! ## Architecture
//!
//! - **Scheduling**: `PollScheduler` gates acquisitions on a wrapping
//!   millisecond clock (`scheduler` module)
//! - **Trend**: `TrendTracker` keeps a bounded FIFO window and its OLS line
//!   (`trend` module)
//! - **Composition**: `SensorChannel` owns a driver, its scheduler, and an
//!   optional trend window (`channel` module)
//! - **Configuration**: runtime `ChannelCfg` plus conversions from
//!   `sprout_config`

pub mod channel;
pub mod config;
pub mod conversions;
pub mod error;
pub mod hw_error;
pub mod mocks;
pub mod scheduler;
pub mod trend;
pub mod util;

pub use channel::SensorChannel;
pub use config::ChannelCfg;
pub use error::{Report, Result, SensorError, TrendError};
pub use scheduler::PollScheduler;
pub use trend::{DEFAULT_CAPACITY, LinearFit, TrendTracker};
