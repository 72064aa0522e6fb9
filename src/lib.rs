//! Cuts a TESS light curve into one window per predicted transit.
//!
//! Given a period, reference epoch and transit duration, every expected
//! occurrence gets a window of `±half_width_factor × duration` around its
//! predicted center. Each window is plotted, and written to
//! `Transit_<index>_<input name>` when it holds more than `min_points` rows.

pub mod config;
pub mod data_access;
pub mod error;
pub mod pipeline;
pub mod plotting;
pub mod statistical_methods;
pub mod windowing;

pub use config::Config;
pub use data_access::LightCurve;
pub use error::{Result, SeparatorError};
pub use windowing::{Ephemeris, TransitWindow, WindowOutcome};
