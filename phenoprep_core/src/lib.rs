#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Quality control and gap filling for vegetation-index time series.
//!
//! Turns a raw, noisy, gappy series with per-sample quality weights into a
//! fully populated series plus a robust value range, ready for curve fitting.
//!
//! ## Architecture
//!
//! - **Input**: `InputSeries`, built and validated through a type-state
//!   builder (`builder` module)
//! - **Configuration**: `PreprocessCfg` (`config` module); TOML loading lives
//!   in `phenoprep_config` and converts via `From` (`conversions`, feature
//!   `config`)
//! - **Stages**: range estimation (`range`), reclassification (`reclassify`),
//!   spike masking (`spike`), weight floor and gap fill (`gapfill`)
//! - **Driver**: `check_input` (`pipeline` module)
//! - **Post-fit guard**: `check_ylu` (`clamp` module)
//!
//! ## Quick start
//!
//! ```
//! use phenoprep_core::{InputSeries, PreprocessCfg, check_input};
//!
//! let input = InputSeries::builder()
//!     .with_t([0.0, 16.0, 32.0, 48.0, 64.0, 80.0])
//!     .with_y([Some(0.3), Some(0.4), None, Some(0.6), Some(0.5), Some(0.4)])
//!     .build()?;
//! let out = check_input(&input, &PreprocessCfg::default())?;
//! assert!(out.y.iter().all(|v| v.is_finite()));
//! # Ok::<(), phenoprep_core::Report>(())
//! ```

pub mod builder;
pub mod clamp;
pub mod config;
#[cfg(feature = "config")]
pub mod conversions;
pub mod error;
pub mod gapfill;
pub mod pipeline;
pub mod range;
pub mod reclassify;
pub mod series;
pub mod spike;
pub mod util;

pub use crate::builder::{InputSeriesBuilder, Missing, Set};
pub use crate::clamp::check_ylu;
pub use crate::config::PreprocessCfg;
pub use crate::error::{BuildError, PreprocessError, Report, Result};
pub use crate::pipeline::{check_input, infer_nptperyear};
pub use crate::series::{InputSeries, PreprocessStats, TimeSeries, ValueRange};
