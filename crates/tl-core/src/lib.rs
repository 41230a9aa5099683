//! tl-core: shared foundation for thermolog.
//!
//! Contains:
//! - channel (logger channel names + ADC code type)
//! - numeric (Real + tolerances + the single "missing" guard)
//! - units (uom SI types, pressure units, constants)
//! - error (shared error types)

pub mod channel;
pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use channel::{AdcCode, Channel};
pub use error::TlError;
pub use numeric::*;
pub use units::*;
