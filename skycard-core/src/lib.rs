//! Core library for the `skycard` CLI.
//!
//! This crate defines:
//! - The weather record model and the weather-code condition table
//! - The provider abstraction and its Open-Meteo implementation
//! - The lookup session state machine
//! - Configuration handling
//!
//! It is used by `skycard-cli`, but can also be reused by other front ends.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod session;

pub use config::Config;
pub use error::LookupError;
pub use model::{Condition, Place, WeatherRecord, classify};
pub use provider::{WeatherProvider, lookup, provider_from_config};
pub use session::{Notification, Session, SessionState, Submission};
