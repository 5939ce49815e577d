pub mod config;
pub mod error;
pub mod generator;
pub mod logging;
pub mod params;
pub mod purchase;
pub mod reconcile;
pub mod render;
pub mod rng;
pub mod sample;
pub mod schedule;
pub mod sweep;

pub use error::{Error, ValidationError};
pub use generator::{generate, Generator};
pub use params::{GenerationParameters, RawParameters, MIN_FILL};
pub use purchase::{PurchaseLog, PurchaseRecord};
pub use reconcile::{ReconcileSettings, Redistribution};
pub use rng::{PcgSource, RandomSource};
