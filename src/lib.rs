//! Personal workout log: sessions of exercises with recorded sets, training
//! volume per exercise/session, and a JSON document that survives restarts.

pub mod config;
pub mod error;
pub mod models;
pub mod series;
pub mod store;
pub mod tracker;

pub use error::{LogError, Result};
pub use models::{Category, Exercise, Session, SessionHandle, SetEntry, SetInput, TrainingHistory};
pub use series::{SeriesOrder, TableRow, VolumePoint};
pub use store::JsonStore;
pub use tracker::Tracker;
