//! Core of The Hang List: session catalog loading, level selection and the
//! countdown-then-hang timer, independent of the Yew view layer.

pub mod catalog;
pub mod config;
pub mod logger;
pub mod selector;
pub mod ticker;
pub mod timer;
pub mod utils;

pub use catalog::{CatalogError, CatalogSource, HttpCatalogSource, SessionCatalog, SessionRecord};
pub use selector::Level;
pub use timer::{Action, Phase, Session, TimerState};
