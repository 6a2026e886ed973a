pub mod calendar;
pub mod config;
pub mod country;
pub mod error;
pub mod treasury;
pub mod types;

pub use calendar::GameDate;
pub use config::ConflictConfig;
pub use country::{CountryProfile, CountryRegistry};
pub use error::{ConflictError, Result};
pub use treasury::{Ledger, Treasury};
