pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod ui;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::TomlConfig;

pub use crate::adapters::{HttpDirectoryClient, InMemoryForm};
pub use crate::core::resolver::AddressAutofillResolver;
pub use crate::domain::model::{AddressLookupResult, AutofillOutcome, LookupEndpoint, StalePolicy};
pub use crate::utils::error::{AutofillError, Result};
