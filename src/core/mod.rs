pub mod resolver;

pub use crate::domain::model::{
    field, AddressLookupResult, AutofillOutcome, ExactLookupResponse, LookupEndpoint,
    NoOpReason, SearchResponse, StalePolicy,
};
pub use crate::domain::ports::{ClassList, ConfigProvider, DirectoryClient, Document, FormPort};
pub use crate::utils::error::Result;
