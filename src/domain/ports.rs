use crate::domain::model::{LookupEndpoint, SearchResponse, StalePolicy};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Remote directory resolving a pincode to address components.
#[async_trait]
pub trait DirectoryClient: Send + Sync {
    async fn search(&self, term: &str) -> Result<SearchResponse>;
}

#[async_trait]
impl<T: DirectoryClient + ?Sized> DirectoryClient for Arc<T> {
    async fn search(&self, term: &str) -> Result<SearchResponse> {
        (**self).search(term).await
    }
}

/// Read/write access to the page's form inputs, keyed by element id.
pub trait FormPort: Send + Sync {
    fn read_field(&self, id: &str) -> Option<String>;

    fn write_field(&self, id: &str, value: &str) -> Result<()>;

    /// Writes several fields as one update. Implementations that can fail
    /// half-way should check every target before touching any of them.
    fn write_fields(&self, values: &[(&str, &str)]) -> Result<()> {
        for (id, value) in values {
            self.write_field(id, value)?;
        }
        Ok(())
    }
}

impl<T: FormPort + ?Sized> FormPort for Arc<T> {
    fn read_field(&self, id: &str) -> Option<String> {
        (**self).read_field(id)
    }

    fn write_field(&self, id: &str, value: &str) -> Result<()> {
        (**self).write_field(id, value)
    }

    fn write_fields(&self, values: &[(&str, &str)]) -> Result<()> {
        (**self).write_fields(values)
    }
}

/// An element's CSS class list.
pub trait ClassList: Send + Sync {
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);
    /// Returns whether the class is present afterwards.
    fn toggle_class(&self, class: &str) -> bool;
    fn has_class(&self, class: &str) -> bool;
}

/// Element lookup by id.
pub trait Document: Send + Sync {
    fn element(&self, id: &str) -> Option<Arc<dyn ClassList>>;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn endpoint(&self) -> LookupEndpoint;
    fn min_length(&self) -> usize;
    fn stale_policy(&self) -> StalePolicy;
    fn timeout_seconds(&self) -> Option<u64>;
    fn session_cookie(&self) -> Option<&str>;
    fn headers(&self) -> Vec<(&str, &str)>;
    fn flash_dismiss_after(&self) -> Duration;
}
