//! Page-cursor iteration over a record source

use crate::error::CacheResult;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

/// One page of raw records
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub items: Vec<serde_json::Value>,
    /// Next page number reported by the server, if any
    pub next_page: Option<u32>,
}

/// Anything that can serve numbered pages of a resource
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch a single page (1-based) of `resource`
    async fn fetch_page(&self, resource: &str, page: u32) -> CacheResult<Page>;
}

/// Fetch every page of `resource` and flatten the records
///
/// Stops when the source reports no next page or after `max_pages` pages.
/// No retries: the first failed page fails the whole fetch.
pub async fn fetch_all<T>(
    source: &dyn PageSource,
    resource: &str,
    max_pages: Option<u32>,
) -> CacheResult<Vec<T>>
where
    T: DeserializeOwned,
{
    let mut records = Vec::new();
    let mut next = Some(1);
    let mut fetched = 0u32;

    while let Some(page) = next {
        if max_pages.is_some_and(|max| fetched >= max) {
            debug!("Stopping {} after {} pages", resource, fetched);
            break;
        }

        let Page { items, next_page } = source.fetch_page(resource, page).await?;
        fetched += 1;
        debug!("Fetched {} records from {} page {}", items.len(), resource, page);

        for item in items {
            records.push(serde_json::from_value(item)?);
        }

        // Guard against a server repeating the same cursor
        next = next_page.filter(|n| *n > page);
    }

    Ok(records)
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory pages keyed by resource
    #[derive(Default)]
    pub struct StaticPages {
        pages: HashMap<String, Vec<Vec<serde_json::Value>>>,
        pub requested: Mutex<Vec<(String, u32)>>,
    }

    impl StaticPages {
        pub fn with(mut self, resource: &str, pages: Vec<Vec<serde_json::Value>>) -> Self {
            self.pages.insert(resource.to_string(), pages);
            self
        }
    }

    #[async_trait]
    impl PageSource for StaticPages {
        async fn fetch_page(&self, resource: &str, page: u32) -> CacheResult<Page> {
            self.requested
                .lock()
                .unwrap()
                .push((resource.to_string(), page));

            let pages = self.pages.get(resource).cloned().unwrap_or_default();
            let index = (page - 1) as usize;
            let items = pages.get(index).cloned().unwrap_or_default();
            let next_page = (index + 1 < pages.len()).then_some(page + 1);
            Ok(Page { items, next_page })
        }
    }
}
