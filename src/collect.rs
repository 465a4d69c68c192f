//! Collection pipeline: fetch records, write them, index them
//!
//! Each record lands at `graph/<step>/entities/<key>.json` and gets a link at
//! `index/entities/<type>/<key>.json`. Records are stored with bounded
//! concurrency; the cache primitives themselves stay sequential.

use crate::cache::layout::{self, ObjectKind};
use crate::cache::{CacheFs, IntegrationCache};
use crate::error::{CacheError, CacheResult};
use crate::source::{fetch_all, Entity, Group, MergeRequest, PageSource, Project, Resource, User};
use futures_util::stream::{self, StreamExt};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

/// Default number of records stored at once
pub const DEFAULT_WRITE_CONCURRENCY: usize = 8;

/// Options for a collection run
#[derive(Debug, Clone)]
pub struct CollectOptions {
    /// Step name used under `graph/`
    pub step: String,
    /// Stop fetching after this many pages
    pub max_pages: Option<u32>,
    /// Records stored concurrently
    pub concurrency: usize,
}

impl CollectOptions {
    pub fn for_resource(resource: Resource) -> Self {
        Self {
            step: resource.default_step(),
            max_pages: None,
            concurrency: DEFAULT_WRITE_CONCURRENCY,
        }
    }
}

/// Outcome of a collection run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectReport {
    pub resource: Resource,
    pub step: String,
    pub records: usize,
    /// Index links that replaced an older entry
    pub replaced: usize,
}

/// Fetch `resource` from `source` and store every record in `cache`
pub async fn collect<F: CacheFs>(
    cache: &IntegrationCache<F>,
    source: &dyn PageSource,
    resource: Resource,
    options: &CollectOptions,
) -> CacheResult<CollectReport> {
    info!("Collecting {} into step {}", resource, options.step);

    let (records, replaced) = match resource {
        Resource::Users => store_all::<User, F>(cache, source, resource, options).await?,
        Resource::Groups => store_all::<Group, F>(cache, source, resource, options).await?,
        Resource::Projects => store_all::<Project, F>(cache, source, resource, options).await?,
        Resource::MergeRequests => {
            store_all::<MergeRequest, F>(cache, source, resource, options).await?
        }
    };

    info!("Stored {} {} records", records, resource);
    Ok(CollectReport {
        resource,
        step: options.step.clone(),
        records,
        replaced,
    })
}

async fn store_all<T, F>(
    cache: &IntegrationCache<F>,
    source: &dyn PageSource,
    resource: Resource,
    options: &CollectOptions,
) -> CacheResult<(usize, usize)>
where
    T: Entity + Serialize + DeserializeOwned,
    F: CacheFs,
{
    let records: Vec<T> = fetch_all(source, resource.api_path(), options.max_pages).await?;
    let total = records.len();
    let step = options.step.as_str();

    let mut stores = stream::iter(records)
        .map(|record| store_one(cache, step, record))
        .buffer_unordered(options.concurrency.max(1));

    let mut replaced = 0;
    while let Some(result) = stores.next().await {
        if result? {
            replaced += 1;
        }
    }

    Ok((total, replaced))
}

/// Write one record and (re)link its index entry
///
/// Returns whether a stale index entry was replaced.
async fn store_one<T, F>(cache: &IntegrationCache<F>, step: &str, record: T) -> CacheResult<bool>
where
    T: Entity + Serialize,
    F: CacheFs,
{
    let key = record.key();
    let graph = layout::graph_path(step, ObjectKind::Entity, &key);
    let index = layout::index_path(ObjectKind::Entity, T::TYPE, &key);

    cache.write(&graph, &record).await?;
    let replaced = cache.remove_if_present(&index).await?;
    cache.link(&graph, &index).await?;

    debug!("Stored {} at {}", key, graph);
    Ok(replaced)
}

/// Read back every indexed entity of type `T`
///
/// The walker hands over raw text; parsing happens here.
pub async fn load_index<T, F>(cache: &IntegrationCache<F>) -> CacheResult<Vec<T>>
where
    T: Entity + DeserializeOwned,
    F: CacheFs,
{
    let subtree = layout::index_subtree(ObjectKind::Entity, T::TYPE);
    let mut records = Vec::new();

    cache
        .walk(&subtree, |file| {
            let record = serde_json::from_str(&file.data)
                .map_err(|e| CacheError::handler(&file.path, e.to_string()))?;
            records.push(record);
            Ok(())
        })
        .await?;

    Ok(records)
}
