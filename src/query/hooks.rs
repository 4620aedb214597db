//! Cached queries and mutations for one resource
//!
//! Reads go through the shared [`QueryCache`]; mutations always wait for the
//! server and then invalidate the affected keys. Nothing is updated
//! optimistically.

use super::cache::{QueryCache, QueryState};
use super::key::QueryKey;
use crate::error::{format_error, Result};
use crate::model::{Employee, EmployeeRole, Entity, Page};
use crate::notification::{NotificationManager, OperationType};
use crate::resource::payload::require_id;
use crate::resource::{fetch_all, PageRequest, ResourceClient, Sort};
use std::future::Future;
use std::sync::{Arc, Mutex};

/// Shared handle to the toast manager
pub type Notifier = Arc<Mutex<NotificationManager>>;

pub struct ResourceQueries<T: Entity> {
    client: ResourceClient<T>,
    cache: Arc<QueryCache>,
    page_size: u32,
    notifier: Option<Notifier>,
}

impl<T: Entity> Clone for ResourceQueries<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            cache: self.cache.clone(),
            page_size: self.page_size,
            notifier: self.notifier.clone(),
        }
    }
}

impl<T: Entity> std::fmt::Debug for ResourceQueries<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceQueries")
            .field("resource", &T::RESOURCE)
            .field("page_size", &self.page_size)
            .finish_non_exhaustive()
    }
}

impl<T: Entity> ResourceQueries<T> {
    pub fn new(client: ResourceClient<T>, cache: Arc<QueryCache>, page_size: u32) -> Self {
        Self {
            client,
            cache,
            page_size: page_size.max(1),
            notifier: None,
        }
    }

    /// Report mutations and failed reads as toasts
    pub fn with_notifier(mut self, notifier: Notifier) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn client(&self) -> &ResourceClient<T> {
        &self.client
    }

    pub fn cache(&self) -> &Arc<QueryCache> {
        &self.cache
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Sort used when the caller has no preference
    pub fn default_sort(&self) -> Sort {
        Sort::asc(self.client.definition().default_sort.clone())
    }

    pub fn list_key(&self, page: u32, query: &str, sort: &Sort) -> QueryKey {
        QueryKey::list(T::RESOURCE, page, self.page_size, query.trim(), sort)
    }

    /// One page of records; a non-empty query searches instead of listing
    pub async fn list(&self, page: u32, query: &str, sort: &Sort) -> Result<Arc<Page<T>>> {
        let query = query.trim();
        let request = PageRequest::new(page, self.page_size).sorted(sort.clone());
        let key = self.list_key(page, query, sort);
        let client = &self.client;

        let result = self
            .cache
            .fetch(key, move || async move {
                if query.is_empty() {
                    client.list(&request).await
                } else {
                    client.search(&request, query).await
                }
            })
            .await;
        self.report_read(result, "")
    }

    pub async fn list_state(&self, page: u32, query: &str, sort: &Sort) -> Option<QueryState> {
        self.cache.state(&self.list_key(page, query, sort)).await
    }

    pub async fn by_id(&self, id: &str) -> Result<Arc<T>> {
        require_id(T::RESOURCE, id)?;
        let client = &self.client;
        let result = self
            .cache
            .fetch(QueryKey::detail(T::RESOURCE, id), move || client.get(id))
            .await;
        self.report_read(result, id)
    }

    pub async fn detail_state(&self, id: &str) -> Option<QueryState> {
        self.cache.state(&QueryKey::detail(T::RESOURCE, id)).await
    }

    /// Every record, for selectors
    pub async fn all(&self) -> Result<Arc<Vec<T>>> {
        let client = &self.client;
        let page_size = self.page_size;
        let result = self
            .cache
            .fetch(QueryKey::all(T::RESOURCE), move || fetch_all(client, page_size))
            .await;
        self.report_read(result, "")
    }

    pub async fn create(&self, entity: &T) -> Result<T> {
        let created = self
            .track(OperationType::Create, &entity.label(), self.client.create(entity))
            .await?;
        self.invalidate_lists().await;
        Ok(created)
    }

    /// Fails locally, before any request, when the record has no id
    pub async fn update(&self, entity: &T) -> Result<T> {
        require_id(T::RESOURCE, entity.id())?;
        let updated = self
            .track(OperationType::Update, &entity.label(), self.client.update(entity))
            .await?;
        self.invalidate_lists().await;
        self.cache
            .invalidate(&QueryKey::detail(T::RESOURCE, entity.id()))
            .await;
        Ok(updated)
    }

    pub async fn remove(&self, id: &str) -> Result<()> {
        require_id(T::RESOURCE, id)?;
        self.track(OperationType::Delete, id, self.client.delete(id))
            .await?;
        self.invalidate_lists().await;
        self.cache
            .invalidate(&QueryKey::detail(T::RESOURCE, id))
            .await;
        Ok(())
    }

    /// Uncached uniqueness probe
    pub async fn exists(&self, value: &str) -> Result<bool> {
        self.client.exists(value).await
    }

    async fn invalidate_lists(&self) {
        self.cache.invalidate(&QueryKey::lists(T::RESOURCE)).await;
        self.cache.invalidate(&QueryKey::all(T::RESOURCE)).await;
    }

    async fn track<R, Fut>(&self, op: OperationType, subject: &str, request: Fut) -> Result<R>
    where
        Fut: Future<Output = Result<R>>,
    {
        let id = self.notifier.as_ref().and_then(|n| {
            n.lock()
                .ok()
                .map(|mut m| m.create_notification(op, T::RESOURCE, subject))
        });

        let result = request.await;

        if let (Some(notifier), Some(id)) = (self.notifier.as_ref(), id) {
            if let Ok(mut manager) = notifier.lock() {
                match &result {
                    Ok(_) => manager.mark_success(id),
                    Err(e) => manager.mark_error(id, format_error(e)),
                }
            }
        }
        result
    }

    fn report_read<R>(&self, result: Result<R>, subject: &str) -> Result<R> {
        if let (Err(e), Some(notifier)) = (&result, self.notifier.as_ref()) {
            if !e.is_local() {
                if let Ok(mut manager) = notifier.lock() {
                    manager.push_error(T::RESOURCE, subject, format_error(e));
                }
            }
        }
        result
    }
}

impl ResourceQueries<Employee> {
    /// Create an employee through its role endpoint
    pub async fn create_with_role(&self, name: &str, role: EmployeeRole) -> Result<Employee> {
        let created = self
            .track(OperationType::Create, name, self.client.create_with_role(name, role))
            .await?;
        self.invalidate_lists().await;
        Ok(created)
    }
}
