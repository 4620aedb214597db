//! Resource Client
//!
//! One generic client for every REST collection. The resource definition
//! decides the paths and which operations exist; `T` decides the record shape.

use super::payload::{create_payload, require_id, update_payload};
use super::query::{PageBase, PageRequest};
use super::registry::{get_resource, Operation, ResourceDef};
use crate::api::{ApiClient, NO_QUERY};
use crate::error::{Error, Result};
use crate::model::{Entity, Page};
use std::fmt;
use std::marker::PhantomData;

/// Typed CRUD client for the collection serving `T`
pub struct ResourceClient<T: Entity> {
    api: ApiClient,
    def: &'static ResourceDef,
    page_base: PageBase,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Entity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            def: self.def,
            page_base: self.page_base,
            _marker: PhantomData,
        }
    }
}

impl<T: Entity> fmt::Debug for ResourceClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceClient")
            .field("resource", &T::RESOURCE)
            .field("endpoint", &self.def.endpoint)
            .field("page_base", &self.page_base)
            .finish()
    }
}

impl<T: Entity> ResourceClient<T> {
    pub fn new(api: ApiClient, page_base: PageBase) -> Result<Self> {
        let def = get_resource(T::RESOURCE)
            .ok_or_else(|| Error::UnknownResource(T::RESOURCE.to_string()))?;
        Ok(Self {
            api,
            def,
            page_base,
            _marker: PhantomData,
        })
    }

    pub fn definition(&self) -> &'static ResourceDef {
        self.def
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn page_base(&self) -> PageBase {
        self.page_base
    }

    pub fn supports(&self, op: Operation) -> bool {
        self.def.supports(op)
    }

    fn ensure(&self, op: Operation) -> Result<()> {
        if self.def.supports(op) {
            Ok(())
        } else {
            Err(Error::Unsupported {
                resource: T::RESOURCE.to_string(),
                operation: op.as_str(),
            })
        }
    }

    /// `GET /?size&page&sortColumn&sortDirection`
    pub async fn list(&self, request: &PageRequest) -> Result<Page<T>> {
        self.ensure(Operation::List)?;
        let query = request.to_query(self.page_base);
        self.api.get(&self.def.collection_path(), &query).await
    }

    /// Paged free-text (or date) filter
    pub async fn search(&self, request: &PageRequest, text: &str) -> Result<Page<T>> {
        self.ensure(Operation::Search)?;
        let Some(search) = self.def.search.as_ref() else {
            return Err(Error::Unsupported {
                resource: T::RESOURCE.to_string(),
                operation: Operation::Search.as_str(),
            });
        };

        let mut query = vec![(search.param.clone(), text.to_string())];
        query.extend(request.to_query(self.page_base));
        self.api.get(&self.def.sub_path(&search.path), &query).await
    }

    pub async fn get(&self, id: &str) -> Result<T> {
        require_id(T::RESOURCE, id)?;
        self.ensure(Operation::Get)?;
        self.api.get(&self.def.item_path(id), NO_QUERY).await
    }

    /// Create a record; the id and server-computed fields are never sent
    pub async fn create(&self, entity: &T) -> Result<T> {
        self.ensure(Operation::Create)?;
        let body = create_payload(self.def, entity)?;
        tracing::info!("Creating {}", T::RESOURCE);
        self.api.post(&self.def.collection_path(), &body).await
    }

    /// Update a record; fails locally when it has no id
    pub async fn update(&self, entity: &T) -> Result<T> {
        let body = update_payload(self.def, entity)?;
        self.ensure(Operation::Update)?;
        tracing::info!("Updating {} {}", T::RESOURCE, entity.id());
        self.api.put(&self.def.collection_path(), &body).await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        require_id(T::RESOURCE, id)?;
        self.ensure(Operation::Delete)?;
        tracing::info!("Deleting {} {}", T::RESOURCE, id);
        self.api.delete(&self.def.delete_path(id)).await
    }

    /// Short unpaged list for selectors
    pub async fn list_all(&self) -> Result<Vec<T>> {
        self.ensure(Operation::All)?;
        self.api.get(&self.def.sub_path("all"), NO_QUERY).await
    }

    /// Ask the server whether `value` is already taken
    pub async fn exists(&self, value: &str) -> Result<bool> {
        self.ensure(Operation::Exists)?;
        let Some(probe) = self.def.exists.as_ref() else {
            return Err(Error::Unsupported {
                resource: T::RESOURCE.to_string(),
                operation: Operation::Exists.as_str(),
            });
        };
        let path = self
            .def
            .sub_path(&format!("{}/{}", probe.path, urlencoding::encode(value)));
        self.api.get(&path, NO_QUERY).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiHttpClient;
    use crate::model::{OfficeWorker, Product, Supplier};

    fn client<T: Entity>() -> ResourceClient<T> {
        // Port 9 is discard; none of these tests reach the network
        let api = ApiClient::new("http://127.0.0.1:9/", ApiHttpClient::new(None).unwrap()).unwrap();
        ResourceClient::new(api, PageBase::One).unwrap()
    }

    #[tokio::test]
    async fn test_unsupported_operations_fail_locally() {
        let suppliers = client::<Supplier>();
        let err = suppliers
            .search(&PageRequest::default(), "acme")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Unsupported { operation: "search", .. }));

        let workers = client::<OfficeWorker>();
        let worker = OfficeWorker {
            id: "w1".into(),
            name: "Asha".into(),
        };
        let err = workers.update(&worker).await.unwrap_err();
        assert!(err.is_local());
    }

    #[tokio::test]
    async fn test_empty_ids_fail_locally() {
        let products = client::<Product>();
        assert!(products.get("").await.unwrap_err().is_local());
        assert!(products.delete(" ").await.unwrap_err().is_local());
        let blank = Product {
            id: String::new(),
            name: "x".into(),
            price: 1.0,
        };
        assert_eq!(products.update(&blank).await.unwrap_err().field(), Some("id"));
    }
}
