//! Service context
//!
//! Every resource's queries are built once from the configuration and handed
//! to consumers explicitly. The same instances can be published to a
//! [`DependencyRegistry`] for code that looks services up by name.

use crate::api::ApiClient;
use crate::config::Config;
use crate::dependency::{service_key, DependencyRegistry};
use crate::error::Result;
use crate::model::{
    Customer, Employee, Entity, GiveStock, Location, OfficeWorker, OpeningStock, Product,
    ReplaceDefective, Sale, SaleReturn, Supplier, TakeStock, TruckDriver, Vehicle, Warehouse,
    WarehouseLoadIn, WarehouseLoadOut, WarehouseWorker,
};
use crate::notification::NotificationManager;
use crate::query::{Notifier, QueryCache, ResourceQueries};
use crate::resource::ResourceClient;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct Services {
    pub config: Config,
    pub api: ApiClient,
    pub cache: Arc<QueryCache>,
    pub notifier: Notifier,

    pub products: Arc<ResourceQueries<Product>>,
    pub vehicles: Arc<ResourceQueries<Vehicle>>,
    pub warehouses: Arc<ResourceQueries<Warehouse>>,
    pub locations: Arc<ResourceQueries<Location>>,
    pub customers: Arc<ResourceQueries<Customer>>,

    pub employees: Arc<ResourceQueries<Employee>>,
    pub suppliers: Arc<ResourceQueries<Supplier>>,
    pub office_workers: Arc<ResourceQueries<OfficeWorker>>,
    pub truck_drivers: Arc<ResourceQueries<TruckDriver>>,
    pub warehouse_workers: Arc<ResourceQueries<WarehouseWorker>>,

    pub sales: Arc<ResourceQueries<Sale>>,
    pub opening_stock: Arc<ResourceQueries<OpeningStock>>,
    pub take_stock: Arc<ResourceQueries<TakeStock>>,
    pub give_stock: Arc<ResourceQueries<GiveStock>>,
    pub load_ins: Arc<ResourceQueries<WarehouseLoadIn>>,
    pub load_outs: Arc<ResourceQueries<WarehouseLoadOut>>,
    pub sale_returns: Arc<ResourceQueries<SaleReturn>>,
    pub replace_defective: Arc<ResourceQueries<ReplaceDefective>>,
}

impl std::fmt::Debug for Services {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Services")
            .field("base_url", &self.api.base_url().as_str())
            .field("page_size", &self.config.page_size)
            .finish_non_exhaustive()
    }
}

impl Services {
    /// Build the HTTP client and every service from configuration
    pub fn from_config(config: Config) -> Result<Self> {
        let api = ApiClient::from_config(&config)?;
        Self::new(config, api)
    }

    /// Build every service on top of an existing API client
    pub fn new(config: Config, api: ApiClient) -> Result<Self> {
        let cache = Arc::new(QueryCache::new(config.stale_time()));
        let notifier: Notifier = Arc::new(Mutex::new(NotificationManager::with_settings(
            config.notifications.detail_level,
            config.notifications.max_history,
        )));

        let ctx = Builder {
            config: &config,
            api: &api,
            cache: &cache,
            notifier: &notifier,
        };

        Ok(Self {
            products: ctx.build()?,
            vehicles: ctx.build()?,
            warehouses: ctx.build()?,
            locations: ctx.build()?,
            customers: ctx.build()?,
            employees: ctx.build()?,
            suppliers: ctx.build()?,
            office_workers: ctx.build()?,
            truck_drivers: ctx.build()?,
            warehouse_workers: ctx.build()?,
            sales: ctx.build()?,
            opening_stock: ctx.build()?,
            take_stock: ctx.build()?,
            give_stock: ctx.build()?,
            load_ins: ctx.build()?,
            load_outs: ctx.build()?,
            sale_returns: ctx.build()?,
            replace_defective: ctx.build()?,
            config,
            api,
            cache,
            notifier,
        })
    }

    /// Queries for any record type, sharing this context's cache and toasts
    pub fn queries<T: Entity>(&self) -> Result<ResourceQueries<T>> {
        let ctx = Builder {
            config: &self.config,
            api: &self.api,
            cache: &self.cache,
            notifier: &self.notifier,
        };
        ctx.build().map(Arc::unwrap_or_clone)
    }

    /// Publish every service under its name, e.g. `productService`
    pub fn register_all(&self, registry: &DependencyRegistry) {
        register(registry, &self.products);
        register(registry, &self.vehicles);
        register(registry, &self.warehouses);
        register(registry, &self.locations);
        register(registry, &self.customers);
        register(registry, &self.employees);
        register(registry, &self.suppliers);
        register(registry, &self.office_workers);
        register(registry, &self.truck_drivers);
        register(registry, &self.warehouse_workers);
        register(registry, &self.sales);
        register(registry, &self.opening_stock);
        register(registry, &self.take_stock);
        register(registry, &self.give_stock);
        register(registry, &self.load_ins);
        register(registry, &self.load_outs);
        register(registry, &self.sale_returns);
        register(registry, &self.replace_defective);
        tracing::debug!("Registered {} services", registry.keys().len());
    }

    /// A registry populated from this context
    pub fn registry(&self) -> DependencyRegistry {
        let registry = DependencyRegistry::new();
        self.register_all(&registry);
        registry
    }

    /// Most recent toast text, if one is visible
    pub fn current_toast(&self) -> Option<String> {
        self.notifier
            .lock()
            .ok()
            .and_then(|manager| manager.current_toast_message())
    }
}

fn register<T: Entity>(registry: &DependencyRegistry, queries: &Arc<ResourceQueries<T>>) {
    registry.register(&service_key(T::RESOURCE), queries.clone());
}

struct Builder<'a> {
    config: &'a Config,
    api: &'a ApiClient,
    cache: &'a Arc<QueryCache>,
    notifier: &'a Notifier,
}

impl Builder<'_> {
    fn build<T: Entity>(&self) -> Result<Arc<ResourceQueries<T>>> {
        let client = ResourceClient::<T>::new(self.api.clone(), self.config.page_base)?;
        Ok(Arc::new(
            ResourceQueries::new(client, self.cache.clone(), self.config.page_size)
                .with_notifier(self.notifier.clone()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn services() -> Services {
        Services::from_config(Config::default()).unwrap()
    }

    #[test]
    fn test_registry_holds_context_instances() {
        let services = services();
        let registry = services.registry();
        assert_eq!(registry.keys().len(), 18);

        let products = registry
            .resolve::<ResourceQueries<Product>>("productService")
            .unwrap();
        assert!(Arc::ptr_eq(&products, &services.products));

        let load_outs = registry
            .resolve::<ResourceQueries<WarehouseLoadOut>>("warehouseLoadOutService")
            .unwrap();
        assert!(Arc::ptr_eq(&load_outs, &services.load_outs));
    }

    #[test]
    fn test_unknown_service_is_not_registered() {
        let registry = services().registry();
        let err = registry
            .resolve::<ResourceQueries<Product>>("invoiceService")
            .unwrap_err();
        assert!(matches!(err, Error::NotRegistered(_)));
    }

    #[test]
    fn test_config_flows_into_queries() {
        let config = Config {
            page_size: 40,
            ..Config::default()
        };
        let services = Services::from_config(config).unwrap();
        assert_eq!(services.customers.page_size(), 40);
        assert_eq!(services.queries::<Customer>().unwrap().page_size(), 40);
        assert!(Arc::ptr_eq(services.products.cache(), services.sales.cache()));
    }
}
