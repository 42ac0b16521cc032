//! 应用层：产品、客户、发货单

pub mod customers;
pub mod health;
pub mod products;
pub mod router;
pub mod shipments;

use std::sync::Arc;

use crate::config::AppConfig;
use crate::infrastructure::{id_generator, IdGenerator, JsonFileStore, RecordStore, Repository};

use customers::CustomerService;
use products::ProductService;
use shipments::ShipmentService;

pub use router::build_router;

/// 所有处理器共享的状态
///
/// 每个集合只创建一个仓储，发货单服务与客户服务共用客户仓储。
#[derive(Clone)]
pub struct AppState {
    pub products: ProductService,
    pub customers: CustomerService,
    pub shipments: ShipmentService,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>, ids: Arc<dyn IdGenerator>) -> Self {
        let products = Repository::new(Arc::clone(&store), Arc::clone(&ids));
        let customers = Repository::new(Arc::clone(&store), Arc::clone(&ids));
        let shipments = Repository::new(store, ids);

        Self {
            products: ProductService::new(products),
            customers: CustomerService::new(customers.clone()),
            shipments: ShipmentService::new(shipments, customers),
        }
    }

    /// 使用 JSON 文件存储和配置的 ID 策略
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            Arc::new(JsonFileStore::new(&config.storage)),
            id_generator(config.ids.strategy),
        )
    }
}
