pub mod database;
pub mod metrics;
pub mod store;

pub use database::ProductDb;
pub use metrics::{get_metrics, init_metrics};
pub use store::{
    FailingProductStore, InMemoryProductStore, MongoProductStore, ProductStore, UpdateOutcome,
};
