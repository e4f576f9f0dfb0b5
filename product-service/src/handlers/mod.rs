pub mod app;
pub mod products;

pub use app::{health_check, index};
pub use products::{
    create_product, delete_product, get_product_details, list_products, update_product,
};
