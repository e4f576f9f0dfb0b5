pub mod products;

pub use products::{
    DeleteProductResponse, InsertProductResponse, ListProductsParams, ListProductsResponse,
    ProductResponse, UpdateProductResponse, UpdateResultBody,
};
