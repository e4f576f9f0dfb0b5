pub mod product;

pub use product::{Product, ProductFields, UPDATABLE_FIELDS};
