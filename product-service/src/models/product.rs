use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A product record as stored in the `products` collection.
///
/// Every field except the id is optional; absent fields are not stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// The six writable fields of a product, as accepted in create and update
/// request bodies. Unknown body fields are ignored during deserialization;
/// missing ones deserialize to `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// The names of the writable fields, in declaration order. An update always
/// touches exactly these keys: present values are set, absent ones cleared.
pub const UPDATABLE_FIELDS: [&str; 6] = [
    "name",
    "price",
    "stock",
    "description",
    "images",
    "category",
];

impl Product {
    /// Build an unsaved product from a request body; the store assigns the id.
    pub fn new(fields: ProductFields) -> Self {
        Self {
            id: None,
            name: fields.name,
            price: fields.price,
            stock: fields.stock,
            description: fields.description,
            images: fields.images,
            category: fields.category,
        }
    }
}

impl ProductFields {
    /// Overwrite all six writable fields of `product` with the values carried
    /// here. Fields absent from the body clear the corresponding field on the
    /// record rather than preserving it.
    pub fn apply(&self, product: &mut Product) {
        product.name = self.name.clone();
        product.price = self.price;
        product.stock = self.stock;
        product.description = self.description.clone();
        product.images = self.images.clone();
        product.category = self.category.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_product_has_no_id() {
        let product = Product::new(ProductFields {
            name: Some("Pen".to_string()),
            price: Some(2.0),
            stock: Some(10),
            ..Default::default()
        });

        assert!(product.id.is_none());
        assert_eq!(product.name.as_deref(), Some("Pen"));
        assert_eq!(product.price, Some(2.0));
        assert_eq!(product.stock, Some(10));
        assert!(product.description.is_none());
    }

    #[test]
    fn test_apply_clears_fields_absent_from_body() {
        let mut product = Product::new(ProductFields {
            name: Some("Pen".to_string()),
            price: Some(2.0),
            stock: Some(10),
            description: Some("Ballpoint".to_string()),
            ..Default::default()
        });

        let partial = ProductFields {
            name: Some("Pencil".to_string()),
            ..Default::default()
        };
        partial.apply(&mut product);

        assert_eq!(product.name.as_deref(), Some("Pencil"));
        assert!(product.price.is_none());
        assert!(product.stock.is_none());
        assert!(product.description.is_none());
    }

    #[test]
    fn test_absent_fields_are_not_serialized() {
        let product = Product::new(ProductFields {
            name: Some("Pen".to_string()),
            ..Default::default()
        });
        let doc = mongodb::bson::to_document(&product).unwrap();

        assert!(doc.contains_key("name"));
        assert!(!doc.contains_key("_id"));
        assert!(!doc.contains_key("price"));
        assert!(!doc.contains_key("category"));
    }

    #[test]
    fn test_unknown_body_fields_are_ignored() {
        let fields: ProductFields =
            serde_json::from_str(r#"{"name":"Pen","priority":"high","bogus":1}"#).unwrap();

        assert_eq!(fields.name.as_deref(), Some("Pen"));
        assert_eq!(
            fields,
            ProductFields {
                name: Some("Pen".to_string()),
                ..Default::default()
            }
        );
    }
}
