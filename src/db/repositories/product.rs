use crate::entities::{prelude::*, products};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::info;

/// Caller-supplied scalar fields for a product row. No validation is
/// applied; blank values are stored as-is.
#[derive(Debug, Clone, Default)]
pub struct ProductFields {
    pub brand: String,
    pub name: String,
    pub origin: String,
    pub product_type: String,
    pub tar: String,
    pub price: String,
    pub stock: i32,
}

pub struct ProductRepository {
    conn: DatabaseConnection,
}

impl ProductRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// All products, newest first.
    pub async fn list(&self) -> anyhow::Result<Vec<products::Model>> {
        let rows = Products::find()
            .order_by_desc(products::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows)
    }

    pub async fn create(&self, fields: &ProductFields, image: &str) -> anyhow::Result<i32> {
        let active_model = products::ActiveModel {
            brand: Set(fields.brand.clone()),
            name: Set(fields.name.clone()),
            origin: Set(fields.origin.clone()),
            product_type: Set(fields.product_type.clone()),
            tar: Set(fields.tar.clone()),
            price: Set(fields.price.clone()),
            stock: Set(fields.stock),
            image: Set(image.to_string()),
            ..Default::default()
        };

        let result = Products::insert(active_model).exec(&self.conn).await?;

        info!(id = result.last_insert_id, "Added product: {}", fields.name);
        Ok(result.last_insert_id)
    }

    /// Overwrites all scalar fields; `image` is only written when a new
    /// path is supplied, so edits without a fresh upload keep the old
    /// picture. The affected-row count is deliberately not inspected:
    /// updating an unknown id is not an error.
    pub async fn update(
        &self,
        id: i32,
        fields: &ProductFields,
        image: Option<&str>,
    ) -> anyhow::Result<()> {
        let mut active_model = products::ActiveModel {
            brand: Set(fields.brand.clone()),
            name: Set(fields.name.clone()),
            origin: Set(fields.origin.clone()),
            product_type: Set(fields.product_type.clone()),
            tar: Set(fields.tar.clone()),
            price: Set(fields.price.clone()),
            stock: Set(fields.stock),
            ..Default::default()
        };

        if let Some(image) = image {
            active_model.image = Set(image.to_string());
        }

        Products::update_many()
            .set(active_model)
            .filter(products::Column::Id.eq(id))
            .exec(&self.conn)
            .await?;

        Ok(())
    }

    /// Deleting an unknown id succeeds as a no-op.
    pub async fn delete(&self, id: i32) -> anyhow::Result<()> {
        Products::delete_by_id(id).exec(&self.conn).await?;
        Ok(())
    }
}
