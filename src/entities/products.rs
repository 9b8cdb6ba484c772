use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub brand: String,

    pub name: String,

    pub origin: String,

    /// Stored under the legacy column name `type`.
    #[sea_orm(column_name = "type")]
    pub product_type: String,

    pub tar: String,

    pub price: String,

    pub stock: i32,

    /// Empty string, or a relative URL path of the form `/uploads/<file>`.
    pub image: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
