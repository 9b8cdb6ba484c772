use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub username: String,

    /// Stored verbatim and compared with raw equality. Plaintext storage
    /// is a known deficiency kept for behavioral parity with the legacy
    /// deployment; see DESIGN.md before changing this.
    pub password: String,

    /// `"admin"` or `"user"`. Assigned at creation, never updated.
    pub role: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
