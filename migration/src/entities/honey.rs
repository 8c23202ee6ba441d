//! Honey rows, keyed by `(comb_id, type)`

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "honey")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub comb_id: i32,
    #[sea_orm(primary_key, auto_increment = false, column_name = "type")]
    pub honey_type: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub deleted_at: Option<DateTimeUtc>,
    pub visits: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::comb::Entity",
        from = "Column::CombId",
        to = "super::comb::Column::Id"
    )]
    Comb,
}

impl Related<super::comb::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comb.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
