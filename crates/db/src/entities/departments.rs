//! `SeaORM` Entity for departments.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A department and its allocated budget.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "departments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub code: String,
    pub manager: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub budget_allocation: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
