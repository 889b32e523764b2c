//! `SeaORM` Entity for budget lines.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A budget line for one department, cost center and account in a fiscal year.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "budgets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub department_id: Uuid,
    pub cost_center_id: Uuid,
    pub account_id: Uuid,
    pub fiscal_year: i32,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub budget_amount: Decimal,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub spent_amount: Decimal,
    pub status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::departments::Entity",
        from = "Column::DepartmentId",
        to = "super::departments::Column::Id"
    )]
    Department,
    #[sea_orm(
        belongs_to = "super::cost_centers::Entity",
        from = "Column::CostCenterId",
        to = "super::cost_centers::Column::Id"
    )]
    CostCenter,
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::AccountId",
        to = "super::accounts::Column::Id"
    )]
    Account,
}

impl Related<super::departments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Department.def()
    }
}

impl Related<super::cost_centers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CostCenter.def()
    }
}

impl Related<super::accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Account.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
