//! `SeaORM` Entity for procurement orders.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{OrderStatus, Priority};

/// A purchase order raised by a department against a vendor.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "procurement_orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub order_number: String,
    pub order_date: Date,
    pub department_id: Uuid,
    pub vendor_id: Uuid,
    pub category_id: Uuid,
    pub cost_center_id: Uuid,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub subtotal: Decimal,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub tax_amount: Decimal,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub shipping_amount: Decimal,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub grand_total: Decimal,
    pub status: OrderStatus,
    pub priority: Priority,
    pub expected_delivery_date: Option<Date>,
    pub actual_delivery_date: Option<Date>,
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
        belongs_to = "super::vendors::Entity",
        from = "Column::VendorId",
        to = "super::vendors::Column::Id"
    )]
    Vendor,
    #[sea_orm(
        belongs_to = "super::categories::Entity",
        from = "Column::CategoryId",
        to = "super::categories::Column::Id"
    )]
    Category,
    #[sea_orm(
        belongs_to = "super::cost_centers::Entity",
        from = "Column::CostCenterId",
        to = "super::cost_centers::Column::Id"
    )]
    CostCenter,
}

impl Related<super::departments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Department.def()
    }
}

impl Related<super::vendors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vendor.def()
    }
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::cost_centers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CostCenter.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
