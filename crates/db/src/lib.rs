//! Database layer with `SeaORM` entities and the fact source.
//!
//! This crate provides:
//! - `SeaORM` entity definitions for the reporting tables
//! - [`SeaOrmFactSource`], the read-only source behind the analytics layer
//! - Connection setup from [`DatabaseConfig`]

pub mod entities;
pub mod repositories;

pub use repositories::{SeaOrmFactSource, source_error};

use finsight_shared::config::DatabaseConfig;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Schema};
use tracing::info;

use entities::prelude::{
    Accounts, Budgets, Categories, CostCenters, Departments, ProcurementOrders, Transactions,
    Vendors,
};

/// Establishes a pooled connection to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .sqlx_logging(false);

    let db = Database::connect(options).await?;
    info!(
        max_connections = config.max_connections,
        "Database connection established"
    );
    Ok(db)
}

/// Creates the reporting tables from the entity definitions.
///
/// Provisioning belongs to the warehouse; this exists for local databases
/// and tests.
///
/// # Errors
///
/// Returns an error if any `CREATE TABLE` statement fails.
pub async fn create_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    db.execute(backend.build(&schema.create_table_from_entity(Departments)))
        .await?;
    db.execute(backend.build(&schema.create_table_from_entity(CostCenters)))
        .await?;
    db.execute(backend.build(&schema.create_table_from_entity(Accounts)))
        .await?;
    db.execute(backend.build(&schema.create_table_from_entity(Vendors)))
        .await?;
    db.execute(backend.build(&schema.create_table_from_entity(Categories)))
        .await?;
    db.execute(backend.build(&schema.create_table_from_entity(Budgets)))
        .await?;
    db.execute(backend.build(&schema.create_table_from_entity(Transactions)))
        .await?;
    db.execute(backend.build(&schema.create_table_from_entity(ProcurementOrders)))
        .await?;

    Ok(())
}
