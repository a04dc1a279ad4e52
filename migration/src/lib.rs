pub use sea_orm_migration::prelude::*;

mod m20260830_000001_create_users_table;
mod m20260830_000002_create_gigs_table;
mod m20260830_000003_create_services_table;
mod m20260830_000004_create_orders_table;
mod m20260830_000005_create_ratings_table;
mod m20260830_000006_create_notifications_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260830_000001_create_users_table::Migration),
            Box::new(m20260830_000002_create_gigs_table::Migration),
            Box::new(m20260830_000003_create_services_table::Migration),
            Box::new(m20260830_000004_create_orders_table::Migration),
            Box::new(m20260830_000005_create_ratings_table::Migration),
            Box::new(m20260830_000006_create_notifications_table::Migration),
        ]
    }
}
