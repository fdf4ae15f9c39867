//! Initial database migration.
//!
//! Creates the employees and entries tables. The leave balance is not a
//! column: it is aggregated from `entries` at write time.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(EMPLOYEES_SQL).await?;
        db.execute_unprepared(ENTRIES_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("DROP TABLE IF EXISTS entries CASCADE;")
            .await?;
        db.execute_unprepared("DROP TABLE IF EXISTS employees CASCADE;")
            .await?;
        Ok(())
    }
}

const EMPLOYEES_SQL: &str = r"
-- Employees are provisioned out-of-band; the service only reads them.
CREATE TABLE employees (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_employee_id_shape CHECK (id ~ '^[A-Za-z0-9_-]{1,64}$')
);
";

const ENTRIES_SQL: &str = r"
-- Attendance entries: append-only, several per employee per day allowed.
CREATE TABLE entries (
    entry_id UUID PRIMARY KEY,
    employee_id TEXT NOT NULL REFERENCES employees(id) ON DELETE CASCADE,
    date DATE NOT NULL,
    type TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_entry_type CHECK (type IN ('WORKED', 'LEAVE'))
);

-- Balance aggregation and per-employee listing
CREATE INDEX idx_entries_employee_date ON entries(employee_id, date, entry_id);
";
