//! Development data seeder for Rollcall.
//!
//! Inserts a fixed set of employees (skipping any that already exist) and
//! prints a bearer token signed with the configured secret.
//!
//! Usage: cargo run --bin seeder

use anyhow::Context;
use chrono::Duration;
use rollcall_db::LedgerRepository;
use rollcall_shared::{AppConfig, EmployeeId, IdentityGate};

/// Development employees as `(id, name)`.
const EMPLOYEES: [(&str, &str); 4] = [
    ("E1", "Ada Lovelace"),
    ("E2", "Grace Hopper"),
    ("E3", "Katherine Johnson"),
    ("0c5f6a3e-2b1d-4c8e-9f7a-6d2e1b3c4a5f", "Margaret Hamilton"),
];

/// Subject of the printed development token.
const DEV_SUBJECT: &str = "dev@rollcall.local";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("failed to load configuration")?;

    println!("Connecting to database...");
    let db = rollcall_db::connect(&config.database).await?;
    let repo = LedgerRepository::new(db);

    println!("Seeding employees...");
    let mut inserted = 0;
    for (raw_id, name) in EMPLOYEES {
        let id = EmployeeId::parse(raw_id).with_context(|| format!("bad seed id {raw_id}"))?;
        match repo.ensure_employee(&id, name).await {
            Ok(true) => {
                inserted += 1;
                println!("  Created employee {id}: {name}");
            }
            Ok(false) => println!("  Employee {id} already exists, skipping..."),
            Err(e) => eprintln!("Failed to insert employee {id}: {e}"),
        }
    }
    println!("  Inserted {inserted} employees");

    let token = IdentityGate::new(&config.jwt.secret)
        .issue_token(DEV_SUBJECT, Duration::days(30))
        .context("failed to sign development token")?;
    println!("Development token (30 days):");
    println!("  Authorization: Bearer {token}");

    println!("Seeding complete!");
    Ok(())
}
