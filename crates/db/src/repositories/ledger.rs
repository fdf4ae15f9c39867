//! PostgreSQL implementation of the attendance ledger store.
//!
//! A create runs in one read-committed transaction:
//! 1. Lock the employee row (`SELECT ... FOR UPDATE`)
//! 2. Count the employee's worked and leave entries
//! 3. Apply the balance guard
//! 4. Insert and commit
//!
//! Writers for the same employee queue on the row lock; writers for
//! different employees never touch the same row. Dropping the future before
//! commit drops the transaction, which rolls back.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbBackend, DbErr,
    EntityTrait, FromQueryResult, QueryFilter, QueryOrder, QuerySelect, Set, Statement,
    TransactionTrait,
};
use tracing::{debug, instrument};

use rollcall_core::attendance::{
    Employee, EntryRecord, EntryType, EntryWithStats, LedgerError, LedgerStore, PendingEntry,
    Tally,
};
use rollcall_shared::types::{EmployeeId, EntryId};

use crate::entities::{employees, entries};

/// Worked and leave counts of one employee.
const TALLY_SQL: &str = r"
SELECT
    COUNT(*) FILTER (WHERE type = 'WORKED') AS worked_count,
    COUNT(*) FILTER (WHERE type = 'LEAVE')  AS leave_count
FROM entries
WHERE employee_id = $1
";

#[derive(Debug, Default, FromQueryResult)]
struct TallyRow {
    worked_count: i64,
    leave_count: i64,
}

/// Ledger repository backed by PostgreSQL.
#[derive(Debug, Clone)]
pub struct LedgerRepository {
    db: DatabaseConnection,
}

impl LedgerRepository {
    /// Creates a new ledger repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts an employee unless one with the same id exists.
    ///
    /// Returns `true` if a row was inserted.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn ensure_employee(&self, id: &EmployeeId, name: &str) -> Result<bool, DbErr> {
        if employees::Entity::find_by_id(id.as_str().to_owned())
            .one(&self.db)
            .await?
            .is_some()
        {
            return Ok(false);
        }

        employees::ActiveModel {
            id: Set(id.as_str().to_owned()),
            name: Set(name.to_owned()),
        }
        .insert(&self.db)
        .await?;

        Ok(true)
    }

    /// Reads the current tally of an employee within `txn`.
    async fn tally(txn: &DatabaseTransaction, employee_id: &EmployeeId) -> Result<Tally, DbErr> {
        let row = TallyRow::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Postgres,
            TALLY_SQL,
            [employee_id.as_str().into()],
        ))
        .one(txn)
        .await?
        .unwrap_or_default();

        Ok(Tally::new(row.worked_count, row.leave_count))
    }
}

impl LedgerStore for LedgerRepository {
    async fn list_employees(&self) -> Result<Vec<Employee>, LedgerError> {
        employees::Entity::find()
            .order_by_asc(employees::Column::Id)
            .all(&self.db)
            .await
            .map_err(unavailable)?
            .into_iter()
            .map(employee_from_model)
            .collect()
    }

    #[instrument(skip_all, fields(employee_id = %entry.employee_id, entry_type = %entry.entry_type))]
    async fn insert_guarded(
        &self,
        entry: &PendingEntry,
    ) -> Result<Option<EntryWithStats>, LedgerError> {
        let txn = self.db.begin().await.map_err(unavailable)?;

        let employee = employees::Entity::find_by_id(entry.employee_id.as_str().to_owned())
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(unavailable)?;
        if employee.is_none() {
            txn.rollback().await.map_err(unavailable)?;
            return Err(LedgerError::NotFound(format!(
                "employee {}",
                entry.employee_id
            )));
        }

        let current = Self::tally(&txn, &entry.employee_id)
            .await
            .map_err(unavailable)?;
        let Some(next) = current.admit(entry.entry_type) else {
            debug!(balance = current.balance(), "Balance guard rejected entry");
            txn.rollback().await.map_err(unavailable)?;
            return Ok(None);
        };

        let inserted = entries::ActiveModel {
            entry_id: Set(entry.id.into_inner()),
            employee_id: Set(entry.employee_id.as_str().to_owned()),
            date: Set(entry.date),
            entry_type: Set(entry.entry_type.as_str().to_owned()),
        }
        .insert(&txn)
        .await
        .map_err(unavailable)?;

        txn.commit().await.map_err(unavailable)?;

        Ok(Some(EntryWithStats {
            id: EntryId::from_uuid(inserted.entry_id),
            employee_id: entry.employee_id.clone(),
            entry_type: entry.entry_type,
            date: inserted.date,
            worked: next.worked,
            leave: next.leave,
            balance: next.balance(),
        }))
    }

    async fn entries_for_employee(
        &self,
        employee_id: &EmployeeId,
    ) -> Result<Vec<EntryRecord>, LedgerError> {
        entries::Entity::find()
            .filter(entries::Column::EmployeeId.eq(employee_id.as_str()))
            .all(&self.db)
            .await
            .map_err(unavailable)?
            .into_iter()
            .map(record_from_model)
            .collect()
    }
}

fn unavailable(err: DbErr) -> LedgerError {
    LedgerError::Unavailable(err.to_string())
}

fn employee_from_model(model: employees::Model) -> Result<Employee, LedgerError> {
    let id = EmployeeId::parse(&model.id)
        .map_err(|e| LedgerError::Unavailable(format!("stored employee id: {e}")))?;
    Ok(Employee {
        name: model.name,
        id,
    })
}

fn record_from_model(model: entries::Model) -> Result<EntryRecord, LedgerError> {
    let employee_id = EmployeeId::parse(&model.employee_id)
        .map_err(|e| LedgerError::Unavailable(format!("stored employee id: {e}")))?;
    let entry_type = model
        .entry_type
        .parse::<EntryType>()
        .map_err(|e| LedgerError::Unavailable(format!("stored entry type: {e}")))?;

    Ok(EntryRecord {
        entry_id: EntryId::from_uuid(model.entry_id),
        employee_id,
        date: model.date,
        entry_type,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use uuid::Uuid;

    #[test]
    fn test_record_from_model() {
        let id = Uuid::new_v4();
        let record = record_from_model(entries::Model {
            entry_id: id,
            employee_id: "E1".into(),
            date: NaiveDate::from_ymd_opt(2030, 1, 5).unwrap(),
            entry_type: "LEAVE".into(),
        })
        .unwrap();

        assert_eq!(record.entry_id.into_inner(), id);
        assert_eq!(record.employee_id.as_str(), "E1");
        assert_eq!(record.entry_type, EntryType::Leave);
    }

    #[test]
    fn test_record_from_model_rejects_corrupt_type() {
        let result = record_from_model(entries::Model {
            entry_id: Uuid::new_v4(),
            employee_id: "E1".into(),
            date: NaiveDate::from_ymd_opt(2030, 1, 5).unwrap(),
            entry_type: "HOLIDAY".into(),
        });
        assert!(matches!(result, Err(LedgerError::Unavailable(_))));
    }

    #[test]
    fn test_employee_from_model() {
        let employee = employee_from_model(employees::Model {
            id: "E1".into(),
            name: "Ada".into(),
        })
        .unwrap();
        assert_eq!(employee.id.as_str(), "E1");
        assert_eq!(employee.name, "Ada");
    }

    #[test]
    fn test_tally_sql_is_parameterized() {
        assert!(TALLY_SQL.contains("$1"));
        assert!(!TALLY_SQL.contains("FOR UPDATE"));
    }
}
