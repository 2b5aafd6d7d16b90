mod schema;
mod store;

pub use store::EmployeeStore;

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::Result;
use rusqlite::{Connection, OptionalExtension, Row};

use crate::models::Employee;

const EMPLOYEE_COLUMNS: &str = "id, first_name, last_name, email";

/// SQLite-backed employee store.
///
/// Cloning is cheap; all clones share one connection.
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open(path: PathBuf) -> Result<Self> {
        let parent = path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Database path has no parent directory"))?;
        std::fs::create_dir_all(parent)?;
        let conn = Connection::open(&path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        tracing::debug!("Opened database at {}", path.display());
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_default() -> Result<Self> {
        Self::open(Self::default_path()?)
    }

    /// `employees.db` inside the platform data directory.
    pub fn default_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", "employee-registry")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        Ok(dirs.data_dir().join("employees.db"))
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn migrate(&self) -> Result<()> {
        let conn = self.lock()?;
        schema::run_migrations(&conn)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow::anyhow!("database lock poisoned"))
    }
}

impl EmployeeStore for Database {
    fn save(&self, employee: Employee) -> Result<Employee> {
        let conn = self.lock()?;

        let id = match employee.id {
            Some(id) => {
                conn.execute(
                    "INSERT INTO employees (id, first_name, last_name, email)
                     VALUES (?, ?, ?, ?)
                     ON CONFLICT(id) DO UPDATE SET
                        first_name = excluded.first_name,
                        last_name = excluded.last_name,
                        email = excluded.email",
                    (
                        id,
                        &employee.first_name,
                        &employee.last_name,
                        &employee.email,
                    ),
                )?;
                id
            }
            None => {
                conn.execute(
                    "INSERT INTO employees (first_name, last_name, email) VALUES (?, ?, ?)",
                    (&employee.first_name, &employee.last_name, &employee.email),
                )?;
                conn.last_insert_rowid()
            }
        };

        Ok(employee.with_id(id))
    }

    fn find_all(&self) -> Result<Vec<Employee>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees ORDER BY id"
        ))?;

        let employees = stmt
            .query_map([], row_to_employee)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(employees)
    }

    fn find_by_id(&self, id: i64) -> Result<Option<Employee>> {
        let conn = self.lock()?;
        let employee = conn
            .query_row(
                &format!("SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE id = ?"),
                [id],
                row_to_employee,
            )
            .optional()?;
        Ok(employee)
    }

    fn find_by_email(&self, email: &str) -> Result<Option<Employee>> {
        let conn = self.lock()?;
        let employee = conn
            .query_row(
                &format!("SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE email = ?"),
                [email],
                row_to_employee,
            )
            .optional()?;
        Ok(employee)
    }

    fn delete_by_id(&self, id: i64) -> Result<()> {
        let conn = self.lock()?;
        let rows = conn.execute("DELETE FROM employees WHERE id = ?", [id])?;
        if rows == 0 {
            tracing::debug!("delete_by_id: no employee with id {}", id);
        }
        Ok(())
    }

    fn exists_by_id(&self, id: i64) -> Result<bool> {
        let conn = self.lock()?;
        let exists: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM employees WHERE id = ?)",
            [id],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    fn count(&self) -> Result<u64> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM employees", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: self.conn.clone(),
        }
    }
}

/// True when `err` is SQLite rejecting a write on a `UNIQUE` column.
pub fn is_unique_violation(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<rusqlite::Error>(),
        Some(rusqlite::Error::SqliteFailure(e, _))
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

fn row_to_employee(row: &Row<'_>) -> rusqlite::Result<Employee> {
    Ok(Employee {
        id: Some(row.get(0)?),
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        email: row.get(3)?,
    })
}
