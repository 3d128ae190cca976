use std::path::Path;

use chrono::NaiveDate;
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};

use crate::db;
use crate::error::Result;
use crate::model::{Task, TaskId};

const TASK_COLUMNS: &str = "id, name, description, due_date, completed";

const INSERT_TASK: &str = "
INSERT INTO tasks (name, description, due_date, completed)
VALUES (?1, ?2, ?3, 0)
";

const SET_FIELDS: &str = "
UPDATE tasks
SET name = ?1, description = ?2, due_date = ?3
WHERE id = ?4
";

const SET_COMPLETED: &str = "UPDATE tasks SET completed = ?1 WHERE id = ?2";

const DELETE_TASK: &str = "DELETE FROM tasks WHERE id = ?1";

fn read_task_row(row: &rusqlite::Row) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        due_date: row.get(3)?,
        completed: row.get::<_, i64>(4)? != 0,
    })
}

/// Owns the task table. Every mutation is a single statement and is
/// persisted before the call returns.
///
/// Mutations addressed to an id that does not exist are no-ops; they return
/// `Ok(false)` rather than an error.
pub struct TaskStore {
    conn: Connection,
}

impl TaskStore {
    /// Open (creating if needed) the database at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = db::open(path)?;
        Self::from_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Ok(Self {
            conn: db::open_memory()?,
        })
    }

    /// Wrap an already-open connection, creating the schema if missing.
    pub fn from_connection(conn: Connection) -> Result<Self> {
        db::init(&conn)?;
        Ok(Self { conn })
    }

    pub fn create(&self, name: &str, description: &str, due_date: NaiveDate) -> Result<TaskId> {
        self.conn
            .execute(INSERT_TASK, params![name, description, due_date])?;
        let id = self.conn.last_insert_rowid();
        debug!("created task {id} due {due_date}");
        Ok(id)
    }

    pub fn get(&self, id: TaskId) -> Result<Option<Task>> {
        let task = self
            .conn
            .query_row(
                &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1"),
                [id],
                read_task_row,
            )
            .optional()?;
        Ok(task)
    }

    /// Overwrite name, description and due date. Returns whether a row changed.
    pub fn update(
        &self,
        id: TaskId,
        name: &str,
        description: &str,
        due_date: NaiveDate,
    ) -> Result<bool> {
        let changed = self
            .conn
            .execute(SET_FIELDS, params![name, description, due_date, id])?;
        debug!("update task {id}: {changed} row(s)");
        Ok(changed > 0)
    }

    pub fn set_completed(&self, id: TaskId, completed: bool) -> Result<bool> {
        let changed = self.conn.execute(SET_COMPLETED, params![completed, id])?;
        debug!("set task {id} completed={completed}: {changed} row(s)");
        Ok(changed > 0)
    }

    pub fn delete(&self, id: TaskId) -> Result<bool> {
        let changed = self.conn.execute(DELETE_TASK, [id])?;
        debug!("delete task {id}: {changed} row(s)");
        Ok(changed > 0)
    }

    /// Every task, in ascending id (insertion) order.
    pub fn list_all(&self) -> Result<Vec<Task>> {
        let mut stmt = self
            .conn
            .prepare_cached(&format!("SELECT {TASK_COLUMNS} FROM tasks ORDER BY id"))?;
        let rows = stmt.query_map([], read_task_row)?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(Into::into)
    }

    /// Incomplete tasks due exactly on `date`.
    pub fn list_due_on(&self, date: NaiveDate) -> Result<Vec<Task>> {
        let mut stmt = self.conn.prepare_cached(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE completed = 0 AND due_date = ?1 ORDER BY id"
        ))?;
        let rows = stmt.query_map([date], read_task_row)?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(Into::into)
    }

    /// Incomplete tasks due tomorrow.
    pub fn due_soon(&self, today: NaiveDate) -> Result<Vec<Task>> {
        match today.succ_opt() {
            Some(tomorrow) => self.list_due_on(tomorrow),
            None => Ok(Vec::new()),
        }
    }

    /// Incomplete tasks that were due yesterday. Tasks overdue by more than
    /// one day are not included.
    pub fn expired(&self, today: NaiveDate) -> Result<Vec<Task>> {
        match today.pred_opt() {
            Some(yesterday) => self.list_due_on(yesterday),
            None => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn create_and_get_task() {
        let store = TaskStore::open_in_memory().unwrap();
        let id = store.create("Buy milk", "2% milk", date(2024, 6, 10)).unwrap();
        let task = store.get(id).unwrap().unwrap();
        assert_eq!(task.name, "Buy milk");
        assert_eq!(task.description, "2% milk");
        assert_eq!(task.due_date, date(2024, 6, 10));
        assert!(!task.completed);
    }

    #[test]
    fn get_missing_is_none() {
        let store = TaskStore::open_in_memory().unwrap();
        assert!(store.get(42).unwrap().is_none());
    }

    #[test]
    fn create_then_list_all_contains_task() {
        let store = TaskStore::open_in_memory().unwrap();
        let id = store.create("Read", "", date(2024, 1, 1)).unwrap();
        let tasks = store.list_all().unwrap();
        assert_eq!(
            tasks,
            vec![Task {
                id,
                name: "Read".into(),
                description: String::new(),
                due_date: date(2024, 1, 1),
                completed: false,
            }]
        );
    }

    #[test]
    fn ids_increase_and_are_not_reused() {
        let store = TaskStore::open_in_memory().unwrap();
        let a = store.create("a", "", date(2024, 1, 1)).unwrap();
        let b = store.create("b", "", date(2024, 1, 1)).unwrap();
        assert!(b > a);
        // Deleting the highest id must not free it for the next insert
        assert!(store.delete(b).unwrap());
        let c = store.create("c", "", date(2024, 1, 1)).unwrap();
        assert!(c > b);
    }

    #[test]
    fn list_all_is_in_id_order() {
        let store = TaskStore::open_in_memory().unwrap();
        for name in ["one", "two", "three"] {
            store.create(name, "", date(2024, 1, 1)).unwrap();
        }
        let names: Vec<_> = store.list_all().unwrap().into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["one", "two", "three"]);
    }

    #[test]
    fn update_overwrites_fields_only() {
        let store = TaskStore::open_in_memory().unwrap();
        let id = store.create("old", "old desc", date(2024, 1, 1)).unwrap();
        store.set_completed(id, true).unwrap();
        assert!(store.update(id, "new", "new desc", date(2024, 2, 2)).unwrap());
        let task = store.get(id).unwrap().unwrap();
        assert_eq!(task.name, "new");
        assert_eq!(task.description, "new desc");
        assert_eq!(task.due_date, date(2024, 2, 2));
        assert!(task.completed);
    }

    #[test]
    fn complete_and_reopen() {
        let store = TaskStore::open_in_memory().unwrap();
        let id = store.create("t", "d", date(2024, 1, 1)).unwrap();
        let before = store.get(id).unwrap().unwrap();

        assert!(store.set_completed(id, true).unwrap());
        assert!(store.get(id).unwrap().unwrap().completed);

        assert!(store.set_completed(id, false).unwrap());
        assert_eq!(store.get(id).unwrap().unwrap(), before);
    }

    #[test]
    fn missing_id_mutations_are_noops() {
        let store = TaskStore::open_in_memory().unwrap();
        let id = store.create("t", "", date(2024, 1, 1)).unwrap();
        assert!(store.delete(id).unwrap());
        assert!(store.list_all().unwrap().is_empty());

        assert!(!store.update(id, "x", "", date(2024, 1, 2)).unwrap());
        assert!(!store.set_completed(id, true).unwrap());
        assert!(!store.delete(id).unwrap());
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn list_due_on_is_exact_and_skips_completed() {
        let store = TaskStore::open_in_memory().unwrap();
        let due = store.create("due", "", date(2024, 6, 10)).unwrap();
        let done = store.create("done", "", date(2024, 6, 10)).unwrap();
        store.create("other", "", date(2024, 6, 11)).unwrap();
        store.set_completed(done, true).unwrap();

        let tasks = store.list_due_on(date(2024, 6, 10)).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, due);
        assert!(store.list_due_on(date(2024, 6, 9)).unwrap().is_empty());
    }

    #[test]
    fn due_soon_is_tomorrow_only() {
        let store = TaskStore::open_in_memory().unwrap();
        store.create("Buy milk", "2% milk", date(2024, 6, 10)).unwrap();

        let soon = store.due_soon(date(2024, 6, 9)).unwrap();
        assert_eq!(soon.len(), 1);
        assert_eq!(soon[0].name, "Buy milk");
        assert!(store.due_soon(date(2024, 6, 8)).unwrap().is_empty());
        assert!(store.due_soon(date(2024, 6, 10)).unwrap().is_empty());
        assert!(store.due_soon(date(2024, 6, 11)).unwrap().is_empty());
    }

    #[test]
    fn expired_is_yesterday_only() {
        let store = TaskStore::open_in_memory().unwrap();
        store.create("report", "", date(2024, 6, 10)).unwrap();

        assert_eq!(store.expired(date(2024, 6, 11)).unwrap().len(), 1);
        // Two days overdue no longer shows up
        assert!(store.expired(date(2024, 6, 12)).unwrap().is_empty());
        assert!(store.expired(date(2024, 6, 10)).unwrap().is_empty());
    }

    #[test]
    fn due_filters_at_calendar_bounds() {
        let store = TaskStore::open_in_memory().unwrap();
        assert!(store.due_soon(NaiveDate::MAX).unwrap().is_empty());
        assert!(store.expired(NaiveDate::MIN).unwrap().is_empty());
    }

    #[test]
    fn reopen_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.db");
        let id = {
            let store = TaskStore::open(&path).unwrap();
            store.create("persisted", "", date(2024, 3, 3)).unwrap()
        };
        let store = TaskStore::open(&path).unwrap();
        assert_eq!(store.get(id).unwrap().unwrap().name, "persisted");
    }
}
