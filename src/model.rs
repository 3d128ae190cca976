use chrono::NaiveDate;
use serde::Serialize;

pub type TaskId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    pub description: String,
    pub due_date: NaiveDate,
    pub completed: bool,
}

impl Task {
    /// Returns display icon: x=completed, space=pending
    pub fn icon(&self) -> &'static str {
        if self.completed {
            "x"
        } else {
            " "
        }
    }

    pub fn status_str(&self) -> &'static str {
        if self.completed {
            "done"
        } else {
            "pending"
        }
    }
}
