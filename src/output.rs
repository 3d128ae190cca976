use serde::Serialize;

use crate::model::Task;

#[derive(Serialize)]
pub struct Reminders<'a> {
    pub due_soon: &'a [Task],
    pub expired: &'a [Task],
}

#[derive(Serialize)]
pub struct StreakReport {
    pub streak: u32,
    pub today: chrono::NaiveDate,
}

pub fn format_task_detail(task: &Task) -> String {
    let mut out = String::new();
    out.push_str(&format!("ID:          {}\n", task.id));
    out.push_str(&format!("Name:        {}\n", task.name));
    out.push_str(&format!("Status:      {}\n", task.status_str()));
    out.push_str(&format!("Due:         {}\n", task.due_date));
    if !task.description.is_empty() {
        out.push_str(&format!("Description: {}\n", task.description));
    }
    out
}

pub fn format_task_list(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "No tasks yet.\n".to_string();
    }
    let mut out = String::new();
    for task in tasks {
        let desc = if task.description.is_empty() {
            String::new()
        } else {
            format!("  {}", task.description)
        };
        out.push_str(&format!(
            "[{}] {:>3}  {}  (due {}){}\n",
            task.icon(),
            task.id,
            task.name,
            task.due_date,
            desc
        ));
    }
    out
}

pub fn due_soon_message(task: &Task) -> String {
    format!("Task '{}' is due on {}", task.name, task.due_date)
}

pub fn expired_message(task: &Task) -> String {
    format!("Task '{}' expired on {}", task.name, task.due_date)
}

/// Warning lines for tasks due soon, then error lines for expired tasks.
pub fn format_reminders(due_soon: &[Task], expired: &[Task]) -> String {
    let mut out = String::new();
    if due_soon.is_empty() {
        out.push_str("No tasks due soon.\n");
    }
    for task in due_soon {
        out.push_str(&format!("warning: {}\n", due_soon_message(task)));
    }
    if expired.is_empty() {
        out.push_str("No expired tasks.\n");
    }
    for task in expired {
        out.push_str(&format!("error: {}\n", expired_message(task)));
    }
    out
}

pub fn format_streak(streak: u32) -> String {
    let days = if streak == 1 { "day" } else { "days" };
    format!("Visit streak: {streak} {days}")
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn make_task(id: i64, name: &str, desc: &str, completed: bool) -> Task {
        Task {
            id,
            name: name.to_string(),
            description: desc.to_string(),
            due_date: NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
            completed,
        }
    }

    #[test]
    fn flat_list() {
        let tasks = vec![
            make_task(1, "Buy milk", "2% milk", false),
            make_task(2, "Call mom", "", true),
        ];
        let out = format_task_list(&tasks);
        assert!(out.contains("[ ]   1  Buy milk  (due 2024-06-10)  2% milk\n"));
        assert!(out.contains("[x]   2  Call mom  (due 2024-06-10)\n"));
    }

    #[test]
    fn empty_list() {
        assert_eq!(format_task_list(&[]), "No tasks yet.\n");
    }

    #[test]
    fn detail_omits_empty_description() {
        let out = format_task_detail(&make_task(3, "t", "", false));
        assert!(out.contains("Status:      pending"));
        assert!(!out.contains("Description"));
    }

    #[test]
    fn reminders_sections() {
        let soon = vec![make_task(1, "Buy milk", "", false)];
        let out = format_reminders(&soon, &[]);
        assert_eq!(
            out,
            "warning: Task 'Buy milk' is due on 2024-06-10\nNo expired tasks.\n"
        );

        let out = format_reminders(&[], &soon);
        assert_eq!(
            out,
            "No tasks due soon.\nerror: Task 'Buy milk' expired on 2024-06-10\n"
        );
    }

    #[test]
    fn reminders_json_shape() {
        let soon = vec![make_task(1, "a", "", false)];
        let json = serde_json::to_value(Reminders {
            due_soon: &soon,
            expired: &[],
        })
        .unwrap();
        assert_eq!(json["due_soon"][0]["due_date"], "2024-06-10");
        assert_eq!(json["expired"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn streak_pluralises() {
        assert_eq!(format_streak(1), "Visit streak: 1 day");
        assert_eq!(format_streak(3), "Visit streak: 3 days");
    }
}
