use anyhow::Result;
use chrono::NaiveDate;
use log::warn;
use ratatui::widgets::ListState;

use crate::model::{Task, TaskId};
use crate::store::TaskStore;
use crate::validate::{self, DATE_FORMAT, MAX_DESCRIPTION_CHARS, MAX_NAME_CHARS};

const DATE_CHARS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Description,
    Due,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Add,
    Edit(TaskId),
}

pub struct TaskForm {
    pub kind: FormKind,
    pub name: String,
    pub description: String,
    pub due: String,
    pub focused: FormField,
    pub error: Option<String>,
}

impl TaskForm {
    /// Empty form; the due date starts at today.
    pub fn add(today: NaiveDate) -> Self {
        Self {
            kind: FormKind::Add,
            name: String::new(),
            description: String::new(),
            due: today.format(DATE_FORMAT).to_string(),
            focused: FormField::Name,
            error: None,
        }
    }

    pub fn edit(task: &Task) -> Self {
        Self {
            kind: FormKind::Edit(task.id),
            name: task.name.clone(),
            description: task.description.clone(),
            due: task.due_date.format(DATE_FORMAT).to_string(),
            focused: FormField::Name,
            error: None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self.kind {
            FormKind::Add => " Add Task ",
            FormKind::Edit(_) => " Edit Task ",
        }
    }

    pub fn focused_buf_mut(&mut self) -> &mut String {
        match self.focused {
            FormField::Name => &mut self.name,
            FormField::Description => &mut self.description,
            FormField::Due => &mut self.due,
        }
    }

    fn focused_limit(&self) -> usize {
        match self.focused {
            FormField::Name => MAX_NAME_CHARS,
            FormField::Description => MAX_DESCRIPTION_CHARS,
            FormField::Due => DATE_CHARS,
        }
    }

    /// Append to the focused field; input past the field's limit is dropped.
    pub fn push_char(&mut self, c: char) {
        let limit = self.focused_limit();
        let buf = self.focused_buf_mut();
        if buf.chars().count() < limit {
            buf.push(c);
        }
        self.error = None;
    }

    /// Replace the description with text edited outside the page.
    pub fn set_description(&mut self, text: String) {
        self.description = text;
        self.error = None;
    }

    pub fn next_field(&mut self) {
        self.focused = match self.focused {
            FormField::Name => FormField::Description,
            FormField::Description => FormField::Due,
            FormField::Due => FormField::Name,
        };
    }

    pub fn prev_field(&mut self) {
        self.focused = match self.focused {
            FormField::Name => FormField::Due,
            FormField::Description => FormField::Name,
            FormField::Due => FormField::Description,
        };
    }

    /// Check the fields; on failure the message is stored in `error`.
    pub fn validate(&mut self) -> Option<NaiveDate> {
        if self.name.trim().is_empty() || self.due.trim().is_empty() {
            self.error = Some("Please fill in all fields".into());
            return None;
        }
        let checked = validate::validate_task(&self.name, &self.description)
            .and_then(|()| validate::parse_due_date(&self.due));
        match checked {
            Ok(due) => {
                self.error = None;
                Some(due)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                None
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Help,
    ConfirmDelete(TaskId),
}

pub struct App {
    pub today: NaiveDate,
    pub streak: u32,
    pub tasks: Vec<Task>,
    pub due_soon: Vec<Task>,
    pub expired: Vec<Task>,
    pub cursor: usize,
    pub list_state: ListState,
    pub mode: Mode,
    pub form: Option<TaskForm>,
    pub toast: Option<String>,
    pub error: Option<String>,
}

impl App {
    pub fn new(store: &TaskStore, today: NaiveDate, streak: u32) -> Result<Self> {
        let mut app = App {
            today,
            streak,
            tasks: Vec::new(),
            due_soon: Vec::new(),
            expired: Vec::new(),
            cursor: 0,
            list_state: ListState::default(),
            mode: Mode::Normal,
            form: None,
            toast: None,
            error: None,
        };
        app.refresh(store)?;
        Ok(app)
    }

    /// Re-query everything shown on the page. Nothing is replaced unless
    /// all three queries succeed.
    pub fn refresh(&mut self, store: &TaskStore) -> Result<()> {
        let tasks = store.list_all()?;
        let due_soon = store.due_soon(self.today)?;
        let expired = store.expired(self.today)?;
        self.tasks = tasks;
        self.due_soon = due_soon;
        self.expired = expired;
        self.clamp_cursor();
        Ok(())
    }

    /// [`refresh`](Self::refresh) for an open page: a failed re-query goes to
    /// the footer and the previous snapshot stays on screen.
    pub fn reload(&mut self, store: &TaskStore) {
        if let Err(e) = self.refresh(store) {
            warn!("failed to reload page: {e:#}");
            self.error = Some(format!("failed to reload: {e}"));
        }
    }

    pub fn clamp_cursor(&mut self) {
        if self.tasks.is_empty() {
            self.cursor = 0;
            self.list_state.select(None);
        } else {
            self.cursor = self.cursor.min(self.tasks.len() - 1);
            self.list_state.select(Some(self.cursor));
        }
    }

    pub fn move_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.list_state.select(Some(self.cursor));
        }
    }

    pub fn move_down(&mut self) {
        if !self.tasks.is_empty() && self.cursor < self.tasks.len() - 1 {
            self.cursor += 1;
            self.list_state.select(Some(self.cursor));
        }
    }

    pub fn selected(&self) -> Option<&Task> {
        self.tasks.get(self.cursor)
    }

    pub fn is_due_soon(&self, id: TaskId) -> bool {
        self.due_soon.iter().any(|t| t.id == id)
    }

    pub fn is_expired(&self, id: TaskId) -> bool {
        self.expired.iter().any(|t| t.id == id)
    }

    pub fn enter_add_mode(&mut self) {
        self.form = Some(TaskForm::add(self.today));
    }

    pub fn enter_edit_mode(&mut self) {
        if let Some(task) = self.selected() {
            self.form = Some(TaskForm::edit(task));
        }
    }

    pub fn cancel_form(&mut self) {
        self.form = None;
    }

    pub fn toggle_help(&mut self) {
        self.mode = match self.mode {
            Mode::Help => Mode::Normal,
            _ => Mode::Help,
        };
    }

    pub fn request_delete(&mut self) {
        if let Some(task) = self.selected() {
            self.mode = Mode::ConfirmDelete(task.id);
        }
    }

    pub fn cancel_delete(&mut self) {
        self.mode = Mode::Normal;
    }

    pub fn submit_form(&mut self, store: &TaskStore) {
        let Some(form) = self.form.as_mut() else {
            return;
        };
        let Some(due) = form.validate() else {
            return;
        };
        let result = match form.kind {
            FormKind::Add => store
                .create(&form.name, &form.description, due)
                .map(|_| (true, "Task added")),
            FormKind::Edit(id) => store
                .update(id, &form.name, &form.description, due)
                .map(|changed| (changed, "Task updated")),
        };
        match result {
            Ok((changed, toast)) => {
                self.form = None;
                self.finish_mutation(store, changed, toast);
            }
            Err(e) => form.error = Some(e.to_string()),
        }
    }

    pub fn toggle_selected(&mut self, store: &TaskStore) {
        let Some((id, completed)) = self.selected().map(|t| (t.id, t.completed)) else {
            return;
        };
        match store.set_completed(id, !completed) {
            Ok(changed) => self.finish_mutation(store, changed, "Completion updated"),
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    pub fn confirm_delete(&mut self, store: &TaskStore) {
        let Mode::ConfirmDelete(id) = self.mode else {
            return;
        };
        self.mode = Mode::Normal;
        match store.delete(id) {
            Ok(changed) => self.finish_mutation(store, changed, "Task deleted"),
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    fn finish_mutation(&mut self, store: &TaskStore, changed: bool, toast: &str) {
        if changed {
            self.toast = Some(toast.to_string());
            self.error = None;
        } else {
            self.toast = None;
            self.error = Some("task no longer exists".into());
        }
        self.reload(store);
    }
}
