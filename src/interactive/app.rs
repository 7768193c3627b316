//! Application state and logic for the interactive UI

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::record::ActivityRecord;
use crate::session::Session;
use crate::stats::Summary;
use crate::utils;

use super::editor::TableEditor;
use super::form::{FormData, FormField};
use super::messages::{Message, MessageType};

/// Application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Normal viewing/navigation mode
    Normal,
    /// Logging a new activity
    AddEntry,
    /// Editing the selected row of the table buffer
    EditRow,
    /// Help screen
    Help,
}

/// Dashboard tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Analysis,
    Data,
}

impl Tab {
    pub fn title(&self) -> &'static str {
        match self {
            Tab::Analysis => "Analysis",
            Tab::Data => "Data",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Analysis => 0,
            Tab::Data => 1,
        }
    }

    fn toggle(&self) -> Tab {
        match self {
            Tab::Analysis => Tab::Data,
            Tab::Data => Tab::Analysis,
        }
    }
}

/// What a key press did to an open form
enum FormInput {
    Continue,
    Cancel,
    Submit,
}

/// Main application state
pub struct App {
    /// Records and the store they are saved to
    pub session: Session,
    /// Aggregates of the session records, refreshed after every save
    pub summary: Summary,
    /// Current application mode
    pub mode: AppMode,
    /// Selected tab
    pub tab: Tab,
    /// Messages to display
    pub messages: Vec<Message>,
    /// Form data for add/edit operations
    pub form_data: Option<FormData>,
    /// Pending table changes
    pub editor: TableEditor,
    /// Set after a first `q` with unapplied table changes
    quit_armed: bool,
}

impl App {
    /// Create a new App over an opened session
    pub fn new(session: Session, load_error: Option<StoreError>) -> Self {
        let summary = session.summary();
        let editor = TableEditor::new(session.records());

        let mut messages = Vec::new();
        match load_error {
            Some(e) => {
                messages.push(Message::new(MessageType::Error, e.to_string()));
                messages.push(Message::new(
                    MessageType::Warning,
                    "Started with an empty table. Saving will replace the unreadable file.",
                ));
            }
            None if session.is_empty() => {
                messages.push(Message::new(
                    MessageType::Info,
                    "Welcome! Press 'a' to log your first activity.",
                ));
            }
            None => {
                messages.push(Message::new(
                    MessageType::Info,
                    format!("Loaded {} records", session.len()),
                ));
            }
        }

        Self {
            session,
            summary,
            mode: AppMode::Normal,
            tab: Tab::Analysis,
            messages,
            form_data: None,
            editor,
            quit_armed: false,
        }
    }

    /// Handle a key press; returns false when the application should exit
    pub fn handle_event(&mut self, event: KeyEvent) -> Result<bool> {
        if event.modifiers.contains(KeyModifiers::CONTROL) && event.code == KeyCode::Char('c') {
            return Ok(false);
        }
        match self.mode {
            AppMode::Normal => self.handle_normal_mode(event),
            AppMode::Help => self.handle_help_mode(event),
            AppMode::AddEntry => self.handle_add_mode(event),
            AppMode::EditRow => self.handle_edit_mode(event),
        }
    }

    /// Handle events in normal mode
    fn handle_normal_mode(&mut self, event: KeyEvent) -> Result<bool> {
        if !matches!(event.code, KeyCode::Char('q') | KeyCode::Char('Q')) {
            self.quit_armed = false;
        }

        match event.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                if self.editor.is_dirty() && !self.quit_armed {
                    self.quit_armed = true;
                    self.push_message(
                        MessageType::Warning,
                        "Unapplied table changes. Press 'q' again to discard them, 'u' to apply",
                    );
                } else {
                    return Ok(false);
                }
            }
            KeyCode::Char('?') => {
                self.mode = AppMode::Help;
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.tab = self.tab.toggle();
            }
            KeyCode::Char('a') | KeyCode::Char('A') => {
                self.start_add_mode();
            }
            _ if self.tab == Tab::Data => self.handle_data_keys(event),
            _ => {}
        }
        Ok(true)
    }

    /// Keys that only apply to the table on the Data tab
    fn handle_data_keys(&mut self, event: KeyEvent) {
        match event.code {
            KeyCode::Up | KeyCode::Char('k') => self.editor.select_previous(),
            KeyCode::Down | KeyCode::Char('j') => self.editor.select_next(),
            KeyCode::Home => self.editor.select_first(),
            KeyCode::End => self.editor.select_last(),
            KeyCode::Char('e') | KeyCode::Char('E') | KeyCode::Enter => {
                self.start_edit_mode();
            }
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Delete => {
                let row = self.editor.selected() + 1;
                if let Some(removed) = self.editor.delete_selected() {
                    self.push_message(
                        MessageType::Info,
                        format!("Row {} removed ({}). Press 'u' to apply", row, removed),
                    );
                }
            }
            KeyCode::Char('n') | KeyCode::Char('N') => {
                self.editor.insert_row();
                self.push_message(
                    MessageType::Info,
                    format!(
                        "Row {} added. Press 'e' to edit it, 'u' to apply",
                        self.editor.selected() + 1
                    ),
                );
            }
            KeyCode::Char('u') | KeyCode::Char('U') => self.apply_table_changes(),
            KeyCode::Char('r') | KeyCode::Char('R') => {
                if self.editor.is_dirty() {
                    self.editor.reset(self.session.records());
                    self.push_message(MessageType::Info, "Table changes discarded");
                }
            }
            _ => {}
        }
    }

    /// Handle events in help mode
    fn handle_help_mode(&mut self, event: KeyEvent) -> Result<bool> {
        match event.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') | KeyCode::Char('h') => {
                self.mode = AppMode::Normal;
            }
            _ => {}
        }
        Ok(true)
    }

    /// Handle events while logging a new activity
    fn handle_add_mode(&mut self, event: KeyEvent) -> Result<bool> {
        let Some(form) = &mut self.form_data else {
            self.mode = AppMode::Normal;
            return Ok(true);
        };

        match edit_form(form, event) {
            FormInput::Continue => {}
            FormInput::Cancel => {
                self.close_form();
                self.push_message(MessageType::Info, "Add cancelled");
            }
            FormInput::Submit => match form.validate() {
                Ok(record) => self.save_new_record(record),
                Err(e) => self.push_message(MessageType::Error, e.to_string()),
            },
        }
        Ok(true)
    }

    /// Handle events while editing a table row
    fn handle_edit_mode(&mut self, event: KeyEvent) -> Result<bool> {
        let Some(form) = &mut self.form_data else {
            self.mode = AppMode::Normal;
            return Ok(true);
        };

        match edit_form(form, event) {
            FormInput::Continue => {}
            FormInput::Cancel => {
                self.close_form();
                self.push_message(MessageType::Info, "Edit cancelled");
            }
            FormInput::Submit => match form.validate() {
                Ok(record) => {
                    let row = self.editor.selected() + 1;
                    self.editor.update_selected(record);
                    self.close_form();
                    let text = if self.editor.is_dirty() {
                        format!("Row {} changed. Press 'u' to apply", row)
                    } else {
                        format!("Row {} unchanged", row)
                    };
                    self.push_message(MessageType::Info, text);
                }
                Err(e) => self.push_message(MessageType::Error, e.to_string()),
            },
        }
        Ok(true)
    }

    fn start_add_mode(&mut self) {
        self.form_data = Some(FormData::new());
        self.mode = AppMode::AddEntry;
        self.messages.clear();
        self.push_message(
            MessageType::Info,
            "Log activity - Tab/↑↓ move between fields, 1-6 pick a category, Enter saves",
        );
    }

    fn start_edit_mode(&mut self) {
        let Some(record) = self.editor.selected_record() else {
            return;
        };
        self.form_data = Some(FormData::from_record(record));
        self.mode = AppMode::EditRow;
        self.messages.clear();
        self.push_message(
            MessageType::Info,
            format!("Editing row {} - Enter keeps the change, Esc cancels", self.editor.selected() + 1),
        );
    }

    fn close_form(&mut self) {
        self.form_data = None;
        self.mode = AppMode::Normal;
        self.messages.clear();
    }

    /// Append the record to the store and mirror it in the table buffer
    fn save_new_record(&mut self, record: ActivityRecord) {
        let date = record.date;
        let text = record.to_string();

        match self.session.append(record.clone()) {
            Ok(()) => {
                info!(record = %text, "activity logged");
                if self.editor.is_dirty() {
                    self.editor.push_saved(record);
                } else {
                    self.editor.reset(self.session.records());
                }
                self.refresh_summary();
                self.close_form();
                self.push_message(MessageType::Success, format!("Activity saved: {}", text));

                let over = self
                    .summary
                    .days_over_limit()
                    .iter()
                    .find(|(d, _)| *d == date)
                    .map(|(_, total)| *total);
                if let Some(day_total) = over {
                    self.push_message(
                        MessageType::Warning,
                        format!(
                            "{} now totals {}, over the 24h limit",
                            utils::format_date(date),
                            utils::format_hours(day_total)
                        ),
                    );
                }
            }
            Err(e) => {
                warn!(error = %e, "failed to save new activity");
                self.push_message(MessageType::Error, format!("Could not save: {}", e));
            }
        }
    }

    /// Save the table buffer over the store
    fn apply_table_changes(&mut self) {
        if !self.editor.is_dirty() {
            self.push_message(MessageType::Info, "No table changes to apply");
            return;
        }

        match self.session.replace(self.editor.to_records()) {
            Ok(()) => {
                self.editor.mark_saved();
                self.refresh_summary();
                self.push_message(
                    MessageType::Success,
                    format!("Table saved ({} records)", self.session.len()),
                );
            }
            Err(e) => {
                warn!(error = %e, "failed to apply table changes");
                self.push_message(
                    MessageType::Error,
                    format!("Could not save table, changes kept: {}", e),
                );
            }
        }
    }

    fn refresh_summary(&mut self) {
        self.summary = self.session.summary();
        debug!(
            records = self.summary.record_count,
            total = self.summary.total_hours,
            "summary refreshed"
        );
    }

    fn push_message(&mut self, message_type: MessageType, text: impl Into<String>) {
        self.messages.push(Message::new(message_type, text));
    }
}

/// Apply a key press to a form
fn edit_form(form: &mut FormData, event: KeyEvent) -> FormInput {
    let on_category = form.current_field == FormField::Category;

    match event.code {
        KeyCode::Esc => return FormInput::Cancel,
        KeyCode::Enter => return FormInput::Submit,
        KeyCode::Tab | KeyCode::Down => form.next_field(),
        KeyCode::BackTab | KeyCode::Up => form.previous_field(),
        KeyCode::Left if on_category => form.cycle_category(false),
        KeyCode::Right if on_category => form.cycle_category(true),
        KeyCode::Char(' ') if on_category => form.cycle_category(true),
        KeyCode::Char(c) if on_category => {
            if let Some(number) = c.to_digit(10) {
                form.select_category(number as usize);
            }
        }
        KeyCode::Left => form.move_cursor_left(),
        KeyCode::Right => form.move_cursor_right(),
        KeyCode::Home => form.move_cursor_to_start(),
        KeyCode::End => form.move_cursor_to_end(),
        KeyCode::Backspace => form.delete_char_before(),
        KeyCode::Delete => form.delete_char_at(),
        KeyCode::Char(c) => form.insert_char(c),
        _ => {}
    }
    FormInput::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Category;
    use crate::store::CsvStore;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_event(key(KeyCode::Char(c))).unwrap();
        }
    }

    fn clear_field(app: &mut App) {
        app.handle_event(key(KeyCode::End)).unwrap();
        for _ in 0..20 {
            app.handle_event(key(KeyCode::Backspace)).unwrap();
        }
    }

    fn record(day: u32, category: Category, hours: f64) -> ActivityRecord {
        ActivityRecord::new(NaiveDate::from_ymd_opt(2024, 1, day).unwrap(), category, hours)
    }

    fn app_with(records: Vec<ActivityRecord>) -> (TempDir, App) {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvStore::new(dir.path().join("data.csv"));
        store.save(&records).unwrap();
        let (session, error) = Session::open(store);
        assert!(error.is_none());
        (dir, App::new(session, None))
    }

    fn saved(dir: &TempDir) -> Vec<ActivityRecord> {
        CsvStore::new(dir.path().join("data.csv")).try_load().unwrap()
    }

    #[test]
    fn test_add_entry_flow() {
        let (dir, mut app) = app_with(vec![record(1, Category::Work, 3.0)]);

        app.handle_event(key(KeyCode::Char('a'))).unwrap();
        assert_eq!(app.mode, AppMode::AddEntry);

        clear_field(&mut app);
        type_text(&mut app, "2024-01-02");
        app.handle_event(key(KeyCode::Tab)).unwrap();
        type_text(&mut app, "3");
        app.handle_event(key(KeyCode::Tab)).unwrap();
        clear_field(&mut app);
        type_text(&mut app, "2,5");
        app.handle_event(key(KeyCode::Enter)).unwrap();

        assert_eq!(app.mode, AppMode::Normal);
        let expected = vec![record(1, Category::Work, 3.0), record(2, Category::Sleep, 2.5)];
        assert_eq!(app.session.records(), expected.as_slice());
        assert_eq!(saved(&dir), expected);
        assert_eq!(app.summary.total_hours, 5.5);
        assert_eq!(app.editor.rows(), expected.as_slice());
    }

    #[test]
    fn test_invalid_form_stays_open() {
        let (dir, mut app) = app_with(Vec::new());

        app.handle_event(key(KeyCode::Char('a'))).unwrap();
        app.handle_event(key(KeyCode::Up)).unwrap();
        clear_field(&mut app);
        type_text(&mut app, "30");
        app.handle_event(key(KeyCode::Enter)).unwrap();

        assert_eq!(app.mode, AppMode::AddEntry);
        assert!(app.session.is_empty());
        assert!(saved(&dir).is_empty());
        assert_eq!(
            app.messages.last().map(|m| m.message_type),
            Some(MessageType::Error)
        );

        app.handle_event(key(KeyCode::Esc)).unwrap();
        assert_eq!(app.mode, AppMode::Normal);
        assert!(app.form_data.is_none());
    }

    #[test]
    fn test_table_edits_are_applied_with_u() {
        let (dir, mut app) = app_with(vec![
            record(1, Category::Work, 3.0),
            record(1, Category::Sleep, 8.0),
            record(2, Category::Work, 2.0),
        ]);

        // Row keys do nothing outside the Data tab
        app.handle_event(key(KeyCode::Char('d'))).unwrap();
        assert!(!app.editor.is_dirty());

        app.handle_event(key(KeyCode::Tab)).unwrap();
        assert_eq!(app.tab, Tab::Data);
        app.handle_event(key(KeyCode::Down)).unwrap();
        app.handle_event(key(KeyCode::Char('d'))).unwrap();
        assert!(app.editor.is_dirty());
        assert_eq!(app.session.len(), 3);

        app.handle_event(key(KeyCode::Char('e'))).unwrap();
        assert_eq!(app.mode, AppMode::EditRow);
        app.handle_event(key(KeyCode::Tab)).unwrap();
        app.handle_event(key(KeyCode::Char('4'))).unwrap();
        app.handle_event(key(KeyCode::Enter)).unwrap();
        assert_eq!(app.mode, AppMode::Normal);

        app.handle_event(key(KeyCode::Char('u'))).unwrap();
        let expected = vec![record(1, Category::Work, 3.0), record(2, Category::Gym, 2.0)];
        assert_eq!(saved(&dir), expected);
        assert_eq!(app.session.records(), expected.as_slice());
        assert!(!app.editor.is_dirty());
        assert_eq!(app.summary.total_hours, 5.0);
    }

    #[test]
    fn test_reset_discards_table_edits() {
        let original = vec![record(1, Category::Work, 3.0)];
        let (dir, mut app) = app_with(original.clone());

        app.handle_event(key(KeyCode::Tab)).unwrap();
        app.handle_event(key(KeyCode::Char('n'))).unwrap();
        assert_eq!(app.editor.rows().len(), 2);
        app.handle_event(key(KeyCode::Char('r'))).unwrap();

        assert_eq!(app.editor.rows(), original.as_slice());
        assert_eq!(saved(&dir), original);
    }

    #[test]
    fn test_add_while_table_dirty_keeps_pending_edits() {
        let (dir, mut app) = app_with(vec![record(1, Category::Work, 3.0)]);

        app.handle_event(key(KeyCode::Tab)).unwrap();
        app.handle_event(key(KeyCode::Char('d'))).unwrap();

        app.handle_event(key(KeyCode::Char('a'))).unwrap();
        app.handle_event(key(KeyCode::Enter)).unwrap();

        // The new record is saved next to the untouched stored row
        assert_eq!(saved(&dir).len(), 2);
        // The buffer still has the deletion pending, plus the new row
        assert!(app.editor.is_dirty());
        assert_eq!(app.editor.rows().len(), 1);
        assert_eq!(app.editor.rows()[0].category, Category::Work);
        assert_eq!(app.editor.rows()[0].date, utils::today());
    }

    #[test]
    fn test_quit_with_pending_changes_needs_confirmation() {
        let (_dir, mut app) = app_with(vec![record(1, Category::Work, 3.0)]);
        assert!(!app.handle_event(key(KeyCode::Char('q'))).unwrap());

        let (_dir, mut app) = app_with(vec![record(1, Category::Work, 3.0)]);
        app.handle_event(key(KeyCode::Tab)).unwrap();
        app.handle_event(key(KeyCode::Char('n'))).unwrap();
        assert!(app.handle_event(key(KeyCode::Char('q'))).unwrap());
        assert!(!app.handle_event(key(KeyCode::Char('q'))).unwrap());
    }

    #[test]
    fn test_load_error_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let session = Session::with_records(CsvStore::new(dir.path().join("data.csv")), Vec::new());
        let app = App::new(session, Some(StoreError::MissingColumn("Horas")));
        assert_eq!(app.messages[0].message_type, MessageType::Error);
        assert!(app.summary.is_empty());
    }

    #[test]
    fn test_help_toggle() {
        let (_dir, mut app) = app_with(Vec::new());
        app.handle_event(key(KeyCode::Char('?'))).unwrap();
        assert_eq!(app.mode, AppMode::Help);
        assert!(app.handle_event(key(KeyCode::Char('q'))).unwrap());
        assert_eq!(app.mode, AppMode::Normal);
    }
}

// Made with Bob
