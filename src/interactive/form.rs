//! Form handling for add/edit operations

use crate::error::ValidationError;
use crate::record::{ActivityRecord, Category};
use crate::utils;

/// Form field types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Date,
    Category,
    Hours,
}

impl FormField {
    /// Get all fields in order
    pub fn all() -> Vec<FormField> {
        vec![FormField::Date, FormField::Category, FormField::Hours]
    }

    /// Get the next field
    pub fn next(&self) -> FormField {
        match self {
            FormField::Date => FormField::Category,
            FormField::Category => FormField::Hours,
            FormField::Hours => FormField::Date,
        }
    }

    /// Get the previous field
    pub fn previous(&self) -> FormField {
        match self {
            FormField::Date => FormField::Hours,
            FormField::Category => FormField::Date,
            FormField::Hours => FormField::Category,
        }
    }

    /// Get field label
    pub fn label(&self) -> &'static str {
        match self {
            FormField::Date => "Date",
            FormField::Category => "Category",
            FormField::Hours => "Hours",
        }
    }
}

/// Form data for add/edit operations.
///
/// The category is picked from a fixed list, so only date and hours are
/// free text.
#[derive(Debug, Clone)]
pub struct FormData {
    pub date: String,
    pub category: Category,
    pub hours: String,
    pub current_field: FormField,
    pub cursor_position: usize,
}

impl FormData {
    /// New form for today, Work, 1 hour
    pub fn new() -> Self {
        let date = utils::format_date(utils::today());
        Self {
            cursor_position: date.chars().count(),
            date,
            category: Category::Work,
            hours: "1".to_string(),
            current_field: FormField::Date,
        }
    }

    /// Form prefilled from an existing record
    pub fn from_record(record: &ActivityRecord) -> Self {
        let date = utils::format_date(record.date);
        Self {
            cursor_position: date.chars().count(),
            date,
            category: record.category.clone(),
            hours: record.hours.to_string(),
            current_field: FormField::Date,
        }
    }

    /// Text shown for a field
    pub fn get_field_value(&self, field: FormField) -> String {
        match field {
            FormField::Date => self.date.clone(),
            FormField::Category => format!(
                "{} ({})",
                self.category.label(),
                self.category.english_name()
            ),
            FormField::Hours => self.hours.clone(),
        }
    }

    fn current_text_mut(&mut self) -> Option<&mut String> {
        match self.current_field {
            FormField::Date => Some(&mut self.date),
            FormField::Hours => Some(&mut self.hours),
            FormField::Category => None,
        }
    }

    /// Move to next field
    pub fn next_field(&mut self) {
        self.current_field = self.current_field.next();
        self.update_cursor_for_field();
    }

    /// Move to previous field
    pub fn previous_field(&mut self) {
        self.current_field = self.current_field.previous();
        self.update_cursor_for_field();
    }

    /// Cycle the category forward or backward through the known ones
    pub fn cycle_category(&mut self, forward: bool) {
        let count = Category::ALL.len();
        let next = match self.category.menu_number() {
            Some(n) if forward => n % count + 1,
            Some(n) => (n + count - 2) % count + 1,
            None => 1,
        };
        if let Some(category) = Category::from_menu_number(next) {
            self.category = category;
        }
    }

    /// Pick a category by its menu number (1-6); returns whether it matched
    pub fn select_category(&mut self, number: usize) -> bool {
        match Category::from_menu_number(number) {
            Some(category) => {
                self.category = category;
                true
            }
            None => false,
        }
    }

    /// Validate the form and build the record
    pub fn validate(&self) -> Result<ActivityRecord, ValidationError> {
        if self.date.trim().is_empty() {
            return Err(ValidationError::MissingField("date".to_string()));
        }
        if self.hours.trim().is_empty() {
            return Err(ValidationError::MissingField("hours".to_string()));
        }
        let date = utils::parse_date(&self.date)?;
        let hours = utils::parse_hours(&self.hours)?;
        ActivityRecord::validated(date, self.category.clone(), hours)
    }

    /// Insert character at cursor position
    pub fn insert_char(&mut self, c: char) {
        let pos = self.cursor_position;
        if let Some(field) = self.current_text_mut() {
            let byte = byte_offset(field, pos);
            field.insert(byte, c);
            self.cursor_position = pos.min(field.chars().count()) + 1;
        }
    }

    /// Delete character before cursor (backspace)
    pub fn delete_char_before(&mut self) {
        let pos = self.cursor_position;
        if pos == 0 {
            return;
        }
        if let Some(field) = self.current_text_mut() {
            let pos = pos.min(field.chars().count());
            if pos > 0 {
                let byte = byte_offset(field, pos - 1);
                field.remove(byte);
                self.cursor_position = pos - 1;
            }
        }
    }

    /// Delete character at cursor (delete key)
    pub fn delete_char_at(&mut self) {
        let pos = self.cursor_position;
        if let Some(field) = self.current_text_mut() {
            if pos < field.chars().count() {
                let byte = byte_offset(field, pos);
                field.remove(byte);
            }
        }
    }

    /// Move cursor left
    pub fn move_cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    /// Move cursor right
    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.field_len() {
            self.cursor_position += 1;
        }
    }

    /// Move cursor to start of field
    pub fn move_cursor_to_start(&mut self) {
        self.cursor_position = 0;
    }

    /// Move cursor to end of field
    pub fn move_cursor_to_end(&mut self) {
        self.cursor_position = self.field_len();
    }

    /// Update cursor position when changing fields
    pub fn update_cursor_for_field(&mut self) {
        self.cursor_position = self.field_len();
    }

    fn field_len(&self) -> usize {
        match self.current_field {
            FormField::Date => self.date.chars().count(),
            FormField::Hours => self.hours.chars().count(),
            FormField::Category => 0,
        }
    }
}

impl Default for FormData {
    fn default() -> Self {
        Self::new()
    }
}

fn byte_offset(s: &str, char_pos: usize) -> usize {
    s.char_indices()
        .nth(char_pos)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}


// Made with Bob
