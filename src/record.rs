//! Activity records and their categories

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::utils;

/// Category of a logged activity.
///
/// The six known categories are stored with their Spanish labels so that
/// files written by earlier versions of the tracker keep loading. Any other
/// label found in a hand-edited file is preserved as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Work,
    Study,
    Sleep,
    Gym,
    Leisure,
    Transport,
    Other(String),
}

impl Category {
    /// The fixed categories offered by the form, in menu order
    pub const ALL: [Category; 6] = [
        Category::Work,
        Category::Study,
        Category::Sleep,
        Category::Gym,
        Category::Leisure,
        Category::Transport,
    ];

    /// Label written to the store
    pub fn label(&self) -> &str {
        match self {
            Category::Work => "Trabajo",
            Category::Study => "Estudio",
            Category::Sleep => "Sueño",
            Category::Gym => "Gimnasio",
            Category::Leisure => "Ocio",
            Category::Transport => "Transporte",
            Category::Other(label) => label,
        }
    }

    /// English name shown next to the label in menus
    pub fn english_name(&self) -> &str {
        match self {
            Category::Work => "Work",
            Category::Study => "Study",
            Category::Sleep => "Sleep",
            Category::Gym => "Gym",
            Category::Leisure => "Leisure",
            Category::Transport => "Transport",
            Category::Other(label) => label,
        }
    }

    /// 1-based position in the form menu, `None` for unknown labels
    pub fn menu_number(&self) -> Option<usize> {
        Self::ALL.iter().position(|c| c == self).map(|i| i + 1)
    }

    /// Category for a 1-based menu number
    pub fn from_menu_number(number: usize) -> Option<Category> {
        number
            .checked_sub(1)
            .and_then(|i| Self::ALL.get(i))
            .cloned()
    }

    /// Whether this is one of the six fixed categories
    pub fn is_known(&self) -> bool {
        !matches!(self, Category::Other(_))
    }

    /// Maps a stored label to a category without validation
    pub fn from_label(label: &str) -> Category {
        Self::ALL
            .iter()
            .find(|c| c.label() == label)
            .cloned()
            .unwrap_or_else(|| Category::Other(label.to_string()))
    }

    /// Parses user input: a menu number, the stored label or the English
    /// name, case-insensitively. Unknown input is rejected.
    pub fn parse_input(input: &str) -> Result<Category, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::MissingField("category".to_string()));
        }
        if let Ok(number) = trimmed.parse::<usize>() {
            return Self::from_menu_number(number)
                .ok_or_else(|| ValidationError::InvalidCategory(trimmed.to_string()));
        }

        let lowered = trimmed.to_lowercase();
        Self::ALL
            .iter()
            .find(|c| {
                c.label().to_lowercase() == lowered
                    || c.english_name().to_lowercase() == lowered
                    // "sueno" for keyboards without ñ
                    || c.label().to_lowercase().replace('ñ', "n") == lowered
            })
            .cloned()
            .ok_or_else(|| ValidationError::InvalidCategory(trimmed.to_string()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_input(s)
    }
}

impl From<String> for Category {
    fn from(label: String) -> Self {
        Category::from_label(label.trim())
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.label().to_string()
    }
}

/// One logged (date, category, hours) triple
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityRecord {
    pub date: NaiveDate,
    pub category: Category,
    pub hours: f64,
}

impl ActivityRecord {
    /// Create a record without validation (used for data read from the store)
    pub fn new(date: NaiveDate, category: Category, hours: f64) -> Self {
        Self {
            date,
            category,
            hours,
        }
    }

    /// Create a record from user input, enforcing the form constraints
    pub fn validated(
        date: NaiveDate,
        category: Category,
        hours: f64,
    ) -> Result<Self, ValidationError> {
        if !category.is_known() {
            return Err(ValidationError::InvalidCategory(category.label().to_string()));
        }
        utils::validate_hours(hours)?;
        Ok(Self::new(date, category, hours))
    }

    /// Parse and validate the three raw form fields
    pub fn from_input(date: &str, category: &str, hours: &str) -> Result<Self, ValidationError> {
        let date = utils::parse_date(date)?;
        let category = Category::parse_input(category)?;
        let hours = utils::parse_hours(hours)?;
        Self::validated(date, category, hours)
    }
}

impl fmt::Display for ActivityRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            utils::format_date(self.date),
            self.category,
            utils::format_hours(self.hours)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_round_trip() {
        for category in Category::ALL.iter() {
            assert_eq!(&Category::from_label(category.label()), category);
        }
        assert_eq!(
            Category::from_label("Meditación"),
            Category::Other("Meditación".to_string())
        );
    }

    #[test]
    fn test_parse_input_variants() {
        assert_eq!(Category::parse_input("work"), Ok(Category::Work));
        assert_eq!(Category::parse_input("Trabajo"), Ok(Category::Work));
        assert_eq!(Category::parse_input("SUEÑO"), Ok(Category::Sleep));
        assert_eq!(Category::parse_input("sueno"), Ok(Category::Sleep));
        assert_eq!(Category::parse_input("3"), Ok(Category::Sleep));
        assert_eq!(Category::parse_input("6"), Ok(Category::Transport));
        assert!(Category::parse_input("0").is_err());
        assert!(Category::parse_input("7").is_err());
        assert!(Category::parse_input("cooking").is_err());
        assert!(matches!(
            Category::parse_input("  "),
            Err(ValidationError::MissingField(_))
        ));
    }

    #[test]
    fn test_menu_numbers() {
        assert_eq!(Category::Work.menu_number(), Some(1));
        assert_eq!(Category::Transport.menu_number(), Some(6));
        assert_eq!(Category::Other("x".to_string()).menu_number(), None);
        assert_eq!(Category::from_menu_number(4), Some(Category::Gym));
        assert_eq!(Category::from_menu_number(0), None);
    }

    #[test]
    fn test_validated_record() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert!(ActivityRecord::validated(date, Category::Work, 8.0).is_ok());
        assert!(ActivityRecord::validated(date, Category::Work, 0.0).is_err());
        assert!(ActivityRecord::validated(date, Category::Work, 25.0).is_err());
        assert!(
            ActivityRecord::validated(date, Category::Other("Nap".to_string()), 1.0).is_err()
        );
    }

    #[test]
    fn test_from_input() {
        let record = ActivityRecord::from_input("2024/03/05", "gym", "1.5").unwrap();
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert_eq!(record.category, Category::Gym);
        assert_eq!(record.hours, 1.5);

        assert!(matches!(
            ActivityRecord::from_input("05/03/2024", "gym", "1.5"),
            Err(ValidationError::InvalidDateFormat(_))
        ));
    }

    #[test]
    fn test_display() {
        let record = ActivityRecord::new(
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            Category::Study,
            2.0,
        );
        assert_eq!(record.to_string(), "2024-01-02 Estudio 2.0 h");
    }
}
