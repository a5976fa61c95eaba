//! The validation rule set shared by every layer that checks task input.
//!
//! The bounds live here as named constants so the schema layer and the
//! business layer never re-derive them independently.

use chrono::NaiveDate;

/// Minimum title length, counted on the trimmed string.
pub const TITLE_MIN_CHARS: u64 = 3;
/// Maximum title length, counted on the raw (untrimmed) string.
pub const TITLE_MAX_CHARS: u64 = 100;
/// Maximum description length.
pub const DESCRIPTION_MAX_CHARS: u64 = 1000;

/// Rejection reasons for task and subtask creation.
///
/// Each variant carries a stable machine-readable code (`code()`) that is
/// part of the wire contract. Failures are terminal for the request; none
/// are retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CreateError {
    #[error("Title is required")]
    TitleRequired,
    #[error("Title must have at least {TITLE_MIN_CHARS} characters")]
    TitleTooShort,
    #[error("Title cannot exceed {TITLE_MAX_CHARS} characters")]
    TitleTooLong,
    #[error("Description cannot exceed {DESCRIPTION_MAX_CHARS} characters")]
    DescriptionTooLong,
    #[error("Due date cannot be in the past")]
    DueDateInPast,
    #[error("Parent task not found")]
    TaskNotFound,
}

impl CreateError {
    /// Returns the stable machine code reported to API clients.
    pub fn code(&self) -> &'static str {
        match self {
            CreateError::TitleRequired => "titleRequired",
            CreateError::TitleTooShort => "titleTooShort",
            CreateError::TitleTooLong => "titleTooLong",
            CreateError::DescriptionTooLong => "descriptionTooLong",
            CreateError::DueDateInPast => "dueDateInPast",
            CreateError::TaskNotFound => "taskNotFound",
        }
    }
}

/// Checks a title in the fixed order: required, too short, too long.
///
/// The lower bound is checked against the trimmed string while the upper
/// bound is checked against the raw string. This asymmetry is intentional:
/// it is the observed behavior of the reference system and part of the
/// contract.
pub fn check_title(title: &str) -> Result<(), CreateError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(CreateError::TitleRequired);
    }
    if (trimmed.chars().count() as u64) < TITLE_MIN_CHARS {
        return Err(CreateError::TitleTooShort);
    }
    if (title.chars().count() as u64) > TITLE_MAX_CHARS {
        return Err(CreateError::TitleTooLong);
    }
    Ok(())
}

/// Checks an optional description against the length bound.
pub fn check_description(description: Option<&str>) -> Result<(), CreateError> {
    if let Some(description) = description {
        if (description.chars().count() as u64) > DESCRIPTION_MAX_CHARS {
            return Err(CreateError::DescriptionTooLong);
        }
    }
    Ok(())
}

/// Checks an optional due date against `today`, comparing calendar days
/// only. A due date equal to today is accepted.
pub fn check_due_date(due_date: Option<NaiveDate>, today: NaiveDate) -> Result<(), CreateError> {
    if let Some(due_date) = due_date {
        if due_date < today {
            return Err(CreateError::DueDateInPast);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Days;

    #[test]
    fn rejects_missing_or_whitespace_title_as_required() {
        assert_eq!(check_title(""), Err(CreateError::TitleRequired));
        assert_eq!(check_title("   "), Err(CreateError::TitleRequired));
        assert_eq!(check_title("\t\n"), Err(CreateError::TitleRequired));
    }

    #[test]
    fn rejects_title_shorter_than_three_trimmed_chars() {
        assert_eq!(check_title("ab"), Err(CreateError::TitleTooShort));
        assert_eq!(check_title("  ab  "), Err(CreateError::TitleTooShort));
        assert_eq!(check_title("abc"), Ok(()));
    }

    #[test]
    fn upper_bound_counts_raw_length_not_trimmed() {
        let exactly_100 = "a".repeat(100);
        assert_eq!(check_title(&exactly_100), Ok(()));

        let raw_101 = "a".repeat(101);
        assert_eq!(check_title(&raw_101), Err(CreateError::TitleTooLong));

        // 101 spaces plus three letters trims to a valid title but fails
        // on raw length. Preserved source behavior.
        let padded = format!("{}abc", " ".repeat(101));
        assert_eq!(check_title(&padded), Err(CreateError::TitleTooLong));
    }

    #[test]
    fn length_is_counted_in_chars_not_bytes() {
        // 100 multi-byte characters are within bounds even though the byte
        // length far exceeds 100.
        let title = "ü".repeat(100);
        assert_eq!(check_title(&title), Ok(()));
    }

    #[test]
    fn description_bound_is_one_thousand_chars() {
        assert_eq!(check_description(None), Ok(()));
        assert_eq!(check_description(Some(&"d".repeat(1000))), Ok(()));
        assert_eq!(
            check_description(Some(&"d".repeat(1001))),
            Err(CreateError::DescriptionTooLong)
        );
    }

    #[test]
    fn due_date_before_today_is_rejected() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 26).unwrap();
        let yesterday = today.checked_sub_days(Days::new(1)).unwrap();
        let tomorrow = today.checked_add_days(Days::new(1)).unwrap();

        assert_eq!(
            check_due_date(Some(yesterday), today),
            Err(CreateError::DueDateInPast)
        );
        assert_eq!(check_due_date(Some(today), today), Ok(()));
        assert_eq!(check_due_date(Some(tomorrow), today), Ok(()));
        assert_eq!(check_due_date(None, today), Ok(()));
    }

    #[test]
    fn error_codes_are_stable() {
        assert_eq!(CreateError::TitleRequired.code(), "titleRequired");
        assert_eq!(CreateError::TitleTooShort.code(), "titleTooShort");
        assert_eq!(CreateError::TitleTooLong.code(), "titleTooLong");
        assert_eq!(CreateError::DescriptionTooLong.code(), "descriptionTooLong");
        assert_eq!(CreateError::DueDateInPast.code(), "dueDateInPast");
        assert_eq!(CreateError::TaskNotFound.code(), "taskNotFound");
    }
}
