//! Required-field validation rules.

/// Bootstrap class applied to invalid fields.
pub const INVALID_CLASS: &str = "is-invalid";

/// Outcome for one required field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldStatus {
    /// Has a non-blank value.
    Filled,
    /// Blank after trimming.
    Missing,
}

impl FieldStatus {
    /// Classify a raw field value.
    #[must_use]
    pub fn of(value: &str) -> Self {
        if value.trim().is_empty() {
            Self::Missing
        } else {
            Self::Filled
        }
    }
}

/// Check every required value; the form is valid when none is missing.
#[must_use]
pub fn check_required<'a, I>(values: I) -> (Vec<FieldStatus>, bool)
where
    I: IntoIterator<Item = &'a str>,
{
    let statuses: Vec<FieldStatus> = values.into_iter().map(FieldStatus::of).collect();
    let valid = statuses.iter().all(|status| *status == FieldStatus::Filled);
    (statuses, valid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_counts_as_missing() {
        let (statuses, valid) = check_required(["Ada", "   ", "\n"]);
        assert_eq!(
            statuses,
            vec![FieldStatus::Filled, FieldStatus::Missing, FieldStatus::Missing]
        );
        assert!(!valid);
    }

    #[test]
    fn no_required_fields_is_valid() {
        let (statuses, valid) = check_required(std::iter::empty());
        assert!(statuses.is_empty());
        assert!(valid);
    }
}
