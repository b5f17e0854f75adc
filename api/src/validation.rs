use sports_hub_http_errors::FieldMessages;

use crate::Error;

/// Request payloads that check their own field constraints before touching the database.
pub trait Validate {
    fn validate(&self) -> Result<(), Error>;
}

/// Collects per-field messages and turns them into a single validation error.
#[derive(Debug, Default)]
pub struct FieldErrors(FieldMessages);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn required(&mut self, field: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.add(field, "This field is required.");
        }
        self
    }

    pub fn max_length(&mut self, field: &str, value: &str, max: usize) -> &mut Self {
        if value.chars().count() > max {
            self.add(
                field,
                format!("Ensure this field has no more than {max} characters."),
            );
        }
        self
    }

    pub fn min_length(&mut self, field: &str, value: &str, min: usize) -> &mut Self {
        if value.chars().count() < min {
            self.add(
                field,
                format!("Ensure this field has at least {min} characters."),
            );
        }
        self
    }

    pub fn email(&mut self, field: &str, value: &str) -> &mut Self {
        if !is_valid_email(value) {
            self.add(field, "Enter a valid email address.");
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn messages(&self) -> &FieldMessages {
        &self.0
    }

    pub fn into_result(self) -> Result<(), Error> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(self.0))
        }
    }
}

/// A deliberately loose check: one `@`, something on both sides, and a dot in the domain.
pub fn is_valid_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && !value.chars().any(char::is_whitespace)
        && domain
            .split('.')
            .filter(|part| !part.is_empty())
            .count()
            >= 2
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_format() {
        assert!(is_valid_email("fan@example.com"));
        assert!(is_valid_email("first.last@sub.example.org"));
        assert!(!is_valid_email("fan"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("fan@"));
        assert!(!is_valid_email("fan@localhost"));
        assert!(!is_valid_email("fan@@example.com"));
        assert!(!is_valid_email("a fan@example.com"));
    }

    #[test]
    fn collects_messages_per_field() {
        let mut errors = FieldErrors::new();
        errors
            .required("title", "")
            .max_length("title", "", 30)
            .max_length("name", "abcdef", 5)
            .min_length("password", "short", 8);

        let messages = errors.messages();
        assert_eq!(messages["title"], vec!["This field is required."]);
        assert_eq!(
            messages["name"],
            vec!["Ensure this field has no more than 5 characters."]
        );
        assert_eq!(messages.len(), 3);
        assert!(errors.into_result().is_err());
    }

    #[test]
    fn length_counts_characters() {
        let mut errors = FieldErrors::new();
        errors.max_length("type", "فوتبال", 10);
        assert!(errors.is_empty());
    }
}
