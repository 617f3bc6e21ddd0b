//! Incoming request bodies and their validation rules.
//!
//! Missing fields deserialize to empty strings so that "field absent" and
//! "field blank" are reported through the same validation error.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};

/// Validation applied to a request body after it has been deserialized.
pub trait Validate {
    fn validate(&self) -> Result<(), CoreError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherRequest {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRequest {
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentRequest {
    #[serde(default)]
    pub name: String,
}

impl Validate for StudentRequest {
    fn validate(&self) -> Result<(), CoreError> {
        require("name", &self.name)?;
        require("email", &self.email)?;
        if !is_valid_email(&self.email) {
            return Err(CoreError::invalid("email", "must be a valid email address"));
        }
        Ok(())
    }
}

impl Validate for TeacherRequest {
    fn validate(&self) -> Result<(), CoreError> {
        require("name", &self.name)
    }
}

impl Validate for CourseRequest {
    fn validate(&self) -> Result<(), CoreError> {
        require("title", &self.title)
    }
}

impl Validate for DepartmentRequest {
    fn validate(&self) -> Result<(), CoreError> {
        require("name", &self.name)
    }
}

fn require(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::invalid(field, "is required"));
    }
    Ok(())
}

/// Accepts `local@domain.tld`: exactly one `@`, no whitespace, a dot-atom
/// local part and a dotted domain with non-empty labels.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if domain.contains('@') || !domain.contains('.') || !is_valid_local_part(local) {
        return false;
    }
    domain.split('.').all(|label| {
        !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_alphanumeric() || c == '-')
    })
}

/// Dot-separated runs of RFC 5322 `atext`: no leading, trailing or doubled dots.
fn is_valid_local_part(local: &str) -> bool {
    const SPECIALS: &str = "!#$%&'*+/=?^_`{|}~-";
    local.split('.').all(|atom| {
        !atom.is_empty()
            && atom
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || SPECIALS.contains(c))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_email_shapes() {
        assert!(is_valid_email("john@example.com"));
        assert!(is_valid_email("first.last+tag@school.co.uk"));
    }

    #[test]
    fn rejects_malformed_emails() {
        for bad in ["", "john", "john@", "@example.com", "john@example", "jo hn@example.com", "a@b@c.com", "john@.com", "john@example..com"] {
            assert!(!is_valid_email(bad), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn local_part_is_limited_to_atext_and_dots() {
        assert!(is_valid_email("o'brien_{x}@example.com"));
        for bad in ["a<b>@x.com", "a\"b@x.com", "a,b@x.com", "a(b)@x.com", ".john@x.com", "john.@x.com", "jo..hn@x.com"] {
            assert!(!is_valid_email(bad), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn student_request_requires_both_fields() {
        let missing_name = StudentRequest { name: " ".into(), email: "x@example.com".into() };
        assert_eq!(missing_name.validate(), Err(CoreError::invalid("name", "is required")));

        let bad_email = StudentRequest { name: "John".into(), email: "nope".into() };
        assert!(matches!(bad_email.validate(), Err(CoreError::InvalidInput(field, _)) if field == "email"));

        let ok = StudentRequest { name: "John".into(), email: "john@example.com".into() };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn missing_fields_deserialize_as_blank_and_fail_validation() {
        let course: CourseRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(course.title, "");
        assert!(course.validate().is_err());

        let department: DepartmentRequest = serde_json::from_str(r#"{"name":"Physics"}"#).unwrap();
        assert!(department.validate().is_ok());
    }
}
