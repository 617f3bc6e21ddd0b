use serde::{Deserialize, Serialize};
use std::fmt;

/// The four kinds of record the school domain persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Student,
    Teacher,
    Course,
    Department,
}

impl EntityKind {
    /// Lowercase singular name, as used in error messages ("course not found").
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Student => "student",
            EntityKind::Teacher => "teacher",
            EntityKind::Course => "course",
            EntityKind::Department => "department",
        }
    }

    /// Lowercase plural name, as used in collection routes and list errors.
    pub fn plural(&self) -> &'static str {
        match self {
            EntityKind::Student => "students",
            EntityKind::Teacher => "teachers",
            EntityKind::Course => "courses",
            EntityKind::Department => "departments",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
