//! Persistence entities.
//!
//! These are the records the repositories read and write. Relation fields
//! (`courses`, `students`, `teacher`, ...) are filled in by eager loading and
//! are empty on a freshly built entity that has not been read back yet.

/// Storage-assigned identifier. Zero means "not yet saved".
pub type Id = i64;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Student {
    pub id: Id,
    pub name: String,
    pub email: String,
    /// Enrolled courses, each with its teacher loaded.
    pub courses: Vec<Course>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Teacher {
    pub id: Id,
    pub name: String,
    /// Courses whose `teacher_id` points at this teacher.
    pub courses: Vec<Course>,
    /// Departments this teacher heads.
    pub departments: Vec<Department>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Course {
    pub id: Id,
    pub title: String,
    pub teacher_id: Option<Id>,
    pub teacher: Option<Teacher>,
    pub students: Vec<Student>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Department {
    pub id: Id,
    pub name: String,
    pub head_of_department_id: Option<Id>,
    pub head_of_department: Option<Teacher>,
}

impl Student {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            ..Default::default()
        }
    }
}

impl Teacher {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

impl Course {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }
}

impl Department {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}
