//! PostgreSQL repositories.
//!
//! Relations are eager-loaded with one extra query per relation, keyed by the
//! owner IDs of the rows already fetched, so a page of N rows costs a fixed
//! number of round trips rather than N.

use core_types::{EntityKind, Id};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};
use std::collections::HashMap;

mod course;
mod department;
mod student;
mod teacher;

pub use course::PgCourseRepository;
pub use department::PgDepartmentRepository;
pub use student::PgStudentRepository;
pub use teacher::PgTeacherRepository;

// Constraint names declared in the migrations.
pub const FK_COURSES_TEACHER: &str = "fk_courses_teacher";
pub const FK_DEPARTMENTS_HEAD: &str = "fk_departments_head";
pub const FK_COURSE_STUDENT_COURSE: &str = "fk_course_student_course";
pub const FK_COURSE_STUDENT_STUDENT: &str = "fk_course_student_student";

/// The entity a violated foreign key points at.
pub fn referenced_entity(constraint: &str) -> Option<EntityKind> {
    match constraint {
        FK_COURSES_TEACHER | FK_DEPARTMENTS_HEAD => Some(EntityKind::Teacher),
        FK_COURSE_STUDENT_COURSE => Some(EntityKind::Course),
        FK_COURSE_STUDENT_STUDENT => Some(EntityKind::Student),
        _ => None,
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct StudentRow {
    pub id: i64,
    pub name: String,
    pub email: String,
}

#[derive(Debug, FromRow)]
pub(crate) struct TeacherRow {
    pub id: i64,
    pub name: String,
}

/// A course joined with the name of its teacher, if any.
#[derive(Debug, FromRow)]
pub(crate) struct CourseRow {
    pub id: i64,
    pub title: String,
    pub teacher_id: Option<i64>,
    pub teacher_name: Option<String>,
}

/// A department joined with the name of its head, if any.
#[derive(Debug, FromRow)]
pub(crate) struct DepartmentRow {
    pub id: i64,
    pub name: String,
    pub head_of_department_id: Option<i64>,
    pub head_name: Option<String>,
}

/// A related row tagged with the ID of the row that owns it, read from an
/// `owner_id` column next to the row's own columns.
#[derive(Debug)]
pub(crate) struct Owned<T> {
    pub owner_id: i64,
    pub row: T,
}

impl<'r, T> FromRow<'r, PgRow> for Owned<T>
where
    T: FromRow<'r, PgRow>,
{
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            owner_id: row.try_get("owner_id")?,
            row: T::from_row(row)?,
        })
    }
}

/// Groups related rows by owner, preserving the query's ordering within each group.
pub(crate) fn group_by_owner<T, U>(rows: Vec<Owned<T>>, map: impl Fn(T) -> U) -> HashMap<Id, Vec<U>> {
    let mut grouped: HashMap<Id, Vec<U>> = HashMap::new();
    for Owned { owner_id, row } in rows {
        grouped.entry(owner_id).or_default().push(map(row));
    }
    grouped
}

impl From<StudentRow> for core_types::Student {
    fn from(row: StudentRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            courses: Vec::new(),
        }
    }
}

impl From<TeacherRow> for core_types::Teacher {
    fn from(row: TeacherRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            ..Default::default()
        }
    }
}

impl From<CourseRow> for core_types::Course {
    fn from(row: CourseRow) -> Self {
        let teacher = match (row.teacher_id, row.teacher_name) {
            (Some(id), Some(name)) => Some(core_types::Teacher {
                id,
                name,
                ..Default::default()
            }),
            _ => None,
        };
        Self {
            id: row.id,
            title: row.title,
            teacher_id: row.teacher_id,
            teacher,
            students: Vec::new(),
        }
    }
}

impl From<DepartmentRow> for core_types::Department {
    fn from(row: DepartmentRow) -> Self {
        let head_of_department = match (row.head_of_department_id, row.head_name) {
            (Some(id), Some(name)) => Some(core_types::Teacher {
                id,
                name,
                ..Default::default()
            }),
            _ => None,
        };
        Self {
            id: row.id,
            name: row.name,
            head_of_department_id: row.head_of_department_id,
            head_of_department,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn foreign_keys_map_to_the_referenced_entity() {
        assert_eq!(referenced_entity(FK_COURSES_TEACHER), Some(EntityKind::Teacher));
        assert_eq!(referenced_entity(FK_DEPARTMENTS_HEAD), Some(EntityKind::Teacher));
        assert_eq!(referenced_entity(FK_COURSE_STUDENT_COURSE), Some(EntityKind::Course));
        assert_eq!(referenced_entity(FK_COURSE_STUDENT_STUDENT), Some(EntityKind::Student));
        assert_eq!(referenced_entity("students_pkey"), None);
    }

    #[test]
    fn group_by_owner_keeps_order_within_each_owner() {
        let rows = vec![
            Owned { owner_id: 1, row: TeacherRow { id: 10, name: "a".into() } },
            Owned { owner_id: 2, row: TeacherRow { id: 11, name: "b".into() } },
            Owned { owner_id: 1, row: TeacherRow { id: 12, name: "c".into() } },
        ];
        let grouped = group_by_owner(rows, |row| row.id);
        assert_eq!(grouped[&1], vec![10, 12]);
        assert_eq!(grouped[&2], vec![11]);
    }

    #[test]
    fn course_row_without_teacher_has_no_teacher() {
        let course: core_types::Course = CourseRow {
            id: 1,
            title: "Math".into(),
            teacher_id: None,
            teacher_name: None,
        }
        .into();
        assert!(course.teacher.is_none());
        assert!(course.students.is_empty());
    }
}
