//! JSON projections of the entities returned to clients.
//!
//! Top-level responses carry their direct relations as summaries. Summaries
//! never expand further, so a course's teacher inside a student response does
//! not list that teacher's own courses.

use crate::structs::{Course, Department, Id, Student, Teacher};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherSummary {
    pub id: Id,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentSummary {
    pub id: Id,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseSummary {
    pub id: Id,
    pub title: String,
    /// `null` when the course has no teacher, and inside a teacher's own
    /// course list, which does not repeat the teacher.
    pub teacher: Option<TeacherSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentSummary {
    pub id: Id,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentResponse {
    pub id: Id,
    pub name: String,
    pub email: String,
    pub courses: Vec<CourseSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherResponse {
    pub id: Id,
    pub name: String,
    pub courses: Vec<CourseSummary>,
    pub departments: Vec<DepartmentSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseResponse {
    pub id: Id,
    pub title: String,
    pub teacher: Option<TeacherSummary>,
    pub students: Vec<StudentSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentResponse {
    pub id: Id,
    pub name: String,
    pub head_of_department: Option<TeacherSummary>,
}

// --- Summaries ---

impl From<&Teacher> for TeacherSummary {
    fn from(teacher: &Teacher) -> Self {
        Self {
            id: teacher.id,
            name: teacher.name.clone(),
        }
    }
}

impl From<&Student> for StudentSummary {
    fn from(student: &Student) -> Self {
        Self {
            id: student.id,
            name: student.name.clone(),
            email: student.email.clone(),
        }
    }
}

impl From<&Course> for CourseSummary {
    fn from(course: &Course) -> Self {
        Self {
            id: course.id,
            title: course.title.clone(),
            teacher: course.teacher.as_ref().map(TeacherSummary::from),
        }
    }
}

impl From<&Department> for DepartmentSummary {
    fn from(department: &Department) -> Self {
        Self {
            id: department.id,
            name: department.name.clone(),
        }
    }
}

// --- Full responses ---

impl From<Student> for StudentResponse {
    fn from(student: Student) -> Self {
        Self {
            courses: student.courses.iter().map(CourseSummary::from).collect(),
            id: student.id,
            name: student.name,
            email: student.email,
        }
    }
}

impl From<Teacher> for TeacherResponse {
    fn from(teacher: Teacher) -> Self {
        Self {
            courses: teacher.courses.iter().map(CourseSummary::from).collect(),
            departments: teacher.departments.iter().map(DepartmentSummary::from).collect(),
            id: teacher.id,
            name: teacher.name,
        }
    }
}

impl From<Course> for CourseResponse {
    fn from(course: Course) -> Self {
        Self {
            teacher: course.teacher.as_ref().map(TeacherSummary::from),
            students: course.students.iter().map(StudentSummary::from).collect(),
            id: course.id,
            title: course.title,
        }
    }
}

impl From<Department> for DepartmentResponse {
    fn from(department: Department) -> Self {
        Self {
            head_of_department: department.head_of_department.as_ref().map(TeacherSummary::from),
            id: department.id,
            name: department.name,
        }
    }
}
