//! In-process storage backend.
//!
//! Mirrors the PostgreSQL schema closely enough that services behave the same
//! on either backend: per-table ID sequences starting at 1, `id` ordering,
//! a duplicate-free junction, `ON DELETE SET NULL` for teacher references and
//! `ON DELETE CASCADE` for enrollments.

use super::{
    offset, CourseRepository, DepartmentRepository, StudentRepository, TeacherRepository,
};
use crate::error::DbError;
use async_trait::async_trait;
use core_types::{Course, Department, EntityKind, Id, Student, Teacher};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
struct StudentRecord {
    name: String,
    email: String,
}

#[derive(Debug, Clone)]
struct CourseRecord {
    title: String,
    teacher_id: Option<Id>,
}

#[derive(Debug, Clone)]
struct DepartmentRecord {
    name: String,
    head_of_department_id: Option<Id>,
}

#[derive(Debug, Default)]
struct Tables {
    last_student_id: Id,
    last_teacher_id: Id,
    last_course_id: Id,
    last_department_id: Id,
    students: BTreeMap<Id, StudentRecord>,
    teachers: BTreeMap<Id, String>,
    courses: BTreeMap<Id, CourseRecord>,
    departments: BTreeMap<Id, DepartmentRecord>,
    /// (course_id, student_id)
    enrollments: BTreeSet<(Id, Id)>,
}

/// Shared in-memory tables. Cloning yields another handle to the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn page_of<T: Clone>(map: &BTreeMap<Id, T>, page: i64, limit: i64) -> Vec<(Id, T)> {
    let skip = usize::try_from(offset(page, limit)).unwrap_or(0);
    let take = usize::try_from(limit).unwrap_or(0);
    map.iter()
        .skip(skip)
        .take(take)
        .map(|(id, record)| (*id, record.clone()))
        .collect()
}

impl Tables {
    fn teacher_summary(&self, id: Id) -> Option<Teacher> {
        self.teachers.get(&id).map(|name| Teacher {
            id,
            name: name.clone(),
            ..Default::default()
        })
    }

    /// A course row with its teacher joined in, relations otherwise empty.
    fn course_row(&self, id: Id, record: &CourseRecord) -> Course {
        Course {
            id,
            title: record.title.clone(),
            teacher_id: record.teacher_id,
            teacher: record.teacher_id.and_then(|t| self.teacher_summary(t)),
            students: Vec::new(),
        }
    }

    fn department_row(&self, id: Id, record: &DepartmentRecord) -> Department {
        Department {
            id,
            name: record.name.clone(),
            head_of_department_id: record.head_of_department_id,
            head_of_department: record.head_of_department_id.and_then(|t| self.teacher_summary(t)),
        }
    }

    fn load_student(&self, id: Id, record: &StudentRecord) -> Student {
        let courses = self
            .enrollments
            .iter()
            .filter(|(_, student_id)| *student_id == id)
            .filter_map(|(course_id, _)| {
                self.courses
                    .get(course_id)
                    .map(|course| self.course_row(*course_id, course))
            })
            .collect();
        Student {
            id,
            name: record.name.clone(),
            email: record.email.clone(),
            courses,
        }
    }

    fn load_teacher(&self, id: Id, name: &str) -> Teacher {
        let courses = self
            .courses
            .iter()
            .filter(|(_, c)| c.teacher_id == Some(id))
            .map(|(course_id, c)| Course {
                id: *course_id,
                title: c.title.clone(),
                teacher_id: c.teacher_id,
                ..Default::default()
            })
            .collect();
        let departments = self
            .departments
            .iter()
            .filter(|(_, d)| d.head_of_department_id == Some(id))
            .map(|(department_id, d)| Department {
                id: *department_id,
                name: d.name.clone(),
                head_of_department_id: d.head_of_department_id,
                head_of_department: None,
            })
            .collect();
        Teacher {
            id,
            name: name.to_string(),
            courses,
            departments,
        }
    }

    fn load_course(&self, id: Id, record: &CourseRecord) -> Course {
        let mut course = self.course_row(id, record);
        course.students = self
            .enrollments
            .range((id, Id::MIN)..=(id, Id::MAX))
            .filter_map(|(_, student_id)| {
                self.students.get(student_id).map(|s| Student {
                    id: *student_id,
                    name: s.name.clone(),
                    email: s.email.clone(),
                    courses: Vec::new(),
                })
            })
            .collect();
        course
    }
}

#[async_trait]
impl StudentRepository for MemoryStore {
    async fn exists_by_id(&self, id: Id) -> Result<bool, DbError> {
        Ok(self.tables.read().await.students.contains_key(&id))
    }

    async fn save(&self, mut student: Student) -> Result<Student, DbError> {
        let mut tables = self.tables.write().await;
        tables.last_student_id += 1;
        student.id = tables.last_student_id;
        let record = StudentRecord {
            name: student.name.clone(),
            email: student.email.clone(),
        };
        tables.students.insert(student.id, record);
        Ok(student)
    }

    async fn update(&self, student: Student) -> Result<Student, DbError> {
        let mut tables = self.tables.write().await;
        if let Some(record) = tables.students.get_mut(&student.id) {
            record.name = student.name;
            record.email = student.email;
        }
        let record = tables.students.get(&student.id).ok_or(DbError::NotFound)?;
        Ok(tables.load_student(student.id, record))
    }

    async fn find_by_id(&self, id: Id) -> Result<Student, DbError> {
        let tables = self.tables.read().await;
        let record = tables.students.get(&id).ok_or(DbError::NotFound)?;
        Ok(tables.load_student(id, record))
    }

    async fn find_all(&self, page: i64, limit: i64) -> Result<Vec<Student>, DbError> {
        let tables = self.tables.read().await;
        Ok(page_of(&tables.students, page, limit)
            .into_iter()
            .map(|(id, record)| tables.load_student(id, &record))
            .collect())
    }

    async fn delete_by_id(&self, id: Id) -> Result<(), DbError> {
        let mut tables = self.tables.write().await;
        if tables.students.remove(&id).is_some() {
            tables.enrollments.retain(|(_, student_id)| *student_id != id);
        }
        Ok(())
    }

    async fn count(&self) -> Result<i64, DbError> {
        Ok(self.tables.read().await.students.len() as i64)
    }

    async fn add_course(&self, student_id: Id, course_id: Id) -> Result<(), DbError> {
        let mut tables = self.tables.write().await;
        if !tables.courses.contains_key(&course_id) {
            return Err(DbError::MissingReference(EntityKind::Course));
        }
        if !tables.students.contains_key(&student_id) {
            return Err(DbError::MissingReference(EntityKind::Student));
        }
        tables.enrollments.insert((course_id, student_id));
        Ok(())
    }
}

#[async_trait]
impl TeacherRepository for MemoryStore {
    async fn exists_by_id(&self, id: Id) -> Result<bool, DbError> {
        Ok(self.tables.read().await.teachers.contains_key(&id))
    }

    async fn save(&self, mut teacher: Teacher) -> Result<Teacher, DbError> {
        let mut tables = self.tables.write().await;
        tables.last_teacher_id += 1;
        teacher.id = tables.last_teacher_id;
        tables.teachers.insert(teacher.id, teacher.name.clone());
        Ok(teacher)
    }

    async fn update(&self, teacher: Teacher) -> Result<Teacher, DbError> {
        let mut tables = self.tables.write().await;
        if let Some(name) = tables.teachers.get_mut(&teacher.id) {
            *name = teacher.name;
        }
        let name = tables.teachers.get(&teacher.id).ok_or(DbError::NotFound)?;
        Ok(tables.load_teacher(teacher.id, name))
    }

    async fn find_by_id(&self, id: Id) -> Result<Teacher, DbError> {
        let tables = self.tables.read().await;
        let name = tables.teachers.get(&id).ok_or(DbError::NotFound)?;
        Ok(tables.load_teacher(id, name))
    }

    async fn find_all(&self, page: i64, limit: i64) -> Result<Vec<Teacher>, DbError> {
        let tables = self.tables.read().await;
        Ok(page_of(&tables.teachers, page, limit)
            .into_iter()
            .map(|(id, name)| tables.load_teacher(id, &name))
            .collect())
    }

    async fn delete_by_id(&self, id: Id) -> Result<(), DbError> {
        let mut tables = self.tables.write().await;
        if tables.teachers.remove(&id).is_some() {
            for course in tables.courses.values_mut() {
                if course.teacher_id == Some(id) {
                    course.teacher_id = None;
                }
            }
            for department in tables.departments.values_mut() {
                if department.head_of_department_id == Some(id) {
                    department.head_of_department_id = None;
                }
            }
        }
        Ok(())
    }

    async fn count(&self) -> Result<i64, DbError> {
        Ok(self.tables.read().await.teachers.len() as i64)
    }
}

#[async_trait]
impl CourseRepository for MemoryStore {
    async fn exists_by_id(&self, id: Id) -> Result<bool, DbError> {
        Ok(self.tables.read().await.courses.contains_key(&id))
    }

    async fn save(&self, mut course: Course) -> Result<Course, DbError> {
        let mut tables = self.tables.write().await;
        if let Some(teacher_id) = course.teacher_id {
            if !tables.teachers.contains_key(&teacher_id) {
                return Err(DbError::MissingReference(EntityKind::Teacher));
            }
        }
        tables.last_course_id += 1;
        course.id = tables.last_course_id;
        let record = CourseRecord {
            title: course.title.clone(),
            teacher_id: course.teacher_id,
        };
        tables.courses.insert(course.id, record);
        Ok(course)
    }

    async fn update(&self, course: Course) -> Result<Course, DbError> {
        let mut tables = self.tables.write().await;
        if let Some(record) = tables.courses.get_mut(&course.id) {
            record.title = course.title;
        }
        let record = tables.courses.get(&course.id).ok_or(DbError::NotFound)?;
        Ok(tables.load_course(course.id, record))
    }

    async fn find_by_id(&self, id: Id) -> Result<Course, DbError> {
        let tables = self.tables.read().await;
        let record = tables.courses.get(&id).ok_or(DbError::NotFound)?;
        Ok(tables.load_course(id, record))
    }

    async fn find_all(&self, page: i64, limit: i64) -> Result<Vec<Course>, DbError> {
        let tables = self.tables.read().await;
        Ok(page_of(&tables.courses, page, limit)
            .into_iter()
            .map(|(id, record)| tables.load_course(id, &record))
            .collect())
    }

    async fn delete_by_id(&self, id: Id) -> Result<(), DbError> {
        let mut tables = self.tables.write().await;
        if tables.courses.remove(&id).is_some() {
            tables.enrollments.retain(|(course_id, _)| *course_id != id);
        }
        Ok(())
    }

    async fn count(&self) -> Result<i64, DbError> {
        Ok(self.tables.read().await.courses.len() as i64)
    }

    async fn set_teacher(&self, course_id: Id, teacher_id: Id) -> Result<(), DbError> {
        let mut tables = self.tables.write().await;
        if !tables.courses.contains_key(&course_id) {
            return Err(DbError::NotFound);
        }
        if !tables.teachers.contains_key(&teacher_id) {
            return Err(DbError::MissingReference(EntityKind::Teacher));
        }
        if let Some(course) = tables.courses.get_mut(&course_id) {
            course.teacher_id = Some(teacher_id);
        }
        Ok(())
    }
}

#[async_trait]
impl DepartmentRepository for MemoryStore {
    async fn exists_by_id(&self, id: Id) -> Result<bool, DbError> {
        Ok(self.tables.read().await.departments.contains_key(&id))
    }

    async fn save(&self, mut department: Department) -> Result<Department, DbError> {
        let mut tables = self.tables.write().await;
        if let Some(teacher_id) = department.head_of_department_id {
            if !tables.teachers.contains_key(&teacher_id) {
                return Err(DbError::MissingReference(EntityKind::Teacher));
            }
        }
        tables.last_department_id += 1;
        department.id = tables.last_department_id;
        let record = DepartmentRecord {
            name: department.name.clone(),
            head_of_department_id: department.head_of_department_id,
        };
        tables.departments.insert(department.id, record);
        Ok(department)
    }

    async fn update(&self, department: Department) -> Result<Department, DbError> {
        let mut tables = self.tables.write().await;
        if let Some(record) = tables.departments.get_mut(&department.id) {
            record.name = department.name;
        }
        let record = tables.departments.get(&department.id).ok_or(DbError::NotFound)?;
        Ok(tables.department_row(department.id, record))
    }

    async fn find_by_id(&self, id: Id) -> Result<Department, DbError> {
        let tables = self.tables.read().await;
        let record = tables.departments.get(&id).ok_or(DbError::NotFound)?;
        Ok(tables.department_row(id, record))
    }

    async fn find_all(&self, page: i64, limit: i64) -> Result<Vec<Department>, DbError> {
        let tables = self.tables.read().await;
        Ok(page_of(&tables.departments, page, limit)
            .into_iter()
            .map(|(id, record)| tables.department_row(id, &record))
            .collect())
    }

    async fn delete_by_id(&self, id: Id) -> Result<(), DbError> {
        self.tables.write().await.departments.remove(&id);
        Ok(())
    }

    async fn count(&self) -> Result<i64, DbError> {
        Ok(self.tables.read().await.departments.len() as i64)
    }

    async fn set_head(&self, department_id: Id, teacher_id: Id) -> Result<(), DbError> {
        let mut tables = self.tables.write().await;
        if !tables.departments.contains_key(&department_id) {
            return Err(DbError::NotFound);
        }
        if !tables.teachers.contains_key(&teacher_id) {
            return Err(DbError::MissingReference(EntityKind::Teacher));
        }
        if let Some(department) = tables.departments.get_mut(&department_id) {
            department.head_of_department_id = Some(teacher_id);
        }
        Ok(())
    }
}
