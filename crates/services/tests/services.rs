//! Service integration tests on the in-memory backend.
//!
//! - Creation echoes the request and find-after-create returns the same data
//! - Relationship assignment reports the missing side and writes nothing
//! - Enrollment is idempotent
//! - Delete of a missing ID succeeds

use core_types::{CourseRequest, DepartmentRequest, EntityKind, StudentRequest, TeacherRequest};
use database::Repositories;
use services::{CourseService, DepartmentService, ServiceError, StudentService, TeacherService};

struct Services {
    students: StudentService,
    teachers: TeacherService,
    courses: CourseService,
    departments: DepartmentService,
}

fn test_services() -> Services {
    let repos = Repositories::in_memory();
    Services {
        students: StudentService::new(repos.students.clone(), repos.courses.clone()),
        teachers: TeacherService::new(repos.teachers.clone()),
        courses: CourseService::new(repos.courses.clone(), repos.teachers.clone()),
        departments: DepartmentService::new(repos.departments, repos.teachers),
    }
}

fn student(name: &str, email: &str) -> StudentRequest {
    StudentRequest {
        name: name.to_string(),
        email: email.to_string(),
    }
}

fn course(title: &str) -> CourseRequest {
    CourseRequest {
        title: title.to_string(),
    }
}

fn teacher(name: &str) -> TeacherRequest {
    TeacherRequest {
        name: name.to_string(),
    }
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_echoes_request_and_find_returns_it() {
    let svc = test_services();

    let created = svc
        .students
        .create_student(student("John Doe", "john@example.com"))
        .await
        .unwrap();
    assert_eq!(created.id, 1);
    assert_eq!(created.name, "John Doe");
    assert_eq!(created.email, "john@example.com");
    assert!(created.courses.is_empty());

    let found = svc.students.find_student_by_id(created.id).await.unwrap();
    assert_eq!(found, created);
}

#[tokio::test]
async fn update_replaces_scalar_fields_only() {
    let svc = test_services();
    let t = svc.teachers.create_teacher(teacher("Dr. Smith")).await.unwrap();
    let c = svc.courses.create_course(course("Math")).await.unwrap();
    svc.courses.set_teacher_to_course(c.id, t.id).await.unwrap();

    let updated = svc.courses.update_course(c.id, course("Algebra")).await.unwrap();
    assert_eq!(updated.title, "Algebra");
    assert_eq!(updated.teacher.map(|t| t.name), Some("Dr. Smith".to_string()));
}

#[tokio::test]
async fn update_of_missing_row_is_not_found() {
    let svc = test_services();
    let err = svc
        .departments
        .update_department(5, DepartmentRequest { name: "Science".into() })
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(EntityKind::Department)));
}

#[tokio::test]
async fn delete_of_missing_id_succeeds() {
    let svc = test_services();
    svc.students.delete_student_by_id(42).await.unwrap();
    svc.teachers.delete_teacher_by_id(42).await.unwrap();
    svc.courses.delete_course_by_id(42).await.unwrap();
    svc.departments.delete_department_by_id(42).await.unwrap();
}

#[tokio::test]
async fn find_all_pages_and_count_ignores_paging() {
    let svc = test_services();
    for i in 1..=3 {
        svc.teachers.create_teacher(teacher(&format!("t{i}"))).await.unwrap();
    }

    let page = svc.teachers.find_all_teachers(2, 2).await.unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].name, "t3");
    assert_eq!(svc.teachers.count().await.unwrap(), 3);
}

// ---------------------------------------------------------------------------
// Relationships
// ---------------------------------------------------------------------------

#[tokio::test]
async fn assignment_with_missing_side_is_not_found_and_writes_nothing() {
    let svc = test_services();
    let c = svc.courses.create_course(course("Math")).await.unwrap();

    let err = svc.courses.set_teacher_to_course(c.id, 99).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(EntityKind::Teacher)));
    let unchanged = svc.courses.find_course_by_id(c.id).await.unwrap();
    assert!(unchanged.teacher.is_none());

    let t = svc.teachers.create_teacher(teacher("Dr. Smith")).await.unwrap();
    let err = svc.courses.set_teacher_to_course(99, t.id).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(EntityKind::Course)));
    let teacher = svc.teachers.find_teacher_by_id(t.id).await.unwrap();
    assert!(teacher.courses.is_empty());
}

#[tokio::test]
async fn owner_is_checked_before_the_other_side() {
    let svc = test_services();
    let err = svc.departments.department_set_teacher(7, 8).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(EntityKind::Department)));

    let err = svc.students.add_course_to_student(7, 8).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(EntityKind::Student)));
}

#[tokio::test]
async fn enrollment_is_idempotent() {
    let svc = test_services();
    let s = svc
        .students
        .create_student(student("John", "john@example.com"))
        .await
        .unwrap();
    let c = svc.courses.create_course(course("Math")).await.unwrap();

    svc.students.add_course_to_student(s.id, c.id).await.unwrap();
    let again = svc.students.add_course_to_student(s.id, c.id).await.unwrap();
    assert_eq!(again.courses.len(), 1);

    let loaded = svc.courses.find_course_by_id(c.id).await.unwrap();
    assert_eq!(loaded.students.len(), 1);
    assert_eq!(svc.students.find_student_courses(s.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn department_head_is_loaded_and_cleared_when_teacher_is_deleted() {
    let svc = test_services();
    let t = svc.teachers.create_teacher(teacher("Dr. Smith")).await.unwrap();
    let d = svc
        .departments
        .create_department(DepartmentRequest { name: "Science".into() })
        .await
        .unwrap();
    assert!(d.head_of_department.is_none());

    let assigned = svc.departments.department_set_teacher(d.id, t.id).await.unwrap();
    assert_eq!(assigned.head_of_department.map(|h| h.id), Some(t.id));

    let head = svc.teachers.find_teacher_by_id(t.id).await.unwrap();
    assert_eq!(head.departments.len(), 1);

    svc.teachers.delete_teacher_by_id(t.id).await.unwrap();
    let d = svc.departments.find_department_by_id(d.id).await.unwrap();
    assert!(d.head_of_department.is_none());
}

#[tokio::test]
async fn student_courses_of_missing_student_is_not_found() {
    let svc = test_services();
    let err = svc.students.find_student_courses(3).await.unwrap_err();
    assert!(err.is_not_found());
}
