//! PostgreSQL repository integration tests.
//!
//! Each test gets a fresh database with the crate's migrations applied. They
//! need a reachable server, so they are ignored by default:
//!
//! ```text
//! DATABASE_URL=postgres://postgres@localhost/postgres cargo test -p database -- --ignored
//! ```
//!
//! - Paged lists: id ordering, page size, count
//! - Eager loading across every relation
//! - Enrollment idempotency and cascade
//! - Relationship writes: zero-row updates and foreign-key violations
//! - Teacher deletion nulls references

use core_types::{Course, Department, EntityKind, Student, Teacher};
use database::repository::{
    PgCourseRepository, PgDepartmentRepository, PgStudentRepository, PgTeacherRepository,
};
use database::{CourseRepository, DbError, DepartmentRepository, StudentRepository, TeacherRepository};
use sqlx::PgPool;

struct Repos {
    students: PgStudentRepository,
    teachers: PgTeacherRepository,
    courses: PgCourseRepository,
    departments: PgDepartmentRepository,
}

fn repos(pool: PgPool) -> Repos {
    Repos {
        students: PgStudentRepository::new(pool.clone()),
        teachers: PgTeacherRepository::new(pool.clone()),
        courses: PgCourseRepository::new(pool.clone()),
        departments: PgDepartmentRepository::new(pool),
    }
}

// ---------------------------------------------------------------------------
// CRUD and paging
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
async fn find_all_orders_by_id_and_respects_page_size(pool: PgPool) {
    let r = repos(pool);
    let mut ids = Vec::new();
    for i in 1..=5 {
        let saved = r
            .students
            .save(Student::new(format!("s{i}"), format!("s{i}@example.com")))
            .await
            .unwrap();
        ids.push(saved.id);
    }

    let page: Vec<i64> = r.students.find_all(2, 2).await.unwrap().iter().map(|s| s.id).collect();
    assert_eq!(page, ids[2..4].to_vec());

    let last: Vec<i64> = r.students.find_all(3, 2).await.unwrap().iter().map(|s| s.id).collect();
    assert_eq!(last, ids[4..].to_vec());

    assert_eq!(r.students.count().await.unwrap(), 5);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
async fn update_rereads_and_missing_rows_are_not_found(pool: PgPool) {
    let r = repos(pool);
    let teacher = r.teachers.save(Teacher::new("Dr. Smith")).await.unwrap();
    assert!(r.teachers.exists_by_id(teacher.id).await.unwrap());

    let renamed = r
        .teachers
        .update(Teacher { id: teacher.id, ..Teacher::new("Dr. Jones") })
        .await
        .unwrap();
    assert_eq!(renamed.name, "Dr. Jones");

    let missing = r.teachers.update(Teacher { id: teacher.id + 100, ..Teacher::new("x") }).await;
    assert!(matches!(missing, Err(DbError::NotFound)));
    assert!(matches!(r.courses.find_by_id(42).await, Err(DbError::NotFound)));
    assert!(!r.departments.exists_by_id(42).await.unwrap());

    // Deleting a missing row is not an error.
    r.departments.delete_by_id(42).await.unwrap();
}

// ---------------------------------------------------------------------------
// Relationships
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
async fn eager_loading_follows_every_relation(pool: PgPool) {
    let r = repos(pool);
    let teacher = r.teachers.save(Teacher::new("Dr. Smith")).await.unwrap();
    let math = r.courses.save(Course::new("Math")).await.unwrap();
    let art = r.courses.save(Course::new("Art")).await.unwrap();
    let department = r.departments.save(Department::new("Science")).await.unwrap();
    let student = r
        .students
        .save(Student::new("John", "john@example.com"))
        .await
        .unwrap();

    r.courses.set_teacher(math.id, teacher.id).await.unwrap();
    r.departments.set_head(department.id, teacher.id).await.unwrap();
    r.students.add_course(student.id, art.id).await.unwrap();
    r.students.add_course(student.id, math.id).await.unwrap();

    let student = r.students.find_by_id(student.id).await.unwrap();
    let titles: Vec<&str> = student.courses.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["Math", "Art"]);
    assert_eq!(student.courses[0].teacher.as_ref().map(|t| t.name.as_str()), Some("Dr. Smith"));
    assert!(student.courses[1].teacher.is_none());

    let course = r.courses.find_by_id(math.id).await.unwrap();
    assert_eq!(course.teacher_id, Some(teacher.id));
    assert_eq!(course.students.len(), 1);
    assert_eq!(course.students[0].email, "john@example.com");

    let teacher = r.teachers.find_by_id(teacher.id).await.unwrap();
    assert_eq!(teacher.courses.iter().map(|c| c.id).collect::<Vec<_>>(), vec![math.id]);
    assert_eq!(teacher.departments.iter().map(|d| d.id).collect::<Vec<_>>(), vec![department.id]);

    let department = r.departments.find_by_id(department.id).await.unwrap();
    assert_eq!(department.head_of_department.map(|t| t.name), Some("Dr. Smith".to_string()));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
async fn duplicate_enrollment_is_a_no_op(pool: PgPool) {
    let r = repos(pool);
    let course = r.courses.save(Course::new("Math")).await.unwrap();
    let student = r
        .students
        .save(Student::new("John", "john@example.com"))
        .await
        .unwrap();

    r.students.add_course(student.id, course.id).await.unwrap();
    r.students.add_course(student.id, course.id).await.unwrap();

    let student = r.students.find_by_id(student.id).await.unwrap();
    assert_eq!(student.courses.len(), 1);
    let course = r.courses.find_by_id(course.id).await.unwrap();
    assert_eq!(course.students.len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
async fn enrollment_with_missing_course_names_the_course(pool: PgPool) {
    let r = repos(pool);
    let student = r
        .students
        .save(Student::new("John", "john@example.com"))
        .await
        .unwrap();

    let result = r.students.add_course(student.id, 999).await;
    assert!(matches!(result, Err(DbError::MissingReference(EntityKind::Course))));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
async fn set_teacher_with_missing_teacher_is_a_missing_reference(pool: PgPool) {
    let r = repos(pool);
    let course = r.courses.save(Course::new("Math")).await.unwrap();

    let result = r.courses.set_teacher(course.id, 999).await;
    assert!(matches!(result, Err(DbError::MissingReference(EntityKind::Teacher))));

    let course = r.courses.find_by_id(course.id).await.unwrap();
    assert_eq!(course.teacher_id, None);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
async fn set_head_on_missing_department_is_not_found(pool: PgPool) {
    let r = repos(pool);
    let teacher = r.teachers.save(Teacher::new("Dr. Smith")).await.unwrap();

    let result = r.departments.set_head(999, teacher.id).await;
    assert!(matches!(result, Err(DbError::NotFound)));

    let result = r.courses.set_teacher(999, teacher.id).await;
    assert!(matches!(result, Err(DbError::NotFound)));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
async fn deleting_a_teacher_nulls_course_and_department_references(pool: PgPool) {
    let r = repos(pool);
    let teacher = r.teachers.save(Teacher::new("Dr. Smith")).await.unwrap();
    let course = r.courses.save(Course::new("Math")).await.unwrap();
    let department = r.departments.save(Department::new("Science")).await.unwrap();
    r.courses.set_teacher(course.id, teacher.id).await.unwrap();
    r.departments.set_head(department.id, teacher.id).await.unwrap();

    r.teachers.delete_by_id(teacher.id).await.unwrap();

    let course = r.courses.find_by_id(course.id).await.unwrap();
    assert_eq!(course.teacher_id, None);
    assert!(course.teacher.is_none());
    let department = r.departments.find_by_id(department.id).await.unwrap();
    assert_eq!(department.head_of_department_id, None);
    assert!(department.head_of_department.is_none());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
async fn deleting_a_student_drops_its_enrollments(pool: PgPool) {
    let r = repos(pool);
    let course = r.courses.save(Course::new("Math")).await.unwrap();
    let student = r
        .students
        .save(Student::new("John", "john@example.com"))
        .await
        .unwrap();
    r.students.add_course(student.id, course.id).await.unwrap();

    r.students.delete_by_id(student.id).await.unwrap();

    let course = r.courses.find_by_id(course.id).await.unwrap();
    assert!(course.students.is_empty());
}
