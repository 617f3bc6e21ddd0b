use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use configuration::ServerSettings;
use database::Repositories;
use services::{CourseService, DepartmentService, StudentService, TeacherService};
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer, ExposeHeaders},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;

use handlers::{courses, departments, students, teachers};

/// The shared application state that all handlers can access.
pub struct AppState {
    pub students: StudentService,
    pub teachers: TeacherService,
    pub courses: CourseService,
    pub departments: DepartmentService,
}

impl AppState {
    /// Wires every service over the same set of repositories.
    pub fn new(repos: Repositories) -> Self {
        Self {
            students: StudentService::new(repos.students.clone(), repos.courses.clone()),
            teachers: TeacherService::new(repos.teachers.clone()),
            courses: CourseService::new(repos.courses.clone(), repos.teachers.clone()),
            departments: DepartmentService::new(repos.departments, repos.teachers),
        }
    }
}

/// Builds the full application router: `/api/v1` resources, the health check
/// and the middleware stack.
pub fn router(state: Arc<AppState>, body_limit_bytes: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any())
        .expose_headers(ExposeHeaders::any());

    // Nested routes share the `:id` segment name with their parent route.
    let api = Router::new()
        .route("/students", get(students::get_students).post(students::create_student))
        .route(
            "/students/:id",
            get(students::get_student)
                .patch(students::update_student)
                .delete(students::delete_student),
        )
        .route("/students/:id/courses", get(students::get_student_courses))
        .route(
            "/students/:id/courses/:course_id",
            post(students::add_course_to_student),
        )
        .route("/teachers", get(teachers::get_teachers).post(teachers::create_teacher))
        .route(
            "/teachers/:id",
            get(teachers::get_teacher)
                .patch(teachers::update_teacher)
                .delete(teachers::delete_teacher),
        )
        .route("/courses", get(courses::get_courses).post(courses::create_course))
        .route(
            "/courses/:id",
            get(courses::get_course)
                .patch(courses::update_course)
                .delete(courses::delete_course),
        )
        .route(
            "/courses/:id/teacher/:teacher_id",
            post(courses::set_teacher_to_course),
        )
        .route(
            "/departments",
            get(departments::get_departments).post(departments::create_department),
        )
        .route(
            "/departments/:id",
            get(departments::get_department)
                .patch(departments::update_department)
                .delete(departments::delete_department),
        )
        .route(
            "/departments/:id/teacher/:teacher_id",
            post(departments::department_set_teacher),
        );

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/v1", api)
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(body_limit_bytes))
}

/// Serves the router until Ctrl-C, then drains in-flight requests.
pub async fn run_server(settings: &ServerSettings, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = router(state, settings.body_limit_bytes);
    let addr = settings.address();

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Web server started and listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Web server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for the shutdown signal.");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received.");
}
