//! # Campus Database Crate
//!
//! Persistence layer for the school administration service.
//!
//! ## Architectural Principles
//!
//! - **Adapter:** Everything storage-specific lives here. Services depend on the
//!   repository traits only and never see SQL.
//! - **Two backends:** PostgreSQL (`sqlx`, pooled) for real deployments and an
//!   in-process store with the same semantics for tests and local runs.
//! - **Storage-enforced references:** Relationship writes rely on foreign keys;
//!   a violation surfaces as `DbError::MissingReference`.
//!
//! ## Public API
//!
//! - `connect`: Builds the PostgreSQL connection pool from `DatabaseSettings`.
//! - `run_migrations`: Applies the embedded schema migrations.
//! - `Repositories`: The four repository trait objects over one backend.
//! - `DbError`: The error type returned by every repository call.

pub mod connection;
pub mod error;
pub mod repository;

pub use connection::{connect, run_migrations};
pub use error::DbError;
pub use repository::{
    CourseRepository, DepartmentRepository, MemoryStore, Repositories, StudentRepository,
    TeacherRepository,
};
