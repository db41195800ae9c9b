//! # Roster Database Crate
//!
//! This crate is the Record Store: the only code that talks to the SQLite
//! database holding the `students` table.
//!
//! ## Architectural Principles
//!
//! - **Adapter:** All SQL lives here. The rest of the application sees typed
//!   operations (`create`, `get`, `list_all`, `find_by`, `update`, `delete`).
//! - **Transactional writes:** Every mutating operation runs in its own
//!   transaction and leaves the table untouched when it fails.
//! - **Constraint backstop:** The schema enforces uniqueness of `roll_no` and
//!   `email`; a rejected write surfaces as `DbError::ConstraintViolation`.
//!
//! ## Public API
//!
//! - `connect`: Builds the connection pool from `DatabaseConfig`.
//! - `run_migrations`: Applies the embedded schema migrations.
//! - `connect_in_memory`: A migrated, in-memory pool for tests.
//! - `StudentRepository`: The data access methods.
//! - `DbError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod repository;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{connect, connect_in_memory, run_migrations};
pub use error::DbError;
pub use repository::StudentRepository;
pub use sqlx::sqlite::SqlitePool;
