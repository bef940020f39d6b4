//! # quire-catalog: Policy-gated material catalog
//!
//! Wraps the `quire-abac` decision engine with the collaborators it needs
//! at runtime:
//!
//! - [`Catalog`]: resource provider (material records)
//! - [`Directory`]: subject provider (caller identity to [`quire_abac::Subject`])
//! - [`LibraryGate`]: decision consumer that refuses side effects on deny
//! - [`Seed`]: bootstrap data loaded from TOML
//!
//! # Example
//!
//! ```
//! use quire_catalog::{NewMaterial, Seed};
//! use quire_types::{Level, VisibilityScope};
//!
//! let library = Seed::from_toml(r#"
//!     [[departments]]
//!     id = "CS"
//!     name = "Computer Science"
//!     code = "CS"
//!
//!     [[users]]
//!     id = "u1"
//!     email = "u1@school.edu"
//!     role = "student"
//!     department = "CS"
//!     level = 1
//! "#).unwrap().load().unwrap();
//!
//! let student = library.directory.authenticate(Some("u1")).unwrap();
//! let view = library.gate.upload(&student, NewMaterial {
//!     title: "Lecture 1".into(),
//!     course_code: "CS101".into(),
//!     level: Level::new(1),
//!     visibility: VisibilityScope::Department,
//!     file_path: "uploads/lecture-1.pdf".into(),
//! }).unwrap();
//!
//! assert!(view.download_allowed);
//! assert_eq!(library.gate.shelf(&student).unwrap().len(), 1);
//! ```

pub mod directory;
pub mod error;
pub mod gate;
pub mod records;
pub mod seed;
pub mod store;

pub use directory::Directory;
pub use error::{GateError, Result, SeedError};
pub use gate::{LibraryGate, OTHER_DEPARTMENT_LIBRARY};
pub use records::{
    Department, DepartmentLibrary, MaterialRecord, MaterialView, NewMaterial, UserRecord,
};
pub use seed::{Seed, SeedMaterial, SeededLibrary};
pub use store::{Catalog, InMemoryCatalog};
