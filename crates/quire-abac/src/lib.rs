//! # quire-abac: Attribute-Based Access Control for the Quire library
//!
//! Decides, per (subject, action, resource) triple, whether an action on a
//! library resource is permitted and why.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Access Request                              │
//! │  (Subject + Action + Resource snapshot)      │
//! └─────────────────┬───────────────────────────┘
//!                   │
//!                   ▼
//! ┌─────────────────────────────────────────────┐
//! │  Dispatcher (evaluator::evaluate)            │
//! │  ├─ Material  → material::check              │
//! │  └─ otherwise → deny                         │
//! └─────────────────┬───────────────────────────┘
//!                   │
//!                   ▼
//! ┌─────────────────────────────────────────────┐
//! │  Decision                                    │
//! │  - allowed (bool)                            │
//! │  - Human-readable reason                     │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! The engine is pure: no I/O, no configuration, no shared mutable state and
//! no decision cache. It is safe to call from any number of threads.
//!
//! ## Examples
//!
//! ```
//! use quire_abac::{evaluate, MaterialAttributes, Resource, Subject};
//! use quire_types::{Action, Role, VisibilityScope};
//!
//! let student = Subject::new("u1", Role::Student, "CS", 1);
//! let notes = MaterialAttributes::new("m1", "CS", 10, VisibilityScope::GlobalSearchable);
//!
//! let decision = evaluate(&student, Action::Download, &Resource::Material(notes));
//! assert!(decision.allowed);
//! assert!(decision.reason.contains("visibility"));
//! ```

pub mod attributes;
pub mod evaluator;
pub mod material;

// Kani proofs for bounded model checking
#[cfg(kani)]
mod kani_proofs;

pub use attributes::{MaterialAttributes, Resource, ResourceKind, Subject};
pub use evaluator::{Decision, evaluate};
