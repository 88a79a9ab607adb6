// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for greeter.
//!
//! This module contains pure business logic with ZERO external dependencies.
//! Delivering a greeting anywhere is handled via ports (traits) defined in
//! the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or console calls
//! - **No external crates**: Only std library + thiserror
//! - **Immutable values**: All domain objects are Clone + PartialEq
//!
// Public API - what the world sees
pub mod error;
pub mod formatter;
pub mod policy;
pub mod value_objects;

mod validation;

// Re-exports for convenience
pub use error::{DomainError, ErrorCategory};
pub use formatter::GreetingFormatter;
pub use policy::GreetingPolicy;
pub use validation::NameValidator;
pub use value_objects::{GreetingMessage, GreetingStyle, ValidatedName};
