//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "greet a user".

pub mod greeting_service;

pub use greeting_service::GreetingService;
