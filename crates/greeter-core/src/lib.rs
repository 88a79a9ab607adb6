//! greeter Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the greeter
//! command-line tool, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           greeter-cli (CLI)             │
//! │  (Secure parser, orchestrator, exits)   │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │            (GreetingService)            │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │      (OutputSink, ShutdownSignal)       │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     greeter-adapters (Infrastructure)   │
//! │  (ConsoleSink, BufferedFileSink, etc)   │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (ValidatedName, GreetingPolicy, ...)    │
//! │         No External Dependencies        │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use greeter_core::application::GreetingService;
//!
//! # async fn demo(sink: Arc<dyn greeter_core::application::OutputSink>) {
//! let service = GreetingService::new(sink);
//! let message = service.greet(Some("Alice")).await.unwrap();
//! assert_eq!(message.as_str(), "Hey there, Alice! Welcome!");
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ApplicationError, ApplicationResult, GreetingService, OutputErrorKind,
        ports::{OutputSink, ShutdownSignal},
    };
    pub use crate::domain::{
        DomainError, GreetingFormatter, GreetingMessage, GreetingPolicy, GreetingStyle,
        NameValidator, ValidatedName,
    };
    pub use crate::error::{ErrorCategory, GreeterError, GreeterResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
