//! Chat session persistence abstractions and orchestration for termgpt.
//!
//! This module defines the `SessionRepository` trait that the infrastructure
//! layer implements, the `ChatService` that decides what each flow persists,
//! and the title derivation applied to the first reply of a session.

pub mod repository;
pub mod service;
pub mod title;
