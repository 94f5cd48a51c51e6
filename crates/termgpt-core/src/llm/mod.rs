//! Completion provider abstractions for termgpt.
//!
//! This module defines the `CompletionProvider` trait that concrete
//! provider implementations in termgpt-infra fulfil.

pub mod provider;
