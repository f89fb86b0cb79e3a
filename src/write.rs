//! Write operations: single-item puts, updates, and deletes, plus batched
//! and transactional groupings.
//!
//! Each submodule follows the same shape as the read path: a plain argument
//! struct, a build step that resolves key attributes against the table
//! schema, and a request descriptor with an async `send`.

/// Batched puts against one table.
pub mod batch;

/// Key-addressed item deletion.
pub mod delete;

/// Item insertion with optional existence conditions.
pub mod put;

/// Transactional grouping of put and update requests.
pub mod transact;

/// Expression-driven item updates.
pub mod update;
