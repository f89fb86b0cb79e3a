#![deny(missing_docs)]
#![deny(warnings)]

//! # DynamoDB table query
//!
//! A schema-aware builder for DynamoDB query and write request parameters.
//!
//! ## Overview
//!
//! Hand-writing `KeyConditionExpression` strings and their placeholder maps
//! is repetitive and easy to get subtly wrong. This library binds a builder
//! to a declarative table schema once, then derives the expression, the
//! attribute-name aliases, and the value bindings for each request:
//!
//! - A [`schema::TableSchema`] describes the table's primary key and its
//!   secondary indexes; lookups are scope-isolated and never panic.
//! - A [`builder::RequestBuilder`] hands out query builders for the table or
//!   one of its indexes, and build functions for puts, updates, deletes,
//!   batches, and transactions.
//! - Every build produces a plain request descriptor; execution is a
//!   separate `send` step that takes the SDK client explicitly.
//! - [`read::query::QueryRequest::explain`] renders any query descriptor as
//!   a plain-language sentence for logging and debugging.
//!
//! ## Quick example
//!
//! ```rust
//! use dynamodb_table_query::{builder, read};
//! use serde_json::json;
//!
//! # fn example() -> dynamodb_table_query::error::Result<()> {
//! let table = serde_json::from_value(json!({
//!     "tableName": "Films",
//!     "primaryKey": [
//!         { "attribute": "actor", "role": "PARTITION" },
//!         { "attribute": "film", "role": "SORT" }
//!     ]
//! }))
//! .unwrap();
//!
//! let builder = builder::RequestBuilder::new(table)?;
//! let request = builder.query().build(read::query::Query {
//!     partition_value: json!("Tom Hanks"),
//!     sort_value: Some(json!("Cast Away")),
//!     ..Default::default()
//! })?;
//!
//! assert_eq!(
//!     request.explain(),
//!     "Search Films WHERE actor = 'Tom Hanks' AND film = 'Cast Away'"
//! );
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

/// The schema-bound request builder facade.
pub mod builder;

/// Shared placeholder derivation and structured expressions.
pub mod common;

/// Builder-side error types.
pub mod error;

/// Read operations: key-condition queries.
pub mod read;

/// Table and index schema introspection.
pub mod schema;

/// Write operations: puts, updates, deletes, batches, and transactions.
pub mod write;
