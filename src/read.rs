//! Read operations: key-condition queries against a table or one of its
//! secondary indexes.

/// Query building and the query request descriptor.
pub mod query;
