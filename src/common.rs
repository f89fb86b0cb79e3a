//! Shared utilities for request construction.
//!
//! This module owns placeholder token derivation and the structured key
//! condition and filter expressions that read requests are built from.

/// Structured key condition and filter expressions.
pub mod expr;

pub(crate) mod explain;

use crate::error;

use aws_sdk_dynamodb::types;

/// Derive the attribute-name placeholder for an attribute.
///
/// Aliasing is applied unconditionally, not only for reserved words; dashes
/// are stripped and the name lowercased so index attributes like `GSI-Child`
/// yield legal tokens.
pub(crate) fn name_token(attribute: &str) -> String {
    format!("#{}", sanitize(attribute))
}

/// Derive the value placeholder for a named (non-key) attribute.
pub(crate) fn value_token(attribute: &str) -> String {
    format!(":{}", sanitize(attribute))
}

fn sanitize(attribute: &str) -> String {
    attribute.replace('-', "").to_lowercase()
}

/// Reject absent key values before a descriptor is produced.
///
/// An empty string or explicit null means the caller supplied no usable key
/// value ("please provide PK value").
pub(crate) fn require_key_value(
    attribute: &str,
    value: types::AttributeValue,
) -> error::Result<types::AttributeValue> {
    let missing = match &value {
        types::AttributeValue::S(text) => text.is_empty(),
        types::AttributeValue::Null(_) => true,
        _ => false,
    };
    if missing {
        Err(error::Error::MissingKeyAttribute {
            attribute: attribute.to_string(),
        })
    } else {
        Ok(value)
    }
}
