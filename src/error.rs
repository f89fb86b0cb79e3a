use crate::schema;

/// Errors raised while resolving schemas or building request descriptors.
///
/// These cover the builder side only: they are returned before any request
/// descriptor is produced, so callers iterating over collections can skip the
/// failing record and keep going. Errors reported by DynamoDB itself are
/// surfaced unmodified as [`aws_sdk_dynamodb::error::SdkError`] by the `send`
/// methods.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested secondary index does not exist in the given scope.
    ///
    /// An index defined only under the other scope is deliberately not found:
    /// local and global lookups never fall back to each other.
    #[error("no {scope} index named `{name}` on table `{table}`")]
    IndexNotFound {
        /// The name of the table that was searched.
        table: String,
        /// The index name that could not be resolved.
        name: String,
        /// The scope the lookup was restricted to.
        scope: schema::index::IndexScope,
    },

    /// A required key value was absent or empty.
    #[error("missing required value for key attribute `{attribute}`")]
    MissingKeyAttribute {
        /// The key attribute whose value was missing.
        attribute: String,
    },

    /// A sort key value was supplied but the target defines no sort key.
    #[error("table `{table}` defines no sort key")]
    NoSortKey {
        /// The name of the table (or the table an index belongs to).
        table: String,
    },

    /// The key schema contains no partition-role entry, so no request can be
    /// keyed against it.
    #[error("table `{table}` defines no usable partition key")]
    NoUsableKey {
        /// The name of the table with the unusable key schema.
        table: String,
    },

    /// A caller-supplied value could not be converted to a DynamoDB
    /// attribute value.
    #[error(transparent)]
    Serialization(#[from] serde_dynamo::Error),
}

/// Result alias for builder operations.
pub type Result<T> = std::result::Result<T, Error>;
