//! Table and index schema introspection.
//!
//! A [`TableSchema`] describes one logical table: its name, its role-tagged
//! primary key schema, and zero or more secondary indexes per scope. The
//! introspection operations never panic: an absent key or index is an
//! explicit `Option`/error result that downstream builders must check before
//! producing a request descriptor.

/// Secondary index definitions and scope-isolated lookup.
pub mod index;

/// Key roles and primary key resolution.
pub mod key;

use serde::Deserialize;

/// Declarative description of one table.
///
/// Deserializes from the boundary config shape, e.g.:
///
/// ```rust
/// use dynamodb_table_query::schema;
///
/// let table: schema::TableSchema = serde_json::from_str(
///     r#"{
///         "tableName": "Films",
///         "primaryKey": [
///             { "attribute": "actor", "role": "PARTITION" },
///             { "attribute": "film", "role": "SORT" }
///         ]
///     }"#,
/// )
/// .unwrap();
/// assert_eq!(table.resolve_primary_key().unwrap().partition, "actor");
/// ```
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TableSchema {
    /// The table name, immutable for the schema's lifetime.
    pub table_name: String,
    /// The role-tagged primary key schema.
    pub primary_key: Vec<key::KeyDefinition>,
    /// Secondary indexes, grouped by scope.
    #[serde(default)]
    pub secondary_indexes: index::SecondaryIndexes,
}

impl TableSchema {
    /// Resolve the table's partition and optional sort attribute.
    ///
    /// `None` means the key schema defines no partition-role entry; callers
    /// must treat the table as unqueryable rather than fabricate a key.
    pub fn resolve_primary_key(&self) -> Option<key::PrimaryKey> {
        key::resolve(&self.primary_key)
    }

    /// Look up a secondary index by name within one scope.
    ///
    /// The lookup never crosses scopes: a name defined only under the other
    /// scope returns `None`.
    pub fn index(&self, name: &str, scope: index::IndexScope) -> Option<&index::IndexSchema> {
        let indexes = match scope {
            index::IndexScope::Global => &self.secondary_indexes.global,
            index::IndexScope::Local => &self.secondary_indexes.local,
        };
        indexes.get(name)
    }
}
