use crate::schema::key;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use std::fmt;

/// Which family of secondary indexes a lookup is restricted to.
///
/// Local indexes share the base table's partition key; global indexes may be
/// keyed by any attribute. The two namespaces are resolved independently so
/// that an index name defined under one scope can never shadow the other.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum IndexScope {
    /// Global secondary indexes.
    Global,
    /// Local secondary indexes.
    Local,
}

impl fmt::Display for IndexScope {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Global => formatter.write_str("global"),
            Self::Local => formatter.write_str("local"),
        }
    }
}

/// Definition of one secondary index: its name and its own key schema, which
/// may differ from the base table's.
///
/// ```rust
/// use dynamodb_table_query::schema::{index, key};
///
/// let gsi = index::IndexSchema {
///     index_name: "GSI-1".to_string(),
///     key_schema: vec![
///         key::KeyDefinition {
///             attribute: "child".to_string(),
///             role: key::KeyRole::Partition,
///         },
///     ],
/// };
/// assert_eq!(gsi.resolve_key().unwrap().partition, "child");
/// ```
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IndexSchema {
    /// The index name, unique within its scope.
    pub index_name: String,
    /// The index's own key schema.
    pub key_schema: Vec<key::KeyDefinition>,
}

impl IndexSchema {
    /// Resolve the index's partition and optional sort attribute.
    ///
    /// `None` means the index declares no partition-role entry and cannot be
    /// queried.
    pub fn resolve_key(&self) -> Option<key::PrimaryKey> {
        key::resolve(&self.key_schema)
    }
}

/// The secondary indexes of a table, one ordered name-to-definition map per
/// scope.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
pub struct SecondaryIndexes {
    /// Local secondary indexes, keyed by index name.
    #[serde(default, deserialize_with = "index_map")]
    pub local: IndexMap<String, IndexSchema>,
    /// Global secondary indexes, keyed by index name.
    #[serde(default, deserialize_with = "index_map")]
    pub global: IndexMap<String, IndexSchema>,
}

/// Deserialize a list of index definitions into an ordered map keyed by
/// index name, preserving declaration order.
fn index_map<'de, D>(deserializer: D) -> Result<IndexMap<String, IndexSchema>, D::Error>
where
    D: Deserializer<'de>,
{
    let indexes = Vec::<IndexSchema>::deserialize(deserializer)?;
    Ok(indexes
        .into_iter()
        .map(|index| (index.index_name.clone(), index))
        .collect())
}
