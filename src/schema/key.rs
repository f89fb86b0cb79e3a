use serde::Deserialize;

/// Role a key attribute plays in a key schema.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KeyRole {
    /// The partition (hash) key, determining item placement.
    Partition,
    /// The sort (range) key, determining ordering within a partition.
    Sort,
}

/// One entry of a key schema: an attribute name tagged with its role.
///
/// ```rust
/// use dynamodb_table_query::schema::key;
///
/// let entry = key::KeyDefinition {
///     attribute: "actor".to_string(),
///     role: key::KeyRole::Partition,
/// };
/// ```
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct KeyDefinition {
    /// The attribute name.
    pub attribute: String,
    /// Whether the attribute is the partition or the sort component.
    pub role: KeyRole,
}

/// A resolved primary key: the partition attribute name and, when the schema
/// defines one, the sort attribute name.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PrimaryKey {
    /// The partition key attribute name.
    pub partition: String,
    /// The sort key attribute name, if the key schema has a sort entry.
    pub sort: Option<String>,
}

/// Scan a key schema for its partition and sort entries.
///
/// Returns `None` when no partition-role entry exists: a key schema without
/// one is unusable and callers must not build requests against it.
pub(crate) fn resolve(key_schema: &[KeyDefinition]) -> Option<PrimaryKey> {
    let partition = key_schema
        .iter()
        .find(|entry| entry.role == KeyRole::Partition)?;
    let sort = key_schema.iter().find(|entry| entry.role == KeyRole::Sort);
    Some(PrimaryKey {
        partition: partition.attribute.clone(),
        sort: sort.map(|entry| entry.attribute.clone()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case::partition_and_sort(
        vec![
            KeyDefinition {
                attribute: "actor".to_string(),
                role: KeyRole::Partition,
            },
            KeyDefinition {
                attribute: "film".to_string(),
                role: KeyRole::Sort,
            },
        ],
        Some(
            PrimaryKey {
                partition: "actor".to_string(),
                sort: Some("film".to_string()),
            }
        )
    )]
    #[case::partition_only(
        vec![
            KeyDefinition {
                attribute: "pk".to_string(),
                role: KeyRole::Partition,
            },
        ],
        Some(
            PrimaryKey {
                partition: "pk".to_string(),
                sort: None,
            }
        )
    )]
    #[case::sort_listed_first(
        vec![
            KeyDefinition {
                attribute: "sk".to_string(),
                role: KeyRole::Sort,
            },
            KeyDefinition {
                attribute: "pk".to_string(),
                role: KeyRole::Partition,
            },
        ],
        Some(
            PrimaryKey {
                partition: "pk".to_string(),
                sort: Some("sk".to_string()),
            }
        )
    )]
    #[case::no_partition_entry(
        vec![
            KeyDefinition {
                attribute: "sk".to_string(),
                role: KeyRole::Sort,
            },
        ],
        None
    )]
    #[case::empty_schema(vec![], None)]
    fn test_resolve(
        #[case] key_schema: Vec<KeyDefinition>,
        #[case] expected: Option<PrimaryKey>,
    ) {
        assert_eq!(resolve(&key_schema), expected);
    }
}
