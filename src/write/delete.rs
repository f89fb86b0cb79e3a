use crate::common;
use crate::error;
use crate::schema::key;

use aws_sdk_dynamodb::{Client, error as sdk_error, operation, types};
use serde::Serialize;
use serde_dynamo::to_item;
use std::collections;

/// A finished delete request descriptor.
///
/// The key is extracted from a full record at build time, so callers delete
/// by handing over the record they already hold rather than assembling a
/// key map by hand.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeleteRequest {
    /// The full primary key of the item to delete.
    pub key: collections::HashMap<String, types::AttributeValue>,
    /// The table targeted.
    pub table_name: String,
}

pub(crate) fn build<T: Serialize>(
    table_name: &str,
    primary_key: &key::PrimaryKey,
    record: T,
) -> error::Result<DeleteRequest> {
    let mut item = to_item(record)?;
    let mut item_key = collections::HashMap::new();
    extract(&mut item, &mut item_key, &primary_key.partition)?;
    if let Some(sort_attribute) = &primary_key.sort {
        extract(&mut item, &mut item_key, sort_attribute)?;
    }
    Ok(DeleteRequest {
        key: item_key,
        table_name: table_name.to_string(),
    })
}

fn extract(
    item: &mut collections::HashMap<String, types::AttributeValue>,
    item_key: &mut collections::HashMap<String, types::AttributeValue>,
    attribute: &str,
) -> error::Result<()> {
    let value = item
        .remove(attribute)
        .ok_or_else(|| error::Error::MissingKeyAttribute {
            attribute: attribute.to_string(),
        })?;
    let value = common::require_key_value(attribute, value)?;
    item_key.insert(attribute.to_string(), value);
    Ok(())
}

impl DeleteRequest {
    /// Execute the delete.
    pub async fn send(
        self,
        client: &Client,
    ) -> Result<
        operation::delete_item::DeleteItemOutput,
        sdk_error::SdkError<operation::delete_item::DeleteItemError>,
    > {
        client
            .delete_item()
            .table_name(self.table_name)
            .set_key(Some(self.key))
            .send()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;
    use serde_json::{Value, json};

    fn films_key() -> key::PrimaryKey {
        key::PrimaryKey {
            partition: "actor".to_string(),
            sort: Some("film".to_string()),
        }
    }

    #[test]
    fn test_build_extracts_key_from_record() {
        let request = build(
            "Films",
            &films_key(),
            json!({
                "actor": "Tom Hanks",
                "film": "Cast Away",
                "year": 2000,
            }),
        )
        .unwrap();
        assert_eq!(
            request,
            DeleteRequest {
                key: collections::HashMap::from([
                    (
                        "actor".to_string(),
                        types::AttributeValue::S("Tom Hanks".to_string())
                    ),
                    (
                        "film".to_string(),
                        types::AttributeValue::S("Cast Away".to_string())
                    ),
                ]),
                table_name: "Films".to_string(),
            }
        );
    }

    #[test]
    fn test_build_partition_only_table_ignores_extra_attributes() {
        let primary_key = key::PrimaryKey {
            partition: "pk".to_string(),
            sort: None,
        };
        let request = build("Plain", &primary_key, json!({"pk": "a", "sk": "b"})).unwrap();
        assert_eq!(request.key.len(), 1);
        assert!(request.key.contains_key("pk"));
    }

    #[rstest]
    #[case::absent(json!({"actor": "Tom Hanks"}), "film")]
    #[case::empty(json!({"actor": "Tom Hanks", "film": ""}), "film")]
    #[case::null(json!({"actor": null, "film": "Cast Away"}), "actor")]
    fn test_build_rejects_incomplete_key(#[case] record: Value, #[case] attribute: &str) {
        let error = build("Films", &films_key(), record).unwrap_err();
        assert!(matches!(
            error,
            error::Error::MissingKeyAttribute { attribute: ref missing } if missing == attribute
        ));
    }
}
