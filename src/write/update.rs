use crate::common;
use crate::error;
use crate::schema::key;

use aws_sdk_dynamodb::{Client, error as sdk_error, operation, types};
use serde::Serialize;
use serde_dynamo::to_attribute_value;
use std::collections;

/// Arguments for one expression-driven update.
///
/// The update expression is caller-authored; `names` and `values` declare
/// the `#` and `:` placeholders it uses, verbatim. The item is addressed by
/// its full primary key.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Update<T> {
    /// The update expression, e.g. `SET #status = :status`.
    pub expression: String,
    /// Real attribute names backing the expression's `#` placeholders.
    pub names: Vec<String>,
    /// The partition key value of the item to update.
    pub partition_value: T,
    /// The sort key value. Required exactly when the table defines a sort
    /// key.
    pub sort_value: Option<T>,
    /// Placeholder name and value pairs backing the expression's `:`
    /// placeholders.
    pub values: Vec<(String, T)>,
}

/// A finished update request descriptor.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UpdateRequest {
    /// Placeholder token to real attribute name.
    pub expression_attribute_names: collections::HashMap<String, String>,
    /// Value placeholder token to bound value.
    pub expression_attribute_values: collections::HashMap<String, types::AttributeValue>,
    /// The full primary key of the item.
    pub key: collections::HashMap<String, types::AttributeValue>,
    /// What the store returns; defaults to the updated attributes' new
    /// values.
    pub return_values: Option<types::ReturnValue>,
    /// The table targeted.
    pub table_name: String,
    /// The caller-authored update expression.
    pub update_expression: String,
}

pub(crate) fn build<T: Serialize>(
    table_name: &str,
    primary_key: &key::PrimaryKey,
    update: Update<T>,
) -> error::Result<UpdateRequest> {
    let mut item_key = collections::HashMap::new();
    let partition_value = to_attribute_value(update.partition_value)?;
    let partition_value = common::require_key_value(&primary_key.partition, partition_value)?;
    item_key.insert(primary_key.partition.clone(), partition_value);
    match (&primary_key.sort, update.sort_value) {
        (Some(sort_attribute), Some(sort_value)) => {
            let sort_value = to_attribute_value(sort_value)?;
            let sort_value = common::require_key_value(sort_attribute, sort_value)?;
            item_key.insert(sort_attribute.clone(), sort_value);
        }
        (Some(sort_attribute), None) => {
            return Err(error::Error::MissingKeyAttribute {
                attribute: sort_attribute.clone(),
            });
        }
        (None, Some(_)) => {
            return Err(error::Error::NoSortKey {
                table: table_name.to_string(),
            });
        }
        (None, None) => {}
    }

    // The expression is caller-authored, so its placeholders are taken
    // verbatim rather than sanitized.
    let expression_attribute_names = update
        .names
        .into_iter()
        .map(|name| (format!("#{name}"), name))
        .collect();
    let expression_attribute_values = update
        .values
        .into_iter()
        .map(|(name, value)| Ok((format!(":{name}"), to_attribute_value(value)?)))
        .collect::<error::Result<_>>()?;

    Ok(UpdateRequest {
        expression_attribute_names,
        expression_attribute_values,
        key: item_key,
        return_values: Some(types::ReturnValue::UpdatedNew),
        table_name: table_name.to_string(),
        update_expression: update.expression,
    })
}

impl UpdateRequest {
    /// Execute the update.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamodb_table_query.update", err)
    )]
    pub async fn send(
        self,
        client: &Client,
    ) -> Result<
        operation::update_item::UpdateItemOutput,
        sdk_error::SdkError<operation::update_item::UpdateItemError>,
    > {
        // The store rejects empty placeholder maps outright.
        let names = Some(self.expression_attribute_names).filter(|map| !map.is_empty());
        let values = Some(self.expression_attribute_values).filter(|map| !map.is_empty());
        client
            .update_item()
            .table_name(self.table_name)
            .set_key(Some(self.key))
            .update_expression(self.update_expression)
            .set_expression_attribute_names(names)
            .set_expression_attribute_values(values)
            .set_return_values(self.return_values)
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
    fn test_build_full() {
        let request = build(
            "Films",
            &films_key(),
            Update {
                expression: "SET #status = :status".to_string(),
                names: vec!["status".to_string()],
                partition_value: json!("Tom Hanks"),
                sort_value: Some(json!("Cast Away")),
                values: vec![("status".to_string(), json!("1"))],
            },
        )
        .unwrap();
        assert_eq!(
            request,
            UpdateRequest {
                expression_attribute_names: collections::HashMap::from([(
                    "#status".to_string(),
                    "status".to_string()
                )]),
                expression_attribute_values: collections::HashMap::from([(
                    ":status".to_string(),
                    types::AttributeValue::S("1".to_string())
                )]),
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
                return_values: Some(types::ReturnValue::UpdatedNew),
                table_name: "Films".to_string(),
                update_expression: "SET #status = :status".to_string(),
            }
        );
    }

    #[test]
    fn test_build_partition_only_table() {
        let primary_key = key::PrimaryKey {
            partition: "pk".to_string(),
            sort: None,
        };
        let request = build(
            "Plain",
            &primary_key,
            Update {
                expression: "REMOVE #draft".to_string(),
                names: vec!["draft".to_string()],
                partition_value: json!("a"),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(request.key.len(), 1);
        assert!(request.expression_attribute_values.is_empty());
    }

    #[rstest]
    #[case::missing_sort(
        Update {
            expression: "SET #a = :a".to_string(),
            partition_value: json!("Tom Hanks"),
            sort_value: None,
            ..Default::default()
        }
    )]
    #[case::empty_sort(
        Update {
            expression: "SET #a = :a".to_string(),
            partition_value: json!("Tom Hanks"),
            sort_value: Some(json!("")),
            ..Default::default()
        }
    )]
    fn test_build_requires_full_key(#[case] update: Update<Value>) {
        let error = build("Films", &films_key(), update).unwrap_err();
        assert!(matches!(
            error,
            error::Error::MissingKeyAttribute { ref attribute } if attribute == "film"
        ));
    }

    #[test]
    fn test_build_rejects_sort_value_without_sort_key() {
        let primary_key = key::PrimaryKey {
            partition: "pk".to_string(),
            sort: None,
        };
        let error = build(
            "Plain",
            &primary_key,
            Update {
                expression: "SET #a = :a".to_string(),
                partition_value: json!("a"),
                sort_value: Some(json!("b")),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert!(matches!(error, error::Error::NoSortKey { .. }));
    }
}
