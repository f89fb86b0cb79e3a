use crate::common;
use crate::error;

use aws_sdk_dynamodb::{Client, error as sdk_error, operation, types};
use serde::Serialize;
use serde_dynamo::to_item;
use std::collections;

/// Existence condition guarding a put.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PutCondition {
    /// Apply only if the named attribute already exists on the stored item.
    AttributeExists(String),
    /// Apply only if the named attribute does not exist. With a key
    /// attribute this makes the put an insert-only write.
    AttributeNotExists(String),
}

impl PutCondition {
    fn attribute(&self) -> &str {
        match self {
            Self::AttributeExists(attribute) | Self::AttributeNotExists(attribute) => attribute,
        }
    }

    fn render(&self, name_token: &str) -> String {
        match self {
            Self::AttributeExists(_) => format!("attribute_exists({name_token})"),
            Self::AttributeNotExists(_) => format!("attribute_not_exists({name_token})"),
        }
    }
}

/// Arguments for one put.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Put<T> {
    /// Optional existence condition; without one the put overwrites.
    pub condition: Option<PutCondition>,
    /// The record to store, serialized attribute-by-attribute.
    pub item: T,
}

/// A finished put request descriptor.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PutRequest {
    /// Rendered condition expression, if the put is guarded.
    pub condition_expression: Option<String>,
    /// Placeholder token to real attribute name, for the condition.
    pub expression_attribute_names: Option<collections::HashMap<String, String>>,
    /// The serialized item.
    pub item: collections::HashMap<String, types::AttributeValue>,
    /// The table targeted.
    pub table_name: String,
}

pub(crate) fn build<T: Serialize>(table_name: &str, put: Put<T>) -> error::Result<PutRequest> {
    let item = to_item(put.item)?;
    let (condition_expression, expression_attribute_names) = match &put.condition {
        Some(condition) => {
            let name_token = common::name_token(condition.attribute());
            let names = collections::HashMap::from([(
                name_token.clone(),
                condition.attribute().to_string(),
            )]);
            (Some(condition.render(&name_token)), Some(names))
        }
        None => (None, None),
    };
    Ok(PutRequest {
        condition_expression,
        expression_attribute_names,
        item,
        table_name: table_name.to_string(),
    })
}

/// Result of a conditional put.
///
/// A failed condition is an expected outcome for insert-only writes, not an
/// error, so it is surfaced as a variant rather than through the error
/// channel.
#[derive(Debug)]
pub enum PutOutcome {
    /// The put was applied.
    Applied(operation::put_item::PutItemOutput),
    /// The store rejected the put because its condition did not hold.
    ConditionFailed,
}

impl PutOutcome {
    /// Whether the store rejected the put.
    pub fn is_condition_failed(&self) -> bool {
        matches!(self, Self::ConditionFailed)
    }
}

impl PutRequest {
    /// Execute the put.
    pub async fn send(
        self,
        client: &Client,
    ) -> Result<PutOutcome, sdk_error::SdkError<operation::put_item::PutItemError>> {
        let result = client
            .put_item()
            .table_name(self.table_name)
            .set_item(Some(self.item))
            .set_condition_expression(self.condition_expression)
            .set_expression_attribute_names(self.expression_attribute_names)
            .send()
            .await;
        match result {
            Ok(output) => Ok(PutOutcome::Applied(output)),
            Err(err)
                if err
                    .as_service_error()
                    .is_some_and(|err| err.is_conditional_check_failed_exception()) =>
            {
                Ok(PutOutcome::ConditionFailed)
            }
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;
    use serde_json::{Value, json};

    #[test]
    fn test_build_unconditional() {
        let request = build(
            "Films",
            Put {
                condition: None,
                item: json!({"actor": "Tom Hanks", "film": "Cast Away"}),
            },
        )
        .unwrap();
        assert_eq!(
            request,
            PutRequest {
                condition_expression: None,
                expression_attribute_names: None,
                item: collections::HashMap::from([
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

    #[rstest]
    #[case::not_exists(
        PutCondition::AttributeNotExists("pk".to_string()),
        "attribute_not_exists(#pk)"
    )]
    #[case::exists(
        PutCondition::AttributeExists("pk".to_string()),
        "attribute_exists(#pk)"
    )]
    #[case::dashed(
        PutCondition::AttributeNotExists("GSI-Child".to_string()),
        "attribute_not_exists(#gsichild)"
    )]
    fn test_build_condition(#[case] condition: PutCondition, #[case] expected: &str) {
        let attribute = condition.attribute().to_string();
        let request = build(
            "demotable",
            Put {
                condition: Some(condition),
                item: json!({"pk": "a", "sk": "v0"}),
            },
        )
        .unwrap();
        assert_eq!(request.condition_expression.as_deref(), Some(expected));
        let names = request.expression_attribute_names.unwrap();
        assert_eq!(names.len(), 1);
        assert_eq!(names.values().next(), Some(&attribute));
    }

    #[test]
    fn test_build_rejects_unserializable_item() {
        let result = build(
            "Films",
            Put {
                condition: None,
                item: Value::String("not a map".to_string()),
            },
        );
        assert!(matches!(result, Err(error::Error::Serialization(_))));
    }

    #[test]
    fn test_outcome_predicates() {
        assert!(PutOutcome::ConditionFailed.is_condition_failed());
        let applied = PutOutcome::Applied(operation::put_item::PutItemOutput::builder().build());
        assert!(!applied.is_condition_failed());
    }
}
