use crate::common;
use crate::common::expr;
use crate::error;
use crate::schema::key;

use aws_sdk_dynamodb::{Client, error as sdk_error, operation, types};
use serde::Serialize;
use serde_dynamo::to_attribute_value;
use std::collections;

const PARTITION_VALUE_TOKEN: &str = ":pk";
const SORT_VALUE_TOKEN: &str = ":sk";

/// One post-key filter clause supplied by the caller.
///
/// The filter is ANDed against the result set by the store after the key
/// condition has been applied; it uses the same aliasing discipline as the
/// key condition.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Filter<T> {
    /// How the attribute is compared.
    pub comparison: expr::KeyComparison,
    /// The real attribute name to filter on.
    pub name: String,
    /// The value to compare against.
    pub value: T,
}

/// Arguments for one logical read.
///
/// ```rust
/// use dynamodb_table_query::{common::expr, read};
///
/// let query = read::query::Query {
///     partition_value: "Tom Hanks".to_string(),
///     sort_value: Some("Cast".to_string()),
///     comparison: expr::KeyComparison::BeginsWith,
///     ..Default::default()
/// };
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Query<T> {
    /// How the sort key is compared. Ignored when `sort_value` is absent.
    pub comparison: expr::KeyComparison,
    /// Optional post-key filter clause.
    pub filter: Option<Filter<T>>,
    /// The partition key value. Required; the partition condition is always
    /// an equality.
    pub partition_value: T,
    /// Attribute names to return, attached verbatim (the store validates
    /// them at execution time).
    pub projection: Option<Vec<String>>,
    /// The sort key value, if the read is narrowed within the partition.
    pub sort_value: Option<T>,
}

/// A query builder bound to one target: the table's primary key path or one
/// secondary index.
///
/// The builder holds only resolved, immutable schema state; every call to
/// [`QueryBuilder::build`] produces a fresh descriptor, so one builder can
/// serve many concurrent logical requests.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct QueryBuilder {
    index_name: Option<String>,
    partition_attribute: String,
    sort_attribute: Option<String>,
    table_name: String,
}

impl QueryBuilder {
    pub(crate) fn new(
        table_name: String,
        index_name: Option<String>,
        primary_key: key::PrimaryKey,
    ) -> Self {
        Self {
            index_name,
            partition_attribute: primary_key.partition,
            sort_attribute: primary_key.sort,
            table_name,
        }
    }

    /// One-line summary of the target and its key attributes.
    pub fn describe(&self) -> String {
        let sort = self.sort_attribute.as_deref().unwrap_or("-");
        match &self.index_name {
            Some(index_name) => format!(
                "Index {index_name} contains key {}, {sort}",
                self.partition_attribute
            ),
            None => format!(
                "Table {} contains key {}, {sort}",
                self.table_name, self.partition_attribute
            ),
        }
    }

    /// Build a read request descriptor.
    ///
    /// The partition value is always bound as an equality. A sort clause is
    /// appended only when a sort value is supplied; the comparison mode is
    /// meaningless without one. Attribute names are aliased unconditionally.
    pub fn build<T: Serialize>(&self, query: Query<T>) -> error::Result<QueryRequest> {
        let mut expression_attribute_names = collections::HashMap::new();
        let mut expression_attribute_values = collections::HashMap::new();

        let partition_value = to_attribute_value(query.partition_value)?;
        let partition_value =
            common::require_key_value(&self.partition_attribute, partition_value)?;
        let partition_token = common::name_token(&self.partition_attribute);
        expression_attribute_names
            .insert(partition_token.clone(), self.partition_attribute.clone());
        expression_attribute_values.insert(PARTITION_VALUE_TOKEN.to_string(), partition_value);
        let partition = expr::KeyOperand {
            name_token: partition_token,
            value_token: PARTITION_VALUE_TOKEN.to_string(),
        };

        let sort = match query.sort_value {
            Some(sort_value) => {
                let Some(sort_attribute) = &self.sort_attribute else {
                    return Err(error::Error::NoSortKey {
                        table: self.table_name.clone(),
                    });
                };
                let sort_token = common::name_token(sort_attribute);
                expression_attribute_names.insert(sort_token.clone(), sort_attribute.clone());
                expression_attribute_values
                    .insert(SORT_VALUE_TOKEN.to_string(), to_attribute_value(sort_value)?);
                Some(expr::SortClause {
                    comparison: query.comparison,
                    name_token: sort_token,
                    value_token: SORT_VALUE_TOKEN.to_string(),
                })
            }
            None => None,
        };

        let filter = match query.filter {
            Some(filter) => {
                let name_token = common::name_token(&filter.name);
                let value_token = common::value_token(&filter.name);
                expression_attribute_names.insert(name_token.clone(), filter.name);
                expression_attribute_values
                    .insert(value_token.clone(), to_attribute_value(filter.value)?);
                Some(expr::FilterExpr {
                    comparison: filter.comparison,
                    name_token,
                    value_token,
                })
            }
            None => None,
        };

        Ok(QueryRequest {
            expression_attribute_names,
            expression_attribute_values,
            filter,
            index_name: self.index_name.clone(),
            key_condition: Some(expr::KeyConditionExpr { partition, sort }),
            projection: query.projection,
            table_name: self.table_name.clone(),
        })
    }
}

/// A finished read request descriptor, ready to hand to the store client.
///
/// Plain data: the condition is a structured expression over placeholder
/// tokens, and every token it (or the filter) references has an entry in the
/// attribute name/value maps.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryRequest {
    /// Placeholder token to real attribute name.
    pub expression_attribute_names: collections::HashMap<String, String>,
    /// Value placeholder token to bound value.
    pub expression_attribute_values: collections::HashMap<String, types::AttributeValue>,
    /// Optional post-key filter clause.
    pub filter: Option<expr::FilterExpr>,
    /// The secondary index targeted, if any.
    pub index_name: Option<String>,
    /// The structured key condition. `None` only for descriptors that were
    /// never keyed; [`QueryRequest::explain`] reports those explicitly.
    pub key_condition: Option<expr::KeyConditionExpr>,
    /// Attribute names to return, verbatim.
    pub projection: Option<Vec<String>>,
    /// The table targeted.
    pub table_name: String,
}

impl QueryRequest {
    /// Plain-language description of this request, with every placeholder
    /// replaced by its real name or quoted literal value.
    pub fn explain(&self) -> String {
        common::explain::render(self)
    }

    /// Execute the query, aggregating all result pages.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamodb_table_query.query", err)
    )]
    pub async fn send(
        self,
        client: &Client,
    ) -> Result<
        operation::query::QueryOutput,
        sdk_error::SdkError<operation::query::QueryError>,
    > {
        let key_condition = self
            .key_condition
            .ok_or_else(|| sdk_error::BuildError::other("no key values have been set"))?;
        let mut paginator = client
            .query()
            .table_name(self.table_name)
            .set_index_name(self.index_name)
            .key_condition_expression(key_condition.render())
            .set_expression_attribute_names(Some(self.expression_attribute_names))
            .set_expression_attribute_values(Some(self.expression_attribute_values))
            .set_filter_expression(self.filter.as_ref().map(expr::FilterExpr::render))
            .set_projection_expression(
                self.projection.as_ref().map(|attributes| attributes.join(", ")),
            )
            .into_paginator()
            .send();
        let mut items = Vec::new();
        let mut count = 0;
        while let Some(page) = paginator.next().await {
            let page = page?;
            if let Some(page_items) = page.items {
                items.extend(page_items);
            }
            count += page.count;
        }
        let output = operation::query::QueryOutput::builder()
            .set_items(Some(items))
            .set_count(Some(count))
            .build();
        Ok(output)
    }
}
