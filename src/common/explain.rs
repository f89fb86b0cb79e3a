use crate::common::expr;
use crate::read;

use aws_sdk_dynamodb::types;
use std::collections;

pub(crate) const NO_KEY_VALUES: &str = "No key values have been set";

/// Render a query descriptor as a plain-language sentence.
///
/// Placeholder tokens are resolved structurally through the descriptor's
/// name/value maps, so similarly named tokens can never collide. The output
/// is a pure function of the descriptor.
pub(crate) fn render(request: &read::query::QueryRequest) -> String {
    let Some(key_condition) = &request.key_condition else {
        return NO_KEY_VALUES.to_string();
    };
    let target = match &request.index_name {
        Some(index_name) => format!("{}.{}", request.table_name, index_name),
        None => request.table_name.clone(),
    };
    let mut description = format!(
        "Search {target} WHERE {}",
        render_condition(key_condition, request)
    );
    if let Some(filter) = &request.filter {
        let clause = render_clause(
            filter.comparison,
            &filter.name_token,
            &filter.value_token,
            request,
        );
        description.push_str(&format!(" FILTER ON {clause}"));
    }
    if let Some(projection) = &request.projection {
        description.push_str(&format!(" SHOWING ONLY {}", projection.join(", ")));
    }
    description
}

fn render_condition(
    condition: &expr::KeyConditionExpr,
    request: &read::query::QueryRequest,
) -> String {
    let partition = render_clause(
        expr::KeyComparison::Equals,
        &condition.partition.name_token,
        &condition.partition.value_token,
        request,
    );
    match &condition.sort {
        Some(sort) => {
            let clause = render_clause(sort.comparison, &sort.name_token, &sort.value_token, request);
            format!("{partition} AND {clause}")
        }
        None => partition,
    }
}

fn render_clause(
    comparison: expr::KeyComparison,
    name_token: &str,
    value_token: &str,
    request: &read::query::QueryRequest,
) -> String {
    let name = resolve_name(name_token, &request.expression_attribute_names);
    let value = resolve_value(value_token, &request.expression_attribute_values);
    comparison.render(&name, &value)
}

fn resolve_name(token: &str, names: &collections::HashMap<String, String>) -> String {
    names
        .get(token)
        .cloned()
        .unwrap_or_else(|| token.to_string())
}

fn resolve_value(
    token: &str,
    values: &collections::HashMap<String, types::AttributeValue>,
) -> String {
    values
        .get(token)
        .map(render_value)
        .unwrap_or_else(|| token.to_string())
}

fn render_value(value: &types::AttributeValue) -> String {
    match value {
        types::AttributeValue::S(text) => format!("'{text}'"),
        types::AttributeValue::N(number) => format!("'{number}'"),
        types::AttributeValue::Bool(flag) => format!("'{flag}'"),
        other => format!("'{other:?}'"),
    }
}
