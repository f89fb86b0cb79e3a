use crate::write;

use aws_sdk_dynamodb::{Client, error as sdk_error, operation, types};

/// One member of a transactional write group.
///
/// Members are already-built descriptors, so each carries its own table and
/// a group may span tables.
#[derive(Clone, Debug, PartialEq)]
pub enum TransactItem {
    /// An item put, optionally condition-guarded.
    Put(write::put::PutRequest),
    /// An expression-driven update.
    Update(write::update::UpdateRequest),
}

impl TryFrom<TransactItem> for types::TransactWriteItem {
    type Error = sdk_error::BuildError;

    fn try_from(item: TransactItem) -> Result<Self, Self::Error> {
        let builder = Self::builder();
        let item = match item {
            TransactItem::Put(put) => {
                let put = types::Put::builder()
                    .table_name(put.table_name)
                    .set_item(Some(put.item))
                    .set_condition_expression(put.condition_expression)
                    .set_expression_attribute_names(put.expression_attribute_names)
                    .build()?;
                builder.put(put)
            }
            TransactItem::Update(update) => {
                let names =
                    Some(update.expression_attribute_names).filter(|map| !map.is_empty());
                let values =
                    Some(update.expression_attribute_values).filter(|map| !map.is_empty());
                let update = types::Update::builder()
                    .table_name(update.table_name)
                    .set_key(Some(update.key))
                    .update_expression(update.update_expression)
                    .set_expression_attribute_names(names)
                    .set_expression_attribute_values(values)
                    .build()?;
                builder.update(update)
            }
        };
        Ok(item.build())
    }
}

/// Accumulates puts and updates into one atomic group.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransactionBuilder {
    items: Vec<TransactItem>,
}

impl TransactionBuilder {
    /// Append a put to the group.
    pub fn put(mut self, request: write::put::PutRequest) -> Self {
        self.items.push(TransactItem::Put(request));
        self
    }

    /// Append an update to the group.
    pub fn update(mut self, request: write::update::UpdateRequest) -> Self {
        self.items.push(TransactItem::Update(request));
        self
    }

    /// Finish the group.
    pub fn build(self) -> TransactWriteRequest {
        TransactWriteRequest { items: self.items }
    }
}

/// A finished transactional write descriptor. All members apply atomically
/// or none do.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransactWriteRequest {
    /// The members, in submission order.
    pub items: Vec<TransactItem>,
}

impl TransactWriteRequest {
    /// Execute the transaction.
    pub async fn send(
        self,
        client: &Client,
    ) -> Result<
        operation::transact_write_items::TransactWriteItemsOutput,
        sdk_error::SdkError<operation::transact_write_items::TransactWriteItemsError>,
    > {
        let items = self
            .items
            .into_iter()
            .map(types::TransactWriteItem::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        client
            .transact_write_items()
            .set_transact_items(Some(items))
            .send()
            .await
    }
}
