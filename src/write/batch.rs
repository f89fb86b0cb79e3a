use crate::error;

use aws_sdk_dynamodb::{Client, error as sdk_error, operation, types};
use serde::Serialize;
use serde_dynamo::to_item;
use std::collections;

/// A finished batch write descriptor: a group of puts against one table.
///
/// The store caps a batch at 25 requests; larger groups are the caller's to
/// split. Unprocessed items come back verbatim in the output for the caller
/// to retry.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BatchWriteRequest {
    /// The serialized items to put, in submission order.
    pub items: Vec<collections::HashMap<String, types::AttributeValue>>,
    /// The table targeted.
    pub table_name: String,
}

pub(crate) fn build<T: Serialize>(
    table_name: &str,
    records: Vec<T>,
) -> error::Result<BatchWriteRequest> {
    let items = records
        .into_iter()
        .map(to_item)
        .collect::<serde_dynamo::Result<_>>()?;
    Ok(BatchWriteRequest {
        items,
        table_name: table_name.to_string(),
    })
}

impl BatchWriteRequest {
    /// Execute the batch write.
    pub async fn send(
        self,
        client: &Client,
    ) -> Result<
        operation::batch_write_item::BatchWriteItemOutput,
        sdk_error::SdkError<operation::batch_write_item::BatchWriteItemError>,
    > {
        let requests = self
            .items
            .into_iter()
            .map(|item| {
                let put_request = types::PutRequest::builder()
                    .set_item(Some(item))
                    .build()
                    .unwrap();
                types::WriteRequest::builder()
                    .set_put_request(Some(put_request))
                    .build()
            })
            .collect();
        client
            .batch_write_item()
            .set_request_items(Some(collections::HashMap::from([(
                self.table_name,
                requests,
            )])))
            .send()
            .await
    }
}
