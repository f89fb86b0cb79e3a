//! The request builder facade.
//!
//! A [`RequestBuilder`] is constructed once from a validated [`schema::TableSchema`]
//! and then hands out request descriptors for that table. It holds no
//! client: execution is a separate step on each descriptor, with the client
//! passed in by the caller.

use crate::error;
use crate::read;
use crate::schema;
use crate::write;

use serde::Serialize;

/// Schema-bound entry point for building requests against one table.
///
/// ```rust
/// use dynamodb_table_query::{builder, read, schema};
/// use serde_json::json;
///
/// # fn example(table: schema::TableSchema) -> dynamodb_table_query::error::Result<()> {
/// let builder = builder::RequestBuilder::new(table)?;
/// let request = builder.query().build(read::query::Query {
///     partition_value: json!("Tom Hanks"),
///     ..Default::default()
/// })?;
/// println!("{}", request.explain());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RequestBuilder {
    primary_key: schema::key::PrimaryKey,
    schema: schema::TableSchema,
}

impl RequestBuilder {
    /// Bind a builder to a table schema.
    ///
    /// Fails when the schema defines no partition-role key entry; such a
    /// table cannot be addressed at all, so the failure is surfaced here
    /// rather than on every request.
    pub fn new(schema: schema::TableSchema) -> error::Result<Self> {
        let primary_key =
            schema
                .resolve_primary_key()
                .ok_or_else(|| error::Error::NoUsableKey {
                    table: schema.table_name.clone(),
                })?;
        Ok(Self {
            primary_key,
            schema,
        })
    }

    /// The bound table's name.
    pub fn table_name(&self) -> &str {
        &self.schema.table_name
    }

    /// A query builder over the table's primary key.
    pub fn query(&self) -> read::query::QueryBuilder {
        read::query::QueryBuilder::new(
            self.schema.table_name.clone(),
            None,
            self.primary_key.clone(),
        )
    }

    /// A query builder over one secondary index.
    ///
    /// The lookup is scope-isolated; asking for a local index under the
    /// global scope fails even when the name exists locally.
    pub fn index_query(
        &self,
        name: &str,
        scope: schema::index::IndexScope,
    ) -> error::Result<read::query::QueryBuilder> {
        let index =
            self.schema
                .index(name, scope)
                .ok_or_else(|| error::Error::IndexNotFound {
                    table: self.schema.table_name.clone(),
                    name: name.to_string(),
                    scope,
                })?;
        let index_key = index.resolve_key().ok_or_else(|| error::Error::NoUsableKey {
            table: format!("{}.{}", self.schema.table_name, index.index_name),
        })?;
        Ok(read::query::QueryBuilder::new(
            self.schema.table_name.clone(),
            Some(index.index_name.clone()),
            index_key,
        ))
    }

    /// Build a put request.
    pub fn put<T: Serialize>(&self, put: write::put::Put<T>) -> error::Result<write::put::PutRequest> {
        write::put::build(&self.schema.table_name, put)
    }

    /// Build an update request, resolving the item key against the table's
    /// primary key schema.
    pub fn update<T: Serialize>(
        &self,
        update: write::update::Update<T>,
    ) -> error::Result<write::update::UpdateRequest> {
        write::update::build(&self.schema.table_name, &self.primary_key, update)
    }

    /// Build a delete request, extracting the item key from a full record.
    pub fn delete<T: Serialize>(
        &self,
        record: T,
    ) -> error::Result<write::delete::DeleteRequest> {
        write::delete::build(&self.schema.table_name, &self.primary_key, record)
    }

    /// Build a batch write of puts.
    pub fn batch_write<T: Serialize>(
        &self,
        records: Vec<T>,
    ) -> error::Result<write::batch::BatchWriteRequest> {
        write::batch::build(&self.schema.table_name, records)
    }

    /// Start a transactional write group.
    pub fn transaction(&self) -> write::transact::TransactionBuilder {
        write::transact::TransactionBuilder::default()
    }
}
