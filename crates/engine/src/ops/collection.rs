use sea_orm::{
    ActiveValue, ConnectionTrait, DatabaseConnection, QueryFilter, QueryOrder, QuerySelect,
    TransactionTrait, prelude::*,
};
use serde_json::{Map, Value};

use crate::{Document, EngineError, ObjectId, ResultEngine, documents};

use super::with_tx;

/// Handle on a named collection of the document store.
///
/// Every operation touches at most one document, except [`Collection::find`]
/// and [`Collection::clear`].
#[derive(Clone, Copy, Debug)]
pub struct Collection<'a> {
    database: &'a DatabaseConnection,
    name: &'a str,
}

impl<'a> Collection<'a> {
    pub(crate) fn new(database: &'a DatabaseConnection, name: &'a str) -> Self {
        Self { database, name }
    }

    /// Documents in insertion order, skipping `skip` and returning at most `limit`.
    pub async fn find(&self, skip: u64, limit: u64) -> ResultEngine<Vec<Document>> {
        // SQLite offsets are signed 64-bit.
        let skip = skip.min(i64::MAX as u64);

        documents::Entity::find()
            .filter(documents::Column::Collection.eq(self.name))
            .order_by_asc(documents::Column::Seq)
            .offset(skip)
            .limit(limit)
            .all(self.database)
            .await?
            .into_iter()
            .map(Document::try_from)
            .collect()
    }

    pub async fn find_one(&self, id: &ObjectId) -> ResultEngine<Option<Document>> {
        self.find_model(self.database, id)
            .await?
            .map(Document::try_from)
            .transpose()
    }

    /// Insert a new document, assigning it a fresh id.
    pub async fn insert_one(&self, fields: Map<String, Value>) -> ResultEngine<Document> {
        let id = ObjectId::new();
        let model = self.active_model(&id, fields).insert(self.database).await?;
        tracing::debug!(collection = self.name, %id, "document inserted");
        Document::try_from(model)
    }

    /// Delete the document with the given id, returning how many were deleted.
    pub async fn delete_one(&self, id: &ObjectId) -> ResultEngine<u64> {
        let result = documents::Entity::delete_many()
            .filter(documents::Column::Collection.eq(self.name))
            .filter(documents::Column::ObjectId.eq(id.to_string()))
            .exec(self.database)
            .await?;
        Ok(result.rows_affected)
    }

    /// Set `fields` on the document with the given id, inserting it when absent.
    ///
    /// Fields of an existing document that are not in `fields` are kept.
    /// Returns the document as it is after the update.
    pub async fn find_one_and_upsert(
        &self,
        id: &ObjectId,
        fields: Map<String, Value>,
    ) -> ResultEngine<Document> {
        let model = with_tx!(self, |db_tx| {
            match self.find_model(&db_tx, id).await {
                Ok(Some(existing)) => self.set_fields(&db_tx, existing, fields).await,
                Ok(None) => self
                    .active_model(id, fields)
                    .insert(&db_tx)
                    .await
                    .map_err(EngineError::from),
                Err(err) => Err(err),
            }
        })?;

        Document::try_from(model)
    }

    /// Remove every document of the collection.
    pub async fn clear(&self) -> ResultEngine<u64> {
        let result = documents::Entity::delete_many()
            .filter(documents::Column::Collection.eq(self.name))
            .exec(self.database)
            .await?;
        Ok(result.rows_affected)
    }

    async fn find_model<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: &ObjectId,
    ) -> ResultEngine<Option<documents::Model>> {
        Ok(documents::Entity::find()
            .filter(documents::Column::Collection.eq(self.name))
            .filter(documents::Column::ObjectId.eq(id.to_string()))
            .one(conn)
            .await?)
    }

    async fn set_fields<C: ConnectionTrait>(
        &self,
        conn: &C,
        existing: documents::Model,
        fields: Map<String, Value>,
    ) -> ResultEngine<documents::Model> {
        let Value::Object(mut body) = existing.body.clone() else {
            return Err(EngineError::CorruptDocument(format!(
                "document {} body is not an object",
                existing.object_id
            )));
        };
        body.extend(fields);

        let mut active: documents::ActiveModel = existing.into();
        active.body = ActiveValue::Set(Value::Object(body));
        Ok(active.update(conn).await?)
    }

    fn active_model(&self, id: &ObjectId, fields: Map<String, Value>) -> documents::ActiveModel {
        documents::ActiveModel {
            seq: ActiveValue::NotSet,
            collection: ActiveValue::Set(self.name.to_string()),
            object_id: ActiveValue::Set(id.to_string()),
            body: ActiveValue::Set(Value::Object(fields)),
        }
    }
}
