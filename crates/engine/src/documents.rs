//! Stored documents.
//!
//! Every collection lives in the single `documents` table: one row per
//! document, with its fields kept as a JSON object in `body`. `seq` is the
//! insertion sequence and defines the natural order of a collection.

use sea_orm::entity::prelude::*;
use serde_json::Map;

use crate::{EngineError, ObjectId};

/// A document of some collection: its id plus its fields (without the id).
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pub id: ObjectId,
    pub fields: Map<String, serde_json::Value>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "documents")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub seq: i64,
    pub collection: String,
    pub object_id: String,
    pub body: Json,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Document {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let id = ObjectId::parse_str(&model.object_id).map_err(|_| {
            EngineError::CorruptDocument(format!("invalid object id {:?}", model.object_id))
        })?;
        let serde_json::Value::Object(fields) = model.body else {
            return Err(EngineError::CorruptDocument(format!(
                "document {id} body is not an object"
            )));
        };

        Ok(Self { id, fields })
    }
}
