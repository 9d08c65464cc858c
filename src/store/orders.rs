//! Order collection access.

use futures::TryStreamExt;
use mongodb::Collection;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Bson, Document, Regex, doc};

use super::{LIST_CAP, SEARCH_CAP, StoreError, escape_regex, parse_id};

/// Outcome of a check-then-delete.
#[derive(Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
    /// The existence check passed but the delete removed nothing: another
    /// request won the race between the two calls.
    Raced,
}

/// Typed facade over the `orders` collection.
#[derive(Clone)]
pub struct OrderStore {
    collection: Collection<Document>,
}

impl OrderStore {
    pub fn new(collection: Collection<Document>) -> Self {
        Self { collection }
    }

    /// Up to [`LIST_CAP`] orders in natural (insertion) order.
    pub async fn list(&self) -> Result<Vec<Document>, StoreError> {
        let mut cursor = self.collection.find(doc! {}).limit(LIST_CAP).await?;
        let mut documents = Vec::new();
        while let Some(document) = cursor.try_next().await? {
            documents.push(document);
        }
        Ok(documents)
    }

    pub async fn get(&self, id: &str) -> Result<Option<Document>, StoreError> {
        let oid = parse_id(id)?;
        Ok(self.collection.find_one(doc! { "_id": oid }).await?)
    }

    /// Insert, then re-fetch by the store-assigned id. The two calls are not
    /// atomic: a concurrent delete can make the re-fetch come back empty.
    pub async fn insert(&self, document: Document) -> Result<Option<Document>, StoreError> {
        let result = self.collection.insert_one(document).await?;
        Ok(self
            .collection
            .find_one(doc! { "_id": result.inserted_id })
            .await?)
    }

    /// `$set` the given fields, then re-fetch when exactly one document was
    /// modified. Returns `None` both when the id matched nothing and when
    /// the update was a no-op; callers cannot tell the two apart.
    pub async fn update(&self, id: &str, fields: Document) -> Result<Option<Document>, StoreError> {
        let oid = parse_id(id)?;
        if fields.is_empty() {
            // An empty $set is a driver error; treat it as the no-op it is.
            return Ok(None);
        }
        let result = self
            .collection
            .update_one(doc! { "_id": oid }, doc! { "$set": fields })
            .await?;
        if result.modified_count == 1 {
            Ok(self.collection.find_one(doc! { "_id": oid }).await?)
        } else {
            Ok(None)
        }
    }

    /// Check-then-delete. See [`DeleteOutcome::Raced`] for the window this
    /// leaves open.
    pub async fn delete(&self, id: &str) -> Result<DeleteOutcome, StoreError> {
        let oid = parse_id(id)?;
        if self
            .collection
            .find_one(doc! { "_id": oid })
            .await?
            .is_none()
        {
            return Ok(DeleteOutcome::NotFound);
        }
        let result = self.collection.delete_one(doc! { "_id": oid }).await?;
        if result.deleted_count == 1 {
            Ok(DeleteOutcome::Deleted)
        } else {
            Ok(DeleteOutcome::Raced)
        }
    }

    /// Exact-id fetch when the query parses as an identifier (at most one
    /// result), otherwise a case-insensitive `token` prefix match capped at
    /// [`SEARCH_CAP`].
    pub async fn search(&self, query: &str) -> Result<Vec<Document>, StoreError> {
        if let Ok(oid) = ObjectId::parse_str(query) {
            return Ok(self
                .collection
                .find_one(doc! { "_id": oid })
                .await?
                .into_iter()
                .collect());
        }
        let mut cursor = self
            .collection
            .find(token_prefix_filter(query))
            .limit(SEARCH_CAP)
            .await?;
        let mut documents = Vec::new();
        while let Some(document) = cursor.try_next().await? {
            documents.push(document);
        }
        Ok(documents)
    }
}

fn token_prefix_filter(query: &str) -> Document {
    doc! {
        "token": Bson::RegularExpression(Regex {
            pattern: format!("^{}", escape_regex(query)),
            options: "i".to_string(),
        })
    }
}
