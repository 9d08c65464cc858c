//! Service collection access. Services are listed, fetched, and created;
//! there is no update or delete path for them.

use futures::TryStreamExt;
use mongodb::Collection;
use mongodb::bson::{Document, doc};

use super::{LIST_CAP, StoreError, parse_id};

/// Typed facade over the `services` collection.
#[derive(Clone)]
pub struct ServiceStore {
    collection: Collection<Document>,
}

impl ServiceStore {
    pub fn new(collection: Collection<Document>) -> Self {
        Self { collection }
    }

    /// Up to [`LIST_CAP`] services in natural (insertion) order.
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

    /// Insert, then re-fetch by the store-assigned id (same two-step
    /// protocol as order creation).
    pub async fn insert(&self, document: Document) -> Result<Option<Document>, StoreError> {
        let result = self.collection.insert_one(document).await?;
        Ok(self
            .collection
            .find_one(doc! { "_id": result.inserted_id })
            .await?)
    }
}
