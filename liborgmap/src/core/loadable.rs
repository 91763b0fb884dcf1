use crate::core::{database::Database, error::Result};
use async_trait::async_trait;

/// Common behavior for objects that can be loaded from the database by id
#[async_trait]
pub trait Loadable: Sized {
    type Id: Send;

    /// An id value that marks an object as not yet stored in the database
    fn invalid_id() -> Self::Id;

    /// Load the object with the given id from the database
    async fn load(id: Self::Id, db: &Database) -> Result<Self>;
}
