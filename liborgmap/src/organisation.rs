//! Objects to manage the organisations that own geographic locations
use crate::core::{
    database::Database,
    error::{Error, Result},
    loadable::Loadable,
    query::{
        DynFilterPart,
        filter::{Cmp, FilterPart},
    },
};
use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;
use sqlx::QueryBuilder;
use sqlx::Sqlite;
use sqlx::sqlite::SqliteQueryResult;

/// A type for specifying fields that can be used for filtering a database query
/// for organisations
#[derive(Clone)]
pub enum Filter {
    /// Match the ID of the organisation to the given value
    Id(i64),

    /// Compare the name of the organisation to the given value
    Name(Cmp, String),
}

impl FilterPart for Filter {
    fn add_to_query(&self, builder: &mut sqlx::QueryBuilder<sqlx::Sqlite>) {
        match self {
            Self::Id(id) => _ = builder.push(" O.orgid = ").push_bind(*id),
            Self::Name(cmp, frag) => {
                let s = match cmp {
                    Cmp::Like => format!("%{frag}%"),
                    _ => frag.to_string(),
                };
                builder.push(" O.orgname ").push(cmp).push_bind(s);
            }
        }
    }
}

/// A named entity that owns zero or more geographic locations
#[derive(Debug, sqlx::FromRow, Deserialize, Serialize, PartialEq, Clone)]
pub struct Organisation {
    /// A unique ID that identifies this organisation in the database
    #[sqlx(rename = "orgid")]
    pub id: i64,

    /// The name of the organisation. Names are not required to be unique.
    #[sqlx(rename = "orgname")]
    pub name: String,
}

#[async_trait]
impl Loadable for Organisation {
    type Id = i64;

    fn invalid_id() -> Self::Id {
        -1
    }

    async fn load(id: Self::Id, db: &Database) -> Result<Self> {
        Self::build_query(Some(Filter::Id(id).into()))
            .build_query_as()
            .fetch_one(db.pool())
            .await
            .map_err(|e| e.into())
    }
}

impl Organisation {
    fn build_query(filter: Option<DynFilterPart>) -> QueryBuilder<'static, Sqlite> {
        let mut qb = QueryBuilder::new(r#"SELECT O.orgid, O.orgname FROM om_organisations O"#);
        if let Some(f) = filter {
            qb.push(" WHERE ");
            f.add_to_query(&mut qb);
        }
        qb
    }

    /// Loads all matching organisations from the database. The rows are
    /// returned in whatever order the database yields them.
    pub async fn load_all(filter: Option<DynFilterPart>, db: &Database) -> Result<Vec<Organisation>> {
        Self::build_query(filter)
            .build_query_as()
            .fetch_all(db.pool())
            .await
            .map_err(|e| e.into())
    }

    /// Add this organisation to the database. If this call completes
    /// successfully, the id of this object will be updated to the ID of the
    /// inserted row in the database
    pub async fn insert(&mut self, db: &Database) -> Result<SqliteQueryResult> {
        if self.id != Self::invalid_id() {
            return Err(Error::InvalidInsertObjectAlreadyExists(self.id));
        }

        sqlx::query(r#"INSERT INTO om_organisations (orgname) VALUES (?)"#)
            .bind(&self.name)
            .execute(db.pool())
            .await
            .inspect(|r| self.id = r.last_insert_rowid())
            .map_err(|e| e.into())
    }

    /// Creates a new organisation object with the given name. It will initially
    /// have an invalid ID until it is inserted into the database
    pub fn new(name: String) -> Self {
        Self {
            id: Self::invalid_id(),
            name,
        }
    }
}
