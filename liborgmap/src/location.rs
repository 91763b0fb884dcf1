//! Objects to manage the geographic locations that belong to an organisation
use crate::core::{
    database::Database,
    error::{Error, Result},
    loadable::Loadable,
    query::{
        DynFilterPart,
        filter::{self, Cmp, FilterPart},
    },
};
use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;
use sqlx::QueryBuilder;
use sqlx::Sqlite;
use sqlx::sqlite::SqliteQueryResult;
use std::str::FromStr;

/// An axis-aligned rectangle in (longitude, latitude) space that is used to
/// filter locations by inclusion. All four edges are inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_longitude: f64,
    pub min_latitude: f64,
    pub max_longitude: f64,
    pub max_latitude: f64,
}

impl BoundingBox {
    /// Returns true if the given point falls within this bounding box,
    /// including points that lie exactly on an edge
    pub fn contains(&self, longitude: f64, latitude: f64) -> bool {
        (self.min_longitude..=self.max_longitude).contains(&longitude)
            && (self.min_latitude..=self.max_latitude).contains(&latitude)
    }

    /// Generate a filter that matches all locations whose coordinates fall
    /// within this bounding box
    pub fn filter(&self) -> DynFilterPart {
        filter::and()
            .push(Filter::Longitude(Cmp::NotLessThan, self.min_longitude))
            .push(Filter::Longitude(Cmp::NotGreaterThan, self.max_longitude))
            .push(Filter::Latitude(Cmp::NotLessThan, self.min_latitude))
            .push(Filter::Latitude(Cmp::NotGreaterThan, self.max_latitude))
            .build()
    }
}

impl FromStr for BoundingBox {
    type Err = Error;

    /// Parse a bounding box from a string of the form
    /// `minLon,minLat,maxLon,maxLat`
    fn from_str(s: &str) -> Result<Self> {
        let coords = s
            .split(',')
            .map(|part| part.trim().parse::<f64>())
            .collect::<Result<Vec<f64>, _>>()
            .map_err(|_| Error::InvalidBoundingBox(s.to_string()))?;
        let [min_longitude, min_latitude, max_longitude, max_latitude] = coords[..] else {
            return Err(Error::InvalidBoundingBox(s.to_string()));
        };
        Ok(Self {
            min_longitude,
            min_latitude,
            max_longitude,
            max_latitude,
        })
    }
}

/// A type for specifying fields that can be used for filtering a database query
/// for locations
#[derive(Clone)]
pub enum Filter {
    /// Match the ID of the location to the given value
    Id(i64),

    /// Match the id of the location's organisation to the given value
    Organisation(i64),

    /// Compare the longitude of the location to the given value
    Longitude(Cmp, f64),

    /// Compare the latitude of the location to the given value
    Latitude(Cmp, f64),
}

impl FilterPart for Filter {
    fn add_to_query(&self, builder: &mut sqlx::QueryBuilder<sqlx::Sqlite>) {
        match self {
            Self::Id(id) => _ = builder.push(" L.locid = ").push_bind(*id),
            Self::Organisation(id) => _ = builder.push(" L.orgid = ").push_bind(*id),
            Self::Longitude(cmp, val) => {
                builder.push(" L.longitude").push(cmp).push_bind(*val);
            }
            Self::Latitude(cmp, val) => {
                builder.push(" L.latitude").push(cmp).push_bind(*val);
            }
        }
    }
}

/// A named geographic point that belongs to exactly one organisation
#[derive(Debug, sqlx::FromRow, Deserialize, Serialize, PartialEq, Clone)]
pub struct Location {
    /// A unique ID that identifies this location in the database
    #[sqlx(rename = "locid")]
    pub id: i64,

    /// The name of the location
    #[sqlx(rename = "locname")]
    #[serde(rename = "location_name")]
    pub name: String,

    /// The longitude of the location in degrees
    pub longitude: f64,

    /// The latitude of the location in degrees
    pub latitude: f64,

    /// The organisation to which this location belongs
    #[sqlx(rename = "orgid")]
    pub organisation_id: i64,
}

#[async_trait]
impl Loadable for Location {
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

impl Location {
    fn build_query(filter: Option<DynFilterPart>) -> QueryBuilder<'static, Sqlite> {
        let mut qb = QueryBuilder::new(
            r#"SELECT L.locid, L.locname, L.longitude, L.latitude, L.orgid FROM om_locations L"#,
        );
        if let Some(f) = filter {
            qb.push(" WHERE ");
            f.add_to_query(&mut qb);
        }
        qb
    }

    /// Loads all matching locations from the database
    pub async fn load_all(filter: Option<DynFilterPart>, db: &Database) -> Result<Vec<Location>> {
        Self::build_query(filter)
            .build_query_as()
            .fetch_all(db.pool())
            .await
            .map_err(|e| e.into())
    }

    /// Loads all locations that belong to the given organisation, optionally
    /// restricted to those whose coordinates fall within a bounding box
    pub async fn load_all_organisation(
        organisationid: i64,
        bounding_box: Option<BoundingBox>,
        db: &Database,
    ) -> Result<Vec<Location>> {
        let mut fbuilder = filter::and().push(Filter::Organisation(organisationid));
        if let Some(b) = bounding_box {
            fbuilder = fbuilder.push(b.filter());
        }
        Self::load_all(Some(fbuilder.build()), db).await
    }

    /// Add this location to the database. If this call completes successfully,
    /// the id of this object will be updated to the ID of the inserted row in
    /// the database
    pub async fn insert(&mut self, db: &Database) -> Result<SqliteQueryResult> {
        if self.id != Self::invalid_id() {
            return Err(Error::InvalidInsertObjectAlreadyExists(self.id));
        }

        sqlx::query(
            r#"INSERT INTO om_locations
          (locname, longitude, latitude, orgid)
          VALUES (?, ?, ?, ?)"#,
        )
        .bind(&self.name)
        .bind(self.longitude)
        .bind(self.latitude)
        .bind(self.organisation_id)
        .execute(db.pool())
        .await
        .inspect(|r| self.id = r.last_insert_rowid())
        .map_err(|e| e.into())
    }

    /// Creates a new location object with the given data. It will initially
    /// have an invalid ID until it is inserted into the database
    pub fn new(name: String, longitude: f64, latitude: f64, organisation_id: i64) -> Self {
        Self {
            id: Self::invalid_id(),
            name,
            longitude,
            latitude,
            organisation_id,
        }
    }
}
