use chrono::NaiveDateTime;
use diesel::prelude::*;

use super::schema::{missions, planets, scientists};
use crate::api::{Mission, MissionId, Planet, PlanetId, Scientist, ScientistId};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = scientists)]
#[allow(dead_code)] // created_at is row metadata, never surfaced
pub struct ScientistRow {
    pub id: i64,
    pub name: String,
    pub field_of_study: String,
    pub created_at: NaiveDateTime,
}

impl From<ScientistRow> for Scientist {
    fn from(row: ScientistRow) -> Self {
        Self {
            id: ScientistId::new(row.id),
            name: row.name,
            field_of_study: row.field_of_study,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = scientists)]
pub struct NewScientistRow {
    pub name: String,
    pub field_of_study: String,
}

/// Optional-field changeset for PATCH; `None` leaves the column untouched.
/// The primary key is excluded by the derive and overwritten separately.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = scientists)]
pub struct ScientistChangeset {
    pub name: Option<String>,
    pub field_of_study: Option<String>,
}

impl ScientistChangeset {
    pub fn has_changes(&self) -> bool {
        self.name.is_some() || self.field_of_study.is_some()
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = planets)]
#[allow(dead_code)]
pub struct PlanetRow {
    pub id: i64,
    pub name: String,
    pub distance_from_earth: f64,
    pub created_at: NaiveDateTime,
}

impl From<PlanetRow> for Planet {
    fn from(row: PlanetRow) -> Self {
        Self {
            id: PlanetId::new(row.id),
            name: row.name,
            distance_from_earth: row.distance_from_earth,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = planets)]
pub struct NewPlanetRow {
    pub name: String,
    pub distance_from_earth: f64,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = missions)]
#[allow(dead_code)]
pub struct MissionRow {
    pub id: i64,
    pub name: String,
    pub scientist_id: i64,
    pub planet_id: i64,
    pub created_at: NaiveDateTime,
}

impl From<MissionRow> for Mission {
    fn from(row: MissionRow) -> Self {
        Self {
            id: MissionId::new(row.id),
            name: row.name,
            scientist_id: ScientistId::new(row.scientist_id),
            planet_id: PlanetId::new(row.planet_id),
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = missions)]
pub struct NewMissionRow {
    pub name: String,
    pub scientist_id: i64,
    pub planet_id: i64,
}
