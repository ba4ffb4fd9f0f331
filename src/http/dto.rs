//! Data Transfer Objects for the HTTP API.
//!
//! Response DTOs apply the per-record-type serialization rules: list
//! payloads exclude mission collections, detail payloads nest them, and row
//! timestamps never appear on the wire.

use serde::{Deserialize, Serialize};

use crate::api::{
    MissionDetail, MissionWithPlanet, NewMission, NewScientist, Planet, PlanetId, Scientist,
    ScientistDetail, ScientistId,
};

/// Scientist payload without the mission collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScientistDto {
    pub id: i64,
    pub name: String,
    pub field_of_study: String,
}

impl From<Scientist> for ScientistDto {
    fn from(scientist: Scientist) -> Self {
        Self {
            id: scientist.id.value(),
            name: scientist.name,
            field_of_study: scientist.field_of_study,
        }
    }
}

/// Planet payload without the mission collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanetDto {
    pub id: i64,
    pub name: String,
    pub distance_from_earth: f64,
}

impl From<Planet> for PlanetDto {
    fn from(planet: Planet) -> Self {
        Self {
            id: planet.id.value(),
            name: planet.name,
            distance_from_earth: planet.distance_from_earth,
        }
    }
}

/// Mission payload nested inside a scientist detail; carries its planet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionWithPlanetDto {
    pub id: i64,
    pub name: String,
    pub scientist_id: i64,
    pub planet_id: i64,
    pub planet: PlanetDto,
}

impl From<MissionWithPlanet> for MissionWithPlanetDto {
    fn from(joined: MissionWithPlanet) -> Self {
        Self {
            id: joined.mission.id.value(),
            name: joined.mission.name,
            scientist_id: joined.mission.scientist_id.value(),
            planet_id: joined.mission.planet_id.value(),
            planet: joined.planet.into(),
        }
    }
}

/// Full scientist payload with nested mission and planet data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScientistDetailDto {
    pub id: i64,
    pub name: String,
    pub field_of_study: String,
    pub missions: Vec<MissionWithPlanetDto>,
}

impl From<ScientistDetail> for ScientistDetailDto {
    fn from(detail: ScientistDetail) -> Self {
        Self {
            id: detail.scientist.id.value(),
            name: detail.scientist.name,
            field_of_study: detail.scientist.field_of_study,
            missions: detail.missions.into_iter().map(Into::into).collect(),
        }
    }
}

/// Full mission payload with both referenced records nested.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionDetailDto {
    pub id: i64,
    pub name: String,
    pub scientist_id: i64,
    pub planet_id: i64,
    pub scientist: ScientistDto,
    pub planet: PlanetDto,
}

impl From<MissionDetail> for MissionDetailDto {
    fn from(detail: MissionDetail) -> Self {
        Self {
            id: detail.mission.id.value(),
            name: detail.mission.name,
            scientist_id: detail.mission.scientist_id.value(),
            planet_id: detail.mission.planet_id.value(),
            scientist: detail.scientist.into(),
            planet: detail.planet.into(),
        }
    }
}

/// Request body for creating a new scientist.
///
/// Fields are optional at the parse layer; a missing field becomes an empty
/// value and fails the non-emptiness constraint like any other blank input.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateScientistRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub field_of_study: Option<String>,
}

impl From<CreateScientistRequest> for NewScientist {
    fn from(request: CreateScientistRequest) -> Self {
        Self {
            name: request.name.unwrap_or_default(),
            field_of_study: request.field_of_study.unwrap_or_default(),
        }
    }
}

/// Request body for creating a new mission.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateMissionRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub scientist_id: Option<i64>,
    #[serde(default)]
    pub planet_id: Option<i64>,
}

impl CreateMissionRequest {
    /// Convert to the validated input type; a missing foreign key is a
    /// constraint violation.
    pub fn into_new_mission(self) -> Result<NewMission, String> {
        let scientist_id = self
            .scientist_id
            .ok_or_else(|| "scientist_id is required".to_string())?;
        let planet_id = self
            .planet_id
            .ok_or_else(|| "planet_id is required".to_string())?;
        Ok(NewMission {
            name: self.name.unwrap_or_default(),
            scientist_id: ScientistId::new(scientist_id),
            planet_id: PlanetId::new(planet_id),
        })
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Database connection status
    pub database: String,
}
