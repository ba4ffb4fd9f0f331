//! Domain types for the Cosmotrack API.
//!
//! Records are plain data: identity newtypes over `i64`, the three record
//! types, and the write-side input types the service layer validates before
//! handing them to a repository.

use serde::{Deserialize, Serialize};

/// Identifier for a [`Scientist`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScientistId(pub i64);

impl ScientistId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// Identifier for a [`Planet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlanetId(pub i64);

impl PlanetId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// Identifier for a [`Mission`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MissionId(pub i64);

impl MissionId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// A scientist on record. Owns zero or more missions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scientist {
    pub id: ScientistId,
    pub name: String,
    pub field_of_study: String,
}

/// A planet missions can target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Planet {
    pub id: PlanetId,
    pub name: String,
    pub distance_from_earth: f64,
}

/// A mission linking one scientist to one planet.
///
/// A mission cannot exist without a valid scientist and planet reference;
/// deleting its scientist deletes the mission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    pub id: MissionId,
    pub name: String,
    pub scientist_id: ScientistId,
    pub planet_id: PlanetId,
}

/// A mission joined with the planet it targets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionWithPlanet {
    pub mission: Mission,
    pub planet: Planet,
}

/// A scientist joined with their missions and each mission's planet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScientistDetail {
    pub scientist: Scientist,
    pub missions: Vec<MissionWithPlanet>,
}

/// A mission joined with both of its referenced records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionDetail {
    pub mission: Mission,
    pub scientist: Scientist,
    pub planet: Planet,
}

/// Input for creating a [`Scientist`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewScientist {
    pub name: String,
    pub field_of_study: String,
}

impl NewScientist {
    /// Check the declared field constraints, returning one message per
    /// violation. An empty list means the input is acceptable.
    pub fn validate(&self) -> Vec<String> {
        let mut violations = Vec::new();
        if self.name.is_empty() {
            violations.push("name must not be empty".to_string());
        }
        if self.field_of_study.is_empty() {
            violations.push("field_of_study must not be empty".to_string());
        }
        violations
    }
}

/// Input for creating a [`Planet`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewPlanet {
    pub name: String,
    pub distance_from_earth: f64,
}

impl NewPlanet {
    pub fn validate(&self) -> Vec<String> {
        let mut violations = Vec::new();
        if self.name.is_empty() {
            violations.push("name must not be empty".to_string());
        }
        violations
    }
}

/// Input for creating a [`Mission`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMission {
    pub name: String,
    pub scientist_id: ScientistId,
    pub planet_id: PlanetId,
}

impl NewMission {
    pub fn validate(&self) -> Vec<String> {
        let mut violations = Vec::new();
        if self.name.is_empty() {
            violations.push("name must not be empty".to_string());
        }
        violations
    }
}

/// Attribute overwrites for a PATCH on a scientist.
///
/// There is no field allow-list: any column may be named, including `id`.
/// Attributes absent from the request body are left untouched; attribute
/// names that are not columns are accepted and ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScientistPatch {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub field_of_study: Option<String>,
}

impl ScientistPatch {
    /// Decode a patch from a JSON request body.
    ///
    /// The body must be a JSON object; a value of the wrong type for a known
    /// column is a constraint violation.
    pub fn from_json(body: &serde_json::Value) -> Result<Self, String> {
        let map = body
            .as_object()
            .ok_or_else(|| "request body must be a JSON object".to_string())?;

        let mut patch = Self::default();
        for (attr, value) in map {
            match attr.as_str() {
                "id" => {
                    patch.id = Some(
                        value
                            .as_i64()
                            .ok_or_else(|| "id must be an integer".to_string())?,
                    );
                }
                "name" => {
                    patch.name = Some(
                        value
                            .as_str()
                            .ok_or_else(|| "name must be a string".to_string())?
                            .to_string(),
                    );
                }
                "field_of_study" => {
                    patch.field_of_study = Some(
                        value
                            .as_str()
                            .ok_or_else(|| "field_of_study must be a string".to_string())?
                            .to_string(),
                    );
                }
                // Unknown attributes are set-and-forget in the source system;
                // nothing is persisted for them.
                _ => {}
            }
        }
        Ok(patch)
    }

    /// Check the overwrites against the declared field constraints.
    pub fn validate(&self) -> Vec<String> {
        let mut violations = Vec::new();
        if matches!(self.name.as_deref(), Some("")) {
            violations.push("name must not be empty".to_string());
        }
        if matches!(self.field_of_study.as_deref(), Some("")) {
            violations.push("field_of_study must not be empty".to_string());
        }
        violations
    }
}

#[cfg(test)]
#[path = "api_tests.rs"]
mod api_tests;
