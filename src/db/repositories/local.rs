//! In-memory repository for unit testing and local development.
//!
//! Enforces the same invariants as the SQLite backend: unique names,
//! non-empty required fields, mission foreign keys, and cascade deletion of
//! a scientist's missions.

use std::collections::BTreeMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::api::{
    Mission, MissionId, NewMission, NewPlanet, NewScientist, Planet, PlanetId, Scientist,
    ScientistId, ScientistPatch,
};
use crate::db::repository::{
    ErrorContext, MissionRepository, PlanetRepository, RepositoryError, RepositoryResult,
    ScientistRepository,
};

#[derive(Debug, Default)]
struct Tables {
    scientists: BTreeMap<i64, Scientist>,
    planets: BTreeMap<i64, Planet>,
    missions: BTreeMap<i64, Mission>,
    next_scientist_id: i64,
    next_planet_id: i64,
    next_mission_id: i64,
}

impl Tables {
    fn scientist_name_taken(&self, name: &str, exclude_id: Option<i64>) -> bool {
        self.scientists
            .values()
            .any(|s| s.name == name && Some(s.id.0) != exclude_id)
    }

    fn planet_name_taken(&self, name: &str) -> bool {
        self.planets.values().any(|p| p.name == name)
    }
}

/// Map-backed repository holding all records in process memory.
#[derive(Debug, Default)]
pub struct LocalRepository {
    tables: RwLock<Tables>,
}

impl LocalRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn validation(operation: &str, entity: &str, message: impl Into<String>) -> RepositoryError {
    RepositoryError::validation_with_context(
        message,
        ErrorContext::new(operation).with_entity(entity),
    )
}

#[async_trait]
impl ScientistRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(true)
    }

    async fn list_scientists(&self) -> RepositoryResult<Vec<Scientist>> {
        Ok(self.tables.read().scientists.values().cloned().collect())
    }

    async fn create_scientist(&self, input: &NewScientist) -> RepositoryResult<Scientist> {
        let violations = input.validate();
        if !violations.is_empty() {
            return Err(validation(
                "create_scientist",
                "scientist",
                violations.join("; "),
            ));
        }

        let mut tables = self.tables.write();
        if tables.scientist_name_taken(&input.name, None) {
            return Err(validation(
                "create_scientist",
                "scientist",
                "name must be unique",
            ));
        }

        tables.next_scientist_id += 1;
        let scientist = Scientist {
            id: ScientistId::new(tables.next_scientist_id),
            name: input.name.clone(),
            field_of_study: input.field_of_study.clone(),
        };
        tables.scientists.insert(scientist.id.0, scientist.clone());
        Ok(scientist)
    }

    async fn get_scientist(&self, id: ScientistId) -> RepositoryResult<Scientist> {
        self.tables
            .read()
            .scientists
            .get(&id.0)
            .cloned()
            .ok_or_else(|| {
                RepositoryError::not_found_with_context(
                    "Scientist not found",
                    ErrorContext::new("get_scientist")
                        .with_entity("scientist")
                        .with_entity_id(id.0),
                )
            })
    }

    async fn update_scientist(
        &self,
        id: ScientistId,
        patch: &ScientistPatch,
    ) -> RepositoryResult<Scientist> {
        let mut tables = self.tables.write();

        let mut scientist = tables.scientists.get(&id.0).cloned().ok_or_else(|| {
            RepositoryError::not_found_with_context(
                "Scientist not found",
                ErrorContext::new("update_scientist")
                    .with_entity("scientist")
                    .with_entity_id(id.0),
            )
        })?;

        let violations = patch.validate();
        if !violations.is_empty() {
            return Err(validation(
                "update_scientist",
                "scientist",
                violations.join("; "),
            ));
        }

        if let Some(ref name) = patch.name {
            if tables.scientist_name_taken(name, Some(id.0)) {
                return Err(validation(
                    "update_scientist",
                    "scientist",
                    "name must be unique",
                ));
            }
            scientist.name = name.clone();
        }
        if let Some(ref field) = patch.field_of_study {
            scientist.field_of_study = field.clone();
        }

        if let Some(new_id) = patch.id {
            if new_id != id.0 {
                if tables.scientists.contains_key(&new_id) {
                    return Err(validation(
                        "update_scientist",
                        "scientist",
                        "id must be unique",
                    ));
                }
                // Primary-key overwrite with dependent missions would orphan
                // their foreign keys.
                if tables.missions.values().any(|m| m.scientist_id == id) {
                    return Err(validation(
                        "update_scientist",
                        "scientist",
                        "missions still reference this scientist",
                    ));
                }
                tables.scientists.remove(&id.0);
                scientist.id = ScientistId::new(new_id);
            }
        }

        tables.scientists.insert(scientist.id.0, scientist.clone());
        Ok(scientist)
    }

    async fn delete_scientist(&self, id: ScientistId) -> RepositoryResult<()> {
        let mut tables = self.tables.write();
        if tables.scientists.remove(&id.0).is_none() {
            return Err(RepositoryError::not_found_with_context(
                "Scientist not found",
                ErrorContext::new("delete_scientist")
                    .with_entity("scientist")
                    .with_entity_id(id.0),
            ));
        }
        // Cascade: a scientist's missions do not outlive it.
        tables.missions.retain(|_, m| m.scientist_id != id);
        Ok(())
    }
}

#[async_trait]
impl PlanetRepository for LocalRepository {
    async fn list_planets(&self) -> RepositoryResult<Vec<Planet>> {
        Ok(self.tables.read().planets.values().cloned().collect())
    }

    async fn create_planet(&self, input: &NewPlanet) -> RepositoryResult<Planet> {
        let violations = input.validate();
        if !violations.is_empty() {
            return Err(validation("create_planet", "planet", violations.join("; ")));
        }

        let mut tables = self.tables.write();
        if tables.planet_name_taken(&input.name) {
            return Err(validation("create_planet", "planet", "name must be unique"));
        }

        tables.next_planet_id += 1;
        let planet = Planet {
            id: PlanetId::new(tables.next_planet_id),
            name: input.name.clone(),
            distance_from_earth: input.distance_from_earth,
        };
        tables.planets.insert(planet.id.0, planet.clone());
        Ok(planet)
    }

    async fn get_planet(&self, id: PlanetId) -> RepositoryResult<Planet> {
        self.tables
            .read()
            .planets
            .get(&id.0)
            .cloned()
            .ok_or_else(|| {
                RepositoryError::not_found_with_context(
                    "Planet not found",
                    ErrorContext::new("get_planet")
                        .with_entity("planet")
                        .with_entity_id(id.0),
                )
            })
    }
}

#[async_trait]
impl MissionRepository for LocalRepository {
    async fn create_mission(&self, input: &NewMission) -> RepositoryResult<Mission> {
        let violations = input.validate();
        if !violations.is_empty() {
            return Err(validation(
                "create_mission",
                "mission",
                violations.join("; "),
            ));
        }

        let mut tables = self.tables.write();
        if !tables.scientists.contains_key(&input.scientist_id.0) {
            return Err(validation(
                "create_mission",
                "mission",
                "scientist_id does not reference an existing scientist",
            ));
        }
        if !tables.planets.contains_key(&input.planet_id.0) {
            return Err(validation(
                "create_mission",
                "mission",
                "planet_id does not reference an existing planet",
            ));
        }

        tables.next_mission_id += 1;
        let mission = Mission {
            id: MissionId::new(tables.next_mission_id),
            name: input.name.clone(),
            scientist_id: input.scientist_id,
            planet_id: input.planet_id,
        };
        tables.missions.insert(mission.id.0, mission.clone());
        Ok(mission)
    }

    async fn missions_for_scientist(&self, id: ScientistId) -> RepositoryResult<Vec<Mission>> {
        Ok(self
            .tables
            .read()
            .missions
            .values()
            .filter(|m| m.scientist_id == id)
            .cloned()
            .collect())
    }
}
