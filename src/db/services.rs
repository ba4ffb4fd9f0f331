//! High-level business logic functions.
//!
//! These functions sit between the HTTP handlers and the repository traits:
//! they run input validation before writes and assemble the joined record
//! views the API returns. They are generic over the repository so both
//! `Arc<dyn FullRepository>` and concrete implementations work.

use crate::api::{
    Mission, MissionDetail, MissionWithPlanet, NewMission, NewPlanet, NewScientist, Planet,
    Scientist, ScientistDetail, ScientistId, ScientistPatch,
};
use crate::db::repository::{
    ErrorContext, FullRepository, PlanetRepository, RepositoryError, RepositoryResult,
    ScientistRepository,
};

/// Check that the backing store is reachable.
pub async fn health_check<R>(repo: &R) -> RepositoryResult<bool>
where
    R: ScientistRepository + ?Sized,
{
    repo.health_check().await
}

/// List all scientists.
pub async fn list_scientists<R>(repo: &R) -> RepositoryResult<Vec<Scientist>>
where
    R: ScientistRepository + ?Sized,
{
    repo.list_scientists().await
}

/// Validate and store a new scientist.
pub async fn create_scientist<R>(repo: &R, input: &NewScientist) -> RepositoryResult<Scientist>
where
    R: ScientistRepository + ?Sized,
{
    let violations = input.validate();
    if !violations.is_empty() {
        return Err(RepositoryError::validation_with_context(
            violations.join("; "),
            ErrorContext::new("create_scientist").with_entity("scientist"),
        ));
    }
    repo.create_scientist(input).await
}

/// Fetch one scientist joined with their missions and each mission's planet.
pub async fn get_scientist_detail<R>(repo: &R, id: ScientistId) -> RepositoryResult<ScientistDetail>
where
    R: FullRepository + ?Sized,
{
    let scientist = repo.get_scientist(id).await?;
    let missions = missions_with_planets(repo, id).await?;
    Ok(ScientistDetail {
        scientist,
        missions,
    })
}

/// Overwrite the attributes named in a PATCH body onto an existing scientist
/// and return the updated joined record.
///
/// Absence of the scientist takes precedence over problems with the body:
/// the lookup runs before the body is decoded.
pub async fn update_scientist<R>(
    repo: &R,
    id: ScientistId,
    body: &serde_json::Value,
) -> RepositoryResult<ScientistDetail>
where
    R: FullRepository + ?Sized,
{
    repo.get_scientist(id).await?;

    let patch = ScientistPatch::from_json(body).map_err(|message| {
        RepositoryError::validation_with_context(
            message,
            ErrorContext::new("update_scientist").with_entity("scientist"),
        )
    })?;
    let violations = patch.validate();
    if !violations.is_empty() {
        return Err(RepositoryError::validation_with_context(
            violations.join("; "),
            ErrorContext::new("update_scientist").with_entity("scientist"),
        ));
    }

    let updated = repo.update_scientist(id, &patch).await?;
    let missions = missions_with_planets(repo, updated.id).await?;
    Ok(ScientistDetail {
        scientist: updated,
        missions,
    })
}

/// Delete a scientist; their missions go with them.
pub async fn delete_scientist<R>(repo: &R, id: ScientistId) -> RepositoryResult<()>
where
    R: ScientistRepository + ?Sized,
{
    repo.delete_scientist(id).await
}

/// List all planets.
pub async fn list_planets<R>(repo: &R) -> RepositoryResult<Vec<Planet>>
where
    R: PlanetRepository + ?Sized,
{
    repo.list_planets().await
}

/// Validate and store a new planet.
pub async fn create_planet<R>(repo: &R, input: &NewPlanet) -> RepositoryResult<Planet>
where
    R: PlanetRepository + ?Sized,
{
    let violations = input.validate();
    if !violations.is_empty() {
        return Err(RepositoryError::validation_with_context(
            violations.join("; "),
            ErrorContext::new("create_planet").with_entity("planet"),
        ));
    }
    repo.create_planet(input).await
}

/// Validate and store a new mission, returning it joined with its scientist
/// and planet.
pub async fn create_mission<R>(repo: &R, input: &NewMission) -> RepositoryResult<MissionDetail>
where
    R: FullRepository + ?Sized,
{
    let violations = input.validate();
    if !violations.is_empty() {
        return Err(RepositoryError::validation_with_context(
            violations.join("; "),
            ErrorContext::new("create_mission").with_entity("mission"),
        ));
    }

    let mission = repo.create_mission(input).await?;
    let scientist = repo.get_scientist(mission.scientist_id).await?;
    let planet = repo.get_planet(mission.planet_id).await?;
    Ok(MissionDetail {
        mission,
        scientist,
        planet,
    })
}

async fn missions_with_planets<R>(
    repo: &R,
    id: ScientistId,
) -> RepositoryResult<Vec<MissionWithPlanet>>
where
    R: FullRepository + ?Sized,
{
    let missions: Vec<Mission> = repo.missions_for_scientist(id).await?;
    let mut joined = Vec::with_capacity(missions.len());
    for mission in missions {
        let planet = repo.get_planet(mission.planet_id).await?;
        joined.push(MissionWithPlanet { mission, planet });
    }
    Ok(joined)
}
