//! Repository traits for record storage.
//!
//! These traits define the abstract storage interface the service layer and
//! HTTP handlers are written against. Implementations live in
//! `db::repositories`.

use async_trait::async_trait;

use crate::api::{
    Mission, NewMission, NewPlanet, NewScientist, Planet, PlanetId, Scientist, ScientistId,
    ScientistPatch,
};

mod error;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

/// Repository trait for scientist records.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait ScientistRepository: Send + Sync {
    /// Check that the backing store is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// List all scientists.
    async fn list_scientists(&self) -> RepositoryResult<Vec<Scientist>>;

    /// Insert a new scientist and return the stored record.
    ///
    /// # Errors
    /// * `ValidationError` if a field constraint (non-empty, unique name)
    ///   is violated; no row persists.
    async fn create_scientist(&self, input: &NewScientist) -> RepositoryResult<Scientist>;

    /// Fetch a scientist by id.
    ///
    /// # Errors
    /// * `NotFound` if no scientist has the given id.
    async fn get_scientist(&self, id: ScientistId) -> RepositoryResult<Scientist>;

    /// Overwrite the attributes named in `patch` on an existing scientist.
    ///
    /// Returns the updated record. The patch may rename the primary key;
    /// the returned record carries the resulting id.
    ///
    /// # Errors
    /// * `NotFound` if no scientist has the given id.
    /// * `ValidationError` if an overwrite violates a constraint, including
    ///   a foreign key still referencing the old id.
    async fn update_scientist(
        &self,
        id: ScientistId,
        patch: &ScientistPatch,
    ) -> RepositoryResult<Scientist>;

    /// Delete a scientist and, by cascade, every mission that references it.
    ///
    /// # Errors
    /// * `NotFound` if no scientist has the given id.
    async fn delete_scientist(&self, id: ScientistId) -> RepositoryResult<()>;
}

/// Repository trait for planet records.
#[async_trait]
pub trait PlanetRepository: Send + Sync {
    /// List all planets.
    async fn list_planets(&self) -> RepositoryResult<Vec<Planet>>;

    /// Insert a new planet and return the stored record.
    async fn create_planet(&self, input: &NewPlanet) -> RepositoryResult<Planet>;

    /// Fetch a planet by id.
    async fn get_planet(&self, id: PlanetId) -> RepositoryResult<Planet>;
}

/// Repository trait for mission records.
#[async_trait]
pub trait MissionRepository: Send + Sync {
    /// Insert a new mission and return the stored record.
    ///
    /// # Errors
    /// * `ValidationError` if the name is empty or either foreign key does
    ///   not reference an existing row; no row persists.
    async fn create_mission(&self, input: &NewMission) -> RepositoryResult<Mission>;

    /// List the missions owned by one scientist.
    async fn missions_for_scientist(&self, id: ScientistId) -> RepositoryResult<Vec<Mission>>;
}

/// Aggregate trait for backends that store all three record types.
pub trait FullRepository: ScientistRepository + PlanetRepository + MissionRepository {}

impl<T> FullRepository for T where T: ScientistRepository + PlanetRepository + MissionRepository {}
