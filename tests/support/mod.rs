//! Shared fixtures for integration tests.

use std::sync::Arc;

use cosmotrack::api::{Mission, NewMission, NewPlanet, NewScientist, Planet, Scientist};
use cosmotrack::db::repositories::LocalRepository;
use cosmotrack::db::services;
use cosmotrack::http::AppState;

/// Build an app state backed by a fresh in-memory repository.
pub fn app_state() -> AppState {
    AppState::new(Arc::new(LocalRepository::new()))
}

pub async fn seed_scientist(state: &AppState, name: &str) -> Scientist {
    services::create_scientist(
        state.repository.as_ref(),
        &NewScientist {
            name: name.to_string(),
            field_of_study: "Astrophysics".to_string(),
        },
    )
    .await
    .expect("seed scientist")
}

pub async fn seed_planet(state: &AppState, name: &str) -> Planet {
    services::create_planet(
        state.repository.as_ref(),
        &NewPlanet {
            name: name.to_string(),
            distance_from_earth: 40.2,
        },
    )
    .await
    .expect("seed planet")
}

pub async fn seed_mission(
    state: &AppState,
    name: &str,
    scientist: &Scientist,
    planet: &Planet,
) -> Mission {
    services::create_mission(
        state.repository.as_ref(),
        &NewMission {
            name: name.to_string(),
            scientist_id: scientist.id,
            planet_id: planet.id,
        },
    )
    .await
    .expect("seed mission")
    .mission
}
