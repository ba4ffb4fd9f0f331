//! Service layer tests against the in-memory repository.

use crate::api::{NewMission, NewPlanet, NewScientist, PlanetId, ScientistId};
use crate::db::repositories::LocalRepository;
use crate::db::repository::RepositoryError;
use crate::db::services;

fn new_scientist(name: &str) -> NewScientist {
    NewScientist {
        name: name.to_string(),
        field_of_study: "Astrophysics".to_string(),
    }
}

fn new_planet(name: &str) -> NewPlanet {
    NewPlanet {
        name: name.to_string(),
        distance_from_earth: 4.2,
    }
}

#[tokio::test]
async fn test_create_scientist_rejects_blank_name() {
    let repo = LocalRepository::new();
    let result = services::create_scientist(&repo, &new_scientist("")).await;
    assert!(matches!(
        result,
        Err(RepositoryError::ValidationError { .. })
    ));
    assert!(services::list_scientists(&repo).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_and_list_scientists() {
    let repo = LocalRepository::new();
    let stored = services::create_scientist(&repo, &new_scientist("Vera Rubin"))
        .await
        .unwrap();
    assert_eq!(stored.name, "Vera Rubin");

    let all = services::list_scientists(&repo).await.unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn test_get_scientist_detail_not_found() {
    let repo = LocalRepository::new();
    let result = services::get_scientist_detail(&repo, ScientistId::new(404)).await;
    assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
}

#[tokio::test]
async fn test_update_scientist_missing_record_beats_bad_body() {
    let repo = LocalRepository::new();
    // Body is not even an object, but the lookup runs first.
    let body = serde_json::json!("nonsense");
    let result = services::update_scientist(&repo, ScientistId::new(1), &body).await;
    assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
}

#[tokio::test]
async fn test_update_scientist_overwrites_named_attributes() {
    let repo = LocalRepository::new();
    let stored = services::create_scientist(&repo, &new_scientist("Old Name"))
        .await
        .unwrap();

    let body = serde_json::json!({"name": "New Name"});
    let detail = services::update_scientist(&repo, stored.id, &body)
        .await
        .unwrap();
    assert_eq!(detail.scientist.name, "New Name");
    assert_eq!(detail.scientist.field_of_study, "Astrophysics");
}

#[tokio::test]
async fn test_create_mission_joins_scientist_and_planet() {
    let repo = LocalRepository::new();
    let scientist = services::create_scientist(&repo, &new_scientist("Mae Jemison"))
        .await
        .unwrap();
    let planet = services::create_planet(&repo, &new_planet("Proxima b"))
        .await
        .unwrap();

    let detail = services::create_mission(
        &repo,
        &NewMission {
            name: "First Survey".to_string(),
            scientist_id: scientist.id,
            planet_id: planet.id,
        },
    )
    .await
    .unwrap();

    assert_eq!(detail.scientist.id, scientist.id);
    assert_eq!(detail.planet.id, planet.id);
    assert_eq!(detail.mission.name, "First Survey");
}

#[tokio::test]
async fn test_create_mission_rejects_dangling_scientist() {
    let repo = LocalRepository::new();
    let planet = services::create_planet(&repo, &new_planet("Kepler-452b"))
        .await
        .unwrap();

    let result = services::create_mission(
        &repo,
        &NewMission {
            name: "Orphan".to_string(),
            scientist_id: ScientistId::new(999),
            planet_id: planet.id,
        },
    )
    .await;
    assert!(matches!(
        result,
        Err(RepositoryError::ValidationError { .. })
    ));
}

#[tokio::test]
async fn test_create_planet_duplicate_name_rejected() {
    let repo = LocalRepository::new();
    services::create_planet(&repo, &new_planet("Mars"))
        .await
        .unwrap();
    let result = services::create_planet(&repo, &new_planet("Mars")).await;
    assert!(matches!(
        result,
        Err(RepositoryError::ValidationError { .. })
    ));
}

#[tokio::test]
async fn test_mission_detail_uses_mission_planet() {
    let repo = LocalRepository::new();
    let scientist = services::create_scientist(&repo, &new_scientist("Carl Sagan"))
        .await
        .unwrap();
    let venus = services::create_planet(&repo, &new_planet("Venus"))
        .await
        .unwrap();
    let _mars = services::create_planet(&repo, &new_planet("Mars"))
        .await
        .unwrap();

    services::create_mission(
        &repo,
        &NewMission {
            name: "Greenhouse Study".to_string(),
            scientist_id: scientist.id,
            planet_id: venus.id,
        },
    )
    .await
    .unwrap();

    let detail = services::get_scientist_detail(&repo, scientist.id)
        .await
        .unwrap();
    assert_eq!(detail.missions.len(), 1);
    assert_eq!(detail.missions[0].planet.id, PlanetId::new(venus.id.0));
}
