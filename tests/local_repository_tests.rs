//! Invariant tests for the in-memory repository.

use cosmotrack::api::{NewMission, NewPlanet, NewScientist, ScientistId, ScientistPatch};
use cosmotrack::db::repositories::LocalRepository;
use cosmotrack::db::repository::{
    MissionRepository, PlanetRepository, RepositoryError, ScientistRepository,
};

fn scientist(name: &str) -> NewScientist {
    NewScientist {
        name: name.to_string(),
        field_of_study: "Exobiology".to_string(),
    }
}

fn planet(name: &str) -> NewPlanet {
    NewPlanet {
        name: name.to_string(),
        distance_from_earth: 1.3,
    }
}

#[tokio::test]
async fn test_ids_are_assigned_sequentially() {
    let repo = LocalRepository::new();
    let first = repo.create_scientist(&scientist("First")).await.unwrap();
    let second = repo.create_scientist(&scientist("Second")).await.unwrap();
    assert_eq!(first.id.value() + 1, second.id.value());
}

#[tokio::test]
async fn test_duplicate_scientist_name_rejected() {
    let repo = LocalRepository::new();
    repo.create_scientist(&scientist("Unique")).await.unwrap();
    let result = repo.create_scientist(&scientist("Unique")).await;
    assert!(matches!(
        result,
        Err(RepositoryError::ValidationError { .. })
    ));
    assert_eq!(repo.list_scientists().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_update_to_duplicate_name_rejected() {
    let repo = LocalRepository::new();
    repo.create_scientist(&scientist("Taken")).await.unwrap();
    let other = repo.create_scientist(&scientist("Other")).await.unwrap();

    let patch = ScientistPatch {
        name: Some("Taken".to_string()),
        ..Default::default()
    };
    let result = repo.update_scientist(other.id, &patch).await;
    assert!(matches!(
        result,
        Err(RepositoryError::ValidationError { .. })
    ));
}

#[tokio::test]
async fn test_update_keeps_same_name_on_self() {
    let repo = LocalRepository::new();
    let stored = repo.create_scientist(&scientist("Same")).await.unwrap();

    // Re-submitting the record's own name is not a uniqueness conflict.
    let patch = ScientistPatch {
        name: Some("Same".to_string()),
        field_of_study: Some("Geology".to_string()),
        ..Default::default()
    };
    let updated = repo.update_scientist(stored.id, &patch).await.unwrap();
    assert_eq!(updated.field_of_study, "Geology");
}

#[tokio::test]
async fn test_delete_cascades_and_leaves_other_scientists_alone() {
    let repo = LocalRepository::new();
    let doomed = repo.create_scientist(&scientist("Doomed")).await.unwrap();
    let survivor = repo.create_scientist(&scientist("Survivor")).await.unwrap();
    let world = repo.create_planet(&planet("Trappist-1e")).await.unwrap();

    repo.create_mission(&NewMission {
        name: "Doomed Mission".to_string(),
        scientist_id: doomed.id,
        planet_id: world.id,
    })
    .await
    .unwrap();
    repo.create_mission(&NewMission {
        name: "Surviving Mission".to_string(),
        scientist_id: survivor.id,
        planet_id: world.id,
    })
    .await
    .unwrap();

    repo.delete_scientist(doomed.id).await.unwrap();

    assert!(repo
        .missions_for_scientist(doomed.id)
        .await
        .unwrap()
        .is_empty());
    assert_eq!(
        repo.missions_for_scientist(survivor.id)
            .await
            .unwrap()
            .len(),
        1
    );
}

#[tokio::test]
async fn test_delete_twice_is_not_found() {
    let repo = LocalRepository::new();
    let stored = repo.create_scientist(&scientist("Once")).await.unwrap();
    repo.delete_scientist(stored.id).await.unwrap();
    let result = repo.delete_scientist(stored.id).await;
    assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
}

#[tokio::test]
async fn test_mission_requires_existing_planet() {
    let repo = LocalRepository::new();
    let stored = repo.create_scientist(&scientist("Lonely")).await.unwrap();

    let result = repo
        .create_mission(&NewMission {
            name: "Nowhere".to_string(),
            scientist_id: stored.id,
            planet_id: cosmotrack::api::PlanetId::new(42),
        })
        .await;
    assert!(matches!(
        result,
        Err(RepositoryError::ValidationError { .. })
    ));
    assert!(repo
        .missions_for_scientist(stored.id)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_id_overwrite_moves_the_record() {
    let repo = LocalRepository::new();
    let stored = repo.create_scientist(&scientist("Mobile")).await.unwrap();

    let patch = ScientistPatch {
        id: Some(500),
        ..Default::default()
    };
    let updated = repo.update_scientist(stored.id, &patch).await.unwrap();
    assert_eq!(updated.id, ScientistId::new(500));

    assert!(matches!(
        repo.get_scientist(stored.id).await,
        Err(RepositoryError::NotFound { .. })
    ));
    assert!(repo.get_scientist(ScientistId::new(500)).await.is_ok());
}

#[tokio::test]
async fn test_id_overwrite_onto_existing_record_rejected() {
    let repo = LocalRepository::new();
    let first = repo.create_scientist(&scientist("First")).await.unwrap();
    let second = repo.create_scientist(&scientist("Second")).await.unwrap();

    let patch = ScientistPatch {
        id: Some(first.id.value()),
        ..Default::default()
    };
    let result = repo.update_scientist(second.id, &patch).await;
    assert!(matches!(
        result,
        Err(RepositoryError::ValidationError { .. })
    ));
}

#[tokio::test]
async fn test_duplicate_planet_name_rejected() {
    let repo = LocalRepository::new();
    repo.create_planet(&planet("Twin")).await.unwrap();
    let result = repo.create_planet(&planet("Twin")).await;
    assert!(matches!(
        result,
        Err(RepositoryError::ValidationError { .. })
    ));
    assert_eq!(repo.list_planets().await.unwrap().len(), 1);
}
