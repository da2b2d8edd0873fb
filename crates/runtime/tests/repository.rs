//! Repository implementations and the service on top of them.

use std::fs;

use character_content::ContentFactory;
use character_core::{AttributeScores, CharacterBuildData, ChoiceKey};
use character_runtime::{
    CharacterKey, CharacterRecord, CharacterRepository, CharacterService,
    FileCharacterRepository, InMemoryCharacterRepository, RepositoryError,
};

fn service<R: CharacterRepository>(repository: R) -> CharacterService<R> {
    let factory = ContentFactory::bundled();
    CharacterService::new(
        factory.load_tables().unwrap(),
        factory.load_config().unwrap(),
        repository,
    )
}

fn build(name: &str) -> CharacterBuildData {
    CharacterBuildData::new(name, "barbarian", 1, AttributeScores::new(3, 1, 0, 0))
        .with_ancestry("human")
        .with_choice(ChoiceKey::new("human_attribute_increase", "attribute"), ["might"])
}

fn record<R: CharacterRepository>(service: &CharacterService<R>, owner: &str, name: &str) -> CharacterRecord {
    service.save(owner, None, build(name)).unwrap()
}

fn exercise_repository<R: CharacterRepository>(repository: R) {
    let service = service(repository);

    let ragna = record(&service, "alice", "Ragna the Red");
    record(&service, "alice", "Brom");
    record(&service, "bob", "Ragna the Red");

    assert_eq!(ragna.key, CharacterKey::new("alice", "ragna-the-red").unwrap());
    assert_eq!(ragna.stats.hp_max, 13);

    let loaded = service.load("alice", "ragna-the-red").unwrap().unwrap();
    assert_eq!(loaded, ragna);

    let ids: Vec<_> = service
        .list("alice")
        .unwrap()
        .into_iter()
        .map(|record| record.key.id)
        .collect();
    assert_eq!(ids, vec!["brom", "ragna-the-red"]);

    let found = service.find_by_name("bob", "RAGNA THE RED").unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].key.owner, "bob");

    assert!(service.delete("alice", "brom").unwrap());
    assert!(!service.delete("alice", "brom").unwrap());
    assert!(service.load("alice", "brom").unwrap().is_none());
    assert!(service.list("carol").unwrap().is_empty());
}

#[test]
fn in_memory_repository_contract() {
    exercise_repository(InMemoryCharacterRepository::new());
}

#[test]
fn file_repository_contract() {
    let dir = tempfile::tempdir().unwrap();
    exercise_repository(FileCharacterRepository::new(dir.path()).unwrap());
}

#[test]
fn file_repository_layout() {
    let dir = tempfile::tempdir().unwrap();
    let service = service(FileCharacterRepository::new(dir.path()).unwrap());
    record(&service, "alice", "Ragna");

    let path = dir.path().join("alice").join("ragna.json");
    assert!(path.exists());
    assert!(!dir.path().join("alice").join("ragna.json.tmp").exists());

    let json: serde_json::Value = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
    assert_eq!(json["stats"]["hp_max"], 13);
    assert_eq!(json["key"]["owner"], "alice");
}

#[test]
fn file_repository_rejects_misplaced_record() {
    let dir = tempfile::tempdir().unwrap();
    let repository = FileCharacterRepository::new(dir.path()).unwrap();
    let service = service(FileCharacterRepository::new(dir.path()).unwrap());
    record(&service, "alice", "Ragna");

    fs::copy(
        dir.path().join("alice").join("ragna.json"),
        dir.path().join("alice").join("impostor.json"),
    )
    .unwrap();

    let key = CharacterKey::new("alice", "impostor").unwrap();
    assert!(matches!(
        repository.load(&key),
        Err(RepositoryError::CorruptedData(_))
    ));
}

#[test]
fn invalid_keys_are_refused() {
    let service = service(InMemoryCharacterRepository::new());

    let err = service.save("alice", None, build("???")).unwrap_err();
    assert!(err.to_string().contains("character id"));
    assert!(service.load("../alice", "ragna").is_err());
}

#[test]
fn invalid_builds_are_saved_with_their_report() {
    let service = service(InMemoryCharacterRepository::new());

    // The attribute choice is left open
    let unfinished = CharacterBuildData::new("Wip", "barbarian", 1, AttributeScores::default())
        .with_ancestry("human");
    let record = service.save("alice", Some("wip"), unfinished).unwrap();

    assert!(!record.report.valid);
    assert!(service.load("alice", "wip").unwrap().is_some());
}

#[test]
fn refresh_reports_unchanged_digest() {
    let service = service(InMemoryCharacterRepository::new());
    let saved = record(&service, "alice", "Ragna");

    let (refreshed, changed) = service.refresh("alice", "ragna").unwrap().unwrap();
    assert!(!changed);
    assert_eq!(refreshed.digest, saved.digest);
    assert!(service.refresh("alice", "nobody").unwrap().is_none());
}

#[test]
fn refresh_detects_content_drift() {
    let repository = InMemoryCharacterRepository::new();
    let mut stale = record(&service(InMemoryCharacterRepository::new()), "alice", "Ragna");
    stale.digest = "0".repeat(64);
    repository.save(&stale).unwrap();

    let service = service(repository);
    let (refreshed, changed) = service.refresh("alice", "ragna").unwrap().unwrap();

    assert!(changed);
    assert_ne!(refreshed.digest, stale.digest);
    assert_eq!(
        service.load("alice", "ragna").unwrap().unwrap().digest,
        refreshed.digest
    );
}
