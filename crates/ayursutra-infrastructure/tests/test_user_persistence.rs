use ayursutra_core::auth::{CurrentUser, UserSessionRepository};
use ayursutra_core::config::PortalConfig;
use ayursutra_infrastructure::storage::{ConfigStorage, LocalStorage};
use ayursutra_infrastructure::{AyurPaths, LocalStorageUserRepository};
use serde_json::json;
use tempfile::TempDir;

#[tokio::test]
async fn test_user_survives_restart() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("local_storage.json");

    // First run: log in
    {
        let repo = LocalStorageUserRepository::with_default_key(LocalStorage::new(path.clone()));
        repo.save(&CurrentUser::new(json!({"id": 1, "username": "asha"})))
            .await
            .expect("Should persist user");
    }

    // Second run: restore
    let repo = LocalStorageUserRepository::with_default_key(LocalStorage::new(path));
    let restored = repo.load().await.expect("Should load user");
    assert_eq!(restored.and_then(|u| u.username().map(str::to_string)), Some("asha".to_string()));
}

#[tokio::test]
async fn test_clearing_user_keeps_other_keys() {
    let temp_dir = TempDir::new().unwrap();
    let storage = LocalStorage::new(temp_dir.path().join("local_storage.json"));
    storage.set_item("theme", "dark").unwrap();

    let repo = LocalStorageUserRepository::with_default_key(storage.clone());
    repo.save(&CurrentUser::new(json!({"id": 2}))).await.unwrap();
    repo.clear().await.unwrap();

    assert_eq!(storage.keys().unwrap(), vec!["theme".to_string()]);
}

#[tokio::test]
async fn test_configured_key_and_path_are_used() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    let store_path = temp_dir.path().join("store.json");
    std::fs::write(
        &config_path,
        format!(
            "[storage]\npath = {:?}\nuser_key = \"clinic.user\"\n",
            store_path.display().to_string()
        ),
    )
    .unwrap();

    let config: PortalConfig = ConfigStorage::new(config_path).load().unwrap();
    let resolved = AyurPaths::local_storage_for(&config.storage).unwrap();
    assert_eq!(resolved, store_path);

    let repo = LocalStorageUserRepository::new(LocalStorage::new(resolved), config.storage.user_key);
    repo.save(&CurrentUser::new(json!({"id": 3}))).await.unwrap();

    let raw = LocalStorage::new(store_path).get_item("clinic.user").unwrap();
    assert_eq!(raw.as_deref(), Some(r#"{"id":3}"#));
}
