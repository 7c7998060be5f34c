// ==========================================
// Repository 层集成测试
// ==========================================
// 测试目标: 文件库上的客户/艺术品/配置持久化（重新打开后仍可读取）
// ==========================================

mod test_helpers;

use art_advisory::app::AppState;
use art_advisory::config::config_keys;
use art_advisory::domain::{ArtworkRecord, ClientType, NewClient};
use art_advisory::repository::RepositoryError;

#[tokio::test]
async fn test_records_survive_reopen() {
    let (db, state) = test_helpers::create_test_state().unwrap();

    let client = state
        .client_repo
        .insert(NewClient {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            client_type: ClientType::Institution,
            ..Default::default()
        })
        .await
        .unwrap();
    let saved = state
        .artwork_repo
        .insert(ArtworkRecord {
            client_id: Some(client.id.clone()),
            artist: "A".to_string(),
            title: "T".to_string(),
            condition: "Good".to_string(),
            insurance_value: Some(0.0),
            ..Default::default()
        })
        .await
        .unwrap();
    state.config.set_value(config_keys::APP_LOCALE, "zh-CN").unwrap();
    drop(state);

    let reopened = AppState::new(db.path().to_string_lossy().to_string()).unwrap();
    let found = reopened
        .artwork_repo
        .find_by_id(saved.id.as_deref().unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.client_id.as_deref(), Some(client.id.as_str()));
    assert_eq!(found.insurance_value, Some(0.0));

    let client = reopened.client_repo.find_by_id(&client.id).await.unwrap().unwrap();
    assert_eq!(client.client_type, ClientType::Institution);
    assert_eq!(reopened.config.locale().unwrap(), "zh-CN");
}

#[tokio::test]
async fn test_upsert_by_email_shared_across_repos() {
    let (_db, state) = test_helpers::create_test_state().unwrap();

    let id = state
        .client_repo
        .upsert_by_email("kim@example.com", &ClientType::Collector)
        .await
        .unwrap();
    let again = state
        .client_repo
        .upsert_by_email("kim@example.com", &ClientType::Dealer)
        .await
        .unwrap();
    assert_eq!(id, again);

    let artwork = state
        .artwork_repo
        .insert(ArtworkRecord {
            client_id: Some(id.clone()),
            artist: "A".to_string(),
            title: "T".to_string(),
            condition: "Excellent".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(artwork.id.is_some());
    assert_eq!(state.artwork_repo.list_by_client(&id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_invalid_numeric_config_rejected() {
    let (_db, state) = test_helpers::create_test_state().unwrap();

    let result = state.config.set_value(config_keys::FACT_SHEET_MARGIN, "-3");
    assert!(matches!(result, Err(RepositoryError::FieldValueError { .. })));

    state.config.set_value(config_keys::FACT_SHEET_MARGIN, "36").unwrap();
    let layout = state.config.load_fact_sheet_layout().unwrap();
    assert_eq!(layout.margin, 36.0);
}
