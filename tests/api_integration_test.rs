// ==========================================
// API 端到端测试
// ==========================================
// 测试目标: 导入 → 驾驶舱统计 → 收藏汇总 → 导出
// ==========================================

mod test_helpers;

use art_advisory::api::{ExportFormat, ExportQuery};
use art_advisory::export::format_money;
use chrono::NaiveDate;

#[tokio::test]
async fn test_import_then_dashboard_then_export() {
    let (_db, state) = test_helpers::create_test_state().unwrap();

    let sheet = test_helpers::write_xlsx(
        &["Client Email", "Artist", "Title", "Price", "Insurance Value"],
        &[
            &["ann@example.com", "Ann", "One", "1000", "1200"],
            &["ann@example.com", "Ann", "Two", "", "300"],
            &["ben@example.com", "Ben", "Three", "250.5", ""],
            &["", "Nobody", "Loose", "10", ""],
        ],
    )
    .unwrap();
    let response = state
        .import_api
        .import_artworks(Some(sheet.path()), None)
        .await
        .unwrap();
    assert_eq!(response.outcome.created, 4);

    let stats = state.dashboard_api.get_stats().await.unwrap();
    assert_eq!(stats.total_artworks, 4);
    assert_eq!(stats.collections, 2);
    assert_eq!(stats.active_clients, 2);

    let collections = state.dashboard_api.list_collections().await.unwrap();
    assert_eq!(collections.len(), 2);
    assert_eq!(collections[0].client_name, "ann");
    assert_eq!(collections[0].artwork_count, 2);
    assert_eq!(format_money(collections[0].total_appraisal_value), "$1,000");
    assert_eq!(format_money(collections[0].total_insurance_value), "$1,500");
    assert_eq!(format_money(collections[1].total_appraisal_value), "$250.5");

    let today = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
    let archive = state
        .export_api
        .export(ExportFormat::Zip, &ExportQuery::default(), today)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(archive.file_name, "FactSheets_2024-12-31.zip");

    let (_dir, out) = test_helpers::output_dir().unwrap();
    let path = archive.write_to_dir(&out).unwrap();
    assert!(path.ends_with("FactSheets_2024-12-31.zip"));
    assert!(std::fs::metadata(path).unwrap().len() > 0);
}

#[tokio::test]
async fn test_empty_database_dashboard() {
    let (_db, state) = test_helpers::create_test_state().unwrap();

    let stats = state.dashboard_api.get_stats().await.unwrap();
    assert_eq!(stats.total_artworks, 0);
    assert_eq!(stats.collections, 0);
    assert!(state.dashboard_api.list_collections().await.unwrap().is_empty());
}
