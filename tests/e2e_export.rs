//! End-to-end test for the renderer hand-off: run the pipeline, then write
//! every export artifact and read it back.

use atlas_rs::export::{publisher_activity, write_flow_geojson, write_records_geojson, write_stats_report};
use atlas_rs::{Atlas, BookRecord, Gazetteer, LibraryGazetteer};

#[test]
fn test_full_run_then_export() {
    let atlas = Atlas::builtin();

    let records = vec![
        BookRecord::new("古蘭經譯解")
            .with_publisher("清真書報社")
            .with_city("北平")
            .with_era_date("民國20年")
            .with_library("東洋文庫"),
        BookRecord::new("西行朝覲記")
            .with_publisher("中華書局")
            .with_city("上海")
            .with_western_year("1936")
            .with_library("天理大學圖書館"),
        BookRecord::new("Miscellaneous Notes"),
    ];

    let output = atlas.run(records).unwrap();

    // Record features: only the two geocoded records.
    let mut geojson = Vec::new();
    write_records_geojson(&output.records, &mut geojson).unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&geojson).unwrap();
    assert_eq!(parsed["type"], "FeatureCollection");
    assert_eq!(parsed["features"].as_array().unwrap().len(), 2);

    // Flow lines: both flows locate, so both render.
    let mut flows = Vec::new();
    write_flow_geojson(
        &output.flow,
        &Gazetteer::builtin(),
        &LibraryGazetteer::builtin(),
        &mut flows,
    )
    .unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&flows).unwrap();
    assert_eq!(parsed["features"].as_array().unwrap().len(), 2);

    // Stats report carries both networks.
    let mut report = Vec::new();
    write_stats_report(&output.flow_stats, &output.colocation_stats, &mut report).unwrap();
    let text = String::from_utf8(report).unwrap();
    assert!(text.contains("City-to-Library Network"));
    assert!(text.contains("Nodes: 4"));

    // Publisher summary covers both publishers.
    let activity = publisher_activity(&output.records);
    assert_eq!(activity.len(), 2);
    assert_eq!(activity[0].books + activity[1].books, 2);
}
