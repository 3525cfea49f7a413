use hotel_popularity::app::display::render_report;
use hotel_popularity::core::classifier::evaluate_holdout;
use hotel_popularity::core::export::{export_report, REPORT_ARCHIVE};
use hotel_popularity::core::session::EntryForm;
use hotel_popularity::core::ConfigProvider;
use hotel_popularity::domain::settings::MissingMedianPolicy;
use hotel_popularity::{
    Category, ListingEngine, ListingPipeline, LoadError, LocalStorage, SessionState, TomlConfig,
};
use std::io::Read;
use tempfile::TempDir;

const DATASET: &str = "Title,Distance,Review_Score\n\
                       Hotel A,1.2km from centre,9.0\n\
                       Hotel B,800m,7.5\n\
                       Hotel C,,8.6\n";

fn write_dataset(dir: &TempDir, content: &str) {
    std::fs::write(dir.path().join("hotels.csv"), content).unwrap();
}

fn config_for(dataset: &str) -> TomlConfig {
    let mut config = TomlConfig::default();
    config.dataset.path = dataset.to_string();
    config
}

fn read_entry(path: &std::path::Path, name: &str) -> String {
    let data = std::fs::read(path).unwrap();
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(data)).unwrap();
    let mut file = archive.by_name(name).unwrap();
    let mut content = String::new();
    file.read_to_string(&mut content).unwrap();
    content
}

#[tokio::test]
async fn test_end_to_end_load_from_disk() {
    let temp_dir = TempDir::new().unwrap();
    write_dataset(&temp_dir, DATASET);

    let storage = LocalStorage::new(temp_dir.path());
    let pipeline = ListingPipeline::new(storage, config_for("hotels.csv"));
    let engine = ListingEngine::new(pipeline);

    let outcome = engine.run().await.unwrap();

    let titles: Vec<&str> = outcome
        .report
        .superb
        .iter()
        .map(|l| l.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Hotel A", "Hotel C"]);
    assert_eq!(outcome.report.good.len(), 1);
    assert_eq!(outcome.report.good[0].distance, Some(0.8));
    assert_eq!(outcome.catalog.listings[2].distance, Some(1.0));

    let text = render_report(&outcome.report);
    assert!(text.contains("2 Hotels in category Superb"));
    assert!(text.contains("1 Hotels in category Good"));
}

#[tokio::test]
async fn test_missing_dataset_reports_not_found() {
    let temp_dir = TempDir::new().unwrap();

    let storage = LocalStorage::new(temp_dir.path());
    let pipeline = ListingPipeline::new(storage, config_for("hotels.csv"));
    let engine = ListingEngine::new(pipeline);

    let err = engine.run().await.unwrap_err();
    assert_eq!(
        err.load_error(),
        LoadError::NotFound {
            path: "hotels.csv".to_string()
        }
    );
}

#[tokio::test]
async fn test_empty_dataset_reports_empty() {
    let temp_dir = TempDir::new().unwrap();
    write_dataset(&temp_dir, "");

    let storage = LocalStorage::new(temp_dir.path());
    let pipeline = ListingPipeline::new(storage, config_for("hotels.csv"));
    let engine = ListingEngine::new(pipeline);

    let err = engine.run().await.unwrap_err();
    assert_eq!(err.load_error(), LoadError::Empty);
}

#[tokio::test]
async fn test_unparseable_distances_with_zero_fill() {
    let temp_dir = TempDir::new().unwrap();
    write_dataset(
        &temp_dir,
        "Title,Distance,Review_Score\nHotel A,nearby,9.0\nHotel B,,7.0\n",
    );

    let mut config = config_for("hotels.csv");
    config.distance.on_empty_column = MissingMedianPolicy::Zero;

    let storage = LocalStorage::new(temp_dir.path());
    let engine = ListingEngine::new(ListingPipeline::new(storage, config));

    let outcome = engine.run().await.unwrap();
    assert!(outcome
        .catalog
        .listings
        .iter()
        .all(|l| l.distance == Some(0.0)));
}

#[tokio::test]
async fn test_export_includes_session_entries() {
    let temp_dir = TempDir::new().unwrap();
    write_dataset(&temp_dir, DATASET);

    let mut config = config_for("hotels.csv");
    config.export.enabled = true;
    config.export.output_path = Some("out".to_string());

    let storage = LocalStorage::new(temp_dir.path());
    let engine = ListingEngine::new(ListingPipeline::new(storage, config));
    let outcome = engine.run().await.unwrap();

    let archive_path = temp_dir.path().join("out").join(REPORT_ARCHIVE);
    assert!(archive_path.exists());
    assert_eq!(read_entry(&archive_path, "catalog.csv").lines().count(), 4);

    let rules = engine.pipeline().config().entry_rules();
    let mut session = SessionState::new();
    session
        .submit(EntryForm::new("Sea View", 0.5, 9.4), &rules)
        .unwrap();
    assert!(session
        .submit(EntryForm::new("   ", 0.5, 9.4), &rules)
        .is_err());
    assert_eq!(session.len(), 1);

    let combined = session.combined_with(&outcome.catalog.listings);
    export_report(
        engine.pipeline().storage(),
        "out",
        &outcome.report,
        &combined,
    )
    .await
    .unwrap();

    let catalog = read_entry(&archive_path, "catalog.csv");
    assert_eq!(catalog.lines().count(), 5);
    assert!(catalog.contains("Sea View"));

    let superb = read_entry(&archive_path, "superb.csv");
    assert!(superb.starts_with("Title,Distance,Review_Score,Category"));
    assert!(!superb.contains("Sea View"));
}

#[tokio::test]
async fn test_classifier_on_bundled_dataset() {
    let storage = LocalStorage::new(env!("CARGO_MANIFEST_DIR"));
    let pipeline = ListingPipeline::new(storage, TomlConfig::default());
    let engine = ListingEngine::new(pipeline);

    let outcome = engine.run().await.unwrap();
    assert!(!outcome.report.superb.is_empty());
    assert!(outcome.report.superb.len() <= 10);
    assert!(outcome
        .report
        .superb
        .iter()
        .all(|l| l.category == Category::Superb));

    let mut config = TomlConfig::default();
    config.classifier.enabled = true;
    config.classifier.trees = 15;
    let settings = config.classifier().unwrap();

    let holdout = evaluate_holdout(&outcome.catalog.listings, &settings).unwrap();
    assert!(holdout.test_size > 0);
    let complete = outcome
        .catalog
        .listings
        .iter()
        .filter(|l| l.distance.is_some() && l.review_score.is_some())
        .count();
    assert!(complete < outcome.catalog.listings.len());
    assert_eq!(holdout.train_size + holdout.test_size, complete);
    assert!((0.0..=1.0).contains(&holdout.accuracy));
}
