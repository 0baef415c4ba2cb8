//! Tour catalogue behavior, exercised against both storage backends.

use std::path::PathBuf;
use std::sync::Arc;

use explorecali::{
    Difficulty, DuckdbTourPackageRepository, DuckdbTourRepository, ImportToursUseCase,
    InMemoryTourPackageRepository, InMemoryTourRepository, NewTour, Region, TourPackageService,
    TourService,
};
use tempfile::TempDir;

struct Catalogue {
    packages: TourPackageService,
    tours: Arc<TourService>,
    import: ImportToursUseCase,
    _dir: Option<TempDir>,
}

fn in_memory_catalogue() -> Catalogue {
    let tour_repo = Arc::new(InMemoryTourRepository::new());
    let package_repo = Arc::new(InMemoryTourPackageRepository::new());
    let tours = Arc::new(TourService::new(tour_repo, package_repo.clone()));

    Catalogue {
        packages: TourPackageService::new(package_repo.clone()),
        import: ImportToursUseCase::new(tours.clone(), package_repo),
        tours,
        _dir: None,
    }
}

async fn duckdb_catalogue() -> Catalogue {
    let dir = tempfile::tempdir().expect("tempdir");
    let db_path = dir.path().join("explorecali.duckdb");

    let tour_repo = Arc::new(DuckdbTourRepository::new(&db_path).expect("duckdb init"));
    let package_repo = Arc::new(
        DuckdbTourPackageRepository::with_connection(tour_repo.shared_connection())
            .await
            .expect("packages init"),
    );
    let tours = Arc::new(TourService::new(tour_repo, package_repo.clone()));

    Catalogue {
        packages: TourPackageService::new(package_repo.clone()),
        import: ImportToursUseCase::new(tours.clone(), package_repo),
        tours,
        _dir: Some(dir),
    }
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

async fn check_create_tour_package_is_idempotent_by_code(c: Catalogue) {

    let first = c
        .packages
        .create_tour_package("BC", "Backpack Cal")
        .await
        .unwrap();
    let again = c
        .packages
        .create_tour_package("BC", "Something Else")
        .await
        .unwrap();

    assert_eq!(first, again);
    assert_eq!(c.packages.total().await.unwrap(), 1);
}

async fn check_create_tour_requires_existing_package(c: Catalogue) {

    let err = c
        .tours
        .create_tour(NewTour {
            title: "Orphan".to_string(),
            description: String::new(),
            blurb: String::new(),
            price: 10,
            duration: "1 day".to_string(),
            bullets: String::new(),
            keywords: String::new(),
            tour_package_code: "XX".to_string(),
            difficulty: Difficulty::Easy,
            region: Region::VariesRegion,
        })
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(c.tours.total().await.unwrap(), 0);
}

async fn check_import_creates_tours_from_seed_file(c: Catalogue) {
    c.packages
        .create_tour_package("BC", "Backpack Cal")
        .await
        .unwrap();
    c.packages
        .create_tour_package("CC", "California Calm")
        .await
        .unwrap();

    let imported = c.import.execute(&fixture("tours.json")).await.unwrap();

    assert_eq!(imported.len(), 2);
    assert_eq!(imported[0].title(), "Big Sur Retreat");
    assert_eq!(imported[0].price(), 750);
    assert_eq!(imported[0].tour_package_code(), "BC");
    assert_eq!(imported[0].region(), Region::CentralCoast);
    assert_eq!(imported[1].difficulty(), Difficulty::Difficult);
    assert_eq!(imported[1].region(), Region::NorthernCalifornia);

    let calm = c.tours.lookup_by_package("CC").await.unwrap();
    assert_eq!(calm.len(), 1);
    assert_eq!(c.tours.lookup_by_id(calm[0].id()).await.unwrap(), calm[0]);
    assert!(c.tours.lookup_by_package("XX").await.unwrap().is_empty());

    let all = c.tours.lookup_all().await.unwrap();
    assert_eq!(all, imported);
    assert_eq!(c.tours.total().await.unwrap(), 2);

    let codes: Vec<_> = c
        .packages
        .lookup_all()
        .await
        .unwrap()
        .iter()
        .map(|p| p.code().to_string())
        .collect();
    assert_eq!(codes, vec!["BC", "CC"]);
}

async fn check_import_fails_for_unknown_package(c: Catalogue) {

    let err = c.import.execute(&fixture("tours.json")).await.unwrap_err();

    assert!(err.is_not_found(), "unexpected error: {}", err);
}

async fn check_import_rejects_malformed_records(c: Catalogue) {
    c.packages
        .create_tour_package("BC", "Backpack Cal")
        .await
        .unwrap();

    let bad_region = r#"[{"packageType": "Backpack Cal", "title": "T", "price": 1,
        "difficulty": "Easy", "region": "Atlantis"}]"#;
    assert!(matches!(
        c.import.import_json(bad_region).await,
        Err(explorecali::DomainError::InvalidInput(_))
    ));

    assert!(matches!(
        c.import.import_json("not json").await,
        Err(explorecali::DomainError::InvalidInput(_))
    ));
}

async fn check_reused_package_name_is_duplicate_key(c: Catalogue) {
    c.packages
        .create_tour_package("BC", "Backpack Cal")
        .await
        .unwrap();

    let err = c
        .packages
        .create_tour_package("XX", "Backpack Cal")
        .await
        .unwrap_err();

    assert!(err.is_duplicate_key(), "unexpected error: {}", err);
    assert_eq!(c.packages.total().await.unwrap(), 1);
}

macro_rules! backend_tests {
    ($($name:ident => $check:ident),* $(,)?) => {
        mod in_memory_store {
            use super::*;
            $(
                #[tokio::test]
                async fn $name() {
                    $check(in_memory_catalogue()).await;
                }
            )*
        }

        mod duckdb_store {
            use super::*;
            $(
                #[tokio::test]
                async fn $name() {
                    $check(duckdb_catalogue().await).await;
                }
            )*
        }
    };
}

backend_tests! {
    create_tour_package_is_idempotent_by_code => check_create_tour_package_is_idempotent_by_code,
    reused_package_name_is_duplicate_key => check_reused_package_name_is_duplicate_key,
    create_tour_requires_existing_package => check_create_tour_requires_existing_package,
    import_creates_tours_from_seed_file => check_import_creates_tours_from_seed_file,
    import_fails_for_unknown_package => check_import_fails_for_unknown_package,
    import_rejects_malformed_records => check_import_rejects_malformed_records,
}
