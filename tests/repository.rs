use chrono::Utc;
use category_media::domain::category::{CategoryUpdate, NewCategory};
use category_media::domain::types::{AssetName, CategoryDescription, CategoryId, CategoryName};
use category_media::repository::{CategoryReader, CategoryWriter, DieselRepository};

mod common;

fn new_category(name: &str, image: Option<&str>) -> NewCategory {
    let now = Utc::now().naive_utc();
    NewCategory {
        name: CategoryName::new(name).expect("valid category name"),
        description: CategoryDescription::new("Fresh produce").expect("valid description"),
        image: image.map(|value| AssetName::new(value).expect("valid asset name")),
        created_at: now,
        updated_at: now,
    }
}

#[test]
fn test_category_repository_crud() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let created = repo
        .create_category(&new_category("Fruits", Some("abc.jpg")))
        .expect("should create category");
    assert_eq!(created.name, "Fruits");
    assert_eq!(created.image.as_ref().unwrap(), &"abc.jpg");

    let fetched = repo
        .get_category_by_id(created.id)
        .expect("should query category")
        .expect("category should exist");
    assert_eq!(fetched, created);

    let update = CategoryUpdate {
        name: CategoryName::new("Vegetables").unwrap(),
        description: CategoryDescription::new("Green things").unwrap(),
        image: Some(AssetName::new("def.png").unwrap()),
        updated_at: Utc::now().naive_utc(),
    };
    let updated = repo
        .update_category(created.id, &update)
        .expect("should update category")
        .expect("category should still exist");
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "Vegetables");
    assert_eq!(updated.image.as_ref().unwrap(), &"def.png");
    assert_eq!(updated.created_at, created.created_at);

    assert_eq!(repo.delete_category(created.id).expect("should delete"), 1);
    assert!(repo.get_category_by_id(created.id).unwrap().is_none());
}

#[test]
fn list_categories_is_ordered_by_id() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    for name in ["Fruits", "Bread", "Cheese"] {
        repo.create_category(&new_category(name, None)).unwrap();
    }

    let names = repo
        .list_categories()
        .expect("should list categories")
        .into_iter()
        .map(|c| c.name.into_inner())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["Fruits", "Bread", "Cheese"]);
}

#[test]
fn missing_rows_are_reported_without_errors() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let id = CategoryId::new(42).unwrap();

    assert!(repo.get_category_by_id(id).unwrap().is_none());
    assert_eq!(repo.delete_category(id).unwrap(), 0);

    let update = CategoryUpdate {
        name: CategoryName::new("Ghost").unwrap(),
        description: CategoryDescription::new("Nothing here").unwrap(),
        image: None,
        updated_at: Utc::now().naive_utc(),
    };
    assert!(repo.update_category(id, &update).unwrap().is_none());
}

#[test]
fn categories_without_image_round_trip_as_none() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let created = repo.create_category(&new_category("Fruits", None)).unwrap();
    assert!(created.image.is_none());
    assert!(created.assets().is_none());
}
