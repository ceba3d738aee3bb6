// FICHIER : src-core/tests/vitrine_suite/collection_views.rs

use crate::common::TestEnv;
use serde_json::json;
use vitrine::table::SortDirection;
use vitrine::utils::AppError;
use vitrine::views::{CollectionView, CollectionsView, ItemView, ViewState};

/// Collection "Coins" d'alice avec trois items (le dernier sans année).
fn seed_coins(env: &TestEnv) -> (u64, Vec<u64>) {
    let mut db = env.db();
    db.add_user("alice", "secret", false);
    db.add_user("bob", "pw", false);
    let c = db.add_collection(
        "Coins",
        "alice",
        json!({ "year": "number", "notes": "text", "rare": "boolean" }),
    );
    let ids = vec![
        db.add_item(c, "Sestertius", "bronze", json!({ "year": 3, "rare": true }), "alice"),
        db.add_item(c, "Aureus", "gold", json!({ "year": 1 }), "alice"),
        db.add_item(c, "Follis", "", json!({ "notes": "worn" }), "alice"),
    ];
    (c, ids)
}

fn item_ids(state: &ViewState<vitrine::views::CollectionData>) -> Vec<u64> {
    state
        .data()
        .map(|d| d.items.iter().map(|i| i.id).collect())
        .unwrap_or_default()
}

#[tokio::test]
async fn test_collection_view_loads_and_sorts() {
    let env = TestEnv::start().await;
    let (c, ids) = seed_coins(&env);

    let mut view = CollectionView::open(&env.ctx, c);
    let state = view.settled().await;
    assert_eq!(item_ids(&state), ids);
    assert_eq!(state.data().unwrap().collection.item_count, 3);

    let sort_fields = view.sort_fields();
    assert!(sort_fields.contains(&"year".to_string()));
    assert!(sort_fields.contains(&"rare".to_string()));
    assert!(!sort_fields.contains(&"notes".to_string()), "les textes longs ne se trient pas");

    // Valeur absente en tête dans l'ordre croissant
    view.set_sort("year", SortDirection::Ascending);
    assert_eq!(item_ids(&view.state()), vec![ids[2], ids[1], ids[0]]);
    view.set_sort("year", SortDirection::Descending);
    assert_eq!(item_ids(&view.state()), vec![ids[0], ids[1], ids[2]]);

    view.set_sort("name", SortDirection::Ascending);
    let table = view.table().expect("table rendue");
    assert_eq!(table.headers.len(), 7 + 2);
    assert_eq!(table.headers[0], "ID");
    let names: Vec<&str> = table.rows.iter().map(|r| r[2].as_str()).collect();
    assert_eq!(names, vec!["Aureus", "Follis", "Sestertius"]);
}

#[tokio::test]
async fn test_owner_deletes_item_after_backend_success() {
    let env = TestEnv::start().await;
    let (c, ids) = seed_coins(&env);
    env.login("alice", "secret").await;

    let mut view = CollectionView::open(&env.ctx, c);
    view.settled().await;
    assert!(view.can_manage());

    view.select(Some(ids[1]));
    view.delete_selected().await.expect("suppression");

    assert_eq!(item_ids(&view.state()), vec![ids[0], ids[2]]);
    assert_eq!(view.selected(), None);
    assert_eq!(env.db().count("items"), 2);
}

#[tokio::test]
async fn test_failed_delete_leaves_list_untouched() {
    let env = TestEnv::start().await;
    let (c, ids) = seed_coins(&env);
    env.login("alice", "secret").await;
    env.db().fail(&format!("DELETE /api/items/{}", ids[0]));

    let mut view = CollectionView::open(&env.ctx, c);
    view.settled().await;
    view.select(Some(ids[0]));

    assert!(view.delete_item(ids[0]).await.is_err());
    assert_eq!(item_ids(&view.state()), ids);
    assert_eq!(view.selected(), Some(ids[0]));
    assert_eq!(view.last_error(), Some("Injected failure"));
}

#[tokio::test]
async fn test_stranger_cannot_delete() {
    let env = TestEnv::start().await;
    let (c, ids) = seed_coins(&env);
    env.login("bob", "pw").await;

    let mut view = CollectionView::open(&env.ctx, c);
    view.settled().await;
    assert!(!view.can_manage());

    let err = view.delete_item(ids[0]).await.unwrap_err();
    assert!(matches!(err, AppError::AuthRequired(ref msg) if msg == "Access denied"));
    assert!(env
        .db()
        .calls
        .iter()
        .all(|call| call.method != "DELETE"));
}

#[tokio::test]
async fn test_missing_collection_is_empty_state() {
    let env = TestEnv::start().await;
    let view = CollectionView::open(&env.ctx, 404);
    assert_eq!(view.settled().await, ViewState::Empty);
    assert!(view.table().is_none());
}

#[tokio::test]
async fn test_my_collections_are_filtered_by_owner() {
    let env = TestEnv::start().await;
    let (coins, _) = seed_coins(&env);
    {
        let mut db = env.db();
        db.add_collection("Stamps", "alice", json!({}));
        db.add_collection("Vinyls", "bob", json!({ "artist": "string" }));
    }

    assert!(matches!(
        CollectionsView::mine(&env.ctx),
        Err(AppError::AuthRequired(_))
    ));

    env.login("alice", "secret").await;
    let view = CollectionsView::mine(&env.ctx).expect("session ouverte");
    let state = view.settled().await;
    let names: Vec<String> = state.data().unwrap().iter().map(|c| c.name.clone()).collect();
    assert_eq!(names, vec!["Coins".to_string(), "Stamps".to_string()]);

    let table = view.table().unwrap();
    assert_eq!(table.headers.len(), 8);
    assert_eq!(table.rows[0][0], coins.to_string());
    assert_eq!(table.rows[0][5], "3");
    assert_eq!(table.rows[0][1], "-");
}

#[tokio::test]
async fn test_stranger_cannot_delete_foreign_collection() {
    let env = TestEnv::start().await;
    let (coins, _) = seed_coins(&env);
    env.login("bob", "pw").await;

    let mut view = CollectionsView::open(&env.ctx, None);
    view.settled().await;
    assert!(view.delete(coins).await.is_err());
    assert_eq!(view.last_error(), Some("Access denied"));
    assert_eq!(env.db().count("collections"), 1);
}

#[tokio::test]
async fn test_item_details_follow_schema() {
    let env = TestEnv::start().await;
    let (_, ids) = seed_coins(&env);

    let view = ItemView::open(&env.ctx, ids[0]);
    view.settled().await;
    let details = view.details();
    let lookup = |label: &str| {
        details
            .iter()
            .find(|d| d.label == label)
            .map(|d| d.value.clone())
    };

    assert_eq!(lookup("Name").as_deref(), Some("Sestertius"));
    assert_eq!(lookup("Collection").as_deref(), Some("Coins"));
    assert_eq!(lookup("Created by").as_deref(), Some("alice"));
    assert_eq!(lookup("year").as_deref(), Some("3"));
    assert_eq!(lookup("rare").as_deref(), Some("Yes"));
    assert_eq!(lookup("notes").as_deref(), Some(""));
}
