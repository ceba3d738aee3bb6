// FICHIER : src-core/tests/vitrine_suite/editor_flow.rs

use crate::common::TestEnv;
use serde_json::json;
use vitrine::backend::{CollectionStore, ImageUpload, ItemStore, TagStore};
use vitrine::editor::{FieldPatch, RecordEditor, SchemaEditor};
use vitrine::models::Category;
use vitrine::schema::{FieldType, InputValue};

#[tokio::test]
async fn test_schema_editor_creates_collection() {
    let env = TestEnv::start().await;
    env.db().add_user("alice", "secret", false);
    let user = env.login("alice", "secret").await;

    let mut editor = SchemaEditor::new();
    editor.draft.name = "Coins".into();
    editor.draft.category = Category::Coins;
    editor.draft.image = Some(ImageUpload {
        file_name: "coins.png".into(),
        mime: "image/png".into(),
        bytes: vec![0x89, 0x50, 0x4e, 0x47],
    });
    let year = editor.add_field();
    editor.change_field(year, FieldPatch::name("year")).unwrap();
    editor
        .change_field(year, FieldPatch::field_type(FieldType::Number))
        .unwrap();
    let minted = editor.add_field();
    editor.change_field(minted, FieldPatch::name("minted")).unwrap();
    editor
        .change_field(minted, FieldPatch::field_type(FieldType::Date))
        .unwrap();

    let saved = editor
        .submit(&*env.ctx.backend, &user)
        .await
        .expect("enregistrement de la collection");

    assert_eq!(saved.name, "Coins");
    let names: Vec<&str> = saved.schema.names().collect();
    assert_eq!(names, vec!["year", "minted"]);
    assert_eq!(saved.owner.user_id.as_deref(), Some("uuid-alice"));
    let image = saved.image.expect("image téléversée");
    assert_eq!(image.url, format!("{}/uploads/coins.png", env.server.base_url));

    let stored = env.db().attrs("collections", saved.id).expect("collection stockée");
    assert_eq!(stored["fields"], json!({ "year": "number", "minted": "date" }));
    assert_eq!(stored["user_name"], json!("alice"));
}

#[tokio::test]
async fn test_schema_editor_failure_keeps_draft() {
    let env = TestEnv::start().await;
    env.db().add_user("alice", "secret", false);
    let user = env.login("alice", "secret").await;
    env.db().fail("POST /api/collections");

    let mut editor = SchemaEditor::new();
    editor.draft.name = "Stamps".into();
    editor.add_field();

    assert!(editor.submit(&*env.ctx.backend, &user).await.is_err());
    assert_eq!(editor.last_error(), Some("Injected failure"));
    assert_eq!(editor.draft.name, "Stamps");
    assert_eq!(editor.fields().len(), 1);
    assert_eq!(env.db().count("collections"), 0);
}

#[tokio::test]
async fn test_record_editor_creates_only_unknown_tags() {
    let env = TestEnv::start().await;
    let collection_id = {
        let mut db = env.db();
        db.add_user("alice", "secret", false);
        db.add_tag("gold");
        db.add_collection("Coins", "alice", json!({ "year": "number", "rare": "boolean" }))
    };
    let user = env.login("alice", "secret").await;

    let collection = env.ctx.backend.get_collection(collection_id).await.unwrap();
    let vocabulary = env.ctx.backend.list_tags().await.unwrap();
    let mut editor =
        RecordEditor::new(&collection).with_vocabulary(vocabulary.into_iter().map(|t| t.label));

    editor.name = "Aureus".into();
    editor.set_tags("gold rome,, gold");
    editor.input("year", InputValue::text("27")).unwrap();
    editor.input("rare", InputValue::Choice(true)).unwrap();
    assert!(editor.input("weight", InputValue::text("8")).is_err());

    let saved = editor
        .submit(&*env.ctx.backend, &user)
        .await
        .expect("enregistrement de l'item");

    assert_eq!(saved.created_tags, vec!["rome".to_string()]);
    assert_eq!(saved.item.tags, "gold, rome");
    assert_eq!(saved.item.collection.as_ref().map(|c| c.id), Some(collection_id));

    let db = env.db();
    assert_eq!(db.calls_to("POST", "/api/tags").len(), 1);
    assert_eq!(db.tag_labels(), vec!["gold".to_string(), "rome".to_string()]);
    let stored = db.attrs("items", saved.item.id).unwrap();
    assert_eq!(stored["additionalFields"], json!({ "year": 27, "rare": true }));
    assert_eq!(stored["user_id"], json!("uuid-alice"));
}

#[tokio::test]
async fn test_record_editor_reports_orphan_tags() {
    let env = TestEnv::start().await;
    let collection_id = {
        let mut db = env.db();
        db.add_user("alice", "secret", false);
        db.add_collection("Coins", "alice", json!({ "year": "number" }))
    };
    let user = env.login("alice", "secret").await;
    env.db().fail("POST /api/items");

    let collection = env.ctx.backend.get_collection(collection_id).await.unwrap();
    let mut editor = RecordEditor::new(&collection);
    editor.name = "Denarius".into();
    editor.set_tags("silver");

    assert!(editor.submit(&*env.ctx.backend, &user).await.is_err());
    assert_eq!(editor.orphan_tags(), ["silver".to_string()]);
    assert_eq!(editor.last_error(), Some("Injected failure"));
    assert!(editor.vocabulary().contains(&"silver".to_string()));
    assert_eq!(env.db().tag_labels(), vec!["silver".to_string()]);

    // Nouvelle tentative : le tag existe déjà, aucun doublon n'est créé
    env.db().failures.clear();
    let saved = editor.submit(&*env.ctx.backend, &user).await.expect("seconde tentative");
    assert!(saved.created_tags.is_empty());
    assert!(editor.orphan_tags().is_empty());
    assert_eq!(env.db().calls_to("POST", "/api/tags").len(), 1);
}

#[tokio::test]
async fn test_record_editor_updates_existing_item() {
    let env = TestEnv::start().await;
    let (collection_id, item_id) = {
        let mut db = env.db();
        db.add_user("alice", "secret", false);
        let c = db.add_collection("Coins", "alice", json!({ "year": "number" }));
        let i = db.add_item(c, "As", "bronze", json!({ "year": 10 }), "alice");
        (c, i)
    };
    let user = env.login("alice", "secret").await;

    let collection = env.ctx.backend.get_collection(collection_id).await.unwrap();
    let item = env.ctx.backend.get_item(item_id).await.unwrap();
    let mut editor = RecordEditor::for_item(&collection, &item).with_vocabulary(["bronze"]);
    assert!(!editor.is_new());
    assert_eq!(editor.render_field("year").unwrap().value, InputValue::text("10"));

    editor.input("year", InputValue::text("")).unwrap();
    editor.submit(&*env.ctx.backend, &user).await.expect("mise à jour");

    let db = env.db();
    assert_eq!(db.calls_to("PUT", &format!("/api/items/{}", item_id)).len(), 1);
    assert_eq!(db.attrs("items", item_id).unwrap()["additionalFields"], json!({}));
}
