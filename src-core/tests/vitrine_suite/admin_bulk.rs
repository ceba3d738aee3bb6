// FICHIER : src-core/tests/vitrine_suite/admin_bulk.rs

use crate::common::TestEnv;
use serde_json::json;
use vitrine::views::{AdminView, BulkAction};

struct Accounts {
    root: u64,
    bob: u64,
    carol: u64,
}

async fn admin_session(env: &TestEnv) -> Accounts {
    let accounts = {
        let mut db = env.db();
        Accounts {
            root: db.add_user("root", "pw", true),
            bob: db.add_user("bob", "pw", false),
            carol: db.add_user("carol", "pw", false),
        }
    };
    env.login("root", "pw").await;
    accounts
}

#[tokio::test]
async fn test_block_selected_users() {
    let env = TestEnv::start().await;
    let a = admin_session(&env).await;

    let mut view = AdminView::open(&env.ctx);
    assert_eq!(view.settled().await.data().map(Vec::len), Some(3));

    view.select([a.bob, a.carol]);
    view.apply(BulkAction::Block).await.expect("blocage");

    {
        let db = env.db();
        assert_eq!(db.user(a.bob).unwrap()["blocked"], json!(true));
        assert_eq!(db.user(a.carol).unwrap()["blocked"], json!(true));
        assert_eq!(db.user(a.root).unwrap()["blocked"], json!(false));
    }

    // La liste a été rechargée après l'action
    let users = view.state().data().cloned().unwrap();
    assert!(users.iter().filter(|u| u.id != a.root).all(|u| u.blocked));
    assert_eq!(view.selected(), vec![a.bob, a.carol]);

    let table = view.table().unwrap();
    assert_eq!(table.headers.len(), 9);
    assert_eq!(table.rows.len(), 3);
}

#[tokio::test]
async fn test_partial_failure_is_aggregated() {
    let env = TestEnv::start().await;
    let a = admin_session(&env).await;
    env.db().fail(&format!("PUT /api/users/{}", a.carol));

    let mut view = AdminView::open(&env.ctx);
    view.settled().await;
    view.select([a.bob, a.carol]);

    let err = view.apply(BulkAction::Block).await.unwrap_err();
    assert_eq!(err.code(), Some("ERR_ADMIN_BULK_PARTIAL"));
    assert_eq!(err.user_message(), format!("#{}: Injected failure", a.carol));
    assert_eq!(view.last_error(), Some(err.user_message().as_str()));

    // Les succès ne sont pas annulés
    let db = env.db();
    assert_eq!(db.user(a.bob).unwrap()["blocked"], json!(true));
    assert_eq!(db.user(a.carol).unwrap()["blocked"], json!(false));
}

#[tokio::test]
async fn test_revoking_own_admin_updates_session() {
    let env = TestEnv::start().await;
    let a = admin_session(&env).await;
    assert!(env.ctx.session.is_admin());

    let mut view = AdminView::open(&env.ctx);
    view.settled().await;
    view.toggle(a.root);
    view.apply(BulkAction::RevokeAdmin).await.expect("rétrogradation");

    assert_eq!(env.db().user(a.root).unwrap()["role"]["type"], json!("authenticated"));
    assert_eq!(env.ctx.session.role().as_deref(), Some("authenticated"));
    assert!(!env.ctx.session.is_admin());
}

#[tokio::test]
async fn test_granting_admin_to_others_keeps_own_role() {
    let env = TestEnv::start().await;
    let a = admin_session(&env).await;

    let mut view = AdminView::open(&env.ctx);
    view.settled().await;
    view.toggle(a.bob);
    view.apply(BulkAction::GrantAdmin).await.expect("promotion");

    assert_eq!(env.db().user(a.bob).unwrap()["role"]["type"], json!("admin"));
    assert_eq!(env.ctx.session.role().as_deref(), Some("admin"));
}

#[tokio::test]
async fn test_delete_clears_selection() {
    let env = TestEnv::start().await;
    let a = admin_session(&env).await;

    let mut view = AdminView::open(&env.ctx);
    view.settled().await;
    view.toggle_all();
    assert_eq!(view.selected().len(), 3);
    view.toggle_all();
    assert!(view.selected().is_empty());

    view.toggle(a.carol);
    view.apply(BulkAction::Delete).await.expect("suppression");

    assert!(view.selected().is_empty());
    assert!(env.db().user(a.carol).is_none());
    let remaining: Vec<u64> = view.state().data().unwrap().iter().map(|u| u.id).collect();
    assert_eq!(remaining, vec![a.root, a.bob]);
}

#[tokio::test]
async fn test_empty_selection_sends_nothing() {
    let env = TestEnv::start().await;
    admin_session(&env).await;

    let mut view = AdminView::open(&env.ctx);
    view.settled().await;
    view.apply(BulkAction::Block).await.expect("rien à faire");
    assert!(env.db().calls.iter().all(|c| c.method != "PUT"));
}

#[tokio::test]
async fn test_session_write_failure_keeps_bulk_report() {
    let env = TestEnv::start().await;
    let a = admin_session(&env).await;
    env.db().fail(&format!("PUT /api/users/{}", a.carol));

    // Le jar devient un dossier : toute écriture de session échoue
    let jar = env.jar_path();
    let _ = std::fs::remove_file(&jar);
    std::fs::create_dir(&jar).expect("dossier à la place du jar");

    let mut view = AdminView::open(&env.ctx);
    view.settled().await;
    view.select([a.root, a.carol]);

    let err = view.apply(BulkAction::RevokeAdmin).await.unwrap_err();
    assert_eq!(err.code(), Some("ERR_ADMIN_BULK_PARTIAL"));
    let message = err.user_message();
    assert!(message.starts_with(&format!("#{}: Injected failure", a.carol)));
    assert!(message.contains("session:"));

    // Rechargement effectué malgré l'échec d'écriture
    assert_eq!(env.db().user(a.root).unwrap()["role"]["type"], json!("authenticated"));
    let root = view
        .state()
        .data()
        .and_then(|users| users.iter().find(|u| u.id == a.root).cloned())
        .unwrap();
    assert!(!root.is_admin());
    assert_eq!(env.ctx.session.role().as_deref(), Some("authenticated"));
}
