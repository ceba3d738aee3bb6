// FICHIER : src-core/tests/vitrine_suite/social.rs

use crate::common::TestEnv;
use serde_json::json;
use vitrine::utils::AppError;
use vitrine::views::{CommentsView, LikeState, LikeToggle};

/// Un item de bob, commenté une fois par bob.
fn seed_item(env: &TestEnv) -> (u64, u64) {
    let mut db = env.db();
    db.add_user("alice", "secret", false);
    let bob = db.add_user("bob", "pw", false);
    db.add_user("root", "pw", true);
    let c = db.add_collection("Vinyls", "bob", json!({ "artist": "string" }));
    let item = db.add_item(c, "Blue Train", "jazz", json!({ "artist": "Coltrane" }), "bob");
    let comment = db.add_comment(item, bob, "First pressing");
    (item, comment)
}

#[tokio::test]
async fn test_comment_requires_session() {
    let env = TestEnv::start().await;
    let (item, _) = seed_item(&env);

    let mut view = CommentsView::open(&env.ctx, item);
    view.settled().await;

    let err = view.post("hello").await.unwrap_err();
    assert!(matches!(err, AppError::AuthRequired(_)));
    assert_eq!(err.user_message(), "You must be logged in to send a comment");
    assert!(env.db().calls_to("POST", "/api/comments").is_empty());
}

#[tokio::test]
async fn test_posted_comment_appears_after_reload() {
    let env = TestEnv::start().await;
    let (item, _) = seed_item(&env);
    let alice = env.login("alice", "secret").await;

    let mut view = CommentsView::open(&env.ctx, item);
    assert_eq!(view.settled().await.data().map(Vec::len), Some(1));

    let posted = view.post("Great record").await.expect("commentaire publié");
    let comments = view.state().data().cloned().unwrap();
    assert_eq!(comments.len(), 2);
    let mine = comments.iter().find(|c| c.id == posted.id).unwrap();
    assert_eq!(mine.text, "Great record");
    assert_eq!(mine.author_id(), Some(alice.id));
    assert_eq!(mine.author.as_ref().map(|a| a.username.as_str()), Some("alice"));
}

#[tokio::test]
async fn test_only_author_or_admin_edits() {
    let env = TestEnv::start().await;
    let (item, comment) = seed_item(&env);

    env.login("alice", "secret").await;
    let mut view = CommentsView::open(&env.ctx, item);
    view.settled().await;
    assert!(view.edit(comment, "vandalised").await.is_err());
    assert!(view.delete(comment).await.is_err());
    assert!(env.db().calls_to("PUT", &format!("/api/comments/{}", comment)).is_empty());

    env.ctx.session.logout().await.unwrap();
    env.login("root", "pw").await;
    let mut view = CommentsView::open(&env.ctx, item);
    view.settled().await;
    view.edit(comment, "Moderated").await.expect("modération");
    assert_eq!(view.state().data().unwrap()[0].text, "Moderated");
    assert_eq!(env.db().attrs("comments", comment).unwrap()["text"], json!("Moderated"));

    view.delete(comment).await.expect("suppression");
    assert!(view.state().data().unwrap().is_empty());
}

#[tokio::test]
async fn test_like_requires_session() {
    let env = TestEnv::start().await;
    let (item, _) = seed_item(&env);

    let mut like = LikeToggle::new(&env.ctx, item);
    assert_eq!(like.refresh().await.unwrap(), LikeState::default());

    let err = like.toggle().await.unwrap_err();
    assert_eq!(err.user_message(), "You must be logged in to like item");
    let db = env.db();
    assert!(db.calls_to("GET", "/api/likes").is_empty());
    assert!(db.calls_to("POST", "/api/likes").is_empty());
}

#[tokio::test]
async fn test_like_toggles_on_and_off() {
    let env = TestEnv::start().await;
    let (item, _) = seed_item(&env);
    env.login("alice", "secret").await;

    let mut like = LikeToggle::new(&env.ctx, item);
    assert!(!like.refresh().await.unwrap().liked);

    let liked = like.toggle().await.expect("like");
    assert!(liked.liked);
    {
        let db = env.db();
        assert_eq!(db.count("likes"), 1);
        let stored = db.attrs("likes", liked.like_id.unwrap()).unwrap();
        assert_eq!(stored["user_liked_id"], json!("uuid-alice"));
        assert_eq!(stored["item"], json!(item));
    }

    // Un nouveau bouton retrouve le like existant
    let mut again = LikeToggle::new(&env.ctx, item);
    assert_eq!(again.refresh().await.unwrap(), liked);

    let unliked = again.toggle().await.expect("retrait");
    assert!(!unliked.liked);
    assert_eq!(env.db().count("likes"), 0);
}

#[tokio::test]
async fn test_fresh_toggle_reads_existing_like() {
    let env = TestEnv::start().await;
    let (item, _) = seed_item(&env);
    env.login("alice", "secret").await;

    let mut first = LikeToggle::new(&env.ctx, item);
    assert!(first.toggle().await.expect("like").liked);
    assert_eq!(env.db().count("likes"), 1);

    // Aucun refresh explicite : le bouton lit l'état avant de basculer
    let mut second = LikeToggle::new(&env.ctx, item);
    assert_eq!(second.state(), LikeState::default());
    let state = second.toggle().await.expect("retrait");
    assert!(!state.liked);
    assert_eq!(env.db().count("likes"), 0);
    assert_eq!(env.db().calls_to("POST", "/api/likes").len(), 1);
}
