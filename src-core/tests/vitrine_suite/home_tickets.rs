// FICHIER : src-core/tests/vitrine_suite/home_tickets.rs

use crate::common::TestEnv;
use serde_json::json;
use vitrine::tickets::{Priority, TicketDraft};
use vitrine::utils::AppError;
use vitrine::views::{HomeView, ViewState};

#[tokio::test]
async fn test_home_sections_load_independently() {
    let env = TestEnv::start().await;
    let (coins, stamps) = {
        let mut db = env.db();
        db.add_user("alice", "secret", false);
        let coins = db.add_collection("Coins", "alice", json!({}));
        let stamps = db.add_collection("Stamps", "alice", json!({}));
        db.add_item(coins, "Aureus", "gold, rome", json!({}), "alice");
        db.add_item(coins, "Denarius", "silver rome", json!({}), "alice");
        db.add_item(stamps, "Penny Black", "uk", json!({}), "alice");
        (coins, stamps)
    };

    let home = HomeView::open(&env.ctx);
    home.settled().await;
    let (tags, latest, largest) = home.snapshot();

    let labels: Vec<String> = tags.data().unwrap().iter().map(|t| t.tag.clone()).collect();
    assert_eq!(labels, vec!["gold", "rome", "silver", "uk"]);

    // Les plus récents d'abord
    let latest = latest.data().cloned().unwrap();
    assert_eq!(latest[0].name, "Penny Black");
    assert_eq!(latest[0].collection, "Stamps");
    assert_eq!(latest[0].author, "alice");

    let largest = largest.data().cloned().unwrap();
    assert_eq!(largest[0].id, coins);
    assert_eq!(largest[0].item_count, 2);
    assert_eq!(largest[1].id, stamps);
}

#[tokio::test]
async fn test_home_section_error_is_isolated() {
    let env = TestEnv::start().await;
    env.db().add_collection("Coins", "alice", json!({}));
    env.db().fail("GET /api/items");

    let home = HomeView::open(&env.ctx);
    home.settled().await;
    let (tags, latest, largest) = home.snapshot();

    assert_eq!(tags, ViewState::Error("Injected failure".into()));
    assert_eq!(latest, ViewState::Error("Injected failure".into()));
    assert_eq!(largest.data().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_ticket_is_created_and_listed() {
    let env = TestEnv::start().await;
    env.db().add_user("alice", "secret", false);
    let user = env.login("alice", "secret").await;
    let client = env.ctx.tickets().expect("service de tickets configuré");

    let draft = TicketDraft {
        summary: "Broken image".into(),
        priority: Priority::High,
        link: "/collection/3".into(),
        collection: "Coins".into(),
    };
    let url = client.create(&draft, &user, env.ctx.tr()).await.expect("ticket créé");
    assert!(url.ends_with("/issue/1001"));

    let page = client.list(&user.email, 1).await.expect("liste des tickets");
    assert_eq!(page.total, 1);
    assert_eq!(page.total_pages, 1);
    let ticket = &page.tickets[0];
    assert_eq!(ticket.key, "SUP-1");
    assert_eq!(ticket.summary, "Broken image");
    assert_eq!(ticket.priority.as_deref(), Some("High"));
    assert_eq!(ticket.status.as_deref(), Some("Opened"));
    assert_eq!(ticket.collection.as_deref(), Some("Coins"));
    assert_eq!(
        ticket.link.as_deref(),
        Some("https://tracker.example.org/browse/SUP-1")
    );
}

#[tokio::test]
async fn test_incomplete_ticket_is_not_sent() {
    let env = TestEnv::start().await;
    env.db().add_user("alice", "secret", false);
    let user = env.login("alice", "secret").await;
    let client = env.ctx.tickets().unwrap();

    let draft = TicketDraft {
        summary: "Missing collection".into(),
        ..Default::default()
    };
    let err = client.create(&draft, &user, env.ctx.tr()).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert!(env.db().calls_to("POST", "/create-ticket").is_empty());
}

#[tokio::test]
async fn test_ticket_pages() {
    let env = TestEnv::start().await;
    env.db().add_user("alice", "secret", false);
    let user = env.login("alice", "secret").await;
    let client = env.ctx.tickets().unwrap();

    for n in 0..12 {
        let draft = TicketDraft {
            summary: format!("Issue {}", n),
            collection: "Coins".into(),
            ..Default::default()
        };
        client.create(&draft, &user, env.ctx.tr()).await.unwrap();
    }

    let first = client.list(&user.email, 1).await.unwrap();
    assert_eq!(first.tickets.len(), 10);
    assert_eq!(first.total_pages, 2);

    let second = client.list(&user.email, 2).await.unwrap();
    assert_eq!(second.page, 2);
    assert_eq!(second.tickets.len(), 2);
    assert_eq!(second.tickets[0].summary, "Issue 10");
    assert_eq!(second.tickets[0].priority.as_deref(), Some("Low"));

    let nobody = client.list("nobody@example.org", 1).await.unwrap();
    assert!(nobody.tickets.is_empty());
    assert_eq!(nobody.total_pages, 0);
}
