// FICHIER : src-core/tests/common/mod.rs

//! Faux backend headless (API REST à enveloppes + service de tickets) servi par axum
//! sur un port éphémère, et assemblage d'un `AppContext` branché dessus.

#![allow(dead_code)]

use axum::extract::{Multipart, Path, Query, Request, State};
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{json, Map, Value};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, Once};
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use vitrine::auth::{AuthService, SessionStore};
use vitrine::backend::HttpBackend;
use vitrine::models::User;
use vitrine::utils::config::test_mocks::inject_mock_config;
use vitrine::utils::config::{EndpointsConfig, SessionConfig};
use vitrine::utils::i18n::Translator;
use vitrine::AppContext;

static INIT: Once = Once::new();

pub fn init_test_env() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("vitrine=debug")
            .with_test_writer()
            .try_init();
        inject_mock_config();
    });
}

pub const ADMIN_ROLE_ID: u64 = 3;
pub const AUTHENTICATED_ROLE_ID: u64 = 1;

type Reply = Result<Json<Value>, (StatusCode, Json<Value>)>;

fn error_reply(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (
        status,
        Json(json!({
            "data": null,
            "error": { "status": status.as_u16(), "name": "ApplicationError", "message": message }
        })),
    )
}

fn not_found() -> (StatusCode, Json<Value>) {
    error_reply(StatusCode::NOT_FOUND, "Not Found")
}

/// Horodatage déterministe et croissant avec l'id.
fn stamp(id: u64) -> String {
    format!("2024-03-{:02}T10:00:00.000Z", (id % 28) + 1)
}

// --- ÉTAT DU FAUX BACKEND ---

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub method: String,
    pub path: String,
    pub bearer: Option<String>,
}

#[derive(Debug, Clone)]
struct Account {
    user: Value,
    password: String,
}

#[derive(Default)]
pub struct MockDb {
    next_id: u64,
    accounts: BTreeMap<u64, Account>,
    /// Attributs bruts par ressource (`collections`, `items`, `tags`, `comments`, `likes`).
    tables: HashMap<&'static str, BTreeMap<u64, Map<String, Value>>>,
    tickets: Vec<Value>,
    pub calls: Vec<Call>,
    /// Routes `"METHODE /chemin"` qui répondent 500.
    pub failures: HashSet<String>,
}

impl MockDb {
    fn next(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn table(&mut self, resource: &'static str) -> &mut BTreeMap<u64, Map<String, Value>> {
        self.tables.entry(resource).or_default()
    }

    fn rows(&self, resource: &str) -> Vec<(u64, Map<String, Value>)> {
        self.tables
            .get(resource)
            .map(|t| t.iter().map(|(id, a)| (*id, a.clone())).collect())
            .unwrap_or_default()
    }

    fn insert(&mut self, resource: &'static str, mut attrs: Map<String, Value>) -> u64 {
        let id = self.next();
        for key in ["createdAt", "publishedAt", "updatedAt"] {
            attrs.entry(key).or_insert_with(|| json!(stamp(id)));
        }
        self.table(resource).insert(id, attrs);
        id
    }

    // --- AMORÇAGE ---

    pub fn add_user(&mut self, username: &str, password: &str, admin: bool) -> u64 {
        let id = self.next();
        let user = json!({
            "id": id,
            "username": username,
            "email": format!("{}@example.org", username),
            "user_id": format!("uuid-{}", username),
            "blocked": false,
            "confirmed": true,
            "createdAt": stamp(id),
            "updatedAt": stamp(id),
            "role": role_json(if admin { ADMIN_ROLE_ID } else { AUTHENTICATED_ROLE_ID }),
        });
        self.accounts.insert(
            id,
            Account {
                user,
                password: password.into(),
            },
        );
        id
    }

    pub fn add_collection(&mut self, name: &str, owner: &str, fields: Value) -> u64 {
        let attrs = json!({
            "name": name,
            "description": format!("About {}", name),
            "category": "Coins",
            "fields": fields,
            "user_id": format!("uuid-{}", owner),
            "user_name": owner,
        });
        self.insert("collections", as_map(attrs))
    }

    pub fn add_item(&mut self, collection: u64, name: &str, tags: &str, fields: Value, owner: &str) -> u64 {
        let attrs = json!({
            "name": name,
            "tags": tags,
            "additionalFields": fields,
            "user_id": format!("uuid-{}", owner),
            "user_name": owner,
            "collection": collection,
        });
        self.insert("items", as_map(attrs))
    }

    pub fn add_tag(&mut self, label: &str) -> u64 {
        self.insert("tags", as_map(json!({ "tags": label })))
    }

    pub fn add_comment(&mut self, item: u64, author: u64, text: &str) -> u64 {
        self.insert(
            "comments",
            as_map(json!({ "text": text, "user": author, "item": item })),
        )
    }

    // --- INSPECTION ---

    pub fn count(&self, resource: &str) -> usize {
        self.tables.get(resource).map_or(0, BTreeMap::len)
    }

    pub fn attrs(&self, resource: &str, id: u64) -> Option<Map<String, Value>> {
        self.tables.get(resource).and_then(|t| t.get(&id)).cloned()
    }

    pub fn tag_labels(&self) -> Vec<String> {
        self.rows("tags")
            .into_iter()
            .filter_map(|(_, a)| a.get("tags").and_then(Value::as_str).map(str::to_string))
            .collect()
    }

    pub fn user(&self, id: u64) -> Option<Value> {
        self.accounts.get(&id).map(|a| a.user.clone())
    }

    pub fn calls_to(&self, method: &str, path: &str) -> Vec<Call> {
        self.calls
            .iter()
            .filter(|c| c.method == method && c.path == path)
            .cloned()
            .collect()
    }

    pub fn fail(&mut self, route: &str) {
        self.failures.insert(route.to_string());
    }

    // --- RENDU EN ENVELOPPES ---

    fn username(&self, account: u64) -> Option<String> {
        self.accounts
            .get(&account)
            .and_then(|a| a.user.get("username").and_then(Value::as_str).map(str::to_string))
    }

    fn entity(&self, resource: &str, id: u64, attrs: &Map<String, Value>) -> Value {
        let mut out = attrs.clone();
        match resource {
            "collections" => {
                let items: Vec<Value> = self
                    .rows("items")
                    .into_iter()
                    .filter(|(_, a)| a.get("collection") == Some(&json!(id)))
                    .map(|(item_id, _)| json!({ "id": item_id, "attributes": {} }))
                    .collect();
                out.insert("items".into(), json!({ "data": items }));
            }
            "items" => {
                let relation = attrs
                    .get("collection")
                    .and_then(Value::as_u64)
                    .and_then(|cid| {
                        self.tables
                            .get("collections")
                            .and_then(|t| t.get(&cid))
                            .map(|c| json!({ "id": cid, "attributes": { "name": c.get("name") } }))
                    })
                    .unwrap_or(Value::Null);
                out.insert("collection".into(), json!({ "data": relation }));
            }
            "comments" => {
                let author = attrs.get("user").and_then(Value::as_u64);
                let relation = author
                    .and_then(|uid| {
                        self.username(uid)
                            .map(|name| json!({ "id": uid, "attributes": { "username": name } }))
                    })
                    .unwrap_or(Value::Null);
                out.insert("user".into(), json!({ "data": relation }));
            }
            "likes" => {
                let item = attrs.get("item").cloned().unwrap_or(Value::Null);
                out.insert("item".into(), json!({ "data": { "id": item, "attributes": {} } }));
            }
            _ => {}
        }
        json!({ "id": id, "attributes": out })
    }
}

fn as_map(v: Value) -> Map<String, Value> {
    match v {
        Value::Object(m) => m,
        _ => Map::new(),
    }
}

fn role_json(id: u64) -> Value {
    if id == ADMIN_ROLE_ID {
        json!({ "id": ADMIN_ROLE_ID, "name": "Admin", "type": "admin" })
    } else {
        json!({ "id": AUTHENTICATED_ROLE_ID, "name": "Authenticated", "type": "authenticated" })
    }
}

/// Filtres `filters[...][$eq]` supportés par le faux backend.
fn matches_filters(attrs: &Map<String, Value>, params: &HashMap<String, String>) -> bool {
    params.iter().all(|(key, expected)| {
        let field = match key.as_str() {
            "filters[collection][id][$eq]" => "collection",
            "filters[item][id][$eq]" => "item",
            "filters[user_id][$eq]" => "user_id",
            "filters[user_liked_id][$eq]" => "user_liked_id",
            _ => return true,
        };
        match attrs.get(field) {
            Some(Value::String(s)) => s == expected,
            Some(Value::Number(n)) => n.to_string() == *expected,
            _ => false,
        }
    })
}

// --- SERVEUR ---

#[derive(Clone)]
struct MockState(Arc<Mutex<MockDb>>);

impl MockState {
    fn db(&self) -> MutexGuard<'_, MockDb> {
        self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

pub struct MockServer {
    pub base_url: String,
    db: Arc<Mutex<MockDb>>,
    handle: JoinHandle<()>,
}

impl MockServer {
    pub async fn start() -> Self {
        let db = Arc::new(Mutex::new(MockDb::default()));
        let state = MockState(db.clone());

        let app = Router::new()
            .route("/api/auth/local", post(login))
            .route("/api/auth/local/register", post(register))
            .route("/api/users", get(list_users))
            .route("/api/users/me", get(me))
            .route("/api/users/{id}", put(update_user).delete(delete_user))
            .route("/api/collections", get(list_collections).post(create_collection))
            .route(
                "/api/collections/{id}",
                get(get_collection).put(update_collection).delete(delete_collection),
            )
            .route("/api/items", get(list_items).post(create_item))
            .route(
                "/api/items/{id}",
                get(get_item).put(update_item).delete(delete_item),
            )
            .route("/api/tags", get(list_tags).post(create_tag))
            .route("/api/comments", get(list_comments).post(create_comment))
            .route(
                "/api/comments/{id}",
                put(update_comment).delete(delete_comment),
            )
            .route("/api/likes", get(list_likes).post(create_like))
            .route("/api/likes/{id}", axum::routing::delete(delete_like))
            .route("/create-ticket", post(create_ticket))
            .route("/tickets", get(list_tickets))
            .layer(middleware::from_fn_with_state(state.clone(), record_and_inject))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind du faux backend");
        let addr = listener.local_addr().expect("adresse locale");
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self {
            base_url: format!("http://{}", addr),
            db,
            handle,
        }
    }

    pub fn api_url(&self) -> String {
        format!("{}/api", self.base_url)
    }

    pub fn db(&self) -> MutexGuard<'_, MockDb> {
        self.db.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Journalise chaque appel puis applique les pannes injectées.
async fn record_and_inject(State(state): State<MockState>, request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let bearer = request
        .headers()
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::to_string);

    let fail = {
        let mut db = state.db();
        db.calls.push(Call {
            method: method.clone(),
            path: path.clone(),
            bearer,
        });
        db.failures.contains(&format!("{} {}", method, path))
    };

    if fail {
        return error_reply(StatusCode::INTERNAL_SERVER_ERROR, "Injected failure").into_response();
    }
    next.run(request).await
}

fn bearer_account(headers: &HeaderMap) -> Option<u64> {
    headers
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer jwt-"))
        .and_then(|id| id.parse().ok())
}

// --- AUTH & COMPTES ---

/// La réponse de connexion ne peuple pas le rôle.
fn without_role(user: &Value) -> Value {
    let mut user = user.clone();
    if let Some(obj) = user.as_object_mut() {
        obj.remove("role");
    }
    user
}

async fn login(State(state): State<MockState>, Json(body): Json<Value>) -> Reply {
    let identifier = body.get("identifier").and_then(Value::as_str).unwrap_or_default();
    let password = body.get("password").and_then(Value::as_str).unwrap_or_default();
    let db = state.db();
    let found = db.accounts.iter().find(|(_, a)| {
        let same_name = a.user.get("username").and_then(Value::as_str) == Some(identifier);
        let same_mail = a.user.get("email").and_then(Value::as_str) == Some(identifier);
        (same_name || same_mail) && a.password == password
    });
    match found {
        Some((id, account)) => Ok(Json(json!({
            "jwt": format!("jwt-{}", id),
            "user": without_role(&account.user),
        }))),
        None => Err(error_reply(
            StatusCode::BAD_REQUEST,
            "Invalid identifier or password",
        )),
    }
}

async fn register(State(state): State<MockState>, Json(body): Json<Value>) -> Reply {
    let username = body.get("username").and_then(Value::as_str).unwrap_or_default().to_string();
    let password = body.get("password").and_then(Value::as_str).unwrap_or_default().to_string();
    let mut db = state.db();
    let taken = db
        .accounts
        .values()
        .any(|a| a.user.get("username").and_then(Value::as_str) == Some(username.as_str()));
    if taken {
        return Err(error_reply(
            StatusCode::BAD_REQUEST,
            "Email or Username are already taken",
        ));
    }
    let id = db.add_user(&username, &password, false);
    if let Some(account) = db.accounts.get_mut(&id) {
        account.user["email"] = body.get("email").cloned().unwrap_or(Value::Null);
        account.user["user_id"] = body.get("user_id").cloned().unwrap_or(Value::Null);
    }
    let user = db.user(id).unwrap_or(Value::Null);
    Ok(Json(json!({ "jwt": format!("jwt-{}", id), "user": without_role(&user) })))
}

async fn me(State(state): State<MockState>, headers: HeaderMap) -> Reply {
    let db = state.db();
    bearer_account(&headers)
        .and_then(|id| db.user(id))
        .map(Json)
        .ok_or_else(|| error_reply(StatusCode::UNAUTHORIZED, "Missing or invalid credentials"))
}

async fn list_users(State(state): State<MockState>) -> Reply {
    let db = state.db();
    let users: Vec<Value> = db.accounts.values().map(|a| a.user.clone()).collect();
    Ok(Json(Value::Array(users)))
}

async fn update_user(
    State(state): State<MockState>,
    Path(id): Path<u64>,
    Json(patch): Json<Value>,
) -> Reply {
    let mut db = state.db();
    let account = db.accounts.get_mut(&id).ok_or_else(not_found)?;
    if let Some(blocked) = patch.get("blocked") {
        account.user["blocked"] = blocked.clone();
    }
    if let Some(role) = patch.get("role").and_then(Value::as_u64) {
        account.user["role"] = role_json(role);
    }
    Ok(Json(account.user.clone()))
}

async fn delete_user(State(state): State<MockState>, Path(id): Path<u64>) -> Reply {
    let mut db = state.db();
    let account = db.accounts.remove(&id).ok_or_else(not_found)?;
    Ok(Json(account.user))
}

// --- RESSOURCES À ENVELOPPE ---

fn list(state: &MockState, resource: &'static str, params: &HashMap<String, String>) -> Reply {
    let db = state.db();
    let mut rows: Vec<(u64, Map<String, Value>)> = db
        .rows(resource)
        .into_iter()
        .filter(|(_, a)| matches_filters(a, params))
        .collect();
    if params.get("sort").map(String::as_str) == Some("createdAt:desc") {
        rows.reverse();
    }
    let data: Vec<Value> = rows
        .iter()
        .map(|(id, a)| db.entity(resource, *id, a))
        .collect();
    Ok(Json(json!({ "data": data, "meta": {} })))
}

fn fetch(state: &MockState, resource: &'static str, id: u64) -> Reply {
    let db = state.db();
    let attrs = db.attrs(resource, id).ok_or_else(not_found)?;
    Ok(Json(json!({ "data": db.entity(resource, id, &attrs), "meta": {} })))
}

fn remove(state: &MockState, resource: &'static str, id: u64) -> Reply {
    let mut db = state.db();
    let attrs = db.table(resource).remove(&id).ok_or_else(not_found)?;
    Ok(Json(json!({ "data": { "id": id, "attributes": attrs } })))
}

/// Lit un formulaire multipart `data` + `files.image_url`.
async fn read_form(mut form: Multipart) -> Result<Map<String, Value>, (StatusCode, Json<Value>)> {
    let mut attrs = Map::new();
    let mut image = None;
    while let Ok(Some(field)) = form.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "data" => {
                let text = field.text().await.unwrap_or_default();
                attrs = serde_json::from_str::<Value>(&text)
                    .map(as_map)
                    .map_err(|_| error_reply(StatusCode::BAD_REQUEST, "Invalid data part"))?;
            }
            "files.image_url" => {
                let name = field.file_name().unwrap_or("upload").to_string();
                image = Some(name);
            }
            _ => {}
        }
    }
    if let Some(name) = image {
        attrs.insert(
            "image_url".into(),
            json!({ "data": { "id": 900, "attributes": { "url": format!("/uploads/{}", name), "name": name } } }),
        );
    }
    Ok(attrs)
}

fn save(state: &MockState, resource: &'static str, id: Option<u64>, attrs: Map<String, Value>) -> Reply {
    let mut db = state.db();
    let id = match id {
        Some(id) => {
            let row = db.table(resource).get_mut(&id).ok_or_else(not_found)?;
            for (k, v) in attrs {
                row.insert(k, v);
            }
            id
        }
        None => db.insert(resource, attrs),
    };
    let stored = db.attrs(resource, id).unwrap_or_default();
    Ok(Json(json!({ "data": db.entity(resource, id, &stored), "meta": {} })))
}

fn data_part(body: Value) -> Map<String, Value> {
    as_map(body.get("data").cloned().unwrap_or(Value::Null))
}

async fn list_collections(State(s): State<MockState>, Query(p): Query<HashMap<String, String>>) -> Reply {
    list(&s, "collections", &p)
}

async fn get_collection(State(s): State<MockState>, Path(id): Path<u64>) -> Reply {
    fetch(&s, "collections", id)
}

async fn create_collection(State(s): State<MockState>, form: Multipart) -> Reply {
    let attrs = read_form(form).await?;
    save(&s, "collections", None, attrs)
}

async fn update_collection(State(s): State<MockState>, Path(id): Path<u64>, form: Multipart) -> Reply {
    let attrs = read_form(form).await?;
    save(&s, "collections", Some(id), attrs)
}

async fn delete_collection(State(s): State<MockState>, Path(id): Path<u64>) -> Reply {
    remove(&s, "collections", id)
}

async fn list_items(State(s): State<MockState>, Query(p): Query<HashMap<String, String>>) -> Reply {
    list(&s, "items", &p)
}

async fn get_item(State(s): State<MockState>, Path(id): Path<u64>) -> Reply {
    fetch(&s, "items", id)
}

async fn create_item(State(s): State<MockState>, form: Multipart) -> Reply {
    let attrs = read_form(form).await?;
    save(&s, "items", None, attrs)
}

async fn update_item(State(s): State<MockState>, Path(id): Path<u64>, form: Multipart) -> Reply {
    let attrs = read_form(form).await?;
    save(&s, "items", Some(id), attrs)
}

async fn delete_item(State(s): State<MockState>, Path(id): Path<u64>) -> Reply {
    remove(&s, "items", id)
}

async fn list_tags(State(s): State<MockState>, Query(p): Query<HashMap<String, String>>) -> Reply {
    list(&s, "tags", &p)
}

async fn create_tag(State(s): State<MockState>, Json(body): Json<Value>) -> Reply {
    save(&s, "tags", None, data_part(body))
}

async fn list_comments(State(s): State<MockState>, Query(p): Query<HashMap<String, String>>) -> Reply {
    list(&s, "comments", &p)
}

async fn create_comment(State(s): State<MockState>, Json(body): Json<Value>) -> Reply {
    save(&s, "comments", None, data_part(body))
}

async fn update_comment(State(s): State<MockState>, Path(id): Path<u64>, Json(body): Json<Value>) -> Reply {
    save(&s, "comments", Some(id), data_part(body))
}

async fn delete_comment(State(s): State<MockState>, Path(id): Path<u64>) -> Reply {
    remove(&s, "comments", id)
}

async fn list_likes(State(s): State<MockState>, Query(p): Query<HashMap<String, String>>) -> Reply {
    list(&s, "likes", &p)
}

async fn create_like(State(s): State<MockState>, Json(body): Json<Value>) -> Reply {
    save(&s, "likes", None, data_part(body))
}

async fn delete_like(State(s): State<MockState>, Path(id): Path<u64>) -> Reply {
    remove(&s, "likes", id)
}

// --- SERVICE DE TICKETS ---

async fn create_ticket(State(s): State<MockState>, Json(body): Json<Value>) -> Reply {
    let mut db = s.db();
    let n = db.tickets.len() + 1;
    let issue = json!({
        "id": format!("100{}", n),
        "key": format!("SUP-{}", n),
        "reporter": body.pointer("/user/email").cloned().unwrap_or(Value::Null),
        "fields": {
            "summary": body.get("summary"),
            "priority": { "name": body.get("priority") },
            "customfield_10044": { "value": "Opened" },
            "customfield_10035": body.get("collection"),
        }
    });
    db.tickets.push(issue);
    Ok(Json(json!({ "issueUrl": format!("https://tracker.example.org/rest/api/2/issue/100{}", n) })))
}

async fn list_tickets(State(s): State<MockState>, Query(p): Query<HashMap<String, String>>) -> Reply {
    let db = s.db();
    let reporter = p.get("reportedBy").cloned().unwrap_or_default();
    let start: usize = p.get("startAt").and_then(|v| v.parse().ok()).unwrap_or(0);
    let max: usize = p.get("maxResults").and_then(|v| v.parse().ok()).unwrap_or(10);
    let mine: Vec<&Value> = db
        .tickets
        .iter()
        .filter(|t| t.get("reporter").and_then(Value::as_str) == Some(reporter.as_str()))
        .collect();
    let page: Vec<Value> = mine.iter().skip(start).take(max).map(|t| (*t).clone()).collect();
    Ok(Json(json!({ "issues": page, "total": mine.len() })))
}

// --- ASSEMBLAGE CÔTÉ CLIENT ---

pub struct TestEnv {
    pub server: MockServer,
    pub ctx: AppContext,
    _dir: TempDir,
}

impl TestEnv {
    /// Faux backend vide + contexte dont la session vit dans un dossier temporaire.
    pub async fn start() -> Self {
        init_test_env();
        let server = MockServer::start().await;
        let dir = tempfile::Builder::new()
            .prefix("vitrine_it_")
            .tempdir()
            .expect("dossier temporaire");

        let session = Arc::new(
            SessionStore::open(dir.path().join("cookies.json"), SessionConfig::default())
                .await
                .expect("ouverture de session"),
        );
        let endpoints = EndpointsConfig {
            api_url: server.api_url(),
            upload_url: Some(server.base_url.clone()),
            backend_url: Some(server.base_url.clone()),
            ticket_browse_url: Some("https://tracker.example.org/browse".into()),
        };
        let backend = HttpBackend::from_config(&endpoints, session.clone()).expect("backend HTTP");
        let ctx = AppContext::new(
            endpoints,
            session,
            Arc::new(Translator::embedded("en")),
            Arc::new(backend),
        );

        Self {
            server,
            ctx,
            _dir: dir,
        }
    }

    pub fn db(&self) -> MutexGuard<'_, MockDb> {
        self.server.db()
    }

    /// Fichier du jar de cookies de la session de test.
    pub fn jar_path(&self) -> std::path::PathBuf {
        self._dir.path().join("cookies.json")
    }

    pub async fn login(&self, identifier: &str, password: &str) -> User {
        AuthService::new(&*self.ctx.backend, &self.ctx.session)
            .login(identifier, password)
            .await
            .expect("connexion de test")
    }
}
