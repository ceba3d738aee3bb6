// FICHIER : src-core/src/utils/net.rs

use crate::utils::{json, AppError, VitrineResult};
use crate::vitrine_error;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::OnceLock;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Singleton : Le client HTTP est réutilisé pour bénéficier du pool de connexions.
static GLOBAL_CLIENT: OnceLock<Client> = OnceLock::new();

/// Récupère l'instance unique du client HTTP global.
pub fn get_client() -> &'static Client {
    GLOBAL_CLIENT.get_or_init(|| {
        Client::builder()
            .timeout(Duration::from_secs(30))
            .pool_idle_timeout(Duration::from_secs(90))
            .user_agent(concat!("Vitrine/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("❌ CRITICAL: Impossible d'initialiser le client HTTP global")
    })
}

/// Ajoute l'en-tête `Authorization: Bearer` si un jeton est présent.
pub fn with_bearer(request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token {
        Some(tk) => request.header("Authorization", format!("Bearer {}", tk)),
        None => request,
    }
}

/// Extrait `error.message` d'un corps d'erreur du backend (`{"error":{"message":"..."}}`).
pub fn backend_error_message(body: &str) -> Option<String> {
    let doc: json::Value = serde_json::from_str(body).ok()?;
    json::get_path(&doc, "error.message")
        .and_then(|m| m.as_str())
        .map(str::to_string)
}

/// Envoie la requête et classe la réponse :
/// transport KO -> `Network`, 404 -> `NotFound`, autre non-2xx -> `Backend` (message littéral).
/// Pas de nouvelle tentative : l'utilisateur relance lui-même.
#[instrument(skip(request))]
pub async fn send(request: RequestBuilder, endpoint: &str) -> VitrineResult<Response> {
    let response = match request.send().await {
        Ok(r) => r,
        Err(e) => {
            warn!("Échec de connexion vers {} : {}", endpoint, e);
            return Err(AppError::Network(e));
        }
    };

    let status = response.status();
    debug!("HTTP {} <- {}", status.as_u16(), endpoint);
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    if status == StatusCode::NOT_FOUND {
        return Err(AppError::NotFound(endpoint.to_string()));
    }

    let message = backend_error_message(&body).unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("Unexpected backend response")
            .to_string()
    });
    warn!("Erreur HTTP {} sur {} : {}", status.as_u16(), endpoint, message);
    Err(AppError::Backend {
        status: status.as_u16(),
        message,
    })
}

/// `send` puis désérialisation JSON typée du corps.
pub async fn send_json<R: DeserializeOwned>(request: RequestBuilder, endpoint: &str) -> VitrineResult<R> {
    let response = send(request, endpoint).await?;
    match response.json::<R>().await {
        Ok(data) => Ok(data),
        Err(e) => vitrine_error!(
            "ERR_NET_JSON_DECODE",
            error = e,
            context = json::json!({ "endpoint": endpoint })
        ),
    }
}

/// `send` en ignorant le corps (DELETE, PUT sans retour exploité).
pub async fn send_empty(request: RequestBuilder, endpoint: &str) -> VitrineResult<()> {
    send(request, endpoint).await.map(|_| ())
}

// --- TESTS UNITAIRES ---
