//! Firebase REST adapter.
//!
//! Identity Toolkit handles email/password accounts, Firestore holds the
//! documents. The ID and refresh tokens returned by the last successful
//! sign-in or sign-up are kept in a session preference store, so a later
//! process still sends the signed-in user's bearer token. A Firestore call
//! rejected with 401 refreshes the ID token through Secure Token once and is
//! sent again.

mod error;
pub mod value;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use ct_core::config::FirebaseConfig;
use ct_core::ports::{
    AuthOutcome, AuthPort, DocumentStorePort, PreferenceStoreExt, PreferenceStorePort,
    RemoteError,
};
use ct_core::preferences::layout::{ID_TOKEN_KEY, REFRESH_TOKEN_KEY, REMOTE_SESSION_NAMESPACE};
use ct_core::{PreferenceKey, UserId};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::preferences::InMemoryPreferenceStore;

use error::{error_message, map_auth_error, map_status_code, map_transport_error};

pub const DEFAULT_AUTH_ENDPOINT: &str = "https://identitytoolkit.googleapis.com";
pub const DEFAULT_FIRESTORE_ENDPOINT: &str = "https://firestore.googleapis.com";
pub const DEFAULT_TOKEN_ENDPOINT: &str = "https://securetoken.googleapis.com";

const LIST_PAGE_SIZE: u32 = 300;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthResponse {
    #[serde(default)]
    local_id: Option<String>,
    #[serde(default)]
    id_token: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
}

/// Secure Token answers in snake_case.
#[derive(Deserialize)]
struct RefreshResponse {
    #[serde(default)]
    id_token: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListResponse {
    #[serde(default)]
    documents: Vec<Value>,
    #[serde(default)]
    next_page_token: Option<String>,
}

pub struct FirebaseUserService {
    http: Client,
    api_key: String,
    auth_base: String,
    token_base: String,
    documents_base: String,
    session: Arc<dyn PreferenceStorePort>,
}

fn or_default(endpoint: &str, default: &str) -> String {
    let endpoint = endpoint.trim().trim_end_matches('/');
    if endpoint.is_empty() {
        default.to_string()
    } else {
        endpoint.to_string()
    }
}

impl FirebaseUserService {
    pub fn new(config: &FirebaseConfig) -> Result<Self, RemoteError> {
        if config.api_key.is_empty() || config.project_id.is_empty() {
            return Err(RemoteError::Service(
                "firebase api_key and project_id are required".to_string(),
            ));
        }

        let mut builder = Client::builder();
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }
        let http = builder
            .build()
            .map_err(|e| RemoteError::Network(format!("failed to build HTTP client: {e}")))?;

        let auth_base = or_default(&config.auth_endpoint, DEFAULT_AUTH_ENDPOINT);
        let firestore_base = or_default(&config.firestore_endpoint, DEFAULT_FIRESTORE_ENDPOINT);
        let token_base = or_default(&config.token_endpoint, DEFAULT_TOKEN_ENDPOINT);

        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            auth_base,
            token_base,
            documents_base: format!(
                "{firestore_base}/v1/projects/{}/databases/(default)/documents",
                config.project_id
            ),
            session: Arc::new(InMemoryPreferenceStore::new(REMOTE_SESSION_NAMESPACE)),
        })
    }

    /// Keep tokens in `store` instead of process memory.
    pub fn with_session_store(mut self, store: Arc<dyn PreferenceStorePort>) -> Self {
        self.session = store;
        self
    }

    async fn stored_token(&self, key: PreferenceKey<String>) -> Option<String> {
        match self.session.current(key).await {
            Ok(token) => token.filter(|token| !token.is_empty()),
            Err(err) => {
                warn!(key = key.name(), error = %err, "stored firebase token unreadable");
                None
            }
        }
    }

    async fn remember_tokens(&self, id_token: String, refresh_token: Option<String>) {
        let result = self
            .session
            .edit(Box::new(move |prefs| {
                prefs.set(&ID_TOKEN_KEY, id_token);
                if let Some(refresh_token) = refresh_token {
                    prefs.set(&REFRESH_TOKEN_KEY, refresh_token);
                }
                Ok(())
            }))
            .await;
        if let Err(err) = result {
            warn!(error = %err, "failed to store firebase tokens");
        }
    }

    /// Exchange the stored refresh token for a new ID token. `Ok(false)`
    /// when there is nothing to refresh with.
    async fn refresh_id_token(&self) -> Result<bool, RemoteError> {
        let Some(refresh_token) = self.stored_token(REFRESH_TOKEN_KEY).await else {
            return Ok(false);
        };

        let url = format!("{}/v1/token", self.token_base);
        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token.as_str()),
            ])
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = map_auth_error(status, &body);
            debug!(%status, error = %err, "id token refresh rejected");
            return Err(err);
        }

        let refreshed: RefreshResponse = response.json().await.map_err(map_transport_error)?;
        let Some(id_token) = refreshed.id_token.filter(|token| !token.is_empty()) else {
            return Ok(false);
        };
        self.remember_tokens(id_token, refreshed.refresh_token).await;
        debug!("firebase id token refreshed");
        Ok(true)
    }

    async fn password_call(
        &self,
        action: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthOutcome, RemoteError> {
        let url = format!("{}/v1/accounts:{action}", self.auth_base);
        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&PasswordRequest {
                email,
                password,
                return_secure_token: true,
            })
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = map_auth_error(status, &body);
            debug!(action, %status, error = %err, "identity toolkit call rejected");
            return Err(err);
        }

        let auth: AuthResponse = response.json().await.map_err(map_transport_error)?;
        if let Some(token) = auth.id_token.filter(|token| !token.is_empty()) {
            self.remember_tokens(token, auth.refresh_token).await;
        }

        Ok(AuthOutcome {
            user_id: auth
                .local_id
                .filter(|id| !id.is_empty())
                .map(UserId::new),
        })
    }

    fn document_url(&self, collection: &str, id: &str) -> String {
        format!("{}/{collection}/{id}", self.documents_base)
    }

    async fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.query(&[("key", self.api_key.as_str())]);
        match self.stored_token(ID_TOKEN_KEY).await {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Send a Firestore request built by `build`, refreshing the ID token and
    /// resending once when it comes back 401.
    async fn send<F>(&self, build: F) -> Result<Response, RemoteError>
    where
        F: Fn(&Client) -> RequestBuilder,
    {
        let response = self
            .authorized(build(&self.http))
            .await
            .send()
            .await
            .map_err(map_transport_error)?;
        if response.status() != StatusCode::UNAUTHORIZED || !self.refresh_id_token().await? {
            return Ok(response);
        }

        self.authorized(build(&self.http))
            .await
            .send()
            .await
            .map_err(map_transport_error)
    }

    async fn failure(response: reqwest::Response) -> RemoteError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        map_status_code(status, error_message(&body))
    }
}

#[async_trait]
impl AuthPort for FirebaseUserService {
    async fn sign_in_with_email(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthOutcome, RemoteError> {
        self.password_call("signInWithPassword", email, password).await
    }

    async fn create_user_with_email(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthOutcome, RemoteError> {
        self.password_call("signUp", email, password).await
    }

    async fn sign_out(&self) -> Result<(), RemoteError> {
        self.session
            .clear()
            .await
            .map_err(|e| RemoteError::Service(format!("failed to clear firebase session: {e}")))
    }
}

#[async_trait]
impl DocumentStorePort for FirebaseUserService {
    async fn get_document(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<Value>, RemoteError> {
        let url = self.document_url(collection, id);
        let response = self.send(|http| http.get(&url)).await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let document: Value = response.json().await.map_err(map_transport_error)?;
                value::decode_document(&document).map(Some)
            }
            _ => Err(Self::failure(response).await),
        }
    }

    /// PATCH without an update mask replaces every field, creating the
    /// document when it does not exist.
    async fn set_document(
        &self,
        collection: &str,
        id: &str,
        document: Value,
    ) -> Result<(), RemoteError> {
        let body = json!({ "fields": value::encode_fields(&document)? });
        let url = self.document_url(collection, id);
        let response = self.send(|http| http.patch(&url).json(&body)).await?;

        if response.status().is_success() {
            Ok(())
        } else {
            let err = Self::failure(response).await;
            warn!(collection, id, error = %err, "firestore write failed");
            Err(err)
        }
    }

    async fn list_documents(&self, collection: &str) -> Result<Vec<Value>, RemoteError> {
        let url = format!("{}/{collection}", self.documents_base);
        let page_size = LIST_PAGE_SIZE.to_string();
        let mut documents = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let response = self
                .send(|http| {
                    let request = http.get(&url).query(&[("pageSize", page_size.as_str())]);
                    match page_token.as_deref() {
                        Some(token) => request.query(&[("pageToken", token)]),
                        None => request,
                    }
                })
                .await?;
            if !response.status().is_success() {
                return Err(Self::failure(response).await);
            }

            let page: ListResponse = response.json().await.map_err(map_transport_error)?;
            for document in &page.documents {
                documents.push(value::decode_document(document)?);
            }

            match page.next_page_token.filter(|token| !token.is_empty()) {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        debug!(collection, count = documents.len(), "firestore collection listed");
        Ok(documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preferences::FilePreferenceStore;
    use mockito::{Matcher, Server, ServerGuard};
    use tempfile::TempDir;

    const DOCS: &str = "/v1/projects/demo/databases/(default)/documents";

    fn service(server: &ServerGuard) -> FirebaseUserService {
        FirebaseUserService::new(&FirebaseConfig {
            api_key: "test-key".to_string(),
            project_id: "demo".to_string(),
            auth_endpoint: server.url(),
            firestore_endpoint: server.url(),
            token_endpoint: server.url(),
            timeout_secs: 5,
        })
        .unwrap()
    }

    #[test]
    fn new_requires_project_settings() {
        let result = FirebaseUserService::new(&FirebaseConfig::default());
        assert!(matches!(result, Err(RemoteError::Service(_))));
    }

    #[tokio::test]
    async fn sign_in_returns_local_id_and_keeps_token() {
        let mut server = Server::new_async().await;
        let sign_in = server
            .mock("POST", "/v1/accounts:signInWithPassword")
            .match_query(Matcher::UrlEncoded("key".into(), "test-key".into()))
            .match_body(Matcher::PartialJson(json!({
                "email": "lan@example.com",
                "password": "secret1",
                "returnSecureToken": true
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"localId": "uid-1", "idToken": "tok-1"}"#)
            .create_async()
            .await;
        let get = server
            .mock("GET", format!("{DOCS}/users/uid-1").as_str())
            .match_query(Matcher::UrlEncoded("key".into(), "test-key".into()))
            .match_header("authorization", "Bearer tok-1")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "name": "projects/demo/databases/(default)/documents/users/uid-1",
                    "fields": {
                        "id": {"stringValue": "uid-1"},
                        "email": {"stringValue": "lan@example.com"}
                    }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let firebase = service(&server);
        let outcome = firebase
            .sign_in_with_email("lan@example.com", "secret1")
            .await
            .unwrap();
        let document = firebase.get_document("users", "uid-1").await.unwrap();

        sign_in.assert_async().await;
        get.assert_async().await;
        assert_eq!(outcome.user_id, Some(UserId::from("uid-1")));
        assert_eq!(
            document,
            Some(json!({"id": "uid-1", "email": "lan@example.com"}))
        );
    }

    #[tokio::test]
    async fn sign_in_without_local_id_yields_no_user() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/v1/accounts:signInWithPassword")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"idToken": "tok"}"#)
            .create_async()
            .await;

        let outcome = service(&server)
            .sign_in_with_email("lan@example.com", "secret1")
            .await
            .unwrap();

        assert_eq!(outcome.user_id, None);
    }

    #[tokio::test]
    async fn sign_up_conflict_maps_to_conflict() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/v1/accounts:signUp")
            .match_query(Matcher::Any)
            .with_status(400)
            .with_body(r#"{"error": {"code": 400, "message": "EMAIL_EXISTS"}}"#)
            .create_async()
            .await;

        let err = service(&server)
            .create_user_with_email("lan@example.com", "secret1")
            .await
            .unwrap_err();

        assert_eq!(err, RemoteError::Conflict("EMAIL_EXISTS".to_string()));
    }

    #[tokio::test]
    async fn missing_document_is_none() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", format!("{DOCS}/users/nobody").as_str())
            .match_query(Matcher::Any)
            .with_status(404)
            .with_body(r#"{"error": {"code": 404, "status": "NOT_FOUND"}}"#)
            .create_async()
            .await;

        let document = service(&server)
            .get_document("users", "nobody")
            .await
            .unwrap();

        assert!(document.is_none());
    }

    #[tokio::test]
    async fn set_document_patches_encoded_fields() {
        let mut server = Server::new_async().await;
        let patch = server
            .mock("PATCH", format!("{DOCS}/users/uid-1").as_str())
            .match_query(Matcher::UrlEncoded("key".into(), "test-key".into()))
            .match_body(Matcher::Json(json!({
                "fields": {
                    "userName": {"stringValue": "Lan"},
                    "address": {"mapValue": {"fields": {"ward": {"stringValue": "1"}}}}
                }
            })))
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        service(&server)
            .set_document(
                "users",
                "uid-1",
                json!({"userName": "Lan", "address": {"ward": "1"}}),
            )
            .await
            .unwrap();

        patch.assert_async().await;
    }

    #[tokio::test]
    async fn permission_denied_write_is_reported() {
        let mut server = Server::new_async().await;
        server
            .mock("PATCH", format!("{DOCS}/users/uid-1").as_str())
            .match_query(Matcher::Any)
            .with_status(403)
            .with_body(
                r#"{"error": {"code": 403, "message": "Missing or insufficient permissions."}}"#,
            )
            .create_async()
            .await;

        let err = service(&server)
            .set_document("users", "uid-1", json!({"userName": "Lan"}))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            RemoteError::PermissionDenied("Missing or insufficient permissions.".to_string())
        );
    }

    #[tokio::test]
    async fn list_documents_follows_page_tokens() {
        let mut server = Server::new_async().await;
        let page_one = server
            .mock("GET", format!("{DOCS}/restaurants").as_str())
            .match_query(Matcher::Regex("^pageSize=300&key=test-key$".into()))
            .with_status(200)
            .with_body(
                json!({
                    "documents": [{"fields": {"name": {"stringValue": "A"}}}],
                    "nextPageToken": "p2"
                })
                .to_string(),
            )
            .create_async()
            .await;
        let page_two = server
            .mock("GET", format!("{DOCS}/restaurants").as_str())
            .match_query(Matcher::UrlEncoded("pageToken".into(), "p2".into()))
            .with_status(200)
            .with_body(
                json!({"documents": [{"fields": {"name": {"stringValue": "B"}}}]}).to_string(),
            )
            .create_async()
            .await;

        let documents = service(&server)
            .list_documents("restaurants")
            .await
            .unwrap();

        page_one.assert_async().await;
        page_two.assert_async().await;
        assert_eq!(documents, vec![json!({"name": "A"}), json!({"name": "B"})]);
    }

    #[tokio::test]
    async fn empty_collection_lists_nothing() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", format!("{DOCS}/food_items").as_str())
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let documents = service(&server).list_documents("food_items").await.unwrap();
        assert!(documents.is_empty());
    }

    fn session_store(dir: &TempDir) -> Arc<dyn PreferenceStorePort> {
        Arc::new(FilePreferenceStore::in_dir(dir.path(), REMOTE_SESSION_NAMESPACE))
    }

    #[tokio::test]
    async fn token_from_sign_in_is_used_by_a_later_instance() {
        let mut server = Server::new_async().await;
        let prefs_dir = TempDir::new().unwrap();
        server
            .mock("POST", "/v1/accounts:signInWithPassword")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"localId": "uid-1", "idToken": "tok-1", "refreshToken": "ref-1"}"#)
            .create_async()
            .await;
        let patch = server
            .mock("PATCH", format!("{DOCS}/users/uid-1").as_str())
            .match_query(Matcher::Any)
            .match_header("authorization", "Bearer tok-1")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        service(&server)
            .with_session_store(session_store(&prefs_dir))
            .sign_in_with_email("lan@example.com", "secret1")
            .await
            .unwrap();

        service(&server)
            .with_session_store(session_store(&prefs_dir))
            .set_document("users", "uid-1", json!({"userName": "Lan"}))
            .await
            .unwrap();

        patch.assert_async().await;
    }

    #[tokio::test]
    async fn sign_out_drops_stored_tokens() {
        let mut server = Server::new_async().await;
        let prefs_dir = TempDir::new().unwrap();
        server
            .mock("POST", "/v1/accounts:signInWithPassword")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"localId": "uid-1", "idToken": "tok-1", "refreshToken": "ref-1"}"#)
            .create_async()
            .await;
        let anonymous_get = server
            .mock("GET", format!("{DOCS}/users/uid-1").as_str())
            .match_query(Matcher::Any)
            .match_header("authorization", Matcher::Missing)
            .with_status(404)
            .with_body("{}")
            .create_async()
            .await;

        let first = service(&server).with_session_store(session_store(&prefs_dir));
        first
            .sign_in_with_email("lan@example.com", "secret1")
            .await
            .unwrap();
        first.sign_out().await.unwrap();

        let document = service(&server)
            .with_session_store(session_store(&prefs_dir))
            .get_document("users", "uid-1")
            .await
            .unwrap();

        anonymous_get.assert_async().await;
        assert!(document.is_none());
    }

    #[tokio::test]
    async fn expired_token_is_refreshed_and_request_resent() {
        let mut server = Server::new_async().await;
        let prefs_dir = TempDir::new().unwrap();
        let store = session_store(&prefs_dir);
        store.write(ID_TOKEN_KEY, "old".to_string()).await.unwrap();
        store.write(REFRESH_TOKEN_KEY, "ref-1".to_string()).await.unwrap();

        let rejected = server
            .mock("GET", format!("{DOCS}/users/uid-1").as_str())
            .match_query(Matcher::Any)
            .match_header("authorization", "Bearer old")
            .with_status(401)
            .with_body(r#"{"error": {"code": 401, "status": "UNAUTHENTICATED"}}"#)
            .create_async()
            .await;
        let refresh = server
            .mock("POST", "/v1/token")
            .match_query(Matcher::UrlEncoded("key".into(), "test-key".into()))
            .match_body(Matcher::Regex("grant_type=refresh_token".into()))
            .with_status(200)
            .with_body(r#"{"id_token": "new", "refresh_token": "ref-2"}"#)
            .create_async()
            .await;
        let accepted = server
            .mock("GET", format!("{DOCS}/users/uid-1").as_str())
            .match_query(Matcher::Any)
            .match_header("authorization", "Bearer new")
            .with_status(200)
            .with_body(json!({"fields": {"id": {"stringValue": "uid-1"}}}).to_string())
            .create_async()
            .await;

        let document = service(&server)
            .with_session_store(store.clone())
            .get_document("users", "uid-1")
            .await
            .unwrap();

        rejected.assert_async().await;
        refresh.assert_async().await;
        accepted.assert_async().await;
        assert_eq!(document, Some(json!({"id": "uid-1"})));
        assert_eq!(
            store.current(REFRESH_TOKEN_KEY).await.unwrap(),
            Some("ref-2".to_string())
        );
    }

    #[tokio::test]
    async fn unauthorized_without_refresh_token_is_reported() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", format!("{DOCS}/users/uid-1").as_str())
            .match_query(Matcher::Any)
            .with_status(401)
            .with_body(r#"{"error": {"code": 401, "message": "unauthenticated"}}"#)
            .create_async()
            .await;

        let err = service(&server)
            .get_document("users", "uid-1")
            .await
            .unwrap_err();

        assert_eq!(err, RemoteError::Auth("unauthenticated".to_string()));
    }
}
