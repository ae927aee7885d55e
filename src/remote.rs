/*!
Remote data access.

All knowledge of the backend's role-specific resource shapes lives here.
`Remote` is the single entry point; it selects one `RoleAdapter` per backend
schema (students have their own resource, teachers and administrators share
the generic user resource) and hands it the transport. Errors are propagated,
never retried: a non-success response surfaces the backend's structured
payload, anything else surfaces as a transport error.
*/
use std::sync::Arc;

use async_trait::async_trait;
use hyper::{Body, Method, Request, StatusCode, Uri, client::HttpConnector, header};
use serde_json::Value;
use thiserror::Error;

use crate::{
    config::Cfg,
    profile::{FormBuffer, PasswordForm, ProfileRecord},
    user::Role,
};

pub mod staff;
pub mod student;

use staff::StaffAdapter;
use student::StudentAdapter;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a structured backend response.
    #[error("transport error: {0}")]
    Transport(String),
    /// Non-success HTTP status; `payload` is the decoded response body,
    /// which is what the page gets to render from.
    #[error("backend error ({status}): {payload}")]
    Backend { status: StatusCode, payload: Value },
    /// A local check failed before any network traffic.
    #[error("{0}")]
    Validation(String),
}

/// The request/response plumbing underneath the adapters. Object-safe so
/// tests can substitute a recording stand-in.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, ApiError>;
}

/// JSON-over-HTTP transport against a configured API root.
///
/// No timeout policy beyond what the client defaults to, and no
/// cancellation; pending requests run to completion.
pub struct HttpTransport {
    client: hyper::Client<HttpConnector>,
    base: String,
}

impl HttpTransport {
    /// `base` is the API root, e.g. `http://localhost:8080/api`; endpoint
    /// paths get appended to it.
    pub fn new(base: &str) -> Self {
        let base = base.trim_end_matches('/').to_owned();
        Self { client: hyper::Client::new(), base }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, ApiError> {
        log::trace!("HttpTransport::request( {}, {:?} ) called.", &method, path);

        let uri: Uri = format!("{}{}", &self.base, path).parse()
            .map_err(|e| ApiError::Transport(format!(
                "Bad request URI {:?}: {}", path, e
            )))?;

        let builder = Request::builder().method(method).uri(uri);
        let req = match body {
            Some(v) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(v.to_string())),
            None => builder.body(Body::empty()),
        }.map_err(|e| ApiError::Transport(format!(
            "Unable to build request: {}", e
        )))?;

        let resp = self.client.request(req).await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = resp.status();
        let bytes = hyper::body::to_bytes(resp.into_body()).await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let payload: Value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .map_err(|e| ApiError::Transport(format!(
                    "Undecodable response body: {}", e
                )))?
        };

        if status.is_success() {
            log::trace!("    ...{} from backend.", &status);
            Ok(payload)
        } else {
            log::trace!("    ...{} from backend; propagating payload.", &status);
            Err(ApiError::Backend { status, payload })
        }
    }
}

/// The generic user endpoints sometimes wrap the record in a `data` field;
/// the student endpoints return it directly. Normalize to the bare record.
pub(crate) fn unwrap_envelope(v: Value) -> Value {
    if let Value::Object(ref map) = v {
        if let Some(inner) = map.get("data") {
            if inner.is_object() {
                return inner.clone();
            }
        }
    }

    v
}

/// Uniform capability set every backend schema exposes. One implementation
/// per schema; the page never sees which one it got.
#[async_trait]
pub trait RoleAdapter: Send + Sync {
    async fn fetch(
        &self,
        http: &dyn Transport,
        user_id: i64,
    ) -> Result<ProfileRecord, ApiError>;

    async fn update(
        &self,
        http: &dyn Transport,
        user_id: i64,
        form: &FormBuffer,
    ) -> Result<ProfileRecord, ApiError>;

    async fn change_password(
        &self,
        http: &dyn Transport,
        user_id: i64,
        form: &PasswordForm,
    ) -> Result<(), ApiError>;
}

/// Teachers and admins share the generic user resource; an unknown or
/// missing role falls back to it as well.
fn adapter_for(role: Option<Role>) -> &'static dyn RoleAdapter {
    match role {
        Some(Role::Student) => &StudentAdapter,
        Some(Role::Teacher) | Some(Role::Admin) | None => &StaffAdapter,
    }
}

/// Single point of role-aware translation between the page's form shapes
/// and the backend's resources.
pub struct Remote {
    transport: Arc<dyn Transport>,
}

impl Remote {
    pub fn new(cfg: &Cfg) -> Self {
        log::trace!("Remote::new( {:?} ) called.", &cfg.api_base);

        Self {
            transport: Arc::new(HttpTransport::new(&cfg.api_base)),
        }
    }

    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub async fn fetch_profile(
        &self,
        user_id: i64,
        role: Option<Role>,
    ) -> Result<ProfileRecord, ApiError> {
        log::trace!("Remote::fetch_profile( {}, {:?} ) called.", user_id, &role);

        adapter_for(role).fetch(&*self.transport, user_id).await
    }

    pub async fn update_profile(
        &self,
        user_id: i64,
        role: Option<Role>,
        form: &FormBuffer,
    ) -> Result<ProfileRecord, ApiError> {
        log::trace!("Remote::update_profile( {}, {:?} ) called.", user_id, &role);

        adapter_for(role).update(&*self.transport, user_id, form).await
    }

    pub async fn change_password(
        &self,
        user_id: i64,
        role: Option<Role>,
        form: &PasswordForm,
    ) -> Result<(), ApiError> {
        log::trace!("Remote::change_password( {}, {:?} ) called.", user_id, &role);

        adapter_for(role).change_password(&*self.transport, user_id, form).await
    }

    /// Plain pass-through. Accepts both a bare array of names and an array
    /// of role objects carrying a `name` field, wrapped or not.
    pub async fn fetch_user_roles(
        &self,
        user_id: i64,
    ) -> Result<Vec<String>, ApiError> {
        log::trace!("Remote::fetch_user_roles( {} ) called.", user_id);

        let body = self.transport.request(
            Method::GET,
            &format!("/users/{}/roles", user_id),
            None,
        ).await?;

        let items = match body {
            Value::Array(items) => items,
            Value::Object(mut map) => match map.remove("data") {
                Some(Value::Array(items)) => items,
                _ => {
                    return Err(ApiError::Transport(
                        "Unexpected shape of roles response.".to_owned()
                    ));
                },
            },
            _ => {
                return Err(ApiError::Transport(
                    "Unexpected shape of roles response.".to_owned()
                ));
            },
        };

        let names = items.into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                Value::Object(mut m) => match m.remove("name") {
                    Some(Value::String(s)) => Some(s),
                    _ => None,
                },
                _ => None,
            })
            .collect();

        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::tests::{ensure_logging, MockTransport};

    #[test]
    fn base_url_trailing_slash_trimmed() {
        ensure_logging();

        let t = HttpTransport::new("http://localhost:8080/api/");
        assert_eq!(&t.base, "http://localhost:8080/api");
    }

    #[test]
    fn envelope_unwrapping() {
        ensure_logging();

        let wrapped = json!({ "data": { "fullName": "Tran Thi B" } });
        assert_eq!(
            unwrap_envelope(wrapped),
            json!({ "fullName": "Tran Thi B" })
        );

        let bare = json!({ "fullName": "Tran Thi B" });
        assert_eq!(unwrap_envelope(bare.clone()), bare);

        // A scalar `data` field is somebody's actual profile field, not an
        // envelope.
        let scalar = json!({ "data": "x", "fullName": "Tran Thi B" });
        assert_eq!(unwrap_envelope(scalar.clone()), scalar);
    }

    #[tokio::test]
    async fn unknown_role_falls_back_to_generic_endpoint() {
        ensure_logging();

        let mock = Arc::new(MockTransport::new());
        mock.script(Ok(json!({ "fullName": "X Y", "email": "x@y.vn" })));
        let remote = Remote::with_transport(mock.clone());

        let rec = remote.fetch_profile(12, None).await.unwrap();
        assert!(matches!(rec, ProfileRecord::Staff(_)));

        let calls = mock.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, Method::GET);
        assert_eq!(&calls[0].1, "/users/12");
    }

    #[tokio::test]
    async fn roles_come_back_from_either_shape() {
        ensure_logging();

        let mock = Arc::new(MockTransport::new());
        mock.script(Ok(json!(["student", "teacher"])));
        mock.script(Ok(json!({ "data": [
            { "id": 1, "name": "admin" },
            { "id": 2, "name": "teacher" },
        ]})));
        let remote = Remote::with_transport(mock.clone());

        let names = remote.fetch_user_roles(5).await.unwrap();
        assert_eq!(names, vec!["student".to_owned(), "teacher".to_owned()]);

        let names = remote.fetch_user_roles(5).await.unwrap();
        assert_eq!(names, vec!["admin".to_owned(), "teacher".to_owned()]);

        let calls = mock.calls();
        assert_eq!(&calls[0].1, "/users/5/roles");
        assert_eq!(&calls[1].1, "/users/5/roles");
    }

    #[tokio::test]
    async fn backend_errors_propagate_untouched() {
        ensure_logging();

        let mock = Arc::new(MockTransport::new());
        mock.script(Err(ApiError::Backend {
            status: StatusCode::NOT_FOUND,
            payload: json!({ "message": "User không tồn tại." }),
        }));
        let remote = Remote::with_transport(mock.clone());

        match remote.fetch_profile(99, Some(Role::Teacher)).await {
            Err(ApiError::Backend { status, payload }) => {
                assert_eq!(status, StatusCode::NOT_FOUND);
                assert_eq!(payload["message"], "User không tồn tại.");
            },
            other => panic!("expected backend error, got {:?}", other),
        }
    }
}
