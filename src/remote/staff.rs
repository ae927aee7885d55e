/*!
Adapter for the staff schema (teachers and administrators).

Both roles live in the generic user resource, which carries only the name,
email, phone, and username fields. Password changes go through the generic
reset endpoint, which takes the new password alone: the backend does not
verify the current password for staff. That asymmetry with the student path
is the backend's contract and is preserved here as-is.
*/
use async_trait::async_trait;
use hyper::Method;
use serde::Serialize;
use serde_json::Value;

use crate::profile::{FormBuffer, PasswordForm, ProfileRecord, StaffProfile};

use super::{unwrap_envelope, ApiError, RoleAdapter, Transport};

/// Exactly the fields the generic user resource accepts on update. The
/// student-only fields are never sent; the backend has no columns for them.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StaffUpdate<'a> {
    full_name: String,
    email: &'a str,
    phone: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordReset<'a> {
    new_password: &'a str,
}

pub struct StaffAdapter;

fn decode(body: Value) -> Result<ProfileRecord, ApiError> {
    let rec: StaffProfile = serde_json::from_value(unwrap_envelope(body))
        .map_err(|e| ApiError::Transport(format!(
            "Undecodable user record: {}", e
        )))?;

    Ok(ProfileRecord::Staff(rec))
}

fn encode<S: Serialize>(payload: &S) -> Result<Value, ApiError> {
    serde_json::to_value(payload)
        .map_err(|e| ApiError::Transport(format!(
            "Unencodable request payload: {}", e
        )))
}

#[async_trait]
impl RoleAdapter for StaffAdapter {
    async fn fetch(
        &self,
        http: &dyn Transport,
        user_id: i64,
    ) -> Result<ProfileRecord, ApiError> {
        log::trace!("StaffAdapter::fetch( {} ) called.", user_id);

        let body = http.request(
            Method::GET,
            &format!("/users/{}", user_id),
            None,
        ).await?;

        decode(body)
    }

    async fn update(
        &self,
        http: &dyn Transport,
        user_id: i64,
        form: &FormBuffer,
    ) -> Result<ProfileRecord, ApiError> {
        log::trace!("StaffAdapter::update( {} ) called.", user_id);

        let payload = encode(&StaffUpdate {
            full_name: form.full_name(),
            email: &form.email,
            phone: &form.phone,
        })?;

        let body = http.request(
            Method::PUT,
            &format!("/users/{}", user_id),
            Some(payload),
        ).await?;

        decode(body)
    }

    async fn change_password(
        &self,
        http: &dyn Transport,
        user_id: i64,
        form: &PasswordForm,
    ) -> Result<(), ApiError> {
        log::trace!("StaffAdapter::change_password( {} ) called.", user_id);

        let payload = encode(&PasswordReset {
            new_password: &form.new_password,
        })?;

        http.request(
            Method::PUT,
            &format!("/users/{}/reset-password", user_id),
            Some(payload),
        ).await?;

        Ok(())
    }
}
