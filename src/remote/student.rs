/*!
Adapter for the student schema.

Students have their own backend resource carrying the full set of personal
fields, and their password changes go through a student-specific endpoint
that verifies the current password.
*/
use async_trait::async_trait;
use hyper::Method;
use serde::Serialize;
use serde_json::Value;

use crate::profile::{FormBuffer, PasswordForm, ProfileRecord, StudentProfile};

use super::{unwrap_envelope, ApiError, RoleAdapter, Transport};

/// Exactly the fields the student resource accepts on update; nothing else
/// is ever sent.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StudentUpdate<'a> {
    full_name: String,
    email: &'a str,
    phone: &'a str,
    gender: &'a str,
    dob: &'a str,
    address: &'a str,
    class_name: &'a str,
    major: &'a str,
    course_year: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StudentPasswordChange<'a> {
    current_password: &'a str,
    new_password: &'a str,
}

pub struct StudentAdapter;

fn decode(body: Value) -> Result<ProfileRecord, ApiError> {
    let rec: StudentProfile = serde_json::from_value(unwrap_envelope(body))
        .map_err(|e| ApiError::Transport(format!(
            "Undecodable student profile: {}", e
        )))?;

    Ok(ProfileRecord::Student(rec))
}

fn encode<S: Serialize>(payload: &S) -> Result<Value, ApiError> {
    serde_json::to_value(payload)
        .map_err(|e| ApiError::Transport(format!(
            "Unencodable request payload: {}", e
        )))
}

#[async_trait]
impl RoleAdapter for StudentAdapter {
    async fn fetch(
        &self,
        http: &dyn Transport,
        user_id: i64,
    ) -> Result<ProfileRecord, ApiError> {
        log::trace!("StudentAdapter::fetch( {} ) called.", user_id);

        let body = http.request(
            Method::GET,
            &format!("/student/profile/{}", user_id),
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
        log::trace!("StudentAdapter::update( {} ) called.", user_id);

        let payload = encode(&StudentUpdate {
            full_name: form.full_name(),
            email: &form.email,
            phone: &form.phone,
            gender: &form.gender,
            dob: &form.dob,
            address: &form.address,
            class_name: &form.class_name,
            major: &form.major,
            course_year: &form.course_year,
        })?;

        let body = http.request(
            Method::PUT,
            &format!("/student/profile/{}", user_id),
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
        log::trace!("StudentAdapter::change_password( {} ) called.", user_id);

        let payload = encode(&StudentPasswordChange {
            current_password: &form.current_password,
            new_password: &form.new_password,
        })?;

        http.request(
            Method::POST,
            &format!("/student/change-password/{}", user_id),
            Some(payload),
        ).await?;

        Ok(())
    }
}
