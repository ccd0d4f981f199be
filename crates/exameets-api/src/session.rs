// Session endpoints
//
// Cookie-based login/register/logout plus the profile-update surface.
// A successful login sets the HTTP-only session cookie in the client's
// jar; subsequent requests carry it automatically.

use secrecy::{ExposeSecret, SecretString};
use serde_json::{Map, Value, json};
use tracing::debug;

use crate::client::{ApiClient, payload_message};
use crate::error::Error;
use crate::model::Record;
use crate::resource::MutationOutcome;

/// Credentials for a session login.
#[derive(Debug, Clone)]
pub struct LoginCredentials {
    pub email: String,
    pub password: SecretString,
}

/// Registration payload. Anything beyond the required fields (e.g.
/// `gender`, `dob`) rides in `extra` untouched.
#[derive(Debug, Clone)]
pub struct RegisterPayload {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: SecretString,
    pub extra: Map<String, Value>,
}

impl ApiClient {
    /// Authenticate with email/password. On success the session cookie is
    /// stored in the jar and the backend returns the user record.
    pub async fn login(&self, creds: &LoginCredentials) -> Result<(Record, Option<String>), Error> {
        debug!(email = %creds.email, "logging in");

        let body = json!({
            "email": creds.email,
            "password": creds.password.expose_secret(),
        });
        let value = self.post("user/login", &body).await?;

        let user = extract_user(&value).ok_or_else(missing_user)?;
        debug!("login successful");
        Ok((user, payload_message(&value)))
    }

    /// Register a new account. Same contract as [`login`](Self::login):
    /// the backend logs the new user in and returns the record.
    pub async fn register(
        &self,
        payload: &RegisterPayload,
    ) -> Result<(Record, Option<String>), Error> {
        debug!(email = %payload.email, "registering");

        let mut body = payload.extra.clone();
        body.insert("name".into(), Value::String(payload.name.clone()));
        body.insert("email".into(), Value::String(payload.email.clone()));
        body.insert("phone".into(), Value::String(payload.phone.clone()));
        body.insert(
            "password".into(),
            Value::String(payload.password.expose_secret().to_owned()),
        );
        let value = self.post("user/register", &Value::Object(body)).await?;

        let user = extract_user(&value).ok_or_else(missing_user)?;
        Ok((user, payload_message(&value)))
    }

    /// Fetch the current user via the session cookie.
    ///
    /// Returns `Ok(None)` when the backend answers successfully but with
    /// an empty/missing user payload; 401 surfaces as
    /// [`Error::Authentication`] and is the caller's cue for an
    /// anonymous session.
    pub async fn current_user(&self) -> Result<Option<Record>, Error> {
        let value = self.get("user/getuser", &[]).await?;
        Ok(extract_user(&value).filter(|u| !u.id.is_empty() || !u.fields.is_empty()))
    }

    /// End the current session. Returns the backend's message.
    pub async fn logout(&self) -> Result<Option<String>, Error> {
        debug!("logging out");
        let value = self.get("user/logout", &[]).await?;
        Ok(payload_message(&value))
    }

    /// Delete the account, confirmed by password.
    pub async fn delete_account(&self, password: &SecretString) -> Result<Option<String>, Error> {
        let body = json!({ "password": password.expose_secret() });
        let value = self.delete("user/delete", Some(&body)).await?;
        Ok(payload_message(&value))
    }

    /// Update profile fields. The backend returns the changed subset of
    /// the user record -- callers merge it, never replace.
    pub async fn update_profile(
        &self,
        payload: Map<String, Value>,
    ) -> Result<MutationOutcome, Error> {
        let value = self
            .put("user/update/profile", &Value::Object(payload))
            .await?;
        Ok(MutationOutcome {
            record: extract_user(&value),
            message: payload_message(&value),
        })
    }

    /// Change the account password.
    pub async fn update_password(
        &self,
        old_password: &SecretString,
        new_password: &SecretString,
    ) -> Result<Option<String>, Error> {
        let body = json!({
            "oldPassword": old_password.expose_secret(),
            "newPassword": new_password.expose_secret(),
        });
        let value = self.put("user/update/password", &body).await?;
        Ok(payload_message(&value))
    }

    /// Update notification/content preferences. Merge semantics, like
    /// [`update_profile`](Self::update_profile).
    pub async fn update_preferences(
        &self,
        payload: Map<String, Value>,
    ) -> Result<MutationOutcome, Error> {
        let value = self
            .put("preference/update", &Value::Object(payload))
            .await?;
        Ok(MutationOutcome {
            record: extract_user(&value),
            message: payload_message(&value),
        })
    }
}

fn extract_user(value: &Value) -> Option<Record> {
    let raw = value.get("user").or_else(|| value.get("data"))?;
    if raw.is_null() {
        return None;
    }
    serde_json::from_value(raw.clone()).ok()
}

fn missing_user() -> Error {
    Error::Deserialization {
        message: "response missing `user` payload".into(),
        body: String::new(),
    }
}
