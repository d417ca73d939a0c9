//! Core business logic for the authentication system.
//!
//! This service owns the session store (token + profile persisted in the
//! console's key/value storage), the login backend abstraction, and the
//! login/logout flow that ties the two together.

use adapters::KeyValueStore;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use super::errors::AuthError;
use super::models::{LoginRequest, LoginResponse, Profile, Session};

/// Storage key holding the opaque bearer token.
pub const TOKEN_KEY: &str = "token";
/// Storage key holding the versioned profile envelope.
pub const PROFILE_KEY: &str = "profile";
/// Version written into new profile envelopes.
pub const PROFILE_VERSION: u32 = 1;

#[derive(Serialize)]
struct ProfileEnvelope<'a> {
    version: u32,
    profile: &'a Profile,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredProfile {
    Versioned { version: u32, profile: Profile },
    // written before the envelope existed
    Legacy(Profile),
}

/// Single source of truth for who is logged in.
///
/// Wraps whatever [`KeyValueStore`] the console was started with; cloning is
/// cheap and every clone sees the same storage.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    /// Persists a freshly confirmed login.
    pub fn set(&self, token: &str, profile: &Profile) -> Result<(), AuthError> {
        if token.is_empty() {
            return Err(AuthError::EmptyToken);
        }
        let envelope = ProfileEnvelope {
            version: PROFILE_VERSION,
            profile,
        };
        let encoded = serde_json::to_string(&envelope)
            .map_err(|e| AuthError::MalformedResponse(e.to_string()))?;

        // Profile before token, so a fresh login never exposes a token without
        // its profile. Overwriting an existing session is not atomic: until the
        // token write lands a reader can pair the old token with the new profile.
        self.storage.set(PROFILE_KEY, &encoded)?;
        self.storage.set(TOKEN_KEY, token)?;
        tracing::info!(user = %profile.name(), role = %profile.role(), "session stored");
        Ok(())
    }

    /// Reads the current session. No network access.
    pub fn get(&self) -> Result<Session, AuthError> {
        let token = self.storage.get(TOKEN_KEY)?.filter(|t| !t.is_empty());
        let profile = match self.storage.get(PROFILE_KEY)? {
            Some(raw) => decode_profile(&raw),
            None => None,
        };
        Ok(Session { token, profile })
    }

    /// Forgets the session.
    pub fn clear(&self) -> Result<(), AuthError> {
        self.storage.remove(TOKEN_KEY)?;
        self.storage.remove(PROFILE_KEY)?;
        tracing::info!("session cleared");
        Ok(())
    }
}

fn decode_profile(raw: &str) -> Option<Profile> {
    match serde_json::from_str::<StoredProfile>(raw) {
        Ok(StoredProfile::Versioned { version, profile }) if version <= PROFILE_VERSION => {
            Some(profile)
        }
        Ok(StoredProfile::Versioned { version, .. }) => {
            tracing::warn!(
                version,
                supported = PROFILE_VERSION,
                "stored profile was written by a newer build, ignoring it"
            );
            None
        }
        Ok(StoredProfile::Legacy(profile)) => Some(profile),
        Err(err) => {
            tracing::warn!(error = %err, "stored profile is unreadable, ignoring it");
            None
        }
    }
}

/// Confirms credentials against the system of record.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, request: &LoginRequest) -> Result<LoginResponse, AuthError>;
}

/// Login backend that posts credentials to the remote REST API.
#[derive(Debug, Clone)]
pub struct RemoteAuthenticator {
    http: reqwest::Client,
    login_url: String,
}

impl RemoteAuthenticator {
    pub fn new(login_url: impl Into<String>, timeout: Duration) -> Result<Self, AuthError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            login_url: login_url.into(),
        })
    }

    pub fn login_url(&self) -> &str {
        &self.login_url
    }
}

#[async_trait]
impl Authenticator for RemoteAuthenticator {
    async fn authenticate(&self, request: &LoginRequest) -> Result<LoginResponse, AuthError> {
        let response = self.http.post(&self.login_url).json(request).send().await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(AuthError::InvalidCredentials);
        }
        if !status.is_success() {
            return Err(AuthError::Backend(format!("login returned {status}")));
        }

        let body: LoginResponse = response.json().await?;
        if body.token.is_empty() {
            return Err(AuthError::EmptyToken);
        }
        Ok(body)
    }
}

/// Runs the login flow: confirm credentials, then persist the session.
pub async fn login(
    authenticator: &dyn Authenticator,
    sessions: &SessionStore,
    request: &LoginRequest,
) -> Result<Profile, AuthError> {
    let LoginResponse { token, profile } = match authenticator.authenticate(request).await {
        Ok(response) => response,
        Err(err) => {
            tracing::warn!(username = %request.username, error = %err, "login rejected");
            return Err(err);
        }
    };
    sessions.set(&token, &profile)?;
    Ok(profile)
}

pub fn logout(sessions: &SessionStore) -> Result<(), AuthError> {
    sessions.clear()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::models::Role;
    use adapters::MemoryStore;

    fn store() -> (Arc<MemoryStore>, SessionStore) {
        let backing = Arc::new(MemoryStore::new());
        let sessions = SessionStore::new(backing.clone());
        (backing, sessions)
    }

    fn profile(role: Role) -> Profile {
        Profile::new(
            "Ana",
            role,
            vec!["JKT".to_string()],
            vec!["Jakarta".to_string()],
            "",
        )
        .expect("profile")
    }

    struct FixedAuthenticator {
        accept: bool,
    }

    #[async_trait]
    impl Authenticator for FixedAuthenticator {
        async fn authenticate(&self, request: &LoginRequest) -> Result<LoginResponse, AuthError> {
            if self.accept && request.password == "secret" {
                Ok(LoginResponse {
                    token: "tok-1".to_string(),
                    profile: profile(Role::Gro),
                })
            } else {
                Err(AuthError::InvalidCredentials)
            }
        }
    }

    #[test]
    fn empty_store_is_anonymous() {
        let (_, sessions) = store();
        assert_eq!(sessions.get().expect("get"), Session::anonymous());
    }

    #[test]
    fn set_then_get_returns_both_fields() {
        let (_, sessions) = store();
        let p = profile(Role::It);
        sessions.set("tok", &p).expect("set");

        let session = sessions.get().expect("get");
        assert_eq!(session.token.as_deref(), Some("tok"));
        assert_eq!(session.profile, Some(p));
    }

    #[test]
    fn clear_then_get_is_anonymous() {
        let (backing, sessions) = store();
        sessions.set("tok", &profile(Role::It)).expect("set");
        sessions.clear().expect("clear");

        let session = sessions.get().expect("get");
        assert!(session.token.is_none());
        assert!(session.profile.is_none());
        assert!(backing.is_empty());
    }

    #[test]
    fn second_login_replaces_previous_session() {
        let (_, sessions) = store();
        sessions.set("tok-it", &profile(Role::It)).expect("set");
        sessions.set("tok-gro", &profile(Role::Gro)).expect("set");

        let session = sessions.get().expect("get");
        assert_eq!(session.token.as_deref(), Some("tok-gro"));
        assert_eq!(session.role(), Some(&Role::Gro));
    }

    #[test]
    fn empty_token_is_rejected() {
        let (backing, sessions) = store();
        let err = sessions.set("", &profile(Role::It)).expect_err("empty");
        assert!(matches!(err, AuthError::EmptyToken));
        assert!(backing.is_empty());
    }

    #[test]
    fn profile_is_stored_in_versioned_envelope() {
        let (backing, sessions) = store();
        sessions.set("tok", &profile(Role::It)).expect("set");

        let raw = backing.get(PROFILE_KEY).expect("get").expect("present");
        let value: serde_json::Value = serde_json::from_str(&raw).expect("json");
        assert_eq!(value["version"], PROFILE_VERSION);
        assert_eq!(value["profile"]["role"], "IT");
    }

    #[test]
    fn legacy_profile_without_envelope_is_read() {
        let (backing, sessions) = store();
        backing.set(TOKEN_KEY, "tok").expect("set");
        backing
            .set(
                PROFILE_KEY,
                r#"{"name":"Ana","role":"GRO","branchCodes":["JKT"],"branchNames":["Jakarta"],"photoUrl":""}"#,
            )
            .expect("set");

        let session = sessions.get().expect("get");
        assert_eq!(session.role(), Some(&Role::Gro));
    }

    #[test]
    fn unreadable_profile_reads_as_absent() {
        let (backing, sessions) = store();
        backing.set(TOKEN_KEY, "tok").expect("set");
        backing.set(PROFILE_KEY, "{broken").expect("set");

        let session = sessions.get().expect("get");
        assert!(session.is_authenticated());
        assert!(session.profile.is_none());
    }

    #[test]
    fn newer_profile_version_reads_as_absent() {
        let (backing, sessions) = store();
        backing.set(TOKEN_KEY, "tok").expect("set");
        backing
            .set(
                PROFILE_KEY,
                r#"{"version":7,"profile":{"name":"Ana","role":"IT","branchCodes":[],"branchNames":[]}}"#,
            )
            .expect("set");

        assert!(sessions.get().expect("get").profile.is_none());
    }

    #[tokio::test]
    async fn login_stores_session() {
        let (_, sessions) = store();
        let auth = FixedAuthenticator { accept: true };
        let request = LoginRequest {
            username: "ana".to_string(),
            password: "secret".to_string(),
        };

        let p = login(&auth, &sessions, &request).await.expect("login");
        assert_eq!(p.role(), &Role::Gro);
        assert_eq!(sessions.get().expect("get").token.as_deref(), Some("tok-1"));
    }

    #[tokio::test]
    async fn rejected_login_leaves_store_untouched() {
        let (backing, sessions) = store();
        let auth = FixedAuthenticator { accept: false };
        let request = LoginRequest {
            username: "ana".to_string(),
            password: "wrong".to_string(),
        };

        let err = login(&auth, &sessions, &request).await.expect_err("rejected");
        assert!(matches!(err, AuthError::InvalidCredentials));
        assert!(backing.is_empty());
    }

    #[test]
    fn logout_clears_session() {
        let (_, sessions) = store();
        sessions.set("tok", &profile(Role::It)).expect("set");
        logout(&sessions).expect("logout");
        assert!(!sessions.get().expect("get").is_authenticated());
    }
}
