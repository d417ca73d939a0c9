//! Data structures for authentication-related entities.
//!
//! This module defines the role tags, the user profile with its branch
//! assignments, the session record, and the login request/response bodies
//! exchanged with the remote API.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use super::errors::AuthError;

/// A user's job function; the sole input to access decisions.
///
/// The set is closed, but a tag this build does not know is kept as
/// [`Role::Unknown`] instead of failing: such a user simply matches no policy.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    It,
    Gro,
    ManagerAccounting,
    StaffAccounting,
    Unknown(String),
}

impl Role {
    /// Every role this build knows, in declaration order.
    pub const KNOWN: [Role; 4] = [
        Role::It,
        Role::Gro,
        Role::ManagerAccounting,
        Role::StaffAccounting,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Role::It => "IT",
            Role::Gro => "GRO",
            Role::ManagerAccounting => "Manager Accounting",
            Role::StaffAccounting => "Staff Accounting",
            Role::Unknown(tag) => tag,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Role::Unknown(_))
    }
}

impl FromStr for Role {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "IT" => Role::It,
            "GRO" => Role::Gro,
            "Manager Accounting" => Role::ManagerAccounting,
            "Staff Accounting" => Role::StaffAccounting,
            other => Role::Unknown(other.to_string()),
        })
    }
}

impl From<String> for Role {
    fn from(tag: String) -> Self {
        match tag.parse() {
            Ok(role) => role,
            Err(never) => match never {},
        }
    }
}

impl From<&str> for Role {
    fn from(tag: &str) -> Self {
        Role::from(tag.to_string())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Unknown(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Set of roles allowed to see a route or menu entry.
///
/// Always present; an empty set admits nobody.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleSet(BTreeSet<Role>);

impl RoleSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn contains(&self, role: &Role) -> bool {
        self.0.contains(role)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Role> {
        self.0.iter()
    }
}

impl<R: Into<Role>> FromIterator<R> for RoleSet {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<const N: usize> From<[Role; N]> for RoleSet {
    fn from(roles: [Role; N]) -> Self {
        roles.into_iter().collect()
    }
}

/// A physical restaurant location assigned to a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Branch {
    pub code: String,
    pub name: String,
}

/// The logged-in user's profile as returned by the login endpoint.
///
/// `branch_codes` and `branch_names` are parallel: index `i` of one describes
/// the same branch as index `i` of the other. Both constructors enforce it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawProfile")]
pub struct Profile {
    name: String,
    role: Role,
    branch_codes: Vec<String>,
    branch_names: Vec<String>,
    #[serde(default)]
    photo_url: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProfile {
    name: String,
    role: Role,
    #[serde(default)]
    branch_codes: Vec<String>,
    #[serde(default)]
    branch_names: Vec<String>,
    #[serde(default)]
    photo_url: String,
}

impl TryFrom<RawProfile> for Profile {
    type Error = AuthError;

    fn try_from(raw: RawProfile) -> Result<Self, Self::Error> {
        Profile::new(
            raw.name,
            raw.role,
            raw.branch_codes,
            raw.branch_names,
            raw.photo_url,
        )
    }
}

impl Profile {
    pub fn new(
        name: impl Into<String>,
        role: Role,
        branch_codes: Vec<String>,
        branch_names: Vec<String>,
        photo_url: impl Into<String>,
    ) -> Result<Self, AuthError> {
        if branch_codes.len() != branch_names.len() {
            return Err(AuthError::BranchMismatch {
                codes: branch_codes.len(),
                names: branch_names.len(),
            });
        }
        Ok(Self {
            name: name.into(),
            role,
            branch_codes,
            branch_names,
            photo_url: photo_url.into(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> &Role {
        &self.role
    }

    pub fn branch_codes(&self) -> &[String] {
        &self.branch_codes
    }

    pub fn branch_names(&self) -> &[String] {
        &self.branch_names
    }

    pub fn photo_url(&self) -> &str {
        &self.photo_url
    }

    /// Branch assignments as `(code, name)` pairs, in stored order.
    pub fn branches(&self) -> impl Iterator<Item = Branch> + '_ {
        self.branch_codes
            .iter()
            .zip(&self.branch_names)
            .map(|(code, name)| Branch {
                code: code.clone(),
                name: name.clone(),
            })
    }
}

/// Who, if anyone, is logged in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    pub profile: Option<Profile>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn new(token: impl Into<String>, profile: Profile) -> Self {
        Self {
            token: Some(token.into()),
            profile: Some(profile),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn role(&self) -> Option<&Role> {
        self.profile.as_ref().map(Profile::role)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Body the remote API returns for accepted credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub profile: Profile,
}
