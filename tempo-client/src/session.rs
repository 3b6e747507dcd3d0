use async_trait::async_trait;
use thiserror::Error;

/// The signed-in user as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    /// Stable subject identifier (the provider's `sub` claim).
    pub subject: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
}

/// Failure to obtain a credential.
///
/// Kept apart from HTTP failures so the caller can surface "could not get
/// you signed in" separately from "the server rejected the request". Never
/// retried silently.
#[derive(Debug, Clone, Error)]
pub enum CredentialError {
    #[error("not authenticated")]
    NotAuthenticated,
    #[error("identity provider denied the requested scopes")]
    Denied,
    #[error("identity provider unreachable: {0}")]
    Unreachable(String),
}

/// Scopes requested with every token: read/write over the three backed
/// collections.
pub const SCOPES: &[&str] = &[
    "read:timeentries",
    "write:timeentries",
    "read:projects",
    "write:projects",
    "read:segmenttypes",
    "write:segmenttypes",
];

/// The identity collaborator.
///
/// Login and logout are redirect flows owned by the embedding application;
/// this seam only ever asks for a bearer token and the current profile,
/// which keeps the repository client constructible from an explicit
/// session object instead of ambient global state.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// An access token for the given audience and scopes.
    async fn access_token(&self, audience: &str, scopes: &[&str])
        -> Result<String, CredentialError>;

    /// The signed-in user, or `None` when unauthenticated.
    fn profile(&self) -> Option<UserProfile>;

    fn is_authenticated(&self) -> bool {
        self.profile().is_some()
    }
}

/// Token provider backed by fixed values.
///
/// Used by tests and by local tooling pointed at a backend with auth
/// disabled.
#[derive(Debug, Clone, Default)]
pub struct StaticTokenProvider {
    token: Option<String>,
    profile: Option<UserProfile>,
}

impl StaticTokenProvider {
    /// A provider that always returns `token`.
    pub fn returning(token: &str) -> Self {
        Self {
            token: Some(token.to_string()),
            profile: Some(UserProfile {
                subject: "local-user".to_string(),
                email: None,
                display_name: None,
            }),
        }
    }

    /// A provider that fails every acquisition, as a signed-out session
    /// would.
    pub fn unauthenticated() -> Self {
        Self::default()
    }

    pub fn with_profile(mut self, profile: UserProfile) -> Self {
        self.profile = Some(profile);
        self
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn access_token(
        &self,
        _audience: &str,
        _scopes: &[&str],
    ) -> Result<String, CredentialError> {
        self.token.clone().ok_or(CredentialError::NotAuthenticated)
    }

    fn profile(&self) -> Option<UserProfile> {
        self.profile.clone()
    }
}
