//! Request gating: reads on public routes pass, everything else needs the
//! admin account's HTTP Basic credentials.

use argon2::{
  Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
  password_hash::{self, SaltString},
};
use axum::{
  extract::{Request, State},
  http::{HeaderMap, Method, header},
  middleware::Next,
  response::Response,
};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;
use brandex_core::RecordStore;
use rand_core::OsRng;

use crate::{AppState, ServerConfig, access::AccessPolicy, error::Error};

/// Hash `password` into the argon2 PHC string stored as
/// `admin_password_hash`.
pub fn hash_password(password: &str) -> Result<String, password_hash::Error> {
  let salt = SaltString::generate(&mut OsRng);
  Ok(Argon2::default().hash_password(password.as_bytes(), &salt)?.to_string())
}

/// A `user:password` pair from an `Authorization: Basic` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
  pub username: String,
  pub password: String,
}

impl Credentials {
  /// `None` when the header is absent or is not well-formed Basic auth.
  /// The scheme name is matched case-insensitively.
  pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
      return None;
    }

    let decoded = String::from_utf8(B64.decode(token.trim()).ok()?).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some(Self { username: username.to_owned(), password: password.to_owned() })
  }
}

/// The admin account.
#[derive(Clone)]
pub struct AuthConfig {
  pub username:      String,
  /// PHC string produced by argon2, e.g. `$argon2id$v=19$…`
  pub password_hash: String,
}

impl AuthConfig {
  /// Whether `creds` name this account with the right password. A hash that
  /// does not parse accepts nothing.
  pub fn accepts(&self, creds: &Credentials) -> bool {
    creds.username == self.username
      && PasswordHash::new(&self.password_hash).is_ok_and(|hash| {
        Argon2::default()
          .verify_password(creds.password.as_bytes(), &hash)
          .is_ok()
      })
  }
}

/// How a request got through the [`Gate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
  /// A safe method on a public route; credentials were not looked at.
  Public,
  /// Valid admin credentials.
  Admin,
}

/// The public-route policy together with the account that may do the rest.
pub struct Gate {
  pub policy: AccessPolicy,
  pub admin:  AuthConfig,
}

impl Gate {
  pub fn from_config(config: &ServerConfig) -> Self {
    Self {
      policy: AccessPolicy::new(&config.public_routes),
      admin:  AuthConfig {
        username:      config.admin_username.clone(),
        password_hash: config.admin_password_hash.clone(),
      },
    }
  }

  /// Decide whether a request may proceed.
  pub fn authorize(&self, method: &Method, path: &str, headers: &HeaderMap) -> Result<Access, Error> {
    if self.policy.is_public(method, path) {
      return Ok(Access::Public);
    }

    match Credentials::from_headers(headers) {
      Some(creds) if self.admin.accepts(&creds) => Ok(Access::Admin),
      Some(creds) => {
        tracing::debug!(user = %creds.username, %method, path, "rejected credentials");
        Err(Error::Unauthorized)
      }
      None => {
        tracing::debug!(%method, path, "protected route requested without credentials");
        Err(Error::Unauthorized)
      }
    }
  }
}

/// Middleware running every request through the state's [`Gate`].
pub async fn require_auth<S>(
  State(state): State<AppState<S>>,
  req: Request,
  next: Next,
) -> Result<Response, Error>
where
  S: RecordStore + Clone + 'static,
{
  let access = state
    .gate
    .authorize(req.method(), req.uri().path(), req.headers())?;
  tracing::trace!(?access, path = req.uri().path(), "request admitted");
  Ok(next.run(req).await)
}
