//! Resolution of the calling user from request headers.

use axum::http::{HeaderMap, HeaderName, HeaderValue};
use axum_extra::headers::{Error as HeaderError, Header, HeaderMapExt};

use crate::ServerError;

pub static USER_ID_HEADER: HeaderName = HeaderName::from_static("userid");

/// The user a request acts on behalf of.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Identity {
    pub user_id: i64,
}

/// Maps request headers to an [`Identity`].
///
/// Handlers only ever see the resolved identity, so swapping the trusted
/// header for token verification touches nothing below the router.
pub trait IdentityProvider: Send + Sync {
    fn identify(&self, headers: &HeaderMap) -> Result<Identity, ServerError>;
}

/// Trusts the numeric `userid` header as-is. No authentication happens here.
#[derive(Clone, Copy, Debug, Default)]
pub struct TrustedHeader;

impl IdentityProvider for TrustedHeader {
    fn identify(&self, headers: &HeaderMap) -> Result<Identity, ServerError> {
        match headers.typed_try_get::<UserIdHeader>() {
            Ok(Some(UserIdHeader(user_id))) => Ok(Identity { user_id }),
            Ok(None) => Err(ServerError::Generic(
                "userid header is required".to_string(),
            )),
            Err(_) => Err(ServerError::Generic(
                "userid header must be a numeric user id".to_string(),
            )),
        }
    }
}

/// `TypedHeader` for the `userid` header
#[derive(Debug)]
struct UserIdHeader(i64);

impl Header for UserIdHeader {
    fn name() -> &'static HeaderName {
        &USER_ID_HEADER
    }

    fn decode<'i, I>(values: &mut I) -> Result<Self, HeaderError>
    where
        Self: Sized,
        I: Iterator<Item = &'i HeaderValue>,
    {
        let value = values.next().ok_or_else(HeaderError::invalid)?;
        let Ok(value) = value.to_str() else {
            return Err(HeaderError::invalid());
        };
        let Ok(value) = value.trim().parse() else {
            return Err(HeaderError::invalid());
        };

        Ok(UserIdHeader(value))
    }

    fn encode<E: Extend<HeaderValue>>(&self, values: &mut E) {
        let as_string = self.0.to_string();
        match HeaderValue::from_str(&as_string) {
            Ok(value) => values.extend(std::iter::once(value)),
            Err(_) => tracing::error!("failed to encode userid header"),
        }
    }
}
