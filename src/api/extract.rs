//! Purpose: axum extractor that runs the strict decoder over a request body.
//! Exports: `StrictJson`.
//! Role: Adapter between axum requests and `core::decode`; pulls `Config` from router state.
//! Invariants: The body is collected through a length limit equal to the decode ceiling.
//! Invariants: Rejections are the crate `Error`, rendered as the error envelope.
//! Notes: Rejections are logged at debug; the decoder itself stays silent.

use crate::core::config::Config;
use crate::core::decode::decode;
use crate::core::error::{Error, ErrorKind};
use axum::async_trait;
use axum::extract::{FromRef, FromRequest, Request};
use http_body_util::{BodyExt, LengthLimitError, Limited};
use serde::de::DeserializeOwned;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct StrictJson<T>(pub T);

impl<T> StrictJson<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

#[async_trait]
impl<T, S> FromRequest<S> for StrictJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
    Config: FromRef<S>,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let config = Config::from_ref(state);
        let limit = config.json_limit();
        let collected = Limited::new(req.into_body(), limit)
            .collect()
            .await
            .map_err(|err| {
                if err.downcast_ref::<LengthLimitError>().is_some() {
                    Error::size_exceeded(limit)
                } else {
                    Error::new(ErrorKind::Other).with_message(err.to_string())
                }
            });
        let body = match collected {
            Ok(collected) => collected.to_bytes(),
            Err(err) => {
                tracing::debug!(kind = ?err.kind(), "rejected request body: {err}");
                return Err(err);
            }
        };
        decode::<T, _>(&config, body.as_ref())
            .map(StrictJson)
            .inspect_err(|err| tracing::debug!(kind = ?err.kind(), "rejected json body: {err}"))
    }
}
