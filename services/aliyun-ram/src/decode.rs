use bytes::Bytes;
use http::Response;
use http::StatusCode;
use ramsign_core::{Error, Result, ServiceError};
use serde::de::DeserializeOwned;

/// Decode a response into `T`, or classify it as an error.
///
/// - 2xx: the body must deserialize into `T`, otherwise [`ErrorKind::Decode`](ramsign_core::ErrorKind::Decode).
/// - 500 and 503: [`ErrorKind::ServiceUnavailable`](ramsign_core::ErrorKind::ServiceUnavailable).
/// - others: [`ErrorKind::Service`](ramsign_core::ErrorKind::Service).
pub fn decode_response<T: DeserializeOwned>(resp: Response<Bytes>) -> Result<T> {
    let status = resp.status();
    let body = resp.into_body();

    if status.is_success() {
        return serde_json::from_slice(&body).map_err(|e| {
            Error::decode(format!("failed to decode {status} response body")).with_source(e)
        });
    }

    let err = parse_service_error(status, &body);
    if is_unavailable(status) {
        Err(Error::service_unavailable(err))
    } else {
        Err(Error::service(err))
    }
}

/// Parse an error body, falling back to the raw body as message.
///
/// The status of the response always wins over the `HttpStatus` in the body.
pub fn parse_service_error(status: StatusCode, body: &[u8]) -> ServiceError {
    let mut err = serde_json::from_slice::<ServiceError>(body).unwrap_or_else(|_| ServiceError {
        message: String::from_utf8_lossy(body).trim().to_string(),
        ..Default::default()
    });
    err.http_status = status.as_u16();
    err
}

fn is_unavailable(status: StatusCode) -> bool {
    status == StatusCode::INTERNAL_SERVER_ERROR || status == StatusCode::SERVICE_UNAVAILABLE
}
