//! JSON response decoding shared by the endpoint modules.

use serde::de::DeserializeOwned;

use crate::error::ClientError;

/// Decode a response body as JSON.
///
/// A non-success status becomes [`ClientError::Api`] carrying the body the
/// service sent (ChEMBL answers unknown resources and bad filters with a
/// plain-text or HTML page). A success body that is not the expected JSON
/// becomes [`ClientError::Parse`].
pub async fn decode_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
    let status = resp.status();
    let url = resp.url().to_string();
    let body = resp.text().await?;

    if !status.is_success() {
        return Err(ClientError::Api {
            status: status.as_u16(),
            message: body,
        });
    }

    serde_json::from_str(&body).map_err(|e| ClientError::Parse {
        url,
        message: e.to_string(),
    })
}
