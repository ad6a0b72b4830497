//! Envelope shared by every JSON response.

use serde::{Deserialize, Serialize};

/// Outcome marker carried in the `status` field of every response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseStatus {
    #[serde(rename = "OK")]
    Ok,
    Error,
}
