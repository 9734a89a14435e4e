use log::debug;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use shared::{Player, UserSettings};
use thiserror::Error;
use url::Url;

/// Origin of the local monitoring service.
pub const DEFAULT_ORIGIN: &str = "http://localhost:8900/";

/// Any way a service call can fail. Non-2xx responses carry the server's
/// structured JSON error body, not just the status code.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("error communicating with the service: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid request path: {0}")]
    Url(#[from] url::ParseError),

    #[error("service returned {status}: {body}")]
    Api {
        status: StatusCode,
        body: serde_json::Value,
    },

    #[error("service returned {status} with a non-JSON body")]
    BadErrorBody {
        status: StatusCode,
        #[source]
        source: reqwest::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserNoteRequest {
    pub steam_id: u64,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkPlayerRequest {
    pub steam_id: u64,
    pub attrs: Vec<String>,
}

/// Typed request/response access to the monitoring service. Stateless beyond
/// the shared connection pool; cheap to clone.
#[derive(Debug, Clone)]
pub struct Transport {
    http: reqwest::Client,
    origin: Url,
}

impl Transport {
    pub fn new(origin: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            origin,
        }
    }

    /// Issues one JSON call against the service. The body is attached only
    /// for non-GET verbs and only when one is given.
    pub async fn call<Req, Resp>(
        &self,
        method: Method,
        path: &str,
        body: Option<&Req>,
    ) -> Result<Resp, TransportError>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let url = self.origin.join(path)?;

        let mut request = self
            .http
            .request(method.clone(), url)
            .header(CONTENT_TYPE, "application/json; charset=UTF-8");
        if method != Method::GET {
            if let Some(body) = body {
                request = request.json(body);
            }
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            // The server reports failures as JSON payloads; surface those,
            // and treat a non-JSON body as its own error condition.
            return Err(match response.json::<serde_json::Value>().await {
                Ok(body) => TransportError::Api { status, body },
                Err(source) => TransportError::BadErrorBody { status, source },
            });
        }

        Ok(response.json::<Resp>().await?)
    }

    /// Fetches the full player roster.
    pub async fn players(&self) -> Result<Vec<Player>, TransportError> {
        self.call::<(), Vec<Player>>(Method::GET, "players", None)
            .await
    }

    /// Writes the operator's note for one player.
    pub async fn save_user_note(
        &self,
        steam_id: u64,
        notes: &str,
    ) -> Result<(), TransportError> {
        let body = UserNoteRequest {
            steam_id,
            notes: notes.to_owned(),
        };
        self.call::<_, serde_json::Value>(Method::POST, "user-note", Some(&body))
            .await?;
        debug!("Note written for {steam_id}");
        Ok(())
    }

    /// Persists the operator settings wholesale.
    pub async fn save_settings(&self, settings: &UserSettings) -> Result<(), TransportError> {
        self.call::<_, serde_json::Value>(Method::PUT, "settings", Some(settings))
            .await?;
        Ok(())
    }

    /// Marks a player with the given attributes.
    pub async fn mark_player(
        &self,
        steam_id: u64,
        attrs: &[String],
    ) -> Result<(), TransportError> {
        let body = MarkPlayerRequest {
            steam_id,
            attrs: attrs.to_vec(),
        };
        self.call::<_, serde_json::Value>(Method::POST, "mark", Some(&body))
            .await?;
        Ok(())
    }
}
