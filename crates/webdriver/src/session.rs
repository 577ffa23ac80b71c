//! W3C WebDriver session client
//!
//! Speaks the wire protocol (JSON over HTTP) directly against a running
//! driver endpoint. Every response arrives wrapped in a `{"value": ...}`
//! envelope; error bodies carry `{"error", "message"}` inside the envelope.

use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use tokio::time::sleep;
use tracing::{debug, info, trace, warn};

use crate::capabilities::Capabilities;
use crate::error::{WebDriverError, WebDriverResult};
use crate::locator::By;

/// Polling interval for explicit waits
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Driver-side timeouts applied at session start
#[derive(Debug, Clone, Copy)]
pub struct Timeouts {
    /// Implicit element-location wait; also the window for explicit waits
    pub implicit: Duration,
    /// Navigation deadline
    pub page_load: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            implicit: Duration::from_secs(10),
            page_load: Duration::from_secs(30),
        }
    }
}

/// An active browser session
pub struct Session {
    wire: Wire,
    session_id: String,
    wait: Duration,
}

impl Session {
    /// Create a session against a running WebDriver endpoint and apply the
    /// configured timeouts
    pub async fn start(
        endpoint: &str,
        caps: &Capabilities,
        timeouts: Timeouts,
    ) -> WebDriverResult<Self> {
        let endpoint = endpoint.trim_end_matches('/');
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()?;

        let resp = http
            .post(format!("{}/session", endpoint))
            .json(&caps.to_wire())
            .send()
            .await
            .map_err(|e| WebDriverError::SessionCreate(format!("{}: {}", endpoint, e)))?;
        let created: NewSession = decode(resp).await?;

        let session = Self {
            wire: Wire {
                http,
                session_url: format!("{}/session/{}", endpoint, created.session_id),
            },
            session_id: created.session_id,
            wait: timeouts.implicit,
        };

        session
            .wire
            .post_void(
                "/timeouts",
                json!({
                    "implicit": timeouts.implicit.as_millis() as u64,
                    "pageLoad": timeouts.page_load.as_millis() as u64,
                }),
            )
            .await?;

        debug!("Session {} started against {}", session.session_id, endpoint);
        Ok(session)
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Navigate and block until the document loads (or the page-load timeout)
    pub async fn navigate(&self, url: &str) -> WebDriverResult<()> {
        debug!("navigate {}", url);
        self.wire.post_void("/url", json!({ "url": url })).await
    }

    pub async fn current_url(&self) -> WebDriverResult<String> {
        self.wire.get("/url").await
    }

    pub async fn title(&self) -> WebDriverResult<String> {
        self.wire.get("/title").await
    }

    /// History back, as a user pressing the back button
    pub async fn back(&self) -> WebDriverResult<()> {
        self.wire.post_void("/back", json!({})).await
    }

    /// Find a single element; `NoSuchElement` when nothing matches
    pub async fn find_element(&self, by: &By) -> WebDriverResult<Element> {
        let (using, value) = by.strategy();
        let found: ElementRef = self
            .wire
            .post("/element", json!({ "using": using, "value": value }))
            .await?;
        Ok(Element {
            wire: self.wire.clone(),
            id: found.id,
        })
    }

    /// Find all matching elements; empty when nothing matches
    pub async fn find_elements(&self, by: &By) -> WebDriverResult<Vec<Element>> {
        let (using, value) = by.strategy();
        let found: Vec<ElementRef> = self
            .wire
            .post("/elements", json!({ "using": using, "value": value }))
            .await?;
        Ok(found
            .into_iter()
            .map(|r| Element {
                wire: self.wire.clone(),
                id: r.id,
            })
            .collect())
    }

    /// Poll until the element is present in the DOM
    pub async fn wait_for_element(&self, by: &By) -> WebDriverResult<Element> {
        let deadline = Instant::now() + self.wait;
        loop {
            match self.find_element(by).await {
                Ok(element) => return Ok(element),
                Err(WebDriverError::NoSuchElement(_)) => {
                    if Instant::now() >= deadline {
                        return Err(WebDriverError::Timeout(by.to_string()));
                    }
                }
                Err(e) => return Err(e),
            }
            sleep(POLL_INTERVAL).await;
        }
    }

    /// Poll until the element is present and displayed
    pub async fn wait_for_visible(&self, by: &By) -> WebDriverResult<Element> {
        let deadline = Instant::now() + self.wait;
        loop {
            match self.find_element(by).await {
                Ok(element) => {
                    if element.is_displayed().await? {
                        return Ok(element);
                    }
                }
                Err(WebDriverError::NoSuchElement(_)) => {}
                Err(e) => return Err(e),
            }
            if Instant::now() >= deadline {
                return Err(WebDriverError::Timeout(by.to_string()));
            }
            sleep(POLL_INTERVAL).await;
        }
    }

    /// Poll until at least one matching element is present, then return all
    pub async fn wait_for_elements(&self, by: &By) -> WebDriverResult<Vec<Element>> {
        let deadline = Instant::now() + self.wait;
        loop {
            let found = self.find_elements(by).await?;
            if !found.is_empty() {
                return Ok(found);
            }
            if Instant::now() >= deadline {
                return Err(WebDriverError::Timeout(by.to_string()));
            }
            sleep(POLL_INTERVAL).await;
        }
    }

    /// Full-page screenshot as PNG bytes
    pub async fn screenshot_png(&self) -> WebDriverResult<Vec<u8>> {
        use base64::{engine::general_purpose, Engine as _};

        let payload: String = self.wire.get("/screenshot").await?;
        general_purpose::STANDARD
            .decode(payload.trim())
            .map_err(|e| WebDriverError::InvalidResponse(format!("screenshot payload: {}", e)))
    }

    /// End the session
    pub async fn quit(self) -> WebDriverResult<()> {
        debug!("Session {} quitting", self.session_id);
        self.wire.delete().await
    }
}

/// Handle to a located element
pub struct Element {
    wire: Wire,
    id: String,
}

impl Element {
    fn path(&self, tail: &str) -> String {
        format!("/element/{}{}", self.id, tail)
    }

    /// Rendered text content
    pub async fn text(&self) -> WebDriverResult<String> {
        self.wire.get(&self.path("/text")).await
    }

    /// HTML attribute as written in the document, `None` when absent
    pub async fn attribute(&self, name: &str) -> WebDriverResult<Option<String>> {
        self.wire
            .get(&self.path(&format!("/attribute/{}", name)))
            .await
    }

    /// Live DOM property. Unlike the attribute this reflects user input,
    /// which is what the filled-input round-trip check needs.
    pub async fn property(&self, name: &str) -> WebDriverResult<Option<String>> {
        let value: serde_json::Value = self
            .wire
            .get(&self.path(&format!("/property/{}", name)))
            .await?;
        Ok(match value {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(s),
            other => Some(other.to_string()),
        })
    }

    pub async fn is_displayed(&self) -> WebDriverResult<bool> {
        self.wire.get(&self.path("/displayed")).await
    }

    pub async fn click(&self) -> WebDriverResult<()> {
        self.wire.post_void(&self.path("/click"), json!({})).await
    }

    pub async fn clear(&self) -> WebDriverResult<()> {
        self.wire.post_void(&self.path("/clear"), json!({})).await
    }

    pub async fn send_keys(&self, text: &str) -> WebDriverResult<()> {
        self.wire
            .post_void(&self.path("/value"), json!({ "text": text }))
            .await
    }

    /// Find a single descendant element
    pub async fn find_element(&self, by: &By) -> WebDriverResult<Element> {
        let (using, value) = by.strategy();
        let found: ElementRef = self
            .wire
            .post(
                &self.path("/element"),
                json!({ "using": using, "value": value }),
            )
            .await?;
        Ok(Element {
            wire: self.wire.clone(),
            id: found.id,
        })
    }

    /// Find all matching descendant elements
    pub async fn find_elements(&self, by: &By) -> WebDriverResult<Vec<Element>> {
        let (using, value) = by.strategy();
        let found: Vec<ElementRef> = self
            .wire
            .post(
                &self.path("/elements"),
                json!({ "using": using, "value": value }),
            )
            .await?;
        Ok(found
            .into_iter()
            .map(|r| Element {
                wire: self.wire.clone(),
                id: r.id,
            })
            .collect())
    }
}

/// Shared HTTP plumbing for session- and element-scoped commands
#[derive(Clone)]
struct Wire {
    http: reqwest::Client,
    session_url: String,
}

impl Wire {
    async fn get<R: DeserializeOwned>(&self, path: &str) -> WebDriverResult<R> {
        trace!("GET {}", path);
        let resp = self
            .http
            .get(format!("{}{}", self.session_url, path))
            .send()
            .await?;
        decode(resp).await
    }

    async fn post<R: DeserializeOwned>(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> WebDriverResult<R> {
        trace!("POST {} {}", path, body);
        let resp = self
            .http
            .post(format!("{}{}", self.session_url, path))
            .json(&body)
            .send()
            .await?;
        decode(resp).await
    }

    async fn post_void(&self, path: &str, body: serde_json::Value) -> WebDriverResult<()> {
        let _: serde_json::Value = self.post(path, body).await?;
        Ok(())
    }

    async fn delete(&self) -> WebDriverResult<()> {
        trace!("DELETE {}", self.session_url);
        let resp = self.http.delete(&self.session_url).send().await?;
        let _: serde_json::Value = decode(resp).await?;
        Ok(())
    }
}

/// Unwrap a wire response, mapping error envelopes to typed errors
async fn decode<R: DeserializeOwned>(resp: reqwest::Response) -> WebDriverResult<R> {
    let status = resp.status();
    let body: serde_json::Value = resp
        .json()
        .await
        .map_err(|e| WebDriverError::InvalidResponse(format!("unreadable body: {}", e)))?;

    if !status.is_success() {
        if let Ok(envelope) = serde_json::from_value::<Envelope<WireError>>(body.clone()) {
            return Err(envelope.value.into());
        }
        return Err(WebDriverError::InvalidResponse(format!(
            "HTTP {}: {}",
            status, body
        )));
    }

    let envelope: Envelope<R> =
        serde_json::from_value(body).map_err(|e| WebDriverError::InvalidResponse(e.to_string()))?;
    Ok(envelope.value)
}

// Wire protocol types
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    value: T,
}

#[derive(Debug, Deserialize)]
struct WireError {
    error: String,
    message: String,
}

impl From<WireError> for WebDriverError {
    fn from(e: WireError) -> Self {
        if e.error == "no such element" {
            WebDriverError::NoSuchElement(e.message)
        } else {
            WebDriverError::Wire {
                error: e.error,
                message: e.message,
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct NewSession {
    #[serde(rename = "sessionId")]
    session_id: String,
}

#[derive(Debug, Deserialize)]
struct ElementRef {
    #[serde(rename = "element-6066-11e4-a52e-4f735466cecf")]
    id: String,
}

/// Endpoint readiness from `GET /status`
#[derive(Debug, Deserialize)]
pub struct DriverStatus {
    pub ready: bool,
    #[serde(default)]
    pub message: String,
}

/// Poll a WebDriver endpoint until its status reports ready
pub async fn wait_for_ready(endpoint: &str, timeout: Duration) -> WebDriverResult<()> {
    let url = format!("{}/status", endpoint.trim_end_matches('/'));
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(2))
        .build()?;

    let start = Instant::now();
    let mut attempts = 0;

    while start.elapsed() < timeout {
        attempts += 1;

        match http.get(&url).send().await {
            Ok(resp) if resp.status().is_success() => {
                match resp.json::<Envelope<DriverStatus>>().await {
                    Ok(body) if body.value.ready => return Ok(()),
                    Ok(body) => trace!("Driver not ready: {}", body.value.message),
                    Err(e) => warn!("Malformed status response: {}", e),
                }
            }
            Ok(resp) => {
                warn!("Status check returned {}", resp.status());
            }
            Err(e) => {
                if attempts == 1 {
                    info!("Waiting for WebDriver to start...");
                }
                // Connection refused is expected while the driver is starting
                if !e.is_connect() {
                    warn!("Status check error: {}", e);
                }
            }
        }

        sleep(Duration::from_millis(100)).await;
    }

    Err(WebDriverError::DriverNotReady(attempts))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_parsing() {
        let json = r#"{"value": {"sessionId": "f00d", "capabilities": {"browserName": "chrome"}}}"#;
        let envelope: Envelope<NewSession> = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.value.session_id, "f00d");
    }

    #[test]
    fn test_element_ref_parsing() {
        let json = r#"{"value": {"element-6066-11e4-a52e-4f735466cecf": "a1b2"}}"#;
        let envelope: Envelope<ElementRef> = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.value.id, "a1b2");
    }

    #[test]
    fn test_element_list_parsing() {
        let json = r#"{"value": [
            {"element-6066-11e4-a52e-4f735466cecf": "one"},
            {"element-6066-11e4-a52e-4f735466cecf": "two"}
        ]}"#;
        let envelope: Envelope<Vec<ElementRef>> = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.value.len(), 2);
        assert_eq!(envelope.value[1].id, "two");
    }

    #[test]
    fn test_no_such_element_classification() {
        let json =
            r#"{"value": {"error": "no such element", "message": "Unable to locate element"}}"#;
        let envelope: Envelope<WireError> = serde_json::from_str(json).unwrap();
        assert!(matches!(
            WebDriverError::from(envelope.value),
            WebDriverError::NoSuchElement(_)
        ));
    }

    #[test]
    fn test_other_wire_errors_pass_through() {
        let json = r#"{"value": {"error": "stale element reference", "message": "gone"}}"#;
        let envelope: Envelope<WireError> = serde_json::from_str(json).unwrap();
        match WebDriverError::from(envelope.value) {
            WebDriverError::Wire { error, message } => {
                assert_eq!(error, "stale element reference");
                assert_eq!(message, "gone");
            }
            other => panic!("unexpected variant: {:?}", other),
        }
    }

    #[test]
    fn test_status_parsing() {
        let json =
            r#"{"value": {"ready": true, "message": "ChromeDriver ready for new sessions."}}"#;
        let envelope: Envelope<DriverStatus> = serde_json::from_str(json).unwrap();
        assert!(envelope.value.ready);
    }

    #[test]
    fn test_null_attribute_parsing() {
        let json = r#"{"value": null}"#;
        let envelope: Envelope<Option<String>> = serde_json::from_str(json).unwrap();
        assert!(envelope.value.is_none());
    }
}
