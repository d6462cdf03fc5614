use std::time::Duration;

use reqwest::{Client, Method};
use serde_json::{json, Value};

use crate::error::DriverError;
use crate::scripts;

/// W3C WebDriver element identifier key.
const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

/// Pause between the write, `change`, and `blur` steps of a field fill so
/// framework listeners settle before the next event.
const FILL_STEP_PAUSE: Duration = Duration::from_millis(50);

/// Reference to a DOM element held by the remote browser.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Element {
    id: String,
}

impl Element {
    /// Extract an element reference from a WebDriver value, e.g. a
    /// `find element` response or a DOM node returned by a script.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        value
            .get(ELEMENT_KEY)
            .and_then(Value::as_str)
            .map(|id| Self { id: id.to_string() })
    }

    /// Serialize back into the form WebDriver accepts as a script argument.
    #[must_use]
    pub fn to_arg(&self) -> Value {
        json!({ ELEMENT_KEY: self.id })
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Parsed components of the page URL, for hostname and path checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLocation {
    pub url: String,
    pub hostname: String,
    pub path: String,
}

impl PageLocation {
    /// Split a URL into hostname and path without pulling in a URL crate.
    /// The hostname keeps any port; the path excludes query and fragment.
    #[must_use]
    pub fn parse(url: &str) -> Self {
        let without_scheme = url
            .strip_prefix("https://")
            .or_else(|| url.strip_prefix("http://"))
            .unwrap_or(url);
        let (hostname, rest) = match without_scheme.find('/') {
            Some(idx) => (&without_scheme[..idx], &without_scheme[idx..]),
            None => (without_scheme, "/"),
        };
        let path = rest
            .split(['?', '#'])
            .next()
            .unwrap_or("/");
        Self {
            url: url.to_string(),
            hostname: hostname.to_string(),
            path: path.to_string(),
        }
    }

    /// Whether the hostname is `domain` or a subdomain of it.
    #[must_use]
    pub fn host_matches(&self, domain: &str) -> bool {
        let host = self.hostname.split(':').next().unwrap_or(&self.hostname);
        host == domain || host.ends_with(&format!(".{domain}"))
    }
}

/// HTTP client for a single W3C WebDriver session.
///
/// Wraps the protocol's `{"value": ...}` envelopes and error bodies as
/// typed results, and layers the field-write sequence (native setter plus
/// `input`, `change`, `blur` events) used by all the site integrations.
pub struct Session {
    http: Client,
    base_url: String,
    session_id: String,
}

impl Session {
    /// Start a new browser session at `base_url` (e.g. a local chromedriver).
    ///
    /// # Errors
    ///
    /// Returns [`DriverError`] if the endpoint is unreachable or refuses
    /// the session.
    pub async fn start(base_url: &str, timeout_secs: u64) -> Result<Self, DriverError> {
        let http = Self::build_http(timeout_secs)?;
        let base_url = base_url.trim_end_matches('/').to_string();
        let url = format!("{base_url}/session");
        let body = json!({
            "capabilities": { "alwaysMatch": { "browserName": "chrome" } }
        });
        let value = Self::dispatch(&http, Method::POST, &url, Some(&body)).await?;
        let session_id = value
            .get("sessionId")
            .and_then(Value::as_str)
            .ok_or_else(|| DriverError::MalformedResponse {
                context: "new session".to_string(),
                reason: "missing sessionId".to_string(),
            })?
            .to_string();
        tracing::debug!(session_id, "webdriver session started");
        Ok(Self {
            http,
            base_url,
            session_id,
        })
    }

    /// Attach to an already running session, e.g. a browser the user is
    /// driving interactively.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Http`] if the HTTP client cannot be built.
    pub fn attach(
        base_url: &str,
        session_id: &str,
        timeout_secs: u64,
    ) -> Result<Self, DriverError> {
        Ok(Self {
            http: Self::build_http(timeout_secs)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            session_id: session_id.to_string(),
        })
    }

    fn build_http(timeout_secs: u64) -> Result<Client, DriverError> {
        Ok(Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?)
    }

    #[must_use]
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// End the remote session.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError`] if the delete request fails.
    pub async fn close(self) -> Result<(), DriverError> {
        let url = format!("{}/session/{}", self.base_url, self.session_id);
        Self::dispatch(&self.http, Method::DELETE, &url, None).await?;
        Ok(())
    }

    /// Current URL of the focused page.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError`] on protocol or transport failure.
    pub async fn current_url(&self) -> Result<String, DriverError> {
        let value = self.command(Method::GET, "/url", None).await?;
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| DriverError::MalformedResponse {
                context: "current url".to_string(),
                reason: "value is not a string".to_string(),
            })
    }

    /// Current URL parsed into hostname and path.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError`] on protocol or transport failure.
    pub async fn page_location(&self) -> Result<PageLocation, DriverError> {
        Ok(PageLocation::parse(&self.current_url().await?))
    }

    /// Find the first element matching a CSS selector, or `None` when the
    /// page has no match.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError`] on any failure other than "no such element".
    pub async fn find(&self, css: &str) -> Result<Option<Element>, DriverError> {
        let body = json!({ "using": "css selector", "value": css });
        match self.command(Method::POST, "/element", Some(&body)).await {
            Ok(value) => Element::from_value(&value)
                .map(Some)
                .ok_or_else(|| DriverError::MalformedResponse {
                    context: format!("find element {css}"),
                    reason: "missing element reference".to_string(),
                }),
            Err(DriverError::WebDriver { error, .. }) if error == "no such element" => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Find every element matching a CSS selector, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError`] on protocol or transport failure.
    pub async fn find_all(&self, css: &str) -> Result<Vec<Element>, DriverError> {
        let body = json!({ "using": "css selector", "value": css });
        let value = self.command(Method::POST, "/elements", Some(&body)).await?;
        let items = value
            .as_array()
            .ok_or_else(|| DriverError::MalformedResponse {
                context: format!("find elements {css}"),
                reason: "value is not an array".to_string(),
            })?;
        Ok(items.iter().filter_map(Element::from_value).collect())
    }

    /// Click an element through the WebDriver endpoint, so the browser
    /// synthesizes the full pointer event sequence.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError`] on protocol or transport failure.
    pub async fn click(&self, element: &Element) -> Result<(), DriverError> {
        let path = format!("/element/{}/click", element.id);
        self.command(Method::POST, &path, Some(&json!({}))).await?;
        Ok(())
    }

    /// Visible text of an element.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError`] on protocol or transport failure.
    pub async fn text(&self, element: &Element) -> Result<String, DriverError> {
        let path = format!("/element/{}/text", element.id);
        let value = self.command(Method::GET, &path, None).await?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    /// A live DOM property of an element, e.g. `value` or `checked`.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError`] on protocol or transport failure.
    pub async fn property(&self, element: &Element, name: &str) -> Result<Value, DriverError> {
        let path = format!("/element/{}/property/{name}", element.id);
        self.command(Method::GET, &path, None).await
    }

    /// Run a synchronous script in the page and return its value.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError`] on protocol or transport failure, or when
    /// the script itself throws.
    pub async fn execute(&self, script: &str, args: Vec<Value>) -> Result<Value, DriverError> {
        let body = json!({ "script": script, "args": args });
        self.command(Method::POST, "/execute/sync", Some(&body)).await
    }

    /// Write a text value into an input or textarea the way a framework
    /// expects: native setter plus `input`, then `change`, then `blur`,
    /// with short pauses between the steps.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError`] on protocol or transport failure.
    pub async fn fill_field(&self, element: &Element, value: &str) -> Result<(), DriverError> {
        self.execute(scripts::FOCUS, vec![element.to_arg()]).await?;
        self.execute(
            scripts::SET_VALUE_NATIVE,
            vec![element.to_arg(), json!(value)],
        )
        .await?;
        tokio::time::sleep(FILL_STEP_PAUSE).await;
        self.execute(scripts::DISPATCH_CHANGE, vec![element.to_arg()])
            .await?;
        tokio::time::sleep(FILL_STEP_PAUSE).await;
        self.execute(scripts::DISPATCH_BLUR, vec![element.to_arg()])
            .await?;
        tokio::time::sleep(FILL_STEP_PAUSE).await;
        Ok(())
    }

    /// Read a `sessionStorage` entry of the current page.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError`] on protocol or transport failure.
    pub async fn session_storage_get(&self, key: &str) -> Result<Option<String>, DriverError> {
        let value = self
            .execute(scripts::SESSION_STORAGE_GET, vec![json!(key)])
            .await?;
        Ok(value.as_str().map(str::to_string))
    }

    /// Write a `sessionStorage` entry on the current page.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError`] on protocol or transport failure.
    pub async fn session_storage_set(&self, key: &str, value: &str) -> Result<(), DriverError> {
        self.execute(scripts::SESSION_STORAGE_SET, vec![json!(key), json!(value)])
            .await?;
        Ok(())
    }

    /// Read a `localStorage` entry of the current page.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError`] on protocol or transport failure.
    pub async fn local_storage_get(&self, key: &str) -> Result<Option<String>, DriverError> {
        let value = self
            .execute(scripts::LOCAL_STORAGE_GET, vec![json!(key)])
            .await?;
        Ok(value.as_str().map(str::to_string))
    }

    /// Write a `localStorage` entry on the current page.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError`] on protocol or transport failure.
    pub async fn local_storage_set(&self, key: &str, value: &str) -> Result<(), DriverError> {
        self.execute(scripts::LOCAL_STORAGE_SET, vec![json!(key), json!(value)])
            .await?;
        Ok(())
    }

    /// Whether the page was loaded by a reload navigation.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError`] on protocol or transport failure.
    pub async fn was_reload(&self) -> Result<bool, DriverError> {
        let value = self.execute(scripts::NAV_WAS_RELOAD, vec![]).await?;
        Ok(value.as_bool().unwrap_or(false))
    }

    async fn command(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, DriverError> {
        let url = format!("{}/session/{}{path}", self.base_url, self.session_id);
        Self::dispatch(&self.http, method, &url, body).await
    }

    /// Send one protocol request and unwrap the `{"value": ...}` envelope.
    /// Non-2xx responses carrying a WebDriver error body become
    /// [`DriverError::WebDriver`]; anything else non-2xx becomes
    /// [`DriverError::UnexpectedStatus`].
    async fn dispatch(
        http: &Client,
        method: Method,
        url: &str,
        body: Option<&Value>,
    ) -> Result<Value, DriverError> {
        let mut request = http.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        let envelope: Value =
            serde_json::from_str(&text).map_err(|e| DriverError::Deserialize {
                context: format!("response from {url}"),
                source: e,
            })?;
        let value = envelope.get("value").cloned().unwrap_or(Value::Null);

        if status.is_success() {
            return Ok(value);
        }
        if let Some(error) = value.get("error").and_then(Value::as_str) {
            let message = value
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or_default();
            return Err(DriverError::WebDriver {
                error: error.to_string(),
                message: message.to_string(),
            });
        }
        Err(DriverError::UnexpectedStatus {
            status: status.as_u16(),
            url: url.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_url() {
        let loc = PageLocation::parse("https://jobs.lever.co/acme/123/apply?src=x#top");
        assert_eq!(loc.hostname, "jobs.lever.co");
        assert_eq!(loc.path, "/acme/123/apply");
    }

    #[test]
    fn parses_url_without_path() {
        let loc = PageLocation::parse("https://solid.jobs");
        assert_eq!(loc.hostname, "solid.jobs");
        assert_eq!(loc.path, "/");
    }

    #[test]
    fn host_matches_domain_and_subdomains() {
        let loc = PageLocation::parse("https://acme.traffit.com/career/offer/1");
        assert!(loc.host_matches("traffit.com"));
        assert!(!loc.host_matches("affit.com"));
        assert!(!loc.host_matches("lever.co"));
    }

    #[test]
    fn host_matches_ignores_port() {
        let loc = PageLocation::parse("http://localhost:8080/apply");
        assert!(loc.host_matches("localhost"));
    }

    #[test]
    fn element_round_trips_through_value() {
        let value = serde_json::json!({
            "element-6066-11e4-a52e-4f735466cecf": "abc-123"
        });
        let element = Element::from_value(&value).unwrap();
        assert_eq!(element.id(), "abc-123");
        assert_eq!(element.to_arg(), value);
    }

    #[test]
    fn element_from_unrelated_value_is_none() {
        assert!(Element::from_value(&serde_json::json!({"foo": "bar"})).is_none());
    }
}
