use std::fmt;
use std::io::{self, Read};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use ureq::{Agent, Proxy};
use url::Url;

use crate::config::{ClientConfig, SoapVersion};
use crate::envelope::{SoapParams, build_soap_envelope};
use crate::error::SoapError;
use crate::response::{decode_response, parse_response_envelope};

#[derive(Clone)]
struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    fn authorization(&self) -> String {
        let token = STANDARD.encode(format!("{}:{}", self.username, self.password));
        format!("Basic {}", token)
    }
}

/// Client for SOAP 1.1 / 1.2 calls over HTTP POST.
///
/// Version, proxy and credentials are fixed at construction. The client keeps
/// no per-request state, so a single instance (or its clones, which share the
/// same connection pool) can be used from several threads at once.
#[derive(Clone)]
pub struct SoapClient {
    agent: Agent,
    version: SoapVersion,
    proxy_url: Option<Url>,
    credentials: Option<Credentials>,
}

impl fmt::Debug for SoapClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SoapClient")
            .field("version", &self.version)
            .field("proxy_url", &self.proxy_url.as_ref().map(Url::as_str))
            .field(
                "username",
                &self.credentials.as_ref().map(|c| c.username.as_str()),
            )
            .finish_non_exhaustive()
    }
}

impl SoapClient {
    /// Build a client from its configuration.
    ///
    /// Fails only when a proxy URL is given and cannot be parsed.
    ///
    /// With a proxy, every request goes through an HTTP `CONNECT` tunnel to
    /// the target, including plain `http://` endpoints: no absolute-form
    /// `POST http://host/...` is ever sent to the proxy. A proxy that only
    /// accepts `CONNECT` to port 443 will refuse `http://` services, and the
    /// call fails with [`SoapError::Transport`].
    pub fn new(config: ClientConfig) -> Result<Self, SoapError> {
        let version = config.soap_version();

        let (proxy_url, proxy) = if config.proxy_url.is_empty() {
            (None, None)
        } else {
            let url = Url::parse(&config.proxy_url).map_err(|e| {
                SoapError::config(format!("invalid proxy URL {:?}: {}", config.proxy_url, e))
            })?;
            let proxy = Proxy::new(&config.proxy_url).map_err(|e| {
                SoapError::config(format!("unsupported proxy {:?}: {}", config.proxy_url, e))
            })?;
            (Some(url), Some(proxy))
        };

        let credentials = if config.username.is_empty() {
            None
        } else {
            Some(Credentials {
                username: config.username,
                password: config.password,
            })
        };

        // 4xx/5xx must not be turned into Error::StatusCode: SOAP faults come
        // with a 500 and their body is still returned to the caller.
        // Setting the proxy explicitly also disables ureq's environment lookup.
        let agent: Agent = Agent::config_builder()
            .http_status_as_error(false)
            .proxy(proxy)
            .build()
            .into();

        debug!(
            "SOAP client ready (soap{}, proxy: {}, basic auth: {})",
            version,
            proxy_url.as_ref().map(Url::as_str).unwrap_or("none"),
            credentials.is_some()
        );

        Ok(Self {
            agent,
            version,
            proxy_url,
            credentials,
        })
    }

    pub fn version(&self) -> SoapVersion {
        self.version
    }

    pub fn proxy_url(&self) -> Option<&Url> {
        self.proxy_url.as_ref()
    }

    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// Build the request envelope for `method` in `namespace`.
    ///
    /// `params` is either a raw XML fragment (`&str`/`String`) or a list of
    /// [`ParamItem`](crate::ParamItem).
    pub fn gen_soap_xml(
        &self,
        namespace: &str,
        method: &str,
        params: impl Into<SoapParams>,
    ) -> String {
        build_soap_envelope(self.version, namespace, method, &params.into())
    }

    /// POST an envelope to `url` and return the inner XML of the response `Body`.
    ///
    /// On [`SoapError::HttpStatus`] and [`SoapError::Read`] the parsed body is
    /// still available through [`SoapError::body`]; on
    /// [`SoapError::EnvelopeParse`] it holds the raw response.
    pub fn request(&self, url: &str, body: &str, soap_action: &str) -> Result<Vec<u8>, SoapError> {
        let mut request = self.agent.post(url);

        if let Some(credentials) = &self.credentials {
            request = request.header("Authorization", credentials.authorization());
        }
        for (name, value) in soap_headers(self.version, soap_action) {
            request = request.header(name, value);
        }

        debug!("soap{} POST {} (action: {:?})", self.version, url, soap_action);

        let mut response = request
            .send(body.to_string())
            .map_err(|e| self.send_error(e))?;

        let status = response.status();
        debug!("soap{} {} answered HTTP {}", self.version, url, status);

        let mut bytes = Vec::new();
        let read_error = response
            .body_mut()
            .as_reader()
            .read_to_end(&mut bytes)
            .err();
        // Releases the connection before the body is examined.
        drop(response);

        classify_response(self.version, status.as_u16(), bytes, read_error)
    }

    /// Build the envelope and send it in one step.
    pub fn call(
        &self,
        url: &str,
        namespace: &str,
        method: &str,
        params: impl Into<SoapParams>,
        soap_action: &str,
    ) -> Result<Vec<u8>, SoapError> {
        let envelope = self.gen_soap_xml(namespace, method, params);
        self.request(url, &envelope, soap_action)
    }

    /// Like [`call`](Self::call), then decode the response body into `T`.
    pub fn call_decoded<T: DeserializeOwned>(
        &self,
        url: &str,
        namespace: &str,
        method: &str,
        params: impl Into<SoapParams>,
        soap_action: &str,
    ) -> Result<T, SoapError> {
        let data = self.call(url, namespace, method, params, soap_action)?;
        decode_response(&data)
    }

    fn send_error(&self, err: ureq::Error) -> SoapError {
        match err {
            ureq::Error::BadUri(message) => SoapError::InvalidRequest {
                version: self.version,
                message,
            },
            ureq::Error::Http(e) => SoapError::InvalidRequest {
                version: self.version,
                message: e.to_string(),
            },
            source => SoapError::Transport {
                version: self.version,
                source,
            },
        }
    }
}

/// Version dependent request headers.
fn soap_headers(version: SoapVersion, soap_action: &str) -> Vec<(&'static str, String)> {
    match version {
        SoapVersion::V11 => vec![
            ("Content-Type", version.content_type().to_string()),
            ("SOAPAction", soap_action.to_string()),
        ],
        SoapVersion::V12 => {
            let mut content_type = version.content_type().to_string();
            if !soap_action.is_empty() {
                content_type.push_str(&format!(r#";action="{}""#, soap_action));
            }
            vec![("Content-Type", content_type)]
        }
    }
}

/// Turn a received response into the call result.
///
/// An envelope parse failure wins over everything else and hands back the
/// raw bytes. Otherwise a non-2xx status wins over a read failure. When the
/// read failed before any byte arrived there is nothing to parse.
fn classify_response(
    version: SoapVersion,
    status: u16,
    bytes: Vec<u8>,
    read_error: Option<io::Error>,
) -> Result<Vec<u8>, SoapError> {
    let body = if read_error.is_some() && bytes.is_empty() {
        Vec::new()
    } else {
        match parse_response_envelope(&bytes) {
            Ok(envelope) => envelope.response_data,
            Err(source) => {
                warn!(
                    "soap{} response (HTTP {}) is not a SOAP envelope: {}",
                    version, status, source
                );
                return Err(SoapError::EnvelopeParse {
                    version,
                    source,
                    raw: bytes,
                });
            }
        }
    };

    if !(200..300).contains(&status) {
        return Err(SoapError::HttpStatus {
            version,
            status,
            body,
        });
    }
    if let Some(source) = read_error {
        return Err(SoapError::Read {
            version,
            source,
            body,
        });
    }
    Ok(body)
}
