//! Error types for the SOAP client.

use std::io;

use thiserror::Error;

use crate::config::SoapVersion;

/// Failure to recognise an `Envelope`/`Body` shell in a response document.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("expected element <Envelope> but found <{0}>")]
    UnexpectedRoot(String),

    #[error("Missing SOAP Envelope")]
    MissingEnvelope,

    #[error("Missing SOAP Body")]
    MissingBody,

    #[error("unexpected end of document inside <Envelope>")]
    UnexpectedEof,
}

/// Errors returned by [`SoapClient`](crate::SoapClient).
///
/// The response-side variants carry whatever payload could be recovered so
/// that callers can still inspect it, see [`SoapError::body`].
#[derive(Debug, Error)]
pub enum SoapError {
    #[error("NewClient error: {0}")]
    Config(String),

    #[error("WebService soap{version} invalid request: {message}")]
    InvalidRequest {
        version: SoapVersion,
        message: String,
    },

    #[error("WebService soap{version} request http post fail: {source}")]
    Transport {
        version: SoapVersion,
        #[source]
        source: ureq::Error,
    },

    #[error("WebService soap{version} request fail, http status: {status}")]
    HttpStatus {
        version: SoapVersion,
        status: u16,
        body: Vec<u8>,
    },

    #[error("WebService soap{version} response body read error: {source}")]
    Read {
        version: SoapVersion,
        #[source]
        source: io::Error,
        body: Vec<u8>,
    },

    #[error("WebService soap{version} response envelope parse fail: {source}")]
    EnvelopeParse {
        version: SoapVersion,
        #[source]
        source: EnvelopeError,
        raw: Vec<u8>,
    },

    #[error("SOAP body decode error: {0}")]
    Decode(#[from] quick_xml::DeError),
}

impl SoapError {
    pub fn config(message: impl Into<String>) -> Self {
        SoapError::Config(message.into())
    }

    /// Best-effort payload attached to the error.
    ///
    /// For [`SoapError::HttpStatus`] and [`SoapError::Read`] this is the inner
    /// content of the response `Body`; for [`SoapError::EnvelopeParse`] it is
    /// the raw, unparsed response.
    pub fn body(&self) -> Option<&[u8]> {
        match self {
            SoapError::HttpStatus { body, .. } | SoapError::Read { body, .. } => Some(body),
            SoapError::EnvelopeParse { raw, .. } => Some(raw),
            _ => None,
        }
    }

    /// HTTP status of the response, when the error comes from a non-2xx answer.
    pub fn status(&self) -> Option<u16> {
        match self {
            SoapError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
