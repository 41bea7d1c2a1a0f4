//! # pmosoap - Client SOAP minimal
//!
//! Invocation de méthodes distantes SOAP 1.1 / 1.2 sur HTTP, sans WSDL :
//! l'appelant construit l'enveloppe, l'envoie en POST et récupère le
//! contenu brut du `Body` de la réponse.
//!
//! ## Fonctionnalités
//!
//! - ✅ Enveloppes SOAP 1.1 (`soap:`) et 1.2 (`soap12:`)
//! - ✅ Paramètres structurés ([`ParamItem`]) ou fragment XML brut
//! - ✅ Proxy HTTP et authentification Basic
//! - ✅ Extraction du contenu du `Body`, y compris sur HTTP 500
//! - ✅ Décodage serde optionnel de la réponse
//!
//! ## Example
//!
//! ```no_run
//! use pmosoap::{ClientConfig, ParamItem, SoapClient};
//!
//! let client = SoapClient::new(ClientConfig::new("1.1"))?;
//!
//! let envelope = client.gen_soap_xml(
//!     "http://WebXml.com.cn/",
//!     "getSupportCity",
//!     vec![ParamItem::new("byProvinceName", "广东")],
//! );
//!
//! let body = client.request(
//!     "http://www.webxml.com.cn/WebServices/WeatherWebService.asmx",
//!     &envelope,
//!     "http://WebXml.com.cn/getSupportCity",
//! )?;
//! println!("{}", String::from_utf8_lossy(&body));
//! # Ok::<(), pmosoap::SoapError>(())
//! ```

mod client;
mod config;
mod envelope;
mod error;
mod escape;
mod response;

pub use client::SoapClient;
pub use config::{ClientConfig, SOAP_11_NS, SOAP_12_NS, SoapVersion};
pub use envelope::{PARAM_INDENT, ParamItem, SoapParams, build_params_xml, build_soap_envelope};
pub use error::{EnvelopeError, SoapError};
pub use escape::xml_escape;
pub use response::{ResponseEnvelope, decode_response, parse_response_envelope};
