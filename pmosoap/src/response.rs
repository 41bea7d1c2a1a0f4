//! Parser des enveloppes SOAP de réponse
//!
//! Seule la coquille `Envelope` / `Body` est interprétée : le contenu du
//! `Body` est rendu octet pour octet, sans décodage.

use quick_xml::Reader;
use quick_xml::events::Event;
use quick_xml::name::QName;
use serde::de::DeserializeOwned;

use crate::error::{EnvelopeError, SoapError};

/// Enveloppe de réponse réduite au contenu brut de son `Body`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseEnvelope {
    /// XML interne du `Body`, tel que reçu
    pub response_data: Vec<u8>,
}

/// Parse une réponse `<Envelope><Body>...</Body></Envelope>`
///
/// Les éléments sont reconnus par leur nom local, quel que soit le préfixe
/// (`soap:`, `soap12:`, `s:`...). Le premier `Body` rencontré est retenu.
pub fn parse_response_envelope(xml: &[u8]) -> Result<ResponseEnvelope, EnvelopeError> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();
    let mut skip_buf = Vec::new();

    // Élément racine
    loop {
        buf.clear();
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                if e.local_name().as_ref() != b"Envelope" {
                    return Err(unexpected_root(e.name()));
                }
                break;
            }
            Event::Empty(e) => {
                if e.local_name().as_ref() != b"Envelope" {
                    return Err(unexpected_root(e.name()));
                }
                return Err(EnvelopeError::MissingBody);
            }
            Event::Eof => return Err(EnvelopeError::MissingEnvelope),
            _ => {}
        }
    }

    // Enfants de l'Envelope
    let mut response_data: Option<Vec<u8>> = None;
    loop {
        buf.clear();
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let is_body = e.local_name().as_ref() == b"Body";
                let name = e.name().as_ref().to_vec();

                skip_buf.clear();
                let span = reader.read_to_end_into(QName(&name), &mut skip_buf)?;
                if is_body && response_data.is_none() {
                    response_data = Some(xml[span.start as usize..span.end as usize].to_vec());
                }
            }
            Event::Empty(e) => {
                if e.local_name().as_ref() == b"Body" && response_data.is_none() {
                    response_data = Some(Vec::new());
                }
            }
            // Fin de l'Envelope, les noms de balises sont vérifiés par le reader
            Event::End(_) => break,
            Event::Eof => return Err(EnvelopeError::UnexpectedEof),
            _ => {}
        }
    }

    response_data
        .map(|response_data| ResponseEnvelope { response_data })
        .ok_or(EnvelopeError::MissingBody)
}

fn unexpected_root(name: QName<'_>) -> EnvelopeError {
    EnvelopeError::UnexpectedRoot(String::from_utf8_lossy(name.as_ref()).into_owned())
}

/// Décode le contenu d'un `Body` vers un type serde
///
/// Le nom de l'élément racine du contenu n'est pas vérifié.
pub fn decode_response<T: DeserializeOwned>(data: &[u8]) -> Result<T, SoapError> {
    Ok(quick_xml::de::from_reader(data.trim_ascii())?)
}
