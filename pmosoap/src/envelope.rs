//! Construction des enveloppes SOAP de requête

use std::collections::BTreeMap;
use std::fmt::Display;

use crate::config::SoapVersion;
use crate::escape::xml_escape;

/// Indentation placed before each serialized parameter.
pub const PARAM_INDENT: &str = "        ";

/// Un paramètre de requête : `<key attr="...">value</key>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamItem {
    /// Nom de la balise
    pub key: String,

    /// Valeur textuelle (échappée à la sérialisation)
    pub value: String,

    /// Attributs, émis dans l'ordre alphabétique des noms
    pub attrs: BTreeMap<String, String>,
}

impl ParamItem {
    pub fn new(key: impl Into<String>, value: impl Display) -> Self {
        Self {
            key: key.into(),
            value: value.to_string(),
            attrs: BTreeMap::new(),
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Display) -> Self {
        self.attrs.insert(name.into(), value.to_string());
        self
    }

    fn write_xml(&self, prefix: &str, out: &mut String) {
        out.push('\n');
        out.push_str(prefix);
        out.push('<');
        out.push_str(&self.key);
        for (name, value) in &self.attrs {
            out.push_str(&format!(r#" {}="{}""#, name, xml_escape(value)));
        }
        out.push('>');
        out.push_str(&xml_escape(&self.value));
        out.push_str("</");
        out.push_str(&self.key);
        out.push('>');
    }
}

/// Paramètres d'un appel : fragment XML brut ou liste structurée
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoapParams {
    /// Fragment XML déjà formaté, inséré tel quel
    Raw(String),
    /// Paramètres sérialisés dans l'ordre de la liste
    Items(Vec<ParamItem>),
}

impl SoapParams {
    pub fn to_xml(&self) -> String {
        match self {
            SoapParams::Raw(xml) => xml.clone(),
            SoapParams::Items(items) => build_params_xml(items, PARAM_INDENT),
        }
    }
}

impl From<&str> for SoapParams {
    fn from(xml: &str) -> Self {
        SoapParams::Raw(xml.to_string())
    }
}

impl From<String> for SoapParams {
    fn from(xml: String) -> Self {
        SoapParams::Raw(xml)
    }
}

impl From<Vec<ParamItem>> for SoapParams {
    fn from(items: Vec<ParamItem>) -> Self {
        SoapParams::Items(items)
    }
}

impl From<&[ParamItem]> for SoapParams {
    fn from(items: &[ParamItem]) -> Self {
        SoapParams::Items(items.to_vec())
    }
}

/// Sérialise une liste de paramètres, chacun précédé d'un saut de ligne et de `prefix`
pub fn build_params_xml(items: &[ParamItem], prefix: &str) -> String {
    let mut out = String::new();
    for item in items {
        item.write_xml(prefix, &mut out);
    }
    out
}

/// Construit l'enveloppe SOAP complète d'un appel de méthode
///
/// # Arguments
///
/// * `version` - Version SOAP (choisit le préfixe `soap:` ou `soap12:`)
/// * `namespace` - Namespace de la méthode (ex: "http://WebXml.com.cn/")
/// * `method` - Nom de la méthode (ex: "getSupportCity")
/// * `params` - Paramètres de l'appel
pub fn build_soap_envelope(
    version: SoapVersion,
    namespace: &str,
    method: &str,
    params: &SoapParams,
) -> String {
    let params_xml = params.to_xml();
    let namespace = xml_escape(namespace);

    match version {
        SoapVersion::V11 => format!(
            r#"<?xml version="1.0" encoding="utf-8"?>
<soap:Envelope xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xmlns:xsd="http://www.w3.org/2001/XMLSchema" xmlns:soap="{envelope_ns}">
    <soap:Body>
        <{method} xmlns="{namespace}">{params_xml}
        </{method}>
    </soap:Body>
</soap:Envelope>"#,
            envelope_ns = version.envelope_namespace(),
        ),
        SoapVersion::V12 => format!(
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>
<soap12:Envelope xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\" xmlns:xsd=\"http://www.w3.org/2001/XMLSchema\" xmlns:soap12=\"{envelope_ns}\">
\t<soap12:Body>
\t\t<{method} xmlns=\"{namespace}\">{params_xml}
\t\t</{method}>
\t</soap12:Body>
</soap12:Envelope>",
            envelope_ns = version.envelope_namespace(),
        ),
    }
}
