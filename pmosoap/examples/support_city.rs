//! Liste les villes d'une province via le service météo WebXml.
//!
//! Usage: cargo run -p pmosoap --example support_city -- [PROVINCE] [VERSION]

use std::env;

use anyhow::{Context, Result};
use pmosoap::{ClientConfig, ParamItem, SoapClient};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

const SERVICE_URL: &str = "http://www.webxml.com.cn/WebServices/WeatherWebService.asmx";
const NAMESPACE: &str = "http://WebXml.com.cn/";

#[derive(Debug, Deserialize)]
struct SupportCityResponse {
    #[serde(rename = "getSupportCityResult")]
    result: CityList,
}

#[derive(Debug, Deserialize)]
struct CityList {
    #[serde(rename = "string", default)]
    cities: Vec<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();
    let province = args.get(1).cloned().unwrap_or_else(|| "广东".to_string());
    let version = args.get(2).cloned().unwrap_or_else(|| "1.1".to_string());

    let client = SoapClient::new(ClientConfig::new(&version))?;

    let envelope = client.gen_soap_xml(
        NAMESPACE,
        "getSupportCity",
        vec![ParamItem::new("byProvinceName", &province)],
    );
    println!("{}", envelope);

    let action = format!("{}getSupportCity", NAMESPACE);
    let body = match client.request(SERVICE_URL, &envelope, &action) {
        Ok(body) => body,
        Err(err) => {
            // Les données éventuellement reçues aident au diagnostic
            if let Some(data) = err.body() {
                eprintln!("{}", String::from_utf8_lossy(data));
            }
            return Err(err.into());
        }
    };

    let response: SupportCityResponse =
        pmosoap::decode_response(&body).context("Failed to decode getSupportCity response")?;

    println!("{} cities for {}:", response.result.cities.len(), province);
    for city in &response.result.cities {
        println!("  - {}", city);
    }

    Ok(())
}
