//! Brazilian postal-code (CEP) lookup through ViaCEP
//!
//! ViaCEP is a public service outside the clinic backend, so [`CepClient`]
//! keeps its own `reqwest::Client` (no session cookies, no envelope).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ApiError, Result};
use crate::traits::AddressLookup;
use crate::utils::log_sanitizer::truncate_for_log;

/// Public ViaCEP endpoint.
pub const DEFAULT_CEP_BASE_URL: &str = "https://viacep.com.br/ws";
const CEP_TIMEOUT_SECS: u64 = 10;
const CEP_ENDPOINT: &str = "viacep";

/// Number of digits in a CEP.
pub const CEP_LEN: usize = 8;

/// Address resolved from a CEP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CepAddress {
    /// Eight digits, no punctuation.
    pub cep: String,
    pub street: String,
    pub neighborhood: String,
    pub city: String,
    /// Two-letter state code.
    pub uf: String,
}

/// Raw ViaCEP answer.
#[derive(Debug, Deserialize)]
struct ViaCepResponse {
    #[serde(default)]
    logradouro: String,
    #[serde(default)]
    bairro: String,
    #[serde(default)]
    localidade: String,
    #[serde(default)]
    uf: String,
}

/// Keep only the digits of `input`.
pub fn strip_cep(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

/// Strip punctuation and require exactly eight digits.
pub fn normalize_cep(input: &str) -> Result<String> {
    let digits = strip_cep(input);
    if digits.len() == CEP_LEN {
        Ok(digits)
    } else {
        Err(ApiError::InvalidParameter {
            param: "cep".to_string(),
            detail: "CEP inválido (8 dígitos)".to_string(),
        })
    }
}

/// Format eight digits as `00000-000`; anything else is returned as is.
pub fn format_cep(digits: &str) -> String {
    if digits.len() == CEP_LEN && digits.chars().all(|c| c.is_ascii_digit()) {
        format!("{}-{}", &digits[..5], &digits[5..])
    } else {
        digits.to_string()
    }
}

#[derive(Debug, Clone)]
pub struct CepClient {
    client: Client,
    base_url: String,
}

impl CepClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(CEP_TIMEOUT_SECS))
            .build()
            .map_err(|e| ApiError::InvalidParameter {
                param: "http_client".to_string(),
                detail: e.to_string(),
            })?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Resolve a CEP.
    ///
    /// `Ok(None)` when ViaCEP reports the code as unknown.
    pub async fn lookup(&self, cep: &str) -> Result<Option<CepAddress>> {
        let cep = normalize_cep(cep)?;
        let url = format!("{}/{cep}/json/", self.base_url);
        log::debug!("[cep] GET {url}");

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout {
                    endpoint: CEP_ENDPOINT.to_string(),
                    detail: e.to_string(),
                }
            } else {
                ApiError::Network {
                    endpoint: CEP_ENDPOINT.to_string(),
                    detail: e.to_string(),
                }
            }
        })?;

        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| ApiError::Network {
            endpoint: CEP_ENDPOINT.to_string(),
            detail: format!("Failed to read response body: {e}"),
        })?;
        log::debug!("[cep] Response {status}: {}", truncate_for_log(&text));

        // ViaCEP answers 400 for malformed codes; ours are already validated.
        if !(200..300).contains(&status) {
            return Err(ApiError::from_status(CEP_ENDPOINT, status, None));
        }

        parse_viacep(&cep, &text)
    }
}

#[async_trait]
impl AddressLookup for CepClient {
    async fn lookup_cep(&self, cep: &str) -> Result<Option<CepAddress>> {
        self.lookup(cep).await
    }
}

fn parse_viacep(cep: &str, text: &str) -> Result<Option<CepAddress>> {
    let parse_error = |detail: String| ApiError::Parse {
        endpoint: CEP_ENDPOINT.to_string(),
        detail,
    };
    let value: Value = serde_json::from_str(text).map_err(|e| parse_error(e.to_string()))?;

    // `"erro": true` (older deployments send the string "true").
    let not_found = match value.get("erro") {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s == "true",
        _ => false,
    };
    if not_found {
        return Ok(None);
    }

    let raw: ViaCepResponse =
        serde_json::from_value(value).map_err(|e| parse_error(e.to_string()))?;
    Ok(Some(CepAddress {
        cep: cep.to_string(),
        street: raw.logradouro,
        neighborhood: raw.bairro,
        city: raw.localidade,
        uf: raw.uf,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_punctuation() {
        assert_eq!(normalize_cep("01310-100").unwrap(), "01310100");
        assert_eq!(normalize_cep(" 01.310-100 ").unwrap(), "01310100");
    }

    #[test]
    fn normalize_rejects_wrong_length() {
        assert!(normalize_cep("0131010").is_err());
        assert!(normalize_cep("013101000").is_err());
        assert!(normalize_cep("").is_err());
    }

    #[test]
    fn format_inserts_dash() {
        assert_eq!(format_cep("01310100"), "01310-100");
        assert_eq!(format_cep("0131"), "0131");
    }

    #[test]
    fn parses_found_address() {
        let body = r#"{"cep":"01310-100","logradouro":"Avenida Paulista","complemento":"","bairro":"Bela Vista","localidade":"São Paulo","uf":"SP"}"#;
        let addr = parse_viacep("01310100", body).unwrap().unwrap();
        assert_eq!(addr.street, "Avenida Paulista");
        assert_eq!(addr.neighborhood, "Bela Vista");
        assert_eq!(addr.city, "São Paulo");
        assert_eq!(addr.uf, "SP");
    }

    #[test]
    fn erro_flag_means_not_found() {
        assert_eq!(parse_viacep("99999999", r#"{"erro": true}"#).unwrap(), None);
        assert_eq!(parse_viacep("99999999", r#"{"erro": "true"}"#).unwrap(), None);
    }

    #[test]
    fn garbage_is_a_parse_error() {
        assert!(matches!(
            parse_viacep("01310100", "<html>"),
            Err(ApiError::Parse { .. })
        ));
    }
}
