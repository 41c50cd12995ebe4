//! Tutor-with-pet registration payload

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::http_client::ApiClient;
use crate::traits::TutorRegistrar;

pub const TUTOR_WITH_PET_PATH: &str = "tutor/with-pet";

/// Pet sex as the backend names it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn code(self) -> &'static str {
        match self {
            Self::Male => "MALE",
            Self::Female => "FEMALE",
        }
    }

    /// Accepts the code (`MALE`) or the label (`Macho`).
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_uppercase().as_str() {
            "MALE" | "MACHO" | "M" => Some(Self::Male),
            "FEMALE" | "FÊMEA" | "FEMEA" | "F" => Some(Self::Female),
            _ => None,
        }
    }
}

/// Flat body of `POST tutor/with-pet`.
///
/// Optional fields left as `None` are omitted from the JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TutorWithPetRequest {
    // Tutor
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    // Address
    pub cep: String,
    pub street: String,
    pub number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complement: Option<String>,
    pub neighborhood: String,
    pub city: String,
    /// Two-letter state code.
    pub state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    // Pet
    pub name_pet: String,
    pub species: i64,
    pub breed: i64,
    pub gender: Gender,
    /// `YYYY-MM-DD`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub microchip_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observations: Option<String>,
    pub active: bool,
}

/// HTTP-backed [`TutorRegistrar`].
pub struct TutorEndpoint {
    client: Arc<ApiClient>,
}

impl TutorEndpoint {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TutorRegistrar for TutorEndpoint {
    async fn register_tutor_with_pet(&self, request: &TutorWithPetRequest) -> Result<()> {
        self.client
            .post::<serde::de::IgnoredAny, _>(TUTOR_WITH_PET_PATH, request)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TutorWithPetRequest {
        TutorWithPetRequest {
            name: "Ana Souza".to_string(),
            email: "ana@example.com".to_string(),
            document: None,
            phone: Some("11999990000".to_string()),
            cep: "01310100".to_string(),
            street: "Avenida Paulista".to_string(),
            number: "1000".to_string(),
            complement: None,
            neighborhood: "Bela Vista".to_string(),
            city: "São Paulo".to_string(),
            state: "SP".to_string(),
            country: Some("Brasil".to_string()),
            name_pet: "Rex".to_string(),
            species: 1,
            breed: 2,
            gender: Gender::Male,
            birth_date: None,
            color: None,
            weight: Some(12.5),
            microchip_number: None,
            observations: None,
            active: true,
        }
    }

    #[test]
    fn serializes_flat_camel_case_without_empty_optionals() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["namePet"], "Rex");
        assert_eq!(json["gender"], "MALE");
        assert_eq!(json["weight"], 12.5);
        assert_eq!(json["active"], true);
        assert!(json.get("document").is_none());
        assert!(json.get("microchipNumber").is_none());
        assert!(json.get("birthDate").is_none());
    }

    #[test]
    fn gender_parses_code_or_label() {
        assert_eq!(Gender::parse("Macho"), Some(Gender::Male));
        assert_eq!(Gender::parse("female"), Some(Gender::Female));
        assert_eq!(Gender::parse("Fêmea"), Some(Gender::Female));
        assert_eq!(Gender::parse("?"), None);
        assert_eq!(Gender::Female.code(), "FEMALE");
    }
}
