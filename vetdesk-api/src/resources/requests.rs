//! Create/update bodies for the record forms
//!
//! Optional fields left as `None` are omitted from the JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, Result};

fn require(param: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ApiError::InvalidParameter {
            param: param.to_string(),
            detail: "must not be empty".to_string(),
        });
    }
    Ok(())
}

/// Body of `POST appointment`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentRequest {
    pub pet_id: String,
    pub panel_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vet_id: Option<String>,
    pub payment_order_id: String,
    pub status: String,
    #[serde(rename = "type")]
    pub kind: i64,
    pub type_specialty: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<DateTime<Utc>>,
}

impl CreateAppointmentRequest {
    pub fn validate(&self) -> Result<()> {
        require("petId", &self.pet_id)?;
        require("panelId", &self.panel_id)?;
        require("paymentOrderId", &self.payment_order_id)?;
        if !crate::labels::is_appointment_status(&self.status) {
            return Err(ApiError::InvalidParameter {
                param: "status".to_string(),
                detail: format!("unknown appointment status '{}'", self.status),
            });
        }
        Ok(())
    }
}

/// Body of `POST admin/service` and `PUT admin/service/<id>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: String,
    /// Minutes.
    pub duration: u32,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commission: Option<f64>,
    pub active: bool,
}

impl ServiceRequest {
    /// Duration used when the form leaves it blank.
    pub const DEFAULT_DURATION: u32 = 30;

    pub fn validate(&self) -> Result<()> {
        require("name", &self.name)?;
        require("category", &self.category)?;
        if !self.price.is_finite() || self.price <= 0.0 {
            return Err(ApiError::InvalidParameter {
                param: "price".to_string(),
                detail: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

/// Body of `POST <system>/product`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    pub quantity: i64,
    pub price_pay: f64,
    pub price_sale: f64,
    pub expiration_date: DateTime<Utc>,
    pub active: bool,
}

impl CreateProductRequest {
    pub fn validate(&self) -> Result<()> {
        require("name", &self.name)?;
        require("type", &self.kind)?;
        if !self.price_sale.is_finite() || self.price_sale <= 0.0 {
            return Err(ApiError::InvalidParameter {
                param: "priceSale".to_string(),
                detail: "must be greater than zero".to_string(),
            });
        }
        if self.quantity < 0 {
            return Err(ApiError::InvalidParameter {
                param: "quantity".to_string(),
                detail: "must not be negative".to_string(),
            });
        }
        Ok(())
    }
}

/// Body of `PUT admin/clinic-vet-user/<id>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployeeRequest {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub roles: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crmv: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crmv_state: Option<String>,
}

impl UpdateEmployeeRequest {
    pub fn validate(&self) -> Result<()> {
        require("name", &self.name)?;
        require("email", &self.email)?;
        require("roles", &self.roles)
    }
}

/// Body of `POST admin/tutors/add`: link an existing tutor to a panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddTutorRequest {
    pub tutor_id: String,
    pub panel_id: String,
}

/// Body of `POST <appointment|grooming>/<id>/notes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteRequest {
    pub description: String,
}

/// What an attached item refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ItemKind {
    Service,
    Product,
}

impl ItemKind {
    /// Accepts the code (`SERVICE`) or the label (`Serviço`).
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_uppercase().as_str() {
            "SERVICE" | "SERVIÇO" | "SERVICO" => Some(Self::Service),
            "PRODUCT" | "PRODUTO" => Some(Self::Product),
            _ => None,
        }
    }
}

/// Body of `POST <appointment|grooming>/<id>/items`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRequest {
    #[serde(rename = "type")]
    pub kind: ItemKind,
    pub item_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn service() -> ServiceRequest {
        ServiceRequest {
            name: "Banho".to_string(),
            description: None,
            category: "GROOMING".to_string(),
            duration: ServiceRequest::DEFAULT_DURATION,
            price: 60.0,
            commission: None,
            active: true,
        }
    }

    #[test]
    fn service_body_omits_missing_optionals() {
        let body = serde_json::to_value(service()).unwrap();
        assert_eq!(
            body,
            json!({"name":"Banho","category":"GROOMING","duration":30,"price":60.0,"active":true})
        );
    }

    #[test]
    fn service_without_price_is_invalid() {
        let mut request = service();
        request.price = 0.0;
        assert!(matches!(
            request.validate(),
            Err(ApiError::InvalidParameter { ref param, .. }) if param == "price"
        ));
        assert!(service().validate().is_ok());
    }

    #[test]
    fn appointment_type_is_renamed_and_status_checked() {
        let mut request = CreateAppointmentRequest {
            pet_id: "p1".to_string(),
            panel_id: "panel".to_string(),
            vet_id: None,
            payment_order_id: "po1".to_string(),
            status: "PENDING".to_string(),
            kind: 1,
            type_specialty: 2,
            description: None,
            scheduled_at: None,
        };
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["type"], 1);
        assert_eq!(body["typeSpecialty"], 2);
        assert!(body.get("vetId").is_none());
        assert!(request.validate().is_ok());

        request.status = "LATE".to_string();
        assert!(request.validate().is_err());
    }

    #[test]
    fn item_kind_accepts_code_or_label() {
        assert_eq!(ItemKind::parse("serviço"), Some(ItemKind::Service));
        assert_eq!(ItemKind::parse("PRODUCT"), Some(ItemKind::Product));
        assert_eq!(ItemKind::parse("vacina"), None);
        let body = serde_json::to_value(ItemRequest {
            kind: ItemKind::Product,
            item_id: "x".to_string(),
        })
        .unwrap();
        assert_eq!(body, json!({"type":"PRODUCT","itemId":"x"}));
    }
}
