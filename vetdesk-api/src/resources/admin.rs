use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Resource;
use crate::labels;

// ============ Employee ============

/// Clinic staff member.
///
/// `id` is the employee profile; `user_id` is the login account, which is
/// what the status toggle addresses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub document: Option<String>,
    #[serde(default)]
    pub roles: String,
    /// `true` when the account is active.
    pub status: bool,
}

impl Employee {
    pub fn roles_label(&self) -> String {
        labels::role_label(&self.roles)
    }

    pub fn status_label(&self) -> &'static str {
        if self.status { "Ativo" } else { "Inativo" }
    }
}

impl Resource for Employee {
    const LIST_PATH: &'static str = "admin/clinic-vet-user";
    const ITEM_PATH: &'static str = "admin/clinic-vet-user";
    const ITEMS_KEY: &'static str = "users";
    const LABEL: &'static str = "funcionários";
    const NOUN: &'static str = "funcionário";
    const DELETED_MESSAGE: &'static str = "Funcionário excluído com sucesso!";

    fn id(&self) -> &str {
        &self.id
    }
}

// ============ Product ============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub batch_number: Option<String>,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default, deserialize_with = "crate::utils::number::flexible_f64")]
    pub price_pay: Option<f64>,
    #[serde(default, deserialize_with = "crate::utils::number::flexible_f64")]
    pub price_sale: Option<f64>,
    #[serde(default, with = "crate::utils::datetime")]
    pub expiration_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub active: bool,
}

impl Product {
    pub fn kind_label(&self) -> String {
        labels::product_type_label(&self.kind)
    }
}

impl Resource for Product {
    const LIST_PATH: &'static str = "admin/product";
    const ITEM_PATH: &'static str = "admin/product";
    const ITEMS_KEY: &'static str = "products";
    const LABEL: &'static str = "produtos";
    const NOUN: &'static str = "produto";
    const DELETED_MESSAGE: &'static str = "Produto excluído com sucesso!";

    fn id(&self) -> &str {
        &self.id
    }
}

// ============ Service ============

/// A billable service offered by the clinic (not a Rust "service").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicService {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: String,
    /// Minutes.
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default, deserialize_with = "crate::utils::number::flexible_f64")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "crate::utils::number::flexible_f64")]
    pub commission: Option<f64>,
    #[serde(default)]
    pub active: bool,
}

impl Resource for ClinicService {
    const LIST_PATH: &'static str = "admin/services";
    const ITEM_PATH: &'static str = "admin/service";
    const ITEMS_KEY: &'static str = "services";
    const LABEL: &'static str = "serviços";
    const NOUN: &'static str = "serviço";
    const DELETED_MESSAGE: &'static str = "Serviço excluído com sucesso!";

    fn id(&self) -> &str {
        &self.id
    }
}

// ============ Payment ============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: String,
    #[serde(default, deserialize_with = "crate::utils::number::flexible_f64")]
    pub amount: Option<f64>,
    pub status: String,
    #[serde(default, with = "crate::utils::datetime")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Payment {
    pub fn status_label(&self) -> String {
        labels::payment_status_label(&self.status)
    }
}

impl Resource for Payment {
    const LIST_PATH: &'static str = "admin/payments";
    const ITEM_PATH: &'static str = "admin/payments";
    const ITEMS_KEY: &'static str = "payments";
    const LABEL: &'static str = "pagamentos";
    const NOUN: &'static str = "pagamento";
    const DELETED_MESSAGE: &'static str = "Pagamento excluído com sucesso!";

    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn employee_labels() {
        let json = r#"{"id":"e1","userId":"u1","name":"Bia","email":"bia@x.com","phone":"1199","roles":"CLINIC_VET","status":false}"#;
        let e: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(e.roles_label(), "Veterinário");
        assert_eq!(e.status_label(), "Inativo");
        assert_eq!(e.id(), "e1");
        assert_eq!(e.user_id, "u1");
    }

    #[test]
    fn product_with_decimal_strings() {
        let json = r#"{"id":"pr1","name":"Ração","type":"FOOD","quantity":3,"pricePay":"10.00","priceSale":19.9,"expirationDate":"2026-01-31","active":true}"#;
        let p: Product = serde_json::from_str(json).unwrap();
        assert_eq!(p.kind_label(), "Alimento");
        assert_eq!(p.price_pay, Some(10.0));
        assert_eq!(p.price_sale, Some(19.9));
        assert!(p.expiration_date.is_some());
    }

    #[test]
    fn payment_status() {
        let json = r#"{"id":"pay1","amount":"99.90","status":"COMPLETED","createdAt":"2025-10-01T10:00:00Z"}"#;
        let p: Payment = serde_json::from_str(json).unwrap();
        assert_eq!(p.status_label(), "Concluído");
    }
}
