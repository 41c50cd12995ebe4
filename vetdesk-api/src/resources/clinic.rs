use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Resource;
use crate::labels::{self, Code};

/// Pet as embedded in appointments and groomings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PetSummary {
    pub id: String,
    pub name: String,
    pub species: Code,
    pub breed: Code,
}

impl PetSummary {
    pub fn species_label(&self) -> String {
        self.species.label_with(labels::species_label)
    }

    pub fn breed_label(&self) -> String {
        self.breed.label_with(labels::breed_label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VetUser {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VetSummary {
    pub id: String,
    pub user: VetUser,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentOrderSummary {
    pub id: String,
    #[serde(default, deserialize_with = "crate::utils::number::flexible_f64")]
    pub amount: Option<f64>,
    #[serde(default)]
    pub status: Option<String>,
}

// ============ Appointment ============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    #[serde(default)]
    pub pet_id: Option<String>,
    #[serde(default)]
    pub vet_id: Option<String>,
    pub status: String,
    /// Appointment type code (routine, emergency...).
    #[serde(rename = "type")]
    pub kind: i64,
    /// Vet specialty code.
    #[serde(default)]
    pub type_specialty: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, with = "crate::utils::datetime")]
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::utils::datetime")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub pet: Option<PetSummary>,
    #[serde(default)]
    pub vet: Option<VetSummary>,
    #[serde(default)]
    pub payment_order: Option<PaymentOrderSummary>,
}

impl Appointment {
    pub fn status_label(&self) -> String {
        labels::appointment_status_label(&self.status)
    }

    pub fn kind_label(&self) -> String {
        labels::appointment_type_label(self.kind)
    }

    pub fn specialty_label(&self) -> Option<String> {
        self.type_specialty.map(labels::vet_specialty_label)
    }

    pub fn vet_name(&self) -> Option<&str> {
        self.vet.as_ref().map(|v| v.user.name.as_str())
    }
}

impl Resource for Appointment {
    const LIST_PATH: &'static str = "appointment";
    const ITEM_PATH: &'static str = "appointment";
    const ITEMS_KEY: &'static str = "appointments";
    const LABEL: &'static str = "consultas";
    const NOUN: &'static str = "consulta";
    const DELETED_MESSAGE: &'static str = "Consulta excluída com sucesso!";

    fn id(&self) -> &str {
        &self.id
    }
}

// ============ Grooming ============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grooming {
    pub id: String,
    #[serde(default)]
    pub pet_id: Option<String>,
    pub status: String,
    #[serde(default, with = "crate::utils::datetime")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::utils::datetime")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub pet: Option<PetSummary>,
    #[serde(default)]
    pub payment_order: Option<PaymentOrderSummary>,
}

impl Grooming {
    pub fn status_label(&self) -> String {
        labels::grooming_status_label(&self.status)
    }
}

impl Resource for Grooming {
    const LIST_PATH: &'static str = "grooming";
    const ITEM_PATH: &'static str = "grooming";
    const ITEMS_KEY: &'static str = "groomings";
    const LABEL: &'static str = "groomings";
    const NOUN: &'static str = "grooming";
    const DELETED_MESSAGE: &'static str = "Grooming excluído com sucesso!";

    fn id(&self) -> &str {
        &self.id
    }
}

// ============ Pet ============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    pub id: String,
    pub name: String,
    pub species: Code,
    #[serde(default)]
    pub breed: Option<Code>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default, with = "crate::utils::datetime")]
    pub birth_date: Option<DateTime<Utc>>,
    #[serde(default = "default_true")]
    pub active: bool,
}

impl Pet {
    pub fn species_label(&self) -> String {
        self.species.label_with(labels::species_label)
    }

    pub fn breed_label(&self) -> Option<String> {
        self.breed.as_ref().map(|b| b.label_with(labels::breed_label))
    }

    pub fn gender_label(&self) -> Option<String> {
        self.gender.as_deref().map(labels::gender_label)
    }
}

impl Resource for Pet {
    const LIST_PATH: &'static str = "admin/pets";
    const ITEM_PATH: &'static str = "pet";
    const ITEMS_KEY: &'static str = "pets";
    const LABEL: &'static str = "pets";
    const NOUN: &'static str = "pet";
    const DELETED_MESSAGE: &'static str = "Pet excluído com sucesso!";

    fn id(&self) -> &str {
        &self.id
    }
}

// ============ Tutor ============

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tutor {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub document: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl Resource for Tutor {
    const LIST_PATH: &'static str = "admin/tutors";
    const ITEM_PATH: &'static str = "admin/tutors";
    const ITEMS_KEY: &'static str = "tutors";
    const LABEL: &'static str = "tutores";
    const NOUN: &'static str = "tutor";
    const DELETED_MESSAGE: &'static str = "Tutor excluído com sucesso!";

    fn id(&self) -> &str {
        &self.id
    }
}

fn default_true() -> bool {
    true
}
