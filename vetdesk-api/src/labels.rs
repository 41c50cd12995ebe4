//! Display labels for the coded fields the backend sends
//!
//! Numeric catalogues (species, breed, appointment type, vet specialty) fall
//! back to `"<Kind> N"` for codes they don't know. String enumerations
//! (statuses, product type, role, gender) render unknown codes verbatim.
//! Each catalogue also exposes its `(value, label)` option list for pickers.

use serde::{Deserialize, Serialize};

/// A coded field that arrives either as a number or as a string.
///
/// The appointment endpoints send `species: 1`; the pet endpoints send
/// `species: "1"` or, on older records, the label itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Code {
    Number(i64),
    Text(String),
}

impl Code {
    /// Numeric value, parsing numeric strings.
    pub fn as_number(&self) -> Option<i64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }

    /// Apply a numeric catalogue; non-numeric text is shown as is.
    pub fn label_with(&self, catalogue: fn(i64) -> String) -> String {
        match (self.as_number(), self) {
            (Some(n), _) => catalogue(n),
            (None, Self::Text(s)) => s.clone(),
            (None, Self::Number(n)) => n.to_string(),
        }
    }
}

impl From<i64> for Code {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

// ============ Numeric catalogues ============

pub const SPECIES_OPTIONS: &[(i64, &str)] = &[
    (1, "Canino"),
    (2, "Felino"),
    (3, "Ave"),
    (4, "Réptil"),
    (5, "Roedor"),
    (0, "Outro"),
];

/// Breeds offered by the registration forms. `0` is "other".
pub const BREED_OPTIONS: &[(i64, &str)] = &[
    (1, "SRD (Sem Raça Definida)"),
    (2, "Labrador"),
    (3, "Golden Retriever"),
    (4, "Bulldog"),
    (5, "Pastor Alemão"),
    (6, "Poodle"),
    (7, "Yorkshire"),
    (8, "Shih Tzu"),
    (9, "Persa"),
    (10, "Siamês"),
    (11, "Maine Coon"),
    (12, "Outra"),
    (0, "Outro"),
];

pub const APPOINTMENT_TYPE_OPTIONS: &[(i64, &str)] = &[
    (1, "Consulta de Rotina"),
    (2, "Emergência"),
    (3, "Urgência"),
    (4, "Retorno"),
    (5, "Avaliação Especializada"),
];

pub const VET_SPECIALTY_OPTIONS: &[(i64, &str)] = &[
    (1, "Clínica Geral"),
    (2, "Ortopedia"),
    (3, "Neurologia"),
    (4, "Cardiologia"),
    (5, "Dermatologia"),
    (6, "Oftalmologia"),
    (7, "Otorrinolaringologia"),
    (8, "Nefrologia / Urologia"),
    (9, "Gastroenterologia"),
    (10, "Endocrinologia"),
    (11, "Oncologia"),
    (12, "Anestesiologia"),
    (13, "Reprodução e Obstetrícia"),
    (14, "Odontologia Veterinária"),
    (15, "Hematologia"),
    (16, "Infectologia"),
    (17, "Nutrição"),
    (18, "Comportamental"),
    (19, "Fisioterapia"),
    (20, "Acupuntura"),
    (21, "Hidroterapia"),
    (22, "Reabilitação"),
    (23, "Produção Animal"),
];

fn lookup_numeric(options: &'static [(i64, &'static str)], code: i64) -> Option<&'static str> {
    options
        .iter()
        .find(|(value, _)| *value == code)
        .map(|(_, label)| *label)
}

pub fn species_label(code: i64) -> String {
    lookup_numeric(SPECIES_OPTIONS, code).map_or_else(|| format!("Espécie {code}"), str::to_string)
}

pub fn breed_label(code: i64) -> String {
    lookup_numeric(BREED_OPTIONS, code).map_or_else(|| format!("Raça {code}"), str::to_string)
}

pub fn appointment_type_label(code: i64) -> String {
    lookup_numeric(APPOINTMENT_TYPE_OPTIONS, code)
        .map_or_else(|| format!("Tipo {code}"), str::to_string)
}

pub fn vet_specialty_label(code: i64) -> String {
    lookup_numeric(VET_SPECIALTY_OPTIONS, code)
        .map_or_else(|| format!("Especialidade {code}"), str::to_string)
}

// ============ String enumerations ============

pub const APPOINTMENT_STATUS_OPTIONS: &[(&str, &str)] = &[
    ("PENDING", "Pendente"),
    ("CONFIRMED", "Confirmada"),
    ("INPROCESS", "Em Andamento"),
    ("COMPLETED", "Concluída"),
    ("CANCELLED", "Cancelada"),
];

pub const GROOMING_STATUS_OPTIONS: &[(&str, &str)] = &[
    ("IN_PROGRESS", "Em Andamento"),
    ("DISCHARGED", "Finalizado"),
    ("CANCELLED", "Cancelado"),
];

pub const PAYMENT_STATUS_OPTIONS: &[(&str, &str)] = &[
    ("PENDING", "Pendente"),
    ("COMPLETED", "Concluído"),
    ("FAILED", "Falhou"),
    ("CANCELLED", "Cancelado"),
];

pub const PRODUCT_TYPE_OPTIONS: &[(&str, &str)] = &[
    ("MEDICINE", "Medicamento"),
    ("FOOD", "Alimento"),
    ("TOY", "Brinquedo"),
    ("HYGIENE", "Higiene"),
    ("ACCESSORY", "Acessório"),
];

pub const ROLE_OPTIONS: &[(&str, &str)] = &[
    ("ADMIN", "Administrador"),
    ("CLINIC_ADMIN", "Administrador da Clínica"),
    ("CLINIC_VET", "Veterinário"),
    ("CLINIC_STAFF", "Equipe"),
    ("CLINIC_RECEPTIONIST", "Recepcionista"),
];

pub const GENDER_OPTIONS: &[(&str, &str)] = &[("MALE", "Macho"), ("FEMALE", "Fêmea")];

fn lookup_text(options: &[(&str, &str)], code: &str) -> String {
    options
        .iter()
        .find(|(value, _)| value.eq_ignore_ascii_case(code.trim()))
        .map_or_else(|| code.to_string(), |(_, label)| (*label).to_string())
}

pub fn appointment_status_label(code: &str) -> String {
    lookup_text(APPOINTMENT_STATUS_OPTIONS, code)
}

pub fn grooming_status_label(code: &str) -> String {
    lookup_text(GROOMING_STATUS_OPTIONS, code)
}

pub fn payment_status_label(code: &str) -> String {
    lookup_text(PAYMENT_STATUS_OPTIONS, code)
}

pub fn product_type_label(code: &str) -> String {
    lookup_text(PRODUCT_TYPE_OPTIONS, code)
}

/// Roles come as a single code or a comma-separated list.
pub fn role_label(code: &str) -> String {
    code.split(',')
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(|r| lookup_text(ROLE_OPTIONS, r))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn gender_label(code: &str) -> String {
    lookup_text(GENDER_OPTIONS, code)
}

/// Whether `status` is one of the appointment status codes.
pub fn is_appointment_status(status: &str) -> bool {
    APPOINTMENT_STATUS_OPTIONS
        .iter()
        .any(|(value, _)| *value == status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_catalogues_with_fallbacks() {
        assert_eq!(species_label(1), "Canino");
        assert_eq!(species_label(0), "Outro");
        assert_eq!(species_label(9), "Espécie 9");
        assert_eq!(breed_label(0), "Outro");
        assert_eq!(breed_label(10), "Siamês");
        assert_eq!(breed_label(99), "Raça 99");
        assert_eq!(appointment_type_label(2), "Emergência");
        assert_eq!(appointment_type_label(7), "Tipo 7");
        assert_eq!(vet_specialty_label(8), "Nefrologia / Urologia");
        assert_eq!(vet_specialty_label(23), "Produção Animal");
        assert_eq!(vet_specialty_label(24), "Especialidade 24");
    }

    #[test]
    fn string_enumerations_render_unknown_verbatim() {
        assert_eq!(appointment_status_label("INPROCESS"), "Em Andamento");
        assert_eq!(appointment_status_label("ARCHIVED"), "ARCHIVED");
        assert_eq!(grooming_status_label("DISCHARGED"), "Finalizado");
        assert_eq!(payment_status_label("FAILED"), "Falhou");
        assert_eq!(product_type_label("HYGIENE"), "Higiene");
        assert_eq!(gender_label("FEMALE"), "Fêmea");
    }

    #[test]
    fn role_list_is_labelled_item_by_item() {
        assert_eq!(role_label("CLINIC_VET"), "Veterinário");
        assert_eq!(
            role_label("CLINIC_ADMIN, CLINIC_STAFF"),
            "Administrador da Clínica, Equipe"
        );
    }

    #[test]
    fn code_accepts_number_or_string() {
        let n: Code = serde_json::from_str("2").unwrap();
        let s: Code = serde_json::from_str(r#""2""#).unwrap();
        let t: Code = serde_json::from_str(r#""Canino""#).unwrap();
        assert_eq!(n.label_with(species_label), "Felino");
        assert_eq!(s.label_with(species_label), "Felino");
        assert_eq!(t.label_with(species_label), "Canino");
    }

    #[test]
    fn option_lists_are_complete() {
        assert_eq!(VET_SPECIALTY_OPTIONS.len(), 23);
        assert_eq!(APPOINTMENT_STATUS_OPTIONS.len(), 5);
        assert!(is_appointment_status("CONFIRMED"));
        assert!(!is_appointment_status("confirmed"));
    }
}
