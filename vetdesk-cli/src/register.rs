//! `vetdesk register <file.toml>`
//!
//! ```toml
//! [tutor]
//! name = "Ana Souza"
//! email = "ana@example.com"
//!
//! [address]
//! cep = "01310-100"
//! number = "1000"
//!
//! [pet]
//! name = "Rex"
//! species = 1
//! breed = 2
//! gender = "MALE"
//! weight = "12,5"
//! ```
//!
//! Street, neighbourhood, city and state may be left out when the CEP
//! resolves; values from the lookup win over the file.

use std::path::Path;

use anyhow::{Context, Result};
use vetdesk_core::services::{AddressField, RegistrationForm, RegistrationStep, TutorRegistration};

pub fn read_form(path: &Path) -> Result<RegistrationForm> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_form(&text).with_context(|| format!("Invalid registration file {}", path.display()))
}

pub fn parse_form(text: &str) -> Result<RegistrationForm> {
    Ok(toml::from_str(text)?)
}

/// Feed `form` through the workflow the way a person filling it in would.
pub async fn fill(flow: &mut TutorRegistration, form: &RegistrationForm) {
    *flow.tutor_mut() = form.tutor.clone();

    flow.set_cep(&form.address.cep).await;
    let address = &form.address;
    let fields = [
        (AddressField::Street, &address.street),
        (AddressField::Number, &address.number),
        (AddressField::Complement, &address.complement),
        (AddressField::Neighborhood, &address.neighborhood),
        (AddressField::City, &address.city),
        (AddressField::State, &address.state),
        (AddressField::Country, &address.country),
    ];
    for (field, value) in fields {
        if value.trim().is_empty() {
            continue;
        }
        if let Err(e) = flow.set_address_field(field, value) {
            tracing::debug!("Keeping looked-up {field:?}: {e}");
        }
    }

    let pet = &form.pet;
    flow.set_pet_name(&pet.name);
    flow.set_species(pet.species);
    flow.set_breed(pet.breed);
    flow.pet_mut()
        .gender(pet.gender)
        .birth_date(&pet.birth_date)
        .color(&pet.color)
        .weight(&pet.weight)
        .microchip_number(&pet.microchip_number)
        .observations(&pet.observations);
}

/// Walk every step, then submit. Stops at the first invalid step.
pub async fn run(flow: &mut TutorRegistration) -> Result<()> {
    while flow.step() != RegistrationStep::Review {
        flow.next()?;
    }
    flow.submit().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sections_with_defaults() {
        let form = parse_form(
            r#"
            [tutor]
            name = "Ana Souza"
            email = "ana@example.com"

            [address]
            cep = "01310100"
            number = "1000"

            [pet]
            name = "Rex"
            species = 1
            gender = "FEMALE"
            "#,
        )
        .unwrap();
        assert_eq!(form.tutor.name, "Ana Souza");
        assert_eq!(form.address.country, "Brasil");
        assert_eq!(form.pet.species, Some(1));
        assert_eq!(form.pet.breed, None);
        assert_eq!(form.pet.gender, Some(vetdesk_api::Gender::Female));
    }

    #[test]
    fn rejects_unknown_gender() {
        assert!(parse_form("[pet]\ngender = \"X\"\n").is_err());
    }
}
