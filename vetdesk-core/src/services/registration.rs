//! Tutor + address + pet registration
//!
//! A four-step form (`Tutor → Address → Pet → Review`) with per-step
//! validation, CEP-driven address prefill and a single submission to
//! `tutor/with-pet`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use vetdesk_api::{
    AddressLookup, CEP_LEN, CepAddress, Gender, TutorRegistrar, TutorWithPetRequest, strip_cep,
};

use crate::error::{CoreError, CoreResult};
use crate::notify::{Notification, Notifier};

pub const DEFAULT_COUNTRY: &str = "Brasil";

pub const REGISTERED_MESSAGE: &str = "Tutor, endereço e pet cadastrados com sucesso!";
pub const REGISTRATION_FAILED_MESSAGE: &str = "Erro ao cadastrar. Tente novamente.";
pub const ADDRESS_FILLED_MESSAGE: &str = "Endereço preenchido automaticamente";
pub const CEP_NOT_FOUND_MESSAGE: &str = "CEP não encontrado";
pub const CEP_LOOKUP_FAILED_MESSAGE: &str = "Erro ao buscar CEP";

/// Brazilian state codes accepted in `state`.
pub const UF_CODES: [&str; 27] = [
    "AC", "AL", "AP", "AM", "BA", "CE", "DF", "ES", "GO", "MA", "MT", "MS", "MG", "PA", "PB", "PR",
    "PE", "PI", "RJ", "RN", "RS", "RO", "RR", "SC", "SP", "SE", "TO",
];

/// Species code meaning "other"; such pets have no breed.
const OTHER_SPECIES: i64 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistrationStep {
    Tutor,
    Address,
    Pet,
    Review,
}

impl RegistrationStep {
    fn next(self) -> Self {
        match self {
            Self::Tutor => Self::Address,
            Self::Address => Self::Pet,
            Self::Pet | Self::Review => Self::Review,
        }
    }

    fn previous(self) -> Self {
        match self {
            Self::Tutor | Self::Address => Self::Tutor,
            Self::Pet => Self::Address,
            Self::Review => Self::Pet,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TutorForm {
    pub name: String,
    pub email: String,
    pub document: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddressForm {
    /// Digits only.
    pub cep: String,
    pub street: String,
    pub number: String,
    pub complement: String,
    pub neighborhood: String,
    pub city: String,
    /// Two-letter state code.
    pub state: String,
    pub country: String,
}

impl Default for AddressForm {
    fn default() -> Self {
        Self {
            cep: String::new(),
            street: String::new(),
            number: String::new(),
            complement: String::new(),
            neighborhood: String::new(),
            city: String::new(),
            state: String::new(),
            country: DEFAULT_COUNTRY.to_string(),
        }
    }
}

impl AddressForm {
    fn clear_prefilled(&mut self) {
        self.street.clear();
        self.neighborhood.clear();
        self.city.clear();
        self.state.clear();
    }

    fn apply(&mut self, address: &CepAddress) {
        self.street.clone_from(&address.street);
        self.neighborhood.clone_from(&address.neighborhood);
        self.city.clone_from(&address.city);
        self.state = address.uf.to_uppercase();
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PetForm {
    pub name: String,
    pub species: Option<i64>,
    pub breed: Option<i64>,
    pub gender: Option<Gender>,
    /// `YYYY-MM-DD`, blank when unknown.
    pub birth_date: String,
    pub color: String,
    /// Decimal kilograms as typed (`"12,5"` or `"12.5"`).
    pub weight: String,
    pub microchip_number: String,
    pub observations: String,
}

/// Complete form contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrationForm {
    pub tutor: TutorForm,
    pub address: AddressForm,
    pub pet: PetForm,
}

/// Address fields a CEP lookup fills and locks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressField {
    Street,
    Number,
    Complement,
    Neighborhood,
    City,
    State,
    Country,
}

impl AddressField {
    fn is_prefilled(self) -> bool {
        matches!(
            self,
            Self::Street | Self::Neighborhood | Self::City | Self::State
        )
    }
}

// ============ Validation ============

fn is_valid_email(email: &str) -> bool {
    // local@domain.tld, no whitespace, one '@'
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

fn require(value: &str, field: &str, message: &str) -> CoreResult<()> {
    if value.trim().is_empty() {
        Err(CoreError::validation(field, message))
    } else {
        Ok(())
    }
}

pub fn validate_tutor(tutor: &TutorForm) -> CoreResult<()> {
    require(&tutor.name, "tutor.name", "Nome do tutor é obrigatório")?;
    require(&tutor.email, "tutor.email", "Email é obrigatório")?;
    if !is_valid_email(tutor.email.trim()) {
        return Err(CoreError::validation("tutor.email", "Email inválido"));
    }
    Ok(())
}

pub fn validate_address(address: &AddressForm) -> CoreResult<()> {
    let cep = address.cep.trim();
    if cep.len() != CEP_LEN || !cep.chars().all(|c| c.is_ascii_digit()) {
        return Err(CoreError::validation("address.cep", "CEP inválido (8 dígitos)"));
    }
    require(&address.street, "address.street", "Rua é obrigatória")?;
    require(&address.number, "address.number", "Número é obrigatório")?;
    require(&address.neighborhood, "address.neighborhood", "Bairro é obrigatório")?;
    require(&address.city, "address.city", "Cidade é obrigatória")?;
    require(&address.state, "address.state", "Estado é obrigatório")?;
    if !UF_CODES.contains(&address.state.trim().to_uppercase().as_str()) {
        return Err(CoreError::validation("address.state", "Estado inválido"));
    }
    Ok(())
}

pub fn validate_pet(pet: &PetForm) -> CoreResult<()> {
    require(&pet.name, "pet.name", "Nome do pet é obrigatório")?;
    if pet.species.is_none() {
        return Err(CoreError::validation("pet.species", "Espécie é obrigatória"));
    }
    if pet.gender.is_none() {
        return Err(CoreError::validation("pet.gender", "Sexo é obrigatório"));
    }
    if parse_weight(&pet.weight).is_err() {
        return Err(CoreError::validation("pet.weight", "Peso inválido"));
    }
    Ok(())
}

fn parse_weight(input: &str) -> Result<Option<f64>, ()> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    input
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|w| w.is_finite() && *w > 0.0)
        .map(Some)
        .ok_or(())
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Build the request body. Every step must already validate.
pub fn build_request(form: &RegistrationForm) -> CoreResult<TutorWithPetRequest> {
    validate_tutor(&form.tutor)?;
    validate_address(&form.address)?;
    validate_pet(&form.pet)?;

    let (tutor, address, pet) = (&form.tutor, &form.address, &form.pet);
    let species = pet.species.unwrap_or(OTHER_SPECIES);
    let breed = if species == OTHER_SPECIES {
        0
    } else {
        pet.breed.unwrap_or(0)
    };
    let gender = pet
        .gender
        .ok_or_else(|| CoreError::validation("pet.gender", "Sexo é obrigatório"))?;
    let weight = parse_weight(&pet.weight)
        .map_err(|()| CoreError::validation("pet.weight", "Peso inválido"))?;

    Ok(TutorWithPetRequest {
        name: tutor.name.trim().to_string(),
        email: tutor.email.trim().to_string(),
        document: optional(&tutor.document),
        phone: optional(&tutor.phone),
        cep: address.cep.trim().to_string(),
        street: address.street.trim().to_string(),
        number: address.number.trim().to_string(),
        complement: optional(&address.complement),
        neighborhood: address.neighborhood.trim().to_string(),
        city: address.city.trim().to_string(),
        state: address.state.trim().to_uppercase(),
        country: optional(&address.country),
        name_pet: pet.name.trim().to_string(),
        species,
        breed,
        gender,
        birth_date: optional(&pet.birth_date),
        color: optional(&pet.color),
        weight,
        microchip_number: optional(&pet.microchip_number),
        observations: optional(&pet.observations),
        active: true,
    })
}

// ============ Workflow ============

/// Result of feeding a CEP into the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CepOutcome {
    /// Same digits as before; nothing happened.
    Unchanged,
    /// Fewer than eight digits; prefilled fields were cleared.
    Incomplete,
    /// Address filled in and locked.
    Filled,
    NotFound,
    LookupFailed,
}

pub struct TutorRegistration {
    lookup: Arc<dyn AddressLookup>,
    registrar: Arc<dyn TutorRegistrar>,
    notifier: Arc<dyn Notifier>,
    form: RegistrationForm,
    step: RegistrationStep,
    address_locked: bool,
}

impl TutorRegistration {
    pub fn new(
        lookup: Arc<dyn AddressLookup>,
        registrar: Arc<dyn TutorRegistrar>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            lookup,
            registrar,
            notifier,
            form: RegistrationForm::default(),
            step: RegistrationStep::Tutor,
            address_locked: false,
        }
    }

    /// Start with the tutor's document already filled (e.g. after a failed
    /// search by document).
    #[must_use]
    pub fn with_document(mut self, document: &str) -> Self {
        self.form.tutor.document = document.trim().to_string();
        self
    }

    pub fn step(&self) -> RegistrationStep {
        self.step
    }

    pub fn form(&self) -> &RegistrationForm {
        &self.form
    }

    pub fn is_address_locked(&self) -> bool {
        self.address_locked
    }

    pub fn tutor_mut(&mut self) -> &mut TutorForm {
        &mut self.form.tutor
    }

    /// Edit an address field. Prefilled fields are read-only while locked.
    pub fn set_address_field(&mut self, field: AddressField, value: &str) -> CoreResult<()> {
        if self.address_locked && field.is_prefilled() {
            return Err(CoreError::InvalidState(
                "Endereço bloqueado; desbloqueie para editar".to_string(),
            ));
        }
        let address = &mut self.form.address;
        let target = match field {
            AddressField::Street => &mut address.street,
            AddressField::Number => &mut address.number,
            AddressField::Complement => &mut address.complement,
            AddressField::Neighborhood => &mut address.neighborhood,
            AddressField::City => &mut address.city,
            AddressField::State => &mut address.state,
            AddressField::Country => &mut address.country,
        };
        *target = value.to_string();
        Ok(())
    }

    /// Re-enable manual edit of the prefilled address fields.
    pub fn unlock_address(&mut self) {
        self.address_locked = false;
    }

    pub fn set_pet_name(&mut self, name: &str) {
        self.form.pet.name = name.to_string();
    }

    /// Changing species always clears the breed.
    pub fn set_species(&mut self, species: Option<i64>) {
        self.form.pet.species = species;
        self.form.pet.breed = None;
    }

    /// Ignored for the "other" species, which has no breed list.
    pub fn set_breed(&mut self, breed: Option<i64>) {
        if self.form.pet.species == Some(OTHER_SPECIES) {
            return;
        }
        self.form.pet.breed = breed;
    }

    pub fn pet_mut(&mut self) -> PetDetails<'_> {
        PetDetails(&mut self.form.pet)
    }

    /// Feed CEP input (punctuation allowed).
    ///
    /// Any change unlocks the address. Fewer than eight digits clears the
    /// prefilled fields; eight digits triggers a lookup.
    pub async fn set_cep(&mut self, input: &str) -> CepOutcome {
        let digits: String = strip_cep(input).chars().take(CEP_LEN).collect();
        if digits == self.form.address.cep {
            return CepOutcome::Unchanged;
        }

        self.form.address.cep.clone_from(&digits);
        self.address_locked = false;

        if digits.len() < CEP_LEN {
            self.form.address.clear_prefilled();
            return CepOutcome::Incomplete;
        }

        match self.lookup.lookup_cep(&digits).await {
            Ok(Some(address)) => {
                self.form.address.apply(&address);
                self.address_locked = true;
                self.notifier
                    .notify(Notification::success(ADDRESS_FILLED_MESSAGE));
                CepOutcome::Filled
            }
            Ok(None) => {
                log::info!("[registration] CEP {digits} not found");
                self.notifier
                    .notify(Notification::error(CEP_NOT_FOUND_MESSAGE));
                CepOutcome::NotFound
            }
            Err(e) => {
                log::warn!("[registration] CEP lookup failed: {e}");
                self.notifier
                    .notify(Notification::error(CEP_LOOKUP_FAILED_MESSAGE));
                CepOutcome::LookupFailed
            }
        }
    }

    fn validate_step(&self, step: RegistrationStep) -> CoreResult<()> {
        match step {
            RegistrationStep::Tutor => validate_tutor(&self.form.tutor),
            RegistrationStep::Address => validate_address(&self.form.address),
            RegistrationStep::Pet => validate_pet(&self.form.pet),
            RegistrationStep::Review => Ok(()),
        }
    }

    /// Advance when the current step validates; otherwise notify the first
    /// problem and stay.
    pub fn next(&mut self) -> CoreResult<RegistrationStep> {
        if let Err(e) = self.validate_step(self.step) {
            self.notifier.notify(Notification::error(e.user_message()));
            return Err(e);
        }
        self.step = self.step.next();
        Ok(self.step)
    }

    /// Go back one step. Never validates.
    pub fn back(&mut self) -> RegistrationStep {
        self.step = self.step.previous();
        self.step
    }

    /// Validate everything and post the registration.
    pub async fn submit(&mut self) -> CoreResult<()> {
        let request = match build_request(&self.form) {
            Ok(request) => request,
            Err(e) => {
                self.notifier.notify(Notification::error(e.user_message()));
                return Err(e);
            }
        };

        match self.registrar.register_tutor_with_pet(&request).await {
            Ok(()) => {
                log::info!("[registration] Registered tutor {}", request.email);
                self.notifier.notify(Notification::success(REGISTERED_MESSAGE));
                Ok(())
            }
            Err(e) => {
                if e.is_expected() {
                    log::warn!("[registration] {e}");
                } else {
                    log::error!("[registration] {e}");
                }
                let message = e.server_message().map_or_else(
                    || REGISTRATION_FAILED_MESSAGE.to_string(),
                    |m| format!("{REGISTRATION_FAILED_MESSAGE} {m}"),
                );
                self.notifier.notify(Notification::error(message));
                Err(e.into())
            }
        }
    }
}

/// Free-text pet fields, editable without side effects.
pub struct PetDetails<'a>(&'a mut PetForm);

impl PetDetails<'_> {
    pub fn gender(self, gender: Option<Gender>) -> Self {
        self.0.gender = gender;
        self
    }

    pub fn birth_date(self, value: &str) -> Self {
        self.0.birth_date = value.to_string();
        self
    }

    pub fn color(self, value: &str) -> Self {
        self.0.color = value.to_string();
        self
    }

    pub fn weight(self, value: &str) -> Self {
        self.0.weight = value.to_string();
        self
    }

    pub fn microchip_number(self, value: &str) -> Self {
        self.0.microchip_number = value.to_string();
        self
    }

    pub fn observations(self, value: &str) -> Self {
        self.0.observations = value.to_string();
        self
    }
}
