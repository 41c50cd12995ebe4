//! Admin resources and their HTTP-backed list sources
//!
//! Every admin list (appointments, groomings, employees, products, services,
//! pets, tutors, payments) follows the same contract:
//!
//! - `GET <list path>?page=&limit=&search=` answers
//!   `{ data: { <items key>: [...], total: N } }`
//! - `DELETE <item path>/<id>` removes one record
//!
//! A [`Resource`] names those paths; [`ResourceEndpoint`] binds one resource
//! to the shared [`ApiClient`] and implements [`ListSource`].

mod admin;
mod clinic;
mod requests;

pub use admin::{ClinicService, Employee, Payment, Product};
pub use clinic::{Appointment, Grooming, PaymentOrderSummary, Pet, PetSummary, Tutor, VetSummary};
pub use requests::{
    AddTutorRequest, CreateAppointmentRequest, CreateProductRequest, ItemKind, ItemRequest,
    NoteRequest, ServiceRequest, UpdateEmployeeRequest,
};

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::{DeserializeOwned, IgnoredAny};
use serde_json::{Value, json};

use crate::error::{ApiError, Result};
use crate::http_client::ApiClient;
use crate::traits::ListSource;
use crate::types::{ListQuery, ListResult, decode_list_payload};

/// A record type served by one admin list endpoint.
pub trait Resource: DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection path, e.g. `admin/services`.
    const LIST_PATH: &'static str;
    /// Single-record path prefix, e.g. `admin/service`.
    const ITEM_PATH: &'static str;
    /// Key of the items array inside `data`.
    const ITEMS_KEY: &'static str;
    /// Plural noun used in load errors ("Erro ao carregar consultas").
    const LABEL: &'static str;
    /// Singular noun used in delete errors ("Erro ao excluir consulta").
    const NOUN: &'static str;
    /// Success text after a delete.
    const DELETED_MESSAGE: &'static str;

    fn id(&self) -> &str;
}

/// `ITEM_PATH/<id>` with the id percent-encoded.
pub fn item_path<R: Resource>(id: &str) -> Result<String> {
    Ok(format!("{}/{}", R::ITEM_PATH, require_segment("id", id)?))
}

/// Records that carry notes and attached service/product items.
pub trait Annotated: Resource {}

impl Annotated for Appointment {}
impl Annotated for Grooming {}

fn non_empty<'a>(param: &str, value: &'a str) -> Result<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ApiError::InvalidParameter {
            param: param.to_string(),
            detail: "must not be empty".to_string(),
        });
    }
    Ok(value)
}

fn require_segment(param: &str, value: &str) -> Result<String> {
    non_empty(param, value).map(|v| urlencoding::encode(v).into_owned())
}

/// HTTP-backed [`ListSource`] for one resource.
pub struct ResourceEndpoint<R> {
    client: Arc<ApiClient>,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> ResourceEndpoint<R> {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            _resource: PhantomData,
        }
    }

    /// Fetch a single record.
    pub async fn get(&self, id: &str) -> Result<R> {
        let path = item_path::<R>(id)?;
        self.client.get(&path, &[]).await
    }
}

#[async_trait]
impl<R: Resource> ListSource<R> for ResourceEndpoint<R> {
    async fn fetch_page(&self, query: &ListQuery) -> Result<ListResult<R>> {
        let data: Value = self
            .client
            .get(R::LIST_PATH, &query.to_query_pairs())
            .await?;
        let page = decode_list_payload(R::LIST_PATH, R::ITEMS_KEY, data)?;
        log::debug!(
            "[{}] page {} -> {} item(s) of {}",
            R::LIST_PATH,
            query.page,
            page.items.len(),
            page.total_count
        );
        Ok(page)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let path = item_path::<R>(id)?;
        self.client.delete(&path).await
    }
}

// ============ Record operations outside the list contract ============

impl ResourceEndpoint<Employee> {
    /// `PUT admin/clinic-vet-user/change-status/<userId>` with `{ status }`.
    ///
    /// Takes the account id (`Employee::user_id`), not the profile id.
    pub async fn change_employee_status(&self, user_id: &str, active: bool) -> Result<()> {
        let path = format!(
            "{}/change-status/{}",
            Employee::ITEM_PATH,
            require_segment("user_id", user_id)?
        );
        self.client
            .put::<IgnoredAny, _>(&path, &json!({ "status": active }))
            .await?;
        Ok(())
    }

    /// `PUT admin/clinic-vet-user/<id>` with the edited profile.
    pub async fn update_employee(&self, id: &str, request: &UpdateEmployeeRequest) -> Result<()> {
        request.validate()?;
        let path = item_path::<Employee>(id)?;
        self.client.put::<IgnoredAny, _>(&path, request).await?;
        log::info!("[{}] updated {id}", Employee::ITEM_PATH);
        Ok(())
    }
}

impl ResourceEndpoint<Appointment> {
    /// `PATCH appointment/<id>` with `{ status }`.
    pub async fn update_appointment_status(&self, id: &str, status: &str) -> Result<()> {
        if !crate::labels::is_appointment_status(status) {
            return Err(ApiError::InvalidParameter {
                param: "status".to_string(),
                detail: format!("unknown appointment status '{status}'"),
            });
        }
        let path = item_path::<Appointment>(id)?;
        self.client
            .patch::<IgnoredAny, _>(&path, &json!({ "status": status }))
            .await?;
        Ok(())
    }

    /// `POST appointment`.
    pub async fn create_appointment(&self, request: &CreateAppointmentRequest) -> Result<()> {
        request.validate()?;
        self.client
            .post::<IgnoredAny, _>(Appointment::ITEM_PATH, request)
            .await?;
        log::info!("[{}] created for pet {}", Appointment::ITEM_PATH, request.pet_id);
        Ok(())
    }
}

impl ResourceEndpoint<ClinicService> {
    /// `POST admin/service`.
    pub async fn create_service(&self, request: &ServiceRequest) -> Result<()> {
        request.validate()?;
        self.client
            .post::<IgnoredAny, _>(ClinicService::ITEM_PATH, request)
            .await?;
        log::info!("[{}] created '{}'", ClinicService::ITEM_PATH, request.name);
        Ok(())
    }

    /// `PUT admin/service/<id>`.
    pub async fn update_service(&self, id: &str, request: &ServiceRequest) -> Result<()> {
        request.validate()?;
        let path = item_path::<ClinicService>(id)?;
        self.client.put::<IgnoredAny, _>(&path, request).await?;
        log::info!("[{}] updated {id}", ClinicService::ITEM_PATH);
        Ok(())
    }
}

impl ResourceEndpoint<Product> {
    /// `POST <system>/product`, where `system` is the panel prefix
    /// (`admin`, `petshop`, ...).
    pub async fn create_product(&self, system: &str, request: &CreateProductRequest) -> Result<()> {
        request.validate()?;
        let path = format!("{}/product", require_segment("system", system)?);
        self.client.post::<IgnoredAny, _>(&path, request).await?;
        log::info!("[{path}] created '{}'", request.name);
        Ok(())
    }
}

impl ResourceEndpoint<Tutor> {
    /// `POST admin/tutors/add`: link an existing tutor to a panel.
    pub async fn add_tutor_to_panel(&self, request: &AddTutorRequest) -> Result<()> {
        non_empty("tutorId", &request.tutor_id)?;
        non_empty("panelId", &request.panel_id)?;
        let path = format!("{}/add", Tutor::ITEM_PATH);
        self.client.post::<IgnoredAny, _>(&path, request).await?;
        Ok(())
    }
}

impl<R: Annotated> ResourceEndpoint<R> {
    /// `POST <item path>/<id>/notes`.
    pub async fn add_note(&self, id: &str, description: &str) -> Result<()> {
        let description = non_empty("description", description)?;
        let path = format!("{}/notes", item_path::<R>(id)?);
        let body = NoteRequest {
            description: description.to_string(),
        };
        self.client.post::<IgnoredAny, _>(&path, &body).await?;
        Ok(())
    }

    /// `POST <item path>/<id>/items`.
    pub async fn add_item(&self, id: &str, kind: ItemKind, item_id: &str) -> Result<()> {
        let path = format!("{}/items", item_path::<R>(id)?);
        let body = ItemRequest {
            kind,
            item_id: non_empty("itemId", item_id)?.to_string(),
        };
        self.client.post::<IgnoredAny, _>(&path, &body).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_path_encodes_id() {
        assert_eq!(
            item_path::<Appointment>("abc 1/2").unwrap(),
            "appointment/abc%201%2F2"
        );
        assert_eq!(item_path::<ClinicService>("s1").unwrap(), "admin/service/s1");
        assert_eq!(item_path::<Pet>("p1").unwrap(), "pet/p1");
    }

    #[test]
    fn item_path_rejects_blank_id() {
        assert!(matches!(
            item_path::<Product>("  "),
            Err(ApiError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn resource_table() {
        assert_eq!(
            (Appointment::LIST_PATH, Appointment::ITEMS_KEY),
            ("appointment", "appointments")
        );
        assert_eq!((Grooming::LIST_PATH, Grooming::ITEMS_KEY), ("grooming", "groomings"));
        assert_eq!(
            (Employee::LIST_PATH, Employee::ITEMS_KEY),
            ("admin/clinic-vet-user", "users")
        );
        assert_eq!((Product::LIST_PATH, Product::ITEMS_KEY), ("admin/product", "products"));
        assert_eq!(
            (ClinicService::LIST_PATH, ClinicService::ITEM_PATH, ClinicService::ITEMS_KEY),
            ("admin/services", "admin/service", "services")
        );
        assert_eq!((Pet::LIST_PATH, Pet::ITEMS_KEY), ("admin/pets", "pets"));
        assert_eq!((Tutor::LIST_PATH, Tutor::ITEMS_KEY), ("admin/tutors", "tutors"));
        assert_eq!((Payment::LIST_PATH, Payment::ITEMS_KEY), ("admin/payments", "payments"));
    }
}
