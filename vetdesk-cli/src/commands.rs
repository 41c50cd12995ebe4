use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, NaiveDate, Utc};
use vetdesk_api::{
    AddTutorRequest, Annotated, Appointment, ClinicService, CreateAppointmentRequest,
    CreateProductRequest, Employee, Grooming, ItemKind, Payment, Pet, Product, Resource,
    ResourceEndpoint, ServiceRequest, Tutor, UpdateEmployeeRequest, format_cep,
};
use vetdesk_app::AppState;
use vetdesk_core::LoadOutcome;
use vetdesk_core::services::PaginatedResourceList;

use crate::cli::{AnnotatedKind, ResourceKind, ServiceFields};
use crate::register;
use crate::render::{self, TableRow};

/// Run `$body` with `$R` bound to the record type of `$kind`.
macro_rules! with_resource {
    ($kind:expr, $R:ident => $body:expr) => {
        match $kind {
            ResourceKind::Appointments => {
                type $R = Appointment;
                $body
            }
            ResourceKind::Groomings => {
                type $R = Grooming;
                $body
            }
            ResourceKind::Employees => {
                type $R = Employee;
                $body
            }
            ResourceKind::Products => {
                type $R = Product;
                $body
            }
            ResourceKind::Services => {
                type $R = ClinicService;
                $body
            }
            ResourceKind::Pets => {
                type $R = Pet;
                $body
            }
            ResourceKind::Tutors => {
                type $R = Tutor;
                $body
            }
            ResourceKind::Payments => {
                type $R = Payment;
                $body
            }
        }
    };
}

pub async fn list(state: &AppState, kind: ResourceKind, page: u32, search: Option<String>) -> Result<()> {
    with_resource!(kind, R => show_page::<R>(state, page, search).await)
}

async fn show_page<R: TableRow>(state: &AppState, page: u32, search: Option<String>) -> Result<()> {
    let list = state.ctx.list::<R>();

    let outcome = match search {
        Some(term) => {
            list.set_search_term(term);
            list.submit_search().await
        }
        None => list.mount().await,
    };
    loaded::<R>(outcome)?;
    go_to_page(&list, page).await?;

    println!("{}", render::page(&list.snapshot()));
    Ok(())
}

fn loaded<R: Resource>(outcome: LoadOutcome) -> Result<()> {
    if outcome == LoadOutcome::Failed {
        bail!("Erro ao carregar {}", R::LABEL);
    }
    Ok(())
}

/// Move a loaded list to `page`, failing when it is out of range.
async fn go_to_page<R: Resource>(list: &PaginatedResourceList<R>, page: u32) -> Result<()> {
    if page == 1 {
        return Ok(());
    }
    match list.change_page(page).await {
        Some(outcome) => loaded::<R>(outcome),
        None => {
            let total = list.snapshot().total_pages;
            bail!("Página {page} fora do intervalo (1-{total})");
        }
    }
}

pub async fn delete(state: &AppState, kind: ResourceKind, id: &str, page: u32, yes: bool) -> Result<()> {
    with_resource!(kind, R => delete_one::<R>(state, id, page, yes).await)
}

async fn delete_one<R: TableRow>(state: &AppState, id: &str, page: u32, yes: bool) -> Result<()> {
    if !yes && !confirm(&format!("Excluir {} {id}?", R::NOUN))? {
        println!("Cancelado.");
        return Ok(());
    }

    let list = state.ctx.list::<R>();
    delete_on_page(&list, id, page).await?;

    println!("{}", render::page(&list.snapshot()));
    Ok(())
}

/// Open `page`, then delete `id` and reload that page.
///
/// Nothing is deleted when the page cannot be shown.
async fn delete_on_page<R: Resource>(
    list: &PaginatedResourceList<R>,
    id: &str,
    page: u32,
) -> Result<LoadOutcome> {
    loaded::<R>(list.mount().await)?;
    go_to_page(list, page).await?;
    Ok(list.delete_and_refresh(id).await?)
}

fn confirm(question: &str) -> Result<bool> {
    print!("{question} [s/N] ");
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "s" | "sim" | "y" | "yes"))
}

pub async fn cep(state: &AppState, code: &str) -> Result<()> {
    match state.cep.lookup(code).await? {
        Some(address) => {
            println!("CEP:    {}", format_cep(&address.cep));
            println!("Rua:    {}", address.street);
            println!("Bairro: {}", address.neighborhood);
            println!("Cidade: {} - {}", address.city, address.uf);
        }
        None => bail!("{}", vetdesk_core::services::CEP_NOT_FOUND_MESSAGE),
    }
    Ok(())
}

pub async fn register(state: &AppState, file: &Path) -> Result<()> {
    let form = register::read_form(file)?;
    let mut flow = state.ctx.registration();
    register::fill(&mut flow, &form).await;
    register::run(&mut flow).await
}

pub async fn employee_status(state: &AppState, user_id: &str, active: bool) -> Result<()> {
    ResourceEndpoint::<Employee>::new(state.api.clone())
        .change_employee_status(user_id, active)
        .await?;
    println!(
        "Funcionário {user_id}: {}",
        if active { "Ativo" } else { "Inativo" }
    );
    Ok(())
}

pub async fn appointment_status(state: &AppState, id: &str, status: &str) -> Result<()> {
    let status = status.trim().to_uppercase();
    ResourceEndpoint::<Appointment>::new(state.api.clone())
        .update_appointment_status(id, &status)
        .await?;
    println!(
        "Consulta {id}: {}",
        vetdesk_api::labels::appointment_status_label(&status)
    );
    Ok(())
}

fn or_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_date_time(input: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(input.trim())
        .map(|d| d.with_timezone(&Utc))
        .with_context(|| format!("Data inválida: {input}"))
}

fn parse_date(input: &str) -> Result<DateTime<Utc>> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|d| d.and_utc())
        .with_context(|| format!("Data inválida: {input}"))
}

#[allow(clippy::too_many_arguments)]
pub async fn create_appointment(
    state: &AppState,
    pet: String,
    panel: String,
    payment_order: String,
    vet: Option<String>,
    kind: i64,
    specialty: i64,
    status: &str,
    description: Option<String>,
    scheduled_at: Option<&str>,
) -> Result<()> {
    let request = CreateAppointmentRequest {
        pet_id: pet.trim().to_string(),
        panel_id: panel.trim().to_string(),
        vet_id: or_none(vet),
        payment_order_id: payment_order.trim().to_string(),
        status: status.trim().to_uppercase(),
        kind,
        type_specialty: specialty,
        description: or_none(description),
        scheduled_at: scheduled_at.map(parse_date_time).transpose()?,
    };
    ResourceEndpoint::<Appointment>::new(state.api.clone())
        .create_appointment(&request)
        .await?;
    println!("Consulta cadastrada com sucesso!");
    Ok(())
}

fn service_request(fields: ServiceFields) -> ServiceRequest {
    ServiceRequest {
        name: fields.name.trim().to_string(),
        description: or_none(fields.description),
        category: fields.category.trim().to_string(),
        duration: fields.duration,
        price: fields.price,
        commission: fields.commission,
        active: !fields.inactive,
    }
}

pub async fn create_service(state: &AppState, fields: ServiceFields) -> Result<()> {
    ResourceEndpoint::<ClinicService>::new(state.api.clone())
        .create_service(&service_request(fields))
        .await?;
    println!("Serviço cadastrado com sucesso!");
    Ok(())
}

pub async fn update_service(state: &AppState, id: &str, fields: ServiceFields) -> Result<()> {
    ResourceEndpoint::<ClinicService>::new(state.api.clone())
        .update_service(id, &service_request(fields))
        .await?;
    println!("Serviço atualizado com sucesso!");
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub async fn create_product(
    state: &AppState,
    system: &str,
    name: String,
    kind: String,
    price_sale: f64,
    price_pay: f64,
    quantity: i64,
    batch: Option<String>,
    manufacturer: Option<String>,
    description: Option<String>,
    expires: Option<&str>,
) -> Result<()> {
    let expiration_date = match expires {
        Some(date) => parse_date(date)?,
        None => Utc::now(),
    };
    let request = CreateProductRequest {
        name: name.trim().to_string(),
        description: or_none(description),
        kind: kind.trim().to_uppercase(),
        batch_number: or_none(batch),
        manufacturer: or_none(manufacturer),
        quantity,
        price_pay,
        price_sale,
        expiration_date,
        active: true,
    };
    ResourceEndpoint::<Product>::new(state.api.clone())
        .create_product(system, &request)
        .await?;
    println!("Produto cadastrado com sucesso!");
    Ok(())
}

pub async fn update_employee(state: &AppState, id: &str, request: UpdateEmployeeRequest) -> Result<()> {
    let request = UpdateEmployeeRequest {
        name: request.name.trim().to_string(),
        email: request.email.trim().to_string(),
        document: or_none(request.document),
        phone: or_none(request.phone),
        roles: request.roles.trim().to_uppercase(),
        crmv: or_none(request.crmv),
        crmv_state: or_none(request.crmv_state).map(|uf| uf.to_uppercase()),
    };
    ResourceEndpoint::<Employee>::new(state.api.clone())
        .update_employee(id, &request)
        .await?;
    println!("Funcionário atualizado com sucesso!");
    Ok(())
}

pub async fn add_tutor(state: &AppState, tutor_id: &str, panel: &str) -> Result<()> {
    ResourceEndpoint::<Tutor>::new(state.api.clone())
        .add_tutor_to_panel(&AddTutorRequest {
            tutor_id: tutor_id.trim().to_string(),
            panel_id: panel.trim().to_string(),
        })
        .await?;
    println!("Tutor adicionado ao sistema com sucesso!");
    Ok(())
}

pub async fn add_note(state: &AppState, record: AnnotatedKind, id: &str, description: &str) -> Result<()> {
    match record {
        AnnotatedKind::Appointment => note_on::<Appointment>(state, id, description).await,
        AnnotatedKind::Grooming => note_on::<Grooming>(state, id, description).await,
    }
}

async fn note_on<R: Annotated>(state: &AppState, id: &str, description: &str) -> Result<()> {
    ResourceEndpoint::<R>::new(state.api.clone())
        .add_note(id, description)
        .await?;
    println!("Nota adicionada com sucesso!");
    Ok(())
}

pub async fn add_item(
    state: &AppState,
    record: AnnotatedKind,
    id: &str,
    kind: ItemKind,
    item_id: &str,
) -> Result<()> {
    match record {
        AnnotatedKind::Appointment => item_on::<Appointment>(state, id, kind, item_id).await,
        AnnotatedKind::Grooming => item_on::<Grooming>(state, id, kind, item_id).await,
    }
}

async fn item_on<R: Annotated>(state: &AppState, id: &str, kind: ItemKind, item_id: &str) -> Result<()> {
    ResourceEndpoint::<R>::new(state.api.clone())
        .add_item(id, kind, item_id)
        .await?;
    println!("Item adicionado com sucesso!");
    Ok(())
}
