//! VetDesk command-line front end
//!
//! Loads the config, opens a session when credentials are configured and
//! runs one subcommand against the clinic backend.

mod cli;
mod commands;
mod register;
mod render;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use vetdesk_api::UpdateEmployeeRequest;
use vetdesk_app::{AppConfig, AppStateBuilder, init_logging};
use vetdesk_core::notify::{Notification, NotificationLevel, Notifier};

use cli::{Cli, Command};

/// Notifications go to stderr so tables on stdout stay clean.
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        let mark = match notification.level {
            NotificationLevel::Success => "✓",
            NotificationLevel::Info => "i",
            NotificationLevel::Error => "✗",
        };
        eprintln!("{mark} {}", notification.message);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::load(cli.config.as_deref())?;
    let state = AppStateBuilder::new()
        .config(config)
        .notifier(Arc::new(ConsoleNotifier))
        .build()?;
    state.run_startup().await?;

    match cli.command {
        Command::List {
            resource,
            page,
            search,
        } => commands::list(&state, resource, page, search).await,
        Command::Delete {
            resource,
            id,
            page,
            yes,
        } => commands::delete(&state, resource, &id, page, yes).await,
        Command::Cep { code } => commands::cep(&state, &code).await,
        Command::Register { file } => commands::register(&state, &file).await,
        Command::EmployeeStatus { user_id, active } => {
            commands::employee_status(&state, &user_id, active).await
        }
        Command::AppointmentStatus { id, status } => {
            commands::appointment_status(&state, &id, &status).await
        }
        Command::CreateAppointment {
            pet,
            panel,
            payment_order,
            vet,
            kind,
            specialty,
            status,
            description,
            scheduled_at,
        } => {
            commands::create_appointment(
                &state,
                pet,
                panel,
                payment_order,
                vet,
                kind,
                specialty,
                &status,
                description,
                scheduled_at.as_deref(),
            )
            .await
        }
        Command::CreateService { fields } => commands::create_service(&state, fields).await,
        Command::UpdateService { id, fields } => {
            commands::update_service(&state, &id, fields).await
        }
        Command::CreateProduct {
            system,
            name,
            kind,
            price_sale,
            price_pay,
            quantity,
            batch,
            manufacturer,
            description,
            expires,
        } => {
            commands::create_product(
                &state,
                &system,
                name,
                kind,
                price_sale,
                price_pay,
                quantity,
                batch,
                manufacturer,
                description,
                expires.as_deref(),
            )
            .await
        }
        Command::UpdateEmployee {
            id,
            name,
            email,
            roles,
            document,
            phone,
            crmv,
            crmv_state,
        } => {
            let request = UpdateEmployeeRequest {
                name,
                email,
                document,
                phone,
                roles,
                crmv,
                crmv_state,
            };
            commands::update_employee(&state, &id, request).await
        }
        Command::AddTutor { tutor_id, panel } => {
            commands::add_tutor(&state, &tutor_id, &panel).await
        }
        Command::AddNote {
            record,
            id,
            description,
        } => commands::add_note(&state, record, &id, &description).await,
        Command::AddItem {
            record,
            id,
            kind,
            item_id,
        } => commands::add_item(&state, record, &id, kind, &item_id).await,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose) {
        eprintln!("{e}");
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!("Command failed: {e:?}");
            eprintln!("Erro: {e:#}");
            ExitCode::FAILURE
        }
    }
}
