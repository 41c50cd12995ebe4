use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use vetdesk_api::ItemKind;

#[derive(Parser)]
#[command(
    name = "vetdesk",
    version,
    about = "VetDesk: clinic admin from the terminal"
)]
pub struct Cli {
    /// Config file (default: <config dir>/vetdesk/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Admin lists reachable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResourceKind {
    Appointments,
    Groomings,
    Employees,
    Products,
    Services,
    Pets,
    Tutors,
    Payments,
}

/// Records that take notes and items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AnnotatedKind {
    Appointment,
    Grooming,
}

fn parse_item_kind(input: &str) -> Result<ItemKind, String> {
    ItemKind::parse(input).ok_or_else(|| format!("'{input}' is not SERVICE or PRODUCT"))
}

/// Service form fields, shared by create and update.
#[derive(Debug, Args)]
pub struct ServiceFields {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub category: String,
    /// Price in BRL
    #[arg(long)]
    pub price: f64,
    /// Minutes
    #[arg(long, default_value_t = vetdesk_api::ServiceRequest::DEFAULT_DURATION)]
    pub duration: u32,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub commission: Option<f64>,
    /// Save the service as inactive
    #[arg(long)]
    pub inactive: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show one page of a list
    List {
        resource: ResourceKind,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long)]
        search: Option<String>,
    },

    /// Delete one record, then show the refreshed page
    Delete {
        resource: ResourceKind,
        id: String,
        /// Page to show after the delete
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Look up an address by CEP
    Cep { code: String },

    /// Register a tutor, their address and a pet from a TOML file
    Register { file: PathBuf },

    /// Activate or deactivate a staff account
    EmployeeStatus {
        user_id: String,
        #[arg(long, action = ArgAction::Set)]
        active: bool,
    },

    /// Change an appointment's status (e.g. CONFIRMED)
    AppointmentStatus { id: String, status: String },

    /// Schedule an appointment
    CreateAppointment {
        #[arg(long)]
        pet: String,
        #[arg(long)]
        panel: String,
        #[arg(long)]
        payment_order: String,
        #[arg(long)]
        vet: Option<String>,
        /// Appointment type code
        #[arg(long = "type")]
        kind: i64,
        /// Specialty code
        #[arg(long)]
        specialty: i64,
        #[arg(long, default_value = "PENDING")]
        status: String,
        #[arg(long)]
        description: Option<String>,
        /// RFC 3339 date-time, e.g. 2026-11-03T14:30:00Z
        #[arg(long)]
        scheduled_at: Option<String>,
    },

    /// Add a service to the clinic catalogue
    CreateService {
        #[command(flatten)]
        fields: ServiceFields,
    },

    /// Replace a service's fields
    UpdateService {
        id: String,
        #[command(flatten)]
        fields: ServiceFields,
    },

    /// Add a product to a panel's stock
    CreateProduct {
        /// Panel prefix the product belongs to
        #[arg(long, default_value = "admin")]
        system: String,
        #[arg(long)]
        name: String,
        #[arg(long = "type")]
        kind: String,
        #[arg(long)]
        price_sale: f64,
        #[arg(long, default_value_t = 0.0)]
        price_pay: f64,
        #[arg(long, default_value_t = 0)]
        quantity: i64,
        #[arg(long)]
        batch: Option<String>,
        #[arg(long)]
        manufacturer: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Expiration date (YYYY-MM-DD); today when omitted
        #[arg(long)]
        expires: Option<String>,
    },

    /// Edit a staff member's profile
    UpdateEmployee {
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// Role code, e.g. CLINIC_VET
        #[arg(long)]
        roles: String,
        #[arg(long)]
        document: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        crmv: Option<String>,
        #[arg(long)]
        crmv_state: Option<String>,
    },

    /// Link an existing tutor to a panel
    AddTutor {
        tutor_id: String,
        #[arg(long)]
        panel: String,
    },

    /// Add a note to an appointment or grooming
    AddNote {
        record: AnnotatedKind,
        id: String,
        description: String,
    },

    /// Attach a service or product to an appointment or grooming
    AddItem {
        record: AnnotatedKind,
        id: String,
        #[arg(value_parser = parse_item_kind)]
        kind: ItemKind,
        item_id: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_defaults_to_first_page() {
        let cli = Cli::try_parse_from(["vetdesk", "list", "appointments"]).unwrap();
        match cli.command {
            Command::List {
                resource,
                page,
                search,
            } => {
                assert_eq!(resource, ResourceKind::Appointments);
                assert_eq!(page, 1);
                assert!(search.is_none());
            }
            _ => panic!("expected list"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["vetdesk", "list", "pets", "-vv", "--search", "rex"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(
            cli.command,
            Command::List { search: Some(ref s), .. } if s == "rex"
        ));
    }

    #[test]
    fn employee_status_requires_explicit_value() {
        let cli =
            Cli::try_parse_from(["vetdesk", "employee-status", "u1", "--active", "false"]).unwrap();
        assert!(matches!(cli.command, Command::EmployeeStatus { active: false, .. }));
        assert!(Cli::try_parse_from(["vetdesk", "employee-status", "u1"]).is_err());
    }

    #[test]
    fn service_fields_default_duration() {
        let cli = Cli::try_parse_from([
            "vetdesk",
            "update-service",
            "svc-1",
            "--name",
            "Banho",
            "--category",
            "GROOMING",
            "--price",
            "60",
            "--inactive",
        ])
        .unwrap();
        match cli.command {
            Command::UpdateService { id, fields } => {
                assert_eq!(id, "svc-1");
                assert_eq!(fields.duration, 30);
                assert!(fields.inactive);
                assert!(fields.commission.is_none());
            }
            _ => panic!("expected update-service"),
        }
    }

    #[test]
    fn create_product_defaults_to_admin_panel() {
        let cli = Cli::try_parse_from([
            "vetdesk",
            "create-product",
            "--name",
            "Ração",
            "--type",
            "FOOD",
            "--price-sale",
            "35.5",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Command::CreateProduct { ref system, quantity: 0, .. } if system == "admin"
        ));
    }

    #[test]
    fn add_item_parses_kind_label() {
        let cli =
            Cli::try_parse_from(["vetdesk", "add-item", "grooming", "g1", "produto", "p9"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::AddItem {
                record: AnnotatedKind::Grooming,
                kind: ItemKind::Product,
                ..
            }
        ));
        assert!(Cli::try_parse_from(["vetdesk", "add-item", "appointment", "a1", "vaccine", "x"]).is_err());
    }

    #[test]
    fn rejects_unknown_resource() {
        assert!(Cli::try_parse_from(["vetdesk", "list", "invoices"]).is_err());
    }
}
