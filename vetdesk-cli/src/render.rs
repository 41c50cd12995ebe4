//! Plain-text tables and the page selector line

use chrono::{DateTime, Utc};
use vetdesk_api::{
    Appointment, ClinicService, Employee, Grooming, Payment, Pet, Product, Resource, Tutor,
    format_brl,
};
use vetdesk_core::PageControls;
use vetdesk_core::services::{EMPTY_LIST_MESSAGE, ListSnapshot};

const PLACEHOLDER: &str = "-";

/// How one record renders as a table row.
pub trait TableRow: Resource {
    const HEADERS: &'static [&'static str];

    fn cells(&self) -> Vec<String>;
}

fn or_dash(value: Option<&str>) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(PLACEHOLDER)
        .to_string()
}

fn date_time(value: Option<&DateTime<Utc>>) -> String {
    value.map_or_else(
        || PLACEHOLDER.to_string(),
        |d| d.format("%d/%m/%Y %H:%M").to_string(),
    )
}

fn date(value: Option<&DateTime<Utc>>) -> String {
    value.map_or_else(
        || PLACEHOLDER.to_string(),
        |d| d.format("%d/%m/%Y").to_string(),
    )
}

fn money(value: Option<f64>) -> String {
    value.map_or_else(|| PLACEHOLDER.to_string(), format_brl)
}

fn yes_no(active: bool) -> String {
    if active { "Sim" } else { "Não" }.to_string()
}

impl TableRow for Appointment {
    const HEADERS: &'static [&'static str] =
        &["ID", "Pet", "Veterinário", "Tipo", "Data", "Status"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            or_dash(self.pet.as_ref().map(|p| p.name.as_str())),
            or_dash(self.vet_name()),
            self.kind_label(),
            date_time(self.scheduled_at.as_ref()),
            self.status_label(),
        ]
    }
}

impl TableRow for Grooming {
    const HEADERS: &'static [&'static str] = &["ID", "Pet", "Início", "Fim", "Status"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            or_dash(self.pet.as_ref().map(|p| p.name.as_str())),
            date_time(self.start_date.as_ref()),
            date_time(self.end_date.as_ref()),
            self.status_label(),
        ]
    }
}

impl TableRow for Employee {
    const HEADERS: &'static [&'static str] = &["ID", "Nome", "Email", "Funções", "Status"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.user_id.clone(),
            self.name.clone(),
            self.email.clone(),
            self.roles_label(),
            self.status_label().to_string(),
        ]
    }
}

impl TableRow for Product {
    const HEADERS: &'static [&'static str] =
        &["ID", "Nome", "Tipo", "Qtd.", "Preço", "Validade", "Ativo"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.kind_label(),
            self.quantity.to_string(),
            money(self.price_sale),
            date(self.expiration_date.as_ref()),
            yes_no(self.active),
        ]
    }
}

impl TableRow for ClinicService {
    const HEADERS: &'static [&'static str] =
        &["ID", "Nome", "Categoria", "Duração", "Preço", "Ativo"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.category.clone(),
            self.duration
                .map_or_else(|| PLACEHOLDER.to_string(), |m| format!("{m} min")),
            money(self.price),
            yes_no(self.active),
        ]
    }
}

impl TableRow for Pet {
    const HEADERS: &'static [&'static str] =
        &["ID", "Nome", "Espécie", "Raça", "Sexo", "Nascimento"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.species_label(),
            or_dash(self.breed_label().as_deref()),
            or_dash(self.gender_label().as_deref()),
            date(self.birth_date.as_ref()),
        ]
    }
}

impl TableRow for Tutor {
    const HEADERS: &'static [&'static str] = &["ID", "Nome", "Email", "Documento", "Telefone"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            or_dash(self.email.as_deref()),
            or_dash(self.document.as_deref()),
            or_dash(self.phone.as_deref()),
        ]
    }
}

impl TableRow for Payment {
    const HEADERS: &'static [&'static str] = &["ID", "Valor", "Status", "Criado em"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            money(self.amount),
            self.status_label(),
            date_time(self.created_at.as_ref()),
        ]
    }
}

fn padded_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

/// Left-aligned columns padded to the widest cell.
pub fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let mut out = Vec::with_capacity(rows.len() + 2);
    out.push(padded_line(headers.iter().copied(), &widths));
    out.push(padded_line(rule.iter().map(String::as_str), &widths));
    for row in rows {
        out.push(padded_line(row.iter().map(String::as_str), &widths));
    }
    out.join("\n")
}

/// `‹ 1 [2] 3 4 ›`, with arrows hidden at the edges.
pub fn page_selector(controls: &PageControls) -> String {
    let mut parts = Vec::with_capacity(controls.pages.len() + 2);
    if controls.previous_enabled {
        parts.push("‹".to_string());
    }
    for page in &controls.pages {
        if *page == controls.current {
            parts.push(format!("[{page}]"));
        } else {
            parts.push(page.to_string());
        }
    }
    if controls.next_enabled {
        parts.push("›".to_string());
    }
    parts.join(" ")
}

/// Table (or the empty message) followed by the page selector.
pub fn page<R: TableRow>(snapshot: &ListSnapshot<R>) -> String {
    let body = if snapshot.is_empty() {
        EMPTY_LIST_MESSAGE.to_string()
    } else {
        let rows: Vec<_> = snapshot.items.iter().map(R::cells).collect();
        table(R::HEADERS, &rows)
    };
    let controls = snapshot.controls();
    format!(
        "{body}\n\nPágina {} de {} ({} {})  {}",
        controls.current,
        controls.total_pages,
        snapshot.total_count,
        R::LABEL,
        page_selector(&controls)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_pads_to_widest_cell() {
        let out = table(
            &["ID", "Nome"],
            &[
                vec!["1".to_string(), "Rex".to_string()],
                vec!["22".to_string(), "Mimi".to_string()],
            ],
        );
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines[0], "ID  Nome");
        assert_eq!(lines[1], "--  ----");
        assert_eq!(lines[2], "1   Rex");
        assert_eq!(lines[3], "22  Mimi");
    }

    #[test]
    fn accented_headers_count_chars_not_bytes() {
        let out = table(&["Espécie"], &[vec!["Ave".to_string()]]);
        assert_eq!(out.lines().nth(1), Some("-------"));
    }

    #[test]
    fn selector_marks_current_and_hides_edge_arrows() {
        assert_eq!(page_selector(&PageControls::new(1, 3)), "[1] 2 3 ›");
        assert_eq!(page_selector(&PageControls::new(5, 10)), "‹ 3 4 [5] 6 7 ›");
        assert_eq!(page_selector(&PageControls::new(1, 1)), "[1]");
    }

    #[test]
    fn empty_page_shows_message_and_single_page_selector() {
        let snapshot: ListSnapshot<Tutor> = ListSnapshot {
            items: Vec::new(),
            total_count: 0,
            is_loading: false,
            current_page: 1,
            total_pages: 1,
            page_size: 10,
            search_term: String::new(),
            applied_search: Some("zzz".to_string()),
        };
        assert_eq!(
            page(&snapshot),
            "Nenhum registro encontrado\n\nPágina 1 de 1 (0 tutores)  [1]"
        );
    }

    #[test]
    fn tutor_cells_use_placeholder_for_missing() {
        let tutor = Tutor {
            id: "t1".to_string(),
            name: "Ana".to_string(),
            email: None,
            document: Some(" ".to_string()),
            phone: Some("11999990000".to_string()),
        };
        assert_eq!(tutor.cells(), vec!["t1", "Ana", "-", "-", "11999990000"]);
    }
}
