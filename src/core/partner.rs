//! Partner records, their contact persons, and the partner table columns.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

use super::pagination::PaginationMeta;
use super::table::{Align, Column, Record};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactPerson {
    #[serde(default)]
    pub id: Option<u64>,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
}

impl ContactPerson {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partner {
    pub id: u64,
    pub partner_name: String,
    #[serde(default)]
    pub abbreviation: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub nature_partner: Option<String>,
    #[serde(default)]
    pub partner_type: Option<String>,
    #[serde(default)]
    pub structure_partner: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub actions: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub contact_people: Vec<ContactPerson>,
}

impl Partner {
    /// First listed contact, shown in the table.
    pub fn primary_contact(&self) -> Option<&ContactPerson> {
        self.contact_people.first()
    }
}

impl Record for Partner {
    fn field(&self, key: &str) -> Option<String> {
        let value = match key {
            "id" => return Some(self.id.to_string()),
            "partner_name" => return Some(self.partner_name.clone()),
            "abbreviation" => &self.abbreviation,
            "phone" => &self.phone,
            "email" => &self.email,
            "address" => &self.address,
            "country" => &self.country,
            "nature_partner" => &self.nature_partner,
            "partner_type" => &self.partner_type,
            "structure_partner" => &self.structure_partner,
            "status" => &self.status,
            "actions" => &self.actions,
            "note" => &self.note,
            "logo_url" => &self.logo_url,
            "created_at" => &self.created_at,
            _ => return None,
        };
        value.clone()
    }
}

/// Calendar date of an API timestamp: RFC 3339 or a `yyyy-mm-dd` prefix.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    raw.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}

/// Format an API timestamp as `dd/mm/yyyy`; anything unparseable is shown
/// verbatim.
pub fn format_date(raw: &str) -> String {
    parse_date(raw)
        .map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| raw.to_string())
}

const NOT_AVAILABLE: &str = "N/A";

/// Column set of the partner list.
pub fn partner_columns() -> Vec<Column<Partner>> {
    vec![
        Column::new("partner_name", "Partenaire")
            .sortable()
            .render(|p: &Partner| match &p.abbreviation {
                Some(abbr) if !abbr.is_empty() => format!("{} ({abbr})", p.partner_name),
                _ => p.partner_name.clone(),
            }),
        Column::new("contact", "Contact principal").render(|p: &Partner| {
            match p.primary_contact() {
                Some(c) => match &c.email {
                    Some(email) => format!("{} · {email}", c.full_name()),
                    None => c.full_name(),
                },
                None => "Aucun contact".to_string(),
            }
        }),
        Column::new("partner_type", "Type")
            .sortable()
            .width(15)
            .align(Align::Center)
            .badge()
            .render(|p: &Partner| p.partner_type.clone().unwrap_or_else(|| NOT_AVAILABLE.into())),
        Column::new("status", "Statut")
            .sortable()
            .width(20)
            .badge()
            .render(|p: &Partner| p.status.clone().unwrap_or_else(|| NOT_AVAILABLE.into())),
        Column::new("created_at", "Créé le")
            .sortable()
            .width(12)
            .align(Align::Right)
            .compare(|a: &Partner, b: &Partner| {
                let day = |p: &Partner| p.created_at.as_deref().and_then(parse_date);
                day(a).cmp(&day(b))
            })
            .render(|p: &Partner| {
                p.created_at
                    .as_deref()
                    .map(format_date)
                    .unwrap_or_else(|| NOT_AVAILABLE.into())
            }),
    ]
}

// ───────────────────────────────────────── API shapes ────────

/// `meta` block of a paginated list response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub current_page: u32,
    pub last_page: u32,
    pub total: u64,
    pub per_page: u32,
    #[serde(default)]
    pub from: Option<u64>,
    #[serde(default)]
    pub to: Option<u64>,
}

impl From<PageMeta> for PaginationMeta {
    fn from(meta: PageMeta) -> Self {
        Self {
            current_page: meta.current_page,
            total_pages: meta.last_page,
            total_items: meta.total,
            items_per_page: meta.per_page,
        }
    }
}

/// One page of partners, as returned by the list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartnerPage {
    pub data: Vec<Partner>,
    #[serde(default)]
    pub meta: Option<PageMeta>,
}

impl PartnerPage {
    /// Paging summary; a response without `meta` is a single page.
    pub fn pagination(&self) -> PaginationMeta {
        match self.meta {
            Some(meta) => meta.into(),
            None => PaginationMeta {
                current_page: 1,
                total_pages: 1,
                total_items: self.data.len() as u64,
                items_per_page: self.data.len().max(1) as u32,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::table::{sorted_view, SortState, Direction};

    fn partner(id: u64, name: &str) -> Partner {
        Partner {
            id,
            partner_name: name.into(),
            abbreviation: None,
            phone: None,
            email: None,
            address: None,
            country: None,
            nature_partner: None,
            partner_type: None,
            structure_partner: None,
            status: None,
            actions: None,
            note: None,
            logo_url: None,
            created_at: None,
            contact_people: Vec::new(),
        }
    }

    #[test]
    fn dates_render_day_first() {
        assert_eq!(format_date("2024-03-07T10:15:00Z"), "07/03/2024");
        assert_eq!(format_date("2023-12-01 08:00:00"), "01/12/2023");
        assert_eq!(format_date("hier"), "hier");
    }

    #[test]
    fn cells_fall_back_to_placeholders() {
        let cols = partner_columns();
        let mut p = partner(1, "Banque Populaire");
        p.abbreviation = Some("BP".into());
        let cells: Vec<String> = cols.iter().map(|c| c.cell(&p)).collect();
        assert_eq!(
            cells,
            vec!["Banque Populaire (BP)", "Aucun contact", "N/A", "N/A", "N/A"]
        );

        p.contact_people.push(ContactPerson {
            id: Some(3),
            first_name: "Salma".into(),
            last_name: "Idrissi".into(),
            email: Some("salma@example.org".into()),
            phone: None,
            position: None,
        });
        assert_eq!(cols[1].cell(&p), "Salma Idrissi · salma@example.org");
    }

    #[test]
    fn sorting_reads_raw_fields_not_rendered_text() {
        let mut a = partner(1, "Zeta");
        a.created_at = Some("2024-01-02".into());
        let mut b = partner(2, "Alpha");
        b.created_at = Some("2023-05-30".into());
        let rows = vec![a, b];
        let sort = SortState {
            key: "created_at".into(),
            direction: Direction::Ascending,
        };
        // Dates order chronologically even though cells are dd/mm/yyyy.
        assert_eq!(sorted_view(&rows, &partner_columns(), Some(&sort)), vec![1, 0]);
    }

    #[test]
    fn dates_compare_as_days_and_missing_dates_come_first() {
        let mut a = partner(1, "A");
        a.created_at = Some("2024-03-07T23:30:00+00:00".into());
        let mut b = partner(2, "B");
        b.created_at = Some("2024-03-07".into());
        let mut c = partner(3, "C");
        c.created_at = Some("2023-11-20 09:00:00".into());
        let d = partner(4, "D");
        let rows = vec![a, b, c, d];
        let sort = SortState {
            key: "created_at".into(),
            direction: Direction::Ascending,
        };
        assert_eq!(
            sorted_view(&rows, &partner_columns(), Some(&sort)),
            vec![3, 2, 0, 1]
        );
    }

    #[test]
    fn page_without_meta_is_single_page() {
        let page: PartnerPage = serde_json::from_str(
            r#"{"data": [{"id": 1, "partner_name": "OCP", "contact_people": []}]}"#,
        )
        .unwrap();
        let meta = page.pagination();
        assert_eq!(meta.total_pages, 1);
        assert!(!meta.is_visible());
    }
}
