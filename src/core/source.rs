//! Partner data source: the server-paginated collaborator behind the table.
//!
//! [`PartnerSource`] is the seam: the shell asks for one filtered page at a
//! time and renders whatever comes back.  [`FixtureSource`] answers from a
//! JSON document in the list endpoint's shape, filtering and paging the way
//! the endpoint does.

use std::path::Path;

use serde::Deserialize;

use super::collate::locale_cmp;
use super::partner::{PageMeta, Partner, PartnerPage};
use crate::error::{DeskError, Result};

/// Server-side filters of the partner list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartnerFilters {
    /// Case-insensitive substring of the partner name.
    pub name: String,
    /// Exact partner nature, any when `None`.
    pub nature_partner: Option<String>,
    /// Exact partner type (`National`, `International`), any when `None`.
    pub partner_type: Option<String>,
    /// Exact partner structure, any when `None`.
    pub structure_partner: Option<String>,
}

fn matches_choice(wanted: &Option<String>, value: &Option<String>) -> bool {
    match wanted {
        Some(wanted) => value
            .as_deref()
            .is_some_and(|v| v.eq_ignore_ascii_case(wanted)),
        None => true,
    }
}

impl PartnerFilters {
    pub fn is_empty(&self) -> bool {
        self.name.trim().is_empty()
            && self.nature_partner.is_none()
            && self.partner_type.is_none()
            && self.structure_partner.is_none()
    }

    pub fn matches(&self, partner: &Partner) -> bool {
        let needle = self.name.trim().to_lowercase();
        if !needle.is_empty() && !partner.partner_name.to_lowercase().contains(&needle) {
            return false;
        }
        matches_choice(&self.nature_partner, &partner.nature_partner)
            && matches_choice(&self.partner_type, &partner.partner_type)
            && matches_choice(&self.structure_partner, &partner.structure_partner)
    }
}

/// Partner types offered by the type filter, in cycle order.
pub const PARTNER_TYPES: &[&str] = &["National", "International"];

/// Values offered by the choice filters, in cycle order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOptions {
    pub natures: Vec<String>,
    pub types: Vec<String>,
    pub structures: Vec<String>,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            natures: Vec::new(),
            types: PARTNER_TYPES.iter().map(|t| t.to_string()).collect(),
            structures: Vec::new(),
        }
    }
}

/// The option after `current`; past the last one the filter goes back to any.
pub fn next_choice(current: Option<&str>, options: &[String]) -> Option<String> {
    match current {
        None => options.first().cloned(),
        Some(current) => options
            .iter()
            .position(|o| o == current)
            .and_then(|i| options.get(i + 1))
            .cloned(),
    }
}

pub trait PartnerSource {
    /// Fetch one page (1-based) of partners matching `filters`.
    fn fetch(&self, filters: &PartnerFilters, page: u32) -> Result<PartnerPage>;

    /// Choices for the nature, type and structure filters.
    fn options(&self) -> FilterOptions {
        FilterOptions::default()
    }
}

// ───────────────────────────────────────── fixture ───────────

#[derive(Deserialize)]
#[serde(untagged)]
enum FixtureDoc {
    Page(PartnerPage),
    List(Vec<Partner>),
}

/// In-memory partner list served page by page.
#[derive(Debug, Clone)]
pub struct FixtureSource {
    partners: Vec<Partner>,
    per_page: u32,
}

const BUILTIN_FIXTURE: &str = include_str!("../../data/partners.json");

impl FixtureSource {
    pub fn new(partners: Vec<Partner>, per_page: u32) -> Self {
        Self {
            partners,
            per_page: per_page.max(1),
        }
    }

    /// Parse either a full list response (`{"data": [...]}`) or a bare array.
    pub fn from_json(json: &str, origin: &str, per_page: u32) -> Result<Self> {
        let doc: FixtureDoc = serde_json::from_str(json).map_err(|e| DeskError::json(origin, e))?;
        let partners = match doc {
            FixtureDoc::Page(page) => page.data,
            FixtureDoc::List(list) => list,
        };
        tracing::info!(origin, count = partners.len(), "loaded partner fixture");
        Ok(Self::new(partners, per_page))
    }

    pub fn load(path: &Path, per_page: u32) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| DeskError::io(path, e))?;
        Self::from_json(&json, &path.display().to_string(), per_page)
    }

    /// The sample partners bundled with the binary.
    pub fn builtin(per_page: u32) -> Result<Self> {
        Self::from_json(BUILTIN_FIXTURE, "built-in fixture", per_page)
    }

    pub fn len(&self) -> usize {
        self.partners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.partners.is_empty()
    }

    /// Distinct non-empty values of one optional field, sorted.
    fn distinct(&self, field: impl Fn(&Partner) -> Option<&str>) -> Vec<String> {
        let mut values: Vec<String> = self
            .partners
            .iter()
            .filter_map(field)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .collect();
        values.sort_by(|a, b| locale_cmp(a, b));
        values.dedup();
        values
    }
}

impl PartnerSource for FixtureSource {
    fn fetch(&self, filters: &PartnerFilters, page: u32) -> Result<PartnerPage> {
        let matching: Vec<&Partner> = self.partners.iter().filter(|p| filters.matches(p)).collect();
        let total = matching.len() as u64;
        let per_page = u64::from(self.per_page);
        let last_page = total.div_ceil(per_page).max(1) as u32;

        if page == 0 || page > last_page {
            return Err(DeskError::InvalidPage {
                page,
                last: last_page,
            });
        }

        let skip = (u64::from(page) - 1) * per_page;
        let data: Vec<Partner> = matching
            .into_iter()
            .skip(skip as usize)
            .take(self.per_page as usize)
            .cloned()
            .collect();
        let (from, to) = if data.is_empty() {
            (None, None)
        } else {
            (Some(skip + 1), Some(skip + data.len() as u64))
        };

        tracing::debug!(page, last_page, total, rows = data.len(), "served partner page");
        Ok(PartnerPage {
            data,
            meta: Some(PageMeta {
                current_page: page,
                last_page,
                total,
                per_page: self.per_page,
                from,
                to,
            }),
        })
    }

    fn options(&self) -> FilterOptions {
        FilterOptions {
            natures: self.distinct(|p| p.nature_partner.as_deref()),
            structures: self.distinct(|p| p.structure_partner.as_deref()),
            ..FilterOptions::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(per_page: u32) -> FixtureSource {
        let json = r#"[
            {"id": 1, "partner_name": "Banque Populaire", "partner_type": "National",
             "nature_partner": "Banque", "structure_partner": "Privée"},
            {"id": 2, "partner_name": "UNICEF", "partner_type": "International",
             "nature_partner": "Agence ONU", "structure_partner": "Multilatérale"},
            {"id": 3, "partner_name": "Fondation OCP", "partner_type": "National",
             "nature_partner": "Fondation", "structure_partner": "Privée"},
            {"id": 4, "partner_name": "Union Européenne", "partner_type": "International",
             "nature_partner": "Institution", "structure_partner": "Multilatérale"},
            {"id": 5, "partner_name": "Banque Mondiale", "partner_type": "International",
             "nature_partner": "Banque", "structure_partner": "Multilatérale"}
        ]"#;
        FixtureSource::from_json(json, "test", per_page).unwrap()
    }

    #[test]
    fn pages_are_sliced_with_meta() {
        let src = source(2);
        let page = src.fetch(&PartnerFilters::default(), 3).unwrap();
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].id, 5);
        let meta = page.meta.unwrap();
        assert_eq!((meta.current_page, meta.last_page, meta.total), (3, 3, 5));
        assert_eq!((meta.from, meta.to), (Some(5), Some(5)));
    }

    #[test]
    fn filters_by_name_and_type() {
        let src = source(10);
        let filters = PartnerFilters {
            name: "banque".into(),
            partner_type: Some("international".into()),
            ..PartnerFilters::default()
        };
        let page = src.fetch(&filters, 1).unwrap();
        let ids: Vec<u64> = page.data.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![5]);
    }

    #[test]
    fn filters_by_nature_and_structure() {
        let src = source(10);
        let filters = PartnerFilters {
            nature_partner: Some("Banque".into()),
            structure_partner: Some("multilatérale".into()),
            ..PartnerFilters::default()
        };
        assert!(!filters.is_empty());
        let page = src.fetch(&filters, 1).unwrap();
        let ids: Vec<u64> = page.data.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![5]);
    }

    #[test]
    fn options_are_the_distinct_fixture_values() {
        let options = source(10).options();
        assert_eq!(options.natures, ["Agence ONU", "Banque", "Fondation", "Institution"]);
        assert_eq!(options.structures, ["Multilatérale", "Privée"]);
        assert_eq!(options.types, PARTNER_TYPES);
    }

    #[test]
    fn choices_cycle_back_to_any() {
        let options = vec!["a".to_string(), "b".to_string()];
        assert_eq!(next_choice(None, &options).as_deref(), Some("a"));
        assert_eq!(next_choice(Some("a"), &options).as_deref(), Some("b"));
        assert_eq!(next_choice(Some("b"), &options), None);
        assert_eq!(next_choice(Some("gone"), &options), None);
        assert_eq!(next_choice(None, &[]), None);
    }

    #[test]
    fn empty_result_is_one_empty_page() {
        let src = source(10);
        let filters = PartnerFilters {
            name: "nobody".into(),
            ..PartnerFilters::default()
        };
        let page = src.fetch(&filters, 1).unwrap();
        assert!(page.data.is_empty());
        assert_eq!(page.pagination().total_pages, 1);
    }

    #[test]
    fn out_of_range_pages_are_errors() {
        let src = source(2);
        assert!(matches!(
            src.fetch(&PartnerFilters::default(), 4),
            Err(DeskError::InvalidPage { page: 4, last: 3 })
        ));
        assert!(src.fetch(&PartnerFilters::default(), 0).is_err());
    }

    #[test]
    fn accepts_list_response_shape() {
        let json = r#"{"data": [{"id": 9, "partner_name": "AFD"}], "meta": null}"#;
        assert_eq!(FixtureSource::from_json(json, "test", 5).unwrap().len(), 1);
        assert!(FixtureSource::from_json("{", "test", 5).is_err());
    }

    #[test]
    fn builtin_fixture_parses() {
        let src = FixtureSource::builtin(10).unwrap();
        assert!(src.len() > 10);
        assert!(!src.is_empty());
    }
}
