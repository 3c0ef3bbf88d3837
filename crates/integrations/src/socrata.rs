//! Provider adapter for Socrata (SODA 2.x) open-data portals.
//!
//! Most large US cities publish code-violation datasets on Socrata. Each
//! dataset has its own column names, so an adapter is a [`SocrataDataset`]
//! (where to query, how to read a row) plus a shared [`reqwest::Client`].
//!
//! Filters are pushed down as SoQL where the dataset allows it; the
//! aggregator re-applies them centrally either way.

use async_trait::async_trait;
use codewatch_core::error::ProviderError;
use codewatch_core::filters::ViolationFilters;
use codewatch_core::provider::ProviderAdapter;
use codewatch_core::types::parse_date;
use codewatch_core::violation::PropertyViolation;
use serde_json::{Map, Value};

use crate::http::{parse_response, HttpError};

/// Column names of one dataset.
#[derive(Debug, Clone)]
pub struct FieldMapping {
    pub id: &'static str,
    /// Columns concatenated (space separated) into the street address.
    pub address: &'static [&'static str],
    /// City column; datasets scoped to one city leave this `None`.
    pub city: Option<&'static str>,
    pub zip: Option<&'static str>,
    pub status: Option<&'static str>,
    pub date: &'static str,
    pub description: Option<&'static str>,
}

/// A single violation dataset on a Socrata portal.
#[derive(Debug, Clone)]
pub struct SocrataDataset {
    /// Portal origin, e.g. `https://data.cityofchicago.org`.
    pub base_url: String,
    /// Four-by-four dataset identifier, e.g. `22u3-xenr`.
    pub dataset_id: String,
    /// City used when the row carries none (or no city column exists).
    pub default_city: String,
    pub state: String,
    pub fields: FieldMapping,
}

impl SocrataDataset {
    fn resource_url(&self) -> String {
        format!(
            "{}/resource/{}.json",
            self.base_url.trim_end_matches('/'),
            self.dataset_id
        )
    }
}

pub struct SocrataAdapter {
    client: reqwest::Client,
    provider_id: String,
    dataset: SocrataDataset,
    app_token: Option<String>,
}

impl SocrataAdapter {
    pub fn new(
        client: reqwest::Client,
        provider_id: impl Into<String>,
        dataset: SocrataDataset,
        app_token: Option<String>,
    ) -> Self {
        Self {
            client,
            provider_id: provider_id.into(),
            dataset,
            app_token,
        }
    }

    /// SoQL query parameters for the given (normalized) filters.
    pub fn build_params(&self, filters: &ViolationFilters) -> Vec<(String, String)> {
        let fields = &self.dataset.fields;
        let mut params = vec![
            ("$limit".to_string(), filters.effective_limit().to_string()),
            ("$order".to_string(), format!("{} DESC", fields.date)),
        ];

        let mut clauses = Vec::new();
        if let (Some(column), Some(city)) = (fields.city, filters.city.as_deref()) {
            // The dataset-wide city has no value of its own in the city column.
            if !city.eq_ignore_ascii_case(&self.dataset.default_city) {
                clauses.push(format!(
                    "upper({column}) = '{}'",
                    soql_literal(&city.to_uppercase())
                ));
            }
        }
        if let (Some(column), Some(status)) = (fields.status, filters.status.as_deref()) {
            clauses.push(format!(
                "upper({column}) = '{}'",
                soql_literal(&status.to_uppercase())
            ));
        }
        if let Some(clause) = filters.query.as_deref().and_then(|q| self.query_clause(q)) {
            clauses.push(clause);
        }
        if let Some(start) = filters.start_date {
            clauses.push(format!("{} >= '{}T00:00:00'", fields.date, start.format("%Y-%m-%d")));
        }
        if let Some(end) = filters.end_date {
            clauses.push(format!("{} <= '{}T23:59:59'", fields.date, end.format("%Y-%m-%d")));
        }
        if !clauses.is_empty() {
            params.push(("$where".to_string(), clauses.join(" AND ")));
        }

        params
    }

    /// Substring match of `query` over the address and description columns.
    ///
    /// The address is several columns joined by single spaces, so a query
    /// containing whitespace can straddle two of them; such queries are left
    /// to the aggregator's own filter.
    fn query_clause(&self, query: &str) -> Option<String> {
        let fields = &self.dataset.fields;
        if fields.address.len() > 1 && query.contains(char::is_whitespace) {
            return None;
        }

        let pattern = soql_literal(&query.to_uppercase());
        let alternatives: Vec<String> = fields
            .address
            .iter()
            .copied()
            .chain(fields.description)
            .map(|column| format!("upper({column}) like '%{pattern}%'"))
            .collect();
        Some(format!("({})", alternatives.join(" OR ")))
    }

    /// Map one dataset row into a normalized record. Rows without an id or
    /// address are dropped.
    pub fn map_row(&self, row: &Map<String, Value>) -> Option<PropertyViolation> {
        let fields = &self.dataset.fields;

        let source_id = text(row, fields.id)?;
        let address = fields
            .address
            .iter()
            .filter_map(|column| text(row, column))
            .collect::<Vec<_>>()
            .join(" ");
        if address.is_empty() {
            return None;
        }

        let city = fields
            .city
            .and_then(|column| text(row, column))
            .map(|c| title_case(&c))
            .unwrap_or_else(|| self.dataset.default_city.clone());

        Some(PropertyViolation {
            id: PropertyViolation::compose_id(&self.provider_id, &source_id),
            address,
            city,
            state: self.dataset.state.clone(),
            zip: fields.zip.and_then(|column| text(row, column)),
            status: fields.status.and_then(|column| text(row, column)),
            violation_date: text(row, fields.date).and_then(|d| parse_date(&d)),
            description: fields.description.and_then(|column| text(row, column)),
            source: self.provider_id.clone(),
        })
    }
}

#[async_trait]
impl ProviderAdapter for SocrataAdapter {
    async fn query(
        &self,
        filters: &ViolationFilters,
    ) -> Result<Vec<PropertyViolation>, ProviderError> {
        let mut request = self
            .client
            .get(self.dataset.resource_url())
            .query(&self.build_params(filters));
        if let Some(token) = &self.app_token {
            request = request.header("X-App-Token", token);
        }

        let response = request.send().await.map_err(HttpError::from)?;
        let rows: Vec<Map<String, Value>> = parse_response(response).await?;

        let total = rows.len();
        let items: Vec<_> = rows.iter().filter_map(|row| self.map_row(row)).collect();
        if items.len() < total {
            tracing::debug!(
                provider_id = %self.provider_id,
                dropped = total - items.len(),
                "Dropped unmappable rows",
            );
        }

        Ok(items)
    }
}

/// Read a column as trimmed text. Numbers are rendered; blanks are `None`.
fn text(row: &Map<String, Value>, column: &str) -> Option<String> {
    let value = match row.get(column)? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!value.is_empty()).then_some(value)
}

/// Escape a value for use inside a single-quoted SoQL literal.
fn soql_literal(value: &str) -> String {
    value.replace('\'', "''")
}

/// `BROOKLYN` -> `Brooklyn`, `SAN FRANCISCO` -> `San Francisco`.
fn title_case(value: &str) -> String {
    value
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
