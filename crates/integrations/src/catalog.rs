//! The built-in provider catalog.
//!
//! Registration order here is the order providers are listed and merged in.

use std::sync::Arc;

use codewatch_core::provider::ProviderAdapter;
use codewatch_core::registry::{Jurisdiction, ProviderDescriptor};

use crate::socrata::{FieldMapping, SocrataAdapter, SocrataDataset};

struct CatalogEntry {
    id: &'static str,
    name: &'static str,
    /// Covered `(city, state)` pairs.
    cities: &'static [(&'static str, &'static str)],
    base_url: &'static str,
    dataset_id: &'static str,
    default_city: &'static str,
    state: &'static str,
    fields: FieldMapping,
}

const CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        id: "chicago",
        name: "Chicago Department of Buildings",
        cities: &[("Chicago", "IL")],
        base_url: "https://data.cityofchicago.org",
        dataset_id: "22u3-xenr",
        default_city: "Chicago",
        state: "IL",
        fields: FieldMapping {
            id: "id",
            address: &["address"],
            city: None,
            zip: None,
            status: Some("violation_status"),
            date: "violation_date",
            description: Some("violation_description"),
        },
    },
    CatalogEntry {
        id: "nyc_hpd",
        name: "NYC Housing Preservation & Development",
        cities: &[
            ("New York", "NY"),
            ("Manhattan", "NY"),
            ("Brooklyn", "NY"),
            ("Bronx", "NY"),
            ("Queens", "NY"),
            ("Staten Island", "NY"),
        ],
        base_url: "https://data.cityofnewyork.us",
        dataset_id: "wvxf-dwi5",
        default_city: "New York",
        state: "NY",
        fields: FieldMapping {
            id: "violationid",
            address: &["housenumber", "streetname"],
            city: Some("boro"),
            zip: Some("zip"),
            status: Some("violationstatus"),
            date: "inspectiondate",
            description: Some("novdescription"),
        },
    },
    CatalogEntry {
        id: "sf_dbi",
        name: "San Francisco Department of Building Inspection",
        cities: &[("San Francisco", "CA")],
        base_url: "https://data.sfgov.org",
        dataset_id: "nbtm-fbw5",
        default_city: "San Francisco",
        state: "CA",
        fields: FieldMapping {
            id: "complaint_number",
            address: &["street_number", "street_name", "street_suffix"],
            city: None,
            zip: Some("zip_code"),
            status: Some("status"),
            date: "date_filed",
            description: Some("nov_category_description"),
        },
    },
];

/// Descriptors and Socrata adapters for every built-in provider.
///
/// All adapters share `client`, and with it its connection pool and timeout.
pub fn default_providers(
    client: &reqwest::Client,
    app_token: Option<&str>,
) -> Vec<(ProviderDescriptor, Arc<dyn ProviderAdapter>)> {
    CATALOG
        .iter()
        .map(|entry| {
            let descriptor = ProviderDescriptor {
                id: entry.id.to_string(),
                name: entry.name.to_string(),
                jurisdiction: entry
                    .cities
                    .iter()
                    .map(|(city, state)| Jurisdiction::city(city, state))
                    .collect(),
            };
            let adapter: Arc<dyn ProviderAdapter> = Arc::new(entry.adapter(client, app_token));
            (descriptor, adapter)
        })
        .collect()
}

impl CatalogEntry {
    fn adapter(&self, client: &reqwest::Client, app_token: Option<&str>) -> SocrataAdapter {
        SocrataAdapter::new(
            client.clone(),
            self.id,
            SocrataDataset {
                base_url: self.base_url.to_string(),
                dataset_id: self.dataset_id.to_string(),
                default_city: self.default_city.to_string(),
                state: self.state.to_string(),
                fields: self.fields.clone(),
            },
            app_token.map(str::to_string),
        )
    }
}
