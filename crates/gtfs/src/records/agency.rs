use serde::Serialize;

use super::feed_id;

feed_id! {
    /// The two-letter ATOC code of a train operating company.
    AgencyId
}

/// One `agency.txt` row. Agencies here are train operating companies,
/// keyed by their two-letter ATOC code.
/// See <https://gtfs.org/schedule/reference/#agencytxt>
#[derive(Debug, Clone, Serialize)]
pub struct Agency {
    #[serde(rename = "agency_id")]
    pub id: AgencyId,

    #[serde(rename = "agency_name")]
    pub name: String,

    #[serde(rename = "agency_url")]
    pub url: String,

    /// All National Rail services operate on London time.
    #[serde(rename = "agency_timezone")]
    pub timezone: String,

    #[serde(rename = "agency_lang")]
    pub language: Option<String>,
}

impl Agency {
    pub fn operator(code: &str, name: &str) -> Self {
        Agency {
            id: AgencyId::new(code),
            name: name.to_owned(),
            url: "https://www.nationalrail.co.uk".to_owned(),
            timezone: "Europe/London".to_owned(),
            language: Some("en".to_owned()),
        }
    }
}
