use chrono::NaiveDate;
use model::{AssociationType, DateIndicator, RecordId, Stp};
use serde::{Deserialize, Deserializer};

/// One stop-time row of the schedule query. Rows of the same schedule are
/// contiguous and the stream is ordered by
/// `(stp_indicator DESC, id, stop_id)`, so permanent schedules reach the
/// overlay resolver before their overlays and cancellations.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleRow {
    pub id: RecordId,
    pub train_uid: String,
    /// Retail service id, where the operator publishes one.
    pub retail_train_id: Option<String>,
    pub runs_from: NaiveDate,
    pub runs_to: NaiveDate,
    pub monday: u8,
    pub tuesday: u8,
    pub wednesday: u8,
    pub thursday: u8,
    pub friday: u8,
    pub saturday: u8,
    pub sunday: u8,
    pub atco_code: String,
    pub tiploc_code: String,
    pub crs_code: String,
    pub stp_indicator: Stp,
    pub public_arrival_time: Option<String>,
    pub public_departure_time: Option<String>,
    pub scheduled_arrival_time: Option<String>,
    pub scheduled_departure_time: Option<String>,
    pub train_category: Option<String>,
    pub atoc_code: Option<String>,
    /// Platform text of the call; consumed by the station reference
    /// loader, not by the assembly itself.
    pub platform: Option<String>,
    pub activity: Option<String>,
    pub train_class: Option<String>,
    pub reservations: Option<String>,
    /// Position of the call within its schedule; the stream's tertiary
    /// ordering key.
    pub stop_id: u32,
}

/// One association row: two train UIDs joined or divided at a TIPLOC.
/// Ordered like the schedule stream, permanent records first.
#[derive(Debug, Clone, Deserialize)]
pub struct AssociationRow {
    pub id: RecordId,
    pub base_uid: String,
    pub assoc_uid: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub monday: u8,
    pub tuesday: u8,
    pub wednesday: u8,
    pub thursday: u8,
    pub friday: u8,
    pub saturday: u8,
    pub sunday: u8,
    pub assoc_location: String,
    pub date_indicator: DateIndicator,
    #[serde(deserialize_with = "association_category")]
    pub assoc_cat: AssociationType,
    pub stp_indicator: Stp,
}

/// CIF association categories arrive as two-letter codes; anything that
/// is not a divide or join carries no merge semantics.
fn association_category<'de, D>(deserializer: D) -> Result<AssociationType, D::Error>
where
    D: Deserializer<'de>,
{
    let code = String::deserialize(deserializer)?;
    Ok(AssociationType::from(code.as_str()))
}
