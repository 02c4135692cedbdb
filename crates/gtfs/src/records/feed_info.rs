use chrono::NaiveDate;
use serde::Serialize;
use utility::serde::gtfs_date;

/// The single `feed_info.txt` row. The publisher fields are supplied by
/// the caller; defaults identify the feed as unattributed.
/// See <https://gtfs.org/schedule/reference/#feed_infotxt>
#[derive(Debug, Clone, Serialize)]
pub struct FeedInfo {
    pub feed_publisher_name: String,
    pub feed_publisher_url: String,
    pub feed_lang: String,
    #[serde(serialize_with = "gtfs_date::serialize_option")]
    pub feed_start_date: Option<NaiveDate>,
    #[serde(serialize_with = "gtfs_date::serialize_option")]
    pub feed_end_date: Option<NaiveDate>,
    pub feed_version: Option<String>,
}

impl Default for FeedInfo {
    fn default() -> Self {
        FeedInfo {
            feed_publisher_name: "unknown".to_owned(),
            feed_publisher_url: "https://www.nationalrail.co.uk".to_owned(),
            feed_lang: "en".to_owned(),
            feed_start_date: None,
            feed_end_date: None,
            feed_version: None,
        }
    }
}
