//! Serde codecs for the text formats GTFS uses on the wire.

/// Service days in the `YYYYMMDD` format.
pub mod gtfs_date {
    use core::fmt;

    use chrono::NaiveDate;
    use serde::{
        de::{self, Unexpected, Visitor},
        Deserializer, Serializer,
    };

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format("%Y%m%d").to_string())
    }

    pub fn serialize_option<S>(
        date: &Option<NaiveDate>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(date) => serialize(date, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DateVisitor;

        impl Visitor<'_> for DateVisitor {
            type Value = NaiveDate;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string in the format YYYYMMDD")
            }

            fn visit_str<E>(self, value: &str) -> Result<NaiveDate, E>
            where
                E: de::Error,
            {
                NaiveDate::parse_from_str(value, "%Y%m%d").map_err(|_| {
                    de::Error::invalid_value(Unexpected::Str(value), &self)
                })
            }
        }

        deserializer.deserialize_str(DateVisitor)
    }
}

/// Times of the service day in the `HH:MM:SS` format. The hour counts from
/// the start of the service day and is not wrapped at 24, so a call at
/// half past midnight on a trip that started the evening before serializes
/// as `24:30:00`.
pub mod gtfs_time {
    use chrono::Duration;
    use serde::de::{Error as DeError, IntoDeserializer};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(time: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let total_seconds = time.num_seconds();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        let formatted = format!("{:02}:{:02}:{:02}", hours, minutes, seconds);
        serializer.serialize_str(&formatted)
    }

    pub fn serialize_option<S>(
        time: &Option<Duration>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match time {
            Some(time) => serialize(time, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let parts: Vec<&str> = s.split(':').collect();

        if parts.len() != 3 {
            return Err(D::Error::invalid_length(
                parts.len(),
                &"Expected format hh:mm:ss",
            ));
        }

        let hours: i64 = parts[0].parse().map_err(D::Error::custom)?;
        let minutes: i64 = parts[1].parse().map_err(D::Error::custom)?;
        let seconds: i64 = parts[2].parse().map_err(D::Error::custom)?;

        Ok(Duration::hours(hours)
            + Duration::minutes(minutes)
            + Duration::seconds(seconds))
    }

    pub fn deserialize_option<'de, D>(
        deserializer: D,
    ) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = Option::<String>::deserialize(deserializer)?;
        match s {
            Some(s) => {
                let time = deserialize(s.as_str().into_deserializer())?;
                Ok(Some(time))
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate};
    use serde::Serialize;

    #[derive(Serialize)]
    struct TimeRow {
        #[serde(serialize_with = "super::gtfs_time::serialize")]
        time: Duration,
        #[serde(serialize_with = "super::gtfs_date::serialize")]
        date: NaiveDate,
    }

    #[test]
    fn formats_rolled_over_hours_without_wrapping() {
        let row = TimeRow {
            time: Duration::hours(24) + Duration::minutes(30),
            date: NaiveDate::from_ymd_opt(2017, 1, 8).unwrap(),
        };
        let mut writer = csv::Writer::from_writer(vec![]);
        writer.serialize(&row).unwrap();
        let out = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        assert!(out.contains("24:30:00"));
        assert!(out.contains("20170108"));
    }
}
