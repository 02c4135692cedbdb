use std::num::ParseIntError;

/// Mints the id type of one GTFS table: a newtype over the raw text id,
/// so a trip id can never be handed to a field expecting a route id.
macro_rules! feed_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

pub(crate) use feed_id;

pub mod agency;
pub mod calendar;
pub mod calendar_dates;
pub mod feed_info;
pub mod links;
pub mod routes;
pub mod shapes;
pub mod stop_times;
pub mod stops;
pub mod transfers;
pub mod trips;

/// A colour from the operator branding table, carried as `#rrggbb` text on
/// the records and decoded here only to pick a readable text colour.
#[derive(Debug, Clone, Copy)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    /// Accepts `rrggbb` with or without the leading `#`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 {
            return None;
        }
        let rgb = [&hex[0..2], &hex[2..4], &hex[4..6]]
            .iter()
            .map(|part| u8::from_str_radix(part, 16))
            .collect::<Result<Vec<u8>, ParseIntError>>()
            .ok()?;
        Some(Color {
            red: rgb[0],
            green: rgb[1],
            blue: rgb[2],
        })
    }

    /// Perceived luminance, 0.0 black to 1.0 white.
    pub fn luminance(&self) -> f64 {
        (0.299 * self.red as f64 + 0.587 * self.green as f64 + 0.114 * self.blue as f64) / 255.0
    }

    /// Black text on light backgrounds, white text otherwise.
    pub fn text_color(&self) -> &'static str {
        if self.luminance() > 0.5 {
            "#000000"
        } else {
            "#ffffff"
        }
    }
}
