use indexmap::IndexMap;
use serde::Deserialize;

/// One station from the reference data the source database carries:
/// the three identifier schemes, the rider-facing name, projected WGS84
/// coordinates and interchange metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct StationStop {
    pub atco_code: String,
    pub crs_code: Option<String>,
    pub tiploc_code: String,
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub platform: Option<String>,
    /// Minimum minutes to change trains here, where known.
    pub interchange_minutes: Option<u32>,
}

/// Station lookups for headsign naming, shape coordinates and stop
/// emission. Iteration order is the load order of the reference data.
#[derive(Debug, Default)]
pub struct StopDirectory {
    by_atco: IndexMap<String, StationStop>,
    crs_to_atco: IndexMap<String, String>,
}

impl StopDirectory {
    pub fn new(stops: impl IntoIterator<Item = StationStop>) -> Self {
        let mut directory = StopDirectory::default();
        for stop in stops {
            if let Some(crs) = &stop.crs_code {
                directory
                    .crs_to_atco
                    .entry(crs.clone())
                    .or_insert_with(|| stop.atco_code.clone());
            }
            directory.by_atco.insert(stop.atco_code.clone(), stop);
        }
        directory
    }

    pub fn by_atco(&self, atco: &str) -> Option<&StationStop> {
        self.by_atco.get(atco)
    }

    pub fn by_crs(&self, crs: &str) -> Option<&StationStop> {
        self.crs_to_atco
            .get(crs)
            .and_then(|atco| self.by_atco.get(atco))
    }

    pub fn name_by_crs(&self, crs: &str) -> Option<&str> {
        self.by_crs(crs).map(|stop| stop.name.as_str())
    }

    pub fn coordinates(&self, atco: &str) -> Option<(f64, f64)> {
        let stop = self.by_atco(atco)?;
        Some((stop.latitude?, stop.longitude?))
    }

    pub fn iter(&self) -> impl Iterator<Item = &StationStop> {
        self.by_atco.values()
    }

    pub fn len(&self) -> usize {
        self.by_atco.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_atco.is_empty()
    }
}
