/// Rider-facing branding of one train operating company.
pub struct OperatorBranding {
    pub code: &'static str,
    pub short_name: &'static str,
    pub long_name: Option<&'static str>,
    pub colour: Option<&'static str>,
}

/// The operator colour and naming table, keyed by two-letter ATOC code.
pub static OPERATORS: &[OperatorBranding] = &[
    OperatorBranding { code: "AW", short_name: "TfW Rail", long_name: Some("Transport for Wales"), colour: Some("#ff0000") },
    OperatorBranding { code: "CC", short_name: "c2c", long_name: None, colour: Some("#b7007c") },
    OperatorBranding { code: "CH", short_name: "Chiltern Railways", long_name: None, colour: Some("#00bfff") },
    OperatorBranding { code: "XC", short_name: "CrossCountry", long_name: None, colour: Some("#660f21") },
    OperatorBranding { code: "GR", short_name: "LNER", long_name: Some("London North Eastern Railway"), colour: Some("#ce0e2d") },
    OperatorBranding { code: "EM", short_name: "EMR", long_name: Some("East Midlands Railway"), colour: Some("#713563") },
    OperatorBranding { code: "ES", short_name: "Eurostar", long_name: None, colour: Some("#ffd700") },
    OperatorBranding { code: "GW", short_name: "GWR", long_name: Some("Great Western Railway"), colour: Some("#0a493e") },
    OperatorBranding { code: "HT", short_name: "Hull Trains", long_name: None, colour: Some("#de005c") },
    OperatorBranding { code: "TP", short_name: "TPE", long_name: Some("TransPennine Express"), colour: Some("#09a4ec") },
    OperatorBranding { code: "GX", short_name: "Gatwick Express", long_name: None, colour: Some("#eb1e2d") },
    OperatorBranding { code: "GC", short_name: "Grand Central", long_name: None, colour: Some("#1d1d1b") },
    OperatorBranding { code: "GN", short_name: "Great Northern", long_name: None, colour: Some("#0099ff") },
    OperatorBranding { code: "LE", short_name: "Greater Anglia", long_name: None, colour: Some("#d70428") },
    OperatorBranding { code: "HX", short_name: "Heathrow Express", long_name: None, colour: Some("#532e63") },
    OperatorBranding { code: "IL", short_name: "Island Line", long_name: None, colour: Some("#1e90ff") },
    OperatorBranding { code: "LD", short_name: "Lumo", long_name: None, colour: Some("#2b6ef5") },
    OperatorBranding { code: "LM", short_name: "WMT", long_name: Some("West Midlands Trains"), colour: None },
    OperatorBranding { code: "LO", short_name: "Overground", long_name: Some("London Overground"), colour: Some("#ff7518") },
    OperatorBranding { code: "LT", short_name: "Underground", long_name: Some("London Underground"), colour: Some("#000f9f") },
    OperatorBranding { code: "ME", short_name: "Merseyrail", long_name: None, colour: Some("#fff200") },
    OperatorBranding { code: "NT", short_name: "Northern", long_name: None, colour: Some("#0f0d78") },
    OperatorBranding { code: "SR", short_name: "ScotRail", long_name: None, colour: Some("#1e467d") },
    OperatorBranding { code: "SW", short_name: "SWR", long_name: Some("South Western Railway"), colour: Some("#24398c") },
    OperatorBranding { code: "SE", short_name: "Southeastern", long_name: None, colour: Some("#389cff") },
    OperatorBranding { code: "SN", short_name: "Southern", long_name: None, colour: Some("#8cc63e") },
    OperatorBranding { code: "TL", short_name: "Thameslink", long_name: None, colour: Some("#ff5aa4") },
    OperatorBranding { code: "VT", short_name: "Avanti", long_name: Some("Avanti West Coast"), colour: Some("#004354") },
    OperatorBranding { code: "TW", short_name: "Metro", long_name: Some("Tyne & Wear Metro"), colour: None },
    OperatorBranding { code: "CS", short_name: "Caledonian Sleeper", long_name: None, colour: Some("#1d2e35") },
    OperatorBranding { code: "XR", short_name: "Elizabeth line", long_name: None, colour: Some("#9364cc") },
    OperatorBranding { code: "QC", short_name: "Caledonian MacBrayne", long_name: None, colour: None },
    OperatorBranding { code: "QS", short_name: "Stena Line", long_name: None, colour: None },
    OperatorBranding { code: "ZZ", short_name: "Other operator", long_name: None, colour: None },
];

pub fn branding(code: &str) -> Option<&'static OperatorBranding> {
    OPERATORS.iter().find(|operator| operator.code == code)
}

/// Calling points that put a West Midlands Trains service on the London
/// Northwestern side of the brand split.
pub static LNR_STATIONS: &[&str] = &["EUS", "WFJ", "HML", "TRI", "BLY", "MKC", "NMP"];

/// A Greater Anglia service calling at both of these is the airport run
/// and carries the Stansted Express brand.
pub static STANSTED_EXPRESS_STATIONS: &[&str] = &["LST", "SSD"];

/// The Overground lines, each recognised by stations no other line
/// calls at.
pub static OVERGROUND_LINES: &[(&str, &[&str])] = &[
    ("Lioness line", &["WFJ", "BSH", "WMB", "HDN"]),
    ("Mildmay line", &["KWG", "HDH", "CMD", "WHD"]),
    ("Windrush line", &["DLJ", "SQE", "CYP", "WCY"]),
    ("Weaver line", &["ENF", "CHI", "SVS", "EDR"]),
    ("Suffragette line", &["GPO", "LEM", "WMW", "BKG"]),
    ("Liberty line", &["EMP", "UPM", "RMF"]),
];

/// Merseyrail's two lines, recognised the same way.
pub static MERSEYRAIL_LINES: &[(&str, &[&str])] = &[
    ("Wirral Line", &["BKQ", "HOO", "WKI", "NBN", "CTR", "ELP"]),
    ("Northern Line", &["SOP", "OMS", "KIR", "HNX", "SDL"]),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_code_is_unique() {
        for (index, operator) in OPERATORS.iter().enumerate() {
            assert!(
                OPERATORS[index + 1..]
                    .iter()
                    .all(|other| other.code != operator.code),
                "duplicate operator {}",
                operator.code
            );
        }
    }

    #[test]
    fn looks_up_by_code() {
        assert_eq!(branding("SW").unwrap().short_name, "SWR");
        assert!(branding("??").is_none());
    }
}
