use model::StopTime;

/// One row of the via-text table: when a trip at station `at` is heading
/// for `dest` and its remaining routing passes `loc1` (and `loc2`, when
/// present, later than `loc1`), the headsign carries `text`.
///
/// `at` is a CRS code; the others are TIPLOCs, matched against the
/// calling points between the current stop and the advertised terminus.
pub struct ViaEntry {
    pub at: &'static str,
    pub dest: &'static str,
    pub loc1: &'static str,
    pub loc2: Option<&'static str>,
    pub text: &'static str,
}

pub static VIA_TEXT: &[ViaEntry] = &[
    ViaEntry {
        at: "WAT",
        dest: "KGSTON",
        loc1: "TWCKNHM",
        loc2: None,
        text: "via Richmond",
    },
    ViaEntry {
        at: "WAT",
        dest: "KGSTON",
        loc1: "WDON",
        loc2: None,
        text: "via Wimbledon",
    },
    ViaEntry {
        at: "WAT",
        dest: "GUILDFD",
        loc1: "COBHAM",
        loc2: None,
        text: "via Cobham",
    },
    ViaEntry {
        at: "WAT",
        dest: "GUILDFD",
        loc1: "WOKING",
        loc2: None,
        text: "via Woking",
    },
    ViaEntry {
        at: "WAT",
        dest: "PHBR",
        loc1: "GUILDFD",
        loc2: Some("HASLEMR"),
        text: "via Guildford",
    },
    ViaEntry {
        at: "WAT",
        dest: "PHBR",
        loc1: "BSNGSTK",
        loc2: Some("ELGH"),
        text: "via Basingstoke & Eastleigh",
    },
    ViaEntry {
        at: "CHX",
        dest: "DARTFD",
        loc1: "BXLYHTH",
        loc2: None,
        text: "via Bexleyheath",
    },
    ViaEntry {
        at: "CHX",
        dest: "DARTFD",
        loc1: "SIDCUP",
        loc2: None,
        text: "via Sidcup",
    },
    ViaEntry {
        at: "CHX",
        dest: "DARTFD",
        loc1: "GNWH",
        loc2: None,
        text: "via Greenwich",
    },
    ViaEntry {
        at: "CST",
        dest: "DARTFD",
        loc1: "WLWCHAR",
        loc2: None,
        text: "via Woolwich",
    },
    ViaEntry {
        at: "VIC",
        dest: "RAMSGTE",
        loc1: "CHATHAM",
        loc2: None,
        text: "via Chatham",
    },
    ViaEntry {
        at: "STP",
        dest: "RAMSGTE",
        loc1: "ASHFKY",
        loc2: Some("CNTBW"),
        text: "via Ashford & Canterbury",
    },
    ViaEntry {
        at: "LDS",
        dest: "HUDDRSF",
        loc1: "BRGHOUS",
        loc2: None,
        text: "via Brighouse",
    },
    ViaEntry {
        at: "CDF",
        dest: "MERTHTF",
        loc1: "PONTYPR",
        loc2: None,
        text: "via Pontypridd",
    },
];

/// Picks the via text for the stop at `index` heading for the terminus
/// at `bound` (the false destination when one was chosen). Candidate
/// stations are the advertised calls strictly between the two; when
/// several entries fit, the one whose `loc1` comes up first wins.
pub fn select(
    stops: &[StopTime],
    index: usize,
    bound: usize,
    dest_tiploc: &str,
) -> Option<&'static ViaEntry> {
    let at = stops[index].crs_code.as_str();
    let via_tiplocs: Vec<&str> = stops
        .get(index + 1..bound)
        .unwrap_or(&[])
        .iter()
        .filter(|stop| stop.arrival_time.is_some())
        .map(|stop| stop.tiploc_code.as_str())
        .collect();
    let position = |tiploc: &str| via_tiplocs.iter().position(|candidate| *candidate == tiploc);

    VIA_TEXT
        .iter()
        .filter(|entry| entry.at == at && entry.dest == dest_tiploc)
        .filter_map(|entry| {
            let loc1_position = position(entry.loc1)?;
            match entry.loc2 {
                None => Some((loc1_position, entry)),
                Some(loc2) => {
                    let loc2_position = position(loc2)?;
                    (loc2_position > loc1_position).then_some((loc1_position, entry))
                }
            }
        })
        .min_by_key(|(loc1_position, _)| *loc1_position)
        .map(|(_, entry)| entry)
}
