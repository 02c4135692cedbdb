use super::CallingPoints;

/// The three shapes a topology rule can produce.
#[derive(Debug, Clone)]
pub enum HeadsignTemplate {
    /// Advertise an intermediate station as the terminus, the way loop
    /// services are signed. `crs` locates that station among the
    /// remaining calls.
    FalseDestination {
        crs: &'static str,
        name: &'static str,
    },
    /// Keep the real destination but name the distinguishing place.
    Via { place: &'static str },
    /// Both: a truncated terminus and the routing that reaches it.
    FalseDestinationVia {
        crs: &'static str,
        name: &'static str,
        place: &'static str,
    },
}

/// One row of the topology rule table. The engine only evaluates the
/// pattern against the remaining calling points and renders the
/// template; everything route-specific lives in the data below, so new
/// rules are new rows.
pub struct TopologyRule {
    /// ATOC code the rule belongs to; empty applies to every operator.
    pub operator: &'static str,
    pub pattern: fn(&CallingPoints) -> bool,
    pub template: HeadsignTemplate,
}

/// Hard-coded network knowledge: where the advertised destination of a
/// service differs from its actual terminus, or where two routings
/// share endpoints and need a via place to tell them apart. First
/// matching rule wins; later rules never overwrite.
pub static TOPOLOGY_RULES: &[TopologyRule] = &[
    // South Western: the Kingston roundabouts leave Waterloo in both
    // directions and come straight back, so they are signed to Kingston.
    TopologyRule {
        operator: "SW",
        pattern: |points| points.terminates_at("WAT") && points.calls_in_order("TWI", "KNG"),
        template: HeadsignTemplate::FalseDestinationVia {
            crs: "KNG",
            name: "Kingston",
            place: "Richmond",
        },
    },
    TopologyRule {
        operator: "SW",
        pattern: |points| points.terminates_at("WAT") && points.calls_in_order("WIM", "KNG"),
        template: HeadsignTemplate::FalseDestinationVia {
            crs: "KNG",
            name: "Kingston",
            place: "Wimbledon",
        },
    },
    // Hounslow loop, likewise.
    TopologyRule {
        operator: "SW",
        pattern: |points| points.terminates_at("WAT") && points.calls_in_order("BFD", "HOU"),
        template: HeadsignTemplate::FalseDestinationVia {
            crs: "HOU",
            name: "Hounslow",
            place: "Brentford",
        },
    },
    // The Guildford new line and the Portsmouth Direct share endpoints
    // with the main-line routings.
    TopologyRule {
        operator: "SW",
        pattern: |points| points.terminates_at("GLD") && points.calls_at("CSD"),
        template: HeadsignTemplate::Via { place: "Cobham" },
    },
    TopologyRule {
        operator: "SW",
        pattern: |points| points.terminates_at("PMH") && points.calls_at("HSL"),
        template: HeadsignTemplate::Via { place: "Guildford" },
    },
    TopologyRule {
        operator: "SW",
        pattern: |points| points.terminates_at("PMH") && points.calls_at("ESL"),
        template: HeadsignTemplate::Via { place: "Eastleigh" },
    },
    // Southeastern: four routes reach Dartford; trains continuing down
    // the North Kent line are still signed to Dartford first.
    TopologyRule {
        operator: "SE",
        pattern: |points| points.calls_in_order("BXH", "DFD"),
        template: HeadsignTemplate::FalseDestinationVia {
            crs: "DFD",
            name: "Dartford",
            place: "Bexleyheath",
        },
    },
    TopologyRule {
        operator: "SE",
        pattern: |points| points.calls_in_order("SID", "DFD"),
        template: HeadsignTemplate::FalseDestinationVia {
            crs: "DFD",
            name: "Dartford",
            place: "Sidcup",
        },
    },
    TopologyRule {
        operator: "SE",
        pattern: |points| points.calls_in_order("WWA", "DFD"),
        template: HeadsignTemplate::FalseDestinationVia {
            crs: "DFD",
            name: "Dartford",
            place: "Woolwich",
        },
    },
    TopologyRule {
        operator: "SE",
        pattern: |points| points.calls_in_order("GNW", "DFD"),
        template: HeadsignTemplate::FalseDestinationVia {
            crs: "DFD",
            name: "Dartford",
            place: "Greenwich",
        },
    },
    // Kent Coast: Ramsgate via the Medway towns or via Ashford.
    TopologyRule {
        operator: "SE",
        pattern: |points| points.terminates_at("RAM") && points.calls_at("AFK"),
        template: HeadsignTemplate::Via {
            place: "Ashford International",
        },
    },
    TopologyRule {
        operator: "SE",
        pattern: |points| points.terminates_at("RAM") && points.calls_at("FAV"),
        template: HeadsignTemplate::Via { place: "Chatham" },
    },
    // Overground: Clapham Junction and Highbury are linked down both
    // sides of London.
    TopologyRule {
        operator: "LO",
        pattern: |points| points.terminates_at("CLJ") && points.calls_at("WIJ"),
        template: HeadsignTemplate::Via {
            place: "Willesden Junction",
        },
    },
    TopologyRule {
        operator: "LO",
        pattern: |points| points.terminates_at("CLJ") && points.calls_at("SQE"),
        template: HeadsignTemplate::Via {
            place: "Surrey Quays",
        },
    },
    TopologyRule {
        operator: "LO",
        pattern: |points| points.terminates_at("HHY") && points.calls_at("WIJ"),
        template: HeadsignTemplate::Via {
            place: "Willesden Junction",
        },
    },
    TopologyRule {
        operator: "LO",
        pattern: |points| points.terminates_at("HHY") && points.calls_at("SQE"),
        template: HeadsignTemplate::Via {
            place: "Surrey Quays",
        },
    },
    // Merseyrail: Wirral line trains circle the Liverpool underground
    // loop and return, advertised as Liverpool Central throughout.
    TopologyRule {
        operator: "ME",
        pattern: |points| points.calls_at("LVC") && !points.terminates_at("LVC"),
        template: HeadsignTemplate::FalseDestination {
            crs: "LVC",
            name: "Liverpool Central",
        },
    },
    // Transport for Wales: Merthyr line services via Pontypridd.
    TopologyRule {
        operator: "AW",
        pattern: |points| points.terminates_at("MER") && points.calls_at("PTD"),
        template: HeadsignTemplate::Via {
            place: "Pontypridd",
        },
    },
    // Any operator: the Calder Valley routing into Huddersfield.
    TopologyRule {
        operator: "",
        pattern: |points| points.terminates_at("HUD") && points.calls_at("BGH"),
        template: HeadsignTemplate::Via { place: "Brighouse" },
    },
];
