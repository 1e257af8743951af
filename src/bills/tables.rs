//! Static keyword and company tables for bill analysis.

/// Words that make an article worth examining for a bill at all.
pub const BILL_KEYWORDS: &[&str] = &[
    "bill",
    "bills",
    "legislation",
    "law",
    "laws",
    "act",
    "acts",
    "resolution",
    "amendment",
    "passed",
    "approved",
    "voted",
    "house",
    "senate",
    "congress",
    "legislative",
    "legislature",
    "federal",
    "government",
];

pub const HOUSE_KEYWORDS: &[&str] = &[
    "house of representatives",
    "house passed",
    "house approved",
    "house voted",
    "passed by the house",
    "passed the house",
];

pub const SENATE_KEYWORDS: &[&str] = &[
    "senate passed",
    "senate approved",
    "senate voted",
    "senators",
    "passed by the senate",
    "passed the senate",
];

pub const BOTH_CHAMBERS_KEYWORDS: &[&str] = &[
    "congress passed",
    "congress approved",
    "both chambers",
    "house and senate",
    "passed by congress",
];

/// Verbs that mark the sentence describing what a bill does.
pub const ACTION_KEYWORDS: &[&str] = &[
    "funds",
    "funding",
    "allocates",
    "provides",
    "establishes",
    "regulates",
    "regulations",
    "requires",
    "mandates",
    "authorizes",
    "creates",
    "expands",
    "reduces",
    "increases",
    "decreases",
];

pub const GENERIC_EXPLANATION: &str =
    "Bill details and funding information available from official sources.";

/// Sectors in declaration order with their trigger words.
pub const SECTOR_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "AI/Technology",
        &[
            "artificial intelligence",
            "ai",
            "machine learning",
            "automation",
            "robotics",
            "semiconductor",
            "semiconductors",
            "chip",
            "chips",
            "computing",
            "software",
            "digital",
            "cyber",
            "cybersecurity",
        ],
    ),
    (
        "Renewable Energy",
        &[
            "renewable energy",
            "solar",
            "wind",
            "clean energy",
            "green energy",
            "electric vehicle",
            "electric vehicles",
            "ev",
            "evs",
            "battery",
            "batteries",
            "sustainability",
            "climate",
        ],
    ),
    (
        "Healthcare",
        &[
            "healthcare",
            "medical",
            "pharmaceutical",
            "drug",
            "drugs",
            "treatment",
            "insurance",
            "medicare",
            "medicaid",
            "hospital",
            "hospitals",
            "doctor",
            "doctors",
        ],
    ),
    (
        "Infrastructure",
        &[
            "infrastructure",
            "construction",
            "roads",
            "bridges",
            "transportation",
            "highway",
            "highways",
            "railway",
            "airport",
            "airports",
            "port",
            "ports",
            "building",
        ],
    ),
    (
        "Finance",
        &[
            "banking",
            "banks",
            "finance",
            "financial",
            "regulation",
            "sec",
            "federal reserve",
            "tax",
            "taxes",
            "revenue",
            "budget",
            "spending",
            "deficit",
        ],
    ),
    (
        "Defense",
        &[
            "defense",
            "military",
            "weapons",
            "national security",
            "veterans",
            "armed forces",
            "defense spending",
            "military budget",
        ],
    ),
    (
        "Education",
        &[
            "education",
            "school",
            "schools",
            "university",
            "universities",
            "college",
            "student loan",
            "student loans",
            "federal aid",
            "scholarship",
            "research funding",
        ],
    ),
];

/// Tickers exposed to each sector, most exposed first.
pub const COMPANIES_BY_SECTOR: &[(&str, &[&str])] = &[
    (
        "AI/Technology",
        &[
            "NVDA", "MSFT", "GOOGL", "META", "AAPL", "AMD", "INTC", "TSM", "ORCL", "CRM", "ADBE",
            "NFLX", "AMZN", "TSLA",
        ],
    ),
    (
        "Renewable Energy",
        &[
            "TSLA", "ENPH", "PLUG", "SEDG", "RUN", "SPWR", "FSLR", "NEE", "GE", "GEVO", "BLDP",
            "BE", "NIO", "XPEV", "LI",
        ],
    ),
    (
        "Healthcare",
        &[
            "JNJ", "PFE", "UNH", "ABBV", "MRK", "TMO", "ABT", "DHR", "LLY", "BMY", "AMGN", "GILD",
            "CVS", "ANTM",
        ],
    ),
    (
        "Infrastructure",
        &[
            "CAT", "DE", "CEMEX", "VMC", "MLM", "URI", "TEX", "FLR", "J", "ACM", "PWR", "EME",
            "MTZ",
        ],
    ),
    (
        "Finance",
        &[
            "JPM", "BAC", "WFC", "GS", "MS", "C", "USB", "PNC", "TFC", "COF", "AXP", "BLK", "SCHW",
            "SPGI",
        ],
    ),
    (
        "Defense",
        &[
            "LMT", "RTX", "BA", "GD", "NOC", "LHX", "TDG", "AJRD", "KTOS", "AIR", "HII", "LDOS",
        ],
    ),
    (
        "Education",
        &["APEI", "LOPE", "STRA", "ZVO", "LAUR", "EDU", "TAL", "GHC"],
    ),
];

pub fn companies_for(sector: &str) -> Option<&'static [&'static str]> {
    COMPANIES_BY_SECTOR
        .iter()
        .find(|(name, _)| *name == sector)
        .map(|(_, companies)| *companies)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_sector_has_companies() {
        for (sector, _) in SECTOR_KEYWORDS {
            assert!(companies_for(sector).is_some_and(|c| !c.is_empty()), "{}", sector);
        }
        assert!(companies_for("Agriculture").is_none());
    }

    #[test]
    fn test_keywords_are_lowercase() {
        for (_, keywords) in SECTOR_KEYWORDS {
            assert!(keywords.iter().all(|k| *k == k.to_lowercase()));
        }
    }
}
