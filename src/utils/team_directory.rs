/// The six MLB divisions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Division {
    AlEast,
    AlCentral,
    AlWest,
    NlEast,
    NlCentral,
    NlWest,
}

impl Division {
    pub const ALL: [Division; 6] = [
        Division::AlEast,
        Division::AlCentral,
        Division::AlWest,
        Division::NlEast,
        Division::NlCentral,
        Division::NlWest,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            Division::AlEast => "al-east",
            Division::AlCentral => "al-central",
            Division::AlWest => "al-west",
            Division::NlEast => "nl-east",
            Division::NlCentral => "nl-central",
            Division::NlWest => "nl-west",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Division::AlEast => "AL East",
            Division::AlCentral => "AL Central",
            Division::AlWest => "AL West",
            Division::NlEast => "NL East",
            Division::NlCentral => "NL Central",
            Division::NlWest => "NL West",
        }
    }

    /// Division id used by the MLB Stats API
    pub fn mlb_id(&self) -> u32 {
        match self {
            Division::AlWest => 200,
            Division::AlEast => 201,
            Division::AlCentral => 202,
            Division::NlWest => 203,
            Division::NlEast => 204,
            Division::NlCentral => 205,
        }
    }

    pub fn from_mlb_id(id: u32) -> Option<Division> {
        Division::ALL.into_iter().find(|d| d.mlb_id() == id)
    }

    pub fn from_slug(slug: &str) -> Option<Division> {
        Division::ALL.into_iter().find(|d| d.slug() == slug)
    }
}

/// One club, keyed by both upstream id schemes
#[derive(Debug, Clone, Copy)]
pub struct DirectoryEntry {
    pub espn_id: &'static str,
    pub mlb_id: u32,
    pub abbr: &'static str,
    pub division: Division,
}

const fn entry(espn_id: &'static str, mlb_id: u32, abbr: &'static str, division: Division) -> DirectoryEntry {
    DirectoryEntry {
        espn_id,
        mlb_id,
        abbr,
        division,
    }
}

pub const TEAMS: [DirectoryEntry; 30] = [
    // AL East
    entry("10", 147, "NYY", Division::AlEast),
    entry("1", 110, "BAL", Division::AlEast),
    entry("2", 111, "BOS", Division::AlEast),
    entry("30", 139, "TB", Division::AlEast),
    entry("14", 141, "TOR", Division::AlEast),
    // AL Central
    entry("5", 114, "CLE", Division::AlCentral),
    entry("4", 145, "CWS", Division::AlCentral),
    entry("6", 116, "DET", Division::AlCentral),
    entry("7", 118, "KC", Division::AlCentral),
    entry("9", 142, "MIN", Division::AlCentral),
    // AL West
    entry("18", 117, "HOU", Division::AlWest),
    entry("3", 108, "LAA", Division::AlWest),
    entry("11", 133, "ATH", Division::AlWest),
    entry("12", 136, "SEA", Division::AlWest),
    entry("13", 140, "TEX", Division::AlWest),
    // NL East
    entry("15", 144, "ATL", Division::NlEast),
    entry("28", 146, "MIA", Division::NlEast),
    entry("21", 121, "NYM", Division::NlEast),
    entry("22", 143, "PHI", Division::NlEast),
    entry("20", 120, "WSH", Division::NlEast),
    // NL Central
    entry("16", 112, "CHC", Division::NlCentral),
    entry("17", 113, "CIN", Division::NlCentral),
    entry("8", 158, "MIL", Division::NlCentral),
    entry("23", 134, "PIT", Division::NlCentral),
    entry("24", 138, "STL", Division::NlCentral),
    // NL West
    entry("29", 109, "ARI", Division::NlWest),
    entry("27", 115, "COL", Division::NlWest),
    entry("19", 119, "LAD", Division::NlWest),
    entry("25", 135, "SD", Division::NlWest),
    entry("26", 137, "SF", Division::NlWest),
];

pub fn by_espn_id(espn_id: &str) -> Option<&'static DirectoryEntry> {
    TEAMS.iter().find(|t| t.espn_id == espn_id)
}

pub fn by_mlb_id(mlb_id: u32) -> Option<&'static DirectoryEntry> {
    TEAMS.iter().find(|t| t.mlb_id == mlb_id)
}

/// Look a club up by ESPN id, MLB id or abbreviation (`NYY`, `lad`)
pub fn resolve(key: &str) -> Option<&'static DirectoryEntry> {
    let key = key.trim();
    by_espn_id(key)
        .or_else(|| key.parse().ok().and_then(by_mlb_id))
        .or_else(|| TEAMS.iter().find(|t| t.abbr.eq_ignore_ascii_case(key)))
}

/// Division slug for an ESPN team id, `unknown` if the id is not a current club
pub fn division_slug(espn_id: &str) -> &'static str {
    by_espn_id(espn_id)
        .map(|t| t.division.slug())
        .unwrap_or("unknown")
}
