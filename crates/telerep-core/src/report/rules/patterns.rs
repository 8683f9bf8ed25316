//! Common regex patterns for call-center report extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Monthly section marker: "<Month> <Year> Agents"
    pub static ref MONTH_MARKER: Regex = Regex::new(
        r"(?P<month>Janvier|F[ée]vrier|Mars|Avril|Mai|Juin|Juillet|Ao[ûu]t|Septembre|Octobre|Novembre|D[ée]cembre|January|February|March|April|May|June|July|August|September|October|November|December)\s+(?P<year>\d{4})\s+Agents"
    ).unwrap();

    // Handled vs presented calls, labeled
    pub static ref CALLS_LABELED: Regex = Regex::new(
        r"Appels\s+Trait[ée]s\s+vs\.?\s+Pr[ée]sent[ée]s\W*?(?P<handled>\d+)\b[^\d\n]+\b(?P<presented>\d+)\b"
    ).unwrap();

    // Two integer tokens on the same line
    pub static ref INTEGER_PAIR: Regex = Regex::new(
        r"\b(?P<first>\d+)\b[^\d\n]+?\b(?P<second>\d+)\b"
    ).unwrap();

    pub static ref INTEGER_TOKEN: Regex = Regex::new(r"\b\d+\b").unwrap();

    // HH:MM:SS
    pub static ref CLOCK_DURATION: Regex = Regex::new(
        r"\b(?P<hours>\d+):(?P<minutes>\d{2}):(?P<seconds>\d{2})\b"
    ).unwrap();

    pub static ref MAX_AGENTS: Regex = Regex::new(
        r"Nombre\s+d['’]\s?Agents\s+Max\D*?(?P<count>\d+)"
    ).unwrap();

    // Comma-decimal percentage: 95,4% or 95 %
    pub static ref PERCENTAGE: Regex = Regex::new(
        r"(?P<value>\d+(?:,\d+)?)\s?%"
    ).unwrap();

    pub static ref MONTHLY_AVERAGES: Regex = Regex::new(
        r"(?s)Moyennes\s+Mensuelles.*?(?P<received>\d+,\d+).*?(?P<resolved>\d+,\d+)"
    ).unwrap();
}

/// Header fragment identifying the agent table.
pub const AGENT_HEADER: &str = "Agent";

/// Cell fragment identifying the N1 resolution table.
pub const RESOLUTION_TABLE_MARKER: &str = "résolus par N1";

/// Cell fragments identifying the N2 tickets table (both in one cell).
pub const TICKETS_TABLE_MARKERS: [&str; 2] = ["Tickets", "N2"];
