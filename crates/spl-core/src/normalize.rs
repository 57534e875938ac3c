//! Sponsor-name normalization.
//!
//! Turns a raw sponsor string into an ordered list of search candidates,
//! most specific first: the trimmed original, then progressively stripped
//! variants (parenthetical qualifiers, legal-entity suffixes, industry
//! suffixes, leading word), then industry-suffix expansions for short
//! names. Pure and deterministic; no candidate is ever empty.

use std::sync::LazyLock;

use regex::Regex;

static PARENTHETICAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s*\([^)]*\)").unwrap_or_else(|e| unreachable!("static regex: {e}"))
});

/// Legal-entity suffixes, longest-match forms first so "L.L.C." is not
/// left behind as "L.L".
static LEGAL_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i),?\s+(incorporated|inc\.?|l\.l\.c\.|llc|l\.p\.|lp|limited|ltd\.?|corporation|corp\.?|plc|s\.a\.|gmbh|a\.?g\.?|n\.v\.|b\.v\.|&\s+co\.?)$",
    )
    .unwrap_or_else(|e| unreachable!("static regex: {e}"))
});

/// Industry words that sponsors append to a brand ("GEIGY Pharmaceuticals",
/// "Sharp & Dohme"). Stripped only as trailing tokens so compound brands
/// keep their core.
static INDUSTRY_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\s+(pharmaceuticals?|pharmaceutica|pharma|biotech(?:nology)?|therapeutics|biosciences?|sciences|laboratories|sharp\s+&\s+dohme|company)$",
    )
    .unwrap_or_else(|e| unreachable!("static regex: {e}"))
});

/// Suffixes appended as search expansions for short names that may be
/// listed in the graph under a fuller style.
const EXPANSIONS: [&str; 4] = [
    " Pharmaceuticals",
    " Pharmaceutica",
    " Biotech",
    " Therapeutics",
];

/// Produce search candidates for a raw sponsor name, most specific first.
///
/// Stripping never reduces a name to an empty string: a variant that would
/// be empty or whitespace-only is discarded. Candidates are deduplicated
/// preserving first occurrence.
#[must_use]
pub fn candidates(raw: &str) -> Vec<String> {
    let original = raw.trim();
    if original.is_empty() {
        return Vec::new();
    }

    let mut out: Vec<String> = Vec::new();
    let mut push = |candidate: &str| {
        let candidate = candidate.trim().trim_end_matches(',').trim();
        if !candidate.is_empty() && !out.iter().any(|c| c == candidate) {
            out.push(candidate.to_string());
        }
    };

    push(original);

    let unqualified = PARENTHETICAL.replace_all(original, "");
    push(&unqualified);

    let delegalized = strip_repeatedly(&LEGAL_SUFFIX, unqualified.trim());
    push(&delegalized);

    let base = strip_repeatedly(&INDUSTRY_SUFFIX, &delegalized);
    push(&base);

    // "GEIGY Pharmaceuticals" also searches as "GEIGY" even when the
    // trailing word is not a known industry token.
    if let Some(first) = delegalized.split_whitespace().next() {
        if delegalized.contains(char::is_whitespace) && first.chars().count() > 3 {
            push(first);
        }
    }

    // Short names may be catalogued under a fuller style in the graph.
    if !original.contains(char::is_whitespace) || original.chars().count() < 15 {
        let lower = original.to_lowercase();
        for suffix in EXPANSIONS {
            if !lower.contains(suffix.trim().to_lowercase().as_str()) {
                push(&format!("{base}{suffix}"));
            }
        }
    }

    out
}

/// Apply a trailing-suffix pattern until it stops matching, so stacked
/// suffixes ("Janssen Pharmaceutica N.V.") fully unwind.
fn strip_repeatedly(pattern: &Regex, input: &str) -> String {
    let mut current = input.trim().to_string();
    loop {
        let stripped = pattern.replace(&current, "").trim().to_string();
        if stripped == current || stripped.is_empty() {
            return current;
        }
        current = stripped;
    }
}
