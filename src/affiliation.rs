//! Author name composition and the academic/company affiliation heuristic.

/// Substrings that flag an affiliation as academic. Matching is
/// case-insensitive and purely substring-based, so the test is a heuristic:
/// a company name containing "Center" is misclassified, and institutional
/// keywords outside this list slip through.
pub const ACADEMIC_KEYWORDS: [&str; 7] = [
    "university",
    "institute",
    "college",
    "school",
    "hospital",
    "academy",
    "center",
];

/// The raw name and affiliation fields pulled from one `<Author>` entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorFields {
    pub fore_name: String,
    pub last_name: String,
    pub affiliation: String,
}

/// Whether an affiliation looks like a company rather than an academic
/// institution.
pub fn is_company(affiliation: &str) -> bool {
    let lower = affiliation.to_lowercase();
    !ACADEMIC_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
}

/// Compose a display name from fore and last name fields. Parts are trimmed
/// and empty parts omitted; both empty yields an empty string.
pub fn compose_name(fore_name: &str, last_name: &str) -> String {
    let fore = fore_name.trim();
    let last = last_name.trim();
    match (fore.is_empty(), last.is_empty()) {
        (true, true) => String::new(),
        (true, false) => last.to_string(),
        (false, true) => fore.to_string(),
        (false, false) => format!("{fore} {last}"),
    }
}

/// Keep the authors whose composed name and affiliation are both non-empty
/// and whose affiliation passes [`is_company`].
///
/// Returns the names and affiliations as two index-aligned lists in
/// document encounter order.
pub fn filter_non_academic(authors: &[AuthorFields]) -> (Vec<String>, Vec<String>) {
    let mut names = Vec::new();
    let mut affiliations = Vec::new();

    for author in authors {
        let name = compose_name(&author.fore_name, &author.last_name);
        let affiliation = author.affiliation.trim();

        if !name.is_empty() && !affiliation.is_empty() && is_company(affiliation) {
            names.push(name);
            affiliations.push(affiliation.to_string());
        }
    }

    (names, affiliations)
}
