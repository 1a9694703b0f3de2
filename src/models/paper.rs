//! Paper record model for one PubMed article.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Literal written for absent fields at the export boundary.
pub const NOT_AVAILABLE: &str = "N/A";

/// CSV header row, in output column order.
pub const CSV_HEADERS: [&str; 6] = [
    "PubmedID",
    "Title",
    "Publication Date",
    "Non-academic Author(s)",
    "Company Affiliation(s)",
    "Corresponding Author Email",
];

/// One paper with its company-affiliated authors.
///
/// Absent scalars are `None` internally; the `"N/A"` sentinel only appears
/// when a record is rendered for output. The two author lists are
/// index-aligned and hold only the authors whose affiliation passed the
/// company test, in document order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaperRecord {
    /// PubMed identifier (PMID)
    pub pubmed_id: String,

    /// Paper title
    pub title: Option<String>,

    /// Publication year as it appears in the record
    pub publication_year: Option<String>,

    /// Names of authors with a non-academic affiliation
    pub non_academic_authors: Vec<String>,

    /// Their affiliations, index-aligned with `non_academic_authors`
    pub company_affiliations: Vec<String>,

    /// Corresponding author email, if the record carries one
    pub corresponding_email: Option<String>,
}

impl PaperRecord {
    /// Create a record with only the identifier set
    pub fn new(pubmed_id: impl Into<String>) -> Self {
        Self {
            pubmed_id: pubmed_id.into(),
            title: None,
            publication_year: None,
            non_academic_authors: Vec::new(),
            company_affiliations: Vec::new(),
            corresponding_email: None,
        }
    }

    /// Set the title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the publication year
    pub fn publication_year(mut self, year: impl Into<String>) -> Self {
        self.publication_year = Some(year.into());
        self
    }

    /// Set both author lists at once so they stay index-aligned
    pub fn authors(mut self, names: Vec<String>, affiliations: Vec<String>) -> Self {
        debug_assert_eq!(names.len(), affiliations.len());
        self.non_academic_authors = names;
        self.company_affiliations = affiliations;
        self
    }

    /// Set the corresponding author email
    pub fn corresponding_email(mut self, email: impl Into<String>) -> Self {
        self.corresponding_email = Some(email.into());
        self
    }

    /// Title as it appears in output
    pub fn rendered_title(&self) -> &str {
        self.title.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    /// Publication year as it appears in output
    pub fn rendered_year(&self) -> &str {
        self.publication_year.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    /// Author names joined for output, `"N/A"` when none qualified
    pub fn rendered_authors(&self) -> String {
        join_or_na(&self.non_academic_authors)
    }

    /// Affiliations joined for output, `"N/A"` when none qualified
    pub fn rendered_affiliations(&self) -> String {
        join_or_na(&self.company_affiliations)
    }

    /// Email as it appears in output
    pub fn rendered_email(&self) -> &str {
        self.corresponding_email.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    /// One CSV row in `CSV_HEADERS` column order
    pub fn to_row(&self) -> [String; 6] {
        [
            self.pubmed_id.clone(),
            self.rendered_title().to_string(),
            self.rendered_year().to_string(),
            self.rendered_authors(),
            self.rendered_affiliations(),
            self.rendered_email().to_string(),
        ]
    }
}

fn join_or_na(items: &[String]) -> String {
    if items.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        items.join(", ")
    }
}

impl fmt::Display for PaperRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PubmedID: {} | Title: {} | Publication Date: {} | Non-academic Author(s): {} | Company Affiliation(s): {} | Corresponding Author Email: {}",
            self.pubmed_id,
            self.rendered_title(),
            self.rendered_year(),
            self.rendered_authors(),
            self.rendered_affiliations(),
            self.rendered_email(),
        )
    }
}
