//! PubMed client built on the NCBI E-utilities API.
//!
//! Search goes through `esearch.fcgi` (JSON) and returns a bounded PMID list;
//! per-paper detail goes through `efetch.fcgi` (XML), one request per PMID.

use quick_xml::de::from_str;
use quick_xml::events::Event;
use quick_xml::Reader;
use serde::Deserialize;
use std::time::Duration;

use crate::affiliation::{filter_non_academic, AuthorFields};
use crate::models::{PaperRecord, SearchQuery};
use crate::sources::SourceError;

/// E-utilities base URL
const EUTILS_BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";

/// Per-request deadline
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// PubMed E-utilities client
#[derive(Debug, Clone)]
pub struct PubMedClient {
    http: reqwest::Client,
    base_url: String,
}

impl PubMedClient {
    /// Create a client against the live E-utilities endpoint
    pub fn new() -> Result<Self, SourceError> {
        Self::with_base_url(EUTILS_BASE_URL)
    }

    /// Create a client against a custom base URL (for testing)
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, SourceError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| SourceError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// Build the esearch URL for a query
    fn build_search_url(&self, query: &SearchQuery) -> String {
        format!(
            "{}/esearch.fcgi?db=pubmed&term={}&retmax={}&retmode=json",
            self.base_url,
            urlencoding::encode(&query.query),
            query.max_results
        )
    }

    /// Build the efetch URL for one PMID
    fn build_fetch_url(&self, pubmed_id: &str) -> String {
        format!(
            "{}/efetch.fcgi?db=pubmed&id={}&retmode=xml",
            self.base_url,
            urlencoding::encode(pubmed_id)
        )
    }

    /// Search PubMed and return the matching PMIDs, at most
    /// `query.max_results` of them.
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<String>, SourceError> {
        let url = self.build_search_url(query);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to search PubMed: {}", e)))?;

        if !response.status().is_success() {
            return Err(SourceError::Api(format!(
                "esearch returned status: {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to read search response: {}", e)))?;

        Self::parse_search_response(&body)
    }

    /// Fetch the detail record for one PMID.
    pub async fn fetch_details(&self, pubmed_id: &str) -> Result<PaperRecord, SourceError> {
        let url = self.build_fetch_url(pubmed_id);

        let response = self.http.get(&url).send().await.map_err(|e| {
            SourceError::Network(format!("Failed to fetch paper {}: {}", pubmed_id, e))
        })?;

        if !response.status().is_success() {
            return Err(SourceError::Api(format!(
                "efetch returned status: {}",
                response.status()
            )));
        }

        let xml = response
            .text()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to read fetch response: {}", e)))?;

        Self::parse_fetch_response(pubmed_id, &xml)
    }

    /// Parse the esearch JSON response into a PMID list. A missing
    /// `esearchresult.idlist` path yields an empty list, not an error.
    fn parse_search_response(json: &str) -> Result<Vec<String>, SourceError> {
        #[derive(Debug, Default, Deserialize)]
        struct ESearchResponse {
            #[serde(default)]
            esearchresult: ESearchResult,
        }

        #[derive(Debug, Default, Deserialize)]
        struct ESearchResult {
            #[serde(default)]
            idlist: Vec<String>,
        }

        let response: ESearchResponse = serde_json::from_str(json)?;

        Ok(response.esearchresult.idlist)
    }

    /// Parse one efetch XML document into a [`PaperRecord`].
    fn parse_fetch_response(pubmed_id: &str, xml: &str) -> Result<PaperRecord, SourceError> {
        #[derive(Debug, Deserialize)]
        #[allow(non_snake_case)]
        struct PubmedArticleSet {
            #[serde(rename = "PubmedArticle", default)]
            articles: Vec<PubmedArticle>,
        }

        #[derive(Debug, Deserialize)]
        #[allow(non_snake_case)]
        struct PubmedArticle {
            MedlineCitation: Option<MedlineCitation>,
        }

        #[derive(Debug, Deserialize)]
        #[allow(non_snake_case)]
        struct MedlineCitation {
            Article: Option<Article>,
        }

        #[derive(Debug, Deserialize)]
        #[allow(non_snake_case)]
        struct Article {
            Journal: Option<Journal>,
            ArticleTitle: Option<TextNode>,
            AuthorList: Option<AuthorList>,
        }

        #[derive(Debug, Deserialize)]
        #[allow(non_snake_case)]
        struct Journal {
            JournalIssue: Option<JournalIssue>,
        }

        #[derive(Debug, Deserialize)]
        #[allow(non_snake_case)]
        struct JournalIssue {
            PubDate: Option<PubDate>,
        }

        #[derive(Debug, Deserialize)]
        #[allow(non_snake_case)]
        struct PubDate {
            Year: Option<String>,
        }

        #[derive(Debug, Deserialize)]
        #[allow(non_snake_case)]
        struct AuthorList {
            #[serde(rename = "Author", default)]
            authors: Vec<Author>,
        }

        #[derive(Debug, Deserialize)]
        #[allow(non_snake_case)]
        struct Author {
            LastName: Option<TextNode>,
            ForeName: Option<TextNode>,
            #[serde(default)]
            AffiliationInfo: Vec<AffiliationInfo>,
        }

        #[derive(Debug, Deserialize)]
        #[allow(non_snake_case)]
        struct AffiliationInfo {
            Affiliation: Option<TextNode>,
        }

        #[derive(Debug, Deserialize)]
        struct TextNode {
            #[serde(rename = "$text")]
            value: String,
        }

        let result: PubmedArticleSet = from_str(xml)?;

        let article = result
            .articles
            .into_iter()
            .next()
            .ok_or_else(|| SourceError::NotFound(pubmed_id.to_string()))?;

        let title = article
            .MedlineCitation
            .as_ref()
            .and_then(|m| m.Article.as_ref())
            .and_then(|a| a.ArticleTitle.as_ref())
            .map(|t| t.value.clone());

        let year = article
            .MedlineCitation
            .as_ref()
            .and_then(|m| m.Article.as_ref())
            .and_then(|a| a.Journal.as_ref())
            .and_then(|j| j.JournalIssue.as_ref())
            .and_then(|ji| ji.PubDate.as_ref())
            .and_then(|pd| pd.Year.clone());

        let author_fields = article
            .MedlineCitation
            .as_ref()
            .and_then(|m| m.Article.as_ref())
            .and_then(|a| a.AuthorList.as_ref())
            .map(|al| {
                al.authors
                    .iter()
                    .map(|author| AuthorFields {
                        fore_name: author
                            .ForeName
                            .as_ref()
                            .map(|f| f.value.clone())
                            .unwrap_or_default(),
                        last_name: author
                            .LastName
                            .as_ref()
                            .map(|l| l.value.clone())
                            .unwrap_or_default(),
                        // First affiliation text wins
                        affiliation: author
                            .AffiliationInfo
                            .iter()
                            .filter_map(|ai| ai.Affiliation.as_ref())
                            .map(|a| a.value.clone())
                            .next()
                            .unwrap_or_default(),
                    })
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        let (names, affiliations) = filter_non_academic(&author_fields);

        let mut record = PaperRecord::new(pubmed_id).authors(names, affiliations);
        if let Some(title) = title {
            record = record.title(title);
        }
        if let Some(year) = year {
            record = record.publication_year(year);
        }
        if let Some(email) = first_electronic_address(xml) {
            record = record.corresponding_email(email);
        }

        Ok(record)
    }
}

/// Scan the document for the first `ElectronicAddress` element, wherever it
/// sits. The typed model cannot express a descendant-anywhere lookup, so this
/// walks the raw event stream instead.
fn first_electronic_address(xml: &str) -> Option<String> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();
    let mut in_address = false;
    let mut text = String::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) if e.name().as_ref() == b"ElectronicAddress" => {
                in_address = true;
            }
            Ok(Event::Text(e)) if in_address => {
                text.push_str(e.unescape().unwrap_or_default().trim());
            }
            // First element wins, even when it carries no text
            Ok(Event::End(ref e)) if in_address && e.name().as_ref() == b"ElectronicAddress" => {
                return if text.is_empty() { None } else { Some(text) };
            }
            Ok(Event::Empty(ref e)) if e.name().as_ref() == b"ElectronicAddress" => {
                return None;
            }
            Ok(Event::Eof) | Err(_) => return None,
            _ => {}
        }
        buf.clear();
    }
}
