//! Integration tests for the papers fetcher.
//!
//! These run the search-then-fetch pipeline against a mock E-utilities
//! server and check the exported CSV end to end.

use mockito::Matcher;
use papers_fetcher::export;
use papers_fetcher::models::{SearchQuery, CSV_HEADERS};
use papers_fetcher::pipeline::collect_papers;
use papers_fetcher::sources::pubmed::PubMedClient;

const FETCH_XML_111: &str = r#"<?xml version="1.0"?>
<PubmedArticleSet>
  <PubmedArticle>
    <MedlineCitation>
      <PMID Version="1">111</PMID>
      <Article>
        <Journal>
          <JournalIssue>
            <PubDate><Year>2023</Year></PubDate>
          </JournalIssue>
        </Journal>
        <ArticleTitle>Protein folding at scale</ArticleTitle>
        <AuthorList>
          <Author>
            <LastName>Doe</LastName>
            <ForeName>Jane</ForeName>
            <AffiliationInfo>
              <Affiliation>Acme Biotech Inc.</Affiliation>
            </AffiliationInfo>
            <ElectronicAddress>jane@acme.com</ElectronicAddress>
          </Author>
          <Author>
            <LastName>Smith</LastName>
            <ForeName>John</ForeName>
            <AffiliationInfo>
              <Affiliation>Stanford University</Affiliation>
            </AffiliationInfo>
          </Author>
        </AuthorList>
      </Article>
    </MedlineCitation>
  </PubmedArticle>
</PubmedArticleSet>"#;

#[tokio::test]
async fn test_end_to_end_one_success_one_failure() {
    let mut server = mockito::Server::new_async().await;

    let search_mock = server
        .mock("GET", "/esearch.fcgi")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("db".into(), "pubmed".into()),
            Matcher::UrlEncoded("term".into(), "biotech".into()),
            Matcher::UrlEncoded("retmax".into(), "10".into()),
            Matcher::UrlEncoded("retmode".into(), "json".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"esearchresult": {"idlist": ["111", "222"]}}"#)
        .create_async()
        .await;

    let fetch_ok = server
        .mock("GET", "/efetch.fcgi")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("db".into(), "pubmed".into()),
            Matcher::UrlEncoded("id".into(), "111".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "text/xml")
        .with_body(FETCH_XML_111)
        .create_async()
        .await;

    // Simulated failure for the second paper
    let fetch_failed = server
        .mock("GET", "/efetch.fcgi")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("db".into(), "pubmed".into()),
            Matcher::UrlEncoded("id".into(), "222".into()),
        ]))
        .with_status(500)
        .create_async()
        .await;

    let client = PubMedClient::with_base_url(server.url()).unwrap();
    let query = SearchQuery::new("biotech").max_results(10);

    let papers = collect_papers(&client, &query, false).await;

    search_mock.assert_async().await;
    fetch_ok.assert_async().await;
    fetch_failed.assert_async().await;

    // The failed PMID is skipped; the batch continues
    assert_eq!(papers.len(), 1);

    let paper = &papers[0];
    assert_eq!(paper.pubmed_id, "111");
    assert_eq!(paper.rendered_title(), "Protein folding at scale");
    assert_eq!(paper.rendered_year(), "2023");
    assert_eq!(paper.rendered_authors(), "Jane Doe");
    assert_eq!(paper.rendered_affiliations(), "Acme Biotech Inc.");
    assert_eq!(paper.rendered_email(), "jane@acme.com");
}

#[tokio::test]
async fn test_search_failure_yields_zero_results() {
    let mut server = mockito::Server::new_async().await;

    let search_mock = server
        .mock("GET", "/esearch.fcgi")
        .match_query(Matcher::Any)
        .with_status(503)
        .create_async()
        .await;

    let client = PubMedClient::with_base_url(server.url()).unwrap();
    let query = SearchQuery::new("anything");

    let papers = collect_papers(&client, &query, false).await;

    search_mock.assert_async().await;
    assert!(papers.is_empty());
}

#[tokio::test]
async fn test_malformed_fetch_xml_skips_that_paper() {
    let mut server = mockito::Server::new_async().await;

    let _search = server
        .mock("GET", "/esearch.fcgi")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"esearchresult": {"idlist": ["111"]}}"#)
        .create_async()
        .await;

    let _fetch = server
        .mock("GET", "/efetch.fcgi")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<PubmedArticleSet><broken")
        .create_async()
        .await;

    let client = PubMedClient::with_base_url(server.url()).unwrap();
    let papers = collect_papers(&client, &SearchQuery::new("x"), false).await;

    assert!(papers.is_empty());
}

#[tokio::test]
async fn test_pipeline_output_exports_to_csv() {
    let mut server = mockito::Server::new_async().await;

    let _search = server
        .mock("GET", "/esearch.fcgi")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"esearchresult": {"idlist": ["111"]}}"#)
        .create_async()
        .await;

    let _fetch = server
        .mock("GET", "/efetch.fcgi")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(FETCH_XML_111)
        .create_async()
        .await;

    let client = PubMedClient::with_base_url(server.url()).unwrap();
    let papers = collect_papers(&client, &SearchQuery::new("biotech"), false).await;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("results.csv");
    export::export(&papers, Some(&path)).unwrap();

    let mut reader = csv::Reader::from_path(&path).unwrap();
    assert_eq!(
        reader.headers().unwrap().iter().collect::<Vec<_>>(),
        CSV_HEADERS.to_vec()
    );
    let rows: Vec<_> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get(0), Some("111"));
    assert_eq!(rows[0].get(3), Some("Jane Doe"));
    assert_eq!(rows[0].get(4), Some("Acme Biotech Inc."));
    assert_eq!(rows[0].get(5), Some("jane@acme.com"));
}
