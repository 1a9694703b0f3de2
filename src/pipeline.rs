//! Sequential search-then-fetch loop.
//!
//! The loop is deliberately serial: E-utilities asks unauthenticated clients
//! to stay under a few requests per second, so a fixed pause follows every
//! detail fetch. Per-item failures are absorbed here; a failed PMID is
//! skipped and the batch continues.

use tokio::time::sleep;
use tracing::{debug, warn};

use crate::models::{PaperRecord, SearchQuery};
use crate::sources::pubmed::PubMedClient;

/// Pause after each detail fetch
pub const FETCH_DELAY: std::time::Duration = std::time::Duration::from_millis(500);

/// Run the full pipeline: search for PMIDs, then fetch each paper in turn.
///
/// Never fails: a search error yields an empty list, a fetch error drops
/// that one paper. With `progress` set, status lines are printed for each
/// step the way the CLI's debug mode expects.
pub async fn collect_papers(
    client: &PubMedClient,
    query: &SearchQuery,
    progress: bool,
) -> Vec<PaperRecord> {
    let ids = match client.search(query).await {
        Ok(ids) => ids,
        Err(e) => {
            warn!(error = %e, "search failed, treating as zero results");
            eprintln!("❌ Error fetching search results: {}", e);
            return Vec::new();
        }
    };

    if progress {
        println!("🔍 Found {} papers for query: {}", ids.len(), query.query);
    }

    let mut papers = Vec::new();
    for pubmed_id in &ids {
        match client.fetch_details(pubmed_id).await {
            Ok(record) => {
                if progress {
                    println!("✅ Processed {}: {}", pubmed_id, record.rendered_title());
                }
                debug!(pubmed_id = %pubmed_id, "fetched paper");
                papers.push(record);
            }
            Err(e) => {
                warn!(pubmed_id = %pubmed_id, error = %e, "skipping paper");
                eprintln!("⚠️ Error fetching paper {}: {}", pubmed_id, e);
            }
        }
        sleep(FETCH_DELAY).await;
    }

    papers
}
