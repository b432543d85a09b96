use super::types::{
    DemoError, Step, Tweet, DOC_ID, DOC_TYPE, INDEX_NAME, PAGE_SIZE, TERM_FIELD, TERM_VALUE,
};
use crate::client::backend::SearchBackend;
use crate::client::protocol::{DecodedHits, IndexRequest, SearchRequest, TermQuery};
use crate::config::types::DecodePolicy;

/// Runs the create / index / search / delete script and returns the transcript.
///
/// Steps run strictly in order; the first failure is returned and nothing after it
/// runs, so a failure past index creation leaves the index behind.
pub async fn run_demo(
    backend: &dyn SearchBackend,
    policy: DecodePolicy,
) -> Result<String, DemoError> {
    backend.connect().await.map_err(DemoError::at(Step::Connect))?;

    backend
        .create_index(INDEX_NAME)
        .await
        .map_err(DemoError::at(Step::CreateIndex))?;
    tracing::debug!("Created index {}", INDEX_NAME);

    let document = IndexRequest {
        index: INDEX_NAME.to_string(),
        doc_type: DOC_TYPE.to_string(),
        id: DOC_ID.to_string(),
        body: serde_json::to_value(Tweet::sample())?,
        refresh: true,
    };
    backend
        .index_document(&document)
        .await
        .map_err(DemoError::at(Step::IndexDocument))?;
    tracing::debug!("Indexed document {} into {}", DOC_ID, INDEX_NAME);

    let response = backend
        .search(&demo_search())
        .await
        .map_err(DemoError::at(Step::Search))?;
    let hits: DecodedHits<Tweet> = response.decode_hits(policy)?;
    tracing::debug!(
        "Search took {}ms, {} hits, {} decoded",
        hits.took,
        hits.total,
        hits.items.len()
    );

    let transcript = render_transcript(&hits);

    backend
        .delete_index(INDEX_NAME)
        .await
        .map_err(DemoError::at(Step::DeleteIndex))?;
    tracing::debug!("Deleted index {}", INDEX_NAME);

    Ok(transcript)
}

/// The query the demo runs: tweets by `olivere`, sorted by user, first page.
pub fn demo_search() -> SearchRequest {
    SearchRequest::new(INDEX_NAME, TermQuery::new(TERM_FIELD, TERM_VALUE))
        .sort(TERM_FIELD, true)
        .from(0)
        .size(PAGE_SIZE)
        .pretty(true)
}

/// Renders the report lines for a decoded search.
///
/// The total is reported twice: after the tweet list and as the hits-present line.
pub fn render_transcript(hits: &DecodedHits<Tweet>) -> String {
    let mut output = format!("Query took {} milliseconds\n", hits.took);

    for tweet in &hits.items {
        output.push_str(&format!("Tweet by {}: {}\n", tweet.user, tweet.message));
    }
    output.push_str(&format!("Found a total of {} tweets\n", hits.total));

    if hits.total > 0 {
        output.push_str(&format!("Found a total of {} tweets\n", hits.total));
    } else {
        output.push_str("Found no tweets\n");
    }

    output
}
