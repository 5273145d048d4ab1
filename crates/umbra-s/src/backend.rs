//! Static document backend: plain HTTP fetch plus an HTML parser, no script
//! execution. The cheap choice for sources that render server-side.

use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use tracing::info;
use umbra_engine::backend::{
    BackendError, DocumentBackend, DocumentRow, NavigationResult, RowSelector, TextBlock,
    normalize_text,
};

struct FetchedDocument {
    url: String,
    html: String,
}

pub struct StaticBackend {
    client: Option<reqwest::Client>,
    timeout: Duration,
    document: Option<FetchedDocument>,
}

impl StaticBackend {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: None,
            timeout,
            document: None,
        }
    }

    /// Backend over an already-fetched document. Used for fixtures and for
    /// callers that obtained the HTML elsewhere; `navigate` is not needed
    /// before querying.
    pub fn with_document(url: &str, html: &str) -> Self {
        Self {
            client: None,
            timeout: Duration::from_secs(20),
            document: Some(FetchedDocument {
                url: url.to_string(),
                html: html.to_string(),
            }),
        }
    }

    fn document(&self) -> Result<&FetchedDocument, BackendError> {
        self.document
            .as_ref()
            .ok_or_else(|| BackendError::Navigation("no document loaded".into()))
    }
}

#[async_trait]
impl DocumentBackend for StaticBackend {
    async fn launch(&mut self) -> Result<(), BackendError> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("umbra/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| BackendError::Other(format!("failed to build HTTP client: {e}")))?;
        self.client = Some(client);
        Ok(())
    }

    async fn close(&mut self) -> Result<(), BackendError> {
        self.client = None;
        self.document = None;
        Ok(())
    }

    async fn is_ready(&self) -> bool {
        self.client.is_some() || self.document.is_some()
    }

    async fn navigate(&mut self, url: &str) -> Result<NavigationResult, BackendError> {
        let client = self.client.as_ref().ok_or(BackendError::NotReady)?;

        info!("Fetching: {}", url);
        let response = client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                BackendError::Timeout(self.timeout)
            } else {
                BackendError::Navigation(e.to_string())
            }
        })?;

        let status = response.status();
        let final_url = response.url().to_string();
        if !status.is_success() {
            return Err(BackendError::Status {
                status: status.as_u16(),
                url: final_url,
            });
        }

        let html = response
            .text()
            .await
            .map_err(|e| BackendError::Navigation(e.to_string()))?;
        let title = title_from_html(&html);
        self.document = Some(FetchedDocument {
            url: final_url.clone(),
            html,
        });

        Ok(NavigationResult {
            url: final_url,
            title,
            status: status.as_u16(),
        })
    }

    async fn select_rows(
        &mut self,
        selector: &RowSelector,
    ) -> Result<Vec<DocumentRow>, BackendError> {
        let doc = self.document()?;
        rows_from_html(&doc.html, selector)
    }

    async fn select_blocks(&mut self, selector: &str) -> Result<Vec<TextBlock>, BackendError> {
        let doc = self.document()?;
        blocks_from_html(&doc.html, selector)
    }
}

fn parse_selector(input: &str) -> Result<Selector, BackendError> {
    Selector::parse(input).map_err(|e| BackendError::Selector(e.to_string()))
}

fn element_text(element: ElementRef<'_>) -> String {
    normalize_text(&element.text().collect::<String>())
}

fn title_from_html(html: &str) -> String {
    let document = Html::parse_document(html);
    match Selector::parse("title") {
        Ok(selector) => document
            .select(&selector)
            .next()
            .map(element_text)
            .unwrap_or_default(),
        Err(_) => String::new(),
    }
}

fn rows_from_html(html: &str, selector: &RowSelector) -> Result<Vec<DocumentRow>, BackendError> {
    let row_sel = parse_selector(&selector.row)?;
    let key_sel = parse_selector(&selector.key)?;
    let value_sel = parse_selector(&selector.value)?;

    let document = Html::parse_document(html);
    Ok(document
        .select(&row_sel)
        .map(|row| DocumentRow {
            key: row.select(&key_sel).next().map(element_text),
            value: row.select(&value_sel).next().map(element_text),
        })
        .collect())
}

fn blocks_from_html(html: &str, selector: &str) -> Result<Vec<TextBlock>, BackendError> {
    let block_sel = parse_selector(selector)?;
    let document = Html::parse_document(html);
    Ok(document
        .select(&block_sel)
        .map(|element| TextBlock {
            tag: element.value().name().to_ascii_lowercase(),
            text: element_text(element),
        })
        .collect())
}
