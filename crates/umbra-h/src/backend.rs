//! Headless document backend: Chromium over CDP, for sources that only
//! materialize their content after script execution.

use crate::pool::{PooledRenderer, RendererPool};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;
use umbra_engine::backend::{
    BackendError, DocumentBackend, DocumentRow, NavigationResult, RowSelector, TextBlock,
    normalize_text,
};

pub struct HeadlessBackend {
    pool: Arc<RendererPool>,
    renderer: Option<PooledRenderer>,
}

impl HeadlessBackend {
    pub fn new(pool: Arc<RendererPool>) -> Self {
        Self {
            pool,
            renderer: None,
        }
    }

    fn page(&self) -> Result<&chromiumoxide::Page, BackendError> {
        self.renderer
            .as_ref()
            .and_then(|r| r.page())
            .ok_or(BackendError::NotReady)
    }

    async fn evaluate<T: for<'de> Deserialize<'de>>(
        &self,
        expression: &str,
    ) -> Result<T, BackendError> {
        let client = self
            .renderer
            .as_ref()
            .and_then(|r| r.client())
            .ok_or(BackendError::NotReady)?;
        let value = client
            .evaluate_json(expression)
            .await
            .map_err(|e| BackendError::Evaluation(e.to_string()))?;
        Ok(serde_json::from_value(value)?)
    }
}

/// Shape returned by the in-page enumeration scripts; `null` marks a cell
/// that is absent from the markup.
#[derive(Debug, Deserialize)]
struct RawRow {
    key: Option<String>,
    value: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawBlock {
    tag: String,
    text: String,
}

/// Quote a CSS selector as a JS string literal.
fn js_string(input: &str) -> Result<String, BackendError> {
    Ok(serde_json::to_string(input)?)
}

#[async_trait]
impl DocumentBackend for HeadlessBackend {
    async fn launch(&mut self) -> Result<(), BackendError> {
        info!("Launching headless backend (Chromium)...");
        let renderer = self.pool.acquire().await?;
        self.renderer = Some(renderer);
        Ok(())
    }

    async fn close(&mut self) -> Result<(), BackendError> {
        if let Some(renderer) = self.renderer.take() {
            renderer.close().await?;
        }
        Ok(())
    }

    async fn is_ready(&self) -> bool {
        self.renderer.is_some()
    }

    async fn navigate(&mut self, url: &str) -> Result<NavigationResult, BackendError> {
        let page = self.page()?;

        info!("Navigating to: {}", url);
        page.goto(url)
            .await
            .map_err(|e| BackendError::Navigation(e.to_string()))?;

        let title = page
            .get_title()
            .await
            .unwrap_or_default()
            .unwrap_or_default();
        let url = page
            .url()
            .await
            .map_err(|e| BackendError::Navigation(e.to_string()))?
            .unwrap_or_default();
        // CDP does not surface the HTTP status on the simple path; a loaded
        // page reports 200, failures surface as navigation errors.
        Ok(NavigationResult {
            url,
            title,
            status: 200,
        })
    }

    async fn select_rows(
        &mut self,
        selector: &RowSelector,
    ) -> Result<Vec<DocumentRow>, BackendError> {
        let expression = format!(
            "Array.from(document.querySelectorAll({row})).map(r => {{ \
               const k = r.querySelector({key}); \
               const v = r.querySelector({value}); \
               return {{ key: k ? k.textContent : null, value: v ? v.textContent : null }}; \
             }})",
            row = js_string(&selector.row)?,
            key = js_string(&selector.key)?,
            value = js_string(&selector.value)?,
        );

        let raw: Vec<RawRow> = self.evaluate(&expression).await?;
        Ok(raw
            .into_iter()
            .map(|r| DocumentRow {
                key: r.key.as_deref().map(normalize_text),
                value: r.value.as_deref().map(normalize_text),
            })
            .collect())
    }

    async fn select_blocks(&mut self, selector: &str) -> Result<Vec<TextBlock>, BackendError> {
        let expression = format!(
            "Array.from(document.querySelectorAll({sel})).map(e => \
               ({{ tag: e.tagName.toLowerCase(), text: e.textContent || \"\" }}))",
            sel = js_string(selector)?,
        );

        let raw: Vec<RawBlock> = self.evaluate(&expression).await?;
        Ok(raw
            .into_iter()
            .map(|b| TextBlock {
                tag: b.tag,
                text: normalize_text(&b.text),
            })
            .collect())
    }
}
