//! Bounded renderer acquisition.
//!
//! At most `capacity` Chromium instances are live at once. A renderer is
//! released on every exit path: `close()` tears it down in an orderly way,
//! and the `Drop` guard kills the browser and frees the permit if the holder
//! bails out early (cancellation, panic, error return).

use crate::cdp::CdpClient;
use chromiumoxide::Page;
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use umbra_engine::BackendError;

pub struct RendererPool {
    permits: Arc<Semaphore>,
    visible: bool,
    capacity: usize,
}

impl RendererPool {
    pub fn new(capacity: usize, visible: bool) -> Self {
        let capacity = capacity.max(1);
        Self {
            permits: Arc::new(Semaphore::new(capacity)),
            visible,
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Renderers currently available without waiting.
    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }

    /// Wait for a permit, then launch a fresh renderer. On launch failure
    /// the permit is released immediately.
    pub async fn acquire(&self) -> Result<PooledRenderer, BackendError> {
        let permit = self
            .permits
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| BackendError::Other("renderer pool closed".into()))?;

        tracing::debug!(available = self.permits.available_permits(), "renderer permit acquired");
        match CdpClient::launch(self.visible).await {
            Ok(client) => Ok(PooledRenderer {
                client: Some(client),
                _permit: permit,
            }),
            // Dropping `permit` here returns it to the pool.
            Err(e) => Err(BackendError::Other(format!("renderer launch failed: {e}"))),
        }
    }
}

pub struct PooledRenderer {
    client: Option<CdpClient>,
    _permit: OwnedSemaphorePermit,
}

impl PooledRenderer {
    pub fn page(&self) -> Option<&Page> {
        self.client.as_ref().map(|c| &c.page)
    }

    pub fn client(&self) -> Option<&CdpClient> {
        self.client.as_ref()
    }

    /// Orderly teardown. Prefer this over dropping so close errors surface.
    pub async fn close(mut self) -> Result<(), BackendError> {
        if let Some(client) = self.client.take() {
            client
                .close()
                .await
                .map_err(|e| BackendError::Other(format!("renderer close failed: {e}")))?;
        }
        Ok(())
    }
}

impl Drop for PooledRenderer {
    fn drop(&mut self) {
        if let Some(client) = self.client.take() {
            // Dropped without close(): tear the browser down off-task so no
            // renderer process outlives its request.
            if let Ok(handle) = tokio::runtime::Handle::try_current() {
                handle.spawn(async move {
                    if let Err(e) = client.close().await {
                        tracing::debug!("background renderer teardown failed: {}", e);
                    }
                });
            }
        }
    }
}
