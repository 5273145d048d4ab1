use std::sync::Arc;
use std::time::Duration;
use serial_test::serial;
use umbra_engine::backend::DocumentBackend;
use umbra_engine::index::TableIndex;
use umbra_engine::{Resolver, ResolverOptions};
use umbra_h::{HeadlessBackend, RendererPool};

fn fixture_url() -> String {
    let html = "<html><head><title>AGN Mass Database</title></head><body>\
        <table>\
        <tr><td>1</td><td>Sagittarius A*</td><td>4.3 x 10^6</td></tr>\
        <tr><td>2</td><td>M87*</td><td>6.5 x 10^9</td></tr>\
        </table></body></html>";
    format!("data:text/html,{}", html)
}

#[tokio::test]
#[serial]
async fn resolves_against_a_rendered_fixture_page() {
    tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::INFO)
        .try_init()
        .ok();

    let pool = Arc::new(RendererPool::new(1, false));
    let mut backend = HeadlessBackend::new(pool);
    if let Err(e) = backend.launch().await {
        eprintln!("Failed to launch browser (is Chromium installed?): {}", e);
        return;
    }
    // Relaunch is handled by the resolver; hand it the live backend.
    let mut resolver = Resolver::new(
        Box::new(backend),
        Box::new(TableIndex::default()),
        ResolverOptions {
            base_url: fixture_url(),
            timeout: Duration::from_secs(30),
            retries: 0,
            backoff: Duration::from_millis(100),
        },
    );

    let hit = resolver.resolve("M87*").await;
    assert!(hit.is_success(), "unexpected error: {:?}", hit.error);
    assert_eq!(hit.mass, "6.5 x 10^9");

    let miss = resolver.resolve("Unknown").await;
    assert!(miss.error.is_some());
    assert!(!miss.source.is_empty());

    resolver.shutdown().await.expect("shutdown failed");
}

#[tokio::test]
#[serial]
async fn pool_releases_renderers_on_both_exit_paths() {
    let pool = Arc::new(RendererPool::new(1, false));
    assert_eq!(pool.available(), 1);

    let renderer = match pool.acquire().await {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Failed to launch browser (is Chromium installed?): {}", e);
            return;
        }
    };
    assert_eq!(pool.available(), 0);

    // Orderly close returns the permit.
    renderer.close().await.expect("close failed");
    assert_eq!(pool.available(), 1);

    // Dropping without close also returns it (teardown happens off-task).
    let renderer = pool.acquire().await.expect("second acquire failed");
    assert_eq!(pool.available(), 0);
    drop(renderer);
    assert_eq!(pool.available(), 1);
}
