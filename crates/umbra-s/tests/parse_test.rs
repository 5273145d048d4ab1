use umbra_engine::backend::{DocumentBackend, RowSelector};
use umbra_engine::index::{DocumentIndex, FreeTextIndex, InfoboxIndex, TableIndex, infobox};
use umbra_s::StaticBackend;

const TABLE_FIXTURE: &str = r#"
<html><head><title>AGN Mass Database</title></head><body>
<table>
  <tr><th>#</th><th>Object</th><th>log M / M☉</th></tr>
  <tr><td>1</td><td>  Sagittarius A*  </td><td> 4.3 x 10^6 </td></tr>
  <tr><td>2</td><td>M87*</td><td>6.5
      x 10^9</td></tr>
  <tr><td>3</td><td>NGC 4151</td></tr>
</table>
</body></html>
"#;

#[tokio::test]
async fn table_rows_are_indexed_in_document_order_with_trimmed_text() {
    let mut backend = StaticBackend::with_document("http://example.test/agn", TABLE_FIXTURE);
    let strategy = TableIndex::default();

    let index = strategy.build_index(&mut backend).await.unwrap();

    // The header row has <th> cells only, so it occupies position 1 without
    // contributing a name.
    assert_eq!(index["Sagittarius A*"], 2);
    assert_eq!(index["M87*"], 3);
    assert_eq!(index["NGC 4151"], 4);

    let mass = strategy.extract_at(&mut backend, 2).await.unwrap();
    assert_eq!(mass.as_deref(), Some("4.3 x 10^6"));

    // Internal newlines collapse to single spaces.
    let mass = strategy.extract_at(&mut backend, 3).await.unwrap();
    assert_eq!(mass.as_deref(), Some("6.5 x 10^9"));

    // Row exists but has no third cell.
    let mass = strategy.extract_at(&mut backend, 4).await.unwrap();
    assert_eq!(mass, None);
}

#[tokio::test]
async fn navigation_is_required_before_queries_without_a_document() {
    let mut backend = StaticBackend::new(std::time::Duration::from_secs(1));
    backend.launch().await.unwrap();

    let selector = RowSelector {
        row: "tr".into(),
        key: "td".into(),
        value: "td".into(),
    };
    assert!(backend.select_rows(&selector).await.is_err());
}

#[tokio::test]
async fn infobox_labels_resolve_to_adjacent_values() {
    let html = r#"
<html><body>
<table class="infobox">
  <tr><th>Constellation</th><td>Virgo</td></tr>
  <tr><th>Mass</th><td>6.5 x 10^9 M☉</td></tr>
  <tr><th>Distance</th><td></td></tr>
</table>
</body></html>
"#;
    let mut backend = StaticBackend::with_document("http://example.test/m87", html);
    let strategy = InfoboxIndex::new(infobox::default_selector());

    let index = strategy.build_index(&mut backend).await.unwrap();
    assert_eq!(index["Mass"], 2);

    let value = strategy.extract_at(&mut backend, index["Mass"]).await.unwrap();
    assert_eq!(value.as_deref(), Some("6.5 x 10^9 M☉"));

    // Present-but-empty cell comes back as Some(""), preserving the
    // partial-success arm of the result model.
    let value = strategy
        .extract_at(&mut backend, index["Distance"])
        .await
        .unwrap();
    assert_eq!(value.as_deref(), Some(""));
}

#[tokio::test]
async fn free_text_blocks_carry_tags_for_heading_detection() {
    let html = r#"
<html><body>
<h1>Black holes</h1>
<h2>Sagittarius A*</h2>
<p>Stellar orbits give a mass of 4.3 x 10^6 solar masses.</p>
<h2>M87*</h2>
<p>About 6.5 billion solar masses.</p>
</body></html>
"#;
    let mut backend = StaticBackend::with_document("http://example.test/article", html);
    let strategy = FreeTextIndex::default();

    let index = strategy.build_index(&mut backend).await.unwrap();
    let position = index["Sagittarius A*"];

    let mass = strategy.extract_at(&mut backend, position).await.unwrap();
    assert_eq!(mass.as_deref(), Some("4.3 x 10^6 solar masses"));
}

#[tokio::test]
async fn fixture_documents_are_ready_without_launch() {
    let backend = StaticBackend::with_document("http://example.test/agn", TABLE_FIXTURE);
    assert!(backend.is_ready().await);
}
