use std::time::Instant;

use super::*;

#[tokio::test]
async fn test_listing_takes_first_five() -> TestResult<()> {
  let ids = ["2406.1", "2406.2", "2406.3", "2406.4", "2406.5", "2406.6", "2406.7", "2406.8"];
  let server = TestServer::start([listing_route("2024-06-15", &ids)]).await;
  let config = test_config(&server);
  let resolver = ListingResolver::new(config.http_client()?, config)?;

  let found = resolver.resolve(date(2024, 6, 15)).await?;
  assert_eq!(found, ["2406.1", "2406.2", "2406.3", "2406.4", "2406.5"]);
  assert_eq!(server.hits("/papers/date/2024-06-15"), 1);
  Ok(())
}

#[tokio::test]
async fn test_empty_listing_is_not_an_error() -> TestResult<()> {
  let server = TestServer::start([listing_route("2024-06-15", &[])]).await;
  let config = test_config(&server);
  let resolver = ListingResolver::new(config.http_client()?, config)?;

  assert!(resolver.resolve(date(2024, 6, 15)).await?.is_empty());
  Ok(())
}

#[tokio::test]
async fn test_listing_error_status_is_network_error() -> TestResult<()> {
  let server =
    TestServer::start([("/papers/date/2024-06-15".to_string(), Canned::status(503))]).await;
  let config = test_config(&server);
  let resolver = ListingResolver::new(config.http_client()?, config)?;

  let err = resolver.resolve(date(2024, 6, 15)).await.unwrap_err();
  assert_eq!(err.kind(), ErrorKind::Network);
  assert!(matches!(
    err,
    DailyPaperError::HttpStatus { status, .. } if status == reqwest::StatusCode::SERVICE_UNAVAILABLE
  ));
  Ok(())
}

#[tokio::test]
async fn test_fetch_is_idempotent() -> TestResult<()> {
  let server = TestServer::start([pdf_route("2401.00001", "%PDF-1.5 body")]).await;
  let config = test_config(&server);
  let fetcher = DocumentFetcher::new(config.http_client()?, config);
  let dir = tempdir()?;
  let name = "20240615_paper1_2401.00001.pdf";

  let first = fetcher.fetch("2401.00001", dir.path(), name).await?;
  assert_eq!(first, FetchOutcome::Downloaded(dir.path().join(name)));
  assert_eq!(std::fs::read_to_string(dir.path().join(name))?, "%PDF-1.5 body");

  let second = fetcher.fetch("2401.00001", dir.path(), name).await?;
  assert_eq!(second, FetchOutcome::AlreadyPresent(dir.path().join(name)));
  assert_eq!(server.hits("/pdf/2401.00001.pdf"), 1);
  Ok(())
}

#[tokio::test]
async fn test_fetch_missing_document_writes_nothing() -> TestResult<()> {
  let server = TestServer::start([]).await;
  let config = test_config(&server);
  let fetcher = DocumentFetcher::new(config.http_client()?, config);
  let dir = tempdir()?;

  let outcome = fetcher.fetch("2401.99999", dir.path(), "20240615_paper1_2401.99999.pdf").await?;
  assert_eq!(outcome, FetchOutcome::Unavailable { status: reqwest::StatusCode::NOT_FOUND });
  assert_eq!(std::fs::read_dir(dir.path())?.count(), 0);
  Ok(())
}

#[tokio::test]
async fn test_fetch_streams_large_body() -> TestResult<()> {
  let body: String = (0..5000).map(|i| format!("line {i}\n")).collect();
  assert!(body.len() > 4 * dailypaper::fetch::CHUNK_SIZE);
  let server = TestServer::start([pdf_route("big", &body)]).await;
  let config = test_config(&server);
  let fetcher = DocumentFetcher::new(config.http_client()?, config);
  let dir = tempdir()?;

  fetcher.fetch("big", dir.path(), "20240615_paper1_big.pdf").await?;
  assert_eq!(std::fs::read_to_string(dir.path().join("20240615_paper1_big.pdf"))?, body);
  assert!(!dir.path().join("20240615_paper1_big.pdf.part").exists());
  Ok(())
}

#[tokio::test]
async fn test_batch_isolates_failures() -> TestResult<()> {
  let server = TestServer::start([
    listing_route("2024-06-14", &["a", "b", "c"]),
    // 2024-06-15 has no listing and answers 404
    listing_route("2024-06-16", &["d"]),
    pdf_route("a", "paper a"),
    pdf_route("c", "paper c"),
    pdf_route("d", "paper d"),
  ])
  .await;
  let (_root, papers, _) = workspace();
  let range = DateRange::new(date(2024, 6, 14), date(2024, 6, 16));

  let report = BatchDownloader::new(test_config(&server))?.run(&range, &papers).await?;

  assert_eq!(report.dates.len(), 3);
  assert!(report.dates[1].listing.is_err());
  assert_eq!(report.downloaded(), 3);
  assert_eq!(report.unavailable(), 1);
  assert_eq!(report.failed_dates(), 1);

  let mut files: Vec<_> = std::fs::read_dir(&papers)?
    .map(|e| e.map(|e| e.file_name().to_string_lossy().into_owned()))
    .collect::<Result<_, _>>()?;
  files.sort();
  assert_eq!(files, [
    "20240614_paper1_a.pdf",
    "20240614_paper3_c.pdf",
    "20240616_paper1_d.pdf"
  ]);
  Ok(())
}

#[tokio::test]
async fn test_batch_continues_after_transport_errors() -> TestResult<()> {
  let server = TestServer::start([
    listing_route("2024-06-14", &["a", "b"]),
    listing_route("2024-06-15", &["c"]),
  ])
  .await;
  let (_root, papers, _) = workspace();
  let range = DateRange::new(date(2024, 6, 14), date(2024, 6, 15));
  // Nothing listens on the discard port, so every document request is refused.
  let config =
    test_config(&server).with_document_url_template("http://127.0.0.1:9/pdf/{identifier}.pdf");

  let report = BatchDownloader::new(config)?.run(&range, &papers).await?;

  assert_eq!(report.dates.len(), 2);
  assert_eq!(report.failed_dates(), 0);
  assert_eq!(report.failed_items(), 3);
  assert_eq!(report.downloaded(), 0);
  for item in report.items() {
    assert_eq!(item.outcome.as_ref().unwrap_err().kind(), ErrorKind::Network);
  }
  assert_eq!(server.hits("/papers/date/2024-06-15"), 1);
  assert_eq!(std::fs::read_dir(&papers)?.count(), 0);
  Ok(())
}

#[tokio::test]
async fn test_batch_rerun_only_fetches_listings() -> TestResult<()> {
  let server = TestServer::start([
    listing_route("2024-06-15", &["a", "b"]),
    pdf_route("a", "paper a"),
    pdf_route("b", "paper b"),
  ])
  .await;
  let (_root, papers, _) = workspace();
  let range = DateRange::new(date(2024, 6, 15), date(2024, 6, 15));
  let downloader = BatchDownloader::new(test_config(&server))?;

  let first = downloader.run(&range, &papers).await?;
  assert_eq!(first.downloaded(), 2);
  let second = downloader.run(&range, &papers).await?;
  assert_eq!(second.downloaded(), 0);
  assert_eq!(second.already_present(), 2);

  assert_eq!(server.hits("/papers/date/2024-06-15"), 2);
  assert_eq!(server.hits("/pdf/a.pdf"), 1);
  assert_eq!(server.hits("/pdf/b.pdf"), 1);
  Ok(())
}

#[tokio::test]
async fn test_batch_pauses_between_downloads_only() -> TestResult<()> {
  let server = TestServer::start([
    listing_route("2024-06-15", &["a", "b", "c"]),
    pdf_route("a", "paper a"),
    pdf_route("b", "paper b"),
    pdf_route("c", "paper c"),
  ])
  .await;
  let (_root, papers, _) = workspace();
  let range = DateRange::new(date(2024, 6, 15), date(2024, 6, 15));
  let config = test_config(&server).with_download_delay(Duration::from_millis(100));

  let started = Instant::now();
  let report = BatchDownloader::new(config)?.run(&range, &papers).await?;
  assert_eq!(report.downloaded(), 3);
  // Two pauses for three documents.
  assert!(started.elapsed() >= Duration::from_millis(200));
  Ok(())
}

#[tokio::test]
async fn test_batch_respects_configured_cap() -> TestResult<()> {
  let server = TestServer::start([
    listing_route("2024-06-15", &["a", "b", "c"]),
    pdf_route("a", "paper a"),
    pdf_route("b", "paper b"),
    pdf_route("c", "paper c"),
  ])
  .await;
  let (_root, papers, _) = workspace();
  let range = DateRange::new(date(2024, 6, 15), date(2024, 6, 15));
  let config = test_config(&server).with_max_papers_per_date(2);

  let report = BatchDownloader::new(config)?.run(&range, &papers).await?;
  assert_eq!(report.downloaded(), 2);
  assert_eq!(server.hits("/pdf/c.pdf"), 0);
  Ok(())
}
