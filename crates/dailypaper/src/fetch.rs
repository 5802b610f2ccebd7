//! Idempotent, streamed document downloads.
//!
//! The existence of a file at the destination path is the only record that a paper has been
//! downloaded. [`DocumentFetcher::fetch`] therefore never touches the network when the file is
//! already there, and only moves a download into place once its body has been fully written:
//! bytes are streamed into a `.part` sibling and renamed on completion, so an interrupted run
//! cannot leave behind a truncated document that a later run would mistake for a finished one.

use tokio::{
  fs::{self, File},
  io::{AsyncWriteExt, BufWriter},
};

use super::*;

/// Size of the write buffer used while streaming a document to disk.
pub const CHUNK_SIZE: usize = 8192;

/// Suffix appended to a document's filename while it is being written.
const PARTIAL_SUFFIX: &str = "part";

/// What a single fetch did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
  /// The document was downloaded to the given path.
  Downloaded(PathBuf),
  /// A file already existed at the given path; nothing was requested.
  AlreadyPresent(PathBuf),
  /// The host answered with a non-success status; nothing was written.
  Unavailable {
    /// Status returned by the document host
    status: reqwest::StatusCode,
  },
}

/// Downloads documents by identifier.
#[derive(Debug, Clone)]
pub struct DocumentFetcher {
  /// Client shared with the rest of the run
  client: reqwest::Client,
  /// Source of the document URL template
  config: HarvestConfig,
}

impl DocumentFetcher {
  /// Creates a fetcher using the given client and configuration.
  pub fn new(client: reqwest::Client, config: HarvestConfig) -> Self { Self { client, config } }

  /// Downloads the document for `identifier` into `dir/file_name`.
  ///
  /// Returns [`FetchOutcome::AlreadyPresent`] without any request when the target exists, and
  /// [`FetchOutcome::Unavailable`] when the host answers with a non-success status. Transport
  /// errors and filesystem errors are returned as `Err` and leave no file at the target path.
  pub async fn fetch(&self, identifier: &str, dir: &Path, file_name: &str) -> Result<FetchOutcome> {
    let path = dir.join(file_name);
    if fs::try_exists(&path).await? {
      info!("File already exists: {}, skipping download", path.display());
      return Ok(FetchOutcome::AlreadyPresent(path));
    }

    let url = self.config.document_url(identifier);
    info!("Downloading {url}");

    let response = self.client.get(&url).send().await?;
    let status = response.status();
    if !status.is_success() {
      warn!("PDF not found for {identifier} (status {status})");
      return Ok(FetchOutcome::Unavailable { status });
    }

    let partial = partial_path(&path);
    if let Err(e) = write_body(response, &partial).await {
      if let Err(cleanup) = fs::remove_file(&partial).await {
        debug!("Could not remove partial download {}: {cleanup}", partial.display());
      }
      return Err(e);
    }
    fs::rename(&partial, &path).await?;

    info!("Successfully downloaded: {url} to {}", path.display());
    Ok(FetchOutcome::Downloaded(path))
  }
}

/// Streams a response body into `path` through a [`CHUNK_SIZE`] buffer.
async fn write_body(mut response: reqwest::Response, path: &Path) -> Result<()> {
  let file = File::create(path).await?;
  let mut writer = BufWriter::with_capacity(CHUNK_SIZE, file);
  let mut written = 0usize;
  while let Some(chunk) = response.chunk().await? {
    writer.write_all(&chunk).await?;
    written += chunk.len();
  }
  writer.flush().await?;
  writer.into_inner().sync_all().await?;
  trace!("Wrote {written} bytes to {}", path.display());
  Ok(())
}

/// The temporary path a document is streamed into before being renamed.
fn partial_path(path: &Path) -> PathBuf {
  let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
  name.push(".");
  name.push(PARTIAL_SUFFIX);
  path.with_file_name(name)
}
