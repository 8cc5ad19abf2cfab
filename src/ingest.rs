use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use hyper::client::{Client, HttpConnector};
use hyper::Uri;
use log::{debug, info, warn};

use simdomain::strings::StringSet;

use crate::cli::{Action, Args};

/// Gather every domain to analyse: `--domains` first, then whatever the
/// selected action reads, in argument order.
pub async fn collect_domains(args: &Args) -> Result<StringSet> {
    let mut domains = StringSet::new(&args.domains);

    warn_unused_sources(args);

    match args.action {
        Action::File => {
            for path in &args.file {
                domains.extend(read_file(path)?);
            }
        }
        Action::Zip => {
            for path in &args.zip {
                domains.extend(read_zip(path)?);
            }
        }
        Action::Download => {
            if !args.download.is_empty() {
                let client = http_client();
                for url in &args.download {
                    domains.extend(download(&client, url).await?);
                }
            }
        }
    }

    info!("loaded {} domain(s)", domains.len());
    Ok(domains)
}

fn warn_unused_sources(args: &Args) {
    if args.action != Action::File && !args.file.is_empty() {
        warn!("ignoring --file, the selected action is {:?}", args.action);
    }
    if args.action != Action::Zip && !args.zip.is_empty() {
        warn!("ignoring --zip, the selected action is {:?}", args.action);
    }
    if args.action != Action::Download && !args.download.is_empty() {
        warn!("ignoring --download, the selected action is {:?}", args.action);
    }
}

pub fn read_file(path: &Path) -> Result<Vec<String>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("unable to read domain list {}", path.display()))?;

    debug!(
        "read {} line(s) from {}",
        contents.lines().count(),
        path.display()
    );
    Ok(contents.lines().map(str::to_string).collect())
}

/// Every file entry of the archive is read as a newline-delimited list.
pub fn read_zip(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path)
        .with_context(|| format!("unable to open zip archive {}", path.display()))?;
    let mut archive = zip::ZipArchive::new(BufReader::new(file))
        .with_context(|| format!("invalid zip archive {}", path.display()))?;

    let mut lines = Vec::new();

    for idx in 0..archive.len() {
        let mut entry = archive.by_index(idx)?;
        if entry.is_dir() {
            continue;
        }

        let name = entry.name().to_string();
        let mut contents = String::new();
        entry
            .read_to_string(&mut contents)
            .with_context(|| format!("unable to read {} from {}", name, path.display()))?;

        debug!(
            "read {} line(s) from {}:{}",
            contents.lines().count(),
            path.display(),
            name
        );
        lines.extend(contents.lines().map(str::to_string));
    }

    Ok(lines)
}

/// HTTP client used for downloading domain lists.
fn http_client() -> Client<HttpConnector> {
    let mut connector = HttpConnector::new();
    connector.set_connect_timeout(Some(Duration::new(5, 0)));
    connector.enforce_http(true);

    Client::builder()
        .pool_idle_timeout(Duration::from_secs(30))
        .http2_only(false)
        .retry_canceled_requests(false)
        .build(connector)
}

pub async fn download(client: &Client<HttpConnector>, url: &str) -> Result<Vec<String>> {
    let uri: Uri = url
        .parse()
        .with_context(|| format!("invalid download url {:?}", url))?;

    let response = client
        .get(uri)
        .await
        .with_context(|| format!("unable to download {}", url))?;

    if !response.status().is_success() {
        bail!("downloading {} failed with status {}", url, response.status());
    }

    let body = hyper::body::to_bytes(response.into_body())
        .await
        .with_context(|| format!("unable to read response body from {}", url))?;

    Ok(String::from_utf8_lossy(&body)
        .lines()
        .map(str::to_string)
        .collect())
}
