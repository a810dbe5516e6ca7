//! `replica capture <url>` – capture a page and write its archive.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use replica_core::config::ReplicaConfig;
use replica_core::package;
use replica_core::{CaptureEvent, CaptureResult, Fetch, Replicator};

pub struct CaptureArgs {
    pub url: String,
    pub output_dir: PathBuf,
    pub json: bool,
}

pub fn run_capture(cfg: &ReplicaConfig, args: &CaptureArgs) -> Result<()> {
    let (result, archive) = capture_into(&Replicator::from_config(cfg), args)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary_json(&result, &archive))?);
    } else {
        print!("{}", summary_text(&result, &archive));
    }
    Ok(())
}

/// Captures `args.url` and writes the archive into `args.output_dir`.
fn capture_into<F: Fetch>(
    replicator: &Replicator<F>,
    args: &CaptureArgs,
) -> Result<(CaptureResult, PathBuf)> {
    let quiet = args.json;
    let mut progress = |event: &CaptureEvent| {
        if !quiet {
            print_progress(event);
        }
    };
    let result = replicator.capture_with(&args.url, &mut progress)?;

    let archive = package::write_archive(&result, &args.output_dir)
        .with_context(|| format!("write archive into {}", args.output_dir.display()))?;
    Ok((result, archive))
}

fn print_progress(event: &CaptureEvent) {
    match event {
        CaptureEvent::PageFetchStarted { url } => eprintln!("Fetching {url}"),
        CaptureEvent::AssetsDiscovered { total } => eprintln!("Found {total} assets"),
        CaptureEvent::AssetProgress { downloaded, total } => {
            eprint!("\rDownloaded {downloaded}/{total}");
            let _ = std::io::stderr().flush();
        }
        CaptureEvent::Rewriting => eprintln!("\nRewriting references"),
        CaptureEvent::Completed { .. } => {}
        CaptureEvent::Failed { reason } => eprintln!("\nCapture failed: {reason}"),
    }
}

fn summary_text(result: &CaptureResult, archive: &Path) -> String {
    format!(
        "Images:      {}\nStylesheets: {}\nTotal size:  {} KB\nArchive:     {}\n",
        result.counts.images,
        result.counts.stylesheets,
        result.total_kib(),
        archive.display()
    )
}

fn summary_json(result: &CaptureResult, archive: &Path) -> serde_json::Value {
    serde_json::json!({
        "url": result.page_url.as_str(),
        "images": result.counts.images,
        "stylesheets": result.counts.stylesheets,
        "downloaded": result.assets.len(),
        "total_bytes": result.total_bytes,
        "total_kib": result.total_kib(),
        "asset_map": result.asset_map,
        "archive": archive.display().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use replica_core::{AssetCounts, AssetMap, AttemptError, FetchError, FetchResponse};
    use std::collections::HashMap;

    /// Serves fixed bodies by absolute URL; anything else is a 404.
    struct Pages(HashMap<&'static str, &'static [u8]>);

    impl Fetch for Pages {
        fn fetch(&self, url: &str) -> Result<FetchResponse, FetchError> {
            match self.0.get(url) {
                Some(body) => Ok(FetchResponse {
                    status: 200,
                    body: body.to_vec(),
                    content_type: None,
                }),
                None => Err(FetchError {
                    url: url.to_string(),
                    direct: AttemptError::Status(404),
                    relay: None,
                }),
            }
        }
    }

    fn result() -> CaptureResult {
        let mut asset_map = AssetMap::new();
        asset_map.insert("p.jpg".to_string(), "images/p.jpg".to_string());
        CaptureResult {
            page_url: "https://ex.test/".parse().unwrap(),
            final_markup: String::new(),
            assets: Vec::new(),
            asset_map,
            counts: AssetCounts {
                images: 3,
                stylesheets: 1,
            },
            total_bytes: 1536,
        }
    }

    #[test]
    fn text_summary_reports_counts_and_kib() {
        let text = summary_text(&result(), Path::new("/tmp/ex.test-replica.zip"));
        assert!(text.contains("Images:      3\n"));
        assert!(text.contains("Stylesheets: 1\n"));
        assert!(text.contains("Total size:  2 KB\n"));
        assert!(text.ends_with("Archive:     /tmp/ex.test-replica.zip\n"));
    }

    #[test]
    fn json_summary_includes_asset_map() {
        let v = summary_json(&result(), Path::new("out.zip"));
        assert_eq!(v["images"], 3);
        assert_eq!(v["total_kib"], 2);
        assert_eq!(v["asset_map"]["p.jpg"], "images/p.jpg");
        assert_eq!(v["archive"], "out.zip");
    }

    #[test]
    fn capture_writes_archive_into_output_dir() {
        let pages = Pages(HashMap::from([
            (
                "https://ex.test/",
                &br#"<html><body><img src="p.jpg"><img src="gone.png"></body></html>"#[..],
            ),
            ("https://ex.test/p.jpg", &b"JPEGDATA"[..]),
        ]));
        let dir = tempfile::tempdir().unwrap();
        let args = CaptureArgs {
            url: "https://ex.test/".to_string(),
            output_dir: dir.path().to_path_buf(),
            json: true,
        };

        let (result, archive) = capture_into(&Replicator::with_fetcher(pages), &args).unwrap();
        assert_eq!(archive, dir.path().join("ex.test-replica.zip"));
        assert!(archive.is_file());
        assert_eq!(result.counts.images, 2);
        assert_eq!(result.asset_map.get("p.jpg"), Some("images/p.jpg"));
        assert!(summary_text(&result, &archive).contains("Images:      2\n"));
    }

    #[test]
    fn capture_failure_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let args = CaptureArgs {
            url: "https://ex.test/".to_string(),
            output_dir: dir.path().to_path_buf(),
            json: true,
        };
        assert!(capture_into(&Replicator::with_fetcher(Pages(HashMap::new())), &args).is_err());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
