//! Downloads built from rendered images and the sinks that save them.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{NaiveDate, Utc};

use crate::config::EXPORT_FILE_PREFIX;

use super::renderer::RenderedImage;


const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";


/// Date stamped on exports: the current UTC calendar date.
pub fn export_date() -> NaiveDate {
    Utc::now().date_naive()
}


/// Filename for an export made on `date`, e.g. `horario-2024-06-01.png`.
pub fn export_filename(date: NaiveDate, extension: &str) -> String {
    format!("{}-{}.{}", EXPORT_FILE_PREFIX, date.format("%Y-%m-%d"), extension)
}


/// A file ready to be handed to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub filename: String,
    /// PNG content as a data URL.
    pub href: String,
}


impl Download {
    pub fn from_image(filename: impl Into<String>, image: &RenderedImage) -> Self {
        Self {
            filename: filename.into(),
            href: image.to_data_url(),
        }
    }

    /// Decode the PNG bytes behind `href`.
    pub fn bytes(&self) -> Result<Vec<u8>> {
        let encoded = self
            .href
            .strip_prefix(PNG_DATA_URL_PREFIX)
            .context("Download is not a PNG data URL")?;

        STANDARD
            .decode(encoded)
            .context("Download has invalid base64 content")
    }
}


/// Destination for finished downloads.
pub trait DownloadSink {
    /// Save the download and return where it went.
    fn deliver(&self, download: &Download) -> Result<PathBuf>;
}


/// Writes downloads into a directory.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}


impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}


impl DownloadSink for DirectorySink {
    fn deliver(&self, download: &Download) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create directory: {}", self.dir.display()))?;

        let path = self.dir.join(&download.filename);
        std::fs::write(&path, download.bytes()?)
            .with_context(|| format!("Failed to save PNG to {}", path.display()))?;

        log::info!("Saved {}", path.display());
        Ok(path)
    }
}


/// Prints the data URL to stdout instead of writing a file.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;


impl DownloadSink for StdoutSink {
    fn deliver(&self, download: &Download) -> Result<PathBuf> {
        write_data_url(&mut std::io::stdout().lock(), download)?;
        Ok(PathBuf::from("-"))
    }
}


fn write_data_url(out: &mut impl Write, download: &Download) -> Result<()> {
    writeln!(out, "{}", download.href).context("Failed to write data URL")?;
    out.flush().context("Failed to write data URL")
}


#[cfg(test)]
mod tests {
    use super::*;

    fn image() -> RenderedImage {
        RenderedImage { width: 2, height: 1, png: vec![1, 2, 3, 4, 5] }
    }

    #[test]
    fn test_export_filename() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(export_filename(date, "png"), "horario-2024-06-01.png");
        assert_eq!(export_filename(date, "svg"), "horario-2024-06-01.svg");
    }

    #[test]
    fn test_export_date_is_utc() {
        let before = Utc::now().date_naive();
        let date = export_date();
        let after = Utc::now().date_naive();

        assert!(date == before || date == after);
    }

    #[test]
    fn test_data_url_output() {
        let download = Download::from_image("horario-2024-06-01.png", &image());
        let mut out = Vec::new();

        write_data_url(&mut out, &download).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("data:image/png;base64,"));
        assert_eq!(text.trim_end(), download.href);
        assert_eq!(StdoutSink.deliver(&download).unwrap(), PathBuf::from("-"));
    }

    #[test]
    fn test_download_bytes() {
        let download = Download::from_image("a.png", &image());
        assert_eq!(download.bytes().unwrap(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_download_rejects_foreign_href() {
        let download = Download {
            filename: "a.png".to_string(),
            href: "https://example.com/a.png".to_string(),
        };
        assert!(download.bytes().is_err());
    }

    #[test]
    fn test_directory_sink_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DirectorySink::new(dir.path().join("nested"));

        let path = sink.deliver(&Download::from_image("horario-2024-06-01.png", &image())).unwrap();

        assert_eq!(path, dir.path().join("nested").join("horario-2024-06-01.png"));
        assert_eq!(std::fs::read(path).unwrap(), vec![1, 2, 3, 4, 5]);
    }
}
