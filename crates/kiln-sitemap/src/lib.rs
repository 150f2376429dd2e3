//! Sitemap generation.
//!
//! Serializes page entries as a sitemaps.org `urlset` and writes it
//! gzip-compressed:
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com/</loc>
//!     <lastmod>2025-01-01T00:00:00Z</lastmod>
//!     <changefreq>weekly</changefreq>
//!     <priority>0.8</priority>
//!   </url>
//! </urlset>
//! ```

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use flate2::Compression;
use flate2::write::GzEncoder;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

/// Name of the sitemap file in the output root.
pub const SITEMAP_FILENAME: &str = "sitemap.xml.gz";

/// XML namespace for sitemap
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

const ROOT_PRIORITY: f32 = 0.8;
const PAGE_PRIORITY: f32 = 0.3;

/// Expected change rate written for every page.
const CHANGE_FREQUENCY: &str = "weekly";

/// Single URL entry in the sitemap.
#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    /// Absolute URL.
    pub loc: String,
    pub last_modified: DateTime<Utc>,
    pub priority: f32,
}

impl SitemapEntry {
    /// Entry for a compiled page, weighted higher for the site root.
    #[must_use]
    pub fn for_page(loc: String, last_modified: DateTime<Utc>, is_site_root: bool) -> Self {
        Self {
            loc,
            last_modified,
            priority: if is_site_root {
                ROOT_PRIORITY
            } else {
                PAGE_PRIORITY
            },
        }
    }
}

/// Error returned while writing a sitemap.
#[derive(Debug, thiserror::Error)]
pub enum SitemapError {
    #[error("XML serialization failed: {0}")]
    Xml(#[source] io::Error),

    #[error("Failed to write sitemap {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Serialize entries to sitemap XML.
pub fn to_xml(entries: &[SitemapEntry]) -> Result<Vec<u8>, SitemapError> {
    write_urlset(entries).map_err(SitemapError::Xml)
}

fn write_urlset(entries: &[SitemapEntry]) -> io::Result<Vec<u8>> {
    let mut writer = Writer::new_with_indent(Vec::with_capacity(4096), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut urlset = BytesStart::new("urlset");
    urlset.push_attribute(("xmlns", SITEMAP_NS));
    writer.write_event(Event::Start(urlset))?;

    for entry in entries {
        writer.write_event(Event::Start(BytesStart::new("url")))?;
        write_text_element(&mut writer, "loc", &entry.loc)?;
        write_text_element(
            &mut writer,
            "lastmod",
            &entry
                .last_modified
                .to_rfc3339_opts(SecondsFormat::Secs, true),
        )?;
        write_text_element(&mut writer, "changefreq", CHANGE_FREQUENCY)?;
        write_text_element(&mut writer, "priority", &format!("{:.1}", entry.priority))?;
        writer.write_event(Event::End(BytesEnd::new("url")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("urlset")))?;

    let mut xml = writer.into_inner();
    xml.push(b'\n');
    Ok(xml)
}

fn write_text_element(writer: &mut Writer<Vec<u8>>, name: &str, text: &str) -> io::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// Write `sitemap.xml.gz` into `output_dir`.
///
/// The gzip header carries no timestamp, so identical entries produce an
/// identical file.
pub fn write(output_dir: &Path, entries: &[SitemapEntry]) -> Result<PathBuf, SitemapError> {
    let path = output_dir.join(SITEMAP_FILENAME);
    let xml = to_xml(entries)?;

    write_gzip(&path, &xml).map_err(|source| SitemapError::Write {
        path: path.clone(),
        source,
    })?;

    tracing::info!(path = %path.display(), urls = entries.len(), "Wrote sitemap");
    Ok(path)
}

fn write_gzip(path: &Path, content: &[u8]) -> io::Result<()> {
    let file = BufWriter::new(File::create(path)?);
    let mut encoder = GzEncoder::new(file, Compression::default());
    encoder.write_all(content)?;
    encoder.finish()?.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use flate2::read::GzDecoder;
    use pretty_assertions::assert_eq;
    use std::io::Read;

    fn timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap()
    }

    #[test]
    fn test_for_page_priorities() {
        let root = SitemapEntry::for_page("http://a.com/".to_owned(), timestamp(), true);
        let page = SitemapEntry::for_page("http://a.com/b/".to_owned(), timestamp(), false);

        assert!((root.priority - 0.8).abs() < f32::EPSILON);
        assert!((page.priority - 0.3).abs() < f32::EPSILON);
    }

    #[test]
    fn test_to_xml() {
        let entries = vec![
            SitemapEntry::for_page("https://example.com/".to_owned(), timestamp(), true),
            SitemapEntry::for_page("https://example.com/a&b/".to_owned(), timestamp(), false),
        ];

        let xml = String::from_utf8(to_xml(&entries).unwrap()).unwrap();

        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#));
        assert_eq!(xml.matches("<url>").count(), 2);
        assert!(xml.contains("<loc>https://example.com/</loc>"));
        assert!(xml.contains("<loc>https://example.com/a&amp;b/</loc>"));
        assert!(xml.contains("<lastmod>2025-03-14T09:26:53Z</lastmod>"));
        assert!(xml.contains("<changefreq>weekly</changefreq>"));
        assert!(xml.contains("<priority>0.8</priority>"));
        assert!(xml.contains("<priority>0.3</priority>"));
        assert!(xml.ends_with("</urlset>\n"));
        // Root entry comes first, in input order.
        assert!(xml.find("<priority>0.8").unwrap() < xml.find("<priority>0.3").unwrap());
    }

    #[test]
    fn test_write_gzip_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let entries = vec![SitemapEntry::for_page(
            "http://example.com/".to_owned(),
            timestamp(),
            true,
        )];

        let path = write(dir.path(), &entries).unwrap();

        assert_eq!(path, dir.path().join(SITEMAP_FILENAME));
        let mut xml = String::new();
        GzDecoder::new(File::open(&path).unwrap())
            .read_to_string(&mut xml)
            .unwrap();
        assert!(xml.contains("<loc>http://example.com/</loc>"));
    }

    #[test]
    fn test_write_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let entries = vec![SitemapEntry::for_page(
            "http://example.com/".to_owned(),
            timestamp(),
            true,
        )];

        let first = std::fs::read(write(dir.path(), &entries).unwrap()).unwrap();
        let second = std::fs::read(write(dir.path(), &entries).unwrap()).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_write_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");

        let err = write(&missing, &[]).unwrap_err();

        assert!(matches!(err, SitemapError::Write { .. }));
    }
}
