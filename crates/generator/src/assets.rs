//! Background image sources

use crate::config::GeneratorConfig;
use crate::Result;
use async_trait::async_trait;
use cv_template::{Backgrounds, Office};
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Something that can hand out template images by file name
#[async_trait]
pub trait AssetSource: Send + Sync {
    /// `Ok(None)` when the asset does not exist
    async fn fetch(&self, name: &str) -> Result<Option<Vec<u8>>>;
}

/// Reads assets from a folder
#[derive(Debug, Clone)]
pub struct FsAssetSource {
    root: PathBuf,
}

impl FsAssetSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl AssetSource for FsAssetSource {
    async fn fetch(&self, name: &str) -> Result<Option<Vec<u8>>> {
        match tokio::fs::read(self.root.join(name)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// Assets held in memory, keyed by file name
#[derive(Debug, Clone, Default)]
pub struct MemoryAssetSource {
    assets: HashMap<String, Vec<u8>>,
}

impl MemoryAssetSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, bytes: Vec<u8>) {
        self.assets.insert(name.into(), bytes);
    }

    pub fn with(mut self, name: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.insert(name, bytes);
        self
    }
}

#[async_trait]
impl AssetSource for MemoryAssetSource {
    async fn fetch(&self, name: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.assets.get(name).cloned())
    }
}

/// Load both background pages of `office`
///
/// Each page tries `{country}_{office}_{page}{ext}` over the configured
/// extensions and keeps the first candidate that is a JPEG or PNG image.
/// Failures, timeouts and misses leave the page blank.
pub async fn load_backgrounds<A: AssetSource + ?Sized>(
    source: &A,
    office: Office,
    config: &GeneratorConfig,
) -> Backgrounds {
    Backgrounds {
        first: load_page(source, office, 1, config).await,
        second: load_page(source, office, 2, config).await,
    }
}

async fn load_page<A: AssetSource + ?Sized>(
    source: &A,
    office: Office,
    page: u8,
    config: &GeneratorConfig,
) -> Option<Vec<u8>> {
    let stem = office.asset_stem();

    for ext in &config.extensions {
        let name = format!("{stem}_{page}{ext}");
        match tokio::time::timeout(config.load_timeout(), source.fetch(&name)).await {
            Ok(Ok(Some(bytes))) => match pdf_core::detect_format(&bytes) {
                Ok(format) => {
                    log::debug!("background {name} ({format:?}, {} bytes)", bytes.len());
                    return Some(bytes);
                }
                Err(e) => log::warn!("skipping {name}: {e}"),
            },
            Ok(Ok(None)) => {}
            Ok(Err(e)) => log::warn!("failed to load {name}: {e}"),
            Err(_) => log::warn!(
                "loading {name} timed out after {}ms",
                config.load_timeout_ms
            ),
        }
    }

    log::warn!("no background for {office} page {page}, leaving it blank");
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn encode(shade: u8, format: image::ImageFormat) -> Vec<u8> {
        let img = image::RgbImage::from_pixel(4, 4, image::Rgb([shade, shade, shade]));
        let mut out = Vec::new();
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut out), format)
            .unwrap();
        out
    }

    #[tokio::test]
    async fn test_extension_order() {
        let png = encode(10, image::ImageFormat::Png);
        let jpeg = encode(20, image::ImageFormat::Jpeg);
        let upper_jpg = encode(30, image::ImageFormat::Jpeg);
        let source = MemoryAssetSource::new()
            .with("kuwait_fahad_1.png", png.clone())
            .with("kuwait_fahad_1.jpeg", jpeg)
            .with("kuwait_fahad_2.JPG", upper_jpg.clone());

        let backgrounds =
            load_backgrounds(&source, Office::Fahad, &GeneratorConfig::default()).await;
        assert_eq!(backgrounds.first, Some(png));
        assert_eq!(backgrounds.second, Some(upper_jpg));
    }

    #[tokio::test]
    async fn test_undecodable_candidate_falls_through() {
        let png = encode(40, image::ImageFormat::Png);
        let source = MemoryAssetSource::new()
            .with("kuwait_alnoor_1.jpg", b"<html>404 page</html>".to_vec())
            .with("kuwait_alnoor_1.png", png.clone())
            .with("kuwait_alnoor_2.jpg", b"<html>404 page</html>".to_vec());

        let backgrounds =
            load_backgrounds(&source, Office::Alnoor, &GeneratorConfig::default()).await;
        assert_eq!(backgrounds.first, Some(png));
        assert_eq!(backgrounds.second, None);
    }

    #[tokio::test]
    async fn test_missing_pages_are_blank() {
        let jpg = encode(50, image::ImageFormat::Jpeg);
        let source = MemoryAssetSource::new().with("jordan_injaz_2.jpg", jpg.clone());
        let backgrounds =
            load_backgrounds(&source, Office::Injaz, &GeneratorConfig::default()).await;
        assert_eq!(backgrounds.first, None);
        assert_eq!(backgrounds.second, Some(jpg));
    }

    #[tokio::test]
    async fn test_fs_source() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("saudi_aldhahran_1.jpg"), b"bg").unwrap();
        let source = FsAssetSource::new(dir.path());

        assert_eq!(
            source.fetch("saudi_aldhahran_1.jpg").await.unwrap(),
            Some(b"bg".to_vec())
        );
        assert_eq!(source.fetch("saudi_aldhahran_2.jpg").await.unwrap(), None);
    }
}
