use std::path::{Path, PathBuf};

use crate::{Error, ExifTables, MetadataExtractor, RawTagMap};

/// The boundary to whatever actually decodes image files.
///
/// Implementations return:
///
/// - `Ok(Some(map))` when the image has an Exif block (possibly empty),
/// - `Ok(None)` when it has none,
/// - `Err(Error::ImageUnreadable(_))` when the image cannot be read at all.
pub trait TagDecoder {
    fn decode(&self, path: &Path) -> crate::Result<Option<RawTagMap>>;
}

impl<F> TagDecoder for F
where
    F: Fn(&Path) -> crate::Result<Option<RawTagMap>>,
{
    fn decode(&self, path: &Path) -> crate::Result<Option<RawTagMap>> {
        self(path)
    }
}

/// An image file together with its extracted metadata.
#[derive(Debug, Clone)]
pub struct ExifImage {
    name: String,
    full_path: PathBuf,
    exif: Option<ExifTables>,
}

impl ExifImage {
    /// Decode `path` with `decoder` and extract its metadata.
    ///
    /// A relative `path` is taken relative to the current directory. An
    /// image without Exif loads fine; [`Self::exif`] then reports
    /// [`Error::NoExifData`].
    ///
    /// ```rust
    /// use std::path::Path;
    /// use exif_fields::*;
    ///
    /// fn main() -> Result<()> {
    ///     let decoder = |_: &Path| -> Result<Option<RawTagMap>> { Ok(None) };
    ///     let img = ExifImage::load("holiday.jpg", &decoder)?;
    ///
    ///     assert_eq!(img.name(), "holiday.jpg");
    ///     assert_eq!(img.full_path(), Path::new("./holiday.jpg"));
    ///     assert!(matches!(img.exif(), Err(Error::NoExifData)));
    ///     Ok(())
    /// }
    /// ```
    pub fn load<P: AsRef<Path>>(path: P, decoder: &impl TagDecoder) -> crate::Result<Self> {
        Self::load_with(path, decoder, &MetadataExtractor::new())
    }

    /// Like [`Self::load`], with a configured extractor.
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load_with<P: AsRef<Path>>(
        path: P,
        decoder: &impl TagDecoder,
        extractor: &MetadataExtractor,
    ) -> crate::Result<Self> {
        let path = path.as_ref();
        let full_path = resolve_path(path);
        let name = path
            .file_name()
            .map(|x| x.to_string_lossy().into_owned())
            .ok_or_else(|| {
                Error::ImageUnreadable(format!("no file name in {}", path.display()).into())
            })?;
        tracing::debug!(name = %name, full_path = %full_path.display(), "resolved image path");

        let raw = decoder.decode(&full_path)?;
        let exif = extractor.extract(raw);
        if exif.is_none() {
            tracing::warn!(path = %full_path.display(), "no readable exif data found");
        }

        Ok(Self {
            name,
            full_path,
            exif,
        })
    }

    /// File name of the image, without directories.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn full_path(&self) -> &Path {
        &self.full_path
    }

    pub fn has_exif(&self) -> bool {
        self.exif.is_some()
    }

    pub fn exif(&self) -> crate::Result<&ExifTables> {
        self.exif.as_ref().ok_or(Error::NoExifData)
    }

    pub fn into_exif(self) -> Option<ExifTables> {
        self.exif
    }
}

fn resolve_path(path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        Path::new(".").join(path)
    }
}
