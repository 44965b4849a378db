//! Gallery catalog: the numbered images a selection is made from.
//!
//! A catalog is either scanned from a directory (files sorted by relative
//! path, numbered consecutively from `start`) or loaded from a JSON manifest
//! that already carries numbers. Catalog order is render order everywhere
//! else in the crate.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Extensions picked up by a scan when no config overrides them.
pub const DEFAULT_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "heic", "bmp"];

/// One selectable picture: a display number and the label it exports under.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImageEntry {
    pub number: u32,
    pub filename: String,
}

impl ImageEntry {
    pub fn new(number: u32, filename: impl Into<String>) -> Self {
        Self {
            number,
            filename: filename.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub extensions: Vec<String>,
    pub start: u32,
    pub recursive: bool,
    pub max_depth: Option<usize>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            start: 1,
            recursive: false,
            max_depth: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct Manifest {
    images: Vec<ImageEntry>,
}

/// Numbered images in render order, plus the directory filenames resolve
/// against (used when inlining image bytes into a page).
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<ImageEntry>,
    root: Option<PathBuf>,
}

impl Catalog {
    /// Build a catalog from already-numbered entries, keeping their order.
    ///
    /// # Errors
    /// `ZeroNumber` if any entry is numbered 0, `DuplicateNumber` if two
    /// entries share a number.
    pub fn from_entries(entries: Vec<ImageEntry>) -> Result<Self> {
        let mut seen: HashMap<u32, &str> = HashMap::with_capacity(entries.len());
        for entry in &entries {
            if entry.number == 0 {
                return Err(Error::ZeroNumber {
                    filename: entry.filename.clone(),
                });
            }
            if let Some(first) = seen.insert(entry.number, &entry.filename) {
                return Err(Error::DuplicateNumber {
                    number: entry.number,
                    first: first.to_string(),
                    second: entry.filename.clone(),
                });
            }
        }
        Ok(Self {
            entries,
            root: None,
        })
    }

    /// Scan `dir` for image files and number them from `opts.start`.
    pub fn scan(dir: &Path, opts: &ScanOptions) -> Result<Self> {
        if !dir.is_dir() {
            return Err(Error::NotADirectory(dir.to_path_buf()));
        }

        let depth = if opts.recursive {
            opts.max_depth.unwrap_or(usize::MAX)
        } else {
            1
        };

        let mut files = Vec::new();
        for entry in WalkDir::new(dir).follow_links(true).max_depth(depth) {
            let entry = entry?;
            let path = entry.path();
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(ext) = path.extension() else {
                continue;
            };
            let ext = ext.to_string_lossy().to_lowercase();
            if !opts.extensions.iter().any(|e| e.eq_ignore_ascii_case(&ext)) {
                log::debug!("skipping non-image file: {}", path.display());
                continue;
            }
            let rel = path.strip_prefix(dir).unwrap_or(path);
            files.push(rel.to_string_lossy().replace('\\', "/"));
        }
        files.sort();

        log::info!("found {} image files in {}", files.len(), dir.display());

        let entries = files
            .into_iter()
            .enumerate()
            .map(|(i, filename)| {
                let number = u32::try_from(i)
                    .ok()
                    .and_then(|i| opts.start.checked_add(i))
                    .ok_or_else(|| Error::Config {
                        key: "start",
                        reason: format!(
                            "numbering from {} overflows at {} (image {})",
                            opts.start, filename, i + 1
                        ),
                    })?;
                Ok(ImageEntry { number, filename })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            entries,
            root: Some(dir.to_path_buf()),
        })
    }

    /// Load a JSON manifest of the form `{"images": [{"number", "filename"}]}`.
    ///
    /// Filenames resolve against the manifest's directory.
    pub fn load_manifest(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let manifest: Manifest = serde_json::from_str(&text).map_err(|source| Error::Manifest {
            path: path.to_path_buf(),
            source,
        })?;
        let mut catalog = Self::from_entries(manifest.images)?;
        catalog.root = path.parent().map(Path::to_path_buf);
        log::info!(
            "loaded {} entries from manifest {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    pub fn entries(&self) -> &[ImageEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Filesystem location of an entry, if the catalog knows its root.
    pub fn resolve(&self, entry: &ImageEntry) -> Option<PathBuf> {
        self.root.as_ref().map(|root| root.join(&entry.filename))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn touch(dir: &Path, name: &str) {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"x").unwrap();
    }

    #[test]
    fn scan_numbers_images_in_sorted_order() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "c.jpg");
        touch(dir.path(), "a.JPG");
        touch(dir.path(), "b.png");
        touch(dir.path(), "notes.txt");

        let catalog = Catalog::scan(dir.path(), &ScanOptions::default()).unwrap();
        assert_eq!(
            catalog.entries(),
            &[
                ImageEntry::new(1, "a.JPG"),
                ImageEntry::new(2, "b.png"),
                ImageEntry::new(3, "c.jpg"),
            ]
        );
    }

    #[test]
    fn scan_honours_start_and_recursion() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "top.jpg");
        touch(dir.path(), "day2/inner.jpg");

        let flat = Catalog::scan(dir.path(), &ScanOptions::default()).unwrap();
        assert_eq!(flat.len(), 1);

        let opts = ScanOptions {
            start: 10,
            recursive: true,
            ..ScanOptions::default()
        };
        let deep = Catalog::scan(dir.path(), &opts).unwrap();
        assert_eq!(
            deep.entries(),
            &[
                ImageEntry::new(10, "day2/inner.jpg"),
                ImageEntry::new(11, "top.jpg"),
            ]
        );
    }

    #[test]
    fn scan_start_at_max_numbers_one_image_and_rejects_two() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "a.jpg");
        let opts = ScanOptions {
            start: u32::MAX,
            ..ScanOptions::default()
        };

        let one = Catalog::scan(dir.path(), &opts).unwrap();
        assert_eq!(one.entries(), &[ImageEntry::new(u32::MAX, "a.jpg")]);

        touch(dir.path(), "b.jpg");
        let err = Catalog::scan(dir.path(), &opts).unwrap_err();
        assert!(matches!(err, Error::Config { key: "start", .. }));
    }

    #[test]
    fn scan_empty_dir_is_empty_catalog() {
        let dir = tempdir().unwrap();
        let catalog = Catalog::scan(dir.path(), &ScanOptions::default()).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn scan_missing_dir_errors() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = Catalog::scan(&missing, &ScanOptions::default()).unwrap_err();
        assert!(matches!(err, Error::NotADirectory(_)));
    }

    #[test]
    fn from_entries_rejects_zero_and_duplicates() {
        let zero = Catalog::from_entries(vec![ImageEntry::new(0, "a.jpg")]);
        assert!(matches!(zero, Err(Error::ZeroNumber { .. })));

        let dup = Catalog::from_entries(vec![
            ImageEntry::new(4, "a.jpg"),
            ImageEntry::new(4, "b.jpg"),
        ]);
        match dup {
            Err(Error::DuplicateNumber {
                number,
                first,
                second,
            }) => {
                assert_eq!(number, 4);
                assert_eq!(first, "a.jpg");
                assert_eq!(second, "b.jpg");
            }
            other => panic!("expected duplicate error, got {:?}", other),
        }
    }

    #[test]
    fn manifest_keeps_given_order_and_resolves_paths() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gallery.json");
        fs::write(
            &path,
            r#"{"images": [{"number": 7, "filename": "z.jpg"}, {"number": 2, "filename": "y.jpg"}]}"#,
        )
        .unwrap();

        let catalog = Catalog::load_manifest(&path).unwrap();
        assert_eq!(catalog.entries()[0], ImageEntry::new(7, "z.jpg"));
        assert_eq!(catalog.entries()[1], ImageEntry::new(2, "y.jpg"));
        assert_eq!(
            catalog.resolve(&catalog.entries()[0]).unwrap(),
            dir.path().join("z.jpg")
        );
    }

    #[test]
    fn manifest_parse_error_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            Catalog::load_manifest(&path),
            Err(Error::Manifest { .. })
        ));
    }
}
