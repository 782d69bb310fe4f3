use std::io;
use std::path::{Path, PathBuf};

/// Where bracket configuration documents are read from.
pub trait ConfigSource {
    /// Read the document at `path`, relative to the source root.
    ///
    /// Returns `Ok(None)` when no such document exists.
    fn read(&self, path: &Path) -> io::Result<Option<String>>;
}

/// Documents in a directory tree on disk
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirSource { root: root.into() }
    }
}

impl ConfigSource for DirSource {
    fn read(&self, path: &Path) -> io::Result<Option<String>> {
        let full = self.root.join(path);
        log::debug!("Reading bracket configuration {}", full.display());
        match std::fs::read_to_string(&full) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }
}

static EMBEDDED: &[(&str, &str)] = &[
    ("federal/2019.json", include_str!("../../data/federal/2019.json")),
    ("federal/2020.json", include_str!("../../data/federal/2020.json")),
    (
        "state/california/2019.json",
        include_str!("../../data/state/california/2019.json"),
    ),
    (
        "state/california/2020.json",
        include_str!("../../data/state/california/2020.json"),
    ),
    ("state/idaho/2019.json", include_str!("../../data/state/idaho/2019.json")),
    ("state/idaho/2020.json", include_str!("../../data/state/idaho/2020.json")),
];

/// Documents from `data/` compiled into the binary
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedSource;

impl ConfigSource for EmbeddedSource {
    fn read(&self, path: &Path) -> io::Result<Option<String>> {
        log::debug!("Looking up embedded bracket configuration {}", path.display());
        Ok(EMBEDDED
            .iter()
            .find(|(name, _)| Path::new(name) == path)
            .map(|(_, text)| text.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data_dir() -> DirSource {
        DirSource::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    #[test]
    fn embedded_documents_match_data_dir() {
        let dir = data_dir();
        for (name, text) in EMBEDDED {
            let on_disk = dir.read(Path::new(name)).unwrap();
            assert_eq!(on_disk.as_deref(), Some(*text), "{name}");
        }
    }

    #[test]
    fn missing_documents_are_none() {
        let path = Path::new("federal/1999.json");
        assert!(EmbeddedSource.read(path).unwrap().is_none());
        assert!(data_dir().read(path).unwrap().is_none());
    }

    #[test]
    fn embedded_lookup_by_relative_path() {
        let path = PathBuf::from("state").join("idaho").join("2020.json");
        let text = EmbeddedSource.read(&path).unwrap().unwrap();
        assert!(text.contains("\"single\""));
    }
}
