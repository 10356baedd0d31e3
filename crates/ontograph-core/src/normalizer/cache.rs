//! On-disk cache of normal-form files.
//!
//! Files are named after a SHA-256 fingerprint of the ontology's rendered
//! subsumption axioms, so an edited ontology never hits a stale file:
//!
//! ```text
//! <cache dir>/
//!   3f9a...c1.nf
//! ```
//!
//! A file is written under a temporary name and renamed into place, and
//! ends with a `# complete: <n> axioms` line. A file without that line is
//! treated as a miss and rewritten.

use sha2::{Digest, Sha256};
use std::fs;
use std::io::{BufWriter, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::config::CacheConfig;
use crate::ontology::OntologyStore;

use super::text::{load_normal_forms, write_normal_forms};
use super::{Normalization, NormalFormError, Normalizer};

const CACHE_EXTENSION: &str = "nf";

fn trailer(count: usize) -> String {
    format!("# complete: {} axioms\n", count)
}

/// True when `path` ends with the trailer for `count` axioms.
fn is_complete(path: &Path, count: usize) -> bool {
    let expected = trailer(count);
    let want = expected.len() as u64;
    let Ok(mut file) = fs::File::open(path) else {
        return false;
    };
    match file.metadata() {
        Ok(meta) if meta.len() >= want => {}
        _ => return false,
    }

    let mut tail = vec![0; expected.len()];
    file.seek(SeekFrom::End(-(want as i64)))
        .and_then(|_| file.read_exact(&mut tail))
        .is_ok()
        && tail == expected.as_bytes()
}

/// Write the store's axioms and the trailer to `tmp`, then rename it to
/// `path`.
fn write_atomically(
    path: &Path,
    tmp: &Path,
    store: &dyn OntologyStore,
) -> Result<usize, NormalFormError> {
    let file = fs::File::create(tmp).map_err(|e| NormalFormError::io(tmp, e))?;
    let mut writer = BufWriter::new(file);
    let written = write_normal_forms(&mut writer, store.subsumptions())
        .and_then(|n| {
            writer.write_all(trailer(n).as_bytes())?;
            writer.flush()?;
            writer.get_ref().sync_all()?;
            Ok(n)
        })
        .map_err(|e| NormalFormError::io(tmp, e))?;
    fs::rename(tmp, path).map_err(|e| NormalFormError::io(path, e))?;
    Ok(written)
}

/// Content-addressed store of normal-form files.
pub struct NormalFormCache {
    dir: PathBuf,
}

impl NormalFormCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn with_config(config: &CacheConfig) -> Self {
        Self::new(&config.dir)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Hex SHA-256 of the store's subsumptions, one rendered axiom per line,
    /// in iteration order.
    pub fn fingerprint(store: &dyn OntologyStore) -> String {
        let mut hasher = Sha256::new();
        for axiom in store.subsumptions() {
            hasher.update(axiom.to_string().as_bytes());
            hasher.update(b"\n");
        }
        hex::encode(hasher.finalize())
    }

    /// Cache file for a store.
    pub fn path_for(&self, store: &dyn OntologyStore) -> PathBuf {
        self.dir
            .join(format!("{}.{}", Self::fingerprint(store), CACHE_EXTENSION))
    }

    /// Write the store's normal-form file unless a complete one is already
    /// cached.
    pub fn ensure(&self, store: &dyn OntologyStore) -> Result<PathBuf, NormalFormError> {
        let path = self.path_for(store);
        let expected = store.subsumptions().len();
        if is_complete(&path, expected) {
            debug!(path = %path.display(), "normal-form cache hit");
            return Ok(path);
        }
        if path.exists() {
            warn!(path = %path.display(), "rewriting incomplete normal-form cache file");
        }

        if !self.dir.exists() {
            fs::create_dir_all(&self.dir).map_err(|e| NormalFormError::io(&self.dir, e))?;
        }
        let tmp =
            path.with_extension(format!("{}.{}.tmp", CACHE_EXTENSION, std::process::id()));
        let written = match write_atomically(&path, &tmp, store) {
            Ok(written) => written,
            Err(err) => {
                if tmp.exists() {
                    if let Err(cleanup) = fs::remove_file(&tmp) {
                        warn!(
                            path = %tmp.display(),
                            error = %cleanup,
                            "could not remove partial cache file"
                        );
                    }
                }
                return Err(err);
            }
        };
        info!(path = %path.display(), axioms = written, "wrote normal-form cache");
        Ok(path)
    }

    /// Normalize a store through the cache: write the file on a miss, then
    /// read it into `normalizer`'s session.
    pub fn load_or_create(
        &self,
        store: &dyn OntologyStore,
        normalizer: &mut Normalizer,
    ) -> Result<Normalization, NormalFormError> {
        let path = self.ensure(store)?;
        load_normal_forms(&path, normalizer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ontology::Ontology;
    use tempfile::TempDir;

    #[test]
    fn test_fingerprint_tracks_content_and_order() {
        let a = Ontology::new("http://o").subclass_of("A", "B").subclass_of("B", "C");
        let b = Ontology::new("http://other").subclass_of("A", "B").subclass_of("B", "C");
        let c = Ontology::new("http://o").subclass_of("B", "C").subclass_of("A", "B");

        assert_eq!(NormalFormCache::fingerprint(&a), NormalFormCache::fingerprint(&b));
        assert_ne!(NormalFormCache::fingerprint(&a), NormalFormCache::fingerprint(&c));
        assert_eq!(NormalFormCache::fingerprint(&a).len(), 64);
    }

    #[test]
    fn test_load_or_create_writes_once() {
        let temp = TempDir::new().unwrap();
        let cache = NormalFormCache::new(temp.path().join("nf"));
        let onto = Ontology::new("http://o").subclass_of("A", "B");

        let first = cache.load_or_create(&onto, &mut Normalizer::new()).unwrap();
        let path = cache.path_for(&onto);
        assert!(path.exists());

        let written = fs::metadata(&path).unwrap().modified().unwrap();
        let second = cache.load_or_create(&onto, &mut Normalizer::new()).unwrap();
        assert_eq!(first, second);
        assert_eq!(fs::metadata(&path).unwrap().modified().unwrap(), written);
    }

    #[test]
    fn test_truncated_file_is_rewritten() {
        let temp = TempDir::new().unwrap();
        let cache = NormalFormCache::new(temp.path());
        let onto = Ontology::new("http://o")
            .subclass_of("A", "B")
            .subclass_of("B", "C")
            .subclass_of("C", "D");

        let path = cache.path_for(&onto);
        fs::write(&path, "A SubClassOf B\n").unwrap();
        assert!(!is_complete(&path, 3));

        let result = cache.load_or_create(&onto, &mut Normalizer::new()).unwrap();
        assert_eq!(result.summary.classified(), 3);
        assert!(is_complete(&path, 3));
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_trailer_is_ignored_by_reader() {
        let temp = TempDir::new().unwrap();
        let cache = NormalFormCache::new(temp.path());
        let onto = Ontology::new("http://o").subclass_of("A", "B");

        let path = cache.ensure(&onto).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "A SubClassOf B\n# complete: 1 axioms\n");

        let result = load_normal_forms(&path, &mut Normalizer::new()).unwrap();
        assert_eq!(result.summary.classified(), 1);
        assert_eq!(result.summary.dropped(), 0);
    }
}
