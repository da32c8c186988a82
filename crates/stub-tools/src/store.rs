use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use relay::tools::storage::file_path;

/// Uploaded files keyed by `<cid>/<name>`
#[derive(Clone, Default)]
pub struct FileStore {
    files: Arc<RwLock<HashMap<String, String>>>,
}

impl FileStore {
    /// Store `data` under `name` and return its content identifier.
    ///
    /// The identifier is derived from the name and the data, so uploading the
    /// same file twice yields the same identifier.
    pub fn put(&self, name: &str, data: &str) -> String {
        let cid = content_id(name, data);
        self.files
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(file_path(&cid, name), data.to_string());
        cid
    }

    pub fn get(&self, path: &str) -> Option<String> {
        self.files
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(path)
            .cloned()
    }
}

fn content_id(name: &str, data: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(name.as_bytes());
    hasher.update([0u8]);
    hasher.update(data.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_then_get() {
        let store = FileStore::default();
        let cid = store.put("strategy.txt", "UExBTi1B");

        assert_eq!(cid.len(), 64);
        assert_eq!(
            store.get(&format!("{}/strategy.txt", cid)),
            Some("UExBTi1B".to_string())
        );
        assert_eq!(store.get(&format!("{}/other.txt", cid)), None);
    }

    #[test]
    fn test_cid_depends_on_content() {
        let store = FileStore::default();
        let a = store.put("strategy.txt", "one");
        let b = store.put("strategy.txt", "two");
        let again = store.put("strategy.txt", "one");

        assert_ne!(a, b);
        assert_eq!(a, again);
    }
}
