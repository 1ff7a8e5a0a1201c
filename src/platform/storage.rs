//! Key/value storage
//!
//! LocalStorage in the browser; one file per key under a data directory on
//! native (`$STACK_TOWER_DATA_DIR`, else `./.stack-tower`).

#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;

#[cfg(not(target_arch = "wasm32"))]
use anyhow::Context;

/// Environment variable overriding the native data directory
pub const DATA_DIR_ENV: &str = "STACK_TOWER_DATA_DIR";

/// Handle to the platform's persistent key/value store
#[derive(Debug, Clone)]
pub struct Storage {
    #[cfg(not(target_arch = "wasm32"))]
    dir: PathBuf,
}

impl Default for Storage {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_arch = "wasm32")]
impl Storage {
    pub fn new() -> Self {
        Self {}
    }

    fn local_storage() -> anyhow::Result<web_sys::Storage> {
        web_sys::window()
            .ok_or_else(|| anyhow::anyhow!("no window"))?
            .local_storage()
            .map_err(|e| anyhow::anyhow!("LocalStorage unavailable: {e:?}"))?
            .ok_or_else(|| anyhow::anyhow!("LocalStorage disabled"))
    }

    pub fn read(&self, key: &str) -> anyhow::Result<Option<String>> {
        Self::local_storage()?
            .get_item(key)
            .map_err(|e| anyhow::anyhow!("reading {key}: {e:?}"))
    }

    pub fn write(&self, key: &str, value: &str) -> anyhow::Result<()> {
        Self::local_storage()?
            .set_item(key, value)
            .map_err(|e| anyhow::anyhow!("writing {key}: {e:?}"))
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Storage {
    /// Storage rooted at the configured data directory
    pub fn new() -> Self {
        let dir = std::env::var_os(DATA_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(".stack-tower"));
        Self { dir }
    }

    /// Storage rooted at an explicit directory
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }

    pub fn read(&self, key: &str) -> anyhow::Result<Option<String>> {
        let path = self.path(key);
        match std::fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("reading {}", path.display())),
        }
    }

    pub fn write(&self, key: &str, value: &str) -> anyhow::Result<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("creating {}", self.dir.display()))?;
        let path = self.path(key);
        // Write-then-rename so a crash never leaves a truncated value behind
        let tmp = path.with_extension("tmp");
        std::fs::write(&tmp, value).with_context(|| format!("writing {}", tmp.display()))?;
        std::fs::rename(&tmp, &path).with_context(|| format!("replacing {}", path.display()))
    }
}

/// Read `key` from the default store
pub fn read(key: &str) -> anyhow::Result<Option<String>> {
    Storage::new().read(key)
}
