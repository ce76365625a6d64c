//! Embedded PostgreSQL bootstrap for the repository suites.
//!
//! The cluster installs binaries and data under `/var/tmp` unless
//! `PG_RUNTIME_DIR` and `PG_DATA_DIR` say otherwise. Sandboxed runners often
//! forbid that, so unless both are set we point them at a fresh directory
//! below `target/pg-embed` while the cluster starts.

use std::path::PathBuf;
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use pg_embedded_setup_unpriv::TestCluster;
use uuid::Uuid;

/// Bootstraps share the download cache, so they run one at a time.
static BOOTSTRAP: Mutex<()> = Mutex::new(());

const ATTEMPTS: u32 = 4;
const BACKOFF: Duration = Duration::from_millis(500);

const TRANSIENT_MARKERS: [&str; 6] = [
    "error decoding response body",
    "connection reset",
    "connection refused",
    "timed out",
    "temporarily unavailable",
    "dns error",
];

fn scratch_root() -> PathBuf {
    std::env::var_os("CARGO_TARGET_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../target"))
        .join("pg-embed")
}

/// Creates `install/` and `data/` under a directory unique to this run.
fn scratch_dirs() -> std::io::Result<[String; 2]> {
    let run = scratch_root().join(format!("run-{}-{}", std::process::id(), Uuid::new_v4()));
    let dirs = [run.join("install"), run.join("data")];
    for dir in &dirs {
        std::fs::create_dir_all(dir)?;
    }
    Ok(dirs.map(|dir| dir.to_string_lossy().into_owned()))
}

fn looks_transient(message: &str) -> bool {
    let message = message.to_lowercase();
    TRANSIENT_MARKERS
        .iter()
        .any(|marker| message.contains(marker))
}

/// Starts a [`TestCluster`], retrying with backoff when the binary download
/// hits a network hiccup.
pub fn test_cluster() -> Result<TestCluster, String> {
    let _serialised = BOOTSTRAP.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

    let configured = ["PG_RUNTIME_DIR", "PG_DATA_DIR"]
        .iter()
        .all(|key| std::env::var_os(key).is_some());
    let _env = if configured {
        None
    } else {
        let [install, data] = scratch_dirs().map_err(|err| err.to_string())?;
        Some(env_lock::lock_env([
            ("PG_RUNTIME_DIR", Some(install)),
            ("PG_DATA_DIR", Some(data)),
        ]))
    };

    let mut attempt = 1;
    loop {
        let message = match TestCluster::new() {
            Ok(cluster) => return Ok(cluster),
            Err(err) => format!("{err:?}"),
        };
        if attempt == ATTEMPTS || !looks_transient(&message) {
            return Err(message);
        }
        let wait = BACKOFF * 2_u32.pow(attempt - 1);
        eprintln!("pg-embed: attempt {attempt}/{ATTEMPTS} failed ({message}); retrying in {wait:?}");
        thread::sleep(wait);
        attempt += 1;
    }
}
