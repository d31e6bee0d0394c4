#![allow(dead_code)]

use std::path::PathBuf;

use ads_songs::db::{DbPool, establish_connection_pool, run_migrations};
use tempfile::TempDir;

/// A migrated SQLite database living in a temporary directory that is removed
/// on drop.
pub struct TestDb {
    _dir: TempDir,
    path: PathBuf,
    pool: DbPool,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join(name);
        let pool = establish_connection_pool(path.to_str().expect("utf-8 path"))
            .expect("failed to create pool");
        run_migrations(&pool).expect("failed to run migrations");

        Self {
            _dir: dir,
            path,
            pool,
        }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}
