//! Route file watcher for hot reload.
//!
//! Trees are never mutated once built. A reload compiles a new
//! [`RouteTable`] and swaps it into the shared slot; requests already holding
//! the old table finish against it.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::config::loader::{load_config, ConfigError};
use crate::config::table::{RouteTable, SharedTable};
use crate::observability::metrics;

/// Load `path`, compile it and publish the result into `table`.
///
/// On error the current table stays in place. Returns the new route count.
pub fn reload(path: &Path, table: &SharedTable) -> Result<usize, ConfigError> {
    let config = load_config(path)?;
    let compiled = RouteTable::from_config(&config).map_err(ConfigError::from)?;
    let count = compiled.route_count();
    table.store(Arc::new(compiled));
    metrics::record_routes(count);
    Ok(count)
}

/// Watches the route file and swaps in a new table on every change.
pub struct ConfigWatcher {
    path: PathBuf,
    table: SharedTable,
}

impl ConfigWatcher {
    pub fn new(path: &Path, table: SharedTable) -> Self {
        Self {
            path: path.to_path_buf(),
            table,
        }
    }

    /// Start watching. The returned watcher must be kept alive.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let path = self.path.clone();
        let table = self.table;

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) if event.kind.is_modify() || event.kind.is_create() => {
                    match reload(&path, &table) {
                        Ok(routes) => {
                            metrics::record_reload("success");
                            tracing::info!(routes, "Route table reloaded");
                        }
                        Err(e) => {
                            metrics::record_reload("failure");
                            tracing::error!(error = %e, "Failed to reload routes, keeping current table");
                        }
                    }
                }
                Ok(_) => {}
                Err(e) => tracing::error!(error = ?e, "Watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "Route watcher started");
        Ok(watcher)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use crate::routing::Method;

    fn write_routes(file: &tempfile::NamedTempFile, pattern: &str) {
        let text = format!("[[routes]]\nname = \"r\"\npattern = \"{}\"\n", pattern);
        std::fs::write(file.path(), text).unwrap();
    }

    #[test]
    fn test_reload_swaps_table() {
        let table = RouteTable::from_config(&ServerConfig::default())
            .unwrap()
            .into_shared();
        let file = tempfile::NamedTempFile::new().unwrap();
        write_routes(&file, "/v1/:id");

        assert_eq!(reload(file.path(), &table).unwrap(), 1);
        assert!(table.load().router().resolve(Method::Get, "/v1/9").is_match());
    }

    #[test]
    fn test_failed_reload_keeps_table() {
        let table = RouteTable::from_config(&ServerConfig::default())
            .unwrap()
            .into_shared();
        let file = tempfile::NamedTempFile::new().unwrap();
        write_routes(&file, "/ok");
        reload(file.path(), &table).unwrap();

        write_routes(&file, "/broken/:");
        assert!(reload(file.path(), &table).is_err());
        assert!(table.load().router().resolve(Method::Get, "/ok").is_match());
    }
}
