//! Core [`ScheduleLoader`] struct: filesystem-backed schedule loading.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{info, warn};

use crate::definition::{ResolvedSchedule, ScheduleDefinition};
use crate::error::{Result, ScheduleError};

use super::status::{LoadResult, LoadStatus};

/// Filesystem-backed schedule loader.
///
/// Scans a directory (recursively) for `*.yml` / `*.yaml` files, each holding
/// one [`ScheduleDefinition`], resolves them and keeps the results in an
/// in-memory map keyed by schedule id.
pub struct ScheduleLoader {
    /// Root directory containing schedule YAML files.
    schedules_dir: PathBuf,
    /// Resolved schedules keyed by id.
    schedules: Arc<RwLock<HashMap<String, ResolvedSchedule>>>,
}

impl ScheduleLoader {
    pub fn new(schedules_dir: PathBuf) -> Self {
        Self {
            schedules_dir,
            schedules: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Recursively scan the schedules directory and load all YAML files.
    ///
    /// Dotfiles and non-YAML files are reported as skipped. Failures are
    /// reported per file and do not abort the scan. Entries are visited in
    /// path order, so among duplicate ids the last path wins.
    pub fn load_all(&self) -> Result<Vec<LoadResult>> {
        if !self.schedules_dir.is_dir() {
            return Err(ScheduleError::Validation(format!(
                "schedules directory '{}' does not exist",
                self.schedules_dir.display()
            )));
        }
        let mut results = Vec::new();
        self.scan_dir_recursive(&self.schedules_dir, &mut results)?;
        Ok(results)
    }

    fn scan_dir_recursive(&self, dir: &Path, results: &mut Vec<LoadResult>) -> Result<()> {
        let entries = match fs::read_dir(dir) {
            Ok(e) => e,
            Err(e) => {
                warn!(path = %dir.display(), error = %e, "failed to read directory");
                return Ok(());
            }
        };

        let mut paths = entries
            .map(|entry| entry.map(|e| e.path()))
            .collect::<std::io::Result<Vec<_>>>()?;
        paths.sort();

        for path in paths {
            // Skip dotfiles/dotdirs
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                if name.starts_with('.') {
                    if path.is_file() {
                        results.push(LoadResult {
                            path,
                            status: LoadStatus::Skipped {
                                reason: "dotfile".to_string(),
                            },
                        });
                    }
                    continue;
                }
            }

            if path.is_dir() {
                self.scan_dir_recursive(&path, results)?;
                continue;
            }

            let is_yaml = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e == "yml" || e == "yaml");

            if !is_yaml {
                results.push(LoadResult {
                    path,
                    status: LoadStatus::Skipped {
                        reason: "not a YAML file".to_string(),
                    },
                });
                continue;
            }

            let status = match self.load_file(&path) {
                Ok(schedule) => {
                    info!(id = %schedule.id, final_cron = %schedule.final_cron, path = %path.display(), "loaded schedule");
                    let status = LoadStatus::Loaded {
                        id: schedule.id.clone(),
                        final_cron: schedule.final_cron.clone(),
                    };
                    self.insert(schedule);
                    status
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to load schedule file");
                    LoadStatus::Failed {
                        error: e.to_string(),
                    }
                }
            };
            results.push(LoadResult { path, status });
        }

        Ok(())
    }

    /// Read, parse and resolve a single definition file.
    pub fn load_file(&self, path: &Path) -> Result<ResolvedSchedule> {
        let contents = fs::read_to_string(path)?;
        let definition: ScheduleDefinition = serde_yaml::from_str(&contents)?;
        definition.resolve()
    }

    fn insert(&self, schedule: ResolvedSchedule) {
        let mut guard = self
            .schedules
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = guard.insert(schedule.id.clone(), schedule) {
            warn!(id = %previous.id, "duplicate schedule id, replaced by later file");
        }
    }

    /// Look up a resolved schedule by id.
    pub fn get(&self, id: &str) -> Option<ResolvedSchedule> {
        self.schedules
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    /// All resolved schedules, ordered by id.
    pub fn schedules(&self) -> Vec<ResolvedSchedule> {
        let mut all: Vec<_> = self
            .schedules
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        all
    }

    /// Get the schedules directory path.
    pub fn schedules_dir(&self) -> &Path {
        &self.schedules_dir
    }
}
