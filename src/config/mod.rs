//! User defaults for the CLI: preferred strategy, agreement tolerance and the
//! benchmark plan. Stored as JSON under the application directory.

use std::{
    env,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
    errors::LedgerError,
    median::{Strategy, AGREEMENT_TOLERANCE},
    report::BenchmarkPlan,
    workload::Distribution,
};

const HOME_ENV: &str = "EXPENSE_MEDIAN_HOME";
const DEFAULT_DIR_NAME: &str = ".expense_median";
const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub strategy: Strategy,
    #[serde(default = "Config::default_tolerance")]
    pub tolerance: f64,
    #[serde(default = "Config::default_bench_sizes")]
    pub bench_sizes: Vec<usize>,
    #[serde(default = "Config::default_bench_distributions")]
    pub bench_distributions: Vec<Distribution>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            tolerance: Self::default_tolerance(),
            bench_sizes: Self::default_bench_sizes(),
            bench_distributions: Self::default_bench_distributions(),
            seed: None,
        }
    }
}

impl Config {
    pub fn default_tolerance() -> f64 {
        AGREEMENT_TOLERANCE
    }

    pub fn default_bench_sizes() -> Vec<usize> {
        BenchmarkPlan::default().sizes
    }

    pub fn default_bench_distributions() -> Vec<Distribution> {
        Distribution::ALL.to_vec()
    }

    pub fn validate(&self) -> Result<(), LedgerError> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(LedgerError::Config(format!(
                "tolerance must be a positive number, got {}",
                self.tolerance
            )));
        }
        if self.bench_sizes.contains(&0) {
            return Err(LedgerError::Config(
                "benchmark sizes must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    /// Benchmark plan built from these defaults.
    pub fn bench_plan(&self) -> BenchmarkPlan {
        BenchmarkPlan {
            sizes: self.bench_sizes.clone(),
            distributions: self.bench_distributions.clone(),
            seed: self.seed,
            tolerance: self.tolerance,
        }
    }
}

/// Loads and saves [`Config`] as a JSON file.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Uses `$EXPENSE_MEDIAN_HOME/config.json`, else `~/.expense_median/config.json`.
    pub fn from_env() -> Self {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Self {
        Self::new(base.join(CONFIG_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored configuration, or the defaults when no file exists yet.
    pub fn load(&self) -> Result<Config, LedgerError> {
        let config = if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            serde_json::from_str(&data)?
        } else {
            Config::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> Result<(), LedgerError> {
        config.validate()?;
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// Application data directory, overridable through `EXPENSE_MEDIAN_HOME`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{existing}.{TMP_SUFFIX}"),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), LedgerError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
