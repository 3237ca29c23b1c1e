pub mod holiday;
pub mod policy;
pub mod traits;

use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, Result};

pub use holiday::FileHolidayRepository;
pub use policy::FilePolicyRepository;
pub use traits::{HolidayRepository, PolicyRepository};

pub const HOME_ENV: &str = "PUNCHCARD_HOME";

/// Explicit directory, else `$PUNCHCARD_HOME`, else `~/.punchcard`.
pub fn config_dir(base_dir: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = base_dir {
        return Ok(dir);
    }
    if let Some(dir) = env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let home_dir = dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory"))?;
    Ok(home_dir.join(".punchcard"))
}
