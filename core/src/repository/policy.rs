use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::model::policy::AttendancePolicy;
use crate::repository::config_dir;
use crate::repository::traits::PolicyRepository;

const POLICY_FILE_NAME: &str = "policy.json";

#[derive(Clone)]
pub struct FilePolicyRepository {
    file_path: PathBuf,
}

impl FilePolicyRepository {
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        let path = config_dir(base_dir)?;
        fs::create_dir_all(&path)?;
        Ok(Self {
            file_path: path.join(POLICY_FILE_NAME),
        })
    }
}

impl PolicyRepository for FilePolicyRepository {
    /// A missing file means the default policy.
    fn get(&self) -> Result<AttendancePolicy> {
        if self.file_path.exists() {
            let content = fs::read_to_string(&self.file_path)?;
            let policy: AttendancePolicy = serde_json::from_str(&content)
                .with_context(|| format!("Invalid policy file {}", self.file_path.display()))?;
            policy
                .validate()
                .with_context(|| format!("Invalid policy file {}", self.file_path.display()))?;
            Ok(policy)
        } else {
            Ok(AttendancePolicy::default())
        }
    }

    fn save(&self, policy: &AttendancePolicy) -> Result<()> {
        policy.validate()?;
        let content = serde_json::to_string_pretty(policy)?;
        fs::write(&self.file_path, content)?;
        Ok(())
    }
}
