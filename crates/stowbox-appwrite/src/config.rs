use crate::AppwriteError;

/// Connection settings for the backend, one value per deployment resource.
#[derive(Debug, Clone)]
pub struct AppwriteConfig {
    /// REST endpoint including the API version segment,
    /// e.g. "https://cloud.appwrite.io/v1".
    pub endpoint: String,
    pub project_id: String,
    pub api_key: String,
    pub database_id: String,
    pub users_collection_id: String,
    pub files_collection_id: String,
    pub bucket_id: String,
}

impl AppwriteConfig {
    /// Build from environment variables. `STOWBOX_APPWRITE_*` takes
    /// precedence; plain `APPWRITE_*` works as a fallback. Every value is
    /// required, and a missing one is a configuration error naming the
    /// variable.
    pub fn from_env() -> Result<Self, AppwriteError> {
        Ok(Self {
            endpoint: required("STOWBOX_APPWRITE_ENDPOINT", "APPWRITE_ENDPOINT")?,
            project_id: required("STOWBOX_APPWRITE_PROJECT", "APPWRITE_PROJECT")?,
            api_key: required("STOWBOX_APPWRITE_API_KEY", "APPWRITE_API_KEY")?,
            database_id: required("STOWBOX_APPWRITE_DATABASE", "APPWRITE_DATABASE")?,
            users_collection_id: required(
                "STOWBOX_APPWRITE_USERS_COLLECTION",
                "APPWRITE_USERS_COLLECTION",
            )?,
            files_collection_id: required(
                "STOWBOX_APPWRITE_FILES_COLLECTION",
                "APPWRITE_FILES_COLLECTION",
            )?,
            bucket_id: required("STOWBOX_APPWRITE_BUCKET", "APPWRITE_BUCKET")?,
        })
    }
}

fn required(primary: &str, fallback: &str) -> Result<String, AppwriteError> {
    std::env::var(primary)
        .or_else(|_| std::env::var(fallback))
        .map_err(|_| AppwriteError::Config(format!("missing {primary} (or {fallback})")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_VARS: &[&str] = &[
        "STOWBOX_APPWRITE_ENDPOINT",
        "APPWRITE_ENDPOINT",
        "STOWBOX_APPWRITE_PROJECT",
        "APPWRITE_PROJECT",
        "STOWBOX_APPWRITE_API_KEY",
        "APPWRITE_API_KEY",
        "STOWBOX_APPWRITE_DATABASE",
        "APPWRITE_DATABASE",
        "STOWBOX_APPWRITE_USERS_COLLECTION",
        "APPWRITE_USERS_COLLECTION",
        "STOWBOX_APPWRITE_FILES_COLLECTION",
        "APPWRITE_FILES_COLLECTION",
        "STOWBOX_APPWRITE_BUCKET",
        "APPWRITE_BUCKET",
    ];

    // These subtests mutate global env vars and must run sequentially
    // in a single test to avoid races with parallel test execution.
    #[test]
    fn from_env_scenarios() {
        use std::sync::Mutex;
        static ENV_LOCK: Mutex<()> = Mutex::new(());
        let _guard = ENV_LOCK.lock().unwrap();

        let clear_all = || {
            for var in ALL_VARS {
                std::env::remove_var(var);
            }
        };

        // Scenario 1: nothing set → error naming the first missing variable
        clear_all();
        let err = AppwriteConfig::from_env().unwrap_err();
        assert!(err.to_string().contains("STOWBOX_APPWRITE_ENDPOINT"));

        // Scenario 2: plain APPWRITE_* fallbacks are enough
        clear_all();
        std::env::set_var("APPWRITE_ENDPOINT", "https://cloud.appwrite.io/v1");
        std::env::set_var("APPWRITE_PROJECT", "proj");
        std::env::set_var("APPWRITE_API_KEY", "key");
        std::env::set_var("APPWRITE_DATABASE", "db");
        std::env::set_var("APPWRITE_USERS_COLLECTION", "users");
        std::env::set_var("APPWRITE_FILES_COLLECTION", "files");
        std::env::set_var("APPWRITE_BUCKET", "bucket");
        let config = AppwriteConfig::from_env().unwrap();
        assert_eq!(config.endpoint, "https://cloud.appwrite.io/v1");
        assert_eq!(config.bucket_id, "bucket");

        // Scenario 3: STOWBOX_APPWRITE_* takes precedence
        std::env::set_var("STOWBOX_APPWRITE_PROJECT", "stowbox-proj");
        let config = AppwriteConfig::from_env().unwrap();
        assert_eq!(config.project_id, "stowbox-proj");
        assert_eq!(config.database_id, "db");

        // Scenario 4: one missing value fails even with the rest present
        clear_all();
        std::env::set_var("APPWRITE_ENDPOINT", "https://cloud.appwrite.io/v1");
        let err = AppwriteConfig::from_env().unwrap_err();
        assert!(err.to_string().contains("STOWBOX_APPWRITE_PROJECT"));

        clear_all();
    }
}
