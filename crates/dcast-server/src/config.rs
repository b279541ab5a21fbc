//! Server configuration.

use std::path::PathBuf;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to configuration file
    pub config_path: PathBuf,
    /// Unix socket for the REST API
    pub api_socket: PathBuf,
    /// PID file path
    pub pid_file: PathBuf,
    /// Log file path
    pub log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        let dcast_dir = home.join(".dcast");
        let run_dir = dcast_dir.join("run");
        let server_dir = dcast_dir.join("server");

        Self {
            config_path: dcast_dir.join("config.toml"),
            api_socket: run_dir.join("api.sock"),
            pid_file: server_dir.join("server.pid"),
            log_file: server_dir.join("server.log"),
        }
    }
}

impl Config {
    /// Load configuration from file or defaults
    ///
    /// Standard directory structure:
    /// ```text
    /// ~/.dcast/
    /// ├── config.toml           # Main configuration
    /// ├── run/                  # Runtime files (sockets)
    /// │   └── api.sock          # dcast-server REST API
    /// └── server/
    ///     ├── server.pid        # PID file
    ///     └── server.log        # Logs
    /// ```
    pub fn load() -> anyhow::Result<Self> {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));

        // Use DCAST_DIR env var if set, otherwise ~/.dcast
        let dcast_dir = std::env::var("DCAST_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| home.join(".dcast"));

        let run_dir = dcast_dir.join("run");
        let server_dir = dcast_dir.join("server");

        // Create directories if they don't exist
        std::fs::create_dir_all(&run_dir)?;
        std::fs::create_dir_all(&server_dir)?;

        Ok(Self {
            config_path: dcast_dir.join("config.toml"),
            api_socket: run_dir.join("api.sock"),
            pid_file: server_dir.join("server.pid"),
            log_file: server_dir.join("server.log"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert!(config.config_path.ends_with("config.toml"));
        assert!(config.api_socket.ends_with("api.sock"));
        assert!(config.pid_file.ends_with("server.pid"));
        assert!(config.log_file.ends_with("server.log"));
    }

    #[test]
    fn test_default_config_directory_structure() {
        let config = Config::default();

        // All paths should be under ~/.dcast
        let home = dirs::home_dir().unwrap();
        let dcast_dir = home.join(".dcast");

        assert!(config.config_path.starts_with(&dcast_dir));
        assert!(config.api_socket.starts_with(&dcast_dir));
    }

    #[test]
    fn test_config_load_with_custom_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let custom_path = temp_dir.path().to_path_buf();

        // Save current value to restore later
        let old_val = env::var("DCAST_DIR").ok();
        // SAFETY: This test runs in isolation and we restore the env var afterward
        unsafe { env::set_var("DCAST_DIR", &custom_path) };

        let config = Config::load().unwrap();

        // Should use custom directory
        assert!(config.config_path.starts_with(&custom_path));
        assert!(config.api_socket.starts_with(&custom_path));
        assert!(config.pid_file.starts_with(&custom_path));

        // Should have created run/ and server/ directories
        assert!(custom_path.join("run").exists());
        assert!(custom_path.join("server").exists());

        // Cleanup
        // SAFETY: Restoring environment to previous state
        unsafe {
            if let Some(val) = old_val {
                env::set_var("DCAST_DIR", val);
            } else {
                env::remove_var("DCAST_DIR");
            }
        }
    }

    #[test]
    fn test_config_clone() {
        let config1 = Config::default();
        let config2 = config1.clone();

        assert_eq!(config1.config_path, config2.config_path);
        assert_eq!(config1.api_socket, config2.api_socket);
    }
}
