use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub assets: AssetsConfig,
    /// Base path for resolving relative paths (set during loading)
    #[serde(skip)]
    base_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    /// `0` binds an ephemeral port.
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssetsConfig {
    /// URL prefix the bundle is mounted under, e.g. `/assets`.
    pub mount: String,
    /// Serve this directory from disk instead of the embedded bundle.
    pub dir: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        // Try multiple config file locations in order of preference
        let config_candidates = [
            // 1. Current directory (when running from demos/font_server/)
            ("config/default", Some(".")),
            // 2. Workspace root
            ("demos/font_server/config/default", Some("demos/font_server")),
        ];

        let mut builder = config::Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 0)?
            .set_default("assets.mount", "/assets")?;
        let mut base_path: Option<PathBuf> = None;

        // Check for environment variable override first
        if let Ok(config_path) = std::env::var("FONT_SERVER_CONFIG") {
            let config_file = format!("{}.toml", config_path);
            if !config_path.is_empty() && std::path::Path::new(&config_file).exists() {
                builder = builder.add_source(config::File::with_name(&config_path));
                base_path = std::path::Path::new(&config_file)
                    .parent()
                    .and_then(|p| p.parent())
                    .map(|p| p.to_path_buf());
            }
        }

        if base_path.is_none() {
            for (path, base) in &config_candidates {
                let config_file = format!("{}.toml", path);
                if std::path::Path::new(&config_file).exists() {
                    builder = builder.add_source(config::File::with_name(path));
                    base_path = base.map(PathBuf::from);
                    break;
                }
            }
        }

        // Always layer environment variables on top
        builder =
            builder.add_source(config::Environment::with_prefix("FONT_SERVER").separator("__"));

        let mut config: Config = builder.build()?.try_deserialize()?;
        config.base_path = base_path;
        config.normalize();

        Ok(config)
    }

    /// Defaults without reading any file or environment variable.
    pub fn defaults() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            assets: AssetsConfig {
                mount: "/assets".to_string(),
                dir: None,
            },
            base_path: None,
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    fn normalize(&mut self) {
        self.assets.mount = normalize_mount(&self.assets.mount);

        if let (Some(base), Some(dir)) = (&self.base_path, &self.assets.dir) {
            if dir.is_relative() {
                self.assets.dir = Some(base.join(dir));
            }
        }
    }
}

/// `assets/` and `/assets/` both become `/assets`; an empty mount becomes `/`.
pub fn normalize_mount(mount: &str) -> String {
    let trimmed = mount.trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", trimmed)
    }
}
