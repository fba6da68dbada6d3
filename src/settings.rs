use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PanelSettings {
    /// Base URL of the rendering server. `/process` and `/sample_image/..`
    /// are resolved against it.
    #[serde(default = "default_server_url")]
    pub server_url: String,
    /// Page address share URLs are built on. Falls back to `server_url`.
    #[serde(default)]
    pub share_base_url: Option<String>,
    /// Sample image names offered by the server.
    #[serde(default)]
    pub samples: Vec<String>,
    /// Local copy of the server's sample directory, scanned for more names.
    #[serde(default)]
    pub samples_dir: Option<String>,
    /// Where downloads are saved. If `None`, the platform download folder is
    /// used.
    #[serde(default)]
    pub download_dir: Option<String>,
    /// When enabled the application initialises the logger at debug level.
    #[serde(default)]
    pub debug_logging: bool,
    /// Optional log file; logs go to stdout when absent.
    #[serde(default)]
    pub log_file: Option<String>,
    /// Enable toast notifications in the UI.
    #[serde(default = "default_toasts")]
    pub enable_toasts: bool,
    /// Duration of toast notifications in seconds.
    #[serde(default = "default_toast_duration")]
    pub toast_duration: f32,
    #[serde(default = "default_window_size")]
    pub window_size: Option<(i32, i32)>,
}

fn default_server_url() -> String {
    "http://localhost:5000/".into()
}

fn default_toasts() -> bool {
    true
}

fn default_toast_duration() -> f32 {
    3.0
}

fn default_window_size() -> Option<(i32, i32)> {
    Some((1000, 760))
}

impl Default for PanelSettings {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            share_base_url: None,
            samples: Vec::new(),
            samples_dir: None,
            download_dir: None,
            debug_logging: false,
            log_file: None,
            enable_toasts: default_toasts(),
            toast_duration: default_toast_duration(),
            window_size: default_window_size(),
        }
    }
}

impl PanelSettings {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &str) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Page address share URLs are built on.
    pub fn share_base(&self) -> anyhow::Result<Url> {
        let raw = self.share_base_url.as_deref().unwrap_or(&self.server_url);
        Ok(Url::parse(raw)?)
    }

    pub fn download_dir(&self) -> PathBuf {
        match &self.download_dir {
            Some(dir) => PathBuf::from(dir),
            None => dirs_next::download_dir()
                .or_else(|| std::env::current_dir().ok())
                .unwrap_or_else(std::env::temp_dir),
        }
    }

    pub fn log_file(&self) -> Option<PathBuf> {
        self.log_file.as_ref().map(PathBuf::from)
    }
}
