// src/config.rs
// Loads nxsig configuration from /etc and user config; provides defaults.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use nxsig::PublicKey;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Inline base64 public key; takes precedence over `pubkey_path`.
    pub pubkey: Option<String>,
    pub pubkey_path: PathBuf,
    /// Appended to the artifact path or URL when no signature location is given.
    pub signature_suffix: String,
    pub http_timeout: Option<Duration>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            pubkey: None,
            pubkey_path: PathBuf::from("/etc/nxsig/nxsig.pub"),
            signature_suffix: ".minisig".to_string(),
            http_timeout: None,
        }
    }
}

impl AppConfig {
    pub fn load() -> Self {
        let mut cfg = AppConfig::default();

        // 1) System config: /etc/nxsig/config.cfg
        let sys_cfg = Path::new("/etc/nxsig/config.cfg");
        if sys_cfg.exists() {
            if let Err(e) = cfg.apply_cfg_file(sys_cfg) {
                tracing::warn!(path = %sys_cfg.display(), error = %e, "failed to load config");
            }
        }

        // 2) User config: $XDG_CONFIG_HOME/nxsig/config.cfg or ~/.config/nxsig/config.cfg
        let user_cfg = user_config_dir().join("nxsig/config.cfg");
        if user_cfg.exists() {
            if let Err(e) = cfg.apply_cfg_file(&user_cfg) {
                tracing::warn!(path = %user_cfg.display(), error = %e, "failed to load config");
            }
        }

        // 3) Environment overrides (highest priority)
        cfg.apply_env(|name| env::var(name).ok());
        cfg
    }

    fn apply_cfg_file(&mut self, path: &Path) -> std::io::Result<()> {
        let content = fs::read_to_string(path)?;
        self.apply_cfg_str(&content);
        Ok(())
    }

    fn apply_cfg_str(&mut self, content: &str) {
        let mut section = String::new();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }
            if line.starts_with('[') && line.ends_with(']') {
                section = line[1..line.len() - 1].trim().to_lowercase();
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim();
                let value = value.trim();
                match (section.as_str(), key) {
                    ("security", "pubkey") => self.pubkey = Some(value.to_string()),
                    ("security", "pubkey_path") => self.pubkey_path = PathBuf::from(value).expand_home(),
                    ("network", "signature_suffix") => self.signature_suffix = value.to_string(),
                    ("network", "timeout_secs") => self.set_timeout(value),
                    _ => {}
                }
            }
        }
    }

    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(v) = var("NXSIG_PUBKEY") { self.pubkey = Some(v); }
        if let Some(v) = var("NXSIG_PUBKEY_PATH") { self.pubkey_path = PathBuf::from(v).expand_home(); }
        if let Some(v) = var("NXSIG_SIGNATURE_SUFFIX") { self.signature_suffix = v; }
        if let Some(v) = var("NXSIG_HTTP_TIMEOUT") { self.set_timeout(&v); }
    }

    fn set_timeout(&mut self, value: &str) {
        match value.parse::<u64>() {
            Ok(0) => self.http_timeout = None,
            Ok(secs) => self.http_timeout = Some(Duration::from_secs(secs)),
            Err(_) => tracing::warn!(value, "ignoring invalid timeout"),
        }
    }

    /// Resolves the trusted key: an explicit value, then `pubkey`, then the
    /// file at `pubkey_path`.
    pub fn resolve_public_key(&self, explicit: Option<&str>) -> nxsig::Result<PublicKey> {
        if let Some(text) = explicit.or(self.pubkey.as_deref()) {
            return Ok(PublicKey::from_minisign_text(text)?);
        }
        PublicKey::from_file(&self.pubkey_path)
    }
}

fn user_config_dir() -> PathBuf {
    env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("~/.config").expand_home())
}

// Small helper to expand leading ~ in paths
trait ExpandHome {
    fn expand_home(self) -> PathBuf;
}

impl ExpandHome for PathBuf {
    fn expand_home(self) -> PathBuf {
        let s = self.to_string_lossy().to_string();
        if let Some(rest) = s.strip_prefix("~/") {
            if let Some(home) = dirs_next::home_dir() {
                return home.join(rest);
            }
        }
        PathBuf::from(s)
    }
}
