use std::{
    collections::HashMap,
    env, fs,
    io::{BufRead, BufReader},
    path::PathBuf,
    time::Duration,
};

use directories::BaseDirs;

use crate::{error, plot::ImageFormat};

#[derive(Debug, Clone)]
pub struct Config {
    inner: HashMap<String, String>,
    pub config_path: PathBuf,
}

impl Config {
    pub fn load() -> Self {
        let mut map = default_map();
        let config_path = default_config_path();

        // Read .uqplotrc if exists
        if config_path.exists() {
            if let Ok(file) = fs::File::open(&config_path) {
                map.extend(parse_rc(BufReader::new(file)));
            }
        }

        // Overlay environment variables (take precedence)
        for (k, v) in env::vars() {
            if is_config_key(&k) {
                map.insert(k, v);
            }
        }

        Self { inner: map, config_path }
    }

    /// Defaults overlaid by the given rc text. Environment variables are not consulted.
    pub fn from_rc_str(text: &str) -> Self {
        let mut map = default_map();
        map.extend(parse_rc(text.as_bytes()));
        Self { inner: map, config_path: PathBuf::new() }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key).cloned()
    }

    pub fn get_bool(&self, key: &str) -> bool {
        self.get(key)
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    }

    pub fn get_u32(&self, key: &str) -> Option<u32> {
        self.get(key).and_then(|v| v.parse::<u32>().ok())
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(|v| v.trim().parse::<i64>().ok())
    }

    pub fn get_path(&self, key: &str) -> Option<PathBuf> {
        self.get(key).filter(|v| !v.is_empty()).map(PathBuf::from)
    }

    pub fn simulator(&self) -> String {
        self.get("UQSIM_BIN").unwrap_or_else(|| "uqsim".to_string())
    }

    pub fn workdir(&self) -> PathBuf {
        self.get_path("UQPLOT_WORKDIR").unwrap_or_else(|| PathBuf::from("."))
    }

    /// Configured image format; an unrecognized value is an error, not a fallback.
    pub fn image_format(&self) -> error::Result<ImageFormat> {
        match self.get("UQPLOT_FORMAT") {
            Some(v) if !v.trim().is_empty() => v.parse(),
            _ => Ok(ImageFormat::default()),
        }
    }

    pub fn sim_timeout(&self) -> Option<Duration> {
        self.get("SIM_TIMEOUT")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|&s| s > 0)
            .map(Duration::from_secs)
    }
}

fn parse_rc<R: BufRead>(reader: R) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for line in reader.lines().map_while(Result::ok) {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((k, v)) = line.split_once('=') {
            map.insert(k.trim().to_string(), v.trim().to_string());
        }
    }
    map
}

fn is_config_key(k: &str) -> bool {
    // Accept known keys or UQPLOT_* for forward-compat
    const KEYS: &[&str] = &["UQSIM_BIN", "SIM_TIMEOUT", "SHELL_NAME"];

    KEYS.contains(&k) || k.starts_with("UQPLOT_")
}

fn default_config_path() -> PathBuf {
    let base = BaseDirs::new()
        .map(|b| b.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("~/.config"));
    base.join("uqplot").join(".uqplotrc")
}

fn default_map() -> HashMap<String, String> {
    let mut m = HashMap::new();

    // Strings
    m.insert("UQSIM_BIN".into(), "uqsim".into());
    m.insert("UQPLOT_WORKDIR".into(), ".".into());
    m.insert("UQPLOT_FORMAT".into(), "png".into());
    m.insert("SHELL_NAME".into(), "auto".into());

    // Numbers
    m.insert("UQPLOT_CASE".into(), "7".into());
    m.insert("UQPLOT_WIDTH".into(), "1024".into());
    m.insert("UQPLOT_HEIGHT".into(), "768".into());

    // Bools as strings
    m.insert("UQPLOT_SHOW".into(), "false".into());
    m.insert("UQPLOT_STRICT".into(), "false".into());

    m
}
