use std::{
    collections::HashMap,
    env,
    fs,
    path::PathBuf,
};

use directories::BaseDirs;

use crate::view::Tab;

#[derive(Debug, Clone)]
pub struct Config {
    inner: HashMap<String, String>,
    pub config_path: PathBuf,
}

impl Config {
    pub fn load() -> Self {
        let config_path = default_config_path();
        let rc = fs::read_to_string(&config_path).ok();
        Self::from_sources(config_path, rc.as_deref(), env::vars())
    }

    /// Defaults, then the rc file, then environment variables.
    pub fn from_sources(
        config_path: PathBuf,
        rc: Option<&str>,
        vars: impl IntoIterator<Item = (String, String)>,
    ) -> Self {
        let mut map = default_map();

        if let Some(text) = rc {
            for line in text.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                if let Some((k, v)) = line.split_once('=') {
                    map.insert(k.trim().to_string(), v.trim().to_string());
                }
            }
        }

        for (k, v) in vars {
            if is_config_key(&k) {
                map.insert(k, v);
            }
        }

        Self { inner: map, config_path }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key).filter(|v| !v.is_empty()).cloned()
    }

    pub fn get_bool(&self, key: &str) -> bool {
        self.get(key)
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    }

    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.get(key).and_then(|v| v.parse::<u64>().ok())
    }

    pub fn get_path(&self, key: &str) -> Option<PathBuf> {
        self.get(key).map(PathBuf::from)
    }

    pub fn templates_path(&self) -> Option<PathBuf> {
        self.get_path("TEMPLATES_PATH")
    }

    pub fn interpreter_template(&self) -> String {
        self.get("CODE_INTERPRETER_TEMPLATE")
            .unwrap_or_else(|| "code-interpreter-v1".into())
    }

    pub fn default_tab(&self) -> Tab {
        self.get("DEFAULT_TAB")
            .and_then(|v| Tab::parse(&v))
            .unwrap_or_default()
    }

    pub fn tick_rate_ms(&self) -> u64 {
        self.get_u64("TICK_RATE_MS").filter(|ms| *ms > 0).unwrap_or(120)
    }

    pub fn log_file(&self) -> Option<PathBuf> {
        self.get_path("FRAGVIEW_LOG_FILE")
    }
}

fn is_config_key(k: &str) -> bool {
    const KEYS: &[&str] = &[
        "TEMPLATES_PATH",
        "CODE_INTERPRETER_TEMPLATE",
        "DEFAULT_TAB",
        "PRETTIFY_MARKDOWN",
        "TICK_RATE_MS",
        "LOG_LEVEL",
    ];

    KEYS.contains(&k) || k.starts_with("FRAGVIEW_")
}

fn default_config_path() -> PathBuf {
    let base = BaseDirs::new()
        .map(|b| b.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("~/.config"));
    base.join("fragview").join(".fragviewrc")
}

fn default_map() -> HashMap<String, String> {
    let mut m = HashMap::new();
    m.insert("CODE_INTERPRETER_TEMPLATE".into(), "code-interpreter-v1".into());
    m.insert("DEFAULT_TAB".into(), "code".into());
    m.insert("PRETTIFY_MARKDOWN".into(), "true".into());
    m.insert("TICK_RATE_MS".into(), "120".into());
    m.insert("LOG_LEVEL".into(), "warn".into());
    m
}
