use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;

use crate::{
    color::css::parse_css_color,
    foundation::error::{WeaveError, WeaveResult},
    quota::guard::{DEFAULT_MAX_SUBMISSIONS, DEFAULT_QUOTA_KEY},
    render::{backend::WeaveStyle, cpu::CpuBackend, labels::LabelFont},
};

const ENV_PREFIX: &str = "WORDWEAVE_";

/// Session tunables.
///
/// Resolution order: defaults, then an optional JSON file, then
/// `WORDWEAVE_*` environment variables, then command-line flags.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct WeaveConfig {
    pub poll_interval_ms: u64,
    pub fetch_timeout_ms: u64,
    pub max_submissions: u32,
    pub max_text_chars: usize,
    pub notice_ttl_ms: u64,
    pub quota_key: String,
    pub store_url: String,
    pub background_rgba: String,
    pub stroke_width: f64,
    pub stroke_opacity: f64,
    pub show_words: bool,
    /// Font file for word labels; markers only when unset.
    pub label_font: Option<PathBuf>,
}

impl Default for WeaveConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 1500,
            fetch_timeout_ms: 5000,
            max_submissions: DEFAULT_MAX_SUBMISSIONS,
            max_text_chars: 50,
            notice_ttl_ms: 4000,
            quota_key: DEFAULT_QUOTA_KEY.to_owned(),
            store_url: "http://127.0.0.1:3000".to_owned(),
            background_rgba: "#111827".to_owned(),
            stroke_width: 2.0,
            stroke_opacity: 0.8,
            show_words: false,
            label_font: None,
        }
    }
}

impl WeaveConfig {
    /// Read a JSON config file. Missing fields keep their defaults.
    pub fn from_path(path: impl AsRef<Path>) -> WeaveResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_str(&raw)?;
        Ok(cfg)
    }

    /// Defaults, the optional file, then the process environment, validated.
    pub fn load(path: Option<&Path>) -> WeaveResult<Self> {
        let cfg = match path {
            Some(p) => Self::from_path(p)?,
            None => Self::default(),
        };
        let cfg = cfg.with_env_overrides()?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn with_env_overrides(self) -> WeaveResult<Self> {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Apply `WORDWEAVE_<FIELD>` overrides found through `lookup`.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> WeaveResult<Self> {
        let var = |field: &str| {
            let name = format!("{ENV_PREFIX}{}", field.to_ascii_uppercase());
            lookup(&name).map(|v| (name, v.trim().to_owned()))
        };

        if let Some((name, v)) = var("poll_interval_ms") {
            self.poll_interval_ms = parse_var(&name, &v)?;
        }
        if let Some((name, v)) = var("fetch_timeout_ms") {
            self.fetch_timeout_ms = parse_var(&name, &v)?;
        }
        if let Some((name, v)) = var("max_submissions") {
            self.max_submissions = parse_var(&name, &v)?;
        }
        if let Some((name, v)) = var("max_text_chars") {
            self.max_text_chars = parse_var(&name, &v)?;
        }
        if let Some((name, v)) = var("notice_ttl_ms") {
            self.notice_ttl_ms = parse_var(&name, &v)?;
        }
        if let Some((_, v)) = var("quota_key") {
            self.quota_key = v;
        }
        if let Some((_, v)) = var("store_url") {
            self.store_url = v;
        }
        if let Some((_, v)) = var("background_rgba") {
            self.background_rgba = v;
        }
        if let Some((name, v)) = var("stroke_width") {
            self.stroke_width = parse_var(&name, &v)?;
        }
        if let Some((name, v)) = var("stroke_opacity") {
            self.stroke_opacity = parse_var(&name, &v)?;
        }
        if let Some((name, v)) = var("show_words") {
            self.show_words = parse_var(&name, &v)?;
        }
        if let Some((_, v)) = var("label_font") {
            self.label_font = (!v.is_empty()).then(|| PathBuf::from(v));
        }
        Ok(self)
    }

    pub fn validate(&self) -> WeaveResult<()> {
        if self.poll_interval_ms == 0 {
            return Err(WeaveError::validation("poll_interval_ms must be > 0"));
        }
        if self.fetch_timeout_ms == 0 {
            return Err(WeaveError::validation("fetch_timeout_ms must be > 0"));
        }
        if self.max_submissions == 0 {
            return Err(WeaveError::validation("max_submissions must be > 0"));
        }
        if self.max_text_chars == 0 {
            return Err(WeaveError::validation("max_text_chars must be > 0"));
        }
        if self.quota_key.trim().is_empty() {
            return Err(WeaveError::validation("quota_key must be non-empty"));
        }
        if self.store_url.trim().is_empty() {
            return Err(WeaveError::validation("store_url must be non-empty"));
        }
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(WeaveError::validation("stroke_width must be finite and > 0"));
        }
        if !(0.0..=1.0).contains(&self.stroke_opacity) {
            return Err(WeaveError::validation("stroke_opacity must be in [0,1]"));
        }
        parse_css_color(&self.background_rgba).map_err(|e| {
            WeaveError::validation(format!("background_rgba '{}': {e}", self.background_rgba))
        })?;
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }

    pub fn notice_ttl(&self) -> Duration {
        Duration::from_millis(self.notice_ttl_ms)
    }

    pub fn style(&self) -> WeaveResult<WeaveStyle> {
        Ok(WeaveStyle {
            background: parse_css_color(&self.background_rgba)?,
            stroke_width: self.stroke_width,
            stroke_opacity: self.stroke_opacity,
            show_words: self.show_words,
        })
    }

    /// CPU renderer for this style, with the label font loaded if set.
    pub fn backend(&self) -> WeaveResult<CpuBackend> {
        let backend = CpuBackend::new(self.style()?);
        match &self.label_font {
            Some(path) => Ok(backend.with_label_font(LabelFont::from_path(path)?)),
            None => Ok(backend),
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, value: &str) -> WeaveResult<T>
where
    T::Err: std::fmt::Display,
{
    value
        .parse()
        .map_err(|e| WeaveError::validation(format!("{name}='{value}': {e}")))
}

#[cfg(test)]
#[path = "../tests/unit/config/config.rs"]
mod tests;
