//! Site configuration.
//!
//! Everything environment-specific lives here: public site origin, API
//! endpoints, default assets and install heuristics. Defaults mirror the
//! production deployment, so an empty config file is valid.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CardError, CardResult};
use crate::types::CardVariant;

/// Site-wide settings used by the client, publisher and install tracker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Public origin of the card site, without trailing slash
    pub site_url: String,
    /// Brand name used in `og:site_name`
    pub site_name: String,
    /// Base URL of the card API (e.g. `https://api.example.com/api`)
    pub api_url: String,
    /// Origin that relative photo paths are resolved against
    pub asset_host: String,
    /// Site-relative path of the fallback social-preview image
    pub default_image: String,
    /// Directory holding the installable-app icons
    pub icon_base: String,
    pub theme_color: String,
    pub background_color: String,
    /// `og:locale` value
    pub locale: String,
    /// Manifest `lang` value
    pub lang: String,
    /// Static manifest restored when card metadata is retracted
    pub static_manifest: Option<String>,
    /// Days a dismissed install prompt stays hidden
    pub dismiss_cooldown_days: i64,
    /// Seconds of dwell time that count as engagement
    pub engagement_dwell_secs: i64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_url: "https://tarjeta-holografico.smartdigitaltec.com".to_string(),
            site_name: "Tarjeta Digital".to_string(),
            api_url: "https://api-tarjeta-holografico.smartdigitaltec.com/api".to_string(),
            asset_host: "https://api-tarjeta-holografico.smartdigitaltec.com".to_string(),
            default_image: "/assets/imagen/og/tarjeta_digital.jpg".to_string(),
            icon_base: "assets/pwa".to_string(),
            theme_color: "#00ffff".to_string(),
            background_color: "#000000".to_string(),
            locale: "es_ES".to_string(),
            lang: "es-ES".to_string(),
            static_manifest: Some("/manifest.json".to_string()),
            dismiss_cooldown_days: 7,
            engagement_dwell_secs: 30,
        }
    }
}

impl SiteConfig {
    /// Load a JSON config file; missing keys take their default values.
    pub fn load(path: impl AsRef<Path>) -> CardResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| CardError::Config(format!("{}: {}", path.display(), e)))?;
        let config: SiteConfig = serde_json::from_str(&raw)
            .map_err(|e| CardError::Config(format!("{}: {}", path.display(), e)))?;
        Ok(config.normalized())
    }

    /// Strip trailing slashes from origins so URL joins stay predictable
    pub fn normalized(mut self) -> Self {
        for value in [&mut self.site_url, &mut self.api_url, &mut self.asset_host] {
            while value.ends_with('/') {
                value.pop();
            }
        }
        self
    }

    /// Absolute public URL of a card page
    pub fn card_url(&self, variant: CardVariant, slug: &str) -> String {
        format!("{}/{}/{}", self.site_url, variant.route_prefix(), slug)
    }

    /// Absolute URL of the fallback social-preview image
    pub fn default_image_url(&self) -> String {
        if self.default_image.starts_with("http://") || self.default_image.starts_with("https://")
        {
            return self.default_image.clone();
        }
        if self.default_image.starts_with('/') {
            format!("{}{}", self.site_url, self.default_image)
        } else {
            format!("{}/{}", self.site_url, self.default_image)
        }
    }

    /// Path of an icon inside `icon_base`
    pub fn icon(&self, file: &str) -> String {
        format!("{}/{}", self.icon_base.trim_end_matches('/'), file)
    }

    pub fn dismiss_cooldown(&self) -> chrono::Duration {
        chrono::Duration::days(self.dismiss_cooldown_days)
    }

    pub fn engagement_dwell(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.engagement_dwell_secs)
    }
}
