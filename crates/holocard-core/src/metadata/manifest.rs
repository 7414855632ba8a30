//! Per-card installable-app manifest.
//!
//! Installing a card page installs *that card*: the manifest's start URL,
//! shortcut, share target and protocol handler all point at the card's
//! canonical URL.

use serde::{Deserialize, Serialize};

use crate::config::SiteConfig;
use crate::types::DigitalCard;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppManifest {
    pub name: String,
    pub short_name: String,
    pub description: String,
    pub start_url: String,
    pub display: String,
    pub orientation: String,
    pub theme_color: String,
    pub background_color: String,
    pub scope: String,
    pub lang: String,
    pub dir: String,
    pub categories: Vec<String>,
    pub prefer_related_applications: bool,
    pub icons: Vec<ManifestIcon>,
    pub shortcuts: Vec<ManifestShortcut>,
    pub share_target: ShareTarget,
    pub screenshots: Vec<Screenshot>,
    pub protocol_handlers: Vec<ProtocolHandler>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestIcon {
    pub src: String,
    pub sizes: String,
    #[serde(rename = "type")]
    pub mime: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestShortcut {
    pub name: String,
    pub short_name: String,
    pub description: String,
    pub url: String,
    pub icons: Vec<ManifestIcon>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareTarget {
    pub action: String,
    pub method: String,
    pub params: ShareParams,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareParams {
    pub title: String,
    pub text: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Screenshot {
    pub src: String,
    pub sizes: String,
    #[serde(rename = "type")]
    pub mime: String,
    pub form_factor: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtocolHandler {
    pub protocol: String,
    pub url: String,
}

fn png(src: String, sizes: &str, purpose: Option<&str>) -> ManifestIcon {
    ManifestIcon {
        src,
        sizes: sizes.to_string(),
        mime: "image/png".to_string(),
        purpose: purpose.map(str::to_string),
    }
}

impl AppManifest {
    /// Build the manifest for `card`, installed at `canonical_url`
    pub fn for_card(card: &DigitalCard, canonical_url: &str, config: &SiteConfig) -> Self {
        let name = card.name().unwrap_or("Usuario");
        let job = card.job_title().unwrap_or("Profesional");
        let place = card
            .location()
            .map(|l| format!(" en {}", l))
            .unwrap_or_default();

        let icons = vec![
            png(config.icon("apple-touch-icon-180x180.png"), "180x180", Some("any")),
            png(config.icon("icon_JE_192.png"), "192x192", Some("any")),
            png(config.icon("icon_JE_512_maskable.png"), "512x512", Some("maskable")),
            png(config.icon("icon_JE_512.png"), "512x512", Some("any")),
            png(config.icon("logo_JE_1024.png"), "1024x1024", Some("any")),
        ];

        Self {
            name: format!("{} - Tarjeta Digital", name),
            short_name: name.to_string(),
            description: format!(
                "Tarjeta digital profesional de {}, {}{}. Acceso directo a toda su información de contacto.",
                name, job, place
            ),
            start_url: canonical_url.to_string(),
            display: "standalone".to_string(),
            orientation: "portrait-primary".to_string(),
            theme_color: config.theme_color.clone(),
            background_color: config.background_color.clone(),
            scope: "/".to_string(),
            lang: config.lang.clone(),
            dir: "ltr".to_string(),
            categories: ["business", "productivity", "social"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
            prefer_related_applications: false,
            icons,
            shortcuts: vec![ManifestShortcut {
                name: format!("Ver Tarjeta de {}", name),
                short_name: "Tarjeta".to_string(),
                description: format!("Acceso directo a la tarjeta digital de {}", name),
                url: canonical_url.to_string(),
                icons: vec![png(config.icon("icon_JE_192.png"), "192x192", None)],
            }],
            share_target: ShareTarget {
                action: canonical_url.to_string(),
                method: "GET".to_string(),
                params: ShareParams {
                    title: "title".to_string(),
                    text: "text".to_string(),
                    url: "url".to_string(),
                },
            },
            screenshots: vec![
                Screenshot {
                    src: config.icon("screenshot-wide.png"),
                    sizes: "1280x720".to_string(),
                    mime: "image/png".to_string(),
                    form_factor: "wide".to_string(),
                    label: format!("Vista desktop de la tarjeta digital de {}", name),
                },
                Screenshot {
                    src: config.icon("screenshot-narrow.png"),
                    sizes: "360x640".to_string(),
                    mime: "image/png".to_string(),
                    form_factor: "narrow".to_string(),
                    label: format!("Vista móvil de la tarjeta digital de {}", name),
                },
            ],
            protocol_handlers: vec![ProtocolHandler {
                protocol: "mailto".to_string(),
                url: format!("{}?email=%s", canonical_url),
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PersonalInfo;

    #[test]
    fn test_manifest_targets_card_url() {
        let card = DigitalCard::new(1, "ana-ruiz", "Ana Ruiz");
        let manifest = AppManifest::for_card(&card, "https://x/tarjeta/ana-ruiz", &SiteConfig::default());

        assert_eq!(manifest.start_url, "https://x/tarjeta/ana-ruiz");
        assert_eq!(manifest.short_name, "Ana Ruiz");
        assert_eq!(manifest.name, "Ana Ruiz - Tarjeta Digital");
        assert_eq!(manifest.shortcuts[0].url, "https://x/tarjeta/ana-ruiz");
        assert_eq!(manifest.share_target.action, "https://x/tarjeta/ana-ruiz");
        assert_eq!(
            manifest.protocol_handlers[0].url,
            "https://x/tarjeta/ana-ruiz?email=%s"
        );
    }

    #[test]
    fn test_description_fallbacks() {
        let mut card = DigitalCard::new(1, "x", "");
        card.personal_info = None;
        let manifest = AppManifest::for_card(&card, "https://x/tarjeta/x", &SiteConfig::default());
        assert_eq!(manifest.short_name, "Usuario");
        assert!(manifest.description.starts_with("Tarjeta digital profesional de Usuario, Profesional."));

        card.personal_info = Some(PersonalInfo {
            name: "Ana".to_string(),
            title: Some("Arquitecta".to_string()),
            location: Some("Lima".to_string()),
            photo: None,
        });
        let manifest = AppManifest::for_card(&card, "https://x/tarjeta/x", &SiteConfig::default());
        assert!(manifest.description.starts_with("Tarjeta digital profesional de Ana, Arquitecta en Lima."));
    }

    #[test]
    fn test_serialized_field_names() {
        let card = DigitalCard::new(1, "ana-ruiz", "Ana Ruiz");
        let manifest = AppManifest::for_card(&card, "https://x/tarjeta/ana-ruiz", &SiteConfig::default());
        let value = serde_json::to_value(&manifest).unwrap();

        assert_eq!(value["icons"][0]["type"], "image/png");
        assert_eq!(value["icons"][2]["purpose"], "maskable");
        assert!(value["shortcuts"][0]["icons"][0].get("purpose").is_none());
        assert_eq!(value["icons"][1]["src"], "assets/pwa/icon_JE_192.png");
        for field in ["name", "short_name", "description", "start_url", "display", "theme_color", "background_color", "icons", "shortcuts", "share_target"] {
            assert!(value.get(field).is_some(), "missing {}", field);
        }
    }
}
