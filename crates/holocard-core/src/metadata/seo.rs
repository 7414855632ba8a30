//! Page title, description and social-preview tags for a card.
//!
//! Missing card fields fall back to generic labels; nothing here can fail.

use url::Url;

use super::document::MetaKey;
use crate::config::SiteConfig;
use crate::types::{CardVariant, DigitalCard};

/// Descriptive metadata computed for one card page
#[derive(Debug, Clone, PartialEq)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    pub canonical_url: String,
    /// Always absolute, never empty
    pub image_url: String,
    pub keywords: Vec<String>,
    /// Every meta tag to publish, one entry per logical key
    pub tags: Vec<(MetaKey, String)>,
}

impl PageMetadata {
    pub fn for_card(
        card: &DigitalCard,
        variant: CardVariant,
        canonical_url: &str,
        config: &SiteConfig,
    ) -> Self {
        let name = card.name().unwrap_or(variant.fallback_name());
        let title = page_title(card, variant);
        let description = page_description(card, variant);
        let image_url = resolve_image_url(card.photo(), config);
        let keywords = keywords(card, variant);

        let tags = vec![
            (MetaKey::name("description"), description.clone()),
            (MetaKey::name("keywords"), keywords.join(", ")),
            (MetaKey::name("author"), name.to_string()),
            (MetaKey::name("robots"), "index, follow".to_string()),
            (MetaKey::name("theme-color"), config.theme_color.clone()),
            (MetaKey::property("og:title"), title.clone()),
            (MetaKey::property("og:description"), description.clone()),
            (MetaKey::property("og:type"), "profile".to_string()),
            (MetaKey::property("og:url"), canonical_url.to_string()),
            (
                MetaKey::property("og:site_name"),
                format!("{}{}", config.site_name, variant.site_name_suffix()),
            ),
            (MetaKey::property("og:locale"), config.locale.clone()),
            (MetaKey::property("og:image"), image_url.clone()),
            (MetaKey::property("og:image:width"), "1200".to_string()),
            (MetaKey::property("og:image:height"), "630".to_string()),
            (
                MetaKey::property("og:image:alt"),
                format!("Tarjeta digital de {}", name),
            ),
            (MetaKey::name("twitter:card"), "summary_large_image".to_string()),
            (MetaKey::name("twitter:title"), title.clone()),
            (MetaKey::name("twitter:description"), description.clone()),
            (MetaKey::name("twitter:image"), image_url.clone()),
        ];

        Self {
            title,
            description,
            canonical_url: canonical_url.to_string(),
            image_url,
            keywords,
            tags,
        }
    }
}

/// `"{name} - {job title}"`, or just the name, with variant decoration
pub fn page_title(card: &DigitalCard, variant: CardVariant) -> String {
    let name = card.name().unwrap_or(variant.fallback_name());
    let base = match card.job_title() {
        Some(title) => format!("{} - {}", name, title),
        None => name.to_string(),
    };
    variant.decorate_title(&base)
}

/// The card's "about" text, or a generated sentence
pub fn page_description(card: &DigitalCard, variant: CardVariant) -> String {
    let name = card.name().unwrap_or(variant.fallback_name());
    match (variant, card.about()) {
        (CardVariant::Futuristic, Some(about)) => {
            format!("Tarjeta digital futurista de {} - {}", name, about)
        }
        (CardVariant::Futuristic, None) => {
            format!("Experiencia futurista de la tarjeta digital de {}", name)
        }
        (_, Some(about)) => about.to_string(),
        (_, None) => format!("Tarjeta digital de {}", name),
    }
}

/// Absolute image URL for social previews.
///
/// Absolute photo URLs are used as-is; relative paths are resolved against
/// the asset host; anything else falls back to the default image.
pub fn resolve_image_url(photo: Option<&str>, config: &SiteConfig) -> String {
    let Some(photo) = photo else {
        return config.default_image_url();
    };
    if photo.starts_with("http://") || photo.starts_with("https://") {
        return photo.to_string();
    }
    if photo.starts_with("data:") || photo.starts_with("blob:") {
        return config.default_image_url();
    }

    let base = format!("{}/", config.asset_host.trim_end_matches('/'));
    match Url::parse(&base).and_then(|base| base.join(photo.trim_start_matches('/'))) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => url.to_string(),
        Ok(url) => {
            tracing::warn!(photo, scheme = url.scheme(), "unsupported photo scheme, using default image");
            config.default_image_url()
        }
        Err(e) => {
            tracing::warn!(photo, error = %e, "cannot resolve photo url, using default image");
            config.default_image_url()
        }
    }
}

fn keywords(card: &DigitalCard, variant: CardVariant) -> Vec<String> {
    let mut keywords: Vec<String> = variant
        .base_keywords()
        .iter()
        .map(|k| k.to_string())
        .collect();
    let personal = [card.name(), card.job_title(), card.location()];
    for value in personal.into_iter().flatten() {
        keywords.push(value.to_lowercase());
    }
    for skill in card.skills() {
        let skill = skill.to_lowercase();
        if !keywords.contains(&skill) {
            keywords.push(skill);
        }
    }
    keywords
}
