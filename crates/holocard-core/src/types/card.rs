//! Digital Card Type - the business card record served by the card API
//!
//! A card carries three optional sections (personal, contact, about) plus
//! visibility flags. Every section may be missing or partially filled, so
//! accessors return `Option<&str>` with blank strings folded into `None`.

use serde::{Deserialize, Serialize};

use crate::error::{CardError, CardResult};

/// The API sends `null` for unset fields; read it like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// A digital business card as returned by `GET /cards/{slug}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DigitalCard {
    pub id: u64,

    #[serde(default)]
    pub user_id: Option<u64>,

    /// URL-safe identifier used in public routes
    #[serde(default, deserialize_with = "null_as_default")]
    pub slug: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub is_active: bool,

    #[serde(default, deserialize_with = "null_as_default")]
    pub is_public: bool,

    #[serde(default)]
    pub personal_info: Option<PersonalInfo>,

    #[serde(default)]
    pub contact_info: Option<ContactInfo>,

    #[serde(default)]
    pub about_info: Option<AboutInfo>,

    #[serde(default)]
    pub created_at: Option<String>,

    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Name, job title, location and photo
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonalInfo {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    /// Absolute URL or a path relative to the API asset host
    #[serde(default)]
    pub photo: Option<String>,
}

/// Contact channels; every field is optional on the API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub twitter: Option<String>,
    #[serde(default)]
    pub instagram: Option<String>,
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub youtube: Option<String>,
    #[serde(default)]
    pub tiktok: Option<String>,
    #[serde(default)]
    pub whatsapp: Option<String>,
    #[serde(default)]
    pub facebook: Option<String>,
}

/// Free-text biography, skills and years of experience
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AboutInfo {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience: Option<u32>,
}

/// Social network a contact link belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocialNetwork {
    LinkedIn,
    Website,
    Twitter,
    Instagram,
    GitHub,
    YouTube,
    TikTok,
    WhatsApp,
    Facebook,
}

impl SocialNetwork {
    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            SocialNetwork::LinkedIn => "LinkedIn",
            SocialNetwork::Website => "Sitio web",
            SocialNetwork::Twitter => "Twitter",
            SocialNetwork::Instagram => "Instagram",
            SocialNetwork::GitHub => "GitHub",
            SocialNetwork::YouTube => "YouTube",
            SocialNetwork::TikTok => "TikTok",
            SocialNetwork::WhatsApp => "WhatsApp",
            SocialNetwork::Facebook => "Facebook",
        }
    }
}

/// API envelope for a single card: `{ "data": DigitalCard }`
#[derive(Debug, Clone, Deserialize)]
pub struct CardResponse {
    #[serde(default)]
    pub data: Option<DigitalCard>,
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|s| s.trim()).filter(|s| !s.is_empty())
}

impl DigitalCard {
    /// Create an active, public card with just a slug and a name
    pub fn new(id: u64, slug: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            user_id: None,
            slug: slug.into(),
            is_active: true,
            is_public: true,
            personal_info: Some(PersonalInfo {
                name: name.into(),
                ..Default::default()
            }),
            contact_info: None,
            about_info: None,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.personal_info
            .as_ref()
            .map(|p| p.name.trim())
            .filter(|s| !s.is_empty())
    }

    pub fn job_title(&self) -> Option<&str> {
        self.personal_info.as_ref().and_then(|p| non_blank(p.title.as_ref()))
    }

    pub fn location(&self) -> Option<&str> {
        self.personal_info
            .as_ref()
            .and_then(|p| non_blank(p.location.as_ref()))
    }

    pub fn photo(&self) -> Option<&str> {
        self.personal_info.as_ref().and_then(|p| non_blank(p.photo.as_ref()))
    }

    pub fn about(&self) -> Option<&str> {
        self.about_info
            .as_ref()
            .and_then(|a| non_blank(a.description.as_ref()))
    }

    pub fn email(&self) -> Option<&str> {
        self.contact_info.as_ref().and_then(|c| non_blank(c.email.as_ref()))
    }

    pub fn phone(&self) -> Option<&str> {
        self.contact_info.as_ref().and_then(|c| non_blank(c.phone.as_ref()))
    }

    /// Non-blank skills in API order
    pub fn skills(&self) -> Vec<&str> {
        self.about_info
            .as_ref()
            .map(|a| {
                a.skills
                    .iter()
                    .map(|s| s.trim())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// All filled-in social links, in a stable display order
    pub fn social_links(&self) -> Vec<(SocialNetwork, &str)> {
        let Some(c) = self.contact_info.as_ref() else {
            return Vec::new();
        };
        [
            (SocialNetwork::LinkedIn, c.linkedin.as_ref()),
            (SocialNetwork::Website, c.website.as_ref()),
            (SocialNetwork::Twitter, c.twitter.as_ref()),
            (SocialNetwork::Instagram, c.instagram.as_ref()),
            (SocialNetwork::GitHub, c.github.as_ref()),
            (SocialNetwork::YouTube, c.youtube.as_ref()),
            (SocialNetwork::TikTok, c.tiktok.as_ref()),
            (SocialNetwork::WhatsApp, c.whatsapp.as_ref()),
            (SocialNetwork::Facebook, c.facebook.as_ref()),
        ]
        .into_iter()
        .filter_map(|(network, value)| non_blank(value).map(|v| (network, v)))
        .collect()
    }

    /// Check the card may be shown on a public page.
    ///
    /// Requires a slug, `is_active && is_public`, and a non-blank name.
    pub fn ensure_publicly_viewable(&self) -> CardResult<()> {
        if self.slug.trim().is_empty() {
            return Err(CardError::CardNotPublic("card has no slug".to_string()));
        }
        if !self.is_active || !self.is_public {
            return Err(CardError::CardNotPublic(self.slug.clone()));
        }
        if self.name().is_none() {
            return Err(CardError::CardNotPublic(format!(
                "{} has no name",
                self.slug
            )));
        }
        Ok(())
    }
}
