//! Card View Component
//!
//! Renders a public digital card: header with photo, about section, skills,
//! contact actions, social links and a QR code to the card's public URL.

use dioxus::prelude::*;
use holocard_core::{CardVariant, DigitalCard};

use super::CardQr;

/// `tel:` target for a phone number, keeping only dialable characters
fn tel_href(phone: &str) -> String {
    let digits: String = phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect();
    format!("tel:{}", digits)
}

/// Initials shown when the card has no photo
fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

/// QR color per variant
fn qr_color(variant: CardVariant) -> &'static str {
    match variant {
        CardVariant::Classic => "#0a0a0a",
        CardVariant::Futuristic => "#00ffff",
        CardVariant::Tres => "#d4af37",
    }
}

#[component]
pub fn CardView(
    card: DigitalCard,
    variant: CardVariant,
    /// Public URL of this card, encoded in the QR code
    card_url: String,
    /// Absolute photo URL, empty when the card has none
    #[props(default)]
    photo_url: String,
) -> Element {
    let name = card.name().unwrap_or(variant.fallback_name()).to_string();
    let skills: Vec<String> = card.skills().into_iter().map(str::to_string).collect();
    let links: Vec<(String, String)> = card
        .social_links()
        .into_iter()
        .map(|(network, url)| (network.label().to_string(), url.to_string()))
        .collect();

    rsx! {
        article { class: "digital-card",
            header { class: "digital-card__header",
                if photo_url.is_empty() {
                    div { class: "digital-card__avatar digital-card__avatar--initials", "{initials(&name)}" }
                } else {
                    img { class: "digital-card__avatar", src: "{photo_url}", alt: "{name}" }
                }
                h1 { class: "digital-card__name", "{name}" }
                if let Some(title) = card.job_title() {
                    p { class: "digital-card__title", "{title}" }
                }
                if let Some(location) = card.location() {
                    p { class: "digital-card__location", "{location}" }
                }
            }

            if let Some(about) = card.about() {
                section { class: "digital-card__section",
                    h2 { class: "section-header", "Sobre mí" }
                    p { class: "body-text", "{about}" }
                }
            }

            if !skills.is_empty() {
                section { class: "digital-card__section",
                    h2 { class: "section-header", "Habilidades" }
                    ul { class: "skill-list",
                        for skill in skills {
                            li { key: "{skill}", class: "skill-chip", "{skill}" }
                        }
                    }
                }
            }

            section { class: "digital-card__actions",
                if let Some(email) = card.email() {
                    a { class: "btn-primary", href: "mailto:{email}", "Enviar email" }
                }
                if let Some(phone) = card.phone() {
                    a { class: "btn-secondary", href: "{tel_href(phone)}", "Llamar" }
                }
            }

            if !links.is_empty() {
                nav { class: "social-links",
                    for (label, url) in links {
                        a {
                            key: "{label}",
                            class: "social-link",
                            href: "{url}",
                            target: "_blank",
                            rel: "noopener noreferrer",
                            "{label}"
                        }
                    }
                }
            }

            footer { class: "digital-card__footer",
                CardQr { data: card_url.clone(), color: qr_color(variant).to_string() }
                p { class: "card-url", "{card_url}" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tel_href_strips_formatting() {
        assert_eq!(tel_href("+51 987 654 321"), "tel:+51987654321");
        assert_eq!(tel_href("(01) 555-1234"), "tel:015551234");
    }

    #[test]
    fn test_initials() {
        assert_eq!(initials("Ana Ruiz"), "AR");
        assert_eq!(initials("ana maría ruiz"), "AM");
        assert_eq!(initials(""), "");
    }
}
