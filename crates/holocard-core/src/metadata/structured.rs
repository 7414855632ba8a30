//! schema.org `Person` record for a card (JSON-LD).

use serde_json::{json, Map, Value};

use super::seo::PageMetadata;
use crate::types::{CardVariant, DigitalCard};

/// Build the structured-data record, with empty values pruned
pub fn person_record(card: &DigitalCard, variant: CardVariant, page: &PageMetadata) -> Value {
    let same_as: Vec<&str> = card
        .social_links()
        .into_iter()
        .map(|(_, url)| url)
        .filter(|url| url.starts_with("http://") || url.starts_with("https://"))
        .collect();

    let contact_point = if card.email().is_some() || card.phone().is_some() {
        json!({
            "@type": "ContactPoint",
            "email": card.email(),
            "telephone": card.phone(),
            "contactType": "personal",
        })
    } else {
        Value::Null
    };

    let record = json!({
        "@context": "https://schema.org",
        "@type": "Person",
        "name": card.name().unwrap_or(variant.fallback_name()),
        "jobTitle": card.job_title(),
        "description": page.description,
        "url": page.canonical_url,
        "image": page.image_url,
        "email": card.email(),
        "telephone": card.phone(),
        "address": {
            "@type": "PostalAddress",
            "addressLocality": card.location(),
        },
        "sameAs": same_as,
        "knowsAbout": card.skills(),
        "contactPoint": contact_point,
    });

    prune(record).unwrap_or_default()
}

/// Drop nulls, blank strings, empty arrays, and objects left holding only
/// `@`-prefixed keys. Returns `None` if nothing remains.
pub fn prune(value: Value) -> Option<Value> {
    match value {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::Array(items) => {
            let kept: Vec<Value> = items.into_iter().filter_map(prune).collect();
            (!kept.is_empty()).then_some(Value::Array(kept))
        }
        Value::Object(map) => {
            let kept: Map<String, Value> = map
                .into_iter()
                .filter_map(|(k, v)| prune(v).map(|v| (k, v)))
                .collect();
            if kept.keys().all(|k| k.starts_with('@')) {
                None
            } else {
                Some(Value::Object(kept))
            }
        }
        other => Some(other),
    }
}
