//! Publish / replace / retract against a shared head

use std::sync::Arc;

use holocard_core::metadata::{HeadSnapshot, STRUCTURED_DATA_ID};
use holocard_core::types::{AboutInfo, ContactInfo, PersonalInfo};
use holocard_core::{
    BlobRegistry, CardVariant, DigitalCard, HeadDocument, MemoryHead, MetaKey, SiteConfig,
    SiteMetadataPublisher,
};

type Publisher = SiteMetadataPublisher<MemoryHead, BlobRegistry>;

fn config() -> Arc<SiteConfig> {
    Arc::new(SiteConfig {
        site_url: "https://x".to_string(),
        asset_host: "https://api.x".to_string(),
        ..Default::default()
    })
}

fn publisher(variant: CardVariant, head: &MemoryHead, blobs: &BlobRegistry) -> Publisher {
    SiteMetadataPublisher::new(config(), variant, head.clone(), blobs.clone())
}

fn full_card(slug: &str, name: &str) -> DigitalCard {
    let mut card = DigitalCard::new(1, slug, name);
    card.personal_info = Some(PersonalInfo {
        name: name.to_string(),
        title: Some("Ingeniera de Software".to_string()),
        location: Some("Arequipa, Perú".to_string()),
        photo: Some("/storage/photos/profile.jpg".to_string()),
    });
    card.contact_info = Some(ContactInfo {
        email: Some(format!("{}@example.com", slug)),
        phone: Some("+51 999 111 222".to_string()),
        github: Some(format!("https://github.com/{}", slug)),
        ..Default::default()
    });
    card.about_info = Some(AboutInfo {
        description: Some(format!("Perfil profesional de {}", name)),
        skills: vec!["Rust".to_string(), "WebAssembly".to_string()],
        experience: Some(8),
    });
    card
}

fn structured(snapshot: &HeadSnapshot) -> serde_json::Value {
    let node = snapshot
        .scripts
        .iter()
        .find(|s| s.id == STRUCTURED_DATA_ID)
        .expect("structured data published");
    assert_eq!(node.mime, "application/ld+json");
    serde_json::from_str(&node.body).unwrap()
}

#[test]
fn test_publish_b_replaces_a() {
    let head = MemoryHead::new();
    let blobs = BlobRegistry::new("https://x");
    let mut publisher = publisher(CardVariant::Classic, &head, &blobs);

    let a_url = publisher
        .publish(&full_card("ana-ruiz", "Ana Ruiz"), "https://x/tarjeta/ana-ruiz")
        .manifest_url
        .clone()
        .unwrap();
    let b_url = publisher
        .publish(&full_card("beto-paz", "Beto Paz"), "https://x/tarjeta/beto-paz")
        .manifest_url
        .clone()
        .unwrap();

    let snapshot = head.snapshot();
    assert_eq!(snapshot.script_count(STRUCTURED_DATA_ID), 1);
    assert_eq!(structured(&snapshot)["name"], "Beto Paz");
    assert_eq!(snapshot.title, "Beto Paz - Ingeniera de Software");
    assert_eq!(snapshot.canonical.as_deref(), Some("https://x/tarjeta/beto-paz"));

    assert!(!blobs.is_live(&a_url));
    assert!(blobs.is_live(&b_url));
    assert_eq!(blobs.live_count(), 1);
    assert_eq!(snapshot.manifest.as_deref(), Some(b_url.as_str()));
}

#[test]
fn test_retract_leaves_nothing_behind() {
    let head = MemoryHead::new();
    let blobs = BlobRegistry::new("https://x");
    let mut publisher = publisher(CardVariant::Classic, &head, &blobs);

    publisher.publish(&full_card("ana-ruiz", "Ana Ruiz"), "https://x/tarjeta/ana-ruiz");
    publisher.retract();

    let snapshot = head.snapshot();
    assert_eq!(snapshot.script_count(STRUCTURED_DATA_ID), 0);
    assert_eq!(blobs.live_count(), 0);
    assert_eq!(snapshot.manifest.as_deref(), Some("/manifest.json"));
}

#[test]
fn test_retract_without_static_manifest_removes_link() {
    let head = MemoryHead::new();
    let blobs = BlobRegistry::new("https://x");
    let config = Arc::new(SiteConfig {
        static_manifest: None,
        ..Default::default()
    });
    let mut publisher =
        SiteMetadataPublisher::new(config, CardVariant::Tres, head.clone(), blobs.clone());

    publisher.publish(&DigitalCard::new(1, "a", "A"), "https://x/tres/a");
    assert!(head.manifest_href().is_some());
    publisher.retract();
    assert!(head.manifest_href().is_none());
}

#[test]
fn test_manifest_for_ana_ruiz() {
    let head = MemoryHead::new();
    let blobs = BlobRegistry::new("https://x");
    let mut publisher = publisher(CardVariant::Classic, &head, &blobs);

    let card = DigitalCard::new(1, "ana-ruiz", "Ana Ruiz");
    let url = publisher
        .publish(&card, "https://x/tarjeta/ana-ruiz")
        .manifest_url
        .clone()
        .unwrap();

    let (mime, bytes) = blobs.get(&url).unwrap();
    assert_eq!(mime, "application/manifest+json");
    let manifest: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(manifest["start_url"], "https://x/tarjeta/ana-ruiz");
    assert_eq!(manifest["short_name"], "Ana Ruiz");
    assert_eq!(manifest["display"], "standalone");
    assert_eq!(manifest["protocol_handlers"][0]["protocol"], "mailto");
}

#[test]
fn test_image_falls_back_to_default() {
    let head = MemoryHead::new();
    let blobs = BlobRegistry::new("https://x");
    let mut publisher = publisher(CardVariant::Classic, &head, &blobs);

    let published = publisher.publish(&DigitalCard::new(1, "a", "A"), "https://x/tarjeta/a");
    let expected = config().default_image_url();
    assert_eq!(published.page.image_url, expected);
    assert!(!expected.is_empty());
    assert_eq!(
        head.meta(&MetaKey::property("og:image")).as_deref(),
        Some(expected.as_str())
    );
    assert_eq!(
        head.meta(&MetaKey::name("twitter:image")).as_deref(),
        Some(expected.as_str())
    );
}

#[test]
fn test_relative_photo_resolved_against_asset_host() {
    let head = MemoryHead::new();
    let blobs = BlobRegistry::new("https://x");
    let mut publisher = publisher(CardVariant::Classic, &head, &blobs);

    publisher.publish(&full_card("ana-ruiz", "Ana Ruiz"), "https://x/tarjeta/ana-ruiz");
    assert_eq!(
        head.meta(&MetaKey::property("og:image")).as_deref(),
        Some("https://api.x/storage/photos/profile.jpg")
    );
    assert_eq!(
        structured(&head.snapshot())["image"],
        "https://api.x/storage/photos/profile.jpg"
    );
}

#[test]
fn test_repeated_publishes_one_tag_per_key() {
    let head = MemoryHead::new();
    let blobs = BlobRegistry::new("https://x");
    let mut publisher = publisher(CardVariant::Classic, &head, &blobs);

    for slug in ["a", "b", "c", "a"] {
        publisher.publish(&full_card(slug, slug), &format!("https://x/tarjeta/{}", slug));
    }

    let snapshot = head.snapshot();
    for (key, _) in &snapshot.metas {
        assert_eq!(snapshot.meta_count(key), 1, "duplicated {:?}", key);
    }
    assert_eq!(snapshot.script_count(STRUCTURED_DATA_ID), 1);
    assert_eq!(blobs.live_count(), 1);
}

#[test]
fn test_variants_share_one_structured_data_node() {
    let head = MemoryHead::new();
    let blobs = BlobRegistry::new("https://x");
    let mut classic = publisher(CardVariant::Classic, &head, &blobs);
    let mut futuristic = publisher(CardVariant::Futuristic, &head, &blobs);

    classic.publish(&full_card("ana-ruiz", "Ana Ruiz"), "https://x/tarjeta/ana-ruiz");
    futuristic.publish(&full_card("ana-ruiz", "Ana Ruiz"), "https://x/futuristic/ana-ruiz");

    let snapshot = head.snapshot();
    assert_eq!(snapshot.script_count(STRUCTURED_DATA_ID), 1);
    assert!(snapshot.title.starts_with("🚀 "));

    // The classic page is torn down after the futuristic one took over the
    // head: its retract must leave the newer metadata alone.
    classic.retract();
    let snapshot = head.snapshot();
    assert_eq!(snapshot.script_count(STRUCTURED_DATA_ID), 1);
    assert_eq!(
        snapshot.manifest.as_deref(),
        futuristic.manifest_handle()
    );
    assert_eq!(blobs.live_count(), 1);

    futuristic.retract();
    assert_eq!(head.snapshot().script_count(STRUCTURED_DATA_ID), 0);
    assert_eq!(blobs.live_count(), 0);
}

#[test]
fn test_structured_data_person_record() {
    let head = MemoryHead::new();
    let blobs = BlobRegistry::new("https://x");
    let mut publisher = publisher(CardVariant::Classic, &head, &blobs);
    publisher.publish(&full_card("ana-ruiz", "Ana Ruiz"), "https://x/tarjeta/ana-ruiz");

    let record = structured(&head.snapshot());
    assert_eq!(record["@context"], "https://schema.org");
    assert_eq!(record["@type"], "Person");
    assert_eq!(record["jobTitle"], "Ingeniera de Software");
    assert_eq!(record["address"]["addressLocality"], "Arequipa, Perú");
    assert_eq!(record["sameAs"][0], "https://github.com/ana-ruiz");
    assert_eq!(record["knowsAbout"], serde_json::json!(["Rust", "WebAssembly"]));
    assert_eq!(record["contactPoint"]["telephone"], "+51 999 111 222");
}
