use dioxus::prelude::*;

/// Collapsible view of the head a card page published
#[component]
pub fn HeadPreview(html: String) -> Element {
    if html.is_empty() {
        return rsx! {};
    }

    rsx! {
        details { class: "head-preview",
            summary { "Metadatos publicados" }
            pre { class: "head-preview__html", "{html}" }
        }
    }
}
