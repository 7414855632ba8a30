//! Landing page - open a card by slug.
//!
//! A card passed with `--slug` on the command line opens immediately.

use dioxus::prelude::*;
use holocard_core::CardVariant;

use crate::app::Route;
use crate::components::InstallBanner;
use crate::context::use_services;

#[component]
pub fn Landing() -> Element {
    let navigator = use_navigator();
    let services = use_services();
    let mut slug = use_signal(String::new);
    let mut variant = use_signal(CardVariant::default);

    let mut initial_slug = services.initial_slug;
    use_effect(move || {
        if let Some(initial) = initial_slug.write().take() {
            tracing::info!(slug = %initial, "opening startup card");
            navigator.push(Route::card(CardVariant::Classic, initial));
        }
    });

    let open_card = move |evt: FormEvent| {
        evt.prevent_default();
        let value = slug().trim().to_string();
        if !value.is_empty() {
            navigator.push(Route::card(variant(), value));
        }
    };

    rsx! {
        main { class: "landing",
            header { class: "landing-header",
                h1 { class: "page-title", "HoloCard" }
                p { class: "tagline", "Tarjetas digitales profesionales" }
            }

            form { class: "slug-form", onsubmit: open_card,
                input {
                    class: "slug-input",
                    r#type: "text",
                    placeholder: "ana-ruiz",
                    value: "{slug}",
                    oninput: move |evt| slug.set(evt.value()),
                }
                select {
                    class: "variant-select",
                    onchange: move |evt| {
                        if let Ok(parsed) = evt.value().parse::<CardVariant>() {
                            variant.set(parsed);
                        }
                    },
                    for option_variant in CardVariant::ALL {
                        option {
                            key: "{option_variant}",
                            value: "{option_variant}",
                            selected: option_variant == variant(),
                            "{option_variant}"
                        }
                    }
                }
                button { class: "btn-primary", r#type: "submit", "Ver tarjeta" }
            }

            InstallBanner {}
        }
    }
}
