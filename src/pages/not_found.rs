use dioxus::prelude::*;

use crate::app::Route;

#[component]
pub fn NotFoundPage(segments: Vec<String>) -> Element {
    let path = segments.join("/");

    rsx! {
        main { class: "card-missing",
            h1 { class: "page-title", "Página no encontrada" }
            p { class: "body-text", "/{path}" }
            Link { class: "btn-secondary", to: Route::Landing {}, "Volver al inicio" }
        }
    }
}
