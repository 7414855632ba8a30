//! QR code linking to a card's public URL.

use dioxus::prelude::*;
use qrcode::render::svg;
use qrcode::QrCode;

/// Render `data` as an SVG QR code.
///
/// The width/height attributes are stripped so CSS controls the display
/// size; `size` only sets the minimum render resolution.
pub fn qr_svg(data: &str, size: u32, color: &str) -> Option<String> {
    match QrCode::new(data.as_bytes()) {
        Ok(code) => {
            let rendered = code
                .render()
                .min_dimensions(size, size)
                .dark_color(svg::Color(color))
                .light_color(svg::Color("transparent"))
                .build();
            Some(rendered.replace(&format!("width=\"{}\" height=\"{}\" ", size, size), ""))
        }
        Err(e) => {
            tracing::error!(error = ?e, "failed to generate QR code");
            None
        }
    }
}

#[component]
pub fn CardQr(
    /// URL to encode
    data: String,
    #[props(default = 160)]
    size: u32,
    #[props(default = "#00ffff".to_string())]
    color: String,
) -> Element {
    let svg = use_memo(move || qr_svg(&data, size, &color));

    rsx! {
        match svg() {
            Some(svg) => rsx! {
                div { class: "card-qr", dangerous_inner_html: "{svg}" }
            },
            None => rsx! {
                div { class: "qr-error", "No se pudo generar el código QR" }
            },
        }
    }
}
