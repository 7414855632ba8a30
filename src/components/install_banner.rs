//! Install affordance: the banner offering to install and the dialog that
//! stands in for the platform prompt.

use dioxus::prelude::*;
use holocard_core::{InstallOutcome, InstallState};
use tokio::sync::oneshot;

use crate::context::use_install;

/// Banner shown while the tracker says the affordance may be offered
#[component]
pub fn InstallBanner() -> Element {
    let install = use_install();
    let status = (install.status)();

    let start_install = move |_| {
        spawn(async move {
            let shared = install.tracker.read().clone();
            let handle = {
                let mut guard = shared.lock().await;
                let Some(ref mut tracker) = *guard else {
                    return;
                };
                match tracker.begin_prompt() {
                    Ok(handle) => handle,
                    Err(e) => {
                        tracing::warn!(error = %e, "install prompt unavailable");
                        install.sync_from(tracker);
                        return;
                    }
                }
            };

            let mut dialog_open = install.dialog_open;
            dialog_open.set(true);
            let result = handle.prompt().await;

            let mut guard = shared.lock().await;
            if let Some(ref mut tracker) = *guard {
                if tracker.complete_prompt(result) {
                    tracing::info!("card app installed");
                }
                install.sync_from(tracker);
            }
        });
    };

    let dismiss = move |_| {
        spawn(async move {
            let shared = install.tracker.read().clone();
            let mut guard = shared.lock().await;
            if let Some(ref mut tracker) = *guard {
                tracker.dismiss();
                install.sync_from(tracker);
            }
        });
    };

    match status {
        Some(status) if status.state == InstallState::Installed => rsx! {
            p { class: "install-note", "Tarjeta instalada" }
        },
        _ if (install.promptable)() => rsx! {
            aside { class: "install-banner",
                div { class: "install-banner__text",
                    strong { "Instala esta tarjeta" }
                    span { "Accede a ella sin conexión y desde tu escritorio." }
                }
                div { class: "install-banner__actions",
                    button { class: "btn-primary", onclick: start_install, "Instalar" }
                    button { class: "btn-ghost", onclick: dismiss, "Ahora no" }
                }
            }
        },
        _ => rsx! {},
    }
}

fn respond(
    mut answer: Signal<Option<oneshot::Sender<InstallOutcome>>>,
    mut dialog_open: Signal<bool>,
    outcome: InstallOutcome,
) {
    if let Some(sender) = answer.write().take() {
        if sender.send(outcome).is_err() {
            tracing::debug!("install prompt no longer waiting");
        }
    }
    dialog_open.set(false);
}

/// Confirmation dialog answering the pending install prompt
#[component]
pub fn InstallDialog() -> Element {
    let install = use_install();
    let answer = install.answer;
    let dialog_open = install.dialog_open;

    if !dialog_open() {
        return rsx! {};
    }

    rsx! {
        div { class: "modal-overlay",
            div { class: "modal-content",
                h2 { class: "modal-title", "¿Instalar HoloCard?" }
                p { class: "body-text",
                    "La tarjeta se abrirá como una aplicación independiente."
                }
                div { class: "modal-actions",
                    button {
                        class: "btn-primary",
                        onclick: move |_| respond(answer, dialog_open, InstallOutcome::Accepted),
                        "Instalar"
                    }
                    button {
                        class: "btn-ghost",
                        onclick: move |_| respond(answer, dialog_open, InstallOutcome::Dismissed),
                        "Cancelar"
                    }
                }
            }
        }
    }
}
