use dioxus::prelude::*;

/// Dismissible message shown over the current screen.
#[component]
pub fn ErrorOverlay(message: String, on_dismiss: EventHandler<()>) -> Element {
    rsx! {
        div { class: "error-overlay",
            div {
                class: "error-modal",
                role: "alertdialog",
                aria_modal: "true",
                p { class: "error-modal__message", "{message}" }
                button {
                    class: "btn btn-primary",
                    id: "dismiss-error",
                    r#type: "button",
                    onclick: move |_| on_dismiss.call(()),
                    "OK"
                }
            }
        }
    }
}
