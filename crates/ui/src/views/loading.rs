use dioxus::prelude::*;

#[component]
pub fn LoadingView(message: &'static str) -> Element {
    rsx! {
        div { class: "page loading-page",
            div { class: "spinner" }
            p { class: "loading-text", "{message}" }
        }
    }
}
