use dioxus::prelude::*;

use crate::views::QuizIntent;
use crate::vm::HomeVm;

#[component]
pub fn HomeView(
    vm: HomeVm,
    draft: String,
    error: Option<String>,
    on_intent: EventHandler<QuizIntent>,
) -> Element {
    let mut player_id = use_signal(|| draft.clone());
    let submit = move || on_intent.call(QuizIntent::Start(player_id()));

    rsx! {
        div { class: "page home-page",
            h1 { class: "game-title", "Quiz Challenge" }

            section { class: "card rules",
                h3 { "Rules" }
                ul { class: "rules-list",
                    for rule in vm.rules.iter() {
                        li { "{rule}" }
                    }
                    li { class: "time-limit-rule",
                        strong { "{vm.time_rule}" }
                        if let Some(note) = vm.time_note {
                            br {}
                            span { class: "time-limit-note", "{note}" }
                        }
                    }
                }
            }

            if !vm.warnings.is_empty() {
                ul { class: "config-warnings",
                    for warning in vm.warnings.iter() {
                        li { class: "config-warning", "{warning}" }
                    }
                }
            }

            div { class: "start-form",
                label { class: "input-label", r#for: "player-id", "Enter your ID" }
                input {
                    class: "input input-large",
                    id: "player-id",
                    r#type: "text",
                    placeholder: "Your ID",
                    autofocus: true,
                    value: "{player_id}",
                    oninput: move |evt| player_id.set(evt.value()),
                    onkeydown: move |evt: KeyboardEvent| {
                        if evt.data.key() == Key::Enter {
                            evt.prevent_default();
                            submit();
                        }
                    },
                }
                if let Some(message) = error {
                    p { class: "error-message", "{message}" }
                }
                button {
                    class: "btn btn-primary btn-large",
                    id: "start-quiz",
                    r#type: "button",
                    onclick: move |_| submit(),
                    "Start"
                }
            }

            p { class: "info-text", "Your result is recorded by the quiz server." }
        }
    }
}
