use dioxus::prelude::*;

use crate::views::QuizIntent;
use crate::vm::ResultVm;

#[component]
pub fn ResultView(vm: ResultVm, on_intent: EventHandler<QuizIntent>) -> Element {
    let badge_class = if vm.passed {
        "result-badge success"
    } else {
        "result-badge fail"
    };
    let time_class = if vm.overtime {
        "detail-value overtime"
    } else {
        "detail-value"
    };

    rsx! {
        div { class: "page result-page",
            div { class: "{badge_class}", "{vm.badge}" }

            div { class: "card result-card",
                h2 { class: "result-title", "Your score" }
                div { class: "score-display",
                    div { class: "score-number", "{vm.score_label}" }
                    div { class: "score-percentage", "{vm.percentage_label}" }
                }

                div { class: "result-details",
                    DetailRow { label: "Correct", value: format!("{}", vm.correct), class: "detail-value correct" }
                    DetailRow { label: "Wrong", value: format!("{}", vm.wrong), class: "detail-value wrong" }
                    DetailRow { label: "Pass mark", value: format!("{}", vm.threshold), class: "detail-value" }
                    DetailRow { label: vm.time_caption, value: vm.time_label.clone(), class: time_class }
                }

                if vm.passed {
                    div { class: "success-message",
                        p { "Well done, you cleared the challenge." }
                        if vm.first_pass {
                            p { class: "first-pass-note", "This is your first clear!" }
                        }
                    }
                } else {
                    div { class: "fail-message",
                        p { "So close!" }
                        p { "You need {vm.threshold} correct answers to pass." }
                    }
                }
            }

            button {
                class: "btn btn-primary btn-large",
                id: "play-again",
                r#type: "button",
                onclick: move |_| on_intent.call(QuizIntent::Restart),
                "Play again"
            }
        }
    }
}

#[component]
fn DetailRow(label: &'static str, value: String, class: &'static str) -> Element {
    rsx! {
        div { class: "detail-item",
            span { class: "detail-label", "{label}" }
            span { class: "{class}", "{value}" }
        }
    }
}
