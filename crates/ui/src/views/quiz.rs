use dioxus::document::eval;
use dioxus::prelude::*;

use quiz_core::avatar::avatar_urls;
use quiz_core::model::OptionKey;
use services::{ObserverSlot, Tracker};

use crate::views::QuizIntent;
use crate::vm::{OptionVm, QuizVm, TimerVm};

fn preload_avatars_script() -> String {
    let urls = avatar_urls();
    format!("{urls:?}.forEach((src) => {{ const img = new Image(); img.src = src; }});")
}

#[component]
pub fn QuizView(
    vm: QuizVm,
    limit_secs: u32,
    elapsed_secs: u32,
    on_intent: EventHandler<QuizIntent>,
) -> Element {
    // The tracker always reports to whatever is registered at tick time.
    let slot = use_hook(ObserverSlot::new);
    slot.register(move |event| on_intent.call(QuizIntent::Tick(event)));

    // Mounted once per stretch of play; remounting after a failed submit
    // resumes from the recorded elapsed time.
    let timer_slot = slot.clone();
    use_future(move || {
        Tracker::new(limit_secs, timer_slot.clone())
            .resuming_from(elapsed_secs)
            .run()
    });
    let drop_slot = slot.clone();
    use_drop(move || drop_slot.clear());

    use_hook(|| {
        let _ = eval(&preload_avatars_script());
    });
    use_effect(|| {
        let _ = eval("document.getElementById('quiz-root')?.focus();");
    });

    let on_key = move |evt: KeyboardEvent| match evt.data.key() {
        Key::Enter => {
            evt.prevent_default();
            on_intent.call(QuizIntent::Advance);
        }
        Key::Character(value) => {
            let mut chars = value.chars();
            let single = match (chars.next(), chars.next()) {
                (Some(c), None) => OptionKey::from_char(c),
                _ => None,
            };
            if let Some(key) = single {
                evt.prevent_default();
                on_intent.call(QuizIntent::Select(key));
            }
        }
        _ => {}
    };

    rsx! {
        div { class: "page quiz-page", id: "quiz-root", tabindex: "0", onkeydown: on_key,
            header { class: "quiz-header",
                TimerPanel { timer: vm.timer.clone() }
                div { class: "progress-container",
                    div { class: "progress-label", "Progress: {vm.progress_label}" }
                    div { class: "progress-bar",
                        div { class: "progress-fill", style: "width: {vm.progress_percent}%" }
                    }
                }
            }

            div { class: "quiz-content",
                div { class: "boss-avatar",
                    div { class: "avatar-frame",
                        img { src: "{vm.avatar_url}", alt: "Stage keeper {vm.stage}" }
                    }
                    div { class: "boss-number", "Stage {vm.stage}" }
                }

                div { class: "question-card",
                    div { class: "speech-bubble",
                        div { class: "question-text", "{vm.prompt}" }
                    }
                    div { class: "options-container",
                        for option in vm.options.iter().cloned() {
                            OptionButton { option, on_intent }
                        }
                    }
                }

                div { class: "quiz-actions",
                    button {
                        class: "btn btn-primary btn-large",
                        id: "quiz-advance",
                        r#type: "button",
                        disabled: !vm.can_advance,
                        onclick: move |_| on_intent.call(QuizIntent::Advance),
                        "{vm.advance_label}"
                    }
                }
            }
        }
    }
}

#[component]
fn TimerPanel(timer: TimerVm) -> Element {
    let value_class = if timer.overtime {
        "timer-value overtime"
    } else {
        "timer-value"
    };
    let fill_class = if timer.overtime {
        "timer-progress-fill overtime"
    } else {
        "timer-progress-fill"
    };

    rsx! {
        div { class: "timer-container",
            div { class: "timer-display",
                span { class: "timer-label", "{timer.caption}: " }
                span { class: "{value_class}", "{timer.value}" }
                if timer.overtime {
                    span { class: "overtime-badge", "Overtime" }
                }
            }
            if let Some(percent) = timer.progress_percent {
                div { class: "timer-progress-bar",
                    div { class: "{fill_class}", style: "width: {percent}%" }
                }
            }
        }
    }
}

#[component]
fn OptionButton(option: OptionVm, on_intent: EventHandler<QuizIntent>) -> Element {
    let class = if option.selected {
        "option-btn selected"
    } else {
        "option-btn"
    };
    let key = option.key;

    rsx! {
        button {
            class: "{class}",
            id: "option-{key}",
            r#type: "button",
            onclick: move |_| on_intent.call(QuizIntent::Select(key)),
            span { class: "option-key", "{key}." }
            " {option.text}"
        }
    }
}
