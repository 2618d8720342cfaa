use dioxus::prelude::*;

use quiz_core::model::{GamePhase, OptionKey};
use services::{Advance, FlowError, QuizFlow, TrackerEvent};

use crate::context::AppContext;
use crate::views::{ErrorOverlay, HomeView, LoadingView, QuizView, ResultView};
use crate::vm::{HomeVm, QuizVm, ResultVm};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

/// Everything a view can ask the quiz to do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    Start(String),
    Select(OptionKey),
    Advance,
    Tick(TrackerEvent),
    DismissError,
    Restart,
}

/// Owns the quiz flow and renders the view for its current phase.
#[component]
pub fn QuizScreen() -> Element {
    let ctx = use_context::<AppContext>();
    let config = ctx.config();
    let quiz_loop = ctx.quiz_loop();

    let mut flow = use_signal(|| QuizFlow::new(ctx.config()));
    let mut inline_error = use_signal(|| None::<FlowError>);

    let dispatch = use_callback(move |intent: QuizIntent| match intent {
        QuizIntent::Start(raw) => {
            let started = flow.write().begin(&raw);
            match started {
                Ok(ticket) => {
                    inline_error.set(None);
                    let quiz_loop = quiz_loop.clone();
                    spawn(async move {
                        let outcome = quiz_loop.load(&ticket).await;
                        flow.write().apply_fetch(&ticket, outcome);
                    });
                }
                Err(err) => inline_error.set(Some(err)),
            }
        }
        QuizIntent::Select(key) => {
            if let Err(err) = flow.write().select_answer(key) {
                tracing::debug!(error = %err, "selection ignored");
            }
        }
        QuizIntent::Advance => {
            let step = flow.write().advance();
            match step {
                Ok(Advance::Next { .. }) => {}
                Ok(Advance::Submit(ticket)) => {
                    let quiz_loop = quiz_loop.clone();
                    spawn(async move {
                        let outcome = quiz_loop.submit(&ticket).await;
                        flow.write().apply_submit(&ticket, outcome);
                    });
                }
                Err(err) => tracing::debug!(error = %err, "advance ignored"),
            }
        }
        QuizIntent::Tick(event) => flow.write().record_tick(event),
        QuizIntent::DismissError => flow.write().dismiss_error(),
        QuizIntent::Restart => {
            inline_error.set(None);
            flow.write().restart();
        }
    });

    #[cfg(test)]
    {
        use_hook(|| {
            if let Some(handles) = try_consume_context::<QuizTestHandles>() {
                handles.register(dispatch, flow);
            }
        });
    }

    let flow_guard = flow.read();
    let overlay = flow_guard
        .error()
        .filter(|err| err.is_overlay())
        .map(FlowError::message);

    let body = match flow_guard.phase() {
        GamePhase::Idle => {
            let vm = HomeVm::new(&config, ctx.config_issues());
            let draft = flow_guard.player_id_draft().to_string();
            let error = inline_error.read().as_ref().map(FlowError::message);
            rsx! { HomeView { vm, draft, error, on_intent: dispatch } }
        }
        GamePhase::Loading => rsx! { LoadingView { message: "Loading questions..." } },
        GamePhase::Playing => match QuizVm::from_flow(&flow_guard) {
            Some(vm) => rsx! {
                QuizView {
                    vm,
                    limit_secs: config.time_limit_secs(),
                    elapsed_secs: flow_guard.elapsed_secs(),
                    on_intent: dispatch,
                }
            },
            None => rsx! { LoadingView { message: "Preparing questions..." } },
        },
        GamePhase::Submitting => rsx! { LoadingView { message: "Submitting answers..." } },
        GamePhase::Result => match flow_guard.result() {
            Some(result) => {
                let vm = ResultVm::new(result, config.pass_threshold());
                rsx! { ResultView { vm, on_intent: dispatch } }
            }
            None => rsx! {},
        },
    };

    rsx! {
        div { class: "quiz-screen",
            {body}
            if let Some(message) = overlay {
                ErrorOverlay {
                    message,
                    on_dismiss: move |()| dispatch.call(QuizIntent::DismissError),
                }
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct QuizTestHandles {
    dispatch: Rc<RefCell<Option<Callback<QuizIntent>>>>,
    flow: Rc<RefCell<Option<Signal<QuizFlow>>>>,
}

#[cfg(test)]
impl QuizTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<QuizIntent>, flow: Signal<QuizFlow>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.flow.borrow_mut() = Some(flow);
    }

    pub(crate) fn dispatch(&self) -> Callback<QuizIntent> {
        (*self.dispatch.borrow()).expect("quiz dispatch registered")
    }

    pub(crate) fn flow(&self) -> Signal<QuizFlow> {
        (*self.flow.borrow()).expect("quiz flow registered")
    }
}
