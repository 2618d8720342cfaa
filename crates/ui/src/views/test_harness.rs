use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use quiz_core::{ConfigIssue, QuizConfig};
use services::{QuestionBank, QuizFlow};

use crate::context::{UiApp, build_app_context};
use crate::views::screen::QuizTestHandles;
use crate::views::{QuizIntent, QuizScreen};

#[derive(Clone)]
struct TestApp {
    config: Arc<QuizConfig>,
    bank: Arc<dyn QuestionBank>,
    issues: Vec<ConfigIssue>,
}

impl UiApp for TestApp {
    fn config(&self) -> Arc<QuizConfig> {
        Arc::clone(&self.config)
    }

    fn question_bank(&self) -> Arc<dyn QuestionBank> {
        Arc::clone(&self.bank)
    }

    fn config_issues(&self) -> Vec<ConfigIssue> {
        self.issues.clone()
    }
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    handles: QuizTestHandles,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewHarnessRoot(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.handles.clone());
    rsx! { QuizScreen {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    handles: QuizTestHandles,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Move the paused clock forward one second at a time, driving the dom
    /// after each step.
    pub async fn advance_secs(&mut self, secs: u32) {
        for _ in 0..secs {
            tokio::time::advance(std::time::Duration::from_secs(1)).await;
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }

    pub fn dispatch(&mut self, intent: QuizIntent) {
        let dispatch = self.handles.dispatch();
        self.dom.in_runtime(|| dispatch.call(intent));
        drive_dom(&mut self.dom);
    }

    /// Read the flow without subscribing anything to it.
    pub fn with_flow<T>(&self, f: impl FnOnce(&QuizFlow) -> T) -> T {
        let flow = self.handles.flow();
        self.dom.in_runtime(|| f(&flow.peek()))
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(
    config: QuizConfig,
    bank: Arc<dyn QuestionBank>,
    issues: Vec<ConfigIssue>,
) -> ViewHarness {
    let app = Arc::new(TestApp {
        config: Arc::new(config),
        bank,
        issues,
    });
    let handles = QuizTestHandles::default();
    let dom = VirtualDom::new_with_props(
        ViewHarnessRoot,
        ViewHarnessProps {
            app,
            handles: handles.clone(),
        },
    );

    let mut harness = ViewHarness { dom, handles };
    harness.rebuild();
    harness
}
