use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use quiz_core::time::fixed_now;
use services::{Clock, QuizLoopService, QuizSettings};
use storage::repository::{QuestionBankRepository, Storage};
use storage::sample::sample_bank;

use crate::context::{UiApp, build_app_context};
use crate::views::QuizView;
use crate::views::quiz::QuizTestHandles;

#[derive(Clone)]
struct TestApp {
    quiz_loop: Arc<QuizLoopService>,
}

impl UiApp for TestApp {
    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
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

impl Eq for ViewHarnessProps {}

#[component]
fn QuizViewHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.handles.clone());
    rsx! { QuizView {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub handles: QuizTestHandles,
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

    /// Let pending tasks (the bank fetch) finish and re-render.
    pub async fn settle(&mut self) {
        for _ in 0..3 {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }

    /// Run a closure inside the dom's runtime, then flush the resulting updates.
    pub fn act<O>(&mut self, f: impl FnOnce(&QuizTestHandles) -> O) -> O {
        let handles = self.handles.clone();
        let out = self.dom.in_runtime(|| f(&handles));
        drive_dom(&mut self.dom);
        out
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn test_settings() -> QuizSettings {
    QuizSettings::default()
}

pub fn setup_view_harness() -> ViewHarness {
    setup_view_harness_with_bank(Storage::in_memory(sample_bank()).bank, test_settings())
}

pub fn setup_view_harness_with_bank(
    bank: Arc<dyn QuestionBankRepository>,
    settings: QuizSettings,
) -> ViewHarness {
    let quiz_loop = Arc::new(QuizLoopService::new(
        Clock::fixed(fixed_now()),
        bank,
        settings,
    ));
    let handles = QuizTestHandles::default();
    let dom = VirtualDom::new_with_props(
        QuizViewHarness,
        ViewHarnessProps {
            app: Arc::new(TestApp { quiz_loop }),
            handles: handles.clone(),
        },
    );
    ViewHarness { dom, handles }
}
