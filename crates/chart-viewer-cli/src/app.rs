//! Terminal viewer state machine.
//!
//! One [`App`] per process. It owns the navigator (and through it the
//! session) and the chat panel of the current patient-data visit. Leaving
//! that screen drops the panel; an answer still in flight is then discarded.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{info, warn};

use chart_viewer_assistant::{AnswerBackend, AskOutcome, ChatBridge, ModelMode};
use chart_viewer_core::navigation::NavigationError;
use chart_viewer_core::screens::render;
use chart_viewer_core::{ChatTranscript, MenuEntry, Navigator, PatientId, RecordStore, Route, ScreenError};

use crate::commands::{parse, Command, Target, HELP};
use crate::view::{render_chat, render_menu, render_screen};

pub const LOGIN_PROMPT: &str = "Enter Patient ID (or `quit`):";

/// Background answer of a submitted question.
pub type PendingAnswer = JoinHandle<Option<AskOutcome>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Result of handling one input line.
pub struct Step {
    pub output: String,
    pub flow: Flow,
    /// Set when a question was submitted.
    pub pending: Option<PendingAnswer>,
}

impl Step {
    fn show(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            flow: Flow::Continue,
            pending: None,
        }
    }
}

struct ChatPanel<B> {
    bridge: Arc<ChatBridge<B>>,
    transcript: ChatTranscript,
}

impl<B: AnswerBackend> ChatPanel<B> {
    fn new(backend: Arc<B>) -> Self {
        Self {
            bridge: Arc::new(ChatBridge::new(backend)),
            transcript: ChatTranscript::new(),
        }
    }

    fn sync(&mut self) {
        self.transcript.sync(&self.bridge.log());
    }
}

pub struct App<'a, B> {
    nav: Navigator<'a>,
    backend: Arc<B>,
    mode: ModelMode,
    chat: Option<ChatPanel<B>>,
}

impl<'a, B: AnswerBackend + 'static> App<'a, B> {
    pub fn new(store: &'a RecordStore, backend: Arc<B>, mode: ModelMode) -> Self {
        Self {
            nav: Navigator::new(store),
            backend,
            mode,
            chat: None,
        }
    }

    pub fn route(&self) -> Route {
        self.nav.current()
    }

    pub fn mode(&self) -> ModelMode {
        self.mode
    }

    pub fn navigator(&self) -> &Navigator<'a> {
        &self.nav
    }

    pub fn prompt(&self) -> String {
        match self.nav.session().patient_id() {
            Some(id) => format!("[{} {}]> ", id, self.nav.current()),
            None => "> ".to_string(),
        }
    }

    /// Handle one line of user input.
    pub fn handle_line(&mut self, line: &str) -> Step {
        match parse(line, self.nav.current()) {
            Ok(Some(command)) => self.handle(command),
            Ok(None) => Step::show(""),
            Err(e) => Step::show(e.to_string()),
        }
    }

    pub fn handle(&mut self, command: Command) -> Step {
        match command {
            Command::Login(candidate) => Step::show(self.login(&candidate)),
            Command::Show => Step::show(self.screen()),
            Command::Menu => Step::show(render_menu(&self.nav.menu())),
            Command::Go(target) => Step::show(self.go(target)),
            Command::Home => Step::show(self.follow(MenuEntry::HOME)),
            Command::Logout => Step::show(self.follow(MenuEntry::LOGOUT)),
            Command::Ask(question) => self.ask(&question),
            Command::Mode(mode) => {
                self.mode = mode;
                Step::show(format!("Model: {} ({})", mode.label(), mode.model_name()))
            }
            Command::Think(n) => Step::show(self.toggle_reasoning(n)),
            Command::Chat => Step::show(self.chat_text()),
            Command::Help => Step::show(HELP),
            Command::Quit => Step {
                output: String::new(),
                flow: Flow::Quit,
                pending: None,
            },
        }
    }

    fn login(&mut self, candidate: &str) -> String {
        match self.nav.login(candidate) {
            Ok(patient_id) => {
                self.prepare(patient_id);
                self.entered();
                self.screen()
            }
            Err(e) => format!("{}\n{}", e, LOGIN_PROMPT),
        }
    }

    /// Fire-and-forget preparation request for the assistant.
    fn prepare(&self, patient_id: PatientId) {
        let backend = Arc::clone(&self.backend);
        tokio::spawn(async move {
            match backend.prepare(&patient_id).await {
                Ok(body) => info!(patient_id = %patient_id, response = %body, "Assistant prepared patient"),
                Err(e) => warn!(patient_id = %patient_id, error = %e, "Assistant preparation failed"),
            }
        });
    }

    fn go(&mut self, target: Target) -> String {
        match target {
            Target::Menu(n) => match n.checked_sub(1).and_then(|i| self.nav.menu().get(i).copied()) {
                Some(entry) => self.follow(entry),
                None => format!("No menu item {}", n),
            },
            Target::Path(path) => {
                let patient_id = self.nav.session().patient_id().cloned();
                match self.nav.navigate_path(&path, patient_id) {
                    Ok(_) => {
                        self.entered();
                        self.screen()
                    }
                    Err(e @ NavigationError::UnknownPath(_)) => e.to_string(),
                }
            }
        }
    }

    fn follow(&mut self, entry: MenuEntry) -> String {
        self.nav.select(entry);
        self.entered();
        self.screen()
    }

    /// Open or drop the chat panel for the screen just entered.
    fn entered(&mut self) {
        if self.nav.current() != Route::PatientData {
            self.chat = None;
        } else if self.chat.is_none() {
            self.chat = Some(ChatPanel::new(Arc::clone(&self.backend)));
        }
    }

    /// Draw the current screen.
    pub fn screen(&mut self) -> String {
        let Some((patient_id, record)) = self.nav.patient() else {
            return LOGIN_PROMPT.to_string();
        };
        let route = self.nav.current();

        match render(route, patient_id, record) {
            Ok(view) => {
                let mut out = render_screen(&view);
                if let Some(panel) = &mut self.chat {
                    panel.sync();
                    out.push('\n');
                    out.push_str(&render_chat(&panel.transcript, self.mode, panel.bridge.is_pending()));
                }
                out
            }
            Err(e @ ScreenError::MissingDemographics(_)) => {
                warn!(error = %e, "Cannot show patient, returning to login");
                self.nav.logout();
                self.chat = None;
                format!("{}\n{}", e, LOGIN_PROMPT)
            }
            Err(e @ ScreenError::NotAPatientScreen(_)) => format!("{}\n{}", e, LOGIN_PROMPT),
        }
    }

    fn ask(&mut self, question: &str) -> Step {
        let Some(patient_id) = self.nav.session().patient_id().cloned() else {
            return Step::show(LOGIN_PROMPT);
        };
        let Some(panel) = &mut self.chat else {
            return Step::show("The assistant is available on the patient information screen (`home`).");
        };

        match panel.bridge.submit(question, &patient_id, self.mode) {
            Ok(handle) => {
                panel.sync();
                Step {
                    output: render_chat(&panel.transcript, self.mode, true),
                    flow: Flow::Continue,
                    pending: Some(handle),
                }
            }
            Err(AskOutcome::Busy) => Step::show("Still waiting for the previous answer."),
            Err(_) => Step::show(""),
        }
    }

    fn toggle_reasoning(&mut self, n: usize) -> String {
        let Some(panel) = &mut self.chat else {
            return "No conversation on this screen.".to_string();
        };
        panel.sync();
        match n.checked_sub(1).and_then(|i| panel.transcript.toggle_reasoning(i)) {
            Some(_) => render_chat(&panel.transcript, self.mode, panel.bridge.is_pending()),
            None => format!("Message {} has no reasoning to show", n),
        }
    }

    /// Current conversation, or a hint when there is none.
    pub fn chat_text(&mut self) -> String {
        match &mut self.chat {
            Some(panel) => {
                panel.sync();
                render_chat(&panel.transcript, self.mode, panel.bridge.is_pending())
            }
            None => "No conversation on this screen.".to_string(),
        }
    }

    /// Output after a background answer settles; empty if it was discarded.
    pub fn answer_arrived(&mut self, outcome: Option<AskOutcome>) -> String {
        match outcome {
            Some(_) if self.chat.is_some() => self.chat_text(),
            _ => String::new(),
        }
    }
}
