//! The chat view: transcript, drafts, session identifier and loading flag.
//!
//! [`ChatView`] is the whole state of the chat screen.  It is mutated only by
//! its two actions, joining a session and sending a message, plus the draft
//! setters a front end calls as the user types.  Every change that affects
//! what is on screen is pushed to a [`Renderer`].

use crate::chat::render::Renderer;
use crate::client::ChatBackend;
use crate::error::Result;
use crate::observability::{
    VIEW_JOINS, VIEW_RESETS, VIEW_SEND_FAILURES, VIEW_SENDS, VIEW_SESSIONS_ASSIGNED,
};
use crate::types::{ChatRequest, ChatResponse, Message, SessionId};

/// Assistant message shown whenever a send fails, whatever the cause.
pub const UNREACHABLE_SERVER_MESSAGE: &str =
    "Error: Unable to reach the server. Make sure FastAPI and Ollama are running.";

/// State of the chat screen.
pub struct ChatView<B: ChatBackend> {
    backend: B,
    session_id: SessionId,
    join_input: String,
    input: String,
    messages: Vec<Message>,
    loading: bool,
    // Session the in-flight request was sent with.
    pending: Option<SessionId>,
}

impl<B: ChatBackend> ChatView<B> {
    /// Creates an empty view with no session.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            session_id: SessionId::NEW,
            join_input: String::new(),
            input: String::new(),
            messages: Vec::new(),
            loading: false,
            pending: None,
        }
    }

    /// Returns the backend messages are sent to.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Returns the current session identifier.
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// Returns the transcript, oldest first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Returns true if the transcript is empty.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Returns true while a request is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Returns the message draft.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Replaces the message draft.
    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    /// Returns the session-id draft.
    pub fn join_input(&self) -> &str {
        &self.join_input
    }

    /// Replaces the session-id draft.
    pub fn set_join_input(&mut self, join_input: impl Into<String>) {
        self.join_input = join_input.into();
    }

    /// Label describing the current session.
    pub fn session_label(&self) -> String {
        if self.session_id.is_new() {
            "New Session".to_string()
        } else {
            format!("Session ID: {}", self.session_id)
        }
    }

    /// Label for the join control: it joins when an id has been typed and resets otherwise.
    pub fn join_button_label(&self) -> &'static str {
        if self.join_input.is_empty() {
            "Reset"
        } else {
            "Join"
        }
    }

    /// Returns true if submitting the message draft would send it.
    pub fn can_send(&self) -> bool {
        !self.loading && !self.input.trim().is_empty()
    }

    /// Joins the session named by the session-id draft.
    pub fn submit_join(&mut self, renderer: &mut dyn Renderer) -> SessionId {
        let input = self.join_input.clone();
        self.join(&input, renderer)
    }

    /// Joins the session named by `input_text`, or starts over.
    ///
    /// A positive integer becomes the session identifier.  Anything else
    /// resets to a new session.  The transcript is cleared either way and no
    /// request is made; the server's history for the session is not fetched.
    pub fn join(&mut self, input_text: &str, renderer: &mut dyn Renderer) -> SessionId {
        self.session_id = SessionId::parse_join(input_text);
        self.messages.clear();
        if self.session_id.is_new() {
            VIEW_RESETS.click();
        } else {
            VIEW_JOINS.click();
        }
        renderer.print_session(&self.session_label());
        renderer.print_welcome();
        self.session_id
    }

    /// Sends the message draft.
    pub async fn submit_message(&mut self, renderer: &mut dyn Renderer) -> bool {
        let input = self.input.clone();
        self.send_message(&input, renderer).await
    }

    /// Sends `text` to the backend and records the reply.
    ///
    /// Returns false without doing anything if `text` is blank or a request is
    /// already in flight.  Failures never escape: they become an assistant
    /// message reading [`UNREACHABLE_SERVER_MESSAGE`].
    pub async fn send_message(&mut self, text: &str, renderer: &mut dyn Renderer) -> bool {
        let Some(request) = self.begin_send(text, renderer) else {
            return false;
        };
        let outcome = self.backend.chat(&request).await;
        self.complete_send(outcome, renderer);
        true
    }

    /// First half of a send: record the user message and mark the view loading.
    ///
    /// Returns the request to issue, or `None` if there is nothing to send.
    pub fn begin_send(&mut self, text: &str, renderer: &mut dyn Renderer) -> Option<ChatRequest> {
        if self.loading {
            return None;
        }
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        VIEW_SENDS.click();
        self.input.clear();
        self.push_message(Message::user(text), renderer);
        self.loading = true;
        self.pending = Some(self.session_id);
        renderer.start_loading();
        Some(ChatRequest::new(self.session_id, text))
    }

    /// Second half of a send: apply the backend's answer and clear loading.
    pub fn complete_send(&mut self, outcome: Result<ChatResponse>, renderer: &mut dyn Renderer) {
        let sent_with = self.pending.take().unwrap_or(self.session_id);
        match outcome {
            Ok(response) => {
                if sent_with.is_new() && !response.session_id.is_new() {
                    VIEW_SESSIONS_ASSIGNED.click();
                    self.session_id = response.session_id;
                    renderer.print_session(&self.session_label());
                }
                self.push_message(Message::assistant(response.response), renderer);
            }
            Err(err) => {
                VIEW_SEND_FAILURES.click();
                renderer.print_error(&err.to_string());
                self.push_message(Message::assistant(UNREACHABLE_SERVER_MESSAGE), renderer);
            }
        }
        self.loading = false;
        renderer.finish_loading();
    }

    fn push_message(&mut self, message: Message, renderer: &mut dyn Renderer) {
        renderer.print_message(&message);
        self.messages.push(message);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::error::Error;
    use crate::types::Role;

    type EventLog = Arc<Mutex<Vec<String>>>;

    struct FakeBackend {
        reply: Result<ChatResponse>,
        requests: Mutex<Vec<ChatRequest>>,
        log: EventLog,
    }

    impl FakeBackend {
        fn replying(reply: Result<ChatResponse>, log: EventLog) -> Self {
            Self {
                reply,
                requests: Mutex::new(Vec::new()),
                log,
            }
        }

        fn request_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    #[async_trait::async_trait]
    impl ChatBackend for FakeBackend {
        async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
            self.log
                .lock()
                .unwrap()
                .push(format!("request:{}:{}", request.session_id, request.message));
            self.requests.lock().unwrap().push(request.clone());
            self.reply.clone()
        }
    }

    struct RecordingRenderer {
        log: EventLog,
    }

    impl Renderer for RecordingRenderer {
        fn print_message(&mut self, message: &Message) {
            self.log
                .lock()
                .unwrap()
                .push(format!("{}:{}", message.role, message.content));
        }

        fn start_loading(&mut self) {
            self.log.lock().unwrap().push("loading".to_string());
        }

        fn finish_loading(&mut self) {
            self.log.lock().unwrap().push("loaded".to_string());
        }

        fn print_session(&mut self, label: &str) {
            self.log.lock().unwrap().push(format!("session:{label}"));
        }

        fn print_welcome(&mut self) {
            self.log.lock().unwrap().push("welcome".to_string());
        }

        fn print_info(&mut self, info: &str) {
            self.log.lock().unwrap().push(format!("info:{info}"));
        }

        fn print_error(&mut self, error: &str) {
            self.log.lock().unwrap().push(format!("error:{error}"));
        }
    }

    fn fixture(reply: Result<ChatResponse>) -> (ChatView<FakeBackend>, RecordingRenderer, EventLog) {
        let log = EventLog::default();
        let view = ChatView::new(FakeBackend::replying(reply, log.clone()));
        let renderer = RecordingRenderer { log: log.clone() };
        (view, renderer, log)
    }

    fn ok_reply(session_id: u64, response: &str) -> Result<ChatResponse> {
        Ok(ChatResponse::new(SessionId::new(session_id), response))
    }

    #[test]
    fn new_view_is_empty() {
        let (view, _, _) = fixture(ok_reply(1, "hi"));
        assert!(view.is_empty());
        assert!(!view.is_loading());
        assert_eq!(view.session_id(), SessionId::NEW);
        assert_eq!(view.session_label(), "New Session");
        assert_eq!(view.join_button_label(), "Reset");
    }

    #[tokio::test]
    async fn join_sets_session_and_clears_transcript() {
        let (mut view, mut renderer, _) = fixture(ok_reply(1, "hi"));
        view.send_message("hello", &mut renderer).await;
        assert_eq!(view.messages().len(), 2);

        let id = view.join("5", &mut renderer);
        assert_eq!(id, SessionId::new(5));
        assert_eq!(view.session_label(), "Session ID: 5");
        assert!(view.is_empty());
    }

    #[tokio::test]
    async fn join_invalid_input_resets() {
        for input in ["", "abc", "-3", "0"] {
            let (mut view, mut renderer, _) = fixture(ok_reply(8, "hi"));
            view.join("9", &mut renderer);
            view.send_message("hello", &mut renderer).await;

            let id = view.join(input, &mut renderer);
            assert_eq!(id, SessionId::NEW, "{input:?}");
            assert_eq!(view.session_label(), "New Session");
            assert!(view.is_empty());
        }
    }

    #[test]
    fn join_makes_no_request() {
        let (mut view, mut renderer, log) = fixture(ok_reply(1, "hi"));
        view.join("5", &mut renderer);
        assert_eq!(view.backend().request_count(), 0);
        assert_eq!(
            *log.lock().unwrap(),
            vec!["session:Session ID: 5".to_string(), "welcome".to_string()]
        );
    }

    #[test]
    fn submit_join_uses_draft() {
        let (mut view, mut renderer, _) = fixture(ok_reply(1, "hi"));
        view.set_join_input("17");
        assert_eq!(view.join_button_label(), "Join");
        assert_eq!(view.submit_join(&mut renderer), SessionId::new(17));
        assert_eq!(view.join_input(), "17");
    }

    #[tokio::test]
    async fn blank_send_is_noop() {
        let (mut view, mut renderer, log) = fixture(ok_reply(1, "hi"));
        for text in ["", "   ", "\t\n"] {
            assert!(!view.send_message(text, &mut renderer).await);
        }
        assert!(view.is_empty());
        assert!(!view.is_loading());
        assert_eq!(view.backend().request_count(), 0);
        assert!(log.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn send_adopts_server_session() {
        let (mut view, mut renderer, _) = fixture(ok_reply(42, "hi"));
        assert!(view.send_message("hello", &mut renderer).await);
        assert_eq!(
            view.messages(),
            &[Message::user("hello"), Message::assistant("hi")]
        );
        assert_eq!(view.session_id(), SessionId::new(42));
        assert!(!view.is_loading());
    }

    #[tokio::test]
    async fn send_trims_text_and_uses_current_session() {
        let (mut view, mut renderer, _) = fixture(ok_reply(99, "hi"));
        view.join("7", &mut renderer);
        view.send_message("  hello there \n", &mut renderer).await;

        let requests = view.backend().requests.lock().unwrap().clone();
        assert_eq!(
            requests,
            vec![ChatRequest::new(SessionId::new(7), "hello there")]
        );
        // An existing session is kept even if the server names another.
        assert_eq!(view.session_id(), SessionId::new(7));
        assert_eq!(view.messages()[0].content, "hello there");
    }

    #[tokio::test]
    async fn zero_from_server_keeps_new_session() {
        let (mut view, mut renderer, _) = fixture(ok_reply(0, "hi"));
        view.send_message("hello", &mut renderer).await;
        assert!(view.session_id().is_new());
        assert_eq!(view.messages().len(), 2);
    }

    #[tokio::test]
    async fn server_error_appends_fixed_message() {
        let (mut view, mut renderer, log) =
            fixture(Err(Error::api(500, "Ollama error: connection refused")));
        view.send_message("hello", &mut renderer).await;

        let last = view.messages().last().unwrap();
        assert_eq!(last.role, Role::Assistant);
        assert_eq!(last.content, UNREACHABLE_SERVER_MESSAGE);
        assert!(!view.is_loading());
        assert!(view.session_id().is_new());
        assert!(
            log.lock()
                .unwrap()
                .iter()
                .any(|event| event.starts_with("error:") && event.contains("Ollama"))
        );
    }

    #[tokio::test]
    async fn connection_error_appends_fixed_message() {
        let (mut view, mut renderer, _) =
            fixture(Err(Error::connection("Connection refused", None)));
        view.send_message("hello", &mut renderer).await;
        assert_eq!(
            view.messages(),
            &[
                Message::user("hello"),
                Message::assistant(UNREACHABLE_SERVER_MESSAGE)
            ]
        );
        assert!(!view.is_loading());
    }

    #[tokio::test]
    async fn loading_wraps_request() {
        let (mut view, mut renderer, log) = fixture(ok_reply(42, "hi"));
        view.send_message("hello", &mut renderer).await;
        assert_eq!(
            *log.lock().unwrap(),
            vec![
                "user:hello".to_string(),
                "loading".to_string(),
                "request:0:hello".to_string(),
                "session:Session ID: 42".to_string(),
                "assistant:hi".to_string(),
                "loaded".to_string(),
            ]
        );
    }

    #[test]
    fn loading_observable_between_halves() {
        let (mut view, mut renderer, _) = fixture(ok_reply(42, "hi"));
        view.set_input("hello");
        assert!(view.can_send());

        let request = view.begin_send("hello", &mut renderer).unwrap();
        assert!(view.is_loading());
        assert!(!view.can_send());
        assert_eq!(view.input(), "");
        assert_eq!(request, ChatRequest::new(SessionId::NEW, "hello"));

        // A second send is refused while the first is in flight.
        assert!(view.begin_send("again", &mut renderer).is_none());
        assert_eq!(view.messages().len(), 1);

        view.complete_send(Err(Error::timeout("slow", Some(60.0))), &mut renderer);
        assert!(!view.is_loading());
        assert_eq!(view.messages().len(), 2);
    }

    #[tokio::test]
    async fn submit_message_sends_draft() {
        let (mut view, mut renderer, _) = fixture(ok_reply(3, "hey"));
        view.set_input("hi there");
        assert!(view.submit_message(&mut renderer).await);
        assert_eq!(view.input(), "");
        assert_eq!(view.messages()[1], Message::assistant("hey"));
    }
}
