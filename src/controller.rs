//! Drives one tool run from user input to rendered HTML.

use std::time::{Duration, Instant};

use serde_json::Value;
use uuid::Uuid;

use crate::clipboard::Clipboard;
use crate::envelope::{classify_error, inner_result, unwrap_body, Envelope, ResponseBody};
use crate::errors::{ClipboardError, DispatchError};
use crate::params::{build_params, request_body, ToolInput};
use crate::render::ask::ask_payload;
use crate::render::{self, pretty_json, render_tool, text_field, CmarkRenderer, MarkdownRenderer, Rendered};
use crate::tools::ToolKind;
use crate::transport::{HttpResponse, Transport};

/// How long "Done" stays up after a successful run.
pub const DONE_DISPLAY: Duration = Duration::from_millis(1200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
    Rendered,
    Errored,
}

impl RunState {
    /// Time spent in this state before it reads as `Idle`.
    fn display_for(self) -> Option<Duration> {
        match self {
            RunState::Rendered => Some(DONE_DISPLAY),
            RunState::Errored => Some(Duration::ZERO),
            RunState::Idle | RunState::Running => None,
        }
    }
}

/// The transient status indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    state: RunState,
    since: Instant,
}

impl Status {
    fn new(state: RunState) -> Self {
        Self {
            state,
            since: Instant::now(),
        }
    }

    pub fn state_at(&self, now: Instant) -> RunState {
        match self.state.display_for() {
            Some(shown) if now.saturating_duration_since(self.since) >= shown => RunState::Idle,
            _ => self.state,
        }
    }

    pub fn state(&self) -> RunState {
        self.state_at(Instant::now())
    }

    pub fn text_at(&self, now: Instant) -> &'static str {
        match self.state_at(now) {
            RunState::Running => "Running...",
            RunState::Rendered => "Done",
            RunState::Idle | RunState::Errored => "",
        }
    }
}

/// Owns the output area and the single piece of state that outlives a run:
/// the Markdown of the last successful read, kept for the copy action.
///
/// `run` takes `&mut self`, so a dispatcher never has two runs in flight.
pub struct Dispatcher<T: Transport, M: MarkdownRenderer = CmarkRenderer> {
    transport: T,
    markdown: M,
    tool: ToolKind,
    html: String,
    raw: Option<String>,
    last_read_markdown: Option<String>,
    status: Status,
}

impl<T: Transport> Dispatcher<T> {
    pub fn new(transport: T) -> Self {
        Self::with_markdown(transport, CmarkRenderer)
    }
}

impl<T: Transport, M: MarkdownRenderer> Dispatcher<T, M> {
    pub fn with_markdown(transport: T, markdown: M) -> Self {
        Self {
            transport,
            markdown,
            tool: ToolKind::Search,
            html: String::new(),
            raw: None,
            last_read_markdown: None,
            status: Status::new(RunState::Idle),
        }
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    /// Switches tools and clears everything the previous tool produced.
    pub fn select_tool(&mut self, tool: ToolKind) {
        self.tool = tool;
        self.clear();
    }

    pub fn clear(&mut self) {
        self.html.clear();
        self.raw = None;
        self.last_read_markdown = None;
        self.status = Status::new(RunState::Idle);
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    /// The last response body, pretty-printed when it was JSON.
    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    pub fn last_read_markdown(&self) -> Option<&str> {
        self.last_read_markdown.as_deref()
    }

    pub fn copy_enabled(&self) -> bool {
        self.tool == ToolKind::Read && self.last_read_markdown.is_some()
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Runs the selected tool. The outcome is always rendered, errors as an
    /// error box; the returned error is for callers that want to react.
    pub fn run(&mut self, input: &ToolInput) -> Result<(), DispatchError> {
        self.clear();
        self.status = Status::new(RunState::Running);

        let run_id = Uuid::new_v4().simple().to_string();
        let span = tracing::info_span!("run", tool = %self.tool, %run_id);
        let _guard = span.enter();

        match self.execute(input) {
            Ok(Rendered { html, read_markdown }) => {
                self.html = html;
                self.last_read_markdown = read_markdown;
                self.status = Status::new(RunState::Rendered);
                tracing::info!("run rendered");
                Ok(())
            }
            Err(err) => {
                tracing::warn!(%err, "run failed");
                self.html = render::error_box(&err.to_string());
                self.status = Status::new(RunState::Errored);
                Err(err)
            }
        }
    }

    /// Copies the last read document. Copying an empty slot writes an
    /// empty string.
    pub fn copy_last_read(&self, clipboard: &mut dyn Clipboard) -> Result<(), ClipboardError> {
        clipboard.write_text(self.last_read_markdown.as_deref().unwrap_or_default())
    }

    fn execute(&mut self, input: &ToolInput) -> Result<Rendered, DispatchError> {
        let tool = self.tool;
        let params = build_params(tool, input)?;
        let response = self.transport.post(tool.api_path(), &request_body(params))?;
        self.raw = Some(response.body.clone());

        let body = unwrap_body(&response.body, &response.content_type);
        if !response.is_success() {
            return Err(http_error(&response, &body));
        }
        let value = match body {
            ResponseBody::Json(value) => value,
            ResponseBody::Text(body) => return Err(DispatchError::NotJson { body }),
        };
        self.raw = Some(pretty_json(&value));

        let envelope = Envelope::from_value(&value);
        if let Some(message) = classify_error(&envelope) {
            return Err(DispatchError::Application(message));
        }

        let payload = match tool {
            ToolKind::Ask => ask_payload(&envelope),
            _ => inner_result(&envelope),
        };
        render_tool(tool, &payload, &self.markdown)
    }
}

fn http_error(response: &HttpResponse, body: &ResponseBody) -> DispatchError {
    let from_json = match body {
        ResponseBody::Json(value @ Value::Object(_)) => text_field(value, &["message"]),
        _ => None,
    };
    let message = from_json
        .or_else(|| Some(response.body.clone()).filter(|b| !b.trim().is_empty()))
        .unwrap_or_else(|| format!("status {}", response.status));

    DispatchError::Http {
        status: response.status,
        message,
    }
}
