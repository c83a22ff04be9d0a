//! Application state and core logic

use crate::backend::{resolve_backend, BackendApi, FormError, FormResult};
use crate::config::ClientSettings;
use crate::state::{
    AppState, ConfigResponse, FieldId, Form, FormButton, LaunchLink, LoadState, Photo, ScanForm,
    SubmitMode, SubmitRequest, SubmitState,
};
use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Results of background requests, delivered to the UI loop
#[derive(Debug)]
pub enum BackendEvent {
    ConfigLoaded(FormResult<ConfigResponse>),
    Submitted {
        mode: SubmitMode,
        result: FormResult<String>,
    },
}

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    settings: ClientSettings,
    backend: Arc<dyn BackendApi>,
    events_tx: mpsc::UnboundedSender<BackendEvent>,
    events_rx: mpsc::UnboundedReceiver<BackendEvent>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance from explicit settings
    pub fn new(settings: ClientSettings, backend: Arc<dyn BackendApi>) -> Self {
        let mut form = ScanForm::new(settings.actions.clone());
        form.hide_backend = settings.hide_backend_field;
        form.hide_task = settings.hide_task_field;
        form.backend.set_text(settings.default_backend.clone());

        let query_task = settings
            .launch_link
            .as_deref()
            .map(LaunchLink::parse)
            .and_then(|link| link.task().map(str::to_string));

        // An explicit task id wins over the link's `task` parameter
        if let Some(task) = settings.task_id.clone().or_else(|| query_task.clone()) {
            form.task_id.set_text(task);
        }
        if let Some(photo) = &settings.photo {
            form.photo.set_text(photo.display().to_string());
        }

        let mut state = AppState::new(form);
        state.query_task = query_task;

        let (events_tx, events_rx) = mpsc::unbounded_channel();

        Self {
            state,
            settings,
            backend,
            events_tx,
            events_rx,
            quit: false,
        }
    }

    /// Kick off start-up work (auto-loading dropdown options)
    pub fn start(&mut self) {
        if self.settings.auto_load {
            self.load_config();
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn request_quit(&mut self) {
        self.quit = true;
    }

    /// Normalized backend from the form, or the configured default
    pub fn current_backend(&self) -> String {
        resolve_backend(
            self.state.form.backend.as_text(),
            &self.settings.default_backend,
        )
    }

    /// Whether Submit would get past its preconditions
    pub fn can_submit(&self) -> bool {
        self.state
            .form
            .can_submit(&self.settings.default_backend, self.state.query_task.as_deref())
    }

    /// Fetch dropdown options in the background
    pub fn load_config(&mut self) {
        let backend = self.current_backend();
        if backend.is_empty() {
            self.state.load_state = LoadState::Failed(FormError::MissingBackend.to_string());
            return;
        }

        tracing::info!("Loading options from {backend}");
        self.state.load_state = LoadState::Loading;
        self.state.in_flight += 1;

        let client = Arc::clone(&self.backend);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = client.fetch_config(&backend).await;
            let _ = tx.send(BackendEvent::ConfigLoaded(result));
        });
    }

    /// Submit the form in the background
    ///
    /// Precondition failures are reported immediately and send nothing.
    pub fn submit(&mut self) {
        let prepared = match self
            .state
            .form
            .prepare_submission(&self.settings.default_backend, self.state.query_task.as_deref())
        {
            Ok(prepared) => prepared,
            Err(e) => {
                tracing::warn!("Submission rejected: {e}");
                self.state.submit_state = SubmitState::Failed(e.to_string());
                return;
            }
        };

        if let Some(path) = &prepared.photo_path {
            if let Err(e) = Photo::check_readable(path) {
                let e = photo_read_error(path, e);
                tracing::warn!("Submission rejected: {e}");
                self.state.submit_state = SubmitState::Failed(e.to_string());
                return;
            }
        }

        let mode = if prepared.photo_path.is_some() {
            SubmitMode::Photo
        } else {
            SubmitMode::Json
        };
        tracing::info!(
            "Submitting task {} to {} ({})",
            prepared.payload.task_id,
            prepared.backend,
            mode.label()
        );
        self.state.submit_state = SubmitState::Submitting(mode);
        self.state.in_flight += 1;

        let client = Arc::clone(&self.backend);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let photo = match &prepared.photo_path {
                Some(path) => match Photo::read(path).await {
                    Ok(photo) => Some(photo),
                    Err(e) => {
                        let result = Err(photo_read_error(path, e));
                        let _ = tx.send(BackendEvent::Submitted { mode, result });
                        return;
                    }
                },
                None => None,
            };
            let request = SubmitRequest::new(prepared.payload, photo);
            let result = client.submit(&prepared.backend, request).await;
            let _ = tx.send(BackendEvent::Submitted { mode, result });
        });
    }

    /// Apply the result of a background request
    pub fn handle_backend_event(&mut self, event: BackendEvent) {
        self.state.in_flight = self.state.in_flight.saturating_sub(1);
        match event {
            BackendEvent::ConfigLoaded(Ok(config)) => {
                self.state.form.options.apply_config(config);
                self.state.load_state = LoadState::Loaded;
                tracing::info!("Dropdown options loaded");
            }
            BackendEvent::ConfigLoaded(Err(e)) => {
                tracing::warn!("Config load failed: {e}");
                self.state.load_state = LoadState::Failed(e.to_string());
            }
            BackendEvent::Submitted {
                mode,
                result: Ok(body),
            } => {
                tracing::info!("Submission ({}) accepted", mode.label());
                self.state.last_success_at = Some(Local::now());
                self.state.submit_state = SubmitState::Succeeded(body);
            }
            BackendEvent::Submitted {
                mode,
                result: Err(e),
            } => {
                if e.is_precondition() {
                    tracing::info!("Submission ({}) not sent: {e}", mode.label());
                } else {
                    tracing::warn!("Submission ({}) failed: {e}", mode.label());
                }
                self.state.submit_state = SubmitState::Failed(e.to_string());
            }
        }
    }

    /// Drain finished background requests without blocking
    pub fn poll_backend_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_backend_event(event);
        }
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let on_buttons = self.state.form.is_buttons_row_active();
        let on_select = self
            .state
            .form
            .active_field_id()
            .is_some_and(|id| id.is_select());

        match key.code {
            KeyCode::Char('c') if ctrl => self.request_quit(),
            KeyCode::Char('s') if ctrl => self.submit(),
            KeyCode::Char('l') if ctrl => self.load_config(),
            KeyCode::Tab => self.state.form.next_field(),
            KeyCode::BackTab => self.state.form.prev_field(),
            KeyCode::Esc => self.state.form.clear(),
            // Action panel navigation
            KeyCode::Up | KeyCode::Left if on_buttons => self.state.form.prev_button(),
            KeyCode::Down | KeyCode::Right if on_buttons => self.state.form.next_button(),
            KeyCode::Enter if on_buttons => self.press_button(self.state.form.selected_form_button()),
            // Dropdowns
            KeyCode::Left | KeyCode::Char('h') if on_select => self.state.form.select_prev(),
            KeyCode::Right | KeyCode::Char('l' | ' ') if on_select => {
                self.state.form.select_next()
            }
            KeyCode::Up => self.state.form.prev_field(),
            KeyCode::Down => self.state.form.next_field(),
            KeyCode::Enter => {
                if self.state.form.active_field_id() == Some(FieldId::Reason) {
                    self.state.form.newline();
                } else {
                    self.state.form.next_field();
                }
            }
            KeyCode::Char(c) if !ctrl => self.state.form.input_char(c),
            KeyCode::Backspace => self.state.form.backspace(),
            _ => {}
        }
    }

    fn press_button(&mut self, button: FormButton) {
        match button {
            FormButton::Submit => self.submit(),
            FormButton::LoadOptions => self.load_config(),
            FormButton::Clear => self.state.form.clear(),
        }
    }

    /// Wait for the next background result (tests only)
    #[cfg(test)]
    async fn settle(&mut self) {
        let event = tokio::time::timeout(std::time::Duration::from_secs(5), self.events_rx.recv())
            .await
            .expect("backend event timed out")
            .expect("event channel closed");
        self.handle_backend_event(event);
    }
}

fn photo_read_error(path: &Path, e: std::io::Error) -> FormError {
    FormError::PhotoRead {
        reason: format!("{}: {e}", path.display()),
    }
}
