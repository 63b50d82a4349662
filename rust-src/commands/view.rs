//! Interactive schedule view with PNG export.

use std::io::{self, Stdout, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::cursor::Show;
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::task::JoinHandle;

use crate::config::{get_export_dir, SCHEDULE_TITLE, VIEW_TICK};
use crate::export::{
    export_date, initialize, Container, DirectorySink, DownloadSink, ExportAction, ExportError,
    RenderError, RenderedImage, Renderer, ToastTray, UiState,
};
use crate::logging;
use crate::visualization::{draw_view, SvgRenderer, ViewModel};

use super::input::load_schedule;


type PendingExport = JoinHandle<Result<RenderedImage, ExportError>>;


/// State of the running view.
struct ViewState<R: Renderer, S: DownloadSink> {
    data_path: PathBuf,
    container: Option<Container>,
    action: Option<ExportAction<R, S>>,
    toasts: ToastTray,
    ui: UiState,
    pending: Option<PendingExport>,
    tick: usize,
}


impl<R: Renderer, S: DownloadSink> ViewState<R, S> {
    /// Handle a key press. Returns false when the view should close.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return true;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return false,
            KeyCode::Char('e') => self.start_export(),
            KeyCode::Char('r') => self.reload(),
            KeyCode::Down => self.scroll(1),
            KeyCode::Up => self.scroll(-1),
            _ => {}
        }

        true
    }

    fn start_export(&mut self) {
        // Unbound when no renderer was available
        let Some(action) = self.action.as_mut() else {
            return;
        };

        match action.begin(self.container.as_ref()) {
            Ok((job, change)) => {
                let (width, height) = job.config().pixel_size();
                log::debug!("Rendering {width}x{height} image");
                self.ui.apply(change);
                self.pending = Some(tokio::spawn(job.run()));
            }
            Err(e) => log::debug!("Export not started: {e}"),
        }
    }

    /// Finish the running export once its render task is done.
    async fn poll_export(&mut self) {
        if !self.pending.as_ref().is_some_and(JoinHandle::is_finished) {
            return;
        }

        let (Some(handle), Some(action)) = (self.pending.take(), self.action.as_mut()) else {
            return;
        };

        let result = handle
            .await
            .unwrap_or_else(|e| Err(RenderError::Crashed(e.to_string()).into()));

        let (_, change) = action.finish(result, export_date());
        self.ui.apply(change);
    }

    fn reload(&mut self) {
        match load_schedule(&self.data_path) {
            Ok(schedule) => {
                self.container = Some(Container::from_schedule(SCHEDULE_TITLE, &schedule));
            }
            Err(e) => {
                log::error!("Failed to reload {}: {e:#}", self.data_path.display());
                self.container = None;
            }
        }
    }

    fn scroll(&mut self, delta: isize) {
        if let Some(container) = self.container.as_mut() {
            let max = container.rows.len().saturating_sub(1);
            container.scroll_top = container.scroll_top.saturating_add_signed(delta).min(max);
        }
    }

    fn draw(&self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let toasts = self.toasts.active();
        let model = ViewModel {
            container: self.container.as_ref(),
            ui: self.ui,
            export_bound: self.action.is_some(),
            toasts: &toasts,
            tick: self.tick,
        };

        terminal.draw(|frame| draw_view(frame, &model))?;
        Ok(())
    }
}


/// Run the view command.
pub async fn run(data_path: &Path, out_dir: Option<PathBuf>) -> Result<()> {
    let schedule = load_schedule(data_path)?;
    let toasts = ToastTray::default();
    let sink = DirectorySink::new(out_dir.unwrap_or_else(get_export_dir));

    let mut state = ViewState {
        data_path: data_path.to_path_buf(),
        container: Some(Container::from_schedule(SCHEDULE_TITLE, &schedule)),
        action: initialize(SvgRenderer::with_system_fonts(), sink, toasts.clone()),
        toasts,
        ui: UiState::default(),
        pending: None,
        tick: 0,
    };

    let mut terminal = enter_terminal()?;
    logging::suspend();

    let result = event_loop(&mut terminal, &mut state).await;

    // Restore the terminal even when the loop failed
    restore_terminal(terminal.backend_mut());
    logging::resume();

    result
}


/// Switch to raw mode on the alternate screen, undoing it if setup fails.
fn enter_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;

    let setup = (|| -> Result<_> {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        Ok(Terminal::new(CrosstermBackend::new(stdout))?)
    })();

    if setup.is_err() {
        restore_terminal(&mut io::stdout());
    }
    setup
}


fn restore_terminal(out: &mut impl Write) {
    let _ = disable_raw_mode();
    let _ = execute!(out, LeaveAlternateScreen, Show);
}


async fn event_loop<R: Renderer, S: DownloadSink>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    state: &mut ViewState<R, S>,
) -> Result<()> {
    loop {
        state.poll_export().await;
        state.draw(terminal)?;

        while event::poll(std::time::Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if !state.handle_key(key) {
                    return Ok(());
                }
            }
        }

        tokio::time::sleep(VIEW_TICK).await;
        state.tick = state.tick.wrapping_add(1);
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use crossterm::event::KeyModifiers;

    use crate::export::{Download, ExportConfig, ExportState};

    struct FakeRenderer;

    impl Renderer for FakeRenderer {
        fn render(&self, _: &Container, config: &ExportConfig) -> Result<RenderedImage, RenderError> {
            let (width, height) = config.pixel_size();
            Ok(RenderedImage { width, height, png: vec![0] })
        }
    }

    #[derive(Clone, Default)]
    struct RecordingSink {
        downloads: Arc<Mutex<Vec<String>>>,
    }

    impl DownloadSink for RecordingSink {
        fn deliver(&self, download: &Download) -> Result<PathBuf> {
            self.downloads.lock().unwrap().push(download.filename.clone());
            Ok(PathBuf::from(&download.filename))
        }
    }

    const SCHEDULE: &str = r#"[
        {"nombre": "Teoría de Algoritmos", "horario": {"inicio": "19:00", "fin": "22:00"}, "dias": ["Lunes", "Jueves"], "modalidad": "mixta"},
        {"nombre": "Matemáticas Discretas", "horario": {"inicio": "18:00", "fin": "21:00"}, "dias": ["Martes", "Viernes"], "modalidad": "presencial"}
    ]"#;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn state(data_path: &Path, sink: RecordingSink) -> ViewState<FakeRenderer, RecordingSink> {
        let toasts = ToastTray::default();
        let schedule = load_schedule(data_path).unwrap();

        ViewState {
            data_path: data_path.to_path_buf(),
            container: Some(Container::from_schedule(SCHEDULE_TITLE, &schedule)),
            action: initialize(FakeRenderer, sink, toasts.clone()),
            toasts,
            ui: UiState::default(),
            pending: None,
            tick: 0,
        }
    }

    fn schedule_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", SCHEDULE).unwrap();
        file
    }

    #[tokio::test]
    async fn test_export_key_round_trip() {
        let file = schedule_file();
        let sink = RecordingSink::default();
        let mut state = state(file.path(), sink.clone());

        assert!(state.handle_key(key(KeyCode::Char('e'))));
        assert!(state.ui.loading_visible);
        assert!(!state.ui.trigger_visible);

        // A second press while exporting is ignored
        state.handle_key(key(KeyCode::Char('e')));

        while state.pending.is_some() {
            tokio::task::yield_now().await;
            state.poll_export().await;
        }

        assert_eq!(state.ui, UiState::default());
        assert_eq!(state.action.as_ref().unwrap().state(), ExportState::Idle);

        let downloads = sink.downloads.lock().unwrap();
        assert_eq!(downloads.len(), 1);
        assert!(downloads[0].starts_with("horario-"));
    }

    #[tokio::test]
    async fn test_reload_failure_drops_container() {
        let file = schedule_file();
        let mut state = state(file.path(), RecordingSink::default());

        state.data_path = PathBuf::from("data/non_existent_file.json");
        state.handle_key(key(KeyCode::Char('r')));
        assert!(state.container.is_none());

        state.handle_key(key(KeyCode::Char('e')));
        assert!(state.pending.is_none());
        assert_eq!(state.ui, UiState::default());
        assert!(state.toasts.active().iter().any(|t| t.text.contains("contenedor")));
    }

    #[test]
    fn test_scroll_is_clamped() {
        let file = schedule_file();
        let mut state = state(file.path(), RecordingSink::default());

        state.handle_key(key(KeyCode::Up));
        assert_eq!(state.container.as_ref().unwrap().scroll_top, 0);

        for _ in 0..5 {
            state.handle_key(key(KeyCode::Down));
        }
        assert_eq!(state.container.as_ref().unwrap().scroll_top, 1);
    }

    #[test]
    fn test_restore_terminal_leaves_alternate_screen() {
        let mut out = Vec::new();
        restore_terminal(&mut out);

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\x1b[?1049l"));
        assert!(text.contains("\x1b[?25h"));
    }

    #[test]
    fn test_quit_keys() {
        let file = schedule_file();
        let mut state = state(file.path(), RecordingSink::default());

        assert!(!state.handle_key(key(KeyCode::Char('q'))));
        assert!(!state.handle_key(key(KeyCode::Esc)));
        assert!(state.handle_key(key(KeyCode::Char('x'))));
    }
}
