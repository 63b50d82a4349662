//! The export action: state machine, render job and UI transitions.
//!
//! A request goes `begin` (Idle -> Exporting) -> `ExportJob::run` (the only
//! await point) -> `finish` (Exporting -> Idle). The UI owner applies the
//! returned [`StateChange`]s to its own [`UiState`].

use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;

use super::config::{Container, ExportConfig};
use super::download::{export_filename, Download, DownloadSink};
use super::error::{ExportError, RenderError};
use super::renderer::{RenderedImage, Renderer};
use super::toast::ToastTray;


pub const MSG_MISSING_CONTAINER: &str = "No se encontró el contenedor del horario";
pub const MSG_SUCCESS: &str = "Imagen descargada exitosamente";
pub const MSG_FAILURE: &str = "Error al generar la imagen. Inténtalo de nuevo";


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportState {
    Idle,
    Exporting,
}


/// A transition the UI should mirror.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateChange {
    pub from: ExportState,
    pub to: ExportState,
}


/// Visibility of the trigger control and the loading indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiState {
    pub trigger_visible: bool,
    pub loading_visible: bool,
}


impl Default for UiState {
    fn default() -> Self {
        Self::for_state(ExportState::Idle)
    }
}


impl UiState {
    pub fn for_state(state: ExportState) -> Self {
        match state {
            ExportState::Idle => Self { trigger_visible: true, loading_visible: false },
            ExportState::Exporting => Self { trigger_visible: false, loading_visible: true },
        }
    }

    pub fn apply(&mut self, change: StateChange) {
        *self = Self::for_state(change.to);
    }

    /// Back to trigger shown, loading hidden.
    pub fn reset(&mut self) {
        *self = Self::for_state(ExportState::Idle);
    }
}


/// Result of a successful export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutcome {
    pub filename: String,
    pub location: PathBuf,
    pub width: u32,
    pub height: u32,
}


/// One render request, detached from the action so it can be awaited
/// while the UI keeps drawing.
pub struct ExportJob<R: Renderer> {
    renderer: Arc<R>,
    container: Container,
    config: ExportConfig,
}


impl<R: Renderer> ExportJob<R> {
    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Render on a blocking worker.
    pub async fn run(self) -> Result<RenderedImage, ExportError> {
        let ExportJob { renderer, container, config } = self;

        let image = tokio::task::spawn_blocking(move || renderer.render(&container, &config))
            .await
            .map_err(|e| RenderError::Crashed(e.to_string()))??;

        Ok(image)
    }
}


/// Export action bound to a renderer and a download sink.
pub struct ExportAction<R: Renderer, S: DownloadSink> {
    renderer: Arc<R>,
    sink: S,
    toasts: ToastTray,
    state: ExportState,
}


/// Bind the export action if the renderer is usable.
///
/// Logs and returns `None` otherwise, leaving the trigger unbound.
pub fn initialize<R: Renderer, S: DownloadSink>(
    renderer: R,
    sink: S,
    toasts: ToastTray,
) -> Option<ExportAction<R, S>> {
    if let Err(e) = renderer.check_available() {
        log::error!("Renderer not loaded: {e}");
        return None;
    }

    Some(ExportAction {
        renderer: Arc::new(renderer),
        sink,
        toasts,
        state: ExportState::Idle,
    })
}


impl<R: Renderer, S: DownloadSink> ExportAction<R, S> {
    pub fn state(&self) -> ExportState {
        self.state
    }

    pub fn toasts(&self) -> &ToastTray {
        &self.toasts
    }

    /// Start an export of `container`.
    ///
    /// Rejects the request while another export is running. A missing
    /// container shows an error toast and leaves the state untouched.
    pub fn begin(
        &mut self,
        container: Option<&Container>,
    ) -> Result<(ExportJob<R>, StateChange), ExportError> {
        if self.state == ExportState::Exporting {
            log::debug!("Export requested while another is running; ignored");
            return Err(ExportError::Busy);
        }

        let Some(container) = container else {
            self.toasts.error(MSG_MISSING_CONTAINER);
            return Err(ExportError::MissingContainer);
        };

        let config = ExportConfig::for_container(container);
        let job = ExportJob {
            renderer: Arc::clone(&self.renderer),
            container: config.clone_container(container),
            config,
        };

        Ok((job, self.transition(ExportState::Exporting)))
    }

    /// Complete the running export with the render result.
    ///
    /// `today` names the file. Always returns to Idle.
    pub fn finish(
        &mut self,
        result: Result<RenderedImage, ExportError>,
        today: NaiveDate,
    ) -> (Result<ExportOutcome, ExportError>, StateChange) {
        let outcome = result.and_then(|image| self.deliver(&image, today));

        match &outcome {
            Ok(_) => {
                self.toasts.success(MSG_SUCCESS);
            }
            Err(e) => {
                log::error!("Error al generar la imagen: {e}");
                self.toasts.error(MSG_FAILURE);
            }
        }

        (outcome, self.transition(ExportState::Idle))
    }

    /// Run a whole export, applying each transition to `ui`.
    pub async fn export(
        &mut self,
        ui: &mut UiState,
        container: Option<&Container>,
        today: NaiveDate,
    ) -> Result<ExportOutcome, ExportError> {
        let (job, started) = self.begin(container)?;
        ui.apply(started);

        let result = job.run().await;

        let (outcome, finished) = self.finish(result, today);
        ui.apply(finished);
        outcome
    }

    fn deliver(&self, image: &RenderedImage, today: NaiveDate) -> Result<ExportOutcome, ExportError> {
        let filename = export_filename(today, "png");
        let download = Download::from_image(filename.clone(), image);

        let location = self
            .sink
            .deliver(&download)
            .map_err(|e| ExportError::Delivery(format!("{e:#}")))?;

        Ok(ExportOutcome {
            filename,
            location,
            width: image.width,
            height: image.height,
        })
    }

    fn transition(&mut self, to: ExportState) -> StateChange {
        let change = StateChange { from: self.state, to };
        self.state = to;
        change
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use crate::aggregation::organize;
    use crate::export::toast::ToastKind;
    use crate::models::{Day, Modality, Subject, TimeRange};

    struct FakeRenderer {
        fail: bool,
    }

    impl Renderer for FakeRenderer {
        fn render(&self, _: &Container, config: &ExportConfig) -> Result<RenderedImage, RenderError> {
            if self.fail {
                return Err(RenderError::Image("tainted canvas".to_string()));
            }
            let (width, height) = config.pixel_size();
            Ok(RenderedImage { width, height, png: vec![1, 2, 3] })
        }
    }

    struct MissingFonts;

    impl Renderer for MissingFonts {
        fn check_available(&self) -> Result<(), RenderError> {
            Err(RenderError::Unavailable("no fonts".to_string()))
        }

        fn render(&self, _: &Container, _: &ExportConfig) -> Result<RenderedImage, RenderError> {
            unreachable!()
        }
    }

    #[derive(Clone, Default)]
    struct RecordingSink {
        downloads: Arc<Mutex<Vec<Download>>>,
    }

    impl DownloadSink for RecordingSink {
        fn deliver(&self, download: &Download) -> anyhow::Result<PathBuf> {
            self.downloads.lock().unwrap().push(download.clone());
            Ok(PathBuf::from(&download.filename))
        }
    }

    struct FailingSink;

    impl DownloadSink for FailingSink {
        fn deliver(&self, _: &Download) -> anyhow::Result<PathBuf> {
            anyhow::bail!("disk full")
        }
    }

    fn container() -> Container {
        let subjects = vec![Subject {
            name: "Teoría de Algoritmos".to_string(),
            hours: TimeRange::parse("19:00", "22:00").unwrap(),
            days: vec![Day::Lunes, Day::Jueves],
            modality: Modality::Mixta,
        }];
        Container::from_schedule("Horario", &organize(&subjects))
    }

    fn june_first() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn action(fail: bool) -> (ExportAction<FakeRenderer, RecordingSink>, RecordingSink) {
        let sink = RecordingSink::default();
        let action = initialize(FakeRenderer { fail }, sink.clone(), ToastTray::default()).unwrap();
        (action, sink)
    }

    #[tokio::test]
    async fn test_missing_container_never_shows_loading() {
        let (mut action, sink) = action(false);
        let mut ui = UiState::default();

        let result = action.export(&mut ui, None, june_first()).await;

        assert_eq!(result, Err(ExportError::MissingContainer));
        assert_eq!(ui, UiState::default());
        assert_eq!(action.state(), ExportState::Idle);
        assert!(sink.downloads.lock().unwrap().is_empty());

        let toasts = action.toasts().active();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].kind, ToastKind::Error);
        assert_eq!(toasts[0].text, MSG_MISSING_CONTAINER);
    }

    #[tokio::test]
    async fn test_success_triggers_one_download() {
        let (mut action, sink) = action(false);
        let mut ui = UiState::default();
        let container = container();

        let outcome = action.export(&mut ui, Some(&container), june_first()).await.unwrap();

        assert_eq!(outcome.filename, "horario-2024-06-01.png");
        assert_eq!(outcome.width, container.scroll_width() * 2);

        let downloads = sink.downloads.lock().unwrap();
        assert_eq!(downloads.len(), 1);
        assert_eq!(downloads[0].filename, "horario-2024-06-01.png");
        assert!(downloads[0].href.starts_with("data:image/png;base64,"));

        assert_eq!(ui, UiState::default());
        let toasts = action.toasts().active();
        assert_eq!(toasts[0].kind, ToastKind::Success);
        assert_eq!(toasts[0].text, MSG_SUCCESS);
    }

    #[tokio::test]
    async fn test_render_failure_restores_ui() {
        let (mut action, sink) = action(true);
        let mut ui = UiState::default();

        let result = action.export(&mut ui, Some(&container()), june_first()).await;

        assert!(matches!(result, Err(ExportError::Render(RenderError::Image(_)))));
        assert!(ui.trigger_visible);
        assert!(!ui.loading_visible);
        assert!(sink.downloads.lock().unwrap().is_empty());
        assert_eq!(action.toasts().active()[0].text, MSG_FAILURE);
    }

    #[tokio::test]
    async fn test_delivery_failure_restores_ui() {
        let mut action = initialize(FakeRenderer { fail: false }, FailingSink, ToastTray::default()).unwrap();
        let mut ui = UiState::default();

        let result = action.export(&mut ui, Some(&container()), june_first()).await;

        match result {
            Err(ExportError::Delivery(message)) => assert!(message.contains("disk full")),
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(ui, UiState::default());
        assert_eq!(action.state(), ExportState::Idle);
    }

    #[tokio::test]
    async fn test_repeated_exports_end_idle() {
        let (mut action, sink) = action(false);
        let mut ui = UiState::default();
        let container = container();

        for _ in 0..3 {
            action.export(&mut ui, Some(&container), june_first()).await.unwrap();
            assert_eq!(ui, UiState::default());
        }
        assert_eq!(sink.downloads.lock().unwrap().len(), 3);
    }

    #[test]
    fn test_begin_while_exporting_is_busy() {
        let (mut action, _) = action(false);
        let mut ui = UiState::default();
        let container = container();

        let (_job, started) = action.begin(Some(&container)).unwrap();
        ui.apply(started);
        assert_eq!(started, StateChange { from: ExportState::Idle, to: ExportState::Exporting });
        assert!(ui.loading_visible);
        assert!(!ui.trigger_visible);

        assert!(matches!(action.begin(Some(&container)), Err(ExportError::Busy)));
        assert!(action.toasts().active().is_empty());
    }

    #[test]
    fn test_job_uses_merged_config() {
        let (mut action, _) = action(false);
        let container = container();

        let (job, _) = action.begin(Some(&container)).unwrap();

        assert_eq!(job.config().width, container.scroll_width());
        assert_eq!(job.config().height, container.scroll_height());
        assert_eq!(job.config().background_color, "#EBF2FA");
    }

    #[test]
    fn test_initialize_without_renderer() {
        let action = initialize(MissingFonts, RecordingSink::default(), ToastTray::default());
        assert!(action.is_none());
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut ui = UiState::for_state(ExportState::Exporting);
        ui.reset();
        ui.reset();
        assert_eq!(ui, UiState::default());
    }
}
