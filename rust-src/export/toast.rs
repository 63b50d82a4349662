//! Transient notifications shown after an export.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::config::TOAST_DURATION;


// ANSI colors for terminal output
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";


pub type ToastId = u64;


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}


impl ToastKind {
    pub fn icon(&self) -> &'static str {
        match self {
            ToastKind::Success => "✔",
            ToastKind::Error => "⚠",
        }
    }
}


#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: ToastId,
    pub kind: ToastKind,
    pub text: String,
}


impl Toast {
    /// Icon and text, e.g. `✔ Imagen descargada exitosamente`.
    pub fn line(&self) -> String {
        format!("{} {}", self.kind.icon(), self.text)
    }

    /// Colored line for plain terminal output.
    pub fn ansi_line(&self) -> String {
        let color = match self.kind {
            ToastKind::Success => GREEN,
            ToastKind::Error => RED,
        };
        format!("{}{}{}", color, self.line(), RESET)
    }
}


#[derive(Debug, Default)]
struct TrayInner {
    next_id: ToastId,
    toasts: Vec<Toast>,
}


/// Shared list of visible toasts.
///
/// Each toast removes itself after the tray's duration when a tokio runtime
/// is running; otherwise it stays until dismissed.
#[derive(Debug, Clone)]
pub struct ToastTray {
    inner: Arc<Mutex<TrayInner>>,
    duration: Duration,
}


impl Default for ToastTray {
    fn default() -> Self {
        Self::with_duration(TOAST_DURATION)
    }
}


impl ToastTray {
    pub fn with_duration(duration: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(TrayInner::default())),
            duration,
        }
    }

    /// Show a toast and schedule its removal.
    pub fn notify(&self, text: impl Into<String>, kind: ToastKind) -> ToastId {
        let id = {
            let mut inner = self.lock();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.toasts.push(Toast { id, kind, text: text.into() });
            id
        };

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let tray = self.clone();
                let duration = self.duration;
                handle.spawn(async move {
                    tokio::time::sleep(duration).await;
                    tray.dismiss(id);
                });
            }
            Err(_) => log::debug!("No runtime for toast {id}; it stays until dismissed"),
        }

        id
    }

    pub fn success(&self, text: impl Into<String>) -> ToastId {
        self.notify(text, ToastKind::Success)
    }

    pub fn error(&self, text: impl Into<String>) -> ToastId {
        self.notify(text, ToastKind::Error)
    }

    /// Remove a toast. Returns false if it was already gone.
    pub fn dismiss(&self, id: ToastId) -> bool {
        let mut inner = self.lock();
        match inner.toasts.iter().position(|t| t.id == id) {
            Some(index) => {
                inner.toasts.remove(index);
                true
            }
            None => false,
        }
    }

    /// Visible toasts, oldest first.
    pub fn active(&self) -> Vec<Toast> {
        self.lock().toasts.clone()
    }

    fn lock(&self) -> MutexGuard<'_, TrayInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
