//! Camera failures reported by the external barcode reader, and the manual
//! entry path the scanner screen falls back to.

use std::time::Duration;

use thiserror::Error;

/// How long the camera error stays on screen before manual entry opens.
pub const MANUAL_FALLBACK_DELAY: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanMode {
    #[default]
    Camera,
    Manual,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CameraError {
    #[error("camera access was denied")]
    PermissionDenied,
    #[error("no camera found")]
    NotFound,
    #[error("camera is in use by another application")]
    Busy,
    #[error("camera blocked by security settings")]
    Security,
    #[error("{0}")]
    Other(String),
}

impl CameraError {
    /// Classify a browser media error by its name or message.
    pub fn classify(name: &str, message: &str) -> Self {
        let is = |tag: &str| name == tag || message.contains(tag);
        if is("NotAllowedError") {
            CameraError::PermissionDenied
        } else if is("NotFoundError") {
            CameraError::NotFound
        } else if is("NotReadableError") {
            CameraError::Busy
        } else if is("SecurityError") {
            CameraError::Security
        } else {
            CameraError::Other(message.to_string())
        }
    }

    pub fn user_message(&self) -> String {
        let hint = match self {
            CameraError::PermissionDenied => "Camera access was denied. Allow camera access for this site \
                 and refresh the page, or use the \"Manual Input\" tab to enter the barcode manually."
                .to_string(),
            CameraError::NotFound => {
                "No camera found on this device. Please use the \"Manual Input\" tab.".to_string()
            }
            CameraError::Busy => "Camera is already in use by another application. \
                 Please close other apps using the camera."
                .to_string(),
            CameraError::Security => {
                "Camera access blocked due to security settings. Please use the \"Manual Input\" tab."
                    .to_string()
            }
            CameraError::Other(message) if !message.trim().is_empty() => message.clone(),
            CameraError::Other(_) => "Unknown error. Please use the \"Manual Input\" tab.".to_string(),
        };
        format!("Failed to start camera. {hint}")
    }
}

/// Scanner screen state: which input is active and what error is shown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScannerState {
    pub mode: ScanMode,
    pub error: Option<String>,
}

impl ScannerState {
    /// Show the camera error. Returns the delay after which
    /// [`switch_to_manual`](Self::switch_to_manual) should run.
    pub fn camera_failed(&mut self, error: &CameraError) -> Duration {
        self.error = Some(error.user_message());
        MANUAL_FALLBACK_DELAY
    }

    pub fn switch_to_manual(&mut self) {
        self.mode = ScanMode::Manual;
    }
}

/// Normalize manually typed input. Blank input is not submitted.
pub fn manual_code(input: &str) -> Option<&str> {
    Some(input.trim()).filter(|code| !code.is_empty())
}
