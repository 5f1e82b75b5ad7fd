// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Desktop notification presenter

use super::{PresentError, Presenter};
use async_trait::async_trait;
use ga_core::{Alert, Display, Presentation, Settings};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::process::Command;

const APP_NAME: &str = "Gentle Alert";

/// A presentation that has not yet dismissed itself
#[derive(Debug, Clone)]
struct Active {
    alert: Alert,
    until: Instant,
    notification_id: Option<u32>,
}

/// Presenter backed by the desktop notification service
/// (`notify-send` on Linux, `osascript` on macOS).
///
/// Each presentation stays on screen for `expansion_time × duration_multiplier`
/// minutes, after which it no longer counts as showing.
#[derive(Clone)]
pub struct DesktopPresenter {
    settings: Arc<Settings>,
    screens: usize,
    active: Arc<Mutex<Vec<Active>>>,
}

impl DesktopPresenter {
    /// Screen count comes from `GA_SCREENS` (default 1)
    pub fn new(settings: Settings) -> Self {
        let screens = parse_screens(std::env::var("GA_SCREENS").ok().as_deref());
        Self {
            settings: Arc::new(settings),
            screens,
            active: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_screens(mut self, screens: usize) -> Self {
        self.screens = screens.max(1);
        self
    }

    fn targets(&self, display: Display) -> usize {
        match display {
            Display::Main => 1,
            Display::All => self.screens,
        }
    }

    fn track(&self, alert: &Alert, on_screen: Duration, notification_id: Option<u32>) {
        let Some(until) = Instant::now().checked_add(on_screen) else {
            tracing::warn!(?on_screen, "on-screen time out of range, not tracking");
            return;
        };
        let mut active = self.active.lock().unwrap_or_else(|e| e.into_inner());
        active.push(Active {
            alert: alert.clone(),
            until,
            notification_id,
        });
    }

    fn live(&self) -> Vec<Active> {
        let now = Instant::now();
        let mut active = self.active.lock().unwrap_or_else(|e| e.into_inner());
        active.retain(|a| a.until > now);
        active.clone()
    }

    async fn notify(&self, presentation: &Presentation) -> Result<Option<u32>, PresentError> {
        if cfg!(target_os = "macos") {
            let script = format!(
                "display notification {:?} with title {:?}",
                presentation.text, APP_NAME
            );
            run(Command::new("osascript").arg("-e").arg(script)).await?;
            return Ok(None);
        }

        let expire_ms = presentation.on_screen().as_millis().to_string();
        let stdout = run(Command::new("notify-send")
            .arg("--app-name")
            .arg(APP_NAME)
            .arg("--print-id")
            .arg("--expire-time")
            .arg(expire_ms)
            .arg(APP_NAME)
            .arg(&presentation.text))
        .await?;
        Ok(stdout.trim().parse().ok())
    }
}

#[async_trait]
impl Presenter for DesktopPresenter {
    async fn present(&self, alert: &Alert) -> Result<usize, PresentError> {
        let presentation = self.settings.resolve(alert);
        let targets = self.targets(presentation.display);
        for _ in 0..targets {
            let id = self.notify(&presentation).await?;
            self.track(alert, presentation.on_screen(), id);
        }
        Ok(targets)
    }

    async fn dismiss_all(&self) -> Result<usize, PresentError> {
        let live = self.live();
        self.active
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();

        for id in live.iter().filter_map(|a| a.notification_id) {
            let closed = run(Command::new("gdbus")
                .args(["call", "--session"])
                .args(["--dest", "org.freedesktop.Notifications"])
                .args(["--object-path", "/org/freedesktop/Notifications"])
                .args(["--method", "org.freedesktop.Notifications.CloseNotification"])
                .arg(id.to_string()))
            .await;
            if let Err(e) = closed {
                tracing::warn!(id, error = %e, "failed to close notification");
            }
        }
        Ok(live.len())
    }

    async fn showing(&self) -> Vec<Alert> {
        self.live().into_iter().map(|a| a.alert).collect()
    }
}

async fn run(command: &mut Command) -> Result<String, PresentError> {
    let output = command
        .output()
        .await
        .map_err(|e| PresentError::Unavailable(e.to_string()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(PresentError::CommandFailed(stderr.trim().to_string()));
    }
    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

fn parse_screens(value: Option<&str>) -> usize {
    value
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(1)
}

#[cfg(test)]
#[path = "desktop_tests.rs"]
mod tests;
