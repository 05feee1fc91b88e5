//! systemd-inhibit backed wake lock

use tokio::process::{Child, Command};
use tracing::{debug, error, info, warn};

use super::wakelock::WakeLock;

/// Wake lock that holds a `systemd-inhibit` child process while acquired.
///
/// The inhibitor blocks idle and sleep for as long as the child lives, so
/// releasing the lock is killing the child. `kill_on_drop` covers abrupt
/// teardown paths.
#[derive(Debug, Default)]
pub struct InhibitWakeLock {
    child: Option<Child>,
}

impl InhibitWakeLock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl WakeLock for InhibitWakeLock {
    fn acquire(&mut self) {
        if self.child.is_some() {
            return;
        }

        let spawned = Command::new("systemd-inhibit")
            .args([
                "--what=idle:sleep",
                "--who=caffeine-tile",
                "--why=Caffeine tile is active",
                "--mode=block",
                "sleep",
                "infinity",
            ])
            .kill_on_drop(true)
            .spawn();

        match spawned {
            Ok(child) => {
                debug!("inhibitor process spawned (pid {:?})", child.id());
                info!("display wake lock acquired (systemd-inhibit)");
                self.child = Some(child);
            }
            Err(e) => {
                // Availability is probed at startup, so this is unexpected.
                error!("failed to spawn systemd-inhibit: {}", e);
            }
        }
    }

    fn release(&mut self) {
        if let Some(mut child) = self.child.take() {
            if let Err(e) = child.start_kill() {
                warn!("failed to kill inhibitor process: {}", e);
            }
            info!("display wake lock released (systemd-inhibit)");
        }
    }
}

/// Check that systemd-inhibit is available on this system
pub async fn check_inhibit_available() -> Result<(), String> {
    Command::new("systemd-inhibit")
        .arg("--version")
        .output()
        .await
        .map_err(|_| {
            "systemd-inhibit is not available. The system lock backend requires systemd."
                .to_string()
        })?;

    info!("systemd-inhibit is available");
    Ok(())
}
