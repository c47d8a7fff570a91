//! Theme transition coordinator.
//!
//! A toggle starts a short visual transition, and further toggles from the
//! same client are dropped (not queued) until the lock window passes. Two
//! windows run per toggle: the document-level transition marker (500 ms) and
//! the toggle lock itself (600 ms). Both are cleared by spawned timers whose
//! abort handles are tracked: a superseding toggle aborts stale timers, and
//! dropping the service aborts everything outstanding.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::AbortHandle;
use tracing::debug;

use luce_nuova_core::Theme;

/// How long renders carry the `theme-transition` document class.
pub const TRANSITION_MARKER: Duration = Duration::from_millis(500);

/// How long further toggles from the same client are dropped.
pub const TOGGLE_LOCK: Duration = Duration::from_millis(600);

/// Coordinates theme transitions per client.
///
/// Cheaply cloneable; all clones share the same transition table.
#[derive(Debug, Clone, Default)]
pub struct ThemeService {
    inner: Arc<ThemeServiceInner>,
}

#[derive(Debug, Default)]
struct ThemeServiceInner {
    clients: Mutex<HashMap<String, Transition>>,
}

/// In-flight transition state for one client.
#[derive(Debug, Default)]
struct Transition {
    locked: bool,
    marked: bool,
    timers: Vec<AbortHandle>,
}

impl Transition {
    fn abort_timers(&self) {
        for timer in &self.timers {
            timer.abort();
        }
    }
}

impl ThemeService {
    /// Create a new service with no transitions in flight.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attempt a toggle for a client.
    ///
    /// Returns the new theme and starts the transition windows, or `None` if
    /// the client is still inside the lock window - a dropped toggle, never a
    /// queued one.
    pub fn try_toggle(&self, client: &str, current: Theme) -> Option<Theme> {
        let mut clients = self.inner.lock_clients();

        if clients.get(client).is_some_and(|t| t.locked) {
            debug!(client, "theme toggle dropped during transition");
            return None;
        }

        // A marker timer can outlive its lock window; supersede it.
        if let Some(stale) = clients.remove(client) {
            stale.abort_timers();
        }

        let transition = Transition {
            locked: true,
            marked: true,
            timers: vec![
                self.spawn_clear(client.to_string(), TRANSITION_MARKER, |t| t.marked = false),
                self.spawn_clear(client.to_string(), TOGGLE_LOCK, |t| t.locked = false),
            ],
        };
        clients.insert(client.to_string(), transition);

        Some(current.toggled())
    }

    /// Whether renders for this client should carry the transition marker.
    #[must_use]
    pub fn is_marked(&self, client: &str) -> bool {
        self.inner
            .lock_clients()
            .get(client)
            .is_some_and(|t| t.marked)
    }

    /// Whether toggles for this client are currently dropped.
    #[must_use]
    pub fn is_locked(&self, client: &str) -> bool {
        self.inner
            .lock_clients()
            .get(client)
            .is_some_and(|t| t.locked)
    }

    /// Spawn a timer that clears part of a client's transition state, and
    /// hand back its abort handle.
    fn spawn_clear(
        &self,
        client: String,
        after: Duration,
        clear: fn(&mut Transition),
    ) -> AbortHandle {
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            tokio::time::sleep(after).await;
            inner.clear(&client, clear);
        })
        .abort_handle()
    }
}

impl ThemeServiceInner {
    fn lock_clients(&self) -> MutexGuard<'_, HashMap<String, Transition>> {
        self.clients.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn clear(&self, client: &str, clear: fn(&mut Transition)) {
        let mut clients = self.lock_clients();
        if let Some(transition) = clients.get_mut(client) {
            clear(transition);
            if !transition.locked && !transition.marked {
                clients.remove(client);
            }
        }
    }
}

impl Drop for ThemeServiceInner {
    fn drop(&mut self) {
        let clients = self
            .clients
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner);
        for transition in clients.values() {
            transition.abort_timers();
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    /// Sleep past a deadline and let the spawned timers run.
    async fn advance(duration: Duration) {
        tokio::time::sleep(duration).await;
        tokio::task::yield_now().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_toggle_flips_and_locks() {
        let service = ThemeService::new();

        assert_eq!(service.try_toggle("c", Theme::Light), Some(Theme::Dark));
        assert!(service.is_locked("c"));
        assert!(service.is_marked("c"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_second_toggle_is_dropped() {
        let service = ThemeService::new();

        assert_eq!(service.try_toggle("c", Theme::Light), Some(Theme::Dark));
        // Within the lock window the second toggle is dropped, so the final
        // theme is the one produced by the first toggle alone.
        assert_eq!(service.try_toggle("c", Theme::Dark), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_marker_clears_before_lock() {
        let service = ThemeService::new();
        service.try_toggle("c", Theme::Light);

        advance(Duration::from_millis(550)).await;
        assert!(!service.is_marked("c"), "marker window is 500ms");
        assert!(service.is_locked("c"), "lock window is 600ms");

        advance(Duration::from_millis(100)).await;
        assert!(!service.is_locked("c"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_toggle_accepted_after_lock_expires() {
        let service = ThemeService::new();
        assert_eq!(service.try_toggle("c", Theme::Light), Some(Theme::Dark));

        advance(TOGGLE_LOCK + Duration::from_millis(10)).await;
        assert_eq!(service.try_toggle("c", Theme::Dark), Some(Theme::Light));
    }

    #[tokio::test(start_paused = true)]
    async fn test_clients_are_independent() {
        let service = ThemeService::new();

        assert_eq!(service.try_toggle("a", Theme::Light), Some(Theme::Dark));
        assert_eq!(service.try_toggle("b", Theme::Light), Some(Theme::Dark));
        assert_eq!(service.try_toggle("a", Theme::Dark), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transition_state_is_removed_after_both_windows() {
        let service = ThemeService::new();
        service.try_toggle("c", Theme::Light);

        advance(TOGGLE_LOCK + Duration::from_millis(10)).await;
        assert!(service.inner.lock_clients().is_empty());
    }
}
