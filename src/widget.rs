use crate::error::DashboardError;
use std::future::Future;
use std::time::Duration;

pub const SCORES_POLL: Duration = Duration::from_secs(30);
pub const NEWS_POLL: Duration = Duration::from_secs(300);

/// Lifecycle of one display widget: `Idle -> Loading -> (Ready | Failed)`
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetState<T> {
    Idle,
    Loading,
    Ready(T),
    Failed(String),
}

/// A self-contained display unit that owns its own fetched data.
/// Widgets never share data; two widgets showing the same upstream data fetch it twice.
#[derive(Debug, Clone)]
pub struct Widget<T> {
    title: &'static str,
    failure_message: &'static str,
    poll_interval: Option<Duration>,
    state: WidgetState<T>,
}

impl<T> Widget<T> {
    pub fn new(title: &'static str, failure_message: &'static str) -> Self {
        Self {
            title,
            failure_message,
            poll_interval: None,
            state: WidgetState::Idle,
        }
    }

    /// Refetch on a fixed interval (live data)
    pub fn polling(mut self, interval: Duration) -> Self {
        self.poll_interval = Some(interval);
        self
    }

    pub fn title(&self) -> &str {
        self.title
    }

    pub fn state(&self) -> &WidgetState<T> {
        &self.state
    }

    pub fn poll_interval(&self) -> Option<Duration> {
        self.poll_interval
    }

    pub fn poll_seconds(&self) -> Option<u64> {
        self.poll_interval.map(|d| d.as_secs())
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, WidgetState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match &self.state {
            WidgetState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            WidgetState::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }

    /// Enter `Loading`. Refused (returns false) while a load is already in flight.
    pub fn begin_refresh(&mut self) -> bool {
        if self.is_loading() {
            return false;
        }
        self.state = WidgetState::Loading;
        true
    }

    /// Settle a load. Any failure shows the same message; the cause only goes to the log.
    pub fn complete(&mut self, result: Result<T, DashboardError>) {
        self.state = match result {
            Ok(data) => WidgetState::Ready(data),
            Err(e) => {
                tracing::warn!("{} widget failed: {}", self.title, e);
                WidgetState::Failed(self.failure_message.to_string())
            }
        };
    }

    /// One full fetch cycle. Returns false if a load was already running.
    pub async fn refresh<F>(&mut self, load: F) -> bool
    where
        F: Future<Output = Result<T, DashboardError>>,
    {
        if !self.begin_refresh() {
            return false;
        }
        self.complete(load.await);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget() -> Widget<Vec<u32>> {
        Widget::new("Scores", "Failed to load scores")
    }

    #[test]
    fn test_starts_idle() {
        let w = widget();
        assert_eq!(w.state(), &WidgetState::Idle);
        assert!(w.data().is_none());
        assert!(w.error().is_none());
        assert!(w.poll_interval().is_none());
    }

    #[test]
    fn test_loading_refuses_overlapping_refresh() {
        let mut w = widget();
        assert!(w.begin_refresh());
        assert!(w.is_loading());
        assert!(!w.begin_refresh());
    }

    #[tokio::test]
    async fn test_success_then_failure_then_retry() {
        let mut w = widget().polling(SCORES_POLL);
        assert_eq!(w.poll_seconds(), Some(30));

        assert!(w.refresh(async { Ok(vec![1, 2, 3]) }).await);
        assert_eq!(w.data(), Some(&vec![1, 2, 3]));

        let failed = w
            .refresh(async {
                Err(DashboardError::UpstreamStatus {
                    status: 500,
                    url: "http://upstream.test".to_string(),
                })
            })
            .await;
        assert!(failed);
        assert_eq!(w.error(), Some("Failed to load scores"));
        assert!(w.data().is_none());

        assert!(w.refresh(async { Ok(vec![4]) }).await);
        assert_eq!(w.state(), &WidgetState::Ready(vec![4]));
    }
}
