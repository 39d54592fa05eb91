use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// `.alert-dismissible` flash message
pub trait DismissibleAlert: Send + Sync {
    /// Clicks the message's `.btn-close`. Returns false when it has none.
    fn click_close(&self) -> bool;
}

/// 每則訊息各自計時，到時點擊關閉按鈕
pub fn schedule_dismissal(
    alerts: Vec<Arc<dyn DismissibleAlert>>,
    delay: Duration,
) -> Vec<JoinHandle<bool>> {
    tracing::debug!("⏲️ Dismissing {} flash message(s) after {:?}", alerts.len(), delay);

    alerts
        .into_iter()
        .map(|alert| {
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                alert.click_close()
            })
        })
        .collect()
}
