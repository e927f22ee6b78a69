use chrono::NaiveDate;

use super::client::ApiClient;
use super::error::ApiError;
use crate::models::{DailyRecordWithProgress, Progress, ProgressUpdate};

impl ApiClient {
    /// The day's record with one progress entry per habit. The backend creates
    /// the record on first access.
    pub async fn record_for_date(&self, date: NaiveDate) -> Result<DailyRecordWithProgress, ApiError> {
        self.get(&format!("/registros/fecha/{}", date.format("%Y-%m-%d")))
            .await
    }

    pub async fn toggle_progress(&self, progress_id: i64) -> Result<Progress, ApiError> {
        self.request::<Progress, ()>(
            reqwest::Method::POST,
            &format!("/registros/progreso/toggle/{}", progress_id),
            None,
        )
        .await
    }

    pub async fn update_progress(
        &self,
        progress_id: i64,
        update: &ProgressUpdate,
    ) -> Result<Progress, ApiError> {
        self.put(&format!("/registros/progreso/{}", progress_id), update)
            .await
    }
}
