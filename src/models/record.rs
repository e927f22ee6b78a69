use serde::{Deserialize, Serialize};

/// One day in the user's log.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DailyRecord {
    pub id: i64,
    #[serde(rename = "usuario_id")]
    pub owner_id: i64,
    /// `YYYY-MM-DD`
    #[serde(rename = "fecha")]
    pub date: String,
    #[serde(rename = "notas", default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// A daily record together with the progress of every habit on that day.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DailyRecordWithProgress {
    #[serde(flatten)]
    pub record: DailyRecord,
    #[serde(rename = "progresos", default)]
    pub progress: Vec<Progress>,
}

impl DailyRecordWithProgress {
    pub fn completed_count(&self) -> usize {
        self.progress.iter().filter(|p| p.completed).count()
    }
}

/// Progress of one habit within one daily record.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Progress {
    pub id: i64,
    #[serde(rename = "registro_id")]
    pub record_id: i64,
    #[serde(rename = "habito_id")]
    pub habit_id: i64,
    #[serde(rename = "valor", default)]
    pub value: f64,
    #[serde(rename = "completado", default)]
    pub completed: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ProgressUpdate {
    #[serde(rename = "valor", skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(rename = "completado", skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_with_nested_progress() {
        let parsed: DailyRecordWithProgress = serde_json::from_value(json!({
            "id": 11, "usuario_id": 2, "fecha": "2025-05-04", "notas": "rainy",
            "created_at": "2025-05-04T06:00:00", "updated_at": null,
            "progresos": [
                {"id": 1, "registro_id": 11, "habito_id": 4, "valor": 3.0, "completado": true},
                {"id": 2, "registro_id": 11, "habito_id": 5, "valor": 0.0, "completado": false}
            ]
        }))
        .unwrap();
        assert_eq!(parsed.record.date, "2025-05-04");
        assert_eq!(parsed.record.notes.as_deref(), Some("rainy"));
        assert_eq!(parsed.progress.len(), 2);
        assert_eq!(parsed.completed_count(), 1);
    }

    #[test]
    fn test_missing_progress_list_is_empty() {
        let parsed: DailyRecordWithProgress = serde_json::from_value(json!({
            "id": 11, "usuario_id": 2, "fecha": "2025-05-04"
        }))
        .unwrap();
        assert!(parsed.progress.is_empty());
    }
}
