use serde::{Deserialize, Serialize};

/// A habit owned by the logged-in user.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Habit {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "categoria_id")]
    pub category_id: i64,
    #[serde(rename = "usuario_id")]
    pub owner_id: i64,
    #[serde(rename = "unidad_medida")]
    pub unit: String,
    #[serde(rename = "meta_diaria")]
    pub daily_goal: f64,
    /// JSON-encoded list of weekday codes, e.g. `["L","M","X"]`.
    #[serde(rename = "dias")]
    pub days: String,
    pub color: String,
    /// 1 when active, 0 when archived.
    #[serde(rename = "activo", default = "default_active")]
    pub active: i32,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

fn default_active() -> i32 {
    1
}

impl Habit {
    pub fn is_active(&self) -> bool {
        self.active != 0
    }

    /// Decode the weekday list the backend keeps as a JSON string.
    pub fn weekdays(&self) -> Result<Vec<String>, serde_json::Error> {
        serde_json::from_str(&self.days)
    }
}

/// A habit to create. The owner is taken from the bearer token.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NewHabit {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "categoria_id")]
    pub category_id: i64,
    #[serde(rename = "unidad_medida")]
    pub unit: String,
    #[serde(rename = "meta_diaria")]
    pub daily_goal: f64,
    #[serde(rename = "dias")]
    pub days: String,
    pub color: String,
    #[serde(rename = "activo", skip_serializing_if = "Option::is_none")]
    pub active: Option<i32>,
}

/// A partial habit update. Absent fields are omitted from the request body.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct HabitUpdate {
    #[serde(rename = "nombre", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "descripcion", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "categoria_id", skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(rename = "unidad_medida", skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(rename = "meta_diaria", skip_serializing_if = "Option::is_none")]
    pub daily_goal: Option<f64>,
    #[serde(rename = "dias", skip_serializing_if = "Option::is_none")]
    pub days: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(rename = "activo", skip_serializing_if = "Option::is_none")]
    pub active: Option<i32>,
}

/// A habit category.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Category {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}
