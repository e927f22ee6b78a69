use super::client::ApiClient;
use super::error::ApiError;
use crate::models::{Category, Habit, HabitUpdate, NewHabit};

impl ApiClient {
    pub async fn habits(&self) -> Result<Vec<Habit>, ApiError> {
        self.get("/habitos/").await
    }

    pub async fn habit(&self, id: i64) -> Result<Habit, ApiError> {
        self.get(&format!("/habitos/{}", id)).await
    }

    /// The backend takes the owner from the token.
    pub async fn create_habit(&self, habit: &NewHabit) -> Result<Habit, ApiError> {
        self.post("/habitos/", habit).await
    }

    pub async fn update_habit(&self, id: i64, update: &HabitUpdate) -> Result<Habit, ApiError> {
        self.put(&format!("/habitos/{}", id), update).await
    }

    pub async fn delete_habit(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/habitos/{}", id)).await
    }

    pub async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        self.get("/categorias/").await
    }

    pub async fn category(&self, id: i64) -> Result<Category, ApiError> {
        self.get(&format!("/categorias/{}", id)).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use mockito::{Matcher, Server};
    use serde_json::json;

    use crate::api::navigator::RedirectSlot;
    use crate::api::{ApiClient, ApiError};
    use crate::config::{ApiConfig, SessionConfig};
    use crate::models::{HabitUpdate, NewHabit, Profile};
    use crate::session::{SessionStore, TOKEN_KEY};
    use crate::store::{KeyValueStore, MemoryStore};

    const HABIT: &str = r##"{
        "id": 4, "nombre": "Read", "descripcion": null, "categoria_id": 2,
        "usuario_id": 1, "unidad_medida": "pages", "meta_diaria": 20.0,
        "dias": "[\"L\",\"M\"]", "color": "#ff8800", "activo": 1,
        "created_at": "2025-03-01T10:00:00"
    }"##;

    fn logged_in(base_url: String) -> (ApiClient, Arc<MemoryStore>, Arc<RedirectSlot>) {
        let storage = Arc::new(MemoryStore::new());
        let session = Arc::new(SessionStore::new(storage.clone()));
        session.set_session(
            "tok1",
            Profile {
                id: 1,
                name: "Ana".to_string(),
                email: "a@x.com".to_string(),
                show_future: false,
                created_at: None,
                updated_at: None,
            },
        );
        let redirects = Arc::new(RedirectSlot::new());
        let api = ApiClient::new(
            &ApiConfig { base_url },
            &SessionConfig::default(),
            session,
            redirects.clone(),
        );
        (api, storage, redirects)
    }

    #[tokio::test]
    async fn test_list_habits() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/habitos/")
            .match_header("authorization", "Bearer tok1")
            .with_status(200)
            .with_body(format!("[{}]", HABIT))
            .create_async()
            .await;

        let (api, _, _) = logged_in(server.url());
        let habits = api.habits().await.unwrap();
        m.assert_async().await;
        assert_eq!(habits.len(), 1);
        assert_eq!(habits[0].name, "Read");
    }

    #[tokio::test]
    async fn test_rejected_token_expires_session() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/habitos/")
            .with_status(401)
            .with_body(r#"{"detail": "invalid token"}"#)
            .create_async()
            .await;

        let (api, storage, redirects) = logged_in(server.url());
        let err = api.habits().await.unwrap_err();

        assert!(matches!(err, ApiError::SessionExpired));
        assert!(!api.session().is_authenticated());
        assert_eq!(storage.get(TOKEN_KEY).unwrap(), None);
        assert_eq!(redirects.take().as_deref(), Some("/login"));
    }

    #[tokio::test]
    async fn test_create_and_update_habit() {
        let mut server = Server::new_async().await;
        let create = server
            .mock("POST", "/habitos/")
            .match_body(Matcher::PartialJson(json!({"nombre": "Read", "meta_diaria": 20.0})))
            .with_status(201)
            .with_body(HABIT)
            .create_async()
            .await;
        let update = server
            .mock("PUT", "/habitos/4")
            .match_body(Matcher::Json(json!({"activo": 0})))
            .with_status(200)
            .with_body(HABIT.replace(r#""activo": 1"#, r#""activo": 0"#))
            .create_async()
            .await;

        let (api, _, _) = logged_in(server.url());
        let created = api
            .create_habit(&NewHabit {
                name: "Read".to_string(),
                description: None,
                category_id: 2,
                unit: "pages".to_string(),
                daily_goal: 20.0,
                days: r#"["L","M"]"#.to_string(),
                color: "#ff8800".to_string(),
                active: None,
            })
            .await
            .unwrap();
        let updated = api
            .update_habit(
                created.id,
                &HabitUpdate {
                    active: Some(0),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        create.assert_async().await;
        update.assert_async().await;
        assert!(!updated.is_active());
    }

    #[tokio::test]
    async fn test_delete_habit_ignores_empty_body() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("DELETE", "/habitos/4")
            .with_status(204)
            .create_async()
            .await;

        let (api, _, _) = logged_in(server.url());
        api.delete_habit(4).await.unwrap();
        m.assert_async().await;
    }

    #[tokio::test]
    async fn test_missing_category_reports_detail() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/categorias/42")
            .with_status(404)
            .with_body(r#"{"detail": "Categoría no encontrada"}"#)
            .create_async()
            .await;

        let (api, _, _) = logged_in(server.url());
        let err = api.category(42).await.unwrap_err();
        assert_eq!(err.detail(), Some("Categoría no encontrada"));
        assert!(api.session().is_authenticated());
    }

    #[tokio::test]
    async fn test_list_categories() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/categorias/")
            .with_status(200)
            .with_body(r#"[{"id": 1, "nombre": "Salud"}, {"id": 2, "nombre": "Estudio"}]"#)
            .create_async()
            .await;

        let (api, _, _) = logged_in(server.url());
        let categories = api.categories().await.unwrap();
        assert_eq!(categories[1].name, "Estudio");
    }
}
