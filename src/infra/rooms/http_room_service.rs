use crate::domain::ports::RoomService;
use crate::error::AppError;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::error;

pub struct HttpRoomService {
    client: Client,
    api_url: String,
    api_key: String,
}

impl HttpRoomService {
    pub fn new(api_url: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_url,
            api_key,
        }
    }
}

#[derive(Serialize)]
struct CreateRoomPayload {
    lesson_id: String,
}

#[derive(Deserialize)]
struct CreateRoomResponse {
    room_url: String,
}

#[async_trait]
impl RoomService for HttpRoomService {
    async fn create_room(&self, lesson_id: &str) -> Result<String, AppError> {
        let payload = CreateRoomPayload {
            lesson_id: lesson_id.to_string(),
        };

        let res = self.client.post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                let msg = format!("Room service connection error: {}", e);
                error!("{}", msg);
                AppError::InternalWithMsg(msg)
            })?;

        let status = res.status();
        if !status.is_success() {
            let text = res.text().await.unwrap_or_default();
            return Err(match status {
                StatusCode::UNAUTHORIZED => AppError::Unauthorized,
                StatusCode::NOT_FOUND => AppError::NotFound("Room resource not found".into()),
                _ => {
                    let msg = format!("Room service failed. Status: {}, Body: {}", status, text);
                    error!("{}", msg);
                    AppError::InternalWithMsg(msg)
                }
            });
        }

        let body = res.json::<CreateRoomResponse>().await.map_err(|e| {
            let msg = format!("Room service returned malformed response: {}", e);
            error!("{}", msg);
            AppError::InternalWithMsg(msg)
        })?;

        Ok(body.room_url)
    }
}
