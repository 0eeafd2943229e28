use reqwest::Client;

use crate::models::{NewWorkout, WorkoutRecord};

// ---------------------------------------------------------------------------
// Error Handling
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("{method} {path} returned {status}: {body}")]
    Status {
        method: &'static str,
        path: String,
        status: reqwest::StatusCode,
        body: String,
    },
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Thin wrapper over the backend's `/workouts/` resource. No retries, no
/// timeouts: a failed call is reported once and left to the caller.
#[derive(Debug, Clone)]
pub struct WorkoutClient {
    http: Client,
    base_url: String,
}

impl WorkoutClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn list(&self) -> Result<Vec<WorkoutRecord>, ApiError> {
        let path = "/workouts/";
        log::debug!("GET {}", self.url(path));
        let response = self.http.get(self.url(path)).send().await?;
        let response = check_status(response, "GET", path).await?;
        let workouts: Vec<WorkoutRecord> = response.json().await?;
        log::debug!("Fetched {} workouts", workouts.len());
        Ok(workouts)
    }

    /// The response body is not read; callers re-fetch the list instead.
    pub async fn create(&self, workout: &NewWorkout) -> Result<(), ApiError> {
        let path = "/workouts/";
        log::debug!("POST {} for {}", self.url(path), workout.date);
        let response = self.http.post(self.url(path)).json(workout).send().await?;
        check_status(response, "POST", path).await?;
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let path = format!("/workouts/{}", id);
        log::debug!("DELETE {}", self.url(&path));
        let response = self.http.delete(self.url(&path)).send().await?;
        check_status(response, "DELETE", &path).await?;
        Ok(())
    }
}

async fn check_status(
    response: reqwest::Response,
    method: &'static str,
    path: &str,
) -> Result<reqwest::Response, ApiError> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Status {
        method,
        path: path.to_string(),
        status,
        body,
    })
}
