//! Client-side cache of the backend's workout list.
//!
//! Synchronisation is list replacement: every successful create or delete is
//! followed by a full re-fetch that swaps the whole vector, so readers never
//! see a partially patched list. Network failures are logged and swallowed;
//! the previous list stays in place.

use crate::api::WorkoutClient;
use crate::models::{NewWorkout, WorkoutRecord};

pub const HISTORY_PAGE_SIZE: usize = 5;

/// Number of history pages for `len` records; an empty list still has one.
pub fn page_count(len: usize) -> usize {
    len.div_ceil(HISTORY_PAGE_SIZE).max(1)
}

pub struct RecordStore {
    client: WorkoutClient,
    records: Vec<WorkoutRecord>,
    busy: bool,
}

impl RecordStore {
    pub fn new(client: WorkoutClient) -> Self {
        Self {
            client,
            records: Vec::new(),
            busy: false,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_records(client: WorkoutClient, records: Vec<WorkoutRecord>) -> Self {
        Self {
            client,
            records,
            busy: false,
        }
    }

    pub fn records(&self) -> &[WorkoutRecord] {
        &self.records
    }

    /// Set while a create or delete is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn client(&self) -> &WorkoutClient {
        &self.client
    }

    /// Replace the list with the backend's. Returns false on failure.
    pub async fn refresh(&mut self) -> bool {
        match self.client.list().await {
            Ok(records) => {
                self.records = records;
                true
            }
            Err(e) => {
                log::error!("Error fetching workouts: {}", e);
                false
            }
        }
    }

    /// Submit a workout, then re-fetch. Returns false if either step failed.
    pub async fn create(&mut self, workout: &NewWorkout) -> bool {
        if self.busy {
            log::warn!("Ignoring submit while another request is in flight");
            return false;
        }
        self.busy = true;
        let ok = match self.client.create(workout).await {
            Ok(()) => {
                log::info!("Logged workout for {}", workout.date);
                self.refresh().await
            }
            Err(e) => {
                log::error!("Error creating workout: {}", e);
                false
            }
        };
        self.busy = false;
        ok
    }

    /// Delete by id, then re-fetch. The record stays in the list until the
    /// re-fetch confirms it is gone.
    pub async fn delete(&mut self, id: i64) -> bool {
        if self.busy {
            log::warn!("Ignoring delete while another request is in flight");
            return false;
        }
        self.busy = true;
        let ok = match self.client.delete(id).await {
            Ok(()) => {
                log::info!("Deleted workout {}", id);
                self.refresh().await
            }
            Err(e) => {
                log::error!("Error deleting workout: {}", e);
                false
            }
        };
        self.busy = false;
        ok
    }

    pub fn find(&self, id: i64) -> Option<&WorkoutRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Records by date, newest first; same-day entries by id, newest first.
    pub fn newest_first(&self) -> Vec<&WorkoutRecord> {
        let mut sorted: Vec<&WorkoutRecord> = self.records.iter().collect();
        sorted.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        sorted
    }

    /// One page of history. `page` is zero-based and clamped to the last page.
    pub fn history_page(&self, page: usize) -> Vec<&WorkoutRecord> {
        let page = page.min(page_count(self.records.len()) - 1);
        self.newest_first()
            .into_iter()
            .skip(page * HISTORY_PAGE_SIZE)
            .take(HISTORY_PAGE_SIZE)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WorkoutForm;
    use chrono::NaiveDate;

    const ONE_ROW: &str = r#"[{"id": 1, "date": "2024-01-01", "kettlebell_swings": 100, "turkish_get_ups": 10}]"#;
    const TWO_ROWS: &str = r#"[
        {"id": 1, "date": "2024-01-01", "kettlebell_swings": 100, "turkish_get_ups": 10},
        {"id": 2, "date": "2024-01-02", "kettlebell_swings": 100, "turkish_get_ups": 10}
    ]"#;

    fn new_workout() -> NewWorkout {
        let today = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let mut form = WorkoutForm::new(today);
        form.kettlebell_swings = "100".to_string();
        form.getup_reps_1 = "10".to_string();
        form.to_new_workout(today)
    }

    #[tokio::test]
    async fn refresh_replaces_list() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/workouts/")
            .with_status(200)
            .with_body(ONE_ROW)
            .create_async()
            .await;

        let mut store = RecordStore::new(WorkoutClient::new(server.url()));
        assert!(store.refresh().await);
        assert_eq!(store.records().len(), 1);
        assert!(store.find(1).is_some());
    }

    #[tokio::test]
    async fn create_refetches_and_clears_busy() {
        let mut server = mockito::Server::new_async().await;
        let post = server
            .mock("POST", "/workouts/")
            .with_status(200)
            .with_body(r#"{"id": 2, "date": "2024-01-02"}"#)
            .create_async()
            .await;
        let get = server
            .mock("GET", "/workouts/")
            .with_status(200)
            .with_body(TWO_ROWS)
            .expect(1)
            .create_async()
            .await;

        let mut store = RecordStore::new(WorkoutClient::new(server.url()));
        assert!(store.create(&new_workout()).await);

        post.assert_async().await;
        get.assert_async().await;
        assert_eq!(store.records().len(), 2);
        assert!(!store.is_busy());
    }

    #[tokio::test]
    async fn create_with_empty_body_still_refetches() {
        let mut server = mockito::Server::new_async().await;
        let post = server
            .mock("POST", "/workouts/")
            .with_status(201)
            .create_async()
            .await;
        let get = server
            .mock("GET", "/workouts/")
            .with_status(200)
            .with_body(ONE_ROW)
            .expect(1)
            .create_async()
            .await;

        let mut store = RecordStore::new(WorkoutClient::new(server.url()));
        assert!(store.create(&new_workout()).await);

        post.assert_async().await;
        get.assert_async().await;
        assert_eq!(store.records().len(), 1);
        assert!(!store.is_busy());
    }

    #[tokio::test]
    async fn failed_create_keeps_stale_list() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/workouts/")
            .with_status(200)
            .with_body(ONE_ROW)
            .expect(1)
            .create_async()
            .await;
        server
            .mock("POST", "/workouts/")
            .with_status(500)
            .create_async()
            .await;

        let mut store = RecordStore::new(WorkoutClient::new(server.url()));
        store.refresh().await;
        assert!(!store.create(&new_workout()).await);
        assert_eq!(store.records().len(), 1);
        assert!(!store.is_busy());
    }

    #[tokio::test]
    async fn delete_refetches() {
        let mut server = mockito::Server::new_async().await;
        let mut store = RecordStore::new(WorkoutClient::new(server.url()));

        let first = server
            .mock("GET", "/workouts/")
            .with_status(200)
            .with_body(TWO_ROWS)
            .create_async()
            .await;
        store.refresh().await;
        assert_eq!(store.records().len(), 2);
        first.remove_async().await;

        server
            .mock("DELETE", "/workouts/2")
            .with_status(200)
            .create_async()
            .await;
        server
            .mock("GET", "/workouts/")
            .with_status(200)
            .with_body(ONE_ROW)
            .create_async()
            .await;

        assert!(store.delete(2).await);
        assert_eq!(store.records().len(), 1);
        assert!(store.find(2).is_none());
        assert!(!store.is_busy());
    }

    #[tokio::test]
    async fn history_pages_newest_first() {
        let mut server = mockito::Server::new_async().await;
        let rows: Vec<String> = (1..=7)
            .map(|i| format!(r#"{{"id": {}, "date": "2024-01-{:02}"}}"#, i, i))
            .collect();
        server
            .mock("GET", "/workouts/")
            .with_status(200)
            .with_body(format!("[{}]", rows.join(",")))
            .create_async()
            .await;

        let mut store = RecordStore::new(WorkoutClient::new(server.url()));
        store.refresh().await;

        assert_eq!(page_count(store.records().len()), 2);
        let first: Vec<i64> = store.history_page(0).iter().map(|r| r.id).collect();
        assert_eq!(first, vec![7, 6, 5, 4, 3]);
        let last: Vec<i64> = store.history_page(9).iter().map(|r| r.id).collect();
        assert_eq!(last, vec![2, 1]);
    }

    #[test]
    fn empty_history_has_one_page() {
        assert_eq!(page_count(0), 1);
        assert_eq!(page_count(5), 1);
        assert_eq!(page_count(6), 2);
    }

    #[tokio::test]
    async fn unreachable_backend_leaves_empty_view() {
        let mut store = RecordStore::new(WorkoutClient::new("http://127.0.0.1:9"));
        assert!(!store.refresh().await);
        assert!(store.records().is_empty());
        assert!(!store.delete(1).await);
        assert!(!store.is_busy());
    }
}
