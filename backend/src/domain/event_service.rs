//! Event service domain logic.
use anyhow::Result;
use tracing::info;

use crate::domain::capabilities::CapabilityQuery;
use crate::domain::models::Event;
use crate::storage::RecordStore;

#[derive(Clone)]
pub struct EventService<S: RecordStore> {
    store: S,
}

impl<S: RecordStore> EventService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn list_events(&self, query: &CapabilityQuery) -> Result<Vec<Event>> {
        let events = self.store.list_events(None).await?;
        let shaped: Vec<Event> = query.apply(&events).into_iter().cloned().collect();
        info!("Listing {} of {} events", shaped.len(), events.len());
        Ok(shaped)
    }

    pub async fn list_events_for_category(&self, category: &str, query: &CapabilityQuery) -> Result<Vec<Event>> {
        let events = self.store.list_events(Some(category)).await?;
        let shaped: Vec<Event> = query.apply(&events).into_iter().cloned().collect();
        info!("Listing {} of {} events in category {}", shaped.len(), events.len(), category);
        Ok(shaped)
    }

    pub async fn get_event(&self, category: &str, id: &str) -> Result<Option<Event>> {
        info!("Getting event {} in category {}", id, category);
        self.store.find_event(category, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::capabilities::RawCapabilities;
    use crate::storage::DbConnection;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2016, 10, 14, 0, 0, 0).unwrap()
    }

    async fn create_test_service() -> (EventService<DbConnection>, Vec<Event>) {
        let db = DbConnection::init_test().await.expect("Failed to init test DB");
        let seeds = [
            ("accounts/default/eventSID", "default", 0),
            ("accounts/5479-123456/cards", "5479-123456-other", 0),
            ("accounts/5479-123456/transactions/mockedTxSID", "5479-123456", 1),
            ("accounts/5479-123456/transactions/oldTxSID", "5479-123456", 40),
        ];
        let mut saved = Vec::new();
        for (origin, category, days_ago) in seeds {
            let event = Event::new(origin, category, "event information", now() - Duration::days(days_ago));
            saved.push(db.save_event(&event).await.unwrap());
        }
        (EventService::new(db), saved)
    }

    #[tokio::test]
    async fn test_list_all_events() {
        let (service, _) = create_test_service().await;
        let events = service.list_events(&CapabilityQuery::default()).await.unwrap();
        assert_eq!(events.len(), 4);
    }

    #[tokio::test]
    async fn test_list_events_by_category_and_interval() {
        let (service, _) = create_test_service().await;

        let events = service
            .list_events_for_category("5479-123456", &CapabilityQuery::default())
            .await
            .unwrap();
        assert_eq!(events.len(), 2);

        let raw = RawCapabilities {
            interval: Some("from::-14d".to_string()),
            ..Default::default()
        };
        let query = CapabilityQuery::parse(&raw, now()).unwrap();
        let events = service.list_events_for_category("5479-123456", &query).await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].origin, "accounts/5479-123456/transactions/mockedTxSID");
    }

    #[tokio::test]
    async fn test_get_event() {
        let (service, saved) = create_test_service().await;
        let found = service.get_event("default", &saved[0].id).await.unwrap();
        assert_eq!(found.as_ref(), Some(&saved[0]));
        assert!(service.get_event("5479-123456", &saved[0].id).await.unwrap().is_none());
    }
}
