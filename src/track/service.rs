//! Client side of the vessel data source.
//!
//! [`TrackSource`] abstracts over where tracks come from so the replay
//! session can be driven by a fake in tests. [`TrackDataService`] talks to
//! the HTTP data source (`/vesselList`, `/vesselPoints/{id}`).

use std::future::Future;
use std::time::Duration;

use chrono::SecondsFormat;
use reqwest::Url;

use super::error::TrackError;
use super::types::{TimeWindow, Track, TrackPoint};

pub trait TrackSource: Send + Sync {
    /// Identifiers of every vessel the source knows about.
    fn list_vessels(&self) -> impl Future<Output = Result<Vec<String>, TrackError>> + Send;

    /// Ordered samples of one vessel, restricted to `window` when both
    /// bounds are set.
    fn fetch_track(
        &self,
        vessel_id: &str,
        window: &TimeWindow,
    ) -> impl Future<Output = Result<Track, TrackError>> + Send;
}

/// HTTP client for the vessel data source. Every call goes to the network;
/// nothing is cached.
pub struct TrackDataService {
    http: reqwest::Client,
    base_url: Url,
}

impl TrackDataService {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, TrackError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| TrackError::Transport(format!("invalid source url {base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(TrackError::Transport(format!(
                "invalid source url {base_url}: not a base url"
            )));
        }
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub fn vessel_points_url(&self, vessel_id: &str, window: &TimeWindow) -> Url {
        let mut url = self.endpoint(&["vesselPoints", vessel_id]);
        if let Some((start, end)) = window.bounds() {
            url.query_pairs_mut()
                .append_pair("start_time", &start.to_rfc3339_opts(SecondsFormat::AutoSi, true))
                .append_pair("end_time", &end.to_rfc3339_opts(SecondsFormat::AutoSi, true));
        }
        url
    }
}

impl TrackSource for TrackDataService {
    async fn list_vessels(&self) -> Result<Vec<String>, TrackError> {
        let url = self.endpoint(&["vesselList"]);
        let vessels: Vec<String> = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        log::debug!("fetched {} vessel ids", vessels.len());
        Ok(vessels)
    }

    async fn fetch_track(&self, vessel_id: &str, window: &TimeWindow) -> Result<Track, TrackError> {
        let url = self.vessel_points_url(vessel_id, window);
        log::debug!("fetching track {}", url);

        let points: Vec<TrackPoint> = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        log::info!("vessel {} returned {} points", vessel_id, points.len());
        Track::new(vessel_id, points)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::config::ServerConfig;
    use crate::track::fixtures::point;
    use crate::web::dataset::{Dataset, VesselRecord};
    use crate::web::server::build_router;

    fn record(mmsi: &str, lon: f64, hour: u32) -> VesselRecord {
        VesselRecord {
            mmsi: mmsi.to_string(),
            point: point(lon, 50.0, hour, 0),
        }
    }

    async fn spawn_source(records: Vec<VesselRecord>) -> String {
        let dataset = Arc::new(Dataset::from_records(records));
        let app = build_router(dataset, &ServerConfig::default());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn service(base_url: &str) -> TrackDataService {
        TrackDataService::new(base_url, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn window_bounds_become_query_parameters() {
        let svc = service("http://localhost:8000/api/");
        let start = Utc.with_ymd_and_hms(2012, 11, 4, 7, 11, 59).unwrap();
        let end = Utc.with_ymd_and_hms(2012, 12, 31, 11, 48, 31).unwrap();

        let url = svc.vessel_points_url("123 456", &TimeWindow::new(Some(start), Some(end)));
        assert_eq!(url.path(), "/api/vesselPoints/123%20456");
        assert_eq!(
            url.query(),
            Some("start_time=2012-11-04T07%3A11%3A59Z&end_time=2012-12-31T11%3A48%3A31Z")
        );

        let url = svc.vessel_points_url("1", &TimeWindow::new(Some(start), None));
        assert_eq!(url.query(), None);
    }

    #[test]
    fn rejects_unusable_base_url() {
        assert!(matches!(
            TrackDataService::new("not a url", Duration::from_secs(1)),
            Err(TrackError::Transport(_))
        ));
        assert!(TrackDataService::new("mailto:ops@example.com", Duration::from_secs(1)).is_err());
    }

    #[tokio::test]
    async fn lists_vessels() {
        let base = spawn_source(vec![
            record("222", 10.0, 0),
            record("111", 10.0, 0),
            record("222", 10.1, 1),
        ])
        .await;

        let vessels = service(&base).list_vessels().await.unwrap();
        assert_eq!(vessels, vec!["111".to_string(), "222".to_string()]);
    }

    #[tokio::test]
    async fn fetches_track_in_window() {
        let base = spawn_source(vec![
            record("111", 10.0, 0),
            record("111", 10.1, 1),
            record("111", 10.2, 2),
            record("111", 10.3, 3),
        ])
        .await;
        let svc = service(&base);

        let all = svc
            .fetch_track("111", &TimeWindow::full_history())
            .await
            .unwrap();
        assert_eq!(all.len(), 4);
        assert_eq!(all.vessel_id(), "111");

        let window = TimeWindow::new(
            Some(Utc.with_ymd_and_hms(2020, 1, 1, 1, 0, 0).unwrap()),
            Some(Utc.with_ymd_and_hms(2020, 1, 1, 2, 0, 0).unwrap()),
        );
        let some = svc.fetch_track("111", &window).await.unwrap();
        assert_eq!(some.len(), 2);
        assert_eq!(some.first().longitude, 10.1);
        assert_eq!(some.last().longitude, 10.2);
    }

    #[tokio::test]
    async fn single_point_is_insufficient() {
        let base = spawn_source(vec![record("111", 10.0, 0)]).await;

        let err = service(&base)
            .fetch_track("111", &TimeWindow::full_history())
            .await
            .unwrap_err();
        assert!(matches!(err, TrackError::InsufficientData { count: 1, .. }));

        let err = service(&base)
            .fetch_track("unknown", &TimeWindow::full_history())
            .await
            .unwrap_err();
        assert!(matches!(err, TrackError::InsufficientData { count: 0, .. }));
    }

    #[tokio::test]
    async fn unreachable_source_is_transport_error() {
        // Bind and drop to get a port nobody listens on.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = service(&format!("http://{}", addr))
            .list_vessels()
            .await
            .unwrap_err();
        assert!(matches!(err, TrackError::Transport(_)));
    }

    #[tokio::test]
    async fn malformed_response_is_transport_error() {
        let app = axum::Router::new().route(
            "/vesselList",
            axum::routing::get(|| async { "definitely not json" }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let err = service(&format!("http://{}", addr))
            .list_vessels()
            .await
            .unwrap_err();
        assert!(matches!(err, TrackError::Transport(_)));
    }
}
