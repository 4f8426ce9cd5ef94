use log::{debug, info, warn};
use reqwest::{Client, StatusCode};
use std::time::Duration;

use super::{ogs, usgs, QueryWindow};
use crate::error::FeedError;
use crate::event::{Event, FeedSource};

const MAX_TRIES: u32 = 3;
const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Map a non-success status to its error and whether it is worth retrying.
///
/// A 400 means the query itself was rejected and is never retried. Only
/// server errors are retried.
fn classify_status(feed: FeedSource, status: StatusCode) -> (FeedError, bool) {
    if status == StatusCode::BAD_REQUEST {
        return (FeedError::BadRequest(feed), false);
    }
    let failure = FeedError::Status {
        feed,
        status: status.as_u16(),
    };
    (failure, status.is_server_error())
}

/// HTTP access to both feeds. Cheap to clone.
#[derive(Debug, Clone)]
pub struct FeedClient {
    http: Client,
    max_tries: u32,
}

impl FeedClient {
    pub fn new() -> reqwest::Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(FeedClient {
            http,
            max_tries: MAX_TRIES,
        })
    }

    /// Fetch and normalize USGS events for `window`.
    pub async fn fetch_usgs(&self, window: &QueryWindow) -> Result<Vec<Event>, FeedError> {
        let body = self.get_body(FeedSource::Usgs, &usgs::query_url(window)).await?;
        usgs::parse_feed(&body).map_err(|source| FeedError::Decode {
            feed: FeedSource::Usgs,
            source,
        })
    }

    /// Fetch and normalize OGS events for `window`.
    pub async fn fetch_ogs(&self, window: &QueryWindow) -> Result<Vec<Event>, FeedError> {
        let body = self.get_body(FeedSource::Ogs, &ogs::query_url(window)).await?;
        ogs::parse_feed(&body, window).map_err(|source| FeedError::Decode {
            feed: FeedSource::Ogs,
            source,
        })
    }

    /// GET `url` with retry and exponential backoff.
    ///
    /// Transport errors and 5xx responses are retried. A 400 is returned at
    /// once as [`FeedError::BadRequest`]; other statuses are not retried.
    async fn get_body(&self, feed: FeedSource, url: &str) -> Result<String, FeedError> {
        let mut sleep_millis: u64 = 1000;
        let mut attempt = 1;
        loop {
            debug!("Attempt {}/{}: GET {}", attempt, self.max_tries, url);
            let failure = match self.http.get(url).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return response
                            .text()
                            .await
                            .map_err(|source| FeedError::Http { feed, source });
                    }
                    warn!(
                        "Attempt {}/{}: Bad response status for {}: {}",
                        attempt, self.max_tries, feed, status
                    );
                    let (failure, retry) = classify_status(feed, status);
                    if !retry {
                        return Err(failure);
                    }
                    failure
                }
                Err(source) => {
                    warn!(
                        "Attempt {}/{}: Request failed for {}: {}",
                        attempt, self.max_tries, feed, source
                    );
                    FeedError::Http { feed, source }
                }
            };

            if attempt >= self.max_tries {
                warn!("All attempts failed for {}", feed);
                return Err(failure);
            }
            info!(
                "Sleeping for {} milliseconds before retry for {}",
                sleep_millis, feed
            );
            tokio::time::sleep(Duration::from_millis(sleep_millis)).await;
            sleep_millis *= 2;
            attempt += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_request_is_not_retried() {
        let (error, retry) = classify_status(FeedSource::Ogs, StatusCode::BAD_REQUEST);
        assert!(matches!(error, FeedError::BadRequest(FeedSource::Ogs)));
        assert!(!retry);
    }

    #[test]
    fn test_server_error_is_retried() {
        let (error, retry) = classify_status(FeedSource::Usgs, StatusCode::SERVICE_UNAVAILABLE);
        assert!(matches!(
            error,
            FeedError::Status {
                feed: FeedSource::Usgs,
                status: 503
            }
        ));
        assert!(retry);
    }

    #[test]
    fn test_other_client_error_fails_at_once() {
        let (error, retry) = classify_status(FeedSource::Usgs, StatusCode::NOT_FOUND);
        assert!(matches!(error, FeedError::Status { status: 404, .. }));
        assert_eq!(error.feed(), FeedSource::Usgs);
        assert!(!retry);
    }
}
