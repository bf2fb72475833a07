//! Inbound request limiter.
//!
//! A sliding window per (client address, path). Each key keeps the timestamps of its
//! recent hits; anything older than the window is dropped before counting.

use std::collections::{HashMap, VecDeque};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::{
    extract::{ConnectInfo, Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::errors::AppError;

/// Keys with no hit inside the window are swept once the map grows past this.
const SWEEP_THRESHOLD: usize = 10_000;

type Key = (IpAddr, String);

pub struct SlidingWindowLimiter {
    window: Duration,
    max_requests: usize,
    hits: Mutex<HashMap<Key, VecDeque<Instant>>>,
}

impl SlidingWindowLimiter {
    pub fn new(window: Duration, max_requests: usize) -> Self {
        Self {
            window,
            max_requests,
            hits: Mutex::new(HashMap::new()),
        }
    }

    /// Records a hit at `now` and returns whether it is within the limit.
    /// Rejected hits are not recorded.
    pub fn check(&self, ip: IpAddr, path: &str, now: Instant) -> bool {
        let mut hits = self.hits.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        if hits.len() > SWEEP_THRESHOLD {
            let window = self.window;
            hits.retain(|_, q| q.back().is_some_and(|t| now.duration_since(*t) < window));
        }

        let queue = hits.entry((ip, path.to_string())).or_default();
        while queue
            .front()
            .is_some_and(|t| now.duration_since(*t) >= self.window)
        {
            queue.pop_front();
        }

        if queue.len() >= self.max_requests {
            return false;
        }
        queue.push_back(now);
        true
    }
}

/// First `X-Forwarded-For` entry if it parses, else the socket peer.
pub fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> IpAddr {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .and_then(|v| v.trim().parse::<IpAddr>().ok())
        .or_else(|| peer.map(|p| p.ip()))
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
}

pub async fn rate_limit_middleware(
    State(limiter): State<Arc<SlidingWindowLimiter>>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let peer = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let ip = client_ip(req.headers(), peer);
    let path = req.uri().path().to_string();

    if !limiter.check(ip, &path, Instant::now()) {
        warn!("Rate limit exceeded for {ip} on {path}");
        return Err(AppError::RateLimited);
    }
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{HeaderValue, StatusCode},
        middleware::from_fn_with_state,
        routing::get,
        Router,
    };
    use tower::ServiceExt;

    fn ip(last: u8) -> IpAddr {
        IpAddr::V4(Ipv4Addr::new(10, 0, 0, last))
    }

    #[test]
    fn test_allows_up_to_max_then_rejects() {
        let limiter = SlidingWindowLimiter::new(Duration::from_secs(60), 3);
        let now = Instant::now();
        assert!(limiter.check(ip(1), "/a", now));
        assert!(limiter.check(ip(1), "/a", now));
        assert!(limiter.check(ip(1), "/a", now));
        assert!(!limiter.check(ip(1), "/a", now));
    }

    #[test]
    fn test_window_slides() {
        let limiter = SlidingWindowLimiter::new(Duration::from_secs(10), 2);
        let t0 = Instant::now();
        assert!(limiter.check(ip(1), "/a", t0));
        assert!(limiter.check(ip(1), "/a", t0 + Duration::from_secs(5)));
        assert!(!limiter.check(ip(1), "/a", t0 + Duration::from_secs(9)));
        // The first hit has aged out; the second is still inside.
        assert!(limiter.check(ip(1), "/a", t0 + Duration::from_secs(10)));
        assert!(!limiter.check(ip(1), "/a", t0 + Duration::from_secs(11)));
    }

    #[test]
    fn test_keys_are_independent() {
        let limiter = SlidingWindowLimiter::new(Duration::from_secs(60), 1);
        let now = Instant::now();
        assert!(limiter.check(ip(1), "/a", now));
        assert!(limiter.check(ip(1), "/b", now));
        assert!(limiter.check(ip(2), "/a", now));
        assert!(!limiter.check(ip(1), "/a", now));
    }

    #[test]
    fn test_client_ip_prefers_forwarded_for() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.7, 10.0.0.1"),
        );
        let peer: SocketAddr = "127.0.0.1:4000".parse().unwrap();
        assert_eq!(
            client_ip(&headers, Some(peer)),
            "203.0.113.7".parse::<IpAddr>().unwrap()
        );
    }

    #[test]
    fn test_client_ip_falls_back_to_peer() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("not-an-ip"));
        let peer: SocketAddr = "127.0.0.1:4000".parse().unwrap();
        assert_eq!(client_ip(&headers, Some(peer)), peer.ip());
        assert_eq!(
            client_ip(&HeaderMap::new(), None),
            IpAddr::V4(Ipv4Addr::UNSPECIFIED)
        );
    }

    fn app(max_requests: usize) -> Router {
        let limiter = Arc::new(SlidingWindowLimiter::new(Duration::from_secs(60), max_requests));
        Router::new()
            .route("/ping", get(|| async { "pong" }))
            .layer(from_fn_with_state(limiter, rate_limit_middleware))
    }

    fn ping(forwarded_for: &'static str) -> axum::http::Request<Body> {
        axum::http::Request::builder()
            .uri("/ping")
            .header("x-forwarded-for", forwarded_for)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_middleware_returns_429_over_limit() {
        let app = app(2);
        for _ in 0..2 {
            let resp = app.clone().oneshot(ping("198.51.100.1")).await.unwrap();
            assert_eq!(resp.status(), StatusCode::OK);
        }
        let resp = app.clone().oneshot(ping("198.51.100.1")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);

        let resp = app.oneshot(ping("198.51.100.2")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
