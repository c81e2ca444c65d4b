use std::net::IpAddr;

use axum::http::HeaderMap;
use ipnet::IpNet;
use uuid::Uuid;

/// Who sent a submission. Logged alongside the saved record, never stored in it.
#[derive(Debug, Clone)]
pub struct RequestMeta {
    pub request_id: Uuid,
    pub ip: IpAddr,
    pub user_agent: String,
}

/// Extract requester metadata from request headers.
pub fn extract(
    headers: &HeaderMap,
    peer_addr: Option<IpAddr>,
    trusted_proxies: &[IpNet],
) -> RequestMeta {
    let user_agent = headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    RequestMeta {
        request_id: Uuid::now_v7(),
        ip: client_ip(headers, peer_addr, trusted_proxies),
        user_agent,
    }
}

fn client_ip(headers: &HeaderMap, peer_addr: Option<IpAddr>, trusted_proxies: &[IpNet]) -> IpAddr {
    let peer = peer_addr.unwrap_or(IpAddr::from([127, 0, 0, 1]));

    // Only trust X-Forwarded-For if the direct connection is from a trusted proxy
    if !trusted_proxies.iter().any(|net| net.contains(&peer)) {
        return peer;
    }

    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|xff| {
            xff.split(',')
                .filter_map(|s| s.trim().parse::<IpAddr>().ok())
                .find(|ip| !trusted_proxies.iter().any(|net| net.contains(ip)))
        })
        .unwrap_or(peer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn forwarded(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn ignores_forwarded_header_from_untrusted_peer() {
        let headers = forwarded("203.0.113.9");
        let peer: IpAddr = "198.51.100.1".parse().unwrap();
        let meta = extract(&headers, Some(peer), &[]);
        assert_eq!(meta.ip, peer);
    }

    #[test]
    fn honours_forwarded_header_from_trusted_proxy() {
        let headers = forwarded("203.0.113.9, 10.0.0.2");
        let proxies: Vec<IpNet> = vec!["10.0.0.0/8".parse().unwrap()];
        let meta = extract(&headers, Some("10.0.0.1".parse().unwrap()), &proxies);
        assert_eq!(meta.ip, "203.0.113.9".parse::<IpAddr>().unwrap());
    }

    #[test]
    fn reads_user_agent() {
        let mut headers = HeaderMap::new();
        headers.insert("user-agent", HeaderValue::from_static("curl/8.0"));
        let meta = extract(&headers, None, &[]);
        assert_eq!(meta.user_agent, "curl/8.0");
        assert_eq!(meta.ip, IpAddr::from([127, 0, 0, 1]));
    }
}
