use std::convert::Infallible;
use std::net::{IpAddr, SocketAddr};

use axum::async_trait;
use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use quire_gateway::{Credentials, RequestContext};

use crate::state::AppState;

const FORWARDED_FOR: &str = "x-forwarded-for";

/// Extractor for the transport facts the gateway needs about a request.
#[derive(Clone, Debug)]
pub struct Ctx(pub RequestContext);

#[async_trait]
impl FromRequestParts<AppState> for Ctx {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(Self(context_from_parts(parts, state.trust_forwarded_for)))
    }
}

/// Build a [`RequestContext`] from request headers and connection info.
pub fn context_from_parts(parts: &Parts, trust_forwarded_for: bool) -> RequestContext {
    let forwarded = if trust_forwarded_for {
        forwarded_for(&parts.headers)
    } else {
        None
    };
    let peer = forwarded.or_else(|| {
        parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip())
    });
    let credentials = bearer_token(&parts.headers)
        .map(Credentials::Bearer)
        .unwrap_or_default();
    RequestContext { peer, credentials }
}

/// First hop of `X-Forwarded-For`, if it is a valid address.
fn forwarded_for(headers: &HeaderMap) -> Option<IpAddr> {
    headers
        .get(FORWARDED_FOR)?
        .to_str()
        .ok()?
        .split(',')
        .next()?
        .trim()
        .parse()
        .ok()
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then(|| token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts(builder: axum::http::request::Builder) -> Parts {
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn reads_forwarded_for_and_bearer() {
        let p = parts(
            Request::builder()
                .header(FORWARDED_FOR, "198.51.100.4, 10.0.0.1")
                .header(AUTHORIZATION, "Bearer abc123"),
        );
        let ctx = context_from_parts(&p, true);
        assert_eq!(ctx.peer, Some("198.51.100.4".parse().unwrap()));
        assert_eq!(ctx.credentials, Credentials::Bearer("abc123".into()));
    }

    #[test]
    fn falls_back_to_socket_peer() {
        let mut p = parts(Request::builder().header(FORWARDED_FOR, "198.51.100.4"));
        p.extensions
            .insert(ConnectInfo(SocketAddr::from(([192, 0, 2, 1], 4000))));
        assert_eq!(context_from_parts(&p, false).peer, Some("192.0.2.1".parse().unwrap()));
    }

    #[test]
    fn garbage_headers_are_ignored() {
        let p = parts(
            Request::builder()
                .header(FORWARDED_FOR, "not-an-ip")
                .header(AUTHORIZATION, "Basic dXNlcjpwdw=="),
        );
        let ctx = context_from_parts(&p, true);
        assert_eq!(ctx, RequestContext::anonymous());
    }
}
