//! Request locale extractor.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::{header::ACCEPT_LANGUAGE, request::Parts, HeaderMap},
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use std::convert::Infallible;
use vitrina_core::CanonicalLocale;

/// Name of the query parameter and cookie carrying the preferred language.
pub const LANG_PARAM: &str = "lang";

/// The canonical locale of a request.
///
/// Sources, first non-blank wins: the `lang` query parameter, the `lang`
/// cookie, the first `Accept-Language` tag. Anything unsupported resolves
/// to Russian.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestLocale(pub CanonicalLocale);

impl std::ops::Deref for RequestLocale {
    type Target = CanonicalLocale;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[derive(Deserialize)]
struct LangQuery {
    lang: Option<String>,
}

#[async_trait]
impl<S> FromRequestParts<S> for RequestLocale
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let from_query = Query::<LangQuery>::try_from_uri(&parts.uri)
            .ok()
            .and_then(|Query(q)| q.lang);
        let from_cookie = CookieJar::from_headers(&parts.headers)
            .get(LANG_PARAM)
            .map(|cookie| cookie.value().to_string());

        Ok(Self(locale_from_sources(
            from_query.as_deref(),
            from_cookie.as_deref(),
            &parts.headers,
        )))
    }
}

fn locale_from_sources(
    query: Option<&str>,
    cookie: Option<&str>,
    headers: &HeaderMap,
) -> CanonicalLocale {
    let accept_language = headers
        .get(ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok())
        .and_then(first_language_tag);

    let chosen = [query, cookie, accept_language]
        .into_iter()
        .flatten()
        .find(|raw| !raw.trim().is_empty());

    CanonicalLocale::resolve_opt(chosen)
}

/// `uz-Latn-UZ;q=0.9, ru` -> `uz-Latn-UZ`
fn first_language_tag(header: &str) -> Option<&str> {
    header
        .split(',')
        .next()
        .and_then(|tag| tag.split(';').next())
        .map(str::trim)
        .filter(|tag| !tag.is_empty() && *tag != "*")
}
