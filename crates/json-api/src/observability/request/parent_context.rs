//! W3C trace-context extraction.

use opentelemetry::{Context, global, propagation::Extractor, trace::TraceContextExt as _};
use salvo::http::{HeaderMap, HeaderName};

/// Remote parent carried by `traceparent`, if the headers hold a valid one.
pub(super) fn extract_parent_context(headers: &HeaderMap) -> Option<Context> {
    global::get_text_map_propagator(|propagator| {
        // Fresh base so a missing header never adopts the in-process span.
        let context = propagator.extract_with_context(&Context::new(), &HeaderCarrier(headers));

        let valid = context.span().span_context().is_valid();

        valid.then_some(context)
    })
}

#[derive(Debug)]
struct HeaderCarrier<'a>(&'a HeaderMap);

impl Extractor for HeaderCarrier<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|value| value.to_str().ok())
    }

    fn keys(&self) -> Vec<&str> {
        self.0.keys().map(HeaderName::as_str).collect()
    }
}
