//! Route labels for spans and metrics.

use uuid::Uuid;

/// Static segments that may follow `payment/`; anything else is a gateway id.
const PAYMENT_ROUTES: &[&str] = &["create", "callback"];

#[derive(Debug, Clone)]
pub(super) struct RequestSpanName {
    pub(super) route: String,
    pub(super) span_name: String,
}

/// Collapse identifiers out of `path` so labels stay low-cardinality.
pub(super) fn request_span_name(method: &str, path: &str) -> RequestSpanName {
    let route = route_template(path);
    let span_name = format!("{method} {route}");

    RequestSpanName { route, span_name }
}

fn route_template(path: &str) -> String {
    let mut previous = "";
    let mut segments = Vec::new();

    for segment in path.trim_start_matches('/').split('/') {
        let label = if Uuid::parse_str(segment).is_ok() {
            "{uuid}"
        } else if previous == "payment" && !segment.is_empty() && !PAYMENT_ROUTES.iter().any(|route| *route == segment) {
            "{payment_id}"
        } else {
            segment
        };

        segments.push(label);
        previous = segment;
    }

    format!("/{}", segments.join("/"))
}
