use axum::extract::{Request, State};
use axum::middleware::{from_fn_with_state, Next};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use tracing::debug;

use crate::gate::decision::{decide, Decision};
use crate::introspection::client::IntrospectionClient;
use crate::observability::metrics::get_metrics;

/// Introspects every request and either runs the inner service or answers
/// with the deny status and a JSON string body.
pub async fn authenticate(
    State(client): State<IntrospectionClient>,
    request: Request,
    next: Next,
) -> Response {
    let outcome = client.introspect(request.headers()).await;
    let decision = decide(&outcome);
    get_metrics()
        .await
        .gate_decisions
        .with_label_values(&[decision.label()])
        .inc();

    match decision {
        Decision::Allow => next.run(request).await,
        Decision::Deny { status, message } => {
            debug!("{} {} denied: {} {}", request.method(), request.uri().path(), status, message);
            (status, Json(message)).into_response()
        }
    }
}

/// Gates every route of `router` registered so far.
pub fn protect<S>(router: Router<S>, client: IntrospectionClient) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.route_layer(from_fn_with_state(client, authenticate))
}
