//! Schedule and group list handlers

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Serialize;

use crate::config::AppState;
use crate::handler::router::RequestContext;
use crate::http::{self, envelope};
use crate::logger;
use crate::schedule::WeekParity;

/// `GET {schedule_prefix}{parity}`
pub async fn serve_schedule(
    ctx: &RequestContext<'_>,
    state: &AppState,
    raw_parity: &str,
) -> Response<Full<Bytes>> {
    // Rejected here, before the store is involved, so the client gets a 400
    let parity = match raw_parity.parse::<WeekParity>() {
        Ok(p) => p,
        Err(e) => {
            let message = e.to_string();
            logger::log_warning(&message);
            return error_response(ctx, StatusCode::BAD_REQUEST, &message);
        }
    };

    match state.store.load_parity(parity).await {
        Some(document) => ok_response(ctx, state, document),
        None => error_response(
            ctx,
            StatusCode::NOT_FOUND,
            &format!("Schedule for {parity} week is not available"),
        ),
    }
}

/// `GET {groups_path}`
pub async fn serve_groups(ctx: &RequestContext<'_>, state: &AppState) -> Response<Full<Bytes>> {
    let groups = state.store.group_names().await;
    ok_response(ctx, state, groups)
}

/// Success payload, wrapped unless `http.envelope` is off
fn ok_response<T: Serialize>(
    ctx: &RequestContext<'_>,
    state: &AppState,
    data: T,
) -> Response<Full<Bytes>> {
    if state.config.http.envelope {
        http::build_json_response(StatusCode::OK, &envelope::success(data), ctx.is_head)
    } else {
        http::build_json_response(StatusCode::OK, &data, ctx.is_head)
    }
}

pub fn error_response(
    ctx: &RequestContext<'_>,
    status: StatusCode,
    message: &str,
) -> Response<Full<Bytes>> {
    http::build_json_response(status, &envelope::failure(message), ctx.is_head)
}
