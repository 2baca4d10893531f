// Route definitions

use bytes::Bytes;
use std::sync::Arc;
use warp::http::Method;
use warp::Filter;

use crate::handlers;
use crate::state::AppState;

/// Largest accepted request body
pub const MAX_BODY_BYTES: u64 = 1024 * 1024;

pub fn configure_routes(
    state: Arc<AppState>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let persona = warp::path("api")
        .and(warp::path::param::<String>())
        .and(warp::path::end());

    // POST /api/{persona}
    let post_chat = persona
        .clone()
        .and(post_only())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::bytes())
        .and(with_state(state.clone()))
        .and_then(handlers::chat_handler);

    // Any other method on /api/{persona}: the body is never read and the
    // handler answers with a JSON 405.
    let other_chat = persona
        .and(non_post())
        .and(warp::any().map(Bytes::new))
        .and(with_state(state))
        .and_then(handlers::chat_handler);

    post_chat.or(other_chat).unify()
}

// Method splits reject as "not found" rather than warp's 405, so an unknown
// persona stays a 404 whichever branch it was tried on.
fn post_only() -> impl Filter<Extract = (Method,), Error = warp::Rejection> + Clone {
    method_matching(true)
}

fn non_post() -> impl Filter<Extract = (Method,), Error = warp::Rejection> + Clone {
    method_matching(false)
}

fn method_matching(
    post: bool,
) -> impl Filter<Extract = (Method,), Error = warp::Rejection> + Clone {
    warp::method().and_then(move |method: Method| async move {
        if (method == Method::POST) == post {
            Ok(method)
        } else {
            Err(warp::reject::not_found())
        }
    })
}

fn with_state(
    state: Arc<AppState>,
) -> impl Filter<Extract = (Arc<AppState>,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || state.clone())
}
