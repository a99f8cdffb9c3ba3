//! Employee API Module
//!
//! | Path | Method | Operation |
//! |------|--------|-----------|
//! | /api/employees?name=&active= | GET | list |
//! | /api/employees | POST | hire (201) |
//! | /api/employees/{id} | GET / PUT / DELETE | get / update profile / purge (204) |
//! | /api/employees/{id}/movements | GET | audit trail |
//! | /api/employees/{id}/raise | POST | salary raise |
//! | /api/employees/{id}/promote | POST | promotion |
//! | /api/employees/{id}/terminate | POST | termination |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

/// Employee router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/employees", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route("/{id}/movements", get(handler::movements))
        .route("/{id}/raise", post(handler::raise))
        .route("/{id}/promote", post(handler::promote))
        .route("/{id}/terminate", post(handler::terminate))
}
