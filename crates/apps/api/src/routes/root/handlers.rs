use axum::response::Redirect;

pub async fn root() -> Redirect {
    Redirect::temporary("/upload")
}

pub async fn health_check() -> &'static str {
    "OK"
}
