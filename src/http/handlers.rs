//! HTTP endpoint handlers for the author/article CRUD surface.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Html;

use crate::http::AppState;
use crate::http::error::ApiError;
use crate::store::models::{
    Article, ArticleCreate, ArticleUpdate, Author, AuthorCreate, AuthorUpdate,
};

/// Minimal demo page: opens a feed connection for an author and submits an
/// article over it, then shows the finished notification when it arrives.
const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html>
    <head>
        <title>Articles</title>
    </head>
    <body>
        <h1>Article feed</h1>
        <form action="" onsubmit="submitArticle(event)">
            <input type="text" id="title" autocomplete="off" placeholder="Title">
            <input type="text" id="text" autocomplete="off" placeholder="Text">
            <input type="text" id="authorId" autocomplete="off" placeholder="Author id">
            <button>Submit article</button>
        </form>
        <ul id="messages">
            <li id="progress">Empty</li>
        </ul>
        <script>
            function submitArticle(event) {
                var authorId = document.getElementById("authorId").value;
                var ws = new WebSocket(`ws://${location.hostname}:{ws_port}/article/${authorId}/ws`);
                ws.onmessage = function (event) {
                    var message = document.createElement("li");
                    message.appendChild(document.createTextNode(event.data));
                    document.getElementById("messages").appendChild(message);
                    document.getElementById("progress").innerHTML = "Finished";
                };
                var data = {
                    title: document.getElementById("title").value,
                    text: document.getElementById("text").value,
                    author_id: Number(authorId)
                };
                ws.onopen = () => ws.send(JSON.stringify(data));
                document.getElementById("progress").innerHTML = "Started";
                event.preventDefault();
            }
        </script>
    </body>
</html>
"#;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(INDEX_HTML.replace("{ws_port}", &state.ws_port.to_string()))
}

pub async fn list_authors(State(state): State<AppState>) -> Result<Json<Vec<Author>>, ApiError> {
    Ok(Json(state.store.list_authors()?))
}

pub async fn create_author(
    State(state): State<AppState>,
    Json(body): Json<AuthorCreate>,
) -> Result<(StatusCode, Json<Author>), ApiError> {
    let author = state.store.create_author(body)?;
    Ok((StatusCode::CREATED, Json(author)))
}

pub async fn get_author(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Author>, ApiError> {
    Ok(Json(state.store.get_author(id)?))
}

pub async fn update_author(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<AuthorUpdate>,
) -> Result<Json<Author>, ApiError> {
    Ok(Json(state.store.update_author(id, body)?))
}

pub async fn delete_author(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.store.delete_author(id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_articles(
    State(state): State<AppState>,
    Path(author_id): Path<i64>,
) -> Result<Json<Vec<Article>>, ApiError> {
    Ok(Json(state.store.list_articles(author_id)?))
}

pub async fn create_article(
    State(state): State<AppState>,
    Json(body): Json<ArticleCreate>,
) -> Result<(StatusCode, Json<Article>), ApiError> {
    body.validate()?;
    let article = state.store.create_article(body)?;
    Ok((StatusCode::CREATED, Json(article)))
}

pub async fn get_article(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Article>, ApiError> {
    Ok(Json(state.store.get_article(id)?))
}

pub async fn update_article(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<ArticleUpdate>,
) -> Result<Json<Article>, ApiError> {
    Ok(Json(state.store.update_article(id, body)?))
}

pub async fn delete_article(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.store.delete_article(id)?;
    Ok(StatusCode::NO_CONTENT)
}
