use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use sports_hub_db::{
    comments::{self, Comment, NewComment},
    object_id::{CommentId, NewsArticleId, UserId},
    PoolExt,
};

use crate::{
    auth::Authenticated,
    shared_state::AppState,
    validation::{FieldErrors, Validate},
    Error,
};

#[derive(Debug, Deserialize)]
pub struct CommentQuery {
    pub article: Option<NewsArticleId>,
}

#[derive(Debug, Deserialize)]
pub struct CommentInput {
    /// The article being commented on.
    #[serde(rename = "id")]
    pub article_id: NewsArticleId,
    pub name: String,
    pub text: String,
}

impl Validate for CommentInput {
    fn validate(&self) -> Result<(), Error> {
        let mut errors = FieldErrors::new();
        errors
            .required("name", &self.name)
            .max_length("name", &self.name, 100)
            .required("text", &self.text);
        errors.into_result()
    }
}

#[derive(Debug, Serialize)]
pub struct CommentOutput {
    pub id: CommentId,
    pub article: NewsArticleId,
    pub user: UserId,
    pub name: String,
    pub text: String,
    pub date: DateTime<Utc>,
}

impl From<Comment> for CommentOutput {
    fn from(c: Comment) -> Self {
        CommentOutput {
            id: c.id,
            article: c.article_id,
            user: c.user_id,
            name: c.name,
            text: c.text,
            date: c.created,
        }
    }
}

async fn list_comments(
    State(state): State<AppState>,
    Query(query): Query<CommentQuery>,
) -> Result<impl IntoResponse, Error> {
    let objects = state
        .db
        .interact(move |conn| {
            let mut q = comments::table
                .select(Comment::as_select())
                .order(comments::created.desc())
                .into_boxed();

            if let Some(article) = query.article {
                q = q.filter(comments::article_id.eq(article));
            }

            q.load::<Comment>(conn).map_err(Error::from)
        })
        .await?
        .into_iter()
        .map(CommentOutput::from)
        .collect::<Vec<_>>();

    Ok((StatusCode::OK, Json(objects)))
}

async fn get_comment(
    State(state): State<AppState>,
    Path(id): Path<CommentId>,
) -> Result<impl IntoResponse, Error> {
    let comment = crate::get_object!(comments, state, Comment, id).await?;
    Ok((StatusCode::OK, Json(CommentOutput::from(comment))))
}

async fn create_comment(
    State(state): State<AppState>,
    Authenticated(user): Authenticated,
    Json(body): Json<CommentInput>,
) -> Result<impl IntoResponse, Error> {
    body.validate()?;

    let new_comment = NewComment {
        id: CommentId::new(),
        article_id: body.article_id,
        user_id: user.user_id,
        name: body.name,
        text: body.text,
    };

    let comment = state
        .db
        .interact(move |conn| {
            diesel::insert_into(comments::table)
                .values(&new_comment)
                .returning(Comment::as_select())
                .get_result::<Comment>(conn)
                .map_err(Error::from)
        })
        .await?;

    Ok((StatusCode::CREATED, Json(CommentOutput::from(comment))))
}

async fn delete_comment(
    State(state): State<AppState>,
    Authenticated(_user): Authenticated,
    Path(id): Path<CommentId>,
) -> Result<impl IntoResponse, Error> {
    crate::delete_object!(comments, state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn configure() -> Router<AppState> {
    Router::new()
        .route("/comments", get(list_comments).post(create_comment))
        .route("/comments/:id", get(get_comment).delete(delete_comment))
}
