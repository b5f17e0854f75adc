use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use diesel::prelude::*;
use serde::Deserialize;

use sports_hub_db::{
    object_id::TagId,
    tags::{self, Tag},
    PoolExt,
};

use crate::{
    auth::Authenticated,
    shared_state::AppState,
    validation::{FieldErrors, Validate},
    Error,
};

#[derive(Debug, Deserialize)]
pub struct TagInput {
    pub name: String,
}

impl Validate for TagInput {
    fn validate(&self) -> Result<(), Error> {
        let mut errors = FieldErrors::new();
        errors
            .required("name", &self.name)
            .max_length("name", &self.name, 50);
        errors.into_result()
    }
}

async fn list_tags(State(state): State<AppState>) -> Result<impl IntoResponse, Error> {
    let objects = state
        .db
        .interact(|conn| {
            tags::table
                .select(Tag::as_select())
                .order(tags::name.asc())
                .load::<Tag>(conn)
                .map_err(Error::from)
        })
        .await?;

    Ok((StatusCode::OK, Json(objects)))
}

async fn get_tag(
    State(state): State<AppState>,
    Path(tag_id): Path<TagId>,
) -> Result<impl IntoResponse, Error> {
    let tag = crate::get_object!(tags, state, Tag, tag_id).await?;
    Ok((StatusCode::OK, Json(tag)))
}

async fn create_tag(
    State(state): State<AppState>,
    Authenticated(_user): Authenticated,
    Json(body): Json<TagInput>,
) -> Result<impl IntoResponse, Error> {
    body.validate()?;

    let tag = Tag {
        id: TagId::new(),
        name: body.name,
    };

    let tag = state
        .db
        .interact(move |conn| {
            diesel::insert_into(tags::table)
                .values(&tag)
                .execute(conn)?;
            Ok::<_, Error>(tag)
        })
        .await?;

    Ok((StatusCode::CREATED, Json(tag)))
}

async fn delete_tag(
    State(state): State<AppState>,
    Authenticated(_user): Authenticated,
    Path(tag_id): Path<TagId>,
) -> Result<impl IntoResponse, Error> {
    crate::delete_object!(tags, state, tag_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn configure() -> Router<AppState> {
    Router::new()
        .route("/tags", get(list_tags).post(create_tag))
        .route("/tags/:id", get(get_tag).delete(delete_tag))
}
