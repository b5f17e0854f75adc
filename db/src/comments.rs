use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::{
    object_id::{CommentId, NewsArticleId, UserId},
    schema::*,
};

pub use crate::schema::comments::*;

#[derive(Clone, Debug, Queryable, Selectable, Identifiable)]
#[diesel(table_name = comments)]
pub struct Comment {
    pub id: CommentId,
    pub article_id: NewsArticleId,
    pub user_id: UserId,
    pub name: String,
    pub text: String,
    pub created: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = comments)]
pub struct NewComment {
    pub id: CommentId,
    pub article_id: NewsArticleId,
    pub user_id: UserId,
    pub name: String,
    pub text: String,
}
