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
    self as db,
    category::CategoryFilter,
    news_articles::{self, news_article_tags, NewNewsArticle, NewsArticle, NewsArticleUpdate},
    object_id::{CommentId, NewsArticleId, TagId},
    search::{contains_pattern, search_terms},
    PoolExt,
};

use super::group_rows;
use crate::{
    auth::Authenticated,
    shared_state::AppState,
    validation::{FieldErrors, Validate},
    Error,
};

#[derive(Debug, Default, Deserialize)]
pub struct NewsQuery {
    pub title: Option<String>,
    pub text: Option<String>,
    pub tag: Option<String>,
    pub search: Option<String>,
    pub category: Option<CategoryFilter>,
}

/// The free-text filter applied to the news list. Only one of them is ever used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewsFilter {
    Title(String),
    Text(String),
    Tag(String),
}

impl NewsQuery {
    /// The first filter present in the order title, text, tag. The rest are ignored, even
    /// when the chosen one is empty and so matches every article.
    pub fn filter(&self) -> Option<NewsFilter> {
        self.title
            .clone()
            .map(NewsFilter::Title)
            .or_else(|| self.text.clone().map(NewsFilter::Text))
            .or_else(|| self.tag.clone().map(NewsFilter::Tag))
    }
}

#[derive(Debug, Deserialize)]
pub struct NewsInput {
    pub title: String,
    pub description: String,
    pub text: String,
    pub image: Option<String>,
    #[serde(rename = "type")]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<TagId>,
}

impl Validate for NewsInput {
    fn validate(&self) -> Result<(), Error> {
        let mut errors = FieldErrors::new();
        errors
            .required("title", &self.title)
            .max_length("title", &self.title, 100)
            .max_length("description", &self.description, 500)
            .required("type", &self.category)
            .max_length("type", &self.category, 10);
        errors.into_result()
    }
}

#[derive(Debug, Serialize)]
pub struct CommentAuthor {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Serialize)]
pub struct CommentOutput {
    pub id: CommentId,
    pub user: CommentAuthor,
    pub name: String,
    pub text: String,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct NewsOutput {
    pub id: NewsArticleId,
    pub title: String,
    pub description: String,
    pub text: String,
    pub image: Option<String>,
    pub date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub category: String,
    pub tags: Vec<String>,
    pub comments: Vec<CommentOutput>,
}

type CommentRow = (
    NewsArticleId,
    CommentId,
    String,
    String,
    String,
    String,
    String,
    DateTime<Utc>,
);

/// Attach tag names and comments to each article.
fn with_details(
    conn: &mut PgConnection,
    articles: Vec<NewsArticle>,
) -> Result<Vec<NewsOutput>, Error> {
    use db::{comments, tags, users};

    let ids = articles.iter().map(|a| a.id).collect::<Vec<_>>();

    let tag_rows = news_article_tags::table
        .inner_join(tags::table)
        .filter(news_article_tags::article_id.eq_any(&ids))
        .order(tags::name.asc())
        .select((news_article_tags::article_id, tags::name))
        .load::<(NewsArticleId, String)>(conn)?;
    let mut tags_by_article = group_rows(tag_rows);

    let comment_rows = comments::table
        .inner_join(users::table)
        .filter(comments::article_id.eq_any(&ids))
        .order(comments::created.desc())
        .select((
            comments::article_id,
            comments::id,
            users::username,
            users::first_name,
            users::last_name,
            comments::name,
            comments::text,
            comments::created,
        ))
        .load::<CommentRow>(conn)?;
    let mut comments_by_article = group_rows(
        comment_rows
            .into_iter()
            .map(
                |(article_id, id, username, first_name, last_name, name, text, date)| {
                    (
                        article_id,
                        CommentOutput {
                            id,
                            user: CommentAuthor {
                                username,
                                first_name,
                                last_name,
                            },
                            name,
                            text,
                            date,
                        },
                    )
                },
            )
            .collect(),
    );

    let output = articles
        .into_iter()
        .map(|a| NewsOutput {
            tags: tags_by_article.remove(&a.id).unwrap_or_default(),
            comments: comments_by_article.remove(&a.id).unwrap_or_default(),
            id: a.id,
            title: a.title,
            description: a.description,
            text: a.text,
            image: a.image,
            date: a.created,
            category: a.category,
        })
        .collect();

    Ok(output)
}

/// IDs of the articles carrying a tag whose name contains `term`.
fn articles_tagged_like(
    conn: &mut PgConnection,
    term: &str,
) -> Result<Vec<NewsArticleId>, Error> {
    use db::tags;

    news_article_tags::table
        .inner_join(tags::table)
        .filter(tags::name.ilike(contains_pattern(term)))
        .select(news_article_tags::article_id)
        .distinct()
        .load::<NewsArticleId>(conn)
        .map_err(Error::from)
}

fn load_article(conn: &mut PgConnection, id: NewsArticleId) -> Result<NewsOutput, Error> {
    let article = news_articles::table
        .find(id)
        .select(NewsArticle::as_select())
        .first::<NewsArticle>(conn)?;

    with_details(conn, vec![article])?
        .pop()
        .ok_or(Error::NotFound)
}

async fn list_news(
    State(state): State<AppState>,
    Query(query): Query<NewsQuery>,
) -> Result<impl IntoResponse, Error> {
    let filter = query.filter();
    let terms = query.search.as_deref().map(search_terms).unwrap_or_default();
    let category = query.category;

    let objects = state
        .db
        .interact(move |conn| {
            let mut q = news_articles::table
                .select(NewsArticle::as_select())
                .order(news_articles::created.desc())
                .into_boxed();

            match filter {
                Some(NewsFilter::Title(title)) => {
                    q = q.filter(news_articles::title.ilike(contains_pattern(&title)));
                }
                Some(NewsFilter::Text(text)) => {
                    q = q.filter(news_articles::text.ilike(contains_pattern(&text)));
                }
                Some(NewsFilter::Tag(tag)) => {
                    let ids = articles_tagged_like(conn, &tag)?;
                    q = q.filter(news_articles::id.eq_any(ids));
                }
                None => {}
            }

            if let Some(category) = category {
                q = db::filter_category!(q, news_articles::category, category);
            }

            for term in terms {
                let pattern = contains_pattern(&term);
                let tagged = articles_tagged_like(conn, &term)?;
                q = q.filter(
                    news_articles::title
                        .ilike(pattern.clone())
                        .or(news_articles::text.ilike(pattern.clone()))
                        .or(news_articles::category.ilike(pattern))
                        .or(news_articles::id.eq_any(tagged)),
                );
            }

            let articles = q.load::<NewsArticle>(conn)?;
            with_details(conn, articles)
        })
        .await?;

    Ok((StatusCode::OK, Json(objects)))
}

async fn get_news(
    State(state): State<AppState>,
    Path(id): Path<NewsArticleId>,
) -> Result<impl IntoResponse, Error> {
    let article = state
        .db
        .interact(move |conn| load_article(conn, id))
        .await?;

    Ok((StatusCode::OK, Json(article)))
}

async fn create_news(
    State(state): State<AppState>,
    Authenticated(_user): Authenticated,
    Json(body): Json<NewsInput>,
) -> Result<impl IntoResponse, Error> {
    body.validate()?;

    let id = NewsArticleId::new();
    let tags = body.tags;
    let new_article = NewNewsArticle {
        id,
        title: body.title,
        description: body.description,
        text: body.text,
        image: body.image,
        category: body.category,
    };

    let article = state
        .db
        .transaction(move |conn| {
            diesel::insert_into(news_articles::table)
                .values(&new_article)
                .execute(conn)?;
            news_articles::set_tags(conn, id, &tags)?;
            load_article(conn, id)
        })
        .await?;

    Ok((StatusCode::CREATED, Json(article)))
}

async fn update_news(
    State(state): State<AppState>,
    Authenticated(_user): Authenticated,
    Path(id): Path<NewsArticleId>,
    Json(body): Json<NewsInput>,
) -> Result<impl IntoResponse, Error> {
    body.validate()?;

    let tags = body.tags;
    let changes = NewsArticleUpdate {
        title: body.title,
        description: body.description,
        text: body.text,
        image: body.image,
        category: body.category,
    };

    let article = state
        .db
        .transaction(move |conn| {
            let updated = diesel::update(news_articles::table.find(id))
                .set(&changes)
                .execute(conn)?;
            if updated == 0 {
                return Err(Error::NotFound);
            }

            news_articles::set_tags(conn, id, &tags)?;
            load_article(conn, id)
        })
        .await?;

    Ok((StatusCode::OK, Json(article)))
}

async fn delete_news(
    State(state): State<AppState>,
    Authenticated(_user): Authenticated,
    Path(id): Path<NewsArticleId>,
) -> Result<impl IntoResponse, Error> {
    crate::delete_object!(news_articles, state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn configure() -> Router<AppState> {
    Router::new()
        .route("/news", get(list_news).post(create_news))
        .route(
            "/news/:id",
            get(get_news).put(update_news).delete(delete_news),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(title: Option<&str>, text: Option<&str>, tag: Option<&str>) -> NewsQuery {
        NewsQuery {
            title: title.map(str::to_string),
            text: text.map(str::to_string),
            tag: tag.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn single_filter_is_used() {
        assert_eq!(
            query(None, Some("derby"), None).filter(),
            Some(NewsFilter::Text("derby".to_string()))
        );
        assert_eq!(
            query(None, None, Some("transfers")).filter(),
            Some(NewsFilter::Tag("transfers".to_string()))
        );
    }

    #[test]
    fn title_wins_over_text_and_tag() {
        assert_eq!(
            query(Some("final"), Some("derby"), Some("transfers")).filter(),
            Some(NewsFilter::Title("final".to_string()))
        );
        assert_eq!(
            query(None, Some("derby"), Some("transfers")).filter(),
            Some(NewsFilter::Text("derby".to_string()))
        );
    }

    #[test]
    fn empty_value_still_takes_priority() {
        assert_eq!(query(None, None, None).filter(), None);
        assert_eq!(
            query(Some(""), Some("derby"), None).filter(),
            Some(NewsFilter::Title(String::new()))
        );
        assert_eq!(
            query(None, Some(""), Some("injury")).filter(),
            Some(NewsFilter::Text(String::new()))
        );
    }

    #[test]
    fn category_is_named_type() {
        let input: NewsInput = serde_json::from_value(serde_json::json!({
            "title": "Cup final",
            "description": "",
            "text": "",
            "type": "football",
        }))
        .unwrap();
        assert_eq!(input.category, "football");
        assert!(input.tags.is_empty());
        assert!(input.image.is_none());
    }
}
