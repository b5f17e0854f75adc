use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::{
    object_id::{NewsArticleId, TagId},
    schema::*,
};

pub use crate::schema::news_article_tags;
pub use crate::schema::news_articles::*;

#[derive(Clone, Debug, Queryable, Selectable, Identifiable)]
#[diesel(table_name = news_articles)]
pub struct NewsArticle {
    pub id: NewsArticleId,
    pub title: String,
    pub description: String,
    pub text: String,
    pub image: Option<String>,
    pub created: DateTime<Utc>,
    pub category: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = news_articles)]
pub struct NewNewsArticle {
    pub id: NewsArticleId,
    pub title: String,
    pub description: String,
    pub text: String,
    pub image: Option<String>,
    pub category: String,
}

/// Fields that can change on an existing article. `created` is not among them.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = news_articles, treat_none_as_null = true)]
pub struct NewsArticleUpdate {
    pub title: String,
    pub description: String,
    pub text: String,
    pub image: Option<String>,
    pub category: String,
}

#[derive(Clone, Debug, Queryable, Insertable)]
#[diesel(table_name = news_article_tags)]
pub struct NewsArticleTag {
    pub article_id: NewsArticleId,
    pub tag_id: TagId,
}

/// Replace the set of tags linked to an article.
pub fn set_tags(
    conn: &mut PgConnection,
    article: NewsArticleId,
    tags: &[TagId],
) -> QueryResult<()> {
    diesel::delete(news_article_tags::table.filter(news_article_tags::article_id.eq(article)))
        .execute(conn)?;

    let rows = tags
        .iter()
        .map(|&tag_id| NewsArticleTag {
            article_id: article,
            tag_id,
        })
        .collect::<Vec<_>>();

    if !rows.is_empty() {
        diesel::insert_into(news_article_tags::table)
            .values(&rows)
            .on_conflict_do_nothing()
            .execute(conn)?;
    }

    Ok(())
}
