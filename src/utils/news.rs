use crate::api::espn_api::{EspnArticle, NewsResponse};
use crate::models::NewsItem;

pub const DEFAULT_NEWS_IMAGE: &str = "/static/baseball-stadium.svg";

pub fn news_item(article: EspnArticle) -> NewsItem {
    let title = article.headline.unwrap_or_default();
    let category = article
        .categories
        .into_iter()
        .next()
        .and_then(|c| c.description)
        .or(article.article_type)
        .unwrap_or_else(|| "MLB NEWS".to_string());

    NewsItem {
        id: article
            .data_source_identifier
            .unwrap_or_else(|| title.clone()),
        title,
        subtitle: article.description.unwrap_or_default(),
        image: article
            .images
            .into_iter()
            .next()
            .and_then(|i| i.url)
            .unwrap_or_else(|| DEFAULT_NEWS_IMAGE.to_string()),
        category,
        link: article
            .links
            .and_then(|l| l.web)
            .and_then(|w| w.href)
            .unwrap_or_else(|| "#".to_string()),
        published: article.published,
    }
}

/// The first `limit` articles
pub fn news_items(response: NewsResponse, limit: usize) -> Vec<NewsItem> {
    response
        .articles
        .into_iter()
        .take(limit)
        .map(news_item)
        .collect()
}
