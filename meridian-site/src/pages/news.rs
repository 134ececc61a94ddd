use meridian_core::prelude::*;

use crate::content::{self, Article};

pub fn news() -> Page {
    let articles = content::ARTICLES.iter().map(article).collect::<Vec<_>>();

    h(
        "section",
        Props::new().class("page news"),
        children![h("h1", (), children!["News"]), articles],
    )
    .into()
}

fn article(article: &Article) -> Node {
    h(
        "article",
        Props::new().class("news-item"),
        children![
            h("h2", (), children![article.title]),
            h(
                "time",
                Props::new().attr("datetime", article.date),
                children![article.date],
            ),
            h("p", (), children![article.summary]),
        ],
    )
}
