//! Blog sample: decorating a paginated feed of posts with presenters.
//!
//! Run with `cargo run` (set `RUST_LOG=garnish=trace` to watch the
//! dispatcher work).

use garnish::prelude::*;
use garnish::value::{Paginated, Relations};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Clone, Presentable)]
struct Author {
    name: String,
    handle: String,
}

#[derive(Clone, Presentable)]
struct Post {
    title: String,
    words: u64,
    published: bool,
    #[presentable(skip)]
    internal_revision: u64,
    #[presentable(relations)]
    relations: Relations,
}

#[derive(Clone, Default)]
struct AuthorPresenter;

impl Presenter for AuthorPresenter {
    fn computed_fields(&self) -> &'static [&'static str] {
        &["handle"]
    }

    fn computed(&self, field: &str, source: &dyn Presentable) -> Option<Value> {
        let author = source.as_any().downcast_ref::<Author>()?;
        match field {
            "handle" => Some(Value::from(format!("@{}", author.handle))),
            _ => None,
        }
    }
}

#[derive(Clone, Default)]
struct PostPresenter;

impl Presenter for PostPresenter {
    fn computed_fields(&self) -> &'static [&'static str] {
        &["reading_minutes", "published"]
    }

    fn computed(&self, field: &str, source: &dyn Presentable) -> Option<Value> {
        let post = source.as_any().downcast_ref::<Post>()?;
        match field {
            "reading_minutes" => Some(Value::from((post.words / 200).max(1))),
            "published" => Some(Value::from(if post.published { "live" } else { "draft" })),
            _ => None,
        }
    }
}

fn post(title: &str, words: u64, published: bool, author: Author) -> Post {
    let mut relations = Relations::new();
    relations.load("author", Value::object(author));
    Post {
        title: title.to_string(),
        words,
        published,
        internal_revision: 1,
        relations,
    }
}

fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "blog=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut dispatcher = Dispatcher::new();
    dispatcher.register_transformers(garnish::presenters! {
        Author => AuthorPresenter,
        Post => PostPresenter,
    });

    let billie = Author {
        name: "Billie".to_string(),
        handle: "billie".to_string(),
    };
    let mike = Author {
        name: "Mike".to_string(),
        handle: "mike".to_string(),
    };

    let feed = Paginated::new(
        vec![
            Value::object(post("On decorators", 1800, true, billie.clone())),
            Value::object(post("Presenters in practice", 950, true, mike)),
            Value::object(post("Unfinished thoughts", 120, false, billie)),
        ],
        3,  // total
        15, // per page
        1,  // current page
    );

    let presented = dispatcher.transform(Value::from(feed));

    tracing::info!(
        registered = dispatcher.registry().len(),
        "feed transformed"
    );

    // The transformed tree is ready for any JSON encoder.
    println!(
        "{}",
        serde_json::to_string_pretty(&presented).expect("presented feed serializes")
    );
}
