//! One-off: seed the database with sample posts for local development.
//! Skips seeding when any post already exists.

use entity::prelude::{NewPost, UserEntity};
use tracing::info;

struct Sample {
    title: &'static str,
    excerpt: &'static str,
    content: &'static str,
    tags: &'static [&'static str],
}

const SAMPLES: &[Sample] = &[
    Sample {
        title: "Getting Started with React",
        excerpt: "Learn the basics of React and build your first app.",
        content: "<p>React is a JavaScript library for building user interfaces. It makes it painless to create interactive UIs. Design simple views for each state in your application, and React will efficiently update and render just the right components when your data changes.</p><p>Declarative views make your code more predictable and easier to debug.</p>",
        tags: &["react", "javascript", "frontend"],
    },
    Sample {
        title: "Creating a Modern Blog",
        excerpt: "A comprehensive guide to building a modern blog backend.",
        content: "<p>In this tutorial, we will build a modern blog application from the database schema up. We will cover everything from setting up the project to deploying it to production.</p><p>The blog will have features like tags, cover images, and a contact form.</p>",
        tags: &["fullstack", "tutorial"],
    },
    Sample {
        title: "Modern CSS Techniques",
        excerpt: "Learn about modern CSS techniques like Flexbox and Grid.",
        content: "<p>CSS has come a long way since its inception. With modern features like Flexbox and Grid, we can create complex layouts with ease.</p><p>In this article, we will explore some of the most powerful CSS techniques that you can use in your projects today.</p>",
        tags: &["css", "frontend", "web design"],
    },
    Sample {
        title: "The Power of TailwindCSS",
        excerpt: "Discover why TailwindCSS is becoming so popular among developers.",
        content: "<p>TailwindCSS is a utility-first CSS framework packed with classes that can be composed to build any design, directly in your markup.</p><p>Instead of opinionated predesigned components, Tailwind provides low-level utility classes that let you build completely custom designs without ever leaving your HTML.</p>",
        tags: &["css", "tailwind", "frontend"],
    },
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let secrets = util::load_secrets()?;
    let repository = repository::init_repository(&secrets.database_url).await?;

    if repository.post.count().await? > 0 {
        info!("posts already exist, nothing to seed");
        return Ok(());
    }

    let author = match repository.user.find_by_username("admin").await? {
        Some(user) => user,
        None => {
            let id = repository
                .user
                .save(UserEntity {
                    username: "admin".to_string(),
                    email: "admin@example.com".to_string(),
                    sub: "admin".to_string(),
                    ..Default::default()
                })
                .await?;
            info!(id, "created seed author");

            UserEntity {
                id,
                ..Default::default()
            }
        }
    };

    for sample in SAMPLES {
        let post = repository
            .post
            .create(NewPost {
                title: sample.title.to_string(),
                slug: None,
                excerpt: sample.excerpt.to_string(),
                content: sample.content.to_string(),
                cover_image: None,
                author_id: author.id,
                tags: sample.tags.iter().map(|t| t.to_string()).collect(),
            })
            .await?;

        info!(slug = %post.slug, "created post");
    }

    info!("sample posts have been created successfully");

    Ok(())
}
