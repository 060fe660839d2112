//! The check routines
//!
//! Each routine builds its own request from the fixtures, so a failure in
//! one never leaves bad input for the next.

use serde_json::Value;

use crate::api::{PostPatch, PostsClient, POST_KEYS};
use crate::common::config::Fixtures;
use crate::common::Result;

use super::expect;
use super::report::Reporter;
use super::Check;

/// Everything a check needs
pub struct CheckContext<'a> {
    pub client: &'a PostsClient,
    pub fixtures: &'a Fixtures,
    pub reporter: &'a dyn Reporter,
}

impl CheckContext<'_> {
    fn step(&self, check: Check, message: impl AsRef<str>) {
        self.reporter.step(check, message.as_ref());
    }
}

/// Heading shown when a check starts
pub(super) fn title(check: Check, fixtures: &Fixtures) -> String {
    match check {
        Check::List => "GET posts".to_string(),
        Check::GetOne => format!("GET one post (ID {})", fixtures.get_id),
        Check::Create => "POST new post".to_string(),
        Check::Replace => "PUT post".to_string(),
        Check::PartialUpdate => "PATCH post".to_string(),
        Check::Delete => "DELETE post".to_string(),
    }
}

pub(super) async fn execute(check: Check, ctx: &CheckContext<'_>) -> Result<()> {
    match check {
        Check::List => list(ctx).await,
        Check::GetOne => get_one(ctx).await,
        Check::Create => create(ctx).await,
        Check::Replace => replace(ctx).await,
        Check::PartialUpdate => partial_update(ctx).await,
        Check::Delete => delete(ctx).await,
    }
}

async fn list(ctx: &CheckContext<'_>) -> Result<()> {
    const CHECK: Check = Check::List;

    let response = ctx.client.list().await?;
    expect::status(&response, 200)?;
    ctx.step(CHECK, "status code 200 OK");

    let body = response.json()?;
    let posts = expect::array(&body, "response")?;
    ctx.step(CHECK, format!("response is a list of length {}", posts.len()));

    if let Some(first) = posts.first() {
        for key in POST_KEYS {
            expect::field(first, key, "first post")?;
        }
        ctx.step(CHECK, "first post contains expected keys");
    }

    Ok(())
}

async fn get_one(ctx: &CheckContext<'_>) -> Result<()> {
    const CHECK: Check = Check::GetOne;
    let post_id = ctx.fixtures.get_id;

    let response = ctx.client.get(post_id).await?;
    expect::status(&response, 200)?;
    ctx.step(CHECK, "status code 200 OK");

    let post = response.json()?;
    let id = expect::u64_field(&post, "id", "response")?;
    expect::equal("post id", &post_id, &id)?;

    let title = expect::str_field(&post, "title", "response")?;
    expect::contains(
        &format!("title of post {}", post_id),
        title,
        &ctx.fixtures.expected_title,
    )?;
    ctx.step(CHECK, format!("post ID {} retrieved correctly", id));

    Ok(())
}

async fn create(ctx: &CheckContext<'_>) -> Result<()> {
    const CHECK: Check = Check::Create;
    let new_post = &ctx.fixtures.create;

    let response = ctx.client.create(new_post).await?;
    expect::status(&response, 201)?;
    ctx.step(CHECK, "status code 201 created");

    let created = response.json()?;

    let title = expect::str_field(&created, "title", "created post")?;
    expect::equal("created post title", new_post.title.as_str(), title)?;

    let body = expect::str_field(&created, "body", "created post")?;
    expect::equal("created post body", new_post.body.as_str(), body)?;

    let id = expect::field(&created, "id", "new post")?;
    ctx.step(CHECK, format!("new post created with id {}", id));

    Ok(())
}

async fn replace(ctx: &CheckContext<'_>) -> Result<()> {
    const CHECK: Check = Check::Replace;
    let post = &ctx.fixtures.replace;

    let response = ctx.client.replace(post).await?;
    expect::status(&response, 200)?;
    ctx.step(CHECK, "status code 200 updated");

    let body = &response.json()?;

    let id = expect::u64_field(body, "id", "response")?;
    expect::equal("post id", &post.id, &id)?;
    ctx.step(CHECK, format!("response data id {} matches post id", id));

    let title = expect::str_field(body, "title", "response")?;
    expect::equal("post title", post.title.as_str(), title)?;
    ctx.step(CHECK, format!("response title {} matches post title", title));

    let text = expect::str_field(body, "body", "response")?;
    expect::equal("post body", post.body.as_str(), text)?;
    ctx.step(CHECK, format!("response body {} matches post body", text));

    let user_id = expect::u64_field(body, "userId", "response")?;
    expect::equal("post user id", &post.user_id, &user_id)?;
    ctx.step(CHECK, format!("response user id {} matches post user id", user_id));

    ctx.step(CHECK, "successfully updated post contents using PUT");
    Ok(())
}

async fn partial_update(ctx: &CheckContext<'_>) -> Result<()> {
    const CHECK: Check = Check::PartialUpdate;
    let post_id = ctx.fixtures.patch_id;
    let patch = PostPatch::body(ctx.fixtures.patch_body.as_str());

    let response = ctx.client.patch(post_id, &patch).await?;
    expect::status(&response, 200)?;
    ctx.step(CHECK, "status code 200 updated");

    let patched = &response.json()?;

    let id = expect::u64_field(patched, "id", "response")?;
    expect::equal("post id", &post_id, &id)?;
    ctx.step(CHECK, format!("response data id {} matches post id", id));

    let body = expect::str_field(patched, "body", "response")?;
    expect::equal("post body", ctx.fixtures.patch_body.as_str(), body)?;
    ctx.step(CHECK, format!("response body {} matches post body", body));

    // Baseline is a read taken after the patch, not before it.
    let current = ctx.client.get(post_id).await?;
    expect::status(&current, 200)?;
    let current = current.json()?;
    unchanged(patched, &current, "title")?;
    unchanged(patched, &current, "userId")?;
    ctx.step(CHECK, "other fields (title, userId) remained unchanged as expected.");

    ctx.step(CHECK, "successfully updated post contents using PATCH");
    Ok(())
}

fn unchanged(patched: &Value, current: &Value, key: &str) -> Result<()> {
    let after_patch = expect::field(patched, key, "patch response")?;
    let on_server = expect::field(current, key, "current post")?;
    if after_patch != on_server {
        return Err(crate::Error::assertion(format!(
            "PATCH unexpectedly changed {}: expected {}, got {}",
            key, on_server, after_patch
        )));
    }
    Ok(())
}

async fn delete(ctx: &CheckContext<'_>) -> Result<()> {
    const CHECK: Check = Check::Delete;
    let post_id = ctx.fixtures.delete_id;

    let response = ctx.client.delete(post_id).await?;
    expect::status(&response, 200)?;
    ctx.step(CHECK, "status code 200 OK");

    let verification = ctx.client.get(post_id).await?;
    expect::status(&verification, 404)?;
    ctx.step(CHECK, "status code 404 OK, which means not found");

    ctx.step(CHECK, "successfully removed post contents using DELETE");
    Ok(())
}
