//! Town Square feed: paw-ups, comments, and new posts.

use crate::actions::new_id;
use crate::models::{Comment, Pet, Post, PostCategory, User};

/// Add or withdraw `user_id`'s paw-up on `post_id`.
#[must_use]
pub fn toggle_paw_up(posts: &[Post], post_id: &str, user_id: &str) -> Vec<Post> {
    posts
        .iter()
        .map(|post| {
            if post.id != post_id {
                return post.clone();
            }
            let mut post = post.clone();
            if post.pawed_by.iter().any(|id| id == user_id) {
                post.pawed_by.retain(|id| id != user_id);
                post.paw_ups = post.paw_ups.saturating_sub(1);
            } else {
                post.pawed_by.push(user_id.to_owned());
                post.paw_ups += 1;
            }
            post
        })
        .collect()
}

/// Append a comment by `author` to `post_id`. Blank comments leave the feed
/// unchanged.
#[must_use]
pub fn add_comment(posts: &[Post], post_id: &str, author: &User, content: &str, now: &str) -> Vec<Post> {
    let content = content.trim();
    if content.is_empty() {
        return posts.to_vec();
    }

    posts
        .iter()
        .map(|post| {
            let mut post = post.clone();
            if post.id == post_id {
                post.comments.push(Comment {
                    id: new_id("comment"),
                    author_id: author.id.clone(),
                    author_name: author.name.clone(),
                    author_avatar: author.avatar.clone(),
                    content: content.to_owned(),
                    created_at: now.to_owned(),
                });
            }
            post
        })
        .collect()
}

/// Build a new post, or `None` when `content` is blank. The author tag names
/// the active pet's breed.
#[must_use]
pub fn compose_post(
    author: &User,
    active_pet: Option<&Pet>,
    content: &str,
    category: PostCategory,
    now: &str,
) -> Option<Post> {
    if content.trim().is_empty() {
        return None;
    }

    let breed = active_pet.map_or("Pet", |pet| if pet.breed.is_empty() { "Pet" } else { pet.breed.as_str() });
    Some(Post {
        id: new_id("post"),
        author_id: author.id.clone(),
        author_name: author.name.clone(),
        author_pet_tag: format!("{breed} Parent"),
        author_avatar: author.avatar.clone(),
        content: content.to_owned(),
        category,
        location: Some("Your location".to_owned()),
        image: None,
        paw_ups: 0,
        pawed_by: Vec::new(),
        comments: Vec::new(),
        created_at: now.to_owned(),
    })
}

/// Newest first.
#[must_use]
pub fn prepend_post(posts: &[Post], post: Post) -> Vec<Post> {
    std::iter::once(post).chain(posts.iter().cloned()).collect()
}

/// Posts in `category`, or all of them for `None`.
#[must_use]
pub fn filter_by_category(posts: &[Post], category: Option<PostCategory>) -> Vec<&Post> {
    posts.iter().filter(|post| category.is_none_or(|c| post.category == c)).collect()
}

#[cfg(test)]
#[path = "feed_test.rs"]
mod tests;
