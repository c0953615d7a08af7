use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::{debug, warn};

use crate::api;
use crate::components::modal::Modal;
use crate::state::{Accent, PostListState, comment_badge};

fn load_posts(state: RwSignal<PostListState>) {
    let Some(ticket) = state.try_update(|s| s.begin_load()) else {
        return;
    };

    spawn_local(async move {
        let result = api::list_posts().await.map_err(|err| {
            warn!(error = %err, "failed to fetch posts");
            err.to_string()
        });
        let applied = state.try_update(|s| s.finish_load(ticket, result));
        if applied == Some(false) {
            debug!("stale posts response dropped");
        }
    });
}

fn open_comments(state: RwSignal<PostListState>, post_id: i64) {
    let Some(ticket) = state.try_update(|s| s.begin_comments(post_id)) else {
        return;
    };

    spawn_local(async move {
        let result = api::list_comments(post_id).await.map_err(|err| {
            warn!(post_id, error = %err, "failed to fetch comments");
            err.to_string()
        });
        let applied = state.try_update(|s| s.finish_comments(ticket, result));
        if applied == Some(false) {
            debug!(post_id, "stale comments response dropped");
        }
    });
}

#[component]
pub(crate) fn PostsPage() -> impl IntoView {
    let state = RwSignal::new(PostListState::default());

    load_posts(state);

    let load_error = move || state.with(|s| s.load().error().map(str::to_string));
    let comments_error = move || state.with(|s| s.comments_error().map(str::to_string));
    let comments_open = Signal::derive(move || state.with(|s| s.comments_open()));
    let on_close_comments = Callback::new(move |_: ()| state.update(|s| s.close_comments()));

    view! {
        <h1>"Blog Post"</h1>

        <Show when=move || load_error().is_some()>
            <div class="error-banner">
                <strong>"Failed to load posts: "</strong>
                {load_error}
                <button on:click=move |_| load_posts(state)>"Retry"</button>
            </div>
        </Show>
        <Show when=move || comments_error().is_some()>
            <div class="error-banner">
                <strong>"Failed to load comments: "</strong>
                {comments_error}
            </div>
        </Show>
        <Show when=move || state.with(|s| s.load().is_loading() && s.posts().is_empty())>
            <p class="muted">"Loading..."</p>
        </Show>

        <For
            each=move || {
                state.with(|s| s.posts().iter().cloned().enumerate().collect::<Vec<_>>())
            }
            key=|(index, post)| (*index, post.id)
            children=move |(index, post)| {
                let post_id = post.id;
                let loading_this = move || state.with(|s| s.comments_loading() == Some(post_id));
                view! {
                    <article class="post-card">
                        <span class={Accent::for_index(index).class()}>{post.user_id}</span>
                        <div>
                            <h2>{post.title}</h2>
                            <p>{post.body}</p>
                            <button
                                class="link"
                                on:click=move |_| open_comments(state, post_id)
                                disabled=loading_this
                            >
                                "Comments"
                            </button>
                        </div>
                    </article>
                }
            }
        />

        <Modal visible=comments_open on_close=on_close_comments allow_click_outside=true>
            <h2>"Comments"</h2>
            <Show
                when=move || state.with(|s| !s.comments().is_empty())
                fallback=|| view! { <p class="muted">"No comments available."</p> }
            >
                <For
                    each=move || state.with(|s| s.comments().to_vec())
                    key=|comment| comment.id
                    children=move |comment| {
                        view! {
                            <div class="comment">
                                <span class="comment-badge">{comment_badge(comment.id)}</span>
                                <div>
                                    <h3>{comment.name}</h3>
                                    <p>{comment.body}</p>
                                </div>
                            </div>
                        }
                    }
                />
            </Show>
            <div class="overlay-actions">
                <button on:click=move |_| on_close_comments.run(())>"Close"</button>
            </div>
        </Modal>
    }
}
