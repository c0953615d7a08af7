use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::{debug, warn};

use crate::api;
use crate::components::user_forms::{AddUser, DeleteUser, EditUser};
use crate::debounce::{DEBOUNCE_WINDOW, Debouncer};
use crate::models::{PER_PAGE_OPTIONS, UserStatus};
use crate::state::UserListState;

/// Запрашивает текущую страницу; список целиком заменяется ответом.
fn load_users(state: RwSignal<UserListState>) {
    let Some(fetch) = state.try_update(|s| s.begin_fetch()) else {
        return;
    };

    spawn_local(async move {
        let result = api::list_users(&fetch.query).await.map_err(|err| {
            warn!(query = ?fetch.query, error = %err, "failed to fetch users");
            err.to_string()
        });
        let applied = state.try_update(|s| s.finish_fetch(fetch.ticket, result));
        if applied == Some(false) {
            debug!(query = ?fetch.query, "stale users response dropped");
        }
    });
}

#[component]
pub(crate) fn UsersPage() -> impl IntoView {
    let state = RwSignal::new(UserListState::new());
    let search = RwSignal::new(Debouncer::new());

    let query = Memo::new(move |_| state.with(|s| s.query()));
    Effect::new(move |_| {
        query.track();
        load_users(state);
    });

    let on_search_input = move |value: String| {
        let Some(generation) = search.try_update(|d| d.input(value)) else {
            return;
        };
        set_timeout(
            move || {
                if let Some(Some(term)) = search.try_update(|d| d.settle(generation)) {
                    state.update(|s| {
                        s.apply_search(term);
                    });
                }
            },
            DEBOUNCE_WINDOW,
        );
    };

    let on_per_page = move |raw: String| {
        let Ok(per_page) = raw.parse::<u32>() else {
            return;
        };
        state.update(|s| {
            s.set_per_page(per_page);
        });
    };

    let on_mutated = Callback::new(move |_: ()| load_users(state));
    let load_error = move || state.with(|s| s.load().error().map(str::to_string));

    view! {
        <div class="toolbar">
            <h1>"Users"</h1>
            <AddUser on_saved=on_mutated />
        </div>

        <input
            type="text"
            class="search"
            placeholder="Search by name"
            prop:value=move || search.with(|d| d.input_value().to_string())
            on:input=move |ev| on_search_input(event_target_value(&ev))
        />

        <Show when=move || load_error().is_some()>
            <div class="error-banner">
                <strong>"Failed to load users: "</strong>
                {load_error}
                <button on:click=move |_| load_users(state)>"Retry"</button>
            </div>
        </Show>

        <table class="users">
            <thead>
                <tr>
                    <th>"Name"</th>
                    <th>"Gender"</th>
                    <th>"Status"</th>
                    <th>"Action"</th>
                </tr>
            </thead>
            <tbody>
                <Show
                    when=move || !state.with(|s| s.is_loading())
                    fallback=|| view! { <tr><td colspan="4">"Loading..."</td></tr> }
                >
                    <Show
                        when=move || state.with(|s| !s.users().is_empty())
                        fallback=|| view! { <tr><td colspan="4">"No Data Found"</td></tr> }
                    >
                        <For
                            each=move || state.with(|s| s.users().to_vec())
                            key=|user| user.clone()
                            children=move |user| {
                                let active = user.status == UserStatus::Active;
                                view! {
                                    <tr>
                                        <td>
                                            <div class="user-name">{user.name.clone()}</div>
                                            <div class="muted">{user.email.clone()}</div>
                                        </td>
                                        <td>{user.gender.as_str()}</td>
                                        <td>
                                            <span class={if active { "badge badge-active" } else { "badge badge-inactive" }}>
                                                {if active { "Active" } else { "Inactive" }}
                                            </span>
                                        </td>
                                        <td class="actions">
                                            <DeleteUser user=user.clone() on_deleted=on_mutated />
                                            <EditUser user=user on_saved=on_mutated />
                                        </td>
                                    </tr>
                                }
                            }
                        />
                    </Show>
                </Show>
            </tbody>
        </table>

        <div class="pager">
            <button
                on:click=move |_| state.update(|s| {
                    s.prev_page();
                })
                disabled=move || !state.with(|s| s.can_prev())
            >
                "Previous"
            </button>
            <span class="page-number">{move || state.with(|s| s.page())}</span>
            <button
                on:click=move |_| state.update(|s| {
                    s.next_page();
                })
                disabled=move || !state.with(|s| s.can_next())
            >
                "Next"
            </button>

            <select
                prop:value=move || state.with(|s| s.per_page().to_string())
                on:change=move |ev| on_per_page(event_target_value(&ev))
                disabled=move || state.with(|s| s.per_page_locked())
            >
                {PER_PAGE_OPTIONS
                    .into_iter()
                    .map(|option| view! { <option value={option.to_string()}>{option}</option> })
                    .collect_view()}
            </select>
        </div>
    }
}
