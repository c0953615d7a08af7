use leptos::prelude::*;

use crate::components::posts_page::PostsPage;
use crate::components::users_page::UsersPage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Blog,
    Users,
}

#[component]
pub fn App() -> impl IntoView {
    let section = RwSignal::new(Section::Blog);

    view! {
        <main class="page">
            <nav class="nav">
                <button
                    class:active=move || section.get() == Section::Blog
                    on:click=move |_| section.set(Section::Blog)
                >
                    "Blog"
                </button>
                <button
                    class:active=move || section.get() == Section::Users
                    on:click=move |_| section.set(Section::Users)
                >
                    "Users"
                </button>
            </nav>

            <section class="container">
                <Show
                    when=move || section.get() == Section::Blog
                    fallback=|| view! { <UsersPage /> }
                >
                    <PostsPage />
                </Show>
            </section>
        </main>
    }
}
