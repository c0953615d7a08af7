use leptos::ev::{MouseEvent, SubmitEvent};
use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::{info, warn};

use crate::api;
use crate::components::modal::Modal;
use crate::forms::{AddUserForm, DeleteDialog, EditUserForm, FormField};
use crate::models::User;

#[component]
fn FieldError(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || message.get().is_some()>
            <p class="field-error">{move || message.get()}</p>
        </Show>
    }
}

#[component]
fn SubmitButton(#[prop(into)] busy: Signal<bool>, busy_label: &'static str) -> impl IntoView {
    move || {
        if busy.get() {
            view! { <button type="button" disabled=true>{busy_label}</button> }.into_any()
        } else {
            view! { <button type="submit">"Submit"</button> }.into_any()
        }
    }
}

#[component]
fn StatusRadios(
    group: String,
    #[prop(into)] current: Signal<String>,
    on_pick: Callback<String>,
) -> impl IntoView {
    view! {
        <div class="radio-group">
            <label>
                <input
                    type="radio"
                    name=group.clone()
                    value="active"
                    prop:checked=move || current.get() == "active"
                    on:change=move |_| on_pick.run("active".to_string())
                />
                "Active"
            </label>
            <label>
                <input
                    type="radio"
                    name=group
                    value="inactive"
                    prop:checked=move || current.get() == "inactive"
                    on:change=move |_| on_pick.run("inactive".to_string())
                />
                "Inactive"
            </label>
        </div>
    }
}

#[component]
pub(crate) fn AddUser(on_saved: Callback<()>) -> impl IntoView {
    let form = RwSignal::new(AddUserForm::default());

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let Some(Some(new_user)) = form.try_update(|f| f.submit()) else {
            return;
        };

        spawn_local(async move {
            match api::create_user(&new_user).await {
                Ok(created) => {
                    info!(id = created.id, "user created");
                    form.update(|f| f.submit_succeeded());
                    on_saved.run(());
                }
                Err(err) => {
                    warn!(error = %err, "failed to add user");
                    form.update(|f| f.submit_failed(&err));
                }
            }
        });
    };

    let visible = Signal::derive(move || form.with(|f| f.open));
    let saving = Signal::derive(move || form.with(|f| f.saving));
    let on_close = Callback::new(move |_: ()| form.update(|f| f.close()));

    view! {
        <button class="primary" on:click=move |_| form.update(|f| f.open())>"Add User"</button>
        <Modal visible=visible on_close=on_close>
            <h3>"Add User"</h3>
            <form on:submit=on_submit>
                <input
                    type="text"
                    placeholder="Your Name"
                    prop:value=move || form.with(|f| f.data.name.clone())
                    on:input=move |ev| form.update(|f| f.set_field(FormField::Name, event_target_value(&ev)))
                />
                <FieldError message=Signal::derive(move || form.with(|f| f.errors.name.clone())) />

                <input
                    type="email"
                    placeholder="Your Email"
                    prop:value=move || form.with(|f| f.data.email.clone())
                    on:input=move |ev| form.update(|f| f.set_field(FormField::Email, event_target_value(&ev)))
                />
                <FieldError message=Signal::derive(move || form.with(|f| f.errors.email.clone())) />

                <select
                    prop:value=move || form.with(|f| f.data.gender.clone())
                    on:change=move |ev| form.update(|f| f.set_field(FormField::Gender, event_target_value(&ev)))
                >
                    <option value="">"Select Gender"</option>
                    <option value="male">"male"</option>
                    <option value="female">"female"</option>
                </select>
                <FieldError message=Signal::derive(move || form.with(|f| f.errors.gender.clone())) />

                <StatusRadios
                    group="add-status".to_string()
                    current=Signal::derive(move || form.with(|f| f.data.status.clone()))
                    on_pick=Callback::new(move |value: String| {
                        form.update(|f| f.set_field(FormField::Status, value))
                    })
                />
                <FieldError message=Signal::derive(move || form.with(|f| f.errors.status.clone())) />

                <FieldError message=Signal::derive(move || form.with(|f| f.submit_error.clone())) />

                <div class="overlay-actions">
                    <button type="button" on:click=move |_| on_close.run(()) disabled=move || saving.get()>
                        "Close"
                    </button>
                    <SubmitButton busy=saving busy_label="Saving..." />
                </div>
            </form>
        </Modal>
    }
}

#[component]
pub(crate) fn EditUser(user: User, on_saved: Callback<()>) -> impl IntoView {
    let group = format!("edit-status-{}", user.id);
    let form = RwSignal::new(EditUserForm::new(&user));

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let Some(Some((id, update))) = form.try_update(|f| f.submit()) else {
            return;
        };

        spawn_local(async move {
            match api::update_user(id, &update).await {
                Ok(_) => {
                    info!(id, "user updated");
                    form.update(|f| f.submit_succeeded());
                    on_saved.run(());
                }
                Err(err) => {
                    warn!(id, error = %err, "failed to update user");
                    form.update(|f| f.submit_failed(&err));
                }
            }
        });
    };

    let visible = Signal::derive(move || form.with(|f| f.open));
    let saving = Signal::derive(move || form.with(|f| f.saving));
    let on_close = Callback::new(move |_: ()| form.update(|f| f.close()));

    view! {
        <button class="icon" title="Edit" on:click=move |_| form.update(|f| f.open())>"Edit"</button>
        <Modal visible=visible on_close=on_close>
            <h3>"Edit User"</h3>
            <form on:submit=on_submit>
                <input
                    type="text"
                    placeholder="Your Name"
                    prop:value=move || form.with(|f| f.data.name.clone())
                    on:input=move |ev| form.update(|f| f.set_field(FormField::Name, event_target_value(&ev)))
                />
                <FieldError message=Signal::derive(move || form.with(|f| f.errors.name.clone())) />

                <input
                    type="email"
                    placeholder="Your Email"
                    prop:value=move || form.with(|f| f.data.email.clone())
                    on:input=move |ev| form.update(|f| f.set_field(FormField::Email, event_target_value(&ev)))
                />
                <FieldError message=Signal::derive(move || form.with(|f| f.errors.email.clone())) />

                <StatusRadios
                    group=group
                    current=Signal::derive(move || form.with(|f| f.data.status.clone()))
                    on_pick=Callback::new(move |value: String| {
                        form.update(|f| f.set_field(FormField::Status, value))
                    })
                />
                <FieldError message=Signal::derive(move || form.with(|f| f.errors.status.clone())) />

                <FieldError message=Signal::derive(move || form.with(|f| f.submit_error.clone())) />

                <div class="overlay-actions">
                    <button type="button" on:click=move |_| on_close.run(()) disabled=move || saving.get()>
                        "Close"
                    </button>
                    <SubmitButton busy=saving busy_label="Saving..." />
                </div>
            </form>
        </Modal>
    }
}

#[component]
pub(crate) fn DeleteUser(user: User, on_deleted: Callback<()>) -> impl IntoView {
    let dialog = RwSignal::new(DeleteDialog::default());
    let user_id = user.id;
    let user_name = user.name;

    let on_confirm = move |_: MouseEvent| {
        let Some(Some(id)) = dialog.try_update(|d| d.confirm()) else {
            return;
        };

        spawn_local(async move {
            match api::delete_user(id).await {
                Ok(()) => {
                    info!(id, "user deleted");
                    dialog.update(|d| d.succeeded());
                    on_deleted.run(());
                }
                Err(err) => {
                    warn!(id, error = %err, "failed to delete user");
                    dialog.update(|d| d.failed(&err));
                }
            }
        });
    };

    let visible = Signal::derive(move || dialog.with(|d| d.is_open()));
    let deleting = Signal::derive(move || dialog.with(|d| d.is_deleting()));
    let on_close = Callback::new(move |_: ()| dialog.update(|d| d.cancel()));
    let target_name = move || {
        dialog.with(|d| d.target().map(|t| t.name.clone()).unwrap_or_default())
    };
    let error = Signal::derive(move || dialog.with(|d| d.error().map(str::to_string)));

    view! {
        <button
            class="icon danger"
            title="Delete"
            on:click=move |_| {
                let name = user_name.clone();
                dialog.update(|d| d.open(user_id, name))
            }
        >
            "Delete"
        </button>
        <Modal visible=visible on_close=on_close>
            <h3>"Delete user"</h3>
            <p class="warning">
                "Are you sure you want to delete " <strong>{target_name}</strong>
                "? This action cannot be undone."
            </p>
            <FieldError message=error />
            <div class="overlay-actions">
                <button type="button" on:click=move |_| on_close.run(()) disabled=move || deleting.get()>
                    "Close"
                </button>
                {move || {
                    if deleting.get() {
                        view! { <button type="button" disabled=true>"Deleting..."</button> }
                            .into_any()
                    } else {
                        view! {
                            <button type="button" class="danger" on:click=on_confirm>
                                "Delete"
                            </button>
                        }
                            .into_any()
                    }
                }}
            </div>
        </Modal>
    }
}
