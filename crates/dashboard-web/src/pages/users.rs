//! User approval page

use crate::components::loading::{LoadFailed, Loading, OutdatedNotice};
use crate::components::pagination::{FooterModel, Pagination};
use crate::components::table::{EmptyRow, SearchForm, TableHead, header_cells};
use crate::fetch::Loaded;
use crate::html::Layout;
use crate::query::TableLinks;
use dashboard_client::Session;
use dashboard_core::config::TableConfig;
use dashboard_core::users::{count_by_status, derive_users};
use dashboard_core::utils::{format_date, truncate_id};
use dashboard_core::{StatusFilter, TableState, User, UserStatus, ViewStatus};
use leptos::prelude::*;

/// Path of the users page
pub const PATH: &str = "/dashboard/users";

const ID_DISPLAY_CHARS: usize = 8;

/// Render the users page for a load outcome, table state and status filter
#[must_use]
pub fn render(
    session: &Session,
    loaded: &Loaded<Vec<User>>,
    state: &TableState,
    status: StatusFilter,
    table: &TableConfig,
) -> String {
    let layout = Layout::new("Users", PATH, session);
    match loaded {
        Loaded::Loading => layout
            .refresh(2)
            .render(view! { <Loading message="Loading users..."/> }),
        Loaded::Failed => layout.render(view! {
            <LoadFailed message="Failed to load users." retry_href={format!("{PATH}?refresh=1")}/>
        }),
        Loaded::Ready { data, outdated } => {
            layout.render(users_table(data, state, status, table, *outdated))
        }
    }
}

/// The users page for a visitor without a session. The list needs a token,
/// so nothing is fetched.
#[must_use]
pub fn render_signed_out(session: &Session) -> String {
    Layout::new("Users", PATH, session).render(view! {
        <div class="card" role="alert">
            <h2>"Authentication required"</h2>
            <p>"Log in to review user accounts."</p>
            <a href="/login">"Go to login"</a>
        </div>
    })
}

fn users_table(
    users: &[User],
    state: &TableState,
    status: StatusFilter,
    table: &TableConfig,
    outdated: bool,
) -> AnyView {
    let derived = derive_users(users, state, status);
    let links = TableLinks::<User>::new(PATH, state, derived.page_index, status);
    let return_to = links.current();
    let refresh = links.refresh();
    let notice = outdated.then(|| view! { <OutdatedNotice retry_href={refresh.clone()}/> });
    let total = format!("Total Users: {}", users.len());
    let pending = format!("Pending: {}", count_by_status(users, UserStatus::Pending));
    let filter = state.filter().to_string();
    let hidden = links.form_fields();
    let cells = header_cells(&derived, &links);
    let footer = FooterModel::new(&derived, &links, &table.page_size_options, "users");

    let colspan = derived.visible_columns.len() + 1;
    let body = match derived.status {
        ViewStatus::NoData => view! { <EmptyRow colspan message="No users found"/> }.into_any(),
        ViewStatus::NoMatches => {
            view! { <EmptyRow colspan message="No users match the current filters"/> }.into_any()
        }
        ViewStatus::Rows => derived
            .rows
            .iter()
            .map(|user| {
                let row = derived
                    .visible_columns
                    .iter()
                    .map(|column| view! { <td>{cell(user, column.id)}</td> })
                    .collect_view();
                let actions = (user.status == UserStatus::Pending).then(|| {
                    view! { <DecisionButtons id={user.id.clone()} return_to={return_to.clone()}/> }
                });
                view! {
                    <tr>
                        {row}
                        <td>{actions}</td>
                    </tr>
                }
            })
            .collect_view()
            .into_any(),
    };

    view! {
        {notice}
        <div class="summary">
            <span>{total}</span>
            <span>{pending}</span>
        </div>
        <div class="toolbar">
            <SearchForm action=PATH filter placeholder="Search by email or ID..." hidden>
                <StatusSelect current=status/>
            </SearchForm>
            <a class="refresh" href=refresh>"Refresh"</a>
        </div>
        <table class="users">
            <TableHead cells trailing={vec!["Actions"]}/>
            <tbody>{body}</tbody>
        </table>
        <Pagination model=footer/>
    }
    .into_any()
}

#[component]
fn StatusSelect(current: StatusFilter) -> impl IntoView {
    view! {
        <select name="status" aria-label="Filter by status">
            {StatusFilter::OPTIONS
                .into_iter()
                .map(|option| {
                    view! {
                        <option value={option.as_str()} selected={option == current}>
                            {option.label()}
                        </option>
                    }
                })
                .collect_view()}
        </select>
    }
}

fn cell(user: &User, column: &str) -> AnyView {
    match column {
        "id" => view! {
            <span title={user.id.clone()}>{truncate_id(&user.id, ID_DISPLAY_CHARS)}</span>
        }
        .into_any(),
        "email" => user.email.clone().into_any(),
        "status" => view! { <StatusBadge status={user.status}/> }.into_any(),
        "created_at" => format_date(&user.created_at).into_any(),
        _ => ().into_any(),
    }
}

/// Coloured badge for an account status
#[component]
pub fn StatusBadge(
    /// Status to show
    status: UserStatus,
) -> impl IntoView {
    view! {
        <span class={format!("badge badge-{}", status.as_str())}>{status.label()}</span>
    }
}

/// Approve and reject forms for a pending account
#[component]
fn DecisionButtons(id: String, return_to: String) -> impl IntoView {
    let id = urlencoding::encode(&id).into_owned();
    let approve = format!("{PATH}/{id}/approve");
    let reject = format!("{PATH}/{id}/reject");
    view! {
        <div class="actions">
            <form class="inline" method="post" action=approve>
                <input type="hidden" name="return_to" value={return_to.clone()}/>
                <button type="submit" class="approve">"Approve"</button>
            </form>
            <form class="inline" method="post" action=reject>
                <input type="hidden" name="return_to" value=return_to/>
                <button type="submit" class="reject">"Reject"</button>
            </form>
        </div>
    }
}
