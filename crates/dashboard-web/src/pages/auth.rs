//! Login and registration forms

use crate::html::Layout;
use dashboard_client::Session;
use leptos::prelude::*;

/// Login form, optionally with an error and the username to refill
#[must_use]
pub fn login(error: Option<&str>, username: &str) -> String {
    let session = Session::anonymous();
    let error = error.map(str::to_string);
    let username = username.to_string();
    Layout::new("Login", "/login", &session)
        .without_menu()
        .render(view! {
            <div class="card auth">
                <h2>"Login"</h2>
                <FormError error/>
                <form method="post" action="/login">
                    <label>
                        "Username"
                        <input
                            type="text"
                            name="username"
                            value=username
                            autocomplete="username"
                            required=true
                        />
                    </label>
                    <label>
                        "Password"
                        <input
                            type="password"
                            name="password"
                            autocomplete="current-password"
                            required=true
                        />
                    </label>
                    <button type="submit">"Login"</button>
                </form>
                <p>"No account yet? " <a href="/register">"Register"</a></p>
            </div>
        })
}

/// Registration form. `notice` is the API's confirmation after a successful
/// registration; the form is then replaced by a link to the login page.
#[must_use]
pub fn register(error: Option<&str>, notice: Option<&str>, email: &str) -> String {
    let session = Session::anonymous();
    let body = match notice {
        Some(notice) => {
            let notice = notice.to_string();
            view! {
                <div class="card auth">
                    <h2>"Register"</h2>
                    <div class="notice" role="status">{notice}</div>
                    <p>"An administrator must approve your account before you can log in."</p>
                    <a href="/login">"Go to login"</a>
                </div>
            }
            .into_any()
        }
        None => {
            let error = error.map(str::to_string);
            let email = email.to_string();
            view! {
                <div class="card auth">
                    <h2>"Register"</h2>
                    <FormError error/>
                    <form method="post" action="/register">
                        <label>
                            "Email"
                            <input
                                type="email"
                                name="email"
                                value=email
                                autocomplete="email"
                                required=true
                            />
                        </label>
                        <label>
                            "Password"
                            <input
                                type="password"
                                name="password"
                                autocomplete="new-password"
                                required=true
                            />
                        </label>
                        <button type="submit">"Register"</button>
                    </form>
                    <p>"Already registered? " <a href="/login">"Login"</a></p>
                </div>
            }
            .into_any()
        }
    };
    Layout::new("Register", "/register", &session)
        .without_menu()
        .render(body)
}

#[component]
fn FormError(error: Option<String>) -> impl IntoView {
    error.map(|message| {
        view! { <div class="notice error" role="alert">{message}</div> }
    })
}
