//! HTML pages. Every function takes plain data and returns markup; any
//! text that came from a visitor or the database goes through [`escape`].

use std::fmt::Write;

use axum::response::Html;

use crate::{
    auth::session::Identity,
    contacts::repo_types::Contact,
    members::repo_types::{MemberProfile, MemberSummary, Plan},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// One-line message shown above a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }
}

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn nav(identity: &Identity) -> String {
    let mut links = String::from(
        r#"<a href="/">Home</a> <a href="/about">About</a> <a href="/membership">Membership</a> <a href="/bmi">BMI</a> <a href="/contact">Contact</a>"#,
    );
    match identity {
        Identity::Member { name, .. } => {
            let _ = write!(
                links,
                r#" <a href="/profile">{}</a> <a href="/logout">Logout</a>"#,
                escape(name)
            );
        }
        Identity::Admin => {
            links.push_str(r#" <a href="/admin">Dashboard</a> <a href="/logout">Logout</a>"#)
        }
        Identity::Anonymous => {
            links.push_str(r#" <a href="/user_login">Member Login</a> <a href="/login">Admin</a>"#)
        }
    }
    links
}

fn notice(notice: Option<&Notice>) -> String {
    match notice {
        Some(n) => {
            let class = match n.kind {
                NoticeKind::Success => "success",
                NoticeKind::Error => "error",
            };
            format!(r#"<p class="notice {class}">{}</p>"#, escape(&n.text))
        }
        None => String::new(),
    }
}

fn layout(identity: &Identity, title: &str, body: &str) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} | FitZone</title>
</head>
<body>
<header><nav>{nav}</nav></header>
<main>
<h1>{title}</h1>
{body}
</main>
<footer>FitZone Gym</footer>
</body>
</html>
"#,
        title = escape(title),
        nav = nav(identity),
    ))
}

pub fn home(identity: &Identity) -> Html<String> {
    layout(
        identity,
        "Welcome to FitZone",
        r#"<p>Train harder, recover smarter. Join FitZone today.</p>
<p><a href="/membership">Choose a membership plan</a> or <a href="/bmi">check your BMI</a>.</p>"#,
    )
}

pub fn about(identity: &Identity) -> Html<String> {
    layout(
        identity,
        "About Us",
        r#"<p>FitZone is a neighbourhood gym with certified trainers, modern equipment and classes for every level.</p>"#,
    )
}

pub fn membership(identity: &Identity, msg: Option<&Notice>) -> Html<String> {
    let options: String = Plan::ALL
        .iter()
        .map(|p| format!(r#"<option value="{}">{}</option>"#, p.as_str(), p.label()))
        .collect();
    let body = format!(
        r#"{notice}
<form method="post" action="/membership">
<label>Name <input name="name" required></label>
<label>Email <input name="email" type="email" required></label>
<label>Password <input name="password" type="password" required></label>
<label>Plan <select name="plan">{options}</select></label>
<button type="submit">Register</button>
</form>"#,
        notice = notice(msg),
    );
    layout(identity, "Membership", &body)
}

pub fn bmi(identity: &Identity, result: Option<f64>, msg: Option<&Notice>) -> Html<String> {
    let result = match result {
        Some(value) => format!(r#"<p class="result">Your BMI is <strong>{value:.2}</strong></p>"#),
        None => String::new(),
    };
    let body = format!(
        r#"{notice}
<form method="post" action="/bmi">
<label>Weight (kg) <input name="weight" inputmode="decimal" required></label>
<label>Height (cm) <input name="height" inputmode="decimal" required></label>
<button type="submit">Calculate</button>
</form>
{result}"#,
        notice = notice(msg),
    );
    layout(identity, "BMI Calculator", &body)
}

pub fn contact(identity: &Identity, msg: Option<&Notice>) -> Html<String> {
    let body = format!(
        r#"{notice}
<form method="post" action="/contact">
<label>Name <input name="name" required></label>
<label>Message <textarea name="message" required></textarea></label>
<button type="submit">Send</button>
</form>"#,
        notice = notice(msg),
    );
    layout(identity, "Contact Us", &body)
}

pub fn user_login(identity: &Identity, msg: Option<&Notice>) -> Html<String> {
    let body = format!(
        r#"{notice}
<form method="post" action="/user_login">
<label>Email <input name="email" type="email" required></label>
<label>Password <input name="password" type="password" required></label>
<button type="submit">Login</button>
</form>"#,
        notice = notice(msg),
    );
    layout(identity, "Member Login", &body)
}

pub fn profile(identity: &Identity, member: &MemberProfile) -> Html<String> {
    let body = format!(
        r#"<dl>
<dt>Name</dt><dd>{name}</dd>
<dt>Email</dt><dd>{email}</dd>
<dt>Plan</dt><dd>{plan}</dd>
</dl>"#,
        name = escape(&member.name),
        email = escape(&member.email),
        plan = escape(&member.plan),
    );
    layout(identity, "My Profile", &body)
}

pub fn admin_login(identity: &Identity, msg: Option<&Notice>) -> Html<String> {
    let body = format!(
        r#"{notice}
<form method="post" action="/login">
<label>Username <input name="username" required></label>
<label>Password <input name="password" type="password" required></label>
<button type="submit">Login</button>
</form>"#,
        notice = notice(msg),
    );
    layout(identity, "Admin Login", &body)
}

pub fn admin_dashboard(
    identity: &Identity,
    contacts: &[Contact],
    members: &[MemberSummary],
) -> Html<String> {
    let mut body = String::from(
        "<h2>Contacts</h2>\n<table>\n<tr><th>ID</th><th>Name</th><th>Message</th><th></th></tr>\n",
    );
    for c in contacts {
        let _ = writeln!(
            body,
            r#"<tr><td>{id}</td><td>{name}</td><td>{message}</td><td><a href="/delete_contact/{id}">Delete</a></td></tr>"#,
            id = c.id,
            name = escape(&c.name),
            message = escape(&c.message),
        );
    }
    body.push_str("</table>\n<h2>Members</h2>\n<table>\n<tr><th>ID</th><th>Name</th><th>Email</th><th>Plan</th><th></th></tr>\n");
    for m in members {
        let _ = writeln!(
            body,
            r#"<tr><td>{id}</td><td>{name}</td><td>{email}</td><td>{plan}</td><td><a href="/delete_member/{id}">Delete</a></td></tr>"#,
            id = m.id,
            name = escape(&m.name),
            email = escape(&m.email),
            plan = escape(&m.plan),
        );
    }
    body.push_str("</table>");
    layout(identity, "Admin Dashboard", &body)
}

pub fn error_page() -> Html<String> {
    layout(
        &Identity::Anonymous,
        "Error",
        "<p>Something went wrong. Please try again later.</p>",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_html() {
        assert_eq!(
            escape(r#"<script>alert("x") & 'y'</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;) &amp; &#39;y&#39;&lt;/script&gt;"
        );
    }

    #[test]
    fn dashboard_escapes_visitor_text() {
        let contacts = vec![Contact {
            id: 4,
            name: "<b>Eve</b>".into(),
            message: "hi".into(),
        }];
        let Html(page) = admin_dashboard(&Identity::Admin, &contacts, &[]);
        assert!(page.contains("&lt;b&gt;Eve&lt;/b&gt;"));
        assert!(page.contains(r#"href="/delete_contact/4""#));
        assert!(!page.contains("<b>Eve</b>"));
    }

    #[test]
    fn nav_follows_identity() {
        let Html(page) = home(&Identity::Anonymous);
        assert!(page.contains(r#"href="/user_login""#));
        assert!(!page.contains(r#"href="/logout""#));

        let Html(page) = home(&Identity::Member {
            id: 1,
            name: "Ana".into(),
        });
        assert!(page.contains(r#"href="/profile""#));
        assert!(page.contains(r#"href="/logout""#));

        let Html(page) = home(&Identity::Admin);
        assert!(page.contains(r#"href="/admin""#));
    }

    #[test]
    fn bmi_result_has_two_decimals() {
        let Html(page) = bmi(&Identity::Anonymous, Some(22.86), None);
        assert!(page.contains("22.86"));
        let Html(page) = bmi(&Identity::Anonymous, None, Some(&Notice::error("Height must be greater than zero")));
        assert!(page.contains("Height must be greater than zero"));
        assert!(!page.contains("Your BMI"));
    }
}
