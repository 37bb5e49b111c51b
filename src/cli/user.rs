//! taskly login, logout and whoami command implementations.

use serde::Serialize;

use crate::cli::Context;
use crate::error::Result;
use crate::output::{emit_success, HumanOutput};
use crate::session;

pub fn run_login(ctx: &Context, id: Option<&str>, name: &str, email: &str) -> Result<()> {
    let profile = session::login(&ctx.storage, id, name, email)?;

    let mut human = HumanOutput::new(format!("Logged in as {} ({})", profile.name, profile.id));
    if !profile.email.is_empty() {
        human.push_summary("email", profile.email.as_str());
    }
    emit_success(ctx.output(), "login", &profile, Some(&human))
}

pub fn run_logout(ctx: &Context) -> Result<()> {
    session::logout(&ctx.storage)?;

    #[derive(Serialize)]
    struct Data {
        logged_out: bool,
    }

    let human = HumanOutput::new("Logged out");
    emit_success(ctx.output(), "logout", &Data { logged_out: true }, Some(&human))
}

pub fn run_whoami(ctx: &Context) -> Result<()> {
    let profile = session::resolve_user(&ctx.storage, ctx.user.as_deref())?;

    let mut human = HumanOutput::new(format!("{} ({})", profile.name, profile.id));
    if !profile.email.is_empty() {
        human.push_summary("email", profile.email.as_str());
    }
    emit_success(ctx.output(), "whoami", &profile, Some(&human))
}
