//! Session commands.
//!
//! # Usage
//!
//! ```bash
//! farmerty sign-in -e grower@greenvalley.farm -p tomatoes
//! farmerty sign-up -n "Ann Lee" -e ann@example.com -p secret1 -r consumer
//! farmerty whoami
//! farmerty sign-out
//! ```

use secrecy::SecretString;

use farmerty_core::Role;
use farmerty_storefront::models::Identity;
use farmerty_storefront::services::auth::{AuthError, SessionState};
use farmerty_storefront::state::AppState;

use super::Interrupt;

/// Sign in and persist the session.
pub async fn sign_in(state: &AppState, email: &str, password: String) -> Result<(), AuthError> {
    let password = SecretString::from(password);
    let interrupt = Interrupt::install();

    let outcome = state
        .session()
        .sign_in(email, &password, interrupt.token())
        .await?;

    tracing::info!("{}", outcome.notice);
    print_identity(&outcome.value);
    Ok(())
}

/// Create an account and persist the session.
pub async fn sign_up(
    state: &AppState,
    name: &str,
    email: &str,
    password: String,
    role: Role,
) -> Result<(), AuthError> {
    let password = SecretString::from(password);
    let interrupt = Interrupt::install();

    let outcome = state
        .session()
        .sign_up(name, email, &password, role, interrupt.token())
        .await?;

    tracing::info!("{}", outcome.notice);
    print_identity(&outcome.value);
    Ok(())
}

pub fn sign_out(state: &AppState) {
    let outcome = state.session().sign_out();
    tracing::info!("{}", outcome.notice);
}

/// Show the signed-in identity.
#[allow(clippy::print_stdout)]
pub fn whoami(state: &AppState) {
    match state.session().state() {
        SessionState::Authenticated(identity) => print_identity(&identity),
        SessionState::Authenticating { .. } | SessionState::Unauthenticated => {
            println!("Not signed in");
        }
    }
}

#[allow(clippy::print_stdout)]
fn print_identity(identity: &Identity) {
    println!(
        "{} <{}> ({}) id={}",
        identity.name(),
        identity.email(),
        identity.role(),
        identity.id()
    );
}
