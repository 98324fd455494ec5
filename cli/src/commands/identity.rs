//! Identity management: show, replace, forget.

use tracing::info;

use super::Api;

pub fn whoami(api: &Api) -> Result<(), Box<dyn std::error::Error>> {
    let user = api.identity().get_identity()?;
    println!("{user}");
    Ok(())
}

pub fn login(api: &Api, user_id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let user_id = user_id.trim();
    if user_id.is_empty() {
        return Err("user id must not be empty".into());
    }
    api.identity().set_identity(user_id)?;
    info!(path = %api.identity().store().path().display(), "stored user id");
    println!("Logged in as {user_id}");
    Ok(())
}

pub fn logout(api: &Api) -> Result<(), Box<dyn std::error::Error>> {
    api.identity().clear_identity()?;
    println!("Logged out. A new id will be created on next use.");
    Ok(())
}
