//! Sign-in command handlers

use tracing::info;

use crate::models::UserRole;
use crate::services::ServiceFactory;
use crate::utils::errors::Result;

pub async fn handle_login(services: &ServiceFactory, email: &str, password: &str) -> Result<()> {
    let user = services.auth.login(email, password).await?;
    println!("Signed in as {} <{}> ({})", user.name, user.email, user.role.as_str());
    Ok(())
}

pub async fn handle_google_login(services: &ServiceFactory, credential: &str) -> Result<()> {
    let user = services.auth.login_with_google(credential).await?;
    println!("Signed in with Google as {} <{}>", user.name, user.email);
    Ok(())
}

pub async fn handle_register(
    services: &ServiceFactory,
    name: &str,
    email: &str,
    password: &str,
    role: UserRole,
) -> Result<()> {
    let user = services.auth.register(name, email, password, role).await?;
    info!(user_id = %user.id, "Account created");
    println!("Welcome, {}! Your account is ready.", user.name);
    Ok(())
}

pub async fn handle_logout(services: &ServiceFactory) -> Result<()> {
    services.auth.logout().await?;
    println!("Signed out.");
    Ok(())
}

pub fn handle_whoami(services: &ServiceFactory) -> Result<()> {
    match services.auth.current_user() {
        Some(user) => println!("{} <{}> ({})", user.name, user.email, user.role.as_str()),
        None => println!("Not signed in."),
    }
    Ok(())
}
