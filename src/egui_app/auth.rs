/**
 * Authentication Module
 *
 * Login and registration forms, their client-side validation, and the
 * calls that exchange credentials for a session token.
 */

use crate::egui_app::api::{ApiClient, ApiError};
use crate::shared::{LoginRequest, RegisterRequest, SharedError, TokenResponse};

pub const LOGIN_FAILED: &str = "Login failed";
pub const REGISTRATION_FAILED: &str = "Registration failed";

/// Authentication state
#[derive(Debug, Clone, Default)]
pub struct AuthState {
    pub error: Option<String>,
    pub loading: bool,
}

impl AuthState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn set_error(&mut self, error: String) {
        self.error = Some(error);
    }

    /// Enter the in-flight state; the submit button stays disabled until done
    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn finish(&mut self, error: Option<String>) {
        self.loading = false;
        self.error = error;
    }
}

/// `local@domain.tld`, with no whitespace
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|label| !label.is_empty())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), SharedError> {
        if !is_valid_email(&self.email) {
            return Err(SharedError::validation("email", "Please enter a valid email address"));
        }
        if self.password.is_empty() {
            return Err(SharedError::validation("password", "Password is required"));
        }
        Ok(())
    }

    /// Field values are sent as typed
    pub fn to_request(&self) -> LoginRequest {
        LoginRequest {
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }

    pub fn clear_secrets(&mut self) {
        self.password.clear();
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub email: String,
    pub username: String,
    pub password: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<(), SharedError> {
        if !is_valid_email(&self.email) {
            return Err(SharedError::validation("email", "Please enter a valid email address"));
        }
        if self.username.trim().is_empty() {
            return Err(SharedError::validation("username", "Username is required"));
        }
        if self.password.is_empty() {
            return Err(SharedError::validation("password", "Password is required"));
        }
        Ok(())
    }

    pub fn to_request(&self) -> RegisterRequest {
        RegisterRequest {
            email: self.email.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }

    pub fn clear_secrets(&mut self) {
        self.password.clear();
    }
}

/// Which form produced an in-flight auth request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFlow {
    Login,
    Register,
}

impl AuthFlow {
    pub fn failure_message(&self) -> &'static str {
        match self {
            AuthFlow::Login => LOGIN_FAILED,
            AuthFlow::Register => REGISTRATION_FAILED,
        }
    }
}

/// Log in with email and password
pub async fn login(api: &ApiClient, request: LoginRequest) -> Result<TokenResponse, ApiError> {
    let result = api.login(&request).await;
    match &result {
        Ok(_) => tracing::info!(email = %request.email, "login succeeded"),
        Err(e) => tracing::warn!(email = %request.email, error = %e, "login failed"),
    }
    result
}

/// Create an account; the backend logs the new user straight in
pub async fn register(api: &ApiClient, request: RegisterRequest) -> Result<TokenResponse, ApiError> {
    let result = api.register(&request).await;
    match &result {
        Ok(_) => tracing::info!(email = %request.email, "registration succeeded"),
        Err(e) => tracing::warn!(email = %request.email, error = %e, "registration failed"),
    }
    result
}
