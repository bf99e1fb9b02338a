//! Login UI component.

use egui::{Align2, Color32, Context, Key, TextEdit, Vec2, Window};
use egui_phosphor::regular;
use vyzio_types::{LoginRequest, LoginResponse, CSRF_COOKIE_NAME};

use crate::api::{ApiError, ApiResult, LoginAttempt};
use crate::cookies::CookieSource;
use crate::location::{is_logout_redirect, PageLocation};
use crate::messages;

const SUCCESS_COLOR: Color32 = Color32::from_rgb(46, 160, 67);

/// Login screen state.
///
/// Owns the form fields and the status of the current submission. The
/// embedding application supplies the success callback and drives the
/// request itself: [`LoginScreen::begin_submit`] hands out the attempt,
/// [`LoginScreen::finish_submit`] takes the outcome back.
pub struct LoginScreen {
    /// Username input
    pub username: String,
    /// Password input
    pub password: String,
    /// Whether the password is shown in clear text
    pub show_password: bool,
    /// Error message from the last attempt
    pub error: Option<String>,
    /// Success message (logout confirmation)
    pub success_message: Option<String>,
    /// Whether login is in progress
    pub logging_in: bool,
    /// Clear the password after the server rejects the credentials
    clear_password_on_failure: bool,
    mounted: bool,
    focus_requested: bool,
    on_login_success: Box<dyn FnMut()>,
}

impl LoginScreen {
    /// Create an empty login screen. `on_login_success` runs once for every
    /// accepted login.
    pub fn new(on_login_success: impl FnMut() + 'static) -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            show_password: false,
            error: None,
            success_message: None,
            logging_in: false,
            clear_password_on_failure: false,
            mounted: false,
            focus_requested: false,
            on_login_success: Box::new(on_login_success),
        }
    }

    pub fn with_clear_password_on_failure(mut self, clear: bool) -> Self {
        self.clear_password_on_failure = clear;
        self
    }

    /// One-time initialization when the screen is first shown.
    ///
    /// Coming back from a logout redirect shows the logout confirmation and
    /// strips the query string from the visible URL. Later calls do nothing.
    pub fn mount(&mut self, location: &mut dyn PageLocation) {
        if self.mounted {
            return;
        }
        self.mounted = true;

        if is_logout_redirect(&location.search()) {
            tracing::info!("Returned from logout, clearing query string");
            self.success_message = Some(messages::LOGGED_OUT.to_string());
            location.replace_url("/");
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn toggle_password_visibility(&mut self) {
        self.show_password = !self.show_password;
    }

    /// Inputs and the submit button are disabled while a login is in flight.
    pub fn inputs_enabled(&self) -> bool {
        !self.logging_in
    }

    /// Start a submission.
    ///
    /// Returns `None` if one is already in flight. Otherwise clears both
    /// messages, enters the loading state and returns the attempt to send.
    /// A missing CSRF cookie yields an empty token.
    pub fn begin_submit(&mut self, cookies: &dyn CookieSource) -> Option<LoginAttempt> {
        if self.logging_in {
            tracing::debug!("Login already in progress, ignoring submit");
            return None;
        }

        self.error = None;
        self.success_message = None;
        self.logging_in = true;

        let csrf_token = cookies.get(CSRF_COOKIE_NAME).unwrap_or_else(|| {
            tracing::debug!("No {} cookie present, sending empty token", CSRF_COOKIE_NAME);
            String::new()
        });

        Some(LoginAttempt {
            request: LoginRequest {
                username: self.username.clone(),
                password: self.password.clone(),
            },
            csrf_token,
        })
    }

    /// Apply the outcome of the attempt started by [`LoginScreen::begin_submit`].
    pub fn finish_submit(&mut self, result: ApiResult<LoginResponse>) {
        if !self.logging_in {
            tracing::warn!("Login result received with no login in progress, ignoring");
            return;
        }
        self.logging_in = false;

        match result {
            Ok(_) => {
                tracing::info!("Login successful for user: {}", self.username);
                (self.on_login_success)();
            }
            Err(ApiError::Rejected { status, message }) => {
                tracing::info!("Login rejected (HTTP {})", status);
                self.error =
                    Some(message.unwrap_or_else(|| messages::LOGIN_FAILED_FALLBACK.to_string()));
                if self.clear_password_on_failure {
                    self.password.clear();
                }
            }
            Err(e) => {
                tracing::error!("Login request failed: {}", e);
                self.error = Some(messages::CONNECTION_ERROR.to_string());
            }
        }
    }

    /// Show the login screen and return true if login was requested.
    pub fn show(&mut self, ctx: &Context) -> bool {
        let mut login_requested = false;
        let enabled = self.inputs_enabled();

        Window::new("Login")
            .title_bar(false)
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.heading(messages::APP_TITLE);
                });
                ui.add_space(10.0);

                if let Some(ref message) = self.success_message {
                    ui.colored_label(
                        SUCCESS_COLOR,
                        format!("{} {}", regular::CHECK_CIRCLE, message),
                    );
                    ui.add_space(5.0);
                }

                if let Some(ref error) = self.error {
                    ui.colored_label(Color32::RED, format!("{} {}", regular::X_CIRCLE, error));
                    ui.add_space(5.0);
                }

                let username_response = ui
                    .horizontal(|ui| {
                        ui.label(regular::USER);
                        ui.add_enabled(
                            enabled,
                            TextEdit::singleline(&mut self.username)
                                .hint_text(messages::USERNAME_PLACEHOLDER),
                        )
                    })
                    .inner;

                if !self.focus_requested {
                    username_response.request_focus();
                    self.focus_requested = true;
                }

                let show_password = self.show_password;
                let (password_response, toggle_clicked) = ui
                    .horizontal(|ui| {
                        ui.label(regular::LOCK);
                        let response = ui.add_enabled(
                            enabled,
                            TextEdit::singleline(&mut self.password)
                                .password(!show_password)
                                .hint_text(messages::PASSWORD_PLACEHOLDER),
                        );

                        let (icon, tooltip) = if show_password {
                            (regular::EYE_SLASH, messages::HIDE_PASSWORD)
                        } else {
                            (regular::EYE, messages::SHOW_PASSWORD)
                        };
                        let toggle = ui
                            .add(egui::Button::new(icon).frame(false))
                            .on_hover_text(tooltip);

                        (response, toggle.clicked())
                    })
                    .inner;

                if toggle_clicked {
                    self.show_password = !self.show_password;
                }

                // Submit on Enter in either field
                if (username_response.lost_focus() || password_response.lost_focus())
                    && ui.input(|i| i.key_pressed(Key::Enter))
                {
                    login_requested = true;
                }

                ui.add_space(10.0);

                ui.horizontal(|ui| {
                    if self.logging_in {
                        ui.add_enabled(false, egui::Button::new(messages::SUBMITTING));
                        ui.spinner();
                    } else if ui
                        .button(format!("{} {}", regular::SIGN_IN, messages::SUBMIT))
                        .clicked()
                    {
                        login_requested = true;
                    }
                });
            });

        login_requested && !self.logging_in
    }
}
