//! Main application structure.

use egui::{Color32, Context};
use egui_phosphor::regular;
use std::sync::mpsc::Sender;
use vyzio_types::{CSRF_COOKIE_NAME, LOGOUT_QUERY_PARAM};

use crate::api::ApiClient;
use crate::cookies::CookieSource;
use crate::location::PageLocation;
use crate::login::LoginScreen;
use crate::messages;
use crate::state::{AppMessage, AppStateChannels};

#[cfg(target_arch = "wasm32")]
pub fn spawn_task<F>(future: F)
where
    F: std::future::Future<Output = ()> + 'static,
{
    wasm_bindgen_futures::spawn_local(future);
}

#[cfg(not(target_arch = "wasm32"))]
pub fn spawn_task<F>(future: F)
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    tokio::spawn(future);
}

/// Behaviour switches for the login flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppSettings {
    /// Clear the password field after the server rejects a login
    pub clear_password_on_failure: bool,
}

/// The main Vyzio application.
pub struct VyzioApp {
    /// API client for backend communication
    api: ApiClient,
    /// Where the CSRF token is read from
    cookies: Box<dyn CookieSource>,
    /// Visible page URL
    location: Box<dyn PageLocation>,
    /// Login form
    login: LoginScreen,
    /// Channels for async communication
    channels: AppStateChannels,
    /// Applied to every login screen this app creates
    #[cfg_attr(target_arch = "wasm32", allow(dead_code))]
    settings: AppSettings,
    /// Whether the login screen has reported success
    authenticated: bool,
    /// Whether a logout request is in flight
    logging_out: bool,
    /// Error from the last logout attempt
    status: Option<String>,
}

impl VyzioApp {
    /// Create a new application instance.
    /// The server URL is the origin the page was served from.
    #[cfg(target_arch = "wasm32")]
    pub fn new(cc: &eframe::CreationContext<'_>, settings: AppSettings) -> Self {
        use crate::cookies::DocumentCookies;
        use crate::location::BrowserLocation;

        install_fonts(&cc.egui_ctx);

        let server_url = web_sys::window()
            .and_then(|window| window.location().origin().ok())
            .unwrap_or_else(|| vyzio_types::DEFAULT_SERVER_URL.to_string());
        tracing::info!("REST API URL: {}", server_url);

        Self::with_dependencies(
            ApiClient::new(server_url),
            Box::new(DocumentCookies),
            Box::new(BrowserLocation),
            settings,
        )
    }

    /// Create a new application instance for native mode.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        server_url: &str,
        settings: AppSettings,
    ) -> Self {
        use crate::location::MemoryLocation;

        install_fonts(&cc.egui_ctx);
        tracing::info!("REST API URL: {}", server_url);

        let api = ApiClient::new(server_url);
        let cookies = api.cookie_source();
        Self::with_dependencies(api, cookies, Box::new(MemoryLocation::default()), settings)
    }

    /// Create the application around explicit collaborators. The login
    /// screen is mounted immediately.
    pub fn with_dependencies(
        api: ApiClient,
        cookies: Box<dyn CookieSource>,
        mut location: Box<dyn PageLocation>,
        settings: AppSettings,
    ) -> Self {
        let channels = AppStateChannels::new();
        let login = mounted_login_screen(channels.sender(), settings, location.as_mut());

        Self {
            api,
            cookies,
            location,
            login,
            channels,
            settings,
            authenticated: false,
            logging_out: false,
            status: None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn is_logging_out(&self) -> bool {
        self.logging_out
    }

    pub fn login_screen(&self) -> &LoginScreen {
        &self.login
    }

    pub fn login_screen_mut(&mut self) -> &mut LoginScreen {
        &mut self.login
    }

    pub fn location(&self) -> &dyn PageLocation {
        self.location.as_ref()
    }

    /// Send the current credentials. Does nothing while a login is in flight.
    pub fn submit_login(&mut self, ctx: &Context) {
        let Some(attempt) = self.login.begin_submit(self.cookies.as_ref()) else {
            return;
        };

        let api = self.api.clone();
        let tx = self.channels.sender();
        let ctx = ctx.clone();

        spawn_task(async move {
            let result = api.login(&attempt).await;
            let _ = tx.send(AppMessage::LoginFinished(result));
            ctx.request_repaint();
        });
    }

    /// End the session and return to the login screen.
    pub fn logout(&mut self, ctx: &Context) {
        if self.logging_out {
            return;
        }
        self.logging_out = true;
        self.status = None;

        let csrf_token = self.cookies.get(CSRF_COOKIE_NAME).unwrap_or_default();
        let api = self.api.clone();
        let tx = self.channels.sender();
        let ctx = ctx.clone();

        spawn_task(async move {
            match api.logout(&csrf_token).await {
                Ok(()) => {
                    let _ = tx.send(AppMessage::LogoutComplete);
                }
                Err(e) => {
                    tracing::error!("Failed to logout: {}", e);
                    let _ = tx.send(AppMessage::LogoutFailed(e.to_string()));
                }
            }
            ctx.request_repaint();
        });
    }

    /// Apply every message posted by finished async operations.
    pub fn process_messages(&mut self) {
        while let Ok(msg) = self.channels.rx.try_recv() {
            match msg {
                AppMessage::LoginFinished(result) => {
                    self.login.finish_submit(result);
                }
                AppMessage::Authenticated => {
                    tracing::info!("Authenticated, leaving login screen");
                    self.authenticated = true;
                }
                AppMessage::LogoutComplete => {
                    tracing::info!("Logout complete, returning to login form");
                    self.logging_out = false;
                    self.authenticated = false;

                    let target = format!("/?{}=true", LOGOUT_QUERY_PARAM);
                    self.location.assign(&target);

                    // The browser reloads the page; native mode remounts in place
                    #[cfg(not(target_arch = "wasm32"))]
                    {
                        self.login = mounted_login_screen(
                            self.channels.sender(),
                            self.settings,
                            self.location.as_mut(),
                        );
                    }
                }
                AppMessage::LogoutFailed(error) => {
                    self.logging_out = false;
                    self.status = Some(error);
                }
            }
        }
    }

    fn show_signed_in(&mut self, ctx: &Context) {
        let mut logout_requested = false;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(40.0);
                ui.heading(messages::APP_TITLE);
                ui.add_space(10.0);
                ui.label(format!("{} {}", regular::CHECK_CIRCLE, messages::SIGNED_IN));
                ui.add_space(10.0);

                if let Some(ref error) = self.status {
                    ui.colored_label(Color32::RED, error);
                    ui.add_space(5.0);
                }

                if self.logging_out {
                    ui.spinner();
                    ui.label(messages::LOGGING_OUT);
                } else if ui
                    .button(format!("{} {}", regular::SIGN_OUT, messages::LOGOUT))
                    .clicked()
                {
                    logout_requested = true;
                }
            });
        });

        if logout_requested {
            self.logout(ctx);
        }
    }
}

impl eframe::App for VyzioApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.process_messages();

        if self.authenticated {
            self.show_signed_in(ctx);
        } else if self.login.show(ctx) {
            self.submit_login(ctx);
        }
    }
}

fn mounted_login_screen(
    tx: Sender<AppMessage>,
    settings: AppSettings,
    location: &mut dyn PageLocation,
) -> LoginScreen {
    let mut login = LoginScreen::new(move || {
        let _ = tx.send(AppMessage::Authenticated);
    })
    .with_clear_password_on_failure(settings.clear_password_on_failure);
    login.mount(location);
    login
}

/// Register the icon font next to the default fonts.
fn install_fonts(ctx: &Context) {
    let mut fonts = egui::FontDefinitions::default();
    egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
    ctx.set_fonts(fonts);
}
