//! User-facing strings shown by the login screen.

pub const APP_TITLE: &str = "Vyzio";

pub const USERNAME_PLACEHOLDER: &str = "Usuário";
pub const PASSWORD_PLACEHOLDER: &str = "Senha";

pub const SUBMIT: &str = "Entrar";
pub const SUBMITTING: &str = "Entrando...";

pub const SHOW_PASSWORD: &str = "Mostrar senha";
pub const HIDE_PASSWORD: &str = "Ocultar senha";

/// Shown once after returning from a logout redirect.
pub const LOGGED_OUT: &str = "Você se desconectou com sucesso";

/// Shown when the server rejects the login without an error message.
pub const LOGIN_FAILED_FALLBACK: &str = "Erro ao fazer login. Tente novamente.";

/// Shown when the request could not be sent or its response could not be read.
pub const CONNECTION_ERROR: &str = "Erro de conexão. Verifique sua internet e tente novamente.";

pub const SIGNED_IN: &str = "Sessão iniciada";
pub const LOGOUT: &str = "Sair";
pub const LOGGING_OUT: &str = "Saindo...";
