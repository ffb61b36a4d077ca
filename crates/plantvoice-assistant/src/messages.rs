//! Spoken text catalogue (pt-BR).

pub use plantvoice_types::EMPTY_TEXT_FALLBACK as NO_USEFUL_ANSWER;

pub const LAUNCH: &str = "Oi! O que você quer saber da sua energia?";
pub const LAUNCH_REPROMPT: &str = "Pode repetir?";

pub const MISSING_QUERY: &str = "Não entendi. Pode repetir sua pergunta?";
pub const MISSING_QUERY_REPROMPT: &str = "Pode repetir?";

pub const MISSING_PLANT: &str = "Preciso saber qual é a sua usina. Diga, por exemplo: \
                                 usar a planta PWID um dois três. \
                                 Ou configure uma planta padrão no serviço.";
pub const MISSING_PLANT_REPROMPT: &str = "Qual é o ID da sua usina?";

pub const REPHRASE: &str = "Desculpe, não entendi. Pode reformular?";
pub const REPHRASE_REPROMPT: &str = "Pode reformular?";

pub const FAREWELL: &str = "Até mais!";

pub const WRONG_PLANT: &str =
    "Parece que ainda não selecionei a usina correta. Confirme o ID e tente de novo.";
pub const SERVICE_UNREACHABLE: &str = "Estou com dificuldade para acessar o serviço no momento.";
pub const UNAUTHORIZED_APPLICATION: &str = "Aplicativo não autorizado.";
pub const UNSUPPORTED_REQUEST: &str = "Desculpe, ocorreu um erro ao processar sua solicitação.";
pub const APOLOGY: &str = "Desculpe, tive um problema aqui.";

/// Prefix for errors the backend reported itself (`{"ok": false, "error": ...}`).
pub const SERVICE_ERROR_PREFIX: &str = "Erro do serviço";

/// Status code spoken when the backend credential is missing.
pub const MISSING_CREDENTIAL_STATUS: u16 = 401;

/// "Erro ao acessar o serviço. Código <status>"
pub fn service_status(status: u16) -> String {
    format!("Erro ao acessar o serviço. Código {}", status)
}

/// "Erro do serviço: <message>"
pub fn service_error(message: &str) -> String {
    format!("{}: {}", SERVICE_ERROR_PREFIX, message)
}
