use thiserror::Error;

pub const MISSING_FILES_MESSAGE: &str = "Por favor, selecione ambos os arquivos.";
pub const CONNECTION_MESSAGE: &str = "Erro de conexão ou falha na requisição ao servidor.";
pub const INVALID_RESPONSE_MESSAGE: &str = "Resposta inválida do servidor.";

/// Everything that can end a comparison attempt without a result.
#[derive(Debug, Error)]
pub enum CompareError {
    #[error("both files must be selected")]
    MissingFiles,
    #[error("failed to read {name}: {source}")]
    FileRead {
        name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("request to comparison service failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("comparison service responded with status {status}: {message}")]
    Server { status: u16, message: String },
    #[error("comparison service returned an unexpected body")]
    MalformedResponse,
    #[error("comparison service returned a body that is not JSON: {0}")]
    UnreadableBody(#[source] serde_json::Error),
    #[error("comparison task stopped before reporting a result")]
    Interrupted,
}

impl CompareError {
    /// Text shown in the error region.
    pub fn user_message(&self) -> String {
        match self {
            CompareError::MissingFiles => MISSING_FILES_MESSAGE.to_string(),
            CompareError::FileRead { name, .. } => {
                format!("Não foi possível ler o arquivo \"{}\".", name)
            }
            CompareError::Transport(_)
            | CompareError::UnreadableBody(_)
            | CompareError::Interrupted => {
                CONNECTION_MESSAGE.to_string()
            }
            CompareError::Server { message, .. } => format!("Erro ao processar: {}", message),
            CompareError::MalformedResponse => INVALID_RESPONSE_MESSAGE.to_string(),
        }
    }
}
