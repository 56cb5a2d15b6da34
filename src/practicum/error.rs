//! Tipos de erro para o cliente da API de status de homeworks do Practicum.
//!
//! Define [`ApiError`] com variantes para falha de rede, status HTTP
//! inesperado e corpo de resposta que não é JSON.

use thiserror::Error;

/// Erros que podem ocorrer ao consultar a API do Practicum.
///
/// - [`Unreachable`](ApiError::Unreachable) — falha na camada de rede
/// - [`BadStatus`](ApiError::BadStatus) — resposta com status diferente de 200
/// - [`MalformedBody`](ApiError::MalformedBody) — corpo não decodificável
#[derive(Debug, Error)]
pub enum ApiError {
    /// Falha de rede subjacente (DNS, conexão recusada, timeout).
    #[error("endpoint unreachable: {0}")]
    Unreachable(#[from] reqwest::Error),

    /// A API respondeu, mas não com 200. Carrega os parâmetros da
    /// requisição para diagnóstico; o token nunca é incluído.
    #[error("API answered {status} (endpoint {endpoint}, from_date={from_date})")]
    BadStatus {
        status: u16,
        endpoint: String,
        from_date: i64,
    },

    /// O corpo da resposta não pôde ser decodificado como JSON.
    #[error("failed to decode API response: {0}")]
    MalformedBody(String),
}
