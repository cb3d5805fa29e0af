// ==========================================
// Dimensionamento Hidráulico - Erro da API remota
// ==========================================
// Todo fracasso de chamada remota é normalizado para este formato
// antes de cruzar a fronteira do serviço; falhas de transporte recebem
// códigos sintéticos (HTTP_ERROR_<status> / NETWORK_FAILURE)
// ==========================================

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Código sintético para falha de conexão (DNS, recusa, offline)
pub const CODIGO_FALHA_REDE: &str = "NETWORK_FAILURE";

// ==========================================
// ErroApi - formato comum de erro do contrato
// ==========================================
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[error("{codigo}: {mensagem}")]
pub struct ErroApi {
    pub codigo: String,
    pub mensagem: String,
    #[serde(default)]
    pub detalhes: serde_json::Value,
}

impl ErroApi {
    pub fn new(codigo: impl Into<String>, mensagem: impl Into<String>) -> Self {
        Self {
            codigo: codigo.into(),
            mensagem: mensagem.into(),
            detalhes: serde_json::Value::Null,
        }
    }

    pub fn com_detalhes(mut self, detalhes: serde_json::Value) -> Self {
        self.detalhes = detalhes;
        self
    }

    /// Erro sintético para status HTTP fora da faixa 2xx
    pub fn http(status: u16, endpoint: &str) -> Self {
        Self::new(
            format!("HTTP_ERROR_{}", status),
            format!("Erro de rede ou servidor ({}) ao acessar {}", status, endpoint),
        )
    }

    /// Erro sintético para falha de conexão
    pub fn falha_rede(causa: impl std::fmt::Display) -> Self {
        Self::new(
            CODIGO_FALHA_REDE,
            format!("Falha de conexão ao tentar acessar o serviço: {}", causa),
        )
    }

    /// Indica falha de transporte (por oposição a erro de domínio)
    pub fn eh_falha_transporte(&self) -> bool {
        self.codigo == CODIGO_FALHA_REDE || self.codigo.starts_with("HTTP_ERROR_")
    }
}

/// Alias de Result da camada de serviço
pub type ServicoResult<T> = Result<T, ErroApi>;
