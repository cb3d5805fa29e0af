// ==========================================
// Dimensionamento Hidráulico - Configuração do cliente
// ==========================================
// Ordem de precedência: variável de ambiente > arquivo TOML > padrão
// ==========================================

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::warn;

/// URL padrão do serviço de cálculo
pub const BASE_URL_PADRAO: &str =
    "https://dimensionamento-git-main-matheus-melos-projects-cbf6112f.vercel.app";

/// Variável de ambiente que sobrepõe a URL base
pub const VAR_AMBIENTE_URL: &str = "DIMENSIONAMENTO_API_URL";

const TIMEOUT_PADRAO_SEGUNDOS: u64 = 30;

// ==========================================
// ConfiguracaoCliente
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfiguracaoCliente {
    #[serde(default = "base_url_padrao")]
    pub base_url: String,
    #[serde(default = "timeout_padrao")]
    pub timeout_segundos: u64,
}

fn base_url_padrao() -> String {
    BASE_URL_PADRAO.to_string()
}

fn timeout_padrao() -> u64 {
    TIMEOUT_PADRAO_SEGUNDOS
}

impl Default for ConfiguracaoCliente {
    fn default() -> Self {
        Self {
            base_url: base_url_padrao(),
            timeout_segundos: timeout_padrao(),
        }
    }
}

// ==========================================
// Erros de configuração
// ==========================================
#[derive(Debug, Error)]
pub enum ErroConfiguracao {
    #[error("falha de leitura do arquivo de configuração: {0}")]
    Io(#[from] std::io::Error),

    #[error("arquivo de configuração malformado: {0}")]
    Toml(#[from] toml::de::Error),
}

impl ConfiguracaoCliente {
    /// Carrega a configuração de um arquivo TOML
    pub fn carregar(caminho: &Path) -> Result<Self, ErroConfiguracao> {
        let conteudo = std::fs::read_to_string(caminho)?;
        Ok(toml::from_str(&conteudo)?)
    }

    /// Carrega do arquivo quando ele existe, senão usa o padrão;
    /// em ambos os casos aplica a sobreposição por ambiente
    pub fn carregar_ou_padrao(caminho: Option<&Path>) -> Self {
        let mut config = match caminho {
            Some(caminho) => Self::carregar(caminho).unwrap_or_else(|erro| {
                warn!(caminho = %caminho.display(), %erro, "configuração ignorada");
                Self::default()
            }),
            None => Self::default(),
        };
        config.aplicar_ambiente();
        config
    }

    /// Sobrepõe a URL base com a variável de ambiente, se definida
    pub fn aplicar_ambiente(&mut self) {
        if let Ok(url) = std::env::var(VAR_AMBIENTE_URL) {
            if !url.trim().is_empty() {
                self.base_url = url;
            }
        }
    }
}
