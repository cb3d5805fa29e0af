// ==========================================
// Dimensionamento Hidráulico - Resultado de validação de compliance
// ==========================================
// Espelha o corpo de resposta de /api/v1/compliance/validar
// ==========================================

use crate::domain::tipos::Severidade;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// AlertaDetalhe - item de erro/aviso da validação
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertaDetalhe {
    pub codigo: String,
    pub mensagem: String,
    pub severidade: Severidade,
}

// ==========================================
// ResultadoValidacao - veredito normativo
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultadoValidacao {
    pub is_valid: bool,
    /// Norma aplicada (ex.: "NBR 8160")
    pub norma: String,
    pub erros: Vec<AlertaDetalhe>,
    pub avisos: Vec<AlertaDetalhe>,
    #[serde(default)]
    pub parametros_calculados: HashMap<String, serde_json::Value>,
    pub timestamp: DateTime<Utc>,
}

impl ResultadoValidacao {
    /// Indica se existe ao menos um item com severidade IMPEDITIVA
    pub fn tem_impeditiva(&self) -> bool {
        self.erros
            .iter()
            .chain(self.avisos.iter())
            .any(|a| a.severidade == Severidade::Impeditiva)
    }
}
