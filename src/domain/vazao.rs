// ==========================================
// Dimensionamento Hidráulico - Resultado de vazão
// ==========================================
// ResultadoVazao é imutável depois de produzido; qualquer edição a
// montante descarta o resultado explicitamente (nunca fica obsoleto
// em silêncio)
// ==========================================

use crate::domain::tipos::{MetodoVazao, TipoSistema};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fator de conversão L/s → m³/h
pub const FATOR_LS_PARA_M3H: f64 = 3.6;

/// Tolerância usada na checagem valor_m3h = valor_ls × 3.6
pub const TOLERANCIA_CONVERSAO: f64 = 1e-9;

// ==========================================
// PecaQuantidade - entrada do método dos pesos
// ==========================================
// Mapa esparso: quantidade 0 equivale a ausência da peça
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PecaQuantidade {
    /// Código da peça no catálogo (ex.: "bacia_valvula")
    pub tipo: String,
    pub quantidade: u32,
}

impl PecaQuantidade {
    pub fn new(tipo: impl Into<String>, quantidade: u32) -> Self {
        Self {
            tipo: tipo.into(),
            quantidade,
        }
    }
}

// ==========================================
// PecaDetalhe - linha da memória de cálculo
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PecaDetalhe {
    pub tipo: String,
    pub nome_exibicao: String,
    pub quantidade: u32,
    pub peso_unitario: f64,
    pub peso_total: f64,
}

// ==========================================
// DetalhesVazao - memória de cálculo por método
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DetalhesVazao {
    /// Somatório de pesos ΣP (método dos pesos)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soma_pesos: Option<f64>,
    /// Identificador da fórmula normativa aplicada
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formula_aplicada: Option<String>,
    /// Linhas por tipo de peça (método dos pesos)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pecas: Option<Vec<PecaDetalhe>>,
    /// Marca de valor informado diretamente (método manual)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub informado_pelo_usuario: Option<bool>,
}

// ==========================================
// ResultadoVazao - vazão determinada
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultadoVazao {
    /// Vazão em litros por segundo
    pub valor_ls: f64,
    /// Vazão em metros cúbicos por hora (= valor_ls × 3.6)
    pub valor_m3h: f64,
    /// Método que originou o valor
    pub origem: MetodoVazao,
    pub tipo_sistema: TipoSistema,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub detalhes: DetalhesVazao,
}

impl ResultadoVazao {
    /// Verifica o invariante de conversão entre as duas unidades
    pub fn conversao_consistente(&self) -> bool {
        (self.valor_m3h - self.valor_ls * FATOR_LS_PARA_M3H).abs() <= TOLERANCIA_CONVERSAO
    }

    /// Reconstrói o valor em m³/h a partir de L/s quando o par recebido
    /// diverge além da tolerância
    pub fn normalizar_conversao(mut self) -> Self {
        if !self.conversao_consistente() {
            self.valor_m3h = self.valor_ls * FATOR_LS_PARA_M3H;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resultado(valor_ls: f64, valor_m3h: f64) -> ResultadoVazao {
        ResultadoVazao {
            valor_ls,
            valor_m3h,
            origem: MetodoVazao::Manual,
            tipo_sistema: TipoSistema::Predial,
            timestamp: Utc::now(),
            detalhes: DetalhesVazao {
                informado_pelo_usuario: Some(true),
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_conversao_consistente() {
        assert!(resultado(2.5, 9.0).conversao_consistente());
        assert!(!resultado(2.5, 9.1).conversao_consistente());
    }

    #[test]
    fn test_normalizar_conversao_corrige_divergencia() {
        let corrigido = resultado(2.5, 10.0).normalizar_conversao();
        assert!((corrigido.valor_m3h - 9.0).abs() <= TOLERANCIA_CONVERSAO);
        assert_eq!(corrigido.valor_ls, 2.5);
    }

    #[test]
    fn test_normalizar_conversao_preserva_par_consistente() {
        let original = resultado(1.0, 3.6);
        let normalizado = original.clone().normalizar_conversao();
        assert_eq!(normalizado, original);
    }
}
