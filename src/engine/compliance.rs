// ==========================================
// Dimensionamento Hidráulico - Compliance normativo
// ==========================================
// Responsabilidade: filtro puro de alertas por norma + consulta de
// validação normativa ao serviço
// O filtro é função pura: mesma entrada, mesma saída, sem rede
// ==========================================

use std::sync::Arc;
use tracing::instrument;

use crate::domain::alerta::Alerta;
use crate::domain::tipos::SistemaNormativo;
use crate::domain::validacao::ResultadoValidacao;
use crate::engine::erro::ErroFluxo;
use crate::servico::ServicoVazao;

/// Filtra alertas pela norma selecionada
///
/// # Regras
/// - norma ausente → todos os alertas, sem filtragem
/// - senão, apenas alertas cujo campo norma começa com o seletor
///   (cobre "NBR 5626:2020" contra o seletor "NBR 5626")
/// - ordem original preservada
pub fn filtrar_por_norma<'a>(alertas: &'a [Alerta], norma: Option<&str>) -> Vec<&'a Alerta> {
    match norma {
        None => alertas.iter().collect(),
        Some(prefixo) => alertas
            .iter()
            .filter(|alerta| alerta.norma.starts_with(prefixo))
            .collect(),
    }
}

/// Filtra alertas pela norma do sistema normativo selecionado
pub fn filtrar_por_sistema<'a>(
    alertas: &'a [Alerta],
    sistema: Option<SistemaNormativo>,
) -> Vec<&'a Alerta> {
    filtrar_por_norma(alertas, sistema.map(|s| s.norma()))
}

/// Descrição legível de uma norma; o seletor é devolvido quando a
/// norma não consta da tabela
pub fn descricao_norma(norma: &str) -> &str {
    match norma {
        "NBR 5626" => "Sistemas Prediais de Água Fria",
        "NBR 8160" => "Sistemas Prediais de Esgoto Sanitário",
        "NBR 10844" => "Instalações Prediais de Águas Pluviais",
        "NBR 13714" => "Sistemas de Hidrantes e Mangotinhos",
        "NBR 13969" => "Tanques Sépticos - Unidades de Tratamento",
        outra => outra,
    }
}

// ==========================================
// ComplianceEngine
// ==========================================
pub struct ComplianceEngine<S: ServicoVazao> {
    servico: Arc<S>,
}

impl<S: ServicoVazao> ComplianceEngine<S> {
    pub fn new(servico: Arc<S>) -> Self {
        Self { servico }
    }

    /// Valida os dados do formulário contra a norma do sistema
    #[instrument(skip(self, dados), fields(tipo = %tipo))]
    pub async fn validar(
        &self,
        tipo: SistemaNormativo,
        dados: &serde_json::Value,
    ) -> Result<ResultadoValidacao, ErroFluxo> {
        Ok(self.servico.validar_compliance(tipo, dados).await?)
    }
}
