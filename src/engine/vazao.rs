// ==========================================
// Dimensionamento Hidráulico - Engine de determinação de vazão
// ==========================================
// Responsabilidade: prechecagens locais + delegação da fórmula ao
// serviço + normalização do invariante de conversão
// Restrição: nenhuma mutação parcial em caso de falha; a fórmula
// normativa em si pertence ao serviço de cálculo
// ==========================================

use std::sync::Arc;
use tracing::instrument;

use crate::domain::pecas;
use crate::domain::tipos::TipoSistema;
use crate::domain::vazao::{PecaQuantidade, ResultadoVazao};
use crate::engine::erro::ErroFluxo;
use crate::servico::ServicoVazao;

// ==========================================
// VazaoEngine
// ==========================================
pub struct VazaoEngine<S: ServicoVazao> {
    servico: Arc<S>,
}

impl<S: ServicoVazao> VazaoEngine<S> {
    pub fn new(servico: Arc<S>) -> Self {
        Self { servico }
    }

    /// Registra uma vazão informada diretamente pelo projetista
    ///
    /// # Prechecagem local
    /// - vazao_m3h finita e > 0, antes de qualquer chamada remota
    ///   (o serviço revalida de forma independente)
    #[instrument(skip(self), fields(tipo = %tipo))]
    pub async fn definir_manual(
        &self,
        tipo: TipoSistema,
        vazao_m3h: f64,
    ) -> Result<ResultadoVazao, ErroFluxo> {
        if !vazao_m3h.is_finite() || vazao_m3h <= 0.0 {
            return Err(ErroFluxo::VazaoInvalida);
        }

        let resultado = self.servico.definir_vazao_manual(tipo, vazao_m3h).await?;
        Ok(resultado.normalizar_conversao())
    }

    /// Calcula a vazão pelo método dos pesos
    ///
    /// # Prechecagens locais (antes de qualquer chamada remota)
    /// - lista vazia → PecasVazias
    /// - tipo fora do catálogo → TipoPecaInvalido
    /// - somatório de pesos igual a zero → SomaPesosZero
    #[instrument(skip(self, pecas_entrada), fields(tipo = %tipo, n_pecas = pecas_entrada.len()))]
    pub async fn calcular_pesos(
        &self,
        tipo: TipoSistema,
        pecas_entrada: &[PecaQuantidade],
    ) -> Result<ResultadoVazao, ErroFluxo> {
        if pecas_entrada.is_empty() {
            return Err(ErroFluxo::PecasVazias);
        }

        let soma = pecas::soma_pesos(pecas_entrada).map_err(ErroFluxo::TipoPecaInvalido)?;
        if soma <= 0.0 {
            return Err(ErroFluxo::SomaPesosZero);
        }

        let resultado = self.servico.calcular_vazao_pesos(tipo, pecas_entrada).await?;
        Ok(resultado.normalizar_conversao())
    }
}
