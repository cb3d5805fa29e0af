// ==========================================
// Dimensionamento Hidráulico - Engine de confirmação de riscos
// ==========================================
// Responsabilidade: converter o aceite explícito do usuário em um
// registro de confirmação persistido e reconsultável
// Prechecagens locais acontecem antes de qualquer ida à rede
// ==========================================

use chrono::Utc;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::domain::confirmacao::{ConfirmacaoRiscos, RegistroConfirmacao, VerificacaoConfirmacao};
use crate::engine::erro::ErroFluxo;
use crate::servico::ServicoVazao;

// ==========================================
// ConfirmacaoEngine
// ==========================================
pub struct ConfirmacaoEngine<S: ServicoVazao> {
    servico: Arc<S>,
}

impl<S: ServicoVazao> ConfirmacaoEngine<S> {
    pub fn new(servico: Arc<S>) -> Self {
        Self { servico }
    }

    /// Confirma os riscos dos alertas críticos informados
    ///
    /// # Prechecagens locais
    /// - termos_aceitos deve ser true (TERMOS_NAO_ACEITOS)
    /// - projeto_id e usuario_id presentes (confirmação sem contexto
    ///   não pode ter sucesso silencioso)
    ///
    /// # Regras
    /// - Sem códigos críticos: sucesso local sem chamada remota
    /// - Reconfirmação idêntica é um no-op com sucesso
    #[instrument(skip(self, payload), fields(projeto = %payload.projeto_id))]
    pub async fn confirmar_riscos(
        &self,
        payload: ConfirmacaoRiscos,
    ) -> Result<RegistroConfirmacao, ErroFluxo> {
        if !payload.termos_aceitos {
            return Err(ErroFluxo::TermosNaoAceitos);
        }
        if payload.projeto_id.trim().is_empty() || payload.usuario_id.trim().is_empty() {
            return Err(ErroFluxo::ContextoConfirmacaoAusente);
        }

        if !payload.alertas_confirmados.is_empty() {
            let mensagem = self.servico.confirmar_alertas(&payload).await?;
            info!(mensagem, "confirmação de alertas persistida");
        }

        Ok(RegistroConfirmacao {
            projeto_id: payload.projeto_id,
            usuario_id: payload.usuario_id,
            alertas_confirmados: payload.alertas_confirmados,
            termos_aceitos: true,
            calculo_id: payload.calculo_id,
            confirmado_em: Utc::now(),
        })
    }

    /// Reconsulta a confirmação existente para (projeto, usuário)
    ///
    /// Fonte de verdade após recarga: o estado local nunca é assumido
    #[instrument(skip(self))]
    pub async fn verificar(
        &self,
        projeto_id: &str,
        usuario_id: &str,
    ) -> Result<VerificacaoConfirmacao, ErroFluxo> {
        if projeto_id.trim().is_empty() || usuario_id.trim().is_empty() {
            return Err(ErroFluxo::ContextoConfirmacaoAusente);
        }
        Ok(self.servico.verificar_confirmacao(projeto_id, usuario_id).await?)
    }
}
