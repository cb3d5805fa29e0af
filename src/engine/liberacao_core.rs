// ==========================================
// Dimensionamento Hidráulico - Núcleo de liberação de relatório
// ==========================================
// Responsabilidade: máquina de estados de bloqueio por alertas
// Restrição: sem estado, sem efeito colateral, sem I/O
// ==========================================

use crate::domain::alerta::{Alerta, AlertasPorNivel};
use crate::domain::confirmacao::RegistroConfirmacao;
use crate::domain::tipos::EstadoLiberacao;

/// Motivo exibido quando há alerta impeditivo
pub const MOTIVO_IMPEDITIVO: &str = "Existem alertas impeditivos que bloqueiam a geração do \
     relatório. Corrija os problemas identificados antes de prosseguir.";

/// Motivo exibido quando há alerta crítico sem confirmação
pub const MOTIVO_CRITICO_PENDENTE: &str =
    "Existem alertas críticos que requerem sua confirmação antes de gerar o relatório.";

// ==========================================
// Confirmação - evidência disponível na avaliação
// ==========================================
#[derive(Debug, Clone, Copy)]
pub enum Confirmacao<'a> {
    /// Nenhuma confirmação conhecida
    Nenhuma,
    /// Registro local (eco do que foi persistido); vale pela cobertura
    /// dos códigos críticos correntes
    Registro(&'a RegistroConfirmacao),
    /// O serviço respondeu confirmado=true na verificação pós-recarga
    ConfirmadaRemotamente,
}

impl Confirmacao<'_> {
    /// Indica se a evidência cobre todos os códigos informados
    fn cobre(&self, codigos: &[String]) -> bool {
        match self {
            Confirmacao::Nenhuma => false,
            Confirmacao::Registro(registro) => registro.cobre(codigos),
            Confirmacao::ConfirmadaRemotamente => true,
        }
    }
}

// ==========================================
// LiberacaoCore - funções puras de liberação
// ==========================================
pub struct LiberacaoCore;

impl LiberacaoCore {
    /// Avalia o estado de liberação para um conjunto de alertas
    ///
    /// # Regras
    /// 1. Qualquer IMPEDITIVO → BloqueadoImpeditivo (terminal para o
    ///    conjunto corrente; nenhuma confirmação o desfaz)
    /// 2. Senão, CRITICO sem confirmação cobrindo todos os códigos
    ///    críticos → PendenteConfirmacao
    /// 3. Senão, com alertas → Liberado
    /// 4. Sem alertas → Limpo
    ///
    /// # Retorno
    /// - (EstadoLiberacao, Option<motivo de bloqueio>)
    pub fn avaliar(
        alertas: &[Alerta],
        confirmacao: Confirmacao<'_>,
    ) -> (EstadoLiberacao, Option<String>) {
        if alertas.is_empty() {
            return (EstadoLiberacao::Limpo, None);
        }

        let por_nivel = AlertasPorNivel::classificar(alertas);

        // Regra 1: impeditivo bloqueia incondicionalmente
        if por_nivel.tem_impeditivo() {
            return (
                EstadoLiberacao::BloqueadoImpeditivo,
                Some(MOTIVO_IMPEDITIVO.to_string()),
            );
        }

        // Regra 2: crítico exige confirmação cobrindo todos os códigos
        if por_nivel.tem_critico() && !confirmacao.cobre(&por_nivel.codigos_criticos()) {
            return (
                EstadoLiberacao::PendenteConfirmacao,
                Some(MOTIVO_CRITICO_PENDENTE.to_string()),
            );
        }

        // Regra 3: demais níveis não bloqueiam
        (EstadoLiberacao::Liberado, None)
    }

    /// Forma reduzida: o relatório pode ser gerado?
    pub fn pode_gerar_relatorio(alertas: &[Alerta], confirmacao: Confirmacao<'_>) -> bool {
        Self::avaliar(alertas, confirmacao).0.pode_gerar_relatorio()
    }
}
