// ==========================================
// Dimensionamento Hidráulico - Camada de engine
// ==========================================
// Responsabilidade: regras de negócio observáveis pelo cliente
// Restrição: nenhuma chamada de transporte direta (só via ServicoVazao);
// toda regra de bloqueio explica o seu motivo
// ==========================================

pub mod compliance;
pub mod confirmacao;
pub mod elegibilidade;
pub mod erro;
pub mod liberacao_core;
pub mod sessao;
pub mod vazao;

// Reexportação das engines
pub use compliance::{descricao_norma, filtrar_por_norma, filtrar_por_sistema, ComplianceEngine};
pub use confirmacao::ConfirmacaoEngine;
pub use elegibilidade::{Elegibilidade, ElegibilidadeEngine, OrigemElegibilidade};
pub use erro::{Apresentacao, ErroFluxo, SeveridadeMensagem};
pub use liberacao_core::{Confirmacao, LiberacaoCore};
pub use sessao::SessaoVazao;
pub use vazao::VazaoEngine;
