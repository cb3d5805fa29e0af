// ==========================================
// Dimensionamento Hidráulico - Camada de domínio
// ==========================================
// Responsabilidade: entidades, tipos e regras de classificação
// Restrição: sem acesso a rede, sem lógica de engine
// ==========================================

pub mod alerta;
pub mod confirmacao;
pub mod pecas;
pub mod tipos;
pub mod validacao;
pub mod vazao;

// Reexportação dos tipos centrais
pub use alerta::{Alerta, AlertasPorNivel, DetalhesTecnicos};
pub use confirmacao::{ConfirmacaoRiscos, RegistroConfirmacao, VerificacaoConfirmacao};
pub use pecas::{PecaSanitaria, PECAS_SANITARIAS};
pub use tipos::{
    EstadoLiberacao, EtapaFluxo, MetodoVazao, NivelAlerta, Severidade, SistemaNormativo,
    TipoSistema,
};
pub use validacao::{AlertaDetalhe, ResultadoValidacao};
pub use vazao::{DetalhesVazao, PecaDetalhe, PecaQuantidade, ResultadoVazao};
