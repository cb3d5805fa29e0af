// ==========================================
// Dimensionamento Hidráulico - Biblioteca central
// ==========================================
// Fluxo coberto: determinação de vazão + liberação de relatório
// Posição no sistema: cliente do serviço remoto de cálculo (JSON/HTTP)
// Os algoritmos normativos residem no serviço remoto; aqui ficam as
// regras observáveis pelo cliente (elegibilidade, bloqueio, filtros)
// ==========================================

// ==========================================
// Declaração de módulos
// ==========================================

// Camada de domínio - entidades e tipos
pub mod domain;

// Camada de serviço remoto - fronteira com a API de cálculo
pub mod servico;

// Camada de engine - regras de negócio
pub mod engine;

// Configuração do cliente
pub mod config;

// Sistema de logs
pub mod logging;

// ==========================================
// Reexportação dos tipos centrais
// ==========================================

// Tipos de domínio
pub use domain::tipos::{
    EstadoLiberacao, EtapaFluxo, MetodoVazao, NivelAlerta, Severidade, SistemaNormativo,
    TipoSistema,
};

// Entidades de domínio
pub use domain::{
    Alerta, AlertasPorNivel, ConfirmacaoRiscos, DetalhesTecnicos, DetalhesVazao, PecaDetalhe,
    PecaQuantidade, PecaSanitaria, RegistroConfirmacao, ResultadoVazao, VerificacaoConfirmacao,
};

// Engines
pub use engine::{
    ComplianceEngine, ConfirmacaoEngine, ElegibilidadeEngine, ErroFluxo, LiberacaoCore,
    SessaoVazao, VazaoEngine,
};

// Serviço remoto
pub use servico::{ErroApi, ServicoVazao, ServicoVazaoHttp, ServicoVazaoLocal};

// ==========================================
// Constantes
// ==========================================

// Versão do sistema
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Nome do sistema
pub const APP_NAME: &str = "Dimensionamento Hidráulico";
