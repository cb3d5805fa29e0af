// ==========================================
// Dimensionamento Hidráulico - Fronteira de serviço remoto
// ==========================================
// O trait ServicoVazao é a única porta entre as engines e a API de
// cálculo; as engines dependem do trait, nunca de reqwest
// Implementações: ServicoVazaoHttp (produção), ServicoVazaoLocal
// (referência em processo), ServicoIndisponivel (dublê de falha)
// ==========================================

pub mod erro;
pub mod http;
pub mod memoria;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::confirmacao::{ConfirmacaoRiscos, VerificacaoConfirmacao};
use crate::domain::tipos::{MetodoVazao, SistemaNormativo, TipoSistema};
use crate::domain::validacao::ResultadoValidacao;
use crate::domain::vazao::{PecaQuantidade, ResultadoVazao};

pub use erro::{ErroApi, ServicoResult, CODIGO_FALHA_REDE};
pub use http::ServicoVazaoHttp;
pub use memoria::{ServicoIndisponivel, ServicoVazaoLocal};

// ==========================================
// RespostaElegibilidade - corpo de /validar-tipo-vazao
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RespostaElegibilidade {
    pub tipo_sistema: TipoSistema,
    pub metodos_permitidos: Vec<MetodoVazao>,
    pub recomendado: MetodoVazao,
}

impl RespostaElegibilidade {
    /// Invariante do contrato: o método recomendado pertence ao
    /// conjunto de métodos permitidos
    pub fn consistente(&self) -> bool {
        self.metodos_permitidos.contains(&self.recomendado)
    }
}

// ==========================================
// Trait: ServicoVazao
// ==========================================
#[async_trait]
pub trait ServicoVazao: Send + Sync {
    /// Resolve os métodos de vazão permitidos para o tipo de sistema
    async fn validar_tipo_vazao(&self, tipo: TipoSistema)
        -> ServicoResult<RespostaElegibilidade>;

    /// Calcula a vazão pelo método dos pesos (fórmula normativa remota)
    async fn calcular_vazao_pesos(
        &self,
        tipo: TipoSistema,
        pecas: &[PecaQuantidade],
    ) -> ServicoResult<ResultadoVazao>;

    /// Registra uma vazão informada diretamente pelo projetista
    async fn definir_vazao_manual(
        &self,
        tipo: TipoSistema,
        vazao_m3h: f64,
    ) -> ServicoResult<ResultadoVazao>;

    /// Persiste a confirmação de riscos; retorna a mensagem do serviço
    async fn confirmar_alertas(&self, payload: &ConfirmacaoRiscos) -> ServicoResult<String>;

    /// Consulta a confirmação existente para (projeto, usuário)
    async fn verificar_confirmacao(
        &self,
        projeto_id: &str,
        usuario_id: &str,
    ) -> ServicoResult<VerificacaoConfirmacao>;

    /// Valida um sistema contra a norma NBR correspondente
    async fn validar_compliance(
        &self,
        tipo: SistemaNormativo,
        dados: &serde_json::Value,
    ) -> ServicoResult<ResultadoValidacao>;
}
