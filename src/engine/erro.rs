// ==========================================
// Dimensionamento Hidráulico - Erros do fluxo de vazão
// ==========================================
// Taxonomia fechada: códigos conhecidos do contrato viram variantes
// tipadas; códigos desconhecidos permanecem em Remoto e exibem a
// mensagem do servidor sem destaque de campo
// ==========================================

use crate::servico::erro::ErroApi;
use thiserror::Error;

// ==========================================
// ErroFluxo - taxonomia de erros do fluxo
// ==========================================
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ErroFluxo {
    // ===== Validação local (sem ida à rede) =====
    #[error("nenhuma peça sanitária informada")]
    PecasVazias,

    #[error("somatório de pesos igual a zero")]
    SomaPesosZero,

    #[error("quantidade informada fora da faixa aceita")]
    QuantidadeInvalida,

    #[error("tipo de peça fora do catálogo: {0}")]
    TipoPecaInvalido(String),

    #[error("tipo de sistema inválido")]
    TipoSistemaInvalido,

    #[error("vazão deve ser maior que zero")]
    VazaoInvalida,

    #[error("método de vazão não permitido para o tipo de sistema corrente")]
    MetodoNaoPermitido,

    // ===== Confirmação de riscos =====
    #[error("termos de responsabilidade não aceitos")]
    TermosNaoAceitos,

    #[error("projeto e usuário são necessários para confirmar alertas")]
    ContextoConfirmacaoAusente,

    // ===== Sequência do fluxo =====
    #[error("tipo de sistema ainda não selecionado")]
    TipoSistemaNaoSelecionado,

    #[error("método de determinação de vazão ainda não selecionado")]
    MetodoNaoSelecionado,

    #[error("etapa inválida para a operação: esperada {esperada}, atual {atual}")]
    EtapaInvalida { esperada: String, atual: String },

    #[error("já existe uma operação remota em andamento")]
    OperacaoEmAndamento,

    #[error("resposta descartada: as entradas mudaram durante a operação")]
    RespostaObsoleta,

    // ===== Erro remoto não mapeado =====
    #[error(transparent)]
    Remoto(ErroApi),
}

impl ErroFluxo {
    /// Eleva um erro do contrato da API para a taxonomia do fluxo
    ///
    /// # Regra
    /// - Códigos conhecidos viram a variante correspondente
    /// - Qualquer outro código permanece em Remoto (caso default)
    pub fn de_api(erro: ErroApi) -> Self {
        match erro.codigo.as_str() {
            "PECAS_VAZIAS" => ErroFluxo::PecasVazias,
            "SOMA_PESOS_ZERO" => ErroFluxo::SomaPesosZero,
            "QUANTIDADE_INVALIDA" => ErroFluxo::QuantidadeInvalida,
            "TIPO_INVALIDO" => {
                let tipo = erro
                    .detalhes
                    .get("tipo")
                    .and_then(|v| v.as_str())
                    .unwrap_or_default()
                    .to_string();
                ErroFluxo::TipoPecaInvalido(tipo)
            }
            "TIPO_SISTEMA_INVALIDO" => ErroFluxo::TipoSistemaInvalido,
            "VAZAO_INVALIDA" => ErroFluxo::VazaoInvalida,
            "METODO_NAO_PERMITIDO" => ErroFluxo::MetodoNaoPermitido,
            "TERMOS_NAO_ACEITOS" => ErroFluxo::TermosNaoAceitos,
            _ => ErroFluxo::Remoto(erro),
        }
    }

    /// Indica se a causa foi falha de transporte (ação é tentar de novo)
    pub fn eh_falha_transporte(&self) -> bool {
        matches!(self, ErroFluxo::Remoto(e) if e.eh_falha_transporte())
    }
}

impl From<ErroApi> for ErroFluxo {
    fn from(erro: ErroApi) -> Self {
        ErroFluxo::de_api(erro)
    }
}

// ==========================================
// Apresentação - mensagem, campo e severidade
// ==========================================

/// Severidade de exibição da mensagem
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeveridadeMensagem {
    Erro,
    Aviso,
}

/// Como o erro deve ser apresentado ao usuário
#[derive(Debug, Clone, PartialEq)]
pub struct Apresentacao {
    pub mensagem: String,
    /// Campo de formulário a destacar, quando aplicável
    pub campo: Option<&'static str>,
    pub severidade: SeveridadeMensagem,
}

impl ErroFluxo {
    /// Tabela fechada de apresentação por erro
    ///
    /// O caso default (Remoto) exibe a mensagem do servidor tal como
    /// recebida, sem destaque de campo
    pub fn apresentacao(&self) -> Apresentacao {
        use SeveridadeMensagem::{Aviso, Erro};
        let (mensagem, campo, severidade) = match self {
            ErroFluxo::PecasVazias => {
                ("Selecione pelo menos uma peça sanitária", Some("lista-pecas"), Aviso)
            }
            ErroFluxo::SomaPesosZero => {
                ("Adicione peças com quantidade para calcular", Some("lista-pecas"), Aviso)
            }
            ErroFluxo::QuantidadeInvalida => {
                ("Verifique as quantidades informadas", Some("quantidade-peca"), Erro)
            }
            ErroFluxo::TipoPecaInvalido(_) => ("Tipo de peça inválido", None, Erro),
            ErroFluxo::TipoSistemaInvalido => {
                ("Selecione um tipo de sistema válido", Some("tipo-sistema"), Erro)
            }
            ErroFluxo::VazaoInvalida => {
                ("Vazão deve ser maior que zero", Some("vazao-manual"), Erro)
            }
            ErroFluxo::MetodoNaoPermitido => (
                "Este método não está disponível para sistemas industriais",
                None,
                Aviso,
            ),
            ErroFluxo::TermosNaoAceitos => (
                "É necessário aceitar os termos para confirmar os alertas",
                Some("aceite-termos"),
                Erro,
            ),
            ErroFluxo::ContextoConfirmacaoAusente => (
                "Informações de projeto e usuário são necessárias para confirmar alertas",
                None,
                Erro,
            ),
            ErroFluxo::TipoSistemaNaoSelecionado => (
                "Selecione o tipo de sistema antes de continuar",
                Some("tipo-sistema"),
                Aviso,
            ),
            ErroFluxo::MetodoNaoSelecionado => {
                ("Selecione o método de determinação de vazão", None, Aviso)
            }
            ErroFluxo::EtapaInvalida { .. } => {
                return Apresentacao {
                    mensagem: self.to_string(),
                    campo: None,
                    severidade: Erro,
                }
            }
            ErroFluxo::OperacaoEmAndamento => {
                ("Aguarde a conclusão da operação em andamento", None, Aviso)
            }
            ErroFluxo::RespostaObsoleta => (
                "Os dados foram alterados durante o cálculo. Refaça a operação.",
                None,
                Aviso,
            ),
            // Caso default: mensagem do servidor tal como recebida
            ErroFluxo::Remoto(erro) => {
                return Apresentacao {
                    mensagem: erro.mensagem.clone(),
                    campo: None,
                    severidade: Erro,
                }
            }
        };
        Apresentacao {
            mensagem: mensagem.to_string(),
            campo,
            severidade,
        }
    }
}
