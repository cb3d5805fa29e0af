// ==========================================
// Dimensionamento Hidráulico - Resolução de elegibilidade de métodos
// ==========================================
// Responsabilidade: determinar os métodos de vazão permitidos para o
// tipo de sistema, consultando o serviço e caindo para a política
// local quando a consulta falha
// Garantia: nunca retorna erro; recomendado ∈ metodos_permitidos
// ==========================================

use std::sync::Arc;
use tracing::{instrument, warn};

use crate::domain::tipos::{MetodoVazao, TipoSistema};
use crate::servico::ServicoVazao;

/// Aviso não-fatal exibido quando a política local entra em uso
pub const AVISO_POLITICA_PADRAO: &str =
    "Falha ao validar tipo de sistema. Usando configurações padrão.";

// ==========================================
// Elegibilidade - resultado da resolução
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct Elegibilidade {
    pub tipo_sistema: TipoSistema,
    pub metodos_permitidos: Vec<MetodoVazao>,
    pub recomendado: MetodoVazao,
    pub origem: OrigemElegibilidade,
    /// Aviso não-fatal quando a resolução remota falhou
    pub aviso: Option<String>,
}

impl Elegibilidade {
    pub fn permite(&self, metodo: MetodoVazao) -> bool {
        self.metodos_permitidos.contains(&metodo)
    }
}

/// De onde veio o conjunto de elegibilidade
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrigemElegibilidade {
    Remota,
    PadraoLocal,
}

/// Política local aplicada quando o serviço não responde
///
/// # Regra
/// - predial → {manual, metodo_pesos}, recomendado metodo_pesos
/// - industrial → {manual}, recomendado manual
pub fn politica_padrao(tipo: TipoSistema) -> Elegibilidade {
    let (metodos_permitidos, recomendado) = match tipo {
        TipoSistema::Predial => (
            vec![MetodoVazao::Manual, MetodoVazao::MetodoPesos],
            MetodoVazao::MetodoPesos,
        ),
        TipoSistema::Industrial => (vec![MetodoVazao::Manual], MetodoVazao::Manual),
    };
    Elegibilidade {
        tipo_sistema: tipo,
        metodos_permitidos,
        recomendado,
        origem: OrigemElegibilidade::PadraoLocal,
        aviso: None,
    }
}

// ==========================================
// ElegibilidadeEngine
// ==========================================
pub struct ElegibilidadeEngine<S: ServicoVazao> {
    servico: Arc<S>,
}

impl<S: ServicoVazao> ElegibilidadeEngine<S> {
    pub fn new(servico: Arc<S>) -> Self {
        Self { servico }
    }

    /// Resolve a elegibilidade para o tipo de sistema
    ///
    /// Nunca falha: qualquer problema na consulta remota (transporte,
    /// erro do serviço ou resposta que viola o próprio invariante do
    /// contrato) resulta na política local com aviso não-fatal
    #[instrument(skip(self), fields(tipo = %tipo))]
    pub async fn resolver(&self, tipo: TipoSistema) -> Elegibilidade {
        match self.servico.validar_tipo_vazao(tipo).await {
            Ok(resposta) if resposta.consistente() && resposta.tipo_sistema == tipo => {
                Elegibilidade {
                    tipo_sistema: resposta.tipo_sistema,
                    metodos_permitidos: resposta.metodos_permitidos,
                    recomendado: resposta.recomendado,
                    origem: OrigemElegibilidade::Remota,
                    aviso: None,
                }
            }
            Ok(resposta) => {
                warn!(
                    recomendado = %resposta.recomendado,
                    "resposta de elegibilidade inconsistente, aplicando política padrão"
                );
                let mut eleg = politica_padrao(tipo);
                eleg.aviso = Some(AVISO_POLITICA_PADRAO.to_string());
                eleg
            }
            Err(erro) => {
                warn!(codigo = %erro.codigo, "falha na resolução de elegibilidade");
                let mut eleg = politica_padrao(tipo);
                // Preferir a mensagem do serviço quando ela existe
                eleg.aviso = Some(if erro.mensagem.is_empty() {
                    AVISO_POLITICA_PADRAO.to_string()
                } else {
                    erro.mensagem
                });
                eleg
            }
        }
    }
}
