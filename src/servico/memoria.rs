// ==========================================
// Dimensionamento Hidráulico - Serviço em processo
// ==========================================
// ServicoVazaoLocal implementa o mesmo contrato do serviço remoto com
// a fórmula normativa de referência (Q = 0,3 × √ΣP) e um armazenamento
// de confirmações em memória; serve para uso offline e testes
// ServicoIndisponivel responde falha de rede a tudo (dublê para os
// caminhos de fallback)
// ==========================================

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use crate::domain::confirmacao::{ConfirmacaoRiscos, RegistroConfirmacao, VerificacaoConfirmacao};
use crate::domain::pecas;
use crate::domain::tipos::{MetodoVazao, SistemaNormativo, TipoSistema};
use crate::domain::validacao::ResultadoValidacao;
use crate::domain::vazao::{
    DetalhesVazao, PecaQuantidade, ResultadoVazao, FATOR_LS_PARA_M3H,
};
use crate::servico::erro::{ErroApi, ServicoResult};
use crate::servico::{RespostaElegibilidade, ServicoVazao};

/// Identificador da fórmula normativa do método dos pesos
pub const FORMULA_METODO_PESOS: &str = "Q = 0,3 x raiz(soma de pesos) - NBR 5626";

// Quantidade por peça acima disso é tratada como erro de digitação
const QUANTIDADE_MAXIMA: u32 = 10_000;

// ==========================================
// ServicoVazaoLocal - referência em processo
// ==========================================
#[derive(Default)]
pub struct ServicoVazaoLocal {
    confirmacoes: Mutex<HashMap<(String, String), RegistroConfirmacao>>,
}

impl ServicoVazaoLocal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registro armazenado para (projeto, usuário), se houver
    pub fn registro(&self, projeto_id: &str, usuario_id: &str) -> Option<RegistroConfirmacao> {
        self.confirmacoes
            .lock()
            .expect("lock de confirmações envenenado")
            .get(&(projeto_id.to_string(), usuario_id.to_string()))
            .cloned()
    }
}

#[async_trait]
impl ServicoVazao for ServicoVazaoLocal {
    async fn validar_tipo_vazao(
        &self,
        tipo: TipoSistema,
    ) -> ServicoResult<RespostaElegibilidade> {
        let resposta = match tipo {
            TipoSistema::Predial => RespostaElegibilidade {
                tipo_sistema: tipo,
                metodos_permitidos: vec![MetodoVazao::Manual, MetodoVazao::MetodoPesos],
                recomendado: MetodoVazao::MetodoPesos,
            },
            TipoSistema::Industrial => RespostaElegibilidade {
                tipo_sistema: tipo,
                metodos_permitidos: vec![MetodoVazao::Manual],
                recomendado: MetodoVazao::Manual,
            },
        };
        Ok(resposta)
    }

    async fn calcular_vazao_pesos(
        &self,
        tipo: TipoSistema,
        pecas_entrada: &[PecaQuantidade],
    ) -> ServicoResult<ResultadoVazao> {
        // O método dos pesos é normativo apenas para sistemas prediais
        if tipo != TipoSistema::Predial {
            return Err(ErroApi::new(
                "METODO_NAO_PERMITIDO",
                "O método dos pesos não está disponível para este tipo de sistema",
            ));
        }

        if pecas_entrada.is_empty() {
            return Err(ErroApi::new(
                "PECAS_VAZIAS",
                "Nenhuma peça sanitária informada",
            ));
        }

        if let Some(entrada) = pecas_entrada.iter().find(|p| p.quantidade > QUANTIDADE_MAXIMA) {
            return Err(ErroApi::new(
                "QUANTIDADE_INVALIDA",
                format!("Quantidade fora da faixa aceita: {}", entrada.quantidade),
            )
            .com_detalhes(json!({ "tipo": entrada.tipo, "quantidade": entrada.quantidade })));
        }

        let soma = pecas::soma_pesos(pecas_entrada).map_err(|tipo_desconhecido| {
            ErroApi::new(
                "TIPO_INVALIDO",
                format!("Tipo de peça fora do catálogo: {}", tipo_desconhecido),
            )
            .com_detalhes(json!({ "tipo": tipo_desconhecido }))
        })?;

        if soma <= 0.0 {
            return Err(ErroApi::new(
                "SOMA_PESOS_ZERO",
                "Somatório de pesos igual a zero",
            ));
        }

        let valor_ls = 0.3 * soma.sqrt();
        Ok(ResultadoVazao {
            valor_ls,
            valor_m3h: valor_ls * FATOR_LS_PARA_M3H,
            origem: MetodoVazao::MetodoPesos,
            tipo_sistema: tipo,
            timestamp: Utc::now(),
            detalhes: DetalhesVazao {
                soma_pesos: Some(soma),
                formula_aplicada: Some(FORMULA_METODO_PESOS.to_string()),
                pecas: Some(pecas::detalhar_pecas(pecas_entrada)),
                informado_pelo_usuario: None,
            },
        })
    }

    async fn definir_vazao_manual(
        &self,
        tipo: TipoSistema,
        vazao_m3h: f64,
    ) -> ServicoResult<ResultadoVazao> {
        if !vazao_m3h.is_finite() || vazao_m3h <= 0.0 {
            return Err(ErroApi::new(
                "VAZAO_INVALIDA",
                "Vazão deve ser maior que zero",
            ));
        }

        let valor_ls = vazao_m3h / FATOR_LS_PARA_M3H;
        Ok(ResultadoVazao {
            valor_ls,
            valor_m3h: valor_ls * FATOR_LS_PARA_M3H,
            origem: MetodoVazao::Manual,
            tipo_sistema: tipo,
            timestamp: Utc::now(),
            detalhes: DetalhesVazao {
                soma_pesos: None,
                formula_aplicada: None,
                pecas: None,
                informado_pelo_usuario: Some(true),
            },
        })
    }

    async fn confirmar_alertas(&self, payload: &ConfirmacaoRiscos) -> ServicoResult<String> {
        if !payload.termos_aceitos {
            return Err(ErroApi::new(
                "TERMOS_NAO_ACEITOS",
                "É necessário aceitar os termos para confirmar os alertas",
            ));
        }

        let chave = (payload.projeto_id.clone(), payload.usuario_id.clone());
        let mut confirmacoes = self
            .confirmacoes
            .lock()
            .expect("lock de confirmações envenenado");

        match confirmacoes.get_mut(&chave) {
            // Reconfirmação: acumula códigos ainda não cobertos
            Some(registro) => {
                let existentes: HashSet<String> =
                    registro.alertas_confirmados.iter().cloned().collect();
                for codigo in &payload.alertas_confirmados {
                    if !existentes.contains(codigo) {
                        registro.alertas_confirmados.push(codigo.clone());
                    }
                }
            }
            None => {
                confirmacoes.insert(
                    chave,
                    RegistroConfirmacao {
                        projeto_id: payload.projeto_id.clone(),
                        usuario_id: payload.usuario_id.clone(),
                        alertas_confirmados: payload.alertas_confirmados.clone(),
                        termos_aceitos: true,
                        calculo_id: payload.calculo_id.clone(),
                        confirmado_em: Utc::now(),
                    },
                );
            }
        }

        Ok("Alertas confirmados com sucesso".to_string())
    }

    async fn verificar_confirmacao(
        &self,
        projeto_id: &str,
        usuario_id: &str,
    ) -> ServicoResult<VerificacaoConfirmacao> {
        let confirmado = self.registro(projeto_id, usuario_id).is_some();
        Ok(VerificacaoConfirmacao {
            confirmado,
            pode_gerar_pdf: confirmado,
        })
    }

    async fn validar_compliance(
        &self,
        tipo: SistemaNormativo,
        dados: &serde_json::Value,
    ) -> ServicoResult<ResultadoValidacao> {
        if !dados.is_object() {
            return Err(ErroApi::new(
                "PAYLOAD_INVALIDO",
                "Campo dados deve ser um objeto",
            )
            .com_detalhes(json!({ "requeridos": ["dados"] })));
        }

        Ok(ResultadoValidacao {
            is_valid: true,
            norma: tipo.norma().to_string(),
            erros: vec![],
            avisos: vec![],
            parametros_calculados: HashMap::new(),
            timestamp: Utc::now(),
        })
    }
}

// ==========================================
// ServicoIndisponivel - dublê de falha total
// ==========================================
#[derive(Debug, Default, Clone, Copy)]
pub struct ServicoIndisponivel;

impl ServicoIndisponivel {
    fn erro() -> ErroApi {
        ErroApi::falha_rede("serviço de cálculo indisponível")
    }
}

#[async_trait]
impl ServicoVazao for ServicoIndisponivel {
    async fn validar_tipo_vazao(
        &self,
        _tipo: TipoSistema,
    ) -> ServicoResult<RespostaElegibilidade> {
        Err(Self::erro())
    }

    async fn calcular_vazao_pesos(
        &self,
        _tipo: TipoSistema,
        _pecas: &[PecaQuantidade],
    ) -> ServicoResult<ResultadoVazao> {
        Err(Self::erro())
    }

    async fn definir_vazao_manual(
        &self,
        _tipo: TipoSistema,
        _vazao_m3h: f64,
    ) -> ServicoResult<ResultadoVazao> {
        Err(Self::erro())
    }

    async fn confirmar_alertas(&self, _payload: &ConfirmacaoRiscos) -> ServicoResult<String> {
        Err(Self::erro())
    }

    async fn verificar_confirmacao(
        &self,
        _projeto_id: &str,
        _usuario_id: &str,
    ) -> ServicoResult<VerificacaoConfirmacao> {
        Err(Self::erro())
    }

    async fn validar_compliance(
        &self,
        _tipo: SistemaNormativo,
        _dados: &serde_json::Value,
    ) -> ServicoResult<ResultadoValidacao> {
        Err(Self::erro())
    }
}
