// ==========================================
// Dimensionamento Hidráulico - Cliente HTTP do serviço de cálculo
// ==========================================
// Envelope dos endpoints de vazão/alertas: { sucesso, dados, erro }
// O endpoint de compliance responde o corpo cru (sem envelope) e
// sinaliza violações com HTTP 400/422
// Restrição: nenhum erro de reqwest atravessa esta camada sem ser
// normalizado para ErroApi
// ==========================================

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::ConfiguracaoCliente;
use crate::domain::confirmacao::{ConfirmacaoRiscos, VerificacaoConfirmacao};
use crate::domain::tipos::{SistemaNormativo, TipoSistema};
use crate::domain::validacao::ResultadoValidacao;
use crate::domain::vazao::{PecaQuantidade, ResultadoVazao};
use crate::servico::erro::{ErroApi, ServicoResult};
use crate::servico::{RespostaElegibilidade, ServicoVazao};

// Código sintético para corpo 2xx que não corresponde ao contrato
const CODIGO_RESPOSTA_INVALIDA: &str = "RESPOSTA_INVALIDA";

// ==========================================
// Envelope - casca comum dos endpoints de vazão/alertas
// ==========================================
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    sucesso: Option<bool>,
    #[serde(default)]
    dados: Option<serde_json::Value>,
    #[serde(default)]
    erro: Option<ErroApi>,
}

#[derive(Debug, Deserialize)]
struct EnvelopeVazao {
    vazao: ResultadoVazao,
}

#[derive(Debug, Deserialize)]
struct EnvelopeMensagem {
    mensagem: String,
}

// ==========================================
// ServicoVazaoHttp - implementação de produção
// ==========================================
pub struct ServicoVazaoHttp {
    client: Client,
    base_url: String,
}

impl ServicoVazaoHttp {
    /// Constrói o cliente a partir da configuração
    pub fn new(config: &ConfiguracaoCliente) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_segundos))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// POST em um endpoint envelopado, extraindo `dados` tipado
    async fn post_envelope<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &impl Serialize,
    ) -> ServicoResult<T> {
        let url = format!("{}/api{}", self.base_url, endpoint);
        debug!(endpoint, "chamada ao serviço de cálculo");

        let resposta = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                warn!(endpoint, erro = %e, "falha de conexão");
                ErroApi::falha_rede(e).com_detalhes(json!({ "url": url }))
            })?;

        let status = resposta.status();
        // Corpo ausente ou não-JSON vira objeto vazio, como no contrato
        let corpo: serde_json::Value = resposta.json().await.unwrap_or_else(|_| json!({}));

        if !status.is_success() {
            let erro = serde_json::from_value::<Envelope>(corpo.clone())
                .ok()
                .and_then(|env| env.erro)
                .unwrap_or_else(|| ErroApi::http(status.as_u16(), endpoint).com_detalhes(corpo));
            warn!(endpoint, codigo = %erro.codigo, "erro do serviço de cálculo");
            return Err(erro);
        }

        let envelope: Envelope = serde_json::from_value(corpo)
            .map_err(|e| ErroApi::new(CODIGO_RESPOSTA_INVALIDA, e.to_string()))?;

        if envelope.sucesso == Some(false) {
            return Err(envelope.erro.unwrap_or_else(|| {
                ErroApi::new(
                    CODIGO_RESPOSTA_INVALIDA,
                    format!("Resposta sem erro detalhado em {}", endpoint),
                )
            }));
        }

        let dados = envelope.dados.ok_or_else(|| {
            ErroApi::new(
                CODIGO_RESPOSTA_INVALIDA,
                format!("Resposta sem campo dados em {}", endpoint),
            )
        })?;

        serde_json::from_value(dados)
            .map_err(|e| ErroApi::new(CODIGO_RESPOSTA_INVALIDA, e.to_string()))
    }
}

#[async_trait]
impl ServicoVazao for ServicoVazaoHttp {
    async fn validar_tipo_vazao(
        &self,
        tipo: TipoSistema,
    ) -> ServicoResult<RespostaElegibilidade> {
        self.post_envelope("/validar-tipo-vazao", &json!({ "tipo_sistema": tipo }))
            .await
    }

    async fn calcular_vazao_pesos(
        &self,
        tipo: TipoSistema,
        pecas: &[PecaQuantidade],
    ) -> ServicoResult<ResultadoVazao> {
        let envelope: EnvelopeVazao = self
            .post_envelope(
                "/calcular-vazao-pesos",
                &json!({ "tipo_sistema": tipo, "pecas": pecas }),
            )
            .await?;
        Ok(envelope.vazao)
    }

    async fn definir_vazao_manual(
        &self,
        tipo: TipoSistema,
        vazao_m3h: f64,
    ) -> ServicoResult<ResultadoVazao> {
        let envelope: EnvelopeVazao = self
            .post_envelope(
                "/definir-vazao-manual",
                &json!({ "tipo_sistema": tipo, "vazao_m3h": vazao_m3h }),
            )
            .await?;
        Ok(envelope.vazao)
    }

    async fn confirmar_alertas(&self, payload: &ConfirmacaoRiscos) -> ServicoResult<String> {
        let envelope: EnvelopeMensagem = self.post_envelope("/alertas/confirmar", payload).await?;
        Ok(envelope.mensagem)
    }

    async fn verificar_confirmacao(
        &self,
        projeto_id: &str,
        usuario_id: &str,
    ) -> ServicoResult<VerificacaoConfirmacao> {
        self.post_envelope(
            "/alertas/verificar-confirmacao",
            &json!({ "projeto_id": projeto_id, "usuario_id": usuario_id }),
        )
        .await
    }

    async fn validar_compliance(
        &self,
        tipo: SistemaNormativo,
        dados: &serde_json::Value,
    ) -> ServicoResult<ResultadoValidacao> {
        let endpoint = "/v1/compliance/validar";
        let url = format!("{}/api{}", self.base_url, endpoint);
        debug!(tipo = %tipo, "validação de compliance");

        let resposta = self
            .client
            .post(&url)
            .json(&json!({ "tipo_sistema": tipo, "dados": dados }))
            .send()
            .await
            .map_err(|e| ErroApi::falha_rede(e).com_detalhes(json!({ "url": url })))?;

        let status = resposta.status();
        let corpo: serde_json::Value = resposta.json().await.unwrap_or_else(|_| json!({}));

        if !status.is_success() {
            // 400 = payload malformado; 422 = violação normativa
            // O corpo segue { error, requeridos? } e vai inteiro em detalhes
            let codigo = match status.as_u16() {
                400 => "PAYLOAD_INVALIDO",
                422 => "VIOLACAO_NORMATIVA",
                _ => return Err(ErroApi::http(status.as_u16(), endpoint).com_detalhes(corpo)),
            };
            let mensagem = corpo
                .get("error")
                .and_then(|v| v.as_str())
                .map(str::to_string)
                .unwrap_or_else(|| status.to_string());
            return Err(ErroApi::new(codigo, mensagem).com_detalhes(corpo));
        }

        serde_json::from_value(corpo)
            .map_err(|e| ErroApi::new(CODIGO_RESPOSTA_INVALIDA, e.to_string()))
    }
}
