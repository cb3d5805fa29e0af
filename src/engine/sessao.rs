// ==========================================
// Dimensionamento Hidráulico - Sessão do fluxo de vazão
// ==========================================
// Responsabilidade: dono explícito do estado do fluxo (nada de estado
// global ambiente); ordena as etapas, bloqueia submissão duplicada e
// descarta respostas de gerações anteriores
// O estado de liberação é sempre derivado dos alertas + confirmação,
// nunca armazenado em campo próprio
// ==========================================

use std::sync::Arc;
use tracing::{debug, instrument};

use crate::domain::alerta::{Alerta, AlertasPorNivel};
use crate::domain::confirmacao::{ConfirmacaoRiscos, RegistroConfirmacao, VerificacaoConfirmacao};
use crate::domain::tipos::{EstadoLiberacao, EtapaFluxo, MetodoVazao, TipoSistema};
use crate::domain::vazao::{PecaQuantidade, ResultadoVazao};
use crate::engine::confirmacao::ConfirmacaoEngine;
use crate::engine::elegibilidade::{Elegibilidade, ElegibilidadeEngine};
use crate::engine::erro::ErroFluxo;
use crate::engine::liberacao_core::{Confirmacao, LiberacaoCore};
use crate::engine::vazao::VazaoEngine;
use crate::servico::ServicoVazao;

// ==========================================
// SessaoVazao - contexto do fluxo
// ==========================================
pub struct SessaoVazao<S: ServicoVazao> {
    elegibilidade_engine: ElegibilidadeEngine<S>,
    vazao_engine: VazaoEngine<S>,
    confirmacao_engine: ConfirmacaoEngine<S>,

    // Marcador de geração: cada troca de entrada a montante o avança;
    // respostas carimbadas com geração anterior são descartadas
    revisao: u64,
    // Trava de submissão duplicada enquanto há chamada pendente
    em_andamento: bool,

    tipo_sistema: Option<TipoSistema>,
    elegibilidade: Option<Elegibilidade>,
    metodo: Option<MetodoVazao>,
    etapa: EtapaFluxo,
    resultado: Option<ResultadoVazao>,
    alertas: Vec<Alerta>,
    registro_confirmacao: Option<RegistroConfirmacao>,
    verificacao_remota: Option<VerificacaoConfirmacao>,
}

impl<S: ServicoVazao> SessaoVazao<S> {
    pub fn new(servico: Arc<S>) -> Self {
        Self {
            elegibilidade_engine: ElegibilidadeEngine::new(Arc::clone(&servico)),
            vazao_engine: VazaoEngine::new(Arc::clone(&servico)),
            confirmacao_engine: ConfirmacaoEngine::new(servico),
            revisao: 0,
            em_andamento: false,
            tipo_sistema: None,
            elegibilidade: None,
            metodo: None,
            etapa: EtapaFluxo::Entrada,
            resultado: None,
            alertas: Vec::new(),
            registro_confirmacao: None,
            verificacao_remota: None,
        }
    }

    // ==========================================
    // Consultas
    // ==========================================

    pub fn tipo_sistema(&self) -> Option<TipoSistema> {
        self.tipo_sistema
    }

    pub fn elegibilidade(&self) -> Option<&Elegibilidade> {
        self.elegibilidade.as_ref()
    }

    pub fn metodo(&self) -> Option<MetodoVazao> {
        self.metodo
    }

    pub fn etapa(&self) -> EtapaFluxo {
        self.etapa
    }

    pub fn resultado(&self) -> Option<&ResultadoVazao> {
        self.resultado.as_ref()
    }

    pub fn alertas(&self) -> &[Alerta] {
        &self.alertas
    }

    pub fn alertas_por_nivel(&self) -> AlertasPorNivel {
        AlertasPorNivel::classificar(&self.alertas)
    }

    /// Marcador de geração corrente (para hosts que chamam as engines
    /// por conta própria e aplicam o resultado depois)
    pub fn marcador(&self) -> u64 {
        self.revisao
    }

    /// Estado de liberação derivado dos alertas + confirmação corrente
    pub fn estado_liberacao(&self) -> (EstadoLiberacao, Option<String>) {
        let confirmacao = match (&self.registro_confirmacao, &self.verificacao_remota) {
            (Some(registro), _) => Confirmacao::Registro(registro),
            (None, Some(v)) if v.confirmado => Confirmacao::ConfirmadaRemotamente,
            _ => Confirmacao::Nenhuma,
        };
        LiberacaoCore::avaliar(&self.alertas, confirmacao)
    }

    pub fn pode_gerar_relatorio(&self) -> bool {
        self.estado_liberacao().0.pode_gerar_relatorio()
    }

    // ==========================================
    // Seleção de tipo e método
    // ==========================================

    /// Seleciona o tipo de sistema e resolve a elegibilidade
    ///
    /// # Regras
    /// - Todo estado derivado do tipo anterior é descartado (resultado,
    ///   alertas, confirmação, elegibilidade)
    /// - A geração avança: respostas pendentes do tipo anterior serão
    ///   descartadas quando chegarem
    /// - O método recomendado já fica pré-selecionado
    #[instrument(skip(self), fields(tipo = %tipo))]
    pub async fn selecionar_tipo(&mut self, tipo: TipoSistema) -> Result<&Elegibilidade, ErroFluxo> {
        self.revisao += 1;
        self.em_andamento = false;
        self.tipo_sistema = Some(tipo);
        self.elegibilidade = None;
        self.metodo = None;
        self.etapa = EtapaFluxo::Entrada;
        self.resultado = None;
        self.alertas.clear();
        self.registro_confirmacao = None;
        self.verificacao_remota = None;

        let revisao = self.revisao;
        self.em_andamento = true;
        let elegibilidade = self.elegibilidade_engine.resolver(tipo).await;
        self.em_andamento = false;

        if self.revisao != revisao {
            return Err(ErroFluxo::RespostaObsoleta);
        }

        debug!(recomendado = %elegibilidade.recomendado, "elegibilidade resolvida");
        self.metodo = Some(elegibilidade.recomendado);
        self.elegibilidade = Some(elegibilidade);
        Ok(self.elegibilidade.as_ref().expect("elegibilidade recém-atribuída"))
    }

    /// Seleciona o método de determinação de vazão
    ///
    /// Rejeita métodos fora do conjunto de elegibilidade; com resultado
    /// já produzido, exige a transição explícita de edição antes
    pub fn selecionar_metodo(&mut self, metodo: MetodoVazao) -> Result<(), ErroFluxo> {
        let elegibilidade = self
            .elegibilidade
            .as_ref()
            .ok_or(ErroFluxo::TipoSistemaNaoSelecionado)?;

        if !elegibilidade.permite(metodo) {
            return Err(ErroFluxo::MetodoNaoPermitido);
        }
        if self.etapa != EtapaFluxo::Entrada {
            return Err(ErroFluxo::EtapaInvalida {
                esperada: EtapaFluxo::Entrada.to_string(),
                atual: self.etapa.to_string(),
            });
        }

        self.metodo = Some(metodo);
        Ok(())
    }

    // ==========================================
    // Determinação de vazão
    // ==========================================

    /// Calcula a vazão pelo método corrente
    ///
    /// Em caso de sucesso substitui qualquer resultado anterior e move
    /// a etapa para Revisao; alertas do resultado anterior são
    /// descartados junto
    #[instrument(skip(self, pecas_entrada))]
    pub async fn calcular_pesos(
        &mut self,
        pecas_entrada: &[PecaQuantidade],
    ) -> Result<&ResultadoVazao, ErroFluxo> {
        let tipo = self.exigir_entrada(MetodoVazao::MetodoPesos)?;

        let revisao = self.iniciar_operacao()?;
        let resultado = self.vazao_engine.calcular_pesos(tipo, pecas_entrada).await;
        self.em_andamento = false;

        self.aplicar_resultado(revisao, resultado?)
    }

    /// Registra a vazão informada diretamente
    #[instrument(skip(self))]
    pub async fn calcular_manual(&mut self, vazao_m3h: f64) -> Result<&ResultadoVazao, ErroFluxo> {
        let tipo = self.exigir_entrada(MetodoVazao::Manual)?;

        let revisao = self.iniciar_operacao()?;
        let resultado = self.vazao_engine.definir_manual(tipo, vazao_m3h).await;
        self.em_andamento = false;

        self.aplicar_resultado(revisao, resultado?)
    }

    /// Aplica um resultado produzido fora da sessão (host dirigindo a
    /// engine por conta própria), validando o marcador de geração
    pub fn aplicar_resultado(
        &mut self,
        marcador: u64,
        resultado: ResultadoVazao,
    ) -> Result<&ResultadoVazao, ErroFluxo> {
        if self.revisao != marcador {
            debug!(marcador, revisao = self.revisao, "resposta de geração anterior descartada");
            return Err(ErroFluxo::RespostaObsoleta);
        }
        if self.etapa != EtapaFluxo::Entrada {
            return Err(ErroFluxo::EtapaInvalida {
                esperada: EtapaFluxo::Entrada.to_string(),
                atual: self.etapa.to_string(),
            });
        }

        self.alertas.clear();
        self.resultado = Some(resultado);
        self.etapa = EtapaFluxo::Revisao;
        Ok(self.resultado.as_ref().expect("resultado recém-atribuído"))
    }

    /// Descarta o resultado e volta para a entrada de dados
    pub fn editar(&mut self) -> Result<(), ErroFluxo> {
        if self.etapa == EtapaFluxo::Entrada {
            return Err(ErroFluxo::EtapaInvalida {
                esperada: EtapaFluxo::Revisao.to_string(),
                atual: self.etapa.to_string(),
            });
        }

        // Edição a montante: avança a geração e descarta o derivado
        self.revisao += 1;
        self.em_andamento = false;
        self.resultado = None;
        self.alertas.clear();
        self.etapa = EtapaFluxo::Entrada;
        Ok(())
    }

    /// Compromete o resultado como vazão oficial dos cálculos seguintes
    pub fn confirmar_vazao(&mut self) -> Result<&ResultadoVazao, ErroFluxo> {
        if self.etapa != EtapaFluxo::Revisao {
            return Err(ErroFluxo::EtapaInvalida {
                esperada: EtapaFluxo::Revisao.to_string(),
                atual: self.etapa.to_string(),
            });
        }
        self.etapa = EtapaFluxo::Confirmada;
        Ok(self.resultado.as_ref().expect("resultado presente em Revisao"))
    }

    // ==========================================
    // Alertas e liberação
    // ==========================================

    /// Registra o conjunto de alertas devolvido pelo cálculo hidráulico
    /// que consumiu a vazão confirmada
    pub fn registrar_alertas(&mut self, alertas: Vec<Alerta>) {
        self.alertas = alertas;
    }

    /// Confirma os riscos dos alertas críticos correntes
    ///
    /// # Regras
    /// - Reconfirmação coberta pelo registro existente é no-op local
    /// - O registro resultante é a única evidência que destrava o
    ///   estado PendenteConfirmacao
    #[instrument(skip(self), fields(projeto = projeto_id))]
    pub async fn confirmar_riscos(
        &mut self,
        projeto_id: &str,
        usuario_id: &str,
        termos_aceitos: bool,
        calculo_id: Option<String>,
    ) -> Result<EstadoLiberacao, ErroFluxo> {
        let codigos = self.alertas_por_nivel().codigos_criticos();

        // Idempotência: cobertura existente dispensa nova persistência
        if let Some(registro) = &self.registro_confirmacao {
            if termos_aceitos && registro.cobre(&codigos) {
                return Ok(self.estado_liberacao().0);
            }
        }

        let payload = ConfirmacaoRiscos {
            projeto_id: projeto_id.to_string(),
            usuario_id: usuario_id.to_string(),
            alertas_confirmados: codigos,
            termos_aceitos,
            calculo_id,
        };

        let revisao = self.iniciar_operacao()?;
        let resultado = self.confirmacao_engine.confirmar_riscos(payload).await;
        self.em_andamento = false;

        let registro = resultado?;
        if self.revisao != revisao {
            return Err(ErroFluxo::RespostaObsoleta);
        }

        self.registro_confirmacao = Some(registro);
        Ok(self.estado_liberacao().0)
    }

    /// Reconsulta a confirmação persistida (fonte de verdade após
    /// recarga) e a incorpora à derivação do estado de liberação
    #[instrument(skip(self), fields(projeto = projeto_id))]
    pub async fn sincronizar_confirmacao(
        &mut self,
        projeto_id: &str,
        usuario_id: &str,
    ) -> Result<VerificacaoConfirmacao, ErroFluxo> {
        let revisao = self.iniciar_operacao()?;
        let resultado = self.confirmacao_engine.verificar(projeto_id, usuario_id).await;
        self.em_andamento = false;

        let verificacao = resultado?;
        if self.revisao != revisao {
            return Err(ErroFluxo::RespostaObsoleta);
        }

        self.verificacao_remota = Some(verificacao);
        Ok(verificacao)
    }

    // ==========================================
    // Apoio interno
    // ==========================================

    /// Valida os pré-requisitos de um cálculo de vazão na etapa de
    /// entrada e devolve o tipo de sistema corrente
    fn exigir_entrada(&self, metodo: MetodoVazao) -> Result<TipoSistema, ErroFluxo> {
        let tipo = self.tipo_sistema.ok_or(ErroFluxo::TipoSistemaNaoSelecionado)?;

        match self.metodo {
            Some(selecionado) if selecionado == metodo => {}
            _ => return Err(ErroFluxo::MetodoNaoSelecionado),
        }

        if self.etapa != EtapaFluxo::Entrada {
            return Err(ErroFluxo::EtapaInvalida {
                esperada: EtapaFluxo::Entrada.to_string(),
                atual: self.etapa.to_string(),
            });
        }
        Ok(tipo)
    }

    /// Trava a sessão para uma única operação remota pendente
    fn iniciar_operacao(&mut self) -> Result<u64, ErroFluxo> {
        if self.em_andamento {
            return Err(ErroFluxo::OperacaoEmAndamento);
        }
        self.em_andamento = true;
        Ok(self.revisao)
    }
}
