// ==========================================
// Teste de integração - Fluxo completo da sessão
// ==========================================
// Cobre: seleção de tipo → elegibilidade → método → cálculo →
// revisão → confirmação de vazão → alertas → confirmação de riscos →
// liberação; reinício ao trocar o tipo; descarte de resposta obsoleta
// ==========================================

mod helpers;

use std::sync::Arc;

use dimensionamento_vazao::domain::tipos::{
    EstadoLiberacao, EtapaFluxo, MetodoVazao, NivelAlerta, TipoSistema,
};
use dimensionamento_vazao::domain::vazao::PecaQuantidade;
use dimensionamento_vazao::engine::erro::ErroFluxo;
use dimensionamento_vazao::engine::sessao::SessaoVazao;
use dimensionamento_vazao::engine::vazao::VazaoEngine;
use dimensionamento_vazao::servico::ServicoVazaoLocal;

use helpers::alerta;

fn sessao_local() -> SessaoVazao<ServicoVazaoLocal> {
    SessaoVazao::new(Arc::new(ServicoVazaoLocal::new()))
}

// ==========================================
// Fluxo completo feliz
// ==========================================

#[tokio::test]
async fn fluxo_completo_predial_metodo_pesos() {
    dimensionamento_vazao::logging::init_test();
    let mut sessao = sessao_local();

    // Etapa 1: tipo de sistema + elegibilidade
    let elegibilidade = sessao.selecionar_tipo(TipoSistema::Predial).await.unwrap();
    assert_eq!(elegibilidade.recomendado, MetodoVazao::MetodoPesos);
    // Método recomendado fica pré-selecionado
    assert_eq!(sessao.metodo(), Some(MetodoVazao::MetodoPesos));
    assert_eq!(sessao.etapa(), EtapaFluxo::Entrada);

    // Etapa 2: cálculo pelo método dos pesos
    sessao
        .calcular_pesos(&[PecaQuantidade::new("bacia_valvula", 1)])
        .await
        .unwrap();
    assert_eq!(sessao.etapa(), EtapaFluxo::Revisao);
    let resultado = sessao.resultado().unwrap();
    assert_eq!(resultado.detalhes.soma_pesos, Some(32.0));
    assert!(resultado.conversao_consistente());

    // Etapa 3: compromete a vazão
    sessao.confirmar_vazao().unwrap();
    assert_eq!(sessao.etapa(), EtapaFluxo::Confirmada);

    // Etapa 4: alertas do cálculo hidráulico a jusante
    sessao.registrar_alertas(vec![alerta("CAVITACAO", NivelAlerta::Critico)]);
    let (estado, motivo) = sessao.estado_liberacao();
    assert_eq!(estado, EstadoLiberacao::PendenteConfirmacao);
    assert!(motivo.is_some());
    assert!(!sessao.pode_gerar_relatorio());

    // Etapa 5: confirmação de riscos destrava o relatório
    let estado = sessao
        .confirmar_riscos("P001", "U001", true, None)
        .await
        .unwrap();
    assert_eq!(estado, EstadoLiberacao::Liberado);
    assert!(sessao.pode_gerar_relatorio());
}

#[tokio::test]
async fn fluxo_manual_industrial() {
    let mut sessao = sessao_local();
    sessao.selecionar_tipo(TipoSistema::Industrial).await.unwrap();
    assert_eq!(sessao.metodo(), Some(MetodoVazao::Manual));

    sessao.calcular_manual(18.0).await.unwrap();
    let resultado = sessao.confirmar_vazao().unwrap();
    assert!((resultado.valor_ls - 5.0).abs() <= 1e-9);

    // Sem alertas registrados: estado limpo, relatório liberado
    assert_eq!(sessao.estado_liberacao().0, EstadoLiberacao::Limpo);
    assert!(sessao.pode_gerar_relatorio());
}

// ==========================================
// Regras de sequência
// ==========================================

#[tokio::test]
async fn metodo_fora_da_elegibilidade_e_rejeitado() {
    let mut sessao = sessao_local();
    sessao.selecionar_tipo(TipoSistema::Industrial).await.unwrap();

    let erro = sessao.selecionar_metodo(MetodoVazao::MetodoPesos).unwrap_err();
    assert_eq!(erro, ErroFluxo::MetodoNaoPermitido);
}

#[tokio::test]
async fn calculo_sem_tipo_selecionado_e_rejeitado() {
    let mut sessao = sessao_local();
    let erro = sessao.calcular_manual(10.0).await.unwrap_err();
    assert_eq!(erro, ErroFluxo::TipoSistemaNaoSelecionado);
}

#[tokio::test]
async fn calculo_com_metodo_divergente_e_rejeitado() {
    let mut sessao = sessao_local();
    sessao.selecionar_tipo(TipoSistema::Predial).await.unwrap();
    // Método corrente é metodo_pesos (recomendado); manual não casa
    let erro = sessao.calcular_manual(10.0).await.unwrap_err();
    assert_eq!(erro, ErroFluxo::MetodoNaoSelecionado);
}

#[tokio::test]
async fn recalcular_exige_edicao_explicita() {
    let mut sessao = sessao_local();
    sessao.selecionar_tipo(TipoSistema::Predial).await.unwrap();
    sessao
        .calcular_pesos(&[PecaQuantidade::new("chuveiro", 2)])
        .await
        .unwrap();

    // Em Revisao, novo cálculo sem editar é etapa inválida
    let erro = sessao
        .calcular_pesos(&[PecaQuantidade::new("chuveiro", 3)])
        .await
        .unwrap_err();
    assert!(matches!(erro, ErroFluxo::EtapaInvalida { .. }));

    // Editar descarta o resultado e reabre a entrada
    sessao.editar().unwrap();
    assert_eq!(sessao.etapa(), EtapaFluxo::Entrada);
    assert!(sessao.resultado().is_none());

    sessao
        .calcular_pesos(&[PecaQuantidade::new("chuveiro", 3)])
        .await
        .unwrap();
    assert_eq!(sessao.resultado().unwrap().detalhes.soma_pesos, Some(1.5));
}

// ==========================================
// Reinício ao trocar o tipo de sistema
// ==========================================

#[tokio::test]
async fn trocar_tipo_descarta_todo_o_estado_derivado() {
    let mut sessao = sessao_local();
    sessao.selecionar_tipo(TipoSistema::Predial).await.unwrap();
    sessao
        .calcular_pesos(&[PecaQuantidade::new("bacia_valvula", 1)])
        .await
        .unwrap();
    sessao.confirmar_vazao().unwrap();
    sessao.registrar_alertas(vec![alerta("CAVITACAO", NivelAlerta::Critico)]);
    sessao
        .confirmar_riscos("P001", "U001", true, None)
        .await
        .unwrap();
    assert!(sessao.pode_gerar_relatorio());

    // Troca de tipo: vazão, alertas e confirmação caem juntos
    sessao.selecionar_tipo(TipoSistema::Industrial).await.unwrap();
    assert!(sessao.resultado().is_none());
    assert!(sessao.alertas().is_empty());
    assert_eq!(sessao.etapa(), EtapaFluxo::Entrada);
    assert_eq!(sessao.estado_liberacao().0, EstadoLiberacao::Limpo);
    assert_eq!(sessao.metodo(), Some(MetodoVazao::Manual));
}

// ==========================================
// Descarte de resposta obsoleta
// ==========================================

#[tokio::test]
async fn resposta_de_geracao_anterior_e_descartada() {
    let servico = Arc::new(ServicoVazaoLocal::new());
    let mut sessao = SessaoVazao::new(Arc::clone(&servico));
    sessao.selecionar_tipo(TipoSistema::Predial).await.unwrap();

    // Host dirige a engine por conta própria e captura o marcador
    let marcador = sessao.marcador();
    let engine = VazaoEngine::new(Arc::clone(&servico));
    let resultado = engine
        .calcular_pesos(TipoSistema::Predial, &[PecaQuantidade::new("chuveiro", 2)])
        .await
        .unwrap();

    // A entrada muda antes de a resposta ser aplicada
    sessao.selecionar_tipo(TipoSistema::Industrial).await.unwrap();

    let erro = sessao.aplicar_resultado(marcador, resultado).unwrap_err();
    assert_eq!(erro, ErroFluxo::RespostaObsoleta);
    // Nenhuma mutação parcial: a sessão segue no estado novo
    assert!(sessao.resultado().is_none());
    assert_eq!(sessao.tipo_sistema(), Some(TipoSistema::Industrial));
}

#[tokio::test]
async fn resposta_da_geracao_corrente_e_aplicada() {
    let servico = Arc::new(ServicoVazaoLocal::new());
    let mut sessao = SessaoVazao::new(Arc::clone(&servico));
    sessao.selecionar_tipo(TipoSistema::Predial).await.unwrap();

    let marcador = sessao.marcador();
    let engine = VazaoEngine::new(Arc::clone(&servico));
    let resultado = engine
        .calcular_pesos(TipoSistema::Predial, &[PecaQuantidade::new("chuveiro", 2)])
        .await
        .unwrap();

    sessao.aplicar_resultado(marcador, resultado).unwrap();
    assert_eq!(sessao.etapa(), EtapaFluxo::Revisao);
}

// ==========================================
// Verificação pós-recarga
// ==========================================

#[tokio::test]
async fn sincronizar_confirmacao_rederiva_liberacao() {
    let servico = Arc::new(ServicoVazaoLocal::new());

    // Sessão original confirma os riscos
    let mut original = SessaoVazao::new(Arc::clone(&servico));
    original.selecionar_tipo(TipoSistema::Predial).await.unwrap();
    original
        .calcular_pesos(&[PecaQuantidade::new("bacia_valvula", 1)])
        .await
        .unwrap();
    original.confirmar_vazao().unwrap();
    original.registrar_alertas(vec![alerta("CAVITACAO", NivelAlerta::Critico)]);
    original
        .confirmar_riscos("P001", "U001", true, None)
        .await
        .unwrap();

    // "Recarga": sessão nova, mesmo projeto; o estado local não é
    // assumido, a verificação remota rederiva a liberação
    let mut recarregada = SessaoVazao::new(Arc::clone(&servico));
    recarregada.selecionar_tipo(TipoSistema::Predial).await.unwrap();
    recarregada.registrar_alertas(vec![alerta("CAVITACAO", NivelAlerta::Critico)]);
    assert_eq!(
        recarregada.estado_liberacao().0,
        EstadoLiberacao::PendenteConfirmacao
    );

    let verificacao = recarregada
        .sincronizar_confirmacao("P001", "U001")
        .await
        .unwrap();
    assert!(verificacao.confirmado);
    assert_eq!(recarregada.estado_liberacao().0, EstadoLiberacao::Liberado);
    assert!(recarregada.pode_gerar_relatorio());
}

#[tokio::test]
async fn confirmar_riscos_sem_termos_falha_localmente() {
    let mut sessao = sessao_local();
    sessao.selecionar_tipo(TipoSistema::Predial).await.unwrap();
    sessao.registrar_alertas(vec![alerta("CAVITACAO", NivelAlerta::Critico)]);

    let erro = sessao
        .confirmar_riscos("P001", "U001", false, None)
        .await
        .unwrap_err();
    assert_eq!(erro, ErroFluxo::TermosNaoAceitos);
    assert_eq!(
        sessao.estado_liberacao().0,
        EstadoLiberacao::PendenteConfirmacao
    );
}
