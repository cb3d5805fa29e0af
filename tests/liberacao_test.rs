// ==========================================
// Teste de integração - Liberação de relatório
// ==========================================
// Cobre: monotonicidade do bloqueio, cenário crítico → confirmação →
// liberado e idempotência da confirmação observável pela verificação
// ==========================================

mod helpers;

use std::sync::Arc;

use dimensionamento_vazao::domain::tipos::{EstadoLiberacao, NivelAlerta};
use dimensionamento_vazao::engine::confirmacao::ConfirmacaoEngine;
use dimensionamento_vazao::engine::liberacao_core::{Confirmacao, LiberacaoCore};
use dimensionamento_vazao::servico::ServicoVazaoLocal;

use helpers::alerta;

// ==========================================
// Monotonicidade do bloqueio
// ==========================================

#[test]
fn impeditivo_prevalece_em_qualquer_conjunto() {
    let conjuntos = [
        vec![alerta("PRESSAO_NEGATIVA", NivelAlerta::Impeditivo)],
        vec![
            alerta("CAVITACAO", NivelAlerta::Critico),
            alerta("PRESSAO_NEGATIVA", NivelAlerta::Impeditivo),
        ],
        vec![
            alerta("FOLGA_NPSH", NivelAlerta::Info),
            alerta("VELOCIDADE_ALTA", NivelAlerta::Atencao),
            alerta("PRESSAO_NEGATIVA", NivelAlerta::Impeditivo),
        ],
    ];

    for alertas in &conjuntos {
        // Independe de qualquer evidência de confirmação
        for confirmacao in [Confirmacao::Nenhuma, Confirmacao::ConfirmadaRemotamente] {
            let (estado, motivo) = LiberacaoCore::avaliar(alertas, confirmacao);
            assert_eq!(estado, EstadoLiberacao::BloqueadoImpeditivo);
            assert!(motivo.is_some());
        }
    }
}

#[test]
fn sem_impeditivo_e_sem_critico_sempre_libera() {
    let alertas = vec![
        alerta("FOLGA_NPSH", NivelAlerta::Info),
        alerta("VELOCIDADE_ALTA", NivelAlerta::Atencao),
    ];
    let (estado, motivo) = LiberacaoCore::avaliar(&alertas, Confirmacao::Nenhuma);
    assert_eq!(estado, EstadoLiberacao::Liberado);
    assert!(motivo.is_none());
}

// ==========================================
// Cenário: crítico → confirmação → liberado
// ==========================================

#[tokio::test]
async fn critico_confirmado_destrava_o_relatorio() {
    let alertas = vec![alerta("X", NivelAlerta::Critico)];

    // Sem confirmação: pendente
    let (estado, _) = LiberacaoCore::avaliar(&alertas, Confirmacao::Nenhuma);
    assert_eq!(estado, EstadoLiberacao::PendenteConfirmacao);

    // Confirmação cobrindo "X" com termos aceitos
    let engine = ConfirmacaoEngine::new(Arc::new(ServicoVazaoLocal::new()));
    let registro = engine
        .confirmar_riscos(dimensionamento_vazao::domain::confirmacao::ConfirmacaoRiscos {
            projeto_id: "P001".to_string(),
            usuario_id: "U001".to_string(),
            alertas_confirmados: vec!["X".to_string()],
            termos_aceitos: true,
            calculo_id: None,
        })
        .await
        .unwrap();

    let (estado, motivo) = LiberacaoCore::avaliar(&alertas, Confirmacao::Registro(&registro));
    assert_eq!(estado, EstadoLiberacao::Liberado);
    assert!(motivo.is_none());
}

// ==========================================
// Idempotência da confirmação
// ==========================================

#[tokio::test]
async fn confirmar_duas_vezes_mantem_liberado_sem_duplicar() {
    let servico = Arc::new(ServicoVazaoLocal::new());
    let engine = ConfirmacaoEngine::new(Arc::clone(&servico));
    let alertas = vec![alerta("CAVITACAO", NivelAlerta::Critico)];

    let payload = dimensionamento_vazao::domain::confirmacao::ConfirmacaoRiscos {
        projeto_id: "P001".to_string(),
        usuario_id: "U001".to_string(),
        alertas_confirmados: vec!["CAVITACAO".to_string()],
        termos_aceitos: true,
        calculo_id: Some("C001".to_string()),
    };

    let primeiro = engine.confirmar_riscos(payload.clone()).await.unwrap();
    let segundo = engine.confirmar_riscos(payload).await.unwrap();

    // Liberado nas duas vezes
    for registro in [&primeiro, &segundo] {
        let (estado, _) = LiberacaoCore::avaliar(&alertas, Confirmacao::Registro(registro));
        assert_eq!(estado, EstadoLiberacao::Liberado);
    }

    // Sem efeito colateral duplicado observável pela verificação
    let verificacao = engine.verificar("P001", "U001").await.unwrap();
    assert!(verificacao.confirmado);
    assert!(verificacao.pode_gerar_pdf);
    let armazenado = servico.registro("P001", "U001").unwrap();
    assert_eq!(armazenado.alertas_confirmados, vec!["CAVITACAO"]);
}
