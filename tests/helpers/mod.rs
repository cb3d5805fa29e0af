// ==========================================
// Apoio aos testes de integração
// ==========================================
// Construtores de alertas usados pelos vários arquivos
// ==========================================
#![allow(dead_code)]

use dimensionamento_vazao::domain::alerta::Alerta;
use dimensionamento_vazao::domain::tipos::NivelAlerta;
use uuid::Uuid;

/// Alerta mínimo com norma NBR 5626:2020
pub fn alerta(tipo: &str, nivel: NivelAlerta) -> Alerta {
    alerta_com_norma(tipo, nivel, "NBR 5626:2020")
}

/// Alerta mínimo com a norma informada
pub fn alerta_com_norma(tipo: &str, nivel: NivelAlerta, norma: &str) -> Alerta {
    Alerta {
        id: Uuid::new_v4().to_string(),
        tipo: tipo.to_string(),
        nivel,
        titulo: format!("Alerta {}", tipo),
        mensagem: format!("Mensagem do alerta {}", tipo),
        item_nbr: "6.3.1".to_string(),
        norma: norma.to_string(),
        url_doc: format!("https://docs.example/alertas/{}", tipo.to_lowercase()),
        recomendacao_generica: vec!["Revisar o dimensionamento do trecho".to_string()],
        recomendacao_personalizada: None,
        detalhes_tecnicos: None,
        impacto: None,
    }
}
