// ==========================================
// Dimensionamento Hidráulico - Alertas estruturados
// ==========================================
// Alertas gerados pelo serviço de cálculo para o conjunto de entradas
// corrente; a classificação por nível é recomputada a partir da lista,
// nunca armazenada em campo mutável
// ==========================================

use crate::domain::tipos::NivelAlerta;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// DetalhesTecnicos - memória de cálculo do alerta
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetalhesTecnicos {
    pub valor_calculado: f64,
    pub unidade: String,
    pub limite_norma: f64,
    /// Percentual acima do limite (ex.: 10.5 para 10,5%)
    pub excesso_percentual: f64,
    /// Fórmula aplicada (ex.: "V = Q / A")
    pub formula: String,
    /// Entradas usadas no cálculo (ex.: { "vazao_m3h": 10 })
    pub valores_input: HashMap<String, serde_json::Value>,
}

// ==========================================
// Alerta - alerta normativo estruturado
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alerta {
    /// UUID único do alerta gerado
    pub id: String,
    /// Código da categoria (ex.: "CAVITACAO", "VELOCIDADE_ALTA")
    pub tipo: String,
    pub nivel: NivelAlerta,
    /// Ex.: "Risco de Cavitação"
    pub titulo: String,
    pub mensagem: String,
    /// Item da norma (ex.: "6.3.1")
    pub item_nbr: String,
    /// Norma com versão (ex.: "NBR 5626:2020")
    pub norma: String,
    pub url_doc: String,
    pub recomendacao_generica: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recomendacao_personalizada: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detalhes_tecnicos: Option<DetalhesTecnicos>,
    /// Ex.: "Dano à bomba, ruído"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impacto: Option<String>,
}

// ==========================================
// AlertasPorNivel - classificação por severidade
// ==========================================
// Visão derivada de uma lista de alertas; preserva a ordem original
// dentro de cada nível
#[derive(Debug, Clone, Default)]
pub struct AlertasPorNivel {
    pub impeditivos: Vec<Alerta>,
    pub criticos: Vec<Alerta>,
    pub atencao: Vec<Alerta>,
    pub info: Vec<Alerta>,
}

impl AlertasPorNivel {
    /// Classifica uma lista de alertas pelos quatro níveis
    pub fn classificar(alertas: &[Alerta]) -> Self {
        let mut por_nivel = AlertasPorNivel::default();
        for alerta in alertas {
            match alerta.nivel {
                NivelAlerta::Impeditivo => por_nivel.impeditivos.push(alerta.clone()),
                NivelAlerta::Critico => por_nivel.criticos.push(alerta.clone()),
                NivelAlerta::Atencao => por_nivel.atencao.push(alerta.clone()),
                NivelAlerta::Info => por_nivel.info.push(alerta.clone()),
            }
        }
        por_nivel
    }

    pub fn tem_impeditivo(&self) -> bool {
        !self.impeditivos.is_empty()
    }

    pub fn tem_critico(&self) -> bool {
        !self.criticos.is_empty()
    }

    pub fn total(&self) -> usize {
        self.impeditivos.len() + self.criticos.len() + self.atencao.len() + self.info.len()
    }

    /// Códigos de categoria dos alertas críticos, na ordem original
    pub fn codigos_criticos(&self) -> Vec<String> {
        self.criticos.iter().map(|a| a.tipo.clone()).collect()
    }
}
