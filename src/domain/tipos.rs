// ==========================================
// Dimensionamento Hidráulico - Tipos de domínio
// ==========================================
// Formato de serialização: idêntico ao contrato da API remota
// (snake_case para tipos de sistema/método, maiúsculas para níveis)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// Tipo de sistema (Tipo de Instalação)
// ==========================================
// Imutável durante uma sessão de cálculo; trocar o tipo descarta todo
// o estado derivado (elegibilidade, vazão, alertas, confirmação)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TipoSistema {
    Predial,    // instalações prediais (NBR 5626)
    Industrial, // instalações industriais
}

impl fmt::Display for TipoSistema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TipoSistema::Predial => write!(f, "predial"),
            TipoSistema::Industrial => write!(f, "industrial"),
        }
    }
}

impl TipoSistema {
    /// Interpreta o valor textual usado no contrato da API
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "predial" => Some(TipoSistema::Predial),
            "industrial" => Some(TipoSistema::Industrial),
            _ => None,
        }
    }

    /// Valor textual usado no contrato da API
    pub fn as_str(&self) -> &'static str {
        match self {
            TipoSistema::Predial => "predial",
            TipoSistema::Industrial => "industrial",
        }
    }
}

// ==========================================
// Método de determinação de vazão
// ==========================================
// A submissão de um método fora do conjunto de elegibilidade do tipo
// de sistema corrente é rejeitada antes de qualquer chamada remota
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetodoVazao {
    Manual,      // valor informado diretamente pelo projetista
    MetodoPesos, // método dos pesos (somatório de unidades de peça)
}

impl fmt::Display for MetodoVazao {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetodoVazao::Manual => write!(f, "manual"),
            MetodoVazao::MetodoPesos => write!(f, "metodo_pesos"),
        }
    }
}

impl MetodoVazao {
    /// Interpreta o valor textual usado no contrato da API
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "manual" => Some(MetodoVazao::Manual),
            "metodo_pesos" => Some(MetodoVazao::MetodoPesos),
            _ => None,
        }
    }

    /// Valor textual usado no contrato da API
    pub fn as_str(&self) -> &'static str {
        match self {
            MetodoVazao::Manual => "manual",
            MetodoVazao::MetodoPesos => "metodo_pesos",
        }
    }
}

// ==========================================
// Nível de alerta
// ==========================================
// Ordem: INFO < ATENCAO < CRITICO < IMPEDITIVO
// Apenas os dois níveis superiores participam do bloqueio de relatório
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NivelAlerta {
    Info,       // informativo
    Atencao,    // atenção
    Critico,    // requer confirmação explícita de risco
    Impeditivo, // bloqueia o relatório até correção dos dados
}

impl fmt::Display for NivelAlerta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NivelAlerta::Info => write!(f, "INFO"),
            NivelAlerta::Atencao => write!(f, "ATENCAO"),
            NivelAlerta::Critico => write!(f, "CRITICO"),
            NivelAlerta::Impeditivo => write!(f, "IMPEDITIVO"),
        }
    }
}

// ==========================================
// Severidade (validação de compliance)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severidade {
    Impeditiva, // impede a aprovação do sistema
    Aviso,      // recomendação normativa
    Bloqueio,   // bloqueio operacional
}

impl fmt::Display for Severidade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severidade::Impeditiva => write!(f, "IMPEDITIVA"),
            Severidade::Aviso => write!(f, "AVISO"),
            Severidade::Bloqueio => write!(f, "BLOQUEIO"),
        }
    }
}

// ==========================================
// Sistema normativo (validação de compliance)
// ==========================================
// Domínio separado de TipoSistema: estes valores selecionam a norma
// NBR aplicável na validação de compliance, não o fluxo de vazão
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SistemaNormativo {
    AguaFria,  // NBR 5626
    Esgoto,    // NBR 8160
    Pluvial,   // NBR 10844
    Incendio,  // NBR 13714
    Efluentes, // NBR 13969
}

impl fmt::Display for SistemaNormativo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SistemaNormativo::AguaFria => write!(f, "agua_fria"),
            SistemaNormativo::Esgoto => write!(f, "esgoto"),
            SistemaNormativo::Pluvial => write!(f, "pluvial"),
            SistemaNormativo::Incendio => write!(f, "incendio"),
            SistemaNormativo::Efluentes => write!(f, "efluentes"),
        }
    }
}

impl SistemaNormativo {
    /// Interpreta o valor textual usado no contrato da API
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "agua_fria" => Some(SistemaNormativo::AguaFria),
            "esgoto" => Some(SistemaNormativo::Esgoto),
            "pluvial" => Some(SistemaNormativo::Pluvial),
            "incendio" => Some(SistemaNormativo::Incendio),
            "efluentes" => Some(SistemaNormativo::Efluentes),
            _ => None,
        }
    }

    /// Norma NBR que rege o sistema
    pub fn norma(&self) -> &'static str {
        match self {
            SistemaNormativo::AguaFria => "NBR 5626",
            SistemaNormativo::Esgoto => "NBR 8160",
            SistemaNormativo::Pluvial => "NBR 10844",
            SistemaNormativo::Incendio => "NBR 13714",
            SistemaNormativo::Efluentes => "NBR 13969",
        }
    }
}

// ==========================================
// Estado de liberação do relatório
// ==========================================
// Transições avaliadas em LiberacaoCore::avaliar; BloqueadoImpeditivo
// é terminal para o conjunto de alertas corrente (nenhuma confirmação
// o desfaz, apenas recomputar com novas entradas)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EstadoLiberacao {
    Limpo,                // nenhum alerta presente
    BloqueadoImpeditivo,  // alerta IMPEDITIVO presente
    PendenteConfirmacao,  // alerta CRITICO sem confirmação cobrindo-o
    Liberado,             // relatório pode ser gerado
}

impl fmt::Display for EstadoLiberacao {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EstadoLiberacao::Limpo => write!(f, "LIMPO"),
            EstadoLiberacao::BloqueadoImpeditivo => write!(f, "BLOQUEADO_IMPEDITIVO"),
            EstadoLiberacao::PendenteConfirmacao => write!(f, "PENDENTE_CONFIRMACAO"),
            EstadoLiberacao::Liberado => write!(f, "LIBERADO"),
        }
    }
}

impl EstadoLiberacao {
    /// Indica se o relatório pode ser gerado neste estado
    pub fn pode_gerar_relatorio(&self) -> bool {
        matches!(self, EstadoLiberacao::Limpo | EstadoLiberacao::Liberado)
    }
}

// ==========================================
// Etapa do fluxo de vazão
// ==========================================
// Entrada → (cálculo bem-sucedido) → Revisao → (confirmar) → Confirmada
// "editar" retorna de Revisao para Entrada descartando o resultado
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EtapaFluxo {
    Entrada,    // coleta de dados do método selecionado
    Revisao,    // resultado produzido, aguardando confirmar/editar
    Confirmada, // vazão comprometida para os cálculos hidráulicos
}

impl fmt::Display for EtapaFluxo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EtapaFluxo::Entrada => write!(f, "ENTRADA"),
            EtapaFluxo::Revisao => write!(f, "REVISAO"),
            EtapaFluxo::Confirmada => write!(f, "CONFIRMADA"),
        }
    }
}
