// ==========================================
// Dimensionamento Hidráulico - Confirmação de riscos
// ==========================================
// O registro de confirmação é o único mecanismo que converte um
// bloqueio por alerta CRITICO em liberação; é criado apenas por ação
// explícita do usuário e tem ciclo de vida somente-acréscimo
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ==========================================
// ConfirmacaoRiscos - payload de confirmação
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfirmacaoRiscos {
    pub projeto_id: String,
    pub usuario_id: String,
    /// Códigos de categoria dos alertas confirmados (alerta.tipo)
    pub alertas_confirmados: Vec<String>,
    /// Deve ser true; a API rejeita confirmação sem aceite de termos
    pub termos_aceitos: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calculo_id: Option<String>,
}

// ==========================================
// RegistroConfirmacao - confirmação persistida
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistroConfirmacao {
    pub projeto_id: String,
    pub usuario_id: String,
    pub alertas_confirmados: Vec<String>,
    pub termos_aceitos: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calculo_id: Option<String>,
    pub confirmado_em: DateTime<Utc>,
}

impl RegistroConfirmacao {
    /// Indica se o registro cobre todos os códigos informados
    ///
    /// # Regra
    /// - Cobertura por conjunto: todo código corrente precisa constar
    ///   em alertas_confirmados; códigos extras no registro não invalidam
    pub fn cobre(&self, codigos: &[String]) -> bool {
        let confirmados: HashSet<&str> =
            self.alertas_confirmados.iter().map(String::as_str).collect();
        codigos.iter().all(|c| confirmados.contains(c.as_str()))
    }
}

// ==========================================
// VerificacaoConfirmacao - consulta de confirmação
// ==========================================
// Resposta de /api/alertas/verificar-confirmacao; fonte de verdade
// após recarga da sessão
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificacaoConfirmacao {
    pub confirmado: bool,
    pub pode_gerar_pdf: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registro(codigos: &[&str]) -> RegistroConfirmacao {
        RegistroConfirmacao {
            projeto_id: "P001".to_string(),
            usuario_id: "U001".to_string(),
            alertas_confirmados: codigos.iter().map(|c| c.to_string()).collect(),
            termos_aceitos: true,
            calculo_id: None,
            confirmado_em: Utc::now(),
        }
    }

    #[test]
    fn test_cobre_todos_os_codigos() {
        let reg = registro(&["CAVITACAO", "GOLPE_ARIETE"]);
        assert!(reg.cobre(&["CAVITACAO".to_string()]));
        assert!(reg.cobre(&["CAVITACAO".to_string(), "GOLPE_ARIETE".to_string()]));
    }

    #[test]
    fn test_nao_cobre_codigo_ausente() {
        let reg = registro(&["CAVITACAO"]);
        assert!(!reg.cobre(&["CAVITACAO".to_string(), "VELOCIDADE_ALTA".to_string()]));
    }

    #[test]
    fn test_cobre_conjunto_vazio() {
        let reg = registro(&[]);
        assert!(reg.cobre(&[]));
        assert!(!reg.cobre(&["CAVITACAO".to_string()]));
    }
}
