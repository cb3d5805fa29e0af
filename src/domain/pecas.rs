// ==========================================
// Dimensionamento Hidráulico - Catálogo de peças sanitárias
// ==========================================
// Pesos normativos por peça (NBR 5626, método dos pesos)
// O catálogo é fechado: tipos fora dele são rejeitados na validação
// ==========================================

use crate::domain::vazao::{PecaDetalhe, PecaQuantidade};

// ==========================================
// PecaSanitaria - item do catálogo
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PecaSanitaria {
    pub tipo: &'static str,
    pub nome: &'static str,
    pub peso: f64,
}

/// Catálogo normativo de peças sanitárias
pub const PECAS_SANITARIAS: &[PecaSanitaria] = &[
    PecaSanitaria { tipo: "bacia_caixa_acoplada", nome: "Bacia c/ Caixa Acoplada", peso: 0.3 },
    PecaSanitaria { tipo: "bacia_valvula", nome: "Bacia c/ Válvula de Descarga", peso: 32.0 },
    PecaSanitaria { tipo: "banheira", nome: "Banheira", peso: 1.0 },
    PecaSanitaria { tipo: "bebedouro", nome: "Bebedouro", peso: 0.1 },
    PecaSanitaria { tipo: "bide", nome: "Bidê", peso: 0.1 },
    PecaSanitaria { tipo: "chuveiro", nome: "Chuveiro", peso: 0.5 },
    PecaSanitaria { tipo: "chuveiro_eletrico", nome: "Chuveiro Elétrico", peso: 0.1 },
    PecaSanitaria { tipo: "lavadora_pratos", nome: "Máquina de Lavar Pratos", peso: 1.0 },
    PecaSanitaria { tipo: "lavadora_roupas", nome: "Máquina de Lavar Roupas", peso: 1.0 },
    PecaSanitaria { tipo: "lavatorio", nome: "Lavatório", peso: 0.3 },
    PecaSanitaria { tipo: "micturio_valvula", nome: "Mictório c/ Válvula", peso: 2.5 },
    PecaSanitaria { tipo: "micturio_caixa_descarga", nome: "Mictório c/ Caixa Descarga", peso: 0.3 },
    PecaSanitaria { tipo: "pia_cozinha", nome: "Pia de Cozinha", peso: 0.7 },
    PecaSanitaria { tipo: "tanque_roupas", nome: "Tanque de Roupas", peso: 0.7 },
    PecaSanitaria { tipo: "torneira_jardim", nome: "Torneira de Jardim", peso: 0.5 },
];

/// Busca uma peça do catálogo pelo código
pub fn peca_por_tipo(tipo: &str) -> Option<&'static PecaSanitaria> {
    PECAS_SANITARIAS.iter().find(|p| p.tipo == tipo)
}

/// Calcula o somatório de pesos ΣP de um conjunto de entradas
///
/// # Regra
/// - Entradas com quantidade 0 são ignoradas (mapa esparso)
/// - Tipo fora do catálogo → Err com o código desconhecido
pub fn soma_pesos(pecas: &[PecaQuantidade]) -> Result<f64, String> {
    let mut soma = 0.0;
    for entrada in pecas {
        if entrada.quantidade == 0 {
            continue;
        }
        let peca = peca_por_tipo(&entrada.tipo).ok_or_else(|| entrada.tipo.clone())?;
        soma += peca.peso * f64::from(entrada.quantidade);
    }
    Ok(soma)
}

/// Monta as linhas da memória de cálculo do método dos pesos
///
/// Entradas com quantidade 0 não geram linha; tipos desconhecidos já
/// devem ter sido rejeitados por soma_pesos
pub fn detalhar_pecas(pecas: &[PecaQuantidade]) -> Vec<PecaDetalhe> {
    pecas
        .iter()
        .filter(|entrada| entrada.quantidade > 0)
        .filter_map(|entrada| {
            peca_por_tipo(&entrada.tipo).map(|peca| PecaDetalhe {
                tipo: peca.tipo.to_string(),
                nome_exibicao: peca.nome.to_string(),
                quantidade: entrada.quantidade,
                peso_unitario: peca.peso,
                peso_total: peca.peso * f64::from(entrada.quantidade),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogo_completo() {
        assert_eq!(PECAS_SANITARIAS.len(), 15);
        let bacia = peca_por_tipo("bacia_valvula").unwrap();
        assert_eq!(bacia.peso, 32.0);
        assert_eq!(bacia.nome, "Bacia c/ Válvula de Descarga");
    }

    #[test]
    fn test_tipo_desconhecido() {
        assert!(peca_por_tipo("jacuzzi").is_none());
        let erro = soma_pesos(&[PecaQuantidade::new("jacuzzi", 1)]).unwrap_err();
        assert_eq!(erro, "jacuzzi");
    }

    #[test]
    fn test_soma_pesos_ignora_quantidade_zero() {
        let pecas = vec![
            PecaQuantidade::new("chuveiro", 2),
            PecaQuantidade::new("lavatorio", 0),
            // tipo desconhecido com quantidade 0 também é ausência lógica
            PecaQuantidade::new("jacuzzi", 0),
        ];
        assert_eq!(soma_pesos(&pecas).unwrap(), 1.0);
    }

    #[test]
    fn test_soma_pesos_vazia_e_zerada() {
        assert_eq!(soma_pesos(&[]).unwrap(), 0.0);
        let zeradas = vec![PecaQuantidade::new("chuveiro", 0)];
        assert_eq!(soma_pesos(&zeradas).unwrap(), 0.0);
    }

    #[test]
    fn test_detalhar_pecas() {
        let pecas = vec![
            PecaQuantidade::new("bacia_valvula", 1),
            PecaQuantidade::new("lavatorio", 3),
            PecaQuantidade::new("chuveiro", 0),
        ];
        let detalhes = detalhar_pecas(&pecas);
        assert_eq!(detalhes.len(), 2);
        assert_eq!(detalhes[0].peso_total, 32.0);
        assert_eq!(detalhes[1].quantidade, 3);
        assert!((detalhes[1].peso_total - 0.9).abs() < 1e-12);
    }
}
