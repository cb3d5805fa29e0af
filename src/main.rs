// ==========================================
// Dimensionamento Hidráulico - CLI do fluxo de vazão
// ==========================================
// Casca fina sobre a SessaoVazao; útil para exercitar o fluxo contra
// o serviço remoto (padrão) ou contra a referência em processo
// ==========================================

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use dimensionamento_vazao::config::ConfiguracaoCliente;
use dimensionamento_vazao::domain::pecas::PECAS_SANITARIAS;
use dimensionamento_vazao::domain::vazao::PecaQuantidade;
use dimensionamento_vazao::engine::erro::ErroFluxo;
use dimensionamento_vazao::engine::sessao::SessaoVazao;
use dimensionamento_vazao::logging;
use dimensionamento_vazao::servico::{ServicoVazao, ServicoVazaoHttp, ServicoVazaoLocal};
use dimensionamento_vazao::{MetodoVazao, TipoSistema};

#[derive(Parser)]
#[command(name = "dimensionamento-vazao")]
#[command(about = "Determinação de vazão e liberação de relatórios (NBR 5626)")]
struct Cli {
    /// Usa a referência em processo no lugar do serviço remoto
    #[arg(long, global = true)]
    local: bool,

    /// Arquivo de configuração TOML
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    comando: Comando,
}

#[derive(Subcommand)]
enum Comando {
    /// Lista o catálogo de peças sanitárias e seus pesos
    Catalogo,
    /// Resolve os métodos de vazão permitidos para o tipo de sistema
    Elegibilidade {
        #[arg(long, value_parser = parse_tipo)]
        tipo: TipoSistema,
    },
    /// Registra uma vazão informada diretamente (m³/h)
    Manual {
        #[arg(long, value_parser = parse_tipo)]
        tipo: TipoSistema,
        #[arg(long)]
        vazao_m3h: f64,
    },
    /// Calcula a vazão pelo método dos pesos
    Pesos {
        #[arg(long, value_parser = parse_tipo)]
        tipo: TipoSistema,
        /// Peça no formato tipo=quantidade (repetível)
        #[arg(long = "peca", value_parser = parse_peca, required = true)]
        pecas: Vec<PecaQuantidade>,
    },
}

fn parse_tipo(s: &str) -> Result<TipoSistema, String> {
    TipoSistema::parse(s).ok_or_else(|| format!("tipo de sistema desconhecido: {}", s))
}

fn parse_peca(s: &str) -> Result<PecaQuantidade, String> {
    let (tipo, quantidade) = s
        .split_once('=')
        .ok_or_else(|| format!("formato esperado tipo=quantidade, recebido: {}", s))?;
    let quantidade: u32 = quantidade
        .parse()
        .map_err(|_| format!("quantidade inválida: {}", quantidade))?;
    Ok(PecaQuantidade::new(tipo, quantidade))
}

#[tokio::main]
async fn main() {
    logging::init();
    let cli = Cli::parse();

    let resultado = if cli.local {
        executar(Arc::new(ServicoVazaoLocal::new()), cli.comando).await
    } else {
        let config = ConfiguracaoCliente::carregar_ou_padrao(cli.config.as_deref());
        match ServicoVazaoHttp::new(&config) {
            Ok(servico) => executar(Arc::new(servico), cli.comando).await,
            Err(erro) => {
                eprintln!("erro: {}", erro);
                std::process::exit(1);
            }
        }
    };

    if let Err(erro) = resultado {
        let apresentacao = erro.apresentacao();
        eprintln!("erro: {}", apresentacao.mensagem);
        if let Some(campo) = apresentacao.campo {
            eprintln!("campo: {}", campo);
        }
        std::process::exit(1);
    }
}

async fn executar<S: ServicoVazao>(servico: Arc<S>, comando: Comando) -> Result<(), ErroFluxo> {
    match comando {
        Comando::Catalogo => {
            println!("{:<26} {:<32} {:>6}", "tipo", "nome", "peso");
            for peca in PECAS_SANITARIAS {
                println!("{:<26} {:<32} {:>6.1}", peca.tipo, peca.nome, peca.peso);
            }
            Ok(())
        }

        Comando::Elegibilidade { tipo } => {
            let mut sessao = SessaoVazao::new(servico);
            let elegibilidade = sessao.selecionar_tipo(tipo).await?;

            println!("tipo de sistema: {}", elegibilidade.tipo_sistema);
            let permitidos: Vec<&str> = elegibilidade
                .metodos_permitidos
                .iter()
                .map(|m| m.as_str())
                .collect();
            println!("métodos permitidos: {}", permitidos.join(", "));
            println!("recomendado: {}", elegibilidade.recomendado);
            if let Some(aviso) = &elegibilidade.aviso {
                println!("aviso: {}", aviso);
            }
            Ok(())
        }

        Comando::Manual { tipo, vazao_m3h } => {
            let mut sessao = SessaoVazao::new(servico);
            sessao.selecionar_tipo(tipo).await?;
            sessao.selecionar_metodo(MetodoVazao::Manual)?;
            sessao.calcular_manual(vazao_m3h).await?;
            let vazao = sessao.confirmar_vazao()?;

            println!("vazão confirmada: {:.4} L/s ({:.4} m³/h)", vazao.valor_ls, vazao.valor_m3h);
            Ok(())
        }

        Comando::Pesos { tipo, pecas } => {
            let mut sessao = SessaoVazao::new(servico);
            sessao.selecionar_tipo(tipo).await?;
            sessao.selecionar_metodo(MetodoVazao::MetodoPesos)?;
            sessao.calcular_pesos(&pecas).await?;
            let vazao = sessao.confirmar_vazao()?;

            if let Some(linhas) = &vazao.detalhes.pecas {
                for linha in linhas {
                    println!(
                        "{:<32} x{:<5} peso {:>5.1} → {:>7.1}",
                        linha.nome_exibicao, linha.quantidade, linha.peso_unitario, linha.peso_total
                    );
                }
            }
            if let Some(soma) = vazao.detalhes.soma_pesos {
                println!("somatório de pesos: {:.1}", soma);
            }
            if let Some(formula) = &vazao.detalhes.formula_aplicada {
                println!("fórmula: {}", formula);
            }
            println!("vazão confirmada: {:.4} L/s ({:.4} m³/h)", vazao.valor_ls, vazao.valor_m3h);
            Ok(())
        }
    }
}
