use clap::Parser;
use log::info;

use design_cnf::block::HlBlock;
use design_cnf::design::DesignNode;
use design_cnf::encode::{encode, EncodeConfig, Support};
use design_cnf::lower::EntangleMode;
use design_cnf::metrics::DesignMetrics;

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Colors (and words) used by the Stroop task.
    #[arg(value_name = "COLOR", default_values = ["red", "green", "blue"])]
    colors: Vec<String>,

    /// Also cross the response hand (left/right).
    #[clap(long)]
    hand: bool,

    /// Encode entanglements as implications instead of equivalences.
    #[clap(long)]
    implies: bool,

    /// Emit the Unigen dialect with the level grid as sampling set.
    #[clap(long)]
    unigen: bool,

    /// Print metrics only.
    #[clap(long)]
    metrics: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;

    let args = Cli::parse();
    info!("args = {:?}", args);

    let color = DesignNode::factor("color", args.colors.iter().cloned());
    let text = DesignNode::factor("text", args.colors.iter().cloned());
    let hand = DesignNode::factor("hand", ["left", "right"]);

    let mut crossing = vec!["color", "text"];
    if args.hand {
        crossing.push("hand");
    }
    let block = HlBlock::fully_crossed(vec![color, text, hand], &crossing)?;
    info!("block: {} trials", block.num_trials());

    let config = EncodeConfig {
        entangle: if args.implies { EntangleMode::Implies } else { EntangleMode::Iff },
        support: if args.unigen { Support::Grid } else { Support::None },
        ..EncodeConfig::default()
    };
    let encoding = encode(&block, &config)?;

    if args.metrics {
        let metrics = DesignMetrics::collect(&encoding);
        println!("{:#?}", metrics);
        return Ok(());
    }

    let out = if args.unigen {
        encoding.to_unigen()?
    } else {
        encoding.to_dimacs()?
    };
    print!("{}", out);

    Ok(())
}
