//! War scenario runner
//! The leader's country invades a weaker neighbour, negotiates peace and
//! then holds the conquered land.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use statecraft::core::types::{MilitaryStatus, RebellionId, TerritoryId};
use statecraft::core::{ConflictConfig, CountryProfile, CountryRegistry, Ledger};
use statecraft::simulation::{GameState, Leader, SimulationOutput};
use statecraft::war::{PeaceResponse, PeaceTerm, WarJustification, WarStrategy};

#[derive(Parser, Debug)]
#[command(name = "war_sim")]
#[command(about = "Run a war from declaration to occupation and print the outcome")]
struct Args {
    /// Random seed for reproducible runs
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Days to simulate
    #[arg(long, default_value_t = 720)]
    days: u32,

    /// TOML file overriding the default tuning
    #[arg(long)]
    config: Option<PathBuf>,

    /// Strategy for the invasion
    #[arg(long, value_enum, default_value_t = StrategyArg::Aggressive)]
    strategy: StrategyArg,

    /// Days between peace offers
    #[arg(long, default_value_t = 30)]
    offer_interval: u32,

    /// Print the full output as JSON instead of a summary
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StrategyArg {
    Aggressive,
    Balanced,
    Defensive,
    Attrition,
}

impl From<StrategyArg> for WarStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Aggressive => WarStrategy::Aggressive,
            StrategyArg::Balanced => WarStrategy::Balanced,
            StrategyArg::Defensive => WarStrategy::Defensive,
            StrategyArg::Attrition => WarStrategy::Attrition,
        }
    }
}

fn scenario_countries() -> CountryRegistry {
    vec![
        CountryProfile::new("USA", "United States", 25.0e12, 9_800_000.0)
            .with_population(330_000_000)
            .with_military(1_400_000),
        CountryProfile::new("CHN", "China", 18.0e12, 9_600_000.0)
            .with_population(1_400_000_000)
            .with_military(2_035_000),
        CountryProfile::new("MEX", "Mexico", 1.4e12, 1_960_000.0)
            .with_population(128_000_000)
            .with_military(220_000),
    ]
    .into_iter()
    .collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let args = Args::parse();
    let quiet = args.json;

    let config = match &args.config {
        Some(path) => ConflictConfig::load(path)?,
        None => ConflictConfig::default(),
    };

    let leader = Leader::new("President", "USA", MilitaryStatus::Strength(1_400_000));
    let treasury = Ledger::new(50.0e9);
    let mut game = GameState::new(config, args.seed, leader, scenario_countries(), treasury)?;

    let war = game.declare_war(&"MEX".into(), WarJustification::TerritorialDispute)?;
    let strategy: WarStrategy = args.strategy.into();
    if strategy != WarStrategy::Balanced {
        game.change_strategy(war, strategy)?;
    }

    if !quiet {
        println!("War Scenario");
        println!("============");
        println!("Seed {}, {} days, strategy {}", args.seed, args.days, strategy.name());
        println!("{} declared war on MEX ({})", game.leader.country, war);
        println!();
    }

    for day in 1..=args.days {
        let report = game.advance_day()?;

        if !quiet {
            for id in &report.concluded {
                println!("[{}] {} ended decisively", report.date, id);
            }
            for id in &report.annexed {
                println!("[{}] annexed {}", report.date, id);
            }
            for payment in &report.payments {
                println!(
                    "[{}] {} paid {} {:.0} in reparations",
                    report.date, payment.payer, payment.recipient, payment.amount
                );
            }
        }

        let offer_due = args.offer_interval > 0 && day % args.offer_interval == 0;
        if offer_due && game.wars.war(war).is_some() {
            let result = game.propose_peace(war, PeaceTerm::PartialTerritory)?;
            if !quiet {
                let verdict = match result.response {
                    PeaceResponse::Accepted => "accepted",
                    PeaceResponse::Rejected => "rejected",
                };
                println!(
                    "[{}] offered {} (p={:.2}): {}",
                    game.date,
                    result.term.name(),
                    result.likelihood,
                    verdict
                );
            }
        }

        let uprisings: Vec<RebellionId> =
            game.territories.active_rebellions().iter().map(|r| r.id).collect();
        for rebellion in uprisings {
            match game.suppress_rebellion(rebellion) {
                Ok(outcome) if !quiet => println!(
                    "[{}] suppression of {}: {} (p={:.2}, cost {:.0})",
                    game.date,
                    rebellion,
                    if outcome.success { "crushed" } else { "failed" },
                    outcome.probability,
                    outcome.cost
                ),
                Ok(_) => {}
                Err(e) => tracing::warn!("Could not suppress {}: {}", rebellion, e),
            }
        }

        if day % 90 == 0 {
            let held: Vec<TerritoryId> = game
                .territories
                .territories_owned_by(&game.leader.country)
                .map(|t| t.id)
                .collect();
            for territory in held {
                if let Err(e) = game.invest_in_territory(territory, 50.0e6) {
                    tracing::warn!("Skipped investment in {}: {}", territory, e);
                }
            }
        }
    }

    let output = SimulationOutput::new(&game, args.days);
    if args.json {
        println!("{}", output.to_json()?);
    } else {
        println!();
        println!("{}", output.summary());
    }

    Ok(())
}
